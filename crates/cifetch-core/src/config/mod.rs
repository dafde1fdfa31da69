//! Configuration loading and management

mod loader;
mod runtime;

pub use loader::HierarchicalConfigLoader;
pub use runtime::{CredentialsConfig, NetworkConfig, RuntimeConfig, TlsConfig};
