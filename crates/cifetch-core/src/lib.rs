//! # cifetch-core
//!
//! Core library for cifetch providing:
//! - Runtime configuration (network deadlines, TLS policy)
//! - Hierarchical configuration loading (defaults, file, environment)
//! - Registry credential lookup from the Docker client config

pub mod config;
pub mod credentials;
pub mod error;
pub mod utils;

pub use config::{
    CredentialsConfig, HierarchicalConfigLoader, NetworkConfig, RuntimeConfig, TlsConfig,
};
pub use credentials::{CredentialStore, Credentials};
pub use error::{Error, Result};
pub use utils::get_home_dir;
