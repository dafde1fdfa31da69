//! Registry client for cifetch
//!
//! This crate provides functionality for:
//! - Parsing image references and mapping them to registry API hosts
//! - Probing a registry for its transport scheme and auth requirement
//! - Fetching schema-1 manifests with optional basic credentials
//! - Validating and normalizing the schema-1 layer parent chain
//!
//! # Example
//!
//! ```no_run
//! use cifetch_core::RuntimeConfig;
//! use cifetch_image::parse_image;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = RuntimeConfig::default();
//!     let image = parse_image("docker://busybox:latest", &config)?;
//!
//!     for digest in image.layers().await? {
//!         println!("{}", digest);
//!     }
//!
//!     Ok(())
//! }
//! ```
//!
//! Registries that only issue bearer tokens are not supported: the client
//! sends basic credentials and does not perform a token exchange.

pub mod error;
pub mod layers;
pub mod manifest;
pub mod ping;
pub mod reference;
pub mod registry;
pub mod source;
pub mod transport;

// Re-export main types for convenience
pub use error::{ChainIntegrityError, RegistryError, Result};
pub use layers::{fix_manifest_layers, validate_layer_id, LayerRecord};
pub use manifest::{FetchedManifest, FsLayer, ManifestSchema1, V1Compat};
pub use ping::{ApiError, RegistryEndpoint};
pub use reference::{ImageReference, Reference};
pub use registry::RegistryClient;
pub use source::{parse_image, DockerImage, ImageKind, ImageSource};
pub use transport::{Scheme, Transport};

/// Version of the cifetch-image crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
