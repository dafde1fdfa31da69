//! Error types for registry operations
//!
//! Every error is terminal for the operation that raised it. The only retry
//! anywhere is the single plain-HTTP fallback during endpoint resolution.

use thiserror::Error;

/// Result type alias for registry operations
pub type Result<T> = std::result::Result<T, RegistryError>;

/// Errors that can occur while resolving, fetching, or validating an image
#[derive(Error, Debug)]
pub enum RegistryError {
    /// Malformed or unsupported image reference
    #[error("Invalid image reference '{reference}': {reason}")]
    ReferenceParse { reference: String, reason: String },

    /// No image source handles the given prefix
    #[error("No valid image prefix in '{image}' (supported: docker://)")]
    UnsupportedPrefix { image: String },

    /// Connection-level failure talking to the registry
    #[error("Failed to reach {url}: {source}")]
    Transport {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    /// Status code outside the accepted set for the request
    #[error("Unexpected status {status} from {url}")]
    UnexpectedStatus { url: String, status: u16 },

    /// Malformed body at a JSON decode point
    #[error("Failed to decode {what}: {source}")]
    Decode {
        what: String,
        #[source]
        source: serde_json::Error,
    },

    /// Layer identifier is not 64 lowercase hex characters
    #[error("Image ID {id:?} is invalid")]
    InvalidLayerId { id: String },

    /// Parent chain declared by the manifest is broken
    #[error(transparent)]
    ChainIntegrity(#[from] ChainIntegrityError),

    /// Requested manifest schema is not supported
    #[error("Unsupported manifest version '{version}' (supported: 2-1)")]
    UnsupportedManifestVersion { version: String },

    /// Configuration or credential lookup failed
    #[error(transparent)]
    Config(#[from] cifetch_core::Error),
}

/// Ways a schema-1 layer chain can fail validation
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ChainIntegrityError {
    #[error("Manifest has no layers")]
    EmptyManifest,

    #[error("Manifest lists {fs_layers} fsLayers but {history} history entries")]
    LengthMismatch { fs_layers: usize, history: usize },

    #[error("Invalid parent ID {parent:?} in the base layer of the image")]
    BaseLayerHasParent { parent: String },

    #[error("ID {id} appears multiple times in manifest")]
    DuplicateId { id: String },

    #[error("Invalid parent ID. Expected {expected}, got {got}")]
    ParentMismatch { expected: String, got: String },
}

impl RegistryError {
    pub fn reference_parse(reference: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::ReferenceParse {
            reference: reference.into(),
            reason: reason.into(),
        }
    }

    pub fn transport(url: impl Into<String>, source: reqwest::Error) -> Self {
        Self::Transport {
            url: url.into(),
            source,
        }
    }

    pub fn unexpected_status(url: impl Into<String>, status: reqwest::StatusCode) -> Self {
        Self::UnexpectedStatus {
            url: url.into(),
            status: status.as_u16(),
        }
    }

    pub fn decode(what: impl Into<String>, source: serde_json::Error) -> Self {
        Self::Decode {
            what: what.into(),
            source,
        }
    }

    /// True for connection-level failures, the only kind that triggers scheme fallback
    pub fn is_transport(&self) -> bool {
        matches!(self, Self::Transport { .. })
    }

    /// Status code carried by an `UnexpectedStatus` error
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::UnexpectedStatus { status, .. } => Some(*status),
            _ => None,
        }
    }
}
