//! Image source trait and prefix routing
//!
//! A raw image string such as `docker://busybox:latest` names its kind by
//! prefix. Each kind implements [`ImageSource`]; [`parse_image`] picks one.

use crate::error::{RegistryError, Result};
use crate::manifest::SCHEMA1_VERSION;
use crate::reference::ImageReference;
use crate::registry::RegistryClient;
use async_trait::async_trait;
use cifetch_core::{CredentialStore, RuntimeConfig};
use std::fmt;
use tracing::debug;

/// Prefix selecting the Docker registry source
pub const DOCKER_PREFIX: &str = "docker://";

/// Kinds of image source
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageKind {
    Docker,
}

impl fmt::Display for ImageKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ImageKind::Docker => f.write_str("docker"),
        }
    }
}

/// Something that can produce a manifest and a layer list
#[async_trait]
pub trait ImageSource: Send + Sync {
    /// Which kind of source this is
    fn kind(&self) -> ImageKind;

    /// Canonical name of the image
    fn name(&self) -> String;

    /// Manifest body exactly as served, once it has been validated
    async fn raw_manifest(&self, version: &str) -> Result<Vec<u8>>;

    /// Layer blob digests, top layer first
    async fn layers(&self) -> Result<Vec<String>>;
}

/// Image served by a Docker registry v2 API
pub struct DockerImage {
    reference: ImageReference,
    client: RegistryClient,
}

impl DockerImage {
    /// Resolve a prefix-stripped reference and look up its credentials
    pub fn new(reference: &str, config: &RuntimeConfig) -> Result<Self> {
        let reference = ImageReference::parse(reference)?;
        let credentials = CredentialStore::load(&config.credentials)?.get(reference.hostname())?;
        let client = RegistryClient::new(config, credentials)?;

        debug!("Resolved {} (registry {})", reference, reference.registry());
        Ok(Self { reference, client })
    }

    pub fn reference(&self) -> &ImageReference {
        &self.reference
    }
}

#[async_trait]
impl ImageSource for DockerImage {
    fn kind(&self) -> ImageKind {
        ImageKind::Docker
    }

    fn name(&self) -> String {
        self.reference.to_string()
    }

    async fn raw_manifest(&self, version: &str) -> Result<Vec<u8>> {
        if version != SCHEMA1_VERSION {
            return Err(RegistryError::UnsupportedManifestVersion {
                version: version.to_string(),
            });
        }
        let fetched = self.client.get_manifest(&self.reference).await?;
        Ok(fetched.raw)
    }

    async fn layers(&self) -> Result<Vec<String>> {
        let fetched = self.client.get_manifest(&self.reference).await?;
        Ok(fetched.manifest.layers())
    }
}

/// Select the image source for a raw image string by its prefix
pub fn parse_image(image: &str, config: &RuntimeConfig) -> Result<Box<dyn ImageSource>> {
    if let Some(reference) = image.strip_prefix(DOCKER_PREFIX) {
        return Ok(Box::new(DockerImage::new(reference, config)?));
    }
    Err(RegistryError::UnsupportedPrefix {
        image: image.to_string(),
    })
}
