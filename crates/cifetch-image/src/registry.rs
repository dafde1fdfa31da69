use crate::error::{RegistryError, Result};
use crate::layers::fix_manifest_layers;
use crate::manifest::{FetchedManifest, ManifestSchema1, SCHEMA1_MEDIA_TYPES};
use crate::ping::{ping, RegistryEndpoint};
use crate::reference::ImageReference;
use crate::transport::Transport;
use cifetch_core::{Credentials, RuntimeConfig};
use reqwest::header::ACCEPT;
use reqwest::StatusCode;
use tracing::{debug, info, warn};

/// Request header naming the distribution protocol version
const API_VERSION_REQUEST_HEADER: &str = "Docker-Distribution-API-Version";
const API_VERSION: &str = "registry/2.0";

/// Client for the registry v2 API
///
/// Holds no registry state between calls: every fetch probes the endpoint again.
pub struct RegistryClient {
    transport: Transport,
    credentials: Credentials,
}

impl RegistryClient {
    /// Create a new registry client
    pub fn new(config: &RuntimeConfig, credentials: Credentials) -> Result<Self> {
        Ok(Self {
            transport: Transport::new(config)?,
            credentials,
        })
    }

    /// Probe a registry host for its scheme and auth requirement
    pub async fn ping(&self, host: &str) -> Result<RegistryEndpoint> {
        ping(&self.transport, host).await
    }

    /// Fetch, decode, and validate the schema-1 manifest of an image
    ///
    /// Nothing is returned unless the layer chain validates.
    pub async fn get_manifest(&self, image: &ImageReference) -> Result<FetchedManifest> {
        let endpoint = self.ping(image.registry()).await?;
        let url = format!(
            "{}{}/manifests/{}",
            endpoint.base_url(),
            image.remote_name(),
            image.tag_or_digest()
        );

        info!("Fetching manifest from: {}", url);

        let mut request = self
            .transport
            .client()
            .get(&url)
            .timeout(self.transport.fetch_timeout())
            .header(API_VERSION_REQUEST_HEADER, API_VERSION)
            .header(ACCEPT, SCHEMA1_MEDIA_TYPES.join(", "));

        if endpoint.needs_auth() {
            if endpoint.wants_bearer() {
                // Token exchange is not implemented; basic credentials are all we can offer.
                warn!(
                    "{} requests bearer token auth, which is not supported; sending basic credentials",
                    endpoint.host
                );
            }
            if self.credentials.is_empty() {
                debug!("No credentials configured for {}", image.hostname());
            } else {
                debug!("Using basic auth as {}", self.credentials.username);
                request = request.basic_auth(
                    &self.credentials.username,
                    Some(&self.credentials.password),
                );
            }
        }

        let response = request
            .send()
            .await
            .map_err(|e| RegistryError::transport(&url, e))?;

        let status = response.status();
        if status != StatusCode::OK {
            return Err(RegistryError::unexpected_status(&url, status));
        }

        let raw = response
            .bytes()
            .await
            .map_err(|e| RegistryError::transport(&url, e))?
            .to_vec();

        let mut manifest = ManifestSchema1::from_slice(&raw)?;
        fix_manifest_layers(&mut manifest)?;

        debug!("Manifest {} has {} layers", image, manifest.fs_layers.len());
        Ok(FetchedManifest { raw, manifest })
    }
}
