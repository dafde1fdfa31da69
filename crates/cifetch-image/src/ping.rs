//! Registry endpoint resolution
//!
//! Probes `GET /v2/` to learn which scheme reaches the registry and whether
//! it wants credentials. HTTPS is tried first; only a transport-level failure
//! leads to a single retry over plain HTTP. A bad status on either attempt is
//! returned as is.

use crate::error::{RegistryError, Result};
use crate::transport::{Scheme, Transport};
use reqwest::header::WWW_AUTHENTICATE;
use reqwest::StatusCode;
use serde::Deserialize;
use std::future::Future;
use tracing::{debug, info, warn};

/// Header carrying the registry's protocol version
pub const API_VERSION_HEADER: &str = "Docker-Distribution-Api-Version";

/// One entry of the error list a registry returns with a 401
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ApiError {
    #[serde(default, alias = "Code")]
    pub code: String,
    #[serde(default, alias = "Message")]
    pub message: String,
    #[serde(default, alias = "Detail")]
    pub detail: serde_json::Value,
}

#[derive(Debug, Deserialize)]
struct ApiErrors {
    #[serde(default, alias = "Errors")]
    errors: Vec<ApiError>,
}

/// Outcome of probing a registry
#[derive(Debug, Clone, PartialEq)]
pub struct RegistryEndpoint {
    pub scheme: Scheme,
    pub host: String,
    /// Authentication challenge, empty when the registry sent none
    pub www_authenticate: String,
    /// Protocol version advertised by the registry, empty when absent
    pub api_version: String,
    /// Errors decoded from a 401 body
    pub errors: Vec<ApiError>,
}

impl RegistryEndpoint {
    /// Whether requests to this endpoint need credentials
    ///
    /// Decided by the presence of a challenge header only, not by status code.
    pub fn needs_auth(&self) -> bool {
        !self.www_authenticate.is_empty()
    }

    /// Base URL of the v2 API, e.g. `https://registry-1.docker.io/v2/`
    pub fn base_url(&self) -> String {
        format!("{}://{}/v2/", self.scheme, self.host)
    }

    /// Whether the challenge asks for a bearer token exchange
    pub fn wants_bearer(&self) -> bool {
        self.www_authenticate
            .trim_start()
            .get(..6)
            .is_some_and(|s| s.eq_ignore_ascii_case("bearer"))
    }
}

/// Resolve the endpoint for a registry host
pub async fn ping(transport: &Transport, host: &str) -> Result<RegistryEndpoint> {
    with_fallback(host, transport.plain_http_fallback(), |scheme| {
        ping_scheme(transport, host, scheme)
    })
    .await
}

/// Run `attempt` over HTTPS, then once over HTTP if that failed in transport
async fn with_fallback<T, F, Fut>(
    host: &str,
    plain_http_fallback: bool,
    mut attempt: F,
) -> Result<T>
where
    F: FnMut(Scheme) -> Fut,
    Fut: Future<Output = Result<T>>,
{
    match attempt(Scheme::Https).await {
        Ok(value) => Ok(value),
        Err(err) if err.is_transport() && plain_http_fallback => {
            info!("HTTPS probe of {} failed ({}), retrying over HTTP", host, err);
            attempt(Scheme::Http).await
        }
        Err(err) => Err(err),
    }
}

async fn ping_scheme(
    transport: &Transport,
    host: &str,
    scheme: Scheme,
) -> Result<RegistryEndpoint> {
    let url = format!("{}://{}/v2/", scheme, host);
    debug!("Pinging registry at {}", url);

    let response = transport
        .client()
        .get(&url)
        .timeout(transport.probe_timeout())
        .send()
        .await
        .map_err(|e| RegistryError::transport(&url, e))?;

    let status = response.status();
    if status != StatusCode::OK && status != StatusCode::UNAUTHORIZED {
        return Err(RegistryError::unexpected_status(&url, status));
    }

    let header = |name: &str| {
        response
            .headers()
            .get(name)
            .and_then(|v| v.to_str().ok())
            .unwrap_or_default()
            .to_string()
    };
    let www_authenticate = header(WWW_AUTHENTICATE.as_str());
    let api_version = header(API_VERSION_HEADER);

    let errors = if status == StatusCode::UNAUTHORIZED {
        let body = response
            .bytes()
            .await
            .map_err(|e| RegistryError::transport(&url, e))?;
        let decoded: ApiErrors = serde_json::from_slice(&body)
            .map_err(|e| RegistryError::decode(format!("error body from {}", url), e))?;
        if www_authenticate.is_empty() {
            warn!("{} answered 401 without an authentication challenge", url);
        }
        decoded.errors
    } else {
        Vec::new()
    };

    debug!(
        "Registry {} reachable over {} (auth challenge: {:?}, api version: {:?})",
        host, scheme, www_authenticate, api_version
    );

    Ok(RegistryEndpoint {
        scheme,
        host: host.to_string(),
        www_authenticate,
        api_version,
        errors,
    })
}
