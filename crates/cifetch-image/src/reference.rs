//! Image reference parsing
//!
//! Parses Docker-style references (registry prefix already stripped):
//! - `busybox` -> docker.io/library/busybox:latest
//! - `myuser/myapp:v1.0`
//! - `registry.example.com:5000/team/app@sha256:...`
//!
//! The public `docker.io` alias is served by a different API host, so a
//! resolved reference carries both the hostname and the registry to contact.

use crate::error::{RegistryError, Result};
use crate::layers::is_valid_layer_id;
use regex::Regex;
use std::fmt;
use std::sync::LazyLock;

/// Hostname used when a reference names no registry
pub const DEFAULT_HOSTNAME: &str = "docker.io";

/// API host backing the `docker.io` alias
pub const DEFAULT_REGISTRY: &str = "registry-1.docker.io";

/// Tag assigned to name-only references
pub const DEFAULT_TAG: &str = "latest";

const OFFICIAL_NAMESPACE: &str = "library";
const LEGACY_HOSTNAME: &str = "index.docker.io";
const NAME_TOTAL_LENGTH_MAX: usize = 255;

static PATH_COMPONENT_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[a-z0-9]+(?:(?:[._]|__|[-]*)[a-z0-9]+)*$").expect("path component regex is valid")
});

static DOMAIN_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^(?:[a-zA-Z0-9]|[a-zA-Z0-9][a-zA-Z0-9-]*[a-zA-Z0-9])(?:\.(?:[a-zA-Z0-9]|[a-zA-Z0-9][a-zA-Z0-9-]*[a-zA-Z0-9]))*(?::[0-9]+)?$",
    )
    .expect("domain regex is valid")
});

static TAG_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[\w][\w.-]{0,127}$").expect("tag regex is valid"));

static DIGEST_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[A-Za-z][A-Za-z0-9]*(?:[-_+.][A-Za-z][A-Za-z0-9]*)*:[0-9a-fA-F]{32,}$")
        .expect("digest regex is valid")
});

/// Tag or digest selecting one manifest of a repository
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Reference {
    Tag(String),
    Digest(String),
}

impl Reference {
    pub fn as_str(&self) -> &str {
        match self {
            Reference::Tag(tag) => tag,
            Reference::Digest(digest) => digest,
        }
    }
}

/// Parsed image reference
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ImageReference {
    /// Hostname as written (or defaulted), e.g. "docker.io"
    hostname: String,
    /// Repository path without hostname, e.g. "library/busybox"
    remote_name: String,
    /// Exactly one of tag or digest
    reference: Reference,
}

impl ImageReference {
    /// Parse an image reference string
    pub fn parse(input: &str) -> Result<Self> {
        let err = |reason: &str| RegistryError::reference_parse(input, reason);
        if input.is_empty() {
            return Err(err("empty reference"));
        }
        if input.chars().any(char::is_whitespace) {
            return Err(err("reference must not contain whitespace"));
        }

        let (name_and_tag, digest) = match input.split_once('@') {
            Some((rest, digest)) => {
                if !DIGEST_RE.is_match(digest) {
                    return Err(err("invalid digest format"));
                }
                (rest, Some(digest.to_string()))
            }
            None => (input, None),
        };

        // A colon after the last slash separates the tag; earlier colons belong to a port.
        let last_slash = name_and_tag.rfind('/');
        let (name, tag) = match name_and_tag.rfind(':') {
            Some(idx) if last_slash.map_or(true, |slash| idx > slash) => {
                let tag = &name_and_tag[idx + 1..];
                if !TAG_RE.is_match(tag) {
                    return Err(err("invalid tag format"));
                }
                (&name_and_tag[..idx], Some(tag.to_string()))
            }
            _ => (name_and_tag, None),
        };

        if name.is_empty() {
            return Err(err("missing repository name"));
        }
        if name.len() > NAME_TOTAL_LENGTH_MAX {
            return Err(err("repository name must not be more than 255 characters"));
        }

        let (hostname, remote_name) = split_hostname(name);
        if !DOMAIN_RE.is_match(&hostname) {
            return Err(err("invalid registry hostname"));
        }
        if remote_name.split('/').any(|c| !PATH_COMPONENT_RE.is_match(c)) {
            return Err(err("repository name must be lowercase alphanumeric components"));
        }
        if is_valid_layer_id(short_name(&hostname, &remote_name)) {
            return Err(err("cannot specify 64-byte hexadecimal strings"));
        }

        let reference = match (digest, tag) {
            (Some(digest), _) => Reference::Digest(digest),
            (None, Some(tag)) => Reference::Tag(tag),
            (None, None) => Reference::Tag(DEFAULT_TAG.to_string()),
        };

        Ok(Self {
            hostname,
            remote_name,
            reference,
        })
    }

    /// Hostname named by the reference
    pub fn hostname(&self) -> &str {
        &self.hostname
    }

    /// Host whose API serves this repository
    pub fn registry(&self) -> &str {
        if self.hostname == DEFAULT_HOSTNAME {
            DEFAULT_REGISTRY
        } else {
            &self.hostname
        }
    }

    /// Repository path used in API request paths
    pub fn remote_name(&self) -> &str {
        &self.remote_name
    }

    pub fn reference(&self) -> &Reference {
        &self.reference
    }

    pub fn tag(&self) -> Option<&str> {
        match &self.reference {
            Reference::Tag(tag) => Some(tag),
            Reference::Digest(_) => None,
        }
    }

    pub fn digest(&self) -> Option<&str> {
        match &self.reference {
            Reference::Digest(digest) => Some(digest),
            Reference::Tag(_) => None,
        }
    }

    /// Tag or digest as used in the manifest request path
    pub fn tag_or_digest(&self) -> &str {
        self.reference.as_str()
    }
}

impl fmt::Display for ImageReference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.reference {
            Reference::Tag(tag) => write!(f, "{}/{}:{}", self.hostname, self.remote_name, tag),
            Reference::Digest(digest) => {
                write!(f, "{}/{}@{}", self.hostname, self.remote_name, digest)
            }
        }
    }
}

fn split_hostname(name: &str) -> (String, String) {
    let (hostname, remote) = match name.split_once('/') {
        Some((LEGACY_HOSTNAME, rest)) => (DEFAULT_HOSTNAME.to_string(), rest.to_string()),
        Some((first, rest))
            if first.contains('.') || first.contains(':') || first == "localhost" =>
        {
            (first.to_string(), rest.to_string())
        }
        _ => (DEFAULT_HOSTNAME.to_string(), name.to_string()),
    };

    if hostname == DEFAULT_HOSTNAME && !remote.contains('/') {
        return (hostname, format!("{}/{}", OFFICIAL_NAMESPACE, remote));
    }
    (hostname, remote)
}

/// Repository name as written for the default registry, without `library/`
fn short_name<'a>(hostname: &str, remote_name: &'a str) -> &'a str {
    if hostname == DEFAULT_HOSTNAME {
        if let Some(rest) = remote_name.strip_prefix(OFFICIAL_NAMESPACE) {
            if let Some(rest) = rest.strip_prefix('/') {
                return rest;
            }
        }
    }
    remote_name
}
