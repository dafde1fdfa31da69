//! Schema-1 image manifest types

use crate::error::{RegistryError, Result};
use serde::{Deserialize, Serialize};

/// Media types accepted when requesting a schema-1 manifest
pub const SCHEMA1_MEDIA_TYPES: &[&str] = &[
    "application/vnd.docker.distribution.manifest.v1+prettyjws",
    "application/vnd.docker.distribution.manifest.v1+json",
    "application/json",
];

/// Manifest version selector for schema 2, version 1
pub const SCHEMA1_VERSION: &str = "2-1";

/// Schema-1 manifest
///
/// `fs_layers` and `history` are parallel: index `i` of both describes the
/// same layer, top layer first and base layer last.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ManifestSchema1 {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub schema_version: Option<u16>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tag: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub architecture: Option<String>,
    #[serde(default)]
    pub fs_layers: Vec<FsLayer>,
    #[serde(default)]
    pub history: Vec<V1Compat>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FsLayer {
    pub blob_sum: String,
}

/// Legacy per-layer metadata, itself a JSON document encoded as a string
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct V1Compat {
    pub v1_compatibility: String,
}

impl ManifestSchema1 {
    /// Decode a manifest body
    pub fn from_slice(body: &[u8]) -> Result<Self> {
        serde_json::from_slice(body).map_err(|e| RegistryError::decode("schema-1 manifest", e))
    }

    /// Layer blob digests, top layer first
    pub fn layers(&self) -> Vec<String> {
        self.fs_layers.iter().map(|l| l.blob_sum.clone()).collect()
    }
}

/// A manifest as returned by the registry, after validation
#[derive(Debug, Clone)]
pub struct FetchedManifest {
    /// Body exactly as served
    pub raw: Vec<u8>,
    /// Decoded and normalized document
    pub manifest: ManifestSchema1,
}
