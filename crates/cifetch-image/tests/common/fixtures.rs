//! Manifest and config fixtures

use super::constants::*;
use cifetch_core::RuntimeConfig;
use serde_json::{json, Value};
use tempfile::TempDir;

/// Build a schema-1 manifest body from (blob digest, layer ID, parent ID) triples,
/// top layer first
pub fn schema1_manifest(name: &str, tag: &str, layers: &[(&str, &str, &str)]) -> Value {
    let fs_layers: Vec<Value> = layers
        .iter()
        .map(|(blob, _, _)| json!({ "blobSum": blob }))
        .collect();
    let history: Vec<Value> = layers
        .iter()
        .map(|(_, id, parent)| {
            let mut v1 = json!({ "id": id, "created": "2016-03-01T18:51:14.743Z" });
            if !parent.is_empty() {
                v1["parent"] = json!(parent);
            }
            json!({ "v1Compatibility": v1.to_string() })
        })
        .collect();

    json!({
        "schemaVersion": 1,
        "name": name,
        "tag": tag,
        "architecture": "amd64",
        "fsLayers": fs_layers,
        "history": history,
        "signatures": []
    })
}

/// Three distinct layers in correct parent order
pub fn valid_manifest(name: &str, tag: &str) -> Value {
    schema1_manifest(
        name,
        tag,
        &[
            (BLOB_TOP, LAYER_TOP, LAYER_MID),
            (BLOB_MID, LAYER_MID, LAYER_BASE),
            (BLOB_BASE, LAYER_BASE, ""),
        ],
    )
}

/// Valid chain with the middle layer listed twice in a row
pub fn manifest_with_adjacent_duplicate(name: &str, tag: &str) -> Value {
    schema1_manifest(
        name,
        tag,
        &[
            (BLOB_TOP, LAYER_TOP, LAYER_MID),
            (BLOB_MID, LAYER_MID, LAYER_BASE),
            (BLOB_MID, LAYER_MID, LAYER_BASE),
            (BLOB_BASE, LAYER_BASE, ""),
        ],
    )
}

/// Top layer claims a parent that is not the layer below it
pub fn manifest_with_broken_chain(name: &str, tag: &str) -> Value {
    schema1_manifest(
        name,
        tag,
        &[
            (BLOB_TOP, LAYER_TOP, LAYER_OTHER),
            (BLOB_MID, LAYER_MID, LAYER_BASE),
            (BLOB_BASE, LAYER_BASE, ""),
        ],
    )
}

/// Runtime config with short deadlines and credentials read from a temp dir
pub fn test_config() -> (RuntimeConfig, TempDir) {
    let temp = TempDir::new().unwrap();
    let mut config = RuntimeConfig::default();
    config.network.connect_timeout_secs = 2;
    config.network.probe_timeout_secs = 5;
    config.network.fetch_timeout_secs = 5;
    config.credentials.docker_config_dir = Some(temp.path().display().to_string());
    (config, temp)
}

/// Write a Docker `config.json` with one username/password entry
pub fn write_docker_config(dir: &TempDir, host: &str, username: &str, password: &str) {
    let content = json!({
        "auths": {
            host: { "username": username, "password": password }
        }
    });
    std::fs::write(dir.path().join("config.json"), content.to_string()).unwrap();
}
