//! Schema-1 layer chain validation
//!
//! Each `v1Compatibility` entry names a layer ID and its parent ID. Walking
//! from the base layer up, every layer's parent must be the layer below it.
//! Registries sometimes emit the same layer twice in a row; such runs are
//! collapsed to one entry. The same ID showing up again further away means
//! the manifest is malformed and is rejected outright.

use crate::error::{ChainIntegrityError, RegistryError, Result};
use crate::manifest::ManifestSchema1;
use regex::Regex;
use serde::{Deserialize, Deserializer};
use std::collections::HashSet;
use std::sync::LazyLock;
use tracing::{debug, trace};

static VALID_HEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[a-f0-9]{64}$").expect("layer ID regex is valid"));

/// Identifier and parent decoded from one `v1Compatibility` entry
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct LayerRecord {
    #[serde(default, alias = "ID", alias = "Id", deserialize_with = "null_as_empty")]
    pub id: String,
    #[serde(default, alias = "Parent", deserialize_with = "null_as_empty")]
    pub parent: String,
}

/// Registries write `null` for an absent parent; treat it like a missing key
fn null_as_empty<'de, D>(deserializer: D) -> std::result::Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

impl LayerRecord {
    /// Decode a `v1Compatibility` string
    pub fn decode(v1_compatibility: &str) -> Result<Self> {
        serde_json::from_str(v1_compatibility)
            .map_err(|e| RegistryError::decode("v1Compatibility entry", e))
    }
}

/// Whether `id` is 64 lowercase hex characters
pub fn is_valid_layer_id(id: &str) -> bool {
    VALID_HEX.is_match(id)
}

/// Reject any ID that is not 64 lowercase hex characters
pub fn validate_layer_id(id: &str) -> Result<()> {
    if is_valid_layer_id(id) {
        Ok(())
    } else {
        Err(RegistryError::InvalidLayerId { id: id.to_string() })
    }
}

/// Verify the parent chain of a schema-1 manifest and drop adjacent duplicates
///
/// On success `fs_layers` and `history` have equal length, the base entry has
/// no parent, and every surviving ID is unique. On failure the manifest is
/// left untouched.
pub fn fix_manifest_layers(manifest: &mut ManifestSchema1) -> Result<()> {
    let count = manifest.fs_layers.len();
    if count == 0 {
        return Err(ChainIntegrityError::EmptyManifest.into());
    }
    if manifest.history.len() != count {
        return Err(ChainIntegrityError::LengthMismatch {
            fs_layers: count,
            history: manifest.history.len(),
        }
        .into());
    }

    let records = manifest
        .history
        .iter()
        .map(|h| {
            let record = LayerRecord::decode(&h.v1_compatibility)?;
            validate_layer_id(&record.id)?;
            Ok(record)
        })
        .collect::<Result<Vec<_>>>()?;

    let base = &records[count - 1];
    if !base.parent.is_empty() {
        return Err(ChainIntegrityError::BaseLayerHasParent {
            parent: base.parent.clone(),
        }
        .into());
    }

    check_duplicates(&records)?;

    let keep = walk_chain(&records)?;
    if keep.iter().all(|k| *k) {
        trace!("Layer chain of {} entries is clean", count);
        return Ok(());
    }

    manifest.fs_layers = retain_by_mask(std::mem::take(&mut manifest.fs_layers), &keep);
    manifest.history = retain_by_mask(std::mem::take(&mut manifest.history), &keep);

    debug!(
        "Removed {} duplicate layer entries ({} remain)",
        count - manifest.fs_layers.len(),
        manifest.fs_layers.len()
    );
    Ok(())
}

/// Fail if an ID recurs anywhere other than directly after itself
fn check_duplicates(records: &[LayerRecord]) -> Result<()> {
    let mut seen = HashSet::with_capacity(records.len());
    let mut last_id: Option<&str> = None;

    for record in records {
        let id = record.id.as_str();
        if last_id != Some(id) && seen.contains(id) {
            return Err(ChainIntegrityError::DuplicateId { id: id.to_string() }.into());
        }
        seen.insert(id);
        last_id = Some(id);
    }
    Ok(())
}

/// Walk from the base up, returning which entries survive
///
/// Of each run of equal IDs the entry nearest the base is kept.
fn walk_chain(records: &[LayerRecord]) -> Result<Vec<bool>> {
    let mut keep = vec![true; records.len()];

    for (i, pair) in records.windows(2).enumerate().rev() {
        let (child, parent) = (&pair[0], &pair[1]);
        if child.id == parent.id {
            trace!("Dropping repeated layer {} at position {}", child.id, i);
            keep[i] = false;
        } else if child.parent != parent.id {
            return Err(ChainIntegrityError::ParentMismatch {
                expected: parent.id.clone(),
                got: child.parent.clone(),
            }
            .into());
        }
    }

    Ok(keep)
}

fn retain_by_mask<T>(items: Vec<T>, keep: &[bool]) -> Vec<T> {
    items
        .into_iter()
        .zip(keep)
        .filter_map(|(item, keep)| keep.then_some(item))
        .collect()
}
