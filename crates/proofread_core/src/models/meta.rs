//! Pecha metadata (`meta.yml`).

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_yaml::Value;
use std::collections::BTreeMap;

/// Source description of one volume.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VolumeMeta {
    pub volume_number: u32,
    pub image_group_id: String,
    #[serde(flatten)]
    pub extra: BTreeMap<String, Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SourceMetadata {
    #[serde(default)]
    pub volumes: IndexMap<String, VolumeMeta>,
    #[serde(flatten)]
    pub extra: BTreeMap<String, Value>,
}

/// Document-level metadata record.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Meta {
    #[serde(default)]
    pub source_metadata: SourceMetadata,
    #[serde(flatten)]
    pub extra: BTreeMap<String, Value>,
}

impl Meta {
    /// Image group for the volume with the given ordinal, if any.
    ///
    /// Volumes are keyed by opaque ids in the metadata, so the lookup
    /// matches on the `volume_number` field.
    pub fn image_group_id(&self, vol_num: u32) -> Option<&str> {
        self.source_metadata
            .volumes
            .values()
            .find(|vol| vol.volume_number == vol_num)
            .map(|vol| vol.image_group_id.as_str())
    }
}
