//! The document-wide structural index (`index.yml`).

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_yaml::Value;
use std::collections::BTreeMap;

use super::span::IndexSpan;

/// One logical text unit and its spans across volumes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextUnit {
    /// Per-volume spans, ordered by non-decreasing `vol`.
    pub span: Vec<IndexSpan>,
    #[serde(flatten)]
    pub extra: BTreeMap<String, Value>,
}

/// The structural index of a whole pecha.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PechaIndex {
    #[serde(default)]
    pub annotations: IndexMap<String, TextUnit>,
    #[serde(flatten)]
    pub extra: BTreeMap<String, Value>,
}
