//! Annotation layer documents (`layers/vNNN/<Name>.yml`).

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_yaml::Value;
use std::collections::BTreeMap;

use super::span::Span;

/// A single positional annotation within a layer.
///
/// Only `span` is interpreted here; `reference` is the opaque image
/// locator carried by pagination annotations. Anything else a layer
/// schema adds is preserved through a load/store round-trip untouched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Annotation {
    pub span: Span,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reference: Option<String>,
    #[serde(flatten)]
    pub extra: BTreeMap<String, Value>,
}

/// A named layer of annotations over one volume's base text.
///
/// Annotation ids are opaque unique strings; insertion order follows
/// the on-disk document and is kept stable across rewrites.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Layer {
    #[serde(default)]
    pub annotations: IndexMap<String, Annotation>,
    #[serde(flatten)]
    pub extra: BTreeMap<String, Value>,
}

impl Layer {
    /// Look up an annotation by id.
    pub fn annotation(&self, id: &str) -> Option<&Annotation> {
        self.annotations.get(id)
    }
}
