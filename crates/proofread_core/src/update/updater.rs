//! Span remapping driven by a character-level text diff.

use similar::{DiffOp, DiffTag, TextDiff};

use crate::models::{Layer, Span};

/// Remaps annotation spans after a base-text change.
///
/// An updater is constructed once per edit from the old and new volume
/// text and applied to every layer of that volume, so all layers see
/// offsets derived from the same diff.
pub trait Updater {
    /// Map a character offset in the old text to the new text.
    fn remap(&self, offset: usize) -> usize;

    /// Remap a whole span, keeping it ordered.
    ///
    /// The inclusive `end` is remapped through the exclusive offset
    /// one past it, so a span ending inside a replaced run stretches
    /// over the whole replacement instead of collapsing to its start.
    fn remap_span(&self, span: Span) -> Span {
        let start = self.remap(span.start);
        let end = self.remap(span.end + 1).saturating_sub(1).max(start);
        Span { start, end }
    }

    /// Rewrite every span of `layer` in place.
    fn update_layer(&self, layer: &mut Layer) {
        for ann in layer.annotations.values_mut() {
            ann.span = self.remap_span(ann.span);
        }
    }
}

/// [`Updater`] backed by a character diff from the `similar` crate.
///
/// The diff is computed eagerly; remapping walks the edit script. An
/// offset inside an equal run translates exactly, an offset inside a
/// deleted or replaced run lands at the start of whatever replaced it,
/// clamped into the replacement.
pub struct DiffUpdater {
    ops: Vec<DiffOp>,
    old_len: usize,
    new_len: usize,
}

impl DiffUpdater {
    pub fn new(old_text: &str, new_text: &str) -> Self {
        let diff = TextDiff::from_chars(old_text, new_text);
        Self {
            ops: diff.ops().to_vec(),
            old_len: old_text.chars().count(),
            new_len: new_text.chars().count(),
        }
    }
}

impl Updater for DiffUpdater {
    fn remap(&self, offset: usize) -> usize {
        for op in &self.ops {
            let old = op.old_range();
            if !old.contains(&offset) {
                continue;
            }
            let new = op.new_range();
            return match op.tag() {
                DiffTag::Equal => new.start + (offset - old.start),
                _ => new.start + (offset - old.start).min(new.len().saturating_sub(1)),
            };
        }
        // Offset at or past the old end of text: shift by the total
        // length delta.
        let shifted = offset as i64 + self.new_len as i64 - self.old_len as i64;
        shifted.max(0) as usize
    }
}
