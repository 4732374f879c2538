//! Inclusive-end character spans over a volume's base text.

use serde::{Deserialize, Serialize};

use crate::error::ProofreadError;

/// A `(start, end)` pair of character offsets, `end` inclusive.
///
/// Offsets count Unicode scalar values, not bytes. The base texts are
/// Tibetan and multi-byte throughout, so byte offsets would land inside
/// code points.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Span {
    pub start: usize,
    pub end: usize,
}

impl Span {
    /// Number of characters covered by the span, zero when inverted.
    pub fn char_len(&self) -> usize {
        self.end.checked_sub(self.start).map_or(0, |gap| gap + 1)
    }

    /// Extract the covered characters from `text`.
    ///
    /// # Errors
    /// Returns `OutOfRange` when `end` is not a valid character offset
    /// into `text`, and `InvalidInput` when the span is inverted
    /// (`start > end`), as happens with a corrupt layer file.
    pub fn slice(&self, text: &str) -> Result<String, ProofreadError> {
        if self.start > self.end {
            return Err(ProofreadError::InvalidInput(format!(
                "span start {} is past its end {}",
                self.start, self.end
            )));
        }
        let len = text.chars().count();
        if self.end >= len {
            return Err(ProofreadError::OutOfRange { end: self.end, len });
        }
        Ok(text.chars().skip(self.start).take(self.char_len()).collect())
    }
}

/// One per-volume entry in a structural-index span sequence.
///
/// The index stores `vol`, `start` and `end` flat in each entry, unlike
/// layer annotations which nest them under a `span` key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct IndexSpan {
    pub vol: u32,
    pub start: usize,
    pub end: usize,
}
