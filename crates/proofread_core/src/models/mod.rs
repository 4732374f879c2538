//! Data models for pecha layers, the structural index and metadata.

/// The document-wide structural index.
pub mod index;
/// Annotation layers over one volume's base text.
pub mod layer;
/// Document metadata (image groups per volume).
pub mod meta;
/// Inclusive-end character spans.
pub mod span;

pub use index::{PechaIndex, TextUnit};
pub use layer::{Annotation, Layer};
pub use meta::Meta;
pub use span::{IndexSpan, Span};
