//! The edit-propagation pipeline: diff-based span remapping, layer
//! reconciliation and structural-index correction.

/// Delta propagation into the structural index.
pub mod index;
/// Rewriting every layer of an edited volume.
pub mod reconcile;
/// The span-remapping contract and its diff implementation.
pub mod updater;

pub use index::shift_spans;
pub use reconcile::reconcile_layers;
pub use updater::{DiffUpdater, Updater};
