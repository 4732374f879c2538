//! Core domain library for pecha proofreading (models, store, edit pipeline).

/// Configuration loading and defaults.
pub mod config;
/// Page retrieval and the page-edit orchestration.
pub mod editor;
/// Error types (store/domain).
pub mod error;
/// Data models for layers, the structural index and metadata.
pub mod models;
/// On-disk access to a pecha's `.opf` layout.
pub mod store;
/// Diff-based span remapping and layer/index realignment.
pub mod update;

pub use config::Config;
pub use editor::{PageEditor, PageInfo, SaveOutcome};
pub use error::ProofreadError;
pub use store::OpfStore;
pub use update::{DiffUpdater, Updater};

#[cfg(test)]
pub(crate) mod test_support;
