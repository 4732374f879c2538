//! Root crate facade for the pecha proofreading toolkit.

pub use proofread_core::{config, editor, error, models, store, update};
pub use proofread_core::{Config, DiffUpdater, OpfStore, PageEditor, ProofreadError, Updater};
