//! Rewrites every annotation layer of a volume after a base edit.

use crate::error::ProofreadError;
use crate::models::Layer;
use crate::store::{volume_id, OpfStore};

use super::updater::Updater;

/// Load, remap and persist all layers of a volume.
///
/// One updater is shared across every layer, so offsets everywhere are
/// corrected from a single diff of the volume text. No layer is
/// skipped, including the pagination layer the edit came from. All
/// layers are loaded and remapped before the first write, so a load or
/// parse failure leaves the store untouched.
///
/// # Errors
/// Propagates store errors; a failure while writing leaves earlier
/// layers already rewritten (see the crate docs on atomicity).
pub fn reconcile_layers(
    store: &OpfStore,
    vol_num: u32,
    updater: &dyn Updater,
) -> Result<(), ProofreadError> {
    let names = store.layer_names(vol_num)?;
    let mut staged: Vec<(String, Layer)> = Vec::with_capacity(names.len());
    for name in names {
        let mut layer = store.read_layer(vol_num, &name)?;
        updater.update_layer(&mut layer);
        staged.push((name, layer));
    }
    for (name, layer) in &staged {
        store.write_layer(vol_num, name, layer)?;
        tracing::info!("{} {} has been updated", volume_id(vol_num), name);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::reconcile_layers;
    use crate::test_support::setup_temp_pecha;
    use crate::update::DiffUpdater;

    #[test]
    fn all_layers_are_rewritten_from_one_diff() {
        let (store, _temp) = setup_temp_pecha();
        // "page" -> "PAGETEXT" at offset 3, delta +4.
        let updater = DiffUpdater::new("ABCpageDEF", "ABCPAGETEXTDEF");

        reconcile_layers(&store, 1, &updater).expect("reconcile");

        let pagination = store.read_pagination(1).expect("pagination");
        let after = pagination.annotation("page-0003").expect("page-0003");
        // Page after the edit point shifted by +4.
        assert_eq!(after.span.start, 11);
        assert_eq!(after.span.end, 13);
        let before = pagination.annotation("page-0001").expect("page-0001");
        assert_eq!(before.span.start, 0);
        assert_eq!(before.span.end, 2);

        // The sibling layer went through the same updater.
        let citation = store.read_layer(1, "Citation").expect("citation");
        let cite = citation.annotation("cite-0001").expect("cite-0001");
        assert_eq!(cite.span.end, 13);
    }

    #[test]
    fn unchanged_text_leaves_layers_identical() {
        let (store, _temp) = setup_temp_pecha();
        let pagination_before = store.read_pagination(1).expect("pagination");
        let updater = DiffUpdater::new("ABCpageDEF", "ABCpageDEF");

        reconcile_layers(&store, 1, &updater).expect("reconcile");

        let pagination_after = store.read_pagination(1).expect("pagination");
        assert_eq!(pagination_after, pagination_before);
    }
}
