//! Page retrieval and the page-edit orchestration.
//!
//! `save_page` is the one place where offset arithmetic and layer
//! consistency meet: it locates the edited span, computes the length
//! delta, corrects the structural index, and drives the diff updater
//! over every layer of the volume before persisting the new base text.

use crate::error::ProofreadError;
use crate::models::{Annotation, Meta};
use crate::store::{volume_id, OpfStore};
use crate::update::{reconcile_layers, shift_spans, DiffUpdater};

/// A page's content and its source-image URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageInfo {
    pub content: String,
    pub image_url: String,
}

/// Result of a page edit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SaveOutcome {
    /// Signed change in the volume's character length.
    pub delta: i64,
    /// `false` when the stripped old page content was not found in the
    /// base text and the volume was left unchanged.
    pub replaced: bool,
}

/// High-level page operations over one pecha.
pub struct PageEditor {
    store: OpfStore,
    iiif_host: String,
}

impl PageEditor {
    pub fn new(store: OpfStore, iiif_host: impl Into<String>) -> Self {
        Self {
            store,
            iiif_host: iiif_host.into(),
        }
    }

    pub fn store(&self) -> &OpfStore {
        &self.store
    }

    /// Page annotation ids of a volume, in pagination-layer order.
    ///
    /// # Errors
    /// `NotFound` when the volume has no pagination layer.
    pub fn list_pages(&self, vol_num: u32) -> Result<Vec<String>, ProofreadError> {
        let pagination = self.store.read_pagination(vol_num)?;
        Ok(pagination.annotations.keys().cloned().collect())
    }

    /// Fetch a page's content and image URL.
    ///
    /// # Errors
    /// `NotFound` when the page id is absent from the pagination layer
    /// or no image group matches the volume; `OutOfRange` when the
    /// page span reaches past the base text.
    pub fn get_page(&self, vol_num: u32, page_id: &str) -> Result<PageInfo, ProofreadError> {
        let pagination = self.store.read_pagination(vol_num)?;
        let base_text = self.store.read_base(vol_num)?;
        let ann = lookup_page(&pagination.annotations, vol_num, page_id)?;
        let content = ann.span.slice(&base_text)?;
        let meta = self.store.read_meta()?;
        let image_url = self.page_image_url(&meta, ann, vol_num, page_id)?;
        Ok(PageInfo { content, image_url })
    }

    /// Replace one page's content and realign every annotation layer.
    ///
    /// The stripped old page content is substituted with the stripped
    /// new content at its first occurrence in the volume text. When
    /// the old content cannot be found verbatim the volume is left
    /// unchanged (`delta == 0`), a warning is logged, and the outcome
    /// reports `replaced: false`; downstream steps still run against
    /// the unchanged text pair.
    ///
    /// The corrected index and all layer contents are computed before
    /// the first write. There is no atomic commit: a failure while
    /// persisting leaves the pecha partially updated.
    ///
    /// # Errors
    /// `NotFound` for a missing page id, base text, index or layer
    /// directory; `OutOfRange` when the page span reaches past the
    /// base text; store errors otherwise.
    pub fn save_page(
        &self,
        vol_num: u32,
        page_id: &str,
        new_content: &str,
    ) -> Result<SaveOutcome, ProofreadError> {
        let mut index = self.store.read_index()?;
        let pagination = self.store.read_pagination(vol_num)?;
        let old_text = self.store.read_base(vol_num)?;
        let ann = lookup_page(&pagination.annotations, vol_num, page_id)?;
        let old_page = ann.span.slice(&old_text)?;
        let page_start = ann.span.start;

        let (new_text, replaced) = substitute_page(&old_text, &old_page, new_content);
        if !replaced {
            tracing::warn!(
                "page {} content not found in {} base text; volume left unchanged",
                page_id,
                volume_id(vol_num)
            );
        }
        let delta = new_text.chars().count() as i64 - old_text.chars().count() as i64;

        shift_spans(&mut index, delta, vol_num, page_start);
        let updater = DiffUpdater::new(&old_text, &new_text);
        reconcile_layers(&self.store, vol_num, &updater)?;
        self.store.write_base(vol_num, &new_text)?;
        self.store.write_index(&index)?;
        Ok(SaveOutcome { delta, replaced })
    }

    fn page_image_url(
        &self,
        meta: &Meta,
        ann: &Annotation,
        vol_num: u32,
        page_id: &str,
    ) -> Result<String, ProofreadError> {
        let image_group = meta.image_group_id(vol_num).ok_or_else(|| {
            ProofreadError::NotFound(format!("image group for volume {}", vol_num))
        })?;
        let reference = ann.reference.as_deref().ok_or_else(|| {
            ProofreadError::NotFound(format!("image reference for page {}", page_id))
        })?;
        Ok(format!(
            "https://{}/bdr:{}::{}/full/max/0/default.jpg",
            self.iiif_host, image_group, reference
        ))
    }
}

fn lookup_page<'a>(
    annotations: &'a indexmap::IndexMap<String, Annotation>,
    vol_num: u32,
    page_id: &str,
) -> Result<&'a Annotation, ProofreadError> {
    annotations.get(page_id).ok_or_else(|| {
        ProofreadError::NotFound(format!(
            "page {} in {} pagination layer",
            page_id,
            volume_id(vol_num)
        ))
    })
}

/// Replace the first occurrence of the stripped old page content with
/// the stripped new content.
///
/// Whitespace at the page boundary is not preserved by the search; a
/// miss returns the text unchanged. A whitespace-only page strips to
/// an empty search string, which would match at offset 0 and splice
/// the new content into the wrong place, so it is treated as a miss.
fn substitute_page(old_text: &str, old_page: &str, new_page: &str) -> (String, bool) {
    let old_page = old_page.trim();
    let new_page = new_page.trim();
    if old_page.is_empty() || !old_text.contains(old_page) {
        return (old_text.to_string(), false);
    }
    (old_text.replacen(old_page, new_page, 1), true)
}

#[cfg(test)]
mod tests {
    use super::substitute_page;
    use crate::error::ProofreadError;
    use crate::test_support::{setup_temp_pecha, temp_editor};

    #[test]
    fn substitute_page_strips_both_sides() {
        let (text, replaced) = substitute_page("ABCpageDEF", " page\n", "  PAGETEXT ");
        assert!(replaced);
        assert_eq!(text, "ABCPAGETEXTDEF");
    }

    #[test]
    fn substitute_page_replaces_first_occurrence_only() {
        let (text, replaced) = substitute_page("xABxAB", "AB", "Y");
        assert!(replaced);
        assert_eq!(text, "xYxAB");
    }

    #[test]
    fn substitute_page_miss_returns_text_unchanged() {
        let (text, replaced) = substitute_page("ABCDEF", "zzz", "YYY");
        assert!(!replaced);
        assert_eq!(text, "ABCDEF");
    }

    #[test]
    fn substitute_page_whitespace_only_page_is_a_miss() {
        // An empty search string matches at offset 0; it must not
        // splice the new content into the start of the volume.
        let (text, replaced) = substitute_page("ABCDEF", "  \n ", "YYY");
        assert!(!replaced);
        assert_eq!(text, "ABCDEF");
    }

    #[test]
    fn list_pages_returns_ids_in_layer_order() {
        let (store, _temp) = setup_temp_pecha();
        let editor = temp_editor(store);
        let pages = editor.list_pages(1).expect("list pages");
        assert_eq!(pages, ["page-0001", "page-0002", "page-0003"]);
    }

    #[test]
    fn get_page_returns_content_and_image_url() {
        let (store, _temp) = setup_temp_pecha();
        let editor = temp_editor(store);
        let page = editor.get_page(1, "page-0002").expect("get page");
        assert_eq!(page.content, "page");
        assert_eq!(
            page.image_url,
            "https://iiif.bdrc.io/bdr:I1PD95878::I1PD958780004.jpg/full/max/0/default.jpg"
        );
    }

    #[test]
    fn get_page_unknown_id_is_not_found() {
        let (store, _temp) = setup_temp_pecha();
        let editor = temp_editor(store);
        assert!(matches!(
            editor.get_page(1, "page-9999"),
            Err(ProofreadError::NotFound(_))
        ));
    }

    #[test]
    fn save_page_applies_delta_everywhere() {
        let (store, _temp) = setup_temp_pecha();
        let editor = temp_editor(store);

        let outcome = editor
            .save_page(1, "page-0002", "PAGETEXT")
            .expect("save page");
        assert!(outcome.replaced);
        assert_eq!(outcome.delta, 4);

        assert_eq!(
            editor.store().read_base(1).expect("base"),
            "ABCPAGETEXTDEF"
        );

        let index = editor.store().read_index().expect("index");
        let spans = &index.annotations["text-unit-1"].span;
        // end >= page_start (3) gains +4; start never moves.
        assert_eq!(spans[0].start, 0);
        assert_eq!(spans[0].end, 13);
        let early = &index.annotations["text-unit-2"].span;
        // A span ending before the edit point is bit-identical.
        assert_eq!((early[0].start, early[0].end), (0, 2));

        // The edited page reads back with its full new content.
        let page = editor.get_page(1, "page-0002").expect("reread page");
        assert_eq!(page.content, "PAGETEXT");
    }

    #[test]
    fn save_page_with_identical_content_changes_nothing() {
        let (store, _temp) = setup_temp_pecha();
        let editor = temp_editor(store);
        let index_before = editor.store().read_index().expect("index");

        let outcome = editor.save_page(1, "page-0002", "page").expect("save page");
        assert!(outcome.replaced);
        assert_eq!(outcome.delta, 0);
        assert_eq!(editor.store().read_base(1).expect("base"), "ABCpageDEF");
        assert_eq!(editor.store().read_index().expect("index"), index_before);
    }

    #[test]
    fn save_page_out_of_range_span_is_surfaced() {
        let (store, _temp) = setup_temp_pecha();
        // Shrink the base text so the last page span reaches past it.
        store.write_base(1, "ABCpage").expect("rewrite base");

        let editor = temp_editor(store);
        assert!(matches!(
            editor.save_page(1, "page-0003", "DEF"),
            Err(ProofreadError::OutOfRange { .. })
        ));
    }
}
