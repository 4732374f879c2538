//! Shared test-only helpers for proofread_core.

use std::fs;
use tempfile::TempDir;

use crate::editor::PageEditor;
use crate::store::OpfStore;

pub(crate) const PECHA_ID: &str = "P000108";

const BASE_TEXT: &str = "ABCpageDEF";

const PAGINATION_YAML: &str = "\
id: pagination-v001
annotation_type: Pagination
annotations:
  page-0001:
    span:
      start: 0
      end: 2
    reference: I1PD958780003.jpg
  page-0002:
    span:
      start: 3
      end: 6
    reference: I1PD958780004.jpg
  page-0003:
    span:
      start: 7
      end: 9
    reference: I1PD958780005.jpg
";

const CITATION_YAML: &str = "\
id: citation-v001
annotation_type: Citation
annotations:
  cite-0001:
    span:
      start: 3
      end: 9
";

const INDEX_YAML: &str = "\
annotations:
  text-unit-1:
    span:
      - vol: 1
        start: 0
        end: 9
  text-unit-2:
    span:
      - vol: 1
        start: 0
        end: 2
";

const META_YAML: &str = "\
id: P000108
source_metadata:
  volumes:
    8f2a9c1e:
      volume_number: 1
      image_group_id: I1PD95878
";

/// Writes a one-volume pecha fixture and returns a store bound to it.
///
/// Keep the [`TempDir`] alive for the full test to preserve the files.
/// The volume text is `"ABCpageDEF"` with pages `ABC` / `page` / `DEF`,
/// a `Citation` sibling layer, and an index with one unit covering the
/// whole volume and one ending before the middle page.
pub(crate) fn setup_temp_pecha() -> (OpfStore, TempDir) {
    let temp_dir = TempDir::new().expect("temp dir");
    let opf = temp_dir.path().join(format!("{}.opf", PECHA_ID));
    fs::create_dir_all(opf.join("base")).expect("base dir");
    fs::create_dir_all(opf.join("layers").join("v001")).expect("layers dir");
    fs::write(opf.join("base").join("v001.txt"), BASE_TEXT).expect("base text");
    fs::write(
        opf.join("layers").join("v001").join("Pagination.yml"),
        PAGINATION_YAML,
    )
    .expect("pagination layer");
    fs::write(
        opf.join("layers").join("v001").join("Citation.yml"),
        CITATION_YAML,
    )
    .expect("citation layer");
    fs::write(opf.join("index.yml"), INDEX_YAML).expect("index");
    fs::write(opf.join("meta.yml"), META_YAML).expect("meta");

    let store = OpfStore::new(temp_dir.path(), PECHA_ID);
    (store, temp_dir)
}

/// Wraps a fixture store in an editor with the default IIIF host.
pub(crate) fn temp_editor(store: OpfStore) -> PageEditor {
    PageEditor::new(store, "iiif.bdrc.io")
}
