//! On-disk access to a pecha's `.opf` layout.
//!
//! A pecha directory looks like:
//!
//! ```text
//! <pecha_path>/<pecha_id>.opf/
//!     base/v001.txt          one base text per volume
//!     layers/v001/*.yml      one file per annotation layer
//!     index.yml              document-wide structural index
//!     meta.yml               document metadata
//! ```
//!
//! Retrieval of `<pecha_path>` from a remote store is a collaborator's
//! job; this module only does blocking reads and writes below it.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use crate::error::ProofreadError;
use crate::models::{Layer, Meta, PechaIndex};

/// File name of the layer that marks page boundaries.
pub const PAGINATION_LAYER: &str = "Pagination";

const LAYER_EXT: &str = "yml";

/// Zero-padded volume identifier used in base and layer paths.
pub fn volume_id(vol_num: u32) -> String {
    format!("v{:03}", vol_num)
}

/// Filesystem handle to one pecha's `.opf` directory tree.
pub struct OpfStore {
    pecha_id: String,
    opf_path: PathBuf,
}

impl OpfStore {
    /// Bind to the pecha stored under `pecha_path`.
    ///
    /// `pecha_path` is the directory containing `<pecha_id>.opf`; no
    /// I/O happens until the first read or write.
    pub fn new(pecha_path: impl AsRef<Path>, pecha_id: &str) -> Self {
        Self {
            pecha_id: pecha_id.to_string(),
            opf_path: pecha_path.as_ref().join(format!("{}.opf", pecha_id)),
        }
    }

    pub fn pecha_id(&self) -> &str {
        &self.pecha_id
    }

    pub fn opf_path(&self) -> &Path {
        &self.opf_path
    }

    fn base_path(&self, vol_num: u32) -> PathBuf {
        self.opf_path
            .join("base")
            .join(format!("{}.txt", volume_id(vol_num)))
    }

    fn layers_dir(&self, vol_num: u32) -> PathBuf {
        self.opf_path.join("layers").join(volume_id(vol_num))
    }

    fn layer_path(&self, vol_num: u32, layer_name: &str) -> PathBuf {
        self.layers_dir(vol_num)
            .join(format!("{}.{}", layer_name, LAYER_EXT))
    }

    fn index_path(&self) -> PathBuf {
        self.opf_path.join("index.yml")
    }

    fn meta_path(&self) -> PathBuf {
        self.opf_path.join("meta.yml")
    }

    /// Read a volume's base text.
    ///
    /// # Errors
    /// `NotFound` when the volume has no base file; `Io` otherwise.
    pub fn read_base(&self, vol_num: u32) -> Result<String, ProofreadError> {
        read_to_string(&self.base_path(vol_num))
    }

    /// Overwrite a volume's base text.
    ///
    /// # Errors
    /// Returns an error when the file cannot be written.
    pub fn write_base(&self, vol_num: u32, text: &str) -> Result<(), ProofreadError> {
        let path = self.base_path(vol_num);
        write_all(&path, text)?;
        tracing::info!("{} base updated", volume_id(vol_num));
        Ok(())
    }

    /// Load one annotation layer of a volume by name.
    ///
    /// # Errors
    /// `NotFound` when the layer file is absent; `Yaml` when it does
    /// not parse.
    pub fn read_layer(&self, vol_num: u32, layer_name: &str) -> Result<Layer, ProofreadError> {
        let text = read_to_string(&self.layer_path(vol_num, layer_name))?;
        Ok(serde_yaml::from_str(&text)?)
    }

    /// Load a volume's pagination layer.
    ///
    /// # Errors
    /// Same as [`read_layer`](Self::read_layer).
    pub fn read_pagination(&self, vol_num: u32) -> Result<Layer, ProofreadError> {
        self.read_layer(vol_num, PAGINATION_LAYER)
    }

    /// Write one annotation layer back under its name.
    ///
    /// # Errors
    /// Returns an error when serialization or the write fails.
    pub fn write_layer(
        &self,
        vol_num: u32,
        layer_name: &str,
        layer: &Layer,
    ) -> Result<(), ProofreadError> {
        let text = serde_yaml::to_string(layer)?;
        write_all(&self.layer_path(vol_num, layer_name), &text)
    }

    /// Names of all layer files of a volume, sorted for determinism.
    ///
    /// # Errors
    /// `NotFound` when the volume has no layers directory.
    pub fn layer_names(&self, vol_num: u32) -> Result<Vec<String>, ProofreadError> {
        let dir = self.layers_dir(vol_num);
        let entries = match fs::read_dir(&dir) {
            Ok(entries) => entries,
            Err(err) if err.kind() == ErrorKind::NotFound => {
                return Err(ProofreadError::NotFound(dir.display().to_string()));
            }
            Err(err) => return Err(err.into()),
        };
        let mut names = Vec::new();
        for entry in entries {
            let path = entry?.path();
            if path.extension().and_then(|ext| ext.to_str()) != Some(LAYER_EXT) {
                continue;
            }
            if let Some(stem) = path.file_stem().and_then(|stem| stem.to_str()) {
                names.push(stem.to_string());
            }
        }
        names.sort();
        Ok(names)
    }

    /// Load the document-wide structural index.
    ///
    /// # Errors
    /// `NotFound` when `index.yml` is absent; `Yaml` when it does not
    /// parse.
    pub fn read_index(&self) -> Result<PechaIndex, ProofreadError> {
        let text = read_to_string(&self.index_path())?;
        Ok(serde_yaml::from_str(&text)?)
    }

    /// Persist the structural index.
    ///
    /// # Errors
    /// Returns an error when serialization or the write fails.
    pub fn write_index(&self, index: &PechaIndex) -> Result<(), ProofreadError> {
        let text = serde_yaml::to_string(index)?;
        write_all(&self.index_path(), &text)
    }

    /// Load the document metadata.
    ///
    /// # Errors
    /// `NotFound` when `meta.yml` is absent; `Yaml` when it does not
    /// parse.
    pub fn read_meta(&self) -> Result<Meta, ProofreadError> {
        let text = read_to_string(&self.meta_path())?;
        Ok(serde_yaml::from_str(&text)?)
    }
}

fn read_to_string(path: &Path) -> Result<String, ProofreadError> {
    match fs::read_to_string(path) {
        Ok(text) => Ok(text),
        Err(err) if err.kind() == ErrorKind::NotFound => {
            Err(ProofreadError::NotFound(path.display().to_string()))
        }
        Err(err) => Err(err.into()),
    }
}

fn write_all(path: &Path, text: &str) -> Result<(), ProofreadError> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, text)?;
    Ok(())
}
