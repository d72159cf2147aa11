//! Result types produced by the classifier and the folder sorter.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Verdict for a single decoded image.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Classification {
    /// Whether the top predicted label contains the target category.
    pub is_match: bool,

    /// Raw top-1 label text as decoded from the model output.
    pub label: String,

    /// Softmax probability of the top-1 label. Informational only, no
    /// threshold is applied to it.
    pub confidence: f32,
}

/// Outcome of one folder run.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SortSummary {
    /// Images that decoded successfully and were classified.
    pub total: usize,

    pub oranges: usize,
    pub not_oranges: usize,

    pub oranges_dir: PathBuf,
    pub not_oranges_dir: PathBuf,
}

impl SortSummary {
    pub fn new(oranges_dir: PathBuf, not_oranges_dir: PathBuf) -> Self {
        Self {
            oranges_dir,
            not_oranges_dir,
            ..Default::default()
        }
    }
}
