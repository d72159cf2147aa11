//! Orange Sorter Common Library
//!
//! Core shared by the desktop shell: the pretrained-model classifier adapter,
//! the folder sorter and the single-image analyzer.

pub mod analyzer;
pub mod classifier;
pub mod error;
pub mod sorter;
pub mod types;

pub use analyzer::{analyze_image, RESULT_NOT_ORANGE, RESULT_ORANGE};
pub use classifier::{Classifier, ModelPaths, OnnxClassifier, TARGET_LABEL};
pub use error::{Error, Result};
pub use sorter::{sort_folder, NOT_ORANGES_DIR, ORANGES_DIR};
pub use types::{Classification, SortSummary};
