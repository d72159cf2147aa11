//! Classifier adapter around a pretrained ONNX image model.
//!
//! The model is loaded once at process start and reused read-only for the
//! process lifetime. `Classifier` is the seam the sorter and analyzer work
//! against, so tests can substitute a stub.

mod inference;
mod labels;

pub use inference::{IMAGE_NET_MEAN, IMAGE_NET_STD, INPUT_SIZE};
pub use labels::load_labels;

use crate::error::{Error, Result};
use crate::types::Classification;
use image::DynamicImage;
use ort::session::Session;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Label substring that counts as a positive match.
pub const TARGET_LABEL: &str = "orange";

/// Anything implementing this can drive the sorter and the analyzer.
pub trait Classifier {
    fn classify(&mut self, image: &DynamicImage) -> Result<Classification>;
}

/// Locations of the model file and its label table.
#[derive(Clone, Debug)]
pub struct ModelPaths {
    pub model: PathBuf,
    pub labels: PathBuf,
}

impl Default for ModelPaths {
    fn default() -> Self {
        // Looks for models in models/ relative to the working directory.
        Self::with_base_dir("models")
    }
}

impl ModelPaths {
    pub fn with_base_dir(base: impl AsRef<Path>) -> Self {
        let base = base.as_ref();
        Self {
            model: base.join("mobilenetv2-12.onnx"),
            labels: base.join("synset.txt"),
        }
    }

    /// Check that both files exist before attempting a session load.
    pub fn validate(&self) -> Result<()> {
        if !self.model.exists() {
            return Err(Error::ModelNotFound(self.model.clone()));
        }
        if !self.labels.exists() {
            return Err(Error::ModelNotFound(self.labels.clone()));
        }
        Ok(())
    }
}

/// Production classifier backed by an `ort` session.
pub struct OnnxClassifier {
    session: Session,
    labels: Vec<String>,
    target: String,
}

impl OnnxClassifier {
    /// Load the model and label table. Called once at startup; there is no
    /// fallback model, so a failure here leaves classification unusable for
    /// the rest of the process.
    pub fn load(paths: &ModelPaths) -> Result<Self> {
        paths.validate()?;
        let labels = labels::load_labels(&paths.labels)?;
        let session = inference::load_session(&paths.model)?;
        debug!(model = %paths.model.display(), labels = labels.len(), "model loaded");
        Ok(Self {
            session,
            labels,
            target: TARGET_LABEL.to_string(),
        })
    }
}

impl Classifier for OnnxClassifier {
    fn classify(&mut self, image: &DynamicImage) -> Result<Classification> {
        let input = inference::preprocess(image)?;
        let (label, confidence) = inference::run_top1(&mut self.session, input, &self.labels)?;
        let is_match = matches_target(&label, &self.target);
        Ok(Classification {
            is_match,
            label,
            confidence,
        })
    }
}

/// Case-insensitive substring match, no confidence threshold.
fn matches_target(label: &str, target: &str) -> bool {
    label.to_lowercase().contains(target)
}
