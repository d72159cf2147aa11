//! Single-image verdicts.

use crate::classifier::Classifier;
use crate::error::Result;
use std::path::Path;
use tracing::debug;

pub const RESULT_ORANGE: &str = "This is an orange";
pub const RESULT_NOT_ORANGE: &str = "This is not an orange";

/// Classify one image file and return its verdict string.
///
/// Returns `Ok(None)` when the file cannot be decoded; the file is left
/// untouched either way. Nothing is copied or moved here.
pub fn analyze_image(classifier: &mut dyn Classifier, path: &Path) -> Result<Option<String>> {
    let image = match image::open(path) {
        Ok(image) => image,
        Err(err) => {
            debug!(path = %path.display(), %err, "could not decode image");
            return Ok(None);
        }
    };

    let classification = classifier.classify(&image)?;
    let verdict = if classification.is_match {
        RESULT_ORANGE
    } else {
        RESULT_NOT_ORANGE
    };

    Ok(Some(verdict.to_string()))
}
