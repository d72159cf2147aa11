//! Folder scanning and classify-and-copy sorting.

use crate::classifier::Classifier;
use crate::error::{Error, Result};
use crate::types::SortSummary;
use std::fs;
use std::path::Path;
use tracing::{debug, info};
use walkdir::WalkDir;

/// Destination subfolder for images classified as oranges.
pub const ORANGES_DIR: &str = "oranges";

/// Destination subfolder for everything else.
pub const NOT_ORANGES_DIR: &str = "not_oranges";

// Lowercase extensions only; `.JPG` and friends are not picked up.
const IMAGE_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg"];

/// Classify every image directly inside `folder` and copy each into one of
/// two subfolders, keeping the original file name.
///
/// Files that fail to decode are skipped: not counted, not copied. A name
/// collision in a destination folder overwrites the existing copy. The
/// originals stay in place.
pub fn sort_folder(classifier: &mut dyn Classifier, folder: &Path) -> Result<SortSummary> {
    if !folder.exists() {
        return Err(Error::FolderNotFound(folder.display().to_string()));
    }

    let oranges_dir = folder.join(ORANGES_DIR);
    let not_oranges_dir = folder.join(NOT_ORANGES_DIR);
    fs::create_dir_all(&oranges_dir)?;
    fs::create_dir_all(&not_oranges_dir)?;

    let mut summary = SortSummary::new(oranges_dir.clone(), not_oranges_dir.clone());

    for entry in WalkDir::new(folder)
        .max_depth(1)
        .into_iter()
        .filter_map(|e| e.ok())
    {
        let path = entry.path();

        if !path.is_file() || !has_image_extension(path) {
            continue;
        }

        let image = match image::open(path) {
            Ok(image) => image,
            Err(err) => {
                debug!(path = %path.display(), %err, "skipping undecodable file");
                continue;
            }
        };

        let classification = classifier.classify(&image)?;
        summary.total += 1;

        let dest_dir = if classification.is_match {
            summary.oranges += 1;
            &oranges_dir
        } else {
            summary.not_oranges += 1;
            &not_oranges_dir
        };

        if let Some(file_name) = path.file_name() {
            fs::copy(path, dest_dir.join(file_name))?;
        }
    }

    info!(
        total = summary.total,
        oranges = summary.oranges,
        not_oranges = summary.not_oranges,
        "folder sorted"
    );

    Ok(summary)
}

fn has_image_extension(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| IMAGE_EXTENSIONS.contains(&ext))
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_has_image_extension() {
        assert!(has_image_extension(Path::new("a.jpg")));
        assert!(has_image_extension(Path::new("a.jpeg")));
        assert!(has_image_extension(Path::new("a.png")));
        assert!(!has_image_extension(Path::new("a.txt")));
        assert!(!has_image_extension(Path::new("a.gif")));
        assert!(!has_image_extension(Path::new("a")));
    }

    #[test]
    fn test_extension_filter_is_case_sensitive() {
        // The uppercase variants are deliberately not accepted.
        assert!(!has_image_extension(Path::new("a.JPG")));
        assert!(!has_image_extension(Path::new("a.PNG")));
        assert!(!has_image_extension(Path::new("a.Jpeg")));
    }

    #[test]
    fn test_sort_folder_not_found() {
        struct NeverCalled;
        impl Classifier for NeverCalled {
            fn classify(
                &mut self,
                _image: &image::DynamicImage,
            ) -> crate::error::Result<crate::types::Classification> {
                panic!("classifier must not run for a missing folder");
            }
        }

        let mut classifier = NeverCalled;
        let result = sort_folder(&mut classifier, &PathBuf::from("/nonexistent/folder-12345"));
        assert!(matches!(result, Err(Error::FolderNotFound(_))));
    }
}
