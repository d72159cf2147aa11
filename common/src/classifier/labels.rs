//! Label table loading for the classifier.
//!
//! Accepts a plain text file with one label per line. Lines in the ImageNet
//! synset format (`n07747607 orange`) have the leading synset id stripped.

use crate::error::Result;
use std::fs;
use std::path::Path;

pub fn load_labels(path: &Path) -> Result<Vec<String>> {
    let content = fs::read_to_string(path)?;
    let labels = content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(|line| strip_synset_id(line).to_string())
        .collect();
    Ok(labels)
}

/// Drops a leading `n########` WordNet id, if the line carries one.
fn strip_synset_id(line: &str) -> &str {
    match line.split_once(' ') {
        Some((id, rest))
            if id.len() == 9
                && id.starts_with('n')
                && id[1..].chars().all(|c| c.is_ascii_digit()) =>
        {
            rest
        }
        _ => line,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_strip_synset_id() {
        assert_eq!(strip_synset_id("n07747607 orange"), "orange");
        assert_eq!(strip_synset_id("n01440764 tench, Tinca tinca"), "tench, Tinca tinca");
        assert_eq!(strip_synset_id("orange"), "orange");
        assert_eq!(strip_synset_id("not a synset line"), "not a synset line");
        // id must be exactly n + 8 digits
        assert_eq!(strip_synset_id("n123 orange"), "n123 orange");
    }

    #[test]
    fn test_load_labels_plain() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("labels.txt");
        let mut file = std::fs::File::create(&path).unwrap();
        writeln!(file, "tench").unwrap();
        writeln!(file, "goldfish").unwrap();
        writeln!(file).unwrap();
        writeln!(file, "  great white shark  ").unwrap();

        let labels = load_labels(&path).unwrap();
        assert_eq!(labels, vec!["tench", "goldfish", "great white shark"]);
    }

    #[test]
    fn test_load_labels_synset() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("synset.txt");
        std::fs::write(&path, "n01440764 tench, Tinca tinca\nn07747607 orange\n").unwrap();

        let labels = load_labels(&path).unwrap();
        assert_eq!(labels, vec!["tench, Tinca tinca", "orange"]);
    }

    #[test]
    fn test_load_labels_missing_file() {
        let result = load_labels(Path::new("/nonexistent/labels-12345.txt"));
        assert!(result.is_err());
    }
}
