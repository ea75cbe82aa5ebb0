//! Core-box photograph entries parsed from depth-span filenames.

use std::path::{Path, PathBuf};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// File extensions accepted for core photographs.
pub const PHOTO_EXTENSIONS: [&str; 3] = ["jpg", "png", "tif"];

/// One core-box photograph covering a depth span.
///
/// Parsed from `<start>-<end>.<ext>` filenames; non-conforming names are
/// simply not entries (the scanner warns and skips them).
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct CorePhotoEntry {
    pub start: f64,
    pub end: f64,
    pub path: PathBuf,
}

impl CorePhotoEntry {
    /// Parses a photo path by its file name.
    ///
    /// Returns `None` unless the extension is one of [`PHOTO_EXTENSIONS`] and
    /// the stem is `<start>-<end>` with finite numbers and `start < end`.
    pub fn from_file_name(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_str()?.to_ascii_lowercase();
        if !PHOTO_EXTENSIONS.contains(&ext.as_str()) {
            return None;
        }
        let stem = path.file_stem()?.to_str()?;
        let (start, end) = stem.split_once('-')?;
        let start: f64 = start.trim().parse().ok()?;
        let end: f64 = end.trim().parse().ok()?;
        (start.is_finite() && end.is_finite() && start < end).then(|| Self {
            start,
            end,
            path: path.to_path_buf(),
        })
    }

    /// Depth extent covered by the photograph.
    pub fn span(&self) -> f64 {
        self.end - self.start
    }
}

/// Sorts photo entries ascending by start depth.
pub fn sort_photo_entries(entries: &mut [CorePhotoEntry]) {
    entries.sort_by(|a, b| a.start.total_cmp(&b.start));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parses_fractional_span() {
        let entry = CorePhotoEntry::from_file_name(Path::new("core/7.5-15.jpg")).unwrap();
        assert_eq!(entry.start, 7.5);
        assert_eq!(entry.end, 15.0);
        assert_eq!(entry.path, PathBuf::from("core/7.5-15.jpg"));
    }

    #[test]
    fn test_rejects_malformed_names() {
        assert!(CorePhotoEntry::from_file_name(Path::new("abc.jpg")).is_none());
        assert!(CorePhotoEntry::from_file_name(Path::new("5-3.jpg")).is_none());
        assert!(CorePhotoEntry::from_file_name(Path::new("5-5.png")).is_none());
        assert!(CorePhotoEntry::from_file_name(Path::new("1-2.gif")).is_none());
        assert!(CorePhotoEntry::from_file_name(Path::new("1-2")).is_none());
    }

    #[test]
    fn test_extension_case_insensitive() {
        assert!(CorePhotoEntry::from_file_name(Path::new("0-4.JPG")).is_some());
        assert!(CorePhotoEntry::from_file_name(Path::new("0-4.Tif")).is_some());
    }

    #[test]
    fn test_sorted_ascending_by_start() {
        let mut entries = vec![
            CorePhotoEntry::from_file_name(Path::new("10-20.png")).unwrap(),
            CorePhotoEntry::from_file_name(Path::new("0-10.png")).unwrap(),
        ];
        sort_photo_entries(&mut entries);
        assert_eq!(entries[0].start, 0.0);
        assert_eq!(entries[1].start, 10.0);
    }
}
