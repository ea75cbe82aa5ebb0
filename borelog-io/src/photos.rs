//! Core-photo directory scanning.

use std::fs;
use std::path::Path;

use borelog_core::{sort_photo_entries, CorePhotoEntry, PHOTO_EXTENSIONS};
use log::warn;

use crate::error::Result;

/// Scans `dir` for core photographs named `<start>-<end>.<ext>`.
///
/// Image files with non-conforming names are skipped with a warning; other
/// files are ignored silently. Entries come back sorted ascending by start
/// depth.
pub fn scan_photo_dir(dir: &Path) -> Result<Vec<CorePhotoEntry>> {
    let mut entries = Vec::new();
    for entry in fs::read_dir(dir)? {
        let path = entry?.path();
        if !path.is_file() {
            continue;
        }
        if let Some(photo) = CorePhotoEntry::from_file_name(&path) {
            entries.push(photo);
        } else if has_photo_extension(&path) {
            warn!("skipping core photo with unparseable name: {}", path.display());
        }
    }
    sort_photo_entries(&mut entries);
    Ok(entries)
}

fn has_photo_extension(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| PHOTO_EXTENSIONS.contains(&e.to_ascii_lowercase().as_str()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs::File;

    #[test]
    fn test_scan_collects_sorted_entries_and_skips_malformed() {
        let dir = tempfile::tempdir().unwrap();
        for name in ["10-20.jpg", "0-10.png", "abc.jpg", "notes.txt", "3-2.tif"] {
            File::create(dir.path().join(name)).unwrap();
        }
        let entries = scan_photo_dir(dir.path()).unwrap();
        let starts: Vec<f64> = entries.iter().map(|e| e.start).collect();
        assert_eq!(starts, vec![0.0, 10.0]);
    }

    #[test]
    fn test_scan_missing_dir_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("nope");
        assert!(scan_photo_dir(&missing).is_err());
    }
}
