//! Annotation session persistence.
//!
//! The session file holds the entire annotation sequence; saving overwrites
//! it wholesale (last-saved-wins, no merging).

use std::fs;
use std::path::Path;

use borelog_core::Annotation;

use crate::error::Result;

/// Loads a persisted annotation sequence.
///
/// A missing or empty file yields an empty sequence, not an error; anything
/// else unreadable is an error the caller downgrades to a warning (the
/// in-memory session continues either way).
pub fn load_session(path: &Path) -> Result<Vec<Annotation>> {
    if !path.exists() {
        return Ok(Vec::new());
    }
    let text = fs::read_to_string(path)?;
    if text.trim().is_empty() {
        return Ok(Vec::new());
    }
    Ok(serde_json::from_str(&text)?)
}

/// Overwrites the session file with the full current sequence.
pub fn save_session(path: &Path, annotations: &[Annotation]) -> Result<()> {
    let text = serde_json::to_string_pretty(annotations)?;
    fs::write(path, text)?;
    Ok(())
}
