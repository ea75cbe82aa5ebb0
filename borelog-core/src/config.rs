//! View configuration.

use std::path::PathBuf;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::interval::NumericFallback;

/// Pattern-file extension search order; the first existing file wins.
pub const PATTERN_EXTENSIONS: [&str; 5] = ["png", "jpg", "jpeg", "tif", "bmp"];

/// Rendering and projection options for one viewing session.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize), serde(default))]
pub struct ViewConfig {
    /// Directory searched for `<label>.<ext>` pattern tiles.
    pub pattern_dir: PathBuf,
    /// Decoded tiles taller than this are downscaled, preserving aspect.
    pub max_tile_height: u32,
    /// Minimum block height (depth units) that still gets a text label.
    pub min_label_height: f64,
    /// Label treated as "no data"; never drawn as block text.
    pub undefined_sentinel: String,
    /// Fallback for numeric cells with no usable value.
    pub numeric_fallback: NumericFallback,
    /// Categorical logs eligible for pattern fills.
    pub pattern_logs: Vec<String>,
}

impl Default for ViewConfig {
    fn default() -> Self {
        Self {
            pattern_dir: PathBuf::from("patterns"),
            max_tile_height: 128,
            min_label_height: 1.0,
            undefined_sentinel: "undefined".to_string(),
            numeric_fallback: NumericFallback::Skip,
            pattern_logs: Vec::new(),
        }
    }
}

impl ViewConfig {
    /// Whether `log` renders with pattern fills when a tile resolves.
    pub fn is_pattern_log(&self, log: &str) -> bool {
        self.pattern_logs.iter().any(|l| l == log)
    }
}
