//! View configuration loading.

use std::fs;
use std::path::Path;

use borelog_core::ViewConfig;

use crate::error::Result;

/// Loads a [`ViewConfig`] from a JSON file. Absent keys take their defaults.
pub fn load_view_config(path: &Path) -> Result<ViewConfig> {
    let text = fs::read_to_string(path)?;
    Ok(serde_json::from_str(&text)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use borelog_core::NumericFallback;
    use std::io::Write;

    #[test]
    fn test_partial_config_takes_defaults() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{"pattern_dir": "tiles", "numeric_fallback": "zero"}}"#
        )
        .unwrap();
        let config = load_view_config(file.path()).unwrap();
        assert_eq!(config.pattern_dir, std::path::PathBuf::from("tiles"));
        assert_eq!(config.numeric_fallback, NumericFallback::Zero);
        assert_eq!(config.max_tile_height, 128);
        assert_eq!(config.undefined_sentinel, "undefined");
    }
}
