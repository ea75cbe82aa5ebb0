//! Pattern tile loading and memoization.
//!
//! The cache replaces the usual global pattern store: it is an explicit
//! object owned by the rendering context, and insertion is get-or-load per
//! label. Failures return `None` with no negative-cache entry, so retrying a
//! label after fixing its file succeeds.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use borelog_core::{PatternTile, ViewConfig, PATTERN_EXTENSIONS};
use image::imageops::FilterType;
use log::warn;

use crate::error::Result;

/// Memoizing loader for lithology pattern tiles.
///
/// Successful loads are kept for the cache's lifetime; a tile is never
/// evicted or reloaded even if the underlying file changes.
#[derive(Debug)]
pub struct PatternCache {
    dir: PathBuf,
    max_tile_height: u32,
    tiles: HashMap<String, Arc<PatternTile>>,
}

impl PatternCache {
    /// Creates a cache rooted at `dir`.
    pub fn new(dir: impl Into<PathBuf>, max_tile_height: u32) -> Self {
        Self {
            dir: dir.into(),
            max_tile_height,
            tiles: HashMap::new(),
        }
    }

    /// Creates a cache from a view configuration.
    pub fn from_config(config: &ViewConfig) -> Self {
        Self::new(config.pattern_dir.clone(), config.max_tile_height)
    }

    /// Resolves a tile for `label`, loading it on first request.
    ///
    /// Tries `<dir>/<label>.<ext>` for each extension in
    /// [`PATTERN_EXTENSIONS`]; the first existing file wins. Missing or
    /// undecodable tiles return `None` (the caller falls back to solid
    /// color) after a single warning.
    pub fn resolve(&mut self, label: &str) -> Option<Arc<PatternTile>> {
        if let Some(tile) = self.tiles.get(label) {
            return Some(Arc::clone(tile));
        }
        let path = self.find_pattern_file(label)?;
        match load_tile(label, &path, self.max_tile_height) {
            Ok(tile) => {
                let tile = Arc::new(tile);
                self.tiles.insert(label.to_string(), Arc::clone(&tile));
                Some(tile)
            }
            Err(err) => {
                warn!("pattern '{label}' failed to load from {}: {err}", path.display());
                None
            }
        }
    }

    /// Number of cached tiles.
    pub fn len(&self) -> usize {
        self.tiles.len()
    }

    /// Whether nothing has been cached yet.
    pub fn is_empty(&self) -> bool {
        self.tiles.is_empty()
    }

    fn find_pattern_file(&self, label: &str) -> Option<PathBuf> {
        PATTERN_EXTENSIONS
            .iter()
            .map(|ext| self.dir.join(format!("{label}.{ext}")))
            .find(|p| p.is_file())
    }
}

/// Decodes, downscales, and normalizes one tile image.
///
/// Any source channel layout (grayscale, RGB, indexed, RGBA) normalizes to
/// 0-1 RGB. Images taller than `max_height` are downscaled preserving aspect
/// ratio to bound render cost.
fn load_tile(label: &str, path: &Path, max_height: u32) -> Result<PatternTile> {
    let mut img = image::open(path)?;
    if img.height() > max_height {
        let scale = f64::from(max_height) / f64::from(img.height());
        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        let width = (f64::from(img.width()) * scale).round().max(1.0) as u32;
        img = img.resize_exact(width, max_height, FilterType::Triangle);
    }
    let rgb = img.to_rgb32f();
    let (width, height) = rgb.dimensions();
    let pixels = rgb.pixels().map(|p| [p[0], p[1], p[2]]).collect();
    Ok(PatternTile::new(
        label,
        width as usize,
        height as usize,
        pixels,
    )?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{Rgb, RgbImage};

    fn write_pattern(dir: &Path, name: &str, width: u32, height: u32) {
        let img = RgbImage::from_pixel(width, height, Rgb([200, 180, 120]));
        img.save(dir.join(name)).unwrap();
    }

    #[test]
    fn test_resolve_memoizes_by_pointer_identity() {
        let dir = tempfile::tempdir().unwrap();
        write_pattern(dir.path(), "sandstone.png", 16, 24);
        let mut cache = PatternCache::new(dir.path(), 128);

        let first = cache.resolve("sandstone").unwrap();
        let second = cache.resolve("sandstone").unwrap();
        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn test_unknown_label_returns_none_without_negative_cache() {
        let dir = tempfile::tempdir().unwrap();
        let mut cache = PatternCache::new(dir.path(), 128);
        assert!(cache.resolve("gneiss").is_none());
        assert!(cache.is_empty());

        // A file added after the miss is picked up on retry.
        write_pattern(dir.path(), "gneiss.png", 8, 8);
        assert!(cache.resolve("gneiss").is_some());
    }

    #[test]
    fn test_tall_tiles_downscaled_preserving_aspect() {
        let dir = tempfile::tempdir().unwrap();
        write_pattern(dir.path(), "shale.png", 50, 300);
        let mut cache = PatternCache::new(dir.path(), 100);

        let tile = cache.resolve("shale").unwrap();
        assert_eq!(tile.height, 100);
        assert_eq!(tile.width, 17); // round(50 * 100 / 300)
        assert!((tile.aspect - 300.0 / 50.0).abs() < 0.3);
    }

    #[test]
    fn test_extension_search_order_prefers_png() {
        let dir = tempfile::tempdir().unwrap();
        write_pattern(dir.path(), "tuff.png", 4, 8);
        write_pattern(dir.path(), "tuff.jpg", 4, 4);
        let mut cache = PatternCache::new(dir.path(), 128);
        let tile = cache.resolve("tuff").unwrap();
        assert_eq!(tile.height, 8);
    }

    #[test]
    fn test_normalized_channels_in_unit_range() {
        let dir = tempfile::tempdir().unwrap();
        write_pattern(dir.path(), "coal.png", 4, 4);
        let mut cache = PatternCache::new(dir.path(), 128);
        let tile = cache.resolve("coal").unwrap();
        assert!(tile
            .pixels
            .iter()
            .all(|p| p.iter().all(|c| (0.0..=1.0).contains(c))));
    }
}
