//! Texture caching for pattern tiles and core photographs.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use borelog_core::{CorePhotoEntry, PatternTile};
use eframe::egui::{self, Color32, ColorImage, TextureHandle, TextureOptions};
use image::imageops::FilterType;
use log::warn;

use crate::util::f32_to_u8;

/// Photographs larger than this (either dimension) are downscaled before
/// upload to bound GPU memory.
const MAX_PHOTO_DIM: u32 = 1600;

/// GPU-side cache of band strips and photo images.
///
/// Band textures are invalidated on dataset or pattern-directory changes;
/// photo decode failures are remembered so a bad file is not re-decoded
/// every frame (the pattern cache's no-negative-entry rule applies to
/// pattern resolution, which happens upstream of this store).
#[derive(Default)]
pub struct TextureStore {
    tiles: HashMap<String, TextureHandle>,
    partials: HashMap<(String, usize), TextureHandle>,
    photos: HashMap<PathBuf, Option<TextureHandle>>,
}

impl TextureStore {
    /// Drops all band-fill textures (dataset or pattern source changed).
    pub fn clear_bands(&mut self) {
        self.tiles.clear();
        self.partials.clear();
    }

    /// Drops all photo textures (photo directory changed).
    pub fn clear_photos(&mut self) {
        self.photos.clear();
    }

    /// Uploads the full tile for `tile.label` once.
    pub fn ensure_tile(&mut self, ctx: &egui::Context, tile: &PatternTile) {
        if self.tiles.contains_key(&tile.label) {
            return;
        }
        let img = tile_image(tile, tile.height);
        let tex = ctx.load_texture(format!("tile:{}", tile.label), img, TextureOptions::LINEAR);
        self.tiles.insert(tile.label.clone(), tex);
    }

    /// Uploads the clipped top fraction of a tile once per distinct row count.
    pub fn ensure_partial(&mut self, ctx: &egui::Context, tile: &PatternTile, visible: f64) {
        let rows = partial_rows(tile, visible);
        if rows >= tile.height {
            return;
        }
        let key = (tile.label.clone(), rows);
        if self.partials.contains_key(&key) {
            return;
        }
        let img = tile_image(tile, rows);
        let tex = ctx.load_texture(
            format!("tile:{}:{rows}", tile.label),
            img,
            TextureOptions::LINEAR,
        );
        self.partials.insert(key, tex);
    }

    /// Texture covering `visible` of the tile's height, if uploaded.
    pub fn span_texture(&self, tile: &PatternTile, visible: f64) -> Option<&TextureHandle> {
        let rows = partial_rows(tile, visible);
        if rows >= tile.height {
            self.tiles.get(&tile.label)
        } else {
            self.partials.get(&(tile.label.clone(), rows))
        }
    }

    /// Decodes and uploads a photo once; failures warn and leave a
    /// placeholder marker.
    pub fn ensure_photo(&mut self, ctx: &egui::Context, entry: &CorePhotoEntry) {
        if self.photos.contains_key(&entry.path) {
            return;
        }
        let loaded = load_photo_image(&entry.path).map(|img| {
            ctx.load_texture(
                format!("photo:{}", entry.path.display()),
                img,
                TextureOptions::LINEAR,
            )
        });
        self.photos.insert(entry.path.clone(), loaded);
    }

    /// Cached photo texture, `None` when the decode failed.
    pub fn photo(&self, path: &Path) -> Option<&TextureHandle> {
        self.photos.get(path).and_then(Option::as_ref)
    }
}

fn load_photo_image(path: &Path) -> Option<ColorImage> {
    match image::open(path) {
        Ok(mut img) => {
            if img.width() > MAX_PHOTO_DIM || img.height() > MAX_PHOTO_DIM {
                img = img.resize(MAX_PHOTO_DIM, MAX_PHOTO_DIM, FilterType::Triangle);
            }
            let rgba = img.to_rgba8();
            let size = [rgba.width() as usize, rgba.height() as usize];
            Some(ColorImage::from_rgba_unmultiplied(size, rgba.as_raw()))
        }
        Err(err) => {
            warn!("core photo {} failed to decode: {err}", path.display());
            None
        }
    }
}

/// Number of tile rows covering `visible` of the tile height.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss, clippy::cast_precision_loss)]
fn partial_rows(tile: &PatternTile, visible: f64) -> usize {
    ((visible * tile.height as f64).round() as usize).clamp(1, tile.height)
}

/// Converts the top `rows` of a normalized tile into an egui image.
fn tile_image(tile: &PatternTile, rows: usize) -> ColorImage {
    let rows = rows.min(tile.height).max(1);
    let mut pixels = Vec::with_capacity(tile.width * rows);
    for row in tile.pixels.chunks(tile.width).take(rows) {
        for &[r, g, b] in row {
            pixels.push(Color32::from_rgb(
                f32_to_u8(r * 255.0),
                f32_to_u8(g * 255.0),
                f32_to_u8(b * 255.0),
            ));
        }
    }
    ColorImage {
        size: [tile.width, rows],
        pixels,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tile() -> PatternTile {
        PatternTile::new("t", 2, 4, vec![[0.5; 3]; 8]).unwrap()
    }

    #[test]
    fn test_partial_rows_clamped() {
        let tile = tile();
        assert_eq!(partial_rows(&tile, 0.5), 2);
        assert_eq!(partial_rows(&tile, 0.0), 1);
        assert_eq!(partial_rows(&tile, 1.0), 4);
    }

    #[test]
    fn test_tile_image_takes_top_rows() {
        let img = tile_image(&tile(), 3);
        assert_eq!(img.size, [2, 3]);
        assert_eq!(img.pixels.len(), 6);
        assert_eq!(img.pixels[0], Color32::from_rgb(128, 128, 128));
    }
}
