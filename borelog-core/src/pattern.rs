//! Pattern tile data and depth-axis tiling geometry.

use crate::error::{Error, Result};

/// Minimum accepted height-per-width ratio for a pattern tile.
pub const ASPECT_EPSILON: f64 = 1e-6;

/// A decoded lithology pattern tile, normalized to 0-1 RGB.
///
/// Owned exclusively by the pattern cache; loaded at most once per label for
/// the cache's lifetime.
#[derive(Debug, Clone, PartialEq)]
pub struct PatternTile {
    pub label: String,
    pub width: usize,
    pub height: usize,
    /// Row-major RGB pixels, each channel in 0..=1.
    pub pixels: Vec<[f32; 3]>,
    /// Height per unit width. One tile covers this many depth units when the
    /// panel's horizontal span is normalized to one unit.
    pub aspect: f64,
}

impl PatternTile {
    /// Builds a tile from a normalized pixel buffer.
    ///
    /// Rejects zero-sized buffers, mismatched lengths, and aspect ratios at or
    /// below [`ASPECT_EPSILON`].
    #[allow(clippy::cast_precision_loss)]
    pub fn new(label: &str, width: usize, height: usize, pixels: Vec<[f32; 3]>) -> Result<Self> {
        if width == 0 || height == 0 || pixels.len() != width * height {
            return Err(Error::DegenerateTile {
                label: label.to_string(),
                width,
                height,
            });
        }
        let aspect = height as f64 / width as f64;
        if aspect <= ASPECT_EPSILON {
            return Err(Error::DegenerateTile {
                label: label.to_string(),
                width,
                height,
            });
        }
        Ok(Self {
            label: label.to_string(),
            width,
            height,
            pixels,
            aspect,
        })
    }
}

/// One repetition of a tile along the depth axis.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TileSpan {
    pub start: f64,
    pub end: f64,
    /// Fraction of the tile's height visible in this span; the final span of
    /// a block is clipped rather than overflowing.
    pub visible: f64,
}

/// Lays tiles of `aspect` depth units from `start` down to `end`.
///
/// Tiling begins exactly at `start`; the last tile is clipped to `end`.
/// Degenerate inputs (non-finite bounds, empty span, aspect at or below
/// epsilon) yield no spans.
pub fn tile_spans(start: f64, end: f64, aspect: f64) -> Vec<TileSpan> {
    let mut spans = Vec::new();
    if !start.is_finite() || !end.is_finite() || end <= start || aspect <= ASPECT_EPSILON {
        return spans;
    }
    let mut top = start;
    while top < end {
        let bottom = (top + aspect).min(end);
        spans.push(TileSpan {
            start: top,
            end: bottom,
            visible: (bottom - top) / aspect,
        });
        top += aspect;
    }
    spans
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_tile_rejects_degenerate_shapes() {
        assert!(PatternTile::new("gravel", 0, 10, vec![]).is_err());
        assert!(PatternTile::new("gravel", 4, 2, vec![[0.0; 3]; 7]).is_err());
    }

    #[test]
    fn test_tile_aspect_is_height_per_width() {
        let tile = PatternTile::new("sand", 4, 6, vec![[0.5; 3]; 24]).unwrap();
        assert_relative_eq!(tile.aspect, 1.5);
    }

    #[test]
    fn test_tiling_clips_final_span() {
        let spans = tile_spans(2.0, 3.25, 0.5);
        assert_eq!(spans.len(), 3);
        assert_relative_eq!(spans[0].start, 2.0);
        assert_relative_eq!(spans[0].visible, 1.0);
        assert_relative_eq!(spans[2].start, 3.0);
        assert_relative_eq!(spans[2].end, 3.25);
        assert_relative_eq!(spans[2].visible, 0.5);
    }

    #[test]
    fn test_tiling_starts_at_block_start() {
        // Tiling is anchored to the block, not the axis origin.
        let spans = tile_spans(7.3, 8.3, 1.0);
        assert_eq!(spans.len(), 1);
        assert_relative_eq!(spans[0].start, 7.3);
        assert_relative_eq!(spans[0].end, 8.3);
    }

    #[test]
    fn test_tiling_degenerate_inputs_yield_nothing() {
        assert!(tile_spans(5.0, 5.0, 1.0).is_empty());
        assert!(tile_spans(0.0, 10.0, 0.0).is_empty());
        assert!(tile_spans(f64::NAN, 10.0, 1.0).is_empty());
    }
}
