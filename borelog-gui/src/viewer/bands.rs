//! Categorical band rendering: solid fills and pattern strips.

use borelog_core::{band_color, tile_spans, CategoricalBlock, PatternTile, ViewConfig};
use borelog_io::PatternCache;
use eframe::egui::{Align2, Color32, Stroke};
use egui_plot::{PlotImage, PlotPoint, PlotUi, Polygon, Text};

use crate::dataset::CategoricalTrack;
use crate::util::f64_to_f32;
use crate::viewer::TextureStore;

const OUTLINE: Color32 = Color32::from_rgb(0x42, 0x42, 0x42);
const LABEL_COLOR: Color32 = Color32::from_rgb(0x21, 0x21, 0x21);

/// Draws every block of one categorical track against the shared depth axis.
///
/// Pattern mode needs both the track to be pattern-eligible and the cache to
/// resolve the block's label; everything else falls back to the deterministic
/// solid color for the label.
pub fn draw_track(
    plot_ui: &mut PlotUi,
    track: &CategoricalTrack,
    config: &ViewConfig,
    cache: &mut PatternCache,
    textures: &TextureStore,
) {
    let pattern_eligible = config.is_pattern_log(&track.log);
    for block in &track.blocks {
        let tile = if pattern_eligible {
            cache.resolve(&block.label)
        } else {
            None
        };
        match tile {
            Some(tile) => draw_pattern_block(plot_ui, block, &tile, textures),
            None => draw_solid_block(plot_ui, block, &track.labels),
        }

        if block.shows_label(config.min_label_height, &config.undefined_sentinel) {
            let mid = -(block.start + block.end) / 2.0;
            plot_ui.text(
                Text::new(PlotPoint::new(0.5, mid), block.label.clone())
                    .color(LABEL_COLOR)
                    .anchor(Align2::CENTER_CENTER),
            );
        }
    }
}

fn draw_solid_block(plot_ui: &mut PlotUi, block: &CategoricalBlock, labels: &[String]) {
    let [r, g, b] = band_color(labels, &block.label);
    plot_ui.polygon(
        Polygon::new(block_corners(block))
            .stroke(Stroke::new(1.0, OUTLINE))
            .fill_color(Color32::from_rgb(r, g, b)),
    );
}

fn draw_pattern_block(
    plot_ui: &mut PlotUi,
    block: &CategoricalBlock,
    tile: &PatternTile,
    textures: &TextureStore,
) {
    for span in tile_spans(block.start, block.end, tile.aspect) {
        let Some(tex) = textures.span_texture(tile, span.visible) else {
            continue;
        };
        let center = PlotPoint::new(0.5, -(span.start + span.end) / 2.0);
        let size = [1.0, f64_to_f32(span.end - span.start)];
        plot_ui.image(PlotImage::new(tex, center, size));
    }
    // Outline over the strip so tiled blocks read as one band.
    plot_ui.polygon(
        Polygon::new(block_corners(block))
            .stroke(Stroke::new(1.0, OUTLINE))
            .fill_color(Color32::TRANSPARENT),
    );
}

fn block_corners(block: &CategoricalBlock) -> Vec<[f64; 2]> {
    vec![
        [0.0, -block.start],
        [1.0, -block.start],
        [1.0, -block.end],
        [0.0, -block.end],
    ]
}
