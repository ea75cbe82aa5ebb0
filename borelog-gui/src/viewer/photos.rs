//! Core photograph panel rendering.

use borelog_core::CorePhotoEntry;
use eframe::egui::{Align2, Color32, Stroke};
use egui_plot::{PlotImage, PlotPoint, PlotUi, Polygon, Text};

use crate::util::f64_to_f32;
use crate::viewer::TextureStore;

const PLACEHOLDER_FILL: Color32 = Color32::from_rgb(0x50, 0x50, 0x50);
const PLACEHOLDER_STROKE: Color32 = Color32::from_rgb(0x70, 0x70, 0x70);

/// Draws each photograph at its depth span; failed decodes get a placeholder
/// band instead of aborting the panel.
pub fn draw_photos(plot_ui: &mut PlotUi, photos: &[CorePhotoEntry], textures: &TextureStore) {
    for entry in photos {
        let center = PlotPoint::new(0.5, -(entry.start + entry.end) / 2.0);
        match textures.photo(&entry.path) {
            Some(tex) => {
                let size = [1.0, f64_to_f32(entry.span())];
                plot_ui.image(PlotImage::new(tex, center, size));
            }
            None => {
                plot_ui.polygon(
                    Polygon::new(vec![
                        [0.0, -entry.start],
                        [1.0, -entry.start],
                        [1.0, -entry.end],
                        [0.0, -entry.end],
                    ])
                    .stroke(Stroke::new(1.0, PLACEHOLDER_STROKE))
                    .fill_color(PLACEHOLDER_FILL),
                );
                plot_ui.text(
                    Text::new(center, "photo unavailable")
                        .color(Color32::WHITE)
                        .anchor(Align2::CENTER_CENTER),
                );
            }
        }
    }
}
