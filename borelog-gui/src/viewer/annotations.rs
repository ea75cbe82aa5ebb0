//! Annotation overlay rendering on the photo panel.

use borelog_core::{AnnotationSession, Region};
use eframe::egui::{Align2, Color32, Stroke};
use egui_plot::{PlotPoint, PlotUi, Polygon, Text};

use crate::state::DragDraft;

/// Stroke palette for annotations by insertion index.
const ANNOTATION_PALETTE: [Color32; 6] = [
    Color32::from_rgb(0x4a, 0x9e, 0xff),
    Color32::from_rgb(0xef, 0x44, 0x44),
    Color32::from_rgb(0x10, 0xb9, 0x81),
    Color32::from_rgb(0xf5, 0x9e, 0x0b),
    Color32::from_rgb(0x8b, 0x5c, 0xff),
    Color32::from_rgb(0xf4, 0x72, 0xb6),
];

/// Replays the whole committed sequence in insertion order.
///
/// Immediate-mode redraw means the overlay always reflects the latest clear
/// or append with no stale visuals.
pub fn draw_annotations(plot_ui: &mut PlotUi, session: &AnnotationSession) {
    for (index, annotation) in session.annotations().iter().enumerate() {
        let color = ANNOTATION_PALETTE[index % ANNOTATION_PALETTE.len()];
        plot_ui.polygon(
            Polygon::new(region_corners(&annotation.region))
                .stroke(Stroke::new(2.0, color))
                .fill_color(fill_color(color)),
        );
        plot_ui.text(
            Text::new(
                PlotPoint::new(annotation.region.x, -annotation.region.y),
                annotation.label.clone(),
            )
            .color(color)
            .anchor(Align2::LEFT_BOTTOM),
        );
    }
}

/// Draws the in-progress drag rectangle while the session is drawing.
pub fn draw_draft(plot_ui: &mut PlotUi, draft: &DragDraft) {
    let region = Region::from_corners(draft.start, draft.current);
    let color = ANNOTATION_PALETTE[0];
    plot_ui.polygon(
        Polygon::new(region_corners(&region))
            .stroke(Stroke::new(1.0, color))
            .fill_color(fill_color(color)),
    );
}

fn region_corners(region: &Region) -> Vec<[f64; 2]> {
    vec![
        [region.x, -region.y],
        [region.x + region.width, -region.y],
        [region.x + region.width, -(region.y + region.height)],
        [region.x, -(region.y + region.height)],
    ]
}

fn fill_color(color: Color32) -> Color32 {
    Color32::from_rgba_unmultiplied(color.r(), color.g(), color.b(), 48)
}
