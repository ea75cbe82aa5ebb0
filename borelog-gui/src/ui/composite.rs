//! Composite layout: depth-linked panels for photos, bands, and curves.
//!
//! One shared, depth-down axis spans every panel: plots use negated depth on
//! y and a formatter that shows true depth, and all panels join one linked
//! axis group so zooming or panning any panel moves them together.

use eframe::egui::{self, Align2, Id, Key, RichText};
use egui_plot::{Line, MarkerShape, Plot, PlotPoint, PlotPoints, PlotUi, Points, Text};

use super::theme::accent;
use crate::app::BorelogApp;
use crate::state::DragDraft;
use crate::viewer::{annotations, bands, photos};
use borelog_core::{Activation, Region, SessionEvent, SessionState};

const DEPTH_AXIS_GROUP: &str = "depth_axis";
const MIN_PANEL_WIDTH: f32 = 150.0;

impl BorelogApp {
    /// Render the central panel with the composite figure.
    pub(crate) fn render_central_panel(&mut self, ctx: &egui::Context) {
        egui::CentralPanel::default().show(ctx, |ui| {
            if self.dataset.is_none() && self.photos.is_empty() {
                ui.centered_and_justified(|ui| ui.label("No data loaded"));
                return;
            }
            self.ensure_textures(ui.ctx());

            let (n_cat, n_num) = self
                .dataset
                .as_ref()
                .map_or((0, 0), |d| (d.categorical.len(), d.numeric.len()));
            let panel_count = 1 + n_cat + n_num;
            let max_depth = self.axis_depth();

            let spacing = ui.spacing().item_spacing.x;
            #[allow(clippy::cast_precision_loss)]
            let denominator = panel_count as f32;
            let width =
                ((ui.available_width() - spacing * denominator) / denominator).max(MIN_PANEL_WIDTH);
            let height = (ui.available_height() - 28.0).max(200.0);

            egui::ScrollArea::horizontal().show(ui, |ui| {
                ui.horizontal_top(|ui| {
                    self.render_photo_panel(ui, width, height, max_depth);
                    for index in 0..n_cat {
                        self.render_categorical_panel(ui, index, width, height, max_depth);
                    }
                    for index in 0..n_num {
                        self.render_numeric_panel(ui, index, width, height, max_depth);
                    }
                });
            });
        });
    }

    /// Shared axis extent: the deepest observed `To` over table and photos.
    fn axis_depth(&self) -> f64 {
        let photo_depth = self.photos.iter().map(|p| p.end).fold(0.0_f64, f64::max);
        self.dataset
            .as_ref()
            .map_or(photo_depth, |d| d.max_depth().max(photo_depth))
    }

    fn render_photo_panel(&mut self, ui: &mut egui::Ui, width: f32, height: f32, max_depth: f64) {
        let drawing = matches!(self.session.state(), SessionState::Drawing);
        ui.vertical(|ui| {
            ui.set_width(width);
            ui.label(RichText::new("Core photos").strong());
            Plot::new("panel_photo")
                .width(width)
                .height(height)
                .include_x(0.0)
                .include_x(1.0)
                .include_y(0.0)
                .include_y(-max_depth)
                .link_axis(Id::new(DEPTH_AXIS_GROUP), false, true)
                .link_cursor(Id::new(DEPTH_AXIS_GROUP), false, true)
                .y_axis_formatter(|mark, _range| format!("{:.1}", -mark.value))
                .allow_scroll(false)
                .show_axes([false, true])
                .allow_drag(!drawing)
                .show(ui, |plot_ui| self.photo_plot_contents(plot_ui, drawing));
        });
    }

    fn photo_plot_contents(&mut self, plot_ui: &mut PlotUi, drawing: bool) {
        photos::draw_photos(plot_ui, &self.photos, &self.textures);
        annotations::draw_annotations(plot_ui, &self.session);
        if let Some(draft) = self.ui_state.drag {
            annotations::draw_draft(plot_ui, &draft);
        }

        self.ui_state.cursor_depth = plot_ui.pointer_coordinate().map(|p| -p.y);

        if drawing {
            if plot_ui.ctx().input(|i| i.key_pressed(Key::Escape)) {
                self.ui_state.drag = None;
                self.session.apply(SessionEvent::Cancel);
                return;
            }
            self.handle_region_drag(plot_ui);
        } else {
            self.handle_annotation_click(plot_ui);
        }
    }

    fn handle_region_drag(&mut self, plot_ui: &mut PlotUi) {
        let (drag_started, dragged, drag_stopped) = {
            let response = plot_ui.response();
            (
                response.drag_started(),
                response.dragged(),
                response.drag_stopped(),
            )
        };
        let pointer = plot_ui.pointer_coordinate();

        if drag_started {
            if let Some(p) = pointer {
                self.ui_state.drag = Some(DragDraft {
                    start: (p.x, -p.y),
                    current: (p.x, -p.y),
                });
            }
        } else if dragged {
            if let (Some(drag), Some(p)) = (self.ui_state.drag.as_mut(), pointer) {
                drag.current = (p.x, -p.y);
            }
        } else if drag_stopped {
            if let Some(draft) = self.ui_state.drag.take() {
                let region = Region::from_corners(draft.start, draft.current);
                if region.width > 0.0 && region.height > 0.0 {
                    self.session.apply(SessionEvent::RegionDrawn(region));
                }
                // A degenerate drag leaves the session waiting for a region.
            }
        }
    }

    fn handle_annotation_click(&mut self, plot_ui: &mut PlotUi) {
        if !plot_ui.response().clicked() {
            return;
        }
        let Some(p) = plot_ui.pointer_coordinate() else {
            return;
        };
        let Some(index) = self.session.hit_test(p.x, -p.y) else {
            return;
        };
        let ctx = plot_ui.ctx().clone();
        match self.session.activate(index) {
            Some(Activation::Open(path)) => match crate::util::open_external(&path) {
                Ok(()) => self.notify(&ctx, format!("Opened {}", path.display())),
                Err(err) => self.warn_notice(&ctx, err.to_string()),
            },
            Some(Activation::Missing(path)) => {
                self.warn_notice(&ctx, format!("Linked file missing: {}", path.display()));
            }
            None => {}
        }
    }

    fn render_categorical_panel(
        &mut self,
        ui: &mut egui::Ui,
        index: usize,
        width: f32,
        height: f32,
        max_depth: f64,
    ) {
        let Self {
            dataset,
            config,
            pattern_cache,
            textures,
            ..
        } = self;
        let Some(dataset) = dataset.as_ref() else {
            return;
        };
        let Some(track) = dataset.categorical.get(index) else {
            return;
        };
        ui.vertical(|ui| {
            ui.set_width(width);
            ui.label(RichText::new(&track.log).strong());
            Plot::new(format!("panel_cat_{}", track.log))
                .width(width)
                .height(height)
                .include_x(0.0)
                .include_x(1.0)
                .include_y(0.0)
                .include_y(-max_depth)
                .link_axis(Id::new(DEPTH_AXIS_GROUP), false, true)
                .link_cursor(Id::new(DEPTH_AXIS_GROUP), false, true)
                .y_axis_formatter(|mark, _range| format!("{:.1}", -mark.value))
                .allow_scroll(false)
                .show_axes([false, true])
                .show(ui, |plot_ui| {
                    bands::draw_track(plot_ui, track, config, pattern_cache, textures);
                });
        });
    }

    fn render_numeric_panel(
        &mut self,
        ui: &mut egui::Ui,
        index: usize,
        width: f32,
        height: f32,
        max_depth: f64,
    ) {
        let Some(dataset) = self.dataset.as_ref() else {
            return;
        };
        let Some(track) = dataset.numeric.get(index) else {
            return;
        };
        ui.vertical(|ui| {
            ui.set_width(width);
            let heading = if track.error.is_some() {
                format!("{} (!)", track.log)
            } else {
                track.log.clone()
            };
            ui.label(RichText::new(heading).strong());
            let mut plot = Plot::new(format!("panel_num_{}", track.log))
                .width(width)
                .height(height)
                .include_y(0.0)
                .include_y(-max_depth)
                .link_axis(Id::new(DEPTH_AXIS_GROUP), false, true)
                .link_cursor(Id::new(DEPTH_AXIS_GROUP), false, true)
                .y_axis_formatter(|mark, _range| format!("{:.1}", -mark.value))
                .allow_scroll(false);
            if track.error.is_some() {
                plot = plot.include_x(0.0).include_x(1.0);
            }
            plot.show(ui, |plot_ui| {
                if let Some(error) = &track.error {
                    plot_ui.text(
                        Text::new(
                            PlotPoint::new(0.5, -max_depth / 2.0),
                            format!("{}: {error}", track.log),
                        )
                        .color(accent::RED)
                        .anchor(Align2::CENTER_CENTER),
                    );
                } else {
                    // Value on x, interval start depth on the shared axis.
                    let points: Vec<[f64; 2]> = track
                        .points
                        .iter()
                        .map(|[depth, value]| [*value, -*depth])
                        .collect();
                    plot_ui.line(
                        Line::new(PlotPoints::new(points.clone()))
                            .color(accent::BLUE)
                            .width(1.5),
                    );
                    plot_ui.points(
                        Points::new(PlotPoints::new(points))
                            .color(accent::BLUE)
                            .shape(MarkerShape::Circle)
                            .radius(2.5),
                    );
                }
            });
        });
    }
}
