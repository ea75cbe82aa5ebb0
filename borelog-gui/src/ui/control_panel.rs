//! Control panel (left sidebar) and bottom status bar rendering.

use eframe::egui::{self, RichText};
use rfd::FileDialog;

use super::theme::{accent, form_label, primary_button, stat_label, stat_value, ThemeColors};
use crate::app::BorelogApp;
use borelog_core::{NumericFallback, SessionEvent, SessionState};

impl BorelogApp {
    /// Render the left control panel.
    pub(crate) fn render_side_panel(&mut self, ctx: &egui::Context) {
        let colors = ThemeColors::from_ctx(ctx);

        egui::SidePanel::left("ctrl")
            .default_width(260.0)
            .frame(
                egui::Frame::none()
                    .fill(colors.bg_panel)
                    .inner_margin(egui::Margin::same(8.0)),
            )
            .show(ctx, |ui| {
                egui::ScrollArea::vertical()
                    .auto_shrink([false, false])
                    .show(ui, |ui| {
                        egui::CollapsingHeader::new("Data")
                            .default_open(true)
                            .show(ui, |ui| self.render_data_section(ui));

                        egui::CollapsingHeader::new("Annotations")
                            .default_open(true)
                            .show(ui, |ui| self.render_annotation_section(ui));

                        egui::CollapsingHeader::new("View")
                            .default_open(false)
                            .show(ui, |ui| self.render_view_section(ui));

                        ui.add_space(12.0);
                    });
            });
    }

    fn render_data_section(&mut self, ui: &mut egui::Ui) {
        ui.label(form_label("Categorical columns"));
        ui.text_edit_singleline(&mut self.ui_state.categorical_input);
        ui.label(form_label("Numeric columns"));
        ui.text_edit_singleline(&mut self.ui_state.numeric_input);
        ui.add_space(4.0);

        if ui.add(primary_button("Open table…")).clicked() {
            if let Some(path) = FileDialog::new().add_filter("Table", &["json"]).pick_file() {
                self.load_dataset(ui.ctx(), &path);
            }
        }
        ui.horizontal(|ui| {
            if ui.button("Photos…").clicked() {
                if let Some(dir) = FileDialog::new().pick_folder() {
                    self.load_photos(ui.ctx(), &dir);
                }
            }
            if ui.button("Patterns…").clicked() {
                if let Some(dir) = FileDialog::new().pick_folder() {
                    self.set_pattern_dir(ui.ctx(), &dir);
                }
            }
        });
        if ui.button("Load view config…").clicked() {
            if let Some(path) = FileDialog::new().add_filter("Config", &["json"]).pick_file() {
                self.load_config(ui.ctx(), &path);
            }
        }

        let summary = self.dataset.as_ref().map(|d| {
            (
                d.index.intervals().len(),
                d.max_depth(),
                d.warning_count(),
                d.categorical
                    .iter()
                    .map(|t| t.log.clone())
                    .collect::<Vec<_>>(),
            )
        });
        let Some((rows, depth, warnings, categorical_logs)) = summary else {
            return;
        };

        ui.add_space(8.0);
        egui::Grid::new("dataset_stats")
            .num_columns(2)
            .spacing(egui::vec2(8.0, 2.0))
            .show(ui, |ui| {
                ui.label(stat_label("Rows"));
                ui.label(stat_value(&rows.to_string()));
                ui.end_row();
                ui.label(stat_label("Depth"));
                ui.label(stat_value(&format!("0..{depth:.1}")));
                ui.end_row();
                ui.label(stat_label("Warnings"));
                ui.label(stat_value(&warnings.to_string()));
                ui.end_row();
                ui.label(stat_label("Photos"));
                ui.label(stat_value(&self.photos.len().to_string()));
                ui.end_row();
            });

        if !categorical_logs.is_empty() {
            ui.add_space(6.0);
            ui.label(form_label("Pattern fills"));
            for log in categorical_logs {
                let mut on = self.config.is_pattern_log(&log);
                if ui.checkbox(&mut on, &log).changed() {
                    self.toggle_pattern_log(&log);
                }
            }
        }
    }

    fn toggle_pattern_log(&mut self, log: &str) {
        if let Some(pos) = self.config.pattern_logs.iter().position(|l| l == log) {
            self.config.pattern_logs.remove(pos);
        } else {
            self.config.pattern_logs.push(log.to_string());
        }
        self.textures.clear_bands();
    }

    fn render_annotation_section(&mut self, ui: &mut egui::Ui) {
        let colors = ThemeColors::from_ui(ui);
        ui.label(
            RichText::new(self.session_status())
                .size(11.0)
                .color(colors.text_muted),
        );
        ui.add_space(4.0);

        let idle = matches!(self.session.state(), SessionState::Idle);
        let count = self.session.annotations().len();

        if ui
            .add_enabled(idle, primary_button("New annotation"))
            .clicked()
        {
            self.session.apply(SessionEvent::BeginRegion);
        }
        ui.horizontal(|ui| {
            if ui
                .add_enabled(idle && count > 0, egui::Button::new("Clear all…"))
                .clicked()
            {
                self.ui_state.show_clear_confirm = true;
            }
            if ui.add_enabled(idle, egui::Button::new("Finish")).clicked() {
                self.session.apply(SessionEvent::Finish);
            }
        });

        ui.add_space(4.0);
        ui.horizontal(|ui| {
            if ui.button("Save session…").clicked() {
                let dialog = FileDialog::new()
                    .add_filter("Session", &["json"])
                    .set_file_name("session.json");
                if let Some(path) = dialog.save_file() {
                    self.save_session_to(ui.ctx(), &path);
                }
            }
            if ui.button("Load session…").clicked() {
                if let Some(path) = FileDialog::new().add_filter("Session", &["json"]).pick_file()
                {
                    self.load_session_from(ui.ctx(), &path);
                }
            }
        });

        if let Some(path) = &self.session_path {
            ui.label(
                RichText::new(format!(
                    "Session: {}",
                    path.file_name().unwrap_or_default().to_string_lossy()
                ))
                .size(10.0)
                .color(colors.text_dim),
            );
        }
        ui.label(
            RichText::new(format!("{count} annotations"))
                .size(10.0)
                .color(colors.text_dim),
        );
    }

    fn render_view_section(&mut self, ui: &mut egui::Ui) {
        ui.label(form_label("NaN fallback"));
        let before = self.config.numeric_fallback;
        egui::ComboBox::from_id_salt("numeric_fallback")
            .selected_text(match self.config.numeric_fallback {
                NumericFallback::Skip => "Skip point",
                NumericFallback::Zero => "Plot as zero",
            })
            .show_ui(ui, |ui| {
                ui.selectable_value(
                    &mut self.config.numeric_fallback,
                    NumericFallback::Skip,
                    "Skip point",
                );
                ui.selectable_value(
                    &mut self.config.numeric_fallback,
                    NumericFallback::Zero,
                    "Plot as zero",
                );
            });
        if before != self.config.numeric_fallback {
            if let Some(path) = self.dataset.as_ref().map(|d| d.path.clone()) {
                self.load_dataset(ui.ctx(), &path);
            }
        }

        ui.add_space(4.0);
        ui.horizontal(|ui| {
            ui.label(form_label("Min label height"));
            ui.add(
                egui::DragValue::new(&mut self.config.min_label_height)
                    .range(0.0..=20.0)
                    .speed(0.1),
            );
        });

        ui.add_space(8.0);
        if ui.button("Save image…").clicked() {
            let dialog = FileDialog::new()
                .add_filter("PNG", &["png"])
                .set_file_name("composite.png");
            if let Some(path) = dialog.save_file() {
                self.export_image(ui.ctx(), path);
            }
        }
    }

    /// Render the bottom status bar.
    pub(crate) fn render_bottom_panel(&self, ctx: &egui::Context) {
        let colors = ThemeColors::from_ctx(ctx);

        egui::TopBottomPanel::bottom("status_bar")
            .frame(
                egui::Frame::none()
                    .fill(colors.bg_header)
                    .inner_margin(egui::Margin::symmetric(16.0, 6.0)),
            )
            .show(ctx, |ui| {
                ui.horizontal(|ui| {
                    let idle = matches!(
                        self.session.state(),
                        SessionState::Idle | SessionState::Finished
                    );
                    let (color, text) = if idle {
                        (accent::GREEN, "Ready")
                    } else {
                        (accent::BLUE, self.session_status())
                    };
                    ui.label(RichText::new("●").size(11.0).color(color));
                    ui.label(RichText::new(text).size(11.0).color(color));
                    Self::status_separator(ui, colors);

                    let depth_text = self
                        .ui_state
                        .cursor_depth
                        .map_or_else(|| "Depth: -".to_string(), |d| format!("Depth: {d:.2}"));
                    ui.label(
                        RichText::new(depth_text)
                            .size(11.0)
                            .color(colors.text_primary),
                    );

                    self.render_notices(ui, ctx, colors);
                });
            });
    }

    fn render_notices(&self, ui: &mut egui::Ui, ctx: &egui::Context, colors: ThemeColors) {
        if let Some((message, expires_at)) = &self.ui_state.notice {
            let now = ctx.input(|i| i.time);
            if now <= *expires_at {
                Self::status_separator(ui, colors);
                ui.label(RichText::new(message).size(11.0).color(accent::BLUE));
                ctx.request_repaint();
            }
        }

        if let Some((message, expires_at)) = &self.ui_state.warning {
            let now = ctx.input(|i| i.time);
            if now <= *expires_at {
                Self::status_separator(ui, colors);
                ui.label(RichText::new(message).size(11.0).color(accent::RED));
            }
        }
    }

    fn status_separator(ui: &mut egui::Ui, colors: ThemeColors) {
        ui.label(RichText::new("│").size(11.0).color(colors.text_dim));
    }
}
