//! Modal dialogs for the annotation flow.

use eframe::egui::{self, Align2};

use super::theme::{form_label, primary_button};
use crate::app::BorelogApp;
use borelog_core::{SessionEvent, SessionState};

impl BorelogApp {
    /// Label entry dialog, shown while the session awaits a label.
    ///
    /// OK with a blank field behaves as cancel; the state machine discards
    /// the draft region either way.
    pub(crate) fn render_label_dialog(&mut self, ctx: &egui::Context) {
        if !matches!(self.session.state(), SessionState::Labeling { .. }) {
            return;
        }

        let mut submit = false;
        let mut cancel = false;
        egui::Window::new("Annotation label")
            .collapsible(false)
            .resizable(false)
            .anchor(Align2::CENTER_CENTER, [0.0, 0.0])
            .show(ctx, |ui| {
                ui.label(form_label("Label"));
                let response = ui.text_edit_singleline(&mut self.ui_state.label_draft);
                response.request_focus();
                if response.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter)) {
                    submit = true;
                }
                ui.add_space(6.0);
                ui.horizontal(|ui| {
                    if ui.add(primary_button("OK")).clicked() {
                        submit = true;
                    }
                    if ui.button("Cancel").clicked() {
                        cancel = true;
                    }
                });
            });

        if submit {
            let label = std::mem::take(&mut self.ui_state.label_draft);
            self.session.apply(SessionEvent::LabelEntered(label));
        } else if cancel {
            self.ui_state.label_draft.clear();
            self.session.apply(SessionEvent::Cancel);
        }
    }

    /// Confirmation dialog guarding the clear-all command.
    pub(crate) fn render_clear_confirm(&mut self, ctx: &egui::Context) {
        if !self.ui_state.show_clear_confirm {
            return;
        }

        let count = self.session.annotations().len();
        let mut confirm = false;
        let mut cancel = false;
        egui::Window::new("Clear annotations?")
            .collapsible(false)
            .resizable(false)
            .anchor(Align2::CENTER_CENTER, [0.0, 0.0])
            .show(ctx, |ui| {
                ui.label(format!("Remove all {count} annotations from the session?"));
                ui.add_space(6.0);
                ui.horizontal(|ui| {
                    if ui.add(primary_button("Clear all")).clicked() {
                        confirm = true;
                    }
                    if ui.button("Cancel").clicked() {
                        cancel = true;
                    }
                });
            });

        if confirm {
            self.ui_state.show_clear_confirm = false;
            if self.session.apply(SessionEvent::ClearAll) {
                self.notify(ctx, "Annotations cleared");
            }
        } else if cancel {
            self.ui_state.show_clear_confirm = false;
        }
    }
}
