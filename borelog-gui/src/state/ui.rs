//! UI state: dialogs, transient notices, and in-progress interactions.

use std::path::PathBuf;

/// An in-progress region drag on the photo panel, in (x, depth) coordinates.
#[derive(Debug, Clone, Copy)]
pub struct DragDraft {
    pub start: (f64, f64),
    pub current: (f64, f64),
}

/// Panel visibility, dialog, and notice state.
pub struct UiState {
    /// Transient informational notice `(message, expires_at)`.
    pub notice: Option<(String, f64)>,
    /// Transient warning notice `(message, expires_at)`.
    pub warning: Option<(String, f64)>,

    /// Whether the clear-all confirmation dialog is open.
    pub show_clear_confirm: bool,
    /// Text being typed into the label dialog.
    pub label_draft: String,
    /// Region drag in progress while the session is in its drawing state.
    pub drag: Option<DragDraft>,

    /// Cursor depth readout for the status bar.
    pub cursor_depth: Option<f64>,

    /// Output path for a screenshot requested but not yet delivered.
    pub pending_screenshot: Option<PathBuf>,

    /// Comma-separated categorical column declarations.
    pub categorical_input: String,
    /// Comma-separated numeric column declarations.
    pub numeric_input: String,
}

impl Default for UiState {
    fn default() -> Self {
        Self {
            notice: None,
            warning: None,
            show_clear_confirm: false,
            label_draft: String::new(),
            drag: None,
            cursor_depth: None,
            pending_screenshot: None,
            categorical_input: "Lithology".to_string(),
            numeric_input: String::new(),
        }
    }
}
