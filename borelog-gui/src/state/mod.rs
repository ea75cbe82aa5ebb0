//! Application state modules.

mod ui;

pub use ui::{DragDraft, UiState};
