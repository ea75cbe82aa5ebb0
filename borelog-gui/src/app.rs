//! Main application state and logic.
//!
//! Everything runs on the UI thread: loading, rendering, and the annotation
//! flow are event-driven with no background workers, so the pattern cache
//! needs no locking and its get-or-load inserts stay atomic per label.

use std::path::{Path, PathBuf};

use eframe::egui;

use borelog_core::{
    tile_spans, AnnotationSession, ColumnRoles, CorePhotoEntry, SessionEvent, SessionState,
    ViewConfig,
};
use borelog_io::{load_session, load_view_config, save_session, scan_photo_dir, PatternCache};

use crate::dataset::Dataset;
use crate::state::UiState;
use crate::viewer::TextureStore;

/// Main application state.
pub struct BorelogApp {
    /// Rendering and projection options.
    pub(crate) config: ViewConfig,
    /// Loaded and indexed dataset, if any.
    pub(crate) dataset: Option<Dataset>,
    /// Core photographs sorted by start depth.
    pub(crate) photos: Vec<CorePhotoEntry>,
    /// Directory the photos came from.
    pub(crate) photo_dir: Option<PathBuf>,

    /// Memoizing pattern tile loader.
    pub(crate) pattern_cache: PatternCache,
    /// GPU texture cache for bands and photos.
    pub(crate) textures: TextureStore,

    /// The annotation sequence and its state machine.
    pub(crate) session: AnnotationSession,
    /// Where the session persists, once chosen.
    pub(crate) session_path: Option<PathBuf>,

    /// UI display state.
    pub(crate) ui_state: UiState,
}

impl Default for BorelogApp {
    fn default() -> Self {
        let config = ViewConfig::default();
        let pattern_cache = PatternCache::from_config(&config);
        Self {
            config,
            dataset: None,
            photos: Vec::new(),
            photo_dir: None,
            pattern_cache,
            textures: TextureStore::default(),
            session: AnnotationSession::new(),
            session_path: None,
            ui_state: UiState::default(),
        }
    }
}

impl BorelogApp {
    /// Column roles from the side-panel declarations.
    pub(crate) fn declared_roles(&self) -> ColumnRoles {
        ColumnRoles {
            categorical: split_columns(&self.ui_state.categorical_input),
            numeric: split_columns(&self.ui_state.numeric_input),
        }
    }

    /// Load and index a table; a shape error leaves no panels to draw.
    pub(crate) fn load_dataset(&mut self, ctx: &egui::Context, path: &Path) {
        let roles = self.declared_roles();
        match Dataset::load(path, roles, self.config.numeric_fallback) {
            Ok(dataset) => {
                self.textures.clear_bands();
                let warnings = dataset.warning_count();
                let rows = dataset.index.intervals().len();
                self.dataset = Some(dataset);
                if warnings > 0 {
                    self.warn_notice(ctx, format!("Loaded {rows} rows, {warnings} row warnings"));
                } else {
                    self.notify(ctx, format!("Loaded {rows} rows"));
                }
            }
            Err(err) => {
                self.dataset = None;
                self.warn_notice(ctx, format!("Table load failed: {err}"));
            }
        }
    }

    /// Rescan the photo directory.
    pub(crate) fn load_photos(&mut self, ctx: &egui::Context, dir: &Path) {
        match scan_photo_dir(dir) {
            Ok(photos) => {
                self.textures.clear_photos();
                self.notify(ctx, format!("{} core photographs", photos.len()));
                self.photos = photos;
                self.photo_dir = Some(dir.to_path_buf());
            }
            Err(err) => self.warn_notice(ctx, format!("Photo scan failed: {err}")),
        }
    }

    /// Point the pattern cache at a new directory.
    pub(crate) fn set_pattern_dir(&mut self, ctx: &egui::Context, dir: &Path) {
        self.config.pattern_dir = dir.to_path_buf();
        self.pattern_cache = PatternCache::from_config(&self.config);
        self.textures.clear_bands();
        self.notify(ctx, format!("Pattern directory: {}", dir.display()));
    }

    /// Load a view configuration and re-project the dataset under it.
    pub(crate) fn load_config(&mut self, ctx: &egui::Context, path: &Path) {
        match load_view_config(path) {
            Ok(config) => {
                self.config = config;
                self.pattern_cache = PatternCache::from_config(&self.config);
                self.textures.clear_bands();
                if let Some(path) = self.dataset.as_ref().map(|d| d.path.clone()) {
                    self.load_dataset(ctx, &path);
                }
                self.notify(ctx, "View config loaded");
            }
            Err(err) => self.warn_notice(ctx, format!("Config load failed: {err}")),
        }
    }

    /// Persist the whole annotation sequence, overwriting the session file.
    pub(crate) fn save_session_to(&mut self, ctx: &egui::Context, path: &Path) {
        match save_session(path, self.session.annotations()) {
            Ok(()) => {
                self.session_path = Some(path.to_path_buf());
                self.notify(ctx, format!("Session saved ({})", self.session.annotations().len()));
            }
            // Unwritable session files warn; the in-memory session continues.
            Err(err) => self.warn_notice(ctx, format!("Session save failed: {err}")),
        }
    }

    /// Reload a persisted sequence, replacing the in-memory one.
    pub(crate) fn load_session_from(&mut self, ctx: &egui::Context, path: &Path) {
        match load_session(path) {
            Ok(annotations) => {
                self.notify(ctx, format!("Session loaded ({})", annotations.len()));
                self.session.replace_all(annotations);
                self.session_path = Some(path.to_path_buf());
            }
            Err(err) => self.warn_notice(ctx, format!("Session load failed: {err}")),
        }
    }

    /// Ask for a screenshot of the composite; saved when the frame arrives.
    pub(crate) fn export_image(&mut self, ctx: &egui::Context, path: PathBuf) {
        self.ui_state.pending_screenshot = Some(path);
        ctx.send_viewport_cmd(egui::ViewportCommand::Screenshot);
    }

    /// Pick up a delivered screenshot frame and write it to disk.
    pub(crate) fn handle_screenshot_events(&mut self, ctx: &egui::Context) {
        let image = ctx.input(|i| {
            i.events.iter().find_map(|e| match e {
                egui::Event::Screenshot { image, .. } => Some(image.clone()),
                _ => None,
            })
        });
        let Some(image) = image else { return };
        let Some(path) = self.ui_state.pending_screenshot.take() else {
            return;
        };
        match save_color_image(&image, &path) {
            Ok(()) => self.notify(ctx, format!("Image saved to {}", path.display())),
            Err(err) => self.warn_notice(ctx, format!("Image save failed: {err}")),
        }
    }

    /// Upload any textures the coming draw pass needs.
    pub(crate) fn ensure_textures(&mut self, ctx: &egui::Context) {
        let entries = self.photos.clone();
        for entry in &entries {
            self.textures.ensure_photo(ctx, entry);
        }

        let mut wanted = Vec::new();
        if let Some(dataset) = &self.dataset {
            for track in &dataset.categorical {
                if !self.config.is_pattern_log(&track.log) {
                    continue;
                }
                for block in &track.blocks {
                    wanted.push((block.label.clone(), block.start, block.end));
                }
            }
        }
        for (label, start, end) in wanted {
            let Some(tile) = self.pattern_cache.resolve(&label) else {
                continue;
            };
            self.textures.ensure_tile(ctx, &tile);
            for span in tile_spans(start, end, tile.aspect) {
                if span.visible < 1.0 {
                    self.textures.ensure_partial(ctx, &tile, span.visible);
                }
            }
        }
    }

    /// Post a transient informational notice.
    pub(crate) fn notify(&mut self, ctx: &egui::Context, message: impl Into<String>) {
        let expires = ctx.input(|i| i.time) + 5.0;
        self.ui_state.notice = Some((message.into(), expires));
    }

    /// Post a transient warning notice.
    pub(crate) fn warn_notice(&mut self, ctx: &egui::Context, message: impl Into<String>) {
        let message = message.into();
        log::warn!("{message}");
        let expires = ctx.input(|i| i.time) + 8.0;
        self.ui_state.warning = Some((message, expires));
    }

    /// Human-readable annotation state for the status bar.
    pub(crate) fn session_status(&self) -> &'static str {
        match self.session.state() {
            SessionState::Idle => "Ready",
            SessionState::Drawing => "Drag a region on the photo panel",
            SessionState::Labeling { .. } => "Enter a label",
            SessionState::Linking { .. } => "Choose a file to link",
            SessionState::Finished => "Finished",
        }
    }

    /// The blocking file picker for the linking step.
    ///
    /// Runs in the frame after a label is accepted; selection commits the
    /// annotation, cancel discards the draft with no sequence mutation.
    pub(crate) fn handle_linking(&mut self, ctx: &egui::Context) {
        if !matches!(self.session.state(), SessionState::Linking { .. }) {
            return;
        }
        let picked = rfd::FileDialog::new()
            .set_title("Link a file to the annotation")
            .pick_file();
        match picked {
            Some(path) => {
                if self.session.apply(SessionEvent::FileLinked(path)) {
                    let count = self.session.annotations().len();
                    self.notify(ctx, format!("Annotation added ({count} total)"));
                }
            }
            None => {
                self.session.apply(SessionEvent::Cancel);
                self.notify(ctx, "Annotation cancelled");
            }
        }
    }
}

fn split_columns(input: &str) -> Vec<String> {
    input
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(ToString::to_string)
        .collect()
}

fn save_color_image(image: &egui::ColorImage, path: &Path) -> anyhow::Result<()> {
    let [width, height] = image.size;
    let mut bytes = Vec::with_capacity(width * height * 4);
    for pixel in &image.pixels {
        bytes.extend_from_slice(&pixel.to_array());
    }
    image::save_buffer(
        path,
        &bytes,
        u32::try_from(width)?,
        u32::try_from(height)?,
        image::ExtendedColorType::Rgba8,
    )?;
    Ok(())
}

impl eframe::App for BorelogApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.handle_screenshot_events(ctx);
        self.render_side_panel(ctx);
        self.render_bottom_panel(ctx);
        self.render_central_panel(ctx);
        self.render_label_dialog(ctx);
        self.render_clear_confirm(ctx);
        self.handle_linking(ctx);

        if self.session.is_finished() {
            ctx.send_viewport_cmd(egui::ViewportCommand::Close);
        }
    }
}
