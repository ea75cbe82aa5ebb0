//! borelog-core: data model and segmentation for borehole interval logs.
//!
//! This crate provides the foundational pieces of the composite viewer:
//! interval indexing and validation, block segmentation, pattern tiling
//! geometry, deterministic band colors, and the annotation session state
//! machine. It performs no I/O and has no UI dependencies.

pub mod annotation;
pub mod block;
pub mod config;
pub mod error;
pub mod interval;
pub mod palette;
pub mod pattern;
pub mod photo;
pub mod table;

pub use annotation::{Activation, Annotation, AnnotationSession, Region, SessionEvent, SessionState};
pub use block::{segment_blocks, CategoricalBlock};
pub use config::{ViewConfig, PATTERN_EXTENSIONS};
pub use error::{Error, Result, RowWarning};
pub use interval::{DepthInterval, IntervalIndex, LogInterval, NumericFallback};
pub use palette::{band_color, sorted_unique_labels, BAND_PALETTE};
pub use pattern::{tile_spans, PatternTile, TileSpan, ASPECT_EPSILON};
pub use photo::{sort_photo_entries, CorePhotoEntry, PHOTO_EXTENSIONS};
pub use table::{CellValue, ColumnRoles, LogRow, LogTable, FROM_COLUMN, TO_COLUMN};
