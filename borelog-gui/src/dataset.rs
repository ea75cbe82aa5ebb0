//! Loaded dataset bundle: indexed table plus per-track projections.

use std::path::{Path, PathBuf};

use borelog_core::{
    segment_blocks, sorted_unique_labels, CategoricalBlock, ColumnRoles, IntervalIndex,
    NumericFallback,
};
use borelog_io::load_table;
use log::warn;

/// One categorical track ready to render.
pub struct CategoricalTrack {
    pub log: String,
    pub blocks: Vec<CategoricalBlock>,
    /// Sorted-unique label set; defines palette indices.
    pub labels: Vec<String>,
}

/// One numeric track ready to render.
pub struct NumericTrack {
    pub log: String,
    /// `[depth, value]` points sorted by depth.
    pub points: Vec<[f64; 2]>,
    /// Why the track cannot be plotted, when it cannot.
    pub error: Option<String>,
}

/// An indexed dataset and its render-ready projections.
pub struct Dataset {
    pub path: PathBuf,
    pub index: IntervalIndex,
    pub categorical: Vec<CategoricalTrack>,
    pub numeric: Vec<NumericTrack>,
}

impl Dataset {
    /// Loads and indexes a table, logging row warnings as they surface.
    ///
    /// Only a structurally invalid table fails; row- and cell-level problems
    /// degrade the affected track.
    pub fn load(
        path: &Path,
        roles: ColumnRoles,
        fallback: NumericFallback,
    ) -> borelog_io::Result<Self> {
        let table = load_table(path, roles.clone())?;
        let index = IntervalIndex::from_table(&table);
        for warning in index.warnings() {
            warn!("{warning}");
        }

        let categorical = roles
            .categorical
            .iter()
            .map(|log| {
                let intervals = index.categorical_intervals(log);
                let labels = sorted_unique_labels(&intervals);
                let blocks = segment_blocks(log, &intervals);
                CategoricalTrack {
                    log: log.clone(),
                    blocks,
                    labels,
                }
            })
            .collect();

        let numeric = roles
            .numeric
            .iter()
            .map(|log| {
                let (points, warnings) = index.numeric_series(log, fallback);
                for warning in &warnings {
                    warn!("{warning}");
                }
                let error = if !index.has_column(log) {
                    Some("column not found".to_string())
                } else if points.is_empty() {
                    Some("no numeric values".to_string())
                } else {
                    None
                };
                NumericTrack {
                    log: log.clone(),
                    points,
                    error,
                }
            })
            .collect();

        Ok(Self {
            path: path.to_path_buf(),
            index,
            categorical,
            numeric,
        })
    }

    /// Shared depth-axis extent for every panel.
    pub fn max_depth(&self) -> f64 {
        self.index.max_depth()
    }

    /// Photo panel plus one panel per declared track.
    pub fn panel_count(&self) -> usize {
        1 + self.categorical.len() + self.numeric.len()
    }

    /// Count of row warnings raised at index time.
    pub fn warning_count(&self) -> usize {
        self.index.warnings().len()
    }
}
