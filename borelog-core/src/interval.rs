//! Depth-interval indexing and per-log projections.

use std::collections::BTreeMap;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::RowWarning;
use crate::table::{CellValue, LogTable};

/// A depth interval carrying the raw values of its source row.
///
/// Immutable once indexed. `start < end` is the expected shape; rows that
/// violate it are retained and flagged so the dataset stays inspectable.
#[derive(Debug, Clone, PartialEq)]
pub struct DepthInterval {
    pub start: f64,
    pub end: f64,
    pub values: BTreeMap<String, CellValue>,
}

/// One categorical log's view of an interval.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct LogInterval {
    pub start: f64,
    pub end: f64,
    pub label: String,
}

/// Fallback applied when a numeric cell has no usable value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum NumericFallback {
    /// Omit the point from the series.
    #[default]
    Skip,
    /// Plot the point at zero.
    Zero,
}

/// Sorted, validated intervals for one dataset.
#[derive(Debug, Clone)]
pub struct IntervalIndex {
    intervals: Vec<DepthInterval>,
    warnings: Vec<RowWarning>,
    max_depth: f64,
}

impl IntervalIndex {
    /// Indexes a table: sorts rows by start depth and flags depth problems.
    ///
    /// Rows with non-finite or inverted bounds are retained with a
    /// [`RowWarning`]; nothing here is fatal.
    pub fn from_table(table: &LogTable) -> Self {
        let mut intervals: Vec<DepthInterval> = table
            .rows()
            .iter()
            .map(|row| DepthInterval {
                start: row.from,
                end: row.to,
                values: row.cells.clone(),
            })
            .collect();
        // NaN starts order last under the IEEE total order.
        intervals.sort_by(|a, b| a.start.total_cmp(&b.start));

        let mut warnings = Vec::new();
        let mut max_depth: f64 = 0.0;
        for (row, iv) in intervals.iter().enumerate() {
            if !iv.start.is_finite() || !iv.end.is_finite() {
                warnings.push(RowWarning::NonFiniteDepth {
                    row,
                    from: iv.start,
                    to: iv.end,
                });
            } else if iv.start >= iv.end {
                warnings.push(RowWarning::InvertedDepth {
                    row,
                    from: iv.start,
                    to: iv.end,
                });
            }
            if iv.end.is_finite() {
                max_depth = max_depth.max(iv.end);
            }
        }

        Self {
            intervals,
            warnings,
            max_depth,
        }
    }

    /// Sorted intervals, including flagged ones.
    pub fn intervals(&self) -> &[DepthInterval] {
        &self.intervals
    }

    /// Depth warnings collected at index time.
    pub fn warnings(&self) -> &[RowWarning] {
        &self.warnings
    }

    /// Maximum observed end depth across the whole dataset.
    ///
    /// This is the shared axis extent: `[0, max_depth]` for every panel, not
    /// a per-log range.
    pub fn max_depth(&self) -> f64 {
        self.max_depth
    }

    /// Whether any row carries a cell for `column`.
    pub fn has_column(&self, column: &str) -> bool {
        self.intervals.iter().any(|iv| iv.values.contains_key(column))
    }

    /// Projects one categorical log's intervals.
    ///
    /// Rows without a label for this log are excluded from this projection
    /// only; rows with flagged depths stay in (the segmenter refuses to merge
    /// them, so they cannot corrupt blocks).
    pub fn categorical_intervals(&self, log: &str) -> Vec<LogInterval> {
        self.intervals
            .iter()
            .filter_map(|iv| {
                let label = iv.values.get(log).and_then(CellValue::label)?;
                Some(LogInterval {
                    start: iv.start,
                    end: iv.end,
                    label: label.to_string(),
                })
            })
            .collect()
    }

    /// Projects one numeric log as `[start_depth, value]` points.
    ///
    /// Cells with no usable number follow `fallback` and are reported in the
    /// returned warnings either way.
    pub fn numeric_series(
        &self,
        log: &str,
        fallback: NumericFallback,
    ) -> (Vec<[f64; 2]>, Vec<RowWarning>) {
        let mut points = Vec::with_capacity(self.intervals.len());
        let mut warnings = Vec::new();
        for (row, iv) in self.intervals.iter().enumerate() {
            if !iv.start.is_finite() {
                continue;
            }
            match iv.values.get(log).and_then(CellValue::number) {
                Some(v) if v.is_finite() => points.push([iv.start, v]),
                _ => {
                    warnings.push(RowWarning::NonNumericCell {
                        row,
                        column: log.to_string(),
                    });
                    if fallback == NumericFallback::Zero {
                        points.push([iv.start, 0.0]);
                    }
                }
            }
        }
        (points, warnings)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::table::{ColumnRoles, LogTable};
    use std::collections::BTreeMap;

    fn table_from_rows(rows: Vec<(f64, f64, &str)>) -> LogTable {
        let records = rows
            .into_iter()
            .map(|(from, to, lith)| {
                let mut r: BTreeMap<String, CellValue> = BTreeMap::new();
                r.insert("From".into(), CellValue::Number(from));
                r.insert("To".into(), CellValue::Number(to));
                if !lith.is_empty() {
                    r.insert("Lithology".into(), CellValue::Text(lith.into()));
                }
                r
            })
            .collect();
        LogTable::from_records(records, ColumnRoles::default()).unwrap()
    }

    #[test]
    fn test_rows_sorted_by_start() {
        let index = IntervalIndex::from_table(&table_from_rows(vec![
            (5.0, 8.0, "B"),
            (0.0, 5.0, "A"),
        ]));
        let starts: Vec<f64> = index.intervals().iter().map(|iv| iv.start).collect();
        assert_eq!(starts, vec![0.0, 5.0]);
    }

    #[test]
    fn test_bad_depths_flagged_but_retained() {
        let index = IntervalIndex::from_table(&table_from_rows(vec![
            (0.0, 5.0, "A"),
            (5.0, 5.0, "A"),
            (f64::NAN, 7.0, "A"),
        ]));
        assert_eq!(index.intervals().len(), 3);
        assert_eq!(index.warnings().len(), 2);
        match &index.warnings()[0] {
            RowWarning::InvertedDepth { from, to, .. } => {
                assert_eq!(*from, 5.0);
                assert_eq!(*to, 5.0);
            }
            other => panic!("expected InvertedDepth, got {other:?}"),
        }
        assert!(matches!(index.warnings()[1], RowWarning::NonFiniteDepth { .. }));
    }

    #[test]
    fn test_missing_label_excluded_from_log_only() {
        let index = IntervalIndex::from_table(&table_from_rows(vec![
            (0.0, 5.0, "A"),
            (5.0, 8.0, ""),
            (8.0, 9.0, "B"),
        ]));
        let ivs = index.categorical_intervals("Lithology");
        assert_eq!(ivs.len(), 2);
        assert_eq!(ivs[0].label, "A");
        assert_eq!(ivs[1].label, "B");
        // The unlabeled row still counts toward the axis extent.
        assert_eq!(index.max_depth(), 9.0);
    }

    #[test]
    fn test_max_depth_is_dataset_wide() {
        let index = IntervalIndex::from_table(&table_from_rows(vec![
            (0.0, 3.0, "A"),
            (3.0, 12.5, ""),
        ]));
        assert_eq!(index.max_depth(), 12.5);
    }

    #[test]
    fn test_numeric_series_skip_vs_zero() {
        let mut r1: BTreeMap<String, CellValue> = BTreeMap::new();
        r1.insert("From".into(), CellValue::Number(0.0));
        r1.insert("To".into(), CellValue::Number(1.0));
        r1.insert("Assay".into(), CellValue::Number(4.5));
        let mut r2 = r1.clone();
        r2.insert("From".into(), CellValue::Number(1.0));
        r2.insert("To".into(), CellValue::Number(2.0));
        r2.insert("Assay".into(), CellValue::Text("trace".into()));
        let table =
            LogTable::from_records(vec![r1, r2], ColumnRoles::default()).unwrap();
        let index = IntervalIndex::from_table(&table);

        let (pts, warns) = index.numeric_series("Assay", NumericFallback::Skip);
        assert_eq!(pts, vec![[0.0, 4.5]]);
        assert_eq!(warns.len(), 1);

        let (pts, warns) = index.numeric_series("Assay", NumericFallback::Zero);
        assert_eq!(pts, vec![[0.0, 4.5], [1.0, 0.0]]);
        assert_eq!(warns.len(), 1);
    }
}
