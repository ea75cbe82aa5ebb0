//! Raw depth-interval table model.
//!
//! A [`LogTable`] is the record boundary of the system: whatever produced the
//! records (spreadsheet reader, CSV exporter, test fixture) has already split
//! them into named cells. Construction validates the table shape; per-row
//! depth problems are deferred to interval indexing.

use std::collections::{BTreeMap, BTreeSet};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Required start-depth column name.
pub const FROM_COLUMN: &str = "From";
/// Required end-depth column name.
pub const TO_COLUMN: &str = "To";

/// A single table cell.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize), serde(untagged))]
pub enum CellValue {
    /// Numeric cell.
    Number(f64),
    /// Text cell.
    Text(String),
    /// Absent or null cell.
    Empty,
}

impl CellValue {
    /// Returns the cell as a non-blank label, if it has one.
    pub fn label(&self) -> Option<&str> {
        match self {
            CellValue::Text(s) => {
                let t = s.trim();
                (!t.is_empty()).then_some(t)
            }
            _ => None,
        }
    }

    /// Returns the cell as a number, parsing text cells on a best-effort basis.
    pub fn number(&self) -> Option<f64> {
        match self {
            CellValue::Number(n) => Some(*n),
            CellValue::Text(s) => s.trim().parse().ok(),
            CellValue::Empty => None,
        }
    }
}

/// One depth-interval row with its raw per-column cells.
///
/// `from`/`to` are NaN when the source cell was absent or unparseable; the
/// interval index flags such rows without dropping them.
#[derive(Debug, Clone, PartialEq)]
pub struct LogRow {
    pub from: f64,
    pub to: f64,
    pub cells: BTreeMap<String, CellValue>,
}

/// Column roles declared by the user for one dataset.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize), serde(default))]
pub struct ColumnRoles {
    /// Columns rendered as categorical band tracks.
    pub categorical: Vec<String>,
    /// Columns rendered as numeric line tracks.
    pub numeric: Vec<String>,
}

/// A shape-validated table of depth-interval rows.
#[derive(Debug, Clone)]
pub struct LogTable {
    rows: Vec<LogRow>,
    roles: ColumnRoles,
}

impl LogTable {
    /// Builds a table from raw records.
    ///
    /// Fails with [`Error::DataShape`] when the `From`/`To` columns are absent
    /// from the union of record keys, naming both the missing columns and the
    /// columns actually found. Rows whose depth cells fail to parse are kept
    /// with NaN bounds.
    pub fn from_records(
        records: Vec<BTreeMap<String, CellValue>>,
        roles: ColumnRoles,
    ) -> Result<Self> {
        let found: BTreeSet<String> = records
            .iter()
            .flat_map(|r| r.keys().cloned())
            .collect();

        let missing: Vec<String> = [FROM_COLUMN, TO_COLUMN]
            .iter()
            .filter(|c| !found.contains(**c))
            .map(ToString::to_string)
            .collect();
        if !missing.is_empty() {
            return Err(Error::DataShape {
                missing,
                found: found.into_iter().collect(),
            });
        }

        let rows = records
            .into_iter()
            .map(|mut cells| {
                let from = cells
                    .remove(FROM_COLUMN)
                    .as_ref()
                    .and_then(CellValue::number)
                    .unwrap_or(f64::NAN);
                let to = cells
                    .remove(TO_COLUMN)
                    .as_ref()
                    .and_then(CellValue::number)
                    .unwrap_or(f64::NAN);
                LogRow { from, to, cells }
            })
            .collect();

        Ok(Self { rows, roles })
    }

    /// All rows in input order.
    pub fn rows(&self) -> &[LogRow] {
        &self.rows
    }

    /// Declared column roles.
    pub fn roles(&self) -> &ColumnRoles {
        &self.roles
    }

    /// Number of rows.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Whether the table has no rows.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(pairs: &[(&str, CellValue)]) -> BTreeMap<String, CellValue> {
        pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), v.clone()))
            .collect()
    }

    #[test]
    fn test_missing_depth_columns_is_fatal() {
        let records = vec![record(&[
            ("Depth", CellValue::Number(1.0)),
            ("Lithology", CellValue::Text("Granite".into())),
        ])];
        let err = LogTable::from_records(records, ColumnRoles::default()).unwrap_err();
        match err {
            Error::DataShape { missing, found } => {
                assert_eq!(missing, vec!["From".to_string(), "To".to_string()]);
                assert!(found.contains(&"Depth".to_string()));
                assert!(found.contains(&"Lithology".to_string()));
            }
            other => panic!("expected DataShape, got {other:?}"),
        }
    }

    #[test]
    fn test_depth_cells_parse_from_text() {
        let records = vec![record(&[
            ("From", CellValue::Text(" 0.5 ".into())),
            ("To", CellValue::Number(2.0)),
        ])];
        let table = LogTable::from_records(records, ColumnRoles::default()).unwrap();
        assert_eq!(table.rows()[0].from, 0.5);
        assert_eq!(table.rows()[0].to, 2.0);
    }

    #[test]
    fn test_unparseable_depth_kept_as_nan() {
        let records = vec![record(&[
            ("From", CellValue::Text("n/a".into())),
            ("To", CellValue::Number(2.0)),
        ])];
        let table = LogTable::from_records(records, ColumnRoles::default()).unwrap();
        assert!(table.rows()[0].from.is_nan());
        assert_eq!(table.len(), 1);
    }

    #[test]
    fn test_blank_text_is_not_a_label() {
        assert_eq!(CellValue::Text("  ".into()).label(), None);
        assert_eq!(CellValue::Text(" Shale ".into()).label(), Some("Shale"));
        assert_eq!(CellValue::Number(3.0).label(), None);
    }
}
