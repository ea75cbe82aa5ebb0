//! Loading interval tables from JSON records.
//!
//! The record boundary: whatever produced the file (spreadsheet export, a
//! conversion script) has already split rows into named cells. Shape
//! validation happens in `borelog_core::LogTable`.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use borelog_core::{CellValue, ColumnRoles, LogTable};

use crate::error::Result;

/// Loads a JSON array of records into a shape-validated [`LogTable`].
///
/// Fatal when `From`/`To` are absent (the error names the missing and found
/// columns); per-row depth problems are deferred to interval indexing.
pub fn load_table(path: &Path, roles: ColumnRoles) -> Result<LogTable> {
    let text = fs::read_to_string(path)?;
    let records: Vec<BTreeMap<String, CellValue>> = serde_json::from_str(&text)?;
    Ok(LogTable::from_records(records, roles)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_load_table_from_json_records() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"[
                {{"From": 0.0, "To": 5.0, "Lithology": "Granite", "Cu_ppm": 120}},
                {{"From": 5.0, "To": 9.0, "Lithology": "Shale", "Cu_ppm": null}}
            ]"#
        )
        .unwrap();
        let roles = ColumnRoles {
            categorical: vec!["Lithology".to_string()],
            numeric: vec!["Cu_ppm".to_string()],
        };
        let table = load_table(file.path(), roles).unwrap();
        assert_eq!(table.len(), 2);
        assert_eq!(table.rows()[0].from, 0.0);
        assert_eq!(
            table.rows()[1].cells.get("Cu_ppm"),
            Some(&CellValue::Empty)
        );
    }

    #[test]
    fn test_load_table_missing_columns_is_fatal() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"[{{"Depth": 1.0}}]"#).unwrap();
        let err = load_table(file.path(), ColumnRoles::default()).unwrap_err();
        assert!(err.to_string().contains("From"));
        assert!(err.to_string().contains("Depth"));
    }
}
