//! End-to-end checks from raw records through indexing to block segmentation.

use std::collections::BTreeMap;

use borelog_core::{
    segment_blocks, CellValue, ColumnRoles, IntervalIndex, LogTable,
};

fn record(from: f64, to: f64, lith: Option<&str>, assay: Option<f64>) -> BTreeMap<String, CellValue> {
    let mut r = BTreeMap::new();
    r.insert("From".to_string(), CellValue::Number(from));
    r.insert("To".to_string(), CellValue::Number(to));
    if let Some(l) = lith {
        r.insert("Lithology".to_string(), CellValue::Text(l.to_string()));
    }
    if let Some(a) = assay {
        r.insert("Cu_ppm".to_string(), CellValue::Number(a));
    }
    r
}

fn roles() -> ColumnRoles {
    ColumnRoles {
        categorical: vec!["Lithology".to_string()],
        numeric: vec!["Cu_ppm".to_string()],
    }
}

#[test]
fn test_records_to_blocks() {
    // Rows arrive unsorted; indexing sorts, segmentation merges across the
    // contiguous boundary at depth 3 but not across the gap at 7..8.
    let records = vec![
        record(3.0, 7.0, Some("Granite"), Some(120.0)),
        record(0.0, 3.0, Some("Granite"), Some(80.0)),
        record(8.0, 10.0, Some("Granite"), None),
        record(10.0, 12.0, Some("Shale"), Some(40.0)),
    ];
    let table = LogTable::from_records(records, roles()).unwrap();
    let index = IntervalIndex::from_table(&table);

    assert_eq!(index.max_depth(), 12.0);
    assert!(index.warnings().is_empty());

    let blocks = segment_blocks("Lithology", &index.categorical_intervals("Lithology"));
    let summary: Vec<(f64, f64, &str)> = blocks
        .iter()
        .map(|b| (b.start, b.end, b.label.as_str()))
        .collect();
    assert_eq!(
        summary,
        vec![
            (0.0, 7.0, "Granite"),
            (8.0, 10.0, "Granite"),
            (10.0, 12.0, "Shale"),
        ]
    );
}

#[test]
fn test_flagged_rows_survive_to_projection_but_not_blocks() {
    let records = vec![
        record(0.0, 5.0, Some("Basalt"), None),
        record(5.0, 5.0, Some("Basalt"), None),
        record(5.0, 9.0, Some("Basalt"), None),
    ];
    let table = LogTable::from_records(records, roles()).unwrap();
    let index = IntervalIndex::from_table(&table);

    // The zero-length row is flagged yet still projected.
    assert_eq!(index.warnings().len(), 1);
    let intervals = index.categorical_intervals("Lithology");
    assert_eq!(intervals.len(), 3);

    // Segmentation skips it and still merges the valid neighbors.
    let blocks = segment_blocks("Lithology", &intervals);
    assert_eq!(blocks.len(), 1);
    assert_eq!((blocks[0].start, blocks[0].end), (0.0, 9.0));
}

#[test]
fn test_log_with_no_valid_intervals_yields_empty_blocks() {
    let records = vec![record(0.0, 5.0, None, Some(1.0))];
    let table = LogTable::from_records(records, roles()).unwrap();
    let index = IntervalIndex::from_table(&table);
    let intervals = index.categorical_intervals("Lithology");
    assert!(intervals.is_empty());
    assert!(segment_blocks("Lithology", &intervals).is_empty());
}
