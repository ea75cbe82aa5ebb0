//! Error and warning types for borelog-core.

use thiserror::Error;

/// Result type alias for borelog operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Fatal errors. Anything that is not structurally fatal is a [`RowWarning`].
#[derive(Error, Debug)]
pub enum Error {
    /// Required depth columns are absent from the input table.
    #[error("required columns missing: [{}]; columns found: [{}]", missing.join(", "), found.join(", "))]
    DataShape {
        /// Required column names that were not present.
        missing: Vec<String>,
        /// All column names actually present in the input.
        found: Vec<String>,
    },

    /// A pattern tile decoded to an unusable shape.
    #[error("degenerate pattern tile for '{label}': {width}x{height}")]
    DegenerateTile {
        label: String,
        width: usize,
        height: usize,
    },
}

/// Non-fatal row-level problems. Logged and surfaced as notices; the row is
/// retained with best-effort values.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum RowWarning {
    /// Depth bounds contain NaN or infinity.
    #[error("row {row}: non-finite depth interval {from}..{to}")]
    NonFiniteDepth { row: usize, from: f64, to: f64 },

    /// `From >= To`; the interval is inverted or zero-length.
    #[error("row {row}: inverted or zero-length interval {from}..{to}")]
    InvertedDepth { row: usize, from: f64, to: f64 },

    /// A cell in a numeric log could not be read as a number.
    #[error("row {row}: column '{column}' has no numeric value")]
    NonNumericCell { row: usize, column: String },
}
