use thiserror::Error;

/// Everything that can stop a watershed computation.
///
/// All variants are structural: the computation is pure, so nothing here is
/// worth retrying with the same input.
#[derive(Debug, Error)]
pub enum WatershedError {
    /// Absent input, an empty outer sequence, or an empty first row.
    #[error("elevation map is empty")]
    EmptyInput,

    /// Rows of unequal length.
    #[error("row {row} has {found} cells, expected {expected}")]
    RaggedRow {
        row: usize,
        expected: usize,
        found: usize,
    },

    /// More basins than the configured label scheme can name.
    #[error("more than {limit} basins discovered; alphabet labels exhausted")]
    TooManyBasins { limit: usize },

    #[error("invalid elevation map JSON: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, WatershedError>;
