//! Error types for session operations.

use thiserror::Error;

/// Result type for session operations.
pub type ChartResult<T> = Result<T, ChartError>;

/// Errors that can occur while editing a chart session.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ChartError {
    /// A row index did not address an existing row.
    #[error("Row index {index} out of range (session has {len} rows)")]
    RowOutOfRange {
        /// The requested index.
        index: usize,
        /// Number of rows at the time of the request.
        len: usize,
    },
}
