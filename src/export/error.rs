/// Errors that can occur while exporting tables
#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    /// Underlying I/O failure
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    /// CSV serialization failure
    #[error("CSV error: {0}")]
    CsvError(#[from] csv::Error),

    /// Arrow array or batch construction failure
    #[error("Arrow error: {0}")]
    ArrowError(#[from] arrow::error::ArrowError),

    /// Parquet encoding failure
    #[error("Parquet error: {0}")]
    ParquetError(#[from] parquet::errors::ParquetError),

    /// JSON encoding of metadata or passthrough fields failed
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),
}
