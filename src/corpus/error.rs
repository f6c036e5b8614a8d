use crate::report::ParseError;

/// Errors that fail a whole analysis request.
#[derive(Debug, thiserror::Error)]
pub enum BatchError {
    /// No files were uploaded
    #[error("no report files were uploaded")]
    NoFiles,

    /// More files than the batch limit; the batch is rejected, not truncated
    #[error("{count} files uploaded, at most {limit} can be compared at once")]
    TooManyFiles {
        /// Number of files uploaded
        count: usize,
        /// Configured limit
        limit: usize,
    },

    /// Every uploaded file failed to parse
    #[error("none of the {} uploaded files could be parsed", .skipped.len())]
    EmptyBatch {
        /// Each file with the reason it was skipped
        skipped: Vec<SkippedFile>,
    },
}

/// An uploaded file left out of the corpus.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct SkippedFile {
    /// Name of the uploaded file
    pub name: String,
    /// Why it was skipped
    #[serde(serialize_with = "serialize_reason")]
    pub reason: ParseError,
}

fn serialize_reason<S: serde::Serializer>(reason: &ParseError, s: S) -> Result<S::Ok, S::Error> {
    s.collect_str(reason)
}
