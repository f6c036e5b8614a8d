/// Errors that make a single report file unusable.
///
/// These never abort a batch: the caller records the file as skipped and
/// continues with the remaining uploads.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseError {
    /// No line starts with the peak-list header tokens
    #[error("no peak list header (\"Peak\",\"R.T.\",...) found")]
    MissingPeakSection,

    /// The peak-list header was found but no valid peak rows survived
    #[error("peak list section contains no valid peak rows")]
    EmptyPeakData,
}
