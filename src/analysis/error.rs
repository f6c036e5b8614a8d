/// Errors raised while preparing comparison data.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AnalysisError {
    /// Nothing is left to compare after filtering
    #[error("no identified compounds remain after filtering")]
    NoData,

    /// Too few samples or compounds for a projection
    #[error(
        "PCA needs at least {min} samples and {min} compounds, found {samples} samples and {compounds} compounds"
    )]
    InsufficientData {
        /// Samples with at least one identified compound
        samples: usize,
        /// Distinct identified compounds
        compounds: usize,
        /// Minimum of each
        min: usize,
    },

    /// The decomposition did not produce singular vectors
    #[error("singular value decomposition failed")]
    Decomposition,
}
