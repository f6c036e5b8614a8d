/// Corpus table format version - follows semantic versioning
pub const CORPUS_FORMAT_VERSION: &str = "1.0.0";

/// Metadata key for format version in Parquet footer
pub const KEY_FORMAT_VERSION: &str = "gcms:format_version";

/// Metadata key for the creation timestamp (RFC 3339)
pub const KEY_CREATED_AT: &str = "gcms:created_at";

/// Metadata key for the ordered sample list (JSON array)
pub const KEY_SAMPLES: &str = "gcms:samples";

/// Metadata key for files skipped during ingestion (JSON array)
pub const KEY_SKIPPED_FILES: &str = "gcms:skipped_files";

/// Metadata key for the normalizer strictness used to derive `Compound`
pub const KEY_NORMALIZER: &str = "gcms:normalizer";

/// Metadata key for the writing tool and its version
pub const KEY_WRITER_INFO: &str = "gcms:writer";
