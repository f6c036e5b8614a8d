/// Sample label derived from the uploaded file name
pub const SAMPLE: &str = "Sample";
/// Peak index within its report
pub const PEAK: &str = "Peak";
/// Retention time in minutes
pub const RETENTION_TIME: &str = "RetentionTime";
/// Peak height
pub const HEIGHT: &str = "Height";
/// Peak area
pub const AREA: &str = "Area";
/// Canonical compound name (`Unknown` in CSV, null in Parquet when unidentified)
pub const COMPOUND: &str = "Compound";
/// Raw library identifier (`Unknown` when the peak had no match)
pub const IDENTIFIER: &str = "Identifier";
/// Retention time reported by the library search section
pub const LIBRARY_RETENTION_TIME: &str = "LibraryRetentionTime";
/// JSON object of passthrough peak-list columns (Parquet only)
pub const PEAK_FIELDS: &str = "PeakFields";
/// JSON object of passthrough library-search columns (Parquet only)
pub const LIBRARY_FIELDS: &str = "LibraryFields";

/// Prefix applied to peak-list passthrough columns that collide with core
/// column names in flat CSV exports.
pub const PEAK_PREFIX: &str = "Peak:";

/// Prefix applied to library passthrough columns that collide with core or
/// peak-list column names in flat CSV exports.
pub const LIBRARY_PREFIX: &str = "Library:";

/// Fixed leading columns of every flat corpus export, in order.
pub const CORE_COLUMNS: [&str; 7] = [SAMPLE, PEAK, RETENTION_TIME, HEIGHT, AREA, COMPOUND, IDENTIFIER];
