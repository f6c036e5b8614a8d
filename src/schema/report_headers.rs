/// First token of the peak-list header
pub const PEAK_LIST_KEY: &str = "Peak";
/// Second token of the peak-list header
pub const PEAK_LIST_RT: &str = "R.T.";
/// First token of the library-search header
pub const LIBRARY_KEY: &str = "PK";
/// Second token of the library-search header
pub const LIBRARY_RT: &str = "RT";
/// Peak height column
pub const HEIGHT: &str = "Height";
/// Peak area column
pub const AREA: &str = "Area";

/// Columns holding the peak index, in either section.
pub const PEAK_KEY_COLUMNS: [&str; 2] = [PEAK_LIST_KEY, LIBRARY_KEY];
/// Columns holding the retention time, in either section.
pub const RETENTION_TIME_COLUMNS: [&str; 2] = [PEAK_LIST_RT, LIBRARY_RT];
/// Columns that may hold the matched library name, by preference.
pub const IDENTIFIER_COLUMNS: [&str; 3] = ["Library/ID", "Library ID", "Name"];

/// Whether a peak-list column holds a percentage (e.g. `% of total`,
/// `Corr. % Max.`, `Pct Total`).
pub fn is_percentage_column(name: &str) -> bool {
    let lower = name.to_lowercase();
    lower.contains('%') || lower.contains("pct") || lower.contains("percent")
}
