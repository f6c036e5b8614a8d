//! Line tokenization for quoted, comma-separated report lines.

use crate::schema::report_headers;

/// Split one report line into trimmed fields with enclosing quotes removed.
///
/// Quoted fields may contain commas. If the line cannot be read as CSV the
/// line is split on every comma instead.
pub(crate) fn split_fields(line: &str) -> Vec<String> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .buffer_capacity(line.len().max(64))
        .from_reader(line.as_bytes());

    let mut record = csv::StringRecord::new();
    match reader.read_record(&mut record) {
        Ok(true) => record.iter().map(clean_field).collect(),
        _ => line.split(',').map(clean_field).collect(),
    }
}

fn clean_field(field: &str) -> String {
    field.trim().trim_matches('"').trim().to_string()
}

/// Whether the first field is a plain non-negative integer (a peak index).
pub(crate) fn is_data_row(fields: &[String]) -> bool {
    fields.first().map_or(false, |first| {
        let token = first.replace('"', "");
        let token = token.trim();
        !token.is_empty() && token.bytes().all(|b| b.is_ascii_digit())
    })
}

/// Section header kinds recognised by their two leading tokens.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum HeaderKind {
    /// `"Peak","R.T.",...`
    PeakList,
    /// `"PK","RT",...`
    LibrarySearch,
}

impl HeaderKind {
    pub(crate) fn detect(fields: &[String]) -> Option<Self> {
        match fields {
            [first, second, ..]
                if first == report_headers::PEAK_LIST_KEY
                    && second == report_headers::PEAK_LIST_RT =>
            {
                Some(HeaderKind::PeakList)
            }
            [first, second, ..]
                if first == report_headers::LIBRARY_KEY && second == report_headers::LIBRARY_RT =>
            {
                Some(HeaderKind::LibrarySearch)
            }
            _ => None,
        }
    }
}
