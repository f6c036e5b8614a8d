//! Permissive numeric coercion of report cells.
//!
//! A blank or absent cell is [`Coerced::Missing`]; text that is not a finite
//! number is [`Coerced::Malformed`]. Neither is an error at file level.

/// Outcome of coercing one cell.
#[derive(Debug, Clone, PartialEq)]
pub enum Coerced<T> {
    /// The cell held a usable value.
    Value(T),
    /// The cell was absent or blank.
    Missing,
    /// The cell held text that could not be coerced.
    Malformed(String),
}

impl<T> Coerced<T> {
    /// The coerced value, treating malformed input as missing.
    pub fn ok(self) -> Option<T> {
        match self {
            Coerced::Value(v) => Some(v),
            Coerced::Missing | Coerced::Malformed(_) => None,
        }
    }

    /// Whether the cell held uncoercible text.
    pub fn is_malformed(&self) -> bool {
        matches!(self, Coerced::Malformed(_))
    }
}

fn prepare(cell: Option<&str>) -> Option<String> {
    let cleaned = cell?.replace('"', "");
    let cleaned = cleaned.trim();
    if cleaned.is_empty() {
        None
    } else {
        Some(cleaned.to_string())
    }
}

/// Coerce a cell to a finite `f64`.
pub fn coerce_float(cell: Option<&str>) -> Coerced<f64> {
    let Some(text) = prepare(cell) else {
        return Coerced::Missing;
    };
    match text.parse::<f64>() {
        Ok(v) if v.is_finite() => Coerced::Value(v),
        _ => Coerced::Malformed(text),
    }
}

/// Coerce a cell to a peak index.
///
/// Integral floats (`"3.0"`) are accepted, negative or fractional values
/// are malformed.
pub fn coerce_index(cell: Option<&str>) -> Coerced<u32> {
    let Some(text) = prepare(cell) else {
        return Coerced::Missing;
    };
    if let Ok(v) = text.parse::<u32>() {
        return Coerced::Value(v);
    }
    match text.parse::<f64>() {
        Ok(v) if v.is_finite() && v >= 0.0 && v.fract() == 0.0 && v <= u32::MAX as f64 => {
            Coerced::Value(v as u32)
        }
        _ => Coerced::Malformed(text),
    }
}
