//! Stored cell values.
//!
//! - [`StoredValue`] - What a sheet keeps for a cell: literal text, or a
//!   formula together with its last computed result
//! - [`Computed`] - The result of evaluating a formula

use super::format::format_number;

/// Marker stored and displayed in place of a number when a formula fails.
pub const ERROR_MARKER: &str = "#ERROR!";

/// Result of evaluating a formula.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Computed {
    Number(f64),
    Error,
}

impl Computed {
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Computed::Number(n) => Some(*n),
            Computed::Error => None,
        }
    }

    pub fn is_error(&self) -> bool {
        matches!(self, Computed::Error)
    }

    pub fn display(&self) -> String {
        match self {
            Computed::Number(n) => format_number(*n),
            Computed::Error => ERROR_MARKER.to_string(),
        }
    }
}

/// The content kept for one cell.
#[derive(Clone, Debug, PartialEq)]
pub enum StoredValue {
    /// Literal text exactly as entered.
    Text(String),
    /// A formula (the text after the leading `=`) and its last result.
    Formula { source: String, result: Computed },
}

impl StoredValue {
    pub fn text(text: impl Into<String>) -> StoredValue {
        StoredValue::Text(text.into())
    }

    pub fn is_formula(&self) -> bool {
        matches!(self, StoredValue::Formula { .. })
    }

    /// Formula source without the leading `=`, if this is a formula cell.
    pub fn formula_source(&self) -> Option<&str> {
        match self {
            StoredValue::Formula { source, .. } => Some(source),
            StoredValue::Text(_) => None,
        }
    }

    /// Text shown in the cell.
    pub fn display(&self) -> String {
        match self {
            StoredValue::Text(s) => s.clone(),
            StoredValue::Formula { result, .. } => result.display(),
        }
    }

    /// Text presented for editing (formulas keep their `=` prefix).
    pub fn input_text(&self) -> String {
        match self {
            StoredValue::Text(s) => s.clone(),
            StoredValue::Formula { source, .. } => format!("={}", source),
        }
    }

    /// Numeric value used by references and ranges.
    ///
    /// Text counts when it parses as a finite number; error results never do.
    pub fn numeric_value(&self) -> Option<f64> {
        match self {
            StoredValue::Text(s) => s.trim().parse::<f64>().ok().filter(|n| n.is_finite()),
            StoredValue::Formula { result, .. } => result.as_number(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_text_numeric_value() {
        assert_eq!(StoredValue::text(" 42 ").numeric_value(), Some(42.0));
        assert_eq!(StoredValue::text("1.5").numeric_value(), Some(1.5));
        assert_eq!(StoredValue::text("12abc").numeric_value(), None);
        assert_eq!(StoredValue::text("").numeric_value(), None);
        assert_eq!(StoredValue::text("inf").numeric_value(), None);
    }

    #[test]
    fn test_formula_display_and_input() {
        let value = StoredValue::Formula {
            source: "1+2".to_string(),
            result: Computed::Number(3.0),
        };
        assert_eq!(value.display(), "3");
        assert_eq!(value.input_text(), "=1+2");
        assert_eq!(value.numeric_value(), Some(3.0));
    }

    #[test]
    fn test_error_result_is_not_numeric() {
        let value = StoredValue::Formula {
            source: "1/0".to_string(),
            result: Computed::Error,
        };
        assert_eq!(value.display(), ERROR_MARKER);
        assert_eq!(value.numeric_value(), None);
    }
}
