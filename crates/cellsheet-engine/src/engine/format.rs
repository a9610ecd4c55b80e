use super::value::ERROR_MARKER;

/// Format a number for display and for substitution into formula text.
///
/// Uses the shortest representation that round-trips and never produces an
/// exponent, so the output always tokenizes as a number literal.
pub fn format_number(n: f64) -> String {
    if !n.is_finite() {
        ERROR_MARKER.to_string()
    } else if n == 0.0 {
        "0".to_string()
    } else {
        n.to_string()
    }
}

/// Format a number as an operand for formula text. Negative values are
/// parenthesized so they stay a single operand after any operator.
pub(crate) fn format_operand(n: f64) -> String {
    if n < 0.0 {
        format!("({})", format_number(n))
    } else {
        format_number(n)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_number() {
        assert_eq!(format_number(7.0), "7");
        assert_eq!(format_number(2.5), "2.5");
        assert_eq!(format_number(-0.0), "0");
        assert_eq!(format_number(1e21), "1000000000000000000000");
        assert_eq!(format_number(f64::INFINITY), "#ERROR!");
    }

    #[test]
    fn test_format_operand_parenthesizes_negatives() {
        assert_eq!(format_operand(-5.0), "(-5)");
        assert_eq!(format_operand(5.0), "5");
    }
}
