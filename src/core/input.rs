//! Raw field parsing for values arriving from the presentation layer.
//!
//! Every form field reaches the core as an untrusted string. These helpers trim
//! the input and turn it into a typed value or the matching error kind.

use crate::errors::{Error, Result};

/// Returns the trimmed text, or a validation error naming `field` if it is blank.
pub fn require_text<'a>(field: &str, raw: &'a str) -> Result<&'a str> {
    let value = raw.trim();
    if value.is_empty() {
        return Err(Error::validation(format!("{field} is required")));
    }
    Ok(value)
}

/// Parses a finite real number. `NaN` and infinities are rejected as format errors.
pub fn parse_real(field: &'static str, raw: &str) -> Result<f64> {
    raw.trim()
        .parse::<f64>()
        .ok()
        .filter(|value| value.is_finite())
        .ok_or_else(|| Error::Format {
            field,
            value: raw.to_string(),
            expected: "a number",
        })
}

/// Parses a whole number.
pub fn parse_integer(field: &'static str, raw: &str) -> Result<i64> {
    raw.trim().parse::<i64>().map_err(|_| Error::Format {
        field,
        value: raw.to_string(),
        expected: "an integer",
    })
}

/// Unwraps the identity of the currently selected row.
pub fn require_selection(entity: &'static str, selection: Option<i64>) -> Result<i64> {
    selection.ok_or(Error::Selection { entity })
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    #![allow(clippy::float_cmp)]
    use super::*;

    #[test]
    fn test_require_text_trims() {
        assert_eq!(require_text("Name", "  Widget ").unwrap(), "Widget");
        assert!(matches!(
            require_text("Name", "   ").unwrap_err(),
            Error::Validation { message: _ }
        ));
    }

    #[test]
    fn test_parse_real() {
        assert_eq!(parse_real("Price", " 9.99 ").unwrap(), 9.99);
        assert_eq!(parse_real("Price", "-1").unwrap(), -1.0);
        for bad in ["abc", "", "NaN", "inf", "1,5"] {
            assert!(matches!(
                parse_real("Price", bad).unwrap_err(),
                Error::Format { field: "Price", .. }
            ));
        }
    }

    #[test]
    fn test_parse_integer() {
        assert_eq!(parse_integer("Stock", "10").unwrap(), 10);
        assert_eq!(parse_integer("Stock", "-3").unwrap(), -3);
        assert!(matches!(
            parse_integer("Stock", "2.5").unwrap_err(),
            Error::Format { field: "Stock", .. }
        ));
    }

    #[test]
    fn test_require_selection() {
        assert_eq!(require_selection("user", Some(4)).unwrap(), 4);
        assert!(matches!(
            require_selection("user", None).unwrap_err(),
            Error::Selection { entity: "user" }
        ));
    }
}
