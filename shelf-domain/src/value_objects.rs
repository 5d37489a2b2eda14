//! Value coercion for Shelf Domain
//!
//! Product payloads arrive as loosely-typed JSON. These helpers turn raw
//! values into the typed fields a [`Product`](crate::Product) stores, and
//! parse the numeric text carried by query strings.

use serde_json::Value;

/// Domain errors for payload validation and coercion
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DomainError {
    /// Payload is not a JSON object
    #[error("Product payload must be a JSON object")]
    NotAnObject,

    /// One or more required fields are absent or empty
    #[error("Missing required fields: {}", .0.join(", "))]
    MissingFields(Vec<&'static str>),

    /// A present field could not be coerced to its canonical type
    #[error("Invalid {field}: {reason}")]
    InvalidField {
        /// JSON name of the field
        field: &'static str,
        /// What went wrong
        reason: String,
    },
}

impl DomainError {
    fn invalid(field: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidField {
            field,
            reason: reason.into(),
        }
    }
}

// =============================================================================
// Text parsing
// =============================================================================

/// Parse numeric text the way a lenient number conversion does.
///
/// Surrounding whitespace is ignored, empty text is `0.0`, `Infinity` is
/// accepted with an optional sign, and anything that is not a plain decimal
/// literal yields `NaN`. `NaN` compares false against everything, so a filter
/// bound that fails to parse keeps nothing.
///
/// # Examples
/// ```
/// # use shelf_domain::parse_number;
/// assert_eq!(parse_number(" 12.5 "), 12.5);
/// assert_eq!(parse_number(""), 0.0);
/// assert!(parse_number("abc").is_nan());
/// ```
pub fn parse_number(text: &str) -> f64 {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return 0.0;
    }

    match trimmed {
        "Infinity" | "+Infinity" => return f64::INFINITY,
        "-Infinity" => return f64::NEG_INFINITY,
        _ => {}
    }

    // Rust also accepts "inf" and "nan"; plain literals never contain letters
    // other than an exponent marker.
    if trimmed
        .chars()
        .any(|c| c.is_ascii_alphabetic() && c != 'e' && c != 'E')
    {
        return f64::NAN;
    }

    trimmed.parse::<f64>().unwrap_or(f64::NAN)
}

/// Parse the leading integer of `text`, ignoring whatever follows it.
///
/// Returns `None` when no digits lead the text (after whitespace and an
/// optional sign) or the value overflows `i64`.
///
/// # Examples
/// ```
/// # use shelf_domain::parse_integer;
/// assert_eq!(parse_integer("12abc"), Some(12));
/// assert_eq!(parse_integer("  -3.9"), Some(-3));
/// assert_eq!(parse_integer("abc"), None);
/// ```
pub fn parse_integer(text: &str) -> Option<i64> {
    let trimmed = text.trim_start();
    let (negative, rest) = match trimmed.as_bytes().first() {
        Some(b'-') => (true, &trimmed[1..]),
        Some(b'+') => (false, &trimmed[1..]),
        _ => (false, trimmed),
    };

    let digits: &str = {
        let end = rest
            .char_indices()
            .find(|(_, c)| !c.is_ascii_digit())
            .map(|(i, _)| i)
            .unwrap_or(rest.len());
        &rest[..end]
    };

    if digits.is_empty() {
        return None;
    }

    let magnitude = digits.parse::<i64>().ok()?;
    Some(if negative { -magnitude } else { magnitude })
}

// =============================================================================
// Value coercion
// =============================================================================

/// Truthiness of a JSON value.
///
/// `false`, `0`, `""` and `null` are falsy; everything else is truthy.
pub fn truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().map(|f| f != 0.0 && !f.is_nan()).unwrap_or(true),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

/// Extract a text field that must be present and non-empty.
///
/// Truthy scalars are accepted in their textual form; falsy values and
/// nested structures count as missing.
pub(crate) fn coerce_text(value: Option<&Value>) -> Option<String> {
    match value? {
        Value::String(s) if !s.is_empty() => Some(s.clone()),
        v @ (Value::Number(_) | Value::Bool(true)) if truthy(v) => Some(v.to_string()),
        _ => None,
    }
}

/// Coerce a defined value to a finite float.
pub(crate) fn coerce_price(field: &'static str, value: &Value) -> Result<f64, DomainError> {
    let price = match value {
        Value::Null => 0.0,
        Value::Bool(b) => f64::from(u8::from(*b)),
        Value::Number(n) => n.as_f64().unwrap_or(f64::NAN),
        Value::String(s) => parse_number(s),
        Value::Array(_) | Value::Object(_) => f64::NAN,
    };

    if !price.is_finite() {
        return Err(DomainError::invalid(field, format!("{} is not a number", value)));
    }
    Ok(price)
}

/// Coerce a defined value to an integer, truncating fractions.
pub(crate) fn coerce_integer(field: &'static str, value: &Value) -> Result<i64, DomainError> {
    let parsed = match value {
        Value::Number(n) => n.as_i64().or_else(|| {
            n.as_f64()
                .filter(|f| f.is_finite() && f.abs() < i64::MAX as f64)
                .map(|f| f.trunc() as i64)
        }),
        Value::String(s) => parse_integer(s),
        _ => None,
    };

    parsed.ok_or_else(|| DomainError::invalid(field, format!("{} is not an integer", value)))
}

// =============================================================================
// Tests
// =============================================================================
