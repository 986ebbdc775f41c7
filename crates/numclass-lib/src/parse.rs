//! Validation and parsing of the raw `number` input.
//!
//! The parser accepts plain integers first. When that fails and decimal
//! fallback is enabled, the text is parsed as a floating-point value and
//! truncated toward zero. Negative results are always rejected.

use std::fmt;

use crate::error::{Error, Result};

/// Exclusive bound (2^63) on the magnitude of a truncated decimal value.
///
/// Decimal input never accepts a value the integer path would reject.
const DECIMAL_LIMIT: f64 = 9_223_372_036_854_775_808.0;

/// Options controlling how raw input is interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParseOptions {
    /// Accept decimal input such as `4.9` by truncating toward zero.
    pub allow_decimal: bool,
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self {
            allow_decimal: true,
        }
    }
}

impl ParseOptions {
    /// Options that only accept integer input.
    pub fn strict() -> Self {
        Self {
            allow_decimal: false,
        }
    }
}

/// A validated, non-negative integer ready for classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ParsedNumber(u64);

impl ParsedNumber {
    /// Wrap an already validated value.
    pub fn new(value: u64) -> Self {
        Self(value)
    }

    /// The parsed integer value.
    pub fn value(self) -> u64 {
        self.0
    }
}

impl From<ParsedNumber> for u64 {
    fn from(number: ParsedNumber) -> Self {
        number.0
    }
}

impl fmt::Display for ParsedNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Parse the raw `number` input into a [`ParsedNumber`].
///
/// Returns [`Error::InvalidInput`] carrying the original text when the input
/// is absent, empty, not numeric, or negative.
pub fn parse_number(raw: Option<&str>, options: &ParseOptions) -> Result<ParsedNumber> {
    let text = match raw {
        Some(text) if !text.is_empty() => text,
        _ => return Err(Error::invalid_input(raw)),
    };

    let value = match text.parse::<i64>() {
        Ok(value) => value,
        Err(_) if options.allow_decimal => {
            truncate_decimal(text).ok_or_else(|| Error::invalid_input(raw))?
        }
        Err(_) => return Err(Error::invalid_input(raw)),
    };

    u64::try_from(value)
        .map(ParsedNumber)
        .map_err(|_| Error::invalid_input(raw))
}

fn truncate_decimal(text: &str) -> Option<i64> {
    let value = text.trim().parse::<f64>().ok()?;
    if !value.is_finite() {
        return None;
    }

    let truncated = value.trunc();
    if truncated.abs() >= DECIMAL_LIMIT {
        return None;
    }

    // In range after the check above, so the cast cannot saturate.
    Some(truncated as i64)
}
