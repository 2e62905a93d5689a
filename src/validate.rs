//! Classification of raw input tokens
//!
//! Tokens arrive from manual entry fields or CSV cells as text. [`is_numeric`] is the
//! boolean gate used before anything is added to a sample, and [`parse_value`] turns an
//! accepted token into a finite value.
use std::borrow::Cow;

use crate::{
    error::{Error, Result},
    value::Value,
};

/// Returns true if the token parses as a floating-point number.
///
/// Surrounding whitespace is ignored. Exponent notation (`1e3`) and the special
/// spellings `inf` / `nan` parse, so use [`parse_value`] when the value must also be finite.
/// Single underscores between digits group them, so `1_000` is `1000`.
///
/// Never panics; a failed parse is simply `false`.
///
/// # Example
/// ```
/// # use curvefit::validate::is_numeric;
/// assert!(is_numeric(" -2.5e3 "));
/// assert!(is_numeric("1_000.5"));
/// assert!(!is_numeric("twelve"));
/// assert!(!is_numeric(""));
/// ```
#[must_use]
pub fn is_numeric(token: &str) -> bool {
    parse_float(token).is_some()
}

/// Parses a token into a finite value of type `T`.
///
/// # Errors
/// Returns [`Error::InvalidInput`] if the token is not numeric or is not finite, or
/// [`Error::CastFailed`] if the parsed value cannot be represented as `T`.
pub fn parse_value<T: Value>(token: &str) -> Result<T> {
    let parsed = parse_float(token)
        .ok_or_else(|| Error::InvalidInput(format!("`{token}` is not a number")))?;

    if !parsed.is_real() {
        return Err(Error::InvalidInput(format!("`{token}` is not a finite number")));
    }

    T::try_cast(parsed)
}

fn parse_float(token: &str) -> Option<f64> {
    strip_digit_separators(token.trim())?.parse().ok()
}

/// Removes underscores that sit between two digits.
///
/// Returns `None` if any underscore is leading, trailing, doubled or next to a non-digit.
fn strip_digit_separators(token: &str) -> Option<Cow<'_, str>> {
    if !token.contains('_') {
        return Some(Cow::Borrowed(token));
    }

    let bytes = token.as_bytes();
    let mut stripped = String::with_capacity(token.len());
    for (i, c) in token.char_indices() {
        if c != '_' {
            stripped.push(c);
            continue;
        }

        let before = i.checked_sub(1).and_then(|j| bytes.get(j));
        let after = bytes.get(i + 1);
        match (before, after) {
            (Some(b), Some(a)) if b.is_ascii_digit() && a.is_ascii_digit() => {}
            _ => return None,
        }
    }

    Some(Cow::Owned(stripped))
}
