//! Fixed-width field encoders for AFIP flat files.
//!
//! Every function returns a string of exactly the requested width or an
//! error. Numeric slots never lose digits: a value that does not fit is
//! rejected with [`AfipError::Overflow`]. Only text slots opened with
//! [`Overflow::Truncate`] are cut, and each cut is logged.

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};

use super::error::AfipError;

/// What to do when a text value is wider than its slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Overflow {
    /// Fail with [`AfipError::Overflow`].
    Reject,
    /// Keep the leading characters and log a warning.
    Truncate,
}

/// Rounding applied to every monetary and fixed-decimal value.
pub const ROUNDING: RoundingStrategy = RoundingStrategy::MidpointAwayFromZero;

fn overflow(field: &str, width: usize, value: impl Into<String>) -> AfipError {
    let value = value.into();
    tracing::warn!(field, width, value = %value, "value exceeds fixed-width slot");
    AfipError::Overflow {
        field: field.to_string(),
        width,
        value,
    }
}

/// Zero-padded numeric identity field (codes, point of sale, numbers, CUIT).
///
/// Blank input yields all zeros. Leading zeros do not count toward the width.
pub fn numeric(field: &str, value: &str, width: usize) -> Result<String, AfipError> {
    let trimmed = value.trim();
    if !trimmed.chars().all(|c| c.is_ascii_digit()) {
        return Err(AfipError::format(field, value));
    }
    let significant = trimmed.trim_start_matches('0');
    if significant.len() > width {
        return Err(overflow(field, width, trimmed));
    }
    Ok(format!("{significant:0>width$}"))
}

/// Fold a character into printable ASCII. Latin-1 letters lose their
/// diacritics, whitespace and control characters become spaces and anything
/// else becomes `?`.
pub fn fold_ascii(c: char) -> char {
    if c.is_control() || c.is_whitespace() {
        return ' ';
    }
    if c.is_ascii() {
        return c;
    }
    match c {
        'á' | 'à' | 'â' | 'ä' | 'ã' | 'å' | 'ª' => 'a',
        'Á' | 'À' | 'Â' | 'Ä' | 'Ã' | 'Å' => 'A',
        'é' | 'è' | 'ê' | 'ë' => 'e',
        'É' | 'È' | 'Ê' | 'Ë' => 'E',
        'í' | 'ì' | 'î' | 'ï' => 'i',
        'Í' | 'Ì' | 'Î' | 'Ï' => 'I',
        'ó' | 'ò' | 'ô' | 'ö' | 'õ' | 'ø' | 'º' => 'o',
        'Ó' | 'Ò' | 'Ô' | 'Ö' | 'Õ' | 'Ø' => 'O',
        'ú' | 'ù' | 'û' | 'ü' => 'u',
        'Ú' | 'Ù' | 'Û' | 'Ü' => 'U',
        'ñ' => 'n',
        'Ñ' => 'N',
        'ç' => 'c',
        'Ç' => 'C',
        'ý' | 'ÿ' => 'y',
        'Ý' => 'Y',
        _ => '?',
    }
}

/// Left-justified, space-padded text field.
///
/// The value is folded to printable ASCII with [`fold_ascii`], so the width
/// holds in bytes as well as characters and a field can never split a record.
pub fn text(field: &str, value: &str, width: usize, policy: Overflow) -> Result<String, AfipError> {
    let clean: String = value.trim().chars().map(fold_ascii).collect();
    if clean.len() <= width {
        return Ok(format!("{clean:<width$}"));
    }
    match policy {
        Overflow::Reject => Err(overflow(field, width, clean)),
        Overflow::Truncate => {
            tracing::warn!(field, width, length = clean.len(), "text truncated to fixed width");
            Ok(clean[..width].to_string())
        }
    }
}

/// `width` blanks, for slots AFIP reserves but this regime leaves empty.
pub fn blank(width: usize) -> String {
    " ".repeat(width)
}

/// `width` zeros, for numeric placeholders.
pub fn zeros(width: usize) -> String {
    "0".repeat(width)
}

/// Convert an amount to integer cents, rounding half away from zero.
pub fn cents(value: Decimal) -> Decimal {
    (value * Decimal::ONE_HUNDRED).round_dp_with_strategy(0, ROUNDING)
}

/// Monetary amount as zero-padded integer cents.
///
/// Negative amounts are rejected: every amount in the IVA Turismo layout is
/// unsigned.
pub fn amount(field: &str, value: Decimal, width: usize) -> Result<String, AfipError> {
    if value.is_sign_negative() && !value.is_zero() {
        return Err(AfipError::Encoding(format!(
            "field {field} holds negative amount {value}"
        )));
    }
    let digits = cents(value)
        .to_u128()
        .ok_or_else(|| overflow(field, width, value.to_string()))?
        .to_string();
    if digits.len() > width {
        return Err(overflow(field, width, digits));
    }
    Ok(format!("{digits:0>width$}"))
}

/// Fixed-decimal field without separator: `int_digits` zero-padded integer
/// digits followed by exactly `dec_digits` decimal digits.
///
/// `1234.5` with 12+6 renders as `000000001234500000`.
pub fn fixed_decimal(
    field: &str,
    value: Decimal,
    int_digits: usize,
    dec_digits: u32,
) -> Result<String, AfipError> {
    if value.is_sign_negative() && !value.is_zero() {
        return Err(AfipError::Encoding(format!(
            "field {field} holds negative value {value}"
        )));
    }
    let rounded = value.round_dp_with_strategy(dec_digits, ROUNDING);
    let rendered = format!("{:.prec$}", rounded, prec = dec_digits as usize);
    let (int_part, dec_part) = rendered.split_once('.').unwrap_or((rendered.as_str(), ""));
    let int_part = int_part.trim_start_matches('-');
    if int_part.len() > int_digits {
        return Err(overflow(field, int_digits + dec_digits as usize, rendered.clone()));
    }
    Ok(format!("{int_part:0>int_digits$}{dec_part}"))
}

/// Keep only the digits of a CUIT/CUIL (drops dashes, dots and spaces).
pub fn digits_only(value: &str) -> String {
    value.chars().filter(|c| c.is_ascii_digit()).collect()
}
