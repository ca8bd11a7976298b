use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use std::str::FromStr;

const CURRENCY_SYMBOLS: [char; 4] = ['$', '€', '£', '¥'];

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValueError {
    #[error("empty value")]
    Empty,

    #[error("invalid number '{0}'")]
    Invalid(String),

    #[error("negative value '{0}'")]
    Negative(String),
}

/// Parse a money amount from a price sheet cell.
///
/// Handles formats like:
/// - "10" -> 10
/// - "$10.50" -> 10.50
/// - "1,250.00" -> 1250.00
/// - "€ 3.20" -> 3.20
pub fn parse_money(s: &str) -> Result<Decimal, ValueError> {
    let cleaned: String = s
        .trim()
        .chars()
        .filter(|c| !CURRENCY_SYMBOLS.contains(c) && *c != ',')
        .collect();
    let cleaned = cleaned.trim();

    if cleaned.is_empty() {
        return Err(ValueError::Empty);
    }

    let value =
        Decimal::from_str(cleaned).map_err(|_| ValueError::Invalid(s.trim().to_string()))?;
    if value.is_sign_negative() && !value.is_zero() {
        return Err(ValueError::Negative(s.trim().to_string()));
    }
    Ok(value)
}

/// Parse a money amount where an empty cell means zero.
pub fn parse_money_or_zero(s: &str) -> Result<Decimal, ValueError> {
    match parse_money(s) {
        Err(ValueError::Empty) => Ok(Decimal::ZERO),
        other => other,
    }
}

/// Parse a whole-number quantity ("5", "5.0", "1,000").
pub fn parse_quantity(s: &str) -> Result<u32, ValueError> {
    let cleaned = s.trim().replace(',', "");
    if cleaned.is_empty() {
        return Err(ValueError::Empty);
    }

    if let Ok(q) = cleaned.parse::<u32>() {
        return Ok(q);
    }

    let value =
        Decimal::from_str(&cleaned).map_err(|_| ValueError::Invalid(s.trim().to_string()))?;
    if value.is_sign_negative() && !value.is_zero() {
        return Err(ValueError::Negative(s.trim().to_string()));
    }
    quantity_from_decimal(value).ok_or_else(|| ValueError::Invalid(s.trim().to_string()))
}

/// Convert a decimal to a quantity when it is a non-negative whole number.
pub fn quantity_from_decimal(value: Decimal) -> Option<u32> {
    if !value.fract().is_zero() {
        return None;
    }
    value.abs().to_u32()
}

/// Convert f64 to Decimal, preserving reasonable precision.
///
/// Uses string round-trip to avoid floating-point artifacts
/// (e.g., 0.0035_f64 becoming 0.00349999...).
pub fn f64_to_decimal(f: f64) -> Option<Decimal> {
    if !f.is_finite() {
        return None;
    }
    let s = format!("{f}");
    s.parse::<Decimal>()
        .ok()
        .or_else(|| Decimal::try_from(f).ok())
}
