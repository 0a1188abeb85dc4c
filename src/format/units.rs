//! Conversions between token base units and human readable amounts.

use alloy::primitives::utils::{format_units, parse_units, ParseUnits, UnitsError};
use alloy::primitives::U256;
use thiserror::Error;

/// Why a user-entered amount could not become base units.
#[derive(Debug, Error)]
pub enum AmountError {
    #[error(transparent)]
    Units(#[from] UnitsError),

    #[error("amount must not be negative: {0}")]
    Negative(String),
}

/// Render base units as a decimal string, `"1.5"` / `"100.0"` style.
pub fn format_token_amount(raw: U256, decimals: u8) -> Result<String, UnitsError> {
    let formatted = format_units(raw, decimals)?;
    Ok(trim_fraction(&formatted))
}

/// Base units as a float, for display arithmetic only.
pub fn token_amount_to_f64(raw: U256, decimals: u8) -> Result<f64, UnitsError> {
    let formatted = format_token_amount(raw, decimals)?;
    Ok(formatted.parse().unwrap_or(0.0))
}

/// Parse a decimal string into base units for a token with `decimals`.
/// Negative amounts are rejected.
pub fn parse_token_amount(amount: &str, decimals: u8) -> Result<U256, AmountError> {
    let amount = amount.trim();
    match parse_units(amount, decimals)? {
        ParseUnits::U256(value) => Ok(value),
        ParseUnits::I256(_) => Err(AmountError::Negative(amount.to_string())),
    }
}

fn trim_fraction(formatted: &str) -> String {
    match formatted.split_once('.') {
        Some((whole, fraction)) => {
            let fraction = fraction.trim_end_matches('0');
            if fraction.is_empty() {
                format!("{}.0", whole)
            } else {
                format!("{}.{}", whole, fraction)
            }
        }
        None => format!("{}.0", formatted),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_trims_trailing_zeros() {
        assert_eq!(format_token_amount(U256::from(1_500_000u64), 6).unwrap(), "1.5");
        assert_eq!(format_token_amount(U256::from(100_000_000u64), 6).unwrap(), "100.0");
        assert_eq!(
            format_token_amount(U256::from(1u64), 18).unwrap(),
            "0.000000000000000001"
        );
    }

    #[test]
    fn test_to_f64() {
        let raw = U256::from(2_500_000_000_000_000_000u128);
        assert_eq!(token_amount_to_f64(raw, 18).unwrap(), 2.5);
    }

    #[test]
    fn test_parse_amount() {
        assert_eq!(parse_token_amount("1.5", 6).unwrap(), U256::from(1_500_000u64));
        assert_eq!(parse_token_amount(" 42 ", 0).unwrap(), U256::from(42u64));
        assert!(parse_token_amount("not a number", 18).is_err());
    }

    #[test]
    fn test_parse_rejects_negative_amount() {
        let err = parse_token_amount("-5", 6).unwrap_err();
        assert!(matches!(err, AmountError::Negative(ref amount) if amount == "-5"));
        assert!(matches!(
            parse_token_amount(" -0.5 ", 18),
            Err(AmountError::Negative(_))
        ));
    }
}
