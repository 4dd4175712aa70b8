//! Field validators shared by request DTOs.

use once_cell::sync::Lazy;
use regex::Regex;
use rust_decimal::Decimal;
use validator::ValidationError;

use crate::config::MAX_LINE_PRICE;

/// Exactly nine digits, no separators
pub static PHONE_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\d{9}$").expect("valid regex"));

pub fn non_negative_decimal(value: &Decimal) -> Result<(), ValidationError> {
    if value.is_sign_negative() && !value.is_zero() {
        let mut err = ValidationError::new("non_negative");
        err.message = Some("must not be negative".into());
        return Err(err);
    }
    Ok(())
}

/// Unit price on an order line: not negative and at most [`MAX_LINE_PRICE`]
pub fn line_price(value: &Decimal) -> Result<(), ValidationError> {
    non_negative_decimal(value)?;
    if *value > Decimal::from(MAX_LINE_PRICE) {
        let mut err = ValidationError::new("max_price");
        err.message = Some(format!("must not exceed {}", MAX_LINE_PRICE).into());
        return Err(err);
    }
    Ok(())
}

pub fn not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        let mut err = ValidationError::new("not_blank");
        err.message = Some("must not be blank".into());
        return Err(err);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_phone_regex() {
        assert!(PHONE_REGEX.is_match("673456893"));
        assert!(!PHONE_REGEX.is_match("673 456 893"));
        assert!(!PHONE_REGEX.is_match("12345678"));
        assert!(!PHONE_REGEX.is_match("1234567890"));
    }

    #[test]
    fn test_non_negative_decimal() {
        assert!(non_negative_decimal(&Decimal::ZERO).is_ok());
        assert!(non_negative_decimal(&Decimal::new(1999, 2)).is_ok());
        assert!(non_negative_decimal(&Decimal::new(-1, 2)).is_err());
    }

    #[test]
    fn test_line_price_bounds() {
        assert!(line_price(&Decimal::ZERO).is_ok());
        assert!(line_price(&Decimal::from(MAX_LINE_PRICE)).is_ok());
        assert!(line_price(&Decimal::new(-1, 2)).is_err());
        assert!(line_price(&"79000000000000000000000000000".parse().unwrap()).is_err());
    }

    #[test]
    fn test_not_blank() {
        assert!(not_blank("  ").is_err());
        assert!(not_blank("Laptops").is_ok());
    }
}
