//! Utility functions and helpers

use alloy_primitives::utils::{format_units, parse_units, ParseUnits};
use alloy_primitives::U256;

use crate::shared::errors::RouterError;

/// Generate unique ID
pub fn generate_id() -> String {
    uuid::Uuid::new_v4().to_string()
}

/// Reject non-finite or non-positive amounts
pub fn validate_amount(amount: f64) -> Result<(), RouterError> {
    if !amount.is_finite() || amount <= 0.0 {
        return Err(RouterError::InvalidAmount(format!(
            "amount must be a positive number, got {}",
            amount
        )));
    }
    Ok(())
}

/// Parse a human-entered amount such as `"1.5"`
pub fn parse_amount(input: &str) -> Result<f64, RouterError> {
    let amount: f64 = input
        .trim()
        .parse()
        .map_err(|_| RouterError::InvalidAmount(format!("not a number: {:?}", input)))?;
    validate_amount(amount)?;
    Ok(amount)
}

/// Floating UI amount to smallest units, rounded at the token's precision
pub fn ui_to_raw(amount: f64, decimals: u8) -> Result<U256, RouterError> {
    if !amount.is_finite() || amount < 0.0 {
        return Err(RouterError::InvalidAmount(format!("cannot convert {} to token units", amount)));
    }
    let rendered = format!("{:.prec$}", amount, prec = decimals as usize);
    parse_units(&rendered, decimals)
        .map(<U256 as From<ParseUnits>>::from)
        .map_err(|e| RouterError::InvalidAmount(format!("cannot convert {} to token units: {}", amount, e)))
}

/// Smallest units back to a decimal string, trailing zeros trimmed (`1500000`, 6 -> `"1.5"`)
pub fn raw_to_ui(raw: U256, decimals: u8) -> Result<String, RouterError> {
    let formatted = format_units(raw, decimals)
        .map_err(|e| RouterError::InvalidAmount(format!("cannot format {}: {}", raw, e)))?;
    match formatted.split_once('.') {
        Some((whole, fraction)) => {
            let fraction = fraction.trim_end_matches('0');
            if fraction.is_empty() {
                Ok(format!("{}.0", whole))
            } else {
                Ok(format!("{}.{}", whole, fraction))
            }
        }
        None => Ok(format!("{}.0", formatted)),
    }
}

/// Format a token amount for display, with thousands separators
pub fn format_token_amount(amount: f64, max_decimals: usize) -> String {
    if !amount.is_finite() {
        return "0".to_string();
    }
    if amount > 0.0 && amount < 0.000001 {
        return format!("{:.*e}", max_decimals, amount);
    }

    let rendered = format!("{:.*}", max_decimals, amount);
    let (whole, fraction) = rendered.split_once('.').unwrap_or((rendered.as_str(), ""));
    let (sign, whole) = match whole.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", whole),
    };

    let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
    for (i, ch) in whole.chars().enumerate() {
        if i > 0 && (whole.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    let fraction = fraction.trim_end_matches('0');
    if fraction.is_empty() {
        format!("{}{}", sign, grouped)
    } else {
        format!("{}{}.{}", sign, grouped, fraction)
    }
}

/// Truncate a string in the middle, e.g. `0xc02aaa...6cc2`
pub fn truncate_middle(s: &str, start_chars: usize, end_chars: usize) -> String {
    let len = s.chars().count();
    if len <= start_chars + end_chars {
        return s.to_string();
    }
    let start: String = s.chars().take(start_chars).collect();
    let end: String = s.chars().skip(len - end_chars).collect();
    format!("{}...{}", start, end)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_amount() {
        assert_eq!(parse_amount(" 1.5 ").unwrap(), 1.5);
        assert!(matches!(parse_amount("abc"), Err(RouterError::InvalidAmount(_))));
        assert!(matches!(parse_amount("0"), Err(RouterError::InvalidAmount(_))));
        assert!(matches!(parse_amount("-2"), Err(RouterError::InvalidAmount(_))));
        assert!(matches!(parse_amount("inf"), Err(RouterError::InvalidAmount(_))));
    }

    #[test]
    fn test_ui_to_raw_rounds_at_token_precision() {
        assert_eq!(ui_to_raw(1635.08, 6).unwrap(), U256::from(1_635_080_000u64));
        assert_eq!(ui_to_raw(1.0, 18).unwrap(), U256::from(1_000_000_000_000_000_000u64));
        assert!(ui_to_raw(-1.0, 6).is_err());
        assert!(ui_to_raw(f64::NAN, 6).is_err());
    }

    #[test]
    fn test_ui_to_raw_beyond_u128() {
        // 1e21 tokens at 18 decimals is 1e39 wei, past u128::MAX (~3.4e38)
        let raw = ui_to_raw(1e21, 18).unwrap();
        assert_eq!(raw, U256::from(10u64).pow(U256::from(39u64)));
        assert!(raw > U256::from(u128::MAX));
    }

    #[test]
    fn test_raw_to_ui() {
        assert_eq!(raw_to_ui(U256::from(1_500_000u64), 6).unwrap(), "1.5");
        assert_eq!(raw_to_ui(U256::from(1_000_000u64), 6).unwrap(), "1.0");
        assert_eq!(raw_to_ui(U256::from(5u64), 6).unwrap(), "0.000005");
        assert_eq!(raw_to_ui(U256::from(42u64), 0).unwrap(), "42.0");
    }

    #[test]
    fn test_format_token_amount() {
        assert_eq!(format_token_amount(1635.08, 6), "1,635.08");
        assert_eq!(format_token_amount(1234567.0, 2), "1,234,567");
        assert_eq!(format_token_amount(0.5, 4), "0.5");
        assert_eq!(format_token_amount(-1200.0, 2), "-1,200");
        assert!(format_token_amount(0.0000001, 2).contains('e'));
    }

    #[test]
    fn test_truncate_middle() {
        assert_eq!(
            truncate_middle("0xc02aaa39b223fe8d0a0e5c4f27ead9083c756cc2", 6, 4),
            "0xc02a...6cc2"
        );
        assert_eq!(truncate_middle("short", 6, 4), "short");
    }
}
