//! Conversion between fixed-point token integers and decimal strings.
//!
//! Token contracts store amounts as integers scaled by `10^decimals`. These helpers
//! move between that representation and the strings people read and type.

use crate::error::UnitsError;
use ethabi::ethereum_types::U256;

/// Decimals assumed when a token contract does not report any.
pub const DEFAULT_DECIMALS: u8 = 18;

/// Renders `value / 10^decimals` exactly, without trailing fractional zeros.
pub fn format_units(value: U256, decimals: u8) -> String {
    let digits = value.to_string();
    let decimals = decimals as usize;
    if decimals == 0 {
        return digits;
    }

    let padded = if digits.len() <= decimals {
        format!("{}{}", "0".repeat(decimals + 1 - digits.len()), digits)
    } else {
        digits
    };

    let (integer, fraction) = padded.split_at(padded.len() - decimals);
    let fraction = fraction.trim_end_matches('0');
    if fraction.is_empty() {
        integer.to_string()
    } else {
        format!("{}.{}", integer, fraction)
    }
}

/// Parses a non-negative decimal string into its fixed-point integer.
///
/// Fractional digits beyond `decimals` round half up at the last kept digit.
pub fn parse_units(input: &str, decimals: u8) -> Result<U256, UnitsError> {
    let input = input.trim();
    if input.is_empty() {
        return Err(UnitsError::Empty);
    }

    let mut parts = input.splitn(3, '.');
    let integer = parts.next().unwrap_or_default();
    let fraction = parts.next().unwrap_or_default();
    if parts.next().is_some() {
        return Err(UnitsError::MultipleDecimalPoints);
    }
    if integer.is_empty() && fraction.is_empty() {
        return Err(UnitsError::Empty);
    }
    if let Some(bad) = integer.chars().chain(fraction.chars()).find(|c| !c.is_ascii_digit()) {
        return Err(UnitsError::InvalidCharacter(bad));
    }

    let decimals = decimals as usize;
    let (kept, dropped) = if fraction.len() > decimals {
        fraction.split_at(decimals)
    } else {
        (fraction, "")
    };

    let mut value = U256::zero();
    let digits = integer
        .bytes()
        .chain(kept.bytes())
        .chain(std::iter::repeat(b'0').take(decimals - kept.len()));
    for digit in digits {
        value = value
            .checked_mul(U256::from(10u8))
            .and_then(|v| v.checked_add(U256::from(digit - b'0')))
            .ok_or(UnitsError::Overflow)?;
    }

    if dropped.as_bytes().first().is_some_and(|d| *d >= b'5') {
        value = value.checked_add(U256::one()).ok_or(UnitsError::Overflow)?;
    }

    Ok(value)
}

/// Display form of a possibly-missing amount; missing or zero renders as `"0"`.
pub fn format_token_display(value: Option<U256>, decimals: u8) -> String {
    match value {
        Some(v) if !v.is_zero() => format_units(v, decimals),
        _ => "0".to_string(),
    }
}

/// Lenient input parsing: anything unparseable becomes zero.
pub fn parse_token_input(input: &str, decimals: u8) -> U256 {
    parse_units(input, decimals).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn u(v: u128) -> U256 {
        U256::from(v)
    }

    #[test]
    fn test_one_whole_token() {
        assert_eq!(format_units(u(1_000_000_000_000_000_000), 18), "1");
        assert_eq!(parse_units("1", 18).unwrap(), u(1_000_000_000_000_000_000));
    }

    #[test]
    fn test_format_fractional_values() {
        assert_eq!(format_units(u(1_500_000), 6), "1.5");
        assert_eq!(format_units(u(5), 18), "0.000000000000000005");
        assert_eq!(format_units(u(123_456), 3), "123.456");
        assert_eq!(format_units(u(120_000), 3), "120");
        assert_eq!(format_units(u(0), 18), "0");
        assert_eq!(format_units(u(42), 0), "42");
    }

    #[test]
    fn test_format_max_value() {
        assert_eq!(
            format_units(U256::MAX, 18),
            "115792089237316195423570985008687907853269984665640564039457.584007913129639935"
        );
    }

    #[test]
    fn test_parse_accepted_shapes() {
        assert_eq!(parse_units("0.5", 2).unwrap(), u(50));
        assert_eq!(parse_units(".5", 2).unwrap(), u(50));
        assert_eq!(parse_units("7.", 2).unwrap(), u(700));
        assert_eq!(parse_units("  12 ", 0).unwrap(), u(12));
        assert_eq!(parse_units("000.010", 3).unwrap(), u(10));
    }

    #[test]
    fn test_parse_rounds_extra_fraction_digits() {
        assert_eq!(parse_units("1.25", 1).unwrap(), u(13));
        assert_eq!(parse_units("1.24", 1).unwrap(), u(12));
        assert_eq!(parse_units("0.99", 1).unwrap(), u(10));
        assert_eq!(parse_units("1.5", 0).unwrap(), u(2));
    }

    #[test]
    fn test_parse_rejections() {
        assert_eq!(parse_units("", 18), Err(UnitsError::Empty));
        assert_eq!(parse_units("   ", 18), Err(UnitsError::Empty));
        assert_eq!(parse_units(".", 18), Err(UnitsError::Empty));
        assert_eq!(parse_units("-1", 18), Err(UnitsError::InvalidCharacter('-')));
        assert_eq!(parse_units("1e18", 0), Err(UnitsError::InvalidCharacter('e')));
        assert_eq!(parse_units("1.2.3", 18), Err(UnitsError::MultipleDecimalPoints));
        assert_eq!(parse_units("abc", 18), Err(UnitsError::InvalidCharacter('a')));
    }

    #[test]
    fn test_parse_overflow() {
        let too_big = format!("{}0", U256::MAX);
        assert_eq!(parse_units(&too_big, 0), Err(UnitsError::Overflow));
        assert_eq!(parse_units("1", 78), Err(UnitsError::Overflow));
        assert_eq!(parse_units(&U256::MAX.to_string(), 0).unwrap(), U256::MAX);
    }

    #[test]
    fn test_display_and_back_reproduces_integer() {
        let samples = [
            U256::zero(),
            U256::one(),
            u(999),
            u(1_000_000_000_000_000_000),
            u(1_234_567_890_123_456_789_012),
            U256::MAX,
        ];
        for decimals in [0u8, 1, 6, 8, 18, 24, 77] {
            for value in samples {
                let shown = format_units(value, decimals);
                let back = parse_units(&shown, decimals).unwrap();
                assert_eq!(back, value, "{} @ {}", shown, decimals);
            }
        }
    }

    #[test]
    fn test_missing_value_displays_zero() {
        assert_eq!(format_token_display(None, 18), "0");
        assert_eq!(format_token_display(Some(U256::zero()), 18), "0");
        assert_eq!(format_token_display(Some(u(2_500_000_000_000_000_000)), 18), "2.5");
    }

    #[test]
    fn test_lenient_input_parsing() {
        assert_eq!(parse_token_input("3", 2), u(300));
        assert_eq!(parse_token_input("nope", 2), U256::zero());
        assert_eq!(parse_token_input("", 2), U256::zero());
    }
}
