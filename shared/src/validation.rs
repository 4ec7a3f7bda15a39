//! Numeric input handling for the estimator fields
//!
//! Field text is read the way the browser reads a number input: a leading
//! numeric prefix is accepted and anything unparsable counts as zero, so a
//! bad field never turns the output into `NaN`.

use rust_decimal::{Decimal, RoundingStrategy};

// ============================================================================
// Parsing
// ============================================================================

/// Parse the longest numeric prefix of `input` (`"12.5kg"` is `12.5`).
/// Returns `None` when there is no prefix or the value is not finite.
pub fn parse_number(input: &str) -> Option<f64> {
    let s = input.trim_start();
    let bytes = s.as_bytes();
    let mut end = 0;
    let mut digits = 0;

    if matches!(bytes.first(), Some(b'+') | Some(b'-')) {
        end += 1;
    }
    while end < bytes.len() && bytes[end].is_ascii_digit() {
        end += 1;
        digits += 1;
    }
    if end < bytes.len() && bytes[end] == b'.' {
        end += 1;
        while end < bytes.len() && bytes[end].is_ascii_digit() {
            end += 1;
            digits += 1;
        }
    }
    if digits == 0 {
        return None;
    }

    // Exponent only counts when at least one digit follows it
    if end < bytes.len() && matches!(bytes[end], b'e' | b'E') {
        let mut exp_end = end + 1;
        if matches!(bytes.get(exp_end), Some(b'+') | Some(b'-')) {
            exp_end += 1;
        }
        let exp_digits_start = exp_end;
        while exp_end < bytes.len() && bytes[exp_end].is_ascii_digit() {
            exp_end += 1;
        }
        if exp_end > exp_digits_start {
            end = exp_end;
        }
    }

    s[..end].parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Parse a quantity field: failures become zero, negatives clamp to zero
pub fn parse_non_negative(input: &str) -> f64 {
    parse_number(input).map(|v| v.max(0.0)).unwrap_or(0.0)
}

/// Parse an optional unit price; only a positive number counts as a price
pub fn parse_price(input: &str) -> Option<f64> {
    parse_number(input).filter(|p| *p > 0.0)
}

/// Whether a field holds a strictly positive number as a whole
/// (the whole trimmed text must be numeric, unlike [`parse_number`])
pub fn holds_positive_value(input: &str) -> bool {
    let trimmed = input.trim();
    !trimmed.is_empty() && trimmed.parse::<f64>().map(|v| v > 0.0).unwrap_or(false)
}

// ============================================================================
// Rounding and formatting
// ============================================================================

/// Round to two decimal places, half away from zero on the exact binary value
pub fn round2(value: f64) -> Decimal {
    if !value.is_finite() {
        return Decimal::ZERO;
    }
    Decimal::from_f64_retain(value)
        .map(|d| d.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero))
        .unwrap_or_else(|| match value {
            v if v.abs() < 1.0 => Decimal::ZERO,
            v if v > 0.0 => Decimal::MAX,
            _ => Decimal::MIN,
        })
}

/// Decimal to the nearest `f64`, going through its decimal text
pub fn decimal_to_f64(value: Decimal) -> f64 {
    value.to_string().parse().unwrap_or(0.0)
}

/// Format with thousands separators and no trailing zeros (`1,234.5`)
pub fn format_grouped(value: Decimal) -> String {
    let normalized = value.normalize().to_string();
    let (sign, unsigned) = match normalized.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", normalized.as_str()),
    };
    let (int_part, frac_part) = match unsigned.split_once('.') {
        Some((i, f)) => (i, Some(f)),
        None => (unsigned, None),
    };

    let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3);
    for (i, ch) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    match frac_part {
        Some(frac) => format!("{}{}.{}", sign, grouped, frac),
        None => format!("{}{}", sign, grouped),
    }
}

/// Format a reading value the way it arrived (`25`, `25.5`)
pub fn format_measure(value: f64) -> String {
    format!("{}", value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    #[test]
    fn test_parse_number_prefix() {
        assert_eq!(parse_number("12.5"), Some(12.5));
        assert_eq!(parse_number("  7kg"), Some(7.0));
        assert_eq!(parse_number(".5"), Some(0.5));
        assert_eq!(parse_number("-3"), Some(-3.0));
        assert_eq!(parse_number("1e3"), Some(1000.0));
        assert_eq!(parse_number("2e"), Some(2.0));
        assert_eq!(parse_number("4.2.1"), Some(4.2));
    }

    #[test]
    fn test_parse_number_failures() {
        assert_eq!(parse_number(""), None);
        assert_eq!(parse_number("abc"), None);
        assert_eq!(parse_number("-"), None);
        assert_eq!(parse_number("."), None);
        assert_eq!(parse_number("1e999"), None);
    }

    #[test]
    fn test_parse_non_negative() {
        assert_eq!(parse_non_negative("2.5"), 2.5);
        assert_eq!(parse_non_negative("-4"), 0.0);
        assert_eq!(parse_non_negative("n/a"), 0.0);
    }

    #[test]
    fn test_parse_price() {
        assert_eq!(parse_price("40"), Some(40.0));
        assert_eq!(parse_price("0"), None);
        assert_eq!(parse_price("-1"), None);
        assert_eq!(parse_price(""), None);
    }

    #[test]
    fn test_holds_positive_value() {
        assert!(holds_positive_value("30"));
        assert!(holds_positive_value(" 0.5 "));
        assert!(!holds_positive_value(""));
        assert!(!holds_positive_value("0"));
        assert!(!holds_positive_value("-2"));
        assert!(!holds_positive_value("12abc"));
    }

    #[test]
    fn test_round2() {
        assert_eq!(round2(2.345), dec("2.35"));
        assert_eq!(round2(1.005), dec("1.00"));
        assert_eq!(round2(37.5), dec("37.50"));
        assert_eq!(round2(f64::NAN), Decimal::ZERO);
    }

    #[test]
    fn test_format_grouped() {
        assert_eq!(format_grouped(dec("1234.50")), "1,234.5");
        assert_eq!(format_grouped(dec("1234567")), "1,234,567");
        assert_eq!(format_grouped(dec("999.99")), "999.99");
        assert_eq!(format_grouped(dec("0.00")), "0");
        assert_eq!(format_grouped(dec("-1500")), "-1,500");
    }

    #[test]
    fn test_format_measure() {
        assert_eq!(format_measure(25.0), "25");
        assert_eq!(format_measure(25.5), "25.5");
    }
}
