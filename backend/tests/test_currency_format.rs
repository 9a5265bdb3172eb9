//! Currency formatting and input parsing

use advisory_fee_core_rs::{format_currency, format_percentage, parse_currency_input};
use proptest::prelude::*;

#[test]
fn test_format_typical_amounts() {
    assert_eq!(format_currency(0.0), "$0");
    assert_eq!(format_currency(250_000.0), "$250,000");
    assert_eq!(format_currency(1_180_000.0), "$1,180,000");
    assert_eq!(format_currency(12_500_000.4), "$12,500,000");
    assert_eq!(format_currency(-5_000.0), "-$5,000");
    assert_eq!(format_percentage(5.0), "5.00%");
}

#[test]
fn test_parse_typed_input() {
    assert_eq!(parse_currency_input("$10,000,000"), 10_000_000.0);
    assert_eq!(parse_currency_input("12,500,000.50"), 12_500_000.5);
    assert_eq!(parse_currency_input("AUD 3 000 000"), 3_000_000.0);
    assert_eq!(parse_currency_input("  2000000  "), 2_000_000.0);
}

#[test]
fn test_parse_is_lossy() {
    // Sign, suffixes and exponents are noise, not syntax
    assert_eq!(parse_currency_input("-2,000,000"), 2_000_000.0);
    assert_eq!(parse_currency_input("5m"), 5.0);
    assert_eq!(parse_currency_input("1e6"), 16.0);
    assert_eq!(parse_currency_input(""), 0.0);
}

proptest! {
    /// Formatted output parses back to the rounded amount
    #[test]
    fn prop_format_then_parse(amount in 0.0f64..1e15) {
        let text = format_currency(amount);
        prop_assert_eq!(parse_currency_input(&text), amount.round());
    }

    /// Output uses only the currency symbol, separators, sign and digits
    #[test]
    fn prop_format_charset(amount in -1e15f64..1e15) {
        let text = format_currency(amount);
        prop_assert!(text.chars().all(|c| c.is_ascii_digit() || matches!(c, '$' | ',' | '-')));
        prop_assert!(text.starts_with('$') || text.starts_with("-$"));
    }

    /// Any text parses to a non-negative number
    #[test]
    fn prop_parse_total(text in ".*") {
        let value = parse_currency_input(&text);
        prop_assert!(value >= 0.0, "{:?} parsed to {}", text, value);
    }
}
