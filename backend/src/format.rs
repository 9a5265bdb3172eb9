//! Currency formatting and free-text parsing
//!
//! Boundary helpers for display and user input. Amounts render as whole
//! dollars with thousands separators (`$1,234,567`), matching the en-AU
//! currency style with no decimal places.

/// Render a whole-unit amount, e.g. `$1,250,000` or `-$5,000`
pub fn format_amount(amount: i64) -> String {
    let digits = amount.unsigned_abs().to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    if amount < 0 {
        format!("-${}", grouped)
    } else {
        format!("${}", grouped)
    }
}

/// Render an amount rounded to the nearest whole unit
///
/// NaN renders as `$0`; infinities saturate.
///
/// # Example
/// ```
/// use advisory_fee_core_rs::format_currency;
///
/// assert_eq!(format_currency(5_000_000.0), "$5,000,000");
/// assert_eq!(format_currency(999.5), "$1,000");
/// ```
pub fn format_currency(amount: f64) -> String {
    format_amount(amount.round() as i64)
}

/// Render a percentage with two decimals, e.g. `5.30%`
pub fn format_percentage(percentage: f64) -> String {
    format!("{:.2}%", percentage)
}

/// Best-effort parse of user-typed currency text
///
/// Drops every character that is not a digit or `.`, then reads the longest
/// leading number. Anything unreadable yields `0.0`. This is lossy: `"-5"`
/// reads as `5` and `"abc"` as `0`. Strict callers must validate the raw text
/// themselves.
///
/// # Example
/// ```
/// use advisory_fee_core_rs::parse_currency_input;
///
/// assert_eq!(parse_currency_input("$12,500,000"), 12_500_000.0);
/// assert_eq!(parse_currency_input("about 5.5m"), 5.5);
/// assert_eq!(parse_currency_input("n/a"), 0.0);
/// ```
pub fn parse_currency_input(text: &str) -> f64 {
    let cleaned: String = text
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == '.')
        .collect();

    // Stop at a second decimal point: "1.2.3" reads as 1.2
    let end = cleaned
        .char_indices()
        .filter(|(_, c)| *c == '.')
        .nth(1)
        .map_or(cleaned.len(), |(i, _)| i);

    cleaned[..end].parse::<f64>().unwrap_or(0.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_grouping() {
        assert_eq!(format_amount(0), "$0");
        assert_eq!(format_amount(999), "$999");
        assert_eq!(format_amount(1_000), "$1,000");
        assert_eq!(format_amount(250_000), "$250,000");
        assert_eq!(format_amount(1_180_000), "$1,180,000");
        assert_eq!(format_amount(-5_000), "-$5,000");
        assert_eq!(format_amount(i64::MIN), "-$9,223,372,036,854,775,808");
    }

    #[test]
    fn test_format_currency_rounds() {
        assert_eq!(format_currency(1_234.4), "$1,234");
        assert_eq!(format_currency(1_234.5), "$1,235");
        assert_eq!(format_currency(f64::NAN), "$0");
    }

    #[test]
    fn test_format_percentage() {
        assert_eq!(format_percentage(5.3), "5.30%");
        assert_eq!(format_percentage(2.356), "2.36%");
    }

    #[test]
    fn test_parse_strips_noise() {
        assert_eq!(parse_currency_input("$5,000,000"), 5_000_000.0);
        assert_eq!(parse_currency_input("  AUD 7 500 000 "), 7_500_000.0);
        assert_eq!(parse_currency_input("-$5"), 5.0);
    }

    #[test]
    fn test_parse_unreadable_is_zero() {
        assert_eq!(parse_currency_input(""), 0.0);
        assert_eq!(parse_currency_input("."), 0.0);
        assert_eq!(parse_currency_input("ten million"), 0.0);
    }

    #[test]
    fn test_parse_partial_decimals() {
        assert_eq!(parse_currency_input("1.2.3"), 1.2);
        assert_eq!(parse_currency_input(".5"), 0.5);
        assert_eq!(parse_currency_input("5."), 5.0);
    }
}
