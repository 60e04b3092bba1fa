//! Currency rendering for reports.
//!
//! All monetary values are `rust_decimal::Decimal` end to end; floats never
//! touch an amount. Report cells render through [`format_currency`], which
//! matches the `"{value:,.2f} zł"` shape the frontend and spreadsheets expect.

use rust_decimal::Decimal;

/// Render an amount as `1,234,567.89 zł`.
///
/// Rounded to two decimal places (banker's rounding is fine for display;
/// sums are computed in the database, not here). Negative amounts keep a
/// leading minus: `-1,234.50 zł`.
pub fn format_currency(amount: Decimal) -> String {
    let rounded = amount.round_dp(2);
    let negative = rounded.is_sign_negative() && !rounded.is_zero();
    let fixed = format!("{:.2}", rounded.abs());

    let (int_part, frac_part) = fixed
        .split_once('.')
        .unwrap_or((fixed.as_str(), "00"));

    let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3);
    let digits = int_part.as_bytes();
    for (i, digit) in digits.iter().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(*digit as char);
    }

    let sign = if negative { "-" } else { "" };
    format!("{sign}{grouped}.{frac_part} zł")
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_plain_amounts() {
        assert_eq!(format_currency(dec!(0)), "0.00 zł");
        assert_eq!(format_currency(dec!(7)), "7.00 zł");
        assert_eq!(format_currency(dec!(123.4)), "123.40 zł");
    }

    #[test]
    fn test_thousands_grouping() {
        assert_eq!(format_currency(dec!(1234.5)), "1,234.50 zł");
        assert_eq!(format_currency(dec!(1234567.89)), "1,234,567.89 zł");
        assert_eq!(format_currency(dec!(100000)), "100,000.00 zł");
    }

    #[test]
    fn test_negative_amounts() {
        assert_eq!(format_currency(dec!(-1234.5)), "-1,234.50 zł");
        assert_eq!(format_currency(dec!(-0.4)), "-0.40 zł");
    }

    #[test]
    fn test_rounding_to_two_places() {
        assert_eq!(format_currency(dec!(10.005)), "10.00 zł");
        assert_eq!(format_currency(dec!(10.015)), "10.02 zł");
        assert_eq!(format_currency(dec!(10.999)), "11.00 zł");
    }
}
