// Currency rendering used by the spreadsheet reports: `{value:,.2f} zł`

use kadra::core::format_currency;
use proptest::prelude::*;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

#[test]
fn formats_reference_values() {
    assert_eq!(format_currency(dec!(0)), "0.00 zł");
    assert_eq!(format_currency(dec!(50)), "50.00 zł");
    assert_eq!(format_currency(dec!(999.99)), "999.99 zł");
    assert_eq!(format_currency(dec!(1000)), "1,000.00 zł");
    assert_eq!(format_currency(dec!(1234567.89)), "1,234,567.89 zł");
}

#[test]
fn negative_profit_keeps_its_sign() {
    assert_eq!(format_currency(dec!(-100)), "-100.00 zł");
    assert_eq!(format_currency(dec!(-12345.6)), "-12,345.60 zł");
}

proptest! {
    #[test]
    fn always_two_decimals_and_suffix(cents in -10_000_000_000i64..10_000_000_000i64) {
        let amount = Decimal::new(cents, 2);
        let rendered = format_currency(amount);

        prop_assert!(rendered.ends_with(" zł"));

        let numeric = rendered.trim_end_matches(" zł");
        let (_, frac) = numeric.rsplit_once('.').expect("decimal point present");
        prop_assert_eq!(frac.len(), 2);
    }

    #[test]
    fn grouping_preserves_digits(cents in 0i64..10_000_000_000i64) {
        let amount = Decimal::new(cents, 2);
        let rendered = format_currency(amount);

        let digits: String = rendered
            .trim_end_matches(" zł")
            .chars()
            .filter(|c| c.is_ascii_digit())
            .collect();

        let expected: String = format!("{:.2}", amount)
            .chars()
            .filter(|c| c.is_ascii_digit())
            .collect();

        prop_assert_eq!(digits, expected);
    }
}
