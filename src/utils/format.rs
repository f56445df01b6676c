//! Number formatting for JSON payloads

/// Format a value as whole currency units with thousands separators: `$1,234,568`.
///
/// Negative values keep the sign after the symbol (`$-1,234`), non-finite
/// values render as `$nan` / `$inf`.
pub fn format_currency(value: f64) -> String {
    if value.is_nan() {
        return "$nan".to_string();
    }
    if value.is_infinite() {
        return if value > 0.0 { "$inf" } else { "$-inf" }.to_string();
    }

    let rounded = format!("{:.0}", value.abs());
    let negative = value < 0.0 && rounded != "0";

    let mut grouped = String::with_capacity(rounded.len() + rounded.len() / 3);
    for (i, ch) in rounded.chars().enumerate() {
        if i > 0 && (rounded.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    if negative {
        format!("$-{}", grouped)
    } else {
        format!("${}", grouped)
    }
}

/// Round to a fixed number of decimal places, ties to even. NaN stays NaN.
pub fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = 10f64.powi(decimals);
    (value * factor).round_ties_even() / factor
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_currency_grouping() {
        assert_eq!(format_currency(0.0), "$0");
        assert_eq!(format_currency(999.4), "$999");
        assert_eq!(format_currency(1000.0), "$1,000");
        assert_eq!(format_currency(180_921.2), "$180,921");
        assert_eq!(format_currency(1_234_567.6), "$1,234,568");
    }

    #[test]
    fn test_format_currency_sign_and_nan() {
        assert_eq!(format_currency(-1234.0), "$-1,234");
        assert_eq!(format_currency(-0.2), "$0");
        assert_eq!(format_currency(f64::NAN), "$nan");
    }

    #[test]
    fn test_round_to() {
        assert_eq!(round_to(0.12345, 3), 0.123);
        assert_eq!(round_to(-0.98765, 3), -0.988);
        assert_eq!(round_to(12.26, 1), 12.3);
        assert!(round_to(f64::NAN, 3).is_nan());
    }

    #[test]
    fn test_round_to_ties_to_even() {
        assert_eq!(round_to(6.25, 1), 6.2);
        assert_eq!(round_to(12.25, 1), 12.2);
        assert_eq!(round_to(0.5, 0), 0.0);
        assert_eq!(round_to(2.5, 0), 2.0);
        assert_eq!(round_to(3.5, 0), 4.0);
        assert_eq!(round_to(-2.5, 0), -2.0);
    }
}
