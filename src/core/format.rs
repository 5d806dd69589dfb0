/// Rounds half up (towards +inf), matching how forint amounts are displayed.
pub fn round_ft(value: f64) -> i64 {
    (value + 0.5).floor() as i64
}

/// Hungarian grouping: `1234567.4` -> `1.234.567`.
pub fn format_huf(value: f64) -> String {
    let rounded = round_ft(value);
    let digits = rounded.unsigned_abs().to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    if rounded < 0 {
        grouped.push('-');
    }
    for (idx, ch) in digits.chars().enumerate() {
        if idx > 0 && (digits.len() - idx) % 3 == 0 {
            grouped.push('.');
        }
        grouped.push(ch);
    }
    grouped
}

pub fn format_ft(value: f64) -> String {
    format!("{} Ft", format_huf(value))
}

pub fn format_percent(rate: f64, decimals: usize) -> String {
    format!("{:.*}%", decimals, rate * 100.0)
}

/// Parses an amount typed by a student. Spaces and a trailing `Ft` are
/// ignored; `.` counts as a thousands separator only between groups of
/// three digits (`60.000`), otherwise it is a decimal point (`60000.0`).
/// Amounts with a fractional part are rejected.
pub fn parse_amount(text: &str) -> Option<i64> {
    let trimmed = text.trim();
    let trimmed = trimmed
        .strip_suffix("Ft")
        .or_else(|| trimmed.strip_suffix("ft"))
        .unwrap_or(trimmed);
    let cleaned: String = trimmed.chars().filter(|c| !c.is_whitespace()).collect();
    if cleaned.is_empty() {
        return None;
    }
    if is_dot_grouped(&cleaned) {
        return cleaned.replace('.', "").parse::<i64>().ok();
    }
    let value = cleaned.parse::<f64>().ok()?;
    (value.is_finite() && value.fract() == 0.0 && value.abs() < i64::MAX as f64)
        .then_some(value as i64)
}

fn is_dot_grouped(text: &str) -> bool {
    let unsigned = text.strip_prefix('-').unwrap_or(text);
    let all_digits = |g: &str| !g.is_empty() && g.bytes().all(|b| b.is_ascii_digit());
    let mut groups = unsigned.split('.');
    let head_ok = groups
        .next()
        .is_some_and(|g| g.len() <= 3 && all_digits(g));
    let tail: Vec<&str> = groups.collect();
    head_ok && !tail.is_empty() && tail.iter().all(|g| g.len() == 3 && all_digits(g))
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::{prop_assert, prop_assert_eq, proptest};

    #[test]
    fn round_ft_rounds_half_up_like_the_ui() {
        assert_eq!(round_ft(2.5), 3);
        assert_eq!(round_ft(-2.5), -2);
        assert_eq!(round_ft(59_999.4), 59_999);
    }

    #[test]
    fn format_huf_groups_with_dots() {
        assert_eq!(format_huf(0.0), "0");
        assert_eq!(format_huf(999.0), "999");
        assert_eq!(format_huf(1_000.0), "1.000");
        assert_eq!(format_huf(266_000.0), "266.000");
        assert_eq!(format_huf(20_000_000.0), "20.000.000");
        assert_eq!(format_huf(-1_234.0), "-1.234");
    }

    #[test]
    fn format_ft_appends_currency() {
        assert_eq!(format_ft(74_000.0), "74.000 Ft");
    }

    #[test]
    fn format_percent_uses_requested_precision() {
        assert_eq!(format_percent(0.0724, 2), "7.24%");
        assert_eq!(format_percent(0.15, 0), "15%");
    }

    #[test]
    fn parse_amount_ignores_separators_and_currency() {
        assert_eq!(parse_amount("60000"), Some(60_000));
        assert_eq!(parse_amount(" 60 000 "), Some(60_000));
        assert_eq!(parse_amount("60.000 Ft"), Some(60_000));
        assert_eq!(parse_amount(""), None);
        assert_eq!(parse_amount("sok"), None);
    }

    #[test]
    fn parse_amount_reads_dot_as_decimal_point_outside_groups() {
        assert_eq!(parse_amount("60000.0"), Some(60_000));
        assert_eq!(parse_amount("1.234.567"), Some(1_234_567));
        assert_eq!(parse_amount("-1.234"), Some(-1_234));
        assert_eq!(parse_amount("60000.5"), None);
        assert_eq!(parse_amount("60.00"), Some(60));
    }

    proptest! {
        #[test]
        fn prop_format_then_parse_recovers_rounded_value(value in -1_000_000_000i64..1_000_000_000) {
            let text = format_huf(value as f64);
            prop_assert_eq!(parse_amount(&text), Some(value));
        }

        #[test]
        fn prop_groups_never_exceed_three_digits(value in 0i64..10_000_000_000) {
            let text = format_huf(value as f64);
            for group in text.split('.').skip(1) {
                prop_assert!(group.len() == 3);
            }
        }
    }
}
