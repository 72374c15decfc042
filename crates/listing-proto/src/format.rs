//! Display formatters for listing numbers and dates.
//!
//! None of these fail: missing or non-finite input yields a blank or zero
//! rendering so a partial record still draws.

use chrono::{DateTime, NaiveDate, NaiveDateTime};

/// Rounded integer with thousands separators: `2140.0` → `"2,140"`.
/// Missing or non-finite input renders as `"0"`.
pub fn format_comma_integer(value: Option<f64>) -> String {
    match value.filter(|v| v.is_finite()) {
        Some(v) => {
            let rounded = v.round();
            let grouped = group_digits(rounded.abs() as u64);
            if rounded < 0.0 {
                format!("-{}", grouped)
            } else {
                grouped
            }
        }
        None => "0".to_string(),
    }
}

/// Whole-dollar currency with the sign ahead of the symbol: `-5000.0` → `"-$5,000"`.
pub fn format_currency(value: Option<f64>) -> String {
    let rounded = value.filter(|v| v.is_finite()).map(f64::round).unwrap_or(0.0);
    let grouped = group_digits(rounded.abs() as u64);
    if rounded < 0.0 {
        format!("-${}", grouped)
    } else {
        format!("${}", grouped)
    }
}

/// Raw number as-is (`3`, `2.5`); blank when missing.
pub fn format_number(value: Option<f64>) -> String {
    match value.filter(|v| v.is_finite()) {
        Some(v) if v.fract() == 0.0 && v.abs() < 1e15 => format!("{}", v as i64),
        Some(v) => format!("{}", v),
        None => String::new(),
    }
}

/// Month and day only: `"2024-05-02"` → `"May 2"`.
///
/// Accepts plain dates, `YYYY-MM-DD HH:MM:SS` and RFC 3339. Anything else is
/// echoed back unchanged so the user still sees what the feed sent.
pub fn format_date_month_day(raw: Option<&str>) -> String {
    let Some(raw) = raw.map(str::trim).filter(|s| !s.is_empty()) else {
        return String::new();
    };
    match parse_feed_date(raw) {
        Some(date) => date.format("%b %-d").to_string(),
        None => raw.to_string(),
    }
}

/// `"s"` unless the count is exactly one. A missing count pluralizes.
pub fn plural_suffix(count: Option<f64>) -> &'static str {
    if count == Some(1.0) {
        ""
    } else {
        "s"
    }
}

fn parse_feed_date(raw: &str) -> Option<NaiveDate> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.date_naive());
    }
    for fmt in ["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S", "%Y-%m-%d %H:%M:%S%.f"] {
        if let Ok(dt) = NaiveDateTime::parse_from_str(raw, fmt) {
            return Some(dt.date());
        }
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d").ok()
}

fn group_digits(n: u64) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_comma_integer() {
        assert_eq!(format_comma_integer(Some(450_000.0)), "450,000");
        assert_eq!(format_comma_integer(Some(2140.0)), "2,140");
        assert_eq!(format_comma_integer(Some(999.0)), "999");
        assert_eq!(format_comma_integer(Some(1_234_567.6)), "1,234,568");
        assert_eq!(format_comma_integer(Some(-12_000.0)), "-12,000");
        assert_eq!(format_comma_integer(None), "0");
        assert_eq!(format_comma_integer(Some(f64::NAN)), "0");
    }

    #[test]
    fn test_currency() {
        assert_eq!(format_currency(Some(-5000.0)), "-$5,000");
        assert_eq!(format_currency(Some(12_500.0)), "$12,500");
        assert_eq!(format_currency(Some(-0.2)), "$0");
        assert_eq!(format_currency(None), "$0");
    }

    #[test]
    fn test_number() {
        assert_eq!(format_number(Some(3.0)), "3");
        assert_eq!(format_number(Some(2.5)), "2.5");
        assert_eq!(format_number(Some(210.0)), "210");
        assert_eq!(format_number(None), "");
    }

    #[test]
    fn test_month_day() {
        assert_eq!(format_date_month_day(Some("2024-05-02")), "May 2");
        assert_eq!(format_date_month_day(Some("2024-11-21 13:45:00")), "Nov 21");
        assert_eq!(format_date_month_day(Some("2024-01-09T08:00:00Z")), "Jan 9");
        assert_eq!(format_date_month_day(Some("last tuesday")), "last tuesday");
        assert_eq!(format_date_month_day(Some("  ")), "");
        assert_eq!(format_date_month_day(None), "");
    }

    #[test]
    fn test_plural_suffix() {
        assert_eq!(plural_suffix(Some(1.0)), "");
        assert_eq!(plural_suffix(Some(0.0)), "s");
        assert_eq!(plural_suffix(Some(3.0)), "s");
        assert_eq!(plural_suffix(None), "s");
    }
}
