//! Price normalization for free-form currency cells

use regex::Regex;
use std::sync::OnceLock;

use crate::record::RawValue;

fn strip_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"[^0-9.\-]").expect("invalid strip regex"))
}

fn number_prefix_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^-?(?:\d+(?:\.\d*)?|\.\d+)").expect("invalid number regex"))
}

/// Convert a raw cell into a currency amount.
///
/// Everything except digits, `.` and `-` is dropped, then the longest leading
/// number is parsed, so `"₹1,234.50 (incl. GST)"` reads as `1234.5`.
/// Blank or unreadable cells are worth 0.
pub fn normalize_price(value: &RawValue) -> f64 {
    match value {
        RawValue::Empty | RawValue::DateTime(_) => 0.0,
        RawValue::Number(n) if n.is_finite() => *n,
        RawValue::Number(_) => 0.0,
        RawValue::Text(s) => parse_amount(s),
    }
}

/// Text form of [`normalize_price`]
pub fn parse_amount(text: &str) -> f64 {
    let text = text.trim();
    if text.is_empty() {
        return 0.0;
    }
    let clean = strip_re().replace_all(text, "");
    number_prefix_re()
        .find(&clean)
        .and_then(|m| m.as_str().parse::<f64>().ok())
        .filter(|n| n.is_finite())
        .unwrap_or(0.0)
}
