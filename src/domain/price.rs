// src/domain/price.rs

use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::Value;

pub const PRICE_ON_REQUEST: &str = "Price on request";

/// "6.75M", "1,200k", "2B" once whitespace has been removed.
static ABBREVIATED: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^([\d.,]+)([kKmMbB])$").expect("valid abbreviation regex"));

/// Format a price value for display, or `None` when there is nothing to show.
///
/// Numbers become whole-dollar USD. Strings are tried as an abbreviated
/// amount ("6.75M"), then as digits with the noise stripped ("$6,750,000").
/// Strings that don't parse come back unchanged, so "Negotiable" or
/// "Call for pricing" still reach the page.
pub fn format_price_value(value: &Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::Number(n) => n.as_f64().filter(|f| f.is_finite()).map(format_usd),
        Value::String(s) if s.is_empty() => None,
        Value::String(s) => Some(format_price_str(s)),
        Value::Bool(b) => Some(b.to_string()),
        other => Some(other.to_string()),
    }
}

/// Like [`format_price_value`], falling back to "Price on request".
pub fn display_price(value: Option<&Value>) -> String {
    value
        .and_then(format_price_value)
        .unwrap_or_else(|| PRICE_ON_REQUEST.to_string())
}

fn format_price_str(raw: &str) -> String {
    let compact: String = raw.chars().filter(|c| !c.is_whitespace()).collect();

    if let Some(caps) = ABBREVIATED.captures(&compact) {
        let digits = caps[1].replace(',', "");
        if let Ok(num) = digits.parse::<f64>() {
            let scale = match caps[2].to_ascii_lowercase().as_str() {
                "k" => 1e3,
                "m" => 1e6,
                "b" => 1e9,
                _ => 1.0,
            };
            return format_usd(num * scale);
        }
    }

    let numeric: String = compact
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == '.' || *c == '-')
        .collect();

    if numeric.is_empty() {
        return raw.to_string();
    }

    match numeric.parse::<f64>() {
        Ok(num) if num.is_finite() => format_usd(num),
        _ => raw.to_string(),
    }
}

/// `1234567.5` -> `"$1,234,568"`. Rounds half away from zero.
pub fn format_usd(amount: f64) -> String {
    let rounded = amount.round();
    if rounded == 0.0 {
        return "$0".to_string();
    }

    let digits = format!("{:.0}", rounded.abs());
    let grouped = group_thousands(&digits);

    if rounded < 0.0 {
        format!("-${grouped}")
    } else {
        format!("${grouped}")
    }
}

/// Insert `,` every three digits from the right.
pub fn group_thousands(digits: &str) -> String {
    let len = digits.len();
    let mut out = String::with_capacity(len + len / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}
