// src/domain/details.rs
//
// Small display helpers for the optional descriptive fields.

use chrono::{DateTime, NaiveDate};
use serde_json::Value;

use crate::domain::price::group_thousands;

/// Numbers become "12,000 SF"; strings are assumed to be pre-formatted.
pub fn format_size(value: &Value) -> Option<String> {
    match value {
        Value::String(s) if !s.is_empty() => Some(s.clone()),
        Value::Number(n) => n.as_f64().filter(|f| f.is_finite()).map(|f| {
            let whole = format!("{:.0}", f.abs().round());
            let sign = if f < 0.0 { "-" } else { "" };
            format!("{sign}{} SF", group_thousands(&whole))
        }),
        _ => None,
    }
}

/// Highlights arrive as plain strings or as `{text}` / `{name}` objects.
pub fn normalize_highlights(value: Option<&Value>) -> Vec<String> {
    let Some(Value::Array(items)) = value else {
        return Vec::new();
    };

    items
        .iter()
        .filter_map(|item| match item {
            Value::String(s) => Some(s.clone()),
            Value::Object(obj) => ["text", "name"]
                .iter()
                .filter_map(|k| obj.get(*k).and_then(Value::as_str))
                .find(|s| !s.is_empty())
                .map(str::to_string),
            _ => None,
        })
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}

/// Render an RFC 3339 timestamp or a plain `YYYY-MM-DD` date as "Mar 3, 2025".
/// Anything else is shown as it was stored.
pub fn display_date(value: &Value) -> Option<String> {
    let raw = value.as_str().filter(|s| !s.is_empty())?;

    let date = DateTime::parse_from_rfc3339(raw)
        .map(|dt| dt.date_naive())
        .or_else(|_| NaiveDate::parse_from_str(raw, "%Y-%m-%d"));

    Some(match date {
        Ok(d) => d.format("%b %-d, %Y").to_string(),
        Err(_) => raw.to_string(),
    })
}
