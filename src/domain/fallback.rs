// src/domain/fallback.rs

use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::{Map, Value};

/// Keys that look like they might hold a price when none of the known aliases do.
static PRICE_KEY: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)price|asking|sold|sale|list|amount|ask").expect("valid price key regex")
});

/// A value counts as present unless it is absent, `null` or `""`.
pub fn is_present(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::String(s) => !s.is_empty(),
        _ => true,
    }
}

/// First present candidate, in the order given.
pub fn first_present<'a, I>(candidates: I) -> Option<&'a Value>
where
    I: IntoIterator<Item = Option<&'a Value>>,
{
    candidates.into_iter().flatten().find(|v| is_present(v))
}

/// First present value among `aliases`, looked up in alias order.
pub fn resolve_alias<'a>(fields: &'a Map<String, Value>, aliases: &[&str]) -> Option<&'a Value> {
    first_present(aliases.iter().map(|key| fields.get(*key)))
}

/// Last-resort price lookup: first key in document order that looks price-like
/// and holds a present value. Keys in `skip` have already been tried.
pub fn scan_price_like<'a>(fields: &'a Map<String, Value>, skip: &[&str]) -> Option<&'a Value> {
    fields
        .iter()
        .filter(|(key, _)| !skip.contains(&key.as_str()))
        .filter(|(key, _)| PRICE_KEY.is_match(key))
        .map(|(_, value)| value)
        .find(|value| is_present(value))
}

/// Read a present value as display text. Numbers and booleans are stringified,
/// containers are not text.
pub fn as_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) if !s.is_empty() => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}
