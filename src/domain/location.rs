// src/domain/location.rs

use serde_json::Value;

pub const LOCATION_NOT_SPECIFIED: &str = "Location not specified";

/// Collapse a location into one display string.
///
/// Strings pass through. `{city, state}` objects (either capitalisation) become
/// "City, State", or whichever half exists.
pub fn format_location(value: Option<&Value>) -> String {
    match value {
        Some(Value::String(s)) => s.clone(),
        Some(Value::Object(obj)) => {
            let pick = |lower: &str, upper: &str| {
                [obj.get(lower), obj.get(upper)]
                    .into_iter()
                    .flatten()
                    .filter_map(Value::as_str)
                    .find(|s| !s.is_empty())
                    .map(str::to_string)
            };

            match (pick("city", "City"), pick("state", "State")) {
                (Some(city), Some(state)) => format!("{city}, {state}"),
                (Some(city), None) => city,
                (None, Some(state)) => state,
                (None, None) => LOCATION_NOT_SPECIFIED.to_string(),
            }
        }
        _ => LOCATION_NOT_SPECIFIED.to_string(),
    }
}
