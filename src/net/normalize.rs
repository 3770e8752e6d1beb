//! Reduce a failed call's error body to one user-facing string.
//!
//! Precedence, first match wins:
//!
//! 1. object with a list `detail`: each item's `msg` (or the item itself), joined
//! 2. object with any other non-empty `detail`: that value
//! 3. object with a non-empty `msg`: that value
//! 4. top-level list: each item's `msg` (or the item itself), joined
//! 5. any other object: all values joined, or the default when that is empty
//! 6. text body: verbatim
//! 7. the error's generic message
//! 8. the caller's default
//!
//! Lists are joined with `", "`. "Non-empty" means not `null`, `false`,
//! `0`, or `""`; an empty list still counts as present.

#[cfg(test)]
#[path = "normalize_test.rs"]
mod normalize_test;

use serde_json::Value;

use super::error::ErrorPayload;

const SEPARATOR: &str = ", ";

/// Normalize an error body. Total: always yields a string.
#[must_use]
pub fn normalize(payload: Option<&ErrorPayload>, message: Option<&str>, default_message: &str) -> String {
    match payload {
        Some(ErrorPayload::Object(map)) => {
            if let Some(detail) = map.get("detail").filter(|v| is_present(v)) {
                return match detail {
                    Value::Array(items) => join_items(items),
                    other => display_value(other),
                };
            }
            if let Some(msg) = map.get("msg").filter(|v| is_present(v)) {
                return display_value(msg);
            }
            let joined = map.values().map(display_value).collect::<Vec<_>>().join(SEPARATOR);
            if joined.is_empty() { default_message.to_owned() } else { joined }
        }
        Some(ErrorPayload::List(items)) => join_items(items),
        Some(ErrorPayload::Text(text)) => text.clone(),
        Some(ErrorPayload::Absent) | None => message
            .filter(|m| !m.is_empty())
            .unwrap_or(default_message)
            .to_owned(),
    }
}

fn join_items(items: &[Value]) -> String {
    items
        .iter()
        .map(|item| match item.get("msg").filter(|v| is_present(v)) {
            Some(msg) => display_value(msg),
            None => display_value(item),
        })
        .collect::<Vec<_>>()
        .join(SEPARATOR)
}

fn is_present(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(flag) => *flag,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

/// Strings render bare; everything else renders as compact JSON.
fn display_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
