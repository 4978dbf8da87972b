//! Field-level change summaries
//!
//! Produces the short "price: 2550 -> 2799, quantity: 42 -> 40" strings that
//! end up in the audit log and in inventory transaction details.

use serde_json::Value;

/// Fields that change on every write and would only add noise
const IGNORED_FIELDS: &[&str] = &["updated_at", "created_at"];

/// Fields whose values must never be written out
const REDACTED_FIELDS: &[&str] = &["password_hash", "pin_hash"];

/// Generate a human-readable diff between two JSON values
///
/// Only top-level fields of objects are compared. Returns `None` when
/// nothing relevant changed.
pub fn generate_diff(before: &Value, after: &Value) -> Option<String> {
    match (before, after) {
        (Value::Object(before_obj), Value::Object(after_obj)) => {
            let mut changes = Vec::new();

            for (key, before_val) in before_obj {
                if IGNORED_FIELDS.contains(&key.as_str()) {
                    continue;
                }
                match after_obj.get(key) {
                    Some(after_val) if after_val != before_val => {
                        changes.push(describe_change(key, before_val, after_val));
                    }
                    Some(_) => {}
                    None => changes.push(format!("{}: {} -> (removed)", key, render(key, before_val))),
                }
            }

            for (key, after_val) in after_obj {
                if !before_obj.contains_key(key) && !IGNORED_FIELDS.contains(&key.as_str()) {
                    changes.push(format!("{}: (added) -> {}", key, render(key, after_val)));
                }
            }

            if changes.is_empty() {
                None
            } else {
                Some(changes.join(", "))
            }
        }
        _ if before != after => Some(format!(
            "{} -> {}",
            format_value(before),
            format_value(after)
        )),
        _ => None,
    }
}

fn describe_change(key: &str, before: &Value, after: &Value) -> String {
    if REDACTED_FIELDS.contains(&key) {
        format!("{}: changed", key)
    } else {
        format!("{}: {} -> {}", key, format_value(before), format_value(after))
    }
}

fn render(key: &str, value: &Value) -> String {
    if REDACTED_FIELDS.contains(&key) {
        "[redacted]".to_string()
    } else {
        format_value(value)
    }
}

/// Format a JSON value for human-readable display
fn format_value(value: &Value) -> String {
    match value {
        Value::Null => "null".to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n.to_string(),
        Value::String(s) => {
            if s.chars().count() > 50 {
                let head: String = s.chars().take(47).collect();
                format!("\"{}...\"", head)
            } else {
                format!("\"{}\"", s)
            }
        }
        Value::Array(arr) => format!("[{} items]", arr.len()),
        Value::Object(obj) => format!("{{{} fields}}", obj.len()),
    }
}
