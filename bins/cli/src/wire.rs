//! Helpers for values arriving from forms and exports.

use serde_json::Value;

/// Renders a JSON amount as the text a form would have submitted.
///
/// `null` becomes empty text so that it fails amount parsing instead of
/// being read as zero.
pub fn amount_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}
