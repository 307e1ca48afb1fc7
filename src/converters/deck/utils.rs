//! Helpers over raw element payloads, used before an element is parsed.

use serde_json::Value;

use crate::models::common::{lenient_number, NUMERIC_HINTS};

/// Normalizes a title (or element text) for duplicate detection.
///
/// Drops every whitespace character, folds full-width brackets, corner quotes and the full-width
/// slash onto their ASCII forms, then lowercases.
pub fn normalize_title_text(text: &str) -> String {
    text.chars()
        .filter(|c| !c.is_whitespace())
        .map(|c| match c {
            '（' => '(',
            '）' => ')',
            '「' | '『' | '」' | '』' => '"',
            '／' => '/',
            other => other,
        })
        .collect::<String>()
        .to_lowercase()
}

/// Concatenated text of a raw `content` field: a string, or a sequence of strings and
/// `{text}` objects. Anything else reads as empty.
pub(crate) fn raw_content_text(element: &Value) -> String {
    match element.get("content") {
        Some(Value::String(text)) => text.clone(),
        Some(Value::Array(items)) => items
            .iter()
            .filter_map(|item| match item {
                Value::String(text) => Some(text.as_str()),
                other => other.get("text").and_then(Value::as_str),
            })
            .collect(),
        _ => String::new(),
    }
}

/// Numeric geometry field of a raw payload's `props`.
pub(crate) fn raw_prop(element: &Value, key: &str) -> Option<f64> {
    lenient_number(element.get("props")?.get(key)?)
}

/// Shifts a raw payload's `props.y` up by `delta`, stopping at the top edge of the slide.
/// Payloads without a numeric `y` are left alone.
pub(crate) fn shift_raw_y(element: &mut Value, delta: f64) {
    let Some(props) = element.get_mut("props").and_then(Value::as_object_mut) else {
        return;
    };
    if let Some(y) = props.get("y").and_then(lenient_number) {
        props.insert("y".to_string(), Value::from((y - delta).max(0.0)));
    }
}

/// Numeric hints of a raw payload whose value cannot be read as a number, as
/// `(path, value)` pairs. Parsing drops these hints.
pub(crate) fn unreadable_numeric_hints(element: &Value) -> Vec<(String, Value)> {
    let mut found = Vec::new();
    let mut check = |path: String, value: Option<&Value>| {
        if let Some(value) = value.filter(|v| !v.is_null() && lenient_number(v).is_none()) {
            found.push((path, value.clone()));
        }
    };

    if let Some(props) = element.get("props") {
        for key in NUMERIC_HINTS {
            check(format!("props.{key}"), props.get(key));
        }
    }
    if let Some(Value::Array(items)) = element.get("content") {
        for (index, item) in items.iter().enumerate() {
            let font_size = item.get("options").and_then(|o| o.get("fontSize"));
            check(format!("content[{index}].options.fontSize"), font_size);
        }
    }
    found
}

/// The `type` tag of a raw payload.
pub(crate) fn raw_type(element: &Value) -> Option<&str> {
    element.get("type").and_then(Value::as_str)
}
