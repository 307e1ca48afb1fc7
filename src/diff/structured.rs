use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;
use treediff::{value::Key, Delegate};

/// Represents a simplified view of a value involved in a change.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub enum ValueRepr {
    String(String),
    Number(serde_json::Number),
    Boolean(bool),
    Null,
    // Summaries for complex types
    Array(String),  // e.g., "[Array len=5]"
    Object(String), // e.g., "{Object}"
}

impl ValueRepr {
    /// Converts a JSON value, summarizing arrays and objects.
    fn from_json_value(val: &JsonValue) -> Self {
        match val {
            JsonValue::Null => ValueRepr::Null,
            JsonValue::Bool(b) => ValueRepr::Boolean(*b),
            JsonValue::Number(n) => ValueRepr::Number(n.clone()),
            JsonValue::String(s) => ValueRepr::String(s.clone()),
            JsonValue::Array(arr) => ValueRepr::Array(format!("[Array len={}]", arr.len())),
            JsonValue::Object(map) => match map.get("type").and_then(JsonValue::as_str) {
                Some(kind) => ValueRepr::Object(format!("{{{} element}}", kind)),
                None => ValueRepr::Object("{Object}".to_string()),
            },
        }
    }

    /// Formats the ValueRepr for display.
    pub fn format_for_display(&self) -> String {
        match self {
            ValueRepr::String(s) => {
                let escaped_s = s
                    .replace('\\', "\\\\") // backslash first
                    .replace('\n', "\\n")
                    .replace('\r', "\\r")
                    .replace('\t', "\\t")
                    .replace('\'', "\\'");
                format!("'{}'", escaped_s)
            }
            ValueRepr::Number(n) => n.to_string(),
            ValueRepr::Boolean(b) => b.to_string(),
            ValueRepr::Null => "null".to_string(),
            ValueRepr::Array(s) | ValueRepr::Object(s) => s.clone(),
        }
    }
}

/// The type of difference detected.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, Hash)]
pub enum ChangeType {
    Added,
    Removed,
    Modified,
}

/// Represents a single difference found between two deck configurations.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Change {
    /// Dot-separated path with bracket notation for array indices.
    /// Example: `slides.3.elements[0].props.x`
    pub path: String,
    /// Key of the slide the change is under, `None` for deck-level changes (layout, font).
    pub slide_key: Option<String>,
    /// The type of change.
    pub change_type: ChangeType,
    /// The value before the change (None for Added).
    pub old_value: Option<ValueRepr>,
    /// The value after the change (None for Removed).
    pub new_value: Option<ValueRepr>,
}

/// treediff delegate collecting changes into `Vec<Change>`.
///
/// treediff reports added and removed entries with their key without pushing it, so those paths
/// are completed with the key here.
#[derive(Debug, Default)]
pub(crate) struct ChangeCollector {
    pub(crate) changes: Vec<Change>,
    /// Formatted segments; each carries its own separator (`.name` or `[i]`).
    segments: Vec<String>,
    /// Raw object keys and indices, for locating the slide key.
    raw: Vec<String>,
}

impl ChangeCollector {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    fn format_segment(&self, segment: &Key, depth: usize) -> String {
        match segment {
            Key::String(s) if depth == 0 => s.clone(),
            Key::String(s) => format!(".{}", s),
            Key::Index(i) => format!("[{}]", i),
        }
    }

    fn raw_segment(segment: &Key) -> String {
        match segment {
            Key::String(s) => s.clone(),
            Key::Index(i) => i.to_string(),
        }
    }

    /// Path of the current position, optionally extended by `last`.
    fn format_path(&self, last: Option<&Key>) -> String {
        let mut path = self.segments.join("");
        if let Some(key) = last {
            path.push_str(&self.format_segment(key, self.segments.len()));
        }
        path
    }

    /// The slide key when the path runs through `slides.<key>`.
    fn slide_key(&self, last: Option<&Key>) -> Option<String> {
        if self.raw.first().map(String::as_str) != Some("slides") {
            return None;
        }
        match self.raw.get(1) {
            Some(key) => Some(key.clone()),
            None => last.map(Self::raw_segment),
        }
    }

    fn record(
        &mut self,
        key: Option<&Key>,
        change_type: ChangeType,
        old_value: Option<ValueRepr>,
        new_value: Option<ValueRepr>,
    ) {
        let change = Change {
            path: self.format_path(key),
            slide_key: self.slide_key(key),
            change_type,
            old_value,
            new_value,
        };
        self.changes.push(change);
    }
}

impl<'a> Delegate<'a, Key, JsonValue> for ChangeCollector {
    fn push(&mut self, segment: &Key) {
        let formatted = self.format_segment(segment, self.segments.len());
        self.segments.push(formatted);
        self.raw.push(Self::raw_segment(segment));
    }

    fn pop(&mut self) {
        self.segments.pop();
        self.raw.pop();
    }

    fn removed<'b>(&mut self, key: &'b Key, value: &'a JsonValue) {
        self.record(
            Some(key),
            ChangeType::Removed,
            Some(ValueRepr::from_json_value(value)),
            None,
        );
    }

    fn added<'b>(&mut self, key: &'b Key, value: &'a JsonValue) {
        self.record(
            Some(key),
            ChangeType::Added,
            None,
            Some(ValueRepr::from_json_value(value)),
        );
    }

    fn modified(&mut self, old: &'a JsonValue, new: &'a JsonValue) {
        self.record(
            None,
            ChangeType::Modified,
            Some(ValueRepr::from_json_value(old)),
            Some(ValueRepr::from_json_value(new)),
        );
    }
}
