use indexmap::IndexMap;
use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// Points per inch. Element geometry is expressed in inches, font sizes in points.
pub const PT_PER_INCH: f64 = 72.0;

/// Props keys the engine reads as numbers besides the geometry.
pub const NUMERIC_HINTS: [&str; 2] = ["fontSize", "holeSize"];

/// Reads a number authored either as a JSON number or as a numeric string (`"18"`).
pub fn lenient_number(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok().filter(|v| v.is_finite()),
        _ => None,
    }
}

/// Optional numeric hint. A value that is not a number reads as absent instead of failing the
/// whole element.
pub(crate) fn deserialize_hint<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Value>::deserialize(deserializer)?
        .as_ref()
        .and_then(lenient_number))
}

fn deserialize_geometry<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    lenient_number(&value)
        .ok_or_else(|| D::Error::custom(format!("geometry value {value} is not a number")))
}

/// Positional rectangle plus rendering hints shared by every element kind.
///
/// Geometry (`x`, `y`, `w`, `h`) is in inches and always present. The handful of hints the
/// engine reasons about are typed; everything else the content author supplied (colors, fills,
/// alignment, chart-axis flags, ...) is preserved verbatim in `extra`, in authoring order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ElementProps {
    #[serde(deserialize_with = "deserialize_geometry")]
    pub x: f64,
    #[serde(deserialize_with = "deserialize_geometry")]
    pub y: f64,
    #[serde(deserialize_with = "deserialize_geometry")]
    pub w: f64,
    #[serde(deserialize_with = "deserialize_geometry")]
    pub h: f64,

    /// Declared font size in points.
    #[serde(
        default,
        deserialize_with = "deserialize_hint",
        skip_serializing_if = "Option::is_none"
    )]
    pub font_size: Option<f64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub font_face: Option<String>,

    /// Vertical alignment inside the box (`top`, `middle`, `bottom`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub valign: Option<String>,

    /// Image source path. Only meaningful on image elements.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,

    /// Doughnut hole size in percent. Only meaningful on chart elements.
    #[serde(
        default,
        deserialize_with = "deserialize_hint",
        skip_serializing_if = "Option::is_none"
    )]
    pub hole_size: Option<f64>,

    /// Every other hint, kept as authored.
    #[serde(flatten)]
    pub extra: IndexMap<String, Value>,
}

impl ElementProps {
    /// Creates props with only a geometry set.
    pub fn at(x: f64, y: f64, w: f64, h: f64) -> Self {
        Self {
            x,
            y,
            w,
            h,
            font_size: None,
            font_face: None,
            valign: None,
            path: None,
            hole_size: None,
            extra: IndexMap::new(),
        }
    }

    /// Box width in points.
    pub fn width_pt(&self) -> f64 {
        self.w * PT_PER_INCH
    }

    /// Box height in points.
    pub fn height_pt(&self) -> f64 {
        self.h * PT_PER_INCH
    }

    /// Whether all four geometry values are finite and non-negative.
    pub fn has_valid_geometry(&self) -> bool {
        [self.x, self.y, self.w, self.h]
            .iter()
            .all(|v| v.is_finite() && *v >= 0.0)
    }

    /// Looks up an untyped hint.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.extra.get(key)
    }

    /// Sets an untyped hint, replacing any authored value.
    pub fn set(&mut self, key: &str, value: impl Into<Value>) {
        self.extra.insert(key.to_string(), value.into());
    }

    /// Removes an untyped hint.
    pub fn remove(&mut self, key: &str) -> Option<Value> {
        self.extra.shift_remove(key)
    }

    /// Whether the hint was authored with a truthy value (anything but `false`, `null`, `0`, `""`).
    pub fn is_truthy(&self, key: &str) -> bool {
        match self.extra.get(key) {
            None | Some(Value::Null) | Some(Value::Bool(false)) => false,
            Some(Value::Number(n)) => n.as_f64().map_or(false, |f| f != 0.0),
            Some(Value::String(s)) => !s.is_empty(),
            Some(_) => true,
        }
    }

    /// Convenience accessor for string hints such as `color` or `align`.
    pub fn get_str(&self, key: &str) -> Option<&str> {
        self.extra.get(key).and_then(Value::as_str)
    }
}
