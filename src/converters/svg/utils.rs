//! Utility functions for SVG preview rendering: escaping, unit conversion, color formatting and
//! reading the untyped rendering hints carried in element props.

use serde_json::Value;

use super::constants::*;
use crate::models::common::ElementProps;

// --- Text Escaping ---

/// Escapes special XML characters (`&`, `<`, `>`) for use in SVG text content.
pub fn escape_svg_text(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

/// Escapes text for use inside a double-quoted XML attribute.
pub fn escape_svg_attr(text: &str) -> String {
    escape_svg_text(text).replace('"', "&quot;")
}

// --- Unit Conversion ---

/// Converts inches to points.
pub fn inches_to_pt(inches: f64) -> f64 {
    inches * PT_PER_INCH
}

/// Element box `(x, y, w, h)` in points.
pub fn element_box_pt(props: &ElementProps) -> (f64, f64, f64, f64) {
    (
        inches_to_pt(props.x),
        inches_to_pt(props.y),
        inches_to_pt(props.w),
        inches_to_pt(props.h),
    )
}

// --- Color Formatting ---

/// Converts an authored hex color (`"008ed4"`, `"#008ED4"`, `"fff"`) to an SVG color string.
/// Returns `None` for anything that is not a 3- or 6-digit hex color.
pub fn format_color(color: &str) -> Option<String> {
    let hex = color.trim().trim_start_matches('#');
    let valid = matches!(hex.len(), 3 | 6) && hex.chars().all(|c| c.is_ascii_hexdigit());
    valid.then(|| format!("#{}", hex.to_lowercase()))
}

/// Reads a color hint that is either a hex string or an object with a `color` field
/// (`{"color": "E6F4FB"}`), the two forms presentation authors use.
pub fn color_hint(value: Option<&Value>) -> Option<String> {
    match value? {
        Value::String(s) => format_color(s),
        Value::Object(map) => map.get("color").and_then(Value::as_str).and_then(format_color),
        _ => None,
    }
}

/// Fill color of an element's box, `none` when not set.
pub fn fill_color(props: &ElementProps) -> String {
    color_hint(props.get("fill")).unwrap_or_else(|| DEFAULT_SHAPE_FILL.to_string())
}

/// Stroke color and width (pt) of an element's outline. Shapes without a `line` hint get a thin
/// gray outline only when they are also unfilled, so they stay visible in the preview.
pub fn stroke(props: &ElementProps) -> Option<(String, f64)> {
    match props.get("line") {
        Some(line) => {
            let color = color_hint(Some(line))?;
            let width = line.get("width").and_then(Value::as_f64).unwrap_or(1.0);
            Some((color, width))
        }
        None if fill_color(props) == DEFAULT_SHAPE_FILL => {
            Some((DEFAULT_SHAPE_STROKE.to_string(), 0.75))
        }
        None => None,
    }
}

/// Text color of an element, falling back to black.
pub fn text_color(props: &ElementProps) -> String {
    color_hint(props.get("color")).unwrap_or_else(|| DEFAULT_TEXT_COLOR.to_string())
}

/// Formats a number for SVG output with at most two decimals and no trailing zeros.
pub fn fmt_num(value: f64) -> String {
    let rounded = (value * 100.0).round() / 100.0;
    if rounded == rounded.trunc() {
        format!("{}", rounded as i64)
    } else {
        format!("{}", rounded)
    }
}
