//! Defines constants used throughout the SVG preview rendering.

pub use crate::converters::deck::{DEFAULT_FONT_SIZE_PT, PT_PER_INCH};

// Line height of rendered text relative to its font size.
pub const SVG_LINE_HEIGHT: f64 = 1.2;

// Default values used when an element does not carry the hint.
pub const DEFAULT_TEXT_COLOR: &str = "#000000";
pub const DEFAULT_BACKGROUND_COLOR: &str = "#ffffff";
pub const DEFAULT_SHAPE_FILL: &str = "none";
pub const DEFAULT_SHAPE_STROKE: &str = "#7f7f7f";
pub const DEFAULT_TABLE_BORDER: &str = "1pt solid #bfbfbf";

// Inner padding of chart sketches, in points.
pub const CHART_PADDING_PT: f64 = 8.0;

/// Series colors of chart sketches, cycled when a chart has more series (or slices).
pub const CHART_PALETTE: &[&str] = &[
    "#008ed4", "#f28e2b", "#59a14f", "#e15759", "#76b7b2", "#edc948", "#b07aa1", "#9c755f",
];
