use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// The concrete chart kinds the document model can carry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChartKind {
    Bar,
    Bar3d,
    Pie,
    Pie3d,
    Doughnut,
    Line,
    Line3d,
    Area,
    Area3d,
    Scatter,
    Bubble,
    Radar,
    Column,
    Column3d,
    Bubble3d,
}

impl ChartKind {
    pub const ALL: [ChartKind; 15] = [
        ChartKind::Bar,
        ChartKind::Bar3d,
        ChartKind::Pie,
        ChartKind::Pie3d,
        ChartKind::Doughnut,
        ChartKind::Line,
        ChartKind::Line3d,
        ChartKind::Area,
        ChartKind::Area3d,
        ChartKind::Scatter,
        ChartKind::Bubble,
        ChartKind::Radar,
        ChartKind::Column,
        ChartKind::Column3d,
        ChartKind::Bubble3d,
    ];

    /// Logical name as authored (lowercase).
    pub fn as_str(&self) -> &'static str {
        match self {
            ChartKind::Bar => "bar",
            ChartKind::Bar3d => "bar3d",
            ChartKind::Pie => "pie",
            ChartKind::Pie3d => "pie3d",
            ChartKind::Doughnut => "doughnut",
            ChartKind::Line => "line",
            ChartKind::Line3d => "line3d",
            ChartKind::Area => "area",
            ChartKind::Area3d => "area3d",
            ChartKind::Scatter => "scatter",
            ChartKind::Bubble => "bubble",
            ChartKind::Radar => "radar",
            ChartKind::Column => "column",
            ChartKind::Column3d => "column3d",
            ChartKind::Bubble3d => "bubble3d",
        }
    }

    /// Case-insensitive lookup of a logical chart type name.
    pub fn from_name(name: &str) -> Option<ChartKind> {
        let lowered = name.to_lowercase();
        ChartKind::ALL
            .iter()
            .copied()
            .find(|kind| kind.as_str() == lowered)
    }

    /// Bar and column kinds, which own the axes when layered with a line chart.
    pub fn is_bar_like(&self) -> bool {
        matches!(
            self,
            ChartKind::Bar | ChartKind::Bar3d | ChartKind::Column | ChartKind::Column3d
        )
    }

    pub fn is_line(&self) -> bool {
        matches!(self, ChartKind::Line | ChartKind::Line3d)
    }

    /// Kinds whose slices are sized from the series `sizes`.
    pub fn is_pie_like(&self) -> bool {
        matches!(self, ChartKind::Pie | ChartKind::Pie3d | ChartKind::Doughnut)
    }
}

impl std::fmt::Display for ChartKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One data series of a chart.
///
/// Values are kept as JSON so loosely-typed authored data (numbers as strings, nulls) survives
/// normalization; [`ChartSeries::numeric_values`] gives a numeric view for rendering.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartSeries {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub labels: Option<Vec<Value>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub values: Option<Vec<Value>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sizes: Option<Vec<Value>>,

    #[serde(flatten)]
    pub extra: IndexMap<String, Value>,
}

impl ChartSeries {
    /// Values as numbers; entries that are not numeric (or numeric strings) read as 0.
    pub fn numeric_values(&self) -> Vec<f64> {
        self.values
            .as_deref()
            .unwrap_or_default()
            .iter()
            .map(|v| match v {
                Value::Number(n) => n.as_f64().unwrap_or(0.0),
                Value::String(s) => s.trim().parse().unwrap_or(0.0),
                _ => 0.0,
            })
            .collect()
    }

    /// Labels rendered as display strings.
    pub fn label_strings(&self) -> Vec<String> {
        self.labels
            .as_deref()
            .unwrap_or_default()
            .iter()
            .map(|v| match v {
                Value::String(s) => s.clone(),
                other => other.to_string(),
            })
            .collect()
    }
}
