//! Chart normalization: kind resolution, series reshaping and combined-chart presentation.

use log::debug;
use serde_json::{json, Value};

use super::constants::*;
use super::utils::raw_type;
use crate::diagnostics::{Diagnostic, DiagnosticKind};
use crate::models::chart::{ChartKind, ChartSeries};
use crate::models::common::ElementProps;
use crate::models::elements::ChartElement;
use crate::models::presentation::PlacedElement;

/// Resolves a logical chart type. An absent type means bar; an unknown one falls back to bar
/// with an [`DiagnosticKind::UnknownChartType`] note.
pub fn resolve_chart_kind(chart_type: Option<&str>, notes: &mut Vec<Diagnostic>) -> ChartKind {
    let Some(name) = chart_type else {
        return ChartKind::Bar;
    };
    ChartKind::from_name(name).unwrap_or_else(|| {
        notes.push(Diagnostic::new(
            DiagnosticKind::UnknownChartType,
            format!("unknown chart type \"{name}\", using bar"),
        ));
        ChartKind::Bar
    })
}

/// Same resolution without the note, for scanning sibling elements.
fn sibling_chart_kind(element: &Value) -> ChartKind {
    element
        .get("chartType")
        .and_then(Value::as_str)
        .and_then(ChartKind::from_name)
        .unwrap_or(ChartKind::Bar)
}

/// Whether any chart on the slide renders as bars or columns.
pub(crate) fn has_bar_sibling(siblings: &[Value]) -> bool {
    siblings
        .iter()
        .filter(|e| raw_type(e) == Some("chart"))
        .any(|e| sibling_chart_kind(e).is_bar_like())
}

/// Fills in what renderers need but authors often leave out: `sizes` mirror `values`
/// (pie kinds read slice sizes from there) and `labels` come from the series name or
/// `Data 1..n`.
pub fn derive_series(mut series: ChartSeries) -> ChartSeries {
    if let Some(values) = &series.values {
        if series.sizes.is_none() {
            series.sizes = Some(values.clone());
        }
        if series.labels.is_none() {
            series.labels = Some(match &series.name {
                Some(name) => vec![Value::String(name.clone())],
                None => (1..=values.len())
                    .map(|i| Value::String(format!("Data {i}")))
                    .collect(),
            });
        }
    }
    series
}

/// Hides the line chart's own axes, grid and labels so it can sit on top of a bar chart.
/// An authored `valAxisPos` or a truthy `showLegend` is kept.
pub fn apply_combined_chart_props(props: &mut ElementProps) {
    props.set("valGridLine", json!({"style": "none"}));
    props.set("catGridLine", json!({"style": "none"}));
    props.set("showValAxis", false);
    props.set("showCatAxis", false);
    props.set("showDataLabels", false);
    props.set("valAxisHidden", true);
    props.set("catAxisHidden", true);
    props.set("valAxisLabelFontSize", 0);
    props.set("valAxisTitleFontSize", 0);
    if !props.is_truthy("valAxisPos") {
        props.set("valAxisPos", "r");
    }
    if !props.is_truthy("showLegend") {
        props.set("showLegend", false);
    }
}

/// Normalizes a chart element. `siblings` are the raw payloads of every element on the slide.
///
/// Returns the placed chart, or the rejection when no usable series data is left.
pub fn normalize_chart(
    chart: &ChartElement,
    siblings: &[Value],
    notes: &mut Vec<Diagnostic>,
) -> Result<PlacedElement, Diagnostic> {
    let data = match &chart.data {
        Some(Value::Array(data)) if !data.is_empty() => data,
        _ => {
            return Err(Diagnostic::new(
                DiagnosticKind::MissingChartData,
                "chart data is missing, not a sequence or empty",
            ))
        }
    };

    let kind = resolve_chart_kind(chart.chart_type.as_deref(), notes);

    let mut series = Vec::with_capacity(data.len());
    for (index, raw) in data.iter().enumerate() {
        let parsed = match raw {
            Value::Object(_) => serde_json::from_value::<ChartSeries>(raw.clone()).ok(),
            _ => None,
        };
        match parsed {
            Some(s) => series.push(derive_series(s)),
            None => notes.push(
                Diagnostic::new(
                    DiagnosticKind::MalformedChartSeries,
                    format!("series {index} is not a readable series object, skipped"),
                )
                .with_payload(raw.clone()),
            ),
        }
    }
    if series.is_empty() {
        return Err(Diagnostic::new(
            DiagnosticKind::MissingChartData,
            "chart has no readable series",
        ));
    }

    let mut props = chart.props.clone();
    if kind == ChartKind::Doughnut {
        if let Some(hole) = props.hole_size.filter(|h| *h > MAX_DOUGHNUT_HOLE_SIZE) {
            props.hole_size = Some(CLAMPED_DOUGHNUT_HOLE_SIZE);
            notes.push(Diagnostic::new(
                DiagnosticKind::HoleSizeClamped,
                format!("doughnut hole size {hole} clamped to {CLAMPED_DOUGHNUT_HOLE_SIZE}"),
            ));
        }
    }

    if kind.is_line() && has_bar_sibling(siblings) {
        debug!("[normalize_chart] line chart layered over bars, hiding its axes");
        apply_combined_chart_props(&mut props);
    }

    Ok(PlacedElement::Chart {
        kind,
        series,
        props,
    })
}
