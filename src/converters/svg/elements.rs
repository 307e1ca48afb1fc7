//! Handles the conversion of placed elements (text, shape, table, chart, image) into their SVG
//! representations.

use log::{debug, warn};
use serde_json::Value;
use std::f64::consts::PI;
use std::fmt::Write;

use super::{
    constants::*,
    error::Result,
    text::write_text_block,
    utils::{
        element_box_pt, escape_svg_attr, escape_svg_text, fill_color, fmt_num, stroke, text_color,
    },
};
use crate::models::chart::{ChartKind, ChartSeries};
use crate::models::common::ElementProps;
use crate::models::presentation::PlacedElement;
use crate::models::shape::ShapeType;

/// Builds the `style` attribute for shape geometry (fill and stroke).
fn build_shape_style(props: &ElementProps) -> String {
    let mut style = format!("fill:{};", fill_color(props));
    match stroke(props) {
        Some((color, width)) => {
            write!(style, " stroke:{}; stroke-width:{}pt;", color, fmt_num(width)).ok();
        }
        None => style.push_str(" stroke:none;"),
    }
    style
}

/// Polygon `points` attribute from unit-square coordinates mapped onto the box.
fn polygon_points(x: f64, y: f64, w: f64, h: f64, unit_points: &[(f64, f64)]) -> String {
    unit_points
        .iter()
        .map(|(px, py)| format!("{},{}", fmt_num(x + px * w), fmt_num(y + py * h)))
        .collect::<Vec<_>>()
        .join(" ")
}

/// SVG geometry for a shape type. Types without a dedicated outline are drawn as their bounding
/// rectangle, tagged with the shape name.
fn shape_geometry(shape_type: ShapeType, x: f64, y: f64, w: f64, h: f64, style: &str) -> String {
    let polygon = |points: &[(f64, f64)]| {
        format!(
            r#"<polygon points="{}" style="{}"/>"#,
            polygon_points(x, y, w, h, points),
            style
        )
    };
    match shape_type {
        ShapeType::Rect => format!(
            r#"<rect x="{}" y="{}" width="{}" height="{}" style="{}"/>"#,
            fmt_num(x),
            fmt_num(y),
            fmt_num(w),
            fmt_num(h),
            style
        ),
        ShapeType::RoundRect => format!(
            r#"<rect x="{}" y="{}" width="{}" height="{}" rx="{}" style="{}"/>"#,
            fmt_num(x),
            fmt_num(y),
            fmt_num(w),
            fmt_num(h),
            fmt_num(w.min(h) * 0.16667),
            style
        ),
        ShapeType::Ellipse | ShapeType::Donut => format!(
            r#"<ellipse cx="{}" cy="{}" rx="{}" ry="{}" style="{}"/>"#,
            fmt_num(x + w / 2.0),
            fmt_num(y + h / 2.0),
            fmt_num(w / 2.0),
            fmt_num(h / 2.0),
            style
        ),
        ShapeType::Line => format!(
            r#"<line x1="{}" y1="{}" x2="{}" y2="{}" style="{}"/>"#,
            fmt_num(x),
            fmt_num(y),
            fmt_num(x + w),
            fmt_num(y + h),
            style
        ),
        ShapeType::Triangle => polygon(&[(0.5, 0.0), (1.0, 1.0), (0.0, 1.0)]),
        ShapeType::RtTriangle => polygon(&[(0.0, 0.0), (1.0, 1.0), (0.0, 1.0)]),
        ShapeType::Diamond => polygon(&[(0.5, 0.0), (1.0, 0.5), (0.5, 1.0), (0.0, 0.5)]),
        ShapeType::Parallelogram => polygon(&[(0.25, 0.0), (1.0, 0.0), (0.75, 1.0), (0.0, 1.0)]),
        ShapeType::Trapezoid => polygon(&[(0.25, 0.0), (0.75, 0.0), (1.0, 1.0), (0.0, 1.0)]),
        ShapeType::Pentagon => polygon(&[
            (0.5, 0.0),
            (1.0, 0.38),
            (0.81, 1.0),
            (0.19, 1.0),
            (0.0, 0.38),
        ]),
        ShapeType::Hexagon => polygon(&[
            (0.25, 0.0),
            (0.75, 0.0),
            (1.0, 0.5),
            (0.75, 1.0),
            (0.25, 1.0),
            (0.0, 0.5),
        ]),
        ShapeType::Octagon => polygon(&[
            (0.29, 0.0),
            (0.71, 0.0),
            (1.0, 0.29),
            (1.0, 0.71),
            (0.71, 1.0),
            (0.29, 1.0),
            (0.0, 0.71),
            (0.0, 0.29),
        ]),
        ShapeType::HomePlate => polygon(&[
            (0.0, 0.0),
            (0.8, 0.0),
            (1.0, 0.5),
            (0.8, 1.0),
            (0.0, 1.0),
        ]),
        ShapeType::Chevron => polygon(&[
            (0.0, 0.0),
            (0.8, 0.0),
            (1.0, 0.5),
            (0.8, 1.0),
            (0.0, 1.0),
            (0.2, 0.5),
        ]),
        ShapeType::RightArrow => polygon(&[
            (0.0, 0.25),
            (0.7, 0.25),
            (0.7, 0.0),
            (1.0, 0.5),
            (0.7, 1.0),
            (0.7, 0.75),
            (0.0, 0.75),
        ]),
        other => {
            debug!("No outline for shape type {}, drawing its bounding box", other);
            format!(
                r#"<rect x="{}" y="{}" width="{}" height="{}" style="{}" data-shape="{}"/>"#,
                fmt_num(x),
                fmt_num(y),
                fmt_num(w),
                fmt_num(h),
                style,
                other
            )
        }
    }
}

fn convert_shape_to_svg(
    shape_type: ShapeType,
    runs: &[crate::models::text::TextRun],
    props: &ElementProps,
    svg_output: &mut String,
) -> Result<()> {
    let (x, y, w, h) = element_box_pt(props);
    let style = build_shape_style(props);
    writeln!(svg_output, "{}", shape_geometry(shape_type, x, y, w, h, &style))?;
    write_text_block(runs, props, svg_output)
}

/// Renders a table cell value as text.
fn cell_text(cell: &Value) -> String {
    match cell {
        Value::String(s) => s.clone(),
        Value::Null => String::new(),
        Value::Object(map) => map
            .get("text")
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_string(),
        other => other.to_string(),
    }
}

/// Converts a table into an HTML `<table>` inside a `<foreignObject>` covering the element box.
fn convert_table_to_svg(
    rows: &[Vec<Value>],
    props: &ElementProps,
    svg_output: &mut String,
) -> Result<()> {
    let (x, y, w, h) = element_box_pt(props);
    if w <= 0.0 || h <= 0.0 {
        warn!("Skipping table with zero dimensions ({}x{} pt).", w, h);
        return Ok(());
    }

    let font_size = props.font_size.unwrap_or(DEFAULT_FONT_SIZE_PT);
    let family = props.font_face.as_deref().unwrap_or("sans-serif");
    writeln!(
        svg_output,
        r#"<foreignObject x="{}" y="{}" width="{}" height="{}" overflow="visible">"#,
        fmt_num(x),
        fmt_num(y),
        fmt_num(w),
        fmt_num(h)
    )?;
    writeln!(
        svg_output,
        r#"  <table xmlns="http://www.w3.org/1999/xhtml" style="border-collapse: collapse; width:{}pt; table-layout: fixed; font-family:'{}'; font-size:{}pt; color:{};">"#,
        fmt_num(w),
        escape_svg_attr(family),
        fmt_num(font_size),
        text_color(props)
    )?;
    for (row_index, row) in rows.iter().enumerate() {
        write!(svg_output, "    <tr>")?;
        // First row renders as the header, as repeated on continuation slides.
        let tag = if row_index == 0 { "th" } else { "td" };
        for cell in row {
            write!(
                svg_output,
                r#"<{tag} style="border:{}; padding:2pt 4pt;">{}</{tag}>"#,
                DEFAULT_TABLE_BORDER,
                escape_svg_text(&cell_text(cell)),
                tag = tag
            )?;
        }
        writeln!(svg_output, "</tr>")?;
    }
    writeln!(svg_output, "  </table>")?;
    writeln!(svg_output, "</foreignObject>")?;
    Ok(())
}

fn palette(index: usize) -> &'static str {
    CHART_PALETTE[index % CHART_PALETTE.len()]
}

/// Columns per category, one color per series, scaled to the largest positive value.
fn write_bar_sketch(
    series: &[ChartSeries],
    area: (f64, f64, f64, f64),
    svg_output: &mut String,
) -> Result<()> {
    let (x, y, w, h) = area;
    let values: Vec<Vec<f64>> = series.iter().map(ChartSeries::numeric_values).collect();
    let categories = values.iter().map(Vec::len).max().unwrap_or_default();
    let max = values.iter().flatten().copied().fold(0.0_f64, f64::max);
    if categories == 0 || max <= 0.0 {
        return Ok(());
    }

    let group_width = w / categories as f64;
    let bar_width = group_width / (values.len() as f64 + 1.0);
    for (series_index, series_values) in values.iter().enumerate() {
        for (category, value) in series_values.iter().enumerate() {
            let bar_height = (value.max(0.0) / max) * h;
            let bar_x = x + category as f64 * group_width + bar_width * (series_index as f64 + 0.5);
            writeln!(
                svg_output,
                r#"<rect x="{}" y="{}" width="{}" height="{}" style="fill:{};"/>"#,
                fmt_num(bar_x),
                fmt_num(y + h - bar_height),
                fmt_num(bar_width),
                fmt_num(bar_height),
                palette(series_index)
            )?;
        }
    }
    Ok(())
}

/// One polyline (or filled polygon for area kinds) per series.
fn write_line_sketch(
    series: &[ChartSeries],
    area: (f64, f64, f64, f64),
    filled: bool,
    svg_output: &mut String,
) -> Result<()> {
    let (x, y, w, h) = area;
    let values: Vec<Vec<f64>> = series.iter().map(ChartSeries::numeric_values).collect();
    let max = values.iter().flatten().copied().fold(0.0_f64, f64::max);
    if max <= 0.0 {
        return Ok(());
    }

    for (series_index, series_values) in values.iter().enumerate() {
        if series_values.is_empty() {
            continue;
        }
        let step = if series_values.len() > 1 {
            w / (series_values.len() - 1) as f64
        } else {
            0.0
        };
        let mut points: Vec<String> = series_values
            .iter()
            .enumerate()
            .map(|(i, v)| {
                format!(
                    "{},{}",
                    fmt_num(x + i as f64 * step),
                    fmt_num(y + h - (v.max(0.0) / max) * h)
                )
            })
            .collect();
        let color = palette(series_index);
        if filled {
            points.push(format!("{},{}", fmt_num(x + w), fmt_num(y + h)));
            points.push(format!("{},{}", fmt_num(x), fmt_num(y + h)));
            writeln!(
                svg_output,
                r#"<polygon points="{}" style="fill:{}; fill-opacity:0.6; stroke:none;"/>"#,
                points.join(" "),
                color
            )?;
        } else {
            writeln!(
                svg_output,
                r#"<polyline points="{}" style="fill:none; stroke:{}; stroke-width:2pt;"/>"#,
                points.join(" "),
                color
            )?;
        }
    }
    Ok(())
}

/// Slices of the first series' sizes (falling back to values). Doughnuts get their hole.
fn write_pie_sketch(
    series: &[ChartSeries],
    area: (f64, f64, f64, f64),
    hole_percent: Option<f64>,
    svg_output: &mut String,
) -> Result<()> {
    let (x, y, w, h) = area;
    let Some(first) = series.first() else {
        return Ok(());
    };
    let sized = ChartSeries {
        values: first.sizes.clone().or_else(|| first.values.clone()),
        ..ChartSeries::default()
    };
    let slices: Vec<f64> = sized.numeric_values().into_iter().map(|v| v.max(0.0)).collect();
    let total: f64 = slices.iter().sum();
    if total <= 0.0 {
        return Ok(());
    }

    let (cx, cy, r) = (x + w / 2.0, y + h / 2.0, w.min(h) / 2.0);
    let mut angle = -PI / 2.0;
    for (index, slice) in slices.iter().enumerate() {
        let sweep = slice / total * 2.0 * PI;
        let color = palette(index);
        if sweep >= 2.0 * PI - f64::EPSILON {
            writeln!(
                svg_output,
                r#"<circle cx="{}" cy="{}" r="{}" style="fill:{};"/>"#,
                fmt_num(cx),
                fmt_num(cy),
                fmt_num(r),
                color
            )?;
        } else if sweep > 0.0 {
            let (x1, y1) = (cx + r * angle.cos(), cy + r * angle.sin());
            let end = angle + sweep;
            let (x2, y2) = (cx + r * end.cos(), cy + r * end.sin());
            writeln!(
                svg_output,
                r#"<path d="M {} {} L {} {} A {} {} 0 {} 1 {} {} Z" style="fill:{};"/>"#,
                fmt_num(cx),
                fmt_num(cy),
                fmt_num(x1),
                fmt_num(y1),
                fmt_num(r),
                fmt_num(r),
                if sweep > PI { 1 } else { 0 },
                fmt_num(x2),
                fmt_num(y2),
                color
            )?;
        }
        angle += sweep;
    }

    if let Some(hole) = hole_percent {
        writeln!(
            svg_output,
            r#"<circle cx="{}" cy="{}" r="{}" style="fill:{};"/>"#,
            fmt_num(cx),
            fmt_num(cy),
            fmt_num(r * hole / 100.0),
            DEFAULT_BACKGROUND_COLOR
        )?;
    }
    Ok(())
}

/// Converts a chart into a framed sketch: enough to see the kind and the data shape in a preview.
fn convert_chart_to_svg(
    kind: ChartKind,
    series: &[ChartSeries],
    props: &ElementProps,
    svg_output: &mut String,
) -> Result<()> {
    let (x, y, w, h) = element_box_pt(props);
    writeln!(svg_output, r#"<g data-chart="{}">"#, kind)?;
    writeln!(
        svg_output,
        r#"<rect x="{}" y="{}" width="{}" height="{}" style="fill:none; stroke:{}; stroke-width:0.5pt;"/>"#,
        fmt_num(x),
        fmt_num(y),
        fmt_num(w),
        fmt_num(h),
        DEFAULT_SHAPE_STROKE
    )?;

    let inner = (
        x + CHART_PADDING_PT,
        y + CHART_PADDING_PT,
        (w - 2.0 * CHART_PADDING_PT).max(0.0),
        (h - 2.0 * CHART_PADDING_PT).max(0.0),
    );
    match kind {
        k if k.is_bar_like() => write_bar_sketch(series, inner, svg_output)?,
        k if k.is_pie_like() => {
            let hole = (k == ChartKind::Doughnut).then(|| props.hole_size.unwrap_or(50.0));
            write_pie_sketch(series, inner, hole, svg_output)?
        }
        ChartKind::Area | ChartKind::Area3d => write_line_sketch(series, inner, true, svg_output)?,
        _ => write_line_sketch(series, inner, false, svg_output)?,
    }
    writeln!(svg_output, "</g>")?;
    Ok(())
}

fn convert_image_to_svg(path: &str, props: &ElementProps, svg_output: &mut String) -> Result<()> {
    let (x, y, w, h) = element_box_pt(props);
    if w <= 0.0 || h <= 0.0 {
        warn!("Skipping image {} with zero dimensions ({}x{} pt).", path, w, h);
        return Ok(());
    }
    writeln!(
        svg_output,
        r#"<image x="{}" y="{}" width="{}" height="{}" xlink:href="{}" preserveAspectRatio="xMidYMid meet"/>"#,
        fmt_num(x),
        fmt_num(y),
        fmt_num(w),
        fmt_num(h),
        escape_svg_attr(path)
    )?;
    Ok(())
}

/// Converts one placed element, dispatching on its kind.
pub(crate) fn convert_element_to_svg(
    element: &PlacedElement,
    svg_output: &mut String,
) -> Result<()> {
    match element {
        PlacedElement::Text { runs, props } => write_text_block(runs, props, svg_output),
        PlacedElement::Shape {
            shape_type,
            runs,
            props,
        } => convert_shape_to_svg(*shape_type, runs, props, svg_output),
        PlacedElement::Table { rows, props } => convert_table_to_svg(rows, props, svg_output),
        PlacedElement::Chart {
            kind,
            series,
            props,
        } => convert_chart_to_svg(*kind, series, props, svg_output),
        PlacedElement::Image { path, props } => convert_image_to_svg(path, props, svg_output),
    }
}
