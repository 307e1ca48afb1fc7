//! Element normalization: turns one raw element payload into a placed element, or a rejection.
//!
//! Each payload is parsed on its own so a single bad element never affects its siblings. The
//! normalizer never touches the payload it is given; every output is a fresh value.

use std::path::Path;

use log::debug;
use serde_json::Value;

use super::charts::normalize_chart;
use super::constants::*;
use super::text_fit::{fit_plain_text, fit_runs};
use super::utils::{raw_type, unreadable_numeric_hints};
use crate::diagnostics::{Diagnostic, DiagnosticKind};
use crate::models::common::ElementProps;
use crate::models::elements::{
    ElementKind, ImageElement, ShapeElement, SlideElement, TableElement, TextElement,
};
use crate::models::presentation::PlacedElement;
use crate::models::shape::{resolve_shape_alias, ShapeType};
use crate::models::text::{TextContent, TextRun};

/// Outcome of normalizing one element: the placed element, or the diagnostic explaining why it
/// was left out.
pub type ElementOutcome = std::result::Result<PlacedElement, Diagnostic>;

/// Normalizes the elements of one slide.
#[derive(Debug, Clone, Copy)]
pub struct ElementNormalizer<'a> {
    font: &'a str,
    siblings: &'a [Value],
}

impl<'a> ElementNormalizer<'a> {
    /// `siblings` are the raw payloads of the whole slide, needed to detect layered charts.
    pub fn new(font: &'a str, siblings: &'a [Value]) -> Self {
        Self { font, siblings }
    }

    /// Normalizes one payload. Fallback decisions that keep the element are pushed to `notes`.
    pub fn normalize(&self, payload: &Value, notes: &mut Vec<Diagnostic>) -> ElementOutcome {
        let element = parse_element(payload, notes)?;
        debug!("[normalize] {:?} element", element.kind());

        match &element {
            SlideElement::Text(text) => Ok(self.normalize_text(text)),
            SlideElement::Shape(shape) => self.normalize_shape(shape),
            SlideElement::Table(table) => self.normalize_table(table, notes),
            SlideElement::Chart(chart) => normalize_chart(chart, self.siblings, notes),
            SlideElement::Image(image) => normalize_image(image),
        }
    }

    fn normalize_text(&self, text: &TextElement) -> PlacedElement {
        let mut props = text.props.clone();
        props.font_face = Some(self.font.to_string());
        props.set("lineSpacingMultiple", 1);
        if props.valign.is_none() {
            props.valign = Some("middle".to_string());
        }
        props.set("fit", "shrink");
        props.set("shrinkText", true);
        props.set("wrap", true);
        props.remove("lineSpacing");

        let runs = self.fit_content(text.content.as_ref(), &mut props);
        PlacedElement::Text { runs, props }
    }

    fn normalize_shape(&self, shape: &ShapeElement) -> ElementOutcome {
        let name = shape.shape_type.as_deref().unwrap_or_default();
        let shape_type = ShapeType::from_name(resolve_shape_alias(name)).ok_or_else(|| {
            Diagnostic::new(
                DiagnosticKind::InvalidShapeType,
                format!("invalid shape type \"{name}\""),
            )
        })?;

        let mut props = shape.props.clone();
        props.font_face = Some(self.font.to_string());
        props.set("lineSpacingMultiple", 1);
        props.set("wrap", true);
        props.valign = Some("middle".to_string());
        props.set("autoFit", true);
        props.set("fit", "shrink");

        let runs = match &shape.content {
            Some(content) => self.fit_content(Some(content), &mut props),
            None => {
                props.font_size = None;
                Vec::new()
            }
        };

        Ok(PlacedElement::Shape {
            shape_type,
            runs,
            props,
        })
    }

    /// Sizes text content into `props`' box. A plain string keeps an element-level font size;
    /// a run sequence gets per-run sizes.
    fn fit_content(&self, content: Option<&TextContent>, props: &mut ElementProps) -> Vec<TextRun> {
        match content {
            Some(content @ TextContent::Runs(_)) => {
                let (fitted, _) = fit_runs(&content.to_runs(), props, self.font);
                fitted
            }
            Some(TextContent::Plain(text)) => {
                let (size, _) = fit_plain_text(text, props);
                props.font_size = Some(size);
                vec![TextRun::plain(text.clone())]
            }
            None => {
                let (size, _) = fit_plain_text("", props);
                props.font_size = Some(size);
                vec![TextRun::plain("")]
            }
        }
    }

    fn normalize_table(&self, table: &TableElement, notes: &mut Vec<Diagnostic>) -> ElementOutcome {
        let missing = || {
            Diagnostic::new(
                DiagnosticKind::MissingTableRows,
                "table rows are missing, not a sequence or empty",
            )
        };
        let raw_rows = match &table.rows {
            Some(Value::Array(rows)) if !rows.is_empty() => rows,
            _ => return Err(missing()),
        };

        let mut rows = Vec::with_capacity(raw_rows.len());
        for (index, row) in raw_rows.iter().enumerate() {
            match row {
                Value::Array(cells) => rows.push(cells.clone()),
                _ => {
                    return Err(Diagnostic::new(
                        DiagnosticKind::MalformedElement,
                        format!("table row {index} is not a sequence of cells"),
                    ))
                }
            }
        }

        let width = rows.iter().map(Vec::len).max().unwrap_or_default();
        if width == 0 {
            return Err(missing());
        }
        if rows.iter().any(|r| r.len() != width) {
            for row in rows.iter_mut() {
                row.resize(width, Value::String(String::new()));
            }
            notes.push(Diagnostic::new(
                DiagnosticKind::TableRowsPadded,
                format!("ragged table rows padded to {width} cells"),
            ));
        }

        let mut props = table.props.clone();
        props.font_face = Some(self.font.to_string());
        props.set("autoPage", true);
        props.set("newSlideStartY", TABLE_CONTINUATION_START_Y);
        props.set("autoPageRepeatHeader", true);

        Ok(PlacedElement::Table { rows, props })
    }
}

fn normalize_image(image: &ImageElement) -> ElementOutcome {
    let path = match image.props.path.as_deref() {
        Some(path) if !path.trim().is_empty() => path,
        _ => {
            return Err(Diagnostic::new(
                DiagnosticKind::MissingImagePath,
                "image element has no path",
            ))
        }
    };
    if !Path::new(path).exists() {
        return Err(Diagnostic::new(
            DiagnosticKind::MissingImageFile,
            format!("image file not found: {path}"),
        ));
    }
    Ok(PlacedElement::Image {
        path: path.to_string(),
        props: image.props.clone(),
    })
}

/// Parses a raw payload into a typed element, rejecting unknown kinds and unusable geometry.
/// Numeric hints that cannot be read are dropped and noted in `notes`; the element is kept.
pub fn parse_element(
    payload: &Value,
    notes: &mut Vec<Diagnostic>,
) -> std::result::Result<SlideElement, Diagnostic> {
    let type_name = match raw_type(payload) {
        Some(name) => name,
        None => {
            return Err(Diagnostic::new(
                DiagnosticKind::MalformedElement,
                "element has no type tag",
            ))
        }
    };
    if ElementKind::from_name(type_name).is_none() {
        return Err(Diagnostic::new(
            DiagnosticKind::UnknownElementType,
            format!("unknown element type \"{type_name}\""),
        ));
    }

    let element: SlideElement = serde_json::from_value(payload.clone()).map_err(|e| {
        Diagnostic::new(
            DiagnosticKind::MalformedElement,
            format!("{type_name} element could not be read: {e}"),
        )
    })?;
    if !element.props().has_valid_geometry() {
        return Err(Diagnostic::new(
            DiagnosticKind::MalformedElement,
            format!("{type_name} element has negative or non-finite geometry"),
        ));
    }
    for (path, value) in unreadable_numeric_hints(payload) {
        notes.push(Diagnostic::new(
            DiagnosticKind::IgnoredHint,
            format!("{path} value {value} is not a number, ignored"),
        ));
    }
    Ok(element)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    const FONT: &str = "Yu Mincho";

    fn normalize(payload: Value) -> (ElementOutcome, Vec<Diagnostic>) {
        let siblings = vec![payload.clone()];
        let mut notes = Vec::new();
        let outcome = ElementNormalizer::new(FONT, &siblings).normalize(&payload, &mut notes);
        (outcome, notes)
    }

    #[test]
    fn test_plain_text_becomes_single_run() {
        let (outcome, _) = normalize(json!({
            "type": "text",
            "content": "Hello",
            "props": {"x": 1, "y": 1, "w": 4, "h": 1, "fontSize": 18, "lineSpacing": 24}
        }));
        match outcome.unwrap() {
            PlacedElement::Text { runs, props } => {
                assert_eq!(runs, vec![TextRun::plain("Hello")]);
                assert_eq!(props.font_size, Some(18.0));
                assert_eq!(props.font_face.as_deref(), Some(FONT));
                assert_eq!(props.valign.as_deref(), Some("middle"));
                assert_eq!(props.get_str("fit"), Some("shrink"));
                assert_eq!(props.get("shrinkText"), Some(&json!(true)));
                assert_eq!(props.get("wrap"), Some(&json!(true)));
                assert_eq!(props.get("lineSpacingMultiple"), Some(&json!(1)));
                assert!(props.get("lineSpacing").is_none());
            }
            other => panic!("expected text, got {:?}", other),
        }
    }

    #[test]
    fn test_text_keeps_authored_valign() {
        let (outcome, _) = normalize(json!({
            "type": "text",
            "content": ["a", {"text": "b", "options": {"bold": true}}],
            "props": {"x": 0, "y": 0, "w": 4, "h": 1, "valign": "top"}
        }));
        match outcome.unwrap() {
            PlacedElement::Text { runs, props } => {
                assert_eq!(props.valign.as_deref(), Some("top"));
                assert_eq!(runs.len(), 2);
                assert_eq!(runs[0].options.font_size, Some(14.0));
                assert_eq!(runs[1].options.font_face.as_deref(), Some(FONT));
                assert_eq!(runs[1].options.extra.get("bold"), Some(&json!(true)));
            }
            other => panic!("expected text, got {:?}", other),
        }
    }

    #[test]
    fn test_input_payload_is_not_mutated() {
        let payload = json!({
            "type": "text", "content": "x",
            "props": {"x": 0, "y": 0, "w": 1, "h": 1, "lineSpacing": 20}
        });
        let before = payload.clone();
        let _ = ElementNormalizer::new(FONT, &[]).normalize(&payload, &mut Vec::new());
        assert_eq!(payload, before);
    }

    #[test]
    fn test_shape_aliases_and_props() {
        let (outcome, _) = normalize(json!({
            "type": "shape", "shapeType": "oval",
            "props": {"x": 1, "y": 1, "w": 1, "h": 1, "fontSize": 30, "valign": "top"}
        }));
        match outcome.unwrap() {
            PlacedElement::Shape {
                shape_type,
                runs,
                props,
            } => {
                assert_eq!(shape_type, ShapeType::Ellipse);
                assert!(runs.is_empty());
                assert_eq!(props.font_size, None);
                assert_eq!(props.valign.as_deref(), Some("middle"));
                assert_eq!(props.get("autoFit"), Some(&json!(true)));
            }
            other => panic!("expected shape, got {:?}", other),
        }

        let (outcome, _) = normalize(json!({
            "type": "shape", "shapeType": "doughnut",
            "props": {"x": 1, "y": 1, "w": 1, "h": 1}
        }));
        assert!(matches!(
            outcome,
            Ok(PlacedElement::Shape { shape_type: ShapeType::Donut, .. })
        ));
    }

    #[test]
    fn test_shape_caption_is_fitted() {
        let (outcome, _) = normalize(json!({
            "type": "shape", "shapeType": "roundRect", "content": "Step 1",
            "props": {"x": 1, "y": 1, "w": 2, "h": 0.5, "fontSize": 40}
        }));
        match outcome.unwrap() {
            PlacedElement::Shape { runs, props, .. } => {
                assert_eq!(runs[0].text, "Step 1");
                // one 144pt line at 40pt needs 60pt of a 36pt box: 40 * 0.6 * 0.88 -> 21
                assert_eq!(props.font_size, Some(21.0));
            }
            other => panic!("expected shape, got {:?}", other),
        }
    }

    #[test]
    fn test_invalid_shape_type_rejected() {
        for shape_type in [json!("hexagonal"), json!(null)] {
            let (outcome, _) = normalize(json!({
                "type": "shape", "shapeType": shape_type,
                "props": {"x": 1, "y": 1, "w": 1, "h": 1}
            }));
            assert_eq!(outcome.unwrap_err().kind, DiagnosticKind::InvalidShapeType);
        }
    }

    #[test]
    fn test_table_validation_and_defaults() {
        for rows in [json!([]), json!(null), json!("a,b"), json!([[]])] {
            let (outcome, _) = normalize(json!({
                "type": "table", "rows": rows,
                "props": {"x": 0, "y": 1, "w": 5, "h": 2}
            }));
            assert_eq!(outcome.unwrap_err().kind, DiagnosticKind::MissingTableRows);
        }

        let (outcome, notes) = normalize(json!({
            "type": "table",
            "rows": [["Name", "Value"], ["A"]],
            "props": {"x": 0, "y": 1, "w": 5, "h": 2}
        }));
        match outcome.unwrap() {
            PlacedElement::Table { rows, props } => {
                assert_eq!(rows[1], vec![json!("A"), json!("")]);
                assert_eq!(props.get("autoPage"), Some(&json!(true)));
                assert_eq!(props.get("newSlideStartY"), Some(&json!(0.65)));
                assert_eq!(props.get("autoPageRepeatHeader"), Some(&json!(true)));
                assert_eq!(props.font_face.as_deref(), Some(FONT));
            }
            other => panic!("expected table, got {:?}", other),
        }
        assert_eq!(notes[0].kind, DiagnosticKind::TableRowsPadded);
    }

    #[test]
    fn test_table_row_must_be_sequence() {
        let (outcome, _) = normalize(json!({
            "type": "table", "rows": [["a"], "b"],
            "props": {"x": 0, "y": 1, "w": 5, "h": 2}
        }));
        assert_eq!(outcome.unwrap_err().kind, DiagnosticKind::MalformedElement);
    }

    #[test]
    fn test_image_checks() {
        let (outcome, _) = normalize(json!({
            "type": "image", "props": {"x": 0, "y": 0, "w": 1, "h": 1}
        }));
        assert_eq!(outcome.unwrap_err().kind, DiagnosticKind::MissingImagePath);

        let (outcome, _) = normalize(json!({
            "type": "image",
            "props": {"x": 0, "y": 0, "w": 1, "h": 1, "path": "/definitely/not/here.png"}
        }));
        assert_eq!(outcome.unwrap_err().kind, DiagnosticKind::MissingImageFile);

        let file = tempfile::NamedTempFile::new().unwrap();
        let path = file.path().to_string_lossy().to_string();
        let (outcome, _) = normalize(json!({
            "type": "image", "props": {"x": 0, "y": 0, "w": 1, "h": 1, "path": path}
        }));
        match outcome.unwrap() {
            PlacedElement::Image { path: placed, .. } => assert_eq!(placed, path),
            other => panic!("expected image, got {:?}", other),
        }
    }

    #[test]
    fn test_unknown_and_malformed_payloads() {
        let (outcome, _) = normalize(json!({
            "type": "subsidiaryCard", "props": {"x": 0, "y": 0, "w": 1, "h": 1}
        }));
        assert_eq!(outcome.unwrap_err().kind, DiagnosticKind::UnknownElementType);

        for payload in [
            json!({"content": "no type"}),
            json!("just a string"),
            json!({"type": "text", "content": "no props"}),
            json!({"type": "text", "content": "x", "props": {"x": 0, "y": -1, "w": 1, "h": 1}}),
            json!({"type": "text", "content": 12, "props": {"x": 0, "y": 0, "w": 1, "h": 1}}),
        ] {
            let (outcome, _) = normalize(payload);
            assert_eq!(outcome.unwrap_err().kind, DiagnosticKind::MalformedElement);
        }
    }
    #[test]
    fn test_loose_run_options_and_string_font_size() {
        let (outcome, notes) = normalize(json!({
            "type": "text",
            "content": [{"text": "Hello", "options": null}, " there"],
            "props": {"x": 1, "y": 1, "w": 4, "h": 1, "fontSize": "18"}
        }));
        assert!(notes.is_empty());
        match outcome.unwrap() {
            PlacedElement::Text { runs, .. } => {
                assert_eq!(runs.len(), 2);
                assert_eq!(runs[0].text, "Hello");
                assert_eq!(runs[0].options.font_size, Some(18.0));
                assert_eq!(runs[0].options.font_face.as_deref(), Some(FONT));
            }
            other => panic!("expected text, got {:?}", other),
        }
    }

    #[test]
    fn test_unreadable_hint_is_dropped_not_the_element() {
        let (outcome, notes) = normalize(json!({
            "type": "text",
            "content": "Hello",
            "props": {"x": 1, "y": 1, "w": 4, "h": 1, "fontSize": "large"}
        }));
        match outcome.unwrap() {
            PlacedElement::Text { props, .. } => assert_eq!(props.font_size, Some(14.0)),
            other => panic!("expected text, got {:?}", other),
        }
        assert_eq!(notes.len(), 1);
        assert_eq!(notes[0].kind, DiagnosticKind::IgnoredHint);
        assert!(notes[0].message.starts_with("props.fontSize"));
    }
}
