// src/models/elements.rs

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::models::common::ElementProps;
use crate::models::text::TextContent;

/// A shape element as authored. `shape_type` is still a raw name at this stage; aliases and
/// vocabulary membership are resolved by the normalizer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShapeElement {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub shape_type: Option<String>,
    /// Optional caption drawn inside the shape.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<TextContent>,
    pub props: ElementProps,
}

/// A free-standing text box.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TextElement {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<TextContent>,
    pub props: ElementProps,
}

/// A table. `rows` is kept untyped until validated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TableElement {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rows: Option<Value>,
    pub props: ElementProps,
}

/// A chart. `chart_type` is a logical name and `data` an untyped series list until normalized.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartElement {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub chart_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
    pub props: ElementProps,
}

/// An image; the source lives in `props.path`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageElement {
    pub props: ElementProps,
}

/// A visual element of a slide as authored, tagged by its `type` field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum SlideElement {
    Shape(ShapeElement),
    Text(TextElement),
    Table(TableElement),
    Chart(ChartElement),
    Image(ImageElement),
}

/// The element kinds the engine knows how to place.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ElementKind {
    Shape,
    Text,
    Table,
    Chart,
    Image,
}

impl ElementKind {
    pub fn from_name(name: &str) -> Option<ElementKind> {
        match name {
            "shape" => Some(ElementKind::Shape),
            "text" => Some(ElementKind::Text),
            "table" => Some(ElementKind::Table),
            "chart" => Some(ElementKind::Chart),
            "image" => Some(ElementKind::Image),
            _ => None,
        }
    }
}

impl SlideElement {
    pub fn kind(&self) -> ElementKind {
        match self {
            SlideElement::Shape(_) => ElementKind::Shape,
            SlideElement::Text(_) => ElementKind::Text,
            SlideElement::Table(_) => ElementKind::Table,
            SlideElement::Chart(_) => ElementKind::Chart,
            SlideElement::Image(_) => ElementKind::Image,
        }
    }

    pub fn props(&self) -> &ElementProps {
        match self {
            SlideElement::Shape(e) => &e.props,
            SlideElement::Text(e) => &e.props,
            SlideElement::Table(e) => &e.props,
            SlideElement::Chart(e) => &e.props,
            SlideElement::Image(e) => &e.props,
        }
    }

    pub fn props_mut(&mut self) -> &mut ElementProps {
        match self {
            SlideElement::Shape(e) => &mut e.props,
            SlideElement::Text(e) => &mut e.props,
            SlideElement::Table(e) => &mut e.props,
            SlideElement::Chart(e) => &mut e.props,
            SlideElement::Image(e) => &mut e.props,
        }
    }

    /// Text content, for the kinds that carry any.
    pub fn content(&self) -> Option<&TextContent> {
        match self {
            SlideElement::Shape(e) => e.content.as_ref(),
            SlideElement::Text(e) => e.content.as_ref(),
            _ => None,
        }
    }

    /// Concatenated text of the element's content; empty for kinds without content.
    pub fn plain_text(&self) -> String {
        self.content()
            .map(TextContent::as_plain_text)
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_tagged_deserialization() {
        let element: SlideElement = serde_json::from_value(json!({
            "type": "shape",
            "shapeType": "roundRect",
            "props": {"x": 0.5, "y": 1, "w": 2, "h": 1, "fill": {"color": "E6F4FB"}}
        }))
        .unwrap();

        assert_eq!(element.kind(), ElementKind::Shape);
        match &element {
            SlideElement::Shape(shape) => {
                assert_eq!(shape.shape_type.as_deref(), Some("roundRect"))
            }
            other => panic!("expected shape, got {:?}", other),
        }
        assert_eq!(element.props().w, 2.0);
    }

    #[test]
    fn test_plain_text_of_runs() {
        let element: SlideElement = serde_json::from_value(json!({
            "type": "text",
            "content": [{"text": "Q3 "}, "Results"],
            "props": {"x": 0, "y": 0.2, "w": 10, "h": 0.6}
        }))
        .unwrap();
        assert_eq!(element.plain_text(), "Q3 Results");
    }

    #[test]
    fn test_round_trip_keeps_tag() {
        let element = SlideElement::Image(ImageElement {
            props: ElementProps::at(1.0, 1.0, 2.0, 2.0),
        });
        let value = serde_json::to_value(&element).unwrap();
        assert_eq!(value["type"], "image");
    }

    #[test]
    fn test_element_kind_names() {
        assert_eq!(ElementKind::from_name("chart"), Some(ElementKind::Chart));
        assert_eq!(ElementKind::from_name("subsidiaryCard"), None);
    }
}
