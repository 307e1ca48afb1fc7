use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::models::chart::{ChartKind, ChartSeries};
use crate::models::common::ElementProps;
use crate::models::deck::LayoutConfig;
use crate::models::shape::ShapeType;
use crate::models::text::TextRun;

/// The two master layouts a deck uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MasterKind {
    /// Background for the entry (title) slide.
    #[serde(rename = "ENTRY_SLIDE")]
    Entry,
    /// Background for every content slide.
    #[serde(rename = "MASTER_SLIDE")]
    Content,
}

impl MasterKind {
    pub fn name(&self) -> &'static str {
        match self {
            MasterKind::Entry => "ENTRY_SLIDE",
            MasterKind::Content => "MASTER_SLIDE",
        }
    }
}

/// A named background template.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SlideMaster {
    pub kind: MasterKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub background_path: Option<String>,
}

/// An element after normalization and fitting, ready to be written by a presentation writer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum PlacedElement {
    #[serde(rename_all = "camelCase")]
    Text { runs: Vec<TextRun>, props: ElementProps },
    #[serde(rename_all = "camelCase")]
    Shape {
        shape_type: ShapeType,
        #[serde(default, skip_serializing_if = "Vec::is_empty")]
        runs: Vec<TextRun>,
        props: ElementProps,
    },
    #[serde(rename_all = "camelCase")]
    Table { rows: Vec<Vec<Value>>, props: ElementProps },
    #[serde(rename_all = "camelCase")]
    Chart {
        kind: ChartKind,
        series: Vec<ChartSeries>,
        props: ElementProps,
    },
    #[serde(rename_all = "camelCase")]
    Image { path: String, props: ElementProps },
}

impl PlacedElement {
    pub fn props(&self) -> &ElementProps {
        match self {
            PlacedElement::Text { props, .. }
            | PlacedElement::Shape { props, .. }
            | PlacedElement::Table { props, .. }
            | PlacedElement::Chart { props, .. }
            | PlacedElement::Image { props, .. } => props,
        }
    }

    /// Short name of the element kind, for logs and outlines.
    pub fn kind_name(&self) -> &'static str {
        match self {
            PlacedElement::Text { .. } => "text",
            PlacedElement::Shape { .. } => "shape",
            PlacedElement::Table { .. } => "table",
            PlacedElement::Chart { .. } => "chart",
            PlacedElement::Image { .. } => "image",
        }
    }
}

/// One assembled slide.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Slide {
    /// The slide key this slide was built from.
    pub key: String,
    pub master: MasterKind,
    pub title: String,
    /// Elements in placement order. The title box, when present, comes first.
    pub elements: Vec<PlacedElement>,
}

/// The assembled document: the in-memory form handed to a presentation writer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Presentation {
    pub layout: LayoutConfig,
    /// Font face applied to every text run.
    pub font: String,
    pub masters: Vec<SlideMaster>,
    pub slides: Vec<Slide>,
}

impl Presentation {
    /// Creates an empty document with both masters defined.
    pub fn new(
        layout: LayoutConfig,
        font: impl Into<String>,
        entry_background: Option<String>,
        content_background: Option<String>,
    ) -> Self {
        Self {
            layout,
            font: font.into(),
            masters: vec![
                SlideMaster {
                    kind: MasterKind::Content,
                    background_path: content_background,
                },
                SlideMaster {
                    kind: MasterKind::Entry,
                    background_path: entry_background,
                },
            ],
            slides: Vec::new(),
        }
    }

    pub fn master(&self, kind: MasterKind) -> Option<&SlideMaster> {
        self.masters.iter().find(|m| m.kind == kind)
    }

    pub fn slide(&self, key: &str) -> Option<&Slide> {
        self.slides.iter().find(|s| s.key == key)
    }
}
