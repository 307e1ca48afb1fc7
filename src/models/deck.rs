use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::path::Path;

use crate::diagnostics::{Diagnostic, DiagnosticKind};
use crate::errors::{DeckError, Result};

/// Key of the entry (title) slide.
pub const ENTRY_SLIDE_KEY: &str = "0";

/// Page geometry of the deck, in inches.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LayoutConfig {
    pub name: String,
    pub width: f64,
    pub height: f64,
}

impl Default for LayoutConfig {
    /// The 16:9 canvas content is authored against.
    fn default() -> Self {
        Self {
            name: "CUSTOM_LAYOUT".to_string(),
            width: 13.33,
            height: 7.5,
        }
    }
}

/// Content of one slide as authored.
///
/// Elements are kept as raw JSON payloads: they are LLM-authored and validated one by one by
/// the element normalizer, so one unreadable element cannot make the whole slide unreadable.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SlideData {
    #[serde(default)]
    pub slide_title: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub elements: Vec<Value>,
}

fn null_as_empty<'de, D>(deserializer: D) -> std::result::Result<Vec<Value>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    Ok(Option::<Vec<Value>>::deserialize(deserializer)?.unwrap_or_default())
}

impl SlideData {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            slide_title: title.into(),
            elements: Vec::new(),
        }
    }

    /// Appends an element payload.
    pub fn with_element(mut self, element: Value) -> Self {
        self.elements.push(element);
        self
    }
}

/// Everything needed to assemble a deck: page layout, deck font and the slide map.
///
/// Slide keys are numeric strings; assembly order is by numeric value, never by map order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DeckConfig {
    pub layout: LayoutConfig,
    #[serde(default)]
    pub font: String,
    #[serde(default)]
    pub slides: IndexMap<String, SlideData>,
}

/// Parses a slide key as its numeric position.
pub fn parse_slide_key(key: &str) -> Option<u32> {
    key.trim().parse::<u32>().ok()
}

impl DeckConfig {
    pub fn new(layout: LayoutConfig, font: impl Into<String>) -> Self {
        Self {
            layout,
            font: font.into(),
            slides: IndexMap::new(),
        }
    }

    pub fn with_slide(mut self, key: impl Into<String>, slide: SlideData) -> Self {
        self.slides.insert(key.into(), slide);
        self
    }

    /// Slide keys with their numeric positions, ascending by position.
    /// Keys that are not numeric are left out.
    pub fn ordered_keys(&self) -> Vec<(u32, &str)> {
        let mut keys: Vec<(u32, &str)> = self
            .slides
            .keys()
            .filter_map(|k| parse_slide_key(k).map(|n| (n, k.as_str())))
            .collect();
        keys.sort_by_key(|(n, _)| *n);
        keys
    }

    /// Strict parse of a configuration from a JSON string.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Reads a configuration file and parses it leniently (see [`DeckConfig::from_value_lenient`]).
    pub fn load_lenient(path: impl AsRef<Path>) -> Result<(Self, Vec<Diagnostic>)> {
        let json = std::fs::read_to_string(path)?;
        let value: Value = serde_json::from_str(&json)?;
        Self::from_value_lenient(value)
    }

    /// Sets the deck font to the one mapped for the content language.
    pub fn with_language_font(mut self, mapping: &FontMapping, language: &str) -> Self {
        self.font = mapping.font_for(language).to_string();
        self
    }

    /// Tolerant parse of a configuration as produced by the content pipeline.
    ///
    /// Accepts the layout either at the top level or nested as `slideConfig.layout`. A slide whose
    /// payload cannot be read is dropped and reported as [`DiagnosticKind::MalformedSlide`].
    /// A missing or unreadable layout, or a `slides` value that is not a map, is terminal.
    pub fn from_value_lenient(value: Value) -> Result<(Self, Vec<Diagnostic>)> {
        let Value::Object(mut root) = value else {
            return Err(DeckError::invalid_config("deck configuration must be an object"));
        };

        let layout_value = match root.remove("layout") {
            Some(layout) => layout,
            None => root
                .get_mut("slideConfig")
                .and_then(|c| c.as_object_mut())
                .and_then(|c| c.remove("layout"))
                .ok_or_else(|| DeckError::invalid_config("missing layout"))?,
        };
        let layout: LayoutConfig = serde_json::from_value(layout_value)
            .map_err(|e| DeckError::invalid_config(format!("unreadable layout: {e}")))?;

        let font = match root.remove("font") {
            Some(Value::String(font)) => font,
            _ => String::new(),
        };

        let slides_value = root.remove("slides").unwrap_or(Value::Object(Default::default()));
        let Value::Object(slide_map) = slides_value else {
            return Err(DeckError::invalid_config("slides must be a map of slide key to slide"));
        };

        let mut diagnostics = Vec::new();
        let mut slides = IndexMap::with_capacity(slide_map.len());
        for (key, payload) in slide_map {
            match serde_json::from_value::<SlideData>(payload.clone()) {
                Ok(slide) => {
                    slides.insert(key, slide);
                }
                Err(e) => diagnostics.push(
                    Diagnostic::new(
                        DiagnosticKind::MalformedSlide,
                        format!("slide payload could not be read: {e}"),
                    )
                    .on_slide(key)
                    .with_payload(payload),
                ),
            }
        }

        Ok((
            Self {
                layout,
                font,
                slides,
            },
            diagnostics,
        ))
    }
}

/// Language → font family table used to pick the deck font.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FontMapping {
    fonts: IndexMap<String, String>,
    default_font: String,
}

impl Default for FontMapping {
    fn default() -> Self {
        let mut fonts = IndexMap::new();
        fonts.insert("Vietnamese".to_string(), "Times New Roman".to_string());
        fonts.insert("Japanese".to_string(), "Yu Mincho".to_string());
        fonts.insert("English".to_string(), "Helvetica Neue".to_string());
        Self {
            fonts,
            default_font: "Helvetica Neue".to_string(),
        }
    }
}

impl FontMapping {
    /// An empty mapping that always answers `default_font`.
    pub fn with_default(default_font: impl Into<String>) -> Self {
        Self {
            fonts: IndexMap::new(),
            default_font: default_font.into(),
        }
    }

    pub fn insert(mut self, language: impl Into<String>, font: impl Into<String>) -> Self {
        self.fonts.insert(language.into(), font.into());
        self
    }

    /// Font for a language, falling back to the default for unmapped languages.
    pub fn font_for(&self, language: &str) -> &str {
        self.fonts
            .get(language)
            .map(String::as_str)
            .unwrap_or(&self.default_font)
    }
}
