// src/models/text.rs

use indexmap::IndexMap;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::models::common::deserialize_hint;

/// Inline formatting of one run. Only the font fields are interpreted by the engine; the rest
/// (`bold`, `color`, `bullet`, `breakLine`, ...) are carried through untouched.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TextOptions {
    #[serde(
        default,
        deserialize_with = "deserialize_hint",
        skip_serializing_if = "Option::is_none"
    )]
    pub font_size: Option<f64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub font_face: Option<String>,

    #[serde(flatten)]
    pub extra: IndexMap<String, Value>,
}

/// A formatted span of text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextRun {
    pub text: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub options: TextOptions,
}

fn null_as_default<'de, D>(deserializer: D) -> Result<TextOptions, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<TextOptions>::deserialize(deserializer)?.unwrap_or_default())
}

impl TextRun {
    /// Create a run with no formatting
    pub fn plain(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            options: TextOptions::default(),
        }
    }

    /// Create a run with an explicit font size
    pub fn sized(text: impl Into<String>, font_size: f64) -> Self {
        Self {
            text: text.into(),
            options: TextOptions {
                font_size: Some(font_size),
                ..TextOptions::default()
            },
        }
    }
}

/// One entry of a run sequence as authored: either a bare string or a `{text, options}` object.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RunItem {
    Plain(String),
    Run(TextRun),
}

/// Text content of a text or shape element as authored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TextContent {
    /// A single unformatted string.
    Plain(String),
    /// Ordered formatted spans.
    Runs(Vec<RunItem>),
}

impl TextContent {
    /// Lifts the content into a run sequence. A plain string becomes a single run with empty
    /// options; bare strings inside a sequence are lifted the same way.
    pub fn to_runs(&self) -> Vec<TextRun> {
        match self {
            TextContent::Plain(text) => vec![TextRun::plain(text.clone())],
            TextContent::Runs(items) => items
                .iter()
                .map(|item| match item {
                    RunItem::Plain(text) => TextRun::plain(text.clone()),
                    RunItem::Run(run) => run.clone(),
                })
                .collect(),
        }
    }

    /// Concatenated text of every run, in order.
    pub fn as_plain_text(&self) -> String {
        match self {
            TextContent::Plain(text) => text.clone(),
            TextContent::Runs(items) => items
                .iter()
                .map(|item| match item {
                    RunItem::Plain(text) => text.as_str(),
                    RunItem::Run(run) => run.text.as_str(),
                })
                .collect(),
        }
    }
}

/// Concatenated text of a run sequence.
pub fn runs_plain_text(runs: &[TextRun]) -> String {
    runs.iter().map(|r| r.text.as_str()).collect()
}
