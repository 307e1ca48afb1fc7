//! Caller-controlled configuration of an assembly pass.

use serde::{Deserialize, Serialize};

use super::constants::*;

/// Placement and styling of a slide title box.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TitleBox {
    pub x: f64,
    pub y: f64,
    pub w: f64,
    pub h: f64,
    pub font_size: f64,
}

/// Options shared by full-deck and single-slide builds.
///
/// Defaults reproduce the production deck look: the two master backgrounds, the brand title
/// color and the fixed title boxes for entry and content slides.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssemblyOptions {
    pub entry_background: Option<String>,
    pub content_background: Option<String>,
    /// Hex color (no `#`) of slide titles.
    pub title_color: String,
    /// Font used when the deck configuration does not name one.
    pub fallback_font: String,
    pub entry_title: TitleBox,
    pub content_title: TitleBox,
}

impl Default for AssemblyOptions {
    fn default() -> Self {
        Self {
            entry_background: Some(DEFAULT_ENTRY_BACKGROUND.to_string()),
            content_background: Some(DEFAULT_CONTENT_BACKGROUND.to_string()),
            title_color: DEFAULT_TITLE_COLOR.to_string(),
            fallback_font: DEFAULT_FONT_FAMILY.to_string(),
            entry_title: TitleBox {
                x: 0.75,
                y: 0.75,
                w: 9.5,
                h: 3.75,
                font_size: 40.0,
            },
            content_title: TitleBox {
                x: 0.18,
                y: 0.15,
                w: 11.77,
                h: 0.62,
                font_size: 20.0,
            },
        }
    }
}

impl AssemblyOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn entry_background(mut self, path: Option<String>) -> Self {
        self.entry_background = path;
        self
    }

    pub fn content_background(mut self, path: Option<String>) -> Self {
        self.content_background = path;
        self
    }

    pub fn title_color(mut self, color: impl Into<String>) -> Self {
        self.title_color = color.into();
        self
    }

    pub fn fallback_font(mut self, font: impl Into<String>) -> Self {
        self.fallback_font = font.into();
        self
    }

    pub fn entry_title(mut self, title: TitleBox) -> Self {
        self.entry_title = title;
        self
    }

    pub fn content_title(mut self, title: TitleBox) -> Self {
        self.content_title = title;
        self
    }

    /// The deck font: the configured one unless blank.
    pub(crate) fn resolve_font<'a>(&'a self, configured: &'a str) -> &'a str {
        if configured.trim().is_empty() {
            &self.fallback_font
        } else {
            configured
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_setters() {
        let options = AssemblyOptions::new()
            .entry_background(None)
            .title_color("222222")
            .fallback_font("Arial");
        assert!(options.entry_background.is_none());
        assert_eq!(options.title_color, "222222");
        assert_eq!(options.resolve_font(" "), "Arial");
        assert_eq!(options.resolve_font("Yu Mincho"), "Yu Mincho");
    }
}
