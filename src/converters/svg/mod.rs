//! Renders assembled decks as Scalable Vector Graphics (SVG) previews.
//!
//! The preview is a proofreading aid, not a faithful slide renderer. It shows where each element
//! landed and roughly how fitted text wraps.
//!
//! # Current Features & Limitations:
//! *   One SVG document per slide, sized to the deck layout.
//! *   Master background images, drawn full-bleed.
//! *   Text and shape captions with font, size, color, bold/italic/underline and alignment.
//!     Wrapping uses the same width estimate as the text fitter, not real font metrics.
//! *   Common shape outlines (rect, roundRect, ellipse, line and simple polygons); other shape
//!     types are drawn as their bounding box.
//! *   Tables via HTML `foreignObject`.
//! *   Charts as sketches: columns for bar kinds, slices for pie kinds, polylines otherwise.
//!     No axes, labels or legends.

mod constants;
mod elements;
mod error;
mod structure;
mod text;
mod utils;

pub use error::{Result, SvgConversionError};

use crate::models::presentation::Presentation;
use log::{error, warn};
use structure::convert_slide_to_svg;

/// Converts an assembled `Presentation` into a vector of SVG strings, one per slide, in deck
/// order.
///
/// # Returns
/// The SVG content for each slide, or the first `SvgConversionError` encountered. A failing slide
/// halts the conversion.
pub fn render_presentation_to_svg(presentation: &Presentation) -> Result<Vec<String>> {
    if presentation.slides.is_empty() {
        warn!("Presentation has no slides to convert.");
    }

    let mut svg_slides = Vec::with_capacity(presentation.slides.len());
    for (index, slide) in presentation.slides.iter().enumerate() {
        match convert_slide_to_svg(slide, presentation) {
            Ok(svg_content) => svg_slides.push(svg_content),
            Err(e) => {
                error!(
                    "Error converting slide {} (key: {}): {}",
                    index + 1,
                    slide.key,
                    e
                );
                return Err(SvgConversionError::Internal(format!(
                    "Failed to convert slide {} (key: {}): {}",
                    index + 1,
                    slide.key,
                    e
                )));
            }
        }
    }
    Ok(svg_slides)
}

/// Renders the slide built from `key`.
pub fn render_slide_to_svg(presentation: &Presentation, key: &str) -> Result<String> {
    let slide = presentation
        .slide(key)
        .ok_or_else(|| SvgConversionError::MissingData(format!("No slide with key {}", key)))?;
    convert_slide_to_svg(slide, presentation)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::converters::deck::{build_deck, AssemblyOptions};
    use crate::models::deck::{DeckConfig, LayoutConfig, SlideData};
    use serde_json::json;

    fn sample_deck() -> Presentation {
        let config = DeckConfig::new(LayoutConfig::default(), "Arial")
            .with_slide("0", SlideData::new("Kickoff"))
            .with_slide(
                "1",
                SlideData::new("Plan")
                    .with_element(json!({
                        "type": "shape",
                        "shapeType": "roundRect",
                        "content": "Phase 1",
                        "props": {"x": 1, "y": 1, "w": 3, "h": 1, "fill": {"color": "E6F4FB"}}
                    }))
                    .with_element(json!({
                        "type": "chart",
                        "chartType": "pie",
                        "data": [{"values": [3, 1]}],
                        "props": {"x": 5, "y": 1, "w": 4, "h": 4}
                    })),
            );
        let options = AssemblyOptions::new().entry_background(Some("entry.jpg".to_string()));
        build_deck(&config, &options).unwrap().presentation
    }

    #[test]
    fn test_one_svg_per_slide() {
        let presentation = sample_deck();
        let svgs = render_presentation_to_svg(&presentation).unwrap();
        assert_eq!(svgs.len(), 2);

        let entry = &svgs[0];
        assert!(entry.starts_with("<svg "));
        assert!(entry.contains(r#"width="959.76pt" height="540pt""#));
        assert!(entry.contains(r#"xlink:href="entry.jpg""#));
        assert!(entry.contains("Kickoff"));
        assert!(entry.trim_end().ends_with("</svg>"));

        let content = &svgs[1];
        assert!(content.contains(r#"data-master="MASTER_SLIDE""#));
        assert!(!content.contains("entry.jpg"));
        assert!(content.contains("rx="));
        assert!(content.contains("fill:#e6f4fb"));
        assert!(content.contains("Phase 1"));
        assert_eq!(content.matches("<path").count(), 2);
    }

    #[test]
    fn test_render_single_slide() {
        let presentation = sample_deck();
        let svg = render_slide_to_svg(&presentation, "1").unwrap();
        assert!(svg.contains(r#"data-slide="1""#));
        assert!(matches!(
            render_slide_to_svg(&presentation, "7"),
            Err(SvgConversionError::MissingData(_))
        ));
    }

    #[test]
    fn test_invalid_layout_is_an_error() {
        let mut presentation = sample_deck();
        presentation.layout.width = 0.0;
        assert!(render_presentation_to_svg(&presentation).is_err());
    }
}
