pub mod converters;
pub mod diagnostics;
pub mod errors;
pub mod models;

pub use converters::deck::{
    build_deck, build_single_slide, AssemblyOptions, AssemblyReport, DeckBuilder, TitleBox,
};
pub use converters::markdown;
pub use converters::svg::{render_presentation_to_svg, render_slide_to_svg};
pub use diagnostics::{Diagnostic, DiagnosticKind, Diagnostics};
pub use errors::{DeckError, Result};
pub use models::deck::{DeckConfig, FontMapping, LayoutConfig, SlideData};
pub use models::presentation::Presentation;

// features
#[cfg(feature = "diff")]
pub mod diff;
#[cfg(feature = "diff")]
pub use diff::comparer::DeckComparerBuilder;

use serde_json::Value;
use wasm_bindgen::prelude::*;

/// Sets up panic messages and `log` output for the browser console.
#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn init() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();

    console_log::init_with_level(log::Level::Info).ok();
}

fn to_js_error(error: DeckError) -> JsValue {
    JsValue::from_str(&error.to_string())
}

fn parse_config(config_json: &str) -> std::result::Result<Value, JsValue> {
    serde_json::from_str(config_json).map_err(|e| to_js_error(e.into()))
}

/// Builds the whole deck and returns the assembly report (document and diagnostics) as JSON.
#[wasm_bindgen(js_name = buildDeck)]
pub fn build_deck_json(config_json: &str) -> std::result::Result<String, JsValue> {
    let config = parse_config(config_json)?;
    DeckBuilder::default()
        .build_value(config)
        .and_then(|report| report.to_json())
        .map_err(to_js_error)
}

/// Builds the slide stored under `key` and returns its assembly report as JSON.
#[wasm_bindgen(js_name = buildSlide)]
pub fn build_slide_json(config_json: &str, key: &str) -> std::result::Result<String, JsValue> {
    let config = parse_config(config_json)?;
    DeckBuilder::default()
        .build_slide_value(config, key)
        .and_then(|report| report.to_json())
        .map_err(to_js_error)
}

/// Builds the slide stored under `key` and returns its SVG preview.
#[wasm_bindgen(js_name = previewSlide)]
pub fn preview_slide_svg(config_json: &str, key: &str) -> std::result::Result<String, JsValue> {
    let config = parse_config(config_json)?;
    DeckBuilder::default()
        .build_slide_value(config, key)
        .and_then(|report| Ok(render_slide_to_svg(&report.presentation, key)?))
        .map_err(to_js_error)
}

#[cfg(test)]
mod tests {
    use super::*;

    const CONFIG: &str = r#"{
        "slideConfig": {"layout": {"name": "CUSTOM_LAYOUT", "width": 13.33, "height": 7.5}},
        "font": "Yu Mincho",
        "slides": {
            "0": {"slide_title": "Cover", "elements": []},
            "1": {"slide_title": "Agenda", "elements": [
                {"type": "text", "content": "Goals", "props": {"x": 1, "y": 1, "w": 4, "h": 1}}
            ]}
        }
    }"#;

    #[test]
    fn test_build_deck_json() {
        let json: Value = serde_json::from_str(&build_deck_json(CONFIG).unwrap()).unwrap();
        assert_eq!(json["presentation"]["slides"].as_array().unwrap().len(), 2);
        assert_eq!(json["presentation"]["font"], "Yu Mincho");
        assert_eq!(json["diagnostics"].as_array().unwrap().len(), 0);
    }

    #[test]
    fn test_build_slide_json_and_preview() {
        let json: Value = serde_json::from_str(&build_slide_json(CONFIG, "1").unwrap()).unwrap();
        assert_eq!(json["presentation"]["slides"][0]["key"], "1");

        let svg = preview_slide_svg(CONFIG, "1").unwrap();
        assert!(svg.contains("Goals"));
    }
}
