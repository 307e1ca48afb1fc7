//! Assembles an authored [`DeckConfig`] into a [`Presentation`] document.
//!
//! The pipeline per slide is: master selection, title box, title deduplication, then every
//! element through the normalizer (text fit for text and shapes, chart normalization for charts).
//! Element and slide problems never fail a build; they come back as diagnostics in the
//! [`AssemblyReport`]. Only an unusable configuration or an unknown single-slide key is an error.
//!
//! # Example
//! ```
//! use deckgen_tools::{build_deck, AssemblyOptions, DeckConfig, LayoutConfig, SlideData};
//! use serde_json::json;
//!
//! let config = DeckConfig::new(LayoutConfig::default(), "Helvetica Neue")
//!     .with_slide("0", SlideData::new("Annual Report"))
//!     .with_slide(
//!         "1",
//!         SlideData::new("Highlights").with_element(json!({
//!             "type": "text",
//!             "content": "Revenue grew 12%",
//!             "props": {"x": 0.5, "y": 1.2, "w": 6, "h": 1}
//!         })),
//!     );
//!
//! let report = build_deck(&config, &AssemblyOptions::default()).unwrap();
//! assert_eq!(report.presentation.slides.len(), 2);
//! assert!(report.diagnostics.is_empty());
//! ```

mod charts;
mod constants;
mod normalize;
mod options;
mod structure;
mod text_fit;
mod utils;

pub use charts::{apply_combined_chart_props, derive_series, normalize_chart, resolve_chart_kind};
pub use constants::*;
pub use normalize::{parse_element, ElementNormalizer, ElementOutcome};
pub use options::{AssemblyOptions, TitleBox};
pub use structure::{deduplicate_title, TitleDeduplication};
pub use text_fit::{
    count_wrapped_lines, estimate_fit, estimate_text_width, fit_plain_text, fit_runs,
    fitted_font_size, is_full_width, min_scale_factor, FitEstimate,
};
pub use utils::normalize_title_text;

use log::info;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::diagnostics::{Diagnostic, DiagnosticKind, Diagnostics};
use crate::errors::{DeckError, Result};
use crate::models::deck::{parse_slide_key, DeckConfig, SlideData};
use crate::models::presentation::{Presentation, Slide};
use structure::SlideAssembler;

/// The assembled document together with everything the engine decided along the way.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssemblyReport {
    pub presentation: Presentation,
    pub diagnostics: Vec<Diagnostic>,
}

impl AssemblyReport {
    /// Whether any content was left out of the document.
    pub fn has_rejections(&self) -> bool {
        self.diagnostics.iter().any(|d| d.kind.is_rejection())
    }

    /// Diagnostics of one kind.
    pub fn diagnostics_of(&self, kind: DiagnosticKind) -> impl Iterator<Item = &Diagnostic> {
        self.diagnostics.iter().filter(move |d| d.kind == kind)
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }
}

/// Builds full decks and single slides with a fixed set of [`AssemblyOptions`].
///
/// The builder holds no per-build state; one instance can serve any number of builds,
/// from any number of threads.
#[derive(Debug, Clone, Default)]
pub struct DeckBuilder {
    options: AssemblyOptions,
}

impl DeckBuilder {
    pub fn new(options: AssemblyOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &AssemblyOptions {
        &self.options
    }

    fn empty_presentation(&self, config: &DeckConfig) -> Presentation {
        Presentation::new(
            config.layout.clone(),
            self.options.resolve_font(&config.font),
            self.options.entry_background.clone(),
            self.options.content_background.clone(),
        )
    }

    fn assemble_slide(
        &self,
        assembler: &SlideAssembler,
        position: u32,
        key: &str,
        slide: &SlideData,
        diagnostics: &mut Diagnostics,
    ) -> Slide {
        if position == 0 {
            assembler.assemble_entry(key, slide)
        } else {
            assembler.assemble_content(key, slide, diagnostics)
        }
    }

    /// Builds every slide: the entry slide first, then the rest ascending by numeric key.
    ///
    /// A deck without an entry slide still builds and reports
    /// [`DiagnosticKind::MissingEntrySlide`]. Keys that are not numbers are skipped and reported.
    pub fn build(&self, config: &DeckConfig) -> Result<AssemblyReport> {
        let mut presentation = self.empty_presentation(config);
        let mut diagnostics = Diagnostics::new();

        for key in config.slides.keys().filter(|k| parse_slide_key(k).is_none()) {
            diagnostics.report(
                Diagnostic::new(
                    DiagnosticKind::InvalidSlideKey,
                    format!("slide key \"{key}\" is not a slide number, slide skipped"),
                )
                .on_slide(key.as_str()),
            );
        }

        let ordered = config.ordered_keys();
        if !ordered.iter().any(|(position, _)| *position == 0) {
            diagnostics.report(Diagnostic::new(
                DiagnosticKind::MissingEntrySlide,
                "deck has no entry slide \"0\"",
            ));
        }

        let font = presentation.font.clone();
        let assembler = SlideAssembler::new(&self.options, &font);
        for (position, key) in ordered {
            let Some(slide) = config.slides.get(key) else {
                continue;
            };
            let built = self.assemble_slide(&assembler, position, key, slide, &mut diagnostics);
            presentation.slides.push(built);
        }

        info!(
            "Built deck: {} slides, {} diagnostics",
            presentation.slides.len(),
            diagnostics.len()
        );
        Ok(AssemblyReport {
            presentation,
            diagnostics: diagnostics.into_vec(),
        })
    }

    /// Builds a standalone document holding only the slide stored under `key` (exact match),
    /// with the same masters and font a full build would use.
    pub fn build_slide(&self, config: &DeckConfig, key: &str) -> Result<AssemblyReport> {
        let slide = config
            .slides
            .get(key)
            .ok_or_else(|| DeckError::slide_not_found(key))?;

        let mut presentation = self.empty_presentation(config);
        let mut diagnostics = Diagnostics::new();
        let font = presentation.font.clone();
        let assembler = SlideAssembler::new(&self.options, &font);

        let position = parse_slide_key(key).unwrap_or(u32::MAX);
        let built = self.assemble_slide(&assembler, position, key, slide, &mut diagnostics);
        presentation.slides.push(built);

        info!("Built slide {}: {} diagnostics", key, diagnostics.len());
        Ok(AssemblyReport {
            presentation,
            diagnostics: diagnostics.into_vec(),
        })
    }

    /// Loads a configuration leniently (see [`DeckConfig::from_value_lenient`]) and builds it.
    /// Load-time diagnostics come first in the report.
    pub fn build_value(&self, value: Value) -> Result<AssemblyReport> {
        let (config, load_diagnostics) = DeckConfig::from_value_lenient(value)?;
        let report = self.build(&config)?;
        Ok(merge_load_diagnostics(report, load_diagnostics))
    }

    /// Lenient load followed by a single-slide build.
    pub fn build_slide_value(&self, value: Value, key: &str) -> Result<AssemblyReport> {
        let (config, load_diagnostics) = DeckConfig::from_value_lenient(value)?;
        let report = self.build_slide(&config, key)?;
        let load_diagnostics = load_diagnostics
            .into_iter()
            .filter(|d| d.slide_key.as_deref() == Some(key))
            .collect();
        Ok(merge_load_diagnostics(report, load_diagnostics))
    }
}

fn merge_load_diagnostics(mut report: AssemblyReport, load: Vec<Diagnostic>) -> AssemblyReport {
    let mut merged = Diagnostics::new();
    for diagnostic in load {
        merged.report(diagnostic);
    }
    merged.extend(report.diagnostics);
    report.diagnostics = merged.into_vec();
    report
}

/// Builds a full deck. Shorthand for [`DeckBuilder::build`].
pub fn build_deck(config: &DeckConfig, options: &AssemblyOptions) -> Result<AssemblyReport> {
    DeckBuilder::new(options.clone()).build(config)
}

/// Builds the single slide stored under `key`. Shorthand for [`DeckBuilder::build_slide`].
pub fn build_single_slide(
    config: &DeckConfig,
    key: &str,
    options: &AssemblyOptions,
) -> Result<AssemblyReport> {
    DeckBuilder::new(options.clone()).build_slide(config, key)
}
