//! Slide assembly: master selection, title placement, title deduplication and element placement.

use log::{debug, info};
use serde_json::Value;

use super::constants::TITLE_REGION_MAX_Y;
use super::normalize::ElementNormalizer;
use super::options::{AssemblyOptions, TitleBox};
use super::utils::{normalize_title_text, raw_content_text, raw_prop, shift_raw_y};
use crate::diagnostics::Diagnostics;
use crate::models::common::ElementProps;
use crate::models::deck::SlideData;
use crate::models::presentation::{MasterKind, PlacedElement, Slide};
use crate::models::text::TextRun;

/// Result of looking for an element that repeats the slide title.
#[derive(Debug, Clone, PartialEq)]
pub struct TitleDeduplication {
    /// The elements left after removal, with `y` shifted up by the removed element's height.
    pub elements: Vec<Value>,
    /// Index (in the authored list) of the removed element.
    pub removed_index: Option<usize>,
}

/// Removes the first element that repeats `title` inside the title region.
///
/// An element matches when its normalized text equals the normalized title and its `y` is above
/// the title region boundary. Every remaining element then moves up by the removed element's
/// `h`, stopping at the top edge. A removed element without `h` shifts nothing. Nothing is
/// removed when the title normalizes to the empty string.
pub fn deduplicate_title(title: &str, elements: &[Value]) -> TitleDeduplication {
    let normalized_title = normalize_title_text(title);
    let found = if normalized_title.is_empty() {
        None
    } else {
        elements.iter().position(|element| {
            raw_prop(element, "y").map_or(false, |y| y < TITLE_REGION_MAX_Y)
                && normalize_title_text(&raw_content_text(element)) == normalized_title
        })
    };

    let Some(index) = found else {
        return TitleDeduplication {
            elements: elements.to_vec(),
            removed_index: None,
        };
    };

    let shift = raw_prop(&elements[index], "h").unwrap_or(0.0);
    let remaining = elements
        .iter()
        .enumerate()
        .filter(|(i, _)| *i != index)
        .map(|(_, element)| {
            let mut element = element.clone();
            shift_raw_y(&mut element, shift);
            element
        })
        .collect();

    debug!(
        "[deduplicate_title] element {} repeats title \"{}\", shifting the rest up {}in",
        index, title, shift
    );
    TitleDeduplication {
        elements: remaining,
        removed_index: Some(index),
    }
}

/// Builds slides for one deck, sharing the resolved font and the caller's options.
pub(crate) struct SlideAssembler<'a> {
    options: &'a AssemblyOptions,
    font: &'a str,
}

impl<'a> SlideAssembler<'a> {
    pub(crate) fn new(options: &'a AssemblyOptions, font: &'a str) -> Self {
        Self { options, font }
    }

    /// The title text box for the given geometry.
    fn title_element(&self, title: &str, title_box: &TitleBox) -> PlacedElement {
        let mut props = ElementProps::at(title_box.x, title_box.y, title_box.w, title_box.h);
        props.font_size = Some(title_box.font_size);
        props.font_face = Some(self.font.to_string());
        props.set("bold", true);
        props.set("color", self.options.title_color.as_str());
        props.set("align", "left");
        PlacedElement::Text {
            runs: vec![TextRun::plain(title)],
            props,
        }
    }

    /// The entry slide: the large title on the entry master and nothing else.
    pub(crate) fn assemble_entry(&self, key: &str, slide: &SlideData) -> Slide {
        let mut elements = Vec::new();
        if !slide.slide_title.is_empty() {
            elements.push(self.title_element(&slide.slide_title, &self.options.entry_title));
        }
        if !slide.elements.is_empty() {
            debug!(
                "[assemble_entry] ignoring {} elements on the entry slide",
                slide.elements.len()
            );
        }
        Slide {
            key: key.to_string(),
            master: MasterKind::Entry,
            title: slide.slide_title.clone(),
            elements,
        }
    }

    /// A content slide: title box, deduplicated elements, each normalized independently.
    /// Rejected elements and fallbacks are reported to `diagnostics`.
    pub(crate) fn assemble_content(
        &self,
        key: &str,
        slide: &SlideData,
        diagnostics: &mut Diagnostics,
    ) -> Slide {
        let mut placed = Vec::with_capacity(slide.elements.len() + 1);
        if !slide.slide_title.is_empty() {
            placed.push(self.title_element(&slide.slide_title, &self.options.content_title));
        }

        let dedup = deduplicate_title(&slide.slide_title, &slide.elements);
        let normalizer = ElementNormalizer::new(self.font, &dedup.elements);

        let mut rejected = 0;
        for (index, payload) in dedup.elements.iter().enumerate() {
            let mut notes = Vec::new();
            let outcome = normalizer.normalize(payload, &mut notes);
            for note in notes {
                diagnostics.report(
                    note.on_slide(key)
                        .at_element(index)
                        .with_payload(payload.clone()),
                );
            }
            match outcome {
                Ok(element) => placed.push(element),
                Err(rejection) => {
                    rejected += 1;
                    diagnostics.report(
                        rejection
                            .on_slide(key)
                            .at_element(index)
                            .with_payload(payload.clone()),
                    );
                }
            }
        }

        info!(
            "Slide {}: placed {} of {} elements",
            key,
            dedup.elements.len() - rejected,
            dedup.elements.len()
        );
        Slide {
            key: key.to_string(),
            master: MasterKind::Content,
            title: slide.slide_title.clone(),
            elements: placed,
        }
    }
}
