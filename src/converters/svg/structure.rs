//! Handles the slide-level structure of the preview: canvas size, master background and the
//! element pass.

use log::debug;
use std::fmt::Write;

use super::{
    constants::*,
    elements::convert_element_to_svg,
    error::{Result, SvgConversionError},
    utils::{escape_svg_attr, fmt_num, inches_to_pt},
};
use crate::models::presentation::{Presentation, Slide};

/// Converts a single assembled slide into an SVG document string.
///
/// The canvas is the deck layout in points. The slide's master background image, when the
/// master has one, is drawn full-bleed over a white base before any element.
pub(crate) fn convert_slide_to_svg(slide: &Slide, presentation: &Presentation) -> Result<String> {
    let mut svg_string = String::new();

    let page_width_pt = inches_to_pt(presentation.layout.width);
    let page_height_pt = inches_to_pt(presentation.layout.height);
    if !(page_width_pt > 0.0 && page_height_pt > 0.0) {
        return Err(SvgConversionError::MissingData(format!(
            "Invalid layout size {}x{} in",
            presentation.layout.width, presentation.layout.height
        )));
    }

    // --- SVG Header ---
    writeln!(
        svg_string,
        r#"<svg xmlns="http://www.w3.org/2000/svg" xmlns:xlink="http://www.w3.org/1999/xlink" width="{0}pt" height="{1}pt" viewBox="0 0 {0} {1}" data-slide="{2}" data-master="{3}">"#,
        fmt_num(page_width_pt),
        fmt_num(page_height_pt),
        escape_svg_attr(&slide.key),
        slide.master.name()
    )?;

    // --- Background ---
    writeln!(
        svg_string,
        r#"<rect x="0" y="0" width="{}" height="{}" style="fill:{};"/>"#,
        fmt_num(page_width_pt),
        fmt_num(page_height_pt),
        DEFAULT_BACKGROUND_COLOR
    )?;
    let background = presentation
        .master(slide.master)
        .and_then(|m| m.background_path.as_deref());
    if let Some(path) = background {
        writeln!(
            svg_string,
            r#"<image x="0" y="0" width="{}" height="{}" xlink:href="{}" preserveAspectRatio="none"/>"#,
            fmt_num(page_width_pt),
            fmt_num(page_height_pt),
            escape_svg_attr(path)
        )?;
    }

    // --- Elements ---
    for (index, element) in slide.elements.iter().enumerate() {
        debug!(
            "Slide {}: rendering element {} ({})",
            slide.key,
            index,
            element.kind_name()
        );
        writeln!(svg_string, "<g data-index=\"{}\">", index)?;
        convert_element_to_svg(element, &mut svg_string)?;
        writeln!(svg_string, "</g>")?;
    }

    writeln!(svg_string, "</svg>")?;
    Ok(svg_string)
}
