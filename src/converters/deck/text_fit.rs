//! Heuristic text fitting: picks font sizes so LLM-authored text stays inside its box.
//!
//! No glyph is ever shaped. Widths are estimated from a two-class glyph model (full-width CJK
//! glyphs advance one em, everything else 0.6 em), wrapped against the box width, and the
//! resulting height is compared with the box height to derive a single scale factor per element.
//! The same inputs always give the same sizes.

use log::debug;

use super::constants::*;
use crate::models::common::ElementProps;
use crate::models::text::TextRun;

/// Whether a character is rendered full-width (CJK ideographs, kana, full-width forms).
pub fn is_full_width(c: char) -> bool {
    matches!(c as u32, 0x3000..=0x9FFF | 0xFF00..=0xFFEF)
}

/// Estimated advance width of `text` in points at `font_size`.
pub fn estimate_text_width(text: &str, font_size: f64) -> f64 {
    text.chars()
        .map(|c| {
            if is_full_width(c) {
                font_size
            } else {
                font_size * NARROW_GLYPH_RATIO
            }
        })
        .sum()
}

/// Number of rendered lines once each explicit line wraps at `box_width_pt`.
/// Blank lines still take one line.
pub fn count_wrapped_lines(text: &str, font_size: f64, box_width_pt: f64) -> f64 {
    text.split('\n')
        .map(|line| {
            if line.trim().is_empty() {
                1.0
            } else {
                (estimate_text_width(line, font_size) / box_width_pt).ceil()
            }
        })
        .sum()
}

/// Lowest scale factor allowed for a box of the given size (points).
pub fn min_scale_factor(box_width_pt: f64, box_height_pt: f64) -> f64 {
    let area = box_width_pt * box_height_pt;
    if area >= LARGE_BOX_AREA_PT2 {
        if box_width_pt / box_height_pt > BANNER_ASPECT_RATIO {
            MIN_SCALE_BANNER
        } else {
            MIN_SCALE_LARGE_BOX
        }
    } else {
        MIN_SCALE_SMALL_BOX
    }
}

/// Outcome of fitting one element's text.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FitEstimate {
    pub total_lines: f64,
    pub average_font_size: f64,
    pub estimated_height_pt: f64,
    /// Scale factor after the floor has been applied.
    pub scale_factor: f64,
}

/// Estimates how much `text` at `average_font_size` must shrink to fit the box.
pub fn estimate_fit(
    text: &str,
    average_font_size: f64,
    box_width_pt: f64,
    box_height_pt: f64,
) -> FitEstimate {
    let total_lines = count_wrapped_lines(text, average_font_size, box_width_pt);
    let estimated_height_pt = total_lines * average_font_size * LINE_HEIGHT_MULTIPLIER;

    let mut scale_factor = 1.0;
    if estimated_height_pt > box_height_pt {
        scale_factor = (box_height_pt / estimated_height_pt) * FIT_SAFETY_FACTOR;
    }
    scale_factor = scale_factor.max(min_scale_factor(box_width_pt, box_height_pt));

    FitEstimate {
        total_lines,
        average_font_size,
        estimated_height_pt,
        scale_factor,
    }
}

/// Final size of a run declared at `original_font_size`: scaled, capped by the box height,
/// floored at the minimum legible size and rounded to whole points.
pub fn fitted_font_size(original_font_size: f64, scale_factor: f64, box_height_pt: f64) -> f64 {
    let target = (original_font_size * scale_factor).min(box_height_pt * MAX_FONT_TO_BOX_HEIGHT);
    target.max(MIN_FONT_SIZE_PT).round()
}

/// Declared size of a run: its own, else the element's, else the default.
fn declared_size(run: &TextRun, element_font_size: Option<f64>) -> f64 {
    run.options
        .font_size
        .or(element_font_size)
        .unwrap_or(DEFAULT_FONT_SIZE_PT)
}

/// Fits a run sequence into the box described by `props`.
///
/// Returns the runs with `options.fontSize` rewritten (relative size differences between runs
/// survive) and the estimate that produced them. Runs without a font face get `font_face`.
pub fn fit_runs(
    runs: &[TextRun],
    props: &ElementProps,
    font_face: &str,
) -> (Vec<TextRun>, FitEstimate) {
    let box_width_pt = props.width_pt();
    let box_height_pt = props.height_pt();

    let average_font_size = if runs.is_empty() {
        props.font_size.unwrap_or(DEFAULT_FONT_SIZE_PT)
    } else {
        runs.iter()
            .map(|r| declared_size(r, props.font_size))
            .sum::<f64>()
            / runs.len() as f64
    };
    let full_text: String = runs.iter().map(|r| r.text.as_str()).collect();
    let estimate = estimate_fit(&full_text, average_font_size, box_width_pt, box_height_pt);

    let fitted = runs
        .iter()
        .map(|run| {
            let mut run = run.clone();
            let original = declared_size(&run, props.font_size);
            run.options.font_size = Some(fitted_font_size(
                original,
                estimate.scale_factor,
                box_height_pt,
            ));
            if run.options.font_face.is_none() {
                run.options.font_face = Some(font_face.to_string());
            }
            run
        })
        .collect();

    debug!(
        "[fit_runs] {} runs, {:.1} lines at {:.1}pt in {:.0}x{:.0}pt box -> scale {:.3}",
        runs.len(),
        estimate.total_lines,
        average_font_size,
        box_width_pt,
        box_height_pt,
        estimate.scale_factor
    );

    (fitted, estimate)
}

/// Fits a single unformatted string, returning the element-level font size.
pub fn fit_plain_text(text: &str, props: &ElementProps) -> (f64, FitEstimate) {
    let original = props.font_size.unwrap_or(DEFAULT_FONT_SIZE_PT);
    let box_height_pt = props.height_pt();
    let estimate = estimate_fit(text, original, props.width_pt(), box_height_pt);
    (
        fitted_font_size(original, estimate.scale_factor, box_height_pt),
        estimate,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn props(w: f64, h: f64, font_size: Option<f64>) -> ElementProps {
        let mut p = ElementProps::at(0.0, 0.0, w, h);
        p.font_size = font_size;
        p
    }

    #[test]
    fn test_glyph_classes() {
        assert!(is_full_width('漢'));
        assert!(is_full_width('あ'));
        assert!(is_full_width('\u{3000}'));
        assert!(is_full_width('Ａ'));
        assert!(!is_full_width('A'));
        assert!(!is_full_width('é'));
        assert_eq!(estimate_text_width("ab", 10.0), 12.0);
        assert_eq!(estimate_text_width("日本", 10.0), 20.0);
    }

    #[test]
    fn test_wrapped_lines_count_blank_lines() {
        // 10 chars * 6pt = 60pt into a 50pt box -> 2 lines; blank line -> 1
        assert_eq!(count_wrapped_lines("aaaaaaaaaa\n\nb", 10.0, 50.0), 4.0);
        assert_eq!(count_wrapped_lines("", 10.0, 50.0), 1.0);
    }

    #[test]
    fn test_scale_floors() {
        // 10in x 1in = 720 x 72 = 51840 pt², aspect 10 -> banner
        assert_eq!(min_scale_factor(720.0, 72.0), MIN_SCALE_BANNER);
        // 4in x 3in -> large, not banner
        assert_eq!(min_scale_factor(288.0, 216.0), MIN_SCALE_LARGE_BOX);
        // 2in x 1in = 10368 pt² -> small
        assert_eq!(min_scale_factor(144.0, 72.0), MIN_SCALE_SMALL_BOX);
    }

    #[test]
    fn test_short_text_keeps_size() {
        let (size, estimate) = fit_plain_text("Hello", &props(4.0, 1.0, Some(18.0)));
        assert_eq!(estimate.scale_factor, 1.0);
        assert_eq!(size, 18.0);
    }

    #[test]
    fn test_size_capped_by_box_height() {
        // 0.3in box = 21.6pt, cap 15.12 -> 15
        let (size, _) = fit_plain_text("Hi", &props(4.0, 0.3, Some(40.0)));
        assert_eq!(size, 15.0);
    }

    #[test]
    fn test_long_text_shrinks_to_floor() {
        let text = "word ".repeat(400);
        // 2in x 1in small box: floor 0.5 -> 20 * 0.5 = 10
        let (size, estimate) = fit_plain_text(&text, &props(2.0, 1.0, Some(20.0)));
        assert_eq!(estimate.scale_factor, MIN_SCALE_SMALL_BOX);
        assert_eq!(size, 10.0);
    }

    #[test]
    fn test_minimum_size() {
        let (size, _) = fit_plain_text(&"x".repeat(500), &props(0.5, 0.2, Some(6.0)));
        assert_eq!(size, MIN_FONT_SIZE_PT);
    }

    #[test]
    fn test_moderate_overflow_uses_ratio() {
        // 4in x 1in box (288 x 72pt, area 20736, aspect 4 -> floor 0.75).
        // 100 chars at 14pt = 840pt -> 3 lines -> 63pt: fits, scale 1.
        let (size, estimate) = fit_plain_text(&"a".repeat(100), &props(4.0, 1.0, None));
        assert_eq!(estimate.total_lines, 3.0);
        assert_eq!(size, 14.0);

        // 140 chars -> 1176pt -> 5 lines -> 105pt > 72: scale 72/105*0.88 = 0.603 -> floor 0.75
        let (size, estimate) = fit_plain_text(&"a".repeat(140), &props(4.0, 1.0, None));
        assert_eq!(estimate.total_lines, 5.0);
        assert_eq!(estimate.scale_factor, 0.75);
        assert_eq!(size, 11.0); // 10.5 rounds up
    }

    #[test]
    fn test_size_bounds_and_monotonicity() {
        for (w, h) in [(2.0, 0.5), (4.0, 1.0), (10.0, 0.8), (6.0, 3.0)] {
            let p = props(w, h, Some(24.0));
            let upper = (h * PT_PER_INCH * MAX_FONT_TO_BOX_HEIGHT).round();
            let mut previous = f64::MAX;
            for len in (0..600).step_by(7) {
                let text = "lorem ipsum ".repeat(len / 12 + 1)[..len].to_string();
                let (size, _) = fit_plain_text(&text, &p);
                assert_eq!(size.fract(), 0.0);
                assert!(size >= MIN_FONT_SIZE_PT && size <= upper, "{size} out of range");
                assert!(size <= previous, "size grew from {previous} to {size} at len {len}");
                previous = size;
            }
        }
    }

    #[test]
    fn test_runs_keep_relative_sizes() {
        let runs = vec![
            TextRun::sized("Heading\n", 28.0),
            TextRun::sized(&"body text ".repeat(80), 14.0),
        ];
        let (fitted, estimate) = fit_runs(&runs, &props(5.0, 2.0, None), "Yu Mincho");
        assert_eq!(estimate.average_font_size, 21.0);
        assert!(estimate.scale_factor < 1.0);

        let heading = fitted[0].options.font_size.unwrap();
        let body = fitted[1].options.font_size.unwrap();
        assert!(heading > body);
        assert_eq!(heading, (28.0 * estimate.scale_factor).round());
        assert_eq!(fitted[0].options.font_face.as_deref(), Some("Yu Mincho"));
    }

    #[test]
    fn test_runs_inherit_element_size() {
        let runs = vec![TextRun::plain("a"), TextRun::sized("b", 10.0)];
        let (fitted, estimate) = fit_runs(&runs, &props(4.0, 1.0, Some(20.0)), "Arial");
        assert_eq!(estimate.average_font_size, 15.0);
        assert_eq!(fitted[0].options.font_size, Some(20.0));
        assert_eq!(fitted[1].options.font_size, Some(10.0));
    }

    #[test]
    fn test_existing_font_face_is_kept() {
        let mut run = TextRun::plain("x");
        run.options.font_face = Some("Courier".to_string());
        let (fitted, _) = fit_runs(&[run], &props(4.0, 1.0, None), "Arial");
        assert_eq!(fitted[0].options.font_face.as_deref(), Some("Courier"));
    }
}
