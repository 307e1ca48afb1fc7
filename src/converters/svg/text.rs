//! Lays out text runs inside an element box and writes them as SVG `<text>` lines.
//!
//! Wrapping uses the same glyph width estimate as the text fitter, so the preview breaks lines
//! roughly where the fitter assumed they would break.

use std::fmt::Write;

use serde_json::Value;

use super::{
    constants::*,
    error::Result,
    utils::{color_hint, element_box_pt, escape_svg_attr, escape_svg_text, fmt_num, text_color},
};
use crate::converters::deck::{estimate_text_width, is_full_width};
use crate::models::common::ElementProps;
use crate::models::text::TextRun;

/// A styled fragment of one laid-out line.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct LinePiece<'a> {
    pub text: String,
    pub run: &'a TextRun,
    pub font_size: f64,
}

/// One laid-out line.
#[derive(Debug, Clone, PartialEq, Default)]
pub(crate) struct TextLine<'a> {
    pub pieces: Vec<LinePiece<'a>>,
    pub width: f64,
    /// Largest font size on the line; an empty line keeps the size it was broken at.
    pub font_size: f64,
}

impl<'a> TextLine<'a> {
    fn new(font_size: f64) -> Self {
        Self {
            pieces: Vec::new(),
            width: 0.0,
            font_size,
        }
    }

    fn push(&mut self, run: &'a TextRun, token: &str, font_size: f64, width: f64) {
        match self.pieces.last_mut() {
            Some(last) if std::ptr::eq(last.run, run) => last.text.push_str(token),
            _ => {
                if self.pieces.is_empty() {
                    self.font_size = font_size;
                }
                self.pieces.push(LinePiece {
                    text: token.to_string(),
                    run,
                    font_size,
                })
            }
        }
        self.font_size = self.font_size.max(font_size);
        self.width += width;
    }

    #[cfg(test)]
    pub fn text(&self) -> String {
        self.pieces.iter().map(|p| p.text.as_str()).collect()
    }
}

/// Splits text into wrap units: a word with its trailing whitespace, or a single full-width glyph.
fn wrap_tokens(text: &str) -> Vec<&str> {
    let mut tokens = Vec::new();
    let mut start = 0;
    for (i, c) in text.char_indices() {
        let end = i + c.len_utf8();
        if is_full_width(c) {
            if start < i {
                tokens.push(&text[start..i]);
            }
            tokens.push(&text[i..end]);
            start = end;
        } else if c.is_whitespace() {
            tokens.push(&text[start..end]);
            start = end;
        }
    }
    if start < text.len() {
        tokens.push(&text[start..]);
    }
    tokens
}

/// Whether a run ends its line regardless of the text (`breakLine` run option).
fn breaks_line(run: &TextRun) -> bool {
    run.options.extra.get("breakLine") == Some(&Value::Bool(true))
}

/// Greedy line layout of `runs` in a box `box_width_pt` wide. Explicit newlines and `breakLine`
/// runs always start a new line; a single token wider than the box overflows its own line.
pub(crate) fn layout_runs<'a>(
    runs: &'a [TextRun],
    element_font_size: f64,
    box_width_pt: f64,
) -> Vec<TextLine<'a>> {
    let mut lines = Vec::new();
    let mut current = TextLine::new(element_font_size);

    for run in runs {
        let font_size = run.options.font_size.unwrap_or(element_font_size);
        for (segment_index, segment) in run.text.split('\n').enumerate() {
            if segment_index > 0 {
                lines.push(std::mem::replace(&mut current, TextLine::new(font_size)));
            }
            for token in wrap_tokens(segment) {
                let width = estimate_text_width(token, font_size);
                if current.width > 0.0 && current.width + width > box_width_pt {
                    lines.push(std::mem::replace(&mut current, TextLine::new(font_size)));
                }
                current.push(run, token, font_size, width);
            }
        }
        if breaks_line(run) {
            lines.push(std::mem::replace(&mut current, TextLine::new(font_size)));
        }
    }
    if !current.pieces.is_empty() || lines.is_empty() {
        lines.push(current);
    }
    lines
}

/// Inline style of one piece: size, family, color and emphasis, run options winning over props.
fn piece_style(piece: &LinePiece, props: &ElementProps) -> String {
    let options = &piece.run.options;
    let family = options
        .font_face
        .as_deref()
        .or(props.font_face.as_deref())
        .unwrap_or("sans-serif");
    let color = color_hint(options.extra.get("color")).unwrap_or_else(|| text_color(props));
    let flag = |key: &str| {
        options.extra.get(key).and_then(Value::as_bool).unwrap_or(false) || props.is_truthy(key)
    };

    let mut style = format!(
        "font-family:'{}'; font-size:{}pt; fill:{};",
        escape_svg_attr(family),
        fmt_num(piece.font_size),
        color
    );
    if flag("bold") {
        style.push_str(" font-weight:bold;");
    }
    if flag("italic") {
        style.push_str(" font-style:italic;");
    }
    if flag("underline") {
        style.push_str(" text-decoration:underline;");
    }
    style
}

/// Writes `runs` laid out inside the box of `props`, honoring `align` and `valign`.
pub(crate) fn write_text_block(
    runs: &[TextRun],
    props: &ElementProps,
    svg_output: &mut String,
) -> Result<()> {
    if runs.iter().all(|r| r.text.trim().is_empty()) {
        return Ok(());
    }
    let (x, y, w, h) = element_box_pt(props);
    let element_font_size = props.font_size.unwrap_or(DEFAULT_FONT_SIZE_PT);
    let lines = layout_runs(runs, element_font_size, w);

    let total_height: f64 = lines.iter().map(|l| l.font_size * SVG_LINE_HEIGHT).sum();
    let mut line_top = match props.valign.as_deref() {
        Some("top") => y,
        Some("bottom") => y + h - total_height,
        _ => y + (h - total_height) / 2.0,
    };
    let (anchor_x, anchor) = match props.get_str("align") {
        Some("center") => (x + w / 2.0, "middle"),
        Some("right") => (x + w, "end"),
        _ => (x, "start"),
    };

    for line in &lines {
        let baseline = line_top + line.font_size;
        line_top += line.font_size * SVG_LINE_HEIGHT;
        if line.pieces.iter().all(|p| p.text.trim().is_empty()) {
            continue;
        }
        write!(
            svg_output,
            r#"<text x="{}" y="{}" text-anchor="{}" xml:space="preserve">"#,
            fmt_num(anchor_x),
            fmt_num(baseline),
            anchor
        )?;
        for piece in &line.pieces {
            write!(
                svg_output,
                r#"<tspan style="{}">{}</tspan>"#,
                piece_style(piece, props),
                escape_svg_text(piece.text.trim_end_matches('\n'))
            )?;
        }
        writeln!(svg_output, "</text>")?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_wrap_tokens() {
        assert_eq!(wrap_tokens("big data  now"), vec!["big ", "data ", " ", "now"]);
        assert_eq!(wrap_tokens("AI時代"), vec!["AI", "時", "代"]);
    }

    #[test]
    fn test_layout_wraps_on_words() {
        let runs = vec![TextRun::plain("aaaa bbbb cccc")];
        // 10pt: "aaaa " = 30pt, box 65pt fits two tokens per line
        let lines = layout_runs(&runs, 10.0, 65.0);
        let texts: Vec<String> = lines.iter().map(TextLine::text).collect();
        assert_eq!(texts, vec!["aaaa bbbb ", "cccc"]);
    }

    #[test]
    fn test_layout_newlines_and_break_line() {
        let first: TextRun = serde_json::from_value(json!({
            "text": "Head", "options": {"fontSize": 20, "breakLine": true}
        }))
        .unwrap();
        let runs = vec![first, TextRun::plain("one\ntwo")];
        let lines = layout_runs(&runs, 12.0, 500.0);

        let texts: Vec<String> = lines.iter().map(TextLine::text).collect();
        assert_eq!(texts, vec!["Head", "one", "two"]);
        assert_eq!(lines[0].font_size, 20.0);
        assert_eq!(lines[1].font_size, 12.0);
    }

    #[test]
    fn test_text_block_output() {
        let mut props = ElementProps::at(1.0, 1.0, 4.0, 1.0);
        props.font_size = Some(18.0);
        props.font_face = Some("Yu Mincho".to_string());
        props.set("align", "center");
        props.set("color", "008ed4");
        props.set("bold", true);

        let mut svg = String::new();
        write_text_block(&[TextRun::plain("A & B")], &props, &mut svg).unwrap();

        assert!(svg.contains(r#"text-anchor="middle""#));
        assert!(svg.contains(r#"x="216""#));
        assert!(svg.contains("font-family:'Yu Mincho'"));
        assert!(svg.contains("fill:#008ed4"));
        assert!(svg.contains("font-weight:bold"));
        assert!(svg.contains("A &amp; B"));
    }

    #[test]
    fn test_blank_text_writes_nothing() {
        let mut svg = String::new();
        let props = ElementProps::at(0.0, 0.0, 1.0, 1.0);
        write_text_block(&[TextRun::plain("  ")], &props, &mut svg).unwrap();
        assert!(svg.is_empty());
    }
}
