use super::error::DiffError;
use similar::{ChangeTag, TextDiff};
use std::fmt::Write;

/// Generates a unified diff between two deck outlines, prefixed by a count of the lines added
/// and removed.
///
/// The outlines are the output of [`crate::markdown::extract_text_from_presentation`]; the file
/// names are used in the `---`/`+++` header (e.g. `a/deck.md`, `b/deck.md`).
pub fn generate_markdown_diff(
    base_text: &str,
    changed_text: &str,
    base_filename: &str,
    changed_filename: &str,
) -> Result<String, DiffError> {
    let diff = TextDiff::from_lines(base_text, changed_text);

    let (mut added_lines, mut removed_lines) = (0, 0);
    for change in diff.iter_all_changes() {
        match change.tag() {
            ChangeTag::Insert => added_lines += 1,
            ChangeTag::Delete => removed_lines += 1,
            ChangeTag::Equal => (),
        }
    }

    let mut output = String::new();
    write!(
        output,
        "## Summary of Changes (Text Content)\n\n- Lines Added: {}\n- Lines Removed: {}\n\n---\n\n",
        added_lines, removed_lines
    )?;
    write!(
        output,
        "{}",
        diff.unified_diff().header(base_filename, changed_filename)
    )?;
    Ok(output)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::converters::deck::{build_deck, AssemblyOptions};
    use crate::markdown::extract_text_from_presentation;
    use crate::models::deck::{DeckConfig, LayoutConfig, SlideData};
    use serde_json::json;

    fn outline(body: &str) -> String {
        let config = DeckConfig::new(LayoutConfig::default(), "Arial")
            .with_slide("0", SlideData::new("Quarterly review"))
            .with_slide(
                "1",
                SlideData::new("Highlights").with_element(json!({
                    "type": "text", "content": body, "props": {"x": 1, "y": 1, "w": 8, "h": 2}
                })),
            );
        let report = build_deck(&config, &AssemblyOptions::default()).unwrap();
        extract_text_from_presentation(&report.presentation)
    }

    #[test]
    fn test_outline_diff() {
        let base = outline("Revenue up 10%");
        let changed = outline("Revenue up 12%");
        let diff = generate_markdown_diff(&base, &changed, "a/deck.md", "b/deck.md").unwrap();

        assert!(diff.starts_with("## Summary of Changes (Text Content)"));
        assert!(diff.contains("- Lines Added: 1\n- Lines Removed: 1"));
        assert!(diff.contains("--- a/deck.md"));
        assert!(diff.contains("+++ b/deck.md"));
        assert!(diff.contains("-Revenue up 10%"));
        assert!(diff.contains("+Revenue up 12%"));
    }

    #[test]
    fn test_identical_outlines() {
        let text = outline("Same");
        let diff = generate_markdown_diff(&text, &text, "a/deck.md", "b/deck.md").unwrap();
        assert!(diff.contains("- Lines Added: 0\n- Lines Removed: 0"));
        assert!(!diff.contains("@@"));
    }
}
