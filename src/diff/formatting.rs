use super::error::DiffError;
use crate::{
    diff::structured::{Change, ChangeType},
    models::deck::{parse_slide_key, DeckConfig},
};
use log::debug;
use similar::{ChangeTag, TextDiff};
use std::{collections::BTreeMap, fmt::Write};

/// Generates a Git-style diff of the two configurations' pretty JSON.
pub(crate) fn generate_git_diff(
    old_config: &DeckConfig,
    new_config: &DeckConfig,
    structured_changes: &[Change],
) -> Result<String, DiffError> {
    let old_str = serde_json::to_string_pretty(old_config)?;
    let new_str = serde_json::to_string_pretty(new_config)?;
    let diff = TextDiff::from_lines(&old_str, &new_str);

    let mut output = String::new();
    writeln!(output, "--- a/deck.json")?;
    writeln!(output, "+++ b/deck.json")?;

    if structured_changes.is_empty() && old_str == new_str {
        output.push_str("\nNo changes detected.\n");
        return Ok(output);
    }

    for group in diff.grouped_ops(3) {
        let (old_line, new_line) = group
            .first()
            .map(|op| (op.old_range().start + 1, op.new_range().start + 1))
            .unwrap_or((0, 0));
        let old_len: usize = group.iter().map(|op| op.old_range().len()).sum();
        let new_len: usize = group.iter().map(|op| op.new_range().len()).sum();
        writeln!(
            output,
            "@@ -{},{} +{},{} @@",
            old_line, old_len, new_line, new_len
        )?;

        for op in group {
            for change in diff.iter_inline_changes(&op) {
                let sign = match change.tag() {
                    ChangeTag::Delete => '-',
                    ChangeTag::Insert => '+',
                    ChangeTag::Equal => ' ',
                };
                write!(output, "{}", sign)?;
                for &(_emphasized, value) in change.values() {
                    write!(output, "{}", value)?;
                }
                if change.missing_newline() {
                    writeln!(output)?;
                }
            }
        }
    }

    Ok(output)
}

/// Splits a slide-relative path (`elements[2].props.x`) into the element index and the rest.
fn split_element_path(path: &str) -> Option<(usize, &str)> {
    let rest = path.strip_prefix("elements[")?;
    let end = rest.find(']')?;
    let index = rest[..end].parse().ok()?;
    Some((index, rest[end + 1..].trim_start_matches('.')))
}

/// The path below `slides.<key>`, or the whole path for deck-level changes.
fn slide_relative_path<'a>(change: &'a Change) -> &'a str {
    match &change.slide_key {
        Some(key) => change
            .path
            .strip_prefix("slides.")
            .and_then(|p| p.strip_prefix(key.as_str()))
            .map(|p| p.trim_start_matches('.'))
            .unwrap_or(change.path.as_str()),
        None => change.path.as_str(),
    }
}

/// Describes what changed, from the path below an element (`props.x`, `content[1].text`, ...).
fn describe_element_target(path: &str) -> String {
    let head = path.split(['.', '[']).next().unwrap_or_default();
    match head {
        "" => "Element".to_string(),
        "type" => "Element Type".to_string(),
        "content" => "Text Content".to_string(),
        "rows" => "Table Cell".to_string(),
        "data" => "Chart Data".to_string(),
        "chartType" => "Chart Type".to_string(),
        "shapeType" => "Shape Type".to_string(),
        "props" => match path.trim_start_matches("props").trim_start_matches('.') {
            "x" | "y" => "Position".to_string(),
            "w" | "h" => "Size".to_string(),
            "fontSize" => "Font Size".to_string(),
            "fontFace" => "Font Face".to_string(),
            "path" => "Image Path".to_string(),
            "" => "Properties".to_string(),
            other => {
                let name = other.split(['.', '[']).next().unwrap_or(other);
                format!("Property '{}'", name)
            }
        },
        other => format!("Field '{}'", other),
    }
}

/// Describes a change relative to its slide (or the deck) and where it happened.
fn describe_change_target(relative_path: &str) -> (String, Option<String>) {
    if let Some((index, rest)) = split_element_path(relative_path) {
        return (
            describe_element_target(rest),
            Some(format!("element {}", index)),
        );
    }
    let head = relative_path.split(['.', '[']).next().unwrap_or_default();
    let desc = match head {
        "" => "Slide",
        "slide_title" => "Slide Title",
        "elements" => "Elements",
        "layout" => "Layout",
        "font" => "Deck Font",
        _ => "Property",
    };
    (desc.to_string(), None)
}

/// Formats the location for display within the summary line.
fn format_location(location: Option<&str>, is_simplify: bool) -> String {
    match location {
        Some(location) if !is_simplify => format!(" (at {})", location),
        _ => String::new(),
    }
}

/// Formats one change as a summary line.
fn describe_change(change: &Change, is_simplify: bool) -> String {
    let (desc, location) = describe_change_target(slide_relative_path(change));
    let location = format_location(location.as_deref(), is_simplify);
    match (&change.change_type, &change.old_value, &change.new_value) {
        (ChangeType::Added, _, Some(new)) if !is_simplify => {
            format!("- Added {} {}{}", desc, new.format_for_display(), location)
        }
        (ChangeType::Added, _, _) => format!("- Added {}{}", desc, location),
        (ChangeType::Removed, _, _) => format!("- Removed {}{}", desc, location),
        (ChangeType::Modified, Some(old), Some(new)) => format!(
            "- Changed {} from {} to {}{}",
            desc,
            old.format_for_display(),
            new.format_for_display(),
            location
        ),
        (ChangeType::Modified, _, _) => {
            format!("- Modified {}{} (incomplete data)", desc, location)
        }
    }
}

/// Generates a human-readable summary of the changes, grouped by slide in deck order.
pub(crate) fn generate_readable_summary(
    changes: &[Change],
    is_simplify: bool,
) -> Result<String, DiffError> {
    let mut general_changes: Vec<String> = Vec::new();
    // Numeric keys sort by position; anything else sorts after them by name.
    let mut changes_by_slide: BTreeMap<(u32, String), Vec<String>> = BTreeMap::new();
    let mut counts = (0, 0, 0);

    for change in changes {
        match change.change_type {
            ChangeType::Added => counts.0 += 1,
            ChangeType::Removed => counts.1 += 1,
            ChangeType::Modified => counts.2 += 1,
        }
        let line = describe_change(change, is_simplify);
        debug!("{} -> {}", change.path, line);
        match &change.slide_key {
            Some(key) => changes_by_slide
                .entry((parse_slide_key(key).unwrap_or(u32::MAX), key.clone()))
                .or_default()
                .push(line),
            None => general_changes.push(line),
        }
    }

    let total = counts.0 + counts.1 + counts.2;
    let mut summary = String::new();
    write!(
        summary,
        "## Summary:\nDetected {} changes: {} additions, {} removals, {} modifications.",
        total, counts.0, counts.1, counts.2
    )?;
    if total == 0 {
        summary.push_str("\n\nNo changes detected.");
        return Ok(summary);
    }

    summary.push_str("\n\n## Details:");
    if !general_changes.is_empty() {
        summary.push_str("\n\n### Deck:\n");
        summary.push_str(&general_changes.join("\n"));
    }
    for ((_, key), lines) in &changes_by_slide {
        write!(summary, "\n\n### Slide {}:\n", key)?;
        summary.push_str(&lines.join("\n"));
    }
    Ok(summary)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diff::structured::ValueRepr;

    fn modified(path: &str, slide_key: Option<&str>, old: &str, new: &str) -> Change {
        Change {
            path: path.to_string(),
            slide_key: slide_key.map(str::to_string),
            change_type: ChangeType::Modified,
            old_value: Some(ValueRepr::String(old.to_string())),
            new_value: Some(ValueRepr::String(new.to_string())),
        }
    }

    #[test]
    fn test_describe_targets() {
        assert_eq!(
            describe_change_target("elements[2].props.x"),
            ("Position".to_string(), Some("element 2".to_string()))
        );
        assert_eq!(
            describe_change_target("elements[0].props.fill.color").0,
            "Property 'fill'"
        );
        assert_eq!(describe_change_target("elements[1].content[0].text").0, "Text Content");
        assert_eq!(describe_change_target("slide_title"), ("Slide Title".to_string(), None));
        assert_eq!(describe_change_target("layout.width").0, "Layout");
    }

    #[test]
    fn test_summary_groups_by_slide_in_numeric_order() {
        let changes = vec![
            modified("slides.10.slide_title", Some("10"), "A", "B"),
            modified("slides.2.elements[0].content", Some("2"), "x", "y"),
            modified("font", None, "Arial", "Yu Mincho"),
        ];
        let summary = generate_readable_summary(&changes, false).unwrap();

        assert!(summary.starts_with("## Summary:\nDetected 3 changes: 0 additions, 0 removals, 3 modifications."));
        assert!(summary.contains("### Deck:\n- Changed Deck Font from 'Arial' to 'Yu Mincho'"));
        assert!(summary.contains("### Slide 2:\n- Changed Text Content from 'x' to 'y' (at element 0)"));
        let slide_2 = summary.find("### Slide 2:").unwrap();
        let slide_10 = summary.find("### Slide 10:").unwrap();
        assert!(slide_2 < slide_10);
    }

    #[test]
    fn test_simplified_summary_omits_locations() {
        let changes = vec![modified("slides.1.elements[3].props.w", Some("1"), "1", "2")];
        let summary = generate_readable_summary(&changes, true).unwrap();
        assert!(summary.ends_with("### Slide 1:\n- Changed Size from '1' to '2'"));
    }

    #[test]
    fn test_empty_summary() {
        let summary = generate_readable_summary(&[], false).unwrap();
        assert!(summary.ends_with("No changes detected."));
    }
}
