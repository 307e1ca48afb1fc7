use crate::models::presentation::{PlacedElement, Presentation, Slide};
use crate::models::text::runs_plain_text;
use serde_json::Value;
use std::cmp::Ordering;

// --- Helper Function for Sorting ---

/// Compares two placed elements by their vertical position.
fn compare_elements_by_y(a: &PlacedElement, b: &PlacedElement) -> Ordering {
    a.props()
        .y
        .partial_cmp(&b.props().y)
        .unwrap_or(Ordering::Equal) // NaN never reaches here, geometry is validated
}

// --- Text Extraction Logic ---

/// Renders a table cell value as text. Strings are used as-is, `{text}` objects by their text.
fn cell_text(cell: &Value) -> String {
    match cell {
        Value::String(s) => s.clone(),
        Value::Null => String::new(),
        Value::Object(map) => map
            .get("text")
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_string(),
        other => other.to_string(),
    }
}

/// Extracts text from a table, one line per row, non-empty cells separated by spaces.
fn extract_text_from_table(rows: &[Vec<Value>]) -> Option<String> {
    let lines: Vec<String> = rows
        .iter()
        .map(|row| {
            row.iter()
                .map(cell_text)
                .map(|t| t.trim().to_string())
                .filter(|t| !t.is_empty())
                .collect::<Vec<_>>()
                .join(" ")
        })
        .filter(|line| !line.is_empty())
        .collect();

    if lines.is_empty() {
        None
    } else {
        Some(lines.join("\n"))
    }
}

/// Extracts text from a single element. Charts and images carry none.
fn extract_text_from_element(element: &PlacedElement) -> Option<String> {
    let text = match element {
        PlacedElement::Text { runs, .. } | PlacedElement::Shape { runs, .. } => {
            runs_plain_text(runs)
        }
        PlacedElement::Table { rows, .. } => return extract_text_from_table(rows),
        PlacedElement::Chart { .. } | PlacedElement::Image { .. } => return None,
    };
    let trimmed = text.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

/// Extracts and concatenates the text of one slide, top to bottom.
fn extract_text_from_slide(slide: &Slide) -> Option<String> {
    let mut sorted: Vec<&PlacedElement> = slide.elements.iter().collect();
    sorted.sort_by(|a, b| compare_elements_by_y(a, b));

    let parts: Vec<String> = sorted
        .into_iter()
        .filter_map(extract_text_from_element)
        .collect();

    if parts.is_empty() {
        None
    } else {
        Some(parts.join("\n"))
    }
}

// --- Public API Function ---

/// Extracts the text of an assembled deck as a Markdown outline.
///
/// The outline opens with `# Presentation`, then one `## Slide n` section per slide that has any
/// text (n is the 1-based position in the deck), sections separated by `---`. Slides without
/// text are skipped. The outline is what [`crate::diff::generate_markdown_diff`] compares.
pub fn extract_text_from_presentation(presentation: &Presentation) -> String {
    let mut full_text = String::from("# Presentation\n\n");

    let mut first_slide = true;
    for (index, slide) in presentation.slides.iter().enumerate() {
        let Some(slide_content) = extract_text_from_slide(slide) else {
            continue;
        };
        if !first_slide {
            full_text.push_str("\n---\n\n");
        }
        first_slide = false;

        full_text.push_str(&format!("## Slide {}\n\n", index + 1));
        full_text.push_str(&slide_content);
        full_text.push('\n');
    }

    full_text
}
