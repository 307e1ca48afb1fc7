use super::error::DiffError;
use similar::{ChangeTag, TextDiff};
use std::fmt::Write;

/// Holds the results of an SVG comparison, formatted as a Markdown report.
#[derive(Debug)]
pub struct SvgDiffMarkdownReport {
    pub markdown_report: String,
    pub has_differences: bool,
}

/// Compares two slide previews and generates a Markdown report with a unified diff.
///
/// The file names are used in the report heading and the diff header.
pub fn compare_svg_content(
    base_svg_content: &str,
    changed_svg_content: &str,
    base_filename: &str,
    changed_filename: &str,
) -> Result<SvgDiffMarkdownReport, DiffError> {
    let has_differences = base_svg_content != changed_svg_content;
    let mut report = String::new();

    writeln!(report, "# Summary of SVG Changes\n")?;
    writeln!(report, "---")?;
    writeln!(
        report,
        "## Comparison: `{}` vs `{}`\n",
        base_filename, changed_filename
    )?;

    if has_differences {
        let diff = TextDiff::from_lines(base_svg_content, changed_svg_content);
        let (mut added_lines, mut removed_lines) = (0, 0);
        for change in diff.iter_all_changes() {
            match change.tag() {
                ChangeTag::Insert => added_lines += 1,
                ChangeTag::Delete => removed_lines += 1,
                ChangeTag::Equal => (),
            }
        }

        let mut hunks = String::new();
        write!(
            hunks,
            "{}",
            diff.unified_diff()
                .header(base_filename, changed_filename)
                .context_radius(3)
        )?;

        writeln!(report, "> SVG files differ.")?;
        writeln!(report, "> - Lines Added: {}", added_lines)?;
        writeln!(report, "> - Lines Removed: {}\n", removed_lines)?;
        writeln!(report, "```diff")?;
        report.push_str(&hunks);
        if !hunks.ends_with('\n') {
            report.push('\n');
        }
        writeln!(report, "```")?;
    } else {
        writeln!(report, "> No textual differences found between SVG files.")?;
    }

    writeln!(report, "\n---")?;
    Ok(SvgDiffMarkdownReport {
        markdown_report: report,
        has_differences,
    })
}
