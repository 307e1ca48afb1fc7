//! Compares deck configurations and their rendered forms.
//!
//! [`DeckComparer`] diffs two configurations structurally and tells which slides need to be
//! regenerated. [`generate_markdown_diff`] and [`compare_svg_content`] diff the text outline and
//! the preview of built decks.

pub mod comparer;
pub mod error;
mod formatting;
pub mod markdown;
pub mod structured;
pub mod svg_diff;

pub use comparer::{DeckComparer, DeckComparerBuilder, DeckComparison};
pub use error::DiffError;
pub use markdown::generate_markdown_diff;
pub use structured::{Change, ChangeType, ValueRepr};
pub use svg_diff::{compare_svg_content, SvgDiffMarkdownReport};
