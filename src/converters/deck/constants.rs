//! Defines the constants used throughout deck assembly.
//!
//! The text-fit values are empirically tuned against sample decks rather than derived from font
//! metrics. Changing any of them changes rendered output.

pub use crate::models::common::PT_PER_INCH;

// --- Text fit ---

/// Advance of a narrow glyph relative to the font size.
pub const NARROW_GLYPH_RATIO: f64 = 0.6;
/// Line height relative to the font size.
pub const LINE_HEIGHT_MULTIPLIER: f64 = 1.5;
/// Applied on top of the geometric shrink ratio, since the width estimate runs high.
pub const FIT_SAFETY_FACTOR: f64 = 0.88;
/// Boxes at or above this area (pt²) use the gentler scale floors.
pub const LARGE_BOX_AREA_PT2: f64 = 15_000.0;
/// Width:height ratio above which a large box counts as a banner.
pub const BANNER_ASPECT_RATIO: f64 = 6.0;
pub const MIN_SCALE_BANNER: f64 = 0.65;
pub const MIN_SCALE_LARGE_BOX: f64 = 0.75;
pub const MIN_SCALE_SMALL_BOX: f64 = 0.5;
/// A single run never renders taller than this fraction of its box.
pub const MAX_FONT_TO_BOX_HEIGHT: f64 = 0.7;
pub const MIN_FONT_SIZE_PT: f64 = 5.0;
/// Font size assumed when neither the run nor the element declares one.
pub const DEFAULT_FONT_SIZE_PT: f64 = 14.0;

// --- Charts ---

/// Doughnut hole sizes above this are not supported by presentation writers.
pub const MAX_DOUGHNUT_HOLE_SIZE: f64 = 50.0;
pub const CLAMPED_DOUGHNUT_HOLE_SIZE: f64 = 33.0;

// --- Tables ---

/// Top offset (inches) of a table continued on an overflow slide.
pub const TABLE_CONTINUATION_START_Y: f64 = 0.65;

// --- Title deduplication ---

/// Elements starting above this `y` (inches) sit in the title region.
pub const TITLE_REGION_MAX_Y: f64 = 1.0;

// --- Deck defaults ---

pub const DEFAULT_FONT_FAMILY: &str = "Helvetica Neue";
pub const DEFAULT_TITLE_COLOR: &str = "008ed4";
pub const DEFAULT_ENTRY_BACKGROUND: &str = "public/images/introduction-bgr.jpg";
pub const DEFAULT_CONTENT_BACKGROUND: &str = "public/images/content-slide-bgr.jpg";
