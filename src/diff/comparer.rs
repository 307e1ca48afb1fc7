use crate::diff::formatting::{generate_git_diff, generate_readable_summary};
use crate::diff::structured::{Change, ChangeCollector};
use crate::models::deck::DeckConfig;
use log::info;
use serde_json::Value as JsonValue;
use treediff::diff;

use super::error::DiffError;

/// Builder for creating a `DeckComparer`.
/// Sets the "base" deck configuration later configurations are compared against.
#[derive(Default)]
pub struct DeckComparerBuilder {
    base: Option<DeckConfig>,
    is_simplify: bool,
}

impl DeckComparerBuilder {
    pub fn new() -> Self {
        Default::default()
    }

    /// Sets the base configuration to compare against.
    pub fn set_base(mut self, base: DeckConfig) -> Self {
        self.base = Some(base);
        self
    }

    /// Leaves element locations out of the readable summary.
    pub fn set_simplify(mut self, is_simplify: bool) -> Self {
        self.is_simplify = is_simplify;
        self
    }

    /// Builds the `DeckComparer`.
    /// Returns an error if the base configuration was not set.
    pub fn build(self) -> Result<DeckComparer, DiffError> {
        let base = self
            .base
            .ok_or_else(|| DiffError::InvalidPath("Base deck configuration not set".to_string()))?;
        Ok(DeckComparer {
            base,
            is_simplify: self.is_simplify,
        })
    }
}

/// Compares deck configurations against a stored base.
pub struct DeckComparer {
    base: DeckConfig,
    is_simplify: bool,
}

impl DeckComparer {
    /// Compares the stored base configuration against `other`.
    pub fn compare(&self, other: &DeckConfig) -> Result<DeckComparison, DiffError> {
        let base_val: JsonValue = serde_json::to_value(&self.base)?;
        let other_val: JsonValue = serde_json::to_value(other)?;

        let mut collector = ChangeCollector::new();
        diff(&base_val, &other_val, &mut collector);
        info!("Deck comparison found {} changes", collector.changes.len());

        Ok(DeckComparison {
            base: self.base.clone(),
            compared: other.clone(),
            changes: collector.changes,
            is_simplify: self.is_simplify,
        })
    }
}

/// Holds the results of a comparison between two deck configurations.
pub struct DeckComparison {
    base: DeckConfig,
    compared: DeckConfig,
    changes: Vec<Change>,
    is_simplify: bool,
}

impl DeckComparison {
    /// Returns the structured list of changes found.
    pub fn get_structured_diff(&self) -> &[Change] {
        &self.changes
    }

    pub fn has_changes(&self) -> bool {
        !self.changes.is_empty()
    }

    /// Keys of the slides of the compared deck that must be rebuilt, in deck order.
    ///
    /// A deck-level change (layout or font) affects every slide. Slides that only exist in the
    /// base deck are not listed; there is nothing to rebuild for them.
    pub fn changed_slide_keys(&self) -> Vec<String> {
        let deck_level = self.changes.iter().any(|c| c.slide_key.is_none());
        self.compared
            .ordered_keys()
            .into_iter()
            .map(|(_, key)| key)
            .filter(|key| {
                deck_level
                    || self
                        .changes
                        .iter()
                        .any(|c| c.slide_key.as_deref() == Some(*key))
            })
            .map(str::to_string)
            .collect()
    }

    /// Generates and returns a Git-style text diff.
    pub fn get_git_diff(&self) -> Result<String, DiffError> {
        generate_git_diff(&self.base, &self.compared, &self.changes)
    }

    /// Generates and returns a human-readable summary of the differences.
    pub fn get_readable_diff(&self) -> Result<String, DiffError> {
        generate_readable_summary(&self.changes, self.is_simplify)
    }
}
