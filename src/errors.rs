use thiserror::Error;

use crate::converters::svg::SvgConversionError;

/// Represents the terminal errors of a deck assembly invocation.
///
/// Problems with individual elements or slides are never reported through this type;
/// they surface as [`crate::Diagnostic`] values alongside a successfully built document.
#[derive(Error, Debug)]
pub enum DeckError {
    /// A single-slide build was requested for a key the configuration does not contain.
    #[error("Slide with key \"{key}\" not found")]
    SlideNotFound { key: String },

    /// The deck configuration itself is structurally unusable (missing layout, slides not a map, ...).
    #[error("Invalid deck configuration: {0}")]
    InvalidConfig(String),

    /// Error occurred during the deserialization of a deck configuration or during report serialization.
    #[error("Failed to process deck JSON: {0}")]
    JsonDeserialization(#[from] serde_json::Error),

    /// An I/O error occurred, e.g. while reading a configuration file.
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    /// Preview rendering of an assembled document failed.
    #[error("Preview rendering failed: {0}")]
    Svg(#[from] SvgConversionError),
}

impl DeckError {
    /// Create a slide-not-found error
    pub fn slide_not_found(key: impl Into<String>) -> Self {
        Self::SlideNotFound { key: key.into() }
    }

    /// Create an invalid configuration error
    pub fn invalid_config(reason: impl Into<String>) -> Self {
        Self::InvalidConfig(reason.into())
    }
}

/// A type alias for `Result<T, DeckError>` for convenience within the crate.
pub type Result<T> = std::result::Result<T, DeckError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = DeckError::slide_not_found("7");
        assert_eq!(err.to_string(), "Slide with key \"7\" not found");

        let err = DeckError::invalid_config("missing layout");
        assert!(err.to_string().contains("missing layout"));
    }

    #[test]
    fn test_json_error_conversion() {
        let json_err = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let err: DeckError = json_err.into();
        assert!(matches!(err, DeckError::JsonDeserialization(_)));
    }
}
