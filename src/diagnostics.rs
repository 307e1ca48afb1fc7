//! Non-fatal findings produced while assembling a deck.
//!
//! Every rejection or fallback decision taken by the engine is recorded as a [`Diagnostic`]
//! carrying the slide key, the element index and the offending payload, and is mirrored to the
//! `log` facade at `warn` level. None of these conditions abort a build.

use log::warn;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// The kind of decision a diagnostic reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum DiagnosticKind {
    /// Shape type outside the drawing vocabulary (after alias resolution). Element dropped.
    InvalidShapeType,
    /// Table without a usable `rows` sequence. Element dropped.
    MissingTableRows,
    /// Table rows had differing lengths and were padded with empty cells.
    TableRowsPadded,
    /// Chart without a usable `data` sequence. Element dropped.
    MissingChartData,
    /// A chart series that is not an object was skipped.
    MalformedChartSeries,
    /// Unrecognized chart type; the bar kind was substituted.
    UnknownChartType,
    /// Doughnut hole size above the renderer limit was clamped.
    HoleSizeClamped,
    /// Image element without `props.path`. Element dropped.
    MissingImagePath,
    /// Image element whose path does not exist. Element dropped.
    MissingImageFile,
    /// Element `type` outside shape/text/table/chart/image. Element dropped.
    UnknownElementType,
    /// Element payload could not be read (missing props, negative geometry, wrong field types).
    MalformedElement,
    /// Slide payload could not be read; the slide was skipped.
    MalformedSlide,
    /// Slide key is not a non-negative integer; the slide was skipped.
    InvalidSlideKey,
    /// Full build of a deck without an entry slide (`"0"`).
    MissingEntrySlide,
    /// A numeric rendering hint (`fontSize`, `holeSize`) that is not a number was ignored.
    IgnoredHint,
}

impl DiagnosticKind {
    /// Stable code for callers that surface diagnostics to users.
    pub fn code(&self) -> &'static str {
        match self {
            Self::InvalidShapeType => "DECK001",
            Self::MissingTableRows => "DECK002",
            Self::TableRowsPadded => "DECK003",
            Self::MissingChartData => "DECK004",
            Self::MalformedChartSeries => "DECK005",
            Self::UnknownChartType => "DECK006",
            Self::HoleSizeClamped => "DECK007",
            Self::MissingImagePath => "DECK008",
            Self::MissingImageFile => "DECK009",
            Self::UnknownElementType => "DECK010",
            Self::MalformedElement => "DECK011",
            Self::MalformedSlide => "DECK012",
            Self::InvalidSlideKey => "DECK013",
            Self::MissingEntrySlide => "DECK014",
            Self::IgnoredHint => "DECK015",
        }
    }

    /// Whether this finding means content was left out of the document.
    pub fn is_rejection(&self) -> bool {
        !matches!(
            self,
            Self::TableRowsPadded
                | Self::UnknownChartType
                | Self::HoleSizeClamped
                | Self::IgnoredHint
        )
    }
}

/// A single non-fatal finding, with enough context to log or surface it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Diagnostic {
    pub kind: DiagnosticKind,
    /// Key of the slide being assembled, if the finding is slide-scoped.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub slide_key: Option<String>,
    /// Position of the element in the slide's element list (after title deduplication).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub element_index: Option<usize>,
    pub message: String,
    /// The raw payload that triggered the finding.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub payload: Option<Value>,
}

/// Collects diagnostics for one assembly pass, logging each as it arrives.
#[derive(Debug, Default, Clone)]
pub struct Diagnostics {
    entries: Vec<Diagnostic>,
}

impl Diagnostics {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a finding and mirrors it to the log.
    pub fn report(&mut self, diagnostic: Diagnostic) {
        warn!("{}", diagnostic);
        self.entries.push(diagnostic);
    }

    pub(crate) fn extend(&mut self, other: impl IntoIterator<Item = Diagnostic>) {
        self.entries.extend(other);
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Diagnostic> {
        self.entries.iter()
    }

    /// Number of findings of the given kind.
    pub fn count(&self, kind: DiagnosticKind) -> usize {
        self.entries.iter().filter(|d| d.kind == kind).count()
    }

    pub fn into_vec(self) -> Vec<Diagnostic> {
        self.entries
    }
}

impl std::fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "[{}] slide {} element ",
            self.kind.code(),
            self.slide_key.as_deref().unwrap_or("-")
        )?;
        match self.element_index {
            Some(index) => write!(f, "{}", index)?,
            None => f.write_str("-")?,
        }
        write!(f, ": {}", self.message)
    }
}

impl Diagnostic {
    pub fn new(kind: DiagnosticKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            slide_key: None,
            element_index: None,
            message: message.into(),
            payload: None,
        }
    }

    pub fn on_slide(mut self, key: impl Into<String>) -> Self {
        self.slide_key = Some(key.into());
        self
    }

    pub fn at_element(mut self, index: usize) -> Self {
        self.element_index = Some(index);
        self
    }

    pub fn with_payload(mut self, payload: Value) -> Self {
        self.payload = Some(payload);
        self
    }
}
