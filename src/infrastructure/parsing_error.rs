//! Parsing error types for page readiness and field extraction
//!
//! Readiness failures propagate to the caller as typed errors. Extraction
//! misses are not errors at all: they degrade to `None` fields.

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParsingError {
    #[error("waitForElement timed out ({timeout_ms} ms) waiting for {selector}")]
    Timeout { selector: String, timeout_ms: u64 },

    #[error("No parser applies to {}", url.as_deref().unwrap_or("<unknown url>"))]
    NoParserApplies { url: Option<String> },

    #[error("Parser '{parser}' used before page readiness was confirmed")]
    NotReady { parser: String },

    #[error("Wait for {selector} was cancelled")]
    Cancelled { selector: String },

    #[error("Invalid CSS selector: {selector} - {reason}")]
    InvalidSelector { selector: String, reason: String },

    #[error("Field '{field}' is not supported by parser '{parser}'")]
    UnsupportedField { field: String, parser: String },
}

impl ParsingError {
    pub fn timeout(selector: &str, timeout_ms: u64) -> Self {
        Self::Timeout {
            selector: selector.to_string(),
            timeout_ms,
        }
    }

    pub fn no_parser_applies(url: Option<&str>) -> Self {
        Self::NoParserApplies {
            url: url.map(str::to_string),
        }
    }

    pub fn not_ready(parser: &str) -> Self {
        Self::NotReady {
            parser: parser.to_string(),
        }
    }

    pub fn cancelled(selector: &str) -> Self {
        Self::Cancelled {
            selector: selector.to_string(),
        }
    }

    pub fn invalid_selector(selector: &str, reason: impl ToString) -> Self {
        Self::InvalidSelector {
            selector: selector.to_string(),
            reason: reason.to_string(),
        }
    }

    pub fn unsupported_field(field: &str, parser: &str) -> Self {
        Self::UnsupportedField {
            field: field.to_string(),
            parser: parser.to_string(),
        }
    }

    /// Short machine-readable tag used in response envelopes
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::Timeout { .. } => "timeout",
            Self::NoParserApplies { .. } => "no_parser",
            Self::NotReady { .. } => "not_ready",
            Self::Cancelled { .. } => "cancelled",
            Self::InvalidSelector { .. } => "invalid_selector",
            Self::UnsupportedField { .. } => "unsupported_field",
        }
    }

    /// Whether the caller may retry the same request
    pub const fn is_recoverable(&self) -> bool {
        match self {
            Self::Timeout { .. } => true,
            Self::Cancelled { .. } => true,
            Self::NotReady { .. } => true,
            Self::NoParserApplies { .. } => false,
            Self::InvalidSelector { .. } => false,
            Self::UnsupportedField { .. } => false,
        }
    }

    /// "Nothing to extract" outcomes that leave the form blank rather than
    /// reporting a fault
    pub const fn is_benign(&self) -> bool {
        matches!(self, Self::NoParserApplies { .. } | Self::Cancelled { .. })
    }
}

pub type ParsingResult<T> = Result<T, ParsingError>;
