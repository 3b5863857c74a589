use thiserror::Error;

/// Failure of the single-string parse entry point.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    /// No rule in the catalog matched the input.
    #[error("no naming rule matched '{input}'")]
    NoMatch { input: String },
}

/// A captured substring that could not be turned into its typed field.
///
/// Only ever used to drop a single rule's candidacy; it never leaves the parser.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub(crate) enum FieldError {
    #[error("{field} value '{value}' is not a number")]
    Number { field: &'static str, value: String },
    #[error("air date '{0}' could not be resolved")]
    AirDate(String),
}

/// Errors raised by the reconciliation merge step.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ReconcileError {
    #[error("invalid merge field given: {0}")]
    InvalidFieldSpecifier(String),
}

/// Errors raised while building a pattern catalog.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("rule '{rule}' has an invalid pattern: {source}")]
    InvalidPattern {
        rule: String,
        #[source]
        source: Box<fancy_regex::Error>,
    },
    #[error("rule '{rule}' failed self-test on '{input}': {reason}")]
    SelfTestFailed {
        rule: String,
        input: String,
        reason: String,
    },
    #[error("catalog contains no usable rules")]
    Empty,
    #[error("failed to read catalog file: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to decode catalog file: {0}")]
    Json(#[from] serde_json::Error),
}
