// src/error.rs
use thiserror::Error;

/// Errors raised before a request leaves the console.
#[derive(Debug, Error)]
pub enum ConsoleError {
    #[error("unknown modal trigger: {0}")]
    UnknownTrigger(String),

    #[error("element {selector} has no {attribute} attribute")]
    MissingAttribute { selector: String, attribute: String },

    #[error("form field {0} is missing")]
    MissingField(String),

    #[error("invalid configuration: {0}")]
    Config(String),

    #[error("failed to encode request: {0}")]
    Encode(#[from] serde_json::Error),
}

/// Failure attached to a settled submission.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SubmitError {
    #[error("server rejected request with status {status}")]
    Rejected { status: u16 },

    #[error("network error: {0}")]
    Network(String),

    #[error("response carried no Location header")]
    MissingLocation,
}
