//! Error types for rule-set loading, vector assembly and classification.

use thiserror::Error;

/// Errors that can occur while loading resources or running the feature pipeline.
///
/// The leaf extractors (structure parser, structural extractor, suffix
/// resolver) are total and never produce one of these.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum UrlLexError {
    /// A line of public suffix rule text could not be parsed.
    #[error("Invalid suffix rule on line {line} ({rule:?}): {reason}")]
    RuleSyntax {
        line: usize,
        rule: String,
        reason: String,
    },

    /// The assembled vector broke its fixed-length contract or lost a value.
    #[error("Feature contract violation: {0}")]
    ContractViolation(String),

    /// A classifier artifact expects a different feature layout.
    #[error("Feature layout mismatch: expected {expected}, got {actual}")]
    LayoutMismatch { expected: String, actual: String },

    /// The classification artifact failed during inference.
    #[error("Classification failed: {0}")]
    Boundary(String),

    /// A classifier artifact could not be loaded.
    #[error("Invalid model artifact: {0}")]
    Model(String),

    /// Configuration file could not be parsed.
    #[error("Invalid configuration: {0}")]
    Config(String),

    /// Reading a rule set, model, or config file failed.
    #[error("I/O error: {0}")]
    Io(String),
}

impl From<std::io::Error> for UrlLexError {
    fn from(err: std::io::Error) -> Self {
        UrlLexError::Io(err.to_string())
    }
}

impl From<toml::de::Error> for UrlLexError {
    fn from(err: toml::de::Error) -> Self {
        UrlLexError::Config(err.to_string())
    }
}

impl From<serde_json::Error> for UrlLexError {
    fn from(err: serde_json::Error) -> Self {
        UrlLexError::Model(err.to_string())
    }
}
