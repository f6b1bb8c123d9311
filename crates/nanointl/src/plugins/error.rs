//! Errors raised by plugins at registration and parse time.

use thiserror::Error;

use crate::suggest::did_you_mean;

/// A plugin parser rejected the options part of an argument.
#[derive(Debug, Error)]
pub enum SkeletonError {
    /// A skeleton stem that is not recognized.
    #[error("unknown skeleton token '{token}'{}", did_you_mean(.suggestions))]
    UnknownToken {
        token: String,
        suggestions: Vec<String>,
    },

    /// A pattern character that is not recognized.
    #[error("unknown skeleton symbol '{symbol}' in '{token}'")]
    UnknownSymbol { symbol: char, token: String },

    /// A stem option that does not fit its stem, e.g. `scale/abc`.
    #[error("invalid option '{option}' for '{token}'")]
    InvalidOption { token: String, option: String },

    /// Skeleton text the tokenizer could not split.
    #[error("malformed skeleton '{skeleton}' at offset {offset}")]
    Malformed { skeleton: String, offset: usize },

    /// A stem used without its required option, e.g. a bare `currency`.
    #[error("'{token}' requires an option")]
    MissingOption { token: String },

    /// Caller-provided verbose options that do not deserialize.
    #[error("invalid verbose options: {source}")]
    Verbose {
        #[source]
        source: serde_json::Error,
    },
}

/// A plugin failed to initialize.
#[derive(Debug, Error)]
#[error("{message}")]
pub struct PluginError {
    message: String,
}

impl PluginError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}
