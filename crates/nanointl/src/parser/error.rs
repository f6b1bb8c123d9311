//! Parse error types for message templates.

use thiserror::Error;

use crate::plugins::SkeletonError;
use crate::suggest::did_you_mean;

/// An error that occurred while parsing a message template.
///
/// Positions are byte offsets into the template.
#[derive(Debug, Error)]
pub enum ParseError {
    /// The template ended inside one or more arguments.
    #[error("unterminated argument: {missing} closing brace(s) missing")]
    UnterminatedBrace { missing: usize },

    /// A `}` with no matching `{`.
    #[error("unbalanced '}}' at {position}")]
    UnbalancedBrace { position: usize },

    /// `{}` or an argument with no variable name.
    #[error("empty argument at {position}")]
    EmptyArgument { position: usize },

    /// The word after the variable name is not a known argument type.
    #[error("unsupported syntax '{keyword}' at {position}{}", did_you_mean(.suggestions))]
    UnsupportedSyntax {
        keyword: String,
        position: usize,
        suggestions: Vec<String>,
    },

    /// A plural branch keyed by something that is not a CLDR category.
    #[error("unknown plural category '{keyword}' at {position}{}", did_you_mean(.suggestions))]
    UnknownCategory {
        keyword: String,
        position: usize,
        suggestions: Vec<String>,
    },

    #[error("invalid plural offset '{value}' at {position}")]
    InvalidOffset { value: String, position: usize },

    #[error("invalid exact match key '{value}' at {position}")]
    InvalidExactKey { value: String, position: usize },

    /// A branch key followed by another key or the end of the argument.
    #[error("branch '{key}' has no body at {position}")]
    MissingBranchBody { key: String, position: usize },

    /// A `{` inside a plural or select argument with no key before it.
    #[error("branch body without a key at {position}")]
    MissingBranchKey { position: usize },

    /// A plural or select argument that declares no branches at all.
    #[error("'{keyword}' argument '{variable}' has no branches at {position}")]
    MissingBranches {
        keyword: String,
        variable: String,
        position: usize,
    },

    /// An external token with options but nothing to parse them.
    #[error("parser for '{plugin}' was not provided (argument '{variable}' at {position})")]
    MissingParser {
        plugin: String,
        variable: String,
        position: usize,
    },

    /// A plugin parser rejected the options of an argument.
    #[error("invalid '{plugin}' options for '{variable}' at {position}: {source}")]
    Skeleton {
        plugin: String,
        variable: String,
        position: usize,
        #[source]
        source: SkeletonError,
    },

    /// A closing tag that does not match the innermost open tag.
    #[error("expected closing tag '</{expected}>', found '</{found}>'")]
    TagMismatch { expected: String, found: String },

    /// A closing tag with no open tag.
    #[error("unexpected closing tag '</{found}>'")]
    UnexpectedClosingTag { found: String },

    /// A tag still open when its text ended.
    #[error("unclosed tag '<{name}>'")]
    UnclosedTag { name: String },
}

impl ParseError {
    /// Byte offset of the error in the template, when known.
    pub fn position(&self) -> Option<usize> {
        match self {
            ParseError::UnbalancedBrace { position }
            | ParseError::EmptyArgument { position }
            | ParseError::UnsupportedSyntax { position, .. }
            | ParseError::UnknownCategory { position, .. }
            | ParseError::InvalidOffset { position, .. }
            | ParseError::InvalidExactKey { position, .. }
            | ParseError::MissingBranchBody { position, .. }
            | ParseError::MissingBranchKey { position }
            | ParseError::MissingBranches { position, .. }
            | ParseError::MissingParser { position, .. }
            | ParseError::Skeleton { position, .. } => Some(*position),
            ParseError::UnterminatedBrace { .. }
            | ParseError::TagMismatch { .. }
            | ParseError::UnexpectedClosingTag { .. }
            | ParseError::UnclosedTag { .. } => None,
        }
    }
}
