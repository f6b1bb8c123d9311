use thiserror::Error;

use crate::parser::Category;

/// Errors raised while rendering a message.
///
/// A failed call leaves the memoization cache untouched.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum FormatError {
    #[error("variable '{name}' was not provided for \"{template}\"")]
    MissingVariable { name: String, template: String },

    #[error("no serializer registered for '{plugin}' (argument '{variable}')")]
    MissingSerializer { plugin: String, variable: String },

    #[error("value of '{name}' cannot be rendered as text")]
    NotRenderable { name: String },

    #[error("value of '{name}' is not a number: {value}")]
    NotANumber { name: String, value: String },

    #[error("value of '{name}' is not a date: {value}")]
    InvalidDate { name: String, value: String },

    #[error("value of '{name}' is not a render function")]
    NotCallable { name: String },

    #[error("plural '{variable}' has no '{category}' branch and no 'other' branch")]
    MissingBranch { variable: String, category: Category },

    #[error("'{plugin}' received parameters of an unexpected type")]
    InvalidParams { plugin: String },
}
