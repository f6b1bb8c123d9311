//! Miette diagnostic wrapper for message parse errors.
//!
//! Note: This module has an exception for `unused_assignments` because miette
//! derive macros read struct fields in generated code that rustc cannot track.
#![expect(unused_assignments)]

use std::path::Path;

use miette::{Diagnostic, NamedSource, SourceSpan};
use nanointl::ParseError;
use thiserror::Error;

/// A parse error of one message, shown against its template.
///
/// Note: Fields are read by miette derive macros, not directly by code.
#[derive(Debug, Error, Diagnostic)]
#[error("message '{id}': {message}")]
#[diagnostic(code(nanointl::syntax))]
pub struct MessageDiagnostic {
    id: String,

    #[source_code]
    src: NamedSource<String>,

    #[label("error here")]
    span: SourceSpan,

    message: String,

    #[help]
    help: Option<String>,
}

impl MessageDiagnostic {
    /// Errors without a position underline the whole template.
    pub fn from_parse_error(path: &Path, id: &str, template: &str, err: &ParseError) -> Self {
        let span: SourceSpan = match err.position() {
            Some(position) => {
                let offset = position.min(template.len());
                let width = template
                    .get(offset..)
                    .and_then(|rest| rest.chars().next())
                    .map_or(0, char::len_utf8);
                (offset, width).into()
            }
            None => (0, template.len()).into(),
        };
        let help = match err {
            ParseError::MissingParser { plugin, .. } => {
                Some(format!("no plugin handles '{plugin}' arguments"))
            }
            ParseError::UnterminatedBrace { .. } => Some("add the missing '}'".to_string()),
            _ => None,
        };

        MessageDiagnostic {
            id: id.to_string(),
            src: NamedSource::new(format!("{}#{id}", path.display()), template.to_string()),
            span,
            message: err.to_string(),
            help,
        }
    }
}
