//! Errors raised while building an [`Intl`](super::Intl) or loading catalogs.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

use crate::locale::LocaleError;
use crate::parser::ParseError;
use crate::plugins::PluginError;

/// Building an `Intl` failed; no partial catalog is produced.
#[derive(Debug, Error)]
pub enum BuildError {
    #[error(transparent)]
    InvalidLocale(#[from] LocaleError),

    #[error("plugin '{plugin}' failed to initialize: {source}")]
    Plugin {
        plugin: String,
        #[source]
        source: PluginError,
    },

    #[error("message '{id}': {source}")]
    Parse {
        id: String,
        #[source]
        source: ParseError,
    },
}

impl BuildError {
    /// Id of the message that failed to parse.
    pub fn message_id(&self) -> Option<&str> {
        match self {
            BuildError::Parse { id, .. } => Some(id),
            BuildError::InvalidLocale(_) | BuildError::Plugin { .. } => None,
        }
    }
}

/// Errors that occur while loading a message catalog.
#[derive(Debug, Error)]
pub enum LoadError {
    /// The catalog file could not be read.
    #[error("failed to read '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The catalog file is not a JSON object of strings.
    #[error("failed to parse '{path}': {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// Catalog text is not a JSON object of strings.
    #[error("invalid catalog: {source}")]
    InvalidJson {
        #[source]
        source: serde_json::Error,
    },
}
