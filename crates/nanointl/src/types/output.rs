use std::fmt::{self, Display, Formatter};

use super::value::Object;

/// One piece of rich output.
#[derive(Debug, Clone, PartialEq)]
pub enum Chunk {
    Text(String),
    Object(Object),
}

impl Chunk {
    pub fn text(text: impl Into<String>) -> Self {
        Chunk::Text(text.into())
    }
}

impl Display for Chunk {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Chunk::Text(text) => f.write_str(text),
            Chunk::Object(object) => write!(f, "{object:?}"),
        }
    }
}

/// The result of formatting a message.
///
/// Stays [`Output::Text`] until an object is produced, then becomes a
/// sequence of chunks in which adjacent text is merged.
///
/// # Example
///
/// ```
/// use nanointl::{Chunk, Output};
///
/// let out = Output::from("Hello");
/// assert_eq!(out.as_text(), Some("Hello"));
///
/// let rich = Output::Rich(vec![Chunk::text("a"), Chunk::text("b")]);
/// assert_eq!(rich.to_string(), "ab");
/// ```
#[derive(Debug, Clone, PartialEq)]
pub enum Output {
    Text(String),
    Rich(Vec<Chunk>),
}

impl Output {
    pub fn empty() -> Self {
        Output::Text(String::new())
    }

    /// The text of a plain output.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Output::Text(text) => Some(text),
            Output::Rich(_) => None,
        }
    }

    pub fn is_empty(&self) -> bool {
        match self {
            Output::Text(text) => text.is_empty(),
            Output::Rich(chunks) => chunks.is_empty(),
        }
    }

    /// Split into chunks; an empty text output yields no chunks.
    pub fn into_chunks(self) -> Vec<Chunk> {
        match self {
            Output::Text(text) if text.is_empty() => Vec::new(),
            Output::Text(text) => vec![Chunk::Text(text)],
            Output::Rich(chunks) => chunks,
        }
    }
}

impl Default for Output {
    fn default() -> Self {
        Output::empty()
    }
}

impl Display for Output {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Output::Text(text) => f.write_str(text),
            Output::Rich(chunks) => chunks.iter().try_for_each(|chunk| write!(f, "{chunk}")),
        }
    }
}

impl From<String> for Output {
    fn from(text: String) -> Self {
        Output::Text(text)
    }
}

impl From<&str> for Output {
    fn from(text: &str) -> Self {
        Output::Text(text.to_string())
    }
}

impl From<Object> for Output {
    fn from(object: Object) -> Self {
        Output::Rich(vec![Chunk::Object(object)])
    }
}
