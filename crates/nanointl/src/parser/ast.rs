//! Public AST types for message templates.
//!
//! These types are public so plugins and external tooling can build, walk and
//! rewrite message trees.

use std::collections::BTreeMap;
use std::fmt::{self, Display, Formatter};
use std::mem;

use serde::Serialize;

use crate::types::PluginParams;

/// A node of a parsed message.
#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    /// Plain text.
    Literal(String),

    /// Text produced by quoting (`'{literal}'` or `''`). Serialized like
    /// [`Node::Literal`] but never re-scanned by post-parsers.
    Escaped(String),

    /// Simple interpolation: `{name}`.
    Variable {
        name: String,
        /// Subtracted from numeric values before rendering.
        offset: Option<i64>,
    },

    /// `{n, plural, …}` or `{n, selectordinal, …}`.
    Plural(Plural),

    /// `{gender, select, …}`.
    Select(Select),

    /// A node rendered by a plugin: number, date and time arguments, tags
    /// and markdown spans.
    External(External),
}

impl Node {
    pub fn literal(text: impl Into<String>) -> Self {
        Node::Literal(text.into())
    }

    pub fn variable(name: impl Into<String>) -> Self {
        Node::Variable {
            name: name.into(),
            offset: None,
        }
    }

    /// Text content of literal and escaped nodes.
    pub fn text(&self) -> Option<&str> {
        match self {
            Node::Literal(text) | Node::Escaped(text) => Some(text),
            _ => None,
        }
    }
}

/// Whether a plural argument selects by cardinal or ordinal rules.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PluralKind {
    /// `plural`: one book, two books.
    Cardinal,
    /// `selectordinal`: 1st, 2nd, 3rd.
    Ordinal,
}

impl PluralKind {
    pub fn keyword(self) -> &'static str {
        match self {
            PluralKind::Cardinal => "plural",
            PluralKind::Ordinal => "selectordinal",
        }
    }
}

/// CLDR plural category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Zero,
    One,
    Two,
    Few,
    Many,
    Other,
}

impl Category {
    pub const ALL: [Category; 6] = [
        Category::Zero,
        Category::One,
        Category::Two,
        Category::Few,
        Category::Many,
        Category::Other,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Category::Zero => "zero",
            Category::One => "one",
            Category::Two => "two",
            Category::Few => "few",
            Category::Many => "many",
            Category::Other => "other",
        }
    }

    /// Parse a category keyword such as `one` or `many`.
    pub fn from_keyword(keyword: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|category| category.as_str() == keyword)
    }
}

impl Display for Category {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A plural or ordinal argument.
#[derive(Debug, Clone, PartialEq)]
pub struct Plural {
    pub variable: String,
    pub kind: PluralKind,
    /// Value of `offset:N`, subtracted before category selection.
    pub offset: Option<i64>,
    /// `=N {…}` branches, matched against the raw value.
    pub exact_branches: BTreeMap<i64, Vec<Node>>,
    pub category_branches: BTreeMap<Category, Vec<Node>>,
}

impl Plural {
    pub fn new(variable: impl Into<String>, kind: PluralKind) -> Self {
        Self {
            variable: variable.into(),
            kind,
            offset: None,
            exact_branches: BTreeMap::new(),
            category_branches: BTreeMap::new(),
        }
    }

    pub fn is_cardinal(&self) -> bool {
        self.kind == PluralKind::Cardinal
    }

    /// Every branch body, exact branches first.
    pub fn branches(&self) -> impl Iterator<Item = &Vec<Node>> {
        self.exact_branches
            .values()
            .chain(self.category_branches.values())
    }

    pub(crate) fn branches_mut(&mut self) -> impl Iterator<Item = &mut Vec<Node>> {
        self.exact_branches
            .values_mut()
            .chain(self.category_branches.values_mut())
    }
}

/// A select argument.
#[derive(Debug, Clone, PartialEq)]
pub struct Select {
    pub variable: String,
    pub branches: BTreeMap<String, Vec<Node>>,
}

/// An argument rendered by a plugin serializer.
#[derive(Debug, Clone, PartialEq)]
pub struct External {
    /// Plugin token, e.g. `number`, `date` or `tag`.
    pub plugin: String,
    /// Name of the argument, or of the callback for tags and markdown.
    pub variable: String,
    /// Options text after the token, as written.
    pub raw_template: String,
    /// Parameters produced by the plugin parser.
    pub params: Option<PluginParams>,
    /// Whether the argument had an options part: `{n, number, ::percent}`
    /// rather than `{n, number}`.
    pub has_options: bool,
    pub children: Vec<Node>,
}

impl External {
    pub fn new(plugin: impl Into<String>, variable: impl Into<String>) -> Self {
        Self {
            plugin: plugin.into(),
            variable: variable.into(),
            raw_template: String::new(),
            params: None,
            has_options: false,
            children: Vec::new(),
        }
    }

    pub fn has_children(&self) -> bool {
        !self.children.is_empty()
    }
}

/// Parameters attached to a `#` inside a plural branch.
///
/// The number serializer subtracts `offset` before formatting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PluralOffset {
    pub offset: i64,
}

/// Apply `rewrite` to every node list nested in plural and select branches
/// and external children, then to `nodes` itself.
///
/// Post-parsers use this to reach text inside branches.
pub fn rewrite_branches<E>(
    nodes: Vec<Node>,
    rewrite: &mut impl FnMut(Vec<Node>) -> Result<Vec<Node>, E>,
) -> Result<Vec<Node>, E> {
    let mut nested = Vec::with_capacity(nodes.len());
    for node in nodes {
        let node = match node {
            Node::Plural(mut plural) => {
                for branch in plural.branches_mut() {
                    *branch = rewrite_branches(mem::take(branch), rewrite)?;
                }
                Node::Plural(plural)
            }
            Node::Select(mut select) => {
                for branch in select.branches.values_mut() {
                    *branch = rewrite_branches(mem::take(branch), rewrite)?;
                }
                Node::Select(select)
            }
            Node::External(mut external) => {
                external.children = rewrite_branches(mem::take(&mut external.children), rewrite)?;
                Node::External(external)
            }
            other => other,
        };
        nested.push(node);
    }
    rewrite(nested)
}
