//! Plugin protocol for external argument types.
//!
//! A plugin registers up to three kinds of functions while an [`Intl`] is
//! being built:
//!
//! - **parsers** turn the options text of `{name, token, options}` into
//!   [`PluginParams`],
//! - **serializers** render external nodes carrying their token,
//! - **post-parsers** rewrite the whole tree after the brace parse (tags and
//!   markdown are implemented this way).
//!
//! [`Intl`]: crate::Intl

mod datetime;
mod error;
mod markdown;
mod number;
mod tags;

use std::collections::HashMap;
use std::fmt::{self, Debug, Formatter};
use std::sync::Arc;

use serde_json::Value as JsonValue;

pub use datetime::{DateTimeParams, DateTimePlugin, parse_datetime_skeleton};
pub use error::{PluginError, SkeletonError};
pub use markdown::{
    LinkTarget, MARKDOWN_TOKEN, MarkdownParser, MarkdownPlugin, MarkdownToken, parse_markdown,
};
pub(crate) use number::NUMBER_STEMS;
pub use number::{NumberParams, NumberPlugin, parse_number_skeleton};
pub use tags::{TAG_TOKEN, TagsParser, TagsPlugin, parse_tags};

use crate::parser::{Node, ParseError};
use crate::serializer::{FormatError, SerializeCall};
use crate::types::{Output, PluginParams};

/// Parser signature: `(raw_template, variable_name, verbose_override)`.
pub type ParserFn =
    dyn Fn(&str, &str, Option<&JsonValue>) -> Result<PluginParams, SkeletonError> + Send + Sync;

/// Serializer signature for external nodes.
pub type SerializerFn = dyn Fn(&SerializeCall<'_>) -> Result<Output, FormatError> + Send + Sync;

/// Post-parser signature: rewrites a parsed message.
pub type PostParserFn = dyn Fn(Vec<Node>) -> Result<Vec<Node>, ParseError> + Send + Sync;

/// An extension that registers parsers, serializers and post-parsers.
pub trait Plugin: Send + Sync {
    /// Name used in error messages.
    fn name(&self) -> &str;

    /// Register this plugin's functions.
    fn init(&self, registry: &mut PluginRegistry) -> Result<(), PluginError>;
}

/// The built-in plugins: numbers, dates and times, tags and markdown.
pub fn default_plugins() -> Vec<Arc<dyn Plugin>> {
    vec![
        Arc::new(NumberPlugin),
        Arc::new(DateTimePlugin),
        Arc::new(TagsPlugin::new()),
        Arc::new(MarkdownPlugin),
    ]
}

/// Functions registered by plugins, keyed by token.
///
/// Registering a token twice replaces the earlier function.
#[derive(Clone, Default)]
pub struct PluginRegistry {
    parsers: HashMap<String, Arc<ParserFn>>,
    serializers: HashMap<String, Arc<SerializerFn>>,
    post_parsers: Vec<Arc<PostParserFn>>,
}

impl PluginRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register the options parser for `token`.
    pub fn add_parser<F>(&mut self, token: impl Into<String>, parser: F)
    where
        F: Fn(&str, &str, Option<&JsonValue>) -> Result<PluginParams, SkeletonError>
            + Send
            + Sync
            + 'static,
    {
        self.parsers.insert(token.into(), Arc::new(parser));
    }

    /// Register the serializer for external nodes with `token`.
    pub fn add_serializer<F>(&mut self, token: impl Into<String>, serializer: F)
    where
        F: Fn(&SerializeCall<'_>) -> Result<Output, FormatError> + Send + Sync + 'static,
    {
        self.serializers.insert(token.into(), Arc::new(serializer));
    }

    /// Append a post-parser; post-parsers run in registration order.
    pub fn add_post_parser<F>(&mut self, post_parser: F)
    where
        F: Fn(Vec<Node>) -> Result<Vec<Node>, ParseError> + Send + Sync + 'static,
    {
        self.post_parsers.push(Arc::new(post_parser));
    }

    pub fn parser(&self, token: &str) -> Option<&ParserFn> {
        self.parsers.get(token).map(|parser| &**parser)
    }

    pub fn serializer(&self, token: &str) -> Option<&SerializerFn> {
        self.serializers.get(token).map(|serializer| &**serializer)
    }

    pub fn has_parser(&self, token: &str) -> bool {
        self.parsers.contains_key(token)
    }

    /// Tokens with a registered parser, in no particular order.
    pub fn parser_tokens(&self) -> impl Iterator<Item = &str> {
        self.parsers.keys().map(String::as_str)
    }

    pub fn post_parsers(&self) -> impl Iterator<Item = &PostParserFn> {
        self.post_parsers.iter().map(|post_parser| &**post_parser)
    }

    /// Run every post-parser over `nodes`, in order.
    pub fn run_post_parsers(&self, nodes: Vec<Node>) -> Result<Vec<Node>, ParseError> {
        self.post_parsers()
            .try_fold(nodes, |nodes, post_parser| post_parser(nodes))
    }
}

impl Debug for PluginRegistry {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let mut parsers: Vec<&str> = self.parsers.keys().map(String::as_str).collect();
        parsers.sort_unstable();
        let mut serializers: Vec<&str> = self.serializers.keys().map(String::as_str).collect();
        serializers.sort_unstable();
        f.debug_struct("PluginRegistry")
            .field("parsers", &parsers)
            .field("serializers", &serializers)
            .field("post_parsers", &self.post_parsers.len())
            .finish()
    }
}
