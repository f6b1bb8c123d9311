//! The message catalog runtime.
//!
//! An [`Intl`] owns a locale, the plugin registry built from its options,
//! the parsed tree of every message and a memoization cache. Parsing happens
//! once, at construction; a malformed message fails the whole build.

mod cache;
mod catalog;
mod error;
mod options;

use std::sync::Arc;

use bon::bon;
use indexmap::IndexMap;
use parking_lot::Mutex;
use tracing::{debug, trace};

pub use cache::CacheStats;
pub use catalog::Catalog;
pub use error::{BuildError, LoadError};
pub use options::IntlOptions;

use cache::MessageCache;

use crate::locale::LocaleContext;
use crate::parser::{Node, ParseOptions, VerboseParsing, parse_message};
use crate::plugins::{Plugin, PluginRegistry};
use crate::serializer::{FormatError, Serializer};
use crate::types::{Output, Values};

#[derive(Debug, Clone)]
struct Message {
    template: String,
    nodes: Vec<Node>,
}

/// Build an [`Intl`] for `locale` from a set of messages.
///
/// Every plugin is initialized in order, then every message is parsed and
/// post-parsed. The first failure aborts the build.
///
/// # Example
///
/// ```
/// use nanointl::{IntlOptions, build_intl, values};
///
/// let intl = build_intl(
///     "en",
///     [("books", "{count, plural, =0 {no books} one {# book} other {# books}}")],
///     IntlOptions::default(),
/// )
/// .unwrap();
///
/// let out = intl.format_message("books", &values! { "count" => 3 }).unwrap();
/// assert_eq!(out.to_string(), "3 books");
/// ```
pub fn build_intl(
    locale: &str,
    messages: impl Into<Catalog>,
    options: IntlOptions,
) -> Result<Intl, BuildError> {
    let locale = LocaleContext::new(locale)?;
    let mut registry = PluginRegistry::new();
    for plugin in &options.plugins {
        plugin
            .init(&mut registry)
            .map_err(|source| BuildError::Plugin {
                plugin: plugin.name().to_string(),
                source,
            })?;
        debug!(plugin = plugin.name(), "initialized plugin");
    }

    let catalog: Catalog = messages.into();
    let parse_options = ParseOptions::new(&registry).with_verbose(&options.verbose_parsing);
    let mut parsed = IndexMap::with_capacity(catalog.len());
    for (id, template) in &catalog {
        let nodes = parse_message(template, &parse_options).map_err(|source| BuildError::Parse {
            id: id.clone(),
            source,
        })?;
        parsed.insert(
            id.clone(),
            Message {
                template: template.clone(),
                nodes,
            },
        );
    }
    debug!(locale = locale.tag(), messages = parsed.len(), "parsed catalog");

    Ok(Intl {
        locale,
        registry,
        messages: parsed,
        cache: Mutex::new(MessageCache::new(options.cache_capacity)),
        disable_cache: options.disable_cache,
    })
}

/// Formats the messages of one catalog in one locale.
///
/// `Intl` is `Send + Sync`. The cache lock is held only while looking up or
/// storing an output, never while a message is being serialized.
#[derive(Debug)]
pub struct Intl {
    locale: LocaleContext,
    registry: PluginRegistry,
    messages: IndexMap<String, Message>,
    cache: Mutex<MessageCache>,
    disable_cache: bool,
}

#[bon]
impl Intl {
    /// Builder front end for [`build_intl`].
    ///
    /// ```
    /// use nanointl::Intl;
    /// use nanointl::plugins::default_plugins;
    ///
    /// let intl = Intl::builder()
    ///     .locale("en")
    ///     .messages([("share", "{ratio, number, ::percent}")])
    ///     .plugins(default_plugins())
    ///     .build()
    ///     .unwrap();
    /// assert_eq!(intl.message_ids().collect::<Vec<_>>(), vec!["share"]);
    /// ```
    #[builder]
    pub fn new(
        #[builder(into)] locale: String,
        #[builder(into)] messages: Catalog,
        #[builder(default)] plugins: Vec<Arc<dyn Plugin>>,
        #[builder(default)] verbose_parsing: VerboseParsing,
        #[builder(default)] disable_cache: bool,
        cache_capacity: Option<usize>,
    ) -> Result<Self, BuildError> {
        let options = IntlOptions {
            plugins,
            verbose_parsing,
            disable_cache,
            cache_capacity,
        };
        build_intl(&locale, messages, options)
    }
}

impl Intl {
    /// Format message `id` with `values`.
    ///
    /// Unknown ids format to the id itself. Repeated calls with the same
    /// values, in the same order, return the memoized output; objects and
    /// callbacks match only when they are the very same instance.
    pub fn format_message(&self, id: &str, values: &Values) -> Result<Output, FormatError> {
        let Some(message) = self.messages.get(id) else {
            trace!(id, "unknown message id");
            return Ok(Output::Text(id.to_string()));
        };
        if !self.disable_cache {
            let cached = self.cache.lock().get(id, values);
            if let Some(output) = cached {
                trace!(id, "cache hit");
                return Ok(output);
            }
            trace!(id, "cache miss");
        }
        let output = Serializer::new(values, &self.locale, &self.registry)
            .with_template(&message.template)
            .serialize(&message.nodes)?;
        if !self.disable_cache {
            self.cache.lock().insert(id, values, output.clone());
        }
        Ok(output)
    }

    /// [`format_message`](Self::format_message) flattened to a string.
    pub fn format_message_string(&self, id: &str, values: &Values) -> Result<String, FormatError> {
        Ok(self.format_message(id, values)?.to_string())
    }

    pub fn clear_cache(&self) {
        self.cache.lock().clear();
    }

    pub fn cache_stats(&self) -> CacheStats {
        self.cache.lock().stats()
    }

    pub fn locale(&self) -> &LocaleContext {
        &self.locale
    }

    pub fn registry(&self) -> &PluginRegistry {
        &self.registry
    }

    /// Message ids in catalog order.
    pub fn message_ids(&self) -> impl Iterator<Item = &str> {
        self.messages.keys().map(String::as_str)
    }

    /// Parsed tree of message `id`.
    pub fn ast(&self, id: &str) -> Option<&[Node]> {
        self.messages.get(id).map(|message| message.nodes.as_slice())
    }

    /// Source template of message `id`.
    pub fn template(&self, id: &str) -> Option<&str> {
        self.messages.get(id).map(|message| message.template.as_str())
    }
}
