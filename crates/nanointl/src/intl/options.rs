use std::fmt::{self, Debug, Formatter};
use std::sync::Arc;

use bon::Builder;

use crate::parser::VerboseParsing;
use crate::plugins::Plugin;

/// Options for [`build_intl`](super::build_intl).
///
/// No plugins are installed by default; pass
/// [`default_plugins`](crate::plugins::default_plugins) for numbers, dates,
/// tags and markdown.
///
/// # Example
///
/// ```
/// use nanointl::IntlOptions;
/// use nanointl::plugins::default_plugins;
///
/// let options = IntlOptions::builder()
///     .plugins(default_plugins())
///     .cache_capacity(1024)
///     .build();
/// assert!(!options.disable_cache);
/// ```
#[derive(Clone, Default, Builder)]
pub struct IntlOptions {
    /// Plugins initialized in order.
    #[builder(default)]
    pub plugins: Vec<Arc<dyn Plugin>>,

    /// Options for `{name, token, verbose}` arguments, keyed by argument name.
    #[builder(default)]
    pub verbose_parsing: VerboseParsing,

    /// Serialize on every call instead of memoizing.
    #[builder(default)]
    pub disable_cache: bool,

    /// Reset the cache once it holds this many outputs.
    pub cache_capacity: Option<usize>,
}

impl Debug for IntlOptions {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let plugins: Vec<&str> = self.plugins.iter().map(|plugin| plugin.name()).collect();
        f.debug_struct("IntlOptions")
            .field("plugins", &plugins)
            .field("verbose_parsing", &self.verbose_parsing)
            .field("disable_cache", &self.disable_cache)
            .field("cache_capacity", &self.cache_capacity)
            .finish()
    }
}
