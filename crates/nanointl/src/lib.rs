//! ICU MessageFormat style message templates.
//!
//! Messages are parsed once by [`build_intl`] into a tree of literals,
//! variables, plural and select arguments, and plugin nodes. Formatting walks
//! that tree against a set of [`Values`] and memoizes the result.
//!
//! Numbers, dates and times, inline tags and markdown are plugins; see
//! [`plugins::default_plugins`].

pub mod format;
pub mod inspect;
mod intl;
mod locale;
pub mod parser;
pub mod plugins;
pub mod serializer;
mod suggest;
pub mod types;

pub use intl::{BuildError, CacheStats, Catalog, Intl, IntlOptions, LoadError, build_intl};
pub use locale::{LocaleContext, LocaleError};
pub use parser::ParseError;
pub use plugins::{Plugin, PluginError, PluginRegistry, SkeletonError};
pub use serializer::FormatError;
pub use suggest::Vocabulary;
pub use types::{Chunk, Output, Value, Values};

/// Creates a [`Values`] map from key-value pairs, in order.
///
/// Values are converted via `Into<Value>`, so integers, floats, strings,
/// dates and callbacks can be passed directly.
///
/// # Example
///
/// ```
/// use nanointl::{Value, values};
///
/// let v = values! { "count" => 3, "name" => "Alice" };
/// assert_eq!(v.len(), 2);
/// assert_eq!(v["count"], Value::Int(3));
/// assert_eq!(v["name"].as_str(), Some("Alice"));
/// ```
#[macro_export]
macro_rules! values {
    {} => {
        $crate::Values::new()
    };
    { $($key:expr => $value:expr),+ $(,)? } => {
        {
            let mut map = $crate::Values::new();
            $(
                map.insert($key.to_string(), ::std::convert::Into::<$crate::Value>::into($value));
            )+
            map
        }
    };
}
