//! CLI command implementations.

mod check;
mod coverage;
mod eval;
mod vars;

use std::path::Path;
use std::sync::Arc;

use miette::{IntoDiagnostic, Result, WrapErr};
use nanointl::plugins::{
    DateTimePlugin, MarkdownPlugin, NumberPlugin, Plugin, PluginRegistry, TagsPlugin,
};
use nanointl::types::Callback;
use nanointl::{Catalog, Output};

pub use check::{CheckArgs, run_check};
pub use coverage::{CoverageArgs, run_coverage};
pub use eval::{EvalArgs, run_eval};
pub use vars::{VarsArgs, run_vars};

/// Read a catalog, turning load failures into a report.
fn load_catalog(path: &Path) -> Result<Catalog> {
    Catalog::load(path)
        .into_diagnostic()
        .wrap_err_with(|| format!("cannot load catalog {}", path.display()))
}

/// The built-in plugins. Tags without a render function are echoed as
/// markup, since command-line values cannot be callbacks.
fn cli_plugins() -> Vec<Arc<dyn Plugin>> {
    let echo = Callback::new(|props| {
        Output::Text(format!("<{0}>{1}</{0}>", props.tag, props.children))
    });
    vec![
        Arc::new(NumberPlugin),
        Arc::new(DateTimePlugin),
        Arc::new(TagsPlugin::new().with_fallback(echo)),
        Arc::new(MarkdownPlugin),
    ]
}

/// A registry with [`cli_plugins`] installed, for parsing without an `Intl`.
fn cli_registry() -> Result<PluginRegistry> {
    let mut registry = PluginRegistry::new();
    for plugin in cli_plugins() {
        plugin
            .init(&mut registry)
            .into_diagnostic()
            .wrap_err_with(|| format!("plugin '{}' failed to initialize", plugin.name()))?;
    }
    Ok(registry)
}
