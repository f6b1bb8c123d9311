//! Rendering of parsed messages.
//!
//! The serializer walks the tree depth-first. Literal text, variables,
//! plural and select arguments are handled here; external nodes go to the
//! serializer a plugin registered for their token.

mod error;
mod reducer;

use std::any::Any;

pub use error::FormatError;
pub use reducer::{NodeKind, Reducer, RichReducer, TextReducer};

use crate::format::NumberOptions;
use crate::locale::LocaleContext;
use crate::parser::{Category, External, Node, Plural, PluralOffset, Select};
use crate::plugins::PluginRegistry;
use crate::types::{Output, PluginParams, Value, Values};

/// Render `nodes` with the default rich reducer.
pub fn serialize(
    nodes: &[Node],
    values: &Values,
    locale: &LocaleContext,
    registry: &PluginRegistry,
) -> Result<Output, FormatError> {
    Serializer::new(values, locale, registry).serialize(nodes)
}

/// Renders nodes against one set of values.
#[derive(Debug, Clone, Copy)]
pub struct Serializer<'a> {
    values: &'a Values,
    locale: &'a LocaleContext,
    registry: &'a PluginRegistry,
    reducer: &'a dyn Reducer,
    template: &'a str,
}

impl<'a> Serializer<'a> {
    pub fn new(values: &'a Values, locale: &'a LocaleContext, registry: &'a PluginRegistry) -> Self {
        Self {
            values,
            locale,
            registry,
            reducer: &RichReducer,
            template: "",
        }
    }

    pub fn with_reducer(mut self, reducer: &'a dyn Reducer) -> Self {
        self.reducer = reducer;
        self
    }

    /// Source text quoted in `MissingVariable` errors.
    pub fn with_template(mut self, template: &'a str) -> Self {
        self.template = template;
        self
    }

    pub fn locale(&self) -> &'a LocaleContext {
        self.locale
    }

    pub fn serialize(&self, nodes: &[Node]) -> Result<Output, FormatError> {
        nodes.iter().try_fold(Output::empty(), |acc, node| {
            let (item, kind) = self.node(node)?;
            Ok(self.reducer.reduce(acc, item, kind))
        })
    }

    fn node(&self, node: &Node) -> Result<(Output, NodeKind), FormatError> {
        match node {
            Node::Literal(text) | Node::Escaped(text) => {
                Ok((Output::from(text.as_str()), NodeKind::Text))
            }
            Node::Variable { name, offset } => {
                Ok((self.variable(name, *offset)?, NodeKind::Variable))
            }
            Node::Plural(plural) => Ok((self.plural(plural)?, NodeKind::Plural)),
            Node::Select(select) => Ok((self.select(select)?, NodeKind::Select)),
            Node::External(external) => Ok((self.external(external)?, NodeKind::External)),
        }
    }

    fn lookup(&self, name: &str) -> Result<&'a Value, FormatError> {
        self.values
            .get(name)
            .ok_or_else(|| FormatError::MissingVariable {
                name: name.to_string(),
                template: self.template.to_string(),
            })
    }

    fn variable(&self, name: &str, offset: Option<i64>) -> Result<Output, FormatError> {
        let value = self.lookup(name)?;
        match (value, offset) {
            (value, _) if value.is_suppressed() => Ok(Output::empty()),
            (Value::Function(_), _) => Err(FormatError::NotRenderable {
                name: name.to_string(),
            }),
            (Value::Object(object), _) => Ok(Output::from(object.clone())),
            (Value::Int(n), Some(offset)) => Ok(Output::Text(n.saturating_sub(offset).to_string())),
            (Value::Float(n), Some(offset)) => {
                Ok(Output::Text(Value::Float(n - offset as f64).to_string()))
            }
            (value, _) => Ok(Output::Text(value.to_string())),
        }
    }

    fn plural(&self, plural: &Plural) -> Result<Output, FormatError> {
        let value = self.lookup(&plural.variable)?;
        let Some(n) = value.as_f64() else {
            return Err(FormatError::NotANumber {
                name: plural.variable.clone(),
                value: value.to_string(),
            });
        };
        if let Some(branch) = value
            .as_integer()
            .and_then(|exact| plural.exact_branches.get(&exact))
        {
            return self.serialize(branch);
        }
        let adjusted = n - plural.offset.unwrap_or(0) as f64;
        let category = self.locale.plural_category(plural.kind, adjusted);
        let branch = plural
            .category_branches
            .get(&category)
            .or_else(|| plural.category_branches.get(&Category::Other))
            .ok_or_else(|| FormatError::MissingBranch {
                variable: plural.variable.clone(),
                category,
            })?;
        self.serialize(branch)
    }

    fn select(&self, select: &Select) -> Result<Output, FormatError> {
        let value = self.lookup(&select.variable)?;
        let key = value.to_string();
        match select
            .branches
            .get(&key)
            .or_else(|| select.branches.get("other"))
        {
            Some(branch) => self.serialize(branch),
            None => Ok(Output::Text(key)),
        }
    }

    fn external(&self, external: &External) -> Result<Output, FormatError> {
        let call = SerializeCall {
            params: external.params.as_ref(),
            value: self.values.get(&external.variable),
            locale: self.locale,
            node: external,
            values: self.values,
            serializer: self,
        };
        match self.registry.serializer(&external.plugin) {
            Some(serializer) => serializer(&call),
            None if external.plugin == "number" && !external.has_options => {
                let n = call.number()?;
                let offset = call.params::<PluralOffset>().map_or(0, |params| params.offset);
                let formatter = self.locale.number_formatter(NumberOptions::default());
                Ok(Output::Text(formatter.format(n - offset as f64)))
            }
            None => Err(FormatError::MissingSerializer {
                plugin: external.plugin.clone(),
                variable: external.variable.clone(),
            }),
        }
    }
}

/// Everything a plugin serializer gets for one external node.
#[derive(Debug, Clone, Copy)]
pub struct SerializeCall<'a> {
    /// Parameters the plugin parser produced, if any.
    pub params: Option<&'a PluginParams>,
    /// Value of the node's variable, if provided.
    pub value: Option<&'a Value>,
    pub locale: &'a LocaleContext,
    pub node: &'a External,
    /// Every value passed to the current call.
    pub values: &'a Values,
    serializer: &'a Serializer<'a>,
}

impl SerializeCall<'_> {
    /// Parameters downcast to the plugin's own type.
    pub fn params<T: Any>(&self) -> Option<&T> {
        self.params.and_then(PluginParams::downcast_ref)
    }

    /// Render the node's children with the current values and reducer.
    pub fn serialize_children(&self) -> Result<Output, FormatError> {
        self.serializer.serialize(&self.node.children)
    }

    /// Render arbitrary nodes with the current values and reducer.
    pub fn serialize_nodes(&self, nodes: &[Node]) -> Result<Output, FormatError> {
        self.serializer.serialize(nodes)
    }

    /// The node's value, or `MissingVariable` when it was not provided.
    pub fn required_value(&self) -> Result<&Value, FormatError> {
        self.value.ok_or_else(|| FormatError::MissingVariable {
            name: self.node.variable.clone(),
            template: self.serializer.template.to_string(),
        })
    }

    /// The node's value as a number.
    pub fn number(&self) -> Result<f64, FormatError> {
        let value = self.required_value()?;
        value.as_f64().ok_or_else(|| FormatError::NotANumber {
            name: self.node.variable.clone(),
            value: value.to_string(),
        })
    }
}
