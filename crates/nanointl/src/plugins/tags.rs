//! The `tag` plugin: inline markup such as `<b>…</b>` and `<br/>`.
//!
//! Tags are recognized after the brace parse, in literal text only, so
//! quoted text (`'<b>'`) stays literal. A tag's content can span arguments:
//! `Hello <b>{name}</b>` wraps the variable. Each tag renders through the
//! function value named after it.

use std::mem;

use tracing::debug;

use super::{Plugin, PluginError, PluginRegistry};
use crate::parser::{External, Node, ParseError, rewrite_branches};
use crate::serializer::{FormatError, SerializeCall};
use crate::types::{Callback, Output, RenderProps, Value};

/// Token of tag nodes.
pub const TAG_TOKEN: &str = "tag";

#[derive(Debug, Default)]
struct TagToken {
    /// Everything consumed since `<`, restored as text if the tag is invalid.
    raw: String,
    name: String,
    closing: bool,
    in_attributes: bool,
    last_symbol: Option<char>,
}

#[derive(Debug)]
struct OpenTag {
    name: String,
    raw: String,
    parent: Vec<Node>,
}

/// Incremental tag parser.
///
/// Text arrives through [`push`](Self::push) in any number of chunks;
/// already parsed nodes are inserted with [`push_node`](Self::push_node).
///
/// ```
/// use nanointl::parser::Node;
/// use nanointl::plugins::TagsParser;
///
/// let mut parser = TagsParser::new();
/// parser.push("Hello <b>bold ").unwrap();
/// parser.push("text</b> world").unwrap();
/// let nodes = parser.finish().unwrap();
///
/// assert_eq!(nodes.len(), 3);
/// let Node::External(tag) = &nodes[1] else { panic!() };
/// assert_eq!(tag.variable, "b");
/// assert_eq!(tag.children, vec![Node::literal("bold text")]);
/// ```
#[derive(Debug, Default)]
pub struct TagsParser {
    nodes: Vec<Node>,
    text: String,
    token: Option<TagToken>,
    open: Vec<OpenTag>,
}

impl TagsParser {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed a chunk of literal text.
    pub fn push(&mut self, chunk: &str) -> Result<(), ParseError> {
        for c in chunk.chars() {
            match self.token.take() {
                Some(token) => self.continue_token(token, c)?,
                None if c == '<' => {
                    self.token = Some(TagToken {
                        raw: String::from('<'),
                        ..TagToken::default()
                    });
                }
                None => self.text.push(c),
            }
        }
        Ok(())
    }

    /// Insert a node that is not subject to tag parsing.
    pub fn push_node(&mut self, node: Node) {
        self.abandon_token();
        self.flush_text();
        self.nodes.push(node);
    }

    /// Complete the parse; every opened tag must have been closed.
    pub fn finish(mut self) -> Result<Vec<Node>, ParseError> {
        self.abandon_token();
        self.flush_text();
        match self.open.pop() {
            Some(open) => Err(ParseError::UnclosedTag { name: open.name }),
            None => Ok(self.nodes),
        }
    }

    fn continue_token(&mut self, mut token: TagToken, c: char) -> Result<(), ParseError> {
        token.raw.push(c);
        if c == '>' {
            return self.complete(token);
        }
        if token.in_attributes {
            if !c.is_whitespace() {
                token.last_symbol = Some(c);
            }
            self.token = Some(token);
            return Ok(());
        }
        let starts_name = token.name.is_empty();
        match c {
            '/' if starts_name && !token.closing => token.closing = true,
            '/' if !starts_name => token.last_symbol = Some('/'),
            c if c.is_whitespace() && !starts_name => token.in_attributes = true,
            c if starts_name && !c.is_alphabetic() => {
                return self.reject(token, c);
            }
            c if is_name_char(c) && token.last_symbol != Some('/') => {
                token.name.push(c);
                token.last_symbol = Some(c);
            }
            c => return self.reject(token, c),
        }
        self.token = Some(token);
        Ok(())
    }

    /// Restore a token that turned out not to be a tag as text.
    fn reject(&mut self, mut token: TagToken, c: char) -> Result<(), ParseError> {
        if c == '<' {
            token.raw.pop();
            self.text.push_str(&token.raw);
            self.token = Some(TagToken {
                raw: String::from('<'),
                ..TagToken::default()
            });
        } else {
            self.text.push_str(&token.raw);
        }
        Ok(())
    }

    fn abandon_token(&mut self) {
        if let Some(token) = self.token.take() {
            self.text.push_str(&token.raw);
        }
    }

    fn complete(&mut self, token: TagToken) -> Result<(), ParseError> {
        if token.name.is_empty() {
            self.text.push_str(&token.raw);
            return Ok(());
        }
        self.flush_text();
        if token.closing {
            let Some(open) = self.open.pop() else {
                return Err(ParseError::UnexpectedClosingTag { found: token.name });
            };
            if open.name != token.name {
                return Err(ParseError::TagMismatch {
                    expected: open.name,
                    found: token.name,
                });
            }
            let children = mem::replace(&mut self.nodes, open.parent);
            self.nodes.push(tag_node(open.name, open.raw, children));
        } else if token.last_symbol == Some('/') {
            self.nodes.push(tag_node(token.name, token.raw, Vec::new()));
        } else {
            self.open.push(OpenTag {
                name: token.name,
                raw: token.raw,
                parent: mem::take(&mut self.nodes),
            });
        }
        Ok(())
    }

    fn flush_text(&mut self) {
        if self.text.is_empty() {
            return;
        }
        let text = mem::take(&mut self.text);
        match self.nodes.last_mut() {
            Some(Node::Literal(last)) => last.push_str(&text),
            _ => self.nodes.push(Node::Literal(text)),
        }
    }
}

fn is_name_char(c: char) -> bool {
    c.is_alphanumeric() || matches!(c, '-' | '_' | '.' | ':')
}

fn tag_node(name: String, raw: String, children: Vec<Node>) -> Node {
    let mut external = External::new(TAG_TOKEN, name);
    external.raw_template = raw;
    external.children = children;
    Node::External(external)
}

/// Parse tags in one node list.
fn parse_level(nodes: Vec<Node>) -> Result<Vec<Node>, ParseError> {
    let mut parser = TagsParser::new();
    for node in nodes {
        match node {
            Node::Literal(text) => parser.push(&text)?,
            other => parser.push_node(other),
        }
    }
    parser.finish()
}

/// Post-parser recognizing tags at every nesting level.
pub fn parse_tags(nodes: Vec<Node>) -> Result<Vec<Node>, ParseError> {
    rewrite_branches(nodes, &mut parse_level)
}

fn serialize_tag(call: &SerializeCall<'_>, fallback: Option<&Callback>) -> Result<Output, FormatError> {
    let name = &call.node.variable;
    let callback = match call.value {
        Some(Value::Function(callback)) => callback,
        Some(value) if !value.is_suppressed() => {
            return Err(FormatError::NotCallable { name: name.clone() });
        }
        _ => fallback.ok_or_else(|| FormatError::MissingSerializer {
            plugin: TAG_TOKEN.to_string(),
            variable: name.clone(),
        })?,
    };
    let children = call.serialize_children()?;
    Ok(callback.call(RenderProps {
        tag: name.clone(),
        children,
        url: None,
    }))
}

/// Registers the tag post-parser and serializer.
///
/// Tags without a render function use the fallback renderer, if one is
/// configured:
///
/// ```
/// use nanointl::Output;
/// use nanointl::plugins::TagsPlugin;
/// use nanointl::types::Callback;
///
/// let plugin = TagsPlugin::new().with_fallback(Callback::new(|props| {
///     Output::Text(format!("[{}]{}[/{}]", props.tag, props.children, props.tag))
/// }));
/// # let _ = plugin;
/// ```
#[derive(Debug, Clone, Default)]
pub struct TagsPlugin {
    fallback: Option<Callback>,
}

impl TagsPlugin {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_fallback(mut self, fallback: Callback) -> Self {
        self.fallback = Some(fallback);
        self
    }
}

impl Plugin for TagsPlugin {
    fn name(&self) -> &str {
        "tags-plugin"
    }

    fn init(&self, registry: &mut PluginRegistry) -> Result<(), PluginError> {
        let fallback = self.fallback.clone();
        debug!(fallback = fallback.is_some(), "registering tags plugin");
        registry.add_serializer(TAG_TOKEN, move |call| serialize_tag(call, fallback.as_ref()));
        registry.add_post_parser(parse_tags);
        Ok(())
    }
}
