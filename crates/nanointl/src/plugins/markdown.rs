//! The `md-token` plugin: inline markdown.
//!
//! Recognizes `_emphasis_`, `*strong*`, `` `code` `` and `[text](url)` in
//! literal text. Doubled `__` and `**` act like single ones. A `[text]` not
//! followed by `(url)` stays literal, as does any marker left unclosed at
//! the end of its node list. Block-level markdown is not handled.

use std::fmt::{self, Display, Formatter};
use std::mem;

use super::{Plugin, PluginError, PluginRegistry};
use crate::parser::{External, Node, ParseError, rewrite_branches};
use crate::serializer::{FormatError, SerializeCall};
use crate::types::{Output, PluginParams, RenderProps, Value};

/// Token of markdown nodes.
pub const MARKDOWN_TOKEN: &str = "md-token";

/// Inline markdown span kinds. Each renders through the value of the same
/// name: `emphasis`, `strong`, `code` or `link`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MarkdownToken {
    Emphasis,
    Strong,
    Code,
    Link,
}

impl MarkdownToken {
    pub fn name(self) -> &'static str {
        match self {
            MarkdownToken::Emphasis => "emphasis",
            MarkdownToken::Strong => "strong",
            MarkdownToken::Code => "code",
            MarkdownToken::Link => "link",
        }
    }

    /// Opening marker, used when an unclosed span is restored as text.
    pub fn symbol(self) -> char {
        match self {
            MarkdownToken::Emphasis => '_',
            MarkdownToken::Strong => '*',
            MarkdownToken::Code => '`',
            MarkdownToken::Link => '[',
        }
    }

    fn from_symbol(symbol: char) -> Option<Self> {
        match symbol {
            '_' => Some(MarkdownToken::Emphasis),
            '*' => Some(MarkdownToken::Strong),
            '`' => Some(MarkdownToken::Code),
            _ => None,
        }
    }
}

impl Display for MarkdownToken {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Parameters of a link node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinkTarget {
    pub url: String,
}

#[derive(Debug)]
struct OpenSpan {
    token: MarkdownToken,
    parent: Vec<Node>,
}

/// A link whose text is complete and whose `(url)` is being read.
#[derive(Debug)]
struct PendingLink {
    children: Vec<Node>,
    url: String,
}

/// A character whose meaning depends on the one after it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Held {
    /// `_`, `*` or `` ` ``, which may be doubled.
    Marker(char),
    /// `]` closing a link's text.
    Bracket,
    /// `](`, which opens a url unless `)` follows.
    Paren,
}

/// Incremental inline markdown parser.
///
/// Chunk boundaries do not affect the result: a marker at the end of a
/// chunk is held until the next character arrives.
///
/// ```
/// use nanointl::parser::Node;
/// use nanointl::plugins::MarkdownParser;
///
/// let mut parser = MarkdownParser::new();
/// parser.push("How do _you_ do?");
/// let nodes = parser.finish();
///
/// assert_eq!(nodes.len(), 3);
/// let Node::External(span) = &nodes[1] else { panic!() };
/// assert_eq!(span.variable, "emphasis");
/// ```
#[derive(Debug, Default)]
pub struct MarkdownParser {
    nodes: Vec<Node>,
    text: String,
    open: Vec<OpenSpan>,
    link: Option<PendingLink>,
    held: Option<Held>,
}

impl MarkdownParser {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed a chunk of literal text.
    pub fn push(&mut self, chunk: &str) {
        for c in chunk.chars() {
            self.push_char(c);
        }
    }

    /// Insert a node that is not subject to markdown parsing.
    pub fn push_node(&mut self, node: Node) {
        self.release();
        self.abandon_link();
        self.flush_text();
        self.nodes.push(node);
    }

    /// Complete the parse, restoring unclosed markers as text.
    pub fn finish(mut self) -> Vec<Node> {
        self.release();
        self.abandon_link();
        self.flush_text();
        while let Some(open) = self.open.pop() {
            let children = mem::replace(&mut self.nodes, open.parent);
            self.restore(open.token, children, None);
        }
        self.nodes
    }

    fn in_code(&self) -> bool {
        self.open
            .last()
            .is_some_and(|open| open.token == MarkdownToken::Code)
    }

    fn push_char(&mut self, c: char) {
        if self.link.is_some() {
            self.continue_link(c);
            return;
        }
        match self.held.take() {
            None => self.start(c),
            Some(Held::Marker(marker)) if marker == c => {
                if c == '`' {
                    self.text.push(c);
                }
                self.start(c);
            }
            Some(Held::Bracket) if c == '(' => self.held = Some(Held::Paren),
            Some(Held::Paren) if c != ')' => {
                self.close_link(true);
                self.continue_link(c);
            }
            Some(Held::Paren) => {
                self.close_link(false);
                self.start('(');
                self.start(c);
            }
            Some(held) => {
                self.resolve(held);
                self.start(c);
            }
        }
    }

    /// Handle `c` with nothing held.
    fn start(&mut self, c: char) {
        if self.in_code() && c != '`' {
            self.text.push(c);
            return;
        }
        match c {
            '_' | '*' | '`' => self.held = Some(Held::Marker(c)),
            '[' => self.open_span(MarkdownToken::Link),
            ']' if self.innermost() == Some(MarkdownToken::Link) => self.held = Some(Held::Bracket),
            c => self.text.push(c),
        }
    }

    /// Apply a held character as if its input ended there.
    fn release(&mut self) {
        if let Some(held) = self.held.take() {
            self.resolve(held);
        }
    }

    fn resolve(&mut self, held: Held) {
        match held {
            Held::Marker(marker) => match MarkdownToken::from_symbol(marker) {
                Some(token) if self.innermost() == Some(token) => self.close_span(),
                Some(token) => self.open_span(token),
                None => self.text.push(marker),
            },
            Held::Bracket => self.close_link(false),
            Held::Paren => self.close_link(true),
        }
    }

    fn innermost(&self) -> Option<MarkdownToken> {
        self.open.last().map(|open| open.token)
    }

    fn open_span(&mut self, token: MarkdownToken) {
        self.flush_text();
        self.open.push(OpenSpan {
            token,
            parent: mem::take(&mut self.nodes),
        });
    }

    fn close_span(&mut self) {
        self.flush_text();
        if let Some(open) = self.open.pop() {
            let children = mem::replace(&mut self.nodes, open.parent);
            self.nodes.push(span_node(open.token, children, None));
        }
    }

    fn close_link(&mut self, with_url: bool) {
        self.flush_text();
        let Some(open) = self.open.pop() else {
            return;
        };
        let children = mem::replace(&mut self.nodes, open.parent);
        if with_url {
            self.link = Some(PendingLink {
                children,
                url: String::new(),
            });
        } else {
            self.restore(MarkdownToken::Link, children, Some("]"));
        }
    }

    fn continue_link(&mut self, c: char) {
        if c != ')' {
            if let Some(link) = &mut self.link {
                link.url.push(c);
            }
            return;
        }
        if let Some(link) = self.link.take() {
            let target = LinkTarget { url: link.url };
            self.nodes
                .push(span_node(MarkdownToken::Link, link.children, Some(target)));
        }
    }

    /// A link cut off inside its url is restored as text.
    fn abandon_link(&mut self) {
        if let Some(link) = self.link.take() {
            let tail = format!("]({}", link.url);
            self.restore(MarkdownToken::Link, link.children, Some(&tail));
        }
    }

    fn restore(&mut self, token: MarkdownToken, children: Vec<Node>, tail: Option<&str>) {
        self.flush_text();
        push_literal(&mut self.nodes, &token.symbol().to_string());
        for child in children {
            match child {
                Node::Literal(text) => push_literal(&mut self.nodes, &text),
                other => self.nodes.push(other),
            }
        }
        if let Some(tail) = tail {
            push_literal(&mut self.nodes, tail);
        }
    }

    fn flush_text(&mut self) {
        let text = mem::take(&mut self.text);
        push_literal(&mut self.nodes, &text);
    }
}

fn push_literal(nodes: &mut Vec<Node>, text: &str) {
    if text.is_empty() {
        return;
    }
    match nodes.last_mut() {
        Some(Node::Literal(last)) => last.push_str(text),
        _ => nodes.push(Node::literal(text)),
    }
}

fn span_node(token: MarkdownToken, children: Vec<Node>, link: Option<LinkTarget>) -> Node {
    let mut external = External::new(MARKDOWN_TOKEN, token.name());
    external.params = link.map(PluginParams::new);
    external.children = children;
    Node::External(external)
}

fn parse_level(nodes: Vec<Node>) -> Result<Vec<Node>, ParseError> {
    let mut parser = MarkdownParser::new();
    for node in nodes {
        match node {
            Node::Literal(text) => parser.push(&text),
            other => parser.push_node(other),
        }
    }
    Ok(parser.finish())
}

/// Post-parser recognizing inline markdown at every nesting level.
pub fn parse_markdown(nodes: Vec<Node>) -> Result<Vec<Node>, ParseError> {
    rewrite_branches(nodes, &mut parse_level)
}

/// Spans without a render function render their children unwrapped.
fn serialize_span(call: &SerializeCall<'_>) -> Result<Output, FormatError> {
    let name = &call.node.variable;
    let children = call.serialize_children()?;
    match call.value {
        Some(Value::Function(callback)) => Ok(callback.call(RenderProps {
            tag: name.clone(),
            children,
            url: call.params::<LinkTarget>().map(|target| target.url.clone()),
        })),
        Some(value) if !value.is_suppressed() => Err(FormatError::NotCallable { name: name.clone() }),
        _ => Ok(children),
    }
}

/// Registers the markdown post-parser and serializer.
#[derive(Debug, Clone, Copy, Default)]
pub struct MarkdownPlugin;

impl Plugin for MarkdownPlugin {
    fn name(&self) -> &str {
        "markdown-plugin"
    }

    fn init(&self, registry: &mut PluginRegistry) -> Result<(), PluginError> {
        registry.add_serializer(MARKDOWN_TOKEN, serialize_span);
        registry.add_post_parser(parse_markdown);
        Ok(())
    }
}
