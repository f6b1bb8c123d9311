//! Message template parser.
//!
//! Parses ICU MessageFormat style templates into an AST in a single
//! left-to-right scan. Handles:
//! - Literal text, with `'…'` quoting and `''` for a single quote
//! - Simple arguments: `{name}`
//! - `plural`, `selectordinal` and `select` arguments with nested branches
//! - `#` inside plural branches
//! - External arguments such as `{n, number, ::percent}`, whose options text
//!   is handed to the parser registered for the token

use std::collections::BTreeMap;
use std::fmt::{self, Display, Formatter};
use std::mem;

use serde_json::Value as JsonValue;

use super::ast::{Category, External, Node, Plural, PluralKind, PluralOffset, Select};
use super::error::ParseError;
use crate::plugins::PluginRegistry;
use crate::suggest::Vocabulary;
use crate::types::PluginParams;

/// Tokens recognized as external arguments even without a registered parser.
pub const BUILTIN_EXTERNALS: &[&str] = &["number", "date", "time"];

/// Caller-provided options for arguments written as `{name, token, verbose}`,
/// keyed by argument name.
pub type VerboseParsing = BTreeMap<String, JsonValue>;

/// Plugins and overrides consulted while parsing.
#[derive(Debug, Clone, Copy, Default)]
pub struct ParseOptions<'a> {
    pub registry: Option<&'a PluginRegistry>,
    pub verbose: Option<&'a VerboseParsing>,
}

impl<'a> ParseOptions<'a> {
    pub fn new(registry: &'a PluginRegistry) -> Self {
        Self {
            registry: Some(registry),
            verbose: None,
        }
    }

    pub fn with_verbose(mut self, verbose: &'a VerboseParsing) -> Self {
        self.verbose = Some(verbose);
        self
    }

    fn is_external(&self, token: &str) -> bool {
        BUILTIN_EXTERNALS.contains(&token)
            || self
                .registry
                .is_some_and(|registry| registry.has_parser(token))
    }

    /// Argument types usable in a template: the grammar's own plus
    /// every token with a registered parser.
    fn argument_types(&self) -> Vocabulary {
        let mut types = Vocabulary::argument_types();
        if let Some(registry) = self.registry {
            types.extend(registry.parser_tokens());
        }
        types
    }

    fn unsupported(&self, keyword: String, position: usize) -> ParseError {
        let suggestions = self.argument_types().suggest(&keyword);
        ParseError::UnsupportedSyntax {
            keyword,
            position,
            suggestions,
        }
    }

    fn verbose_for(&self, variable: &str) -> Option<&'a JsonValue> {
        self.verbose.and_then(|verbose| verbose.get(variable))
    }
}

/// Parse a message and run the registered post-parsers over the result.
pub fn parse_message(template: &str, options: &ParseOptions<'_>) -> Result<Vec<Node>, ParseError> {
    let nodes = parse_template(template, options)?;
    match options.registry {
        Some(registry) => registry.run_post_parsers(nodes),
        None => Ok(nodes),
    }
}

/// Parse the brace structure of a template into an AST.
///
/// Templates without `{` are returned as a single literal, quotes included.
///
/// # Example
///
/// ```
/// use nanointl::parser::{Node, ParseOptions, parse_template};
///
/// let nodes = parse_template("Hello, {name}!", &ParseOptions::default()).unwrap();
/// assert_eq!(
///     nodes,
///     vec![Node::literal("Hello, "), Node::variable("name"), Node::literal("!")]
/// );
/// ```
pub fn parse_template(template: &str, options: &ParseOptions<'_>) -> Result<Vec<Node>, ParseError> {
    if !template.contains('{') {
        return Ok(vec![Node::Literal(template.to_string())]);
    }
    Scanner::new(options).run(template)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Quote {
    Plain,
    Escaped,
}

impl Quote {
    fn toggled(self) -> Self {
        match self {
            Quote::Plain => Quote::Escaped,
            Quote::Escaped => Quote::Plain,
        }
    }
}

#[derive(Debug)]
enum BranchKey {
    Exact(i64),
    Category(Category),
    Select(String),
}

impl Display for BranchKey {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            BranchKey::Exact(value) => write!(f, "={value}"),
            BranchKey::Category(category) => write!(f, "{category}"),
            BranchKey::Select(key) => f.write_str(key),
        }
    }
}

enum Frame {
    Text(TextFrame),
    Argument(ArgumentFrame),
}

/// Text of the message itself or of one branch body.
struct TextFrame {
    /// `None` for the message itself.
    key: Option<BranchKey>,
    nodes: Vec<Node>,
    buffer: String,
    buffer_quote: Quote,
}

impl TextFrame {
    fn new(key: Option<BranchKey>) -> Self {
        Self {
            key,
            nodes: Vec::new(),
            buffer: String::new(),
            buffer_quote: Quote::Plain,
        }
    }

    fn push_char(&mut self, c: char, quote: Quote) {
        if self.buffer_quote != quote {
            self.flush();
            self.buffer_quote = quote;
        }
        self.buffer.push(c);
    }

    fn push_node(&mut self, node: Node) {
        self.flush();
        self.nodes.push(node);
    }

    /// Move buffered text into `nodes`, merging with a preceding node of the
    /// same kind.
    fn flush(&mut self) {
        if self.buffer.is_empty() {
            return;
        }
        let text = mem::take(&mut self.buffer);
        match (self.nodes.last_mut(), self.buffer_quote) {
            (Some(Node::Literal(prev)), Quote::Plain) | (Some(Node::Escaped(prev)), Quote::Escaped) => {
                prev.push_str(&text);
            }
            (_, Quote::Plain) => self.nodes.push(Node::Literal(text)),
            (_, Quote::Escaped) => self.nodes.push(Node::Escaped(text)),
        }
    }

    fn into_nodes(mut self) -> Vec<Node> {
        self.flush();
        self.nodes
    }
}

/// The inside of one `{…}`.
struct ArgumentFrame {
    /// Byte offset of the opening brace.
    start: usize,
    word: String,
    word_start: usize,
    form: ArgumentForm,
}

enum ArgumentForm {
    /// Reading the variable name.
    Name,
    /// Variable name read; the next word decides the argument type.
    Type { variable: String },
    Plural {
        plural: Plural,
        pending: Option<(BranchKey, usize)>,
    },
    Select {
        select: Select,
        pending: Option<(String, usize)>,
    },
    /// Accumulating raw options text until the matching `}`.
    External { external: External, depth: usize },
}

enum Keyword {
    Plural(PluralKind),
    Select,
    External,
    Unsupported,
}

fn classify(keyword: &str, options: &ParseOptions<'_>) -> Keyword {
    match keyword {
        "plural" => Keyword::Plural(PluralKind::Cardinal),
        "selectordinal" => Keyword::Plural(PluralKind::Ordinal),
        "select" => Keyword::Select,
        token if options.is_external(token) => Keyword::External,
        _ => Keyword::Unsupported,
    }
}

impl ArgumentFrame {
    fn new(start: usize) -> Self {
        Self {
            start,
            word: String::new(),
            word_start: start,
            form: ArgumentForm::Name,
        }
    }

    fn push_char(&mut self, position: usize, c: char) {
        if self.word.is_empty() {
            self.word_start = position;
        }
        self.word.push(c);
    }

    /// Consume the current word according to the argument form.
    fn end_word(&mut self, options: &ParseOptions<'_>) -> Result<(), ParseError> {
        if self.word.is_empty() {
            return Ok(());
        }
        let word = mem::take(&mut self.word);
        let position = self.word_start;
        match &mut self.form {
            ArgumentForm::Name => {
                self.form = ArgumentForm::Type { variable: word };
            }
            ArgumentForm::Type { variable } => {
                let variable = mem::take(variable);
                self.form = match classify(&word, options) {
                    Keyword::Plural(kind) => ArgumentForm::Plural {
                        plural: Plural::new(variable, kind),
                        pending: None,
                    },
                    Keyword::Select => ArgumentForm::Select {
                        select: Select {
                            variable,
                            branches: BTreeMap::new(),
                        },
                        pending: None,
                    },
                    Keyword::External => ArgumentForm::External {
                        external: External::new(word, variable),
                        depth: 0,
                    },
                    Keyword::Unsupported => return Err(options.unsupported(word, position)),
                };
            }
            ArgumentForm::Plural { plural, pending } => {
                if let Some((key, position)) = pending.take() {
                    return Err(ParseError::MissingBranchBody {
                        key: key.to_string(),
                        position,
                    });
                }
                if let Some(value) = word.strip_prefix("offset:") {
                    let offset = value.parse().map_err(|_| ParseError::InvalidOffset {
                        value: value.to_string(),
                        position,
                    })?;
                    plural.offset = Some(offset);
                } else if let Some(value) = word.strip_prefix('=') {
                    let exact = value.parse().map_err(|_| ParseError::InvalidExactKey {
                        value: word.clone(),
                        position,
                    })?;
                    *pending = Some((BranchKey::Exact(exact), position));
                } else if let Some(category) = Category::from_keyword(&word) {
                    *pending = Some((BranchKey::Category(category), position));
                } else {
                    let suggestions = Vocabulary::plural_categories().suggest(&word);
                    return Err(ParseError::UnknownCategory {
                        keyword: word,
                        position,
                        suggestions,
                    });
                }
            }
            ArgumentForm::Select { pending, .. } => {
                if let Some((key, position)) = pending.take() {
                    return Err(ParseError::MissingBranchBody { key, position });
                }
                *pending = Some((word, position));
            }
            ArgumentForm::External { external, .. } => external.raw_template.push_str(&word),
        }
        Ok(())
    }

    /// Take the key for a branch body opening at `position`.
    fn take_branch_key(&mut self, position: usize) -> Result<BranchKey, ParseError> {
        let key = match &mut self.form {
            ArgumentForm::Plural { pending, .. } => pending.take().map(|(key, _)| key),
            ArgumentForm::Select { pending, .. } => {
                pending.take().map(|(key, _)| BranchKey::Select(key))
            }
            ArgumentForm::Name | ArgumentForm::Type { .. } | ArgumentForm::External { .. } => {
                return Err(ParseError::UnsupportedSyntax {
                    keyword: "{".to_string(),
                    position,
                    suggestions: Vec::new(),
                });
            }
        };
        key.ok_or(ParseError::MissingBranchKey { position })
    }

    fn add_branch(&mut self, key: BranchKey, nodes: Vec<Node>) {
        match (&mut self.form, key) {
            (ArgumentForm::Plural { plural, .. }, BranchKey::Exact(value)) => {
                plural.exact_branches.insert(value, nodes);
            }
            (ArgumentForm::Plural { plural, .. }, BranchKey::Category(category)) => {
                plural.category_branches.insert(category, nodes);
            }
            (ArgumentForm::Select { select, .. }, BranchKey::Select(key)) => {
                select.branches.insert(key, nodes);
            }
            _ => {}
        }
    }

    /// Build the node for this argument at its closing brace.
    fn finish(mut self, options: &ParseOptions<'_>) -> Result<Node, ParseError> {
        if let ArgumentForm::Type { variable } = &mut self.form {
            let variable = mem::take(variable);
            if self.word.is_empty() {
                return Ok(Node::Variable {
                    name: variable,
                    offset: None,
                });
            }
            let keyword = mem::take(&mut self.word);
            return match classify(&keyword, options) {
                Keyword::Plural(_) | Keyword::Select => Err(ParseError::MissingBranches {
                    keyword,
                    variable,
                    position: self.start,
                }),
                // `{n, number}`: no options part, the parser is not consulted.
                Keyword::External => Ok(Node::External(External::new(keyword, variable))),
                Keyword::Unsupported => Err(options.unsupported(keyword, self.word_start)),
            };
        }

        self.end_word(options)?;
        let start = self.start;
        match self.form {
            ArgumentForm::Name => Err(ParseError::EmptyArgument { position: start }),
            ArgumentForm::Type { variable } => Ok(Node::Variable {
                name: variable,
                offset: None,
            }),
            ArgumentForm::Plural { plural, pending } => {
                if let Some((key, position)) = pending {
                    return Err(ParseError::MissingBranchBody {
                        key: key.to_string(),
                        position,
                    });
                }
                if plural.exact_branches.is_empty() && plural.category_branches.is_empty() {
                    return Err(ParseError::MissingBranches {
                        keyword: plural.kind.keyword().to_string(),
                        variable: plural.variable,
                        position: start,
                    });
                }
                Ok(Node::Plural(plural))
            }
            ArgumentForm::Select { select, pending } => {
                if let Some((key, position)) = pending {
                    return Err(ParseError::MissingBranchBody { key, position });
                }
                if select.branches.is_empty() {
                    return Err(ParseError::MissingBranches {
                        keyword: "select".to_string(),
                        variable: select.variable,
                        position: start,
                    });
                }
                Ok(Node::Select(select))
            }
            ArgumentForm::External { external, .. } => finish_external(external, start, options),
        }
    }
}

/// Run the registered parser over the options text of an external argument.
fn finish_external(
    mut external: External,
    position: usize,
    options: &ParseOptions<'_>,
) -> Result<Node, ParseError> {
    let raw = external.raw_template.trim().to_string();
    if raw.is_empty() {
        external.raw_template = raw;
        return Ok(Node::External(external));
    }

    let verbose = if raw == "verbose" {
        options.verbose_for(&external.variable)
    } else {
        None
    };
    let parser = options
        .registry
        .and_then(|registry| registry.parser(&external.plugin));
    let params = match (parser, verbose) {
        (Some(parser), _) => {
            parser(&raw, &external.variable, verbose).map_err(|source| ParseError::Skeleton {
                plugin: external.plugin.clone(),
                variable: external.variable.clone(),
                position,
                source,
            })?
        }
        (None, Some(verbose)) => PluginParams::new(verbose.clone()),
        (None, None) => {
            return Err(ParseError::MissingParser {
                plugin: external.plugin,
                variable: external.variable,
                position,
            });
        }
    };

    external.raw_template = raw;
    external.params = Some(params);
    external.has_options = true;
    Ok(Node::External(external))
}

struct Scanner<'o> {
    options: &'o ParseOptions<'o>,
    quote: Quote,
    /// Enclosing frames, outermost first.
    frames: Vec<Frame>,
    /// The innermost frame.
    current: Frame,
}

impl<'o> Scanner<'o> {
    fn new(options: &'o ParseOptions<'o>) -> Self {
        Self {
            options,
            quote: Quote::Plain,
            frames: Vec::new(),
            current: Frame::Text(TextFrame::new(None)),
        }
    }

    fn run(mut self, template: &str) -> Result<Vec<Node>, ParseError> {
        let mut chars = template.char_indices().peekable();
        while let Some((position, c)) = chars.next() {
            if c == '\'' {
                if chars.next_if(|&(_, next)| next == '\'').is_some() {
                    self.push_char(position, '\'', Quote::Escaped)?;
                } else {
                    self.quote = self.quote.toggled();
                }
            } else {
                self.push_char(position, c, self.quote)?;
            }
        }
        self.finish()
    }

    fn push_char(&mut self, position: usize, c: char, quote: Quote) -> Result<(), ParseError> {
        let escaped = quote == Quote::Escaped;
        match &mut self.current {
            Frame::Text(text) => match c {
                '{' if !escaped => {
                    self.open(Frame::Argument(ArgumentFrame::new(position)));
                    Ok(())
                }
                '}' if !escaped => self.close_branch(position),
                '#' if !escaped => {
                    match self.enclosing_plural() {
                        Some(node) => self.current_text_push(node),
                        None => self.current_text_char(c, quote),
                    }
                    Ok(())
                }
                _ => {
                    text.push_char(c, quote);
                    Ok(())
                }
            },
            Frame::Argument(argument) => {
                if let ArgumentForm::External { external, depth } = &mut argument.form {
                    match c {
                        '{' if !escaped => *depth += 1,
                        '}' if !escaped && *depth == 0 => return self.close_argument(position),
                        '}' if !escaped => *depth -= 1,
                        _ => {}
                    }
                    external.raw_template.push(c);
                    return Ok(());
                }
                match c {
                    ',' if !escaped => argument.end_word(self.options),
                    c if c.is_whitespace() && !escaped => argument.end_word(self.options),
                    '{' if !escaped => {
                        argument.end_word(self.options)?;
                        let key = argument.take_branch_key(position)?;
                        self.open(Frame::Text(TextFrame::new(Some(key))));
                        Ok(())
                    }
                    '}' if !escaped => self.close_argument(position),
                    _ => {
                        argument.push_char(position, c);
                        Ok(())
                    }
                }
            }
        }
    }

    fn open(&mut self, frame: Frame) {
        let outer = mem::replace(&mut self.current, frame);
        self.frames.push(outer);
    }

    /// Replace the current frame with its parent and return it.
    fn pop_frame(&mut self) -> Option<Frame> {
        let outer = self.frames.pop()?;
        Some(mem::replace(&mut self.current, outer))
    }

    fn current_text_push(&mut self, node: Node) {
        if let Frame::Text(text) = &mut self.current {
            text.push_node(node);
        }
    }

    fn current_text_char(&mut self, c: char, quote: Quote) {
        if let Frame::Text(text) = &mut self.current {
            text.push_char(c, quote);
        }
    }

    /// The node a `#` stands for, if the current text is inside a plural.
    fn enclosing_plural(&self) -> Option<Node> {
        self.frames.iter().rev().find_map(|frame| match frame {
            Frame::Argument(ArgumentFrame {
                form: ArgumentForm::Plural { plural, .. },
                ..
            }) => Some(Node::External(External {
                raw_template: "#".to_string(),
                params: Some(PluginParams::new(PluralOffset {
                    offset: plural.offset.unwrap_or(0),
                })),
                ..External::new("number", plural.variable.clone())
            })),
            _ => None,
        })
    }

    fn close_branch(&mut self, position: usize) -> Result<(), ParseError> {
        let is_branch = matches!(&self.current, Frame::Text(text) if text.key.is_some());
        if !is_branch {
            return Err(ParseError::UnbalancedBrace { position });
        }
        let Some(Frame::Text(mut branch)) = self.pop_frame() else {
            return Err(ParseError::UnbalancedBrace { position });
        };
        let key = branch.key.take();
        if let (Frame::Argument(argument), Some(key)) = (&mut self.current, key) {
            argument.add_branch(key, branch.into_nodes());
        }
        Ok(())
    }

    fn close_argument(&mut self, position: usize) -> Result<(), ParseError> {
        let Some(Frame::Argument(argument)) = self.pop_frame() else {
            return Err(ParseError::UnbalancedBrace { position });
        };
        let node = argument.finish(self.options)?;
        self.current_text_push(node);
        Ok(())
    }

    fn finish(self) -> Result<Vec<Node>, ParseError> {
        let nested = match &self.current {
            Frame::Argument(ArgumentFrame {
                form: ArgumentForm::External { depth, .. },
                ..
            }) => *depth,
            _ => 0,
        };
        match self.current {
            Frame::Text(root) if self.frames.is_empty() => Ok(root.into_nodes()),
            _ => Err(ParseError::UnterminatedBrace {
                missing: self.frames.len() + nested,
            }),
        }
    }
}
