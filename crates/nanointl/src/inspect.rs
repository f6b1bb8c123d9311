//! Static inspection of parsed messages.

use std::collections::BTreeSet;

use crate::parser::Node;
use crate::plugins::{MARKDOWN_TOKEN, TAG_TOKEN};

/// Names of every argument a message reads, sorted.
///
/// Includes simple interpolations, plural and select subjects, plugin
/// arguments, and the callback names of tags. Markdown spans only
/// contribute their callback when a value is supplied, so they are left
/// out.
///
/// ```
/// use nanointl::inspect::required_variables;
/// use nanointl::parser::{ParseOptions, parse_template};
/// use nanointl::plugins::PluginRegistry;
///
/// let registry = PluginRegistry::new();
/// let nodes = parse_template(
///     "{name} has {count, plural, one {# book} other {# {kind} books}}",
///     &ParseOptions::new(&registry),
/// )
/// .unwrap();
///
/// let names: Vec<String> = required_variables(&nodes).into_iter().collect();
/// assert_eq!(names, ["count", "kind", "name"]);
/// ```
pub fn required_variables(nodes: &[Node]) -> BTreeSet<String> {
    let mut names = BTreeSet::new();
    collect(nodes, &mut names);
    names
}

fn collect(nodes: &[Node], names: &mut BTreeSet<String>) {
    for node in nodes {
        match node {
            Node::Literal(_) | Node::Escaped(_) => {}
            Node::Variable { name, .. } => {
                names.insert(name.clone());
            }
            Node::Plural(plural) => {
                names.insert(plural.variable.clone());
                for branch in plural.branches() {
                    collect(branch, names);
                }
            }
            Node::Select(select) => {
                names.insert(select.variable.clone());
                for branch in select.branches.values() {
                    collect(branch, names);
                }
            }
            Node::External(external) => {
                if external.plugin != MARKDOWN_TOKEN {
                    names.insert(external.variable.clone());
                }
                collect(&external.children, names);
            }
        }
    }
}

/// Names of the tags and markdown spans used by a message, with their plugin
/// token.
pub fn render_callbacks(nodes: &[Node]) -> BTreeSet<(String, String)> {
    let mut callbacks = BTreeSet::new();
    collect_callbacks(nodes, &mut callbacks);
    callbacks
}

fn collect_callbacks(nodes: &[Node], callbacks: &mut BTreeSet<(String, String)>) {
    for node in nodes {
        match node {
            Node::Plural(plural) => {
                for branch in plural.branches() {
                    collect_callbacks(branch, callbacks);
                }
            }
            Node::Select(select) => {
                for branch in select.branches.values() {
                    collect_callbacks(branch, callbacks);
                }
            }
            Node::External(external) => {
                if external.plugin == TAG_TOKEN || external.plugin == MARKDOWN_TOKEN {
                    callbacks.insert((external.plugin.clone(), external.variable.clone()));
                }
                collect_callbacks(&external.children, callbacks);
            }
            Node::Literal(_) | Node::Escaped(_) | Node::Variable { .. } => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::{ParseOptions, parse_message};
    use crate::plugins::{MarkdownPlugin, Plugin, PluginRegistry, TagsPlugin};

    fn parse(template: &str) -> Vec<Node> {
        let mut registry = PluginRegistry::new();
        TagsPlugin::new().init(&mut registry).unwrap();
        MarkdownPlugin.init(&mut registry).unwrap();
        parse_message(template, &ParseOptions::new(&registry)).unwrap()
    }

    #[test]
    fn collects_nested_branch_variables() {
        let nodes = parse(
            "{gender, select, female {She has {n, plural, one {# {fruit}} other {# {fruit}s}}} other {They have {n}}}",
        );
        let names: Vec<String> = required_variables(&nodes).into_iter().collect();
        assert_eq!(names, ["fruit", "gender", "n"]);
    }

    #[test]
    fn tags_need_their_callback() {
        let nodes = parse("Hello, <strong>{username}</strong>!");
        let names: Vec<String> = required_variables(&nodes).into_iter().collect();
        assert_eq!(names, ["strong", "username"]);
    }

    #[test]
    fn markdown_callbacks_are_optional() {
        let nodes = parse("Hello, **{username}**!");
        let names: Vec<String> = required_variables(&nodes).into_iter().collect();
        assert_eq!(names, ["username"]);

        let callbacks: Vec<(String, String)> = render_callbacks(&nodes).into_iter().collect();
        assert_eq!(
            callbacks,
            [(MARKDOWN_TOKEN.to_string(), "strong".to_string())]
        );
    }

    #[test]
    fn literal_message_needs_nothing() {
        assert!(required_variables(&parse("Just text")).is_empty());
    }
}
