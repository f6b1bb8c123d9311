//! Output accumulation strategies.

use std::fmt::Debug;

use crate::types::{Chunk, Output};

/// Which kind of node produced a piece of output.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeKind {
    Text,
    Variable,
    Plural,
    Select,
    External,
}

/// Folds rendered pieces into the output of a node list.
pub trait Reducer: Debug + Send + Sync {
    fn reduce(&self, acc: Output, item: Output, kind: NodeKind) -> Output;
}

/// Flattens everything, objects included, into one string.
#[derive(Debug, Clone, Copy, Default)]
pub struct TextReducer;

impl Reducer for TextReducer {
    fn reduce(&self, acc: Output, item: Output, _kind: NodeKind) -> Output {
        let mut text = match acc {
            Output::Text(text) => text,
            rich @ Output::Rich(_) => rich.to_string(),
        };
        match item {
            Output::Text(item) => text.push_str(&item),
            rich @ Output::Rich(_) => text.push_str(&rich.to_string()),
        }
        Output::Text(text)
    }
}

/// Keeps objects as separate chunks and merges adjacent text.
///
/// The result stays [`Output::Text`] until the first object arrives.
#[derive(Debug, Clone, Copy, Default)]
pub struct RichReducer;

impl Reducer for RichReducer {
    fn reduce(&self, acc: Output, item: Output, _kind: NodeKind) -> Output {
        match (acc, item) {
            (Output::Text(mut text), Output::Text(item)) => {
                text.push_str(&item);
                Output::Text(text)
            }
            (acc, item) => {
                let mut chunks = acc.into_chunks();
                for chunk in item.into_chunks() {
                    push_chunk(&mut chunks, chunk);
                }
                Output::Rich(chunks)
            }
        }
    }
}

fn push_chunk(chunks: &mut Vec<Chunk>, chunk: Chunk) {
    match (chunks.last_mut(), chunk) {
        (Some(Chunk::Text(last)), Chunk::Text(text)) => last.push_str(&text),
        (_, chunk) => chunks.push(chunk),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Object;

    #[test]
    fn rich_reducer_merges_adjacent_text() {
        let link = Object::new(String::from("<a>"));
        let reducer = RichReducer;
        let out = reducer.reduce(Output::from("Hello "), Output::from("world"), NodeKind::Text);
        assert_eq!(out, Output::from("Hello world"));

        let out = reducer.reduce(out, Output::from(link.clone()), NodeKind::External);
        let out = reducer.reduce(out, Output::from("!"), NodeKind::Text);
        let out = reducer.reduce(out, Output::from("?"), NodeKind::Text);
        assert_eq!(
            out,
            Output::Rich(vec![
                Chunk::text("Hello world"),
                Chunk::Object(link),
                Chunk::text("!?"),
            ])
        );
    }

    #[test]
    fn text_reducer_flattens_objects() {
        let reducer = TextReducer;
        let out = reducer.reduce(
            Output::from("a"),
            Output::from(Object::new(7_i32)),
            NodeKind::External,
        );
        assert_eq!(out, Output::from("a7"));
    }
}
