//! Memoization of formatted messages.
//!
//! Outputs are stored in a trie keyed by the message id followed by every
//! `(name, value)` pair of the call, in insertion order. Primitive values
//! index an ordinary map. Objects and callbacks index a map keyed by their
//! allocation address; each entry keeps a weak handle, so an entry whose
//! argument has been dropped is detected as stale and swept on the next
//! insert through that node.

use std::collections::HashMap;
use std::sync::Weak;

use crate::types::{CallbackFn, Opaque, Output, Value, Values};

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
enum KeyPart {
    Id(String),
    Name(String),
    Null,
    Bool(bool),
    Int(i64),
    /// Bit pattern of the float.
    Float(u64),
    String(String),
    /// Milliseconds since the epoch and UTC offset in seconds.
    Date(i64, i32),
}

#[derive(Debug, Clone)]
enum Handle {
    Object(Weak<dyn Opaque>),
    Callback(Weak<CallbackFn>),
}

impl Handle {
    fn is_alive(&self) -> bool {
        match self {
            Handle::Object(weak) => weak.strong_count() > 0,
            Handle::Callback(weak) => weak.strong_count() > 0,
        }
    }
}

#[derive(Debug, Clone)]
enum Segment {
    Primitive(KeyPart),
    Reference { address: usize, handle: Handle },
}

fn value_segment(value: &Value) -> Segment {
    let part = match value {
        Value::Null => KeyPart::Null,
        Value::Bool(b) => KeyPart::Bool(*b),
        Value::Int(n) => KeyPart::Int(*n),
        Value::Float(n) => KeyPart::Float(n.to_bits()),
        Value::String(s) => KeyPart::String(s.clone()),
        Value::Date(date) => KeyPart::Date(date.timestamp_millis(), date.offset().local_minus_utc()),
        Value::Object(object) => {
            return Segment::Reference {
                address: object.address(),
                handle: Handle::Object(object.downgrade()),
            };
        }
        Value::Function(callback) => {
            return Segment::Reference {
                address: callback.address(),
                handle: Handle::Callback(callback.downgrade()),
            };
        }
    };
    Segment::Primitive(part)
}

fn key(id: &str, values: &Values) -> Vec<Segment> {
    let mut segments = Vec::with_capacity(1 + values.len() * 2);
    segments.push(Segment::Primitive(KeyPart::Id(id.to_string())));
    for (name, value) in values {
        segments.push(Segment::Primitive(KeyPart::Name(name.clone())));
        segments.push(value_segment(value));
    }
    segments
}

#[derive(Debug)]
struct ReferenceEntry {
    handle: Handle,
    node: TrieNode,
}

#[derive(Debug, Default)]
struct TrieNode {
    output: Option<Output>,
    primitives: HashMap<KeyPart, TrieNode>,
    references: HashMap<usize, ReferenceEntry>,
}

impl TrieNode {
    fn child(&self, segment: &Segment) -> Option<&TrieNode> {
        match segment {
            Segment::Primitive(part) => self.primitives.get(part),
            Segment::Reference { address, .. } => self
                .references
                .get(address)
                .filter(|entry| entry.handle.is_alive())
                .map(|entry| &entry.node),
        }
    }

    /// Number of outputs stored at or below this node.
    fn count(&self) -> usize {
        usize::from(self.output.is_some())
            + self.primitives.values().map(TrieNode::count).sum::<usize>()
            + self
                .references
                .values()
                .map(|entry| entry.node.count())
                .sum::<usize>()
    }

    /// Drop entries whose argument is gone; returns how many outputs went
    /// with them.
    fn sweep(&mut self) -> usize {
        let mut removed = 0;
        self.references.retain(|_, entry| {
            let alive = entry.handle.is_alive();
            if !alive {
                removed += entry.node.count();
            }
            alive
        });
        removed
    }

    fn child_mut(&mut self, segment: Segment) -> &mut TrieNode {
        match segment {
            Segment::Primitive(part) => self.primitives.entry(part).or_default(),
            Segment::Reference { address, handle } => {
                let entry = self
                    .references
                    .entry(address)
                    .or_insert_with(|| ReferenceEntry {
                        handle: handle.clone(),
                        node: TrieNode::default(),
                    });
                if !entry.handle.is_alive() {
                    *entry = ReferenceEntry {
                        handle,
                        node: TrieNode::default(),
                    };
                }
                &mut entry.node
            }
        }
    }
}

/// Hit and miss counters of a message cache.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CacheStats {
    pub hits: u64,
    pub misses: u64,
    /// Outputs currently stored.
    pub entries: usize,
}

#[derive(Debug, Default)]
pub(crate) struct MessageCache {
    root: TrieNode,
    len: usize,
    capacity: Option<usize>,
    hits: u64,
    misses: u64,
}

impl MessageCache {
    pub(crate) fn new(capacity: Option<usize>) -> Self {
        Self {
            capacity,
            ..Self::default()
        }
    }

    pub(crate) fn get(&mut self, id: &str, values: &Values) -> Option<Output> {
        let segments = key(id, values);
        let found = segments
            .iter()
            .try_fold(&self.root, |node, segment| node.child(segment))
            .and_then(|node| node.output.clone());
        if found.is_some() {
            self.hits += 1;
        } else {
            self.misses += 1;
        }
        found
    }

    pub(crate) fn insert(&mut self, id: &str, values: &Values, output: Output) {
        if self.capacity.is_some_and(|capacity| self.len >= capacity) {
            self.root = TrieNode::default();
            self.len = 0;
        }
        let mut removed = 0;
        let mut node = &mut self.root;
        for segment in key(id, values) {
            removed += node.sweep();
            node = node.child_mut(segment);
        }
        self.len = self.len.saturating_sub(removed);
        if node.output.replace(output).is_none() {
            self.len += 1;
        }
    }

    pub(crate) fn clear(&mut self) {
        self.root = TrieNode::default();
        self.len = 0;
    }

    pub(crate) fn stats(&self) -> CacheStats {
        CacheStats {
            hits: self.hits,
            misses: self.misses,
            entries: self.len,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Object;

    fn values(pairs: &[(&str, Value)]) -> Values {
        pairs
            .iter()
            .map(|(name, value)| ((*name).to_string(), value.clone()))
            .collect()
    }

    #[test]
    fn primitive_keys_distinguish_values() {
        let mut cache = MessageCache::new(None);
        cache.insert("m", &values(&[("n", Value::Int(1))]), Output::from("one"));
        assert_eq!(cache.get("m", &values(&[("n", Value::Int(1))])), Some(Output::from("one")));
        assert_eq!(cache.get("m", &values(&[("n", Value::Int(2))])), None);
        assert_eq!(cache.get("other", &values(&[("n", Value::Int(1))])), None);
        assert_eq!(cache.stats().hits, 1);
        assert_eq!(cache.stats().misses, 2);
    }

    #[test]
    fn insertion_order_is_part_of_the_key() {
        let mut cache = MessageCache::new(None);
        let ab = values(&[("a", Value::Int(1)), ("b", Value::Int(2))]);
        let ba = values(&[("b", Value::Int(2)), ("a", Value::Int(1))]);
        cache.insert("m", &ab, Output::from("x"));
        assert_eq!(cache.get("m", &ba), None);
    }

    #[test]
    fn objects_are_keyed_by_identity() {
        let mut cache = MessageCache::new(None);
        let first = Object::new(5_i32);
        let equal = Object::new(5_i32);
        cache.insert("m", &values(&[("o", Value::Object(first.clone()))]), Output::from("first"));
        assert_eq!(
            cache.get("m", &values(&[("o", Value::Object(first))])),
            Some(Output::from("first"))
        );
        assert_eq!(cache.get("m", &values(&[("o", Value::Object(equal))])), None);
    }

    #[test]
    fn dropped_references_are_swept() {
        let mut cache = MessageCache::new(None);
        let object = Object::new(String::from("gone"));
        cache.insert("m", &values(&[("o", Value::Object(object))]), Output::from("x"));
        assert_eq!(cache.stats().entries, 1);

        cache.insert("m", &values(&[("o", Value::Int(1))]), Output::from("y"));
        assert_eq!(cache.stats().entries, 1);
    }

    #[test]
    fn capacity_resets_the_trie() {
        let mut cache = MessageCache::new(Some(2));
        for n in 0..3 {
            cache.insert("m", &values(&[("n", Value::Int(n))]), Output::from("x"));
        }
        assert_eq!(cache.stats().entries, 1);
        assert_eq!(cache.get("m", &values(&[("n", Value::Int(2))])), Some(Output::from("x")));
        assert_eq!(cache.get("m", &values(&[("n", Value::Int(0))])), None);
    }
}
