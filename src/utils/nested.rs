// src/utils/nested.rs
// =============================================================================
// Safe traversal of nested JSON-like data by a path of keys.
//
// Given a structure like {"a": {"b": {"c": 1}}} and the path ["a", "b", "c"]
// we walk one key at a time and return a reference to the value at the end.
//
// Failure rule:
// - If the current value can't be indexed (it's a number, a string, null...)
//   OR the key isn't there, we stop and report THAT key.
// - Both cases produce the same KeyError. Callers only care which key broke.
//
// Rust concepts:
// - Traits: NestedMap describes "something you can look up children in"
// - Generics: access_nested_map works for any NestedMap, not just JSON
// - Lifetimes: the returned value borrows from the input, no copying
// =============================================================================

use serde_json::Value;
use std::fmt;
use thiserror::Error;

// One step of a key path.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Key {
    /// A field name in a mapping
    Name(String),
    /// A position in a sequence
    Index(usize),
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Key::Name(name) => write!(f, "'{}'", name),
            Key::Index(index) => write!(f, "{}", index),
        }
    }
}

impl From<&str> for Key {
    fn from(name: &str) -> Self {
        Key::Name(name.to_string())
    }
}

impl From<String> for Key {
    fn from(name: String) -> Self {
        Key::Name(name)
    }
}

impl From<usize> for Key {
    fn from(index: usize) -> Self {
        Key::Index(index)
    }
}

// The path could not be resolved at `key` (position `depth` in the path).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("key not found: {key}")]
pub struct KeyError {
    pub key: Key,
    pub depth: usize,
}

// Something we can descend into one key at a time.
//
// is_mapping() is the capability check: when it's false, child() is never
// consulted and the traversal fails on the current key.
pub trait NestedMap {
    fn is_mapping(&self) -> bool;

    fn child(&self, key: &Key) -> Option<&Self>;
}

impl NestedMap for Value {
    fn is_mapping(&self) -> bool {
        matches!(self, Value::Object(_) | Value::Array(_))
    }

    fn child(&self, key: &Key) -> Option<&Self> {
        match (self, key) {
            (Value::Object(map), Key::Name(name)) => map.get(name),
            (Value::Array(items), Key::Index(index)) => items.get(*index),
            _ => None,
        }
    }
}

// Walks `nested` along `path` and returns the value at the end.
//
// Parameters:
//   nested: the structure to traverse (borrowed)
//   path: keys to follow, in order; anything convertible into Key works,
//         so ["license", "key"] is a valid path
//
// Returns:
//   Ok(&value) at the full path (the input itself for an empty path)
//   Err(KeyError) naming the first key that could not be resolved
pub fn access_nested_map<N, P, K>(nested: &N, path: P) -> Result<&N, KeyError>
where
    N: NestedMap + ?Sized,
    P: IntoIterator<Item = K>,
    K: Into<Key>,
{
    let mut current = nested;

    for (depth, key) in path.into_iter().enumerate() {
        let key: Key = key.into();

        if !current.is_mapping() {
            return Err(KeyError { key, depth });
        }

        current = match current.child(&key) {
            Some(next) => next,
            None => return Err(KeyError { key, depth }),
        };
    }

    Ok(current)
}
