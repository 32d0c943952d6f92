// src/utils/mod.rs
// =============================================================================
// Generic helpers that don't know anything about GitHub.
//
// Submodules:
// - nested: walk a JSON value along a path of keys
// - memo: per-instance cache slots for expensive accessors
// - json: the JsonFetcher transport and its HTTP implementation
// =============================================================================

mod json;
mod memo;
mod nested;

pub use json::{get_json, HttpFetcher, JsonFetcher, TransportError, DEFAULT_USER_AGENT};
pub use memo::Memo;
pub use nested::{access_nested_map, Key, KeyError, NestedMap};
