// src/lib.rs
// =============================================================================
// Library root for org-client.
//
// - utils: nested key access, per-instance memoization, JSON fetching
// - github: the organization client built on top of utils
//
// The binary in main.rs is a thin CLI over GithubOrgClient.
// =============================================================================

pub mod github;
pub mod logging;
pub mod utils;

pub use github::{has_license, ClientConfig, ClientError, GithubOrgClient};
pub use utils::{access_nested_map, get_json, JsonFetcher, Key, KeyError, Memo, TransportError};
