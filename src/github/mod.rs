// src/github/mod.rs
// =============================================================================
// This module talks to the GitHub REST API for a single organization.
//
// Currently implements:
// - Fetching organization metadata (cached per client)
// - Fetching the organization's repository list (cached per client)
// - Filtering repository names by license key
//
// Not handled: authentication, pagination, rate limits.
// =============================================================================

mod client;

#[cfg(test)]
pub(crate) mod fixtures;

// Re-export the client API
pub use client::{
    has_license, ClientConfig, ClientError, GithubOrgClient, DEFAULT_ORG_URL_TEMPLATE,
    ORG_PLACEHOLDER,
};
