// src/cli.rs
// =============================================================================
// This file defines our command-line interface using the `clap` crate.
//
// Usage:
//   org-client google
//   org-client google --license apache-2.0 --json
//
// Every option that changes where we connect can also come from the
// environment, which is handy for pointing at GitHub Enterprise in CI.
// =============================================================================

use clap::Parser;
use org_client::github::DEFAULT_ORG_URL_TEMPLATE;
use org_client::utils::DEFAULT_USER_AGENT;

#[derive(Parser, Debug)]
#[command(
    name = "org-client",
    version,
    about = "List a GitHub organization's public repositories",
    long_about = "org-client fetches a GitHub organization's metadata and its repository list, \
                  then prints the repository names, optionally only those with a given license."
)]
pub struct Cli {
    /// Organization login (e.g., google)
    pub org: String,

    /// Only list repositories whose license key matches exactly (e.g., mit, apache-2.0)
    #[arg(long)]
    pub license: Option<String>,

    /// Output results in JSON format instead of one name per line
    #[arg(long)]
    pub json: bool,

    /// URL of the organization metadata; {org} is replaced with the organization
    #[arg(long, env = "ORG_CLIENT_URL_TEMPLATE", default_value = DEFAULT_ORG_URL_TEMPLATE)]
    pub org_url_template: String,

    /// User-Agent header sent with every request
    #[arg(long, env = "ORG_CLIENT_USER_AGENT", default_value = DEFAULT_USER_AGENT)]
    pub user_agent: String,

    /// Log debug output to stderr (RUST_LOG overrides this)
    #[arg(short, long)]
    pub verbose: bool,
}
