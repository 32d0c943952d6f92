// src/main.rs
// =============================================================================
// This is the entry point of our CLI application.
//
// What happens here:
// 1. Parse command-line arguments using clap
// 2. Set up logging
// 3. Build a GithubOrgClient and ask it for the repository names
// 4. Print them and exit with proper code (0 = success, 2 = error)
// =============================================================================

mod cli;

use anyhow::{Context, Result};
use clap::Parser;
use cli::Cli;
use org_client::{ClientConfig, GithubOrgClient};
use serde::Serialize;

// What --json prints
#[derive(Debug, Serialize)]
struct RepoListing<'a> {
    org: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    license: Option<&'a str>,
    repos: Vec<String>,
}

#[tokio::main]
async fn main() {
    let exit_code = match run().await {
        Ok(code) => code,
        Err(e) => {
            // {:#} prints the whole context chain on one line
            eprintln!("Error: {:#}", e);
            2
        }
    };

    std::process::exit(exit_code);
}

async fn run() -> Result<i32> {
    let cli = Cli::parse();

    org_client::logging::init(cli.verbose)?;

    let config = ClientConfig::new(&cli.org_url_template, &cli.user_agent)
        .context("invalid --org-url-template")?;
    let client = GithubOrgClient::from_config(&cli.org, config);

    let license = cli.license.as_deref();
    let repos = client
        .public_repos(license)
        .await
        .with_context(|| format!("could not list repositories of {}", cli.org))?;

    let listing = RepoListing {
        org: client.org_name(),
        license,
        repos,
    };
    print_listing(&listing, cli.json)?;

    Ok(0)
}

fn print_listing(listing: &RepoListing<'_>, json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(listing)?);
    } else {
        for name in &listing.repos {
            println!("{}", name);
        }
    }
    Ok(())
}
