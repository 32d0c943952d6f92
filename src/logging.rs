// src/logging.rs
// =============================================================================
// Sets up tracing output for the binary.
//
// Logs go to stderr so stdout stays clean for the repository list (and the
// --json output can be piped straight into jq).
//
// Level selection:
// - RUST_LOG wins when it's set (e.g. RUST_LOG=org_client=trace)
// - otherwise "warn", or "debug" with --verbose
// =============================================================================

use anyhow::{anyhow, Result};
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

pub fn default_level(verbose: bool) -> LevelFilter {
    if verbose {
        LevelFilter::DEBUG
    } else {
        LevelFilter::WARN
    }
}

// Installs the global subscriber. Fails if one is already installed.
pub fn init(verbose: bool) -> Result<()> {
    let filter = EnvFilter::builder()
        .with_default_directive(default_level(verbose).into())
        .from_env_lossy();

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init()
        .map_err(|e| anyhow!("failed to initialise logging: {}", e))
}
