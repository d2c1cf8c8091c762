//! labnet CLI: research network state from the command line
//!
//! Commands: init, feed, post, edit-post, delete-post, like, share,
//! comment, delete-comment, save, saved, notifications, connect, accept,
//! reject, withdraw, disconnect, network, message, conversations, thread,
//! profile, search, jobs, apply, completions

use clap::Parser;
use tracing_subscriber::EnvFilter;

mod cli;
mod commands;
mod config;
mod format;
mod validate;

fn main() -> anyhow::Result<()> {
    let cli = cli::Cli::parse();

    // Logs go to stderr so stdout stays machine readable.
    let default_level = if cli.verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .init();

    commands::run_command(cli)
}
