//! Library half of the `tintsync` binary, so commands can be exercised
//! in-process.

pub mod cli;
pub mod commands;
pub mod host;

pub use cli::Cli;

/// Runs a parsed command line and returns what it prints.
pub async fn run(cli: Cli) -> anyhow::Result<String> {
    commands::execute(cli.command).await
}
