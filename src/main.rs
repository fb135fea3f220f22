mod cli;
mod config;
mod model;
mod sync;
mod trackers;

use anyhow::Result;
use clap::Parser;

use trackers::github::GitHubClient;
use trackers::shortcut::ShortcutClient;

#[tokio::main]
async fn main() -> Result<()> {
    let args = cli::Args::parse();

    // Config is resolved in full before any network call so a missing key
    // fails fast with a message naming it.
    let config = config::load()?;

    let github = GitHubClient::new(&config);
    let shortcut = ShortcutClient::new(&config);

    let outcome = sync::run(&config, &github, &shortcut, args.dry).await?;

    let prefix = if args.dry { "[dry run] " } else { "" };
    println!(
        "{prefix}Sync complete: {} created, {} updated, {} closed",
        outcome.created, outcome.updated, outcome.closed
    );

    Ok(())
}
