// ABOUTME: Library side of the sigkey CLI: argument types, config, state file, commands.
// ABOUTME: run() resolves settings and dispatches one subcommand with its deadline.

pub mod commands;
pub mod config;
pub mod state_file;

use anyhow::{Context, Result};
use sigkey_github::GitHubClient;

use commands::{lifecycle, show, Cli, Command};
use config::{FileConfig, Settings};
use state_file::StateFile;

/// Execute the parsed command line.
pub async fn run(cli: Cli) -> Result<()> {
    let state = match cli.state {
        Some(ref path) => StateFile::new(path),
        None => StateFile::new(StateFile::default_path()?),
    };

    // show never touches the network
    if let Command::Show = cli.command {
        return show::run(&state);
    }

    let settings = Settings::resolve(cli.base_url, cli.token, cli.timeout, FileConfig::load());
    tracing::debug!(?settings, state = %state.path().display(), "resolved settings");

    if settings.client.token.is_none() {
        tracing::warn!("no GitHub token configured; requests will be unauthenticated");
    }

    let client = GitHubClient::new(settings.client.clone()).context("Failed to build GitHub client")?;
    let deadline = settings.deadline;

    match cli.command {
        Command::Plan(args) => lifecycle::run_plan(&client, &state, args, deadline).await,
        Command::Apply(args) => lifecycle::run_apply(&client, &state, args, deadline).await,
        Command::Refresh => lifecycle::run_refresh(&client, &state, deadline).await,
        Command::Destroy => lifecycle::run_destroy(&client, &state, deadline).await,
        Command::Import { id } => lifecycle::run_import(&client, &state, &id, deadline).await,
        Command::Show => show::run(&state),
    }
}
