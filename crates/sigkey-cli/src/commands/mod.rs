// ABOUTME: CLI command definitions using clap
// ABOUTME: Defines the global options and one subcommand per resource operation

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

pub mod lifecycle;
pub mod show;

#[derive(Parser)]
#[command(
    name = "sigkey",
    version,
    about = "Manage a GitHub SSH signing key declaratively"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// State file (defaults to ~/.config/sigkey/state.toml)
    #[arg(long, global = true, env = "SIGKEY_STATE")]
    pub state: Option<PathBuf>,

    /// GitHub token with write:ssh_signing_key scope
    #[arg(long, global = true, env = "GITHUB_TOKEN", hide_env_values = true)]
    pub token: Option<String>,

    /// API root (e.g., https://ghe.example.com/api/v3)
    #[arg(long, global = true, env = "GITHUB_BASE_URL")]
    pub base_url: Option<String>,

    /// Deadline for the whole operation, in seconds
    #[arg(
        long,
        global = true,
        env = "SIGKEY_TIMEOUT",
        value_parser = clap::value_parser!(u64).range(1..)
    )]
    pub timeout: Option<u64>,

    /// Log everything at INFO to stderr
    #[arg(long, short = 'v', global = true)]
    pub verbose: bool,

    /// Log to ~/.config/sigkey/sigkey/sigkey.log instead of stderr
    #[arg(long, global = true)]
    pub log_file: bool,
}

#[derive(Subcommand)]
pub enum Command {
    /// Show what apply would do
    Plan(KeyArgs),

    /// Create or replace the key so GitHub matches the declaration
    Apply(KeyArgs),

    /// Re-read the key from GitHub and update state
    Refresh,

    /// Delete the key from GitHub and forget it
    Destroy,

    /// Start managing an existing key by its numeric ID
    Import {
        /// Key ID as shown by GET /user/ssh_signing_keys
        id: String,
    },

    /// Print the stored state
    Show,
}

/// Declared key: a title plus key material from a flag or a file.
#[derive(Args, Debug, Clone)]
pub struct KeyArgs {
    /// A descriptive name for the key
    #[arg(long)]
    pub title: String,

    /// Public key line (e.g., "ssh-ed25519 AAAA...")
    #[arg(long, conflicts_with = "key_file", required_unless_present = "key_file")]
    pub key: Option<String>,

    /// Path to a .pub file
    #[arg(long)]
    pub key_file: Option<PathBuf>,
}
