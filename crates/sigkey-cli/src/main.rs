// ABOUTME: Entry point for the sigkey CLI
// ABOUTME: Manages one GitHub SSH signing key through plan/apply/refresh/destroy/import

use anyhow::Result;
use clap::Parser;
use sigkey_cli::commands::Cli;

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if present
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();

    if cli.log_file {
        sigkey_log::init_file("sigkey");
    } else if cli.verbose {
        sigkey_log::init();
    } else {
        sigkey_log::init_for("sigkey");
    }

    sigkey_cli::run(cli).await
}
