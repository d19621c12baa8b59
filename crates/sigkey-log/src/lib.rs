// ABOUTME: Shared logging setup for sigkey binaries
// ABOUTME: init() for stderr, init_file() for unattended runs, init_for() for crate-filtered output

use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

/// Standard logging to stderr. Default: INFO level, RUST_LOG override.
pub fn init() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive(tracing::Level::INFO.into()))
        .with_writer(std::io::stderr)
        .init();
}

/// Config directory shared by every sigkey binary (~/.config/sigkey).
/// XDG-style on all platforms, so macOS does not use ~/Library.
pub fn config_dir() -> Option<PathBuf> {
    dirs::home_dir().map(|home| home.join(".config").join("sigkey"))
}

/// File-based logging. Default: WARN level, RUST_LOG override.
/// Logs to ~/.config/sigkey/{app_name}/{app_name}.log
/// If setup fails, prints a warning to stderr and continues without logging.
pub fn init_file(app_name: &str) {
    let result = config_dir()
        .ok_or_else(|| "could not determine home directory".into())
        .and_then(|dir| init_file_in(&dir, app_name));

    if let Err(e) = result {
        eprintln!("Warning: failed to set up file logging: {e}");
    }
}

fn init_file_in(base: &Path, app_name: &str) -> Result<(), Box<dyn std::error::Error>> {
    let log_path = log_file_path(base, app_name);
    if let Some(dir) = log_path.parent() {
        std::fs::create_dir_all(dir)?;
    }

    let log_file = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(&log_path)?;

    tracing_subscriber::fmt()
        .with_writer(log_file)
        .with_env_filter(EnvFilter::from_default_env().add_directive(tracing::Level::WARN.into()))
        .with_ansi(false)
        .init();

    Ok(())
}

/// Location of the log file for `app_name` under `base`.
pub fn log_file_path(base: &Path, app_name: &str) -> PathBuf {
    base.join(app_name).join(format!("{app_name}.log"))
}

/// Crate-filtered logging to stderr. Default: INFO for the named crate, WARN for everything else.
/// Used by the CLI so HTTP client internals stay quiet.
pub fn init_for(crate_name: &str) {
    tracing_subscriber::fmt()
        .with_env_filter(crate_filter(crate_name))
        .with_writer(std::io::stderr)
        .init();
}

fn crate_filter(crate_name: &str) -> EnvFilter {
    let directive = format!("{}=info", crate_name.replace('-', "_"));
    EnvFilter::from_default_env()
        .add_directive(tracing::Level::WARN.into())
        .add_directive(
            directive
                .parse()
                .unwrap_or_else(|_| tracing::Level::INFO.into()),
        )
}
