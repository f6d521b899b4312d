use std::path::PathBuf;

use clap::Parser;

/// Flags left unset fall back to the config file, then to built-in defaults.
#[derive(Parser, Debug, Default)]
#[command(name = "twenty48-server", about = "Serve a 2048 game over HTTP")]
pub struct Args {
    /// Optional TOML configuration file.
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,
    /// Host interface to bind (default 0.0.0.0).
    #[arg(long)]
    pub host: Option<String>,
    /// Port to bind (default 8080).
    #[arg(long)]
    pub port: Option<u16>,
    /// Optional tracing filter, e.g. "info", "debug" (default "info").
    #[arg(long)]
    pub log: Option<String>,
    /// Optional directory of static files to serve at `/`.
    #[arg(long)]
    pub static_dir: Option<PathBuf>,
    /// Seed for new games; omit to seed from OS entropy.
    #[arg(long)]
    pub seed: Option<u64>,
    /// Ignore moves once the current game is won or over.
    #[arg(long)]
    pub lock_finished: bool,
}
