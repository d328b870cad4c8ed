// Keyemit TUI
// Live terminal view of how keystrokes normalize

use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use keyemit_core::Settings;

#[path = "../tui/mod.rs"]
mod tui;

/// Interactive keyboard normalization explorer
#[derive(Parser, Debug)]
#[command(name = "keyemit-tui")]
#[command(version)]
#[command(about = "Watch keystrokes normalize into canonical key names", long_about = None)]
struct Args {
    /// Settings file (defaults to ~/.config/keyemit/settings.toml)
    #[arg(short, long, value_name = "SETTINGS")]
    settings: Option<PathBuf>,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    // Log to stderr only when asked; the terminal belongs to the UI
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("off")).init();

    let settings = match &args.settings {
        Some(path) => Settings::from_file(path)
            .with_context(|| format!("failed to load settings from {}", path.display()))?,
        None => Settings::load_default().context("failed to load default settings")?,
    };

    tui::run(settings)
}
