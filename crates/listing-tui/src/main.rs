mod action;
mod app;
mod app_state;
mod component;
mod components;
mod theme;
mod viewport;
mod widgets;

use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use listing_proto::config::Config;
use listing_proto::feed::load_feed;
use listing_proto::platform;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "listings")]
#[command(about = "Browse a saved-search listing feed as cards in the terminal")]
#[command(version)]
struct Cli {
    /// Feed JSON file (falls back to `feed.default_path` in the config)
    path: Option<PathBuf>,

    /// Listing to select on start (0-based)
    #[arg(short, long, default_value_t = 0)]
    index: usize,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let data_dir = platform::data_dir();
    std::fs::create_dir_all(&data_dir)?;

    let config = Config::load().unwrap_or_default();

    let log_path = platform::log_path();
    let log_file = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(&log_path)?;

    // Allow RUST_LOG override; otherwise use the configured filter.
    let log_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.log.filter));
    tracing_subscriber::fmt()
        .with_writer(log_file)
        .with_env_filter(log_filter)
        .with_ansi(false)
        .init();

    // Print log path to stderr so the operator can tail it immediately.
    eprintln!("listings log: {}", log_path.display());
    tracing::info!("listings starting…");

    let path = match cli.path.or_else(|| config.feed.default_path.clone()) {
        Some(p) => p,
        None => anyhow::bail!(
            "no feed given; pass a path or set feed.default_path in {}",
            Config::config_path().display()
        ),
    };
    let feed = load_feed(&path).with_context(|| format!("loading feed {}", path.display()))?;

    let (width, _) = ratatui::crossterm::terminal::size()?;
    let mut state = app_state::AppState::new(feed, config.display.clone(), width);
    state.select(cli.index);

    app::App::new(state).run().await?;

    Ok(())
}
