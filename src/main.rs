//! daily-digest CLI - one digest per invocation
//!
//! The application logic is contained in lib.rs, and this file is responsible
//! for parsing arguments and handling top-level errors.

use clap::Parser;
use daily_digest::{Config, RunOutcome, Runner, Style};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "daily-digest")]
#[command(author, version, about = "Daily LLM-written digest of RSS feeds, pushed to ntfy", long_about = None)]
struct Cli {
    /// Path to a config file (defaults to digest.toml in cwd or ~/.config/daily-digest)
    #[arg(long)]
    config: Option<PathBuf>,
    /// Prompt preset to use
    #[arg(long, value_enum, conflicts_with = "template_file")]
    style: Option<Style>,
    /// Read the prompt template from a file; it must contain {articles}
    #[arg(long)]
    template_file: Option<PathBuf>,
    /// Print the notification instead of sending it
    #[arg(long)]
    dry_run: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => Config::load_from(path)?,
        None => Config::load()?,
    };

    if let Some(style) = cli.style {
        config.agent.style = style;
        config.agent.template = None;
    }
    if let Some(path) = &cli.template_file {
        config.agent.template = Some(std::fs::read_to_string(path)?);
    }

    let runner = Runner::from_config(config, cli.dry_run)?;
    match runner.run().await? {
        RunOutcome::NothingToReport => tracing::info!("done, no digest sent"),
        RunOutcome::Delivered { articles } => tracing::info!(articles, "done"),
    }

    Ok(())
}
