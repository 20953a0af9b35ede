mod activity;
mod analyzer;
mod config;
mod error;
mod github;
mod models;
mod render;
mod state;

use anyhow::{Context, Result};
use clap::Parser;
use config::{Cli, Config};
use github::GithubClient;
use state::AnalysisState;
use std::fs;
use tokio::io::BufReader;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    // Logs go to stderr so stdout only carries the rendered view.
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,reqwest=warn,hyper=warn,hyper_util=warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = Config::from(&cli);
    let client = GithubClient::new(&config)?;
    let state = state::shared(AnalysisState::default());

    match cli.username {
        Some(username) => {
            if analyzer::submit(&client, &state, &username).await {
                present(&*state.lock().await, &config)?;
            }
        }
        None => {
            let stdin = BufReader::new(tokio::io::stdin());
            let cycles =
                analyzer::analyze_lines(stdin, &client, &state, |s| present(s, &config)).await?;
            tracing::debug!(cycles, "stdin closed");
        }
    }

    Ok(())
}

fn present(state: &AnalysisState, config: &Config) -> Result<()> {
    tracing::debug!(
        phase = ?state.phase(),
        repos = state.repos().len(),
        days = state.commits().len(),
        "presenting"
    );

    if config.json {
        println!(
            "{}",
            serde_json::to_string_pretty(state).context("Failed to serialize state")?
        );
    } else {
        print!("{}", render::render_text(state));
    }

    if config.themes.is_empty() {
        return Ok(());
    }

    fs::create_dir_all(&config.out_dir)
        .with_context(|| format!("Failed to create {}", config.out_dir.display()))?;
    for theme in &config.themes {
        let path = config.out_dir.join(theme.file_name());
        fs::write(&path, render::render_svg(state, *theme))
            .with_context(|| format!("Failed to write {}", path.display()))?;
        tracing::info!(path = %path.display(), "wrote SVG card");
    }

    Ok(())
}
