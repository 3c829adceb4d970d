use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use lexicon_analyzer::Analyzer;
use lexicon_config::Config;
use lexicon_gemini::GeminiAnalyzer;
use tokio::signal;
use tracing_subscriber::EnvFilter;

pub mod controller;
pub mod events;
pub mod input;
pub mod render;
pub mod state;
pub mod ui;

#[cfg(test)]
mod tests;

use self::controller::AppController;
use self::state::AppState;

/// Etymology, phonetics and usage tutor for English words
#[derive(Parser, Debug)]
#[command(name = "lexicon", version)]
struct Args {
    /// JSON config file; environment variables still override it
    #[arg(long)]
    config: Option<PathBuf>,

    /// Emit logs as JSON lines on stderr
    #[arg(long)]
    log_json: bool,

    /// Word to analyze right away
    word: Option<String>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    init_tracing(args.log_json);

    // A missing API key stops here, before any task or request exists
    let config = match &args.config {
        Some(path) => Config::from_file_and_env(path),
        None => Config::from_env(),
    }
    .context("Failed to load configuration")?;
    tracing::debug!(analyzer = ?config.analyzer, "Configuration loaded");

    let analyzer: Arc<dyn Analyzer> = Arc::new(GeminiAnalyzer::from_config(&config.analyzer));
    let state = Arc::new(AppState::new(config));

    let controller = AppController::new(state);
    let mut tasks = controller.spawn_tasks(analyzer);

    if let Some(word) = args.word {
        controller.submit(word).await?;
    }

    tokio::select! {
        result = signal::ctrl_c() => {
            result.context("failed to listen for ctrl+c")?;
            tracing::info!("Shutdown requested");
        }
        Some(result) = tasks.join_next() => {
            match result {
                Ok(Ok(())) => tracing::info!("Task finished, shutting down"),
                Ok(Err(e)) => tracing::error!("Task failed: {e:#}"),
                Err(e) => tracing::error!("Task panicked: {e}"),
            }
        }
    }

    controller.shutdown();
    tasks.shutdown().await;
    println!();

    Ok(())
}

fn init_tracing(json: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);

    if json {
        builder.json().init();
    } else {
        builder.init();
    }
}
