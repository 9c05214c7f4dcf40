use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use clap::Parser;
use slang_config::Config;
use slang_core::{RngSource, Session, SlangStore, StorePaths};
use slang_types::QuizDirection;
use tokio::signal;
use tracing_subscriber::EnvFilter;

pub mod commands;
pub mod controller;
pub mod events;
pub mod profile;
pub mod state;
pub mod ui;

#[cfg(test)]
mod tests;

use self::controller::AppController;
use self::state::AppState;

#[derive(Parser)]
#[command(name = "slang", about = "Personal slang dictionary")]
struct Cli {
    /// Profile to load from the config directory
    #[arg(short, long, default_value = "main")]
    profile: String,

    /// Original slang file, never modified
    #[arg(long)]
    seed: Option<PathBuf>,

    /// Working copy that receives edits
    #[arg(long)]
    working: Option<PathBuf>,

    /// Quiz direction: "term", "definition" or "mixed"
    #[arg(long)]
    quiz_direction: Option<QuizDirection>,

    /// Emit logs as JSON
    #[arg(long)]
    json_logs: bool,
}

impl Cli {
    fn apply(&self, config: &mut Config) {
        if let Some(seed) = &self.seed {
            config.dictionary.seed_path = seed.clone();
        }
        if let Some(working) = &self.working {
            config.dictionary.working_path = working.clone();
        }
        if let Some(direction) = self.quiz_direction {
            config.quiz.direction = direction;
        }
    }
}

fn init_tracing(json: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);

    if json {
        builder.json().init();
    } else {
        builder.init();
    }
}

fn load_config(cli: &Cli) -> Config {
    let root = profile::config_root();

    let mut config = profile::init_user_config(&root)
        .and_then(|_| profile::load_user_profile(&root, &cli.profile))
        .unwrap_or_else(|e| {
            tracing::warn!("Using default config, profile unavailable: {e}");
            Config::new()
        });

    cli.apply(&mut config);
    config
}

fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();
    init_tracing(cli.json_logs);

    let config = load_config(&cli);

    let runtime = tokio::runtime::Runtime::new()?;
    let result = runtime.block_on(run(config));
    // A stdin read may still be parked on a blocking thread
    runtime.shutdown_timeout(Duration::from_millis(200));
    result
}

async fn run(config: Config) -> anyhow::Result<()> {
    let paths = StorePaths::new(
        config.dictionary.seed_path.clone(),
        config.dictionary.working_path.clone(),
    );

    let store = match SlangStore::open(paths.clone()) {
        Ok(store) => store,
        Err(e) => {
            tracing::error!("Failed to load slang: {e}");
            eprintln!("Error loading file: {e}");
            SlangStore::empty(paths)
        }
    };

    let session = Session::new(store, config.quiz.direction, RngSource::from_entropy());
    let channel_capacity = config.channel_capacity;
    let state = Arc::new(AppState::new(config));

    let controller = AppController::new(state, channel_capacity);
    let mut tasks = controller.spawn_tasks(session);

    tokio::select! {
        _ = signal::ctrl_c() => {
            tracing::info!("Shutdown requested");
        }
        Some(result) = tasks.join_next() => {
            match result {
                Ok(Ok(())) => tracing::debug!("task finished"),
                Ok(Err(e)) => tracing::error!("task failed: {e}"),
                Err(e) => tracing::error!("task panicked: {e}"),
            }
        }
    }

    controller.shutdown();
    let drain = async {
        while let Some(result) = tasks.join_next().await {
            if let Ok(Err(e)) = result {
                tracing::warn!("task exited with error: {e}");
            }
        }
    };
    if tokio::time::timeout(Duration::from_secs(1), drain).await.is_err() {
        tracing::warn!("Tasks did not stop in time, aborting");
        tasks.shutdown().await;
    }

    Ok(())
}
