use std::{
    fs::{self, OpenOptions},
    process::ExitCode,
    sync::{Arc, Mutex},
};

use anyhow::{Context, Result};
use drawnumber_core::{
    config::{self, AppConfig},
    ConsoleView, DrawNumberApp, DrawNumberView, RandomSecret, SecretSource, StreamView,
};
use tracing_subscriber::{prelude::*, EnvFilter};

fn main() -> Result<ExitCode> {
    init_logging()?;

    config::ensure_default_config()?;
    let config = AppConfig::load()?;
    tracing::info!(settings = %config.settings_path.display(), "Starting drawnumber");

    let mut views: Vec<Arc<dyn DrawNumberView>> = vec![Arc::new(ConsoleView::stdio())];
    if config.mirror_stdout {
        views.push(Arc::new(StreamView::stdout()));
    }
    let log_view = StreamView::create(&config.log_path)
        .with_context(|| format!("failed to create {}", config.log_path.display()))?;
    views.push(Arc::new(log_view));

    let secrets: Box<dyn SecretSource> = match config.seed {
        Some(seed) => Box::new(RandomSecret::seeded(seed)),
        None => Box::new(RandomSecret::from_entropy()),
    };

    let app = DrawNumberApp::new(views, &config.settings_path, secrets);
    tracing::info!(configuration = %app.configuration(), "Game ready");
    app.wait_for_quit();

    // The console thread may still be blocked on stdin; leaving main ends it.
    tracing::info!("Exiting");
    Ok(ExitCode::SUCCESS)
}

fn init_logging() -> Result<()> {
    let log_dir = std::env::current_dir()?.join("logs");
    fs::create_dir_all(&log_dir)?;
    let log_path = log_dir.join("drawnumber.log");
    let log_file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&log_path)
        .with_context(|| format!("failed to open {}", log_path.display()))?;

    let env_filter = EnvFilter::from_default_env();

    let stderr_layer = tracing_subscriber::fmt::layer()
        .with_target(false)
        .compact()
        .with_writer(std::io::stderr);

    let file_layer = tracing_subscriber::fmt::layer()
        .with_target(true)
        .with_ansi(false)
        .compact()
        .with_writer(Mutex::new(log_file));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(stderr_layer)
        .with(file_layer)
        .init();

    Ok(())
}
