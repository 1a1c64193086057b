//! Command-line demo: loads content, plays scripted rounds, prints outcomes.
mod config;
mod demo;

use anyhow::{Context, Result};
use arena_content::{ConfigLoader, ContentFactory};
use arena_runtime::{FirstOptionProvider, PacedAnimator, Session};
use config::CliConfig;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if it exists (silently ignore if not found)
    let _ = dotenvy::dotenv();

    let config = CliConfig::from_env();
    let _guard = setup_logging(&config)?;

    let factory = config
        .data_dir
        .clone()
        .map_or_else(ContentFactory::bundled, ContentFactory::new);
    let engine_config = match &config.engine_config {
        Some(path) => ConfigLoader::load(path)
            .with_context(|| format!("loading engine config {}", path.display()))?,
        None => factory.load_config()?,
    };
    let state = factory
        .load_scenario(&config.scenario, &engine_config)
        .with_context(|| format!("loading scenario '{}'", config.scenario))?;

    let mut builder = Session::builder()
        .state(state)
        .config(engine_config)
        .catalog(factory.load_catalog()?)
        .messages(factory.load_messages()?)
        .provider(FirstOptionProvider)
        .event_buffer_size(config.event_buffer);
    if let Some(pace) = config.pace {
        builder = builder.animator(PacedAnimator::new(pace));
    }
    let mut session = builder.build()?;

    let loggers: Vec<_> = session
        .events()
        .subscribe_all()
        .into_iter()
        .map(demo::spawn_event_logger)
        .collect();

    demo::run(&mut session, config.rounds).await?;

    // Dropping the session closes the bus and ends the loggers.
    drop(session);
    for logger in loggers {
        logger.await?;
    }
    Ok(())
}

/// Logs to stderr, and to `<log_dir>/arena.log` when configured.
///
/// The returned guard flushes the file writer on drop.
fn setup_logging(
    config: &CliConfig,
) -> Result<Option<tracing_appender::non_blocking::WorkerGuard>> {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));
    let stderr_layer = tracing_subscriber::fmt::layer().with_writer(std::io::stderr);

    let Some(log_dir) = &config.log_dir else {
        tracing_subscriber::registry()
            .with(env_filter)
            .with(stderr_layer)
            .init();
        return Ok(None);
    };

    std::fs::create_dir_all(log_dir)
        .with_context(|| format!("creating log directory {}", log_dir.display()))?;
    let file_appender = tracing_appender::rolling::never(log_dir, "arena.log");
    let (non_blocking_file, guard) = tracing_appender::non_blocking(file_appender);
    let file_layer = tracing_subscriber::fmt::layer()
        .with_writer(non_blocking_file)
        .with_ansi(false);

    tracing_subscriber::registry()
        .with(env_filter)
        .with(stderr_layer)
        .with(file_layer)
        .init();

    tracing::info!("Log file: {}/arena.log", log_dir.display());
    Ok(Some(guard))
}
