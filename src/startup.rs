use crate::config::Config;
use crate::engine::ReconciliationEngine;
use crate::error::Error;
use crate::mirror::FileMirrorStore;
use crate::remote::GoogleCalendarClient;
use crate::scheduler;
use crate::shutdown;
use crate::source::FileSourceReader;
use std::sync::Arc;
use std::time::Duration;
use tokio_util::sync::CancellationToken;
use tracing::{error, info};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

/// Initialize logging with environment-based configuration
pub fn init_logging() -> miette::Result<()> {
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .finish();

    tracing::subscriber::set_global_default(subscriber)
        .map_err(|e| Error::Other(format!("Failed to set up logging: {}", e)))?;

    Ok(())
}

/// Load and validate the application config
pub fn load_config() -> miette::Result<Config> {
    match Config::load() {
        Ok(config) => Ok(config),
        Err(e) => {
            error!("Failed to load configuration: {:?}", e);
            Err(e.into())
        }
    }
}

/// Wire up the collaborators and run the sync service until shutdown
pub async fn run(config: Config) -> miette::Result<()> {
    let source = Arc::new(FileSourceReader::new(&config.source_events_path));
    let mirror = Arc::new(
        FileMirrorStore::open(&config.mirror_db_path)
            .await
            .map_err(miette::Report::from)?,
    );
    let remote = Arc::new(GoogleCalendarClient::new(&config));

    let engine = Arc::new(ReconciliationEngine::new(
        source,
        mirror,
        remote,
        config.timezone,
    ));

    // Create shutdown token shared by the signal handler and the scheduler
    let shutdown_token = CancellationToken::new();

    // Spawn signal handler task
    tokio::spawn(shutdown::handle_signals(shutdown_token.clone()));

    // Run the sync scheduler until it is cancelled
    let scheduler_task = scheduler::start_sync_loop(
        engine,
        Duration::from_secs(config.sync_interval_secs),
        shutdown_token,
    );

    scheduler_task
        .await
        .map_err(|e| Error::Other(format!("Scheduler task error: {}", e)))?;

    info!("calsync stopped");
    Ok(())
}
