use tracing::info;

#[tokio::main]
async fn main() -> miette::Result<()> {
    // Initialize logging
    calsync::startup::init_logging()?;

    info!("Starting calsync");

    // Load configuration
    let config = calsync::startup::load_config()?;

    // Run the sync service
    calsync::startup::run(config).await
}
