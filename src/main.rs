//! SignMeUp registration service
//!
//! Main application entry point

use tracing::info;

use signmeup::{
    config::Settings,
    utils::logging,
    database::{create_pool, run_migrations, DatabaseConfig},
    services::ServiceFactory,
    handlers::create_router,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load configuration
    let settings = Settings::new()?;
    settings.validate()?;

    // Initialize logging; the guard flushes the log file on exit
    let _log_guard = logging::init_logging(&settings.logging)?;

    info!("Starting {}...", signmeup::info());

    // Initialize database connection
    info!("Connecting to database...");
    let db_pool = create_pool(&DatabaseConfig::from(&settings.database)).await?;

    // Run database migrations
    run_migrations(&db_pool).await?;

    // Initialize services
    let services = ServiceFactory::new(db_pool);
    let app = create_router(services, &settings);

    let address = settings.bind_address();
    let listener = tokio::net::TcpListener::bind(&address).await?;
    info!(address = %address, base_path = %settings.server.base_path, "Registration API listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("SignMeUp has been shut down.");

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
    }
    info!("Shutdown signal received");
}
