// src/main.rs

use std::sync::Arc;

use dotenvy::dotenv;
use exam_tracker::config::Config;
use exam_tracker::routes;
use exam_tracker::services::identity::MockUserRepository;
use exam_tracker::state::AppState;
use exam_tracker::storage::SqliteStore;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load .env file (if present)
    dotenv().ok();

    // Load configuration from environment
    let config = Config::from_env();

    let file_appender = tracing_appender::rolling::daily(&config.log_dir, "exam_tracker.log");
    let (non_blocking, _guard) = tracing_appender::non_blocking(file_appender);
    let env_filter = EnvFilter::new(&config.rust_log);
    let stdout_layer = fmt::layer().with_writer(std::io::stdout).with_target(false);
    let file_layer = fmt::layer().with_writer(non_blocking).with_ansi(false);

    // Initialize Tracing (Logging)
    tracing_subscriber::registry()
        .with(env_filter)
        .with(stdout_layer)
        .with(file_layer)
        .init();

    // Open key-value storage and apply migrations
    let storage = SqliteStore::connect(&config.database_url).await?;
    tracing::info!("Storage ready at {}", config.database_url);

    // Seed fixture accounts for the mock identity API
    let users = MockUserRepository::seeded()?;
    tracing::info!("Mock identity API seeded with fixture users");

    if config.mock_latency {
        tracing::info!("Mock latency enabled");
    }

    let addr = config.bind_addr.clone();
    let state = AppState::new(config, Arc::new(storage), Arc::new(users));

    // Create the Axum application router
    let app = routes::create_router(state);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("Listening on {}", listener.local_addr()?);

    // Start the server
    axum::serve(listener, app).await?;

    Ok(())
}
