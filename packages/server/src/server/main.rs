// Main entry point for API server

use std::sync::Arc;

use anyhow::{Context, Result};
use coursegen_core::kernel::{
    GeminiTextGenerator, PostgresCourseStatusStore, PostgresNoteStore, ServerDeps, SystemClock,
};
use coursegen_core::{server::build_app, Config};
use gemini_client::GeminiClient;
use sqlx::postgres::PgPoolOptions;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,coursegen_core=debug,sqlx=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting Course Notes Generator API");

    // Load configuration
    let config = Config::from_env().context("Failed to load configuration")?;
    tracing::info!(
        model = %config.gemini_model,
        concurrency = config.notes.concurrency_limit,
        "Configuration loaded"
    );

    // Connect to database
    tracing::info!("Connecting to database...");
    let pool = PgPoolOptions::new()
        .max_connections(10)
        .connect(&config.database_url)
        .await
        .context("Failed to connect to database")?;
    tracing::info!("Database connected");

    // Run migrations
    tracing::info!("Running database migrations...");
    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .context("Failed to run migrations")?;
    tracing::info!("Migrations complete");

    let server_deps = ServerDeps::new(
        Arc::new(GeminiTextGenerator::new(
            GeminiClient::new(config.gemini_api_key.clone()),
            config.gemini_model.clone(),
        )),
        Arc::new(PostgresNoteStore::new(pool.clone())),
        Arc::new(PostgresCourseStatusStore::new(pool.clone())),
        Arc::new(SystemClock),
        config.notes.clone(),
    );

    // Build application
    let app = build_app(pool, server_deps);

    // Start server
    let addr = format!("0.0.0.0:{}", config.port);
    tracing::info!("Starting server on {}", addr);
    tracing::info!("Health check: http://localhost:{}/health", config.port);

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .context("Failed to bind to address")?;

    axum::serve(listener, app).await.context("Server error")?;

    Ok(())
}
