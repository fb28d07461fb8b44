//! Library catalog server
//!
//! REST API for the library frontend: books, categories, borrowed books and
//! cookie sessions.

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use library_catalog_server::{
    api,
    config::{AppConfig, DEFAULT_TOKEN_SECRET},
    repository::{mongo::MongoStore, Repository},
    services::Services,
    AppState,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    let config = AppConfig::load().context("Failed to load configuration")?;

    // Initialize tracing
    let filter = tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        format!(
            "library_catalog_server={},tower_http=debug",
            config.logging.level
        )
        .into()
    });

    let registry = tracing_subscriber::registry().with(filter);
    if config.logging.format == "json" {
        registry.with(tracing_subscriber::fmt::layer().json()).init();
    } else {
        registry.with(tracing_subscriber::fmt::layer()).init();
    }

    tracing::info!(
        "Starting library catalog server v{} ({})",
        env!("CARGO_PKG_VERSION"),
        if config.is_production() { "production" } else { "development" }
    );

    if config.auth.access_token_secret == DEFAULT_TOKEN_SECRET {
        tracing::warn!("ACCESS_TOKEN_SECRET is not set; sessions are signed with the default secret");
    }

    // One client for the whole process, shared by every request
    let repository = Repository::new(Arc::new(MongoStore::new(config.database.clone())));

    match repository.ping().await {
        Ok(()) => tracing::info!("Connected to database '{}'", config.database.name),
        Err(e) => tracing::warn!("Database ping failed, continuing: {}", e),
    }

    let services = Services::new(repository, &config);

    let addr = SocketAddr::new(
        config
            .server
            .host
            .parse()
            .context("Invalid host address")?,
        config.server.port,
    );

    let state = AppState {
        config: Arc::new(config),
        services: Arc::new(services),
    };

    let app = api::create_router(state);

    tracing::info!("Server listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
