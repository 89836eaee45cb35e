use anyhow::{Context, Result};
use edupress_api::seed::seeded_library;
use edupress_api::{app, ApiConfig, AppState, GeminiClient};
use std::sync::Arc;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "edupress_api=debug,edupress=info,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = ApiConfig::from_env()?;
    if config.api_key.is_none() {
        warn!("GEMINI_API_KEY is not set; generation endpoints will fail");
    }

    let source = GeminiClient::new(&config).context("failed to set up the content source")?;
    let library = seeded_library(config.library_capacity)?;
    let state = AppState::new(library, Arc::new(source));

    let listener = tokio::net::TcpListener::bind(config.bind)
        .await
        .with_context(|| format!("failed to bind {}", config.bind))?;

    info!("edupress API listening on http://{}", config.bind);

    axum::serve(listener, app(state)).await?;
    Ok(())
}
