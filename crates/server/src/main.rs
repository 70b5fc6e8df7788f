use std::sync::Arc;

use missive_core::{HttpSummarizer, Summarizer};
use tracing_subscriber::EnvFilter;

mod batch;
mod config;
mod error;
mod routes;

use crate::config::Config;
use crate::routes::AppState;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = Config::from_env().expect("Failed to load configuration");

    let summarizer = config.summarizer_config().map(|summarizer_config| {
        let client = HttpSummarizer::new(summarizer_config).expect("Failed to build summarizer client");
        Arc::new(client) as Arc<dyn Summarizer>
    });
    if summarizer.is_none() {
        tracing::info!("no summarizer backend configured; summarize requests will be rejected");
    }

    let state = AppState { fetch: config.fetch_config(), summarizer };

    let listener = tokio::net::TcpListener::bind(config.bind_addr())
        .await
        .expect("Failed to bind to address");

    tracing::info!("listening on {}", config.bind_addr());
    axum::serve(listener, routes::app(state)).await.expect("Server error");
}
