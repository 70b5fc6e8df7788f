//! HTTP routes for the extraction API.

use std::sync::Arc;
use std::time::Duration;

use axum::Router;
use axum::extract::{Query, State};
use axum::response::Json;
use axum::routing::{get, post};
use missive_core::{ArticleRecord, Document, FetchConfig, Platform, Summarizer, extract_article, fetch_url, summarize_chunked};
use serde::{Deserialize, Serialize};
use serde_json::json;
use tower::ServiceBuilder;
use tower_http::cors::CorsLayer;
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

use crate::batch::{self, BatchEntry};
use crate::error::ApiError;

const RUNNING_BANNER: &str = "Missive newsletter extraction API v1 is running.";

/// Shared state handed to every handler.
#[derive(Clone)]
pub struct AppState {
    pub fetch: FetchConfig,
    pub summarizer: Option<Arc<dyn Summarizer>>,
}

/// Builds the application router with tracing, CORS, and a request timeout.
pub fn app(state: AppState) -> Router {
    Router::new()
        .route("/", get(root))
        .route("/v1/article-content", get(article_content))
        .route("/v1/batch-articles", post(batch_articles))
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(CorsLayer::permissive())
                .layer(TimeoutLayer::new(Duration::from_secs(120))),
        )
        .with_state(state)
}

async fn root() -> Json<serde_json::Value> {
    Json(json!({ "message": RUNNING_BANNER }))
}

#[derive(Debug, Deserialize)]
struct ArticleQuery {
    url: String,
    #[serde(default)]
    summarize: bool,
}

#[derive(Debug, Serialize)]
struct ArticleResponse {
    success: bool,
    article_url: String,
    #[serde(flatten)]
    article: ArticleRecord,
    #[serde(skip_serializing_if = "Option::is_none")]
    summary: Option<String>,
}

#[derive(Debug, Deserialize)]
struct BatchRequest {
    urls: Vec<String>,
}

#[derive(Debug, Serialize)]
struct BatchResponse {
    results: Vec<BatchEntry>,
}

/// Fetches one URL and runs the platform extraction pipeline.
async fn fetch_and_extract(state: &AppState, url: &str) -> Result<ArticleRecord, ApiError> {
    let platform = Platform::from_url(url)?;
    let html = fetch_url(url, &state.fetch).await?;
    let doc = Document::parse(&html)?;
    Ok(extract_article(&doc, platform)?)
}

async fn article_content(
    State(state): State<AppState>,
    Query(query): Query<ArticleQuery>,
) -> Result<Json<ArticleResponse>, ApiError> {
    // Reject before fetching so a misconfigured deployment fails fast.
    if query.summarize && state.summarizer.is_none() {
        return Err(ApiError::bad_request("Summarization is not configured."));
    }

    let article = fetch_and_extract(&state, &query.url).await?;

    let mut summary = None;
    if query.summarize
        && let Some(summarizer) = &state.summarizer
    {
        summary = Some(summarize_chunked(summarizer.as_ref(), &article.full_text).await);
    }

    tracing::info!(url = %query.url, words = article.word_count, "article extracted");

    Ok(Json(ArticleResponse { success: true, article_url: query.url, article, summary }))
}

async fn batch_articles(State(state): State<AppState>, Json(request): Json<BatchRequest>) -> Json<BatchResponse> {
    let results = batch::run_batch(request.urls, |url| {
        let state = state.clone();
        async move { fetch_and_extract(&state, &url).await }
    })
    .await;

    Json(BatchResponse { results })
}
