//! Batch extraction over multiple article URLs.
//!
//! The loop is sequential and isolating: one entry per input URL in input
//! order, and a failure of any kind becomes that URL's error entry without
//! touching sibling items.

use std::future::Future;

use missive_core::ArticleRecord;
use serde::Serialize;

use crate::error::ApiError;

/// One batch result entry, either a full article or a captured failure.
#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum BatchEntry {
    Success {
        success: bool,
        article_url: String,
        #[serde(flatten)]
        article: Box<ArticleRecord>,
    },
    Failure {
        article_url: String,
        error: String,
    },
}

/// Runs `fetch` once per URL, capturing per-item failures.
pub async fn run_batch<F, Fut>(urls: Vec<String>, mut fetch: F) -> Vec<BatchEntry>
where
    F: FnMut(String) -> Fut,
    Fut: Future<Output = Result<ArticleRecord, ApiError>>,
{
    let mut entries = Vec::with_capacity(urls.len());

    for url in urls {
        let entry = match fetch(url.clone()).await {
            Ok(article) => BatchEntry::Success { success: true, article_url: url, article: Box::new(article) },
            Err(err) => BatchEntry::Failure { article_url: url, error: err.detail },
        };
        entries.push(entry);
    }

    entries
}
