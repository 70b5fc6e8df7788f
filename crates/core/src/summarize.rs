//! Best-effort article summarization.
//!
//! Summarization is an external text-to-text service behind the
//! [`Summarizer`] trait. The bundled [`HttpSummarizer`] speaks the
//! OpenAI-compatible chat-completions protocol, which covers hosted APIs
//! and local inference servers alike.
//!
//! Long articles are split into chunks of at most [`SUMMARY_CHUNK_CHARS`]
//! characters and each chunk is summarized independently. A chunk whose
//! summarization fails degrades to a visible placeholder instead of
//! failing the whole article.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};

use crate::{MissiveError, Result};

/// Maximum characters of body text sent to the backend per request.
pub const SUMMARY_CHUNK_CHARS: usize = 3000;

/// Inline replacement for a chunk whose summarization failed.
pub const CHUNK_PLACEHOLDER: &str = "[Summary unavailable for this section]";

const SYSTEM_PROMPT: &str =
    "You summarize newsletter article excerpts in two or three sentences, keeping the author's key points and tone.";

/// A text-to-text summarization backend.
#[async_trait]
pub trait Summarizer: Send + Sync {
    /// Summarizes one chunk of article text.
    async fn summarize(&self, text: &str) -> Result<String>;
}

/// Configuration for the HTTP summarization backend.
#[derive(Debug, Clone)]
pub struct SummarizerConfig {
    /// Chat-completions endpoint URL.
    pub endpoint: String,
    /// Model name sent with each request.
    pub model: String,
    /// Bearer token, if the backend requires one.
    pub api_key: Option<String>,
    /// Request timeout in seconds.
    pub timeout: u64,
}

impl Default for SummarizerConfig {
    fn default() -> Self {
        Self {
            endpoint: "https://api.openai.com/v1/chat/completions".to_string(),
            model: "gpt-4o-mini".to_string(),
            api_key: None,
            timeout: 60,
        }
    }
}

/// OpenAI-compatible chat-completions summarizer.
pub struct HttpSummarizer {
    client: Client,
    config: SummarizerConfig,
}

impl HttpSummarizer {
    /// Creates a summarizer with its own HTTP client.
    pub fn new(config: SummarizerConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout))
            .build()
            .map_err(MissiveError::HttpError)?;

        Ok(Self { client, config })
    }
}

#[derive(Serialize)]
struct ChatRequest {
    model: String,
    messages: Vec<ChatMessage>,
}

#[derive(Serialize, Deserialize)]
struct ChatMessage {
    role: String,
    content: String,
}

#[derive(Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<ChatChoice>,
}

#[derive(Deserialize)]
struct ChatChoice {
    message: ChatMessage,
}

#[async_trait]
impl Summarizer for HttpSummarizer {
    async fn summarize(&self, text: &str) -> Result<String> {
        let request = ChatRequest {
            model: self.config.model.clone(),
            messages: vec![
                ChatMessage { role: "system".to_string(), content: SYSTEM_PROMPT.to_string() },
                ChatMessage { role: "user".to_string(), content: text.to_string() },
            ],
        };

        let mut call = self.client.post(&self.config.endpoint).json(&request);
        if let Some(api_key) = &self.config.api_key {
            call = call.bearer_auth(api_key);
        }

        let response = call.send().await?.error_for_status()?;
        let body: ChatResponse = response.json().await?;

        body.choices
            .into_iter()
            .next()
            .map(|choice| choice.message.content)
            .ok_or_else(|| MissiveError::SummarizeError("response contained no choices".to_string()))
    }
}

/// Splits text into chunks of at most `max_chars` characters.
///
/// Split points prefer paragraph breaks, then any whitespace, and only cut
/// mid-word when a chunk-sized run has no whitespace at all. Boundaries are
/// counted in characters, never bytes, so multi-byte text cannot be split
/// inside a character.
pub fn chunk_text(text: &str, max_chars: usize) -> Vec<String> {
    let max_chars = max_chars.max(1);
    let mut chunks = Vec::new();
    let mut rest = text.trim();

    while !rest.is_empty() {
        if rest.chars().count() <= max_chars {
            chunks.push(rest.to_string());
            break;
        }

        let boundary = match rest.char_indices().nth(max_chars) {
            Some((index, _)) => index,
            None => rest.len(),
        };
        let window = &rest[..boundary];
        let split = window
            .rfind("\n\n")
            .or_else(|| window.rfind(char::is_whitespace))
            .filter(|&index| index > 0)
            .unwrap_or(boundary);

        let (head, tail) = rest.split_at(split);
        let head = head.trim_end();
        if !head.is_empty() {
            chunks.push(head.to_string());
        }
        rest = tail.trim_start();
    }

    chunks
}

/// Summarizes text chunk by chunk.
///
/// Each chunk is sent to the backend once, in order. Failed chunks (and
/// degenerate empty responses) appear as [`CHUNK_PLACEHOLDER`] so the
/// caller can see which sections are missing. Chunk summaries are joined
/// with a blank line.
pub async fn summarize_chunked(summarizer: &dyn Summarizer, text: &str) -> String {
    let mut summaries = Vec::new();

    for chunk in chunk_text(text, SUMMARY_CHUNK_CHARS) {
        match summarizer.summarize(&chunk).await {
            Ok(summary) if !summary.trim().is_empty() => summaries.push(summary.trim().to_string()),
            Ok(_) | Err(_) => summaries.push(CHUNK_PLACEHOLDER.to_string()),
        }
    }

    summaries.join("\n\n")
}
