//! Error types for Missive operations.
//!
//! This module defines the main error type [`MissiveError`] which represents
//! all possible errors that can occur during platform detection, fetching,
//! extraction, and summarization.
//!
//! # Example
//!
//! ```rust
//! use missive_core::{MissiveError, Result};
//!
//! fn require_body(html: &str) -> Result<&str> {
//!     if html.is_empty() {
//!         return Err(MissiveError::ContentNotFound { selector: "div.body.markup".to_string() });
//!     }
//!     Ok(html)
//! }
//! ```

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for newsletter extraction operations.
///
/// This enum represents all possible errors that can occur during
/// platform detection, HTTP fetching, file I/O, and article extraction.
///
/// # Example
///
/// ```rust
/// use missive_core::{Document, MissiveError, Platform, extract_article};
///
/// let doc = Document::parse("<html><body></body></html>").unwrap();
/// match extract_article(&doc, Platform::Substack) {
///     Ok(record) => println!("Extracted: {}", record.article_title),
///     Err(MissiveError::ContentNotFound { selector }) => {
///         println!("No element matched {}", selector);
///     }
///     Err(e) => println!("Error: {}", e),
/// }
/// ```
#[derive(Error, Debug)]
pub enum MissiveError {
    /// HTTP request errors from reqwest.
    ///
    /// This variant wraps network errors, DNS failures, non-success status
    /// codes, and other HTTP-related problems.
    #[cfg(feature = "fetch")]
    #[error("HTTP request failed: {0}")]
    HttpError(#[from] reqwest::Error),

    /// Request timeout.
    ///
    /// Returned when an HTTP request exceeds the configured timeout duration.
    #[cfg(feature = "fetch")]
    #[error("Request timed out after {timeout} seconds")]
    Timeout { timeout: u64 },

    /// Invalid URL provided.
    ///
    /// Returned when a URL cannot be parsed or is malformed.
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// The page belongs to no supported newsletter platform.
    ///
    /// Platform detection inspects the URL host; anything that is neither
    /// a Substack nor a Beehiiv page ends up here.
    #[error("Unsupported platform: {0} (only Substack and Beehiiv are supported)")]
    UnsupportedPlatform(String),

    /// HTML parsing errors.
    ///
    /// Returned when HTML cannot be parsed, often due to an invalid CSS selector.
    #[error("Failed to parse HTML: {0}")]
    HtmlParseError(String),

    /// The article body container is missing.
    ///
    /// Every supported platform wraps the article body in a known container
    /// element. A page without that container is a removed post, a paywall
    /// interstitial, or not an article page at all.
    #[error("Could not find the article body (no element matched `{selector}`)")]
    ContentNotFound { selector: String },

    /// Extraction failed partway through.
    ///
    /// Wraps any unexpected fault inside the extraction pipeline, annotated
    /// with the platform whose rules were being applied.
    #[error("Failed to parse {platform} article: {reason}")]
    ParseError { platform: String, reason: String },

    /// Summarization backend errors.
    ///
    /// Returned when the summarization service rejects a request or
    /// responds with an unusable payload.
    #[cfg(feature = "summarize")]
    #[error("Summarization failed: {0}")]
    SummarizeError(String),

    /// File not found.
    ///
    /// Returned when attempting to read a file that doesn't exist.
    #[error("File not found: {0}")]
    FileNotFound(PathBuf),

    /// File I/O errors.
    ///
    /// Wraps standard I/O errors for file and stdin operations.
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),
}

/// Result type alias for MissiveError.
///
/// This is a convenience alias for `std::result::Result<T, MissiveError>`.
pub type Result<T> = std::result::Result<T, MissiveError>;
