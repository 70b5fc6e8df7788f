//! Article record output type.
//!
//! This module defines the [`ArticleRecord`] struct which represents the
//! complete result of a newsletter extraction: resolved metadata, the
//! flattened body text, derived reading stats, and generated prompt
//! templates.
//!
//! Every field is always populated. Sources that yield nothing produce the
//! sentinel defaults or `None`, never an absent field, so serialized records
//! have a stable shape downstream consumers can rely on.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Sentinel title when no strategy yields one.
pub const DEFAULT_TITLE: &str = "Title not found";
/// Sentinel author when no strategy yields one.
pub const DEFAULT_AUTHOR: &str = "Author not found";
/// Sentinel publication name when no strategy yields one.
pub const DEFAULT_PUBLICATION: &str = "Publication not found";

/// The complete result of extracting a newsletter article.
///
/// Constructed fresh per extraction call and never mutated after return.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArticleRecord {
    /// Name of the publication the article belongs to.
    pub publication_name: String,

    /// Article title.
    pub article_title: String,

    /// Article subtitle, when the platform carries one.
    pub article_subtitle: Option<String>,

    /// Author display name.
    pub author: String,

    /// Publication date. ISO timestamps are truncated to `YYYY-MM-DD`;
    /// display-style footer dates are kept verbatim.
    pub publication_date: Option<String>,

    /// Cleaned body text: blocks joined by exactly one blank line, with no
    /// bare newlines inside a block.
    pub full_text: String,

    /// Whitespace-delimited token count of `full_text`.
    pub word_count: usize,

    /// Number of paragraph separators in `full_text`.
    pub paragraph_count: usize,

    /// Estimated reading time at 200 words per minute, never below 1.
    pub reading_time_minutes: u32,

    /// Canonical URL of the article, if the page declares one.
    pub canonical_url: Option<String>,

    /// Tags from the page's keywords, trimmed, empty entries dropped.
    pub tags: Vec<String>,

    /// Newsletter category, if declared or derivable from tags.
    pub newsletter_category: Option<String>,

    /// Generated prompt templates keyed by template name.
    pub prompt_templates: BTreeMap<String, String>,
}

impl Default for ArticleRecord {
    fn default() -> Self {
        Self {
            publication_name: DEFAULT_PUBLICATION.to_string(),
            article_title: DEFAULT_TITLE.to_string(),
            article_subtitle: None,
            author: DEFAULT_AUTHOR.to_string(),
            publication_date: None,
            full_text: String::new(),
            word_count: 0,
            paragraph_count: 0,
            reading_time_minutes: 1,
            canonical_url: None,
            tags: Vec::new(),
            newsletter_category: None,
            prompt_templates: BTreeMap::new(),
        }
    }
}

impl ArticleRecord {
    /// Renders the record as human-readable plain text.
    ///
    /// Metadata lines come first, absent optional fields are omitted, and
    /// the body follows after a blank line.
    pub fn to_text(&self) -> String {
        let mut lines = Vec::new();

        lines.push(format!("Title: {}", self.article_title));
        if let Some(subtitle) = &self.article_subtitle {
            lines.push(format!("Subtitle: {}", subtitle));
        }
        lines.push(format!("Publication: {}", self.publication_name));
        lines.push(format!("Author: {}", self.author));
        if let Some(date) = &self.publication_date {
            lines.push(format!("Date: {}", date));
        }
        if !self.tags.is_empty() {
            lines.push(format!("Tags: {}", self.tags.join(", ")));
        }
        lines.push(format!("Words: {} ({} min read)", self.word_count, self.reading_time_minutes));

        format!("{}\n\n{}", lines.join("\n"), self.full_text)
    }
}
