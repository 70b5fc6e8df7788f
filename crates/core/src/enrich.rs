//! Derived metadata: reading stats, tags, canonical URL, category.
//!
//! Everything here is a pure function of the flattened body text or the
//! source document. Enrichment never fails; missing sources just produce
//! empty or `None` values.

use crate::Document;

/// Reading statistics derived from the flattened body text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReadingStats {
    pub word_count: usize,
    pub paragraph_count: usize,
    pub reading_time_minutes: u32,
}

/// Derives word count, paragraph count, and reading time from `full_text`.
///
/// Words are whitespace-delimited tokens. Paragraph count is the number of
/// blank-line separators, one less than the number of blocks. Reading time
/// assumes 200 words per minute and never drops below one minute, even for
/// empty text.
pub fn reading_stats(full_text: &str) -> ReadingStats {
    let word_count = full_text.split_whitespace().count();
    let paragraph_count = full_text.matches("\n\n").count();
    let reading_time_minutes = ((word_count as f64 / 200.0).round() as u32).max(1);

    ReadingStats { word_count, paragraph_count, reading_time_minutes }
}

/// Extracts tags from the page's `keywords` meta tag.
///
/// The comma-separated value is split, entries are trimmed, and empty
/// entries are dropped. Order is preserved. A page without keywords yields
/// an empty list.
pub fn extract_tags(doc: &Document) -> Vec<String> {
    doc.meta_content("keywords")
        .map(|keywords| {
            keywords
                .split(',')
                .map(str::trim)
                .filter(|tag| !tag.is_empty())
                .map(str::to_string)
                .collect()
        })
        .unwrap_or_default()
}

/// Finds the article's canonical URL.
///
/// Priority: `link[rel="canonical"]` href, then `og:url` meta content.
pub fn canonical_url(doc: &Document) -> Option<String> {
    if let Ok(Some(link)) = doc.select_first("link[rel=\"canonical\"]")
        && let Some(href) = link.attr("href")
        && !href.trim().is_empty()
    {
        return Some(href.trim().to_string());
    }

    doc.meta_content("og:url").map(|url| url.trim().to_string()).filter(|url| !url.is_empty())
}

/// Determines the newsletter category.
///
/// Priority: `category` meta tag, then the first extracted tag.
pub fn newsletter_category(doc: &Document, tags: &[String]) -> Option<String> {
    doc.meta_content("category")
        .map(|category| category.trim().to_string())
        .filter(|category| !category.is_empty())
        .or_else(|| tags.first().cloned())
}
