pub mod dom;
pub mod enrich;
pub mod error;
pub mod extractor;
#[cfg(feature = "fetch")]
pub mod fetch;
pub mod linked_data;
pub mod platform;
pub mod prompts;
pub mod record;
pub mod resolve;
pub mod sanitize;
#[cfg(feature = "summarize")]
pub mod summarize;

pub use dom::{Document, Element};
#[doc(hidden)]
pub use enrich::ReadingStats;
pub use enrich::{canonical_url, extract_tags, newsletter_category, reading_stats};
pub use error::{MissiveError, Result};
pub use extractor::extract_article;
#[cfg(feature = "fetch")]
pub use fetch::FetchConfig;
#[cfg(feature = "fetch")]
pub use fetch::{DEFAULT_USER_AGENT, fetch_file, fetch_stdin, fetch_url};
pub use linked_data::LinkedData;
pub use platform::{Platform, PlatformRules};
pub use prompts::{PROMPT_TEXT_LIMIT, generate_prompts};
pub use record::{ArticleRecord, DEFAULT_AUTHOR, DEFAULT_PUBLICATION, DEFAULT_TITLE};
#[doc(hidden)]
pub use resolve::{LinkedDataField, Strategy, resolve, resolve_or, truncate_timestamp};
#[doc(hidden)]
pub use sanitize::{join_blocks, remove_clutter, sanitize_block};
#[cfg(feature = "summarize")]
pub use summarize::{
    CHUNK_PLACEHOLDER, HttpSummarizer, SUMMARY_CHUNK_CHARS, Summarizer, SummarizerConfig, chunk_text,
    summarize_chunked,
};
