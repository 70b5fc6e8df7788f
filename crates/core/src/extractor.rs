//! The shared extraction pipeline.
//!
//! One routine serves every platform. The platform picks a rules table;
//! the pipeline resolves metadata through the table's strategy chains,
//! flattens the body, and enriches the result. Nothing in here branches
//! on the platform itself.

use crate::platform::{Platform, PlatformRules};
use crate::record::{ArticleRecord, DEFAULT_AUTHOR, DEFAULT_TITLE};
use crate::resolve::{resolve, resolve_or, truncate_timestamp};
use crate::{Document, LinkedData, MissiveError, Result, enrich, prompts, sanitize};

/// Extracts a normalized article record from a parsed newsletter page.
///
/// Pipeline:
/// 1. Parse linked data once, then resolve every metadata field through
///    its strategy chain, falling back to the sentinel defaults.
/// 2. Locate the required body container; fail with
///    [`MissiveError::ContentNotFound`] if it is absent.
/// 3. Remove the platform's clutter elements from the container markup,
///    collect its block elements in document order, and flatten them to
///    paragraph-joined text.
/// 4. Derive reading stats, tags, canonical URL, and category.
/// 5. Generate the prompt templates.
///
/// Any internal fault other than the missing body container is reported as
/// [`MissiveError::ParseError`], annotated with the platform name.
pub fn extract_article(doc: &Document, platform: Platform) -> Result<ArticleRecord> {
    extract_with_rules(doc, platform.rules()).map_err(|e| match e {
        err @ MissiveError::ContentNotFound { .. } => err,
        err => MissiveError::ParseError { platform: platform.name().to_string(), reason: err.to_string() },
    })
}

fn extract_with_rules(doc: &Document, rules: &PlatformRules) -> Result<ArticleRecord> {
    let linked_data = LinkedData::from_document(doc);

    let article_title = resolve_or(doc, &linked_data, rules.title, DEFAULT_TITLE);
    let article_subtitle = resolve(doc, &linked_data, rules.subtitle);
    let author = resolve_or(doc, &linked_data, rules.author, DEFAULT_AUTHOR);
    let publication_name = resolve_or(doc, &linked_data, rules.publication, rules.publication_default);
    let publication_date = resolve(doc, &linked_data, rules.date).map(|date| truncate_timestamp(&date));

    let full_text = extract_body_text(doc, rules)?;

    let stats = enrich::reading_stats(&full_text);
    let tags = enrich::extract_tags(doc);
    let newsletter_category = enrich::newsletter_category(doc, &tags);
    let canonical_url = enrich::canonical_url(doc);
    let prompt_templates = prompts::generate_prompts(&article_title, &full_text);

    Ok(ArticleRecord {
        publication_name,
        article_title,
        article_subtitle,
        author,
        publication_date,
        full_text,
        word_count: stats.word_count,
        paragraph_count: stats.paragraph_count,
        reading_time_minutes: stats.reading_time_minutes,
        canonical_url,
        tags,
        newsletter_category,
        prompt_templates,
    })
}

/// Locates the body container, strips clutter, and flattens block text.
///
/// The container's markup is rewritten without the denylisted elements and
/// re-parsed, so block collection never sees removed subtrees. Blocks that
/// sanitize to nothing are dropped; a container with no surviving blocks
/// yields the empty string, not an error.
fn extract_body_text(doc: &Document, rules: &PlatformRules) -> Result<String> {
    let container = doc
        .select_first(rules.body_selector)?
        .ok_or_else(|| MissiveError::ContentNotFound { selector: rules.body_selector.to_string() })?;

    let cleaned = sanitize::remove_clutter(&container.outer_html(), rules.clutter_selectors);
    let body = Document::parse(&cleaned)?;
    let blocks = body.select(rules.block_selector)?;

    Ok(sanitize::join_blocks(blocks.iter().map(|block| block.text())))
}

#[cfg(test)]
mod tests {
    use super::*;

    const SUBSTACK_FULL: &str = r#"
        <!DOCTYPE html>
        <html>
        <head>
            <meta name="keywords" content="AI, Startups,  ">
            <link rel="canonical" href="https://acme.substack.com/p/hello-world">
            <script type="application/ld+json">
            {
                "@graph": [
                    {"@type": "WebSite", "name": "Acme Weekly"},
                    {
                        "@type": "NewsArticle",
                        "author": {"name": "Jane Doe"},
                        "publisher": {"name": "Acme Weekly"},
                        "datePublished": "2024-03-01T12:00:00Z"
                    }
                ]
            }
            </script>
        </head>
        <body>
            <h1 class="post-title">Hello World</h1>
            <h3 class="subtitle">A closer look</h3>
            <div class="pencraft-card-meta-row">
                <a class="pencraft-card-meta-row-owner-name" href="/@someone">Byline Author</a>
                <a class="pencraft-card-meta-row-publication-name" href="/">Byline Publication</a>
            </div>
            <div class="body markup">
                <p>Hello.</p>
                <p>World.</p>
            </div>
        </body>
        </html>
    "#;

    const SUBSTACK_NO_LINKED_DATA: &str = r#"
        <!DOCTYPE html>
        <html>
        <head></head>
        <body>
            <h1 class="post-title">Fallback Post</h1>
            <div class="pencraft-card-meta-row">
                <a class="pencraft-card-meta-row-owner-name" href="/@someone">Byline Author</a>
                <a class="pencraft-card-meta-row-publication-name" href="/">Byline Publication</a>
            </div>
            <div aria-label="Post UFI">
                <div class="pencraft pc-reset color-pub-secondary-text-hGQ02T">Thursday</div>
            </div>
            <div class="body markup">
                <p>Only paragraph.</p>
            </div>
        </body>
        </html>
    "#;

    const BEEHIIV_MINIMAL: &str = r#"
        <!DOCTYPE html>
        <html>
        <head></head>
        <body>
            <h1>Big News</h1>
            <a href="/authors/jsmith">J. Smith</a>
            <div class="prose">
                <ul><li>Item one</li></ul>
            </div>
        </body>
        </html>
    "#;

    #[test]
    fn test_substack_structured_metadata() {
        let doc = Document::parse(SUBSTACK_FULL).unwrap();
        let record = extract_article(&doc, Platform::Substack).unwrap();

        assert_eq!(record.author, "Jane Doe");
        assert_eq!(record.publication_name, "Acme Weekly");
        assert_eq!(record.publication_date, Some("2024-03-01".to_string()));
        assert_eq!(record.article_title, "Hello World");
        assert_eq!(record.article_subtitle, Some("A closer look".to_string()));
        assert_eq!(record.full_text, "Hello.\n\nWorld.");
        assert_eq!(record.word_count, 2);
        assert_eq!(record.paragraph_count, 1);
        assert_eq!(record.reading_time_minutes, 1);
    }

    #[test]
    fn test_structured_data_beats_byline() {
        // SUBSTACK_FULL has both a structured author and a conflicting byline.
        let doc = Document::parse(SUBSTACK_FULL).unwrap();
        let record = extract_article(&doc, Platform::Substack).unwrap();

        assert_eq!(record.author, "Jane Doe");
        assert_ne!(record.author, "Byline Author");
    }

    #[test]
    fn test_substack_byline_fallback() {
        let doc = Document::parse(SUBSTACK_NO_LINKED_DATA).unwrap();
        let record = extract_article(&doc, Platform::Substack).unwrap();

        assert_eq!(record.author, "Byline Author");
        assert_eq!(record.publication_name, "Byline Publication");
        // Footer display dates are kept verbatim, not truncated.
        assert_eq!(record.publication_date, Some("Thursday".to_string()));
    }

    #[test]
    fn test_substack_meta_author_outranks_byline() {
        let html = SUBSTACK_NO_LINKED_DATA.replace("<head></head>", r#"<head><meta name="author" content="Meta Author"></head>"#);
        let doc = Document::parse(&html).unwrap();
        let record = extract_article(&doc, Platform::Substack).unwrap();

        assert_eq!(record.author, "Meta Author");
    }

    #[test]
    fn test_enrichment_fields() {
        let doc = Document::parse(SUBSTACK_FULL).unwrap();
        let record = extract_article(&doc, Platform::Substack).unwrap();

        assert_eq!(record.tags, vec!["AI".to_string(), "Startups".to_string()]);
        assert_eq!(record.newsletter_category, Some("AI".to_string()));
        assert_eq!(record.canonical_url, Some("https://acme.substack.com/p/hello-world".to_string()));
        assert_eq!(record.prompt_templates.len(), 5);
    }

    #[test]
    fn test_clutter_removed_from_body() {
        let html = r#"
            <html><body>
                <div class="body markup">
                    <p>Real content.</p>
                    <div class="subscription-widget-wrap"><p>Subscribe to my newsletter!</p></div>
                    <p class="button-wrapper">Share this post</p>
                    <div class="pullquote"><p>Pulled quote</p></div>
                    <p>More real content.</p>
                </div>
            </body></html>
        "#;
        let doc = Document::parse(html).unwrap();
        let record = extract_article(&doc, Platform::Substack).unwrap();

        assert_eq!(record.full_text, "Real content.\n\nMore real content.");
    }

    #[test]
    fn test_missing_body_container_fails() {
        let html = "<html><body><h1 class=\"post-title\">Title only</h1></body></html>";
        let doc = Document::parse(html).unwrap();
        let result = extract_article(&doc, Platform::Substack);

        match result {
            Err(MissiveError::ContentNotFound { selector }) => assert_eq!(selector, "div.body.markup"),
            other => panic!("expected ContentNotFound, got {:?}", other),
        }
    }

    #[test]
    fn test_empty_body_container() {
        let html = r#"<html><body><div class="body markup"><div>no blocks here</div></div></body></html>"#;
        let doc = Document::parse(html).unwrap();
        let record = extract_article(&doc, Platform::Substack).unwrap();

        assert_eq!(record.full_text, "");
        assert_eq!(record.word_count, 0);
        assert_eq!(record.paragraph_count, 0);
        assert_eq!(record.reading_time_minutes, 1);
        assert_eq!(record.article_title, "Title not found");
        assert_eq!(record.author, "Author not found");
    }

    #[test]
    fn test_internal_newlines_become_spaces() {
        let html = "<html><body><div class=\"body markup\"><p>Line one\n        continues here.</p></div></body></html>";
        let doc = Document::parse(html).unwrap();
        let record = extract_article(&doc, Platform::Substack).unwrap();

        assert_eq!(record.full_text, "Line one continues here.");
        assert!(!record.full_text.contains('\n'));
    }

    #[test]
    fn test_beehiiv_minimal_page() {
        let doc = Document::parse(BEEHIIV_MINIMAL).unwrap();
        let record = extract_article(&doc, Platform::Beehiiv).unwrap();

        assert_eq!(record.article_title, "Big News");
        assert_eq!(record.author, "J. Smith");
        assert_eq!(record.full_text, "Item one");
        assert_eq!(record.article_subtitle, None);
        assert_eq!(record.publication_date, None);
        // No canonical link on the page, so the platform default applies.
        assert_eq!(record.publication_name, "Beehiiv");
    }

    #[test]
    fn test_beehiiv_publication_from_canonical_host() {
        let html = r#"
            <html>
            <head><link rel="canonical" href="https://dailybrief.beehiiv.com/p/big-news"></head>
            <body>
                <h1>Big News</h1>
                <div class="prose"><p>Text.</p></div>
            </body>
            </html>
        "#;
        let doc = Document::parse(html).unwrap();
        let record = extract_article(&doc, Platform::Beehiiv).unwrap();

        assert_eq!(record.publication_name, "Dailybrief");
    }

    #[test]
    fn test_beehiiv_linked_data_first() {
        let html = r#"
            <html>
            <head>
                <script type="application/ld+json">
                {"@type": "Article", "headline": "Structured Title", "author": [{"name": "Structured Author"}], "publisher": {"name": "The Brief"}, "datePublished": "2024-05-10T08:00:00Z"}
                </script>
            </head>
            <body>
                <h1>Visible Title</h1>
                <a href="/authors/other">Other Author</a>
                <div class="prose"><p>Body.</p></div>
            </body>
            </html>
        "#;
        let doc = Document::parse(html).unwrap();
        let record = extract_article(&doc, Platform::Beehiiv).unwrap();

        assert_eq!(record.article_title, "Structured Title");
        assert_eq!(record.author, "Structured Author");
        assert_eq!(record.publication_name, "The Brief");
        assert_eq!(record.publication_date, Some("2024-05-10".to_string()));
    }

    #[test]
    fn test_beehiiv_missing_body_fails() {
        let doc = Document::parse("<html><body><h1>Just a heading</h1></body></html>").unwrap();
        let result = extract_article(&doc, Platform::Beehiiv);

        assert!(matches!(result, Err(MissiveError::ContentNotFound { .. })));
    }

    #[test]
    fn test_extraction_is_idempotent() {
        let doc = Document::parse(SUBSTACK_FULL).unwrap();
        let first = extract_article(&doc, Platform::Substack).unwrap();
        let second = extract_article(&doc, Platform::Substack).unwrap();

        assert_eq!(first, second);
    }
}
