//! Schema.org linked data (`ld+json`) extraction.
//!
//! Newsletter platforms embed article metadata as JSON-LD script blocks.
//! This module scans those blocks for an article-typed node and exposes the
//! fields the extraction pipeline cares about. Malformed blocks are skipped
//! rather than failing the whole document; a page often carries several
//! blocks and only one of them describes the article.

use serde_json::Value;

use crate::Document;

/// The parsed article node from a document's JSON-LD blocks, if any.
///
/// Built once per document and consulted by every linked-data resolution
/// strategy, so the script blocks are parsed a single time.
#[derive(Debug, Clone, Default)]
pub struct LinkedData {
    article: Option<Value>,
}

impl LinkedData {
    /// Scans a document's `ld+json` blocks for an article node.
    ///
    /// Blocks are visited in document order. Within each block the node may
    /// sit at the top level, inside a `@graph` array, or inside a top-level
    /// array. The first node whose `@type` is `NewsArticle` or `Article`
    /// (including array-valued `@type`) wins. Blocks that fail to parse as
    /// JSON are skipped.
    pub fn from_document(doc: &Document) -> Self {
        for block in doc.linked_data_blocks() {
            if let Ok(value) = serde_json::from_str::<Value>(block.trim())
                && let Some(article) = article_node(&value)
            {
                return Self { article: Some(article.clone()) };
            }
        }

        Self { article: None }
    }

    /// Whether an article node was found.
    pub fn is_present(&self) -> bool {
        self.article.is_some()
    }

    /// The article `headline`.
    pub fn headline(&self) -> Option<String> {
        self.string_field("headline")
    }

    /// The article author's name.
    ///
    /// Handles the three shapes `author` takes in the wild: a plain string,
    /// an object with a `name`, or an array of either (first entry wins).
    pub fn author_name(&self) -> Option<String> {
        let author = self.article.as_ref()?.get("author")?;
        author_name_from(author)
    }

    /// The publisher's name, from `publisher.name` or a plain string.
    pub fn publisher_name(&self) -> Option<String> {
        let publisher = self.article.as_ref()?.get("publisher")?;

        if let Some(name) = publisher.as_str() {
            return Some(name.to_string());
        }

        publisher.get("name").and_then(Value::as_str).map(str::to_string)
    }

    /// The raw `datePublished` value, typically an ISO 8601 timestamp.
    pub fn date_published(&self) -> Option<String> {
        self.string_field("datePublished")
    }

    fn string_field(&self, key: &str) -> Option<String> {
        self.article.as_ref()?.get(key).and_then(Value::as_str).map(str::to_string)
    }
}

/// Finds the first article-typed node in a parsed JSON-LD value.
fn article_node(value: &Value) -> Option<&Value> {
    if let Some(graph) = value.get("@graph").and_then(Value::as_array) {
        return graph.iter().find(|node| is_article_type(node));
    }

    if let Some(nodes) = value.as_array() {
        return nodes.iter().find(|node| is_article_type(node));
    }

    if is_article_type(value) { Some(value) } else { None }
}

fn is_article_type(node: &Value) -> bool {
    match node.get("@type") {
        Some(Value::String(t)) => t == "NewsArticle" || t == "Article",
        Some(Value::Array(types)) => types
            .iter()
            .any(|t| matches!(t.as_str(), Some("NewsArticle") | Some("Article"))),
        _ => false,
    }
}

/// Extracts an author name from a JSON-LD author value.
/// Handles string, object, and array formats.
fn author_name_from(author: &Value) -> Option<String> {
    if let Some(name) = author.as_str() {
        return Some(name.to_string());
    }

    if let Some(obj) = author.as_object()
        && let Some(name) = obj.get("name")
        && let Some(name_str) = name.as_str()
    {
        return Some(name_str.to_string());
    }

    if let Some(arr) = author.as_array()
        && let Some(first) = arr.first()
    {
        return author_name_from(first);
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;

    fn document_with_script(json: &str) -> Document {
        let html = format!(
            r#"<html><head><script type="application/ld+json">{}</script></head><body></body></html>"#,
            json
        );
        Document::parse(&html).unwrap()
    }

    #[test]
    fn test_news_article_in_graph() {
        let doc = document_with_script(
            r#"{
                "@context": "https://schema.org",
                "@graph": [
                    {"@type": "WebSite", "name": "Acme Weekly"},
                    {
                        "@type": "NewsArticle",
                        "headline": "Graph Headline",
                        "author": {"@type": "Person", "name": "Jane Doe"},
                        "publisher": {"@type": "Organization", "name": "Acme Weekly"},
                        "datePublished": "2024-03-01T12:00:00Z"
                    }
                ]
            }"#,
        );
        let ld = LinkedData::from_document(&doc);

        assert!(ld.is_present());
        assert_eq!(ld.headline(), Some("Graph Headline".to_string()));
        assert_eq!(ld.author_name(), Some("Jane Doe".to_string()));
        assert_eq!(ld.publisher_name(), Some("Acme Weekly".to_string()));
        assert_eq!(ld.date_published(), Some("2024-03-01T12:00:00Z".to_string()));
    }

    #[test]
    fn test_top_level_article() {
        let doc = document_with_script(
            r#"{"@type": "Article", "headline": "Plain Headline", "author": "J. Smith"}"#,
        );
        let ld = LinkedData::from_document(&doc);

        assert_eq!(ld.headline(), Some("Plain Headline".to_string()));
        assert_eq!(ld.author_name(), Some("J. Smith".to_string()));
    }

    #[test]
    fn test_array_valued_type() {
        let doc = document_with_script(r#"{"@type": ["NewsArticle", "BlogPosting"], "headline": "Typed"}"#);
        let ld = LinkedData::from_document(&doc);

        assert_eq!(ld.headline(), Some("Typed".to_string()));
    }

    #[test]
    fn test_malformed_block_skipped() {
        let html = r#"
            <html><head>
                <script type="application/ld+json">{not valid json</script>
                <script type="application/ld+json">{"@type": "NewsArticle", "headline": "Second Block"}</script>
            </head><body></body></html>
        "#;
        let doc = Document::parse(html).unwrap();
        let ld = LinkedData::from_document(&doc);

        assert_eq!(ld.headline(), Some("Second Block".to_string()));
    }

    #[test]
    fn test_non_article_types_ignored() {
        let doc = document_with_script(r#"{"@type": "WebSite", "name": "Just a site"}"#);
        let ld = LinkedData::from_document(&doc);

        assert!(!ld.is_present());
        assert_eq!(ld.headline(), None);
    }

    #[test]
    fn test_author_array_takes_first() {
        let doc = document_with_script(
            r#"{
                "@type": "NewsArticle",
                "author": [
                    {"@type": "Person", "name": "First Author"},
                    {"@type": "Person", "name": "Second Author"}
                ]
            }"#,
        );
        let ld = LinkedData::from_document(&doc);

        assert_eq!(ld.author_name(), Some("First Author".to_string()));
    }

    #[test]
    fn test_missing_fields_are_none() {
        let doc = document_with_script(r#"{"@type": "NewsArticle"}"#);
        let ld = LinkedData::from_document(&doc);

        assert!(ld.is_present());
        assert_eq!(ld.headline(), None);
        assert_eq!(ld.author_name(), None);
        assert_eq!(ld.publisher_name(), None);
        assert_eq!(ld.date_published(), None);
    }
}
