//! HTML parsing and DOM queries.
//!
//! This module provides the [`Document`] and [`Element`] types for parsing
//! HTML and querying the DOM tree using CSS selectors, plus the small set of
//! document-level lookups the extraction pipeline is built on: meta tag
//! content and `ld+json` script blocks.
//!
//! # Example
//!
//! ```rust
//! use missive_core::Document;
//!
//! let html = r#"
//!     <html>
//!         <body>
//!             <h1 class="post-title">Title</h1>
//!             <p>Paragraph</p>
//!         </body>
//!     </html>
//! "#;
//!
//! let doc = Document::parse(html).unwrap();
//! let title = doc.select_first("h1.post-title").unwrap();
//! assert_eq!(title.unwrap().text(), "Title");
//! ```

use scraper::{Html, Selector};

use crate::{MissiveError, Result};

/// Represents a parsed HTML document.
///
/// A Document wraps an HTML page and provides methods for querying elements
/// using CSS selectors and reading document-level metadata.
///
/// # Example
///
/// ```rust
/// use missive_core::Document;
///
/// let html = r#"<html><head><meta name="author" content="Jane"></head><body></body></html>"#;
/// let doc = Document::parse(html).unwrap();
/// assert_eq!(doc.meta_content("author"), Some("Jane".to_string()));
/// ```
pub struct Document {
    html: Html,
}

impl Document {
    /// Parses HTML from a string.
    ///
    /// Parsing is lenient: malformed markup is repaired the way browsers
    /// repair it, so this never fails on bad input.
    ///
    /// # Example
    ///
    /// ```rust
    /// use missive_core::Document;
    ///
    /// let html = "<html><body><h1>Title</h1></body></html>";
    /// let doc = Document::parse(html).unwrap();
    /// ```
    pub fn parse(html: &str) -> Result<Self> {
        let html = Html::parse_document(html);
        Ok(Self { html })
    }

    /// Gets the raw HTML representation.
    ///
    /// Returns a reference to the underlying `scraper::Html` instance.
    pub fn html(&self) -> &Html {
        &self.html
    }

    /// Selects elements using a CSS selector, in document order.
    ///
    /// Comma-separated selector lists (e.g. `"p, h3, li"`) are supported and
    /// return matches in document order, not grouped by list entry.
    ///
    /// # Errors
    ///
    /// Returns [`MissiveError::HtmlParseError`] if the selector is invalid.
    ///
    /// # Example
    ///
    /// ```rust
    /// use missive_core::Document;
    ///
    /// let html = r#"<p class="content">First</p><p class="content">Second</p>"#;
    /// let doc = Document::parse(html).unwrap();
    /// let elements = doc.select("p.content").unwrap();
    /// assert_eq!(elements.len(), 2);
    /// ```
    pub fn select(&'_ self, selector: &str) -> Result<Vec<Element<'_>>> {
        let sel =
            Selector::parse(selector).map_err(|e| MissiveError::HtmlParseError(format!("Invalid selector: {}", e)))?;

        Ok(self.html.select(&sel).map(|el| Element { element: el }).collect())
    }

    /// Selects the first element matching a CSS selector.
    ///
    /// # Errors
    ///
    /// Returns [`MissiveError::HtmlParseError`] if the selector is invalid.
    pub fn select_first(&'_ self, selector: &str) -> Result<Option<Element<'_>>> {
        let sel =
            Selector::parse(selector).map_err(|e| MissiveError::HtmlParseError(format!("Invalid selector: {}", e)))?;

        Ok(self.html.select(&sel).next().map(|el| Element { element: el }))
    }

    /// Gets meta tag content by `name` or `property` attribute.
    ///
    /// Checks `meta[name="..."]` first, then `meta[property="..."]`, which
    /// covers both plain meta tags and Open Graph style tags.
    pub fn meta_content(&self, attr: &str) -> Option<String> {
        let selector = format!("meta[name=\"{}\"]", attr);
        if let Ok(Some(el)) = self.select_first(&selector)
            && let Some(content) = el.attr("content")
        {
            return Some(content.to_string());
        }

        let selector = format!("meta[property=\"{}\"]", attr);
        if let Ok(Some(el)) = self.select_first(&selector)
            && let Some(content) = el.attr("content")
        {
            return Some(content.to_string());
        }

        None
    }

    /// Gets the raw text of every `<script type="application/ld+json">` block.
    ///
    /// The blocks are returned in document order, untrimmed and unparsed.
    /// Callers decide what counts as valid JSON.
    pub fn linked_data_blocks(&self) -> Vec<String> {
        match self.select("script[type=\"application/ld+json\"]") {
            Ok(elements) => elements.iter().map(Element::text).collect(),
            Err(_) => Vec::new(),
        }
    }
}

/// A wrapper around scraper's ElementRef.
///
/// Element represents a single node in the HTML document tree and provides
/// methods for accessing its attributes, text content, and markup.
///
/// # Example
///
/// ```rust
/// use missive_core::Document;
///
/// let html = r#"<a href="https://example.com">Link text</a>"#;
/// let doc = Document::parse(html).unwrap();
/// let link = &doc.select("a").unwrap()[0];
///
/// assert_eq!(link.text(), "Link text");
/// assert_eq!(link.attr("href"), Some("https://example.com"));
/// ```
#[derive(Clone, Debug)]
pub struct Element<'a> {
    element: scraper::ElementRef<'a>,
}

impl<'a> Element<'a> {
    /// Gets the inner HTML of this element.
    ///
    /// Returns the HTML content inside this element, excluding the element's own tags.
    pub fn inner_html(&self) -> String {
        self.element.inner_html()
    }

    /// Gets the outer HTML of this element.
    ///
    /// Returns the HTML content including this element's own tags.
    pub fn outer_html(&self) -> String {
        self.element.html()
    }

    /// Gets the text content of this element.
    ///
    /// Returns the concatenation of all text nodes within this element.
    pub fn text(&self) -> String {
        self.element.text().collect()
    }

    /// Gets the value of an attribute.
    ///
    /// Returns `None` if the attribute is not present.
    pub fn attr(&self, name: &str) -> Option<&str> {
        self.element.value().attr(name)
    }

    /// Selects descendant elements using a CSS selector.
    ///
    /// # Errors
    ///
    /// Returns [`MissiveError::HtmlParseError`] if the selector is invalid.
    pub fn select(&'_ self, selector: &str) -> Result<Vec<Element<'_>>> {
        let sel =
            Selector::parse(selector).map_err(|e| MissiveError::HtmlParseError(format!("Invalid selector: {}", e)))?;

        Ok(self.element.select(&sel).map(|el| Element { element: el }).collect())
    }
}
