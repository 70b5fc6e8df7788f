//! Declarative field resolution.
//!
//! Every metadata field (title, author, publication, date) is described as
//! an ordered list of [`Strategy`] values rather than hand-written fallback
//! chains. The resolver walks the list and returns the first strategy that
//! yields a non-empty value, so structured metadata placed ahead of byline
//! selectors always wins over a conflicting byline.
//!
//! A strategy that fails in any way (missing element, invalid pattern,
//! malformed URL) simply yields nothing and resolution moves on to the next
//! entry. Only the absence of every source is an outcome, and even that is
//! handled by the caller's default.

use regex::Regex;
use url::Url;

use crate::{Document, LinkedData};

/// Fields readable from a document's JSON-LD article node.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinkedDataField {
    Headline,
    AuthorName,
    PublisherName,
    DatePublished,
}

/// A single way of locating a metadata field in a document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Strategy {
    /// A field of the JSON-LD article node.
    LinkedData(LinkedDataField),
    /// Content of a `meta` tag, matched by `name` or `property`.
    MetaTag(&'static str),
    /// Text of the first element matching a CSS selector.
    SelectorText(&'static str),
    /// An attribute of the first element matching a CSS selector.
    SelectorAttr(&'static str, &'static str),
    /// Text of the first anchor whose `href` matches a regex pattern.
    LinkHrefPattern(&'static str),
    /// First label of the canonical URL's host, capitalized.
    CanonicalHostLabel,
}

/// Resolves a field by trying strategies in order.
///
/// Returns the first non-empty value, trimmed. Whitespace-only results are
/// treated as missing so a decorative empty element cannot mask a later
/// source.
pub fn resolve(doc: &Document, linked_data: &LinkedData, strategies: &[Strategy]) -> Option<String> {
    strategies.iter().find_map(|strategy| apply(doc, linked_data, strategy))
}

/// Resolves a field, falling back to a sentinel default.
pub fn resolve_or(doc: &Document, linked_data: &LinkedData, strategies: &[Strategy], default: &str) -> String {
    resolve(doc, linked_data, strategies).unwrap_or_else(|| default.to_string())
}

/// Truncates an ISO 8601 timestamp to its date part.
///
/// Splits at the first `T` only when everything before it is digits and
/// hyphens, so `2024-03-01T12:00:00Z` becomes `2024-03-01` while display
/// dates such as `Thursday` or `Last Tuesday` pass through unchanged.
pub fn truncate_timestamp(value: &str) -> String {
    if let Some((date, _)) = value.split_once('T')
        && !date.is_empty()
        && date.chars().all(|c| c.is_ascii_digit() || c == '-')
    {
        return date.to_string();
    }

    value.to_string()
}

fn apply(doc: &Document, linked_data: &LinkedData, strategy: &Strategy) -> Option<String> {
    let value = match strategy {
        Strategy::LinkedData(field) => match field {
            LinkedDataField::Headline => linked_data.headline(),
            LinkedDataField::AuthorName => linked_data.author_name(),
            LinkedDataField::PublisherName => linked_data.publisher_name(),
            LinkedDataField::DatePublished => linked_data.date_published(),
        },
        Strategy::MetaTag(name) => doc.meta_content(name),
        Strategy::SelectorText(selector) => doc.select_first(selector).ok().flatten().map(|el| el.text()),
        Strategy::SelectorAttr(selector, attr) => {
            doc.select_first(selector).ok().flatten().and_then(|el| el.attr(attr).map(str::to_string))
        }
        Strategy::LinkHrefPattern(pattern) => link_text_by_href(doc, pattern),
        Strategy::CanonicalHostLabel => canonical_host_label(doc),
    };

    non_empty(value)
}

fn non_empty(value: Option<String>) -> Option<String> {
    let value = value?;
    let trimmed = value.trim();
    if trimmed.is_empty() { None } else { Some(trimmed.to_string()) }
}

/// Finds the first link whose href matches `pattern` and returns its text.
fn link_text_by_href(doc: &Document, pattern: &str) -> Option<String> {
    let re = Regex::new(pattern).ok()?;
    let links = doc.select("a[href]").ok()?;

    links
        .iter()
        .find(|link| link.attr("href").is_some_and(|href| re.is_match(href)))
        .map(|link| link.text())
}

/// Derives a publication name from the canonical URL host.
///
/// Prefers `link[rel="canonical"]`, falls back to `og:url`. The host's
/// first label is capitalized, so `platformreport.beehiiv.com` yields
/// `Platformreport`.
fn canonical_host_label(doc: &Document) -> Option<String> {
    let href = doc
        .select_first("link[rel=\"canonical\"]")
        .ok()
        .flatten()
        .and_then(|el| el.attr("href").map(str::to_string))
        .or_else(|| doc.meta_content("og:url"))?;

    let url = Url::parse(&href).ok()?;
    let label = url.host_str()?.split('.').next()?.to_string();

    let mut chars = label.chars();
    let first = chars.next()?;
    Some(first.to_uppercase().collect::<String>() + chars.as_str())
}
