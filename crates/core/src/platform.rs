//! Platform detection and per-platform extraction rules.
//!
//! Each supported platform is described by a [`PlatformRules`] table: the
//! strategy chains for every metadata field, the required body container,
//! the block elements worth keeping, and the clutter denylist. One shared
//! extraction routine consumes the table, so supporting a platform means
//! writing a table entry, not a new pipeline.

use std::fmt;
use std::str::FromStr;

use url::Url;

use crate::record::DEFAULT_PUBLICATION;
use crate::resolve::{LinkedDataField, Strategy};
use crate::{MissiveError, Result};

/// Newsletter platforms with extraction rules.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Platform {
    Substack,
    Beehiiv,
}

impl Platform {
    /// Detects the platform from an article URL.
    ///
    /// Detection is host-based: any host containing `substack.com` routes to
    /// Substack rules, any host containing `beehiiv.com` to Beehiiv rules.
    /// Custom publication domains are not recognized; callers that know the
    /// platform out of band can select it directly.
    ///
    /// # Errors
    ///
    /// Returns [`MissiveError::InvalidUrl`] for unparseable URLs and
    /// [`MissiveError::UnsupportedPlatform`] for everything else.
    pub fn from_url(url: &str) -> Result<Platform> {
        let parsed = Url::parse(url).map_err(|e| MissiveError::InvalidUrl(e.to_string()))?;
        let host = parsed.host_str().unwrap_or_default();

        if host.contains("substack.com") {
            Ok(Platform::Substack)
        } else if host.contains("beehiiv.com") {
            Ok(Platform::Beehiiv)
        } else {
            Err(MissiveError::UnsupportedPlatform(url.to_string()))
        }
    }

    /// The platform's display name.
    pub fn name(&self) -> &'static str {
        match self {
            Platform::Substack => "Substack",
            Platform::Beehiiv => "Beehiiv",
        }
    }

    /// The platform's extraction rules.
    pub fn rules(&self) -> &'static PlatformRules {
        match self {
            Platform::Substack => &SUBSTACK_RULES,
            Platform::Beehiiv => &BEEHIIV_RULES,
        }
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Platform {
    type Err = MissiveError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "substack" => Ok(Platform::Substack),
            "beehiiv" => Ok(Platform::Beehiiv),
            other => Err(MissiveError::UnsupportedPlatform(other.to_string())),
        }
    }
}

/// Extraction rules for one platform.
///
/// Strategy chains are ordered by reliability; the resolver stops at the
/// first non-empty result. The body container is the one required element:
/// its absence fails the extraction.
#[derive(Debug)]
pub struct PlatformRules {
    /// Strategy chain for the article title.
    pub title: &'static [Strategy],
    /// Strategy chain for the subtitle. Empty when the platform has none.
    pub subtitle: &'static [Strategy],
    /// Strategy chain for the author name.
    pub author: &'static [Strategy],
    /// Strategy chain for the publication name.
    pub publication: &'static [Strategy],
    /// Fallback publication name when every strategy fails.
    pub publication_default: &'static str,
    /// Strategy chain for the publication date.
    pub date: &'static [Strategy],
    /// Selector for the required article body container.
    pub body_selector: &'static str,
    /// Selector list for the text blocks collected from the body.
    pub block_selector: &'static str,
    /// Non-article elements removed from the body before text collection.
    pub clutter_selectors: &'static [&'static str],
}

static SUBSTACK_RULES: PlatformRules = PlatformRules {
    title: &[Strategy::SelectorText("h1.post-title")],
    subtitle: &[Strategy::SelectorText("h3.subtitle")],
    author: &[
        Strategy::LinkedData(LinkedDataField::AuthorName),
        Strategy::MetaTag("author"),
        Strategy::SelectorText("a.pencraft-card-meta-row-owner-name"),
    ],
    publication: &[
        Strategy::LinkedData(LinkedDataField::PublisherName),
        Strategy::MetaTag("og:site_name"),
        Strategy::SelectorText("a.pencraft-card-meta-row-publication-name"),
    ],
    publication_default: DEFAULT_PUBLICATION,
    date: &[
        Strategy::LinkedData(LinkedDataField::DatePublished),
        Strategy::MetaTag("article:published_time"),
        // Footer date text, e.g. "Mar 01, 2024" or "Thursday" on fresh posts.
        Strategy::SelectorText("div[aria-label=\"Post UFI\"] div.pencraft.pc-reset.color-pub-secondary-text-hGQ02T"),
    ],
    body_selector: "div.body.markup",
    block_selector: "p, h3, li",
    clutter_selectors: &[
        "div.subscription-widget-wrap",
        "div.captioned-image-container",
        "div.community-chat",
        "p.button-wrapper",
        "div.pullquote",
        "hr",
        ".instagram",
        ".like-button-container",
        ".post-ufi-comment-button",
    ],
};

static BEEHIIV_RULES: PlatformRules = PlatformRules {
    title: &[Strategy::LinkedData(LinkedDataField::Headline), Strategy::SelectorText("h1")],
    subtitle: &[],
    author: &[
        Strategy::LinkedData(LinkedDataField::AuthorName),
        Strategy::LinkHrefPattern(r"/authors?/"),
    ],
    publication: &[
        Strategy::LinkedData(LinkedDataField::PublisherName),
        Strategy::CanonicalHostLabel,
    ],
    publication_default: "Beehiiv",
    date: &[Strategy::LinkedData(LinkedDataField::DatePublished)],
    body_selector: "div.prose",
    block_selector: "p, h1, h2, h3, li",
    clutter_selectors: &[],
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detect_substack() {
        let platform = Platform::from_url("https://newsletter.substack.com/p/some-post").unwrap();
        assert_eq!(platform, Platform::Substack);
    }

    #[test]
    fn test_detect_beehiiv() {
        let platform = Platform::from_url("https://dailybrief.beehiiv.com/p/big-news").unwrap();
        assert_eq!(platform, Platform::Beehiiv);
    }

    #[test]
    fn test_unsupported_host() {
        let result = Platform::from_url("https://example.com/posts/1");
        assert!(matches!(result, Err(MissiveError::UnsupportedPlatform(_))));
    }

    #[test]
    fn test_invalid_url() {
        let result = Platform::from_url("not a url");
        assert!(matches!(result, Err(MissiveError::InvalidUrl(_))));
    }

    #[test]
    fn test_from_str() {
        assert_eq!("substack".parse::<Platform>().unwrap(), Platform::Substack);
        assert_eq!("Beehiiv".parse::<Platform>().unwrap(), Platform::Beehiiv);
        assert!("medium".parse::<Platform>().is_err());
    }

    #[test]
    fn test_substack_rules_shape() {
        let rules = Platform::Substack.rules();

        assert_eq!(rules.body_selector, "div.body.markup");
        assert!(!rules.clutter_selectors.is_empty());
        assert_eq!(rules.author.first(), Some(&Strategy::LinkedData(LinkedDataField::AuthorName)));
    }

    #[test]
    fn test_beehiiv_rules_shape() {
        let rules = Platform::Beehiiv.rules();

        assert_eq!(rules.body_selector, "div.prose");
        assert!(rules.clutter_selectors.is_empty());
        assert!(rules.subtitle.is_empty());
        // Date comes from structured data or nowhere.
        assert_eq!(rules.date.len(), 1);
    }
}
