//! Prompt template generation.
//!
//! Maps an extracted article to a fixed set of named prompt strings, ready
//! to paste into an LLM chat. Generation is a pure function of the title
//! and body text; the same article always produces the same prompts.

use std::collections::BTreeMap;

/// Maximum number of body characters included in a prompt.
pub const PROMPT_TEXT_LIMIT: usize = 10_000;

/// The template set: name and instructional prefix.
const TEMPLATES: &[(&str, &str)] = &[
    (
        "summarization",
        "Summarize the following newsletter article in three to five concise paragraphs, keeping the key arguments and takeaways.",
    ),
    (
        "tweet_thread",
        "Write a tweet thread of five to eight numbered tweets capturing the main points of the following newsletter article.",
    ),
    (
        "reply_comment",
        "Write a thoughtful reply comment to the following newsletter article, engaging directly with its central argument.",
    ),
    (
        "idea_extraction",
        "List every distinct idea presented in the following newsletter article as a separate bullet point.",
    ),
    (
        "quote_extraction",
        "Extract the most quotable passages from the following newsletter article, verbatim, one per line.",
    ),
];

/// Generates the fixed set of prompt templates for an article.
///
/// Each template is an instructional prefix followed by the title and the
/// first [`PROMPT_TEXT_LIMIT`] characters of the body text, with residual
/// HTML entities decoded first so truncation never splits an entity.
pub fn generate_prompts(title: &str, full_text: &str) -> BTreeMap<String, String> {
    let text = prepare_text(full_text);

    TEMPLATES
        .iter()
        .map(|(name, instruction)| {
            let prompt = format!("{}\n\nTitle: {}\n\n{}", instruction, title, text);
            ((*name).to_string(), prompt)
        })
        .collect()
}

fn prepare_text(full_text: &str) -> String {
    decode_entities(full_text).chars().take(PROMPT_TEXT_LIMIT).collect()
}

/// Decodes the HTML entities that commonly survive text extraction.
fn decode_entities(text: &str) -> String {
    text.replace("&nbsp;", " ")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&amp;", "&")
        .replace("&quot;", "\"")
        .replace("&#39;", "'")
        .replace("&#x27;", "'")
        .replace("&rsquo;", "'")
        .replace("&lsquo;", "'")
        .replace("&rdquo;", "\"")
        .replace("&ldquo;", "\"")
        .replace("&hellip;", "...")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generates_all_five_templates() {
        let prompts = generate_prompts("Big News", "Hello.\n\nWorld.");

        assert_eq!(prompts.len(), 5);
        for name in ["summarization", "tweet_thread", "reply_comment", "idea_extraction", "quote_extraction"] {
            assert!(prompts.contains_key(name), "missing template {}", name);
        }
    }

    #[test]
    fn test_templates_contain_title_and_text() {
        let prompts = generate_prompts("Big News", "Hello.\n\nWorld.");

        for prompt in prompts.values() {
            assert!(prompt.contains("Title: Big News"));
            assert!(prompt.contains("Hello.\n\nWorld."));
        }
    }

    #[test]
    fn test_text_truncated_to_limit() {
        let long_text = "x".repeat(PROMPT_TEXT_LIMIT + 500);
        let prompts = generate_prompts("Title", &long_text);
        let summarization = &prompts["summarization"];

        let included = summarization.rsplit("\n\n").next().unwrap();
        assert_eq!(included.chars().count(), PROMPT_TEXT_LIMIT);
    }

    #[test]
    fn test_truncation_counts_chars_not_bytes() {
        let long_text = "é".repeat(PROMPT_TEXT_LIMIT + 10);
        let prompts = generate_prompts("Title", &long_text);
        let summarization = &prompts["summarization"];

        let included = summarization.rsplit("\n\n").next().unwrap();
        assert_eq!(included.chars().count(), PROMPT_TEXT_LIMIT);
    }

    #[test]
    fn test_entities_decoded() {
        let prompts = generate_prompts("Title", "Ben &amp; Jerry &rsquo;s &hellip;");
        let summarization = &prompts["summarization"];

        assert!(summarization.contains("Ben & Jerry 's ..."));
        assert!(!summarization.contains("&amp;"));
    }

    #[test]
    fn test_deterministic() {
        let a = generate_prompts("Title", "Some body text.");
        let b = generate_prompts("Title", "Some body text.");
        assert_eq!(a, b);
    }
}
