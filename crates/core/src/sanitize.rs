//! Body text sanitization.
//!
//! Two-stage cleaning shared by every platform: clutter elements are removed
//! from the body container's markup first, then each surviving block element
//! is flattened to a single line of text and the blocks are joined with one
//! blank line. The result is plain text with no bare newlines inside a
//! block and no markup artifacts between blocks.

/// Flattens one block element's text to a single clean line.
///
/// Leading and trailing whitespace is stripped and internal whitespace runs,
/// newlines included, collapse to single spaces. Returns `None` when nothing
/// but whitespace remains, so decorative empty elements drop out of the body.
pub fn sanitize_block(text: &str) -> Option<String> {
    let cleaned = text.split_whitespace().collect::<Vec<_>>().join(" ");

    if cleaned.is_empty() { None } else { Some(cleaned) }
}

/// Joins sanitized blocks with a blank line separator.
///
/// Blocks that sanitize to nothing are dropped; an input with no surviving
/// blocks yields the empty string.
pub fn join_blocks<I>(blocks: I) -> String
where
    I: IntoIterator<Item = String>,
{
    blocks
        .into_iter()
        .filter_map(|block| sanitize_block(&block))
        .collect::<Vec<_>>()
        .join("\n\n")
}

/// Removes a denylist of clutter elements from an HTML fragment.
///
/// Each selector's matches are removed along with their subtrees. The
/// rewrite is best-effort: if rewriting fails the input is returned
/// unchanged, since partially-cleaned markup beats no markup at all.
pub fn remove_clutter(html: &str, selectors: &[&str]) -> String {
    if selectors.is_empty() {
        return html.to_string();
    }

    let mut output = String::new();
    let mut rewriter = lol_html::HtmlRewriter::new(
        lol_html::Settings {
            element_content_handlers: selectors
                .iter()
                .map(|selector| {
                    lol_html::element!(*selector, |el| {
                        el.remove();
                        Ok(())
                    })
                })
                .collect(),
            ..Default::default()
        },
        |c: &[u8]| {
            output.push_str(&String::from_utf8_lossy(c));
        },
    );

    match rewriter.write(html.as_bytes()) {
        Ok(_) => {}
        Err(_) => return html.to_string(),
    }

    match rewriter.end() {
        Ok(_) => {}
        Err(_) => return html.to_string(),
    }

    if output.is_empty() { html.to_string() } else { output }
}
