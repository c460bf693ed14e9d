//! Paragraph extraction from the markup release
//!
//! The markup document wraps the released pages in a `bodymatter` element.
//! Every `<p>` inside it becomes one plain-text paragraph, in document order.

use crate::error::{ExtractError, Result};
use regex::Regex;
use std::sync::LazyLock;
use tracing::debug;

const BODYMATTER_OPEN: &str = "<bodymatter";
const BODYMATTER_CLOSE: &str = "</bodymatter>";

static PARAGRAPH_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?is)<p(?:\s[^>]*)?>(.*?)</p>").unwrap());

static TAG_REGEX: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"<[^>]+>").unwrap());

/// Extract the ordered paragraph texts from the `bodymatter` region.
///
/// Inner markup is replaced by a space and a fixed set of entities is
/// decoded. Empty paragraphs are kept so positions stay stable.
pub fn extract_paragraphs(markup: &str) -> Result<Vec<String>> {
    let region = bodymatter_region(markup)?;

    let paragraphs: Vec<String> = PARAGRAPH_REGEX
        .captures_iter(region)
        .map(|caps| {
            let inner = TAG_REGEX.replace_all(&caps[1], " ");
            decode_entities(inner.trim()).trim().to_string()
        })
        .collect();

    debug!("Extracted {} paragraphs from bodymatter", paragraphs.len());
    Ok(paragraphs)
}

fn bodymatter_region(markup: &str) -> Result<&str> {
    let start = markup
        .find(BODYMATTER_OPEN)
        .ok_or_else(|| ExtractError::Structure("missing <bodymatter> element".into()))?;
    let end = markup
        .find(BODYMATTER_CLOSE)
        .filter(|&end| end >= start)
        .ok_or_else(|| ExtractError::Structure("missing </bodymatter> close tag".into()))?;

    Ok(&markup[start..end + BODYMATTER_CLOSE.len()])
}

/// Decode the handful of entities the release uses. `&amp;` goes last so an
/// escaped entity such as `&amp;lt;` decodes to `&lt;` and not `<`.
#[must_use]
pub fn decode_entities(text: &str) -> String {
    text.replace("&nbsp;", " ")
        .replace("&quot;", "\"")
        .replace("&#39;", "'")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&amp;", "&")
}
