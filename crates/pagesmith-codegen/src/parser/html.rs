//! Single-file markup parser.
//!
//! Extracts HTML from a Markdown code fence when one is present, and falls
//! back to treating the whole response as markup otherwise. The fallback
//! is deliberate: the generator is not guaranteed to wrap its output in a
//! fence.

use regex::Regex;
use std::sync::LazyLock;

use crate::{GenerationResult, ParseError};

/// Matches ```` ```html ... ``` ```` blocks, case-insensitive.
static HTML_FENCE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?is)```html\s*\n(.*?)```").expect("static fence pattern compiles")
});

/// Parse raw generator output as a single HTML document.
///
/// Total: every input, including the empty string, produces a result.
/// Blank markup is rejected later, at validation.
pub(crate) fn parse(raw: &str) -> Result<GenerationResult, ParseError> {
    let markup = match extract_fenced_html(raw) {
        Some(fenced) if !fenced.trim().is_empty() => fenced.trim().to_string(),
        _ => raw.trim().to_string(),
    };

    Ok(GenerationResult::Html {
        markup,
        description: None,
    })
}

/// The inner content of the first ```html fence, if any.
fn extract_fenced_html(raw: &str) -> Option<&str> {
    HTML_FENCE
        .captures(raw)
        .and_then(|captures| captures.get(1))
        .map(|m| m.as_str())
}
