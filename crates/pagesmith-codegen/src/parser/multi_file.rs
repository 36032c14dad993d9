//! Multi-file manifest parser.
//!
//! Expects the raw output to be a JSON object with a `files` array of
//! `{name, content}` entries. Entries are classified by suffix; unknown
//! suffixes are silently ignored. A missing `content` defaults to the
//! empty string, but a malformed document or a missing/non-array `files`
//! field is a parse error.

use serde_json::Value;

use crate::{GenerationResult, ParseError};

/// Parse raw generator output as a multi-file JSON manifest.
///
/// # Errors
///
/// Returns `ParseError::MalformedJson` when the text is not valid JSON or
/// an entry lacks a `name`, and `ParseError::MissingFilesArray` when the
/// `files` field is absent or not an array.
pub(crate) fn parse(raw: &str) -> Result<GenerationResult, ParseError> {
    let root: Value = serde_json::from_str(raw).map_err(|e| ParseError::MalformedJson {
        reason: e.to_string(),
    })?;

    let Some(files) = root.get("files").and_then(Value::as_array) else {
        return Err(ParseError::MissingFilesArray);
    };

    let mut markup = None;
    let mut style = None;
    let mut script = None;

    for entry in files {
        let name = entry
            .get("name")
            .and_then(Value::as_str)
            .ok_or_else(|| ParseError::MalformedJson {
                reason: "file entry is missing a `name`".to_string(),
            })?;
        let content = entry
            .get("content")
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_string();

        if name.ends_with(".html") {
            markup = Some(content);
        } else if name.ends_with(".css") {
            style = Some(content);
        } else if name.ends_with(".js") {
            script = Some(content);
        }
        // Other suffixes are ignored, not an error.
    }

    Ok(GenerationResult::MultiFile {
        markup,
        style,
        script,
        description: None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fields(result: GenerationResult) -> (Option<String>, Option<String>, Option<String>) {
        match result {
            GenerationResult::MultiFile {
                markup,
                style,
                script,
                ..
            } => (markup, style, script),
            other => panic!("Expected MultiFile result, got {other:?}"),
        }
    }

    #[test]
    fn classifies_entries_by_suffix() {
        let raw = r#"{"files":[
            {"name":"index.html","content":"<p>x</p>"},
            {"name":"style.css","content":"body{}"},
            {"name":"script.js","content":"let a=1;"}
        ]}"#;
        let (markup, style, script) = fields(parse(raw).unwrap());
        assert_eq!(markup.as_deref(), Some("<p>x</p>"));
        assert_eq!(style.as_deref(), Some("body{}"));
        assert_eq!(script.as_deref(), Some("let a=1;"));
    }

    #[test]
    fn unknown_suffixes_are_silently_ignored() {
        let raw = r##"{"files":[
            {"name":"a.html","content":"<p>x</p>"},
            {"name":"a.css","content":"body{}"},
            {"name":"readme.md","content":"# notes"},
            {"name":"logo.svg","content":"<svg/>"}
        ]}"##;
        let (markup, style, script) = fields(parse(raw).unwrap());
        assert_eq!(markup.as_deref(), Some("<p>x</p>"));
        assert_eq!(style.as_deref(), Some("body{}"));
        assert_eq!(script, None);
    }

    #[test]
    fn missing_content_defaults_to_empty_string() {
        let raw = r#"{"files":[{"name":"index.html"}]}"#;
        let (markup, _, _) = fields(parse(raw).unwrap());
        assert_eq!(markup.as_deref(), Some(""));
    }

    #[test]
    fn malformed_json_is_a_parse_error() {
        match parse("not json at all") {
            Err(ParseError::MalformedJson { .. }) => {}
            other => panic!("Expected MalformedJson, got {other:?}"),
        }
    }

    #[test]
    fn missing_files_array_is_a_parse_error() {
        match parse(r#"{"pages":[]}"#) {
            Err(ParseError::MissingFilesArray) => {}
            other => panic!("Expected MissingFilesArray, got {other:?}"),
        }
    }

    #[test]
    fn non_array_files_is_a_parse_error() {
        match parse(r#"{"files":"index.html"}"#) {
            Err(ParseError::MissingFilesArray) => {}
            other => panic!("Expected MissingFilesArray, got {other:?}"),
        }
    }

    #[test]
    fn entry_without_name_is_a_parse_error() {
        match parse(r#"{"files":[{"content":"x"}]}"#) {
            Err(ParseError::MalformedJson { reason }) => assert!(reason.contains("name")),
            other => panic!("Expected MalformedJson, got {other:?}"),
        }
    }

    #[test]
    fn later_entries_win_on_duplicate_suffix() {
        let raw = r#"{"files":[
            {"name":"draft.html","content":"<p>old</p>"},
            {"name":"index.html","content":"<p>new</p>"}
        ]}"#;
        let (markup, _, _) = fields(parse(raw).unwrap());
        assert_eq!(markup.as_deref(), Some("<p>new</p>"));
    }
}
