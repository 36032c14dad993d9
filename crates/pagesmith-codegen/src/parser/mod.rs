//! Parsers turning raw generator output into a [`GenerationResult`].
//!
//! One parser per shape, routed by [`parse`]. Parsers never fail on empty
//! input; only structurally invalid input for shapes that require
//! structure (the multi-file manifest) produces an error.

mod html;
mod multi_file;

use crate::{GenerationResult, GenerationType, ParseError};

/// Route raw text to the parser for the given shape.
///
/// # Errors
///
/// Returns `ParseError` when the multi-file manifest is malformed. The
/// single-file parser is total and never errors.
pub fn parse(raw: &str, gen_type: GenerationType) -> Result<GenerationResult, ParseError> {
    match gen_type {
        GenerationType::Html => html::parse(raw),
        GenerationType::MultiFile => multi_file::parse(raw),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dispatch_routes_by_shape() {
        let result = parse("<p>hi</p>", GenerationType::Html).unwrap();
        assert_eq!(result.gen_type(), GenerationType::Html);

        let result = parse(
            r#"{"files":[{"name":"index.html","content":"<p>hi</p>"}]}"#,
            GenerationType::MultiFile,
        )
        .unwrap();
        assert_eq!(result.gen_type(), GenerationType::MultiFile);
    }
}
