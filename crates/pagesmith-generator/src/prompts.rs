//! System prompts for the supported output shapes.
//!
//! The generator is steered toward one of two response contracts: a single
//! fenced HTML document, or a JSON manifest of named files. The parsers in
//! the codegen pipeline are tolerant of deviations (see the fence fallback
//! there), but these prompts define the expected happy path.

/// System prompt for the single-file markup shape.
#[must_use]
pub const fn html_system_prompt() -> &'static str {
    "You are a senior front-end developer. Build a complete, self-contained \
     single-page website for the user's request. Inline all CSS and \
     JavaScript into one HTML document. Respond with the document inside a \
     ```html fenced code block and nothing else."
}

/// System prompt for the multi-file manifest shape.
#[must_use]
pub const fn multi_file_system_prompt() -> &'static str {
    "You are a senior front-end developer. Build a website for the user's \
     request as separate HTML, CSS, and JavaScript files. Respond with a \
     single JSON object of the form \
     {\"files\":[{\"name\":\"index.html\",\"content\":\"...\"},\
     {\"name\":\"style.css\",\"content\":\"...\"},\
     {\"name\":\"script.js\",\"content\":\"...\"}]} \
     and nothing else. The HTML file is required; CSS and JavaScript files \
     are optional."
}
