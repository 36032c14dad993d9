use serde::{Deserialize, Serialize};

use crate::CodegenError;

/// Closed set of supported output shapes.
///
/// Each variant carries a stable lowercase tag used for routing, output
/// directory names, and cross-process communication. The set is fixed at
/// compile time; adding a shape means adding a variant and its parser and
/// saver arms.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GenerationType {
    /// One self-contained HTML document
    Html,
    /// HTML plus optional CSS and JavaScript files from a JSON manifest
    MultiFile,
}

impl GenerationType {
    /// Every supported shape, in registry order.
    pub const ALL: [GenerationType; 2] = [Self::Html, Self::MultiFile];

    /// Returns the canonical lowercase tag for this shape.
    ///
    /// The tag appears in output directory names (`{tag}_{app_id}`) and in
    /// caller-facing APIs.
    ///
    /// # Example
    ///
    /// ```rust
    /// use pagesmith_codegen::GenerationType;
    ///
    /// assert_eq!(GenerationType::Html.as_str(), "html");
    /// assert_eq!(GenerationType::MultiFile.as_str(), "multi_file");
    /// ```
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Html => "html",
            Self::MultiFile => "multi_file",
        }
    }

    /// Resolve a caller-supplied tag to a shape.
    ///
    /// Case-sensitive on the canonical tag. This is the fail-fast routing
    /// check: it runs before the generator is ever invoked.
    ///
    /// # Errors
    ///
    /// Returns `CodegenError::UnsupportedType` for any unknown tag.
    pub fn resolve(tag: &str) -> Result<Self, CodegenError> {
        Self::ALL
            .into_iter()
            .find(|t| t.as_str() == tag)
            .ok_or_else(|| CodegenError::UnsupportedType {
                tag: tag.to_string(),
            })
    }
}

impl std::fmt::Display for GenerationType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for GenerationType {
    type Err = CodegenError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::resolve(s)
    }
}
