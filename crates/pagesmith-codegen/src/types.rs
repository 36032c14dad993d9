use camino::{Utf8Path, Utf8PathBuf};
use serde::{Deserialize, Serialize};

use crate::GenerationType;

/// Opaque application identifier.
///
/// Used only for output path construction and record lookup; the pipeline
/// attaches no other meaning to it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AppId(u64);

impl AppId {
    #[must_use]
    pub const fn new(id: u64) -> Self {
        Self(id)
    }

    #[must_use]
    pub const fn get(self) -> u64 {
        self.0
    }
}

impl std::fmt::Display for AppId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}

impl From<u64> for AppId {
    fn from(id: u64) -> Self {
        Self(id)
    }
}

/// On-disk directory holding the generated files for one
/// `(type, application)` pair.
///
/// The path is deterministic: `{output_root}/{tag}_{app_id}`. Re-saving
/// the same pair overwrites files in place; there is no versioning.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputLocation(Utf8PathBuf);

impl OutputLocation {
    /// Compute the location for a `(type, application)` pair under a root.
    ///
    /// Pure path arithmetic; nothing is created on disk.
    #[must_use]
    pub fn resolve(output_root: &Utf8Path, gen_type: GenerationType, app_id: AppId) -> Self {
        Self(output_root.join(format!("{}_{}", gen_type.as_str(), app_id)))
    }

    /// The directory path.
    #[must_use]
    pub fn as_path(&self) -> &Utf8Path {
        &self.0
    }

    /// Consume into the underlying path.
    #[must_use]
    pub fn into_path(self) -> Utf8PathBuf {
        self.0
    }

    /// Whether the directory currently exists on disk.
    #[must_use]
    pub fn exists(&self) -> bool {
        self.0.is_dir()
    }
}

impl std::fmt::Display for OutputLocation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn output_location_is_deterministic() {
        let root = Utf8Path::new("/srv/code_output");
        let a = OutputLocation::resolve(root, GenerationType::Html, AppId::new(42));
        let b = OutputLocation::resolve(root, GenerationType::Html, AppId::new(42));
        assert_eq!(a, b);
        assert_eq!(a.as_path().as_str(), "/srv/code_output/html_42");
    }

    #[test]
    fn output_location_separates_types_and_apps() {
        let root = Utf8Path::new("out");
        let html = OutputLocation::resolve(root, GenerationType::Html, AppId::new(1));
        let multi = OutputLocation::resolve(root, GenerationType::MultiFile, AppId::new(1));
        let other = OutputLocation::resolve(root, GenerationType::Html, AppId::new(2));
        assert_eq!(multi.as_path().as_str(), "out/multi_file_1");
        assert_ne!(html, multi);
        assert_ne!(html, other);
    }
}
