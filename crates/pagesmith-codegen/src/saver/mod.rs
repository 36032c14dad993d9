//! Savers materializing a [`GenerationResult`] as files on disk.
//!
//! Every shape follows the same fixed template: validate the result,
//! locate (and lazily create) the deterministic output directory, then
//! write the shape's file set. Validation failures abort before any
//! directory or file is touched. Writes are not atomic; a mid-write I/O
//! failure can leave a directory partially populated.

mod html;
mod multi_file;

use camino::Utf8Path;
use std::fs;

use crate::{AppId, CodegenError, GenerationResult, GenerationType, OutputLocation, SaveError};

/// Conventional file name for the markup artifact
pub const INDEX_HTML: &str = "index.html";
/// Conventional file name for the style artifact
pub const STYLE_CSS: &str = "style.css";
/// Conventional file name for the script artifact
pub const SCRIPT_JS: &str = "script.js";

/// Route a result to the saver for its shape and return where it landed.
///
/// The shape is carried by the result itself, so a result can never be
/// routed to the wrong saver.
///
/// # Errors
///
/// Returns a validation error for blank required markup (before touching
/// the filesystem) or a save error for directory/file I/O failures.
pub fn save(
    result: &GenerationResult,
    app_id: AppId,
    output_root: &Utf8Path,
) -> Result<OutputLocation, CodegenError> {
    match result {
        GenerationResult::Html { markup, .. } => html::save(markup, app_id, output_root),
        GenerationResult::MultiFile {
            markup,
            style,
            script,
            ..
        } => multi_file::save(
            markup.as_deref(),
            style.as_deref(),
            script.as_deref(),
            app_id,
            output_root,
        ),
    }
}

/// Locate the output directory for a `(type, application)` pair, creating
/// it and its parents if absent. Idempotent when the directory exists.
pub(crate) fn locate_dir(
    output_root: &Utf8Path,
    gen_type: GenerationType,
    app_id: AppId,
) -> Result<OutputLocation, SaveError> {
    let location = OutputLocation::resolve(output_root, gen_type, app_id);
    fs::create_dir_all(location.as_path()).map_err(|source| SaveError::CreateDir {
        dir: location.as_path().to_string(),
        source,
    })?;
    Ok(location)
}

/// Write one file into the output directory.
///
/// Blank or absent content is skipped entirely; no placeholder file is
/// created.
pub(crate) fn write_file(
    dir: &Utf8Path,
    filename: &str,
    content: Option<&str>,
) -> Result<(), SaveError> {
    let Some(content) = content else {
        return Ok(());
    };
    if content.trim().is_empty() {
        return Ok(());
    }

    let path = dir.join(filename);
    fs::write(&path, content).map_err(|source| SaveError::WriteFile {
        path: path.to_string(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use camino::Utf8PathBuf;

    fn temp_root(dir: &tempfile::TempDir) -> Utf8PathBuf {
        Utf8PathBuf::from_path_buf(dir.path().to_path_buf()).unwrap()
    }

    #[test]
    fn locate_dir_is_idempotent() {
        let dir = tempfile::tempdir().unwrap();
        let root = temp_root(&dir);
        let first = locate_dir(&root, GenerationType::Html, AppId::new(7)).unwrap();
        let second = locate_dir(&root, GenerationType::Html, AppId::new(7)).unwrap();
        assert_eq!(first, second);
        assert!(first.exists());
    }

    #[test]
    fn write_file_skips_blank_and_absent_content() {
        let dir = tempfile::tempdir().unwrap();
        let root = temp_root(&dir);

        write_file(&root, "a.css", None).unwrap();
        write_file(&root, "b.css", Some("   \n")).unwrap();
        write_file(&root, "c.css", Some("body{}")).unwrap();

        assert!(!root.join("a.css").exists());
        assert!(!root.join("b.css").exists());
        assert_eq!(fs::read_to_string(root.join("c.css")).unwrap(), "body{}");
    }

    #[test]
    fn save_routes_by_result_shape() {
        let dir = tempfile::tempdir().unwrap();
        let root = temp_root(&dir);

        let result = GenerationResult::Html {
            markup: "<h1>Hi</h1>".to_string(),
            description: None,
        };
        let location = save(&result, AppId::new(3), &root).unwrap();
        assert_eq!(location.as_path(), root.join("html_3"));
        assert!(location.as_path().join(INDEX_HTML).is_file());
    }

    #[test]
    fn validation_failure_creates_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let root = temp_root(&dir);

        let result = GenerationResult::Html {
            markup: "  ".to_string(),
            description: None,
        };
        let err = save(&result, AppId::new(9), &root).unwrap_err();
        assert!(matches!(err, CodegenError::Validation(_)));
        assert!(!root.join("html_9").exists());
    }
}
