//! Saver for the single-file markup shape.

use camino::Utf8Path;

use super::{INDEX_HTML, locate_dir, write_file};
use crate::{AppId, CodegenError, GenerationType, OutputLocation, ValidationError};

/// Save a single-document result: one `index.html` holding the markup.
pub(crate) fn save(
    markup: &str,
    app_id: AppId,
    output_root: &Utf8Path,
) -> Result<OutputLocation, CodegenError> {
    validate(markup)?;
    let location = locate_dir(output_root, GenerationType::Html, app_id)?;
    write_file(location.as_path(), INDEX_HTML, Some(markup))?;
    Ok(location)
}

/// The markup is the sole artifact; it must not be blank.
fn validate(markup: &str) -> Result<(), ValidationError> {
    if markup.trim().is_empty() {
        return Err(ValidationError::EmptyMarkup {
            type_tag: GenerationType::Html.as_str(),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use camino::Utf8PathBuf;
    use std::fs;

    #[test]
    fn writes_markup_to_index_html() {
        let dir = tempfile::tempdir().unwrap();
        let root = Utf8PathBuf::from_path_buf(dir.path().to_path_buf()).unwrap();

        let location = save("<h1>Hello</h1>", AppId::new(11), &root).unwrap();
        let written = fs::read_to_string(location.as_path().join(INDEX_HTML)).unwrap();
        assert_eq!(written, "<h1>Hello</h1>");
    }

    #[test]
    fn resaving_overwrites_in_place() {
        let dir = tempfile::tempdir().unwrap();
        let root = Utf8PathBuf::from_path_buf(dir.path().to_path_buf()).unwrap();

        let first = save("<p>v1</p>", AppId::new(5), &root).unwrap();
        let second = save("<p>v2</p>", AppId::new(5), &root).unwrap();
        assert_eq!(first, second);
        let written = fs::read_to_string(second.as_path().join(INDEX_HTML)).unwrap();
        assert_eq!(written, "<p>v2</p>");
    }

    #[test]
    fn blank_markup_is_rejected_before_any_write() {
        let dir = tempfile::tempdir().unwrap();
        let root = Utf8PathBuf::from_path_buf(dir.path().to_path_buf()).unwrap();

        let err = save("\n  ", AppId::new(6), &root).unwrap_err();
        assert!(matches!(err, CodegenError::Validation(_)));
        assert!(!root.join("html_6").exists());
    }
}
