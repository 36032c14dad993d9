//! Saver for the multi-file shape.

use camino::Utf8Path;

use super::{INDEX_HTML, SCRIPT_JS, STYLE_CSS, locate_dir, write_file};
use crate::{AppId, CodegenError, GenerationType, OutputLocation, ValidationError};

/// Save a multi-file result: `index.html` always, `style.css` and
/// `script.js` only when their content is present and non-blank.
pub(crate) fn save(
    markup: Option<&str>,
    style: Option<&str>,
    script: Option<&str>,
    app_id: AppId,
    output_root: &Utf8Path,
) -> Result<OutputLocation, CodegenError> {
    validate(markup)?;
    let location = locate_dir(output_root, GenerationType::MultiFile, app_id)?;
    write_file(location.as_path(), INDEX_HTML, markup)?;
    write_file(location.as_path(), STYLE_CSS, style)?;
    write_file(location.as_path(), SCRIPT_JS, script)?;
    Ok(location)
}

/// At least the markup must be present; style and script may be absent.
fn validate(markup: Option<&str>) -> Result<(), ValidationError> {
    match markup {
        Some(markup) if !markup.trim().is_empty() => Ok(()),
        _ => Err(ValidationError::EmptyMarkup {
            type_tag: GenerationType::MultiFile.as_str(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use camino::Utf8PathBuf;
    use std::fs;

    fn temp_root(dir: &tempfile::TempDir) -> Utf8PathBuf {
        Utf8PathBuf::from_path_buf(dir.path().to_path_buf()).unwrap()
    }

    #[test]
    fn writes_all_three_files_when_present() {
        let dir = tempfile::tempdir().unwrap();
        let root = temp_root(&dir);

        let location = save(
            Some("<p>x</p>"),
            Some("body{}"),
            Some("let a=1;"),
            AppId::new(21),
            &root,
        )
        .unwrap();

        assert_eq!(location.as_path(), root.join("multi_file_21"));
        assert_eq!(
            fs::read_to_string(location.as_path().join(INDEX_HTML)).unwrap(),
            "<p>x</p>"
        );
        assert_eq!(
            fs::read_to_string(location.as_path().join(STYLE_CSS)).unwrap(),
            "body{}"
        );
        assert_eq!(
            fs::read_to_string(location.as_path().join(SCRIPT_JS)).unwrap(),
            "let a=1;"
        );
    }

    #[test]
    fn absent_style_and_script_produce_no_files() {
        let dir = tempfile::tempdir().unwrap();
        let root = temp_root(&dir);

        let location = save(Some("<p>x</p>"), None, None, AppId::new(22), &root).unwrap();
        assert!(location.as_path().join(INDEX_HTML).is_file());
        assert!(!location.as_path().join(STYLE_CSS).exists());
        assert!(!location.as_path().join(SCRIPT_JS).exists());
    }

    #[test]
    fn missing_markup_is_rejected_before_any_write() {
        let dir = tempfile::tempdir().unwrap();
        let root = temp_root(&dir);

        let err = save(None, Some("body{}"), None, AppId::new(23), &root).unwrap_err();
        assert!(matches!(err, CodegenError::Validation(_)));
        assert!(!root.join("multi_file_23").exists());
    }
}
