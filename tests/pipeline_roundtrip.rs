//! End-to-end pipeline tests: generate → parse → save → read back.
//!
//! The backend is scripted so every run is deterministic; round-trip
//! assertions compare the files on disk against the fields the parser
//! extracted.

use async_trait::async_trait;
use camino::Utf8PathBuf;
use futures::StreamExt;
use futures::stream;
use std::sync::Arc;
use std::time::Duration;

use pagesmith::generator::{
    FragmentStream, GeneratorBackend, GeneratorError, GeneratorInvocation,
};
use pagesmith::{AppId, GenerationFacade, GenerationType};

/// Backend replaying a fixed response, in fragments for streaming mode.
struct ScriptedBackend {
    fragments: Vec<String>,
}

impl ScriptedBackend {
    fn new(fragments: &[&str]) -> Self {
        Self {
            fragments: fragments.iter().map(|s| (*s).to_string()).collect(),
        }
    }
}

#[async_trait]
impl GeneratorBackend for ScriptedBackend {
    async fn invoke(&self, _inv: GeneratorInvocation) -> Result<String, GeneratorError> {
        Ok(self.fragments.concat())
    }

    async fn invoke_stream(
        &self,
        _inv: GeneratorInvocation,
    ) -> Result<FragmentStream, GeneratorError> {
        let items: Vec<Result<String, GeneratorError>> =
            self.fragments.iter().cloned().map(Ok).collect();
        Ok(stream::iter(items).boxed())
    }
}

fn facade_in(dir: &tempfile::TempDir, fragments: &[&str]) -> GenerationFacade {
    let root = Utf8PathBuf::from_path_buf(dir.path().to_path_buf()).unwrap();
    GenerationFacade::new(Arc::new(ScriptedBackend::new(fragments)), root)
}

async fn wait_for_file(path: &std::path::Path) -> bool {
    for _ in 0..100 {
        if path.is_file() {
            return true;
        }
        tokio::time::sleep(Duration::from_millis(20)).await;
    }
    path.is_file()
}

#[tokio::test]
async fn html_blocking_roundtrip() {
    let dir = tempfile::tempdir().unwrap();
    let facade = facade_in(&dir, &["```html\n<h1>Hi</h1>\n```"]);

    let location = facade
        .generate_and_save("a greeting", GenerationType::Html, AppId::new(100))
        .await
        .unwrap();

    assert!(location.as_path().as_str().ends_with("html_100"));
    let written = std::fs::read_to_string(location.as_path().join("index.html")).unwrap();
    assert_eq!(written, "<h1>Hi</h1>");
}

#[tokio::test]
async fn multi_file_blocking_roundtrip() {
    let dir = tempfile::tempdir().unwrap();
    let manifest = r#"{"files":[
        {"name":"index.html","content":"<p>x</p>"},
        {"name":"style.css","content":"body{}"},
        {"name":"script.js","content":"let a=1;"}
    ]}"#;
    let facade = facade_in(&dir, &[manifest]);

    let location = facade
        .generate_and_save("a page", GenerationType::MultiFile, AppId::new(101))
        .await
        .unwrap();

    let dir_path = location.as_path();
    assert!(dir_path.as_str().ends_with("multi_file_101"));
    assert_eq!(
        std::fs::read_to_string(dir_path.join("index.html")).unwrap(),
        "<p>x</p>"
    );
    assert_eq!(
        std::fs::read_to_string(dir_path.join("style.css")).unwrap(),
        "body{}"
    );
    assert_eq!(
        std::fs::read_to_string(dir_path.join("script.js")).unwrap(),
        "let a=1;"
    );
}

#[tokio::test]
async fn multi_file_without_optional_entries_writes_only_markup() {
    let dir = tempfile::tempdir().unwrap();
    let manifest = r#"{"files":[{"name":"index.html","content":"<p>solo</p>"}]}"#;
    let facade = facade_in(&dir, &[manifest]);

    let location = facade
        .generate_and_save("a page", GenerationType::MultiFile, AppId::new(102))
        .await
        .unwrap();

    assert!(location.as_path().join("index.html").is_file());
    assert!(!location.as_path().join("style.css").exists());
    assert!(!location.as_path().join("script.js").exists());
}

#[tokio::test]
async fn streamed_fragments_concatenate_to_the_persisted_document() {
    let dir = tempfile::tempdir().unwrap();
    let fragments = [
        "```html\n",
        "<!doctype html>",
        "<html><body>",
        "<h1>Streaming</h1>",
        "</body></html>",
        "\n```",
    ];
    let facade = facade_in(&dir, &fragments);

    let stream = facade
        .generate_and_save_stream("a page", GenerationType::Html, AppId::new(103))
        .await
        .unwrap();
    let relayed: Vec<String> = stream.map(|item| item.unwrap()).collect().await;

    // The caller sees exactly the upstream fragments, in order.
    assert_eq!(relayed, fragments);

    // The document persisted afterwards is the parsed form of their
    // concatenation.
    let index = dir.path().join("html_103").join("index.html");
    assert!(wait_for_file(&index).await, "streamed output never persisted");
    let written = std::fs::read_to_string(&index).unwrap();
    let expected = relayed.concat();
    let expected = expected
        .trim_start_matches("```html\n")
        .trim_end_matches("\n```");
    assert_eq!(written, expected);
}

#[tokio::test]
async fn regenerating_overwrites_the_same_location() {
    let dir = tempfile::tempdir().unwrap();
    let root = Utf8PathBuf::from_path_buf(dir.path().to_path_buf()).unwrap();

    let first = GenerationFacade::new(
        Arc::new(ScriptedBackend::new(&["<h1>v1</h1>"])),
        root.clone(),
    )
    .generate_and_save("v1", GenerationType::Html, AppId::new(104))
    .await
    .unwrap();

    let second = GenerationFacade::new(Arc::new(ScriptedBackend::new(&["<h1>v2</h1>"])), root)
        .generate_and_save("v2", GenerationType::Html, AppId::new(104))
        .await
        .unwrap();

    assert_eq!(first, second);
    assert_eq!(
        std::fs::read_to_string(second.as_path().join("index.html")).unwrap(),
        "<h1>v2</h1>"
    );
}
