//! Top-level entry point combining generation, parsing, and saving.
//!
//! Two modes share the same pipeline. Blocking mode waits for the complete
//! response, then parses and saves before returning. Streaming mode relays
//! fragments to the caller as they arrive while accumulating them in a
//! request-scoped buffer; parsing and saving run as a detached
//! continuation once the upstream ends, and their failures are never
//! surfaced through the already-delivered stream.

use camino::Utf8PathBuf;
use futures::StreamExt;
use futures::channel::mpsc;
use std::sync::Arc;
use tracing::{error, info};

use pagesmith_generator::{
    FragmentStream, GeneratorBackend, GeneratorInvocation, Message, prompts,
};

use crate::{AppId, CodegenError, GenerationType, OutputLocation, parser, saver};

/// Outcome of the detached post-stream persistence step.
#[derive(Debug)]
pub enum PersistOutcome {
    /// Parse and save succeeded; files are on disk at the location
    Saved(OutputLocation),
    /// Parse, validation, or save failed; nothing (or only part) of the
    /// output made it to disk
    Failed(CodegenError),
}

/// Callback observing post-stream persistence.
///
/// The streaming contract forbids retroactively failing a delivered
/// stream; this hook is the out-of-band observation point for callers that
/// need more than the log record (metrics, a status field, or a CLI
/// waiting for the detached save to finish).
pub type PersistHook = Arc<dyn Fn(&PersistOutcome) + Send + Sync>;

/// Facade over the generation pipeline.
///
/// One instance may serve many concurrent requests; the only state shared
/// between requests is the output root on the filesystem. Each streaming
/// call owns its accumulator.
pub struct GenerationFacade {
    backend: Arc<dyn GeneratorBackend>,
    output_root: Utf8PathBuf,
    persist_hook: Option<PersistHook>,
}

impl GenerationFacade {
    /// Create a facade writing under the given output root.
    #[must_use]
    pub fn new(backend: Arc<dyn GeneratorBackend>, output_root: impl Into<Utf8PathBuf>) -> Self {
        Self {
            backend,
            output_root: output_root.into(),
            persist_hook: None,
        }
    }

    /// Register a hook observing post-stream persistence outcomes.
    #[must_use]
    pub fn with_persist_hook(mut self, hook: PersistHook) -> Self {
        self.persist_hook = Some(hook);
        self
    }

    /// Build the backend invocation for a request: the shape's system
    /// prompt plus the user's message.
    fn invocation(user_message: &str, gen_type: GenerationType) -> GeneratorInvocation {
        let system = match gen_type {
            GenerationType::Html => prompts::html_system_prompt(),
            GenerationType::MultiFile => prompts::multi_file_system_prompt(),
        };
        GeneratorInvocation::new(vec![Message::system(system), Message::user(user_message)])
    }

    /// Generate code for the request, then parse and save it.
    ///
    /// Blocks until the backend has produced its complete response and the
    /// files are on disk. There is no partial success: either an
    /// [`OutputLocation`] is returned or an error is raised.
    ///
    /// # Errors
    ///
    /// Propagates generator, parse, validation, and save errors to the
    /// caller synchronously.
    pub async fn generate_and_save(
        &self,
        user_message: &str,
        gen_type: GenerationType,
        app_id: AppId,
    ) -> Result<OutputLocation, CodegenError> {
        let raw = self
            .backend
            .invoke(Self::invocation(user_message, gen_type))
            .await?;
        let result = parser::parse(&raw, gen_type)?;
        let location = saver::save(&result, app_id, &self.output_root)?;
        info!(
            app_id = %app_id,
            gen_type = %gen_type,
            path = %location,
            "Generated code saved"
        );
        Ok(location)
    }

    /// Generate code for the request, relaying the live stream.
    ///
    /// Fragments are forwarded to the returned stream in emission order,
    /// before any parsing happens. Once the upstream completes naturally,
    /// the accumulated text is parsed and saved in a detached continuation:
    /// the caller has already seen the stream end and is not notified of
    /// persistence failures (they are logged, and reported through the
    /// persist hook when one is registered). If the upstream errors before
    /// completing, the error is relayed and nothing is persisted.
    ///
    /// # Errors
    ///
    /// Returns an error only if the streaming invocation cannot be
    /// started; everything after that is delivered through the stream.
    pub async fn generate_and_save_stream(
        &self,
        user_message: &str,
        gen_type: GenerationType,
        app_id: AppId,
    ) -> Result<FragmentStream, CodegenError> {
        let mut upstream = self
            .backend
            .invoke_stream(Self::invocation(user_message, gen_type))
            .await?;

        let (tx, rx) = mpsc::unbounded();
        let output_root = self.output_root.clone();
        let hook = self.persist_hook.clone();

        tokio::spawn(async move {
            // Request-scoped accumulator; owned by this task alone.
            let mut buffer = String::new();
            let mut upstream_failed = false;

            while let Some(item) = upstream.next().await {
                match item {
                    Ok(fragment) => {
                        buffer.push_str(&fragment);
                        // A dropped receiver only means the caller stopped
                        // listening; keep draining so the accumulator stays
                        // a faithful concatenation of the upstream.
                        let _ = tx.unbounded_send(Ok(fragment));
                    }
                    Err(err) => {
                        upstream_failed = true;
                        let _ = tx.unbounded_send(Err(err));
                        break;
                    }
                }
            }

            // End the caller's stream before persisting: by contract the
            // relay is complete before parse/save runs.
            drop(tx);

            if upstream_failed {
                return;
            }

            let outcome = match parser::parse(&buffer, gen_type)
                .map_err(CodegenError::from)
                .and_then(|result| saver::save(&result, app_id, &output_root))
            {
                Ok(location) => {
                    info!(
                        app_id = %app_id,
                        gen_type = %gen_type,
                        path = %location,
                        "Streamed code saved"
                    );
                    PersistOutcome::Saved(location)
                }
                Err(err) => {
                    error!(
                        app_id = %app_id,
                        gen_type = %gen_type,
                        error = %err,
                        "Failed to persist streamed code"
                    );
                    PersistOutcome::Failed(err)
                }
            };
            if let Some(hook) = hook {
                hook(&outcome);
            }
        });

        Ok(rx.boxed())
    }
}
