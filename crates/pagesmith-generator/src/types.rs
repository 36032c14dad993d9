//! Core types for the generation backend abstraction

use async_trait::async_trait;
use futures::stream::BoxStream;
use serde::{Deserialize, Serialize};

use crate::GeneratorError;

/// A lazy, finite, non-restartable sequence of text fragments.
///
/// Yielded fragments arrive in emission order. The stream ending (`None`)
/// is the "done" signal; an `Err` item means the upstream failed before
/// completing and no further fragments will arrive.
pub type FragmentStream = BoxStream<'static, Result<String, GeneratorError>>;

/// Role of a message in a conversation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// System-level instructions
    System,
    /// User input
    User,
    /// Assistant response
    Assistant,
}

/// A single message in a conversation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    /// Role of the message sender
    pub role: Role,
    /// Content of the message (plain UTF-8 text)
    pub content: String,
}

impl Message {
    /// Create a new message
    #[must_use]
    pub fn new(role: Role, content: impl Into<String>) -> Self {
        Self {
            role,
            content: content.into(),
        }
    }

    /// Create a system message
    #[must_use]
    pub fn system(content: impl Into<String>) -> Self {
        Self::new(Role::System, content)
    }

    /// Create a user message
    #[must_use]
    pub fn user(content: impl Into<String>) -> Self {
        Self::new(Role::User, content)
    }
}

/// Input to a generation backend invocation
#[derive(Debug, Clone)]
pub struct GeneratorInvocation {
    /// Model to use; empty string means the backend default
    pub model: String,
    /// Ordered list of messages in the conversation
    pub messages: Vec<Message>,
    /// Maximum tokens to generate; backend default when unset
    pub max_tokens: Option<u32>,
    /// Sampling temperature; backend default when unset
    pub temperature: Option<f32>,
}

impl GeneratorInvocation {
    /// Create a new invocation using backend defaults for all parameters
    #[must_use]
    pub fn new(messages: Vec<Message>) -> Self {
        Self {
            model: String::new(),
            messages,
            max_tokens: None,
            temperature: None,
        }
    }

    /// Override the model for this invocation
    #[must_use]
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }
}

/// Trait for generation backend implementations.
///
/// The rest of the pipeline treats the backend purely as a producer of
/// text: a complete string in blocking mode, or a [`FragmentStream`] in
/// streaming mode. No retry or backoff policy is applied at this boundary.
#[async_trait]
pub trait GeneratorBackend: Send + Sync {
    /// Invoke the backend and wait for the complete response text.
    ///
    /// # Errors
    ///
    /// Returns `GeneratorError` for transport failures, provider errors
    /// (auth, quota, outages), and malformed responses.
    async fn invoke(&self, inv: GeneratorInvocation) -> Result<String, GeneratorError>;

    /// Invoke the backend and return a live stream of response fragments.
    ///
    /// The returned stream is forward-only and cannot be restarted. Errors
    /// that occur before the stream is established are returned directly;
    /// errors mid-stream surface as an `Err` item and terminate the stream.
    ///
    /// # Errors
    ///
    /// Returns `GeneratorError` if the streaming request cannot be started.
    async fn invoke_stream(&self, inv: GeneratorInvocation) -> Result<FragmentStream, GeneratorError>;
}
