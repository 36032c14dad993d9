//! Anthropic HTTP backend implementation
//!
//! HTTP-based generation backend for Anthropic's Messages API, supporting
//! both a blocking invocation and a server-sent-events streaming
//! invocation.

use crate::GeneratorError;
use crate::types::{FragmentStream, GeneratorBackend, GeneratorInvocation, Message, Role};
use async_trait::async_trait;
use futures::StreamExt;
use futures::channel::mpsc;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Default Anthropic API endpoint
const DEFAULT_BASE_URL: &str = "https://api.anthropic.com/v1/messages";

/// Anthropic API version header value
const ANTHROPIC_VERSION: &str = "2023-06-01";

/// HTTP request parameters
#[derive(Debug, Clone)]
pub(crate) struct HttpParams {
    pub max_tokens: u32,
    pub temperature: f32,
}

impl Default for HttpParams {
    fn default() -> Self {
        Self {
            max_tokens: 8192,
            temperature: 0.2,
        }
    }
}

/// Anthropic backend configuration
#[derive(Clone)]
pub(crate) struct AnthropicBackend {
    client: reqwest::Client,
    base_url: String,
    api_key: String,
    default_model: String,
    default_params: HttpParams,
}

impl AnthropicBackend {
    /// Create a new Anthropic backend
    ///
    /// # Errors
    ///
    /// Returns `GeneratorError::Misconfiguration` if the HTTP client
    /// cannot be constructed
    pub fn new(
        api_key: String,
        base_url: Option<String>,
        default_model: String,
        default_params: HttpParams,
    ) -> Result<Self, GeneratorError> {
        let client = reqwest::Client::builder().build().map_err(|e| {
            GeneratorError::Misconfiguration(format!("Failed to construct HTTP client: {e}"))
        })?;

        Ok(Self {
            client,
            base_url: base_url.unwrap_or_else(|| DEFAULT_BASE_URL.to_string()),
            api_key,
            default_model,
            default_params,
        })
    }

    /// Create a new Anthropic backend from configuration
    ///
    /// # Errors
    ///
    /// Returns `GeneratorError::Misconfiguration` if:
    /// - The API key environment variable is not set
    /// - No model is configured
    pub fn new_from_config(
        generator: &pagesmith_config::GeneratorConfig,
    ) -> Result<Self, GeneratorError> {
        let api_key_env = generator.api_key_env.as_deref().unwrap_or("ANTHROPIC_API_KEY");

        let api_key = std::env::var(api_key_env).map_err(|_| {
            GeneratorError::Misconfiguration(format!(
                "Anthropic API key not found in environment variable '{api_key_env}'. \
                 Please set this variable or configure a different api_key_env in [generator]."
            ))
        })?;

        let default_model = generator.model.clone().ok_or_else(|| {
            GeneratorError::Misconfiguration(
                "Anthropic model not specified in configuration. \
                 Please set [generator] model = \"model-name\"."
                    .to_string(),
            )
        })?;

        let default_params = HttpParams {
            max_tokens: generator.max_tokens.unwrap_or(8192),
            temperature: generator.temperature.unwrap_or(0.2),
        };

        Self::new(api_key, generator.base_url.clone(), default_model, default_params)
    }

    /// Resolve parameters for this invocation.
    ///
    /// Invocation-level values override backend defaults; unspecified
    /// values fall back to the defaults configured at construction.
    fn resolve_params(&self, inv: &GeneratorInvocation) -> (String, HttpParams) {
        let model = if inv.model.is_empty() {
            self.default_model.clone()
        } else {
            inv.model.clone()
        };

        let params = HttpParams {
            max_tokens: inv.max_tokens.unwrap_or(self.default_params.max_tokens),
            temperature: inv.temperature.unwrap_or(self.default_params.temperature),
        };

        (model, params)
    }

    /// Convert messages to Anthropic Messages API format.
    ///
    /// Anthropic's API uses a `system` field for system prompts and a
    /// `messages` array for user/assistant messages.
    fn convert_messages(messages: &[Message]) -> (Option<String>, Vec<ApiMessage>) {
        let mut system_prompt: Option<String> = None;
        let mut api_messages = Vec::new();

        for msg in messages {
            match msg.role {
                Role::System => {
                    // Concatenate multiple system messages if present
                    if let Some(existing) = system_prompt.as_mut() {
                        existing.push_str("\n\n");
                        existing.push_str(&msg.content);
                    } else {
                        system_prompt = Some(msg.content.clone());
                    }
                }
                Role::User => api_messages.push(ApiMessage {
                    role: "user".to_string(),
                    content: msg.content.clone(),
                }),
                Role::Assistant => api_messages.push(ApiMessage {
                    role: "assistant".to_string(),
                    content: msg.content.clone(),
                }),
            }
        }

        (system_prompt, api_messages)
    }

    fn build_request(&self, inv: &GeneratorInvocation, stream: bool) -> reqwest::RequestBuilder {
        let (model, params) = self.resolve_params(inv);
        let (system, messages) = Self::convert_messages(&inv.messages);

        let body = ApiRequest {
            model,
            messages,
            max_tokens: params.max_tokens,
            temperature: params.temperature,
            system,
            stream: stream.then_some(true),
        };

        self.client
            .post(&self.base_url)
            .header("x-api-key", &self.api_key)
            .header("anthropic-version", ANTHROPIC_VERSION)
            .header("content-type", "application/json")
            .json(&body)
    }

    /// Map a non-success HTTP status to a provider error.
    fn map_status_error(status: reqwest::StatusCode, body: &str) -> GeneratorError {
        let summary = format!("HTTP {status}: {body}");
        if status == reqwest::StatusCode::UNAUTHORIZED || status == reqwest::StatusCode::FORBIDDEN {
            GeneratorError::ProviderAuth(summary)
        } else if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
            GeneratorError::ProviderQuota(summary)
        } else if status.is_server_error() {
            GeneratorError::ProviderOutage(summary)
        } else {
            GeneratorError::Transport(summary)
        }
    }
}

#[async_trait]
impl GeneratorBackend for AnthropicBackend {
    async fn invoke(&self, inv: GeneratorInvocation) -> Result<String, GeneratorError> {
        let (model, params) = self.resolve_params(&inv);
        debug!(
            provider = "anthropic",
            model = %model,
            max_tokens = params.max_tokens,
            temperature = params.temperature,
            "Invoking Anthropic backend"
        );

        let response = self
            .build_request(&inv, false)
            .send()
            .await
            .map_err(|e| GeneratorError::Transport(format!("Anthropic request failed: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(Self::map_status_error(status, &body));
        }

        let response_body: ApiResponse = response.json().await.map_err(|e| {
            GeneratorError::MalformedResponse(format!("Failed to parse Anthropic response: {e}"))
        })?;

        // Concatenate all text blocks
        let content: String = response_body
            .content
            .iter()
            .filter(|block| block.content_type == "text")
            .filter_map(|block| block.text.as_deref())
            .collect();

        if content.is_empty() {
            return Err(GeneratorError::MalformedResponse(
                "Anthropic response missing text content".to_string(),
            ));
        }

        Ok(content)
    }

    async fn invoke_stream(&self, inv: GeneratorInvocation) -> Result<FragmentStream, GeneratorError> {
        let (model, _) = self.resolve_params(&inv);
        debug!(provider = "anthropic", model = %model, "Starting Anthropic stream");

        let response = self
            .build_request(&inv, true)
            .send()
            .await
            .map_err(|e| GeneratorError::Transport(format!("Anthropic request failed: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(Self::map_status_error(status, &body));
        }

        let (tx, rx) = mpsc::unbounded();
        let mut bytes = response.bytes_stream();

        tokio::spawn(async move {
            // SSE events can be split across chunk boundaries; buffer until
            // a full line is available.
            let mut line_buffer = String::new();

            while let Some(chunk) = bytes.next().await {
                let chunk = match chunk {
                    Ok(chunk) => chunk,
                    Err(e) => {
                        let _ = tx.unbounded_send(Err(GeneratorError::Transport(format!(
                            "Anthropic stream aborted: {e}"
                        ))));
                        return;
                    }
                };

                line_buffer.push_str(&String::from_utf8_lossy(&chunk));

                while let Some(newline) = line_buffer.find('\n') {
                    let line: String = line_buffer.drain(..=newline).collect();
                    match parse_sse_line(line.trim_end()) {
                        SseEvent::TextDelta(text) => {
                            if tx.unbounded_send(Ok(text)).is_err() {
                                // Receiver dropped; stop reading.
                                return;
                            }
                        }
                        SseEvent::Error(message) => {
                            let _ = tx.unbounded_send(Err(GeneratorError::ProviderOutage(message)));
                            return;
                        }
                        SseEvent::MessageStop => return,
                        SseEvent::Ignored => {}
                    }
                }
            }
        });

        Ok(rx.boxed())
    }
}

/// One decoded server-sent event from the Anthropic stream.
#[derive(Debug, PartialEq)]
enum SseEvent {
    /// A fragment of generated text
    TextDelta(String),
    /// The provider reported an error mid-stream
    Error(String),
    /// Natural end of the message
    MessageStop,
    /// Anything else: event name lines, pings, metadata events
    Ignored,
}

/// Decode a single SSE line.
///
/// Only `data:` lines carry payloads; `event:` lines and blank separators
/// are ignored. Unknown event types inside a payload are ignored rather
/// than treated as errors so the stream survives protocol additions.
fn parse_sse_line(line: &str) -> SseEvent {
    let Some(data) = line.strip_prefix("data:") else {
        return SseEvent::Ignored;
    };
    let data = data.trim();
    if data.is_empty() {
        return SseEvent::Ignored;
    }

    let Ok(payload) = serde_json::from_str::<StreamPayload>(data) else {
        return SseEvent::Ignored;
    };

    match payload.event_type.as_str() {
        "content_block_delta" => match payload.delta {
            Some(delta) if delta.delta_type == "text_delta" => {
                SseEvent::TextDelta(delta.text.unwrap_or_default())
            }
            _ => SseEvent::Ignored,
        },
        "message_stop" => SseEvent::MessageStop,
        "error" => SseEvent::Error(
            payload
                .error
                .map(|e| e.message)
                .unwrap_or_else(|| "unknown provider error".to_string()),
        ),
        _ => SseEvent::Ignored,
    }
}

/// Anthropic message format for requests
#[derive(Debug, Clone, Serialize)]
struct ApiMessage {
    role: String,
    content: String,
}

/// Anthropic request body
#[derive(Debug, Clone, Serialize)]
struct ApiRequest {
    model: String,
    messages: Vec<ApiMessage>,
    max_tokens: u32,
    temperature: f32,
    #[serde(skip_serializing_if = "Option::is_none")]
    system: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    stream: Option<bool>,
}

/// Anthropic response body (blocking mode)
#[derive(Debug, Clone, Deserialize)]
struct ApiResponse {
    content: Vec<ContentBlock>,
}

/// A single content block in a response
#[derive(Debug, Clone, Deserialize)]
struct ContentBlock {
    #[serde(rename = "type")]
    content_type: String,
    text: Option<String>,
}

/// Streaming event payload
#[derive(Debug, Clone, Deserialize)]
struct StreamPayload {
    #[serde(rename = "type")]
    event_type: String,
    delta: Option<StreamDelta>,
    error: Option<StreamError>,
}

#[derive(Debug, Clone, Deserialize)]
struct StreamDelta {
    #[serde(rename = "type")]
    delta_type: String,
    text: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
struct StreamError {
    message: String,
}
