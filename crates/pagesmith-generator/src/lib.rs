//! Generation backend abstraction for pagesmith
//!
//! This crate models the external code generator as a producer of text:
//! all providers implement the [`GeneratorBackend`] trait, offering a
//! blocking invocation (complete response) and a streaming invocation
//! (lazy sequence of fragments). The pipeline above never sees provider
//! details.

mod anthropic_backend;
pub mod prompts;
mod types;

pub use pagesmith_utils::error::GeneratorError;
pub use types::{FragmentStream, GeneratorBackend, GeneratorInvocation, Message, Role};

pub(crate) use anthropic_backend::AnthropicBackend;

/// Create a generation backend from configuration.
///
/// Routes on `[generator] provider`; when unset, defaults to `anthropic`.
///
/// # Errors
///
/// Returns `GeneratorError::Unsupported` if the provider is unknown, and
/// `GeneratorError::Misconfiguration` if provider-specific configuration
/// is invalid (missing API key or model).
pub fn from_config(
    generator: &pagesmith_config::GeneratorConfig,
) -> Result<Box<dyn GeneratorBackend>, GeneratorError> {
    let provider = generator.provider.as_deref().unwrap_or("anthropic");

    match provider {
        "anthropic" => {
            let backend = AnthropicBackend::new_from_config(generator)?;
            Ok(Box::new(backend))
        }
        unknown => Err(GeneratorError::Unsupported(format!(
            "Unknown generator provider '{unknown}'. Supported providers: anthropic."
        ))),
    }
}
