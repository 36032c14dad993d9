use std::path::PathBuf;
use thiserror::Error;

/// Library-level error type returned by pagesmith operations.
///
/// `PagesmithError` aggregates the per-concern error enums so that callers
/// who do not care which stage failed can hold a single type. The CLI maps
/// it to process exit codes via
/// [`to_exit_code()`](crate::exit_codes::to_exit_code).
///
/// # Error Categories
///
/// | Category | Description |
/// |----------|-------------|
/// | `Config` | Configuration file or discovery errors |
/// | `Generator` | Generation backend (transport, auth, misconfiguration) |
/// | `Codegen` | Routing, parse, validation, or save failures |
/// | `Deploy` | Deployment promotion failures |
/// | `Io` | Uncategorized filesystem errors |
#[derive(Error, Debug)]
pub enum PagesmithError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Generator error: {0}")]
    Generator(#[from] GeneratorError),

    #[error("Code generation error: {0}")]
    Codegen(#[from] CodegenError),

    #[error("Deployment error: {0}")]
    Deploy(#[from] DeployError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Configuration loading and validation errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// The explicitly requested config file does not exist
    #[error("Config file not found: {path}")]
    NotFound { path: PathBuf },

    /// The config file could not be read
    #[error("Failed to read config file {path}: {reason}")]
    Unreadable { path: PathBuf, reason: String },

    /// The config file is not valid TOML or violates the schema
    #[error("Invalid config file {path}: {reason}")]
    Invalid { path: PathBuf, reason: String },
}

/// Errors from the external generation backend boundary.
///
/// These cover everything that can go wrong before or while the backend
/// produces text. Failures of the pipeline that runs *after* text has been
/// produced are [`CodegenError`]s, not generator errors.
#[derive(Error, Debug)]
pub enum GeneratorError {
    /// Transport-level failure (HTTP connectivity, connection reset)
    #[error("Transport error: {0}")]
    Transport(String),

    /// Provider authentication failure (401, 403, missing API key)
    #[error("Provider authentication error: {0}")]
    ProviderAuth(String),

    /// Provider quota/rate limit exceeded (429)
    #[error("Provider quota exceeded: {0}")]
    ProviderQuota(String),

    /// Provider service outage (5xx errors)
    #[error("Provider outage: {0}")]
    ProviderOutage(String),

    /// The response body or event stream could not be decoded
    #[error("Malformed provider response: {0}")]
    MalformedResponse(String),

    /// Configuration error (missing API key, missing model)
    #[error("Misconfiguration: {0}")]
    Misconfiguration(String),

    /// Unsupported provider
    #[error("Unsupported: {0}")]
    Unsupported(String),
}

/// Errors from the parse → validate → save pipeline.
#[derive(Error, Debug)]
pub enum CodegenError {
    /// Routing error: the caller asked for a generation type the registry
    /// does not know. Raised before the generator is invoked.
    #[error("Unsupported generation type: {tag}")]
    UnsupportedType { tag: String },

    #[error("Parse error: {0}")]
    Parse(#[from] ParseError),

    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    #[error("Save error: {0}")]
    Save(#[from] SaveError),

    #[error("Generator error: {0}")]
    Generator(#[from] GeneratorError),
}

/// Structural failures while turning raw generator output into a
/// `GenerationResult`.
#[derive(Error, Debug)]
pub enum ParseError {
    /// The multi-file payload is not valid JSON
    #[error("Malformed JSON manifest: {reason}")]
    MalformedJson { reason: String },

    /// The multi-file payload has no `files` array (missing or wrong type)
    #[error("Manifest is missing a `files` array")]
    MissingFilesArray,
}

/// A parsed result failed shape-specific validation before any file was
/// written.
#[derive(Error, Debug)]
pub enum ValidationError {
    /// `markup` is blank; required for every shape
    #[error("Generated markup is empty for type '{type_tag}'")]
    EmptyMarkup { type_tag: &'static str },
}

/// Filesystem failures while materializing a result as files.
#[derive(Error, Debug)]
pub enum SaveError {
    #[error("Failed to create output directory {dir}: {source}")]
    CreateDir {
        dir: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to write {path}: {source}")]
    WriteFile {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

/// Failures during deployment promotion.
#[derive(Error, Debug)]
pub enum DeployError {
    /// The application record could not be loaded
    #[error("Application {app_id} not found")]
    AppNotFound { app_id: u64 },

    /// Promotion was attempted before any code was generated
    #[error("Generated output not found at {path}; generate code before deploying")]
    SourceNotFound { path: String },

    /// The recursive copy into the deploy root failed
    #[error("Deployment copy to {dest} failed: {reason}")]
    CopyFailed { dest: String, reason: String },

    /// The record update after a successful copy failed
    #[error("Failed to record deployment for application {app_id}: {reason}")]
    RecordUpdate { app_id: u64, reason: String },

    /// The backing record store could not be read or written
    #[error("Record store error: {0}")]
    Store(String),
}
