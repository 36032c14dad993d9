//! pagesmith - prompt-to-webpage generation and deployment pipeline
//!
//! pagesmith turns a live, incrementally produced response from a code
//! generation backend into validated source files on disk, and promotes a
//! generated application into a publicly servable deployment directory.
//!
//! pagesmith can be used in two ways:
//! - **CLI**: the `pagesmith` binary with `generate` and `deploy` commands
//! - **Library**: embed the pipeline via [`GenerationFacade`] and
//!   [`DeploymentPromoter`]
//!
//! # Quick Start (CLI)
//!
//! ```bash
//! # Generate a single-file page for application 42
//! pagesmith generate --app-id 42 --type html "a pomodoro timer"
//!
//! # Watch the generation stream live
//! pagesmith generate --app-id 42 --type multi_file --stream "a todo list"
//!
//! # Promote the generated output and print its public URL
//! pagesmith deploy --app-id 42
//! ```
//!
//! # Quick Start (Library)
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use pagesmith::{AppId, GenerationFacade, GenerationType};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = pagesmith::Config::discover()?;
//! let backend = pagesmith::generator::from_config(&config.generator)?;
//! let facade = GenerationFacade::new(Arc::from(backend), config.paths.output_root.clone());
//!
//! let location = facade
//!     .generate_and_save("a pomodoro timer", GenerationType::Html, AppId::new(42))
//!     .await?;
//! println!("saved to {location}");
//! # Ok(())
//! # }
//! ```
//!
//! # Streaming contract
//!
//! [`GenerationFacade::generate_and_save_stream`] relays fragments to the
//! caller unmodified and persists them only after the stream ends.
//! Persistence failures after full delivery are never surfaced through
//! the stream; observe them with
//! [`GenerationFacade::with_persist_hook`].

pub mod cli;

pub use pagesmith_codegen::{
    AppId, GenerationFacade, GenerationResult, GenerationType, OutputLocation, PersistHook,
    PersistOutcome, parser, saver,
};
pub use pagesmith_config::Config;
pub use pagesmith_deploy::{AppRecord, AppRecordStore, DeploymentPromoter, JsonRecordStore};
pub use pagesmith_generator as generator;
pub use pagesmith_utils::error::PagesmithError;
pub use pagesmith_utils::exit_codes::ExitCode;
