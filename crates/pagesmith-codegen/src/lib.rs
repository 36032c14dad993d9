//! Generation pipeline core for pagesmith
//!
//! Turns raw generator output into validated files on disk:
//!
//! - [`GenerationType`] — closed registry of output shapes
//! - [`parser::parse`] — raw text → [`GenerationResult`], per shape
//! - [`saver::save`] — [`GenerationResult`] → [`OutputLocation`] on disk
//! - [`GenerationFacade`] — blocking and streaming entry points
//!
//! Streaming mode relays fragments unmodified and persists after the
//! stream ends; see [`GenerationFacade::generate_and_save_stream`] for the
//! delivery contract.

mod facade;
mod gen_type;
pub mod parser;
mod result;
pub mod saver;
mod types;

pub use facade::{GenerationFacade, PersistHook, PersistOutcome};
pub use gen_type::GenerationType;
pub use pagesmith_utils::error::{CodegenError, ParseError, SaveError, ValidationError};
pub use result::GenerationResult;
pub use types::{AppId, OutputLocation};
