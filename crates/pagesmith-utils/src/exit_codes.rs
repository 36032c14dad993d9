//! Exit code constants and error mapping for the pagesmith CLI.
//!
//! # Exit Code Table
//!
//! | Code | Constant | Description |
//! |------|----------|-------------|
//! | 0 | `SUCCESS` | Operation completed successfully |
//! | 1 | `INTERNAL` | General/internal failure |
//! | 2 | `CLI_ARGS` | Invalid CLI arguments or configuration |
//! | 3 | `UNSUPPORTED_TYPE` | Unknown generation type tag |
//! | 4 | `PARSE_FAILURE` | Generator output could not be parsed |
//! | 5 | `VALIDATION_FAILURE` | Parsed result failed validation |
//! | 6 | `DEPLOY_FAILURE` | Deployment promotion failed |
//! | 70 | `GENERATOR_FAILURE` | Generation backend invocation failed |

use crate::error::{CodegenError, PagesmithError};

/// Exit codes matching the documented exit code table.
///
/// The numeric values are part of the public CLI contract. Library code
/// returns [`PagesmithError`] and never calls `std::process::exit()`;
/// only `main` maps an exit code to a process exit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExitCode(i32);

impl ExitCode {
    /// Success - operation completed successfully
    pub const SUCCESS: ExitCode = ExitCode(0);

    /// General/internal failure
    pub const INTERNAL: ExitCode = ExitCode(1);

    /// CLI arguments error - invalid or missing arguments or configuration
    pub const CLI_ARGS: ExitCode = ExitCode(2);

    /// Unknown generation type tag (routing error)
    pub const UNSUPPORTED_TYPE: ExitCode = ExitCode(3);

    /// Generator output could not be parsed into a structured result
    pub const PARSE_FAILURE: ExitCode = ExitCode(4);

    /// Parsed result failed shape validation
    pub const VALIDATION_FAILURE: ExitCode = ExitCode(5);

    /// Deployment promotion failed
    pub const DEPLOY_FAILURE: ExitCode = ExitCode(6);

    /// Generation backend invocation failed
    pub const GENERATOR_FAILURE: ExitCode = ExitCode(70);

    /// Get the numeric value for `std::process::exit()`
    #[must_use]
    pub const fn as_i32(self) -> i32 {
        self.0
    }
}

/// Map a library error to its CLI exit code.
#[must_use]
pub fn to_exit_code(err: &PagesmithError) -> ExitCode {
    match err {
        PagesmithError::Config(_) => ExitCode::CLI_ARGS,
        PagesmithError::Generator(_) => ExitCode::GENERATOR_FAILURE,
        PagesmithError::Codegen(codegen) => match codegen {
            CodegenError::UnsupportedType { .. } => ExitCode::UNSUPPORTED_TYPE,
            CodegenError::Parse(_) => ExitCode::PARSE_FAILURE,
            CodegenError::Validation(_) => ExitCode::VALIDATION_FAILURE,
            CodegenError::Save(_) => ExitCode::INTERNAL,
            CodegenError::Generator(_) => ExitCode::GENERATOR_FAILURE,
        },
        PagesmithError::Deploy(_) => ExitCode::DEPLOY_FAILURE,
        PagesmithError::Io(_) => ExitCode::INTERNAL,
    }
}
