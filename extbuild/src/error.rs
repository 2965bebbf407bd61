//! Typed failure taxonomy for build runs.
//!
//! Every variant is terminal: nothing is retried or recovered. The run
//! aborts and the process exits with the code from [`crate::exit_codes`].

use thiserror::Error;

use crate::exit_codes;

#[derive(Debug, Error)]
pub enum BuildError {
    /// The configure tool could not be invoked at all.
    #[error("cmake must be installed to build extension modules ({0})")]
    ToolchainMissing(String),

    /// Windows-only minimum version gate.
    #[error("cmake >= {minimum} is required on Windows, found {found}")]
    ToolchainTooOld { found: String, minimum: String },

    /// Configure subprocess exited nonzero. Its diagnostics were already
    /// passed through on inherited stdio.
    #[error("cmake configure failed with exit code {code}")]
    ConfigureFailed { code: i32 },

    /// Build subprocess exited nonzero.
    #[error("cmake build failed with exit code {code}")]
    BuildFailed { code: i32 },
}

impl BuildError {
    /// Stable process exit code for this failure.
    pub fn exit_code(&self) -> i32 {
        match self {
            BuildError::ToolchainMissing(_) | BuildError::ToolchainTooOld { .. } => {
                exit_codes::TOOLCHAIN
            }
            BuildError::ConfigureFailed { .. } => exit_codes::CONFIGURE,
            BuildError::BuildFailed { .. } => exit_codes::BUILD,
        }
    }
}
