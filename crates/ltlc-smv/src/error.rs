//! Errors from the NuSMV adapter.
//!
//! Everything here is fatal for the run: the tool performs exactly one
//! attempt, so nothing is retried. Engine errors carry the external
//! command's captured output verbatim for diagnosis.

use std::path::PathBuf;
use std::process::ExitStatus;

use ltlc_core::AlgebraError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SmvError {
    /// Building an obligation formula failed.
    #[error(transparent)]
    Algebra(#[from] AlgebraError),

    /// I/O failure while emitting the model file.
    #[error("failed to write model file '{path}': {source}")]
    Generation {
        path: PathBuf,
        source: std::io::Error,
    },

    /// The external engine could not be launched at all.
    #[error("failed to launch model checker '{engine}': {source}")]
    EngineLaunch {
        engine: String,
        source: std::io::Error,
    },

    /// The external engine ran but exited with a non-zero status.
    #[error("model checker '{engine}' exited with {status}\n{output}")]
    EngineFailed {
        engine: String,
        status: ExitStatus,
        output: String,
    },
}
