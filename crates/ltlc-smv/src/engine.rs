//! External model checker invocation.
//!
//! One blocking subprocess call per run: the engine executable is invoked
//! with the model file path as its sole argument and its standard output
//! is captured as text. There is no timeout and no retry; a launch
//! failure or non-zero exit aborts the whole run.

use std::path::Path;
use std::process::Command;

use tracing::debug;

use crate::error::SmvError;

/// Run the engine over a model file and return its captured stdout.
pub fn run_engine(engine: &str, model: &Path) -> Result<String, SmvError> {
    debug!(engine, model = %model.display(), "invoking model checker");

    let output = Command::new(engine)
        .arg(model)
        .output()
        .map_err(|source| SmvError::EngineLaunch {
            engine: engine.to_string(),
            source,
        })?;

    if !output.status.success() {
        let mut combined = String::from_utf8_lossy(&output.stdout).into_owned();
        combined.push_str(&String::from_utf8_lossy(&output.stderr));
        return Err(SmvError::EngineFailed {
            engine: engine.to_string(),
            status: output.status,
            output: combined,
        });
    }

    Ok(String::from_utf8_lossy(&output.stdout).into_owned())
}
