//! NuSMV adapter: model generation, engine invocation, result parsing.
//!
//! The pipeline is sequential and single-shot: render the model file,
//! write it in full, invoke the external engine once, parse its captured
//! output into a [`CheckReport`]. The tool never proves anything itself;
//! it only prepares the engine's input and reconstructs structure from
//! its output.

pub mod engine;
pub mod error;
pub mod model;
pub mod results;

use std::io::Write;
use std::path::Path;

use ltlc_core::{CheckList, ContractSet};

pub use engine::run_engine;
pub use error::SmvError;
pub use model::{render_model, write_model};
pub use results::{
    parse_results, CheckReport, CheckResult, OutputSyntax, Verdict, VerdictMismatch,
};

/// Run the full check pipeline: generate, invoke, parse.
///
/// With `model_path = None` the model is written to a temporary file that
/// lives for the duration of the engine run. Either way the file is
/// flushed and closed before the engine starts.
pub fn check_spec(
    contracts: &ContractSet,
    checks: &CheckList,
    engine_name: &str,
    model_path: Option<&Path>,
) -> Result<CheckReport, SmvError> {
    let output = match model_path {
        Some(path) => {
            model::write_model(path, contracts, checks)?;
            engine::run_engine(engine_name, path)?
        }
        None => {
            let rendered = model::render_model(contracts, checks)?;
            let file = tempfile::Builder::new()
                .suffix(".smv")
                .tempfile()
                .and_then(|mut file| {
                    file.write_all(rendered.as_bytes())?;
                    file.flush()?;
                    Ok(file)
                })
                .map_err(|source| SmvError::Generation {
                    path: std::env::temp_dir().join("ltlc-model.smv"),
                    source,
                })?;
            engine::run_engine(engine_name, file.path())?
        }
    };

    Ok(results::parse_results(
        &output,
        checks,
        &OutputSyntax::default(),
    ))
}
