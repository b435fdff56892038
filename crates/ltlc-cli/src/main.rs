//! LTL contract checker CLI.
//!
//! Provides the `ltlc` binary. `ltlc check` runs the full pipeline --
//! parse the specification, generate the model file, invoke the external
//! model checker, and report per-check verdicts with counterexample
//! traces. `ltlc gen` stops after writing the model file, for inspecting
//! the generated obligations or feeding the engine by hand.

use std::path::PathBuf;
use std::process;

use clap::{Parser as ClapParser, Subcommand};
use tracing::Level;

use ltlc_parser::Parser;
use ltlc_smv::{check_spec, write_model, CheckReport, SmvError};

/// LTL assume/guarantee contract checker.
#[derive(ClapParser)]
#[command(name = "ltlc", about = "LTL assume/guarantee contract checker")]
struct Cli {
    /// Increase log verbosity (-v = info, -vv = debug).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

/// Available subcommands.
#[derive(Subcommand)]
enum Commands {
    /// Parse a specification, run the model checker, report verdicts.
    Check {
        /// Path to the contract specification file.
        spec: PathBuf,

        /// Where to write the generated model file (default: a temporary
        /// file that lives for the duration of the engine run).
        #[arg(short, long)]
        model: Option<PathBuf>,

        /// Model checker executable to invoke.
        #[arg(short, long, default_value = "NuSMV")]
        engine: String,

        /// Print the report as JSON.
        #[arg(long)]
        json: bool,
    },

    /// Parse a specification and write the model file without checking.
    Gen {
        /// Path to the contract specification file.
        spec: PathBuf,

        /// Where to write the generated model file.
        #[arg(short, long)]
        model: PathBuf,
    },
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let exit_code = match cli.command {
        Commands::Check {
            spec,
            model,
            engine,
            json,
        } => run_check(&spec, model.as_deref(), &engine, json),
        Commands::Gen { spec, model } => run_gen(&spec, &model),
    };
    process::exit(exit_code);
}

fn init_tracing(verbosity: u8) {
    let level = match verbosity {
        0 => Level::WARN,
        1 => Level::INFO,
        _ => Level::DEBUG,
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();
}

/// Execute the check subcommand.
///
/// Returns exit code: 0 = every check holds, 1 = a check failed or the
/// engine returned fewer verdicts than checks, 2 = specification error,
/// 3 = generation or engine error.
fn run_check(
    spec_path: &std::path::Path,
    model: Option<&std::path::Path>,
    engine: &str,
    json: bool,
) -> i32 {
    let input = match std::fs::read_to_string(spec_path) {
        Ok(text) => text,
        Err(e) => {
            eprintln!(
                "Error: failed to read specification '{}': {}",
                spec_path.display(),
                e
            );
            return 3;
        }
    };

    let spec = match Parser::default().parse(&input) {
        Ok(spec) => spec,
        Err(e) => {
            eprintln!("Error: {}", e);
            return 2;
        }
    };

    let report = match check_spec(&spec.contracts, &spec.checks, engine, model) {
        Ok(report) => report,
        Err(e @ SmvError::Algebra(_)) => {
            eprintln!("Error: {}", e);
            return 2;
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            return 3;
        }
    };

    if json {
        match serde_json::to_string_pretty(&report) {
            Ok(rendered) => println!("{}", rendered),
            Err(e) => {
                eprintln!("Error: failed to serialize report: {}", e);
                return 3;
            }
        }
    } else {
        print_report(&report);
    }

    if report.all_hold() {
        0
    } else {
        1
    }
}

/// Execute the gen subcommand. Exit codes as for `run_check`, minus the
/// engine stages.
fn run_gen(spec_path: &std::path::Path, model: &std::path::Path) -> i32 {
    let input = match std::fs::read_to_string(spec_path) {
        Ok(text) => text,
        Err(e) => {
            eprintln!(
                "Error: failed to read specification '{}': {}",
                spec_path.display(),
                e
            );
            return 3;
        }
    };

    let spec = match Parser::default().parse(&input) {
        Ok(spec) => spec,
        Err(e) => {
            eprintln!("Error: {}", e);
            return 2;
        }
    };

    match write_model(model, &spec.contracts, &spec.checks) {
        Ok(()) => {
            println!("wrote {}", model.display());
            0
        }
        Err(e @ SmvError::Algebra(_)) => {
            eprintln!("Error: {}", e);
            2
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            3
        }
    }
}

/// Print the human-readable report: one line per check, counterexample
/// traces indented beneath the checks that have one.
fn print_report(report: &CheckReport) {
    for result in &report.results {
        println!("{}: {}", result.check, result.verdict);
        if !result.trace.is_empty() {
            println!("  counterexample:");
            for line in &result.trace {
                println!("    {}", line);
            }
        }
    }
    if let Some(mismatch) = &report.mismatch {
        eprintln!(
            "warning: engine reported {} verdict(s) for {} check(s)",
            mismatch.found, mismatch.expected
        );
    }
}
