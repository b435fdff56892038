//! Reconstruction of per-check verdicts from the engine's text output.
//!
//! The engine emits free-form text; the only structure is a verdict line
//! per obligation and an optional counterexample block after it. The
//! scanner below rebuilds `(check, verdict, trace)` triples from that
//! stream, relying on the positional contract between the emitted
//! obligation list and the verdict stream.
//!
//! All literal phrases the engine is matched against live in
//! [`OutputSyntax`], so an engine upgrade that changes wording touches
//! only the defaults here, never the verdict or trace logic.

use serde::{Deserialize, Serialize};
use tracing::warn;

use ltlc_core::{Check, CheckList};

/// The literal phrases of the engine's output format.
#[derive(Debug, Clone)]
pub struct OutputSyntax {
    /// Prefix of a verdict line.
    pub verdict_prefix: String,
    /// Phrase meaning the engine refuted the (negated) obligation, so the
    /// desired property holds.
    pub holds_phrase: String,
    /// Phrase meaning the negated obligation is true, so the desired
    /// property is violated.
    pub violated_phrase: String,
    /// Exact line that opens a counterexample block. The trailing space
    /// matches the engine's actual output.
    pub trace_marker: String,
    /// Line prefixes dropped before scanning (banners, warnings).
    pub banner_prefixes: Vec<String>,
}

impl Default for OutputSyntax {
    fn default() -> Self {
        Self {
            verdict_prefix: "-- specification".to_string(),
            holds_phrase: "is false".to_string(),
            violated_phrase: "is true".to_string(),
            trace_marker: "Trace Type: Counterexample ".to_string(),
            banner_prefixes: vec!["***".to_string(), "WARNING".to_string()],
        }
    }
}

/// Outcome of a single check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Verdict {
    /// The desired property holds.
    Holds,
    /// The engine found the desired property violated.
    Violated,
}

impl std::fmt::Display for Verdict {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Verdict::Holds => f.write_str("holds"),
            Verdict::Violated => f.write_str("violated"),
        }
    }
}

/// One check with its verdict and counterexample trace.
///
/// An empty trace means the engine proved the property without producing
/// a counterexample.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CheckResult {
    pub check: Check,
    pub verdict: Verdict,
    pub trace: Vec<String>,
}

/// The engine reported a different number of verdicts than checks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct VerdictMismatch {
    pub expected: usize,
    pub found: usize,
}

/// Ordered results, one entry per check in CheckList order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CheckReport {
    pub results: Vec<CheckResult>,
    /// Present when the verdict count did not match the check count.
    /// Surfaced as a warning rather than silently truncating output.
    pub mismatch: Option<VerdictMismatch>,
}

impl CheckReport {
    /// True when every check got a verdict and every verdict is `Holds`.
    pub fn all_hold(&self) -> bool {
        self.mismatch.is_none()
            && self
                .results
                .iter()
                .all(|result| result.verdict == Verdict::Holds)
    }
}

/// Scanner state: outside or inside a counterexample block.
enum State {
    Scanning,
    InTrace,
}

/// Parse the engine's output and align it with the check list.
///
/// Verdict lines advance a result index; a trace block opened by the
/// marker accumulates every following line and is sealed under the
/// verdict that preceded it when the next verdict line arrives, or at end
/// of input.
pub fn parse_results(output: &str, checks: &CheckList, syntax: &OutputSyntax) -> CheckReport {
    let mut verdicts: Vec<Verdict> = Vec::new();
    let mut traces: Vec<Vec<String>> = Vec::new();
    let mut buffer: Vec<String> = Vec::new();
    let mut state = State::Scanning;

    let lines = output.lines().filter(|line| {
        !line.is_empty()
            && !syntax
                .banner_prefixes
                .iter()
                .any(|prefix| line.starts_with(prefix.as_str()))
    });

    for line in lines {
        if line.starts_with(syntax.verdict_prefix.as_str()) {
            if let State::InTrace = state {
                state = State::Scanning;
                if let Some(previous) = traces.last_mut() {
                    *previous = std::mem::take(&mut buffer);
                }
            }
            if line.contains(syntax.holds_phrase.as_str()) {
                verdicts.push(Verdict::Holds);
                traces.push(Vec::new());
            } else if line.contains(syntax.violated_phrase.as_str()) {
                verdicts.push(Verdict::Violated);
                traces.push(Vec::new());
            }
            continue;
        }

        if let State::InTrace = state {
            buffer.push(line.to_string());
        }
        if line == syntax.trace_marker {
            state = State::InTrace;
        }
    }

    // End of input with an open block: seal it under the last verdict.
    if let State::InTrace = state {
        if let Some(previous) = traces.last_mut() {
            *previous = buffer;
        }
    }

    let mismatch = if verdicts.len() != checks.len() {
        warn!(
            expected = checks.len(),
            found = verdicts.len(),
            "verdict count does not match check list"
        );
        Some(VerdictMismatch {
            expected: checks.len(),
            found: verdicts.len(),
        })
    } else {
        None
    };

    let results = checks
        .iter()
        .zip(verdicts.into_iter().zip(traces))
        .map(|(check, (verdict, trace))| CheckResult {
            check: check.clone(),
            verdict,
            trace,
        })
        .collect();

    CheckReport { results, mismatch }
}
