//! Differential comparison loop and run reporting.

use crate::error::HarnessResult;
use crate::input::random_input;
use crate::runner::DigestRunner;
use rand::Rng;
use serde::Serialize;
use std::fmt::Write as _;

/// A single recorded mismatch.
#[derive(Debug, Clone, Serialize)]
pub struct FailureRecord {
    /// The generated input both runners hashed.
    pub input: String,
    /// Digest from the trusted oracle.
    pub oracle: String,
    /// Digest from the subject under test.
    pub subject: String,
}

/// Accumulated results of one differential run.
#[derive(Debug, Default, Serialize)]
pub struct RunSummary {
    /// Number of inputs on which both digests matched.
    pub passed: usize,
    /// Number of inputs on which the digests differed.
    pub failed: usize,
    /// Every mismatch, in the order recorded.
    pub failures: Vec<FailureRecord>,
}

impl RunSummary {
    /// Create a new empty summary.
    pub fn new() -> Self {
        Self::default()
    }

    fn record_pass(&mut self) {
        self.passed += 1;
    }

    fn record_fail(&mut self, input: &str, oracle: String, subject: String) {
        self.failed += 1;
        self.failures.push(FailureRecord {
            input: input.to_string(),
            oracle,
            subject,
        });
    }

    /// Get total number of comparisons performed.
    pub fn total(&self) -> usize {
        self.passed + self.failed
    }

    /// Returns true if no mismatch was recorded.
    pub fn all_passed(&self) -> bool {
        self.failed == 0
    }

    /// Format the one-line totals.
    pub fn summary(&self) -> String {
        format!("PASSED: {}, FAILED: {}", self.passed, self.failed)
    }

    /// Format the final report: totals first, then every failure in the
    /// order recorded.
    pub fn report(&self) -> String {
        let mut out = format!("\n{}\n", self.summary());
        for f in &self.failures {
            let _ = writeln!(
                out,
                "input: {:?}, oracle: {}, subject: {}",
                f.input, f.oracle, f.subject
            );
        }
        out
    }
}

/// Outcome of comparing both runners on one input.
#[derive(Debug)]
pub enum DiffOutcome {
    /// Both implementations produced the same digest.
    Match {
        /// The matching digest.
        value: String,
    },
    /// The digests differ.
    Mismatch {
        /// Oracle digest.
        oracle: String,
        /// Subject digest.
        subject: String,
    },
}

impl DiffOutcome {
    /// Check if the outcome is a match.
    pub fn is_match(&self) -> bool {
        matches!(self, Self::Match { .. })
    }
}

/// Drives the oracle and the subject over the same inputs and accumulates
/// the run summary.
pub struct DiffHarness<O, S> {
    oracle: O,
    subject: S,
}

impl<O: DigestRunner, S: DigestRunner> DiffHarness<O, S> {
    /// Create a harness over a trusted oracle and a subject under test.
    pub fn new(oracle: O, subject: S) -> Self {
        Self { oracle, subject }
    }

    /// Compare both runners on one input.
    ///
    /// A runner error propagates; differing digests are an outcome, not an
    /// error.
    pub fn compare(&self, input: &str) -> HarnessResult<DiffOutcome> {
        let oracle = self.oracle.digest(input)?;
        let subject = self.subject.digest(input)?;
        if oracle == subject {
            Ok(DiffOutcome::Match { value: oracle })
        } else {
            Ok(DiffOutcome::Mismatch { oracle, subject })
        }
    }

    /// Run one comparison per length in `0..max_len` and accumulate the
    /// summary, printing a progress line per iteration.
    ///
    /// Inputs of exactly `len` characters are drawn from `rng`. Any runner
    /// error aborts the run immediately; no partial summary survives.
    pub fn run<R: Rng>(&self, rng: &mut R, max_len: usize) -> HarnessResult<RunSummary> {
        let mut summary = RunSummary::new();

        for len in 0..max_len {
            let input = random_input(rng, len);
            println!("count: {}/{}, input: {}", len + 1, max_len, input);

            match self.compare(&input)? {
                DiffOutcome::Match { value } => {
                    println!(
                        "PASS: {}: {}, {}: {}",
                        self.oracle.name(),
                        value,
                        self.subject.name(),
                        value
                    );
                    summary.record_pass();
                }
                DiffOutcome::Mismatch { oracle, subject } => {
                    println!(
                        "FAIL: {}: {}, {}: {}",
                        self.oracle.name(),
                        oracle,
                        self.subject.name(),
                        subject
                    );
                    summary.record_fail(&input, oracle, subject);
                }
            }
        }

        Ok(summary)
    }
}
