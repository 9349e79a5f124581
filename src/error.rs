//! Error taxonomy for the differential harness.
//!
//! A digest mismatch is deliberately *not* an error: mismatches are recorded
//! in the run summary and the run completes normally. Every variant here
//! aborts the run, and no summary is printed for an aborted run.

use thiserror::Error;

/// Result type for harness operations.
pub type HarnessResult<T> = Result<T, HarnessError>;

/// Errors that can abort a differential run.
#[derive(Debug, Error)]
pub enum HarnessError {
    /// The interpreter subprocess could not be started, or exited non-zero.
    #[error("tool invocation failed: {0}")]
    ToolInvocation(String),

    /// The subject's output could not be reduced to a single hex literal.
    #[error("unparseable subject output: {0}")]
    Parse(String),

    /// An input was not representable in the expected ASCII encoding.
    #[error("input not representable as ASCII: {0}")]
    Encoding(String),
}
