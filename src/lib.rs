//! Differential fuzz harness for a Cryptol MD5 specification.
//!
//! Feeds randomized inputs of increasing length to two MD5 implementations
//! and compares their digests byte-for-byte:
//!
//! - the **oracle**: RustCrypto's `md-5`, trusted ground truth;
//! - the **subject**: an `md5.cry` module evaluated by the `cryptol`
//!   interpreter in a subprocess.
//!
//! Both sides are normalized to `0x`-prefixed lowercase hex so comparison is
//! plain string equality. Mismatches are recorded and reported at the end of
//! the run; they never abort it. Runner failures (interpreter missing,
//! non-zero exit, unparseable output) abort the run immediately.
//!
//! # Architecture
//!
//! - [`input`] - random alphanumeric input generation
//! - [`runner`] - the [`DigestRunner`] seam and both implementations
//! - [`harness`] - the comparison loop and run summary
//! - [`error`] - error taxonomy

// Library code must avoid unwrap/expect/panic; errors propagate to the CLI.
// Tests are checked separately with `cargo test`.
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]
#![warn(missing_docs)]

pub mod error;
pub mod harness;
pub mod input;
pub mod runner;

// Re-export commonly used types
pub use error::{HarnessError, HarnessResult};
pub use harness::{DiffHarness, DiffOutcome, FailureRecord, RunSummary};
pub use input::{random_input, ALPHABET};
pub use runner::{CryptolRunner, DigestRunner, Md5Oracle};
