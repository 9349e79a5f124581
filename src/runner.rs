//! Digest runners for differential testing.
//!
//! Holds the [`DigestRunner`] seam plus both sides of the comparison: the
//! in-process [`Md5Oracle`] reference and the [`CryptolRunner`] subprocess
//! backend that evaluates the MD5 specification under test.

use crate::error::{HarnessError, HarnessResult};
use md5::{Digest, Md5};
use std::path::PathBuf;
use std::process::Command;

/// Predicate deciding whether a stdout line is benign interpreter noise
/// that should be dropped before parsing.
pub type NoiseFilter = Box<dyn Fn(&str) -> bool + Send + Sync>;

/// Trait for digest computations that can be differentially compared.
///
/// Both implementations must normalize to the same textual convention:
/// `0x` followed by lowercase hex, 32 digits for a 128-bit digest.
pub trait DigestRunner {
    /// Compute the digest of `input`.
    fn digest(&self, input: &str) -> HarnessResult<String>;

    /// Get the runner name for reporting.
    fn name(&self) -> &str;
}

/// Trusted reference implementation backed by RustCrypto's `md-5`.
pub struct Md5Oracle;

impl Md5Oracle {
    /// Create a new oracle.
    pub fn new() -> Self {
        Self
    }
}

impl Default for Md5Oracle {
    fn default() -> Self {
        Self::new()
    }
}

impl DigestRunner for Md5Oracle {
    fn digest(&self, input: &str) -> HarnessResult<String> {
        // Inputs drawn from the fixed alphabet are always ASCII; anything
        // else cannot be encoded the way the subject encodes it.
        if !input.is_ascii() {
            return Err(HarnessError::Encoding(format!(
                "oracle input contains non-ASCII characters: {:?}",
                input
            )));
        }
        Ok(format!("0x{}", hex::encode(Md5::digest(input.as_bytes()))))
    }

    fn name(&self) -> &str {
        "md5"
    }
}

/// Subject under test: an MD5 specification evaluated by the Cryptol
/// interpreter in a subprocess.
///
/// Each [`digest`](DigestRunner::digest) call loads the module, switches the
/// interpreter to ASCII rendering, suppresses numeric-defaulting warnings and
/// evaluates `md5 (join "<input>")`, then reduces the captured stdout to a
/// single hex literal.
pub struct CryptolRunner {
    /// Interpreter executable.
    program: PathBuf,
    /// Cryptol module implementing `md5`.
    module: PathBuf,
    /// Lines matching this predicate are dropped before parsing.
    noise_filter: NoiseFilter,
}

impl CryptolRunner {
    /// Create a runner using the `cryptol` executable on `PATH` and the
    /// `md5.cry` module in the working directory.
    pub fn new() -> Self {
        Self::with_paths("cryptol", "md5.cry")
    }

    /// Create a runner for a specific interpreter executable and module.
    pub fn with_paths(program: impl Into<PathBuf>, module: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
            module: module.into(),
            noise_filter: Box::new(|line| line.starts_with("Loading module")),
        }
    }

    /// Replace the noise filter.
    ///
    /// The default drops Cryptol's `Loading module ...` banner lines; an
    /// interpreter with different diagnostics needs a different predicate.
    pub fn with_noise_filter(
        mut self,
        filter: impl Fn(&str) -> bool + Send + Sync + 'static,
    ) -> Self {
        self.noise_filter = Box::new(filter);
        self
    }

    /// Build the expression the interpreter evaluates for `input`.
    ///
    /// The input is embedded literally inside a quoted sequence literal;
    /// the fixed alphabet guarantees no escaping is needed.
    fn expression(&self, input: &str) -> String {
        format!("md5 (join \"{}\")", input)
    }

    /// Reduce captured stdout to the digest literal.
    ///
    /// Noise lines are dropped and the remaining lines concatenated. The
    /// remnant must be a `0x`-prefixed hex literal; its width is deliberately
    /// not checked, so a well-formed digest of the wrong size surfaces as a
    /// recorded mismatch rather than a parse failure.
    fn parse_output(&self, stdout: &str) -> HarnessResult<String> {
        let digest: String = stdout
            .lines()
            .filter(|line| !(self.noise_filter)(line))
            .collect();

        if digest.is_empty() {
            return Err(HarnessError::Parse(
                "no output left after noise filtering".to_string(),
            ));
        }
        if !digest.is_ascii() {
            return Err(HarnessError::Parse(format!(
                "output is not ASCII: {:?}",
                digest
            )));
        }
        match digest.strip_prefix("0x") {
            Some(rest) if !rest.is_empty() && rest.bytes().all(|b| b.is_ascii_hexdigit()) => {
                Ok(digest)
            }
            _ => Err(HarnessError::Parse(format!(
                "expected a 0x-prefixed hex literal, got: {:?}",
                digest
            ))),
        }
    }
}

impl Default for CryptolRunner {
    fn default() -> Self {
        Self::new()
    }
}

impl DigestRunner for CryptolRunner {
    fn digest(&self, input: &str) -> HarnessResult<String> {
        let load = format!(":l {}", self.module.display());
        let output = Command::new(&self.program)
            .arg("-e")
            .args(["-c", &load])
            .args(["-c", ":set ascii=on"])
            .args(["-c", ":set warnDefaulting=off"])
            .args(["-c", &self.expression(input)])
            .output()
            .map_err(|e| {
                HarnessError::ToolInvocation(format!(
                    "failed to run {}: {}",
                    self.program.display(),
                    e
                ))
            })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(HarnessError::ToolInvocation(format!(
                "{} exited with {}: {}",
                self.program.display(),
                output.status,
                stderr.trim()
            )));
        }

        self.parse_output(&String::from_utf8_lossy(&output.stdout))
    }

    fn name(&self) -> &str {
        "cryptol"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_oracle_empty_input() {
        // RFC 1321: MD5("") = d41d8cd98f00b204e9800998ecf8427e
        let oracle = Md5Oracle::new();
        assert_eq!(
            oracle.digest("").unwrap(),
            "0xd41d8cd98f00b204e9800998ecf8427e"
        );
    }

    #[test]
    fn test_oracle_known_vectors() {
        let oracle = Md5Oracle::new();
        assert_eq!(
            oracle.digest("a").unwrap(),
            "0x0cc175b9c0f1b6a831c399e269772661"
        );
        assert_eq!(
            oracle.digest("abc").unwrap(),
            "0x900150983cd24fb0d6963f7d28e17f72"
        );
    }

    #[test]
    fn test_oracle_is_idempotent() {
        let oracle = Md5Oracle::new();
        let first = oracle.digest("Xy9").unwrap();
        let second = oracle.digest("Xy9").unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_oracle_digest_shape() {
        let oracle = Md5Oracle::new();
        let digest = oracle.digest("hello").unwrap();
        let hex_part = digest.strip_prefix("0x").unwrap();
        assert_eq!(hex_part.len(), 32);
        assert!(hex_part
            .bytes()
            .all(|b| b.is_ascii_digit() || (b'a'..=b'f').contains(&b)));
    }

    #[test]
    fn test_oracle_rejects_non_ascii() {
        let oracle = Md5Oracle::new();
        let err = oracle.digest("héllo").unwrap_err();
        assert!(matches!(err, HarnessError::Encoding(_)));
    }

    #[test]
    fn test_expression_embeds_input() {
        let runner = CryptolRunner::new();
        assert_eq!(runner.expression("abc"), "md5 (join \"abc\")");
        assert_eq!(runner.expression(""), "md5 (join \"\")");
    }

    #[test]
    fn test_parse_output_drops_noise_lines() {
        let runner = CryptolRunner::new();
        let stdout = "Loading module Cryptol\nLoading module Main\n0xd41d8cd98f00b204e9800998ecf8427e\n";
        assert_eq!(
            runner.parse_output(stdout).unwrap(),
            "0xd41d8cd98f00b204e9800998ecf8427e"
        );
    }

    #[test]
    fn test_parse_output_empty_after_filtering() {
        let runner = CryptolRunner::new();
        let err = runner.parse_output("Loading module Cryptol\n").unwrap_err();
        assert!(matches!(err, HarnessError::Parse(_)));
    }

    #[test]
    fn test_parse_output_rejects_non_hex() {
        let runner = CryptolRunner::new();
        for garbage in ["parse error at line 1", "0x", "0xZZZZ", "d41d8cd9"] {
            let err = runner.parse_output(garbage).unwrap_err();
            assert!(matches!(err, HarnessError::Parse(_)), "accepted: {}", garbage);
        }
    }

    #[test]
    fn test_parse_output_keeps_wrong_width() {
        // A short-but-valid literal must survive parsing so the comparator
        // can report it as a mismatch.
        let runner = CryptolRunner::new();
        assert_eq!(runner.parse_output("0xabcd\n").unwrap(), "0xabcd");
    }

    #[test]
    fn test_custom_noise_filter() {
        let runner = CryptolRunner::new().with_noise_filter(|line| line.starts_with("banner:"));
        let stdout = "banner: some other interpreter\n0x0cc175b9c0f1b6a831c399e269772661\n";
        assert_eq!(
            runner.parse_output(stdout).unwrap(),
            "0x0cc175b9c0f1b6a831c399e269772661"
        );
    }

    #[test]
    fn test_spawn_failure_is_tool_invocation() {
        let runner = CryptolRunner::with_paths("/nonexistent/cryptol-binary", "md5.cry");
        let err = runner.digest("abc").unwrap_err();
        assert!(matches!(err, HarnessError::ToolInvocation(_)));
    }
}
