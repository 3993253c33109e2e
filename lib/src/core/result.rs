//! # Shell Results
//!
//! File: lib/src/core/result.rs
//! Author: Christi Mahu
//!
//! ## Overview
//!
//! `ShellResult` is the single outcome of running one or more commands:
//! either the captured text (`Success`) or an `ShError` holding an exit status
//! and message (`Failure`). Results are never mutated once produced. Batch
//! execution merges them into new values with `ShellResult::combined`.
//!
//! ## Combination
//!
//! `combined` always yields `Success`. It concatenates the text of the left
//! result (its output, or its failure message) with the text of the right one.
//! A batch run without `TERMINATE_ON_FAILURE` is therefore always a success,
//! even when every command in it failed. Callers who need to tell the two
//! apart should run with `TERMINATE_ON_FAILURE`.
//!
use crate::core::error::{CmdsError, ShError};

/// The outcome of an execution: captured text or a failure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShellResult {
    Success(String),
    Failure(ShError),
}

impl ShellResult {
    /// An empty success, the starting value for folding batch results.
    pub fn empty() -> Self {
        ShellResult::Success(String::new())
    }

    pub fn failure(status: i32, message: impl Into<String>) -> Self {
        ShellResult::Failure(ShError::new(status, message))
    }

    /// `0` for a success, the carried status for a failure.
    pub fn status(&self) -> i32 {
        match self {
            ShellResult::Success(_) => 0,
            ShellResult::Failure(err) => err.status,
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, ShellResult::Success(_))
    }

    /// The success text, or the failure as an error.
    pub fn success(&self) -> Result<&str, ShError> {
        match self {
            ShellResult::Success(output) => Ok(output),
            ShellResult::Failure(err) => Err(err.clone()),
        }
    }

    pub fn into_result(self) -> Result<String, ShError> {
        self.into()
    }

    /// The text this result contributes to a combination.
    pub fn output_or_message(&self) -> &str {
        match self {
            ShellResult::Success(output) => output,
            ShellResult::Failure(err) => &err.message,
        }
    }

    /// Merges two results into one success by concatenating their text.
    ///
    /// Failures are never propagated: `Failure(2, "err")` combined with
    /// `Success("y")` is `Success("erry")`.
    pub fn combined(self, other: ShellResult) -> ShellResult {
        let mut text = match self {
            ShellResult::Success(output) => output,
            ShellResult::Failure(err) => err.message,
        };
        text.push_str(other.output_or_message());
        ShellResult::Success(text)
    }
}

impl Default for ShellResult {
    fn default() -> Self {
        Self::empty()
    }
}

impl From<ShellResult> for Result<String, ShError> {
    fn from(result: ShellResult) -> Self {
        match result {
            ShellResult::Success(output) => Ok(output),
            ShellResult::Failure(err) => Err(err),
        }
    }
}

impl From<CmdsError> for ShellResult {
    fn from(err: CmdsError) -> Self {
        ShellResult::Failure(err.into())
    }
}

impl From<ShError> for ShellResult {
    fn from(err: ShError) -> Self {
        ShellResult::Failure(err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::error::SENTINEL_STATUS;

    fn ok(text: &str) -> ShellResult {
        ShellResult::Success(text.to_string())
    }

    fn fail(status: i32, message: &str) -> ShellResult {
        ShellResult::failure(status, message)
    }

    #[test]
    fn test_status() {
        assert_eq!(ok("anything").status(), 0);
        assert_eq!(fail(3, "x").status(), 3);
        assert_eq!(fail(SENTINEL_STATUS, "x").status(), SENTINEL_STATUS);
    }

    #[test]
    fn test_success_accessor_returns_error_for_failure() {
        assert_eq!(ok("out").success(), Ok("out"));
        let err = fail(7, "bad").success().unwrap_err();
        assert_eq!(err.status, 7);
        assert_eq!(err.message, "bad");
    }

    #[test]
    fn test_combined_always_succeeds() {
        assert_eq!(ok("a").combined(ok("b")), ok("ab"));
        assert_eq!(ok("a").combined(fail(1, "e")), ok("ae"));
        assert_eq!(fail(1, "e").combined(ok("b")), ok("eb"));
        assert_eq!(fail(1, "e").combined(fail(2, "f")), ok("ef"));
    }

    #[test]
    fn test_combined_fold_direction_does_not_change_text() {
        let results = vec![ok("x"), fail(2, "err"), ok("y"), fail(9, "z")];

        let left = results
            .iter()
            .cloned()
            .fold(ShellResult::empty(), ShellResult::combined);
        let right = results
            .iter()
            .cloned()
            .rev()
            .fold(ShellResult::empty(), |acc, r| r.combined(acc));

        assert_eq!(left, ok("xerryz"));
        assert_eq!(left, right);
    }

    #[test]
    fn test_into_result() {
        assert_eq!(ok("t").into_result(), Ok("t".to_string()));
        assert_eq!(
            fail(4, "m").into_result(),
            Err(ShError::new(4, "m"))
        );
    }
}
