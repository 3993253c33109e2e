//! # Batch Execution
//!
//! File: lib/src/process/batch.rs
//! Author: Christi Mahu
//!
//! Runs an ordered list of independent runnables (no piping between them)
//! and folds their results into one `ShellResult`.
//!
//! - With `TERMINATE_ON_FAILURE` (the default), runnables run in order until
//!   the first failure, which is returned verbatim. Nothing after it is started.
//!   If everything succeeds, the outputs are concatenated.
//! - Without it, every runnable runs and all results are folded left to right
//!   with `ShellResult::combined`, starting from `ShellResult::empty()`.
//!   The batch result is then always a `Success` whose text interleaves outputs
//!   and failure messages.
//!
use crate::core::options::ExecuteOptions;
use crate::core::result::ShellResult;
use crate::process::Execute;
use tracing::{debug, info, warn};

/// Executes `runnables` in order and returns their combined result.
///
/// ```rust,no_run
/// use cmds::{execute_all, sh, ExecuteOptions};
///
/// let result = execute_all([sh("echo one"), sh("echo two")], ExecuteOptions::default());
/// assert_eq!(result.success(), Ok("one\ntwo\n"));
/// ```
pub fn execute_all<I>(runnables: I, options: ExecuteOptions) -> ShellResult
where
    I: IntoIterator,
    I::Item: Execute,
{
    if options.contains(ExecuteOptions::TERMINATE_ON_FAILURE) {
        let mut result = ShellResult::empty();
        for (index, mut runnable) in runnables.into_iter().enumerate() {
            let execution = runnable.execute(options);
            if let ShellResult::Failure(err) = &execution {
                info!(
                    "Batch entry {} failed with status {}; skipping the rest",
                    index + 1,
                    err.status
                );
                return execution;
            }
            result = result.combined(execution);
        }
        result
    } else {
        let mut failures = 0usize;
        let mut count = 0usize;
        let result = runnables
            .into_iter()
            .map(|mut runnable| {
                count += 1;
                let execution = runnable.execute(options);
                if !execution.is_success() {
                    failures += 1;
                }
                execution
            })
            .fold(ShellResult::empty(), ShellResult::combined);
        if failures > 0 {
            warn!(
                "{} of {} batch entries failed; their messages were folded into the output",
                failures, count
            );
        } else {
            debug!("All {} batch entries succeeded", count);
        }
        result
    }
}
