//! # Batch report
//!
//! Module dedicated to batch processing reporting. The main structure
//! of this module is [`BatchReport`].

use crate::AnyBoxedError;

/// The batch processing report.
///
/// A report is built from scratch by [`process`](crate::process) for
/// every invocation and accounts for every input item exactly once,
/// either in [`successes`](Self::successes) or in
/// [`failures`](Self::failures). Entries appear in processing order,
/// which matches input order as long as no batch falls back to
/// per-item processing.
#[derive(Debug)]
pub struct BatchReport<T, R> {
    /// The list of results collected from successful calls.
    pub successes: Vec<R>,

    /// The list of items that could not be processed, associated with
    /// the error captured for each of them.
    pub failures: Vec<(T, AnyBoxedError)>,
}

impl<T, R> BatchReport<T, R> {
    /// Returns the total amount of items accounted for, successes and
    /// failures included.
    pub fn total(&self) -> usize {
        self.successes.len() + self.failures.len()
    }

    /// Returns `true` when no failure has been collected.
    pub fn is_complete(&self) -> bool {
        self.failures.is_empty()
    }
}

impl<T, R> Default for BatchReport<T, R> {
    fn default() -> Self {
        Self {
            successes: Vec::new(),
            failures: Vec::new(),
        }
    }
}
