use std::{
    any::Any,
    num::NonZeroUsize,
    sync::{
        atomic::{AtomicUsize, Ordering},
        Arc,
    },
};

use batch::{AnyBoxedError, AnyError, AnyResult};
use thiserror::Error;
use tokio::test;

#[derive(Debug, Error)]
enum Error {
    #[error("cannot delete item {0}")]
    DeleteItemError(String),
}

impl AnyError for Error {
    fn as_any(&self) -> &dyn Any {
        self
    }
}

impl From<Error> for AnyBoxedError {
    fn from(err: Error) -> Self {
        Box::new(err)
    }
}

fn batch_size(size: usize) -> NonZeroUsize {
    NonZeroUsize::new(size).unwrap()
}

fn items(ids: &[&str]) -> Vec<String> {
    ids.iter().map(ToString::to_string).collect()
}

/// Builds a bulk operation that counts its calls and fails whenever
/// its batch contains an item marked as poison.
fn poison_op(
    poison: &str,
    calls: &Arc<AtomicUsize>,
) -> impl Fn(Vec<String>) -> futures::future::BoxFuture<'static, AnyResult<Vec<String>>> + Clone {
    let poison = poison.to_string();
    let calls = calls.clone();

    move |batch: Vec<String>| {
        let poison = poison.clone();
        let calls = calls.clone();

        Box::pin(async move {
            calls.fetch_add(1, Ordering::SeqCst);

            match batch.iter().find(|id| **id == poison) {
                Some(id) => Err(Error::DeleteItemError(id.clone()).into()),
                None => Ok(batch),
            }
        })
    }
}

#[test_log::test(test)]
async fn test_empty_input() {
    let calls = Arc::new(AtomicUsize::new(0));
    let op = poison_op("none", &calls);

    let report = batch::process(Vec::<String>::new(), batch_size(8), op).await;

    assert!(report.successes.is_empty());
    assert!(report.failures.is_empty());
    assert_eq!(calls.load(Ordering::SeqCst), 0);
}

#[test_log::test(test)]
async fn test_batch_size_boundary() {
    let calls = Arc::new(AtomicUsize::new(0));
    let op = poison_op("none", &calls);

    let report = batch::process(items(&["a", "b", "c"]), batch_size(3), op.clone()).await;
    assert_eq!(report.successes.len(), 3);
    assert_eq!(calls.load(Ordering::SeqCst), 1);

    calls.store(0, Ordering::SeqCst);

    let report = batch::process(items(&["a", "b", "c", "d"]), batch_size(3), op).await;
    assert_eq!(report.successes.len(), 4);
    assert_eq!(calls.load(Ordering::SeqCst), 2);
}

#[test_log::test(test)]
async fn test_batch_size_larger_than_input() {
    let calls = Arc::new(AtomicUsize::new(0));
    let op = poison_op("none", &calls);

    let report = batch::process(items(&["a", "b"]), batch_size(50), op).await;

    assert_eq!(report.successes, items(&["a", "b"]));
    assert_eq!(calls.load(Ordering::SeqCst), 1);
}

#[test_log::test(test)]
async fn test_fallback_isolates_poison_item() {
    let calls = Arc::new(AtomicUsize::new(0));
    let op = poison_op("poison", &calls);

    let report = batch::process(items(&["a", "b", "poison", "d"]), batch_size(2), op).await;

    // batch [a, b] succeeds wholesale, batch [poison, d] falls back
    // to per-item processing
    let mut successes = report.successes.clone();
    successes.sort();
    assert_eq!(successes, items(&["a", "b", "d"]));

    assert_eq!(report.failures.len(), 1);
    let (item, err) = &report.failures[0];
    assert_eq!(item, "poison");
    assert_eq!(err.to_string(), "cannot delete item poison");

    // 1 clean batch + 1 failed batch + 2 singleton retries
    assert_eq!(calls.load(Ordering::SeqCst), 4);
}

#[test_log::test(test)]
async fn test_partition_completeness() {
    let calls = Arc::new(AtomicUsize::new(0));
    let op = poison_op("poison", &calls);

    let input = items(&["a", "poison", "c", "d", "e", "f", "g"]);
    let report = batch::process(input.clone(), batch_size(3), op).await;

    assert_eq!(report.total(), input.len());

    let mut accounted: Vec<String> = report
        .successes
        .iter()
        .cloned()
        .chain(report.failures.iter().map(|(item, _)| item.clone()))
        .collect();
    accounted.sort();

    let mut expected = input;
    expected.sort();

    assert_eq!(accounted, expected);
}

#[test_log::test(test)]
async fn test_singleton_batch_is_not_retried() {
    let calls = Arc::new(AtomicUsize::new(0));
    let op = poison_op("poison", &calls);

    let report = batch::process(items(&["a", "poison", "c"]), batch_size(1), op).await;

    // one call per item, no double-call on the failing one
    assert_eq!(calls.load(Ordering::SeqCst), 3);
    assert_eq!(report.successes, items(&["a", "c"]));
    assert_eq!(report.failures.len(), 1);
    assert_eq!(report.failures[0].0, "poison");
}

#[test_log::test(test)]
async fn test_batch_size_one_equivalent_to_whole_list() {
    let input = items(&["a", "b", "c", "d"]);

    let calls = Arc::new(AtomicUsize::new(0));
    let op = poison_op("none", &calls);

    let report_one = batch::process(input.clone(), batch_size(1), op.clone()).await;
    let report_all = batch::process(input.clone(), batch_size(input.len()), op).await;

    let mut successes_one = report_one.successes.clone();
    successes_one.sort();
    let mut successes_all = report_all.successes.clone();
    successes_all.sort();

    assert_eq!(successes_one, successes_all);
    assert!(report_one.is_complete());
    assert!(report_all.is_complete());
}

#[test_log::test(test)]
async fn test_duplicate_items_accounted_independently() {
    let calls = Arc::new(AtomicUsize::new(0));
    let op = poison_op("poison", &calls);

    let report = batch::process(items(&["poison", "a", "poison"]), batch_size(3), op).await;

    assert_eq!(report.successes, items(&["a"]));
    assert_eq!(report.failures.len(), 2);
    assert!(report.failures.iter().all(|(item, _)| item == "poison"));
    assert_eq!(report.total(), 3);
}
