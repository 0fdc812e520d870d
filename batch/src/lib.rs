#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![doc = include_str!("../README.md")]

mod error;
mod report;

use std::num::NonZeroUsize;

use futures::{stream::FuturesUnordered, Future, StreamExt};
use tracing::{debug, trace};

#[doc(inline)]
pub use crate::{
    error::{AnyBoxedError, AnyError, AnyResult},
    report::BatchReport,
};

/// Processes the given items in batches of the given size.
///
/// The bulk operation receives one batch at a time and must return
/// one result per given item, in the same order. When a batch-level
/// call fails, every item of the batch is retried individually as a
/// singleton batch, all retries running concurrently and joined
/// before the next batch starts.
///
/// This function never fails: failures are collected in the returned
/// [`BatchReport`]. An empty item list returns an empty report
/// without invoking the bulk operation.
pub async fn process<T, R, F, Fut>(
    items: Vec<T>,
    batch_size: NonZeroUsize,
    bulk_op: F,
) -> BatchReport<T, R>
where
    T: Clone,
    F: Fn(Vec<T>) -> Fut,
    Fut: Future<Output = AnyResult<Vec<R>>>,
{
    let mut report = BatchReport::default();

    for batch in items.chunks(batch_size.get()) {
        match bulk_op(batch.to_vec()).await {
            Ok(results) => {
                trace!("batch of {} items succeeded", batch.len());
                report.successes.extend(results);
            }
            // a singleton batch carries its own error: retrying it
            // would issue the same call twice
            Err(err) if batch.len() == 1 => {
                debug!("cannot process singleton batch: {err}");
                report.failures.push((batch[0].clone(), err));
            }
            Err(err) => {
                debug!("cannot process batch of {} items: {err}", batch.len());
                debug!("falling back to per-item processing");

                let outcomes: Vec<_> =
                    FuturesUnordered::from_iter(batch.iter().cloned().map(|item| {
                        let retry = bulk_op(vec![item.clone()]);
                        async move { (item, retry.await) }
                    }))
                    .collect()
                    .await;

                for (item, outcome) in outcomes {
                    match outcome {
                        Ok(results) => report.successes.extend(results),
                        Err(err) => {
                            debug!("cannot process item: {err}");
                            report.failures.push((item, err));
                        }
                    }
                }
            }
        }
    }

    report
}
