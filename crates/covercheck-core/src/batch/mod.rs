//! Bounded-concurrency batch execution of cover probes.
//!
//! Keeps at most `concurrency` probes in flight. Two schedules are available
//! (see [`BatchStrategy`]): a shared-cursor worker pool, which keeps every slot
//! busy when latencies vary, and fixed chunks, which wait for the slowest probe
//! of each group. Both return one verdict per input, in input order, because
//! verdicts land in slots indexed by input position.

mod chunked;
mod pool;
mod types;

use std::future::Future;
use std::sync::Arc;

use tokio::task::JoinSet;

use crate::config::{BatchStrategy, ProbeConfig};
use crate::probe::CoverProbe;
use crate::transport::Transport;
use crate::verdict::{ProbeVerdict, RejectReason};

pub use types::{BatchResult, BatchSummary, CandidateItem, ProbeOutcome};

/// Runs a probe function over a candidate list under the configured ceiling.
#[derive(Debug, Clone)]
pub struct BoundedBatchRunner {
    config: Arc<ProbeConfig>,
}

impl BoundedBatchRunner {
    pub fn new(config: Arc<ProbeConfig>) -> Self {
        Self { config }
    }

    /// Probes every item. A failing or panicking probe only affects its own item,
    /// which is recorded as `Invalid(FetchError)`.
    pub async fn run<K, F, Fut>(&self, items: Vec<CandidateItem<K>>, probe_fn: F) -> BatchResult<K>
    where
        K: Send + Sync + 'static,
        F: Fn(String) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = ProbeVerdict> + Send + 'static,
    {
        if items.is_empty() {
            return BatchResult::from_outcomes(Vec::new());
        }

        let limit = self.config.concurrency.clamp(1, items.len());
        let urls: Arc<[String]> = items.iter().map(|item| item.url.clone()).collect();
        let probe_fn = Arc::new(probe_fn);

        tracing::debug!(
            items = urls.len(),
            limit,
            strategy = ?self.config.strategy,
            "starting cover batch"
        );
        let slots = match self.config.strategy {
            BatchStrategy::Pool => pool::run(Arc::clone(&urls), limit, probe_fn).await,
            BatchStrategy::Chunked => chunked::run(Arc::clone(&urls), limit, probe_fn).await,
        };
        let verdicts = fill_slots(slots, &urls);

        let result = BatchResult::from_outcomes(
            items
                .into_iter()
                .zip(verdicts)
                .map(|(item, verdict)| ProbeOutcome { item, verdict })
                .collect(),
        );
        let summary = result.summary();
        tracing::info!(
            total = summary.total,
            valid = summary.valid,
            rejected = summary.rejected(),
            "cover batch complete"
        );
        result
    }
}

/// Probes `items` with [`CoverProbe`] over `transport`.
pub async fn validate_covers<T, K>(
    transport: Arc<T>,
    config: Arc<ProbeConfig>,
    items: Vec<CandidateItem<K>>,
) -> BatchResult<K>
where
    T: Transport,
    K: Send + Sync + 'static,
{
    let probe = CoverProbe::new(transport, Arc::clone(&config));
    BoundedBatchRunner::new(config)
        .run(items, move |url: String| {
            let probe = probe.clone();
            async move { probe.check(&url).await }
        })
        .await
}

/// Runs one probe in its own task so a panic stays with its item. The task is
/// owned by a `JoinSet`, so dropping the caller aborts it.
async fn probe_isolated<F, Fut>(probe_fn: &Arc<F>, url: String) -> Option<ProbeVerdict>
where
    F: Fn(String) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = ProbeVerdict> + Send + 'static,
{
    let probe_fn = Arc::clone(probe_fn);
    let mut task = JoinSet::new();
    task.spawn(async move { probe_fn(url).await });
    task.join_next().await.and_then(|joined| joined.ok())
}

/// Empty slots belong to probes that died; they count as fetch errors.
fn fill_slots(slots: Vec<Option<ProbeVerdict>>, urls: &[String]) -> Vec<ProbeVerdict> {
    slots
        .into_iter()
        .zip(urls)
        .map(|(slot, url)| {
            slot.unwrap_or_else(|| {
                tracing::error!(url = %url, "probe task failed before producing a verdict");
                ProbeVerdict::Invalid(RejectReason::FetchError)
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fill_slots_defaults_to_fetch_error() {
        let urls = vec!["a".to_string(), "b".to_string()];
        let out = fill_slots(vec![Some(ProbeVerdict::Valid), None], &urls);
        assert_eq!(
            out,
            vec![ProbeVerdict::Valid, ProbeVerdict::Invalid(RejectReason::FetchError)]
        );
    }

    #[tokio::test]
    async fn empty_input_yields_empty_result() {
        let runner = BoundedBatchRunner::new(Arc::new(ProbeConfig::default()));
        let items: Vec<CandidateItem<u32>> = Vec::new();
        let result = runner.run(items, |_url| async { ProbeVerdict::Valid }).await;
        assert!(result.is_empty());
    }
}
