//! Shared-cursor worker pool: `limit` workers each claim the next unclaimed index.

use std::future::Future;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use crate::verdict::ProbeVerdict;

use super::probe_isolated;

pub(super) async fn run<F, Fut>(
    urls: Arc<[String]>,
    limit: usize,
    probe_fn: Arc<F>,
) -> Vec<Option<ProbeVerdict>>
where
    F: Fn(String) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = ProbeVerdict> + Send + 'static,
{
    let cursor = Arc::new(AtomicUsize::new(0));
    let mut workers = tokio::task::JoinSet::new();

    for _ in 0..limit {
        let urls = Arc::clone(&urls);
        let cursor = Arc::clone(&cursor);
        let probe_fn = Arc::clone(&probe_fn);
        workers.spawn(async move {
            let mut done = Vec::new();
            loop {
                let idx = cursor.fetch_add(1, Ordering::Relaxed);
                let Some(url) = urls.get(idx) else {
                    break;
                };
                let verdict = probe_isolated(&probe_fn, url.clone()).await;
                done.push((idx, verdict));
            }
            done
        });
    }

    let mut slots: Vec<Option<ProbeVerdict>> = vec![None; urls.len()];
    while let Some(joined) = workers.join_next().await {
        match joined {
            Ok(done) => {
                for (idx, verdict) in done {
                    slots[idx] = verdict;
                }
            }
            Err(e) => tracing::error!("batch worker join: {}", e),
        }
    }
    slots
}
