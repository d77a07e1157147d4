//! Fixed chunks of `limit` items; the next chunk starts when the current one is done.

use std::future::Future;
use std::sync::Arc;

use crate::verdict::ProbeVerdict;

pub(super) async fn run<F, Fut>(
    urls: Arc<[String]>,
    limit: usize,
    probe_fn: Arc<F>,
) -> Vec<Option<ProbeVerdict>>
where
    F: Fn(String) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = ProbeVerdict> + Send + 'static,
{
    let mut slots: Vec<Option<ProbeVerdict>> = vec![None; urls.len()];

    for (chunk_idx, chunk) in urls.chunks(limit).enumerate() {
        let base = chunk_idx * limit;
        let mut group = tokio::task::JoinSet::new();
        for (offset, url) in chunk.iter().enumerate() {
            let probe_fn = Arc::clone(&probe_fn);
            let url = url.clone();
            group.spawn(async move { (base + offset, probe_fn(url).await) });
        }
        while let Some(joined) = group.join_next().await {
            match joined {
                Ok((idx, verdict)) => slots[idx] = Some(verdict),
                // Slot stays empty and is reported by the caller.
                Err(e) => tracing::debug!("chunk probe join: {}", e),
            }
        }
    }
    slots
}
