//! `covercheck check` – probe URLs given on the command line.

use anyhow::Result;
use covercheck_core::config::CoverConfig;
use covercheck_core::transport::CurlTransport;
use covercheck_core::{validate_covers, CandidateItem};
use std::sync::Arc;

pub async fn run_check(cfg: &CoverConfig, urls: &[String]) -> Result<()> {
    let items: Vec<CandidateItem<usize>> = urls
        .iter()
        .enumerate()
        .map(|(i, url)| CandidateItem::new(i, url.clone()))
        .collect();
    let result = validate_covers(Arc::new(CurlTransport::new()), Arc::new(cfg.probe_config()), items).await;
    for outcome in result.outcomes() {
        println!("{:<28} {}", outcome.verdict.to_string(), outcome.item.url);
    }
    Ok(())
}
