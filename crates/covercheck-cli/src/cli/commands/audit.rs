//! `covercheck audit` – check a JSON file of candidates and report the rejects.

use anyhow::{Context, Result};
use covercheck_core::config::CoverConfig;
use covercheck_core::transport::CurlTransport;
use covercheck_core::{validate_covers, CandidateItem, RejectReason};
use serde_json::Value;
use std::fs;
use std::path::PathBuf;
use std::sync::Arc;

#[derive(Debug, Clone)]
pub struct AuditOptions {
    pub path: PathBuf,
    pub json: bool,
    pub keep: Option<PathBuf>,
    pub show: usize,
}

/// Ids are kept as raw JSON so string and numeric ids both round-trip into `--keep`.
pub async fn run_audit(cfg: &CoverConfig, opts: &AuditOptions) -> Result<()> {
    let raw = fs::read_to_string(&opts.path)
        .with_context(|| format!("reading candidates from {}", opts.path.display()))?;
    let items: Vec<CandidateItem<Value>> = serde_json::from_str(&raw)
        .with_context(|| format!("parsing candidates in {}", opts.path.display()))?;

    if !opts.json {
        println!("Checking {} covers...", items.len());
    }
    let result = validate_covers(Arc::new(CurlTransport::new()), Arc::new(cfg.probe_config()), items).await;

    if opts.json {
        println!("{}", serde_json::to_string_pretty(&result)?);
    } else {
        for line in report_lines(result.rejections(), opts.show) {
            println!("{}", line);
        }
    }

    if let Some(out) = &opts.keep {
        let kept: Vec<&CandidateItem<Value>> = result.valid_items().collect();
        fs::write(out, serde_json::to_string_pretty(&kept)?)
            .with_context(|| format!("writing kept candidates to {}", out.display()))?;
        tracing::info!(kept = kept.len(), path = %out.display(), "wrote kept candidates");
    }
    Ok(())
}

/// Report body: a count line followed by at most `show` rejects.
pub(crate) fn report_lines<'a, I>(rejections: I, show: usize) -> Vec<String>
where
    I: Iterator<Item = (&'a CandidateItem<Value>, RejectReason)>,
{
    let rejections: Vec<_> = rejections.collect();
    if rejections.is_empty() {
        return vec!["No invalid covers found.".to_string()];
    }
    let mut lines = vec![format!("Found {} invalid covers.", rejections.len())];
    lines.extend(
        rejections
            .iter()
            .take(show)
            .map(|(item, reason)| format!("- {} | {} | {}", display_id(&item.id), item.url, reason)),
    );
    lines
}

/// Strings print bare; anything else prints as JSON.
pub(crate) fn display_id(id: &Value) -> String {
    match id {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
