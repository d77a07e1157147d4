//! `covercheck sniff` – inspect the header of a local image file.

use anyhow::{Context, Result};
use covercheck_core::config::CoverConfig;
use covercheck_core::sniff;
use std::fs::File;
use std::io::Read;
use std::path::Path;

pub fn run_sniff(cfg: &CoverConfig, path: &Path) -> Result<()> {
    println!("{}: {}", path.display(), sniff_file(cfg, path)?);
    Ok(())
}

/// Reads the same prefix a remote probe would see and describes it.
pub(crate) fn sniff_file(cfg: &CoverConfig, path: &Path) -> Result<String> {
    let file = File::open(path).with_context(|| format!("opening {}", path.display()))?;
    let mut prefix = Vec::new();
    file.take(cfg.probe_config().range_window())
        .read_to_end(&mut prefix)
        .with_context(|| format!("reading {}", path.display()))?;
    Ok(describe(&prefix))
}

pub(crate) fn describe(prefix: &[u8]) -> String {
    match sniff::detect(prefix) {
        Some((format, dims)) => format!("{} {}", format, dims),
        None => "no recognizable image header".to_string(),
    }
}
