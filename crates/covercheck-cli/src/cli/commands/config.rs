//! `covercheck config` – print the effective configuration.

use anyhow::Result;
use covercheck_core::config::{self, CoverConfig};

pub fn run_config(cfg: &CoverConfig) -> Result<()> {
    if let Ok(path) = config::config_path() {
        println!("# {}", path.display());
    }
    print!("{}", toml::to_string_pretty(cfg)?);
    Ok(())
}
