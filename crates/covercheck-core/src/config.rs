use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;
use std::time::Duration;

pub const DEFAULT_MIN_BYTES: u64 = 2048;
pub const DEFAULT_MIN_DIMENSION_PX: u32 = 2;
pub const DEFAULT_PROBE_BYTES: u64 = 16384;
pub const DEFAULT_TIMEOUT_MS: u64 = 5000;
pub const DEFAULT_CONCURRENCY: usize = 5;

/// How the batch runner schedules probes under the concurrency ceiling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BatchStrategy {
    /// `concurrency` workers pulling from a shared cursor.
    #[default]
    Pool,
    /// Consecutive groups of `concurrency`, each awaited before the next.
    Chunked,
}

impl std::str::FromStr for BatchStrategy {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "pool" => Ok(BatchStrategy::Pool),
            "chunked" => Ok(BatchStrategy::Chunked),
            other => anyhow::bail!("unknown batch strategy {:?} (expected pool or chunked)", other),
        }
    }
}

/// Immutable parameters for one batch run. Built once and shared by reference.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProbeConfig {
    /// Minimum declared or measured body size in bytes.
    pub min_bytes: u64,
    /// Minimum width and height in pixels.
    pub min_dimension_px: u32,
    /// Prefix window requested by the ranged GET.
    pub probe_bytes: u64,
    /// Per-request timeout, armed separately for HEAD and GET.
    pub timeout: Duration,
    /// Maximum probes in flight.
    pub concurrency: usize,
    pub strategy: BatchStrategy,
}

impl ProbeConfig {
    /// Bytes requested by the ranged GET. Never smaller than `min_bytes`, since a
    /// range-honoring origin reports the range length as `Content-Length`.
    pub fn range_window(&self) -> u64 {
        self.probe_bytes.max(self.min_bytes).max(1)
    }
}

impl Default for ProbeConfig {
    fn default() -> Self {
        CoverConfig::default().probe_config()
    }
}

/// Configuration loaded from `~/.config/covercheck/config.toml`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CoverConfig {
    pub min_bytes: u64,
    pub min_dimension_px: u32,
    pub probe_bytes: u64,
    pub timeout_ms: u64,
    pub concurrency: usize,
    pub strategy: BatchStrategy,
}

impl Default for CoverConfig {
    fn default() -> Self {
        Self {
            min_bytes: DEFAULT_MIN_BYTES,
            min_dimension_px: DEFAULT_MIN_DIMENSION_PX,
            probe_bytes: DEFAULT_PROBE_BYTES,
            timeout_ms: DEFAULT_TIMEOUT_MS,
            concurrency: DEFAULT_CONCURRENCY,
            strategy: BatchStrategy::Pool,
        }
    }
}

impl CoverConfig {
    /// Applies `COVER_*` environment overrides from the process environment.
    pub fn apply_env(&mut self) {
        self.apply_overrides(|name| std::env::var(name).ok());
    }

    /// Applies overrides from `lookup`. Non-numeric values fall back to the
    /// compiled-in default for that key. Zero is taken literally except for
    /// `COVER_AUDIT_CONCURRENCY`, where it also falls back.
    pub fn apply_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(v) = override_value(&lookup, "COVER_MIN_BYTES", DEFAULT_MIN_BYTES, Zero::Allowed) {
            self.min_bytes = v;
        }
        if let Some(v) = override_value(&lookup, "COVER_MIN_DIMENSION", DEFAULT_MIN_DIMENSION_PX, Zero::Allowed) {
            self.min_dimension_px = v;
        }
        if let Some(v) = override_value(&lookup, "COVER_PROBE_BYTES", DEFAULT_PROBE_BYTES, Zero::Allowed) {
            self.probe_bytes = v;
        }
        if let Some(v) = override_value(&lookup, "COVER_TIMEOUT_MS", DEFAULT_TIMEOUT_MS, Zero::Allowed) {
            self.timeout_ms = v;
        }
        if let Some(v) = override_value(&lookup, "COVER_AUDIT_CONCURRENCY", DEFAULT_CONCURRENCY, Zero::Default) {
            self.concurrency = v;
        }
    }

    /// Builds the immutable per-run probe parameters.
    pub fn probe_config(&self) -> ProbeConfig {
        ProbeConfig {
            min_bytes: self.min_bytes,
            min_dimension_px: self.min_dimension_px,
            probe_bytes: self.probe_bytes,
            timeout: Duration::from_millis(self.timeout_ms.max(1)),
            concurrency: self.concurrency.max(1),
            strategy: self.strategy,
        }
    }
}

/// Whether an override of `0` is a real value or means "use the default".
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Zero {
    Allowed,
    Default,
}

fn override_value<T, F>(lookup: &F, name: &str, default: T, zero: Zero) -> Option<T>
where
    T: std::str::FromStr + PartialEq + Default + Copy + std::fmt::Display,
    F: Fn(&str) -> Option<String>,
{
    let raw = lookup(name)?;
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }
    match raw.parse::<T>() {
        Ok(v) if zero == Zero::Allowed || v != T::default() => Some(v),
        _ => {
            tracing::warn!(var = name, value = raw, "invalid override, using default {}", default);
            Some(default)
        }
    }
}

pub fn config_path() -> Result<PathBuf> {
    let xdg_dirs = xdg::BaseDirectories::with_prefix("covercheck")?;
    Ok(xdg_dirs.place_config_file("config.toml")?)
}

/// Load configuration from disk, creating a default file if none exists.
/// Environment overrides are applied on top of the file values.
pub fn load_or_init() -> Result<CoverConfig> {
    let path = config_path()?;
    let mut cfg = if !path.exists() {
        let default_cfg = CoverConfig::default();
        let toml = toml::to_string_pretty(&default_cfg)?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&path, toml)?;
        tracing::info!("created default config at {}", path.display());
        default_cfg
    } else {
        let data = fs::read_to_string(&path)?;
        toml::from_str(&data)?
    };
    cfg.apply_env();
    Ok(cfg)
}
