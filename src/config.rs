//! Viewer configuration and log setup.

use std::fs::File;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use std::time::{SystemTime, UNIX_EPOCH};

use anyhow::{Context, Result};
use tracing_subscriber::EnvFilter;

use tetrogue::core::BoardConfig;

#[derive(Debug, Clone, PartialEq)]
pub struct ViewerConfig {
    pub board: BoardConfig,
    /// Board seed; `n` advances it by one.
    pub seed: u64,
    /// JSON tile catalog; the built-in Oryx catalog when unset.
    pub catalog_path: Option<PathBuf>,
    /// Log file; no logging when unset (the terminal is in use).
    pub log_path: Option<PathBuf>,
}

impl ViewerConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok(), clock_seed)
    }

    /// `clock` is only called when no seed is configured.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>, clock: impl FnOnce() -> u64) -> Self {
        let board = BoardConfig::from_lookup(&lookup);
        let seed = lookup("TETROGUE_SEED")
            .and_then(|s| s.trim().parse().ok())
            .unwrap_or_else(clock);
        let path = |key: &str| {
            lookup(key)
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
                .map(PathBuf::from)
        };

        Self {
            board,
            seed,
            catalog_path: path("TETROGUE_CATALOG"),
            log_path: path("TETROGUE_LOG_PATH"),
        }
    }
}

fn clock_seed() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos() as u64)
        .unwrap_or(0)
}

/// Send `tracing` output to `path`. Level filter from `TETROGUE_LOG`, default `info`.
pub fn init_logging(path: Option<&Path>) -> Result<()> {
    let Some(path) = path else {
        return Ok(());
    };
    let file = File::create(path).with_context(|| format!("create log file {}", path.display()))?;
    let filter = EnvFilter::try_from_env("TETROGUE_LOG").unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .try_init()
        .map_err(|e| anyhow::anyhow!("install log subscriber: {e}"))?;
    Ok(())
}
