//! Runtime configuration for the timing model.
//!
//! Configuration is loaded from multiple sources in priority order:
//! 1. Environment variables (`SH34_TIMING_BURST`, `SH34_TIMING_TLB`)
//! 2. Project-local config file (`./sh34-timing.toml`)
//! 3. Built-in defaults
//!
//! # Config File Format
//!
//! ```toml
//! # sh34-timing.toml
//!
//! # Price eligible read runs as bursts (off: every access priced alone)
//! burst_enabled = false
//!
//! # Track the simulated single-entry TLB and charge refill penalties
//! tlb_model_enabled = false
//! ```

use serde::{Deserialize, Serialize};
use std::path::Path;

/// Feature toggles for the memory-latency model.
///
/// Both toggles default to off: burst pricing and TLB-miss tracking are
/// coarse approximations and stay disabled until tuned against hardware
/// traces. The surrounding bookkeeping runs either way, so a toggle can
/// flip without resetting the model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct TimingConfig {
    /// Price eligible read runs as bursts (setup cost + continuations).
    pub burst_enabled: bool,
    /// Simulate the single-entry TLB and charge refill penalties.
    pub tlb_model_enabled: bool,
}

impl TimingConfig {
    /// Load configuration from all sources.
    ///
    /// Priority (highest to lowest): environment variables, project-local
    /// `sh34-timing.toml`, defaults. The loaded value is meant to be handed
    /// to [`MemoryTiming::with_config`](crate::memory::MemoryTiming::with_config)
    /// by the embedding emulator; nothing is cached process-wide.
    pub fn load() -> Self {
        let mut config = Self::default();
        if let Some(local) = Self::load_from_file(Path::new("sh34-timing.toml")) {
            config = local;
        }
        config.apply_env_overrides();
        config
    }

    /// Load configuration from a specific file.
    pub fn load_from_file(path: &Path) -> Option<Self> {
        if !path.exists() {
            return None;
        }

        match std::fs::read_to_string(path) {
            Ok(content) => match toml::from_str(&content) {
                Ok(config) => {
                    log::info!("Loaded timing config from {}", path.display());
                    Some(config)
                }
                Err(e) => {
                    log::warn!("Failed to parse {}: {}", path.display(), e);
                    None
                }
            },
            Err(e) => {
                log::warn!("Failed to read {}: {}", path.display(), e);
                None
            }
        }
    }

    /// Apply environment variable overrides.
    fn apply_env_overrides(&mut self) {
        if let Some(value) = env_flag("SH34_TIMING_BURST") {
            log::info!("Using SH34_TIMING_BURST from environment: {}", value);
            self.burst_enabled = value;
        }
        if let Some(value) = env_flag("SH34_TIMING_TLB") {
            log::info!("Using SH34_TIMING_TLB from environment: {}", value);
            self.tlb_model_enabled = value;
        }
    }

    /// Generate a sample config file content.
    pub fn sample_config() -> String {
        r#"# sh34-timing configuration
# Place this file at ./sh34-timing.toml next to the emulator.

# Price eligible read runs as bursts (off: every access priced alone)
burst_enabled = false

# Track the simulated single-entry TLB and charge refill penalties
tlb_model_enabled = false
"#
        .to_string()
    }
}

/// Parse a boolean environment flag.
fn env_flag(name: &str) -> Option<bool> {
    match std::env::var(name)
        .ok()?
        .trim()
        .to_ascii_lowercase()
        .as_str()
    {
        "1" | "true" | "on" | "yes" => Some(true),
        "0" | "false" | "off" | "no" => Some(false),
        other => {
            log::warn!("Ignoring {}={:?}: expected a boolean", name, other);
            None
        }
    }
}
