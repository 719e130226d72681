//! Pipeline configuration (`~/.sprite-atlas/config.toml`).
//!
//! Read once at start; every field here is one of §6's recognised options.
//! Follows the `Config`/`VideoConfig` pattern of the launcher's own
//! application config: per-field `#[serde(default = "fn")]` plus a
//! hand-written `Default` impl so a partial or missing file still loads.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::error::ConfigError;

/// Pipeline configuration, recognised options per the external-interfaces
/// section of the pipeline spec.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PipelineConfig {
    /// Fixed side length of each atlas layer, in pixels.
    #[serde(default = "default_layer_size")]
    pub layer_size: u32,
    /// Requested max layer count; clamped to the GPU's array-layer limit.
    #[serde(default = "default_initial_max_layers")]
    pub initial_max_layers: u32,
    /// Decode worker count, clamped to `1..=8` and to `available_parallelism`.
    #[serde(default = "default_decoder_parallelism")]
    pub decoder_parallelism: u32,
    /// Rows trimmed from the top of every sprite before storage.
    #[serde(default = "default_trim_top")]
    pub trim_top: u32,
    /// Rows trimmed from the bottom of every sprite before storage.
    #[serde(default = "default_trim_bottom")]
    pub trim_bottom: u32,
    /// Telemetry-only: phases slower than this log at `warn` instead of `trace`.
    #[serde(default = "default_slow_op_threshold_ms")]
    pub slow_op_threshold_ms: u64,
    /// Disables both cache tiers when set.
    #[serde(default)]
    pub cache_disabled: bool,
    /// Skip the durable write if image bytes exceed this many bytes.
    #[serde(default = "default_durable_cache_size_ceiling_bytes")]
    pub durable_cache_size_ceiling_bytes: u64,
    /// Transparent inset around each packed sprite.
    #[serde(default = "default_padding_pixels")]
    pub padding_pixels: u32,
    /// Row-height bucket granularity.
    #[serde(default = "default_row_bucket_pixels")]
    pub row_bucket_pixels: u32,
}

fn default_layer_size() -> u32 {
    4096
}
fn default_initial_max_layers() -> u32 {
    64
}
fn default_decoder_parallelism() -> u32 {
    4
}
fn default_trim_top() -> u32 {
    1
}
fn default_trim_bottom() -> u32 {
    5
}
fn default_slow_op_threshold_ms() -> u64 {
    50
}
fn default_durable_cache_size_ceiling_bytes() -> u64 {
    256 * 1024 * 1024
}
fn default_padding_pixels() -> u32 {
    1
}
fn default_row_bucket_pixels() -> u32 {
    16
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            layer_size: default_layer_size(),
            initial_max_layers: default_initial_max_layers(),
            decoder_parallelism: default_decoder_parallelism(),
            trim_top: default_trim_top(),
            trim_bottom: default_trim_bottom(),
            slow_op_threshold_ms: default_slow_op_threshold_ms(),
            cache_disabled: false,
            durable_cache_size_ceiling_bytes: default_durable_cache_size_ceiling_bytes(),
            padding_pixels: default_padding_pixels(),
            row_bucket_pixels: default_row_bucket_pixels(),
        }
    }
}

impl PipelineConfig {
    /// Worker count actually used by the decoder pool: `decoder_parallelism`
    /// clamped to `1..=8` and to the host's available parallelism.
    pub fn effective_decoder_parallelism(&self) -> usize {
        let hw = std::thread::available_parallelism()
            .map(|n| n.get())
            .unwrap_or(1);
        (self.decoder_parallelism as usize).clamp(1, 8).min(hw.max(1))
    }

    /// Returns the platform-specific configuration directory
    /// (`~/.config/sprite-atlas` on Linux, matching the launcher's use of
    /// `directories::ProjectDirs`).
    pub fn config_dir() -> Option<PathBuf> {
        directories::ProjectDirs::from("io", "nethercore", "sprite-atlas")
            .map(|dirs| dirs.config_dir().to_path_buf())
    }

    fn config_path() -> Option<PathBuf> {
        Self::config_dir().map(|d| d.join("config.toml"))
    }

    /// Load config from disk, falling back to defaults if absent or
    /// unparsable fields are missing (each field has its own default).
    pub fn load() -> Result<Self, ConfigError> {
        let Some(path) = Self::config_path() else {
            return Ok(Self::default());
        };
        match std::fs::read_to_string(&path) {
            Ok(text) => Ok(toml::from_str(&text)?),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(Self::default()),
            Err(e) => Err(e.into()),
        }
    }

    /// Persist config to disk, creating the config directory if needed.
    pub fn save(&self) -> Result<(), ConfigError> {
        let Some(path) = Self::config_path() else {
            return Ok(());
        };
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let text = toml::to_string_pretty(self)?;
        std::fs::write(&path, text)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_matches_spec_values() {
        let cfg = PipelineConfig::default();
        assert_eq!(cfg.layer_size, 4096);
        assert_eq!(cfg.trim_top, 1);
        assert_eq!(cfg.trim_bottom, 5);
        assert_eq!(cfg.padding_pixels, 1);
        assert_eq!(cfg.row_bucket_pixels, 16);
    }

    #[test]
    fn partial_toml_fills_in_defaults() {
        let partial = "layer_size = 2048\n";
        let cfg: PipelineConfig = toml::from_str(partial).unwrap();
        assert_eq!(cfg.layer_size, 2048);
        assert_eq!(cfg.trim_bottom, 5);
        assert!(!cfg.cache_disabled);
    }

    #[test]
    fn decoder_parallelism_clamped_to_eight() {
        let mut cfg = PipelineConfig::default();
        cfg.decoder_parallelism = 64;
        assert!(cfg.effective_decoder_parallelism() <= 8);
    }
}
