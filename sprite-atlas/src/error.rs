//! Pipeline error types.
//!
//! Whole-bake failures (the GPU refusing an allocation, the file layer being
//! unreachable) are the only ones that propagate out of the orchestrator.
//! Single-sprite and single-category failures are recorded as skip reasons
//! in [`crate::orchestrator::BakeReport`] instead of raised — see §7 of the
//! pipeline spec for the propagation policy.

use serde::Serialize;
use thiserror::Error;

/// Errors that can abort an entire bake.
#[derive(Error, Debug)]
pub enum PipelineError {
    #[error("file layer unavailable for file-set {0}")]
    FileLayerUnavailable(u32),

    #[error("GPU allocation failed: {0}")]
    GpuAllocation(String),

    #[error("atlas full (layer {layer}/{max_layers})")]
    AtlasFull { layer: u32, max_layers: u32 },

    #[error("durable cache I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("durable cache serialization error: {0}")]
    Serialize(#[from] bincode::Error),

    #[error("config error: {0}")]
    Config(#[from] ConfigError),

    #[error("decoder pool destroyed while requests were pending")]
    PoolDestroyed,
}

/// Errors loading or saving [`crate::config::PipelineConfig`].
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error reading config: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("TOML serialize error: {0}")]
    Serialize(#[from] toml::ser::Error),
}

/// Reasons a single sprite or container entry was skipped rather than
/// raising. Every variant here corresponds to an "Error kind" in §7 that
/// the spec says must not abort the bake.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum SkipReason {
    /// A job/direction/frame table index pointed outside its target table.
    MalformedContainer { detail: String },
    /// Trimming (`trim_top + trim_bottom >= height`) left nothing to store.
    TrimmedToNothing,
    /// The decode worker returned an error, or the pool was destroyed.
    DecodeFailed { detail: String },
    /// The requested file-id has no container on disk.
    MissingAsset { file_id: u32 },
}

impl std::fmt::Display for SkipReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SkipReason::MalformedContainer { detail } => {
                write!(f, "malformed container: {detail}")
            }
            SkipReason::TrimmedToNothing => write!(f, "trimmed to zero height"),
            SkipReason::DecodeFailed { detail } => write!(f, "decode failed: {detail}"),
            SkipReason::MissingAsset { file_id } => write!(f, "missing asset file-id {file_id}"),
        }
    }
}
