//! Sprite asset pipeline for an isometric strategy renderer.
//!
//! Parses race-specific sprite containers, decodes palette-indexed RLE
//! images on a worker pool, packs them into GPU texture-array atlases,
//! and exposes the result through a sprite registry. A two-tier cache
//! (in-memory plus durable on-disk) lets repeated race loads skip
//! decoding entirely.
//!
//! Module layout mirrors the pipeline's own stages: [`container`] parses
//! the file-set format, [`palette`] and [`rle`] turn raw bytes into pixel
//! indices, [`decoder_pool`] runs that decode off the driver thread,
//! [`atlas`] packs the results into layers, [`registry`] and
//! [`orchestrator`] drive one race's bake end to end, and [`cache`] makes
//! a second bake of the same race nearly free.

pub mod atlas;
pub mod cache;
pub mod config;
pub mod container;
pub mod decoder_pool;
pub mod error;
pub mod file_layer;
pub mod gpu;
pub mod ids;
pub mod orchestrator;
pub mod palette;
pub mod registry;
pub mod rle;
pub mod telemetry;

pub use cache::{CacheTier, CachedAtlas, TwoTierCache};
pub use config::PipelineConfig;
pub use decoder_pool::DecoderPool;
pub use error::{ConfigError, PipelineError, SkipReason};
pub use file_layer::{AssetFileLayer, DirectoryFileLayer};
pub use gpu::{AtlasGpu, RecordingGpu};
pub use orchestrator::{BakeManifest, BakeReport, LoadOrchestrator};
pub use registry::SpriteRegistry;
