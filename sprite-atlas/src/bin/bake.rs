//! sprite-atlas-bake - offline sprite pipeline bake CLI
//!
//! Runs one race's bake against a directory of container files and a JSON
//! manifest, printing the resulting [`sprite_atlas::BakeReport`] as JSON.
//! GPU operations are recorded rather than sent to real hardware, since
//! this tool has no window or device to drive.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};

use sprite_atlas::{
    BakeManifest, DecoderPool, DirectoryFileLayer, LoadOrchestrator, PipelineConfig, RecordingGpu,
    TwoTierCache,
};

#[derive(Parser)]
#[command(name = "sprite-atlas-bake")]
#[command(about = "Offline sprite asset pipeline bake tool")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Bake one race's sprites from a manifest and print the report as JSON.
    Bake {
        /// Directory containing `<file_id>.dat` / `<file_id>.pal` files.
        #[arg(long)]
        assets_dir: PathBuf,
        /// JSON-encoded `BakeManifest` describing what to bake.
        #[arg(long)]
        manifest: PathBuf,
        /// Durable cache directory. Defaults to the platform config dir.
        #[arg(long)]
        cache_dir: Option<PathBuf>,
        /// Version tag gating the cache; bump to force a cold rebake.
        #[arg(long, default_value = "cli:v1")]
        version_tag: String,
        /// Maximum array-texture layers the fake GPU reports.
        #[arg(long, default_value_t = 64)]
        max_layers: u32,
    },
    /// Print the resolved pipeline configuration as JSON.
    PrintConfig,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Bake { assets_dir, manifest, cache_dir, version_tag, max_layers } => {
            let config = PipelineConfig::load().context("loading pipeline config")?;
            let cache_dir = match cache_dir {
                Some(dir) => dir,
                None => PipelineConfig::config_dir()
                    .context("no config directory available on this platform")?
                    .join("atlas-cache"),
            };

            let manifest_text = std::fs::read_to_string(&manifest)
                .with_context(|| format!("reading manifest {manifest:?}"))?;
            let manifest: BakeManifest =
                serde_json::from_str(&manifest_text).context("parsing manifest JSON")?;

            let layer = DirectoryFileLayer::new(assets_dir);
            let pool = DecoderPool::new(config.effective_decoder_parallelism());
            let gpu = RecordingGpu::new(max_layers);
            let cache = TwoTierCache::new(
                cache_dir,
                config.cache_disabled,
                config.durable_cache_size_ceiling_bytes,
            );
            let mut orchestrator = LoadOrchestrator::new(config, cache, version_tag);

            tracing::info!(race = manifest.race, "starting bake");
            let report = orchestrator.load_race(&manifest, &layer, &pool, &gpu).await?;
            pool.destroy();

            println!("{}", serde_json::to_string_pretty(&report)?);
        }

        Commands::PrintConfig => {
            let config = PipelineConfig::load().context("loading pipeline config")?;
            println!("{}", serde_json::to_string_pretty(&config)?);
        }
    }

    Ok(())
}
