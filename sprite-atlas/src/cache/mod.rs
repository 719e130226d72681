//! Two-tier cache (§2.9 / §4.9): an in-memory tier backed by a durable,
//! file-per-race tier on disk. Tier 1 always gets populated on a hit in
//! tier 2, so a race only ever pays the disk read once per process.

mod durable;
mod memory;
mod model;

pub use durable::DurableCache;
pub use memory::MemoryCache;
pub use model::CachedAtlas;

use std::path::PathBuf;
use std::sync::Arc;

use serde::Serialize;
use tracing::warn;

/// Which tier (if any) satisfied a `restore` call — useful for telemetry
/// and for the "cache miss then hit" scenario's assertions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum CacheTier {
    Cold,
    Memory,
    Durable,
}

pub struct TwoTierCache {
    memory: MemoryCache,
    durable: DurableCache,
    disabled: bool,
    size_ceiling_bytes: u64,
}

impl TwoTierCache {
    pub fn new(durable_dir: PathBuf, disabled: bool, size_ceiling_bytes: u64) -> Self {
        Self {
            memory: MemoryCache::new(),
            durable: DurableCache::new(durable_dir),
            disabled,
            size_ceiling_bytes,
        }
    }

    /// Looks in tier 1, then tier 2, promoting a tier-2 hit into tier 1.
    /// A disabled cache always reports `Cold`.
    pub fn restore(&self, race: u32, version_tag: &str) -> (Option<Arc<CachedAtlas>>, CacheTier) {
        if self.disabled {
            return (None, CacheTier::Cold);
        }
        if let Some(atlas) = self.memory.get(race, version_tag) {
            return (Some(atlas), CacheTier::Memory);
        }
        if let Some(atlas) = self.durable.read(race, version_tag) {
            let atlas = Arc::new(atlas);
            self.memory.insert(race, atlas.clone());
            return (Some(atlas), CacheTier::Durable);
        }
        (None, CacheTier::Cold)
    }

    /// Always refreshes tier 1. Durable writes are best-effort: failures
    /// are logged and otherwise ignored, per §4.9 ("a failed durable write
    /// does not fail the bake").
    pub fn save(&self, race: u32, atlas: CachedAtlas) {
        let atlas = Arc::new(atlas);
        self.memory.insert(race, atlas.clone());
        if self.disabled {
            return;
        }
        if let Err(e) = self.durable.write_with_retry(race, &atlas, self.size_ceiling_bytes) {
            warn!(race, error = %e, "durable cache write abandoned");
        }
    }

    pub fn clear_memory(&self) {
        self.memory.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::RegistrySnapshot;

    fn sample(race: u32, version_tag: &str) -> CachedAtlas {
        CachedAtlas {
            version_tag: version_tag.to_string(),
            race,
            layer_count: 1,
            max_layers: 4,
            per_layer_slots: vec![vec![]],
            combined_palette_bytes: vec![9, 9],
            per_file_palette_offsets: vec![],
            palette_total_colors: 0,
            palette_rows: 0,
            registry_snapshot: RegistrySnapshot::default(),
            image_bytes: vec![1, 2, 3, 4],
            timestamp: 0,
        }
    }

    #[test]
    fn cold_then_save_then_hit_from_memory() {
        let dir = tempfile::tempdir().unwrap();
        let cache = TwoTierCache::new(dir.path().to_path_buf(), false, 1_000_000);

        let (atlas, tier) = cache.restore(1, "v1");
        assert!(atlas.is_none());
        assert_eq!(tier, CacheTier::Cold);

        cache.save(1, sample(1, "v1"));
        let (atlas, tier) = cache.restore(1, "v1");
        assert!(atlas.is_some());
        assert_eq!(tier, CacheTier::Memory);
    }

    #[test]
    fn clearing_memory_falls_back_to_durable_tier() {
        let dir = tempfile::tempdir().unwrap();
        let cache = TwoTierCache::new(dir.path().to_path_buf(), false, 1_000_000);
        cache.save(1, sample(1, "v1"));
        cache.clear_memory();

        let (atlas, tier) = cache.restore(1, "v1");
        assert!(atlas.is_some());
        assert_eq!(tier, CacheTier::Durable);
    }

    #[test]
    fn version_mismatch_is_a_miss_on_both_tiers() {
        let dir = tempfile::tempdir().unwrap();
        let cache = TwoTierCache::new(dir.path().to_path_buf(), false, 1_000_000);
        cache.save(1, sample(1, "v1"));

        let (atlas, tier) = cache.restore(1, "v2");
        assert!(atlas.is_none());
        assert_eq!(tier, CacheTier::Cold);
    }

    #[test]
    fn disabled_cache_never_hits() {
        let dir = tempfile::tempdir().unwrap();
        let cache = TwoTierCache::new(dir.path().to_path_buf(), true, 1_000_000);
        cache.save(1, sample(1, "v1"));

        let (atlas, tier) = cache.restore(1, "v1");
        assert!(atlas.is_none());
        assert_eq!(tier, CacheTier::Cold);
        assert!(!dir.path().join("race-1.atlas").exists());
    }
}
