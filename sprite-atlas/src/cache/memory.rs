//! Tier 1: process-lifetime, in-memory cache keyed by race. Never touched
//! by the durable tier's memory-pressure recovery (§4.9).

use std::sync::{Arc, Mutex};

use hashbrown::HashMap;

use super::model::CachedAtlas;

#[derive(Default)]
pub struct MemoryCache {
    entries: Mutex<HashMap<u32, Arc<CachedAtlas>>>,
}

impl MemoryCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, race: u32, version_tag: &str) -> Option<Arc<CachedAtlas>> {
        let entries = self.entries.lock().unwrap();
        let entry = entries.get(&race)?;
        if entry.version_tag == version_tag {
            Some(entry.clone())
        } else {
            None
        }
    }

    pub fn insert(&self, race: u32, atlas: Arc<CachedAtlas>) {
        self.entries.lock().unwrap().insert(race, atlas);
    }

    pub fn clear(&self) {
        self.entries.lock().unwrap().clear();
    }

    pub fn len(&self) -> usize {
        self.entries.lock().unwrap().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::RegistrySnapshot;

    fn sample(version_tag: &str) -> CachedAtlas {
        CachedAtlas {
            version_tag: version_tag.to_string(),
            race: 1,
            layer_count: 1,
            max_layers: 4,
            per_layer_slots: vec![vec![]],
            combined_palette_bytes: vec![],
            per_file_palette_offsets: vec![],
            palette_total_colors: 0,
            palette_rows: 0,
            registry_snapshot: RegistrySnapshot::default(),
            image_bytes: vec![],
            timestamp: 0,
        }
    }

    #[test]
    fn get_respects_version_tag() {
        let cache = MemoryCache::new();
        cache.insert(1, Arc::new(sample("v1")));
        assert!(cache.get(1, "v1").is_some());
        assert!(cache.get(1, "v2").is_none());
    }

    #[test]
    fn miss_for_unknown_race() {
        let cache = MemoryCache::new();
        assert!(cache.get(9, "v1").is_none());
    }
}
