//! Process-wide container file-set interning map (§3 "Ownership and
//! lifecycle", §5 "Container file-set cache is process-wide").
//!
//! Parsing a file-id is idempotent; concurrent opens of the same id are
//! de-duplicated by sharing a single in-flight slot rather than locking
//! twice, mirroring the lazy `OnceLock`-per-entry index pattern used for
//! the data pack's string lookups.

use std::sync::{Arc, Mutex, OnceLock};

use super::{ContainerError, FileSet};
use crate::file_layer::AssetFileLayer;

type Slot = Arc<OnceLock<Result<Arc<FileSet>, String>>>;

/// Interning cache of parsed [`FileSet`]s, keyed by numeric file id.
pub struct FileSetCache {
    entries: Mutex<hashbrown::HashMap<u32, Slot>>,
}

impl Default for FileSetCache {
    fn default() -> Self {
        Self::new()
    }
}

impl FileSetCache {
    pub fn new() -> Self {
        Self {
            entries: Mutex::new(hashbrown::HashMap::new()),
        }
    }

    /// Open (and cache) the file-set for `file_id`, reading through
    /// `layer` on first access. Returns `None` if the backing file is
    /// absent — a missing-asset skip per §7, not a hard error.
    pub fn open(
        &self,
        file_id: u32,
        extension: &str,
        layer: &dyn AssetFileLayer,
    ) -> Option<Arc<FileSet>> {
        let slot = {
            let mut entries = self.entries.lock().unwrap();
            entries
                .entry(file_id)
                .or_insert_with(|| Arc::new(OnceLock::new()))
                .clone()
        };

        let result = slot.get_or_init(|| {
            let bytes = layer.read_one(file_id, extension)?;
            match FileSet::parse(bytes) {
                Ok(fs) => Some(Arc::new(fs)),
                Err(e) => {
                    tracing::debug!(file_id, error = %FormatErr(e), "malformed container");
                    None
                }
            }
            .ok_or_else(|| format!("file-id {file_id} missing or malformed"))
        });

        result.as_ref().ok().cloned()
    }

    /// Clears every interned file-set. Called on race switch (§4.8).
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

struct FormatErr(ContainerError);
impl std::fmt::Display for FormatErr {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::file_layer::RecordingFileLayer;

    fn minimal_container() -> Vec<u8> {
        let mut bytes = Vec::new();
        bytes.extend_from_slice(b"SPRC");
        bytes.extend_from_slice(&1u16.to_le_bytes());
        bytes.push(0);
        bytes.push(0);
        bytes.extend_from_slice(&0u32.to_le_bytes());
        bytes.extend_from_slice(&0u32.to_le_bytes());
        bytes.extend_from_slice(&0u32.to_le_bytes());
        bytes.extend_from_slice(&0u32.to_le_bytes());
        bytes
    }

    #[test]
    fn open_caches_by_file_id() {
        let mut layer = RecordingFileLayer::new();
        layer.insert(1, minimal_container());
        let cache = FileSetCache::new();

        let a = cache.open(1, "dat", &layer).unwrap();
        let b = cache.open(1, "dat", &layer).unwrap();
        assert!(Arc::ptr_eq(&a, &b));
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn open_returns_none_for_missing_file() {
        let layer = RecordingFileLayer::new();
        let cache = FileSetCache::new();
        assert!(cache.open(99, "dat", &layer).is_none());
    }

    #[test]
    fn clear_empties_the_interning_map() {
        let mut layer = RecordingFileLayer::new();
        layer.insert(1, minimal_container());
        let cache = FileSetCache::new();
        cache.open(1, "dat", &layer);
        assert_eq!(cache.len(), 1);
        cache.clear();
        assert!(cache.is_empty());
    }
}
