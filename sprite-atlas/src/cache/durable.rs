//! Tier 2: one file per race under a cache directory, written atomically.
//!
//! The framing (magic + format version, tmp-file-then-rename) mirrors
//! `SaveStore::flush`/`load_or_new`; unlike the save store's fixed four
//! slots, race identifiers are open-ended, so each race gets its own file
//! rather than a shared slot array.

use std::ffi::OsString;
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use super::model::CachedAtlas;

pub const ATLAS_CACHE_MAGIC: [u8; 4] = *b"SPAT";
pub const ATLAS_CACHE_FORMAT_VERSION: u32 = 1;

pub struct DurableCache {
    dir: PathBuf,
}

impl DurableCache {
    pub fn new(dir: PathBuf) -> Self {
        Self { dir }
    }

    fn path_for(&self, race: u32) -> PathBuf {
        self.dir.join(format!("race-{race}.atlas"))
    }

    /// Reads back a cached atlas, gated on `version_tag` matching exactly
    /// (§4.9 "Version gating"). A mismatch or any read/parse failure is a
    /// quiet miss, not an error.
    pub fn read(&self, race: u32, version_tag: &str) -> Option<CachedAtlas> {
        let path = self.path_for(race);
        let bytes = fs::read(&path).ok()?;
        if bytes.len() < 8 || bytes[0..4] != ATLAS_CACHE_MAGIC {
            return None;
        }
        let format_version = u32::from_le_bytes(bytes[4..8].try_into().ok()?);
        if format_version != ATLAS_CACHE_FORMAT_VERSION {
            return None;
        }
        let atlas: CachedAtlas = bincode::deserialize(&bytes[8..]).ok()?;
        if atlas.version_tag != version_tag {
            return None;
        }
        Some(atlas)
    }

    /// Writes `atlas` atomically, skipping entirely if it exceeds
    /// `size_ceiling_bytes` (§4.9 "Size ceiling").
    pub fn write(&self, race: u32, atlas: &CachedAtlas, size_ceiling_bytes: u64) -> io::Result<()> {
        let payload = bincode::serialize(atlas)
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
        if payload.len() as u64 > size_ceiling_bytes {
            return Ok(());
        }

        fs::create_dir_all(&self.dir)?;
        let path = self.path_for(race);
        let tmp_path = tmp_sibling(&path)?;

        let mut out = Vec::with_capacity(payload.len() + 8);
        out.extend_from_slice(&ATLAS_CACHE_MAGIC);
        out.extend_from_slice(&ATLAS_CACHE_FORMAT_VERSION.to_le_bytes());
        out.extend_from_slice(&payload);

        {
            let mut f = fs::File::create(&tmp_path)?;
            f.write_all(&out)?;
            f.sync_all()?;
        }

        #[cfg(windows)]
        {
            if path.exists() {
                fs::remove_file(&path)?;
            }
        }

        fs::rename(&tmp_path, &path)
    }

    /// Retries once after clearing every *other* race's entry. Models the
    /// "retry with memory pressure relief" policy from §4.9: tier 1 is left
    /// untouched, only the durable tier's other files are dropped.
    pub fn write_with_retry(
        &self,
        race: u32,
        atlas: &CachedAtlas,
        size_ceiling_bytes: u64,
    ) -> io::Result<()> {
        match self.write(race, atlas, size_ceiling_bytes) {
            Ok(()) => Ok(()),
            Err(first_err) => {
                self.clear_except(race);
                self.write(race, atlas, size_ceiling_bytes).map_err(|_| first_err)
            }
        }
    }

    fn clear_except(&self, keep_race: u32) {
        let keep_path = self.path_for(keep_race);
        let Ok(entries) = fs::read_dir(&self.dir) else {
            return;
        };
        for entry in entries.flatten() {
            let path = entry.path();
            if path != keep_path {
                let _ = fs::remove_file(path);
            }
        }
    }
}

fn tmp_sibling(path: &Path) -> io::Result<PathBuf> {
    match path.file_name() {
        Some(name) => {
            let mut tmp_name = OsString::from(name);
            tmp_name.push(".tmp");
            Ok(path.with_file_name(tmp_name))
        }
        None => Err(io::Error::new(
            io::ErrorKind::InvalidInput,
            "durable cache path has no file name",
        )),
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
            per_layer_slots: vec![vec![(0, 16, 16, 512)]],
            combined_palette_bytes: vec![1, 2, 3, 4],
            per_file_palette_offsets: vec![(7, 0)],
            palette_total_colors: 1,
            palette_rows: 1,
            registry_snapshot: RegistrySnapshot::default(),
            image_bytes: vec![0u8; 8],
            timestamp: 1_000,
        }
    }

    #[test]
    fn write_then_read_round_trips() {
        let dir = tempfile::tempdir().unwrap();
        let cache = DurableCache::new(dir.path().to_path_buf());
        let atlas = sample("build-1:schema-7");
        cache.write(1, &atlas, 1_000_000).unwrap();

        let restored = cache.read(1, "build-1:schema-7").unwrap();
        assert_eq!(restored.combined_palette_bytes, atlas.combined_palette_bytes);
        assert_eq!(restored.image_bytes, atlas.image_bytes);
    }

    #[test]
    fn mismatched_version_tag_is_a_miss() {
        let dir = tempfile::tempdir().unwrap();
        let cache = DurableCache::new(dir.path().to_path_buf());
        cache.write(1, &sample("build-1:schema-7"), 1_000_000).unwrap();
        assert!(cache.read(1, "build-2:schema-7").is_none());
    }

    #[test]
    fn missing_file_is_a_miss_not_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let cache = DurableCache::new(dir.path().to_path_buf());
        assert!(cache.read(42, "anything").is_none());
    }

    #[test]
    fn oversized_payload_is_skipped_entirely() {
        let dir = tempfile::tempdir().unwrap();
        let cache = DurableCache::new(dir.path().to_path_buf());
        cache.write(1, &sample("v"), 4).unwrap();
        assert!(!dir.path().join("race-1.atlas").exists());
    }

    #[test]
    fn write_with_retry_succeeds_without_touching_other_races() {
        let dir = tempfile::tempdir().unwrap();
        let cache = DurableCache::new(dir.path().to_path_buf());
        cache.write(2, &sample("v"), 1_000_000).unwrap();
        cache.write_with_retry(1, &sample("v"), 1_000_000).unwrap();

        assert!(dir.path().join("race-1.atlas").exists());
        assert!(dir.path().join("race-2.atlas").exists());
    }

    #[test]
    fn clear_except_removes_every_other_file() {
        let dir = tempfile::tempdir().unwrap();
        let cache = DurableCache::new(dir.path().to_path_buf());
        cache.write(1, &sample("v"), 1_000_000).unwrap();
        cache.write(2, &sample("v"), 1_000_000).unwrap();
        cache.write(3, &sample("v"), 1_000_000).unwrap();

        cache.clear_except(2);

        assert!(!dir.path().join("race-1.atlas").exists());
        assert!(dir.path().join("race-2.atlas").exists());
        assert!(!dir.path().join("race-3.atlas").exists());
    }
}
