//! End-to-end scenarios for the load orchestrator and two-tier cache,
//! exercising the pipeline the way `sprite-atlas-bake` does: real
//! container bytes in, a recorded GPU, a real (temp-directory) durable
//! cache.

use sprite_atlas::file_layer::RecordingFileLayer;
use sprite_atlas::gpu::RecordingGpu;
use sprite_atlas::ids::{Direction, SubKind};
use sprite_atlas::orchestrator::{BakeManifest, PlainSprite, SpriteLookup, UnitRequest};
use sprite_atlas::{CacheTier, DecoderPool, LoadOrchestrator, PipelineConfig, TwoTierCache};

fn push_header(out: &mut Vec<u8>, image_dir: u32, jobs: u32, dirs: u32, frames: u32) {
    out.extend_from_slice(b"SPRC");
    out.extend_from_slice(&1u16.to_le_bytes());
    out.push(1);
    out.push(0);
    out.extend_from_slice(&image_dir.to_le_bytes());
    out.extend_from_slice(&jobs.to_le_bytes());
    out.extend_from_slice(&dirs.to_le_bytes());
    out.extend_from_slice(&frames.to_le_bytes());
}

fn push_image(out: &mut Vec<u8>, w: u16, h: u16, palette_group_offset: u16, body: &[u8]) {
    out.extend_from_slice(&w.to_le_bytes());
    out.extend_from_slice(&h.to_le_bytes());
    out.extend_from_slice(&0i16.to_le_bytes());
    out.extend_from_slice(&0i16.to_le_bytes());
    out.push(0); // RLE
    out.push(0);
    out.extend_from_slice(&palette_group_offset.to_le_bytes());
    out.extend_from_slice(&(body.len() as u32).to_le_bytes());
    out.extend_from_slice(body);
}

/// One job -> one direction -> one frame, pointing at a single image.
fn single_sprite_container(w: u16, h: u16, palette_group_offset: u16, body: &[u8]) -> Vec<u8> {
    let mut bytes = Vec::new();
    push_header(&mut bytes, 1, 1, 1, 1);
    bytes.extend_from_slice(&0u32.to_le_bytes()); // image dir: offset 0
    bytes.extend_from_slice(&0u32.to_le_bytes());
    bytes.extend_from_slice(&0u32.to_le_bytes()); // job 0 -> direction [0,1)
    bytes.extend_from_slice(&1u32.to_le_bytes());
    bytes.extend_from_slice(&0u32.to_le_bytes()); // direction 0 -> frame [0,1)
    bytes.extend_from_slice(&1u32.to_le_bytes());
    bytes.extend_from_slice(&0u32.to_le_bytes()); // frame 0 -> image index 0
    push_image(&mut bytes, w, h, palette_group_offset, body);
    bytes
}

fn manifest_with_one_unit(race: u32, file_id: u32) -> BakeManifest {
    BakeManifest {
        race,
        units: vec![UnitRequest {
            sub_kind: SubKind(1),
            direction: Direction(0),
            sprite: PlainSprite { file_id, lookup: SpriteLookup::FirstFrameOfJob(0) },
        }],
        ..Default::default()
    }
}

fn untrimmed_config() -> PipelineConfig {
    PipelineConfig { trim_top: 0, trim_bottom: 0, ..Default::default() }
}

/// Scenario 1 (empty-palette bake) driven through the full pipeline: a
/// fully-transparent 2x2 RLE image ends up registered with the padded
/// region the packer would hand out for the first sprite on a fresh atlas.
#[tokio::test]
async fn empty_palette_bake_registers_one_padded_region() {
    let dir = tempfile::tempdir().unwrap();
    let mut layer = RecordingFileLayer::new();
    layer.insert(7, single_sprite_container(2, 2, 0, &[0, 4]));
    let pool = DecoderPool::new(2);
    let gpu = RecordingGpu::new(64);
    let cache = TwoTierCache::new(dir.path().to_path_buf(), false, 1_000_000_000);
    let mut orchestrator = LoadOrchestrator::new(untrimmed_config(), cache, "v1".to_string());

    let manifest = manifest_with_one_unit(1, 7);
    let report = orchestrator.load_race(&manifest, &layer, &pool, &gpu).await.unwrap();

    assert_eq!(report.registered, 1);
    let entry = orchestrator.registry().unit(SubKind(1), Direction(0)).unwrap();
    assert_eq!(entry.region.layer_index, 0);
    assert_eq!(entry.region.x, 1);
    assert_eq!(entry.region.y, 1);
    assert_eq!(entry.region.w, 2);
    assert_eq!(entry.region.h, 2);
    pool.destroy();
}

/// Scenario 5: a cold bake writes through to the durable tier; dropping
/// tier 1 and restoring again is satisfied from disk, not a re-decode.
#[tokio::test]
async fn cache_miss_then_hit_round_trips_through_durable_tier() {
    let dir = tempfile::tempdir().unwrap();
    let mut layer = RecordingFileLayer::new();
    layer.insert(7, single_sprite_container(4, 4, 0, &[0, 16]));
    let pool = DecoderPool::new(2);
    let gpu = RecordingGpu::new(64);

    let manifest = manifest_with_one_unit(5, 7);

    {
        let cache = TwoTierCache::new(dir.path().to_path_buf(), false, 1_000_000_000);
        let mut orchestrator = LoadOrchestrator::new(untrimmed_config(), cache, "v1".to_string());
        let report = orchestrator.load_race(&manifest, &layer, &pool, &gpu).await.unwrap();
        assert_eq!(report.tier, Some(CacheTier::Cold));
        assert_eq!(report.registered, 1);
    }

    assert!(dir.path().join("race-5.atlas").exists());

    // Fresh orchestrator + fresh in-memory tier: simulates restarting the
    // process and restoring from disk alone.
    let cache = TwoTierCache::new(dir.path().to_path_buf(), false, 1_000_000_000);
    let mut orchestrator = LoadOrchestrator::new(untrimmed_config(), cache, "v1".to_string());
    let report = orchestrator.load_race(&manifest, &layer, &pool, &gpu).await.unwrap();

    assert_eq!(report.tier, Some(CacheTier::Durable));
    assert_eq!(report.registered, 1);
    assert!(orchestrator.registry().unit(SubKind(1), Direction(0)).is_some());
    pool.destroy();
}

/// Scenario 6: bumping the version tag invalidates a durable entry; the
/// next bake writes back under the new tag and a third load under the old
/// tag still misses.
#[tokio::test]
async fn version_bump_invalidates_durable_cache_entry() {
    let dir = tempfile::tempdir().unwrap();
    let mut layer = RecordingFileLayer::new();
    layer.insert(7, single_sprite_container(4, 4, 0, &[0, 16]));
    let pool = DecoderPool::new(2);
    let gpu = RecordingGpu::new(64);
    let manifest = manifest_with_one_unit(9, 7);

    {
        let cache = TwoTierCache::new(dir.path().to_path_buf(), false, 1_000_000_000);
        let mut orchestrator =
            LoadOrchestrator::new(untrimmed_config(), cache, "schema-1".to_string());
        let report = orchestrator.load_race(&manifest, &layer, &pool, &gpu).await.unwrap();
        assert_eq!(report.tier, Some(CacheTier::Cold));
    }

    // Same durable file on disk, but a bumped version tag: restore must miss
    // and the bake runs cold again, overwriting the file with the new tag.
    let cache = TwoTierCache::new(dir.path().to_path_buf(), false, 1_000_000_000);
    let mut orchestrator =
        LoadOrchestrator::new(untrimmed_config(), cache, "schema-2".to_string());
    let report = orchestrator.load_race(&manifest, &layer, &pool, &gpu).await.unwrap();
    assert_eq!(report.tier, Some(CacheTier::Cold));
    assert_eq!(report.registered, 1);

    // A further load under the old tag still misses; the file now holds
    // schema-2's entry.
    let cache_old_tag = TwoTierCache::new(dir.path().to_path_buf(), false, 1_000_000_000);
    let mut orchestrator_old_tag =
        LoadOrchestrator::new(untrimmed_config(), cache_old_tag, "schema-1".to_string());
    let report = orchestrator_old_tag
        .load_race(&manifest, &layer, &pool, &gpu)
        .await
        .unwrap();
    assert_eq!(report.tier, Some(CacheTier::Cold));

    pool.destroy();
}
