//! Load orchestrator (§2.8 / §4.8).
//!
//! Drives one race's bake end to end: opens container file-sets, registers
//! palettes, decodes and packs sprites category by category as "safe
//! progressive batches" (decode -> upload -> register -> yield), saves the
//! result to both cache tiers, and records phase timings. Runs on a single
//! driver task; the decoder pool is the only other concurrency in play.

use std::collections::HashSet;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::atlas::{AtlasError, AtlasPacker};
use crate::cache::{CacheTier, CachedAtlas, TwoTierCache};
use crate::config::PipelineConfig;
use crate::container::{FileSet, FileSetCache};
use crate::decoder_pool::{DecodeRequest, DecoderPool};
use crate::error::{PipelineError, SkipReason};
use crate::file_layer::AssetFileLayer;
use crate::gpu::AtlasGpu;
use crate::ids::{Direction, EntityKind, MaterialKind, SequenceKey, SubKind, Variant};
use crate::palette::{CombinedPalette, PerFilePalette};
use crate::registry::{AnimatedEntry, BuildingEntry, SpriteEntry, SpriteRegistry};
use crate::telemetry::PhaseTimer;

/// Pixel-to-world-unit scale. Not a recognised configuration option (§6
/// only lists pipeline-internal tuning); the spec leaves sprite-to-world
/// scaling to the renderer's own convention, so it is fixed here rather
/// than exposed as a knob nothing else in this crate would read.
const WORLD_UNITS_PER_PIXEL: f32 = 1.0 / 32.0;

/// Where in its source container a requested sprite's first image lives.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub enum SpriteLookup {
    /// Directly addresses one image by its index in the image directory.
    ImageIndex(u32),
    /// Walks job -> first direction -> first frame.
    FirstFrameOfJob(u32),
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct PlainSprite {
    pub file_id: u32,
    pub lookup: SpriteLookup,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct BuildingRequest {
    pub sub_kind: SubKind,
    pub construction: PlainSprite,
    pub completed: PlainSprite,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct MapObjectRequest {
    pub sub_kind: SubKind,
    pub variant: Variant,
    pub sprite: PlainSprite,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct ResourceRequest {
    pub material: MaterialKind,
    pub direction: Direction,
    pub sprite: PlainSprite,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct UnitRequest {
    pub sub_kind: SubKind,
    pub direction: Direction,
    pub sprite: PlainSprite,
}

/// An animated sequence request: walks `job_index`'s every direction and
/// every frame in that direction.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SequenceRequest {
    pub entity_kind: EntityKind,
    pub sub_kind: SubKind,
    pub key: SequenceKey,
    pub file_id: u32,
    pub job_index: u32,
    pub frame_duration_ms: u32,
    pub loops: bool,
}

/// Everything needed to bake one race. File-id/job-index layout is decided
/// by whatever owns the container assets (outside this crate, per §6's file
/// layer contract) and handed in as data rather than hardcoded here.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BakeManifest {
    pub race: u32,
    pub buildings: Vec<BuildingRequest>,
    pub map_objects: Vec<MapObjectRequest>,
    pub resources: Vec<ResourceRequest>,
    pub units: Vec<UnitRequest>,
    pub carrier_variants: Vec<SequenceRequest>,
    pub worker_sequences: Vec<SequenceRequest>,
}

impl BakeManifest {
    fn file_ids(&self) -> HashSet<u32> {
        let mut ids = HashSet::new();
        for b in &self.buildings {
            ids.insert(b.construction.file_id);
            ids.insert(b.completed.file_id);
        }
        for m in &self.map_objects {
            ids.insert(m.sprite.file_id);
        }
        for r in &self.resources {
            ids.insert(r.sprite.file_id);
        }
        for u in &self.units {
            ids.insert(u.sprite.file_id);
        }
        for s in self.carrier_variants.iter().chain(&self.worker_sequences) {
            ids.insert(s.file_id);
        }
        ids
    }
}

/// Report of one bake, surfaced for observability and for the offline bake
/// CLI to print as JSON.
#[derive(Debug, Clone, Default, Serialize)]
pub struct BakeReport {
    pub race: u32,
    pub tier: Option<CacheTier>,
    pub registered: usize,
    pub skipped: Vec<SkipReason>,
    pub atlas_full_categories: Vec<&'static str>,
    pub phase_timings_ms: Vec<(&'static str, u64)>,
}

/// Drives the bake for one race against its collaborators. Owned by
/// whatever holds the renderer's sprite-lookup surface; there is one
/// instance per running race context (typically one, possibly two during
/// a race switch's tail).
pub struct LoadOrchestrator {
    config: PipelineConfig,
    file_set_cache: FileSetCache,
    combined_palette: CombinedPalette,
    atlas: Option<AtlasPacker>,
    registry: SpriteRegistry,
    cache: TwoTierCache,
    version_tag: String,
    /// Set by [`Self::decode_sprite`] when a reservation fails with
    /// `AtlasError::Full`; each category checks and resets it to decide
    /// whether to terminate early (§4.8 "Failure semantics").
    atlas_full: bool,
}

impl LoadOrchestrator {
    pub fn new(config: PipelineConfig, cache: TwoTierCache, version_tag: String) -> Self {
        Self {
            config,
            file_set_cache: FileSetCache::new(),
            combined_palette: CombinedPalette::new(256),
            atlas: None,
            registry: SpriteRegistry::new(),
            cache,
            version_tag,
            atlas_full: false,
        }
    }

    pub fn registry(&self) -> &SpriteRegistry {
        &self.registry
    }

    /// Runs a full bake for `manifest.race`, trying the cache first. If
    /// either tier hits on a version-matching entry, the atlas, palette,
    /// and registry are reconstructed from it and no decoding happens.
    pub async fn load_race(
        &mut self,
        manifest: &BakeManifest,
        layer: &dyn AssetFileLayer,
        pool: &DecoderPool,
        gpu: &dyn AtlasGpu,
    ) -> Result<BakeReport, PipelineError> {
        self.reset_for_race_switch();

        let mut report = BakeReport { race: manifest.race, ..Default::default() };

        let restore_timer = PhaseTimer::start("cache_restore");
        let (cached, tier) = self.cache.restore(manifest.race, &self.version_tag);
        report.phase_timings_ms.push(restore_timer.finish(self.config.slow_op_threshold_ms));
        report.tier = Some(tier);

        if let Some(cached) = cached {
            self.install(&cached, gpu)?;
            report.registered = self.registry.len();
            return Ok(report);
        }

        self.bake(manifest, layer, pool, gpu, &mut report).await?;
        report.tier = Some(CacheTier::Cold);
        Ok(report)
    }

    fn reset_for_race_switch(&mut self) {
        self.registry.clear();
        self.atlas = None;
        self.combined_palette = CombinedPalette::new(256);
        self.file_set_cache.clear();
    }

    /// Reconstructs palette, atlas, and registry from a cache hit (§4.9
    /// "Install"). The atlas's `gpu_layer_count` is forced to zero so the
    /// next `update` re-uploads every layer in full.
    fn install(&mut self, cached: &CachedAtlas, gpu: &dyn AtlasGpu) -> Result<(), PipelineError> {
        self.combined_palette = CombinedPalette::from_parts(
            cached.combined_palette_bytes.clone(),
            cached.per_file_palette_offsets.iter().copied().collect(),
            self.combined_palette.colors_per_row(),
        );
        let layer_bytes = cached.layer_pixel_buffers(self.config.layer_size);
        let mut atlas = AtlasPacker::restore(
            self.config.layer_size,
            cached.max_layers,
            self.config.padding_pixels,
            self.config.row_bucket_pixels,
            layer_bytes,
            cached.per_layer_slots.clone(),
        );
        atlas
            .update(gpu)
            .map_err(|e| PipelineError::GpuAllocation(e.to_string()))?;
        self.atlas = Some(atlas);
        self.registry = SpriteRegistry::deserialize(cached.registry_snapshot.clone());
        self.combined_palette
            .upload(gpu)
            .map_err(|e| PipelineError::GpuAllocation(e.to_string()))?;
        Ok(())
    }

    async fn bake(
        &mut self,
        manifest: &BakeManifest,
        layer: &dyn AssetFileLayer,
        pool: &DecoderPool,
        gpu: &dyn AtlasGpu,
        report: &mut BakeReport,
    ) -> Result<(), PipelineError> {
        let preload_timer = PhaseTimer::start("file_preload");
        let file_ids = manifest.file_ids();
        // `FileSetCache::open` is synchronous (in-process interning plus a
        // direct file-layer read), so warming the pool and opening files
        // share this phase without needing a join over two futures.
        pool.warm_up().await;
        let file_sets: std::collections::HashMap<u32, Option<Arc<FileSet>>> = file_ids
            .iter()
            .map(|&id| (id, self.file_set_cache.open(id, "dat", layer)))
            .collect();
        report.phase_timings_ms.push(preload_timer.finish(self.config.slow_op_threshold_ms));

        if file_ids.iter().all(|id| file_sets.get(id).and_then(|o| o.clone()).is_none())
            && !file_ids.is_empty()
        {
            debug!(race = manifest.race, "no container files found for race");
            return Ok(());
        }

        let palette_timer = PhaseTimer::start("palette_registration");
        for (&file_id, file_set) in &file_sets {
            let Some(file_set) = file_set else {
                report.skipped.push(SkipReason::MissingAsset { file_id });
                continue;
            };
            let _ = file_set;
            // Palette bytes come from the file layer directly, not from the
            // container's image tables (§4.2); the file layer's extension
            // convention for palette reads is the same read_one contract.
            if let Some(bytes) = layer.read_one(file_id, "pal") {
                let palette = PerFilePalette::from_rgba_bytes(bytes);
                if let Err(e) = self.combined_palette.register(file_id, &palette) {
                    debug!(file_id, error = %e, "palette re-registration rejected");
                }
            }
        }
        report.phase_timings_ms.push(palette_timer.finish(self.config.slow_op_threshold_ms));

        let allocation_timer = PhaseTimer::start("atlas_allocation");
        let max_layers = self.config.initial_max_layers.min(gpu.max_array_texture_layers());
        self.atlas = Some(AtlasPacker::new(
            self.config.layer_size,
            max_layers,
            self.config.padding_pixels,
            self.config.row_bucket_pixels,
        ));
        report.phase_timings_ms.push(allocation_timer.finish(self.config.slow_op_threshold_ms));

        self.bake_buildings(manifest, &file_sets, pool, gpu, report).await?;
        self.bake_map_objects(manifest, &file_sets, pool, gpu, report).await?;
        self.bake_resources(manifest, &file_sets, pool, gpu, report).await?;
        self.bake_units(manifest, &file_sets, pool, gpu, report).await?;
        self.bake_sequences("carrier_variants", &manifest.carrier_variants, &file_sets, pool, gpu, report)
            .await?;
        self.bake_sequences("worker_sequences", &manifest.worker_sequences, &file_sets, pool, gpu, report)
            .await?;

        self.combined_palette
            .upload(gpu)
            .map_err(|e| PipelineError::GpuAllocation(e.to_string()))?;

        self.save_to_cache(manifest.race);
        report.registered = self.registry.len();
        Ok(())
    }

    async fn decode_sprite(
        &mut self,
        file_sets: &std::collections::HashMap<u32, Option<Arc<FileSet>>>,
        sprite: &PlainSprite,
        pool: &DecoderPool,
        skipped: &mut Vec<SkipReason>,
    ) -> Option<SpriteEntry> {
        let file_set = file_sets.get(&sprite.file_id).and_then(|o| o.clone())?;

        let image_index = match sprite.lookup {
            SpriteLookup::ImageIndex(i) => i,
            SpriteLookup::FirstFrameOfJob(job_index) => {
                match first_frame_image_index(&file_set, job_index) {
                    Some(i) => i,
                    None => {
                        skipped.push(SkipReason::MalformedContainer {
                            detail: format!("job {job_index} has no frames"),
                        });
                        return None;
                    }
                }
            }
        };

        let Some(byte_offset) = file_set.image_offset(image_index as usize) else {
            skipped.push(SkipReason::MalformedContainer {
                detail: format!("image index {image_index} out of range"),
            });
            return None;
        };

        let header = match file_set.read_image(byte_offset) {
            Ok(h) => h,
            Err(e) => {
                skipped.push(SkipReason::MalformedContainer { detail: e.to_string() });
                return None;
            }
        };

        if self.config.trim_top + self.config.trim_bottom >= header.height as u32 {
            skipped.push(SkipReason::TrimmedToNothing);
            return None;
        }

        let body = file_set.image_body(header.body_offset, header.body_len).to_vec();
        let decoded = pool
            .decode(DecodeRequest {
                body,
                width: header.width,
                height: header.height,
                encoding: header.encoding_type,
                palette_group_offset: header.palette_group_offset,
                trim_top: self.config.trim_top,
                trim_bottom: self.config.trim_bottom,
            })
            .await;

        let mut decoded = match decoded {
            Ok(d) => d,
            Err(e) => {
                skipped.push(SkipReason::DecodeFailed { detail: e.to_string() });
                return None;
            }
        };

        if decoded.inner_height == 0 {
            skipped.push(SkipReason::TrimmedToNothing);
            return None;
        }

        let base_offset = self.combined_palette.offset_of(sprite.file_id);
        if base_offset >= 0 {
            apply_palette_base_offset(&mut decoded.indices, base_offset as u32);
        }

        let atlas = self.atlas.as_mut().expect("atlas allocated before categories bake");
        let region = match atlas.reserve(decoded.width as u32, decoded.inner_height as u32) {
            Ok(r) => r,
            Err(AtlasError::SpriteTooLarge { width, height, layer_size }) => {
                skipped.push(SkipReason::DecodeFailed {
                    detail: format!("sprite {width}x{height} too large for {layer_size}x{layer_size} layer"),
                });
                return None;
            }
            Err(AtlasError::Full { .. }) => {
                self.atlas_full = true;
                return None;
            }
        };
        atlas.blit(&region, &decoded.indices);

        Some(SpriteEntry {
            region,
            anchor_offset_x: -(header.anchor_left as f32) * WORLD_UNITS_PER_PIXEL,
            anchor_offset_y: -(header.anchor_top as f32 + self.config.trim_top as f32)
                * WORLD_UNITS_PER_PIXEL,
            world_width: decoded.width as f32 * WORLD_UNITS_PER_PIXEL,
            world_height: decoded.inner_height as f32 * WORLD_UNITS_PER_PIXEL,
        })
    }

    async fn bake_buildings(
        &mut self,
        manifest: &BakeManifest,
        file_sets: &std::collections::HashMap<u32, Option<Arc<FileSet>>>,
        pool: &DecoderPool,
        gpu: &dyn AtlasGpu,
        report: &mut BakeReport,
    ) -> Result<(), PipelineError> {
        let timer = PhaseTimer::start("category_buildings");
        let mut batch = Vec::new();
        let mut category_full = false;

        for b in &manifest.buildings {
            if category_full {
                break;
            }
            let Some(construction) =
                self.decode_sprite(file_sets, &b.construction, pool, &mut report.skipped).await
            else {
                if self.atlas_is_full() {
                    category_full = true;
                }
                continue;
            };
            let Some(completed) =
                self.decode_sprite(file_sets, &b.completed, pool, &mut report.skipped).await
            else {
                if self.atlas_is_full() {
                    category_full = true;
                }
                continue;
            };
            batch.push((b.sub_kind, construction, completed));
        }

        self.update_gpu(gpu, report)?;
        for (sub_kind, construction, completed) in batch {
            self.registry
                .insert_building(sub_kind, BuildingEntry { construction, completed });
        }
        if category_full {
            report.atlas_full_categories.push("buildings");
        }
        report.phase_timings_ms.push(timer.finish(self.config.slow_op_threshold_ms));
        Ok(())
    }

    async fn bake_map_objects(
        &mut self,
        manifest: &BakeManifest,
        file_sets: &std::collections::HashMap<u32, Option<Arc<FileSet>>>,
        pool: &DecoderPool,
        gpu: &dyn AtlasGpu,
        report: &mut BakeReport,
    ) -> Result<(), PipelineError> {
        let timer = PhaseTimer::start("category_map_objects");
        let mut batch = Vec::new();
        let mut category_full = false;

        for m in &manifest.map_objects {
            if category_full {
                break;
            }
            let Some(entry) = self.decode_sprite(file_sets, &m.sprite, pool, &mut report.skipped).await else {
                if self.atlas_is_full() {
                    category_full = true;
                }
                continue;
            };
            batch.push((m.sub_kind, m.variant, entry));
        }

        self.update_gpu(gpu, report)?;
        for (sub_kind, variant, entry) in batch {
            self.registry.insert_map_object(sub_kind, variant, entry);
        }
        if category_full {
            report.atlas_full_categories.push("map_objects");
        }
        report.phase_timings_ms.push(timer.finish(self.config.slow_op_threshold_ms));
        Ok(())
    }

    async fn bake_resources(
        &mut self,
        manifest: &BakeManifest,
        file_sets: &std::collections::HashMap<u32, Option<Arc<FileSet>>>,
        pool: &DecoderPool,
        gpu: &dyn AtlasGpu,
        report: &mut BakeReport,
    ) -> Result<(), PipelineError> {
        let timer = PhaseTimer::start("category_resources");
        let mut batch = Vec::new();
        let mut category_full = false;

        for r in &manifest.resources {
            if category_full {
                break;
            }
            let Some(entry) = self.decode_sprite(file_sets, &r.sprite, pool, &mut report.skipped).await else {
                if self.atlas_is_full() {
                    category_full = true;
                }
                continue;
            };
            batch.push((r.material, r.direction, entry));
        }

        self.update_gpu(gpu, report)?;
        for (material, direction, entry) in batch {
            self.registry.insert_resource(material, direction, entry);
        }
        if category_full {
            report.atlas_full_categories.push("resources");
        }
        report.phase_timings_ms.push(timer.finish(self.config.slow_op_threshold_ms));
        Ok(())
    }

    async fn bake_units(
        &mut self,
        manifest: &BakeManifest,
        file_sets: &std::collections::HashMap<u32, Option<Arc<FileSet>>>,
        pool: &DecoderPool,
        gpu: &dyn AtlasGpu,
        report: &mut BakeReport,
    ) -> Result<(), PipelineError> {
        let timer = PhaseTimer::start("category_units");
        let mut batch = Vec::new();
        let mut category_full = false;

        for u in &manifest.units {
            if category_full {
                break;
            }
            let Some(entry) = self.decode_sprite(file_sets, &u.sprite, pool, &mut report.skipped).await else {
                if self.atlas_is_full() {
                    category_full = true;
                }
                continue;
            };
            batch.push((u.sub_kind, u.direction, entry));
        }

        self.update_gpu(gpu, report)?;
        for (sub_kind, direction, entry) in batch {
            self.registry.insert_unit(sub_kind, direction, entry);
        }
        if category_full {
            report.atlas_full_categories.push("units");
        }
        report.phase_timings_ms.push(timer.finish(self.config.slow_op_threshold_ms));
        Ok(())
    }

    async fn bake_sequences(
        &mut self,
        label: &'static str,
        sequences: &[SequenceRequest],
        file_sets: &std::collections::HashMap<u32, Option<Arc<FileSet>>>,
        pool: &DecoderPool,
        gpu: &dyn AtlasGpu,
        report: &mut BakeReport,
    ) -> Result<(), PipelineError> {
        let timer = PhaseTimer::start(label);
        let mut batch = Vec::new();
        let mut category_full = false;

        'outer: for seq in sequences {
            if category_full {
                break;
            }
            let Some(file_set) = file_sets.get(&seq.file_id).and_then(|o| o.clone()) else {
                report.skipped.push(SkipReason::MissingAsset { file_id: seq.file_id });
                continue;
            };
            let Some(directions) = frames_per_direction(&file_set, seq.job_index) else {
                report.skipped.push(SkipReason::MalformedContainer {
                    detail: format!("job {} has no direction table", seq.job_index),
                });
                continue;
            };

            let mut per_direction = Vec::with_capacity(directions.len());
            for frame_indices in directions {
                let mut frames = Vec::with_capacity(frame_indices.len());
                for image_index in frame_indices {
                    let sprite = PlainSprite { file_id: seq.file_id, lookup: SpriteLookup::ImageIndex(image_index) };
                    match self.decode_sprite(file_sets, &sprite, pool, &mut report.skipped).await {
                        Some(entry) => frames.push(entry),
                        None => {
                            if self.atlas_is_full() {
                                category_full = true;
                                break 'outer;
                            }
                        }
                    }
                }
                per_direction.push(frames);
            }
            batch.push((seq.clone(), per_direction));
        }

        self.update_gpu(gpu, report)?;
        for (seq, per_direction) in batch {
            self.registry.insert_sequence(
                seq.entity_kind,
                seq.sub_kind,
                seq.key.clone(),
                AnimatedEntry {
                    per_direction,
                    frame_duration_ms: seq.frame_duration_ms,
                    loops: seq.loops,
                },
            );
        }
        if category_full {
            report.atlas_full_categories.push(label);
        }
        report.phase_timings_ms.push(timer.finish(self.config.slow_op_threshold_ms));
        Ok(())
    }

    fn atlas_is_full(&mut self) -> bool {
        std::mem::take(&mut self.atlas_full)
    }

    /// Uploads the atlas before any registration in the current batch
    /// (the progressive-upload invariant, §4.8).
    fn update_gpu(&mut self, gpu: &dyn AtlasGpu, report: &mut BakeReport) -> Result<(), PipelineError> {
        let timer = PhaseTimer::start("gpu_upload");
        let result = self
            .atlas
            .as_mut()
            .expect("atlas allocated before categories bake")
            .update(gpu)
            .map_err(|e| PipelineError::GpuAllocation(e.to_string()));
        report.phase_timings_ms.push(timer.finish(self.config.slow_op_threshold_ms));
        result
    }

    fn save_to_cache(&self, race: u32) {
        let Some(atlas) = &self.atlas else { return };
        let layer_count = atlas.layer_count();
        let mut image_bytes = Vec::new();
        let mut per_layer_slots = Vec::with_capacity(layer_count as usize);
        for i in 0..layer_count {
            for &px in atlas.layer_pixels(i) {
                image_bytes.extend_from_slice(&px.to_le_bytes());
            }
            per_layer_slots.push(atlas.layer_slots(i));
        }

        let cached = CachedAtlas {
            version_tag: self.version_tag.clone(),
            race,
            layer_count,
            max_layers: self.config.initial_max_layers,
            per_layer_slots,
            combined_palette_bytes: self.combined_palette.bytes().to_vec(),
            per_file_palette_offsets: self.combined_palette.offsets().iter().map(|(&k, &v)| (k, v)).collect(),
            palette_total_colors: self.combined_palette.total_colors(),
            palette_rows: self.combined_palette.rows(),
            registry_snapshot: self.registry.serialize(),
            image_bytes,
            timestamp: 0,
        };
        self.cache.save(race, cached);
    }
}

fn apply_palette_base_offset(indices: &mut [u16], base_offset: u32) {
    for idx in indices.iter_mut() {
        if *idx >= 2 {
            *idx = idx.wrapping_add(base_offset as u16);
        }
    }
}

fn first_frame_image_index(file_set: &FileSet, job_index: u32) -> Option<u32> {
    let slot = file_set.job(job_index as usize)?;
    let dirs = file_set.directions(slot.offset, slot.length);
    let dir = dirs.first()?;
    let frames = file_set.frames(dir.offset, dir.length);
    frames.first().copied()
}

fn frames_per_direction(file_set: &FileSet, job_index: u32) -> Option<Vec<Vec<u32>>> {
    let slot = file_set.job(job_index as usize)?;
    let dirs = file_set.directions(slot.offset, slot.length);
    if dirs.is_empty() {
        return None;
    }
    Some(
        dirs.iter()
            .map(|d| file_set.frames(d.offset, d.length).to_vec())
            .collect(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::file_layer::RecordingFileLayer;
    use crate::gpu::RecordingGpu;

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

    fn push_image(out: &mut Vec<u8>, w: u16, h: u16, body: &[u8]) {
        out.extend_from_slice(&w.to_le_bytes());
        out.extend_from_slice(&h.to_le_bytes());
        out.extend_from_slice(&0i16.to_le_bytes());
        out.extend_from_slice(&0i16.to_le_bytes());
        out.push(0);
        out.push(0);
        out.extend_from_slice(&0u16.to_le_bytes());
        out.extend_from_slice(&(body.len() as u32).to_le_bytes());
        out.extend_from_slice(body);
    }

    /// One container with a single job -> one direction -> one frame,
    /// pointing at a 4x4 fully-opaque (raw) image.
    fn single_unit_container() -> Vec<u8> {
        let mut bytes = Vec::new();
        push_header(&mut bytes, 1, 1, 1, 1);
        // image directory: image 0 at stream offset 0
        bytes.extend_from_slice(&0u32.to_le_bytes());
        bytes.extend_from_slice(&0u32.to_le_bytes());
        // job table: job 0 -> direction table [0, 1)
        bytes.extend_from_slice(&0u32.to_le_bytes());
        bytes.extend_from_slice(&1u32.to_le_bytes());
        // direction table: direction 0 -> frame table [0, 1)
        bytes.extend_from_slice(&0u32.to_le_bytes());
        bytes.extend_from_slice(&1u32.to_le_bytes());
        // frame table: frame 0 -> image index 0
        bytes.extend_from_slice(&0u32.to_le_bytes());
        // image stream: 4x4 image, RLE body of all-zero (transparent) pixels
        push_image(&mut bytes, 4, 4, &[0, 16]);
        bytes
    }

    fn manifest_with_one_unit(race: u32) -> BakeManifest {
        BakeManifest {
            race,
            units: vec![UnitRequest {
                sub_kind: SubKind(1),
                direction: Direction(0),
                sprite: PlainSprite { file_id: 7, lookup: SpriteLookup::FirstFrameOfJob(0) },
            }],
            ..Default::default()
        }
    }

    fn new_orchestrator(dir: &std::path::Path) -> LoadOrchestrator {
        let config = PipelineConfig { trim_top: 0, trim_bottom: 0, ..Default::default() };
        let cache = TwoTierCache::new(dir.to_path_buf(), false, 1_000_000_000);
        LoadOrchestrator::new(config, cache, "build-test:v1".to_string())
    }

    #[tokio::test]
    async fn bakes_one_unit_end_to_end_and_registers_it() {
        let dir = tempfile::tempdir().unwrap();
        let mut layer = RecordingFileLayer::new();
        layer.insert(7, single_unit_container());
        let pool = DecoderPool::new(2);
        let gpu = RecordingGpu::new(64);
        let mut orchestrator = new_orchestrator(dir.path());

        let manifest = manifest_with_one_unit(1);
        let report = orchestrator.load_race(&manifest, &layer, &pool, &gpu).await.unwrap();

        assert_eq!(report.registered, 1);
        assert!(orchestrator.registry().unit(SubKind(1), Direction(0)).is_some());
        pool.destroy();
    }

    #[tokio::test]
    async fn missing_container_yields_no_sprites_not_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let layer = RecordingFileLayer::new();
        let pool = DecoderPool::new(1);
        let gpu = RecordingGpu::new(64);
        let mut orchestrator = new_orchestrator(dir.path());

        let manifest = manifest_with_one_unit(2);
        let report = orchestrator.load_race(&manifest, &layer, &pool, &gpu).await.unwrap();

        assert_eq!(report.registered, 0);
        assert!(!report.skipped.is_empty());
        pool.destroy();
    }

    #[tokio::test]
    async fn second_load_of_same_race_hits_cache() {
        let dir = tempfile::tempdir().unwrap();
        let mut layer = RecordingFileLayer::new();
        layer.insert(7, single_unit_container());
        let pool = DecoderPool::new(2);
        let gpu = RecordingGpu::new(64);
        let mut orchestrator = new_orchestrator(dir.path());

        let manifest = manifest_with_one_unit(3);
        orchestrator.load_race(&manifest, &layer, &pool, &gpu).await.unwrap();
        let report = orchestrator.load_race(&manifest, &layer, &pool, &gpu).await.unwrap();

        assert_eq!(report.tier, Some(CacheTier::Memory));
        assert_eq!(report.registered, 1);
        pool.destroy();
    }

    #[tokio::test]
    async fn race_switch_clears_previous_registry() {
        let dir = tempfile::tempdir().unwrap();
        let mut layer = RecordingFileLayer::new();
        layer.insert(7, single_unit_container());
        let pool = DecoderPool::new(2);
        let gpu = RecordingGpu::new(64);
        let mut orchestrator = new_orchestrator(dir.path());

        orchestrator.load_race(&manifest_with_one_unit(1), &layer, &pool, &gpu).await.unwrap();
        assert_eq!(orchestrator.registry().len(), 1);

        let empty_manifest = BakeManifest { race: 99, ..Default::default() };
        orchestrator.load_race(&empty_manifest, &layer, &pool, &gpu).await.unwrap();
        assert_eq!(orchestrator.registry().len(), 0);
        pool.destroy();
    }
}
