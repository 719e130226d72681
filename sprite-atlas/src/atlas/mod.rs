//! Atlas packer (§2.6 / §4.6).
//!
//! Reserves rectangular regions on a stack of fixed-size layers, copies
//! decoded indices in, tracks dirty rectangles, and streams layers to the
//! GPU. The texture uses nearest-neighbour filtering and clamp-to-edge
//! wrap throughout.

mod types;

pub use types::{AtlasError, DirtyRect, Region, RowSlot};

use crate::gpu::AtlasGpu;

struct Layer {
    pixels: Vec<u16>,
    slots: Vec<RowSlot>,
    dirty: Option<DirtyRect>,
}

impl Layer {
    fn new(size: u32) -> Self {
        Self {
            pixels: vec![0u16; (size * size) as usize],
            slots: Vec::new(),
            dirty: None,
        }
    }
}

/// Stack of fixed-size layers forming a GPU texture array of 16-bit
/// palette indices.
pub struct AtlasPacker {
    layers: Vec<Layer>,
    gpu_layer_count: u32,
    max_layers: u32,
    layer_size: u32,
    padding: u32,
    row_bucket: u32,
    texture: Option<u64>,
}

impl AtlasPacker {
    pub fn new(layer_size: u32, max_layers: u32, padding: u32, row_bucket: u32) -> Self {
        Self {
            layers: Vec::new(),
            gpu_layer_count: 0,
            max_layers: max_layers.max(1),
            layer_size: layer_size.max(1),
            padding: padding.max(1),
            row_bucket: row_bucket.max(1),
            texture: None,
        }
    }

    pub fn layer_count(&self) -> u32 {
        self.layers.len() as u32
    }

    pub fn layer_size(&self) -> u32 {
        self.layer_size
    }

    /// Reserve a `w x h` rectangle. See §4.6 for the full algorithm; this
    /// follows it step for step.
    pub fn reserve(&mut self, w: u32, h: u32) -> Result<Region, AtlasError> {
        let pw = w + 2 * self.padding;
        let ph = h + 2 * self.padding;
        let bh = bucket_height(ph, self.row_bucket);

        if pw > self.layer_size || bh > self.layer_size {
            return Err(AtlasError::SpriteTooLarge {
                width: w,
                height: h,
                layer_size: self.layer_size,
            });
        }

        if self.layers.is_empty() {
            self.push_new_layer()?;
        }

        let last_index = self.layers.len() - 1;
        if let Some(slot_idx) = self.find_matching_slot(last_index, bh, pw) {
            return Ok(self.place_in_slot(last_index, slot_idx, w, h));
        }

        let free_y = self.free_y(last_index);
        if free_y + bh <= self.layer_size {
            self.layers[last_index].slots.push(RowSlot {
                y: free_y,
                height: bh,
                current_x: 0,
                layer_width: self.layer_size,
            });
            let slot_idx = self.layers[last_index].slots.len() - 1;
            return Ok(self.place_in_slot(last_index, slot_idx, w, h));
        }

        self.push_new_layer()?;
        let new_index = self.layers.len() - 1;
        self.layers[new_index].slots.push(RowSlot {
            y: 0,
            height: bh,
            current_x: 0,
            layer_width: self.layer_size,
        });
        Ok(self.place_in_slot(new_index, 0, w, h))
    }

    fn find_matching_slot(&self, layer_index: usize, bh: u32, pw: u32) -> Option<usize> {
        self.layers[layer_index]
            .slots
            .iter()
            .position(|s| s.height == bh && s.remaining_width() >= pw)
    }

    fn free_y(&self, layer_index: usize) -> u32 {
        self.layers[layer_index]
            .slots
            .last()
            .map(|s| s.y + s.height)
            .unwrap_or(0)
    }

    fn push_new_layer(&mut self) -> Result<(), AtlasError> {
        if self.layers.len() as u32 >= self.max_layers {
            return Err(AtlasError::Full {
                layer_count: self.layers.len() as u32,
                max_layers: self.max_layers,
            });
        }
        self.layers.push(Layer::new(self.layer_size));
        Ok(())
    }

    fn place_in_slot(&mut self, layer_index: usize, slot_idx: usize, w: u32, h: u32) -> Region {
        let pw = w + 2 * self.padding;
        let slot = &mut self.layers[layer_index].slots[slot_idx];
        let x = slot.current_x + self.padding;
        let y = slot.y + self.padding;
        slot.current_x += pw;

        let l = self.layer_size as f32;
        let u0 = (x as f32 + 0.5) / l;
        let v0 = (y as f32 + 0.5) / l;
        let u1 = (x as f32 + w as f32 - 0.5) / l;
        let v1 = (y as f32 + h as f32 - 0.5) / l;

        Region {
            layer_index: layer_index as u32,
            x,
            y,
            w,
            h,
            u0,
            v0,
            u1,
            v1,
        }
    }

    /// Copy `region.h` rows of `region.w` indices into the layer and
    /// expand its dirty rectangle to enclose the write.
    pub fn blit(&mut self, region: &Region, indices: &[u16]) {
        let layer = &mut self.layers[region.layer_index as usize];
        let stride = self.layer_size as usize;
        for row in 0..region.h as usize {
            let src_start = row * region.w as usize;
            let src_end = src_start + region.w as usize;
            if src_end > indices.len() {
                break;
            }
            let dst_y = region.y as usize + row;
            let dst_start = dst_y * stride + region.x as usize;
            let dst_end = dst_start + region.w as usize;
            layer.pixels[dst_start..dst_end].copy_from_slice(&indices[src_start..src_end]);
        }
        match &mut layer.dirty {
            Some(rect) => rect.expand(region.x, region.y, region.w, region.h),
            None => layer.dirty = Some(DirtyRect::covering(region.x, region.y, region.w, region.h)),
        }
    }

    /// Uploads to the GPU. If the layer count changed since the last
    /// upload, allocates fresh storage and uploads every layer in full;
    /// otherwise uploads only each layer's dirty sub-rectangle.
    pub fn update(&mut self, gpu: &dyn AtlasGpu) -> anyhow::Result<()> {
        let layer_count = self.layers.len() as u32;

        if layer_count != self.gpu_layer_count {
            if let Some(old) = self.texture.take() {
                gpu.delete(old)?;
            }
            let texture = gpu.allocate_r16ui_array(self.layer_size, self.layer_size, layer_count)?;
            gpu.set_nearest_filter(texture)?;
            gpu.set_clamp_to_edge(texture)?;
            for (i, layer) in self.layers.iter_mut().enumerate() {
                gpu.upload_subregion(
                    texture,
                    i as u32,
                    0,
                    0,
                    self.layer_size,
                    self.layer_size,
                    self.layer_size,
                    &layer.pixels,
                )?;
                layer.dirty = None;
            }
            self.texture = Some(texture);
            self.gpu_layer_count = layer_count;
            return Ok(());
        }

        let Some(texture) = self.texture else {
            return Ok(());
        };
        for (i, layer) in self.layers.iter_mut().enumerate() {
            let Some(rect) = layer.dirty.take() else { continue };
            let stride = self.layer_size as usize;
            let mut sub = Vec::with_capacity((rect.width() * rect.height()) as usize);
            for y in rect.y0..rect.y1 {
                let row_start = y as usize * stride + rect.x0 as usize;
                let row_end = row_start + rect.width() as usize;
                sub.extend_from_slice(&layer.pixels[row_start..row_end]);
            }
            gpu.upload_subregion(
                texture,
                i as u32,
                rect.x0,
                rect.y0,
                rect.width(),
                rect.height(),
                rect.width(),
                &sub,
            )?;
        }
        Ok(())
    }

    pub fn texture_handle(&self) -> Option<u64> {
        self.texture
    }

    /// Reconstructs slot state from durable-cache metadata without
    /// reserving new layers. Forces a full upload on the next `update`
    /// (§4.6 "Retain-on-cache").
    pub fn restore(
        layer_size: u32,
        max_layers: u32,
        padding: u32,
        row_bucket: u32,
        layer_bytes: Vec<Vec<u16>>,
        per_layer_slots: Vec<Vec<(u32, u32, u32, u32)>>,
    ) -> Self {
        let layers = layer_bytes
            .into_iter()
            .zip(per_layer_slots)
            .map(|(pixels, slots)| Layer {
                pixels,
                slots: slots
                    .into_iter()
                    .map(|(y, height, current_x, layer_width)| RowSlot {
                        y,
                        height,
                        current_x,
                        layer_width,
                    })
                    .collect(),
                dirty: None,
            })
            .collect();

        Self {
            layers,
            gpu_layer_count: 0,
            max_layers: max_layers.max(1),
            layer_size: layer_size.max(1),
            padding: padding.max(1),
            row_bucket: row_bucket.max(1),
            texture: None,
        }
    }

    pub fn layer_pixels(&self, layer_index: u32) -> &[u16] {
        &self.layers[layer_index as usize].pixels
    }

    pub fn layer_slots(&self, layer_index: u32) -> Vec<(u32, u32, u32, u32)> {
        self.layers[layer_index as usize]
            .slots
            .iter()
            .map(|s| (s.y, s.height, s.current_x, s.layer_width))
            .collect()
    }
}

fn bucket_height(padded: u32, bucket: u32) -> u32 {
    padded.div_ceil(bucket) * bucket
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gpu::RecordingGpu;

    fn packer() -> AtlasPacker {
        AtlasPacker::new(4096, 64, 1, 16)
    }

    #[test]
    fn region_uniqueness_no_overlap_between_two_reservations() {
        let mut p = packer();
        let r1 = p.reserve(10, 10).unwrap();
        let r2 = p.reserve(12, 10).unwrap();
        assert_eq!(r1.layer_index, r2.layer_index);
        assert!(r1.x + r1.w + 2 <= r2.x || r2.x + r2.w + 2 <= r1.x);
    }

    #[test]
    fn row_sharing_scenario_three_sprites_one_row() {
        let mut p = AtlasPacker::new(4096, 64, 1, 16);
        p.reserve(10, 10).unwrap();
        p.reserve(12, 10).unwrap();
        p.reserve(30, 10).unwrap();
        let slots = p.layer_slots(0);
        assert_eq!(slots.len(), 1);
        assert_eq!(slots[0].2, 12 + 14 + 32);
    }

    #[test]
    fn layer_overflow_scenario_forces_new_layer() {
        let mut p = AtlasPacker::new(32, 64, 1, 16);
        let mut layers_seen = std::collections::HashSet::new();
        for _ in 0..4 {
            let r = p.reserve(28, 14).unwrap();
            layers_seen.insert(r.layer_index);
        }
        assert!(layers_seen.len() >= 2);
    }

    #[test]
    fn row_bucket_rule_height_is_positive_multiple_of_bucket() {
        let mut p = packer();
        p.reserve(10, 10).unwrap();
        let slots = p.layer_slots(0);
        assert_eq!(slots[0].1 % 16, 0);
        assert!(slots[0].1 >= 10 + 2);
    }

    #[test]
    fn exact_row_fill_then_new_row_for_same_bucket() {
        let mut p = AtlasPacker::new(32, 64, 0, 16);
        // pad=0 so padded width == w; fill the row exactly (32 px wide).
        p.reserve(16, 10).unwrap();
        let r2 = p.reserve(16, 10).unwrap();
        assert_eq!(r2.y, 0); // still fits in the same row
        let r3 = p.reserve(1, 10).unwrap();
        assert!(r3.y > 0); // row is now full, next reservation starts a new row
    }

    #[test]
    fn sprite_too_large_for_layer_is_rejected() {
        let mut p = AtlasPacker::new(32, 64, 1, 16);
        let err = p.reserve(32, 32).unwrap_err();
        assert!(matches!(err, AtlasError::SpriteTooLarge { .. }));
    }

    #[test]
    fn atlas_full_when_max_layers_exhausted() {
        let mut p = AtlasPacker::new(16, 1, 0, 16);
        p.reserve(16, 16).unwrap();
        let err = p.reserve(16, 16).unwrap_err();
        assert!(matches!(err, AtlasError::Full { .. }));
    }

    #[test]
    fn blit_writes_pixels_and_marks_dirty() {
        let mut p = packer();
        let region = p.reserve(2, 2).unwrap();
        p.blit(&region, &[1, 2, 3, 4]);
        let pixels = p.layer_pixels(0);
        let stride = p.layer_size() as usize;
        assert_eq!(pixels[region.y as usize * stride + region.x as usize], 1);
    }

    #[test]
    fn update_does_full_upload_when_layer_count_changes() {
        let mut p = packer();
        let region = p.reserve(2, 2).unwrap();
        p.blit(&region, &[1, 2, 3, 4]);
        let gpu = RecordingGpu::new(64);
        p.update(&gpu).unwrap();
        let calls = gpu.calls();
        assert!(calls.iter().any(|c| matches!(c, crate::gpu::GpuCall::AllocateArray { .. })));
    }

    #[test]
    fn update_only_uploads_dirty_subregion_on_second_call() {
        let mut p = packer();
        let region = p.reserve(2, 2).unwrap();
        p.blit(&region, &[1, 2, 3, 4]);
        let gpu = RecordingGpu::new(64);
        p.update(&gpu).unwrap();

        let region2 = p.reserve(2, 2).unwrap();
        p.blit(&region2, &[5, 6, 7, 8]);
        p.update(&gpu).unwrap();

        let calls = gpu.calls();
        let allocations = calls
            .iter()
            .filter(|c| matches!(c, crate::gpu::GpuCall::AllocateArray { .. }))
            .count();
        assert_eq!(allocations, 1);
    }

    #[test]
    fn restore_forces_full_upload_via_zero_gpu_layer_count() {
        let p = AtlasPacker::restore(4096, 64, 1, 16, vec![vec![0u16; 4096 * 4096]], vec![vec![]]);
        assert_eq!(p.gpu_layer_count, 0);
        assert_eq!(p.layer_count(), 1);
    }
}
