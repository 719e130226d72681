//! The `CachedAtlas` value (§3 "Cached atlas", §6 "Persistent store layout").

use serde::{Deserialize, Serialize};

use crate::registry::RegistrySnapshot;

/// A fully baked atlas plus everything needed to restore it without
/// re-decoding: `version_tag` concatenates a build identity with a schema
/// number and gates reuse (§4.9 "Version gating").
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CachedAtlas {
    pub version_tag: String,
    pub race: u32,
    pub layer_count: u32,
    pub max_layers: u32,
    /// Per layer, the row slots as `(y, height, current_x, layer_width)`.
    pub per_layer_slots: Vec<Vec<(u32, u32, u32, u32)>>,
    pub combined_palette_bytes: Vec<u8>,
    /// `file_id -> base_offset` into the combined palette.
    pub per_file_palette_offsets: Vec<(u32, u32)>,
    pub palette_total_colors: u32,
    pub palette_rows: u32,
    pub registry_snapshot: RegistrySnapshot,
    /// Concatenation of all layer indices, 2 bytes per pixel (little-endian).
    pub image_bytes: Vec<u8>,
    pub timestamp: i64,
}

impl CachedAtlas {
    /// Splits `image_bytes` back into one `Vec<u16>` per layer, given each
    /// layer is `layer_size * layer_size` pixels.
    pub fn layer_pixel_buffers(&self, layer_size: u32) -> Vec<Vec<u16>> {
        let pixels_per_layer = (layer_size as usize) * (layer_size as usize);
        let bytes_per_layer = pixels_per_layer * 2;
        (0..self.layer_count as usize)
            .map(|i| {
                let start = i * bytes_per_layer;
                let end = (start + bytes_per_layer).min(self.image_bytes.len());
                let slice = &self.image_bytes[start..end];
                slice
                    .chunks_exact(2)
                    .map(|b| u16::from_le_bytes([b[0], b[1]]))
                    .collect()
            })
            .collect()
    }

    pub fn from_layers(layers: &[&[u16]]) -> Vec<u8> {
        let mut out = Vec::with_capacity(layers.iter().map(|l| l.len() * 2).sum());
        for layer in layers {
            for &px in *layer {
                out.extend_from_slice(&px.to_le_bytes());
            }
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn layer_pixel_buffers_round_trip_from_layers() {
        let layer0: Vec<u16> = vec![1, 2, 3, 4];
        let image_bytes = CachedAtlas::from_layers(&[&layer0]);
        let atlas = CachedAtlas {
            version_tag: "v".into(),
            race: 0,
            layer_count: 1,
            max_layers: 1,
            per_layer_slots: vec![vec![]],
            combined_palette_bytes: vec![],
            per_file_palette_offsets: vec![],
            palette_total_colors: 0,
            palette_rows: 0,
            registry_snapshot: RegistrySnapshot::default(),
            image_bytes,
            timestamp: 0,
        };
        let restored = atlas.layer_pixel_buffers(2);
        assert_eq!(restored, vec![vec![1, 2, 3, 4]]);
    }
}
