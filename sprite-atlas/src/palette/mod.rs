//! Per-file palette (§4.2) and combined palette (§4.3).

use hashbrown::HashMap;

/// One file's raw RGBA palette bytes, as read from its palette file.
/// Index 0 is transparent, index 1 is shadow; indices ≥ 2 are looked up.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PerFilePalette {
    /// RGBA bytes, 4 per color.
    pub bytes: Vec<u8>,
}

impl PerFilePalette {
    pub fn from_rgba_bytes(bytes: Vec<u8>) -> Self {
        Self { bytes }
    }

    pub fn color_count(&self) -> usize {
        self.bytes.len() / 4
    }
}

/// Schema error: a file-id was registered twice with different bytes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReregistrationError {
    pub file_id: u32,
}

impl std::fmt::Display for ReregistrationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "file-id {} re-registered with different palette bytes",
            self.file_id
        )
    }
}
impl std::error::Error for ReregistrationError {}

/// Appends per-file palettes into one lookup table, tracking base offsets.
/// Owned by the orchestrator alongside the atlas; workers never touch it
/// (§5 "Shared-resource policy").
#[derive(Debug, Default)]
pub struct CombinedPalette {
    bytes: Vec<u8>,
    offsets: HashMap<u32, u32>,
    colors_per_row: u32,
}

impl CombinedPalette {
    /// `colors_per_row` determines the 2D texture layout used by
    /// [`CombinedPalette::rows`] / [`CombinedPalette::upload`].
    pub fn new(colors_per_row: u32) -> Self {
        Self {
            bytes: Vec::new(),
            offsets: HashMap::new(),
            colors_per_row: colors_per_row.max(1),
        }
    }

    /// Register is insert-once: re-registering the same file-id with
    /// identical bytes is a no-op; different bytes is a schema error.
    pub fn register(
        &mut self,
        file_id: u32,
        palette: &PerFilePalette,
    ) -> Result<(), ReregistrationError> {
        if let Some(&base) = self.offsets.get(&file_id) {
            let start = base as usize * 4;
            let end = start + palette.bytes.len();
            if self.bytes.get(start..end) == Some(palette.bytes.as_slice()) {
                return Ok(());
            }
            return Err(ReregistrationError { file_id });
        }

        let base_offset = (self.bytes.len() / 4) as u32;
        self.bytes.extend_from_slice(&palette.bytes);
        self.offsets.insert(file_id, base_offset);
        Ok(())
    }

    /// Base color offset for `file_id`, or `-1` for unknown files. The
    /// packer substitutes `0` and continues for decoders that already
    /// emit pre-offset indices.
    pub fn offset_of(&self, file_id: u32) -> i64 {
        self.offsets
            .get(&file_id)
            .map(|&o| o as i64)
            .unwrap_or(-1)
    }

    pub fn total_colors(&self) -> u32 {
        (self.bytes.len() / 4) as u32
    }

    pub fn rows(&self) -> u32 {
        self.total_colors().div_ceil(self.colors_per_row).max(1)
    }

    pub fn colors_per_row(&self) -> u32 {
        self.colors_per_row
    }

    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Reconstruct from durable-cache bytes (§4.9 "Install"). Does not
    /// re-validate invariants; the bytes are trusted to have come from a
    /// prior `bytes()`/`offsets` snapshot of this same type.
    pub fn from_parts(bytes: Vec<u8>, offsets: HashMap<u32, u32>, colors_per_row: u32) -> Self {
        Self {
            bytes,
            offsets,
            colors_per_row: colors_per_row.max(1),
        }
    }

    pub fn offsets(&self) -> &HashMap<u32, u32> {
        &self.offsets
    }

    /// Streams the combined palette to the GPU as a 2D RGBA texture
    /// (width = colors-per-row, height = rows). Pads the final partial row
    /// with zeroed (transparent) entries.
    pub fn upload(&self, gpu: &dyn crate::gpu::AtlasGpu) -> anyhow::Result<()> {
        let rows = self.rows();
        let width = self.colors_per_row;
        let mut padded = vec![0u8; (rows * width * 4) as usize];
        let n = self.bytes.len().min(padded.len());
        padded[..n].copy_from_slice(&self.bytes[..n]);
        gpu.upload_rgba_2d(width, rows, &padded)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn register_appends_and_tracks_offset() {
        let mut combined = CombinedPalette::new(256);
        let p1 = PerFilePalette::from_rgba_bytes(vec![0; 4 * 10]);
        let p2 = PerFilePalette::from_rgba_bytes(vec![1; 4 * 5]);
        combined.register(1, &p1).unwrap();
        combined.register(2, &p2).unwrap();
        assert_eq!(combined.offset_of(1), 0);
        assert_eq!(combined.offset_of(2), 10);
        assert_eq!(combined.total_colors(), 15);
    }

    #[test]
    fn unknown_file_offset_is_negative_one() {
        let combined = CombinedPalette::new(256);
        assert_eq!(combined.offset_of(42), -1);
    }

    #[test]
    fn reregistering_same_bytes_is_a_noop() {
        let mut combined = CombinedPalette::new(256);
        let p = PerFilePalette::from_rgba_bytes(vec![5; 4]);
        combined.register(1, &p).unwrap();
        combined.register(1, &p).unwrap();
        assert_eq!(combined.total_colors(), 1);
    }

    #[test]
    fn reregistering_different_bytes_is_a_schema_error() {
        let mut combined = CombinedPalette::new(256);
        combined
            .register(1, &PerFilePalette::from_rgba_bytes(vec![5; 4]))
            .unwrap();
        let err = combined
            .register(1, &PerFilePalette::from_rgba_bytes(vec![9; 4]))
            .unwrap_err();
        assert_eq!(err.file_id, 1);
    }
}
