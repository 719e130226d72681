//! GPU collaborator contract (§6 "Inbound from the GPU layer").
//!
//! Another external collaborator the spec only cites the contract of.
//! [`RecordingGpu`] is a fake implementation used by tests and the offline
//! bake CLI so the packer and orchestrator can be exercised without a real
//! `wgpu` device/surface.

use std::sync::Mutex;

/// Abstracts the GPU operations the atlas packer and combined palette need.
pub trait AtlasGpu: Send + Sync {
    fn max_array_texture_layers(&self) -> u32;

    /// Allocates an `R16Uint` 2D texture array of `width x height x layer_count`.
    fn allocate_r16ui_array(&self, width: u32, height: u32, layer_count: u32) -> anyhow::Result<u64>;

    /// Uploads a sub-rectangle of one layer. `data` is row-major `u16`
    /// indices, `row_length` elements per row (the row-length hint from §6).
    fn upload_subregion(
        &self,
        texture: u64,
        layer: u32,
        x: u32,
        y: u32,
        w: u32,
        h: u32,
        row_length: u32,
        data: &[u16],
    ) -> anyhow::Result<()>;

    fn upload_rgba_2d(&self, width: u32, height: u32, bytes: &[u8]) -> anyhow::Result<()>;

    fn set_nearest_filter(&self, texture: u64) -> anyhow::Result<()>;
    fn set_clamp_to_edge(&self, texture: u64) -> anyhow::Result<()>;
    fn bind(&self, texture_unit: u32, texture: u64) -> anyhow::Result<()>;
    fn delete(&self, texture: u64) -> anyhow::Result<()>;
}

/// One recorded GPU call, kept for test assertions.
#[derive(Debug, Clone, PartialEq)]
pub enum GpuCall {
    AllocateArray { width: u32, height: u32, layer_count: u32 },
    UploadSubregion { layer: u32, x: u32, y: u32, w: u32, h: u32 },
    UploadPalette { width: u32, height: u32 },
    Bind { texture_unit: u32, texture: u64 },
    Delete { texture: u64 },
}

/// Fake GPU that records every call instead of touching real hardware.
pub struct RecordingGpu {
    max_layers: u32,
    next_texture: Mutex<u64>,
    calls: Mutex<Vec<GpuCall>>,
    fail_allocation: bool,
}

impl RecordingGpu {
    pub fn new(max_layers: u32) -> Self {
        Self {
            max_layers,
            next_texture: Mutex::new(1),
            calls: Mutex::new(Vec::new()),
            fail_allocation: false,
        }
    }

    /// Builder variant that makes every allocation fail, for exercising the
    /// "GPU allocation failure aborts the whole bake" error path.
    pub fn always_failing(max_layers: u32) -> Self {
        Self {
            fail_allocation: true,
            ..Self::new(max_layers)
        }
    }

    pub fn calls(&self) -> Vec<GpuCall> {
        self.calls.lock().unwrap().clone()
    }
}

impl AtlasGpu for RecordingGpu {
    fn max_array_texture_layers(&self) -> u32 {
        self.max_layers
    }

    fn allocate_r16ui_array(&self, width: u32, height: u32, layer_count: u32) -> anyhow::Result<u64> {
        if self.fail_allocation {
            anyhow::bail!("simulated GPU allocation failure");
        }
        let mut next = self.next_texture.lock().unwrap();
        let id = *next;
        *next += 1;
        self.calls.lock().unwrap().push(GpuCall::AllocateArray {
            width,
            height,
            layer_count,
        });
        Ok(id)
    }

    fn upload_subregion(
        &self,
        _texture: u64,
        layer: u32,
        x: u32,
        y: u32,
        w: u32,
        h: u32,
        _row_length: u32,
        _data: &[u16],
    ) -> anyhow::Result<()> {
        self.calls
            .lock()
            .unwrap()
            .push(GpuCall::UploadSubregion { layer, x, y, w, h });
        Ok(())
    }

    fn upload_rgba_2d(&self, width: u32, height: u32, _bytes: &[u8]) -> anyhow::Result<()> {
        self.calls
            .lock()
            .unwrap()
            .push(GpuCall::UploadPalette { width, height });
        Ok(())
    }

    fn set_nearest_filter(&self, _texture: u64) -> anyhow::Result<()> {
        Ok(())
    }

    fn set_clamp_to_edge(&self, _texture: u64) -> anyhow::Result<()> {
        Ok(())
    }

    fn bind(&self, texture_unit: u32, texture: u64) -> anyhow::Result<()> {
        self.calls
            .lock()
            .unwrap()
            .push(GpuCall::Bind { texture_unit, texture });
        Ok(())
    }

    fn delete(&self, texture: u64) -> anyhow::Result<()> {
        self.calls.lock().unwrap().push(GpuCall::Delete { texture });
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn recording_gpu_assigns_increasing_texture_ids() {
        let gpu = RecordingGpu::new(64);
        let a = gpu.allocate_r16ui_array(4096, 4096, 1).unwrap();
        let b = gpu.allocate_r16ui_array(4096, 4096, 2).unwrap();
        assert_ne!(a, b);
        assert_eq!(gpu.calls().len(), 2);
    }

    #[test]
    fn always_failing_gpu_errors_on_allocate() {
        let gpu = RecordingGpu::always_failing(64);
        assert!(gpu.allocate_r16ui_array(4096, 4096, 1).is_err());
    }
}
