//! Command buffer for batching draw calls
//!
//! Accumulates draw commands during the frame and provides vertex/index data
//! for flushing to the GPU at frame end.

use glam::Mat4;

use super::render_state::{BlendMode, CullMode, RenderState, TextureHandle};
use super::vertex::{vertex_stride, VERTEX_FORMAT_COUNT};

/// A draw command for batching
#[derive(Debug, Clone)]
pub struct DrawCommand {
    /// Vertex format
    pub format: u8,
    /// Model transform matrix
    pub transform: Mat4,
    /// Number of vertices to draw
    pub vertex_count: u32,
    /// Number of indices (0 for non-indexed)
    pub index_count: u32,
    /// Base vertex index in the immediate buffer
    pub base_vertex: u32,
    /// First index in the immediate index buffer
    pub first_index: u32,
    /// Texture slots bound for this draw
    pub texture_slots: [TextureHandle; 4],
    /// Uniform color
    pub color: u32,
    /// Render state at time of draw
    pub depth_test: bool,
    pub cull_mode: CullMode,
    pub blend_mode: BlendMode,
}

/// Command buffer for batching immediate-mode draws
pub struct CommandBuffer {
    /// Draw commands accumulated this frame
    commands: Vec<DrawCommand>,
    /// Per-format immediate vertex data (CPU side)
    vertex_data: [Vec<u8>; VERTEX_FORMAT_COUNT],
    /// Per-format immediate index data (CPU side)
    index_data: [Vec<u32>; VERTEX_FORMAT_COUNT],
    /// Per-format vertex counts for base_vertex calculation
    vertex_counts: [u32; VERTEX_FORMAT_COUNT],
    /// Per-format index counts
    index_counts: [u32; VERTEX_FORMAT_COUNT],
}

impl CommandBuffer {
    /// Create a new command buffer
    pub fn new() -> Self {
        Self {
            commands: Vec::with_capacity(1024),
            vertex_data: std::array::from_fn(|_| Vec::with_capacity(64 * 1024)),
            index_data: std::array::from_fn(|_| Vec::with_capacity(16 * 1024)),
            vertex_counts: [0; VERTEX_FORMAT_COUNT],
            index_counts: [0; VERTEX_FORMAT_COUNT],
        }
    }

    /// Add vertices for immediate drawing (non-indexed)
    ///
    /// Returns the base vertex index for this batch.
    pub fn add_vertices(&mut self, format: u8, vertices: &[f32], transform: Mat4, state: &RenderState) -> u32 {
        let format_idx = format as usize;
        let stride = vertex_stride(format) as usize;
        let vertex_count = (vertices.len() * 4) / stride;
        let base_vertex = self.vertex_counts[format_idx];

        // Append vertex data
        let byte_data = bytemuck::cast_slice(vertices);
        self.vertex_data[format_idx].extend_from_slice(byte_data);
        self.vertex_counts[format_idx] += vertex_count as u32;

        // Record draw command
        self.commands.push(DrawCommand {
            format,
            transform,
            vertex_count: vertex_count as u32,
            index_count: 0,
            base_vertex,
            first_index: 0,
            texture_slots: state.texture_slots,
            color: state.color,
            depth_test: state.depth_test,
            cull_mode: state.cull_mode,
            blend_mode: state.blend_mode,
        });

        base_vertex
    }

    /// Add indexed vertices for immediate drawing
    ///
    /// Returns (base_vertex, first_index) for this batch.
    pub fn add_vertices_indexed(
        &mut self,
        format: u8,
        vertices: &[f32],
        indices: &[u32],
        transform: Mat4,
        state: &RenderState,
    ) -> (u32, u32) {
        let format_idx = format as usize;
        let stride = vertex_stride(format) as usize;
        let vertex_count = (vertices.len() * 4) / stride;
        let base_vertex = self.vertex_counts[format_idx];
        let first_index = self.index_counts[format_idx];

        // Append vertex data
        let byte_data = bytemuck::cast_slice(vertices);
        self.vertex_data[format_idx].extend_from_slice(byte_data);
        self.vertex_counts[format_idx] += vertex_count as u32;

        // Append index data
        self.index_data[format_idx].extend_from_slice(indices);
        self.index_counts[format_idx] += indices.len() as u32;

        // Record draw command
        self.commands.push(DrawCommand {
            format,
            transform,
            vertex_count: vertex_count as u32,
            index_count: indices.len() as u32,
            base_vertex,
            first_index,
            texture_slots: state.texture_slots,
            color: state.color,
            depth_test: state.depth_test,
            cull_mode: state.cull_mode,
            blend_mode: state.blend_mode,
        });

        (base_vertex, first_index)
    }

    /// Get accumulated commands
    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    /// Get vertex data for a format
    pub fn vertex_data(&self, format: u8) -> &[u8] {
        &self.vertex_data[format as usize]
    }

    /// Get index data for a format
    pub fn index_data(&self, format: u8) -> &[u32] {
        &self.index_data[format as usize]
    }

    /// Reset the command buffer for the next frame
    pub fn reset(&mut self) {
        self.commands.clear();
        for data in &mut self.vertex_data {
            data.clear();
        }
        for data in &mut self.index_data {
            data.clear();
        }
        self.vertex_counts = [0; VERTEX_FORMAT_COUNT];
        self.index_counts = [0; VERTEX_FORMAT_COUNT];
    }
}

impl Default for CommandBuffer {
    fn default() -> Self {
        Self::new()
    }
}
