//! Value types shared by the atlas packer: regions, row slots, dirty rects.

use serde::{Deserialize, Serialize};

/// An allocated rectangle within a layer. Once issued, `(layer_index, x, y,
/// w, h)` never changes — only the pixel bytes underneath it do.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Region {
    pub layer_index: u32,
    pub x: u32,
    pub y: u32,
    pub w: u32,
    pub h: u32,
    pub u0: f32,
    pub v0: f32,
    pub u1: f32,
    pub v1: f32,
}

/// A horizontal band inside a layer, uniform bucketed height, packed
/// left-to-right. New rows are appended at the bottom of a layer; within a
/// row, sprites are packed in arrival order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RowSlot {
    pub y: u32,
    pub height: u32,
    pub current_x: u32,
    pub layer_width: u32,
}

impl RowSlot {
    pub fn remaining_width(&self) -> u32 {
        self.layer_width.saturating_sub(self.current_x)
    }
}

/// Inclusive-exclusive bounding box of everything written since the last
/// GPU flush. `None` means clean.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DirtyRect {
    pub x0: u32,
    pub y0: u32,
    pub x1: u32,
    pub y1: u32,
}

impl DirtyRect {
    pub fn covering(x: u32, y: u32, w: u32, h: u32) -> Self {
        Self {
            x0: x,
            y0: y,
            x1: x + w,
            y1: y + h,
        }
    }

    pub fn expand(&mut self, x: u32, y: u32, w: u32, h: u32) {
        self.x0 = self.x0.min(x);
        self.y0 = self.y0.min(y);
        self.x1 = self.x1.max(x + w);
        self.y1 = self.y1.max(y + h);
    }

    pub fn width(&self) -> u32 {
        self.x1 - self.x0
    }

    pub fn height(&self) -> u32 {
        self.y1 - self.y0
    }
}

/// Reservation/layer-growth failures. Not every error type in this crate
/// goes through `thiserror` — this one is small enough to hand-roll.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AtlasError {
    /// Reservation failed after growing to `max_layers`.
    Full { layer_count: u32, max_layers: u32 },
    /// The sprite (plus padding) can never fit in a layer of this size,
    /// regardless of how many layers are available.
    SpriteTooLarge { width: u32, height: u32, layer_size: u32 },
}

impl std::fmt::Display for AtlasError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AtlasError::Full { layer_count, max_layers } => {
                write!(f, "atlas full ({layer_count}/{max_layers} layers)")
            }
            AtlasError::SpriteTooLarge { width, height, layer_size } => write!(
                f,
                "sprite {width}x{height} cannot fit in a {layer_size}x{layer_size} layer"
            ),
        }
    }
}
impl std::error::Error for AtlasError {}
