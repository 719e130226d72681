//! Input handling - re-exports from core
//!
//! Emberware Z uses the console-agnostic input handling from `emberware_core`.
//! This module provides convenient re-exports for Z-specific code.

// Re-export all input types and functions from core
pub use emberware_core::app::input::*;
