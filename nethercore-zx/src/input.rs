//! Input handling - re-exports from core
//!
//! Nethercore ZX uses the console-agnostic input handling from `nethercore_core`.
//! This module provides convenient re-exports for ZX-specific code.

// Re-export all input types and functions from core
pub use nethercore_core::app::input::*;
