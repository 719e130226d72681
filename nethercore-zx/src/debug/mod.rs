//! Debug utilities for the ZX console.
//!
//! This module contains debugging tools including the EPU debug panel
//! and metadata tables generated from WGSL shaders.

pub mod epu_meta_gen;
pub mod epu_panel;
