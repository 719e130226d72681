//! Emberware Unified Library
//!
//! This crate provides the unified launcher for all Emberware fantasy consoles.
//! It contains the console-agnostic UI and application logic.

pub mod app;
pub mod registry;
pub mod ui;
