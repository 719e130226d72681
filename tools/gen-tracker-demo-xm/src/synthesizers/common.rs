//! Common synthesizer utilities shared across all genres
//!
//! Re-exports from gen-tracker-common for backward compatibility.

pub use gen_tracker_common::{apply_fades, SimpleRng, SAMPLE_RATE};
