//! Synthwave note and instrument constants for "Nether Drive"

// ============================================================================
// Synthwave Note Constants (A minor: A B C D E F G, plus G# for E major chord)
// ============================================================================

pub const A2_S: u8 = 34;
pub const B2_S: u8 = 36;
pub const C3_S: u8 = 37;
pub const D3_S: u8 = 39;
pub const E3_S: u8 = 41;
pub const F3_S: u8 = 42;
pub const G3_S: u8 = 44;
pub const GS3_S: u8 = 45; // G#3 for E major chord
pub const A3_S: u8 = 46;
pub const B3_S: u8 = 48;
pub const C4_S: u8 = 49;
pub const D4_S: u8 = 51;
pub const E4_S: u8 = 53;
pub const F4_S: u8 = 54;
pub const G4_S: u8 = 56;
pub const _GS4_S: u8 = 57; // G#4 for E major chord
pub const A4_S: u8 = 58;
pub const B4_S: u8 = 60;
pub const C5_S: u8 = 61;
pub const D5_S: u8 = 63;
pub const E5_S: u8 = 65;

// ============================================================================
// Synthwave Instrument Constants
// ============================================================================

pub const KICK_S: u8 = 1;
pub const SNARE_S: u8 = 2;
pub const HIHAT_S: u8 = 3;
pub const BASS_S: u8 = 4;
pub const LEAD_S: u8 = 5;
pub const ARP_S: u8 = 6;
pub const PAD_S: u8 = 7;
