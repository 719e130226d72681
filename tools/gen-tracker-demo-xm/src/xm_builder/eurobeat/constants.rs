//! Constants for Eurobeat XM generation

// XM effect constants
pub const FX_NOTE_CUT: u8 = 0x0C; // ECx - cut note at tick x

// Eurobeat note constants (D minor: D E F G A Bb C)
pub const D2_E: u8 = 27;
pub const F2_E: u8 = 30;
pub const G2_E: u8 = 32;
pub const A2_E: u8 = 34;
pub const BB2_E: u8 = 35;
pub const C3_E: u8 = 37;
pub const D3_E: u8 = 39;
pub const F3_E: u8 = 42;
pub const G3_E: u8 = 44;
pub const A3_E: u8 = 46;
pub const BB3_E: u8 = 47;
pub const C4_E: u8 = 49;
pub const _CS4_E: u8 = 50;
pub const D4_E: u8 = 51;
pub const _DS4_E: u8 = 52;
pub const _E4_E: u8 = 53;
pub const FS4_E: u8 = 55;
pub const F4_E: u8 = 54;
pub const _G4_E: u8 = 56;
pub const A4_E: u8 = 58;
pub const BB4_E: u8 = 59;
pub const C5_E: u8 = 61;
pub const CS5_E: u8 = 62;
pub const D5_E: u8 = 63;
pub const E5_E: u8 = 65;
pub const F5_E: u8 = 66;
pub const FS5_E: u8 = 67;
pub const G5_E: u8 = 68;
pub const A5_E: u8 = 70;
pub const BB5_E: u8 = 71;
pub const C6_E: u8 = 73;
pub const _CS6_E: u8 = 74;
pub const D6_E: u8 = 75;
pub const _E6_E: u8 = 77;
pub const _F6_E: u8 = 78;
pub const _G6_E: u8 = 80;
pub const _A6_E: u8 = 82;

// Eurobeat instruments
pub const KICK_E: u8 = 1;
pub const SNARE_E: u8 = 2;
pub const HIHAT_E: u8 = 3;
pub const BASS_E: u8 = 4;
pub const SUPERSAW: u8 = 5;
pub const BRASS: u8 = 6;
pub const PAD: u8 = 7;
