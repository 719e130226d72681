//! Musical note constants for D major (Lydian mode)

// D major (Lydian) notes: D E F# G# A B C#
// D2=26, E2=28, F#2=30, A2=33, B2=35, D3=38, F#3=42, A3=45, B3=47
// D4=50, E4=52, F#4=54, G#4=56, A4=57, B4=59, C#5=61, D5=62, A5=69
pub const D2: u8 = 26;
pub const A2: u8 = 33;
pub const D3: u8 = 38;
pub const FS3: u8 = 42;
pub const A3: u8 = 45;
pub const B3: u8 = 47;
pub const D4: u8 = 50;
pub const E4: u8 = 52;
pub const FS4: u8 = 54;
pub const GS4: u8 = 56;
pub const A4: u8 = 57;
pub const B4: u8 = 59;
pub const D5: u8 = 62;
pub const FS5: u8 = 66;
pub const A5: u8 = 69;
