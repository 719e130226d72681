//! Container parse error type.
//!
//! Hand-rolled `Display`/`Error` rather than `thiserror` — not every parser
//! in this pipeline reaches for the derive macro, same as the legacy XM
//! module parser it's grounded on.

use core::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContainerError {
    TooSmall,
    InvalidMagic,
    UnsupportedVersion(u16),
    TableTooLarge(&'static str, u32),
    InvalidEncoding(u8),
    InvalidDimensions(u16, u16),
    UnexpectedEof,
}

impl fmt::Display for ContainerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ContainerError::TooSmall => write!(f, "file too small to contain a container header"),
            ContainerError::InvalidMagic => write!(f, "invalid container magic bytes"),
            ContainerError::UnsupportedVersion(v) => write!(f, "unsupported container version: {v}"),
            ContainerError::TableTooLarge(label, n) => {
                write!(f, "{label} has {n} entries, exceeding the parse limit")
            }
            ContainerError::InvalidEncoding(code) => write!(f, "unknown image encoding type code {code}"),
            ContainerError::InvalidDimensions(w, h) => {
                write!(f, "invalid image dimensions {w}x{h}")
            }
            ContainerError::UnexpectedEof => write!(f, "unexpected end of container file"),
        }
    }
}

impl std::error::Error for ContainerError {}
