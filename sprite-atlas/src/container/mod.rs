//! Container reader (§2.1 / §4.1).
//!
//! Parses the four indirection tables (image directory, job table,
//! direction table, frame table) plus the trailing image stream out of a
//! single legacy container file, then exposes pure accessors over the
//! parsed tables. No I/O happens below [`FileSet::parse`].
//!
//! Binary layout (little-endian throughout):
//! ```text
//! header:
//!   magic:             [u8; 4]   b"SPRC"
//!   version:           u16       must be 1
//!   flags:             u8        bit 0 = has job/direction indirection
//!   _reserved:         u8
//!   image_dir_count:   u32
//!   job_count:         u32
//!   direction_count:   u32
//!   frame_count:       u32
//! image directory (image_dir_count entries):
//!   offset_into_image_stream: u32
//!   image_index:              u32
//! job table (job_count entries):
//!   offset: u32   (u32::MAX means "absent")
//!   length: u32
//! direction table (direction_count entries):
//!   offset: u32
//!   length: u32
//! frame table (frame_count entries):
//!   image_directory_index: u32
//! image stream:
//!   remaining bytes, concatenated per-image payloads
//! ```

mod cache;
mod error;

pub use cache::FileSetCache;
pub use error::ContainerError;

use std::io::{Cursor, Read};

const MAGIC: [u8; 4] = *b"SPRC";
const VERSION: u16 = 1;
const HEADER_LEN: usize = 24;
const MAX_TABLE_ENTRIES: u32 = 1 << 20;

fn read_u8(c: &mut Cursor<&[u8]>) -> Result<u8, ContainerError> {
    let mut b = [0u8; 1];
    c.read_exact(&mut b).map_err(|_| ContainerError::UnexpectedEof)?;
    Ok(b[0])
}

fn read_u16(c: &mut Cursor<&[u8]>) -> Result<u16, ContainerError> {
    let mut b = [0u8; 2];
    c.read_exact(&mut b).map_err(|_| ContainerError::UnexpectedEof)?;
    Ok(u16::from_le_bytes(b))
}

fn read_i16(c: &mut Cursor<&[u8]>) -> Result<i16, ContainerError> {
    Ok(read_u16(c)? as i16)
}

fn read_u32(c: &mut Cursor<&[u8]>) -> Result<u32, ContainerError> {
    let mut b = [0u8; 4];
    c.read_exact(&mut b).map_err(|_| ContainerError::UnexpectedEof)?;
    Ok(u32::from_le_bytes(b))
}

/// An `{offset, length}` pair into the direction or frame table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TableSlot {
    pub offset: u32,
    pub length: u32,
}

/// `RLE` is the default legacy codec; `Raw` (type code 32) has no sentinel
/// bytes — every byte is a literal palette index.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EncodingType {
    Rle,
    Raw,
}

impl EncodingType {
    fn from_code(code: u8) -> Result<Self, ContainerError> {
        match code {
            0 => Ok(EncodingType::Rle),
            32 => Ok(EncodingType::Raw),
            other => Err(ContainerError::InvalidEncoding(other)),
        }
    }
}

/// One parsed image payload header. `body_offset`/`body_len` index into the
/// owning [`FileSet`]'s raw bytes; the caller (decoder pool dispatch) slices
/// only what it needs from there, per the transfer discipline in §4.5.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ImageHeader {
    pub width: u16,
    pub height: u16,
    pub anchor_left: i16,
    pub anchor_top: i16,
    pub encoding_type: EncodingType,
    pub palette_group_offset: u16,
    pub body_offset: u32,
    pub body_len: u32,
}

/// One fully parsed container file-set.
pub struct FileSet {
    bytes: Vec<u8>,
    image_dir: Vec<(u32, u32)>, // (offset_into_image_stream, image_index)
    jobs: Vec<Option<TableSlot>>,
    directions: Vec<TableSlot>,
    frames: Vec<u32>,
    has_indirection: bool,
}

impl FileSet {
    /// Parse a complete container file. `bytes` is the whole file contents
    /// as returned by the file layer.
    pub fn parse(bytes: Vec<u8>) -> Result<FileSet, ContainerError> {
        if bytes.len() < HEADER_LEN {
            return Err(ContainerError::TooSmall);
        }

        let mut cursor = Cursor::new(bytes.as_slice());

        let mut magic = [0u8; 4];
        cursor
            .read_exact(&mut magic)
            .map_err(|_| ContainerError::UnexpectedEof)?;
        if magic != MAGIC {
            return Err(ContainerError::InvalidMagic);
        }

        let version = read_u16(&mut cursor)?;
        if version != VERSION {
            return Err(ContainerError::UnsupportedVersion(version));
        }

        let flags = read_u8(&mut cursor)?;
        let _reserved = read_u8(&mut cursor)?;
        let has_indirection = flags & 0b1 != 0;

        let image_dir_count = read_u32(&mut cursor)?;
        let job_count = read_u32(&mut cursor)?;
        let direction_count = read_u32(&mut cursor)?;
        let frame_count = read_u32(&mut cursor)?;

        for (label, n) in [
            ("image directory", image_dir_count),
            ("job table", job_count),
            ("direction table", direction_count),
            ("frame table", frame_count),
        ] {
            if n > MAX_TABLE_ENTRIES {
                return Err(ContainerError::TableTooLarge(label, n));
            }
        }

        let mut image_dir = Vec::with_capacity(image_dir_count as usize);
        for _ in 0..image_dir_count {
            let offset = read_u32(&mut cursor)?;
            let image_index = read_u32(&mut cursor)?;
            image_dir.push((offset, image_index));
        }

        let mut jobs = Vec::with_capacity(job_count as usize);
        for _ in 0..job_count {
            let offset = read_u32(&mut cursor)?;
            let length = read_u32(&mut cursor)?;
            if offset == u32::MAX {
                jobs.push(None);
            } else {
                jobs.push(Some(TableSlot { offset, length }));
            }
        }

        let mut directions = Vec::with_capacity(direction_count as usize);
        for _ in 0..direction_count {
            let offset = read_u32(&mut cursor)?;
            let length = read_u32(&mut cursor)?;
            directions.push(TableSlot { offset, length });
        }

        let mut frames = Vec::with_capacity(frame_count as usize);
        for _ in 0..frame_count {
            frames.push(read_u32(&mut cursor)?);
        }

        drop(cursor);
        Ok(FileSet {
            bytes,
            image_dir,
            jobs,
            directions,
            frames,
            has_indirection,
        })
    }

    pub fn has_indirection(&self) -> bool {
        self.has_indirection
    }

    /// Returns `None` for an out-of-range or explicitly-absent job slot;
    /// the caller treats this as "no such sprite", not a fault (§4.1).
    pub fn job(&self, i: usize) -> Option<TableSlot> {
        self.jobs.get(i).copied().flatten()
    }

    /// Subview by offset+length; out-of-range bounds yield an empty slice
    /// rather than panicking, so a malformed index degrades to "no frames"
    /// instead of crashing the bake.
    pub fn directions(&self, dir_off: u32, dir_len: u32) -> &[TableSlot] {
        sub_slice(&self.directions, dir_off, dir_len)
    }

    pub fn frames(&self, frame_off: u32, frame_len: u32) -> &[u32] {
        sub_slice(&self.frames, frame_off, frame_len)
    }

    /// Byte offset into the image stream for `image_index`, or `None` if
    /// the index is out of range.
    pub fn image_offset(&self, image_index: usize) -> Option<u32> {
        self.image_dir.get(image_index).map(|(offset, _)| *offset)
    }

    pub fn image_directory_len(&self) -> usize {
        self.image_dir.len()
    }

    /// Parse the image payload header at `byte_offset` (an offset returned
    /// by [`FileSet::image_offset`], relative to the start of the image
    /// stream, i.e. the file bytes remaining after the four tables).
    pub fn read_image(&self, byte_offset: u32) -> Result<ImageHeader, ContainerError> {
        let stream_start = self.image_stream_start();
        let start = stream_start
            .checked_add(byte_offset as usize)
            .ok_or(ContainerError::UnexpectedEof)?;
        if start + 12 > self.bytes.len() {
            return Err(ContainerError::UnexpectedEof);
        }

        let mut cursor = Cursor::new(&self.bytes[start..]);
        let width = read_u16(&mut cursor)?;
        let height = read_u16(&mut cursor)?;
        let anchor_left = read_i16(&mut cursor)?;
        let anchor_top = read_i16(&mut cursor)?;
        let encoding_type = EncodingType::from_code(read_u8(&mut cursor)?)?;
        let _reserved = read_u8(&mut cursor)?;
        let palette_group_offset = read_u16(&mut cursor)?;
        let body_len = read_u32(&mut cursor)?;

        let header_len = 16u32;
        let body_offset = byte_offset
            .checked_add(header_len)
            .ok_or(ContainerError::UnexpectedEof)?;

        if width == 0 || height == 0 {
            return Err(ContainerError::InvalidDimensions(width, height));
        }

        Ok(ImageHeader {
            width,
            height,
            anchor_left,
            anchor_top,
            encoding_type,
            palette_group_offset,
            body_offset,
            body_len,
        })
    }

    /// Slice `len` bytes of an image body starting at `body_offset`
    /// (offsets relative to the image stream, as produced by
    /// [`FileSet::read_image`]). Truncated bodies are returned as-is and
    /// handled by the RLE decoder's zero-fill rule (§4.4).
    pub fn image_body(&self, body_offset: u32, len: u32) -> &[u8] {
        let stream_start = self.image_stream_start();
        let start = (stream_start + body_offset as usize).min(self.bytes.len());
        let end = (start + len as usize).min(self.bytes.len());
        &self.bytes[start..end]
    }

    fn image_stream_start(&self) -> usize {
        HEADER_LEN
            + self.image_dir.len() * 8
            + self.jobs.len() * 8
            + self.directions.len() * 8
            + self.frames.len() * 4
    }
}

fn sub_slice<T>(items: &[T], offset: u32, length: u32) -> &[T] {
    let start = offset as usize;
    let end = start.saturating_add(length as usize);
    if start > items.len() || end > items.len() {
        &[]
    } else {
        &items[start..end]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn push_header(out: &mut Vec<u8>, image_dir: u32, jobs: u32, dirs: u32, frames: u32) {
        out.extend_from_slice(&MAGIC);
        out.extend_from_slice(&VERSION.to_le_bytes());
        out.push(1); // has_indirection
        out.push(0);
        out.extend_from_slice(&image_dir.to_le_bytes());
        out.extend_from_slice(&jobs.to_le_bytes());
        out.extend_from_slice(&dirs.to_le_bytes());
        out.extend_from_slice(&frames.to_le_bytes());
    }

    #[test]
    fn rejects_short_input() {
        let err = FileSet::parse(vec![0u8; 4]).unwrap_err();
        assert_eq!(err, ContainerError::TooSmall);
    }

    #[test]
    fn rejects_bad_magic() {
        let mut bytes = vec![0u8; HEADER_LEN];
        bytes[0..4].copy_from_slice(b"XXXX");
        let err = FileSet::parse(bytes).unwrap_err();
        assert_eq!(err, ContainerError::InvalidMagic);
    }

    #[test]
    fn parses_minimal_one_image_container() {
        let mut bytes = Vec::new();
        push_header(&mut bytes, 1, 0, 0, 0);
        // image directory: one entry pointing at offset 0 in the image stream
        bytes.extend_from_slice(&0u32.to_le_bytes());
        bytes.extend_from_slice(&0u32.to_le_bytes());
        // image stream: 2x2 RLE image, body = [0, 4] (four transparent px)
        bytes.extend_from_slice(&2u16.to_le_bytes()); // width
        bytes.extend_from_slice(&2u16.to_le_bytes()); // height
        bytes.extend_from_slice(&0i16.to_le_bytes()); // anchor_left
        bytes.extend_from_slice(&0i16.to_le_bytes()); // anchor_top
        bytes.push(0); // encoding: RLE
        bytes.push(0); // reserved
        bytes.extend_from_slice(&0u16.to_le_bytes()); // palette_group_offset
        bytes.extend_from_slice(&2u32.to_le_bytes()); // body_len
        bytes.extend_from_slice(&[0, 4]);

        let fs = FileSet::parse(bytes).unwrap();
        assert_eq!(fs.image_directory_len(), 1);
        let offset = fs.image_offset(0).unwrap();
        let header = fs.read_image(offset).unwrap();
        assert_eq!(header.width, 2);
        assert_eq!(header.height, 2);
        assert_eq!(header.encoding_type, EncodingType::Rle);
        let body = fs.image_body(header.body_offset, header.body_len);
        assert_eq!(body, &[0, 4]);
    }

    #[test]
    fn out_of_range_job_is_absent_not_a_fault() {
        let mut bytes = Vec::new();
        push_header(&mut bytes, 0, 1, 0, 0);
        bytes.extend_from_slice(&u32::MAX.to_le_bytes());
        bytes.extend_from_slice(&0u32.to_le_bytes());
        let fs = FileSet::parse(bytes).unwrap();
        assert_eq!(fs.job(0), None);
        assert_eq!(fs.job(5), None);
    }

    #[test]
    fn out_of_range_direction_view_is_empty() {
        let mut bytes = Vec::new();
        push_header(&mut bytes, 0, 0, 1, 0);
        bytes.extend_from_slice(&0u32.to_le_bytes());
        bytes.extend_from_slice(&1u32.to_le_bytes());
        let fs = FileSet::parse(bytes).unwrap();
        assert!(fs.directions(5, 10).is_empty());
        assert_eq!(fs.directions(0, 1).len(), 1);
    }
}
