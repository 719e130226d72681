//! IT sample extraction for automatic ROM packing
//!
//! This module extracts embedded sample data from IT files for use with
//! Nethercore's automatic sample extraction feature. Samples are decoded
//! from IT format (including IT215 compression) and converted to standard i16 PCM.

use std::io::{Cursor, Read, Seek, SeekFrom};

use crate::error::ItError;
use crate::parser::{load_sample_data, parse_sample, SampleData};
use crate::{IT_MAGIC, MAX_SAMPLES, MIN_COMPATIBLE_VERSION};

/// Extracted sample data from IT file
#[derive(Debug, Clone)]
pub struct ExtractedSample {
    /// Sample index (0-based)
    pub sample_index: u8,
    /// Sample name (used for sample ID generation)
    pub name: String,
    /// Sample rate (C5 speed)
    pub sample_rate: u32,
    /// Bit depth (8 or 16)
    pub bit_depth: u8,
    /// Loop start position in samples
    pub loop_start: u32,
    /// Loop length in samples
    pub loop_length: u32,
    /// Loop type: 0=none, 1=forward, 2=pingpong
    pub loop_type: u8,
    /// Whether the sample is stereo (interleaved L, R, L, R, ...)
    pub is_stereo: bool,
    /// Decoded sample data (i16 format, interleaved if stereo)
    pub data: Vec<i16>,
}

/// Extract all samples from an IT file
///
/// This parses the IT file and extracts all embedded sample data,
/// decoding from IT format (including IT215 compression) to standard i16 PCM.
///
/// # Arguments
/// * `data` - Raw IT file data
///
/// # Returns
/// * `Vec<ExtractedSample>` - All samples found in the IT file
///
/// # Errors
/// * Returns `ItError` if parsing fails
pub fn extract_samples(data: &[u8]) -> Result<Vec<ExtractedSample>, ItError> {
    // Minimum header size: magic (4) + name (26) + ... = 192 bytes
    if data.len() < 192 {
        return Err(ItError::TooSmall);
    }

    // Validate magic "IMPM"
    if &data[0..4] != IT_MAGIC {
        return Err(ItError::InvalidMagic);
    }

    let mut cursor = Cursor::new(data);

    // Skip to SmpNum at offset 0x24 (36)
    cursor.seek(SeekFrom::Start(36))?;
    let num_samples = read_u16(&mut cursor)?;

    if num_samples > MAX_SAMPLES {
        return Err(ItError::TooManySamples(num_samples));
    }

    if num_samples == 0 {
        return Ok(Vec::new());
    }

    // Skip to Cmwt (compatible with) at offset 0x2A (42)
    cursor.seek(SeekFrom::Start(42))?;
    let compatible_with = read_u16(&mut cursor)?;
    if compatible_with < MIN_COMPATIBLE_VERSION {
        return Err(ItError::UnsupportedVersion(compatible_with));
    }

    // Skip to OrdNum at offset 0x20 (32)
    cursor.seek(SeekFrom::Start(32))?;
    let num_orders = read_u16(&mut cursor)?;

    // Skip to InsNum at offset 0x22 (34)
    cursor.seek(SeekFrom::Start(34))?;
    let num_instruments = read_u16(&mut cursor)?;

    // Sample offset table starts at: 0xC0 (192) + num_orders + num_instruments*4
    let sample_offset_table_start = 192 + num_orders as u64 + (num_instruments as u64 * 4);
    cursor.seek(SeekFrom::Start(sample_offset_table_start))?;

    // Read sample offsets
    let mut sample_offsets = Vec::with_capacity(num_samples as usize);
    for _ in 0..num_samples {
        sample_offsets.push(read_u32(&mut cursor)?);
    }

    // Extract each sample
    let mut results = Vec::new();

    for (idx, &offset) in sample_offsets.iter().enumerate() {
        if offset == 0 {
            continue; // Empty sample slot
        }

        // Seek to sample header
        cursor.seek(SeekFrom::Start(offset as u64))?;

        // Parse sample header to get metadata and data offset
        let sample_info = match parse_sample(&mut cursor) {
            Ok(info) => info,
            Err(_) => continue, // Skip invalid samples
        };

        // Skip empty samples
        if sample_info.sample.length == 0 {
            continue;
        }

        // Load sample data (handles IT215 compression automatically)
        let sample_data =
            match load_sample_data(data, sample_info.data_offset, &sample_info.sample) {
                Ok(d) => d,
                Err(_) => continue, // Skip samples with load errors
            };

        // Convert to i16
        let data_i16 = match sample_data {
            SampleData::I16(samples) => samples,
            SampleData::I8(samples) => samples.iter().map(|&s| (s as i16) * 256).collect(),
        };

        // Skip if no actual data
        if data_i16.is_empty() {
            continue;
        }

        // Determine loop type
        let loop_type = if !sample_info.sample.has_loop() {
            0 // No loop
        } else if sample_info.sample.is_pingpong_loop() {
            2 // Ping-pong
        } else {
            1 // Forward
        };

        results.push(ExtractedSample {
            sample_index: idx as u8,
            name: sample_info.sample.name.clone(),
            sample_rate: sample_info.sample.c5_speed,
            bit_depth: if sample_info.sample.is_16bit() { 16 } else { 8 },
            loop_start: sample_info.sample.loop_begin,
            loop_length: sample_info
                .sample
                .loop_end
                .saturating_sub(sample_info.sample.loop_begin),
            loop_type,
            is_stereo: sample_info.sample.is_stereo(),
            data: data_i16,
        });
    }

    Ok(results)
}

// =============================================================================
// Helper functions for reading little-endian values
// =============================================================================

fn read_u16(cursor: &mut Cursor<&[u8]>) -> Result<u16, ItError> {
    let mut buf = [0u8; 2];
    cursor
        .read_exact(&mut buf)
        .map_err(|_| ItError::UnexpectedEof)?;
    Ok(u16::from_le_bytes(buf))
}

fn read_u32(cursor: &mut Cursor<&[u8]>) -> Result<u32, ItError> {
    let mut buf = [0u8; 4];
    cursor
        .read_exact(&mut buf)
        .map_err(|_| ItError::UnexpectedEof)?;
    Ok(u32::from_le_bytes(buf))
}
