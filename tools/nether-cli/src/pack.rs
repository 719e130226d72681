//! Pack command - create .nczx ROM from WASM + assets
//!
//! Automatically compresses textures based on render mode:
//! - Mode 0 (Lambert): RGBA8 (uncompressed)
//! - Mode 1-3 (Matcap/PBR/Hybrid): BC7 (4× compression)

use anyhow::{Context, Result};
use clap::Args;
use std::path::PathBuf;

use nethercore_shared::math::BoneMatrix3x4;
use nethercore_shared::ZX_ROM_FORMAT;
use zx_common::{
    vertex_stride_packed, NetherZXAnimationHeader, NetherZXMeshHeader, NetherZXSkeletonHeader,
    PackedData, PackedKeyframes, PackedMesh, PackedSkeleton, PackedSound, PackedTexture,
    PackedTracker, TextureFormat, ZMetadata, ZXDataPack, ZXRom, INVERSE_BIND_MATRIX_SIZE,
};

use crate::manifest::{AssetsSection, NetherManifest};

/// Arguments for the pack command
#[derive(Args)]
pub struct PackArgs {
    /// Path to nether.toml manifest file
    #[arg(short, long, default_value = "nether.toml")]
    pub manifest: PathBuf,

    /// Output .nczx file path
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Path to WASM file (overrides auto-detection)
    #[arg(long)]
    pub wasm: Option<PathBuf>,
}

/// Execute the pack command
pub fn execute(args: PackArgs) -> Result<()> {
    // Read manifest
    let manifest_path = &args.manifest;
    let manifest = NetherManifest::load(manifest_path)?;

    println!(
        "Packing game: {} ({})",
        manifest.game.title, manifest.game.id
    );

    // Get project directory (parent of manifest)
    let project_dir = manifest_path
        .parent()
        .unwrap_or_else(|| std::path::Path::new("."));

    // Find WASM file
    let wasm_path = if let Some(wasm) = args.wasm {
        wasm
    } else {
        // Use manifest to find WASM (checks build.wasm first, then auto-detects)
        manifest.find_wasm(project_dir, false)?
    };

    // Read WASM code
    let code = std::fs::read(&wasm_path)
        .with_context(|| format!("Failed to read WASM file: {}", wasm_path.display()))?;
    println!("  WASM: {} ({} bytes)", wasm_path.display(), code.len());

    // Analyze WASM to get render mode
    let analysis =
        nethercore_core::analysis::analyze_wasm(&code).context("Failed to analyze WASM file")?;
    let render_mode = analysis.render_mode;

    // Determine texture format based on render mode
    let texture_format = if render_mode == 0 {
        TextureFormat::Rgba8
    } else {
        TextureFormat::Bc7
    };

    let format_name = match texture_format {
        TextureFormat::Rgba8 => "RGBA8 (uncompressed)",
        TextureFormat::Bc7 => "BC7 (4× compressed)",
    };
    println!(
        "  Render mode: {} -> textures: {}",
        render_mode, format_name
    );

    // Load assets into data pack
    let data_pack = load_assets(project_dir, &manifest.assets, texture_format)?;

    // Create metadata
    let metadata = ZMetadata {
        id: manifest.game.id.clone(),
        title: manifest.game.title.clone(),
        author: manifest.game.author.clone(),
        version: manifest.game.version.clone(),
        description: manifest.game.description.clone(),
        tags: manifest.game.tags.clone(),
        platform_game_id: None,
        platform_author_id: None,
        created_at: chrono::Utc::now().to_rfc3339(),
        tool_version: env!("CARGO_PKG_VERSION").to_string(),
        render_mode: Some(render_mode as u32),
        default_resolution: None,
        target_fps: None,
    };

    // Create ROM
    let rom = ZXRom {
        version: ZX_ROM_FORMAT.version,
        metadata,
        code,
        data_pack: if data_pack.is_empty() {
            None
        } else {
            Some(data_pack)
        },
        thumbnail: None,
        screenshots: vec![],
    };

    // Validate ROM
    rom.validate().context("ROM validation failed")?;

    // Determine output path
    let output_path = args.output.unwrap_or_else(|| {
        project_dir.join(format!("{}.{}", manifest.game.id, ZX_ROM_FORMAT.extension))
    });

    // Write ROM
    let rom_bytes = rom.to_bytes().context("Failed to serialize ROM")?;
    std::fs::write(&output_path, &rom_bytes)
        .with_context(|| format!("Failed to write ROM: {}", output_path.display()))?;

    println!();
    println!(
        "Created: {} ({} bytes)",
        output_path.display(),
        rom_bytes.len()
    );
    println!("  Game ID: {}", manifest.game.id);
    println!("  Title: {}", manifest.game.title);
    println!("  Version: {}", manifest.game.version);

    Ok(())
}

/// Load assets from disk into a data pack (parallel)
fn load_assets(
    project_dir: &std::path::Path,
    assets: &AssetsSection,
    texture_format: TextureFormat,
) -> Result<ZXDataPack> {
    use rayon::prelude::*;

    // Load all asset types in parallel
    // Textures are the most expensive (BC7 compression), so they benefit most from parallelism

    // Load textures in parallel
    let textures: Result<Vec<_>> = assets
        .textures
        .par_iter()
        .map(|entry| {
            let path = project_dir.join(&entry.path);
            load_texture(&entry.id, &path, texture_format)
        })
        .collect();
    let textures = textures?;

    // Load meshes in parallel
    let meshes: Result<Vec<_>> = assets
        .meshes
        .par_iter()
        .map(|entry| {
            let path = project_dir.join(&entry.path);
            load_mesh(&entry.id, &path)
        })
        .collect();
    let meshes = meshes?;

    // Load skeletons in parallel
    let skeletons: Result<Vec<_>> = assets
        .skeletons
        .par_iter()
        .map(|entry| {
            let path = project_dir.join(&entry.path);
            load_skeleton(&entry.id, &path)
        })
        .collect();
    let skeletons = skeletons?;

    // Load keyframes in parallel (support both 'keyframes' and 'animations' keys)
    // Combine both 'keyframes' and 'animations' entries
    let all_keyframe_entries: Vec<_> = assets
        .keyframes
        .iter()
        .chain(assets.animations.iter())
        .collect();

    let keyframes: Result<Vec<_>> = all_keyframe_entries
        .par_iter()
        .map(|entry| {
            let path = project_dir.join(&entry.path);
            load_keyframes(&entry.id, &path)
        })
        .collect();
    let keyframes = keyframes?;

    // Load sounds in parallel
    let sounds: Result<Vec<_>> = assets
        .sounds
        .par_iter()
        .map(|entry| {
            let path = project_dir.join(&entry.path);
            load_sound(&entry.id, &path)
        })
        .collect();
    let sounds = sounds?;

    // Load trackers in parallel
    let trackers: Result<Vec<_>> = assets
        .trackers
        .par_iter()
        .map(|entry| {
            let path = project_dir.join(&entry.path);
            load_tracker(&entry.id, &path)
        })
        .collect();
    let trackers = trackers?;

    // Load raw data in parallel
    let data: Result<Vec<_>> = assets
        .data
        .par_iter()
        .map(|entry| {
            let path = project_dir.join(&entry.path);
            load_data(&entry.id, &path)
        })
        .collect();
    let data = data?;

    // Print results (after parallel loading completes)
    for texture in &textures {
        let format_str = if texture.format.is_bc7() {
            " [BC7]"
        } else {
            ""
        };
        println!(
            "  Texture: {} ({}x{}){}",
            texture.id, texture.width, texture.height, format_str
        );
    }
    for mesh in &meshes {
        println!("  Mesh: {} ({} vertices)", mesh.id, mesh.vertex_count);
    }
    for kf in &keyframes {
        println!(
            "  Keyframes: {} ({} bones, {} frames)",
            kf.id, kf.bone_count, kf.frame_count
        );
    }
    for sound in &sounds {
        println!("  Sound: {} ({:.2}s)", sound.id, sound.duration_seconds());
    }
    for tracker in &trackers {
        println!(
            "  Tracker: {} ({} instruments)",
            tracker.id,
            tracker.sample_ids.len()
        );
    }
    for d in &data {
        println!("  Data: {} ({} bytes)", d.id, d.data.len());
    }
    for skeleton in &skeletons {
        println!(
            "  Skeleton: {} ({} bones)",
            skeleton.id, skeleton.bone_count
        );
    }

    let total = textures.len()
        + meshes.len()
        + skeletons.len()
        + keyframes.len()
        + sounds.len()
        + trackers.len()
        + data.len();
    if total > 0 {
        println!("  Total: {} assets", total);
    }

    Ok(ZXDataPack::with_assets(
        textures,
        meshes,
        skeletons,
        keyframes,
        vec![], // fonts: TODO: add font loading when needed
        sounds,
        data,
        trackers,
    ))
}

/// Load a texture from an image file (PNG, JPG, etc.)
///
/// Compresses to BC7 if the format requires it.
fn load_texture(id: &str, path: &std::path::Path, format: TextureFormat) -> Result<PackedTexture> {
    let img =
        image::open(path).with_context(|| format!("Failed to load texture: {}", path.display()))?;

    let rgba = img.to_rgba8();
    let (width, height) = rgba.dimensions();
    let pixels = rgba.as_raw();

    // Compress or pass through based on format
    let data = match format {
        TextureFormat::Rgba8 => pixels.to_vec(),
        TextureFormat::Bc7 => compress_bc7(pixels, width, height)?,
    };

    Ok(PackedTexture::with_format(
        id,
        width as u16,
        height as u16,
        format,
        data,
    ))
}

/// Compress RGBA8 pixels to BC7 format
///
/// Uses intel_tex_2 (ISPC-based) for high-quality BC7 compression.
fn compress_bc7(pixels: &[u8], width: u32, height: u32) -> Result<Vec<u8>> {
    use intel_tex_2::bc7;

    let w = width as usize;
    let h = height as usize;

    // Calculate block dimensions (round up to 4×4 blocks)
    let blocks_x = (w + 3) / 4;
    let blocks_y = (h + 3) / 4;
    let output_size = blocks_x * blocks_y * 16;

    let mut output = vec![0u8; output_size];

    // Create padded buffer if dimensions aren't multiples of 4
    let padded_width = blocks_x * 4;
    let padded_height = blocks_y * 4;

    let input_data: Vec<u8> = if w == padded_width && h == padded_height {
        pixels.to_vec()
    } else {
        // Create padded buffer with edge extension
        let mut padded = vec![0u8; padded_width * padded_height * 4];

        for y in 0..padded_height {
            for x in 0..padded_width {
                let src_x = x.min(w - 1);
                let src_y = y.min(h - 1);

                let src_idx = (src_y * w + src_x) * 4;
                let dst_idx = (y * padded_width + x) * 4;

                padded[dst_idx..dst_idx + 4].copy_from_slice(&pixels[src_idx..src_idx + 4]);
            }
        }

        padded
    };

    // Create surface for intel_tex_2
    let surface = intel_tex_2::RgbaSurface {
        width: padded_width as u32,
        height: padded_height as u32,
        stride: (padded_width * 4) as u32,
        data: &input_data,
    };

    // Compress using intel_tex_2 BC7 (fast settings for good speed/quality balance)
    bc7::compress_blocks_into(&bc7::opaque_fast_settings(), &surface, &mut output);

    Ok(output)
}

/// Load a mesh from file
///
/// Supports:
/// - .nczxmesh / .nczmesh (Nethercore ZX mesh format) - direct load
/// - .obj (Wavefront OBJ) - auto-converted via nether-export
/// - .gltf / .glb (glTF 2.0) - auto-converted via nether-export
fn load_mesh(id: &str, path: &std::path::Path) -> Result<PackedMesh> {
    // Detect format by extension
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|s| s.to_lowercase())
        .unwrap_or_default();

    match ext.as_str() {
        // Native format - direct load
        "nczmesh" | "nczxmesh" => load_mesh_native(id, path),

        // OBJ - convert via nether-export
        "obj" => {
            let converted = nether_export::convert_obj_to_memory(path)
                .with_context(|| format!("Failed to convert OBJ: {}", path.display()))?;

            Ok(PackedMesh {
                id: id.to_string(),
                format: converted.format,
                vertex_count: converted.vertex_count,
                index_count: converted.index_count,
                vertex_data: converted.vertex_data,
                index_data: converted.indices,
            })
        }

        // glTF/GLB - convert via nether-export
        "gltf" | "glb" => {
            let converted = nether_export::convert_gltf_to_memory(path)
                .with_context(|| format!("Failed to convert glTF: {}", path.display()))?;

            Ok(PackedMesh {
                id: id.to_string(),
                format: converted.format,
                vertex_count: converted.vertex_count,
                index_count: converted.index_count,
                vertex_data: converted.vertex_data,
                index_data: converted.indices,
            })
        }

        _ => anyhow::bail!(
            "Unsupported mesh format '{}': {} (use .nczmesh, .obj, .gltf, or .glb)",
            ext,
            path.display()
        ),
    }
}

/// Load a native .nczmesh/.nczxmesh file
fn load_mesh_native(id: &str, path: &std::path::Path) -> Result<PackedMesh> {
    let data =
        std::fs::read(path).with_context(|| format!("Failed to load mesh: {}", path.display()))?;

    // Parse NetherZXMesh header
    let header = NetherZXMeshHeader::from_bytes(&data)
        .context("Failed to parse mesh header - file may be corrupted or wrong format")?;

    // Validate header
    if header.vertex_count == 0 {
        anyhow::bail!("Mesh has no vertices: {}", path.display());
    }
    if header.format > 15 {
        anyhow::bail!("Invalid mesh format {}: {}", header.format, path.display());
    }

    // Calculate stride based on format flags (using z-common)
    let stride = vertex_stride_packed(header.format) as usize;
    let vertex_data_size = header.vertex_count as usize * stride;
    let index_data_size = header.index_count as usize * 2; // u16 indices

    // Validate data size
    let expected_size = NetherZXMeshHeader::SIZE + vertex_data_size + index_data_size;
    if data.len() < expected_size {
        anyhow::bail!(
            "Mesh data too small: {} bytes, expected {} (vertices: {}, indices: {}, format: {})",
            data.len(),
            expected_size,
            header.vertex_count,
            header.index_count,
            header.format
        );
    }

    // Extract vertex and index data
    let vertex_start = NetherZXMeshHeader::SIZE;
    let vertex_end = vertex_start + vertex_data_size;
    let index_end = vertex_end + index_data_size;

    let vertex_data = data[vertex_start..vertex_end].to_vec();

    // Convert index bytes to u16 values
    let index_data: Vec<u16> = data[vertex_end..index_end]
        .chunks_exact(2)
        .map(|chunk| u16::from_le_bytes([chunk[0], chunk[1]]))
        .collect();

    Ok(PackedMesh {
        id: id.to_string(),
        format: header.format,
        vertex_count: header.vertex_count,
        index_count: header.index_count,
        vertex_data,
        index_data,
    })
}

/// Load keyframes from .nczxanim file
///
/// The new platform format (16 bytes per bone per frame):
/// - Header: 4 bytes (bone_count u8, flags u8, frame_count u16 LE)
/// - Data: frame_count × bone_count × 16 bytes
fn load_keyframes(id: &str, path: &std::path::Path) -> Result<PackedKeyframes> {
    let data = std::fs::read(path)
        .with_context(|| format!("Failed to load keyframes: {}", path.display()))?;

    // Parse header
    let header = NetherZXAnimationHeader::from_bytes(&data)
        .context("Failed to parse keyframes header - file may be corrupted or wrong format")?;

    // Copy values from packed struct to avoid alignment issues
    let bone_count = header.bone_count;
    let frame_count = header.frame_count;
    let flags = header.flags;

    // Validate header
    if !header.validate() {
        anyhow::bail!(
            "Invalid keyframes header (bone_count={}, frame_count={}, flags={}): {}",
            bone_count,
            frame_count,
            flags,
            path.display()
        );
    }

    // Validate data size
    let expected_size = header.file_size();
    if data.len() < expected_size {
        anyhow::bail!(
            "Keyframes data too small: {} bytes, expected {} (bones: {}, frames: {})",
            data.len(),
            expected_size,
            bone_count,
            frame_count
        );
    }

    // Extract frame data (skip header)
    let frame_data = data[NetherZXAnimationHeader::SIZE..expected_size].to_vec();

    Ok(PackedKeyframes {
        id: id.to_string(),
        bone_count,
        frame_count,
        data: frame_data,
    })
}

/// Load a sound from a WAV file
fn load_sound(id: &str, path: &std::path::Path) -> Result<PackedSound> {
    // Read WAV file and convert to 22050Hz mono i16
    let data =
        std::fs::read(path).with_context(|| format!("Failed to load sound: {}", path.display()))?;

    // Parse WAV header (simplified - assumes 16-bit PCM)
    if data.len() < 44 || &data[0..4] != b"RIFF" || &data[8..12] != b"WAVE" {
        anyhow::bail!("Invalid WAV file: {}", path.display());
    }

    // Find data chunk
    let mut offset = 12;
    let mut audio_data = vec![];

    while offset + 8 < data.len() {
        let chunk_id = &data[offset..offset + 4];
        let chunk_size = u32::from_le_bytes([
            data[offset + 4],
            data[offset + 5],
            data[offset + 6],
            data[offset + 7],
        ]) as usize;

        if chunk_id == b"data" {
            let end = (offset + 8 + chunk_size).min(data.len());
            let samples: Vec<i16> = data[offset + 8..end]
                .chunks_exact(2)
                .map(|chunk| i16::from_le_bytes([chunk[0], chunk[1]]))
                .collect();
            audio_data = samples;
            break;
        }

        offset += 8 + chunk_size;
        if !chunk_size.is_multiple_of(2) {
            offset += 1; // Padding byte
        }
    }

    if audio_data.is_empty() {
        anyhow::bail!("No audio data found in WAV file: {}", path.display());
    }

    Ok(PackedSound {
        id: id.to_string(),
        data: audio_data,
    })
}

/// Load raw data from file
fn load_data(id: &str, path: &std::path::Path) -> Result<PackedData> {
    let data =
        std::fs::read(path).with_context(|| format!("Failed to load data: {}", path.display()))?;

    Ok(PackedData {
        id: id.to_string(),
        data,
    })
}

/// Load a tracker module from XM file
///
/// Parses the XM file, extracts instrument names for sample mapping,
/// and strips embedded sample data (samples are loaded separately via sounds).
fn load_tracker(id: &str, path: &std::path::Path) -> Result<PackedTracker> {
    let data = std::fs::read(path)
        .with_context(|| format!("Failed to load tracker: {}", path.display()))?;

    // Get instrument names from XM file (for mapping to sounds)
    let sample_ids = nether_xm::get_instrument_names(&data)
        .with_context(|| format!("Failed to parse tracker instruments: {}", path.display()))?;

    // Strip sample data from XM (keep only patterns/metadata)
    let pattern_data = nether_xm::strip_xm_samples(&data)
        .with_context(|| format!("Failed to strip tracker samples: {}", path.display()))?;

    Ok(PackedTracker {
        id: id.to_string(),
        pattern_data,
        sample_ids,
    })
}

/// Load a skeleton from .nczxskel file
///
/// File format:
/// - Header: 8 bytes (bone_count u32, reserved u32)
/// - Data: bone_count × 48 bytes (inverse bind matrices, 12 floats each)
fn load_skeleton(id: &str, path: &std::path::Path) -> Result<PackedSkeleton> {
    let data = std::fs::read(path)
        .with_context(|| format!("Failed to load skeleton: {}", path.display()))?;

    // Parse header
    let header = NetherZXSkeletonHeader::from_bytes(&data)
        .context("Failed to parse skeleton header - file may be corrupted or wrong format")?;

    let bone_count = header.bone_count;

    // Validate header
    if bone_count == 0 {
        anyhow::bail!("Skeleton has no bones: {}", path.display());
    }
    if bone_count > 256 {
        anyhow::bail!(
            "Skeleton has too many bones ({}, max 256): {}",
            bone_count,
            path.display()
        );
    }

    // Validate data size
    let expected_size =
        NetherZXSkeletonHeader::SIZE + (bone_count as usize * INVERSE_BIND_MATRIX_SIZE);
    if data.len() < expected_size {
        anyhow::bail!(
            "Skeleton data too small: {} bytes, expected {} (bones: {})",
            data.len(),
            expected_size,
            bone_count
        );
    }

    // Extract inverse bind matrices
    let matrix_data = &data[NetherZXSkeletonHeader::SIZE..expected_size];
    let mut inverse_bind_matrices = Vec::with_capacity(bone_count as usize);

    for i in 0..bone_count as usize {
        let offset = i * INVERSE_BIND_MATRIX_SIZE;
        let matrix_bytes = &matrix_data[offset..offset + INVERSE_BIND_MATRIX_SIZE];

        // Parse 12 floats from file (column-major: col0, col1, col2, col3)
        let mut cols = [[0.0f32; 3]; 4];
        for col in 0..4 {
            for row in 0..3 {
                let float_offset = (col * 3 + row) * 4;
                cols[col][row] = f32::from_le_bytes([
                    matrix_bytes[float_offset],
                    matrix_bytes[float_offset + 1],
                    matrix_bytes[float_offset + 2],
                    matrix_bytes[float_offset + 3],
                ]);
            }
        }

        // Convert to row-major for BoneMatrix3x4
        let matrix = BoneMatrix3x4::from_rows(
            [cols[0][0], cols[1][0], cols[2][0], cols[3][0]], // row 0
            [cols[0][1], cols[1][1], cols[2][1], cols[3][1]], // row 1
            [cols[0][2], cols[1][2], cols[2][2], cols[3][2]], // row 2
        );
        inverse_bind_matrices.push(matrix);
    }

    Ok(PackedSkeleton {
        id: id.to_string(),
        bone_count,
        inverse_bind_matrices,
    })
}
