//! Mesh converter (glTF/OBJ -> .nczmesh)

mod gltf;
mod obj;
mod packing;
mod types;

// Re-export public API
pub use gltf::{convert_gltf, convert_gltf_to_memory};
pub use obj::{convert_obj, convert_obj_to_memory};
pub use types::ConvertedMesh;
