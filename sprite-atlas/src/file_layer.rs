//! File-access collaborator contract (§6 "Inbound from the file layer").
//!
//! This is one of the pipeline's external collaborators: the spec only
//! cites its contract, not its implementation. The real implementation
//! (memory-mapped ROM reads, archive extraction, whatever backs it) lives
//! outside this crate; [`RecordingFileLayer`] stands in for it in tests.

use hashbrown::HashMap;

/// Abstracts "open a logical file-set by numeric id and get its bytes".
pub trait AssetFileLayer: Send + Sync {
    /// Non-blocking existence probe.
    fn find(&self, file_id: u32, extension: &str) -> bool;

    /// Bulk read. Entries whose backing file is absent are omitted from the
    /// result when `required` is `false`; when `required` is `true`, a
    /// missing entry is an error.
    fn read(
        &self,
        names: &[(String, u32)],
        required: bool,
    ) -> std::io::Result<HashMap<String, Vec<u8>>>;

    /// Read a single container file's raw bytes, or `None` if absent.
    fn read_one(&self, file_id: u32, extension: &str) -> Option<Vec<u8>>;
}

/// An in-memory file layer used by tests and the offline bake CLI: just a
/// map of `file_id -> bytes`, no real filesystem access.
#[derive(Default)]
pub struct RecordingFileLayer {
    files: HashMap<u32, Vec<u8>>,
}

impl RecordingFileLayer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, file_id: u32, bytes: Vec<u8>) {
        self.files.insert(file_id, bytes);
    }
}

impl AssetFileLayer for RecordingFileLayer {
    fn find(&self, file_id: u32, _extension: &str) -> bool {
        self.files.contains_key(&file_id)
    }

    fn read(
        &self,
        names: &[(String, u32)],
        required: bool,
    ) -> std::io::Result<HashMap<String, Vec<u8>>> {
        let mut out = HashMap::new();
        for (name, file_id) in names {
            match self.files.get(file_id) {
                Some(bytes) => {
                    out.insert(name.clone(), bytes.clone());
                }
                None if required => {
                    return Err(std::io::Error::new(
                        std::io::ErrorKind::NotFound,
                        format!("required file-id {file_id} ({name}) missing"),
                    ));
                }
                None => {}
            }
        }
        Ok(out)
    }

    fn read_one(&self, file_id: u32, _extension: &str) -> Option<Vec<u8>> {
        self.files.get(&file_id).cloned()
    }
}

/// Reads container files straight off disk: `<root>/<file_id>.<extension>`.
/// Used by the offline bake CLI in place of whatever archive or ROM layer
/// backs a running race.
pub struct DirectoryFileLayer {
    root: std::path::PathBuf,
}

impl DirectoryFileLayer {
    pub fn new(root: std::path::PathBuf) -> Self {
        Self { root }
    }

    fn path_for(&self, file_id: u32, extension: &str) -> std::path::PathBuf {
        self.root.join(format!("{file_id}.{extension}"))
    }
}

impl AssetFileLayer for DirectoryFileLayer {
    fn find(&self, file_id: u32, extension: &str) -> bool {
        self.path_for(file_id, extension).is_file()
    }

    fn read(
        &self,
        names: &[(String, u32)],
        required: bool,
    ) -> std::io::Result<HashMap<String, Vec<u8>>> {
        let mut out = HashMap::new();
        for (name, file_id) in names {
            match std::fs::read(self.path_for(*file_id, "dat")) {
                Ok(bytes) => {
                    out.insert(name.clone(), bytes);
                }
                Err(e) if e.kind() == std::io::ErrorKind::NotFound && !required => {}
                Err(e) if !required => {
                    return Err(e);
                }
                Err(e) => return Err(e),
            }
        }
        Ok(out)
    }

    fn read_one(&self, file_id: u32, extension: &str) -> Option<Vec<u8>> {
        std::fs::read(self.path_for(file_id, extension)).ok()
    }
}
