use std::path::{Path, PathBuf};
use tokio::fs;

/// Extensions uploads were meant to be limited to. Not checked anywhere.
pub const ALLOWED_EXTENSIONS: [&str; 5] = ["png", "jpg", "jpeg", "gif", "webp"];

/// Intended upload size cap (10 MiB). Not checked anywhere.
pub const MAX_FILE_SIZE: u64 = 10 * 1024 * 1024;

/// Flat directory holding one file per uploaded name.
#[derive(Debug, Clone)]
pub struct UploadDir {
    root: PathBuf,
}

impl UploadDir {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Creates the directory (and any parents) if it is missing.
    pub async fn ensure_exists(&self) -> std::io::Result<()> {
        fs::create_dir_all(&self.root).await
    }

    /// Joins a client-supplied name onto the root as-is. `..` segments and
    /// absolute names are not rejected, so the result may lie outside `root`.
    pub fn path_for(&self, name: &str) -> PathBuf {
        self.root.join(name)
    }
}
