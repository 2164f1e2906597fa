// File system storage backend
//
// Files are laid out verbatim under the staging root:
// - "<root>/<app>/<key>.ts" for segments
// - "<root>/<base>.m3u8" for playlists
// Keys are validated instead of hashed so that file names stay readable by
// external tools.

use super::{validate_key, HlsStorage};
use async_trait::async_trait;
use bytes::Bytes;
use std::io::Result;
use std::path::PathBuf;
use tokio::fs;

/// Default staging root, relative to the working directory.
pub const DEFAULT_STAGING_ROOT: &str = "tmp";

/// File system storage backend
#[derive(Debug, Clone)]
pub struct FileStorage {
    base_path: PathBuf,
}

impl FileStorage {
    /// Create new file storage with base path
    pub fn new(base_path: impl Into<PathBuf>) -> Self {
        Self {
            base_path: base_path.into(),
        }
    }

    fn get_path(&self, key: &str) -> Result<PathBuf> {
        validate_key(key)?;
        Ok(self.base_path.join(key))
    }
}

impl Default for FileStorage {
    fn default() -> Self {
        Self::new(DEFAULT_STAGING_ROOT)
    }
}

#[async_trait]
impl HlsStorage for FileStorage {
    async fn ensure_dir(&self, dir: &str) -> Result<()> {
        let dir_path = self.get_path(dir)?;
        fs::create_dir_all(&dir_path).await?;

        tracing::trace!("Ensured directory: {:?}", dir_path);

        Ok(())
    }

    async fn write(&self, key: &str, data: Bytes) -> Result<()> {
        let file_path = self.get_path(key)?;
        let size = data.len();
        fs::write(&file_path, data).await?;

        tracing::trace!("Wrote: {:?} ({} bytes) for key: {}", file_path, size, key);

        Ok(())
    }
}
