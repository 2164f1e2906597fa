// In-memory storage backend
//
// Useful for tests and for deployments that only need the playlists served
// from memory. Data is lost on restart.

use super::{validate_key, HlsStorage};
use async_trait::async_trait;
use bytes::Bytes;
use dashmap::{DashMap, DashSet};
use std::io::{Error, ErrorKind, Result};

/// In-memory storage backend.
///
/// Directories are tracked so that writes behave like the file backend:
/// writing under a directory that was never ensured fails with `NotFound`.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    data: DashMap<String, Bytes>,
    dirs: DashSet<String>,
}

impl MemoryStorage {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Get number of stored keys
    #[must_use]
    pub fn key_count(&self) -> usize {
        self.data.len()
    }

    /// Stored bytes for `key`, if any
    #[must_use]
    pub fn get(&self, key: &str) -> Option<Bytes> {
        self.data.get(key).map(|entry| entry.value().clone())
    }

    fn parent_exists(&self, key: &str) -> bool {
        key.rsplit_once('/')
            .map_or(true, |(dir, _)| self.dirs.contains(dir))
    }
}

#[async_trait]
impl HlsStorage for MemoryStorage {
    async fn ensure_dir(&self, dir: &str) -> Result<()> {
        validate_key(dir)?;
        // Register every prefix so nested dirs behave like `create_dir_all`
        let mut prefix = String::with_capacity(dir.len());
        for part in dir.split('/').filter(|p| !p.is_empty()) {
            if !prefix.is_empty() {
                prefix.push('/');
            }
            prefix.push_str(part);
            self.dirs.insert(prefix.clone());
        }
        Ok(())
    }

    async fn write(&self, key: &str, data: Bytes) -> Result<()> {
        validate_key(key)?;
        if !self.parent_exists(key) {
            return Err(Error::new(
                ErrorKind::NotFound,
                format!("Parent directory missing for key: {key}"),
            ));
        }

        let size = data.len();
        self.data.insert(key.to_string(), data);

        tracing::trace!("Wrote to memory: {} ({} bytes)", key, size);

        Ok(())
    }
}
