// Persistence backends for segments and finished playlists
//
// - FileStorage: local filesystem under a staging root (default)
// - MemoryStorage: in-memory (for testing)
//
// Keys are relative, `/`-separated paths such as "live/seg-7.ts" or
// "live.m3u8". The cache decides the key layout, backends only store bytes.

pub mod file;
pub mod memory;

use async_trait::async_trait;
use bytes::Bytes;
use std::io::{Error, ErrorKind, Result};

/// HLS storage trait for pluggable backends
#[async_trait]
pub trait HlsStorage: Send + Sync {
    /// Make sure a directory-like prefix exists before keys under it are written
    ///
    /// # Arguments
    /// * `dir` - Relative directory (e.g., "live")
    async fn ensure_dir(&self, dir: &str) -> Result<()>;

    /// Write data to storage, replacing any previous value
    ///
    /// # Arguments
    /// * `key` - Storage key (e.g., "`live/seg-7.ts`")
    /// * `data` - Binary data to store
    async fn write(&self, key: &str, data: Bytes) -> Result<()>;
}

/// Reject keys that could escape the staging root.
pub fn validate_key(key: &str) -> Result<()> {
    let escapes = key.is_empty()
        || key.starts_with('/')
        || key.starts_with('\\')
        || key.split(['/', '\\']).any(|part| part == "..")
        || key.contains('\0');

    if escapes {
        return Err(Error::new(
            ErrorKind::InvalidInput,
            format!("Invalid storage key: {key:?}"),
        ));
    }
    Ok(())
}

pub use file::FileStorage;
pub use memory::MemoryStorage;
