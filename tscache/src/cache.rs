// Per-stream TS segment cache
//
// One `TsCache` exists per publishing stream. It keeps:
// - a bounded live window (rolling playlist, FIFO eviction)
// - the complete history (VOD playlist, never evicted)
// Both views live behind a single RwLock, so a reader never observes a
// half-applied insert. Persistence renders under the read lock and performs
// I/O after the lock is released.

use crate::config::CacheConfig;
use crate::error::{CacheError, CacheResult};
use crate::playlist;
use crate::segment::Segment;
use crate::storage::{FileStorage, HlsStorage};
use crate::window::{History, LiveWindow, DEFAULT_WINDOW_SIZE};
use bytes::Bytes;
use parking_lot::RwLock;
use std::num::NonZeroUsize;
use std::sync::Arc;

#[derive(Debug)]
struct CacheState {
    live: LiveWindow,
    history: History,
}

/// Segment cache for a single stream
pub struct TsCache {
    id: String,
    state: RwLock<CacheState>,
    storage: Arc<dyn HlsStorage>,
}

impl std::fmt::Debug for TsCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let state = self.state.read();
        f.debug_struct("TsCache")
            .field("id", &self.id)
            .field("live", &state.live.len())
            .field("history", &state.history.len())
            .finish_non_exhaustive()
    }
}

impl TsCache {
    /// Create a cache with the default window size, persisting under `tmp/`
    pub fn new(id: impl Into<String>) -> Self {
        Self::with_storage(id, DEFAULT_WINDOW_SIZE, Arc::new(FileStorage::default()))
    }

    /// Create a cache with an explicit window size and storage backend
    pub fn with_storage(
        id: impl Into<String>,
        window_size: NonZeroUsize,
        storage: Arc<dyn HlsStorage>,
    ) -> Self {
        Self {
            id: id.into(),
            state: RwLock::new(CacheState {
                live: LiveWindow::new(window_size),
                history: History::new(),
            }),
            storage,
        }
    }

    /// Create a cache from configuration, persisting to a `FileStorage` at
    /// `config.staging_root`
    pub fn from_config(id: impl Into<String>, config: &CacheConfig) -> CacheResult<Self> {
        config.validate()?;
        Ok(Self::with_storage(
            id,
            config.window_size()?,
            Arc::new(FileStorage::new(&config.staging_root)),
        ))
    }

    #[must_use]
    pub fn id(&self) -> &str {
        &self.id
    }

    #[must_use]
    pub fn capacity(&self) -> NonZeroUsize {
        self.state.read().live.capacity()
    }

    /// Insert or overwrite `segment` under `key` in both views.
    ///
    /// A key already known to a view keeps its position there. A new key
    /// pushes out the oldest live entry once the window is full.
    pub fn put(&self, key: impl Into<String>, segment: Segment) {
        let key = key.into();
        let segment = Arc::new(segment);

        let mut state = self.state.write();
        if let Some(evicted) = state.live.insert(&key, Arc::clone(&segment)) {
            tracing::debug!(
                stream = %self.id,
                evicted = %evicted,
                "Evicted segment from live window"
            );
        }
        state.history.insert(&key, segment);
    }

    /// Look up a segment still held by the live window.
    pub fn get(&self, key: &str) -> CacheResult<Arc<Segment>> {
        self.state
            .read()
            .live
            .get(key)
            .cloned()
            .ok_or_else(|| CacheError::NotFound(key.to_string()))
    }

    /// Look up any segment inserted during the stream's lifetime.
    pub fn get_archived(&self, key: &str) -> CacheResult<Arc<Segment>> {
        self.state
            .read()
            .history
            .get(key)
            .cloned()
            .ok_or_else(|| CacheError::NotFound(key.to_string()))
    }

    /// Rolling playlist over the live window
    #[must_use]
    pub fn render_live_playlist(&self) -> Bytes {
        let state = self.state.read();
        playlist::live_playlist(state.live.iter())
    }

    /// Terminated playlist over the complete history, entries re-rooted under
    /// `base_path`
    #[must_use]
    pub fn render_complete_playlist(&self, base_path: &str) -> Bytes {
        let state = self.state.read();
        playlist::complete_playlist(state.history.iter(), base_path)
    }

    /// Render the complete playlist and write it to `<base_path>.m3u8`.
    pub async fn persist_complete_playlist(&self, base_path: &str) -> CacheResult<()> {
        let manifest = self.render_complete_playlist(base_path);
        let key = format!("{base_path}.m3u8");

        self.storage.write(&key, manifest).await?;

        tracing::info!(stream = %self.id, key = %key, "Saved complete playlist");

        Ok(())
    }

    /// Write `segment`'s payload to `<app_name>/<key>.ts`.
    ///
    /// Failing to create the app directory is logged and the write is still
    /// attempted; the write error, if any, is returned.
    pub async fn persist_segment(
        &self,
        app_name: &str,
        key: &str,
        segment: &Segment,
    ) -> CacheResult<()> {
        if let Err(e) = self.storage.ensure_dir(app_name).await {
            tracing::warn!(
                stream = %self.id,
                app = %app_name,
                "Creating app directory failed: {}",
                e
            );
        }

        let file_key = format!("{app_name}/{key}.ts");
        tracing::info!(stream = %self.id, key = %file_key, "Saving segment");

        self.storage.write(&file_key, segment.payload.clone()).await?;

        Ok(())
    }

    #[must_use]
    pub fn live_len(&self) -> usize {
        self.state.read().live.len()
    }

    #[must_use]
    pub fn history_len(&self) -> usize {
        self.state.read().history.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.state.read().history.is_empty()
    }

    /// Keys of the live window, oldest first
    #[must_use]
    pub fn live_keys(&self) -> Vec<String> {
        self.state.read().live.keys().map(str::to_string).collect()
    }

    /// Keys of the complete history, in insertion order
    #[must_use]
    pub fn history_keys(&self) -> Vec<String> {
        self.state.read().history.keys().map(str::to_string).collect()
    }

    /// Both views agree with their indexes and the live window is within bounds.
    #[must_use]
    pub fn is_consistent(&self) -> bool {
        let state = self.state.read();
        state.live.is_consistent()
            && state.history.is_consistent()
            && state.live.len() <= state.live.capacity().get()
            && state.live.keys().all(|key| state.history.get(key).is_some())
    }
}
