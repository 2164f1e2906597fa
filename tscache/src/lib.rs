//! Per-stream HLS segment cache.
//!
//! A [`TsCache`] buffers the MPEG-TS segments of one live stream, renders the
//! rolling live playlist and the terminated VOD playlist, and can persist
//! segments and the final playlist through an [`HlsStorage`] backend.
//!
//! ```no_run
//! use bytes::Bytes;
//! use tscache::{Segment, TsCache};
//!
//! let cache = TsCache::new("live/room_123");
//! cache.put("seg-1", Segment::new("live/room_123/seg-1", 1, 2000, Bytes::new()));
//! let m3u8 = cache.render_live_playlist();
//! assert!(m3u8.starts_with(b"#EXTM3U"));
//! ```

pub mod cache;
pub mod config;
pub mod error;
pub mod logging;
pub mod playlist;
pub mod segment;
pub mod storage;
pub mod window;

pub use cache::TsCache;
pub use config::{CacheConfig, LoggingConfig};
pub use error::{CacheError, CacheResult};
pub use segment::Segment;
pub use storage::{FileStorage, HlsStorage, MemoryStorage};
