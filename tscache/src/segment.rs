use bytes::Bytes;

/// One encoded MPEG-TS chunk as handed over by the muxer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Segment {
    /// Segment name, may carry path-like structure (e.g., "`live/room_123/seg-7.ts`")
    pub name: String,
    /// Producer assigned sequence number
    pub sequence: u64,
    /// Segment duration in milliseconds
    pub duration_ms: u64,
    /// Raw TS bytes
    pub payload: Bytes,
}

impl Segment {
    #[must_use]
    pub fn new(name: impl Into<String>, sequence: u64, duration_ms: u64, payload: Bytes) -> Self {
        Self {
            name: name.into(),
            sequence,
            duration_ms,
            payload,
        }
    }

    /// Final `/`-separated component of the name.
    #[must_use]
    pub fn file_name(&self) -> &str {
        self.name
            .rsplit_once('/')
            .map_or(self.name.as_str(), |(_, tail)| tail)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.payload.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.payload.is_empty()
    }
}
