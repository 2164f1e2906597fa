// M3U8 generation for cached segments
//
// Both playlist variants share one accumulation pass:
// - target duration: max segment duration (ms) / 1000 + 1
// - media sequence: sequence of the first listed segment
// - one `#EXTINF` pair per segment, in view order
//
// Durations stay integer milliseconds until they are formatted.

use crate::segment::Segment;
use bytes::Bytes;
use std::fmt::Write;

/// End-of-list marker closing a VOD playlist.
pub const ENDLIST_TAG: &str = "#EXT-X-ENDLIST";

/// Format milliseconds as seconds with three decimals (`2500` -> `2.500`).
#[must_use]
pub fn format_duration(duration_ms: u64) -> String {
    format!("{}.{:03}", duration_ms / 1000, duration_ms % 1000)
}

/// Playlist builder over an ordered run of segments.
#[derive(Debug, Default)]
pub struct PlaylistWriter {
    body: String,
    max_duration_ms: u64,
    media_sequence: Option<u64>,
}

impl PlaylistWriter {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append one segment, listed under `uri`.
    pub fn push(&mut self, segment: &Segment, uri: &str) {
        self.max_duration_ms = self.max_duration_ms.max(segment.duration_ms);
        self.media_sequence.get_or_insert(segment.sequence);

        // Writing into a String cannot fail
        let _ = write!(
            self.body,
            "#EXTINF:{},\n{uri}\n",
            format_duration(segment.duration_ms)
        );
    }

    #[must_use]
    pub const fn target_duration(&self) -> u64 {
        self.max_duration_ms / 1000 + 1
    }

    #[must_use]
    pub fn media_sequence(&self) -> u64 {
        self.media_sequence.unwrap_or(0)
    }

    /// Render header and entries, optionally closed with `#EXT-X-ENDLIST`.
    #[must_use]
    pub fn finish(self, end_list: bool) -> Bytes {
        let mut m3u8_content = String::with_capacity(self.body.len() + 128);

        m3u8_content.push_str("#EXTM3U\n");
        m3u8_content.push_str("#EXT-X-VERSION:3\n");
        m3u8_content.push_str("#EXT-X-ALLOW-CACHE:NO\n");
        let _ = writeln!(m3u8_content, "#EXT-X-TARGETDURATION:{}", self.target_duration());
        let _ = writeln!(m3u8_content, "#EXT-X-MEDIA-SEQUENCE:{}", self.media_sequence());
        m3u8_content.push('\n');

        m3u8_content.push_str(&self.body);

        if end_list {
            m3u8_content.push_str(ENDLIST_TAG);
        }

        Bytes::from(m3u8_content)
    }
}

/// Rolling playlist for an in-progress stream. Segments are listed by bare name.
pub fn live_playlist<'a, I>(segments: I) -> Bytes
where
    I: IntoIterator<Item = &'a Segment>,
{
    let mut writer = PlaylistWriter::new();
    for segment in segments {
        writer.push(segment, &segment.name);
    }
    writer.finish(false)
}

/// Terminated VOD playlist; each entry is re-rooted as `base_path/<file name>`.
pub fn complete_playlist<'a, I>(segments: I, base_path: &str) -> Bytes
where
    I: IntoIterator<Item = &'a Segment>,
{
    let mut writer = PlaylistWriter::new();
    for segment in segments {
        let uri = format!("{base_path}/{}", segment.file_name());
        writer.push(segment, &uri);
    }
    writer.finish(true)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn seg(name: &str, sequence: u64, duration_ms: u64) -> Segment {
        Segment::new(name, sequence, duration_ms, Bytes::new())
    }

    fn as_str(bytes: &Bytes) -> &str {
        std::str::from_utf8(bytes).unwrap()
    }

    #[test]
    fn test_format_duration() {
        assert_eq!(format_duration(0), "0.000");
        assert_eq!(format_duration(7), "0.007");
        assert_eq!(format_duration(2000), "2.000");
        assert_eq!(format_duration(4321), "4.321");
        assert_eq!(format_duration(10_050), "10.050");
    }

    #[test]
    fn test_empty_live_playlist() {
        let segments: Vec<Segment> = Vec::new();
        let playlist = live_playlist(&segments);
        assert_eq!(
            as_str(&playlist),
            "#EXTM3U\n#EXT-X-VERSION:3\n#EXT-X-ALLOW-CACHE:NO\n#EXT-X-TARGETDURATION:1\n#EXT-X-MEDIA-SEQUENCE:0\n\n"
        );
    }

    #[test]
    fn test_live_playlist_exact_output() {
        let segments = vec![seg("a/seg5", 5, 2000), seg("a/seg6", 6, 3500)];
        let playlist = live_playlist(&segments);
        assert_eq!(
            as_str(&playlist),
            "#EXTM3U\n#EXT-X-VERSION:3\n#EXT-X-ALLOW-CACHE:NO\n#EXT-X-TARGETDURATION:4\n#EXT-X-MEDIA-SEQUENCE:5\n\n\
             #EXTINF:2.000,\na/seg5\n#EXTINF:3.500,\na/seg6\n"
        );
    }

    #[test]
    fn test_complete_playlist_rewrites_names() {
        let segments = vec![seg("a/seg1", 1, 2000), seg("a/seg2", 2, 4000)];
        let playlist = complete_playlist(&segments, "live");
        let text = as_str(&playlist);

        assert!(text.contains("#EXT-X-TARGETDURATION:5\n"));
        assert!(text.contains("#EXT-X-MEDIA-SEQUENCE:1\n"));
        let first = text.find("live/seg1").unwrap();
        let second = text.find("live/seg2").unwrap();
        assert!(first < second);
        assert!(text.ends_with(ENDLIST_TAG));
    }

    #[test]
    fn test_target_duration_floor_plus_one() {
        let mut writer = PlaylistWriter::new();
        writer.push(&seg("x", 9, 5999), "x");
        writer.push(&seg("y", 10, 6000), "y");
        assert_eq!(writer.target_duration(), 7);
        assert_eq!(writer.media_sequence(), 9);
    }
}
