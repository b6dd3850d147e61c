//! Renders M3U8 playlists from a buffer snapshot.

use crate::{buffer, BufferConsumer, Container, Error, Result, Segment};

/// The default number of segments referenced by the media playlist.
pub const NUM_PLAYLIST_SEGMENTS: usize = 3;

/// Renders the playlists for a single rendition.
///
/// Rendering is a pure function of the buffer snapshot at call time; it never
/// blocks and never mutates. Callers should make sure at least one segment
/// exists before the first render, e.g. by awaiting [crate::Cursor::recv].
#[derive(Clone, Debug)]
pub struct Playlist {
	/// How many of the most recent segments the media playlist references.
	/// At most the buffer capacity.
	pub window: usize,
}

impl Playlist {
	pub fn new(window: usize) -> Self {
		Self { window }
	}

	/// Render the top-level playlist selecting the single rendition.
	///
	/// The declared bandwidth is estimated from the newest segment, since the
	/// container doesn't carry a true average bitrate; see [bandwidth].
	pub fn master<C: Container>(&self, track: &BufferConsumer, container: &C) -> Result<String> {
		let segment = track.latest().ok_or(Error::NotFound)?;
		let codecs = container.codec_string(&segment)?;

		let lines = [
			"#EXTM3U".to_string(),
			format!(
				"#EXT-X-STREAM-INF:BANDWIDTH={},CODECS=\"{}\"",
				bandwidth(&segment),
				codecs
			),
			"playlist.m3u8".to_string(),
		];

		Ok(lines.join("\n") + "\n")
	}

	/// Render the media playlist listing the most recent segments, oldest first.
	///
	/// An empty window produces the header-only document, which is still valid.
	pub fn media(&self, track: &BufferConsumer) -> String {
		let segments = track.segments();

		let mut lines = vec![
			"#EXTM3U".to_string(),
			"#EXT-X-VERSION:7".to_string(),
			format!("#EXT-X-TARGETDURATION:{}", buffer::target_duration(&segments)),
			"#EXT-X-MAP:URI=\"init.mp4\"".to_string(),
		];

		let window = &segments[segments.len().saturating_sub(self.window)..];

		if let Some(first) = window.first() {
			// The numbering baseline for clients.
			lines.push(format!("#EXT-X-MEDIA-SEQUENCE:{}", first.sequence));

			for segment in window {
				lines.push(format!("#EXTINF:{:.4},", segment.duration));
				lines.push(format!("./segment/{}.m4s", segment.sequence));
			}
		}

		lines.join("\n") + "\n"
	}
}

impl Default for Playlist {
	fn default() -> Self {
		Self::new(NUM_PLAYLIST_SEGMENTS)
	}
}

/// Estimated peak bandwidth of a segment in bits per second.
///
/// Payload bits over duration, padded by 1.2x; the HLS spec already allows
/// 25% variation from the declared bandwidth. Clients gate playback on this
/// value, so the multiplier is fixed, not approximate.
pub fn bandwidth(segment: &Segment) -> u64 {
	(segment.size() as f64 * 8.0 / segment.duration * 1.2).round() as u64
}
