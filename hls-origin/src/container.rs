use bytes::Bytes;

use crate::{Result, Segment};

/// The seam to the container-format layer.
///
/// Segment payloads are opaque to this crate; reading codec metadata,
/// extracting the initialization segment and repackaging media bytes is
/// delegated to the demuxing pipeline that produced them.
pub trait Container {
	/// The RFC 6381 codec descriptor, read from the segment's container metadata.
	///
	/// Fails with [crate::Error::MissingCodec] when the metadata carries none;
	/// no default is synthesized.
	fn codec_string(&self, segment: &Segment) -> Result<String>;

	/// The initialization segment bytes.
	fn init(&self, segment: &Segment) -> Result<Bytes>;

	/// The media bytes for one sequence, repackaged for independent fetch.
	fn media(&self, segment: &Segment, sequence: u64) -> Result<Bytes>;
}

/// Muxer options the producing pipeline must use so every segment is
/// independently decodable, with fragment boundaries under our control.
pub fn muxer_options(sequence: u64) -> [(&'static str, String); 3] {
	[
		(
			"movflags",
			"frag_custom+empty_moov+default_base_moof+frag_discont".to_string(),
		),
		("avoid_negative_ts", "make_non_negative".to_string()),
		("fragment_index", sequence.to_string()),
	]
}
