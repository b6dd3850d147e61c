use bytes::Bytes;

/// One independently fetchable chunk of encoded media covering a short time window.
///
/// Segments are immutable once constructed and cheap to clone; the payload and
/// init handles are refcounted, so every consumer shares the same bytes.
#[derive(Clone, Debug)]
pub struct Segment {
	/// The sequence number, assigned by the producer and never reused.
	pub sequence: u64,

	/// The duration of the segment in seconds.
	pub duration: f64,

	/// The encoded media fragment for this sequence. Opaque to this crate.
	pub payload: Bytes,

	/// The container initialization segment, one per stream and shared by
	/// every segment of it.
	pub init: Bytes,
}

impl Segment {
	/// The size of the encoded payload in bytes.
	pub fn size(&self) -> usize {
		self.payload.len()
	}
}

#[cfg(test)]
impl Segment {
	pub(crate) fn test(sequence: u64, duration: f64, size: usize) -> Self {
		Self {
			sequence,
			duration,
			payload: vec![0u8; size].into(),
			init: Bytes::new(),
		}
	}
}
