use std::{
	collections::HashMap,
	sync::{Arc, Mutex},
};

use crate::{BufferConsumer, BufferProducer, SegmentBuffer};

/// The active streams, keyed by identifier.
///
/// Buffers are owned explicitly: created when a stream starts producing and
/// removed when it stops, instead of living as ambient globals. Teardown
/// itself belongs to the producer handle; removal only stops new consumers
/// from finding the stream.
#[derive(Clone, Default)]
pub struct Streams {
	state: Arc<Mutex<HashMap<String, BufferConsumer>>>,
}

impl Streams {
	pub fn new() -> Self {
		Self::default()
	}

	/// Start a stream, returning the producer half of its buffer.
	///
	/// Any existing stream with the same name is replaced; consumers of the
	/// old buffer see a teardown once its producer is dropped.
	pub fn create<T: Into<String>>(&self, name: T, capacity: usize) -> BufferProducer {
		let name = name.into();
		let (producer, consumer) = SegmentBuffer::new(capacity).produce();

		tracing::info!(%name, capacity, "stream started");
		self.state.lock().unwrap().insert(name, consumer);

		producer
	}

	/// The consumer half of a stream's buffer, if the stream is active.
	pub fn get(&self, name: &str) -> Option<BufferConsumer> {
		self.state.lock().unwrap().get(name).cloned()
	}

	/// Stop tracking a stream. Returns false if it was not active.
	pub fn remove(&self, name: &str) -> bool {
		let removed = self.state.lock().unwrap().remove(name).is_some();

		if removed {
			tracing::info!(%name, "stream removed");
		}

		removed
	}
}
