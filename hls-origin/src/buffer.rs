//! A bounded buffer of the most recent segments, split into a [BufferProducer] and [BufferConsumer] handle.
//!
//! The producer appends segments to the tail, evicting the oldest once over capacity.
//! Consumers take non-blocking snapshots of the retained window, or create a [Cursor]
//! to wait for new segments. A cloned consumer sees the same state. (fanout)
//!
//! The buffer is torn down when the producer calls [BufferProducer::close] or is dropped.

use std::{collections::VecDeque, ops};

use tokio::sync::watch;

use crate::{Cursor, Segment};

/// The default number of retained segments.
pub const MAX_SEGMENTS: usize = 5;

/// Static information about a segment buffer.
#[derive(Clone, Debug)]
pub struct SegmentBuffer {
	/// The maximum number of retained segments.
	pub capacity: usize,
}

impl SegmentBuffer {
	pub fn new(capacity: usize) -> Self {
		Self { capacity }
	}

	pub fn produce(self) -> (BufferProducer, BufferConsumer) {
		let (send, recv) = watch::channel(State::default());

		let producer = BufferProducer::new(send, self.clone());
		let consumer = BufferConsumer::new(recv, self);

		(producer, consumer)
	}
}

impl Default for SegmentBuffer {
	fn default() -> Self {
		Self::new(MAX_SEGMENTS)
	}
}

pub(crate) struct State {
	// Retained segments, ascending by sequence.
	pub segments: VecDeque<Segment>,

	// Bumped once per append so waiters can tell fresh state from stale.
	pub epoch: u64,

	// Set on teardown; terminal.
	pub closed: bool,
}

impl Default for State {
	fn default() -> Self {
		Self {
			segments: VecDeque::new(),
			epoch: 0,
			closed: false,
		}
	}
}

/// Appends segments to a buffer. There is only ever one producer per stream.
pub struct BufferProducer {
	state: watch::Sender<State>,

	pub info: SegmentBuffer,
}

impl BufferProducer {
	fn new(state: watch::Sender<State>, info: SegmentBuffer) -> Self {
		Self { state, info }
	}

	/// Append a segment to the tail, evicting the oldest once over capacity.
	///
	/// Waiters are woken only after the segment is stored: anything observing
	/// the wakeup sees this segment and everything appended before it.
	pub fn append(&mut self, segment: Segment) {
		let capacity = self.info.capacity;

		self.state.send_modify(|state| {
			state.segments.push_back(segment);

			while state.segments.len() > capacity {
				state.segments.pop_front();
			}

			state.epoch += 1;
		});
	}

	/// Tear down the stream: drop all retained segments and release every waiter.
	///
	/// Terminal; pending and future [Cursor::recv] calls return `None`.
	pub fn close(self) {
		// Drop does the work.
	}

	pub fn subscribe(&self) -> BufferConsumer {
		BufferConsumer::new(self.state.subscribe(), self.info.clone())
	}
}

impl Drop for BufferProducer {
	fn drop(&mut self) {
		self.state.send_modify(|state| {
			state.segments.clear();
			state.closed = true;
		});
	}
}

impl ops::Deref for BufferProducer {
	type Target = SegmentBuffer;

	fn deref(&self) -> &Self::Target {
		&self.info
	}
}

/// A non-blocking view of the retained window. Cheap to clone.
#[derive(Clone)]
pub struct BufferConsumer {
	state: watch::Receiver<State>,

	pub info: SegmentBuffer,
}

impl BufferConsumer {
	fn new(state: watch::Receiver<State>, info: SegmentBuffer) -> Self {
		Self { state, info }
	}

	/// The sequence numbers currently retained, ascending.
	pub fn list(&self) -> Vec<u64> {
		self.state.borrow().segments.iter().map(|s| s.sequence).collect()
	}

	/// Look up a retained segment by exact sequence number.
	///
	/// Evicted segments are permanently unavailable and report `None`,
	/// the same as sequences never produced.
	pub fn get(&self, sequence: u64) -> Option<Segment> {
		self.state
			.borrow()
			.segments
			.iter()
			.find(|s| s.sequence == sequence)
			.cloned()
	}

	/// Every segment currently retained, oldest first.
	pub fn segments(&self) -> Vec<Segment> {
		self.state.borrow().segments.iter().cloned().collect()
	}

	/// The highest-sequence segment currently retained.
	pub fn latest(&self) -> Option<Segment> {
		self.state.borrow().segments.back().cloned()
	}

	/// The announced maximum segment duration in whole seconds.
	///
	/// Ceiling of the longest retained duration, never below 1. Recomputed
	/// from the current contents on every call.
	pub fn target_duration(&self) -> u64 {
		let state = self.state.borrow();
		target_duration(state.segments.iter())
	}

	/// Whether the stream has been torn down.
	pub fn is_closed(&self) -> bool {
		self.state.borrow().closed
	}

	/// Create a cursor that waits for segments newer than anything it has observed.
	pub fn cursor(&self) -> Cursor {
		Cursor::new(self.state.clone())
	}
}

impl ops::Deref for BufferConsumer {
	type Target = SegmentBuffer;

	fn deref(&self) -> &Self::Target {
		&self.info
	}
}

pub(crate) fn target_duration<'a, I: IntoIterator<Item = &'a Segment>>(segments: I) -> u64 {
	let max = segments.into_iter().map(|s| s.duration).fold(0.0_f64, f64::max);
	(max.ceil() as u64).max(1)
}
