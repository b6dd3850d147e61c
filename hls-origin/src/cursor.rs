use tokio::sync::watch;

use crate::{buffer::State, Segment};

/// A per-consumer bookmark over a segment buffer.
///
/// [Cursor::recv] blocks until a segment newer than anything this cursor has
/// observed becomes available. Creating the cursor counts as an observation:
/// a fresh cursor on a non-empty buffer still waits for the next append, so a
/// newly connecting consumer synchronizes to the live edge before its first
/// segment.
pub struct Cursor {
	state: watch::Receiver<State>,

	// The buffer epoch observed at creation or the last recv.
	epoch: u64,

	// The highest sequence number returned so far.
	last_seen: Option<u64>,
}

impl Cursor {
	pub(crate) fn new(state: watch::Receiver<State>) -> Self {
		let epoch = state.borrow().epoch;

		Self {
			state,
			epoch,
			last_seen: None,
		}
	}

	/// The highest sequence number this cursor has returned.
	pub fn last_seen(&self) -> Option<u64> {
		self.last_seen
	}

	/// Wait for a segment newer than the cursor's last observation.
	///
	/// Returns the newest retained segment, skipping anything this consumer
	/// fell behind on; there is no backlog to drain. Returns `None` once the
	/// stream is torn down, permanently: callers should stop polling.
	///
	/// Safe to abandon mid-wait; no resource is held for the waiter.
	pub async fn recv(&mut self) -> Option<Segment> {
		loop {
			{
				let state = self.state.borrow_and_update();

				if state.closed {
					return None;
				}

				if state.epoch != self.epoch {
					self.epoch = state.epoch;

					let segment = state.segments.back().cloned()?;
					self.last_seen = Some(segment.sequence);
					return Some(segment);
				}
			}

			// Try again once the producer appends or closes.
			if self.state.changed().await.is_err() {
				return None;
			}
		}
	}
}

#[cfg(test)]
mod test {
	use futures::FutureExt;

	use crate::{Segment, SegmentBuffer};

	#[tokio::test]
	async fn recv_before_first_append() {
		let (mut producer, consumer) = SegmentBuffer::new(3).produce();
		let mut cursor = consumer.cursor();

		let mut recv = Box::pin(cursor.recv());
		assert!((&mut recv).now_or_never().is_none());

		producer.append(Segment::test(1, 6.0, 100));

		let segment = recv.await.unwrap();
		assert_eq!(segment.sequence, 1);
		assert_eq!(cursor.last_seen(), Some(1));
	}

	#[tokio::test]
	async fn fresh_cursor_waits_despite_data() {
		let (mut producer, consumer) = SegmentBuffer::new(3).produce();
		producer.append(Segment::test(1, 6.0, 100));

		// A cursor with no position synchronizes on the next append, even
		// though a segment is already available.
		let mut cursor = consumer.cursor();
		let mut recv = Box::pin(cursor.recv());
		assert!((&mut recv).now_or_never().is_none());

		producer.append(Segment::test(2, 6.0, 100));
		assert_eq!(recv.await.unwrap().sequence, 2);
	}

	#[tokio::test]
	async fn behind_cursor_skips_to_newest() {
		let (mut producer, consumer) = SegmentBuffer::new(3).produce();
		let mut cursor = consumer.cursor();

		producer.append(Segment::test(1, 6.0, 100));
		assert_eq!(cursor.recv().await.unwrap().sequence, 1);

		producer.append(Segment::test(2, 6.0, 100));
		producer.append(Segment::test(3, 6.0, 100));

		// Data is already newer than the cursor: no wait, and only the
		// newest segment is returned.
		let segment = cursor.recv().now_or_never().unwrap().unwrap();
		assert_eq!(segment.sequence, 3);
		assert_eq!(cursor.last_seen(), Some(3));
	}

	#[tokio::test]
	async fn consumed_cursor_waits_again() {
		let (mut producer, consumer) = SegmentBuffer::new(3).produce();
		let mut cursor = consumer.cursor();

		producer.append(Segment::test(1, 6.0, 100));
		assert_eq!(cursor.recv().await.unwrap().sequence, 1);

		// Nothing new yet; no busy-wait.
		assert!(cursor.recv().now_or_never().is_none());
	}

	#[tokio::test]
	async fn close_releases_waiters() {
		let (producer, consumer) = SegmentBuffer::new(3).produce();
		let mut cursor = consumer.cursor();

		let mut pending = Box::pin(cursor.recv());
		assert!((&mut pending).now_or_never().is_none());

		producer.close();
		assert!(pending.await.is_none());

		// Terminal: future calls end immediately too.
		assert!(cursor.recv().await.is_none());
	}

	#[tokio::test]
	async fn producer_drop_ends_stream() {
		let (mut producer, consumer) = SegmentBuffer::new(3).produce();
		producer.append(Segment::test(1, 6.0, 100));

		let mut cursor = consumer.cursor();
		drop(producer);

		assert!(cursor.recv().await.is_none());
		assert!(consumer.list().is_empty());
	}
}
