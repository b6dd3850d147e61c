//! A live HLS origin core: a bounded segment buffer with broadcast wakeups,
//! plus the playlist rendering that serves it.
//!
//! A producing pipeline appends fixed-duration fMP4 segments to a [SegmentBuffer];
//! pull-based clients poll playlists describing the retained window and fetch
//! segments by sequence number. Transcoding, HTTP routing and MP4 parsing live
//! outside this crate, behind the [Container] seam.

mod buffer;
mod container;
mod cursor;
mod error;
mod playlist;
mod registry;
mod segment;

pub use buffer::*;
pub use container::*;
pub use cursor::*;
pub use error::*;
pub use playlist::*;
pub use registry::*;
pub use segment::*;
