//! Fixed-capacity circular buffer for no-std embedded targets.
//!
//! # Highlights
//! - Double-ended: O(1) push and pop at both ends, cursor-positioned insert and erase anywhere.
//! - Never grows and never rejects a write. Overflow truncates the opposite end and is reported
//!   as a diagnostic event.
//! - One allocation per buffer, made up front; no allocation on the hot path.
//!
//! # Quick start
//! ```
//! use ph_ring::{NullSink, RingBuffer};
//!
//! let mut buf = RingBuffer::with_sink(3, NullSink);
//! buf.push_back(1);
//! buf.push_back(2);
//! buf.push_back(3);
//! buf.push_back(4); // full: 1 is dropped from the front
//!
//! assert_eq!(buf.iter().copied().collect::<Vec<_>>(), [2, 3, 4]);
//!
//! let at = buf.cursor(1);
//! buf.insert(at, 9).unwrap(); // 4 is truncated from the back
//! assert_eq!(buf.iter().copied().collect::<Vec<_>>(), [2, 9, 3]);
//! ```
//!
//! # No-std
//! The crate is `#![no_std]` and needs `alloc` for the storage block. Tests require `std`.
//! On targets without atomic CAS, enable one of the `portable-atomic*` features.
//!
//! # Semantics
//! - `push_back` on a full buffer drops the front element; `push_front` drops the back one.
//! - Inserting before an interior position shifts the tail toward the back. If the run would
//!   reach the end of capacity, the tail is discarded and the run wraps over the front;
//!   otherwise the elements nearest the back are truncated.
//! - Requests for more elements than the capacity are clamped and reported as `Overfill`.
//! - Cursors carry the identity of the storage block they came from. Using one on another
//!   buffer, or after `resize`, returns an error instead of touching memory.
//!
//! # Diagnostics
//! Every mutation is reported to a [`Sink`]. The default [`LogSink`] forwards to the `log`
//! facade under target `ph_ring`: overflow and truncation at `warn`, lifecycle at `debug`,
//! per-operation traces at `trace`.
//!
//! # Safety and concurrency
//! A buffer has a single owner and no internal locking. `RingBuffer` is `Send` when its
//! elements and sink are; share it between contexts only behind external mutual exclusion.
#![no_std]

extern crate alloc;

pub mod cursor;
pub mod diag;
pub mod error;
pub mod ring_buffer;
mod storage;

pub use cursor::Cursor;
pub use diag::{Event, LogSink, NullSink, Sink};
pub use error::Error;
pub use ring_buffer::{IntoIter, Iter, IterMut, RingBuffer};
pub use storage::{BlockId, MAX_CAPACITY};

#[cfg(test)]
extern crate std;
