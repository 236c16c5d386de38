//! Diagnostic events emitted by the ring buffer.
//!
//! The buffer never fails on capacity exhaustion; it truncates and reports what it dropped
//! through a [`Sink`]. Delivery and formatting are up to the sink:
//! - [`LogSink`] forwards to the `log` facade (the default).
//! - [`NullSink`] discards everything.
//!
//! Bulk operations report one aggregated event per kind, so a bulk push that evicts three
//! elements emits a single `BackOverflow(3)`.

use core::fmt;

use log::Level;

/// A named occurrence inside the buffer, with a count where one applies.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[non_exhaustive]
pub enum Event {
    Constructing,
    Destructing,
    /// The buffer just became full.
    AtCapacity,
    /// An insertion at the front spilled over and dropped elements from the back.
    FrontOverflow(usize),
    /// An insertion at the back spilled over and dropped elements from the front.
    BackOverflow(usize),
    /// More elements were requested than the buffer can ever hold; the excess was ignored.
    Overfill(usize),
    /// Elements nearest the back were dropped to make room for an interior insertion.
    Truncation(usize),
    /// A storage block of the given capacity could not be allocated.
    BadAlloc(usize),
    InsertFront(usize),
    InsertBack(usize),
    InsertRandom(usize),
    PopFront,
    PopBack,
    EraseFront(usize),
    EraseBack(usize),
    EraseRandom(usize),
    Assign(usize),
}

impl Event {
    pub const fn tag(&self) -> &'static str {
        match self {
            Event::Constructing => "constructing",
            Event::Destructing => "destructing",
            Event::AtCapacity => "at-capacity",
            Event::FrontOverflow(_) => "front-overflow",
            Event::BackOverflow(_) => "back-overflow",
            Event::Overfill(_) => "overfill",
            Event::Truncation(_) => "truncation",
            Event::BadAlloc(_) => "bad-alloc",
            Event::InsertFront(_) => "insert-front",
            Event::InsertBack(_) => "insert-back",
            Event::InsertRandom(_) => "insert-random",
            Event::PopFront => "pop-front",
            Event::PopBack => "pop-back",
            Event::EraseFront(_) => "erase-front",
            Event::EraseBack(_) => "erase-back",
            Event::EraseRandom(_) => "erase-random",
            Event::Assign(_) => "assign",
        }
    }

    pub const fn count(&self) -> Option<usize> {
        match *self {
            Event::FrontOverflow(n)
            | Event::BackOverflow(n)
            | Event::Overfill(n)
            | Event::Truncation(n)
            | Event::BadAlloc(n)
            | Event::InsertFront(n)
            | Event::InsertBack(n)
            | Event::InsertRandom(n)
            | Event::EraseFront(n)
            | Event::EraseBack(n)
            | Event::EraseRandom(n)
            | Event::Assign(n) => Some(n),
            Event::Constructing
            | Event::Destructing
            | Event::AtCapacity
            | Event::PopFront
            | Event::PopBack => None,
        }
    }

    /// Severity used when the event is forwarded to `log`.
    pub const fn level(&self) -> Level {
        match self {
            Event::Constructing | Event::Destructing | Event::AtCapacity => Level::Debug,
            Event::FrontOverflow(_)
            | Event::BackOverflow(_)
            | Event::Overfill(_)
            | Event::Truncation(_) => Level::Warn,
            Event::BadAlloc(_) => Level::Error,
            _ => Level::Trace,
        }
    }
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.count() {
            Some(n) => write!(f, "{} count={}", self.tag(), n),
            None => f.write_str(self.tag()),
        }
    }
}

/// Receiver for buffer diagnostics.
pub trait Sink {
    fn record(&mut self, event: Event);
}

/// Forwards events to the `log` facade under target `ph_ring`.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct LogSink {
    name: &'static str,
}

impl LogSink {
    /// Prefix every record with `name`, e.g. the buffer's role in the application.
    pub const fn named(name: &'static str) -> Self {
        Self { name }
    }

    pub const fn name(&self) -> &'static str {
        self.name
    }
}

impl Default for LogSink {
    fn default() -> Self {
        Self::named("ring-buffer")
    }
}

impl Sink for LogSink {
    #[inline]
    fn record(&mut self, event: Event) {
        log::log!(target: "ph_ring", event.level(), "{}: {}", self.name, event);
    }
}

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct NullSink;

impl Sink for NullSink {
    #[inline(always)]
    fn record(&mut self, _event: Event) {}
}
