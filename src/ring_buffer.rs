//! Fixed-capacity double-ended ring buffer.
//!
//! # Overview
//! - Single owner, no internal synchronization. Share it across contexts only behind external
//!   mutual exclusion (a critical section, a mutex, interrupt masking).
//! - O(1) push/pop at both ends; O(k) insert/erase at an interior position for a k-element
//!   shift, done as at most three contiguous block moves.
//! - Never grows. When capacity is exceeded the end opposite the insertion is truncated and
//!   the loss is reported through the diagnostics [`Sink`]. No mutator is ever rejected.
//!
//! # Boundaries
//! The buffer keeps a front cursor, a back cursor (the slot after the last element) and a full
//! flag. `front == back` means empty unless the flag is set, in which case it means full.
//!
//! # Panics
//! Only `Index`/`IndexMut` panic on an out-of-range position. Every mutator shrinks the
//! recorded window before it runs user code (clones, drops, iterator `next`), so a panic there
//! can leak elements but never drop one twice.

use core::cmp::Ordering;
use core::fmt;
use core::iter::{self, FusedIterator};
use core::mem;
use core::ops::{Index, IndexMut};
use core::slice;

use crate::cursor::{Cursor, Window};
use crate::diag::{Event, LogSink, Sink};
use crate::error::Error;
use crate::storage::{StorageBlock, Toward};

pub struct RingBuffer<T, S: Sink = LogSink> {
    storage: StorageBlock<T>,
    front: Cursor,
    back: Cursor,
    full: bool,
    sink: S,
}

impl<T> RingBuffer<T> {
    /// An empty buffer with no storage. Every insertion into it is an overfill.
    pub fn new() -> Self {
        Self::from_block(StorageBlock::empty(), LogSink::default())
    }

    /// Allocation failure leaves a zero-capacity buffer and reports `BadAlloc`; check
    /// [`capacity`](Self::capacity) afterwards, or use [`try_with_capacity`](Self::try_with_capacity).
    pub fn with_capacity(capacity: usize) -> Self {
        Self::with_sink(capacity, LogSink::default())
    }

    pub fn try_with_capacity(capacity: usize) -> Result<Self, Error> {
        let mut sink = LogSink::default();
        match StorageBlock::allocate(capacity) {
            Ok(block) => Ok(Self::from_block(block, sink)),
            Err(err) => {
                sink.record(Event::BadAlloc(capacity));
                Err(err)
            }
        }
    }

    /// A full buffer holding `capacity` clones of `value`.
    pub fn from_elem(capacity: usize, value: T) -> Self
    where
        T: Clone,
    {
        let mut buf = Self::with_capacity(capacity);
        buf.fill_back(iter::repeat_n(value, capacity));
        buf
    }
}

impl<T> Default for RingBuffer<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T, S: Sink> RingBuffer<T, S> {
    /// Like [`with_capacity`](RingBuffer::with_capacity), reporting to `sink`.
    pub fn with_sink(capacity: usize, mut sink: S) -> Self {
        let block = match StorageBlock::allocate(capacity) {
            Ok(block) => block,
            Err(_) => {
                sink.record(Event::BadAlloc(capacity));
                StorageBlock::empty()
            }
        };
        Self::from_block(block, sink)
    }

    fn from_block(block: StorageBlock<T>, mut sink: S) -> Self {
        sink.record(Event::Constructing);
        let start = Cursor::new(block.id(), 0);
        Self {
            storage: block,
            front: start,
            back: start,
            full: false,
            sink,
        }
    }

    #[inline]
    fn window(&self) -> Window {
        Window {
            capacity: self.storage.capacity(),
            front: self.front.offset(),
            back: self.back.offset(),
            full: self.full,
        }
    }

    #[inline]
    fn at(&self, offset: usize) -> Cursor {
        Cursor::new(self.storage.id(), offset)
    }

    // ---------------------------------------------------------------------------------------
    // Observers
    // ---------------------------------------------------------------------------------------

    #[inline]
    pub fn len(&self) -> usize {
        self.window().len()
    }

    /// Maximum number of elements; fixed until [`resize`](Self::resize).
    #[inline]
    pub fn capacity(&self) -> usize {
        self.storage.capacity()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.front == self.back && !self.full
    }

    #[inline]
    pub fn is_full(&self) -> bool {
        self.full
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    pub fn sink_mut(&mut self) -> &mut S {
        &mut self.sink
    }

    pub fn get(&self, index: usize) -> Option<&T> {
        let window = self.window();
        if index >= window.len() {
            return None;
        }
        // SAFETY: positions below len() hold live values.
        Some(unsafe { self.storage.get(window.unwrap_position(index)) })
    }

    pub fn get_mut(&mut self, index: usize) -> Option<&mut T> {
        let window = self.window();
        if index >= window.len() {
            return None;
        }
        Some(unsafe { self.storage.get_mut(window.unwrap_position(index)) })
    }

    #[inline]
    pub fn front(&self) -> Option<&T> {
        self.get(0)
    }

    #[inline]
    pub fn front_mut(&mut self) -> Option<&mut T> {
        self.get_mut(0)
    }

    #[inline]
    pub fn back(&self) -> Option<&T> {
        self.get(self.len().checked_sub(1)?)
    }

    #[inline]
    pub fn back_mut(&mut self) -> Option<&mut T> {
        let last = self.len().checked_sub(1)?;
        self.get_mut(last)
    }

    /// The contents in order, split at the physical end of storage.
    pub fn as_slices(&self) -> (&[T], &[T]) {
        // SAFETY: the window covers exactly the live slots.
        unsafe { self.storage.window(self.front.offset(), self.len()) }
    }

    pub fn as_mut_slices(&mut self) -> (&mut [T], &mut [T]) {
        let len = self.len();
        unsafe { self.storage.window_mut(self.front.offset(), len) }
    }

    /// Front-to-back traversal.
    pub fn iter(&self) -> Iter<'_, T> {
        Iter {
            storage: &self.storage,
            window: self.window(),
            head: self.front.offset(),
            remaining: self.len(),
        }
    }

    pub fn iter_mut(&mut self) -> IterMut<'_, T> {
        let (head, tail) = self.as_mut_slices();
        IterMut {
            inner: head.iter_mut().chain(tail.iter_mut()),
        }
    }

    // ---------------------------------------------------------------------------------------
    // Cursors
    // ---------------------------------------------------------------------------------------

    /// Cursor at the first element, or the sentinel when empty.
    pub fn begin(&self) -> Cursor {
        if self.is_empty() {
            self.end()
        } else {
            self.front
        }
    }

    /// The sentinel cursor, one past the last element.
    #[inline]
    pub fn end(&self) -> Cursor {
        self.at(self.storage.capacity())
    }

    /// Cursor at logical `index`; the sentinel when `index >= len()`.
    pub fn cursor(&self, index: usize) -> Cursor {
        let window = self.window();
        if index >= window.len() {
            self.end()
        } else {
            self.at(window.unwrap_position(index))
        }
    }

    fn check(&self, cursor: Cursor) -> Result<(), Error> {
        if cursor.block() == self.storage.id() {
            Ok(())
        } else {
            Err(Error::ForeignCursor)
        }
    }

    /// Logical index of `cursor`; the sentinel resolves to `len()`.
    pub fn position(&self, cursor: Cursor) -> Result<usize, Error> {
        self.check(cursor)?;
        let window = self.window();
        let len = window.len();
        if cursor.offset() == window.sentinel() {
            return Ok(len);
        }
        match window.wrap_index(cursor.offset()) {
            index if index <= len => Ok(index),
            index => Err(Error::OutOfRange { index, len }),
        }
    }

    /// Bounded forward advance; stepping off the back lands on the sentinel.
    pub fn advance(&self, cursor: Cursor, steps: usize) -> Result<Cursor, Error> {
        self.check(cursor)?;
        Ok(self.at(self.window().advance(cursor.offset(), steps)))
    }

    /// Bounded backward advance; stepping before the front lands on the sentinel.
    pub fn retreat(&self, cursor: Cursor, steps: usize) -> Result<Cursor, Error> {
        self.check(cursor)?;
        Ok(self.at(self.window().retreat(cursor.offset(), steps)))
    }

    /// Order two cursors by their distance from the current front.
    pub fn compare(&self, a: Cursor, b: Cursor) -> Result<Ordering, Error> {
        self.check(a)?;
        self.check(b)?;
        Ok(self.window().order(a.offset(), b.offset()))
    }

    pub fn get_at(&self, cursor: Cursor) -> Result<&T, Error> {
        let index = self.position(cursor)?;
        let len = self.len();
        self.get(index).ok_or(Error::OutOfRange { index, len })
    }

    pub fn get_at_mut(&mut self, cursor: Cursor) -> Result<&mut T, Error> {
        let index = self.position(cursor)?;
        let len = self.len();
        self.get_mut(index).ok_or(Error::OutOfRange { index, len })
    }

    // ---------------------------------------------------------------------------------------
    // Single-element mutators
    // ---------------------------------------------------------------------------------------

    /// Append `value`. When full, the front element is dropped to make room.
    pub fn push_back(&mut self, value: T) {
        self.sink.record(Event::InsertBack(1));
        if self.overfill_guard(1) == 0 {
            return;
        }

        let was_full = self.full;
        let evicted = self.push_back_slot(value);
        if evicted.is_some() {
            self.sink.record(Event::BackOverflow(1));
        } else if !was_full && self.full {
            self.sink.record(Event::AtCapacity);
        }
    }

    /// Prepend `value`. When full, the back element is dropped to make room.
    pub fn push_front(&mut self, value: T) {
        self.sink.record(Event::InsertFront(1));
        if self.overfill_guard(1) == 0 {
            return;
        }

        let was_full = self.full;
        let evicted = self.push_front_slot(value);
        if evicted.is_some() {
            self.sink.record(Event::FrontOverflow(1));
        } else if !was_full && self.full {
            self.sink.record(Event::AtCapacity);
        }
    }

    pub fn pop_front(&mut self) -> Option<T> {
        let value = self.pop_front_slot()?;
        self.sink.record(Event::PopFront);
        Some(value)
    }

    pub fn pop_back(&mut self) -> Option<T> {
        let value = self.pop_back_slot()?;
        self.sink.record(Event::PopBack);
        Some(value)
    }

    /// Store at `back`, evicting the front element when full. Requires a non-zero capacity.
    fn push_back_slot(&mut self, value: T) -> Option<T> {
        let window = self.window();
        let evicted = if self.full {
            // SAFETY: a full buffer's front slot is live; front moves past it below.
            let old = unsafe { self.storage.take(self.front.offset()) };
            self.front = self.at(window.step_forward(self.front.offset(), 1));
            Some(old)
        } else {
            None
        };

        self.storage.write(self.back.offset(), value);
        self.back = self.at(window.step_forward(self.back.offset(), 1));
        if evicted.is_none() && self.back == self.front {
            self.full = true;
        }
        evicted
    }

    /// Store before `front`, evicting the back element when full. Requires a non-zero capacity.
    fn push_front_slot(&mut self, value: T) -> Option<T> {
        let window = self.window();
        let slot = window.step_backward(self.front.offset(), 1);
        if self.full {
            // The slot before the front is the last element's slot.
            let old = unsafe { self.storage.take(slot) };
            self.storage.write(slot, value);
            self.front = self.at(slot);
            self.back = self.front;
            return Some(old);
        }

        self.storage.write(slot, value);
        self.front = self.at(slot);
        if self.front == self.back {
            self.full = true;
        }
        None
    }

    fn pop_front_slot(&mut self) -> Option<T> {
        if self.is_empty() {
            return None;
        }
        let slot = self.front.offset();
        self.front = self.at(self.window().step_forward(slot, 1));
        self.full = false;
        // SAFETY: the slot was the live front and is now outside the window.
        Some(unsafe { self.storage.take(slot) })
    }

    fn pop_back_slot(&mut self) -> Option<T> {
        if self.is_empty() {
            return None;
        }
        let slot = self.window().step_backward(self.back.offset(), 1);
        self.back = self.at(slot);
        self.full = false;
        Some(unsafe { self.storage.take(slot) })
    }

    /// Clamp a request of `n` elements to the capacity, reporting the excess.
    fn overfill_guard(&mut self, n: usize) -> usize {
        let capacity = self.capacity();
        if n > capacity {
            self.sink.record(Event::Overfill(n - capacity));
            capacity
        } else {
            n
        }
    }

    fn truncate_back(&mut self, count: usize) {
        for _ in 0..count {
            drop(self.pop_back_slot());
        }
    }

    fn truncate_front(&mut self, count: usize) {
        for _ in 0..count {
            drop(self.pop_front_slot());
        }
    }

    // ---------------------------------------------------------------------------------------
    // Bulk mutators
    // ---------------------------------------------------------------------------------------

    /// Insert `value` before `position`. See [`insert_iter`](Self::insert_iter).
    pub fn insert(&mut self, position: Cursor, value: T) -> Result<Cursor, Error> {
        self.insert_iter(position, iter::once(value))
    }

    /// Insert `n` clones of `value` before `position`.
    pub fn insert_n(&mut self, position: Cursor, n: usize, value: T) -> Result<Cursor, Error>
    where
        T: Clone,
    {
        self.insert_iter(position, iter::repeat_n(value, n))
    }

    /// Insert `items`, in order, before `position`, and return a cursor at the first one.
    ///
    /// - `position == end()` appends, evicting from the front as needed.
    /// - `position == begin()` prepends, evicting from the back as needed.
    /// - Otherwise the elements from `position` on shift toward the back. If the run reaches
    ///   the end of capacity, everything after `position` is discarded and the run continues
    ///   over the front; else the elements nearest the back are truncated to fit.
    ///
    /// At most `capacity()` items are taken; the rest are reported as an overfill.
    pub fn insert_iter<I>(&mut self, position: Cursor, items: I) -> Result<Cursor, Error>
    where
        I: IntoIterator<Item = T>,
        I::IntoIter: ExactSizeIterator,
    {
        let index = self.position(position)?;
        let items = items.into_iter();
        let requested = items.len();
        if requested == 0 {
            return Ok(position);
        }
        let n = self.overfill_guard(requested);
        let items = items.take(n);
        if n == 0 {
            return Ok(self.end());
        }

        let len = self.len();
        if index == len {
            self.sink.record(Event::InsertBack(n));
            let written = self.fill_back(items);
            return Ok(self.cursor(self.len() - written));
        }
        if index == 0 {
            self.sink.record(Event::InsertFront(n));
            self.fill_front(n, items);
            return Ok(self.begin());
        }

        self.sink.record(Event::InsertRandom(n));
        let distance_to_wrap = self.capacity() - index;
        if n >= distance_to_wrap {
            // The run reaches the end of capacity: everything after `position` goes, and the
            // rest of the run overwrites the front.
            self.truncate_back(len - index);
            if n > distance_to_wrap {
                self.sink.record(Event::BackOverflow(n - distance_to_wrap));
            }
            let was_full = self.full;
            let written = self.push_run(items);
            if !was_full && self.full {
                self.sink.record(Event::AtCapacity);
            }
            return Ok(self.cursor(self.len() - written));
        }

        self.insert_interior(index, n, items);
        Ok(self.cursor(index))
    }

    /// Open a gap of `n` slots at logical `index` and fill it. `index + n` stays below the
    /// capacity, so at least one pre-existing element survives the shift.
    fn insert_interior<I: Iterator<Item = T>>(&mut self, index: usize, n: usize, items: I) {
        let capacity = self.capacity();
        let len = self.len();
        let was_full = self.full;
        let mut shifted = len - index;
        let excess = (len + n).saturating_sub(capacity);
        if excess > 0 {
            self.truncate_back(excess);
            shifted -= excess;
            self.sink.record(Event::Truncation(excess));
        }

        let window = self.window();
        let start = window.unwrap_position(index);
        let gap_end = window.step_forward(start, n);

        // Only [front, start) is live while the shifted run sits outside the window.
        self.back = self.at(start);
        self.full = false;
        self.storage.relocate(start, gap_end, shifted, Toward::Back);

        let mut written = 0;
        for item in items {
            self.storage.write(window.step_forward(start, written), item);
            written += 1;
        }
        if written < n {
            // The iterator under-reported its length; close the rest of the gap.
            let dst = window.step_forward(start, written);
            self.storage.relocate(gap_end, dst, shifted, Toward::Front);
        }

        self.back = self.at(window.step_forward(start, written + shifted));
        if index + written + shifted == capacity {
            self.full = true;
            if !was_full {
                self.sink.record(Event::AtCapacity);
            }
        }
    }

    /// Quiet sequential push-back; returns how many items were written.
    fn push_run<I: Iterator<Item = T>>(&mut self, items: I) -> usize {
        if self.capacity() == 0 {
            return 0;
        }
        let mut written = 0;
        for item in items {
            drop(self.push_back_slot(item));
            written += 1;
        }
        written
    }

    /// Append a run of at most `capacity()` items, reporting evictions as one event.
    fn fill_back<I: Iterator<Item = T>>(&mut self, items: I) -> usize {
        let before = self.len();
        let was_full = self.full;
        let written = self.push_run(items);
        let evicted = (before + written).saturating_sub(self.capacity());
        if evicted > 0 {
            self.sink.record(Event::BackOverflow(evicted));
        }
        if !was_full && self.full {
            self.sink.record(Event::AtCapacity);
        }
        written
    }

    /// Prepend `n` items keeping their order, truncating the back first to make room.
    fn fill_front<I: Iterator<Item = T>>(&mut self, n: usize, items: I) {
        let capacity = self.capacity();
        let was_full = self.full;
        let evicted = (self.len() + n).saturating_sub(capacity);
        if evicted > 0 {
            self.truncate_back(evicted);
            self.sink.record(Event::FrontOverflow(evicted));
        }

        // Write outside the window, then move the front over the run.
        let window = self.window();
        let start = window.step_backward(self.front.offset(), n);
        let mut written = 0;
        for item in items {
            self.storage.write(window.step_forward(start, written), item);
            written += 1;
        }
        if written < n {
            self.storage
                .relocate(start, window.step_forward(start, n - written), written, Toward::Back);
        }

        let len = self.len();
        self.front = self.at(window.step_backward(self.front.offset(), written));
        if written > 0 && len + written == capacity {
            self.full = true;
            if !was_full {
                self.sink.record(Event::AtCapacity);
            }
        }
    }

    /// Remove the element at `position` and return a cursor at its successor.
    pub fn erase(&mut self, position: Cursor) -> Result<Cursor, Error> {
        let index = self.position(position)?;
        let len = self.len();
        if index >= len {
            return Err(Error::OutOfRange { index, len });
        }
        self.erase_range(position, self.cursor(index + 1))
    }

    /// Remove `[first, last)` and return a cursor at the element that followed the range.
    pub fn erase_range(&mut self, first: Cursor, last: Cursor) -> Result<Cursor, Error> {
        let from = self.position(first)?;
        let to = self.position(last)?;
        if from > to {
            return Err(Error::InvalidRange {
                first: from,
                last: to,
            });
        }
        let count = to - from;
        if count == 0 {
            return Ok(self.cursor(from));
        }

        let len = self.len();
        if from == 0 {
            self.truncate_front(count);
            self.sink.record(Event::EraseFront(count));
            return Ok(self.begin());
        }
        if to == len {
            self.truncate_back(count);
            self.sink.record(Event::EraseBack(count));
            return Ok(self.end());
        }

        let window = self.window();
        let start = window.unwrap_position(from);
        let trailing_start = window.unwrap_position(to);
        let trailing = len - to;

        // Shrink the window to [front, start) before dropping anything.
        self.back = self.at(start);
        self.full = false;
        for i in 0..count {
            // SAFETY: the erased slots were live and are now outside the window.
            drop(unsafe { self.storage.take(window.step_forward(start, i)) });
        }
        self.storage
            .relocate(trailing_start, start, trailing, Toward::Front);
        self.back = self.at(window.step_forward(start, trailing));
        self.sink.record(Event::EraseRandom(count));
        Ok(self.at(start))
    }

    /// Drop every element and rewind both boundaries to the start of the block. Capacity is
    /// unchanged.
    pub fn clear(&mut self) {
        if mem::needs_drop::<T>() {
            while let Some(value) = self.pop_front_slot() {
                drop(value);
            }
        }
        let start = self.at(0);
        self.front = start;
        self.back = start;
        self.full = false;
    }

    /// Replace the contents with `n` clones of `value`.
    pub fn assign(&mut self, n: usize, value: T)
    where
        T: Clone,
    {
        self.clear();
        self.sink.record(Event::Assign(n));
        let n = self.overfill_guard(n);
        self.fill_back(iter::repeat_n(value, n));
    }

    /// Swap in a new storage block of `capacity` slots, discarding the contents.
    ///
    /// On allocation failure the buffer is untouched and `BadAlloc` is reported.
    pub fn resize(&mut self, capacity: usize) -> Result<(), Error> {
        let block = match StorageBlock::allocate(capacity) {
            Ok(block) => block,
            Err(err) => {
                self.sink.record(Event::BadAlloc(capacity));
                return Err(err);
            }
        };
        self.clear();
        self.storage = block;
        let start = self.at(0);
        self.front = start;
        self.back = start;
        Ok(())
    }
}

impl<T, S: Sink> Drop for RingBuffer<T, S> {
    fn drop(&mut self) {
        self.sink.record(Event::Destructing);
        if mem::needs_drop::<T>() {
            while let Some(value) = self.pop_front_slot() {
                drop(value);
            }
        }
    }
}

impl<T: Clone, S: Sink + Clone> Clone for RingBuffer<T, S> {
    /// Copies the contents into a freshly allocated block of the same capacity.
    fn clone(&self) -> Self {
        let mut out = Self::with_sink(self.capacity(), self.sink.clone());
        if out.capacity() > 0 {
            out.push_run(self.iter().cloned());
        }
        out
    }
}

impl<T: fmt::Debug, S: Sink> fmt::Debug for RingBuffer<T, S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

impl<T: PartialEq, S: Sink, S2: Sink> PartialEq<RingBuffer<T, S2>> for RingBuffer<T, S> {
    fn eq(&self, other: &RingBuffer<T, S2>) -> bool {
        self.len() == other.len() && self.iter().eq(other.iter())
    }
}

impl<T: Eq, S: Sink> Eq for RingBuffer<T, S> {}

impl<T, S: Sink> Index<usize> for RingBuffer<T, S> {
    type Output = T;

    fn index(&self, index: usize) -> &T {
        let len = self.len();
        match self.get(index) {
            Some(value) => value,
            None => panic!("index {index} out of range for ring buffer of length {len}"),
        }
    }
}

impl<T, S: Sink> IndexMut<usize> for RingBuffer<T, S> {
    fn index_mut(&mut self, index: usize) -> &mut T {
        let len = self.len();
        match self.get_mut(index) {
            Some(value) => value,
            None => panic!("index {index} out of range for ring buffer of length {len}"),
        }
    }
}

impl<T, S: Sink> Extend<T> for RingBuffer<T, S> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for value in iter {
            self.push_back(value);
        }
    }
}

/// Front-to-back iterator over a [`RingBuffer`], driven by bounded cursor advance.
pub struct Iter<'a, T> {
    storage: &'a StorageBlock<T>,
    window: Window,
    head: usize,
    remaining: usize,
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<&'a T> {
        if self.remaining == 0 {
            return None;
        }
        let slot = self.head;
        self.head = self.window.advance(slot, 1);
        self.remaining -= 1;
        // SAFETY: `head` walks the live window and stops at the sentinel.
        Some(unsafe { self.storage.get(slot) })
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<T> DoubleEndedIterator for Iter<'_, T> {
    fn next_back(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        self.remaining -= 1;
        let slot = self.window.step_forward(self.head, self.remaining);
        Some(unsafe { self.storage.get(slot) })
    }
}

impl<T> ExactSizeIterator for Iter<'_, T> {}
impl<T> FusedIterator for Iter<'_, T> {}

impl<T> Clone for Iter<'_, T> {
    fn clone(&self) -> Self {
        Self { ..*self }
    }
}

pub struct IterMut<'a, T> {
    inner: iter::Chain<slice::IterMut<'a, T>, slice::IterMut<'a, T>>,
}

impl<'a, T> Iterator for IterMut<'a, T> {
    type Item = &'a mut T;

    #[inline]
    fn next(&mut self) -> Option<&'a mut T> {
        self.inner.next()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<T> DoubleEndedIterator for IterMut<'_, T> {
    #[inline]
    fn next_back(&mut self) -> Option<Self::Item> {
        self.inner.next_back()
    }
}

impl<T> ExactSizeIterator for IterMut<'_, T> {}
impl<T> FusedIterator for IterMut<'_, T> {}

/// Owning iterator; pops from the front.
pub struct IntoIter<T, S: Sink> {
    buf: RingBuffer<T, S>,
}

impl<T, S: Sink> Iterator for IntoIter<T, S> {
    type Item = T;

    fn next(&mut self) -> Option<T> {
        self.buf.pop_front_slot()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let len = self.buf.len();
        (len, Some(len))
    }
}

impl<T, S: Sink> DoubleEndedIterator for IntoIter<T, S> {
    fn next_back(&mut self) -> Option<T> {
        self.buf.pop_back_slot()
    }
}

impl<T, S: Sink> ExactSizeIterator for IntoIter<T, S> {}
impl<T, S: Sink> FusedIterator for IntoIter<T, S> {}

impl<T, S: Sink> IntoIterator for RingBuffer<T, S> {
    type Item = T;
    type IntoIter = IntoIter<T, S>;

    fn into_iter(self) -> IntoIter<T, S> {
        IntoIter { buf: self }
    }
}

impl<'a, T, S: Sink> IntoIterator for &'a RingBuffer<T, S> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Iter<'a, T> {
        self.iter()
    }
}

impl<'a, T, S: Sink> IntoIterator for &'a mut RingBuffer<T, S> {
    type Item = &'a mut T;
    type IntoIter = IterMut<'a, T>;

    fn into_iter(self) -> IterMut<'a, T> {
        self.iter_mut()
    }
}
