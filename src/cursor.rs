//! Positions inside a ring buffer's storage block.
//!
//! A [`Cursor`] is a physical slot offset tagged with the [`BlockId`] it was taken from. The
//! offset equal to the block's capacity is the sentinel, one past the last addressable slot.
//!
//! Cursors are ordered by their wrapped distance from the buffer's current front, not by raw
//! offset, because offsets wrap physically while logical order must not. That makes ordering a
//! property of the buffer rather than of the cursor, so comparisons go through
//! `RingBuffer::compare`.
//!
//! # Advance policies
//! - *Bounded* (`advance`/`retreat`): clamps to the sentinel as soon as a step would leave the
//!   valid window. Used for traversal, where running off the window must be detectable.
//! - *Boundless* (`step_forward`/`step_backward`): always wraps modulo capacity. Used while a
//!   mutation is still deciding where the window boundaries end up.

use core::cmp::Ordering;

use crate::storage::BlockId;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct Cursor {
    block: BlockId,
    offset: usize,
}

impl Cursor {
    #[inline]
    pub(crate) const fn new(block: BlockId, offset: usize) -> Self {
        Self { block, offset }
    }

    /// The storage block this cursor addresses.
    #[inline]
    pub const fn block(&self) -> BlockId {
        self.block
    }

    /// Physical slot offset; equal to the capacity for the sentinel.
    #[inline]
    pub const fn offset(&self) -> usize {
        self.offset
    }
}

/// Snapshot of a buffer's boundary state.
///
/// `back` is the slot after the last element. When the buffer is full, `back == front` and the
/// flag disambiguates it from empty.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub(crate) struct Window {
    pub capacity: usize,
    pub front: usize,
    pub back: usize,
    pub full: bool,
}

impl Window {
    #[inline]
    pub fn sentinel(&self) -> usize {
        self.capacity
    }

    #[inline]
    pub fn len(&self) -> usize {
        if self.full {
            self.capacity
        } else {
            self.wrap_index(self.back)
        }
    }

    /// Logical position of `offset`, counted forward from the front. The sentinel maps to
    /// itself.
    #[inline]
    pub fn wrap_index(&self, offset: usize) -> usize {
        if offset == self.capacity {
            self.capacity
        } else if offset < self.front {
            self.capacity - (self.front - offset)
        } else {
            offset - self.front
        }
    }

    /// Physical offset of logical `position`; anything past the last slot maps to the sentinel.
    #[inline]
    pub fn unwrap_position(&self, position: usize) -> usize {
        if position >= self.capacity {
            self.capacity
        } else {
            (self.front + position) % self.capacity
        }
    }

    #[inline]
    pub fn step_forward(&self, offset: usize, steps: usize) -> usize {
        if self.capacity == 0 {
            return offset;
        }
        (offset + steps % self.capacity) % self.capacity
    }

    #[inline]
    pub fn step_backward(&self, offset: usize, steps: usize) -> usize {
        if self.capacity == 0 {
            return offset;
        }
        let steps = steps % self.capacity;
        if offset >= steps {
            offset - steps
        } else {
            self.capacity - (steps - offset)
        }
    }

    /// Bounded forward advance: lands on the sentinel once `steps` would reach or pass the
    /// slot after the last element.
    pub fn advance(&self, offset: usize, steps: usize) -> usize {
        if steps == 0 || offset == self.sentinel() {
            return offset;
        }
        let position = self.wrap_index(offset);
        let len = self.len();
        if position >= len || len - position <= steps {
            self.sentinel()
        } else {
            self.step_forward(offset, steps)
        }
    }

    /// Bounded backward advance: the sentinel steps back onto the last element, and any step
    /// before the front lands on the sentinel.
    pub fn retreat(&self, offset: usize, steps: usize) -> usize {
        if steps == 0 {
            return offset;
        }
        let len = self.len();
        let position = if offset == self.sentinel() {
            len
        } else {
            self.wrap_index(offset)
        };
        if position > len || steps > position {
            self.sentinel()
        } else {
            self.unwrap_position(position - steps)
        }
    }

    #[inline]
    pub fn order(&self, a: usize, b: usize) -> Ordering {
        self.wrap_index(a).cmp(&self.wrap_index(b))
    }
}

#[cfg(test)]
mod tests {
    use super::Window;
    use core::cmp::Ordering;

    // Capacity 5 holding three elements in slots 3, 4, 0.
    const WRAPPED: Window = Window {
        capacity: 5,
        front: 3,
        back: 1,
        full: false,
    };

    const FULL: Window = Window {
        capacity: 5,
        front: 2,
        back: 2,
        full: true,
    };

    #[test]
    fn wrap_index_counts_from_front() {
        assert_eq!(WRAPPED.wrap_index(3), 0);
        assert_eq!(WRAPPED.wrap_index(4), 1);
        assert_eq!(WRAPPED.wrap_index(0), 2);
        assert_eq!(WRAPPED.wrap_index(5), 5);
        assert_eq!(WRAPPED.len(), 3);
        assert_eq!(FULL.len(), 5);
    }

    #[test]
    fn unwrap_position_inverts_wrap_index() {
        for position in 0..5 {
            assert_eq!(WRAPPED.wrap_index(WRAPPED.unwrap_position(position)), position);
        }
        assert_eq!(WRAPPED.unwrap_position(7), 5);
    }

    #[test]
    fn bounded_advance_clamps_at_window_end() {
        assert_eq!(WRAPPED.advance(3, 1), 4);
        assert_eq!(WRAPPED.advance(3, 2), 0);
        assert_eq!(WRAPPED.advance(3, 3), 5);
        assert_eq!(WRAPPED.advance(0, 1), 5);
        assert_eq!(WRAPPED.advance(5, 1), 5);
        // Slot 2 is outside the window.
        assert_eq!(WRAPPED.advance(2, 1), 5);
    }

    #[test]
    fn bounded_advance_on_full_window_reaches_last_slot() {
        assert_eq!(FULL.advance(2, 4), 1);
        assert_eq!(FULL.advance(1, 1), 5);
        assert_eq!(FULL.advance(2, 5), 5);
    }

    #[test]
    fn bounded_retreat_mirrors_from_sentinel() {
        assert_eq!(WRAPPED.retreat(5, 1), 0);
        assert_eq!(WRAPPED.retreat(5, 3), 3);
        assert_eq!(WRAPPED.retreat(5, 4), 5);
        assert_eq!(WRAPPED.retreat(3, 1), 5);
        assert_eq!(FULL.retreat(5, 1), 1);
    }

    #[test]
    fn boundless_steps_wrap_regardless_of_window() {
        assert_eq!(WRAPPED.step_forward(4, 1), 0);
        assert_eq!(WRAPPED.step_forward(4, 12), 1);
        assert_eq!(WRAPPED.step_backward(0, 1), 4);
        assert_eq!(WRAPPED.step_backward(2, 7), 0);
    }

    #[test]
    fn order_uses_wrapped_distance() {
        // Slot 0 is logically after slot 4 even though its raw offset is smaller.
        assert_eq!(WRAPPED.order(0, 4), Ordering::Greater);
        assert_eq!(WRAPPED.order(3, 5), Ordering::Less);
        assert_eq!(WRAPPED.order(4, 4), Ordering::Equal);
    }

    #[test]
    fn zero_capacity_window_is_inert() {
        let w = Window {
            capacity: 0,
            front: 0,
            back: 0,
            full: false,
        };
        assert_eq!(w.len(), 0);
        assert_eq!(w.step_forward(0, 3), 0);
        assert_eq!(w.advance(0, 1), 0);
        assert_eq!(w.retreat(0, 1), 0);
    }
}
