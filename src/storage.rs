//! Fixed-size slot storage owned by a single ring buffer.
//!
//! A block is one contiguous allocation of `capacity` slots, obtained once and never grown in
//! place. It knows nothing about which slots hold live values; the owning buffer tracks that
//! and is responsible for dropping them.
//!
//! # Relocation
//! Elements are moved between slots with raw bit copies (`ptr::copy`). Every Rust value is
//! relocatable this way, so no per-type opt-in is needed. A move of a circular run is split by
//! [`plan_move`] into at most three contiguous segments at the physical end of the block.

use alloc::boxed::Box;
use alloc::vec::Vec;
use core::mem::MaybeUninit;
use core::ptr;

#[cfg(not(feature = "portable-atomic"))]
use core::sync::atomic::{AtomicU32, Ordering};
#[cfg(feature = "portable-atomic")]
use portable_atomic::{AtomicU32, Ordering};

use crate::error::Error;

/// Largest slot count a block may have, so offset sums never overflow.
pub const MAX_CAPACITY: usize = isize::MAX as usize;

static NEXT_BLOCK_ID: AtomicU32 = AtomicU32::new(1);

/// Identity of one storage block allocation.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct BlockId(u32);

impl BlockId {
    fn next() -> Self {
        Self(NEXT_BLOCK_ID.fetch_add(1, Ordering::Relaxed))
    }
}

/// Which way a run of elements travels around the ring.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub(crate) enum Toward {
    Front,
    Back,
}

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub(crate) struct Segment {
    pub src: usize,
    pub dst: usize,
    pub len: usize,
}

/// Contiguous pieces of a circular move, in ascending logical order.
#[derive(Copy, Clone, Debug)]
pub(crate) struct MovePlan {
    segments: [Segment; 3],
    count: usize,
}

impl MovePlan {
    pub fn segments(&self) -> &[Segment] {
        &self.segments[..self.count]
    }
}

/// Split a move of `len` slots from `src` to `dst` (both physical offsets in a block of
/// `capacity` slots) into runs that are contiguous in both source and destination.
///
/// Each physical end can be crossed at most once, so there are never more than three runs.
pub(crate) fn plan_move(capacity: usize, src: usize, dst: usize, len: usize) -> MovePlan {
    debug_assert!(len <= capacity);
    debug_assert!(len == 0 || (src < capacity && dst < capacity));

    let mut plan = MovePlan {
        segments: [Segment::default(); 3],
        count: 0,
    };
    let (mut src, mut dst, mut remaining) = (src, dst, len);
    while remaining > 0 {
        let run = remaining.min(capacity - src).min(capacity - dst);
        plan.segments[plan.count] = Segment { src, dst, len: run };
        plan.count += 1;

        src = (src + run) % capacity;
        dst = (dst + run) % capacity;
        remaining -= run;
    }
    plan
}

pub struct StorageBlock<T> {
    id: BlockId,
    slots: Box<[MaybeUninit<T>]>,
}

impl<T> StorageBlock<T> {
    /// A block with no slots. Does not allocate.
    pub fn empty() -> Self {
        Self {
            id: BlockId::next(),
            slots: Box::new([]),
        }
    }

    pub fn allocate(capacity: usize) -> Result<Self, Error> {
        if capacity > MAX_CAPACITY {
            return Err(Error::Alloc { capacity });
        }

        let mut slots = Vec::new();
        slots
            .try_reserve_exact(capacity)
            .map_err(|_| Error::Alloc { capacity })?;
        slots.resize_with(capacity, MaybeUninit::uninit);

        Ok(Self {
            id: BlockId::next(),
            slots: slots.into_boxed_slice(),
        })
    }

    #[inline]
    pub fn id(&self) -> BlockId {
        self.id
    }

    #[inline]
    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    /// Store `value` in `slot` without dropping whatever the slot held before.
    #[inline]
    pub(crate) fn write(&mut self, slot: usize, value: T) {
        self.slots[slot] = MaybeUninit::new(value);
    }

    /// Move the value out of `slot`, leaving the slot logically uninitialized.
    ///
    /// # Safety
    /// `slot` must hold a live value, and the caller must stop treating it as live.
    #[inline]
    pub(crate) unsafe fn take(&mut self, slot: usize) -> T {
        unsafe { self.slots[slot].assume_init_read() }
    }

    /// # Safety
    /// `slot` must hold a live value.
    #[inline]
    pub(crate) unsafe fn get(&self, slot: usize) -> &T {
        unsafe { self.slots[slot].assume_init_ref() }
    }

    /// # Safety
    /// `slot` must hold a live value.
    #[inline]
    pub(crate) unsafe fn get_mut(&mut self, slot: usize) -> &mut T {
        unsafe { self.slots[slot].assume_init_mut() }
    }

    /// The live run of `len` slots starting at `front`, as at most two slices.
    ///
    /// # Safety
    /// Every slot in the run must hold a live value.
    pub(crate) unsafe fn window(&self, front: usize, len: usize) -> (&[T], &[T]) {
        let capacity = self.capacity();
        let (head, tail) = if front + len <= capacity {
            (&self.slots[front..front + len], &self.slots[..0])
        } else {
            (&self.slots[front..], &self.slots[..len - (capacity - front)])
        };
        // SAFETY: MaybeUninit<T> has the layout of T and the caller vouches for initialization.
        unsafe { (assume_init_slice(head), assume_init_slice(tail)) }
    }

    /// # Safety
    /// Every slot in the run must hold a live value.
    pub(crate) unsafe fn window_mut(&mut self, front: usize, len: usize) -> (&mut [T], &mut [T]) {
        let capacity = self.capacity();
        if front + len <= capacity {
            let head = &mut self.slots[front..front + len];
            let empty: &mut [T] = &mut [];
            unsafe { (assume_init_slice_mut(head), empty) }
        } else {
            let wrapped = len - (capacity - front);
            let (low, high) = self.slots.split_at_mut(front);
            unsafe {
                (
                    assume_init_slice_mut(high),
                    assume_init_slice_mut(&mut low[..wrapped]),
                )
            }
        }
    }

    /// Bit-copy `len` slots from `src` to `dst`, wrapping at the physical end.
    ///
    /// The source slots keep their bits, so after the call the caller must treat only the
    /// destination run as live.
    pub(crate) fn relocate(&mut self, src: usize, dst: usize, len: usize, toward: Toward) {
        let capacity = self.capacity();
        let plan = plan_move(capacity, src, dst, len);
        let base = self.slots.as_mut_ptr();

        let copy = |seg: &Segment| {
            assert!(seg.src + seg.len <= capacity && seg.dst + seg.len <= capacity);
            // SAFETY: both runs were bounds-checked above and `ptr::copy` tolerates overlap.
            unsafe { ptr::copy(base.add(seg.src), base.add(seg.dst), seg.len) };
        };

        // Runs heading toward the back overlap their successors, so copy the last one first.
        match toward {
            Toward::Back => plan.segments().iter().rev().for_each(copy),
            Toward::Front => plan.segments().iter().for_each(copy),
        }
    }
}

unsafe fn assume_init_slice<T>(slots: &[MaybeUninit<T>]) -> &[T] {
    unsafe { &*(slots as *const [MaybeUninit<T>] as *const [T]) }
}

unsafe fn assume_init_slice_mut<T>(slots: &mut [MaybeUninit<T>]) -> &mut [T] {
    unsafe { &mut *(slots as *mut [MaybeUninit<T>] as *mut [T]) }
}

#[cfg(test)]
mod tests {
    use super::{Segment, StorageBlock, Toward, plan_move};
    use crate::error::Error;

    fn seg(src: usize, dst: usize, len: usize) -> Segment {
        Segment { src, dst, len }
    }

    fn filled(values: &[u32]) -> StorageBlock<u32> {
        let mut block = StorageBlock::allocate(values.len()).unwrap();
        for (slot, v) in values.iter().enumerate() {
            block.write(slot, *v);
        }
        block
    }

    fn read_all(block: &StorageBlock<u32>) -> std::vec::Vec<u32> {
        (0..block.capacity()).map(|s| unsafe { *block.get(s) }).collect()
    }

    #[test]
    fn contiguous_move_is_one_segment() {
        let plan = plan_move(8, 1, 3, 4);
        assert_eq!(plan.segments(), &[seg(1, 3, 4)]);
    }

    #[test]
    fn destination_wrap_splits_once() {
        let plan = plan_move(8, 4, 6, 3);
        assert_eq!(plan.segments(), &[seg(4, 6, 2), seg(6, 0, 1)]);
    }

    #[test]
    fn source_wrap_splits_once() {
        let plan = plan_move(8, 6, 1, 4);
        assert_eq!(plan.segments(), &[seg(6, 1, 2), seg(0, 3, 2)]);
    }

    #[test]
    fn both_wraps_split_twice() {
        let plan = plan_move(8, 5, 7, 5);
        assert_eq!(plan.segments(), &[seg(5, 7, 1), seg(6, 0, 2), seg(0, 2, 2)]);
    }

    #[test]
    fn empty_move_has_no_segments() {
        assert!(plan_move(8, 0, 0, 0).segments().is_empty());
        assert!(plan_move(0, 0, 0, 0).segments().is_empty());
    }

    #[test]
    fn relocate_toward_back_across_the_end() {
        // Run [4, 5, 6] at slots 4..7 shifts by two and wraps into slot 0.
        let mut block = filled(&[0, 1, 2, 3, 4, 5, 6, 7]);
        block.relocate(4, 6, 3, Toward::Back);
        let slots = read_all(&block);
        assert_eq!(&slots[6..], &[4, 5]);
        assert_eq!(slots[0], 6);
    }

    #[test]
    fn relocate_toward_front_across_the_end() {
        // Run at slots 6, 7, 0, 1 shifts back by three.
        let mut block = filled(&[20, 21, 2, 3, 4, 5, 10, 11]);
        block.relocate(6, 3, 4, Toward::Front);
        let slots = read_all(&block);
        assert_eq!(&slots[3..7], &[10, 11, 20, 21]);
    }

    #[test]
    fn window_splits_at_physical_end() {
        let block = filled(&[0, 1, 2, 3, 4]);
        let (head, tail) = unsafe { block.window(3, 4) };
        assert_eq!(head, &[3, 4]);
        assert_eq!(tail, &[0, 1]);
    }

    #[test]
    fn oversized_allocation_is_an_error() {
        let err = StorageBlock::<u64>::allocate(usize::MAX).err();
        assert_eq!(err, Some(Error::Alloc { capacity: usize::MAX }));
    }

    #[test]
    fn blocks_have_distinct_ids() {
        let a = StorageBlock::<u8>::allocate(4).unwrap();
        let b = StorageBlock::<u8>::empty();
        assert_ne!(a.id(), b.id());
        assert_eq!(b.capacity(), 0);
    }
}
