//! Heap-allocated slot storage backing the array list.

use alloc::boxed::Box;
use core::mem::MaybeUninit;
use core::ops::{Bound, Range, RangeBounds};
use core::ptr;

/// A contiguous block of possibly uninitialized element slots.
///
/// The buffer tracks only its capacity; which slots hold live values is the
/// owning container's responsibility.
pub(crate) struct HeapBuffer<T> {
    slots: Box<[MaybeUninit<T>]>,
}

impl<T> HeapBuffer<T> {
    pub(crate) fn with_capacity(capacity: usize) -> Self {
        HeapBuffer {
            slots: Box::new_uninit_slice(capacity),
        }
    }

    #[inline]
    pub(crate) fn capacity(&self) -> usize {
        self.slots.len()
    }

    #[inline]
    pub(crate) fn ptr_at(&self, index: usize) -> *const T {
        debug_assert!(index <= self.capacity());
        self.slots.as_ptr().wrapping_add(index).cast()
    }

    #[inline]
    pub(crate) fn mut_ptr_at(&mut self, index: usize) -> *mut T {
        debug_assert!(index <= self.capacity());
        self.slots.as_mut_ptr().wrapping_add(index).cast()
    }

    /// Replaces the backing block with one of capacity `2 * capacity + extra`,
    /// moving the first `live` slots over and releasing the old block.
    ///
    /// Doubling bounds total copy work across N appends to O(N), and the
    /// `extra` term guarantees a single call opens enough room for a batch of
    /// `extra` insertions even when starting from capacity zero.
    ///
    /// # Panics
    /// Panics if the new capacity overflows `usize`.
    pub(crate) fn grow(&mut self, live: usize, extra: usize) {
        debug_assert!(live <= self.capacity());

        let new_capacity = match self
            .capacity()
            .checked_mul(2)
            .and_then(|doubled| doubled.checked_add(extra))
        {
            Some(c) => c,
            None => capacity_overflow(),
        };

        let mut grown: Box<[MaybeUninit<T>]> = Box::new_uninit_slice(new_capacity);
        unsafe {
            ptr::copy_nonoverlapping(self.slots.as_ptr(), grown.as_mut_ptr(), live);
        }

        // The old slots were moved out bitwise; `MaybeUninit` has no drop
        // glue, so reassigning only frees the old allocation.
        self.slots = grown;
    }
}

#[inline(never)]
#[cold]
#[track_caller]
fn capacity_overflow() -> ! {
    panic!("capacity overflow")
}

#[inline(never)]
#[cold]
#[track_caller]
fn start_index_exceeds_end_index(start: usize, end: usize) -> ! {
    panic!(
        "range start (is {}) should be <= range end (is {})",
        start, end
    )
}

#[inline(never)]
#[cold]
#[track_caller]
fn end_index_exceeds_length(end: usize, len: usize) -> ! {
    panic!("range end (is {}) should be <= len (is {})", end, len)
}

#[inline(never)]
#[cold]
#[track_caller]
fn start_index_overflows() -> ! {
    panic!("attempted to index slice from after maximum usize")
}

#[inline(never)]
#[cold]
#[track_caller]
fn end_index_overflows() -> ! {
    panic!("attempted to index slice up to maximum usize")
}

/// Resolves any range over element indices into a half-open `Range`.
///
/// # Panics
/// Panics if a bound resolves past `usize::MAX`, if the resolved start
/// exceeds the resolved end, or if the resolved end exceeds `len`.
pub(crate) fn normalize_range<R: RangeBounds<usize>>(range: R, len: usize) -> Range<usize> {
    let start = match range.start_bound() {
        Bound::Included(&s) => s,
        Bound::Excluded(&s) => match s.checked_add(1) {
            Some(start) => start,
            None => start_index_overflows(),
        },
        Bound::Unbounded => 0,
    };

    let end = match range.end_bound() {
        Bound::Included(&e) => match e.checked_add(1) {
            Some(end) => end,
            None => end_index_overflows(),
        },
        Bound::Excluded(&e) => e,
        Bound::Unbounded => len,
    };

    if start > end {
        start_index_exceeds_end_index(start, end);
    }

    if end > len {
        end_index_exceeds_length(end, len);
    }

    Range { start, end }
}
