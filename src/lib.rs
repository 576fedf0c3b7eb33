#![no_std]
#![warn(missing_docs)]

//! A growable array list with fail-fast, cursor-capable iteration.
//!
//! The centerpiece of this crate is [`ArrayList`], a heap-allocated,
//! contiguous sequence with O(1) indexing and amortized O(1) append.
//! Insertion and removal at arbitrary positions shift the affected suffix
//! with a single bulk copy.
//!
//! Unlike the borrowing iterators obtained through `iter` and friends, the
//! [`Scan`] and [`Cursor`] handles returned by [`ArrayList::scan`] and
//! [`ArrayList::cursor`] do not borrow the list. Each traversal step takes
//! the list as an argument and is checked against a structural modification
//! counter, so a handle that has been overtaken by an insertion, removal, or
//! overwrite reports [`IterError::Stale`] instead of silently reading
//! shifted memory. A [`Cursor`] can also edit the list mid-traversal,
//! anchored at the element it last returned:
//!
//! ```
//! use liana::ArrayList;
//!
//! let mut list = ArrayList::from([1, 2, 3, 4, 5]);
//! let mut cursor = list.cursor();
//! while let Ok(&x) = cursor.next(&list) {
//!     if x % 2 == 0 {
//!         cursor.remove(&mut list).unwrap();
//!     }
//! }
//!
//! assert_eq!(list, [1, 3, 5]);
//! ```

extern crate alloc;

pub mod cursor;
pub mod list;

mod storage;

pub use crate::cursor::{Cursor, Scan};
pub use crate::list::{ArrayList, IntoIter};

/// The error type for fallible operations on [`Scan`] and [`Cursor`].
#[derive(Copy, Clone, Debug, Hash, PartialEq, Eq)]
pub enum IterError {
    /// The list was structurally modified after the handle's last
    /// synchronization point, rendering the handle permanently unusable.
    Stale,
    /// No element remains in the direction of travel.
    Exhausted,
    /// No element was traversed since the handle was created or since its
    /// last structural edit, so there is no anchor to operate on.
    Unanchored,
}

impl core::fmt::Display for IterError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let msg = match self {
            IterError::Stale => "list was structurally modified behind this handle",
            IterError::Exhausted => "no element remains in the direction of travel",
            IterError::Unanchored => "no element was traversed since the last structural edit",
        };
        f.write_str(msg)
    }
}

impl core::error::Error for IterError {}
