//! Detached, fail-fast traversal handles for [`ArrayList`].
//!
//! [`Scan`] and [`Cursor`] do not borrow the list they traverse. Each handle
//! records the list's structural modification counter when created, and
//! every operation takes the list as an argument and begins by comparing
//! counters: if the list was modified through any other path in the
//! meantime, the operation fails with [`IterError::Stale`] and the handle is
//! permanently dead. Edits made *through* a [`Cursor`] re-synchronize that
//! cursor while invalidating every other outstanding handle.
//!
//! A handle is bound by contract to the list that created it. Passing a
//! different list is detected as staleness, exhaustion, or at worst an index
//! panic; it cannot cause memory unsafety, as a handle holds nothing but
//! counters and indices.

use crate::list::ArrayList;
use crate::IterError;

/// A detached single-pass iterator over an [`ArrayList`].
///
/// Created by [`ArrayList::scan`]. The handle is forward-only, read-only,
/// and never re-synchronizes: any structural modification of the list after
/// creation makes every subsequent [`next`](Scan::next) fail with
/// [`IterError::Stale`].
///
/// # Examples
/// ```
/// use liana::{ArrayList, IterError};
///
/// let mut list = ArrayList::from([1, 2, 3]);
/// let mut scan = list.scan();
/// assert_eq!(scan.next(&list), Ok(&1));
///
/// list.push(4);
/// assert_eq!(scan.next(&list), Err(IterError::Stale));
/// ```
#[derive(Debug)]
pub struct Scan {
    expected: u64,
    position: usize,
}

impl Scan {
    pub(crate) fn new<T>(list: &ArrayList<T>) -> Self {
        Scan {
            expected: list.version(),
            position: 0,
        }
    }

    /// Returns `true` if a following [`next`](Scan::next) on an unmodified
    /// list would yield an element.
    #[inline]
    pub fn has_next<T>(&self, list: &ArrayList<T>) -> bool {
        self.position < list.len()
    }

    /// Returns a reference to the next element and advances the handle.
    ///
    /// # Errors
    /// Fails with [`IterError::Stale`] if the list was structurally modified
    /// since the handle was created, and with [`IterError::Exhausted`] once
    /// all elements have been traversed.
    ///
    /// # Examples
    /// ```
    /// use liana::{ArrayList, IterError};
    ///
    /// let list = ArrayList::from([1, 2]);
    /// let mut scan = list.scan();
    ///
    /// assert_eq!(scan.next(&list), Ok(&1));
    /// assert_eq!(scan.next(&list), Ok(&2));
    /// assert_eq!(scan.next(&list), Err(IterError::Exhausted));
    /// ```
    pub fn next<'l, T>(&mut self, list: &'l ArrayList<T>) -> Result<&'l T, IterError> {
        if self.expected != list.version() {
            return Err(IterError::Stale);
        }

        match list.as_slice().get(self.position) {
            Some(element) => {
                self.position += 1;
                Ok(element)
            }
            None => Err(IterError::Exhausted),
        }
    }
}

/// Which element a [`Cursor`]'s `replace` and `remove` may operate on.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Anchor {
    /// No traversal step has happened yet.
    Unset,
    /// Position of the element most recently returned by `next` or
    /// `previous`.
    At(usize),
    /// The anchor was spent by `remove` or `insert`; another traversal step
    /// must happen before the next anchored edit.
    Consumed,
}

/// A detached bidirectional cursor over an [`ArrayList`].
///
/// Created by [`ArrayList::cursor`] and [`ArrayList::cursor_at`]. The cursor
/// sits *between* elements: [`next`](Cursor::next) and
/// [`previous`](Cursor::previous) return the element on either side and move
/// across it, and alternating the two returns the same element repeatedly.
///
/// The element most recently returned is the cursor's *anchor*.
/// [`replace`](Cursor::replace) and [`remove`](Cursor::remove) operate on
/// the anchor; [`insert`](Cursor::insert) needs no anchor but spends it, as
/// does `remove`, so a fresh traversal step is required before the next
/// anchored edit. Edits through the cursor advance the list's structural
/// modification counter, invalidating every other handle, and then
/// re-synchronize this cursor.
///
/// # Examples
/// ```
/// let mut list = liana::ArrayList::from([10, 20, 30]);
/// let mut cursor = list.cursor();
///
/// assert_eq!(cursor.next(&list), Ok(&10));
/// assert_eq!(cursor.replace(&mut list, 11), Ok(10));
/// assert_eq!(cursor.remove(&mut list), Ok(11));
/// assert_eq!(list, [20, 30]);
/// ```
#[derive(Debug)]
pub struct Cursor {
    expected: u64,
    position: usize,
    anchor: Anchor,
}

impl Cursor {
    pub(crate) fn new<T>(list: &ArrayList<T>, position: usize) -> Self {
        Cursor {
            expected: list.version(),
            position,
            anchor: Anchor::Unset,
        }
    }

    #[inline]
    fn check_synchronized<T>(&self, list: &ArrayList<T>) -> Result<(), IterError> {
        if self.expected != list.version() {
            Err(IterError::Stale)
        } else {
            Ok(())
        }
    }

    /// Returns `true` if a following [`next`](Cursor::next) on an unmodified
    /// list would yield an element.
    #[inline]
    pub fn has_next<T>(&self, list: &ArrayList<T>) -> bool {
        self.position < list.len()
    }

    /// Returns `true` if a following [`previous`](Cursor::previous) on an
    /// unmodified list would yield an element.
    #[inline]
    pub fn has_previous(&self) -> bool {
        self.position > 0
    }

    /// Returns the index of the element a following [`next`](Cursor::next)
    /// would return; this is the list's length when the cursor is at the
    /// end.
    #[inline]
    pub fn next_index(&self) -> usize {
        self.position
    }

    /// Returns the index of the element a following
    /// [`previous`](Cursor::previous) would return, or [`None`] when the
    /// cursor is at the front.
    #[inline]
    pub fn previous_index(&self) -> Option<usize> {
        self.position.checked_sub(1)
    }

    /// Returns a reference to the element after the cursor and moves across
    /// it, anchoring the cursor there.
    ///
    /// # Errors
    /// Fails with [`IterError::Stale`] if the list was structurally modified
    /// since the cursor's last synchronization point, and with
    /// [`IterError::Exhausted`] at the end of the list.
    pub fn next<'l, T>(&mut self, list: &'l ArrayList<T>) -> Result<&'l T, IterError> {
        self.check_synchronized(list)?;

        match list.as_slice().get(self.position) {
            Some(element) => {
                self.anchor = Anchor::At(self.position);
                self.position += 1;
                Ok(element)
            }
            None => Err(IterError::Exhausted),
        }
    }

    /// Returns a reference to the element before the cursor and moves across
    /// it, anchoring the cursor there.
    ///
    /// # Errors
    /// Fails with [`IterError::Stale`] if the list was structurally modified
    /// since the cursor's last synchronization point, and with
    /// [`IterError::Exhausted`] at the front of the list.
    ///
    /// # Examples
    /// ```
    /// let list = liana::ArrayList::from([1, 2, 3]);
    /// let mut cursor = list.cursor_at(3);
    ///
    /// assert_eq!(cursor.previous(&list), Ok(&3));
    /// assert_eq!(cursor.previous(&list), Ok(&2));
    /// ```
    pub fn previous<'l, T>(&mut self, list: &'l ArrayList<T>) -> Result<&'l T, IterError> {
        self.check_synchronized(list)?;

        let index = match self.position.checked_sub(1) {
            Some(index) => index,
            None => return Err(IterError::Exhausted),
        };

        match list.as_slice().get(index) {
            Some(element) => {
                self.position = index;
                self.anchor = Anchor::At(index);
                Ok(element)
            }
            None => Err(IterError::Exhausted),
        }
    }

    /// Inserts an element at the cursor position, between the elements a
    /// [`next`](Cursor::next) and a [`previous`](Cursor::previous) would
    /// return, and moves the cursor past it.
    ///
    /// No anchor is required, but the edit spends any the cursor holds: an
    /// immediately following [`replace`](Cursor::replace) or
    /// [`remove`](Cursor::remove) fails until another traversal step
    /// happens.
    ///
    /// # Errors
    /// Fails with [`IterError::Stale`] if the list was structurally modified
    /// since the cursor's last synchronization point.
    ///
    /// # Examples
    /// ```
    /// let mut list = liana::ArrayList::from([1, 3]);
    /// let mut cursor = list.cursor();
    ///
    /// assert_eq!(cursor.next(&list), Ok(&1));
    /// cursor.insert(&mut list, 2).unwrap();
    /// assert_eq!(list, [1, 2, 3]);
    /// assert_eq!(cursor.next(&list), Ok(&3));
    /// ```
    pub fn insert<T>(&mut self, list: &mut ArrayList<T>, element: T) -> Result<(), IterError> {
        self.check_synchronized(list)?;

        list.insert(self.position, element);
        self.position += 1;
        self.anchor = Anchor::Consumed;
        self.expected = list.version();
        Ok(())
    }

    /// Overwrites the anchored element, returning the value previously
    /// stored there. The anchor stays in place, so consecutive replacements
    /// are legal.
    ///
    /// # Errors
    /// Fails with [`IterError::Stale`] if the list was structurally modified
    /// since the cursor's last synchronization point, and with
    /// [`IterError::Unanchored`] if no traversal step has happened since
    /// creation or since the last [`insert`](Cursor::insert) or
    /// [`remove`](Cursor::remove).
    ///
    /// # Examples
    /// ```
    /// let mut list = liana::ArrayList::from([10, 20, 30]);
    /// let mut cursor = list.cursor();
    ///
    /// assert_eq!(cursor.next(&list), Ok(&10));
    /// assert_eq!(cursor.replace(&mut list, 11), Ok(10));
    /// assert_eq!(cursor.replace(&mut list, 12), Ok(11));
    /// assert_eq!(list, [12, 20, 30]);
    /// ```
    pub fn replace<T>(&mut self, list: &mut ArrayList<T>, element: T) -> Result<T, IterError> {
        self.check_synchronized(list)?;

        let index = match self.anchor {
            Anchor::At(index) => index,
            _ => return Err(IterError::Unanchored),
        };

        let previous = list.replace(index, element);
        self.expected = list.version();
        Ok(previous)
    }

    /// Removes and returns the anchored element, spending the anchor:
    /// another traversal step must happen before the next anchored edit.
    ///
    /// # Errors
    /// Fails with [`IterError::Stale`] if the list was structurally modified
    /// since the cursor's last synchronization point, and with
    /// [`IterError::Unanchored`] if no traversal step has happened since
    /// creation or since the last [`insert`](Cursor::insert) or `remove`.
    ///
    /// # Examples
    /// ```
    /// use liana::{ArrayList, IterError};
    ///
    /// let mut list = ArrayList::from([10, 20, 30]);
    /// let mut cursor = list.cursor();
    ///
    /// assert_eq!(cursor.next(&list), Ok(&10));
    /// assert_eq!(cursor.remove(&mut list), Ok(10));
    /// assert_eq!(list, [20, 30]);
    /// assert_eq!(cursor.remove(&mut list), Err(IterError::Unanchored));
    /// ```
    pub fn remove<T>(&mut self, list: &mut ArrayList<T>) -> Result<T, IterError> {
        self.check_synchronized(list)?;

        let index = match self.anchor {
            Anchor::At(index) => index,
            _ => return Err(IterError::Unanchored),
        };

        let removed = list.remove(index);
        if index < self.position {
            self.position -= 1;
        }
        self.anchor = Anchor::Consumed;
        self.expected = list.version();
        Ok(removed)
    }
}
