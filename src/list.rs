//! A heap-allocated, growable array list.
//!
//! ---
//!
//! Parts of the implementation and documentation of this module were adapted
//! from the Rust standard library `Vec`.

use crate::cursor::{Cursor, Scan};
use crate::storage::{normalize_range, HeapBuffer};

use alloc::vec::Vec;

use core::cmp::Ordering;
use core::hash::{Hash, Hasher};
use core::iter::FusedIterator;
use core::ops::{Range, RangeBounds};
use core::ptr;

/// Capacity of a freshly created list, and the capacity
/// [`clear`](ArrayList::clear) resets to.
const DEFAULT_CAPACITY: usize = 16;

/// A heap-allocated, growable array list with O(1) indexing and amortized
/// O(1) append.
///
/// Insertion and removal at arbitrary positions shift the affected suffix
/// with a single bulk copy, costing O(*n*) in the number of elements after
/// the affected position.
///
/// Every structural modification (insertion, removal, overwrite via
/// [`replace`](ArrayList::replace), and [`clear`](ArrayList::clear)) advances
/// an internal version counter. The [`Scan`] and [`Cursor`] handles returned
/// by [`scan`](ArrayList::scan) and [`cursor`](ArrayList::cursor) capture the
/// counter when created and re-validate it on every step, so a handle
/// overtaken by a modification fails with
/// [`IterError::Stale`](crate::IterError::Stale) rather than traverse shifted
/// memory. Reads never advance the counter, and neither does mutation of
/// element *values* in place through `get_mut`, `iter_mut`, or
/// [`as_mut_slice`](ArrayList::as_mut_slice); those borrows are already
/// serialized against handle steps by the borrow checker.
///
/// Slice methods are available through `Deref<Target = [T]>`.
///
/// # Examples
/// ```
/// let mut list = liana::ArrayList::new();
/// list.push(1); list.push(2); list.push(3);
/// list.insert(1, 4);
///
/// assert_eq!(list, [1, 4, 2, 3]);
/// assert_eq!(list.remove(2), 2);
/// assert_eq!(list.pop(), Some(3));
/// assert_eq!(list, [1, 4]);
/// ```
pub struct ArrayList<T> {
    buf: HeapBuffer<T>,
    len: usize,
    version: u64,
}

impl<T> ArrayList<T> {
    /// Creates an empty list with a preallocated capacity of sixteen
    /// elements.
    ///
    /// # Examples
    /// ```
    /// let list = liana::ArrayList::<u32>::new();
    /// assert!(list.is_empty());
    /// assert_eq!(list.capacity(), 16);
    /// ```
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_CAPACITY)
    }

    /// Creates an empty list with the specified capacity.
    ///
    /// # Examples
    /// ```
    /// let list = liana::ArrayList::<u32>::with_capacity(100);
    /// assert_eq!(list.len(), 0);
    /// assert_eq!(list.capacity(), 100);
    /// ```
    pub fn with_capacity(capacity: usize) -> Self {
        ArrayList {
            buf: HeapBuffer::with_capacity(capacity),
            len: 0,
            version: 0,
        }
    }

    /// Returns the number of elements the list can hold without reallocating.
    #[inline]
    pub fn capacity(&self) -> usize {
        self.buf.capacity()
    }

    /// Returns the number of elements in the list, also referred to as its
    /// *length*.
    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns `true` if the list contains no elements.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Current value of the structural modification counter.
    #[inline]
    pub(crate) fn version(&self) -> u64 {
        self.version
    }

    /// Extracts a slice containing the entire list.
    ///
    /// Equivalent to `&s[..]`.
    #[inline]
    pub fn as_slice(&self) -> &[T] {
        self
    }

    /// Extracts a mutable slice of the entire list.
    ///
    /// Equivalent to `&mut s[..]`.
    #[inline]
    pub fn as_mut_slice(&mut self) -> &mut [T] {
        self
    }

    /// Ensures the list can hold `additional` more elements without
    /// reallocating, growing by the doubling policy if it cannot.
    ///
    /// Reserving is not a structural modification; outstanding [`Scan`] and
    /// [`Cursor`] handles remain usable.
    ///
    /// # Examples
    /// ```
    /// let mut list = liana::ArrayList::<u32>::with_capacity(3);
    /// list.reserve(10);
    /// assert!(list.capacity() >= 10);
    /// ```
    pub fn reserve(&mut self, additional: usize) {
        if self.capacity() - self.len < additional {
            self.buf.grow(self.len, additional);
        }
    }

    /// Appends an element to the back of the list.
    ///
    /// # Examples
    /// ```
    /// let mut list = liana::ArrayList::new();
    /// list.push(1); list.push(2); list.push(3);
    /// assert_eq!(list, [1, 2, 3]);
    /// ```
    #[inline]
    pub fn push(&mut self, value: T) {
        self.push_raw(value);
        self.version += 1;
    }

    /// Removes the last element from the list and returns it, or [`None`] if
    /// it is empty.
    ///
    /// # Examples
    /// ```
    /// let mut list = liana::ArrayList::from([1, 2, 3]);
    /// assert_eq!(list.pop(), Some(3));
    /// assert_eq!(list, [1, 2]);
    /// ```
    #[inline]
    pub fn pop(&mut self) -> Option<T> {
        if self.is_empty() {
            return None;
        }

        self.len -= 1;
        self.version += 1;
        unsafe { Some(self.buf.ptr_at(self.len).read()) }
    }

    /// Inserts an element at position `index` within the list, shifting all
    /// elements after it to the right.
    ///
    /// # Panics
    /// Panics if `index > len`.
    ///
    /// # Examples
    /// ```
    /// let mut list = liana::ArrayList::from([1, 2, 3]);
    /// list.insert(1, 4);
    /// assert_eq!(list, [1, 4, 2, 3]);
    /// list.insert(4, 5);
    /// assert_eq!(list, [1, 4, 2, 3, 5]);
    /// ```
    pub fn insert(&mut self, index: usize, element: T) {
        #[cold]
        #[inline(never)]
        fn assert_failed(index: usize, len: usize) -> ! {
            panic!(
                "insertion index (is {}) should be <= len (is {})",
                index, len
            );
        }

        if index > self.len {
            assert_failed(index, self.len);
        }

        if self.len == self.capacity() {
            self.buf.grow(self.len, 1);
        }

        unsafe {
            let p = self.buf.mut_ptr_at(index);
            ptr::copy(p, p.add(1), self.len - index);
            ptr::write(p, element);
        }

        self.len += 1;
        self.version += 1;
    }

    /// Removes and returns the element at position `index` within the list,
    /// shifting all elements after it to the left.
    ///
    /// # Panics
    /// Panics if `index` is out of bounds.
    ///
    /// # Examples
    /// ```
    /// let mut list = liana::ArrayList::from([1, 2, 3]);
    /// assert_eq!(list.remove(0), 1);
    /// assert_eq!(list, [2, 3]);
    /// ```
    pub fn remove(&mut self, index: usize) -> T {
        #[cold]
        #[inline(never)]
        fn assert_failed(index: usize, len: usize) -> ! {
            panic!("removal index (is {}) should be < len (is {})", index, len);
        }

        if index >= self.len {
            assert_failed(index, self.len);
        }

        let ret = unsafe {
            let p = self.buf.mut_ptr_at(index);
            let ret = ptr::read(p);
            ptr::copy(p.add(1), p, self.len - index - 1);
            ret
        };

        self.len -= 1;
        self.version += 1;
        ret
    }

    /// Places an element at position `index` within the list, returning the
    /// element previously stored there.
    ///
    /// This counts as a structural modification: outstanding handles are
    /// invalidated even though no element moved.
    ///
    /// # Panics
    /// Panics if `index` is out of bounds.
    ///
    /// # Examples
    /// ```
    /// let mut list = liana::ArrayList::from([1, 2, 3]);
    /// assert_eq!(list.replace(1, 4), 2);
    /// assert_eq!(list, [1, 4, 3]);
    /// ```
    pub fn replace(&mut self, index: usize, element: T) -> T {
        #[cold]
        #[inline(never)]
        fn assert_failed(index: usize, len: usize) -> ! {
            panic!(
                "replacement index (is {}) should be < len (is {})",
                index, len
            );
        }

        if index >= self.len {
            assert_failed(index, self.len);
        }

        self.version += 1;
        unsafe { ptr::replace(self.buf.mut_ptr_at(index), element) }
    }

    /// Shortens the list, keeping the first `new_len` elements and dropping
    /// the rest. Has no effect if `new_len` is greater than or equal to the
    /// list's current length.
    ///
    /// # Examples
    /// ```
    /// let mut list = liana::ArrayList::from([1, 2, 3, 4, 5]);
    /// list.truncate(2);
    /// assert_eq!(list, [1, 2]);
    /// ```
    pub fn truncate(&mut self, new_len: usize) {
        if new_len >= self.len {
            return;
        }

        unsafe {
            let tail =
                ptr::slice_from_raw_parts_mut(self.buf.mut_ptr_at(new_len), self.len - new_len);
            self.len = new_len;
            self.version += 1;
            ptr::drop_in_place(tail);
        }
    }

    /// Drops all elements and replaces the backing store with a fresh one of
    /// default capacity.
    ///
    /// # Examples
    /// ```
    /// let mut list = liana::ArrayList::<u32>::with_capacity(100);
    /// list.extend(0..60);
    /// list.clear();
    ///
    /// assert!(list.is_empty());
    /// assert_eq!(list.capacity(), 16);
    /// ```
    pub fn clear(&mut self) {
        unsafe {
            let live = ptr::slice_from_raw_parts_mut(self.buf.mut_ptr_at(0), self.len);
            self.len = 0;
            self.version += 1;
            ptr::drop_in_place(live);
        }

        self.buf = HeapBuffer::with_capacity(DEFAULT_CAPACITY);
    }

    /// Retains only the elements specified by the predicate.
    ///
    /// In other words, remove all elements `e` such that `f(&e)` returns
    /// false. This method visits each element exactly once in the original
    /// order, and preserves the order of the retained elements.
    ///
    /// # Examples
    /// ```
    /// let mut list = liana::ArrayList::from([1, 2, 3, 4]);
    /// list.retain(|&x| x % 2 == 0);
    /// assert_eq!(list, [2, 4]);
    /// ```
    pub fn retain<F>(&mut self, f: F)
    where
        F: FnMut(&T) -> bool,
    {
        self.retain_counting(f);
    }

    /// Returns a detached single-pass iterator positioned before the first
    /// element.
    ///
    /// The handle does not borrow the list; each step takes the list as an
    /// argument and fails with
    /// [`IterError::Stale`](crate::IterError::Stale) if the list was
    /// structurally modified after the handle was created.
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
    #[inline]
    pub fn scan(&self) -> Scan {
        Scan::new(self)
    }

    /// Returns a detached bidirectional cursor positioned before the first
    /// element.
    ///
    /// Like [`scan`](ArrayList::scan), the handle does not borrow the list;
    /// unlike a [`Scan`], it can walk in both directions and edit the list
    /// at the element it last returned.
    ///
    /// # Examples
    /// ```
    /// let mut list = liana::ArrayList::from([10, 20, 30]);
    /// let mut cursor = list.cursor();
    ///
    /// assert_eq!(cursor.next(&list), Ok(&10));
    /// assert_eq!(cursor.remove(&mut list), Ok(10));
    /// assert_eq!(list, [20, 30]);
    /// ```
    #[inline]
    pub fn cursor(&self) -> Cursor {
        Cursor::new(self, 0)
    }

    /// Returns a detached bidirectional cursor positioned before the element
    /// at `index`.
    ///
    /// Passing `index == len` positions the cursor past the end, where only
    /// backward traversal can make progress.
    ///
    /// # Panics
    /// Panics if `index > len`.
    ///
    /// # Examples
    /// ```
    /// let list = liana::ArrayList::from([1, 2, 3]);
    /// let mut cursor = list.cursor_at(list.len());
    ///
    /// assert_eq!(cursor.previous(&list), Ok(&3));
    /// ```
    pub fn cursor_at(&self, index: usize) -> Cursor {
        #[cold]
        #[inline(never)]
        fn assert_failed(index: usize, len: usize) -> ! {
            panic!("cursor index (is {}) should be <= len (is {})", index, len);
        }

        if index > self.len {
            assert_failed(index, self.len);
        }

        Cursor::new(self, index)
    }

    /// Appends without advancing the version counter; callers account for
    /// the bump themselves.
    #[inline]
    fn push_raw(&mut self, value: T) {
        if self.len == self.capacity() {
            self.buf.grow(self.len, 1);
        }

        unsafe { self.buf.mut_ptr_at(self.len).write(value) };
        self.len += 1;
    }

    /// Backshifting retain sweep; reports whether anything was removed.
    fn retain_counting<F>(&mut self, mut f: F) -> bool
    where
        F: FnMut(&T) -> bool,
    {
        let len = self.len;
        let mut deleted = 0;

        {
            let v = self.as_mut_slice();
            for i in 0..len {
                if !f(&v[i]) {
                    deleted += 1;
                } else if deleted > 0 {
                    v.swap(i - deleted, i);
                }
            }
        }

        if deleted == 0 {
            return false;
        }

        self.truncate(len - deleted);
        true
    }
}

impl<T: Clone> ArrayList<T> {
    /// Clones and appends all elements in a slice to the list.
    ///
    /// Grows at most once, and advances the version counter once for the
    /// whole batch; appending an empty slice is not a structural
    /// modification.
    ///
    /// # Examples
    /// ```
    /// let mut list = liana::ArrayList::from([1, 2]);
    /// list.extend_from_slice(&[3, 4]);
    /// assert_eq!(list, [1, 2, 3, 4]);
    /// ```
    pub fn extend_from_slice(&mut self, values: &[T]) {
        if values.is_empty() {
            return;
        }

        self.version += 1;
        self.reserve(values.len());
        for value in values {
            self.push_raw(value.clone());
        }
    }

    /// Clones all elements in a slice into the list at position `index`,
    /// shifting the elements after it right by the slice length.
    ///
    /// The suffix is shifted once for the whole batch, and the version
    /// counter advances once; inserting an empty slice is not a structural
    /// modification.
    ///
    /// # Panics
    /// Panics if `index > len`.
    ///
    /// # Examples
    /// ```
    /// let mut list = liana::ArrayList::from(["a", "c"]);
    /// list.insert_slice(1, &["b"]);
    /// assert_eq!(list, ["a", "b", "c"]);
    /// ```
    pub fn insert_slice(&mut self, index: usize, values: &[T]) {
        #[cold]
        #[inline(never)]
        fn assert_failed(index: usize, len: usize) -> ! {
            panic!(
                "insertion index (is {}) should be <= len (is {})",
                index, len
            );
        }

        if index > self.len {
            assert_failed(index, self.len);
        }

        if values.is_empty() {
            return;
        }

        // Clone the batch up front: a panicking `Clone` must not be able to
        // leave a gap of uninitialized slots in the middle of the list.
        let mut staged: Vec<T> = values.to_vec();

        let count = staged.len();
        if self.capacity() - self.len < count {
            self.buf.grow(self.len, count);
        }

        unsafe {
            let p = self.buf.mut_ptr_at(index);
            ptr::copy(p, p.add(count), self.len - index);
            ptr::copy_nonoverlapping(staged.as_ptr(), p, count);
            staged.set_len(0);
        }

        self.len += count;
        self.version += 1;
    }

    /// Returns a new, independent list holding clones of the elements in the
    /// given half-open index range.
    ///
    /// The copy has its own backing store sized to the range; mutating
    /// either list afterwards is invisible to the other.
    ///
    /// # Panics
    /// Panics if the range's start exceeds its end, or if its end exceeds
    /// `len`.
    ///
    /// # Examples
    /// ```
    /// let list = liana::ArrayList::from([0, 1, 2, 3, 4]);
    /// let copy = list.copy_range(1..4);
    /// assert_eq!(copy, [1, 2, 3]);
    /// ```
    pub fn copy_range<R: RangeBounds<usize>>(&self, range: R) -> ArrayList<T> {
        let Range { start, end } = normalize_range(range, self.len);
        ArrayList::from(&self.as_slice()[start..end])
    }
}

impl<T: PartialEq> ArrayList<T> {
    /// Returns the position of the first element equal to `value`, or
    /// [`None`] if there is no such element.
    ///
    /// # Examples
    /// ```
    /// let list = liana::ArrayList::from([3, 1, 4, 1, 5]);
    /// assert_eq!(list.index_of(&1), Some(1));
    /// assert_eq!(list.index_of(&9), None);
    /// ```
    pub fn index_of(&self, value: &T) -> Option<usize> {
        self.iter().position(|x| x == value)
    }

    /// Returns the position of the last element equal to `value`, or
    /// [`None`] if there is no such element.
    ///
    /// # Examples
    /// ```
    /// let list = liana::ArrayList::from([3, 1, 4, 1, 5]);
    /// assert_eq!(list.last_index_of(&1), Some(3));
    /// ```
    pub fn last_index_of(&self, value: &T) -> Option<usize> {
        self.iter().rposition(|x| x == value)
    }

    /// Returns `true` if every element of `values` is contained in the list.
    ///
    /// # Examples
    /// ```
    /// let list = liana::ArrayList::from([3, 1, 4, 1, 5]);
    /// assert!(list.contains_all(&[1, 3, 5]));
    /// assert!(!list.contains_all(&[1, 9]));
    /// ```
    pub fn contains_all(&self, values: &[T]) -> bool {
        values.iter().all(|value| self.as_slice().contains(value))
    }

    /// Removes the first element equal to `value` and returns it, or returns
    /// [`None`], leaving the version counter untouched, if there is no
    /// such element.
    ///
    /// # Examples
    /// ```
    /// let mut list = liana::ArrayList::from([3, 1, 4, 1, 5]);
    /// assert_eq!(list.remove_value(&1), Some(1));
    /// assert_eq!(list, [3, 4, 1, 5]);
    /// assert_eq!(list.remove_value(&9), None);
    /// ```
    pub fn remove_value(&mut self, value: &T) -> Option<T> {
        let index = self.index_of(value)?;
        Some(self.remove(index))
    }

    /// Removes every element equal to any element of `values`, preserving
    /// the order of the rest. Returns whether any removal occurred; the
    /// version counter advances once if so, and not at all otherwise.
    ///
    /// # Examples
    /// ```
    /// let mut list = liana::ArrayList::from([1, 2, 1, 3, 1, 4]);
    /// assert!(list.remove_all(&[1, 9]));
    /// assert_eq!(list, [2, 3, 4]);
    /// assert!(!list.remove_all(&[1, 9]));
    /// ```
    pub fn remove_all(&mut self, values: &[T]) -> bool {
        self.retain_counting(|x| !values.contains(x))
    }

    /// Removes every element *not* equal to some element of `values`,
    /// preserving the order of the rest. Returns whether any removal
    /// occurred; the version counter advances once if so, and not at all
    /// otherwise.
    ///
    /// # Examples
    /// ```
    /// let mut list = liana::ArrayList::from([1, 2, 1, 3, 1, 4]);
    /// assert!(list.retain_all(&[1, 4]));
    /// assert_eq!(list, [1, 1, 1, 4]);
    /// ```
    pub fn retain_all(&mut self, values: &[T]) -> bool {
        self.retain_counting(|x| values.contains(x))
    }
}

impl<T> Default for ArrayList<T> {
    /// Equivalent to [`ArrayList::new`].
    fn default() -> Self {
        ArrayList::new()
    }
}

impl<T: Clone> Clone for ArrayList<T> {
    fn clone(&self) -> Self {
        ArrayList::from(self.as_slice())
    }
}

impl<T: Clone> From<&[T]> for ArrayList<T> {
    /// Clones the slice into a new list with capacity equal to the slice
    /// length.
    fn from(values: &[T]) -> Self {
        let mut list = ArrayList::with_capacity(values.len());
        list.extend_from_slice(values);
        list
    }
}

impl<T: Clone> From<&mut [T]> for ArrayList<T> {
    /// Clones the slice into a new list with capacity equal to the slice
    /// length.
    fn from(values: &mut [T]) -> Self {
        ArrayList::from(&values[..])
    }
}

impl<T: Clone, const N: usize> From<&[T; N]> for ArrayList<T> {
    /// Clones the array into a new list with capacity `N`.
    fn from(values: &[T; N]) -> Self {
        ArrayList::from(&values[..])
    }
}

impl<T: Clone, const N: usize> From<&mut [T; N]> for ArrayList<T> {
    /// Clones the array into a new list with capacity `N`.
    fn from(values: &mut [T; N]) -> Self {
        ArrayList::from(&values[..])
    }
}

impl<T, const N: usize> From<[T; N]> for ArrayList<T> {
    /// Moves the array's elements into a new list with capacity `N`.
    ///
    /// # Examples
    /// ```
    /// let list = liana::ArrayList::from([1, 2, 3]);
    /// assert_eq!(list.len(), 3);
    /// assert_eq!(list.capacity(), 3);
    /// ```
    fn from(values: [T; N]) -> Self {
        let mut list = ArrayList::with_capacity(N);
        list.extend(values);
        list
    }
}

impl<T> FromIterator<T> for ArrayList<T> {
    /// Creates a list from an iterator, sizing the initial allocation from
    /// the iterator's size hint.
    fn from_iter<It: IntoIterator<Item = T>>(iter: It) -> Self {
        let iter = iter.into_iter();
        let (lower, upper) = iter.size_hint();
        let mut list = ArrayList::with_capacity(upper.unwrap_or(lower));
        list.extend(iter);
        list
    }
}

impl<T> core::ops::Deref for ArrayList<T> {
    type Target = [T];

    #[inline]
    fn deref(&self) -> &[T] {
        unsafe { core::slice::from_raw_parts(self.buf.ptr_at(0), self.len) }
    }
}

impl<T> core::ops::DerefMut for ArrayList<T> {
    #[inline]
    fn deref_mut(&mut self) -> &mut [T] {
        unsafe { core::slice::from_raw_parts_mut(self.buf.mut_ptr_at(0), self.len) }
    }
}

impl<T> core::ops::Index<usize> for ArrayList<T> {
    type Output = T;

    fn index(&self, index: usize) -> &T {
        &self.as_slice()[index]
    }
}

impl<T> core::ops::IndexMut<usize> for ArrayList<T> {
    fn index_mut(&mut self, index: usize) -> &mut T {
        &mut self.as_mut_slice()[index]
    }
}

impl<T> AsRef<[T]> for ArrayList<T> {
    fn as_ref(&self) -> &[T] {
        self
    }
}

impl<T> AsMut<[T]> for ArrayList<T> {
    fn as_mut(&mut self) -> &mut [T] {
        self
    }
}

impl<T> Drop for ArrayList<T> {
    fn drop(&mut self) {
        unsafe {
            ptr::drop_in_place(ptr::slice_from_raw_parts_mut(
                self.buf.mut_ptr_at(0),
                self.len,
            ));
        }
    }
}

impl<T: core::fmt::Debug> core::fmt::Debug for ArrayList<T> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        core::fmt::Debug::fmt(self.as_slice(), f)
    }
}

impl<T: Hash> Hash for ArrayList<T> {
    #[inline]
    fn hash<H: Hasher>(&self, state: &mut H) {
        Hash::hash(&**self, state);
    }
}

impl<A, B> PartialEq<ArrayList<B>> for ArrayList<A>
where
    A: PartialEq<B>,
{
    #[inline]
    fn eq(&self, other: &ArrayList<B>) -> bool {
        self.as_slice() == other.as_slice()
    }
}

impl<T: Eq> Eq for ArrayList<T> {}

impl<V, T: PartialEq<V>> PartialEq<&[V]> for ArrayList<T> {
    #[inline]
    fn eq(&self, other: &&[V]) -> bool {
        self.as_slice() == &other[..]
    }
}

impl<V, T: PartialEq<V>> PartialEq<&mut [V]> for ArrayList<T> {
    #[inline]
    fn eq(&self, other: &&mut [V]) -> bool {
        self.as_slice() == &other[..]
    }
}

impl<V: PartialEq<T>, T> PartialEq<ArrayList<T>> for &[V] {
    #[inline]
    fn eq(&self, other: &ArrayList<T>) -> bool {
        &self[..] == other.as_slice()
    }
}

impl<V: PartialEq<T>, T> PartialEq<ArrayList<T>> for &mut [V] {
    #[inline]
    fn eq(&self, other: &ArrayList<T>) -> bool {
        &self[..] == other.as_slice()
    }
}

impl<V, T: PartialEq<V>, const N: usize> PartialEq<[V; N]> for ArrayList<T> {
    #[inline]
    fn eq(&self, other: &[V; N]) -> bool {
        self.as_slice() == &other[..]
    }
}

impl<V: PartialEq<T>, T, const N: usize> PartialEq<ArrayList<T>> for [V; N] {
    #[inline]
    fn eq(&self, other: &ArrayList<T>) -> bool {
        &self[..] == other.as_slice()
    }
}

impl<T: PartialOrd> PartialOrd for ArrayList<T> {
    #[inline]
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        self.as_slice().partial_cmp(other.as_slice())
    }
}

impl<T: Ord> Ord for ArrayList<T> {
    fn cmp(&self, other: &Self) -> Ordering {
        self.as_slice().cmp(other.as_slice())
    }
}

impl<T> Extend<T> for ArrayList<T> {
    /// Appends the iterator's elements, reserving ahead of time based on its
    /// size hint.
    ///
    /// The version counter advances once for the whole batch; an empty
    /// iterator is not a structural modification.
    fn extend<It: IntoIterator<Item = T>>(&mut self, iter: It) {
        let mut iter = iter.into_iter();
        let first = match iter.next() {
            Some(element) => element,
            None => return,
        };

        self.version += 1;
        let (lower, _) = iter.size_hint();
        self.reserve(lower.saturating_add(1));

        self.push_raw(first);
        for element in iter {
            self.push_raw(element);
        }
    }
}

impl<'a, T> Extend<&'a T> for ArrayList<T>
where
    T: 'a + Clone,
{
    fn extend<It: IntoIterator<Item = &'a T>>(&mut self, iter: It) {
        self.extend(iter.into_iter().cloned());
    }
}

/// An iterator that moves out of an [`ArrayList`].
///
/// This `struct` is created by the `into_iter` method on [`ArrayList`]
/// (provided by the [`IntoIterator`] trait).
///
/// # Examples
/// ```
/// let list = liana::ArrayList::from([1, 2]);
/// let mut iter = list.into_iter();
/// assert_eq!(iter.next(), Some(1));
/// assert_eq!(iter.next(), Some(2));
/// assert_eq!(iter.next(), None);
/// ```
pub struct IntoIter<T> {
    buf: HeapBuffer<T>,
    start: usize,
    end: usize,
}

impl<T> Iterator for IntoIter<T> {
    type Item = T;

    fn size_hint(&self) -> (usize, Option<usize>) {
        let size = self.end - self.start;
        (size, Some(size))
    }

    #[inline]
    fn next(&mut self) -> Option<T> {
        if self.start >= self.end {
            return None;
        }

        let ret = unsafe { self.buf.ptr_at(self.start).read() };
        self.start += 1;
        Some(ret)
    }
}

impl<T> DoubleEndedIterator for IntoIter<T> {
    #[inline]
    fn next_back(&mut self) -> Option<T> {
        if self.start >= self.end {
            return None;
        }

        self.end -= 1;
        Some(unsafe { self.buf.ptr_at(self.end).read() })
    }
}

impl<T> ExactSizeIterator for IntoIter<T> {}
impl<T> FusedIterator for IntoIter<T> {}

impl<T> Drop for IntoIter<T> {
    fn drop(&mut self) {
        self.for_each(drop);
    }
}

impl<T> IntoIterator for ArrayList<T> {
    type Item = T;
    type IntoIter = IntoIter<T>;

    /// Creates a consuming iterator, that is, one that moves each value out
    /// of the list (from start to end).
    fn into_iter(self) -> IntoIter<T> {
        let end = self.len;
        let buf = unsafe { core::ptr::addr_of!(self.buf).read() };
        core::mem::forget(self);

        IntoIter { buf, start: 0, end }
    }
}

impl<'a, T> IntoIterator for &'a ArrayList<T> {
    type Item = &'a T;
    type IntoIter = core::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.as_slice().iter()
    }
}

impl<'a, T> IntoIterator for &'a mut ArrayList<T> {
    type Item = &'a mut T;
    type IntoIter = core::slice::IterMut<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.as_mut_slice().iter_mut()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::*;
    use alloc::borrow::ToOwned;
    use alloc::string::ToString;

    #[test]
    fn matches_reference_model() {
        use rand::{rngs::SmallRng, Rng, RngCore, SeedableRng};

        let mut rng = SmallRng::from_seed(crate::test_utils::RNG_SEED);
        let mut list = ArrayList::new();
        let mut model: Vec<u32> = Vec::new();

        for step in 0..4096 {
            match rng.next_u32() % 6 {
                0 | 1 => {
                    let x = rng.next_u32();
                    list.push(x);
                    model.push(x);
                }
                2 => {
                    let x = rng.next_u32();
                    let at = rng.gen_range(0..=model.len());
                    list.insert(at, x);
                    model.insert(at, x);
                }
                3 => {
                    if !model.is_empty() {
                        let at = rng.gen_range(0..model.len());
                        assert_eq!(list.remove(at), model.remove(at));
                    }
                }
                4 => {
                    if !model.is_empty() {
                        let x = rng.next_u32();
                        let at = rng.gen_range(0..model.len());
                        let old = core::mem::replace(&mut model[at], x);
                        assert_eq!(list.replace(at, x), old);
                    }
                }
                _ => {
                    assert_eq!(list.pop(), model.pop());
                }
            }

            assert_eq!(list.len(), model.len());
            if step % 64 == 0 {
                assert_eq!(list, model.as_slice());
            }
        }

        assert_eq!(list, model.as_slice());
    }

    #[test]
    fn growth_preserves_contents() {
        let mut list = ArrayList::new();
        assert_eq!(list.capacity(), 16);

        for i in 0..1000u32 {
            list.push(i);
        }

        assert_eq!(list.len(), 1000);
        assert!(list.capacity() >= 1000);
        for i in 0..1000usize {
            assert_eq!(list.get(i), Some(&(i as u32)));
        }
    }

    #[test]
    fn growth_follows_doubling_policy() {
        let mut list = ArrayList::with_capacity(0);
        let mut observed = Vec::new();
        for i in 0..40u32 {
            list.push(i);
            observed.push(list.capacity());
        }

        assert_eq!(observed[0], 1);
        assert_eq!(observed[2], 3);
        assert_eq!(observed[6], 7);
        assert_eq!(observed[14], 15);
        assert_eq!(observed[30], 31);
        assert_eq!(list.capacity(), 63);
        assert_eq!(list.len(), 40);
    }

    #[test]
    fn insertion_and_removal_shift_the_suffix() {
        let mut list = ArrayList::from([1, 2, 4, 5]);
        list.insert(2, 3);
        assert_eq!(list, [1, 2, 3, 4, 5]);

        list.insert(0, 0);
        assert_eq!(list, [0, 1, 2, 3, 4, 5]);

        list.insert(6, 6);
        assert_eq!(list, [0, 1, 2, 3, 4, 5, 6]);

        assert_eq!(list.remove(0), 0);
        assert_eq!(list.remove(5), 6);
        assert_eq!(list.remove(2), 3);
        assert_eq!(list, [1, 2, 4, 5]);
    }

    #[test]
    fn owned_elements_move_correctly() {
        let mut list = ArrayList::new();
        list.push("alpha".to_string());
        list.push("gamma".to_string());
        list.insert(1, "beta".to_string());

        assert_eq!(list.remove(0), "alpha");
        assert_eq!(list, ["beta", "gamma"]);
    }

    #[test]
    #[should_panic]
    fn insertion_index_is_checked() {
        let mut list = ArrayList::from([1, 2, 3]);
        list.insert(4, 7);
    }

    #[test]
    #[should_panic]
    fn removal_index_is_checked() {
        let mut list = ArrayList::from([1, 2, 3]);
        let _ = list.remove(3);
    }

    #[test]
    #[should_panic]
    fn replacement_index_is_checked() {
        let mut list = ArrayList::from([1, 2, 3]);
        let _ = list.replace(3, 7);
    }

    #[test]
    #[should_panic]
    fn indexing_is_checked() {
        let list = ArrayList::from([1, 2, 3]);
        let _ = list[3];
    }

    #[test]
    fn popping_an_empty_list_yields_nothing() {
        let mut list = ArrayList::<u32>::new();
        assert_eq!(list.pop(), None);
        list.push(7);
        assert_eq!(list.pop(), Some(7));
        assert_eq!(list.pop(), None);
    }

    #[test]
    fn linear_scans_find_values() {
        let list = ArrayList::from([3, 1, 4, 1, 5]);
        assert_eq!(list.index_of(&1), Some(1));
        assert_eq!(list.last_index_of(&1), Some(3));
        assert_eq!(list.index_of(&9), None);
        assert!(list.contains(&4));
        assert!(!list.contains(&9));
        assert!(list.contains_all(&[1, 3, 5]));
        assert!(!list.contains_all(&[1, 9]));

        for _ in 0..3 {
            assert_eq!(list.index_of(&1), Some(1));
            assert_eq!(list.last_index_of(&1), Some(3));
            assert_eq!(list.len(), 5);
        }
    }

    #[test]
    fn removal_by_value_takes_first_occurrence() {
        let mut list = ArrayList::from([3, 1, 4, 1, 5]);
        assert_eq!(list.remove_value(&1), Some(1));
        assert_eq!(list, [3, 4, 1, 5]);
        assert_eq!(list.remove_value(&9), None);
        assert_eq!(list, [3, 4, 1, 5]);
    }

    #[test]
    fn bulk_insertion_opens_one_gap() {
        let mut list = ArrayList::from(["a", "c"]);
        list.insert_slice(1, &["b"]);
        assert_eq!(list, ["a", "b", "c"]);

        let mut list = ArrayList::from([0u32, 1, 8, 9]);
        list.insert_slice(2, &[2, 3, 4, 5, 6, 7]);
        assert_eq!(list, [0, 1, 2, 3, 4, 5, 6, 7, 8, 9]);

        list.insert_slice(10, &[10, 11]);
        assert_eq!(list.len(), 12);
        assert_eq!(list[11], 11);

        list.insert_slice(0, &[99]);
        assert_eq!(list[0], 99);
    }

    #[test]
    #[should_panic]
    fn bulk_insertion_index_is_checked() {
        let mut list = ArrayList::from([1, 2]);
        list.insert_slice(3, &[7]);
    }

    #[test]
    fn empty_bulk_insertion_is_not_a_structural_change() {
        let mut list = ArrayList::from([1, 2, 3]);
        let mut scan = list.scan();

        list.insert_slice(1, &[]);
        list.extend_from_slice(&[]);
        list.extend(core::iter::empty::<i32>());

        assert_eq!(scan.next(&list), Ok(&1));
    }

    #[test]
    fn bulk_removal_touches_every_occurrence() {
        let mut list = ArrayList::from([1, 2, 1, 3, 1, 4]);
        assert!(list.remove_all(&[1, 9]));
        assert_eq!(list, [2, 3, 4]);
        assert!(!list.remove_all(&[1, 9]));

        let mut list = ArrayList::from([1, 2, 1, 3, 1, 4]);
        assert!(list.retain_all(&[1, 4]));
        assert_eq!(list, [1, 1, 1, 4]);
        assert!(!list.retain_all(&[1, 4]));
    }

    #[test]
    fn retaining_visits_in_order() {
        let mut list = ArrayList::from([1u32, 2, 3, 4, 5, 6]);
        let mut seen = Vec::new();
        list.retain(|&x| {
            seen.push(x);
            x % 2 == 0
        });

        assert_eq!(list, [2, 4, 6]);
        assert_eq!(seen, [1, 2, 3, 4, 5, 6]);
    }

    #[test]
    fn range_copies_are_independent() {
        let mut list = ArrayList::from([0, 1, 2, 3, 4]);
        let copy = list.copy_range(1..4);
        assert_eq!(copy, [1, 2, 3]);
        assert_eq!(copy.len(), 3);

        list.replace(2, 99);
        list.push(5);
        assert_eq!(copy, [1, 2, 3]);

        assert_eq!(list.copy_range(..), list);
        assert_eq!(list.copy_range(2..=3), [99, 3]);
        assert!(list.copy_range(3..3).is_empty());
    }

    #[test]
    #[should_panic]
    fn range_copy_rejects_inverted_ranges() {
        let list = ArrayList::from([1, 2, 3]);
        let _ = list.copy_range(2..1);
    }

    #[test]
    #[should_panic]
    fn range_copy_is_bounds_checked() {
        let list = ArrayList::from([1, 2, 3]);
        let _ = list.copy_range(1..4);
    }

    #[test]
    #[should_panic]
    fn range_copy_rejects_inclusive_ends_at_usize_max() {
        let list = ArrayList::from([1, 2, 3]);
        let _ = list.copy_range(0..=usize::MAX);
    }

    #[test]
    fn conversion_round_trips() {
        let list = ArrayList::from([5u32, 6, 7]);
        let vec = list.to_vec();
        assert_eq!(vec, [5, 6, 7]);

        let rebuilt = ArrayList::from(vec.as_slice());
        assert_eq!(rebuilt, list);
        assert_eq!(rebuilt.capacity(), 3);

        let mut target = Vec::with_capacity(16);
        target.extend([0u32; 10]);
        list.as_slice().clone_into(&mut target);
        assert_eq!(target, [5, 6, 7]);
        assert!(target.capacity() >= 16);
    }

    #[test]
    fn construction_from_existing_collections() {
        let from_slice = ArrayList::from(&[1, 2, 3][..]);
        assert_eq!(from_slice.capacity(), 3);
        assert_eq!(from_slice, [1, 2, 3]);

        let from_array = ArrayList::from([4, 5, 6]);
        assert_eq!(from_array, [4, 5, 6]);

        let collected: ArrayList<u32> = (0..10u32).collect();
        assert_eq!(collected.len(), 10);
        assert_eq!(collected.capacity(), 10);

        let empty: ArrayList<u32> = ArrayList::from(&[][..]);
        assert_eq!(empty.capacity(), 0);

        let mut list = ArrayList::new();
        list.extend([1, 2]);
        list.extend(&[3, 4]);
        assert_eq!(list, [1, 2, 3, 4]);
    }

    #[test]
    fn clearing_resets_to_default_capacity() {
        let mut list = ArrayList::with_capacity(100);
        list.extend(0..60u32);
        assert_eq!(list.capacity(), 100);

        list.clear();
        assert!(list.is_empty());
        assert_eq!(list.capacity(), 16);

        list.push(1);
        assert_eq!(list, [1]);
    }

    #[test]
    fn truncation_keeps_the_prefix() {
        let mut list = ArrayList::from([1, 2, 3, 4, 5]);
        list.truncate(2);
        assert_eq!(list, [1, 2]);

        list.truncate(9);
        assert_eq!(list, [1, 2]);
    }

    #[test]
    fn reservation_grows_eagerly() {
        let mut list = ArrayList::with_capacity(4);
        list.extend([1, 2, 3]);
        list.reserve(1);
        assert_eq!(list.capacity(), 4);

        list.reserve(10);
        assert!(list.capacity() >= 13);
    }

    #[test]
    fn reads_do_not_invalidate_handles() {
        let mut list = ArrayList::from([1, 2, 3]);
        let mut scan = list.scan();

        assert_eq!(list.get(0), Some(&1));
        assert_eq!(list.index_of(&3), Some(2));
        let _ = list.to_vec();
        list.reserve(100);
        assert_eq!(list.remove_value(&9), None);
        assert!(!list.remove_all(&[9]));
        list.truncate(3);

        assert_eq!(scan.next(&list), Ok(&1));
    }

    #[test]
    fn comparisons_match_slice_semantics() {
        let a = ArrayList::from([1, 2, 3]);
        let b = ArrayList::from([1, 2, 4]);

        assert!(a < b);
        assert!(a != b);
        assert_eq!(a, [1, 2, 3]);
        assert_eq!(a, &[1, 2, 3][..]);
        assert_eq!(&[1, 2, 3][..], a);
        assert_eq!(a.clone().max(b.clone()), b);

        assert_eq!(alloc::format!("{:?}", a), "[1, 2, 3]");
    }

    #[test]
    fn operations_drop_elements_exactly_once() {
        let counter = DropCounter::new();

        let mut list = ArrayList::new();
        for i in 0..8 {
            list.push(counter.new_droppable(i));
        }
        assert_eq!(counter.dropped(), 0);

        drop(list.remove(3));
        assert_eq!(counter.dropped(), 1);

        drop(list.pop());
        assert_eq!(counter.dropped(), 2);

        drop(list.replace(0, counter.new_droppable(99)));
        assert_eq!(counter.dropped(), 3);

        list.truncate(4);
        assert_eq!(counter.dropped(), 5);

        list.clear();
        assert_eq!(counter.dropped(), 9);

        let mut list = ArrayList::new();
        for i in 0..4 {
            list.push(counter.new_droppable(i));
        }

        let mut iter = list.into_iter();
        assert_eq!(iter.next().unwrap().value, 0);
        assert_eq!(iter.next_back().unwrap().value, 3);
        assert_eq!(counter.dropped(), 11);
        drop(iter);
        assert_eq!(counter.dropped(), 13);

        let mut list = ArrayList::new();
        for i in 0..4 {
            list.push(counter.new_droppable(i));
        }
        drop(list);
        assert_eq!(counter.dropped(), 17);
    }

    #[test]
    fn retained_and_rejected_elements_drop_once() {
        let counter = DropCounter::new();
        let mut list = ArrayList::new();
        for i in 0..6 {
            list.push(counter.new_droppable(i));
        }

        list.retain(|d| d.value % 2 == 0);
        assert_eq!(counter.dropped(), 3);
        assert_eq!(list.len(), 3);

        drop(list);
        assert_eq!(counter.dropped(), 6);
    }

    #[test]
    fn zero_sized_elements_are_supported() {
        let mut list = ArrayList::new();
        for _ in 0..100 {
            list.push(());
        }
        assert_eq!(list.len(), 100);
        assert_eq!(list.get(99), Some(&()));

        list.insert(50, ());
        assert_eq!(list.remove(0), ());
        assert_eq!(list.len(), 100);

        assert_eq!(list.clone().into_iter().count(), 100);
    }
}
