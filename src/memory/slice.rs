//! Aliasing slice views over shared storage
//!
//! [`SharedSlice`] models a growable sequence whose sub-views share storage
//! with their source. A view is three numbers over a shared backing vector:
//!
//! ```text
//! storage: [ 1 | 2 | 3 | 4 | 5 | 0 | 0 | 0 ]
//!                  ^offset
//!                  |<- len ->|
//!                  |<-- capacity ------->|
//! ```
//!
//! Writing through any view is observed by every other view over the same
//! region. Cloning a `SharedSlice` copies the view, never the elements.
//!
//! # Growth
//!
//! [`SharedSlice::append`] writes in place while `len < capacity`. Once the
//! capacity is used up it allocates fresh storage sized by
//! [`grown_capacity`] and the returned view stops aliasing the old one.

use super::value::{Address, Value};
use crate::errors::MemoryError;
use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;
use tracing::debug;

/// Capacity below which growth doubles
pub const GROWTH_THRESHOLD: usize = 256;

/// Compute the capacity of new storage when `needed` elements no longer fit
/// in `old`.
///
/// Small slices double. From [`GROWTH_THRESHOLD`] on, growth tapers towards
/// 1.25x so large slices do not over-allocate.
pub fn grown_capacity(old: usize, needed: usize) -> usize {
    let doubled = old.saturating_mul(2);
    if needed > doubled {
        return needed;
    }
    if old < GROWTH_THRESHOLD {
        return doubled;
    }
    let mut capacity = old;
    while capacity < needed {
        capacity += (capacity + 3 * GROWTH_THRESHOLD) / 4;
    }
    capacity
}

/// A view of `len` elements (and `capacity` reachable slots) into shared storage
#[derive(Debug)]
pub struct SharedSlice<T> {
    storage: Rc<RefCell<Vec<T>>>,
    offset: usize,
    len: usize,
    capacity: usize,
}

impl<T> Clone for SharedSlice<T> {
    fn clone(&self) -> Self {
        SharedSlice {
            storage: Rc::clone(&self.storage),
            offset: self.offset,
            len: self.len,
            capacity: self.capacity,
        }
    }
}

impl<T: Clone + Default> Default for SharedSlice<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Clone + Default> SharedSlice<T> {
    /// An empty view with no storage
    pub fn new() -> Self {
        SharedSlice {
            storage: Rc::new(RefCell::new(Vec::new())),
            offset: 0,
            len: 0,
            capacity: 0,
        }
    }

    /// Allocate zero-filled storage of `capacity` slots, `len` of them visible
    pub fn make(len: usize, capacity: usize) -> Result<Self, MemoryError> {
        if len > capacity {
            return Err(MemoryError::LenExceedsCapacity { len, capacity });
        }
        Ok(SharedSlice {
            storage: Rc::new(RefCell::new(vec![T::default(); capacity])),
            offset: 0,
            len,
            capacity,
        })
    }

    /// Take ownership of `items`; length and capacity both equal `items.len()`
    pub fn from_vec(items: Vec<T>) -> Self {
        let len = items.len();
        SharedSlice {
            storage: Rc::new(RefCell::new(items)),
            offset: 0,
            len,
            capacity: len,
        }
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Read the element at `index`
    pub fn get(&self, index: usize) -> Result<T, MemoryError> {
        self.check_index(index)?;
        Ok(self.storage.borrow()[self.offset + index].clone())
    }

    /// Overwrite the element at `index`; visible through every aliasing view
    pub fn set(&self, index: usize, value: T) -> Result<(), MemoryError> {
        self.check_index(index)?;
        self.storage.borrow_mut()[self.offset + index] = value;
        Ok(())
    }

    /// View `[low:high]` of this slice, sharing its storage.
    ///
    /// `high` may run past `len` up to `capacity`.
    pub fn reslice(&self, low: usize, high: usize) -> Result<Self, MemoryError> {
        if low > high || high > self.capacity {
            return Err(MemoryError::SliceBounds {
                low,
                high,
                capacity: self.capacity,
            });
        }
        Ok(SharedSlice {
            storage: Rc::clone(&self.storage),
            offset: self.offset + low,
            len: high - low,
            capacity: self.capacity - low,
        })
    }

    /// All but the last element
    pub fn truncate_last(&self) -> Result<Self, MemoryError> {
        let high = self
            .len
            .checked_sub(1)
            .ok_or(MemoryError::IndexOutOfRange { index: 0, len: 0 })?;
        self.reslice(0, high)
    }

    /// Append one element, returning the resulting view
    pub fn append(&self, value: T) -> Self {
        if self.len < self.capacity {
            self.storage.borrow_mut()[self.offset + self.len] = value;
            return SharedSlice {
                storage: Rc::clone(&self.storage),
                offset: self.offset,
                len: self.len + 1,
                capacity: self.capacity,
            };
        }

        let capacity = grown_capacity(self.capacity, self.len + 1);
        debug!(from = self.capacity, to = capacity, "slice storage reallocated");

        let mut data = Vec::with_capacity(capacity);
        data.extend_from_slice(&self.storage.borrow()[self.offset..self.offset + self.len]);
        data.push(value);
        data.resize(capacity, T::default());

        SharedSlice {
            storage: Rc::new(RefCell::new(data)),
            offset: 0,
            len: self.len + 1,
            capacity,
        }
    }

    /// Copy `min(self.len, src.len)` elements from `src`; returns the count
    pub fn copy_from(&self, src: &SharedSlice<T>) -> usize {
        let count = self.len.min(src.len);
        // Collect first: `src` may alias `self`
        let items: Vec<T> = src.storage.borrow()[src.offset..src.offset + count].to_vec();
        let mut storage = self.storage.borrow_mut();
        for (i, item) in items.into_iter().enumerate() {
            storage[self.offset + i] = item;
        }
        count
    }

    /// Remove the element at `index` by swapping in the last element.
    ///
    /// Order is not preserved. The returned view is one shorter.
    pub fn swap_remove(&self, index: usize) -> Result<Self, MemoryError> {
        self.check_index(index)?;
        let last = self.len - 1;
        self.storage
            .borrow_mut()
            .swap(self.offset + index, self.offset + last);
        self.reslice(0, last)
    }

    /// Copy the viewed elements out
    pub fn to_vec(&self) -> Vec<T> {
        self.storage.borrow()[self.offset..self.offset + self.len].to_vec()
    }

    /// Snapshot this view for the call stack
    pub fn to_value(&self) -> Value
    where
        T: Into<Value>,
    {
        Value::Slice {
            items: self.to_vec().into_iter().map(Into::into).collect(),
            capacity: self.capacity,
            storage: self.storage_id(),
        }
    }

    fn check_index(&self, index: usize) -> Result<(), MemoryError> {
        if index >= self.len {
            return Err(MemoryError::IndexOutOfRange {
                index,
                len: self.len,
            });
        }
        Ok(())
    }
}

impl<T> SharedSlice<T> {
    /// Whether both views read and write the same storage
    pub fn shares_storage_with(&self, other: &SharedSlice<T>) -> bool {
        Rc::ptr_eq(&self.storage, &other.storage)
    }

    /// Stable identifier of the backing storage
    pub fn storage_id(&self) -> Address {
        Rc::as_ptr(&self.storage) as usize as Address
    }
}

impl<T: Ord> SharedSlice<T> {
    /// Sort the viewed region in place
    pub fn sort(&self) {
        self.storage.borrow_mut()[self.offset..self.offset + self.len].sort();
    }
}

impl<T: fmt::Display> fmt::Display for SharedSlice<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let storage = self.storage.borrow();
        write!(f, "[")?;
        for (i, item) in storage[self.offset..self.offset + self.len].iter().enumerate() {
            if i > 0 {
                write!(f, " ")?;
            }
            write!(f, "{}", item)?;
        }
        write!(f, "]")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn window_writes_reach_the_source() {
        let scores = SharedSlice::from_vec(vec![1, 2, 3, 4, 5]);
        let window = scores.reslice(2, 4).unwrap();
        window.set(0, 999).unwrap();

        assert_eq!(scores.to_vec(), vec![1, 2, 999, 4, 5]);
        assert!(window.shares_storage_with(&scores));
        assert_eq!(window.len(), 2);
        assert_eq!(window.capacity(), 3);
    }

    #[test]
    fn reslice_within_capacity_exposes_zeroed_tail() {
        let scores: SharedSlice<i64> = SharedSlice::make(0, 10).unwrap();
        let scores = scores.reslice(0, 8).unwrap();
        scores.set(7, 9033).unwrap();
        assert_eq!(scores.to_string(), "[0 0 0 0 0 0 0 9033]");

        assert_eq!(
            scores.reslice(0, 11).unwrap_err(),
            MemoryError::SliceBounds {
                low: 0,
                high: 11,
                capacity: 10
            }
        );
        assert!(scores.reslice(3, 2).is_err());
    }

    #[test]
    fn index_past_len_fails_even_within_capacity() {
        let scores: SharedSlice<i64> = SharedSlice::make(0, 10).unwrap();
        assert_eq!(
            scores.set(0, 1).unwrap_err(),
            MemoryError::IndexOutOfRange { index: 0, len: 0 }
        );
        assert!(SharedSlice::<i64>::make(3, 2).is_err());
    }

    #[test]
    fn capacity_doubles_while_small() {
        let mut scores: SharedSlice<i64> = SharedSlice::make(0, 5).unwrap();
        let mut seen = vec![scores.capacity()];
        for i in 0..25 {
            scores = scores.append(i);
            if scores.capacity() != *seen.last().unwrap() {
                seen.push(scores.capacity());
            }
        }
        assert_eq!(seen, vec![5, 10, 20, 40]);
        assert_eq!(scores.len(), 25);
        assert_eq!(scores.get(24).unwrap(), 24);
    }

    #[test]
    fn growth_tapers_past_threshold() {
        assert_eq!(grown_capacity(0, 1), 1);
        assert_eq!(grown_capacity(4, 20), 20);
        assert_eq!(grown_capacity(128, 129), 256);
        assert_eq!(grown_capacity(512, 513), 512 + (512 + 768) / 4);
    }

    #[test]
    fn append_into_spare_capacity_aliases() {
        let base: SharedSlice<i64> = SharedSlice::make(3, 4).unwrap();
        let head = base.reslice(0, 2).unwrap();
        let grown = head.append(7);

        // Wrote into the slot base already sees
        assert_eq!(base.to_vec(), vec![0, 0, 7]);
        assert!(grown.shares_storage_with(&base));

        // Full: the next appends move to new storage
        let full = base.append(8);
        let moved = full.append(9);
        assert!(!moved.shares_storage_with(&base));
        moved.set(0, 100).unwrap();
        assert_eq!(base.get(0).unwrap(), 0);
    }

    #[test]
    fn append_to_filled_slice_keeps_zeroes() {
        let scores: SharedSlice<i64> = SharedSlice::make(5, 5).unwrap();
        let scores = scores.append(9332);
        assert_eq!(scores.to_string(), "[0 0 0 0 0 9332]");
    }

    #[test]
    fn swap_remove_and_truncate() {
        let scores = SharedSlice::from_vec(vec![1, 2, 3, 4, 5]);
        let removed = scores.swap_remove(2).unwrap();
        assert_eq!(removed.to_vec(), vec![1, 2, 5, 4]);

        let trimmed = SharedSlice::from_vec(vec![1, 2, 3, 4, 5]).truncate_last().unwrap();
        assert_eq!(trimmed.to_vec(), vec![1, 2, 3, 4]);

        assert!(SharedSlice::<i64>::new().truncate_last().is_err());
        assert!(SharedSlice::<i64>::new().swap_remove(0).is_err());
    }

    #[test]
    fn copy_from_copies_shortest_length() {
        let scores = SharedSlice::from_vec(vec![9, 3, 7, 1, 5, 8]);
        scores.sort();
        let worst: SharedSlice<i64> = SharedSlice::make(5, 5).unwrap();
        let copied = worst.copy_from(&scores.reslice(0, 3).unwrap());

        assert_eq!(copied, 3);
        assert_eq!(worst.to_vec(), vec![1, 3, 5, 0, 0]);
        assert!(!worst.shares_storage_with(&scores));
    }

    #[test]
    fn snapshot_value_keeps_capacity() {
        let scores: SharedSlice<i64> = SharedSlice::make(2, 6).unwrap();
        match scores.to_value() {
            Value::Slice {
                items, capacity, ..
            } => {
                assert_eq!(items, vec![Value::Int(0), Value::Int(0)]);
                assert_eq!(capacity, 6);
            }
            other => panic!("expected slice, got {:?}", other),
        }
    }
}
