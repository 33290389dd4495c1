// SPDX-License-Identifier: GPL-3.0-only

//! Heap-owned records and record arrays
//!
//! Dropping a [`Native`] frees the record; dropping a [`NativeArray`] frees the
//! array and every record placed in it.

use std::fmt;
use std::ops::{Deref, DerefMut};

use crate::{AllocError, Heap, Lease, Record};

/// A single record allocated on a [`Heap`]
pub struct Native<T> {
    record: Box<T>,
    lease: Lease,
}

impl<T: Record> Native<T> {
    /// Allocate `record` on `heap`, taking ownership of it
    pub fn alloc(heap: &dyn Heap, record: T) -> Result<Self, AllocError> {
        let lease = heap.reserve(T::KIND, record.units())?;
        Ok(Self {
            record: Box::new(record),
            lease,
        })
    }
}

impl<T> Native<T> {
    /// Move the record off the heap
    pub fn into_inner(self) -> T {
        *self.record
    }

    pub fn lease(&self) -> &Lease {
        &self.lease
    }
}

impl<T> Deref for Native<T> {
    type Target = T;

    fn deref(&self) -> &T {
        &self.record
    }
}

impl<T> DerefMut for Native<T> {
    fn deref_mut(&mut self) -> &mut T {
        &mut self.record
    }
}

impl<T> AsRef<T> for Native<T> {
    fn as_ref(&self) -> &T {
        &self.record
    }
}

impl<T: fmt::Debug> fmt::Debug for Native<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.record.fmt(f)
    }
}

impl<T: PartialEq> PartialEq for Native<T> {
    fn eq(&self, other: &Self) -> bool {
        self.record == other.record
    }
}

impl<T: PartialEq> PartialEq<T> for Native<T> {
    fn eq(&self, other: &T) -> bool {
        *self.record == *other
    }
}

/// Fixed-capacity array of records allocated on a [`Heap`]
///
/// Slots are filled in order with [`NativeArray::push`]. The array is never
/// handed out half filled by the converters; a failed batch simply drops it.
pub struct NativeArray<T> {
    slots: Vec<Native<T>>,
    capacity: usize,
    lease: Lease,
}

impl<T: Record> NativeArray<T> {
    /// Allocate an empty array with room for `len` records
    pub fn alloc(heap: &dyn Heap, len: usize) -> Result<Self, AllocError> {
        let lease = heap.reserve(T::KIND, len)?;
        let mut slots = Vec::new();
        slots
            .try_reserve_exact(len)
            .map_err(|_| AllocError::Refused { kind: T::KIND })?;
        Ok(Self {
            slots,
            capacity: len,
            lease,
        })
    }
}

impl<T> NativeArray<T> {
    /// Place `record` in the next free slot.
    ///
    /// Hands the record back when every slot is already taken.
    pub fn push(&mut self, record: Native<T>) -> Result<(), Native<T>> {
        if self.slots.len() >= self.capacity {
            return Err(record);
        }
        self.slots.push(record);
        Ok(())
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn is_full(&self) -> bool {
        self.slots.len() == self.capacity
    }

    pub fn as_slice(&self) -> &[Native<T>] {
        &self.slots
    }

    /// Free the array storage, keeping the records
    pub fn into_vec(self) -> Vec<Native<T>> {
        self.slots
    }

    pub fn lease(&self) -> &Lease {
        &self.lease
    }
}

impl<T> Deref for NativeArray<T> {
    type Target = [Native<T>];

    fn deref(&self) -> &[Native<T>] {
        &self.slots
    }
}

impl<'a, T> IntoIterator for &'a NativeArray<T> {
    type Item = &'a Native<T>;
    type IntoIter = std::slice::Iter<'a, Native<T>>;

    fn into_iter(self) -> Self::IntoIter {
        self.slots.iter()
    }
}

impl<T: fmt::Debug> fmt::Debug for NativeArray<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.slots.iter()).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{BlockRange, BoundedHeap, StringList, SystemHeap};

    #[test]
    fn test_native_alloc_counts_one_unit() {
        let heap = BoundedHeap::new(8);
        let range = Native::alloc(&heap, BlockRange::new(0, 100, 10)).unwrap();
        assert_eq!(heap.ledger().live_units(), 1);
        assert_eq!(range.block_count, 10);

        let inner = range.into_inner();
        assert_eq!(inner, BlockRange::new(0, 100, 10));
        assert_eq!(heap.ledger().live_units(), 0);
    }

    #[test]
    fn test_string_list_reserves_per_slot() {
        let heap = BoundedHeap::new(4);
        let list = Native::alloc(&heap, StringList::with_size(3)).unwrap();
        assert_eq!(heap.ledger().live_units(), 3);

        let err = Native::alloc(&heap, StringList::with_size(2)).unwrap_err();
        assert!(matches!(err, AllocError::Exhausted { requested: 2, available: 1, .. }));

        let empty = Native::alloc(&heap, StringList::with_size(0)).unwrap();
        assert_eq!(heap.ledger().live_units(), 4);
        drop((list, empty));
        assert_eq!(heap.ledger().live_units(), 0);
    }

    #[test]
    fn test_array_drop_frees_placed_records() {
        let heap = BoundedHeap::new(16);
        let mut array = NativeArray::<BlockRange>::alloc(&heap, 3).unwrap();
        for i in 0..3 {
            let range = Native::alloc(&heap, BlockRange::new(i, i + 1, 1)).unwrap();
            array.push(range).unwrap();
        }
        assert!(array.is_full());
        assert_eq!(heap.ledger().live_allocations(), 4);

        drop(array);
        assert_eq!(heap.ledger().live_allocations(), 0);
        assert_eq!(heap.ledger().live_units(), 0);
    }

    #[test]
    fn test_push_past_capacity_returns_record() {
        let mut array = NativeArray::<BlockRange>::alloc(&SystemHeap, 1).unwrap();
        array
            .push(Native::alloc(&SystemHeap, BlockRange::new(1, 2, 3)).unwrap())
            .unwrap();
        let rejected = array
            .push(Native::alloc(&SystemHeap, BlockRange::new(4, 5, 6)).unwrap())
            .unwrap_err();
        assert_eq!(rejected.src_block, 4);
        assert_eq!(array.len(), 1);
    }

    #[test]
    fn test_array_alloc_over_budget() {
        let heap = BoundedHeap::new(2);
        let err = NativeArray::<BlockRange>::alloc(&heap, 3).unwrap_err();
        assert!(matches!(err, AllocError::Exhausted { requested: 3, .. }));
        assert_eq!(heap.ledger().allocations(), 0);
    }
}
