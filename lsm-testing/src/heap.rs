// SPDX-License-Identifier: GPL-3.0-only

//! Heaps for exercising allocation accounting and failure paths

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use lsm_types::{AllocError, Heap, HeapLedger, Lease, RecordKind};

/// Never refuses; every grant lands on the ledger
#[derive(Debug, Clone)]
pub struct TrackingHeap {
    ledger: Arc<HeapLedger>,
}

impl TrackingHeap {
    pub fn new() -> Self {
        Self {
            ledger: HeapLedger::new(),
        }
    }

    pub fn ledger(&self) -> &Arc<HeapLedger> {
        &self.ledger
    }

    /// True once every lease issued by this heap has been dropped
    pub fn is_drained(&self) -> bool {
        self.ledger.live_allocations() == 0 && self.ledger.live_units() == 0
    }
}

impl Default for TrackingHeap {
    fn default() -> Self {
        Self::new()
    }
}

impl Heap for TrackingHeap {
    fn reserve(&self, _kind: RecordKind, units: usize) -> Result<Lease, AllocError> {
        Ok(Lease::tracked(&self.ledger, units))
    }
}

#[derive(Debug, Clone, Copy)]
enum Refusal {
    /// Grant this many reservations, then refuse everything
    After(usize),
    /// Refuse every reservation of one kind
    Kind(RecordKind),
    /// Refuse reservations of more than one unit
    Arrays,
}

/// Refuses reservations according to a fixed rule
#[derive(Debug)]
pub struct FailingHeap {
    refusal: Refusal,
    attempts: AtomicUsize,
    ledger: Arc<HeapLedger>,
}

impl FailingHeap {
    fn with(refusal: Refusal) -> Self {
        Self {
            refusal,
            attempts: AtomicUsize::new(0),
            ledger: HeapLedger::new(),
        }
    }

    /// Grant the first `granted` reservations only
    pub fn after(granted: usize) -> Self {
        Self::with(Refusal::After(granted))
    }

    pub fn refusing(kind: RecordKind) -> Self {
        Self::with(Refusal::Kind(kind))
    }

    /// Refuse multi-unit reservations (arrays and string lists of two or
    /// more slots); single records still succeed
    pub fn arrays() -> Self {
        Self::with(Refusal::Arrays)
    }

    pub fn ledger(&self) -> &Arc<HeapLedger> {
        &self.ledger
    }

    /// Reservations attempted so far, granted or not
    pub fn attempts(&self) -> usize {
        self.attempts.load(Ordering::Acquire)
    }
}

impl Heap for FailingHeap {
    fn reserve(&self, kind: RecordKind, units: usize) -> Result<Lease, AllocError> {
        let attempt = self.attempts.fetch_add(1, Ordering::AcqRel);
        let refuse = match self.refusal {
            Refusal::After(granted) => attempt >= granted,
            Refusal::Kind(refused) => kind == refused,
            Refusal::Arrays => units > 1,
        };
        if refuse {
            return Err(AllocError::Refused { kind });
        }
        Ok(Lease::tracked(&self.ledger, units))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tracking_heap_drains() {
        let heap = TrackingHeap::new();
        let lease = heap.reserve(RecordKind::Volume, 3).unwrap();
        assert!(!heap.is_drained());
        assert_eq!(heap.ledger().live_units(), 3);
        drop(lease);
        assert!(heap.is_drained());
    }

    #[test]
    fn failing_heap_after_count() {
        let heap = FailingHeap::after(2);
        let first = heap.reserve(RecordKind::Disk, 1).unwrap();
        let second = heap.reserve(RecordKind::Disk, 1).unwrap();
        assert!(heap.reserve(RecordKind::Disk, 1).is_err());
        assert_eq!(heap.attempts(), 3);
        assert_eq!(heap.ledger().allocations(), 2);
        drop((first, second));
        assert_eq!(heap.ledger().live_allocations(), 0);
    }

    #[test]
    fn failing_heap_by_kind_and_size() {
        let heap = FailingHeap::refusing(RecordKind::StringList);
        assert!(heap.reserve(RecordKind::StringList, 1).is_err());
        assert!(heap.reserve(RecordKind::Volume, 4).is_ok());

        let heap = FailingHeap::arrays();
        assert!(heap.reserve(RecordKind::Pool, 1).is_ok());
        let err = heap.reserve(RecordKind::Pool, 2).unwrap_err();
        assert_eq!(err.kind(), RecordKind::Pool);
    }
}
