// SPDX-License-Identifier: GPL-3.0-only

//! Heap abstraction backing every native allocation
//!
//! A [`Heap`] hands out a [`Lease`] per allocation. The lease travels with the
//! record or array it was issued for and returns its units when dropped, which
//! is how rollback on a failed batch becomes observable through a
//! [`HeapLedger`].

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use crate::{AllocError, RecordKind};

/// Source of native allocations
pub trait Heap: Send + Sync {
    /// Reserve `units` for a single allocation of `kind`.
    ///
    /// Records reserve [`crate::Record::units`]; arrays and string lists take
    /// one unit per slot.
    fn reserve(&self, kind: RecordKind, units: usize) -> Result<Lease, AllocError>;
}

/// Allocation counters shared between a heap and the leases it issued
#[derive(Debug, Default)]
pub struct HeapLedger {
    allocations: AtomicUsize,
    releases: AtomicUsize,
    live_units: AtomicUsize,
}

impl HeapLedger {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    /// Number of allocations ever granted
    pub fn allocations(&self) -> usize {
        self.allocations.load(Ordering::Acquire)
    }

    /// Number of allocations returned
    pub fn releases(&self) -> usize {
        self.releases.load(Ordering::Acquire)
    }

    /// Allocations granted and not yet returned
    pub fn live_allocations(&self) -> usize {
        self.allocations().saturating_sub(self.releases())
    }

    pub fn live_units(&self) -> usize {
        self.live_units.load(Ordering::Acquire)
    }

    fn grant(&self, units: usize) {
        self.allocations.fetch_add(1, Ordering::AcqRel);
        self.live_units.fetch_add(units, Ordering::AcqRel);
    }

    /// Grant `units` only if the live total stays within `budget`.
    /// Returns the units that were available on refusal.
    fn try_grant(&self, units: usize, budget: usize) -> Result<(), usize> {
        let mut live = self.live_units.load(Ordering::Acquire);
        loop {
            let available = budget.saturating_sub(live);
            if units > available {
                return Err(available);
            }
            match self.live_units.compare_exchange_weak(
                live,
                live + units,
                Ordering::AcqRel,
                Ordering::Acquire,
            ) {
                Ok(_) => {
                    self.allocations.fetch_add(1, Ordering::AcqRel);
                    return Ok(());
                }
                Err(current) => live = current,
            }
        }
    }

    fn release(&self, units: usize) {
        self.live_units.fetch_sub(units, Ordering::AcqRel);
        self.releases.fetch_add(1, Ordering::AcqRel);
    }
}

/// Accounting token for one allocation; returns its units on drop
#[derive(Debug)]
pub struct Lease {
    units: usize,
    ledger: Option<Arc<HeapLedger>>,
}

impl Lease {
    /// Lease that is not reported to any ledger
    pub fn untracked(units: usize) -> Self {
        Self {
            units,
            ledger: None,
        }
    }

    /// Record a new allocation of `units` on `ledger`
    pub fn tracked(ledger: &Arc<HeapLedger>, units: usize) -> Self {
        ledger.grant(units);
        Self {
            units,
            ledger: Some(Arc::clone(ledger)),
        }
    }

    /// Record a new allocation only if it fits inside `budget`
    pub fn bounded(
        ledger: &Arc<HeapLedger>,
        kind: RecordKind,
        units: usize,
        budget: usize,
    ) -> Result<Self, AllocError> {
        ledger
            .try_grant(units, budget)
            .map_err(|available| AllocError::Exhausted {
                kind,
                requested: units,
                available,
            })?;
        Ok(Self {
            units,
            ledger: Some(Arc::clone(ledger)),
        })
    }

    pub fn units(&self) -> usize {
        self.units
    }
}

impl Drop for Lease {
    fn drop(&mut self) {
        if let Some(ledger) = self.ledger.take() {
            ledger.release(self.units);
        }
    }
}

/// Process heap; never refuses a reservation
///
/// Array storage is still obtained with a fallible reserve by
/// [`crate::NativeArray::alloc`], so real exhaustion surfaces as
/// [`AllocError::Refused`].
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemHeap;

impl Heap for SystemHeap {
    fn reserve(&self, _kind: RecordKind, units: usize) -> Result<Lease, AllocError> {
        Ok(Lease::untracked(units))
    }
}

/// Heap with a fixed unit budget
///
/// Reservations fail with [`AllocError::Exhausted`] once live units would
/// exceed the budget. Units come back as leases are dropped.
#[derive(Debug, Clone)]
pub struct BoundedHeap {
    budget: usize,
    ledger: Arc<HeapLedger>,
}

impl BoundedHeap {
    pub fn new(budget: usize) -> Self {
        Self {
            budget,
            ledger: HeapLedger::new(),
        }
    }

    pub fn budget(&self) -> usize {
        self.budget
    }

    pub fn ledger(&self) -> &Arc<HeapLedger> {
        &self.ledger
    }
}

impl Heap for BoundedHeap {
    fn reserve(&self, kind: RecordKind, units: usize) -> Result<Lease, AllocError> {
        Lease::bounded(&self.ledger, kind, units, self.budget)
    }
}
