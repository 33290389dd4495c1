// SPDX-License-Identifier: GPL-3.0-only

//! Shared test support for the lsm crates

pub mod cases;
pub mod errors;
pub mod fixtures;
pub mod heap;

pub use heap::{FailingHeap, TrackingHeap};
