// SPDX-License-Identifier: GPL-3.0-only

//! Native storage records exchanged with storage-management plugins
//!
//! This crate defines the strongly-typed side of the plugin boundary. Every
//! record is allocated through a [`Heap`], so callers can bound memory use and
//! observe, through a [`HeapLedger`], that nothing outlives a failed call.
//!
//! ## Layout
//!
//! - **Block**: [`Volume`], [`Disk`], [`Pool`], [`BlockRange`]
//! - **System**: [`System`], [`Capabilities`]
//! - **Access**: [`Initiator`], [`AccessGroup`]
//! - **Filesystem**: [`FileSystem`], [`FsSnapshot`], [`NfsExport`]
//! - **Nested**: [`StringList`], [`OptionalData`]
//!
//! Records built through their constructors carry the live magic tag of their
//! [`RecordKind`]; a `Default` record is zeroed and fails [`Record::is_valid`].

pub mod access;
pub mod block;
pub mod error;
pub mod fs;
pub mod heap;
pub mod native;
pub mod nested;
pub mod record;
pub mod system;

pub use access::{AccessGroup, Initiator, InitiatorType};
pub use block::{BlockRange, Disk, DiskType, Pool, Volume};
pub use error::{AllocError, RecordError};
pub use fs::{FileSystem, FsSnapshot, NfsExport};
pub use heap::{BoundedHeap, Heap, HeapLedger, Lease, SystemHeap};
pub use native::{Native, NativeArray};
pub use nested::{OptionalData, StringList};
pub use record::{Record, RecordKind};
pub use system::{Capabilities, System};
