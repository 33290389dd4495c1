// SPDX-License-Identifier: GPL-3.0-only

//! Per-entity converters
//!
//! Each entity gets a `value_to_<entity>` / `<entity>_to_value` pair built on
//! [`crate::wire::WireRecord`].

pub mod access;
pub mod block;
pub mod fs;
pub mod system;

pub use access::{access_group_to_value, initiator_to_value, value_to_access_group, value_to_initiator};
pub use block::{
    block_range_to_value, disk_to_value, pool_to_value, value_to_block_range, value_to_disk,
    value_to_pool, value_to_volume, volume_to_value,
};
pub use fs::{
    fs_to_value, nfs_export_to_value, snapshot_to_value, value_to_fs, value_to_nfs_export,
    value_to_snapshot,
};
pub use system::{capabilities_to_value, system_to_value, value_to_capabilities, value_to_system};
