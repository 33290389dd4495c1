// SPDX-License-Identifier: GPL-3.0-only

//! Array-of-entity conversion with all-or-nothing semantics
//!
//! Inbound converters return `Ok(None)` for a non-array or empty input,
//! `Ok(Some(array))` with exactly one record per input element, or an error
//! with every record of the batch already released. A returned array is never
//! empty, so a zero count and an absent array always go together.

use lsm_types::{
    AccessGroup, BlockRange, Disk, FileSystem, FsSnapshot, Heap, Initiator, Native, NativeArray,
    NfsExport, Pool, System, Volume,
};
use serde_json::Value;
use tracing::{debug, warn};

use crate::error::{ConvertError, Result};
use crate::wire::{WireRecord, record_to_value, value_to_record};

/// Convert a wire array into a native record array
pub fn value_array_to_records<T: WireRecord>(
    heap: &dyn Heap,
    value: &Value,
) -> Result<Option<NativeArray<T>>> {
    let Some(items) = value.as_array() else {
        return Ok(None);
    };
    if items.is_empty() {
        return Ok(None);
    }

    let class = T::KIND.class_name();
    let mut records = NativeArray::<T>::alloc(heap, items.len()).map_err(|error| {
        warn!(class, len = items.len(), %error, "record array allocation failed");
        ConvertError::NoMemory(error)
    })?;

    // Returning early drops `records` and every record already placed in it.
    for (index, item) in items.iter().enumerate() {
        let record = match value_to_record::<T>(heap, item) {
            Ok(Some(record)) => record,
            Ok(None) => {
                warn!(class, index, placed = records.len(), "rolling back record array");
                return Err(ConvertError::Rejected { index, class });
            }
            Err(source) => {
                warn!(class, index, placed = records.len(), error = %source, "rolling back record array");
                return Err(ConvertError::Field { index, source });
            }
        };
        if records.push(record).is_err() {
            return Err(ConvertError::Rejected { index, class });
        }
    }

    debug!(class, count = records.len(), "converted record array");
    Ok(Some(records))
}

/// Encode records in order; invalid entries become `null`
pub fn records_to_value<T: WireRecord>(records: &[Native<T>]) -> Value {
    Value::Array(
        records
            .iter()
            .map(|record| record_to_value::<T>(record))
            .collect(),
    )
}

pub fn value_array_to_volumes(heap: &dyn Heap, value: &Value) -> Result<Option<NativeArray<Volume>>> {
    value_array_to_records(heap, value)
}

pub fn volumes_to_value(volumes: &[Native<Volume>]) -> Value {
    records_to_value(volumes)
}

pub fn value_array_to_disks(heap: &dyn Heap, value: &Value) -> Result<Option<NativeArray<Disk>>> {
    value_array_to_records(heap, value)
}

pub fn disks_to_value(disks: &[Native<Disk>]) -> Value {
    records_to_value(disks)
}

pub fn value_array_to_pools(heap: &dyn Heap, value: &Value) -> Result<Option<NativeArray<Pool>>> {
    value_array_to_records(heap, value)
}

pub fn pools_to_value(pools: &[Native<Pool>]) -> Value {
    records_to_value(pools)
}

pub fn value_array_to_systems(heap: &dyn Heap, value: &Value) -> Result<Option<NativeArray<System>>> {
    value_array_to_records(heap, value)
}

pub fn systems_to_value(systems: &[Native<System>]) -> Value {
    records_to_value(systems)
}

pub fn value_array_to_initiators(
    heap: &dyn Heap,
    value: &Value,
) -> Result<Option<NativeArray<Initiator>>> {
    value_array_to_records(heap, value)
}

pub fn initiators_to_value(initiators: &[Native<Initiator>]) -> Value {
    records_to_value(initiators)
}

pub fn value_array_to_access_groups(
    heap: &dyn Heap,
    value: &Value,
) -> Result<Option<NativeArray<AccessGroup>>> {
    value_array_to_records(heap, value)
}

pub fn access_groups_to_value(groups: &[Native<AccessGroup>]) -> Value {
    records_to_value(groups)
}

pub fn value_array_to_filesystems(
    heap: &dyn Heap,
    value: &Value,
) -> Result<Option<NativeArray<FileSystem>>> {
    value_array_to_records(heap, value)
}

pub fn filesystems_to_value(filesystems: &[Native<FileSystem>]) -> Value {
    records_to_value(filesystems)
}

pub fn value_array_to_snapshots(
    heap: &dyn Heap,
    value: &Value,
) -> Result<Option<NativeArray<FsSnapshot>>> {
    value_array_to_records(heap, value)
}

pub fn snapshots_to_value(snapshots: &[Native<FsSnapshot>]) -> Value {
    records_to_value(snapshots)
}

pub fn value_array_to_nfs_exports(
    heap: &dyn Heap,
    value: &Value,
) -> Result<Option<NativeArray<NfsExport>>> {
    value_array_to_records(heap, value)
}

pub fn nfs_exports_to_value(exports: &[Native<NfsExport>]) -> Value {
    records_to_value(exports)
}

pub fn value_array_to_block_ranges(
    heap: &dyn Heap,
    value: &Value,
) -> Result<Option<NativeArray<BlockRange>>> {
    value_array_to_records(heap, value)
}

pub fn block_ranges_to_value(ranges: &[Native<BlockRange>]) -> Value {
    records_to_value(ranges)
}
