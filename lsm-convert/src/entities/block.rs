// SPDX-License-Identifier: GPL-3.0-only

//! Volumes, disks, pools and block ranges

use lsm_types::{BlockRange, Disk, DiskType, Heap, Native, Pool, Volume};
use serde_json::{Map, Value};
use tracing::debug;

use crate::nested::{optional_data_to_value, value_to_optional_data};
use crate::value::{FieldError, ValueExt};
use crate::wire::{WireRecord, allocate, put, record_to_value, value_to_record};

const OPTIONAL_DATA: &str = "optional_data";

impl WireRecord for Volume {
    fn decode(heap: &dyn Heap, value: &Value) -> Result<Option<Native<Self>>, FieldError> {
        let volume = Volume::new(
            value.str_field("id")?,
            value.str_field("name")?,
            value.str_field("vpd83")?,
            value.u64_field("block_size")?,
            value.u64_field("num_of_blocks")?,
            value.u32_field("status")?,
            value.str_field("system_id")?,
            value.str_field("pool_id")?,
        );
        Ok(allocate(heap, volume))
    }

    fn encode(&self, fields: &mut Map<String, Value>) {
        put(fields, "id", self.id.as_str());
        put(fields, "name", self.name.as_str());
        put(fields, "vpd83", self.vpd83.as_str());
        put(fields, "block_size", self.block_size);
        put(fields, "num_of_blocks", self.num_of_blocks);
        put(fields, "status", self.status);
        put(fields, "system_id", self.system_id.as_str());
        put(fields, "pool_id", self.pool_id.as_str());
    }
}

impl WireRecord for Disk {
    fn decode(heap: &dyn Heap, value: &Value) -> Result<Option<Native<Self>>, FieldError> {
        // Metadata first; the record takes its own copy and ours is dropped
        // once the allocation returns.
        let optional_data = match value.get(OPTIONAL_DATA) {
            None | Some(Value::Null) => None,
            Some(nested) => match value_to_optional_data(heap, nested)? {
                Some(data) => Some(data),
                None => {
                    debug!("disk optional data rejected");
                    return Ok(None);
                }
            },
        };

        let disk = Disk::new(
            value.str_field("id")?,
            value.str_field("name")?,
            DiskType::from_code(value.i32_field("disk_type")?),
            value.u64_field("block_size")?,
            value.u64_field("num_of_blocks")?,
            value.u64_field("status")?,
            optional_data.as_deref(),
            value.str_field("system_id")?,
        );
        Ok(allocate(heap, disk))
    }

    fn encode(&self, fields: &mut Map<String, Value>) {
        put(fields, "id", self.id.as_str());
        put(fields, "name", self.name.as_str());
        put(fields, "disk_type", self.disk_type.code());
        put(fields, "block_size", self.block_size);
        put(fields, "num_of_blocks", self.num_of_blocks);
        put(fields, "status", self.status);
        put(fields, "system_id", self.system_id.as_str());
        if let Some(data) = &self.optional_data {
            put(fields, OPTIONAL_DATA, optional_data_to_value(data));
        }
    }
}

impl WireRecord for Pool {
    fn decode(heap: &dyn Heap, value: &Value) -> Result<Option<Native<Self>>, FieldError> {
        let pool = Pool::new(
            value.str_field("id")?,
            value.str_field("name")?,
            value.u64_field("total_space")?,
            value.u64_field("free_space")?,
            value.u64_field("status")?,
            value.str_field("status_info")?,
            value.str_field("system_id")?,
        );
        Ok(allocate(heap, pool))
    }

    fn encode(&self, fields: &mut Map<String, Value>) {
        put(fields, "id", self.id.as_str());
        put(fields, "name", self.name.as_str());
        put(fields, "total_space", self.total_space);
        put(fields, "free_space", self.free_space);
        put(fields, "status", self.status);
        put(fields, "status_info", self.status_info.as_str());
        put(fields, "system_id", self.system_id.as_str());
    }
}

impl WireRecord for BlockRange {
    fn decode(heap: &dyn Heap, value: &Value) -> Result<Option<Native<Self>>, FieldError> {
        let range = BlockRange::new(
            value.u64_field("src_block")?,
            value.u64_field("dest_block")?,
            value.u64_field("block_count")?,
        );
        Ok(allocate(heap, range))
    }

    fn encode(&self, fields: &mut Map<String, Value>) {
        put(fields, "src_block", self.src_block);
        put(fields, "dest_block", self.dest_block);
        put(fields, "block_count", self.block_count);
    }
}

pub fn value_to_volume(heap: &dyn Heap, value: &Value) -> Result<Option<Native<Volume>>, FieldError> {
    value_to_record(heap, value)
}

pub fn volume_to_value(volume: &Volume) -> Value {
    record_to_value(volume)
}

pub fn value_to_disk(heap: &dyn Heap, value: &Value) -> Result<Option<Native<Disk>>, FieldError> {
    value_to_record(heap, value)
}

pub fn disk_to_value(disk: &Disk) -> Value {
    record_to_value(disk)
}

pub fn value_to_pool(heap: &dyn Heap, value: &Value) -> Result<Option<Native<Pool>>, FieldError> {
    value_to_record(heap, value)
}

pub fn pool_to_value(pool: &Pool) -> Value {
    record_to_value(pool)
}

pub fn value_to_block_range(
    heap: &dyn Heap,
    value: &Value,
) -> Result<Option<Native<BlockRange>>, FieldError> {
    value_to_record(heap, value)
}

pub fn block_range_to_value(range: &BlockRange) -> Value {
    record_to_value(range)
}
