// SPDX-License-Identifier: GPL-3.0-only

//! Filesystems, snapshots and NFS exports

use lsm_types::{FileSystem, FsSnapshot, Heap, Native, NfsExport, StringList};
use serde_json::{Map, Value};
use tracing::debug;

use crate::nested::{string_list_to_value, value_to_string_list};
use crate::value::{FieldError, ValueExt};
use crate::wire::{WireRecord, allocate, put, record_to_value, value_to_record};

impl WireRecord for FileSystem {
    fn decode(heap: &dyn Heap, value: &Value) -> Result<Option<Native<Self>>, FieldError> {
        let fs = FileSystem::new(
            value.str_field("id")?,
            value.str_field("name")?,
            value.u64_field("total_space")?,
            value.u64_field("free_space")?,
            value.str_field("pool_id")?,
            value.str_field("system_id")?,
        );
        Ok(allocate(heap, fs))
    }

    fn encode(&self, fields: &mut Map<String, Value>) {
        put(fields, "id", self.id.as_str());
        put(fields, "name", self.name.as_str());
        put(fields, "total_space", self.total_space);
        put(fields, "free_space", self.free_space);
        put(fields, "pool_id", self.pool_id.as_str());
        put(fields, "system_id", self.system_id.as_str());
    }
}

impl WireRecord for FsSnapshot {
    fn decode(heap: &dyn Heap, value: &Value) -> Result<Option<Native<Self>>, FieldError> {
        let snapshot = FsSnapshot::new(
            value.str_field("id")?,
            value.str_field("name")?,
            value.u64_field("ts")?,
        );
        Ok(allocate(heap, snapshot))
    }

    fn encode(&self, fields: &mut Map<String, Value>) {
        put(fields, "id", self.id.as_str());
        put(fields, "name", self.name.as_str());
        put(fields, "ts", self.ts);
    }
}

fn host_list(heap: &dyn Heap, value: &Value, name: &str) -> Option<Native<StringList>> {
    let list = value
        .get(name)
        .and_then(|list| value_to_string_list(heap, list));
    if list.is_none() {
        debug!(field = name, "export host list rejected");
    }
    list
}

impl WireRecord for NfsExport {
    fn decode(heap: &dyn Heap, value: &Value) -> Result<Option<Native<Self>>, FieldError> {
        // Any list already built is dropped on the early return.
        let Some(root) = host_list(heap, value, "root") else {
            return Ok(None);
        };
        let Some(rw) = host_list(heap, value, "rw") else {
            return Ok(None);
        };
        let Some(ro) = host_list(heap, value, "ro") else {
            return Ok(None);
        };

        let export = NfsExport::new(
            value.str_field("id")?,
            value.str_field("fs_id")?,
            value.str_field("export_path")?,
            value.str_field("auth")?,
            &root,
            &rw,
            &ro,
            value.u64_field("anonuid")?,
            value.u64_field("anongid")?,
            value.str_field("options")?,
        );
        Ok(allocate(heap, export))
    }

    fn encode(&self, fields: &mut Map<String, Value>) {
        put(fields, "id", self.id.as_str());
        put(fields, "fs_id", self.fs_id.as_str());
        put(fields, "export_path", self.export_path.as_str());
        put(fields, "auth", self.auth.as_str());
        put(fields, "root", string_list_to_value(&self.root));
        put(fields, "rw", string_list_to_value(&self.rw));
        put(fields, "ro", string_list_to_value(&self.ro));
        put(fields, "anonuid", self.anonuid);
        put(fields, "anongid", self.anongid);
        put(fields, "options", self.options.as_str());
    }
}

pub fn value_to_fs(heap: &dyn Heap, value: &Value) -> Result<Option<Native<FileSystem>>, FieldError> {
    value_to_record(heap, value)
}

pub fn fs_to_value(fs: &FileSystem) -> Value {
    record_to_value(fs)
}

pub fn value_to_snapshot(
    heap: &dyn Heap,
    value: &Value,
) -> Result<Option<Native<FsSnapshot>>, FieldError> {
    value_to_record(heap, value)
}

pub fn snapshot_to_value(snapshot: &FsSnapshot) -> Value {
    record_to_value(snapshot)
}

pub fn value_to_nfs_export(
    heap: &dyn Heap,
    value: &Value,
) -> Result<Option<Native<NfsExport>>, FieldError> {
    value_to_record(heap, value)
}

pub fn nfs_export_to_value(export: &NfsExport) -> Value {
    record_to_value(export)
}

#[cfg(test)]
mod tests {
    use super::*;
    use lsm_types::{BoundedHeap, SystemHeap};
    use serde_json::json;

    fn export_value() -> Value {
        json!({
            "class": "NfsExport",
            "id": "EXP_1",
            "fs_id": "FS_1",
            "export_path": "/mnt/export",
            "auth": "sys",
            "root": ["admin-host"],
            "rw": ["web-1", "web-2"],
            "ro": [],
            "anonuid": 65534,
            "anongid": 65534,
            "options": "no_subtree_check",
        })
    }

    #[test]
    fn test_filesystem_roundtrip() {
        let value = json!({
            "class": "FileSystem",
            "id": "FS_1",
            "name": "home",
            "total_space": 107374182400u64,
            "free_space": 53687091200u64,
            "pool_id": "POOL_1",
            "system_id": "SIM_01",
        });
        let fs = value_to_fs(&SystemHeap, &value).unwrap().unwrap();
        assert_eq!(fs.total_space, 107374182400);
        assert_eq!(fs_to_value(&fs), value);
    }

    #[test]
    fn test_snapshot_roundtrip() {
        let value = json!({"class": "FsSnapshot", "id": "SS_1", "name": "nightly", "ts": 1393439000});
        let snapshot = value_to_snapshot(&SystemHeap, &value).unwrap().unwrap();
        assert_eq!(snapshot.ts, 1393439000);
        assert_eq!(snapshot_to_value(&snapshot), value);
    }

    #[test]
    fn test_nfs_export_roundtrip() {
        let value = export_value();
        let heap = BoundedHeap::new(32);
        let export = value_to_nfs_export(&heap, &value).unwrap().unwrap();
        assert_eq!(heap.ledger().allocations(), 4);
        assert_eq!(heap.ledger().live_allocations(), 1);

        assert_eq!(export.rw.iter().collect::<Vec<_>>(), vec!["web-1", "web-2"]);
        assert!(export.ro.is_empty());
        assert_eq!(nfs_export_to_value(&export), value);
    }

    #[test]
    fn test_nfs_export_bad_host_list_releases_earlier_lists() {
        for field in ["root", "rw", "ro"] {
            let heap = BoundedHeap::new(32);
            let mut value = export_value();
            value[field] = json!([1]);
            assert!(value_to_nfs_export(&heap, &value).unwrap().is_none());
            assert_eq!(heap.ledger().live_allocations(), 0, "field {field}");
        }
    }

    #[test]
    fn test_nfs_export_scalar_failure_releases_lists() {
        let heap = BoundedHeap::new(32);
        let mut value = export_value();
        value["anonuid"] = json!("nobody");
        let err = value_to_nfs_export(&heap, &value).unwrap_err();
        assert_eq!(err.field, "anonuid");
        assert_eq!(heap.ledger().allocations(), 3);
        assert_eq!(heap.ledger().live_allocations(), 0);
    }

    #[test]
    fn test_invalid_records_encode_null() {
        assert_eq!(fs_to_value(&FileSystem::default()), Value::Null);
        assert_eq!(snapshot_to_value(&FsSnapshot::default()), Value::Null);
        assert_eq!(nfs_export_to_value(&NfsExport::default()), Value::Null);
    }
}
