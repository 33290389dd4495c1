// SPDX-License-Identifier: GPL-3.0-only

use lsm_convert::{
    ConvertError, ErrorNumber, access_groups_to_value, disks_to_value, error_number,
    nfs_exports_to_value, value_array_to_access_groups, value_array_to_block_ranges,
    value_array_to_disks, value_array_to_filesystems, value_array_to_initiators,
    value_array_to_nfs_exports, value_array_to_pools, value_array_to_snapshots,
    value_array_to_systems, value_array_to_volumes, volumes_to_value,
};
use lsm_testing::{FailingHeap, TrackingHeap, fixtures};
use serde_json::{Value, json};

#[test]
fn volumes_convert_in_order() {
    let heap = TrackingHeap::new();
    let value = fixtures::volumes(5);
    let volumes = value_array_to_volumes(&heap, &value).unwrap().unwrap();

    assert_eq!(volumes.len(), 5);
    let ids: Vec<&str> = volumes.iter().map(|v| v.id.as_str()).collect();
    assert_eq!(ids, ["VOL_0", "VOL_1", "VOL_2", "VOL_3", "VOL_4"]);
    assert_eq!(volumes_to_value(&volumes), value);

    // One array allocation plus one per record.
    assert_eq!(heap.ledger().live_allocations(), 6);
    drop(volumes);
    assert!(heap.is_drained());
}

#[test]
fn failure_at_any_position_releases_everything() {
    for bad_index in 0..4 {
        let heap = TrackingHeap::new();
        let mut value = fixtures::volumes(4);
        value[bad_index]["num_of_blocks"] = json!(-1);

        let result = value_array_to_volumes(&heap, &value);
        assert_eq!(error_number(&result), ErrorNumber::InternalError);
        assert_eq!(result.unwrap_err().index(), Some(bad_index));
        assert!(heap.is_drained(), "leak at index {bad_index}");
    }
}

#[test]
fn nested_failure_inside_batch_rolls_back() {
    let heap = TrackingHeap::new();
    let value = json!([
        fixtures::nfs_export("EXP_1", "FS_1", &["web-1"]),
        fixtures::nfs_export("EXP_2", "FS_2", &["web-2"]),
        {
            "class": "NfsExport", "id": "EXP_3", "fs_id": "FS_3", "export_path": "/x",
            "auth": "sys", "root": [], "rw": "web-3", "ro": [],
            "anonuid": 0, "anongid": 0, "options": "",
        },
    ]);

    let err = value_array_to_nfs_exports(&heap, &value).unwrap_err();
    assert_eq!(
        err,
        ConvertError::Rejected {
            index: 2,
            class: "NfsExport"
        }
    );
    assert!(heap.is_drained());
}

#[test]
fn element_of_other_class_fails_batch() {
    let heap = TrackingHeap::new();
    let value = json!([fixtures::disk("DISK_1", 3), fixtures::pool("POOL_1")]);
    let result = value_array_to_disks(&heap, &value);
    assert_eq!(error_number(&result), ErrorNumber::InternalError);
    assert!(heap.is_drained());
}

#[test]
fn null_element_fails_batch() {
    let heap = TrackingHeap::new();
    let value = json!([fixtures::system("SIM_01"), null]);
    let result = value_array_to_systems(&heap, &value);
    assert_eq!(error_number(&result), ErrorNumber::InternalError);
    assert!(heap.is_drained());
}

#[test]
fn disks_with_empty_metadata_key_convert() {
    let heap = TrackingHeap::new();
    let value = json!([
        fixtures::disk("DISK_0", 3),
        fixtures::disk_with_metadata("DISK_1", &[("", "blank-key"), ("vendor", "SIM")]),
    ]);
    let result = value_array_to_disks(&heap, &value);
    assert_eq!(error_number(&result), ErrorNumber::Ok);

    let disks = result.unwrap().unwrap();
    assert_eq!(disks.len(), 2);
    let data = disks[1].optional_data.as_ref().unwrap();
    assert_eq!(data.get(""), Some("blank-key"));
    assert_eq!(disks_to_value(&disks), value);
}

#[test]
fn array_refusal_is_no_memory() {
    let heap = FailingHeap::arrays();
    let value = json!([fixtures::pool("POOL_1"), fixtures::pool("POOL_2")]);
    let result = value_array_to_pools(&heap, &value);
    assert_eq!(error_number(&result), ErrorNumber::NoMemory);
    assert_eq!(heap.ledger().allocations(), 0);
}

#[test]
fn record_refusal_inside_batch_is_internal_error() {
    // Array and first record granted, second record refused.
    let heap = FailingHeap::after(2);
    let value = json!([fixtures::snapshot("SS_1", 1), fixtures::snapshot("SS_2", 2)]);
    let result = value_array_to_snapshots(&heap, &value);
    assert_eq!(error_number(&result), ErrorNumber::InternalError);
    assert_eq!(heap.ledger().live_allocations(), 0);
}

#[test]
fn empty_and_non_array_inputs_are_ok_and_absent() {
    let heap = TrackingHeap::new();
    for value in [json!([]), Value::Null, json!({"class": "Initiator"}), json!("[]")] {
        let result = value_array_to_initiators(&heap, &value);
        assert_eq!(error_number(&result), ErrorNumber::Ok);
        assert!(result.unwrap().is_none());
    }
    assert_eq!(heap.ledger().allocations(), 0);
}

#[test]
fn single_element_array() {
    let heap = TrackingHeap::new();
    let value = json!([fixtures::filesystem("FS_1", "POOL_1")]);
    let filesystems = value_array_to_filesystems(&heap, &value).unwrap().unwrap();
    assert_eq!(filesystems.len(), 1);
    assert_eq!(filesystems[0].pool_id, "POOL_1");
}

#[test]
fn access_groups_keep_initiator_order() {
    let heap = TrackingHeap::new();
    let value = json!([
        fixtures::access_group("AG_1", &["iqn.c", "iqn.a", "iqn.b"]),
        fixtures::access_group("AG_2", &[]),
    ]);
    let groups = value_array_to_access_groups(&heap, &value).unwrap().unwrap();
    assert_eq!(
        groups[0].initiators.iter().collect::<Vec<_>>(),
        ["iqn.c", "iqn.a", "iqn.b"]
    );
    assert!(groups[1].initiators.is_empty());
    assert_eq!(access_groups_to_value(&groups), value);
}

#[test]
fn block_ranges_and_exports_roundtrip() {
    let heap = TrackingHeap::new();
    let ranges = json!([
        fixtures::block_range(0, 1024, 64),
        fixtures::block_range(64, 1088, 64),
    ]);
    let converted = value_array_to_block_ranges(&heap, &ranges).unwrap().unwrap();
    assert_eq!(converted[1].dest_block, 1088);

    let exports = json!([fixtures::nfs_export("EXP_1", "FS_1", &["a", "b"])]);
    let converted = value_array_to_nfs_exports(&heap, &exports).unwrap().unwrap();
    assert_eq!(nfs_exports_to_value(&converted), exports);
}
