// SPDX-License-Identifier: GPL-3.0-only

//! Well-formed wire payloads for every entity class
//!
//! Each builder takes the fields that tests usually vary and fills the rest
//! with plausible simulator values.

use serde_json::{Value, json};

pub const SYSTEM_ID: &str = "SIM_01";

pub fn volume(id: &str, pool_id: &str) -> Value {
    json!({
        "class": "Volume",
        "id": id,
        "name": format!("vol-{id}"),
        "vpd83": "600508b1001c79ade5178f0626caaa9c",
        "block_size": 512,
        "num_of_blocks": 2097152,
        "status": 1,
        "system_id": SYSTEM_ID,
        "pool_id": pool_id,
    })
}

pub fn disk(id: &str, disk_type: i32) -> Value {
    json!({
        "class": "Disk",
        "id": id,
        "name": format!("disk-{id}"),
        "disk_type": disk_type,
        "block_size": 512,
        "num_of_blocks": 1953525168u64,
        "status": 2,
        "system_id": SYSTEM_ID,
    })
}

/// Disk carrying an `optional_data` object built from `pairs`
pub fn disk_with_metadata(id: &str, pairs: &[(&str, &str)]) -> Value {
    let mut value = disk(id, 1);
    value["optional_data"] = optional_data(pairs);
    value
}

pub fn optional_data(pairs: &[(&str, &str)]) -> Value {
    let values: serde_json::Map<String, Value> = pairs
        .iter()
        .map(|(key, value)| (key.to_string(), Value::from(*value)))
        .collect();
    json!({"class": "OptionalData", "values": values})
}

pub fn pool(id: &str) -> Value {
    json!({
        "class": "Pool",
        "id": id,
        "name": format!("pool-{id}"),
        "total_space": 4398046511104u64,
        "free_space": 1099511627776u64,
        "status": 2,
        "status_info": "",
        "system_id": SYSTEM_ID,
    })
}

pub fn system(id: &str) -> Value {
    json!({
        "class": "System",
        "id": id,
        "name": "LSM simulated storage plug-in",
        "status": 1,
        "status_info": "",
    })
}

pub fn initiator(id: &str, id_type: i32) -> Value {
    json!({"class": "Initiator", "type": id_type, "id": id, "name": format!("host-{id}")})
}

pub fn access_group(id: &str, initiators: &[&str]) -> Value {
    json!({
        "class": "AccessGroup",
        "id": id,
        "name": format!("ag-{id}"),
        "initiators": initiators,
        "system_id": SYSTEM_ID,
    })
}

pub fn filesystem(id: &str, pool_id: &str) -> Value {
    json!({
        "class": "FileSystem",
        "id": id,
        "name": format!("fs-{id}"),
        "total_space": 107374182400u64,
        "free_space": 53687091200u64,
        "pool_id": pool_id,
        "system_id": SYSTEM_ID,
    })
}

pub fn snapshot(id: &str, ts: u64) -> Value {
    json!({"class": "FsSnapshot", "id": id, "name": format!("snap-{id}"), "ts": ts})
}

pub fn nfs_export(id: &str, fs_id: &str, rw: &[&str]) -> Value {
    json!({
        "class": "NfsExport",
        "id": id,
        "fs_id": fs_id,
        "export_path": format!("/exports/{fs_id}"),
        "auth": "sys",
        "root": ["admin-host"],
        "rw": rw,
        "ro": [],
        "anonuid": 65534,
        "anongid": 65534,
        "options": "no_subtree_check",
    })
}

pub fn block_range(src_block: u64, dest_block: u64, block_count: u64) -> Value {
    json!({
        "class": "BlockRange",
        "src_block": src_block,
        "dest_block": dest_block,
        "block_count": block_count,
    })
}

pub fn capabilities(hex: &str) -> Value {
    json!({"class": "Capabilities", "cap": hex})
}

/// `count` volumes with ids `VOL_0..VOL_{count-1}`
pub fn volumes(count: usize) -> Value {
    Value::Array(
        (0..count)
            .map(|index| volume(&format!("VOL_{index}"), "POOL_1"))
            .collect(),
    )
}

/// One payload of every tagged class
pub fn every_entity() -> Vec<Value> {
    vec![
        volume("VOL_1", "POOL_1"),
        disk("DISK_1", 3),
        disk_with_metadata("DISK_2", &[("vendor", "SIM"), ("model", "X1")]),
        pool("POOL_1"),
        system(SYSTEM_ID),
        initiator("iqn.1994-05.com.domain:01.89bd01", 5),
        access_group("AG_1", &["iqn.a", "iqn.b"]),
        filesystem("FS_1", "POOL_1"),
        snapshot("SS_1", 1393439000),
        nfs_export("EXP_1", "FS_1", &["web-1", "web-2"]),
        block_range(0, 4096, 128),
        capabilities("0101000001"),
        optional_data(&[("location", "rack 4")]),
    ]
}
