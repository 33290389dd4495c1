// SPDX-License-Identifier: GPL-3.0-only

//! Filesystem records: filesystems, snapshots and NFS exports

use crate::{Record, RecordKind, StringList};

/// A filesystem hosted on a pool
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FileSystem {
    magic: u32,

    pub id: String,
    pub name: String,
    pub total_space: u64,
    pub free_space: u64,
    pub pool_id: String,
    pub system_id: String,
}

impl FileSystem {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        total_space: u64,
        free_space: u64,
        pool_id: impl Into<String>,
        system_id: impl Into<String>,
    ) -> Self {
        Self {
            magic: Self::KIND.magic(),
            id: id.into(),
            name: name.into(),
            total_space,
            free_space,
            pool_id: pool_id.into(),
            system_id: system_id.into(),
        }
    }
}

impl Record for FileSystem {
    const KIND: RecordKind = RecordKind::FileSystem;

    fn magic(&self) -> u32 {
        self.magic
    }
}

/// Point-in-time snapshot of a filesystem
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FsSnapshot {
    magic: u32,

    pub id: String,
    pub name: String,

    /// Creation time, seconds since the epoch
    pub ts: u64,
}

impl FsSnapshot {
    pub fn new(id: impl Into<String>, name: impl Into<String>, ts: u64) -> Self {
        Self {
            magic: Self::KIND.magic(),
            id: id.into(),
            name: name.into(),
            ts,
        }
    }
}

impl Record for FsSnapshot {
    const KIND: RecordKind = RecordKind::FsSnapshot;

    fn magic(&self) -> u32 {
        self.magic
    }
}

/// NFS export of a filesystem path
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NfsExport {
    magic: u32,

    pub id: String,
    pub fs_id: String,
    pub export_path: String,
    pub auth: String,

    /// Hosts with root access
    pub root: StringList,

    /// Hosts with read-write access
    pub rw: StringList,

    /// Hosts with read-only access
    pub ro: StringList,

    pub anonuid: u64,
    pub anongid: u64,
    pub options: String,
}

impl NfsExport {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        id: impl Into<String>,
        fs_id: impl Into<String>,
        export_path: impl Into<String>,
        auth: impl Into<String>,
        root: &StringList,
        rw: &StringList,
        ro: &StringList,
        anonuid: u64,
        anongid: u64,
        options: impl Into<String>,
    ) -> Self {
        Self {
            magic: Self::KIND.magic(),
            id: id.into(),
            fs_id: fs_id.into(),
            export_path: export_path.into(),
            auth: auth.into(),
            root: root.clone(),
            rw: rw.clone(),
            ro: ro.clone(),
            anonuid,
            anongid,
            options: options.into(),
        }
    }
}

impl Record for NfsExport {
    const KIND: RecordKind = RecordKind::NfsExport;

    fn magic(&self) -> u32 {
        self.magic
    }
}
