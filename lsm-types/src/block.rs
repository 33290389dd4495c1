// SPDX-License-Identifier: GPL-3.0-only

//! Block storage records: volumes, disks, pools and block ranges

use crate::{OptionalData, Record, RecordKind};

/// A logical volume exported by a storage system
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Volume {
    magic: u32,

    pub id: String,
    pub name: String,

    /// SCSI VPD page 0x83 identifier
    pub vpd83: String,

    pub block_size: u64,
    pub num_of_blocks: u64,
    pub status: u32,
    pub system_id: String,
    pub pool_id: String,
}

impl Volume {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        vpd83: impl Into<String>,
        block_size: u64,
        num_of_blocks: u64,
        status: u32,
        system_id: impl Into<String>,
        pool_id: impl Into<String>,
    ) -> Self {
        Self {
            magic: Self::KIND.magic(),
            id: id.into(),
            name: name.into(),
            vpd83: vpd83.into(),
            block_size,
            num_of_blocks,
            status,
            system_id: system_id.into(),
            pool_id: pool_id.into(),
        }
    }

    /// Capacity in bytes, saturating on overflow
    pub fn size_bytes(&self) -> u64 {
        self.block_size.saturating_mul(self.num_of_blocks)
    }
}

impl Record for Volume {
    const KIND: RecordKind = RecordKind::Volume;

    fn magic(&self) -> u32 {
        self.magic
    }
}

/// Physical disk media/transport classification
///
/// Codes outside the known set are carried verbatim so they survive a round
/// trip through a plugin that knows more types than we do.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum DiskType {
    #[default]
    Unknown,
    Other,
    NotApplicable,
    Ata,
    Sata,
    Sas,
    Fc,
    /// SCSI over PCIe
    Sop,
    Scsi,
    NlSas,
    Hdd,
    Ssd,
    Hybrid,
    Lun,
    Unrecognized(i32),
}

impl DiskType {
    pub fn from_code(code: i32) -> Self {
        match code {
            0 => Self::Unknown,
            1 => Self::Other,
            2 => Self::NotApplicable,
            3 => Self::Ata,
            4 => Self::Sata,
            5 => Self::Sas,
            6 => Self::Fc,
            7 => Self::Sop,
            8 => Self::Scsi,
            9 => Self::NlSas,
            10 => Self::Hdd,
            11 => Self::Ssd,
            12 => Self::Hybrid,
            13 => Self::Lun,
            other => Self::Unrecognized(other),
        }
    }

    pub fn code(self) -> i32 {
        match self {
            Self::Unknown => 0,
            Self::Other => 1,
            Self::NotApplicable => 2,
            Self::Ata => 3,
            Self::Sata => 4,
            Self::Sas => 5,
            Self::Fc => 6,
            Self::Sop => 7,
            Self::Scsi => 8,
            Self::NlSas => 9,
            Self::Hdd => 10,
            Self::Ssd => 11,
            Self::Hybrid => 12,
            Self::Lun => 13,
            Self::Unrecognized(code) => code,
        }
    }
}

/// A physical disk, optionally carrying vendor metadata
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Disk {
    magic: u32,

    pub id: String,
    pub name: String,
    pub disk_type: DiskType,
    pub block_size: u64,
    pub num_of_blocks: u64,
    pub status: u64,

    /// Copied on construction; the caller keeps its own map
    pub optional_data: Option<OptionalData>,

    pub system_id: String,
}

impl Disk {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        disk_type: DiskType,
        block_size: u64,
        num_of_blocks: u64,
        status: u64,
        optional_data: Option<&OptionalData>,
        system_id: impl Into<String>,
    ) -> Self {
        Self {
            magic: Self::KIND.magic(),
            id: id.into(),
            name: name.into(),
            disk_type,
            block_size,
            num_of_blocks,
            status,
            optional_data: optional_data.cloned(),
            system_id: system_id.into(),
        }
    }

    pub fn size_bytes(&self) -> u64 {
        self.block_size.saturating_mul(self.num_of_blocks)
    }
}

impl Record for Disk {
    const KIND: RecordKind = RecordKind::Disk;

    fn magic(&self) -> u32 {
        self.magic
    }
}

/// A storage pool that volumes and filesystems are carved from
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Pool {
    magic: u32,

    pub id: String,
    pub name: String,
    pub total_space: u64,
    pub free_space: u64,
    pub status: u64,
    pub status_info: String,
    pub system_id: String,
}

impl Pool {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        total_space: u64,
        free_space: u64,
        status: u64,
        status_info: impl Into<String>,
        system_id: impl Into<String>,
    ) -> Self {
        Self {
            magic: Self::KIND.magic(),
            id: id.into(),
            name: name.into(),
            total_space,
            free_space,
            status,
            status_info: status_info.into(),
            system_id: system_id.into(),
        }
    }

    pub fn used_space(&self) -> u64 {
        self.total_space.saturating_sub(self.free_space)
    }
}

impl Record for Pool {
    const KIND: RecordKind = RecordKind::Pool;

    fn magic(&self) -> u32 {
        self.magic
    }
}

/// A contiguous block extent used by range replication
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BlockRange {
    magic: u32,

    pub src_block: u64,
    pub dest_block: u64,
    pub block_count: u64,
}

impl BlockRange {
    pub fn new(src_block: u64, dest_block: u64, block_count: u64) -> Self {
        Self {
            magic: Self::KIND.magic(),
            src_block,
            dest_block,
            block_count,
        }
    }
}

impl Record for BlockRange {
    const KIND: RecordKind = RecordKind::BlockRange;

    fn magic(&self) -> u32 {
        self.magic
    }
}
