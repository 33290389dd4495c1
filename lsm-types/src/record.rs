// SPDX-License-Identifier: GPL-3.0-only

//! Record kinds and the validity contract shared by all native records

use std::fmt;

use serde::{Deserialize, Serialize};

/// Every native type that can be allocated on a [`crate::Heap`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RecordKind {
    Volume,
    Disk,
    Pool,
    System,
    Initiator,
    AccessGroup,
    FileSystem,
    FsSnapshot,
    NfsExport,
    BlockRange,
    Capabilities,
    OptionalData,
    StringList,
}

const MAGIC_BASE: u32 = 0xAA7A_0000;

impl RecordKind {
    pub const ALL: [RecordKind; 13] = [
        Self::Volume,
        Self::Disk,
        Self::Pool,
        Self::System,
        Self::Initiator,
        Self::AccessGroup,
        Self::FileSystem,
        Self::FsSnapshot,
        Self::NfsExport,
        Self::BlockRange,
        Self::Capabilities,
        Self::OptionalData,
        Self::StringList,
    ];

    /// Tag stamped into a live record of this kind
    pub fn magic(self) -> u32 {
        let ordinal = match self {
            Self::Volume => 0x01,
            Self::Disk => 0x02,
            Self::Pool => 0x03,
            Self::System => 0x04,
            Self::Initiator => 0x05,
            Self::AccessGroup => 0x06,
            Self::FileSystem => 0x07,
            Self::FsSnapshot => 0x08,
            Self::NfsExport => 0x09,
            Self::BlockRange => 0x0A,
            Self::Capabilities => 0x0B,
            Self::OptionalData => 0x0C,
            Self::StringList => 0x0D,
        };
        MAGIC_BASE | ordinal
    }

    /// Discriminator used for this kind on the wire
    pub fn class_name(self) -> &'static str {
        match self {
            Self::Volume => "Volume",
            Self::Disk => "Disk",
            Self::Pool => "Pool",
            Self::System => "System",
            Self::Initiator => "Initiator",
            Self::AccessGroup => "AccessGroup",
            Self::FileSystem => "FileSystem",
            Self::FsSnapshot => "FsSnapshot",
            Self::NfsExport => "NfsExport",
            Self::BlockRange => "BlockRange",
            Self::Capabilities => "Capabilities",
            Self::OptionalData => "OptionalData",
            Self::StringList => "StringList",
        }
    }

    /// Reverse of [`RecordKind::class_name`]; exact, case-sensitive match
    pub fn from_class_name(class: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.class_name() == class)
    }
}

impl fmt::Display for RecordKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.class_name())
    }
}

/// A fixed-layout native record
pub trait Record {
    const KIND: RecordKind;

    fn magic(&self) -> u32;

    /// Heap units this record occupies
    fn units(&self) -> usize {
        1
    }

    /// True when the record was produced by its constructor
    fn is_valid(&self) -> bool {
        self.magic() == Self::KIND.magic()
    }
}
