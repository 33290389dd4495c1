// SPDX-License-Identifier: GPL-3.0-only

//! Host access records: initiators and access groups

use crate::{Record, RecordKind, StringList};

/// How an initiator identifier should be interpreted
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum InitiatorType {
    #[default]
    Other,
    PortWwn,
    NodeWwn,
    Hostname,
    Iscsi,
    Sas,
    Unrecognized(i32),
}

impl InitiatorType {
    pub fn from_code(code: i32) -> Self {
        match code {
            1 => Self::Other,
            2 => Self::PortWwn,
            3 => Self::NodeWwn,
            4 => Self::Hostname,
            5 => Self::Iscsi,
            7 => Self::Sas,
            other => Self::Unrecognized(other),
        }
    }

    pub fn code(self) -> i32 {
        match self {
            Self::Other => 1,
            Self::PortWwn => 2,
            Self::NodeWwn => 3,
            Self::Hostname => 4,
            Self::Iscsi => 5,
            Self::Sas => 7,
            Self::Unrecognized(code) => code,
        }
    }
}

/// A host-side endpoint (HBA port, iSCSI IQN, ...)
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Initiator {
    magic: u32,

    pub id_type: InitiatorType,
    pub id: String,
    pub name: String,
}

impl Initiator {
    pub fn new(id_type: InitiatorType, id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            magic: Self::KIND.magic(),
            id_type,
            id: id.into(),
            name: name.into(),
        }
    }
}

impl Record for Initiator {
    const KIND: RecordKind = RecordKind::Initiator;

    fn magic(&self) -> u32 {
        self.magic
    }
}

/// Named set of initiators granted access as a unit
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AccessGroup {
    magic: u32,

    pub id: String,
    pub name: String,

    /// Initiator ids; copied on construction
    pub initiators: StringList,

    pub system_id: String,
}

impl AccessGroup {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        initiators: &StringList,
        system_id: impl Into<String>,
    ) -> Self {
        Self {
            magic: Self::KIND.magic(),
            id: id.into(),
            name: name.into(),
            initiators: initiators.clone(),
            system_id: system_id.into(),
        }
    }
}

impl Record for AccessGroup {
    const KIND: RecordKind = RecordKind::AccessGroup;

    fn magic(&self) -> u32 {
        self.magic
    }
}
