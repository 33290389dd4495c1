// SPDX-License-Identifier: GPL-3.0-only

//! Decoding a tagged object whose class is not known in advance

use lsm_types::{
    AccessGroup, BlockRange, Capabilities, Disk, FileSystem, FsSnapshot, Heap, Initiator, Native,
    NfsExport, OptionalData, Pool, RecordKind, System, Volume,
};
use serde_json::Value;
use tracing::trace;

use crate::guard::class_of;
use crate::value::FieldError;
use crate::wire::{WireRecord, record_to_value, value_to_record};

/// Any native record that carries a wire discriminator
#[derive(Debug, PartialEq)]
pub enum Entity {
    Volume(Native<Volume>),
    Disk(Native<Disk>),
    Pool(Native<Pool>),
    System(Native<System>),
    Initiator(Native<Initiator>),
    AccessGroup(Native<AccessGroup>),
    FileSystem(Native<FileSystem>),
    FsSnapshot(Native<FsSnapshot>),
    NfsExport(Native<NfsExport>),
    BlockRange(Native<BlockRange>),
    Capabilities(Native<Capabilities>),
    OptionalData(Native<OptionalData>),
}

fn decode_as<T: WireRecord>(
    heap: &dyn Heap,
    value: &Value,
    wrap: fn(Native<T>) -> Entity,
) -> Result<Option<Entity>, FieldError> {
    Ok(value_to_record::<T>(heap, value)?.map(wrap))
}

impl Entity {
    /// Dispatch on the `class` key.
    ///
    /// Objects without a known class, and string lists (which are untagged),
    /// decode to `Ok(None)`.
    pub fn from_value(heap: &dyn Heap, value: &Value) -> Result<Option<Self>, FieldError> {
        let Some(kind) = class_of(value).and_then(RecordKind::from_class_name) else {
            trace!(class = ?class_of(value), "no entity for value");
            return Ok(None);
        };

        match kind {
            RecordKind::Volume => decode_as(heap, value, Self::Volume),
            RecordKind::Disk => decode_as(heap, value, Self::Disk),
            RecordKind::Pool => decode_as(heap, value, Self::Pool),
            RecordKind::System => decode_as(heap, value, Self::System),
            RecordKind::Initiator => decode_as(heap, value, Self::Initiator),
            RecordKind::AccessGroup => decode_as(heap, value, Self::AccessGroup),
            RecordKind::FileSystem => decode_as(heap, value, Self::FileSystem),
            RecordKind::FsSnapshot => decode_as(heap, value, Self::FsSnapshot),
            RecordKind::NfsExport => decode_as(heap, value, Self::NfsExport),
            RecordKind::BlockRange => decode_as(heap, value, Self::BlockRange),
            RecordKind::Capabilities => decode_as(heap, value, Self::Capabilities),
            RecordKind::OptionalData => decode_as(heap, value, Self::OptionalData),
            RecordKind::StringList => Ok(None),
        }
    }

    pub fn kind(&self) -> RecordKind {
        match self {
            Self::Volume(_) => RecordKind::Volume,
            Self::Disk(_) => RecordKind::Disk,
            Self::Pool(_) => RecordKind::Pool,
            Self::System(_) => RecordKind::System,
            Self::Initiator(_) => RecordKind::Initiator,
            Self::AccessGroup(_) => RecordKind::AccessGroup,
            Self::FileSystem(_) => RecordKind::FileSystem,
            Self::FsSnapshot(_) => RecordKind::FsSnapshot,
            Self::NfsExport(_) => RecordKind::NfsExport,
            Self::BlockRange(_) => RecordKind::BlockRange,
            Self::Capabilities(_) => RecordKind::Capabilities,
            Self::OptionalData(_) => RecordKind::OptionalData,
        }
    }

    pub fn to_value(&self) -> Value {
        match self {
            Self::Volume(record) => record_to_value::<Volume>(record),
            Self::Disk(record) => record_to_value::<Disk>(record),
            Self::Pool(record) => record_to_value::<Pool>(record),
            Self::System(record) => record_to_value::<System>(record),
            Self::Initiator(record) => record_to_value::<Initiator>(record),
            Self::AccessGroup(record) => record_to_value::<AccessGroup>(record),
            Self::FileSystem(record) => record_to_value::<FileSystem>(record),
            Self::FsSnapshot(record) => record_to_value::<FsSnapshot>(record),
            Self::NfsExport(record) => record_to_value::<NfsExport>(record),
            Self::BlockRange(record) => record_to_value::<BlockRange>(record),
            Self::Capabilities(record) => record_to_value::<Capabilities>(record),
            Self::OptionalData(record) => record_to_value::<OptionalData>(record),
        }
    }
}
