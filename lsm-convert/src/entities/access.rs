// SPDX-License-Identifier: GPL-3.0-only

//! Initiators and access groups

use lsm_types::{AccessGroup, Heap, Initiator, InitiatorType, Native};
use serde_json::{Map, Value};
use tracing::debug;

use crate::nested::{string_list_to_value, value_to_string_list};
use crate::value::{FieldError, ValueExt};
use crate::wire::{WireRecord, allocate, put, record_to_value, value_to_record};

impl WireRecord for Initiator {
    fn decode(heap: &dyn Heap, value: &Value) -> Result<Option<Native<Self>>, FieldError> {
        let initiator = Initiator::new(
            InitiatorType::from_code(value.i32_field("type")?),
            value.str_field("id")?,
            value.str_field("name")?,
        );
        Ok(allocate(heap, initiator))
    }

    fn encode(&self, fields: &mut Map<String, Value>) {
        put(fields, "type", self.id_type.code());
        put(fields, "id", self.id.as_str());
        put(fields, "name", self.name.as_str());
    }
}

impl WireRecord for AccessGroup {
    fn decode(heap: &dyn Heap, value: &Value) -> Result<Option<Native<Self>>, FieldError> {
        let Some(initiators) = value
            .get("initiators")
            .and_then(|list| value_to_string_list(heap, list))
        else {
            debug!("access group initiator list rejected");
            return Ok(None);
        };

        let group = AccessGroup::new(
            value.str_field("id")?,
            value.str_field("name")?,
            &initiators,
            value.str_field("system_id")?,
        );
        Ok(allocate(heap, group))
    }

    fn encode(&self, fields: &mut Map<String, Value>) {
        put(fields, "id", self.id.as_str());
        put(fields, "name", self.name.as_str());
        put(fields, "initiators", string_list_to_value(&self.initiators));
        put(fields, "system_id", self.system_id.as_str());
    }
}

pub fn value_to_initiator(
    heap: &dyn Heap,
    value: &Value,
) -> Result<Option<Native<Initiator>>, FieldError> {
    value_to_record(heap, value)
}

pub fn initiator_to_value(initiator: &Initiator) -> Value {
    record_to_value(initiator)
}

pub fn value_to_access_group(
    heap: &dyn Heap,
    value: &Value,
) -> Result<Option<Native<AccessGroup>>, FieldError> {
    value_to_record(heap, value)
}

pub fn access_group_to_value(group: &AccessGroup) -> Value {
    record_to_value(group)
}
