// SPDX-License-Identifier: GPL-3.0-only

//! Systems and capability vectors

use lsm_types::{Capabilities, Heap, Native, System};
use serde_json::{Map, Value};
use tracing::debug;

use crate::value::{FieldError, ValueExt};
use crate::wire::{WireRecord, allocate, put, record_to_value, value_to_record};

impl WireRecord for System {
    fn decode(heap: &dyn Heap, value: &Value) -> Result<Option<Native<Self>>, FieldError> {
        let system = System::new(
            value.str_field("id")?,
            value.str_field("name")?,
            value.u32_field("status")?,
            value.str_field("status_info")?,
        );
        Ok(allocate(heap, system))
    }

    fn encode(&self, fields: &mut Map<String, Value>) {
        put(fields, "id", self.id.as_str());
        put(fields, "name", self.name.as_str());
        put(fields, "status", self.status);
        put(fields, "status_info", self.status_info.as_str());
    }
}

impl WireRecord for Capabilities {
    fn decode(heap: &dyn Heap, value: &Value) -> Result<Option<Native<Self>>, FieldError> {
        match Capabilities::from_hex(value.str_field("cap")?) {
            Ok(capabilities) => Ok(allocate(heap, capabilities)),
            Err(error) => {
                debug!(%error, "capability string rejected");
                Ok(None)
            }
        }
    }

    fn encode(&self, fields: &mut Map<String, Value>) {
        put(fields, "cap", self.to_hex());
    }
}

pub fn value_to_system(heap: &dyn Heap, value: &Value) -> Result<Option<Native<System>>, FieldError> {
    value_to_record(heap, value)
}

pub fn system_to_value(system: &System) -> Value {
    record_to_value(system)
}

pub fn value_to_capabilities(
    heap: &dyn Heap,
    value: &Value,
) -> Result<Option<Native<Capabilities>>, FieldError> {
    value_to_record(heap, value)
}

pub fn capabilities_to_value(capabilities: &Capabilities) -> Value {
    record_to_value(capabilities)
}
