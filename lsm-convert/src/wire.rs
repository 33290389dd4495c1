// SPDX-License-Identifier: GPL-3.0-only

//! Shared decode/encode path for tagged records

use lsm_types::{Heap, Native, Record};
use serde_json::{Map, Value};
use tracing::{debug, trace};

use crate::guard::{CLASS_KEY, class_of, is_expected_object};
use crate::value::FieldError;

/// A native record with a tagged wire form
pub trait WireRecord: Record + Sized {
    /// Build the record from an object whose discriminator already matched.
    ///
    /// `Ok(None)` means the record could not be produced (a nested value was
    /// rejected or the heap refused the allocation); nothing is left allocated.
    fn decode(heap: &dyn Heap, value: &Value) -> Result<Option<Native<Self>>, FieldError>;

    /// Write every attribute except the discriminator
    fn encode(&self, fields: &mut Map<String, Value>);
}

/// Decode `value` as a `T`, or report absence if it is tagged otherwise
pub fn value_to_record<T: WireRecord>(
    heap: &dyn Heap,
    value: &Value,
) -> Result<Option<Native<T>>, FieldError> {
    let class = T::KIND.class_name();
    if !is_expected_object(value, class) {
        trace!(expected = class, found = ?class_of(value), "discriminator mismatch");
        return Ok(None);
    }
    T::decode(heap, value)
}

/// Encode a valid record; invalid records become `null`
pub fn record_to_value<T: WireRecord>(record: &T) -> Value {
    if !record.is_valid() {
        debug!(kind = %T::KIND, magic = record.magic(), "not encoding invalid record");
        return Value::Null;
    }

    let mut fields = Map::new();
    fields.insert(CLASS_KEY.to_string(), Value::from(T::KIND.class_name()));
    record.encode(&mut fields);
    Value::Object(fields)
}

/// Move `record` onto the heap, collapsing a refusal into absence
pub(crate) fn allocate<T: Record>(heap: &dyn Heap, record: T) -> Option<Native<T>> {
    match Native::alloc(heap, record) {
        Ok(native) => Some(native),
        Err(error) => {
            debug!(%error, "native allocation failed");
            None
        }
    }
}

pub(crate) fn put(fields: &mut Map<String, Value>, key: &str, value: impl Into<Value>) {
    fields.insert(key.to_string(), value.into());
}
