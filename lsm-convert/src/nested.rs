// SPDX-License-Identifier: GPL-3.0-only

//! String lists and optional metadata embedded in other records

use lsm_types::{Heap, Native, OptionalData, Record, StringList};
use serde_json::{Map, Value};
use tracing::debug;

use crate::value::{FieldError, ValueExt};
use crate::wire::{WireRecord, allocate, put, record_to_value, value_to_record};

/// Array of strings to a native list.
///
/// Anything other than an array of strings is absent; a partially populated
/// list is dropped before returning.
pub fn value_to_string_list(heap: &dyn Heap, value: &Value) -> Option<Native<StringList>> {
    let items = value.as_array()?;
    let mut list = allocate(heap, StringList::with_size(items.len()))?;

    for (index, item) in items.iter().enumerate() {
        let Some(text) = item.as_str() else {
            debug!(index, found = item.type_name(), "string list element is not a string");
            return None;
        };
        if let Err(error) = list.set(index, text) {
            debug!(index, %error, "string list element rejected");
            return None;
        }
    }

    Some(list)
}

/// Native list to an array of strings; an invalid list encodes as `[]`
pub fn string_list_to_value(list: &StringList) -> Value {
    if !list.is_valid() {
        return Value::Array(Vec::new());
    }
    Value::Array(list.iter().map(Value::from).collect())
}

const VALUES: &str = "values";

impl WireRecord for OptionalData {
    fn decode(heap: &dyn Heap, value: &Value) -> Result<Option<Native<Self>>, FieldError> {
        let entries = value.object_field(VALUES)?;
        let Some(mut data) = allocate(heap, OptionalData::new()) else {
            return Ok(None);
        };

        for (key, entry) in entries {
            let Some(text) = entry.as_str() else {
                debug!(key = %key, found = entry.type_name(), "optional data value is not a string");
                return Ok(None);
            };
            data.set_string(key.as_str(), text);
        }

        Ok(Some(data))
    }

    fn encode(&self, fields: &mut Map<String, Value>) {
        let values: Map<String, Value> = self
            .iter()
            .map(|(key, value)| (key.to_string(), Value::from(value)))
            .collect();
        put(fields, VALUES, values);
    }
}

pub fn value_to_optional_data(
    heap: &dyn Heap,
    value: &Value,
) -> Result<Option<Native<OptionalData>>, FieldError> {
    value_to_record(heap, value)
}

pub fn optional_data_to_value(data: &OptionalData) -> Value {
    record_to_value(data)
}

#[cfg(test)]
mod tests {
    use super::*;
    use lsm_types::{BoundedHeap, SystemHeap};
    use serde_json::json;

    #[test]
    fn test_string_list_preserves_order() {
        let value = json!(["host-c", "host-a", "host-b"]);
        let list = value_to_string_list(&SystemHeap, &value).unwrap();
        assert_eq!(
            list.iter().collect::<Vec<_>>(),
            vec!["host-c", "host-a", "host-b"]
        );
        assert_eq!(string_list_to_value(&list), value);
    }

    #[test]
    fn test_string_list_empty_array() {
        let list = value_to_string_list(&SystemHeap, &json!([])).unwrap();
        assert!(list.is_empty());
        assert_eq!(string_list_to_value(&list), json!([]));
    }

    #[test]
    fn test_string_list_rejects_non_array() {
        assert!(value_to_string_list(&SystemHeap, &json!("host")).is_none());
        assert!(value_to_string_list(&SystemHeap, &Value::Null).is_none());
    }

    #[test]
    fn test_string_list_bad_element_frees_list() {
        let heap = BoundedHeap::new(64);
        let value = json!(["ok", "ok", 7, "never"]);
        assert!(value_to_string_list(&heap, &value).is_none());
        assert_eq!(heap.ledger().allocations(), 1);
        assert_eq!(heap.ledger().live_allocations(), 0);
    }

    #[test]
    fn test_invalid_string_list_encodes_empty() {
        assert_eq!(string_list_to_value(&StringList::default()), json!([]));
    }

    #[test]
    fn test_optional_data_roundtrip() {
        let value = json!({
            "class": "OptionalData",
            "values": {"vendor": "ACME", "firmware": "1.2.3"},
        });
        let data = value_to_optional_data(&SystemHeap, &value)
            .unwrap()
            .unwrap();
        assert_eq!(data.get("vendor"), Some("ACME"));
        assert_eq!(data.len(), 2);

        // Native map iterates by key, so compare as maps.
        let encoded = optional_data_to_value(&data);
        assert_eq!(encoded["class"], "OptionalData");
        assert_eq!(encoded["values"]["vendor"], "ACME");
        assert_eq!(encoded["values"]["firmware"], "1.2.3");
        assert_eq!(encoded["values"].as_object().unwrap().len(), 2);
    }

    #[test]
    fn test_optional_data_wrong_class_is_absent() {
        let value = json!({"class": "Disk", "values": {}});
        assert!(value_to_optional_data(&SystemHeap, &value).unwrap().is_none());
    }

    #[test]
    fn test_optional_data_values_must_be_object() {
        let value = json!({"class": "OptionalData", "values": ["a"]});
        let err = value_to_optional_data(&SystemHeap, &value).unwrap_err();
        assert_eq!(err.field, "values");

        let value = json!({"class": "OptionalData"});
        assert!(value_to_optional_data(&SystemHeap, &value).is_err());
    }

    #[test]
    fn test_optional_data_bad_entry_frees_map() {
        let heap = BoundedHeap::new(8);
        let value = json!({"class": "OptionalData", "values": {"a": "1", "b": 2}});
        assert!(value_to_optional_data(&heap, &value).unwrap().is_none());
        assert_eq!(heap.ledger().live_allocations(), 0);
    }

    #[test]
    fn test_optional_data_empty_key_roundtrips() {
        let value = json!({"class": "OptionalData", "values": {"": "blank-key", "vendor": "SIM"}});
        let data = value_to_optional_data(&SystemHeap, &value).unwrap().unwrap();
        assert_eq!(data.get(""), Some("blank-key"));
        assert_eq!(optional_data_to_value(&data), value);
    }

    #[test]
    fn test_invalid_optional_data_encodes_null() {
        assert_eq!(optional_data_to_value(&OptionalData::default()), Value::Null);
    }
}
