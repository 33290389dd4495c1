// SPDX-License-Identifier: GPL-3.0-only

//! Conversion between plugin wire values and native storage records
//!
//! A wire value is a [`serde_json::Value`]; entity objects carry their type
//! name under the `class` key. Single-record converters in [`entities`] and
//! [`nested`] return:
//!
//! - `Ok(Some(record))` when the object matched and converted,
//! - `Ok(None)` when it was not an object of the expected class, a nested
//!   value was rejected, or the heap refused the allocation,
//! - `Err(FieldError)` when a matched object had a field of the wrong shape.
//!
//! The array converters in [`collection`] are all-or-nothing: any element
//! failure releases every record of the batch and reports an [`ErrorNumber`]
//! through [`ConvertError::code`].

pub mod collection;
pub mod config;
pub mod entities;
pub mod entity;
pub mod error;
pub mod guard;
pub mod nested;
pub mod value;
pub mod wire;

pub use collection::*;
pub use config::{ConfigError, ConvertConfig, LoggingLevel};
pub use entities::*;
pub use entity::Entity;
pub use error::{ConvertError, ErrorNumber, Result, error_number};
pub use guard::{CLASS_KEY, class_of, is_expected_object};
pub use nested::{
    optional_data_to_value, string_list_to_value, value_to_optional_data, value_to_string_list,
};
pub use value::{FieldError, FieldErrorKind, ValueExt};
pub use wire::{WireRecord, record_to_value, value_to_record};
