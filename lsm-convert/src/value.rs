// SPDX-License-Identifier: GPL-3.0-only

//! Typed field access on wire values
//!
//! Every accessor either returns the field in the requested shape or a
//! [`FieldError`]. A `FieldError` is the only signal that aborts a batch.

use serde_json::{Map, Value};
use thiserror::Error;

/// Why a field could not be read
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FieldErrorKind {
    #[error("missing")]
    Missing,

    #[error("expected {expected}, found {found}")]
    WrongType {
        expected: &'static str,
        found: &'static str,
    },

    #[error("value does not fit in {expected}")]
    OutOfRange { expected: &'static str },
}

/// Type-access failure while reading a wire field
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("field '{field}': {kind}")]
pub struct FieldError {
    pub field: String,
    pub kind: FieldErrorKind,
}

impl FieldError {
    pub fn missing(field: &str) -> Self {
        Self {
            field: field.to_string(),
            kind: FieldErrorKind::Missing,
        }
    }

    pub fn wrong_type(field: &str, expected: &'static str, found: &Value) -> Self {
        Self {
            field: field.to_string(),
            kind: FieldErrorKind::WrongType {
                expected,
                found: found.type_name(),
            },
        }
    }

    pub fn out_of_range(field: &str, expected: &'static str) -> Self {
        Self {
            field: field.to_string(),
            kind: FieldErrorKind::OutOfRange { expected },
        }
    }
}

/// Named-field and typed accessors for [`Value`]
pub trait ValueExt {
    /// Short name of the value's shape, used in error messages
    fn type_name(&self) -> &'static str;

    /// Look up `name` on an object value
    fn field(&self, name: &str) -> Result<&Value, FieldError>;

    fn str_field(&self, name: &str) -> Result<&str, FieldError>;
    fn u64_field(&self, name: &str) -> Result<u64, FieldError>;
    fn u32_field(&self, name: &str) -> Result<u32, FieldError>;
    fn i64_field(&self, name: &str) -> Result<i64, FieldError>;
    fn i32_field(&self, name: &str) -> Result<i32, FieldError>;
    fn array_field(&self, name: &str) -> Result<&Vec<Value>, FieldError>;
    fn object_field(&self, name: &str) -> Result<&Map<String, Value>, FieldError>;
}

impl ValueExt for Value {
    fn type_name(&self) -> &'static str {
        match self {
            Value::Null => "null",
            Value::Bool(_) => "boolean",
            Value::Number(n) if n.is_f64() => "float",
            Value::Number(_) => "integer",
            Value::String(_) => "string",
            Value::Array(_) => "array",
            Value::Object(_) => "object",
        }
    }

    fn field(&self, name: &str) -> Result<&Value, FieldError> {
        let object = self
            .as_object()
            .ok_or_else(|| FieldError::wrong_type(name, "object", self))?;
        object.get(name).ok_or_else(|| FieldError::missing(name))
    }

    fn str_field(&self, name: &str) -> Result<&str, FieldError> {
        let value = self.field(name)?;
        value
            .as_str()
            .ok_or_else(|| FieldError::wrong_type(name, "string", value))
    }

    fn u64_field(&self, name: &str) -> Result<u64, FieldError> {
        let value = self.field(name)?;
        match value {
            Value::Number(n) if n.is_f64() => Err(FieldError::wrong_type(name, "u64", value)),
            Value::Number(n) => n
                .as_u64()
                .ok_or_else(|| FieldError::out_of_range(name, "u64")),
            _ => Err(FieldError::wrong_type(name, "u64", value)),
        }
    }

    fn u32_field(&self, name: &str) -> Result<u32, FieldError> {
        let wide = self.u64_field(name).map_err(|mut error| {
            if let FieldErrorKind::OutOfRange { expected } = &mut error.kind {
                *expected = "u32";
            }
            error
        })?;
        u32::try_from(wide).map_err(|_| FieldError::out_of_range(name, "u32"))
    }

    fn i64_field(&self, name: &str) -> Result<i64, FieldError> {
        let value = self.field(name)?;
        match value {
            Value::Number(n) if n.is_f64() => Err(FieldError::wrong_type(name, "i64", value)),
            Value::Number(n) => n
                .as_i64()
                .ok_or_else(|| FieldError::out_of_range(name, "i64")),
            _ => Err(FieldError::wrong_type(name, "i64", value)),
        }
    }

    fn i32_field(&self, name: &str) -> Result<i32, FieldError> {
        let wide = self.i64_field(name).map_err(|mut error| {
            if let FieldErrorKind::OutOfRange { expected } = &mut error.kind {
                *expected = "i32";
            }
            error
        })?;
        i32::try_from(wide).map_err(|_| FieldError::out_of_range(name, "i32"))
    }

    fn array_field(&self, name: &str) -> Result<&Vec<Value>, FieldError> {
        let value = self.field(name)?;
        value
            .as_array()
            .ok_or_else(|| FieldError::wrong_type(name, "array", value))
    }

    fn object_field(&self, name: &str) -> Result<&Map<String, Value>, FieldError> {
        let value = self.field(name)?;
        value
            .as_object()
            .ok_or_else(|| FieldError::wrong_type(name, "object", value))
    }
}
