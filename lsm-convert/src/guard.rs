// SPDX-License-Identifier: GPL-3.0-only

//! Discriminator checks run before any field is read

use serde_json::Value;

/// Key holding the discriminator on every tagged object
pub const CLASS_KEY: &str = "class";

/// Discriminator carried by `value`, if it is a tagged object
pub fn class_of(value: &Value) -> Option<&str> {
    value.as_object()?.get(CLASS_KEY)?.as_str()
}

/// True iff `value` is an object whose `class` is exactly `class_name`
pub fn is_expected_object(value: &Value, class_name: &str) -> bool {
    class_of(value) == Some(class_name)
}
