// SPDX-License-Identifier: GPL-3.0-only

//! Nested collections embedded in other records

use std::collections::BTreeMap;

use crate::error::{RecordError, Result};
use crate::{Record, RecordKind};

/// Ordered list of strings with a size fixed at construction
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StringList {
    magic: u32,
    items: Vec<String>,
}

impl StringList {
    /// List of `size` empty slots
    pub fn with_size(size: usize) -> Self {
        Self {
            magic: Self::KIND.magic(),
            items: vec![String::new(); size],
        }
    }

    /// Overwrite the slot at `index`
    pub fn set(&mut self, index: usize, value: impl Into<String>) -> Result<()> {
        let size = self.items.len();
        let slot = self
            .items
            .get_mut(index)
            .ok_or(RecordError::IndexOutOfRange { index, size })?;
        *slot = value.into();
        Ok(())
    }

    /// Grow the list by one element
    pub fn append(&mut self, value: impl Into<String>) {
        self.items.push(value.into());
    }

    pub fn get(&self, index: usize) -> Option<&str> {
        self.items.get(index).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.items.iter().map(String::as_str)
    }

    pub fn contains(&self, value: &str) -> bool {
        self.items.iter().any(|item| item == value)
    }
}

impl<S: Into<String>> FromIterator<S> for StringList {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self {
            magic: Self::KIND.magic(),
            items: iter.into_iter().map(Into::into).collect(),
        }
    }
}

impl Record for StringList {
    const KIND: RecordKind = RecordKind::StringList;

    fn magic(&self) -> u32 {
        self.magic
    }

    /// One unit per slot; an empty list still takes one
    fn units(&self) -> usize {
        self.items.len().max(1)
    }
}

/// Free-form string metadata attached to a record
///
/// Iteration is in key order, not in the order entries were set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OptionalData {
    magic: u32,
    values: BTreeMap<String, String>,
}

impl OptionalData {
    pub fn new() -> Self {
        Self {
            magic: Self::KIND.magic(),
            values: BTreeMap::new(),
        }
    }

    /// Insert or replace the value stored under `key`
    pub fn set_string(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.values.insert(key.into(), value.into());
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.values.get(key).map(String::as_str)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.values.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.values
            .iter()
            .map(|(key, value)| (key.as_str(), value.as_str()))
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl Default for OptionalData {
    fn default() -> Self {
        Self {
            magic: 0,
            values: BTreeMap::new(),
        }
    }
}

impl Record for OptionalData {
    const KIND: RecordKind = RecordKind::OptionalData;

    fn magic(&self) -> u32 {
        self.magic
    }
}
