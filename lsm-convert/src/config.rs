// SPDX-License-Identifier: GPL-3.0-only

use std::fs;
use std::path::{Path, PathBuf};

use lsm_types::{BoundedHeap, Heap, SystemHeap};
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, Eq, PartialEq)]
#[serde(rename_all = "lowercase")]
pub enum LoggingLevel {
    Error,
    Warn,
    #[default]
    Info,
    Debug,
    Trace,
}

impl LoggingLevel {
    pub fn as_directive(self) -> &'static str {
        match self {
            Self::Error => "error",
            Self::Warn => "warn",
            Self::Info => "info",
            Self::Debug => "debug",
            Self::Trace => "trace",
        }
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read config {path:?}: {reason}")]
    Io { path: PathBuf, reason: String },
    #[error("invalid config {path:?}: {reason}")]
    Invalid { path: PathBuf, reason: String },
}

/// Settings for hosts that drive the converters
#[derive(Debug, Clone, Default, Serialize, Deserialize, Eq, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct ConvertConfig {
    pub log_level: LoggingLevel,
    /// Live allocation units allowed at once; unbounded when unset
    pub heap_limit: Option<usize>,
}

impl ConvertConfig {
    pub fn from_toml_str(raw: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(raw)
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let raw = fs::read_to_string(path).map_err(|error| ConfigError::Io {
            path: path.to_path_buf(),
            reason: error.to_string(),
        })?;

        Self::from_toml_str(&raw).map_err(|error| ConfigError::Invalid {
            path: path.to_path_buf(),
            reason: error.to_string(),
        })
    }

    /// Heap to allocate converted records from
    pub fn heap(&self) -> Box<dyn Heap> {
        match self.heap_limit {
            Some(budget) => Box::new(BoundedHeap::new(budget)),
            None => Box::new(SystemHeap),
        }
    }
}
