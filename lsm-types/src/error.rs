// SPDX-License-Identifier: GPL-3.0-only

use thiserror::Error;

use crate::RecordKind;

/// Heap refused an allocation
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AllocError {
    #[error("{kind} allocation of {requested} units exceeds remaining budget of {available}")]
    Exhausted {
        kind: RecordKind,
        requested: usize,
        available: usize,
    },

    #[error("{kind} allocation refused by heap")]
    Refused { kind: RecordKind },
}

impl AllocError {
    pub fn kind(&self) -> RecordKind {
        match self {
            Self::Exhausted { kind, .. } | Self::Refused { kind } => *kind,
        }
    }
}

/// Errors raised while populating a native record after allocation
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RecordError {
    #[error("index {index} out of range for string list of size {size}")]
    IndexOutOfRange { index: usize, size: usize },

    #[error("invalid capability string: {0}")]
    InvalidCapabilities(String),
}

pub type Result<T> = std::result::Result<T, RecordError>;
