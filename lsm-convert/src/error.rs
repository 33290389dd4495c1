// SPDX-License-Identifier: GPL-3.0-only

use lsm_types::AllocError;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::value::FieldError;

/// Result code reported by collection converters
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "i32", try_from = "i32")]
pub enum ErrorNumber {
    Ok,
    InternalError,
    NoMemory,
}

impl ErrorNumber {
    pub fn code(self) -> i32 {
        match self {
            Self::Ok => 0,
            Self::InternalError => 1,
            Self::NoMemory => 2,
        }
    }

    pub fn from_code(code: i32) -> Option<Self> {
        match code {
            0 => Some(Self::Ok),
            1 => Some(Self::InternalError),
            2 => Some(Self::NoMemory),
            _ => None,
        }
    }
}

impl From<ErrorNumber> for i32 {
    fn from(number: ErrorNumber) -> Self {
        number.code()
    }
}

impl TryFrom<i32> for ErrorNumber {
    type Error = String;

    fn try_from(code: i32) -> std::result::Result<Self, Self::Error> {
        Self::from_code(code).ok_or_else(|| format!("unknown error number {code}"))
    }
}

/// Why a collection conversion produced nothing
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConvertError {
    #[error("no memory for record array: {0}")]
    NoMemory(#[from] AllocError),

    #[error("element {index}: {source}")]
    Field {
        index: usize,
        #[source]
        source: FieldError,
    },

    #[error("element {index} did not convert to a {class} record")]
    Rejected { index: usize, class: &'static str },
}

impl ConvertError {
    pub fn code(&self) -> ErrorNumber {
        match self {
            Self::NoMemory(_) => ErrorNumber::NoMemory,
            Self::Field { .. } | Self::Rejected { .. } => ErrorNumber::InternalError,
        }
    }

    /// Position of the failing element, if an element failed
    pub fn index(&self) -> Option<usize> {
        match self {
            Self::NoMemory(_) => None,
            Self::Field { index, .. } | Self::Rejected { index, .. } => Some(*index),
        }
    }
}

/// Collapse a conversion outcome into its result code
pub fn error_number<T>(result: &Result<T>) -> ErrorNumber {
    match result {
        Ok(_) => ErrorNumber::Ok,
        Err(error) => error.code(),
    }
}

pub type Result<T> = std::result::Result<T, ConvertError>;

#[cfg(test)]
mod tests {
    use super::*;
    use lsm_types::RecordKind;

    #[test]
    fn error_number_roundtrips() {
        for number in [ErrorNumber::Ok, ErrorNumber::InternalError, ErrorNumber::NoMemory] {
            let json = serde_json::to_string(&number).expect("serialize error number");
            assert_eq!(json, number.code().to_string());
            let parsed: ErrorNumber = serde_json::from_str(&json).expect("deserialize error number");
            assert_eq!(parsed, number);
        }
        assert!(serde_json::from_str::<ErrorNumber>("99").is_err());
    }

    #[test]
    fn convert_error_codes() {
        let no_memory = ConvertError::from(AllocError::Refused {
            kind: RecordKind::Volume,
        });
        assert_eq!(no_memory.code(), ErrorNumber::NoMemory);
        assert_eq!(no_memory.index(), None);

        let field = ConvertError::Field {
            index: 2,
            source: FieldError::missing("id"),
        };
        assert_eq!(field.code(), ErrorNumber::InternalError);
        assert_eq!(field.index(), Some(2));
        assert_eq!(field.to_string(), "element 2: field 'id': missing");

        let rejected = ConvertError::Rejected {
            index: 0,
            class: "Disk",
        };
        assert_eq!(rejected.code(), ErrorNumber::InternalError);
    }

    #[test]
    fn error_number_of_result() {
        let ok: Result<()> = Ok(());
        assert_eq!(error_number(&ok), ErrorNumber::Ok);
    }
}
