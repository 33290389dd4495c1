// SPDX-License-Identifier: GPL-3.0-only

use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum TestingError {
    #[error("case file not found for '{case_name}' in resources/cases")]
    CaseNotFound { case_name: String },
    #[error("invalid case file '{case_name}': {reason}")]
    CaseInvalid { case_name: String, reason: String },
    #[error("cannot list case directory {path:?}: {reason}")]
    CaseDirIo { path: PathBuf, reason: String },
}

pub type Result<T> = std::result::Result<T, TestingError>;
