// SPDX-License-Identifier: GPL-3.0-only

//! Conversion cases described in TOML under `resources/cases`
//!
//! A case names the element class, the payload as JSON text, and the
//! expected result code and record count:
//!
//! ```toml
//! name = "volumes_bad_tail"
//! class = "Volume"
//! expect_error_number = 1
//! expect_count = 0
//! payload = '''[ ... ]'''
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use lsm_types::RecordKind;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::errors::{Result, TestingError};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConversionCase {
    pub name: String,
    pub class: String,
    #[serde(default)]
    pub expect_error_number: i32,
    #[serde(default)]
    pub expect_count: usize,
    pub payload: String,
}

impl ConversionCase {
    pub fn kind(&self) -> Result<RecordKind> {
        RecordKind::from_class_name(&self.class).ok_or_else(|| TestingError::CaseInvalid {
            case_name: self.name.clone(),
            reason: format!("unknown class '{}'", self.class),
        })
    }

    pub fn payload(&self) -> Result<Value> {
        serde_json::from_str(&self.payload).map_err(|error| TestingError::CaseInvalid {
            case_name: self.name.clone(),
            reason: format!("payload: {error}"),
        })
    }
}

pub fn cases_root() -> PathBuf {
    if let Ok(value) = std::env::var("LSM_TESTING_CASES_ROOT") {
        return PathBuf::from(value);
    }
    Path::new(env!("CARGO_MANIFEST_DIR")).join("resources/cases")
}

pub fn case_path_for_name(case_name: &str) -> PathBuf {
    cases_root().join(format!("{}.toml", case_name))
}

pub fn parse(case_name: &str, raw: &str) -> Result<ConversionCase> {
    let case: ConversionCase = toml::from_str(raw).map_err(|error| TestingError::CaseInvalid {
        case_name: case_name.to_string(),
        reason: error.to_string(),
    })?;
    validate(&case)?;
    Ok(case)
}

pub fn load_by_name(case_name: &str) -> Result<ConversionCase> {
    let path = case_path_for_name(case_name);
    if !path.exists() {
        return Err(TestingError::CaseNotFound {
            case_name: case_name.to_string(),
        });
    }

    let raw = fs::read_to_string(&path).map_err(|error| TestingError::CaseInvalid {
        case_name: case_name.to_string(),
        reason: error.to_string(),
    })?;
    parse(case_name, &raw)
}

/// Every case in [`cases_root`], sorted by file name
pub fn load_all() -> Result<Vec<ConversionCase>> {
    let root = cases_root();
    let entries = fs::read_dir(&root).map_err(|error| TestingError::CaseDirIo {
        path: root.clone(),
        reason: error.to_string(),
    })?;

    let mut names: Vec<String> = entries
        .filter_map(|entry| entry.ok())
        .map(|entry| entry.path())
        .filter(|path| path.extension().is_some_and(|ext| ext == "toml"))
        .filter_map(|path| path.file_stem().map(|stem| stem.to_string_lossy().into_owned()))
        .collect();
    names.sort();

    names.iter().map(|name| load_by_name(name)).collect()
}

pub fn validate(case: &ConversionCase) -> Result<()> {
    if case.name.is_empty() {
        return Err(TestingError::CaseInvalid {
            case_name: "<unknown>".to_string(),
            reason: "name must not be empty".to_string(),
        });
    }

    if !(0..=2).contains(&case.expect_error_number) {
        return Err(TestingError::CaseInvalid {
            case_name: case.name.clone(),
            reason: format!("unknown error number {}", case.expect_error_number),
        });
    }

    if case.expect_error_number != 0 && case.expect_count != 0 {
        return Err(TestingError::CaseInvalid {
            case_name: case.name.clone(),
            reason: "a failed conversion has no records".to_string(),
        });
    }

    case.kind()?;
    case.payload()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_minimal_case() {
        let case = parse(
            "inline",
            "name = \"inline\"\nclass = \"Pool\"\npayload = \"[]\"\n",
        )
        .unwrap();
        assert_eq!(case.kind().unwrap(), RecordKind::Pool);
        assert_eq!(case.expect_error_number, 0);
        assert_eq!(case.payload().unwrap(), Value::Array(Vec::new()));
    }

    #[test]
    fn reject_bad_cases() {
        assert!(parse("x", "name = \"x\"\nclass = \"Nope\"\npayload = \"[]\"\n").is_err());
        assert!(parse("x", "name = \"x\"\nclass = \"Pool\"\npayload = \"[\"\n").is_err());
        assert!(
            parse(
                "x",
                "name = \"x\"\nclass = \"Pool\"\nexpect_error_number = 1\nexpect_count = 2\npayload = \"[]\"\n"
            )
            .is_err()
        );
    }

    #[test]
    fn missing_case_file() {
        let err = load_by_name("no_such_case").unwrap_err();
        assert!(matches!(err, TestingError::CaseNotFound { .. }));
    }

    #[test]
    fn bundled_cases_load() {
        let cases = load_all().unwrap();
        assert!(!cases.is_empty());
    }
}
