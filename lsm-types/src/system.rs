// SPDX-License-Identifier: GPL-3.0-only

//! Storage system records and their capability vectors

use crate::error::{RecordError, Result};
use crate::{Record, RecordKind};

/// A storage array or host managed by a plugin
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct System {
    magic: u32,

    pub id: String,
    pub name: String,
    pub status: u32,
    pub status_info: String,
}

impl System {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        status: u32,
        status_info: impl Into<String>,
    ) -> Self {
        Self {
            magic: Self::KIND.magic(),
            id: id.into(),
            name: name.into(),
            status,
            status_info: status_info.into(),
        }
    }
}

impl Record for System {
    const KIND: RecordKind = RecordKind::System;

    fn magic(&self) -> u32 {
        self.magic
    }
}

/// Number of capability slots in a freshly allocated vector
pub const CAPABILITY_SLOTS: usize = 512;

/// Per-capability value marking the feature as supported
pub const CAPABILITY_SUPPORTED: u8 = 1;

/// Capability vector indexed by capability id
///
/// The wire form is a hex string with two lowercase digits per slot.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Capabilities {
    magic: u32,
    values: Vec<u8>,
}

impl Capabilities {
    /// All capabilities unsupported
    pub fn new() -> Self {
        Self {
            magic: Self::KIND.magic(),
            values: vec![0; CAPABILITY_SLOTS],
        }
    }

    /// Parse the hex wire encoding
    pub fn from_hex(encoded: &str) -> Result<Self> {
        if encoded.len() % 2 != 0 {
            return Err(RecordError::InvalidCapabilities(format!(
                "odd length {}",
                encoded.len()
            )));
        }

        let values = encoded
            .as_bytes()
            .chunks(2)
            .map(|pair| {
                Some(pair)
                    .filter(|pair| pair.iter().all(u8::is_ascii_hexdigit))
                    .and_then(|pair| std::str::from_utf8(pair).ok())
                    .and_then(|digits| u8::from_str_radix(digits, 16).ok())
                    .ok_or_else(|| {
                        RecordError::InvalidCapabilities(format!(
                            "bad digits {:?}",
                            String::from_utf8_lossy(pair)
                        ))
                    })
            })
            .collect::<Result<Vec<u8>>>()?;

        Ok(Self {
            magic: Self::KIND.magic(),
            values,
        })
    }

    pub fn to_hex(&self) -> String {
        self.values.iter().map(|value| format!("{value:02x}")).collect()
    }

    /// Value for `capability`; slots past the end read as unsupported
    pub fn get(&self, capability: usize) -> u8 {
        self.values.get(capability).copied().unwrap_or(0)
    }

    /// Store `value` for `capability`, growing the vector as needed.
    /// Ids past what the vector can hold are refused.
    pub fn set(&mut self, capability: usize, value: u8) -> Result<()> {
        if capability >= self.values.len() {
            let len = capability.checked_add(1).ok_or_else(|| {
                RecordError::InvalidCapabilities(format!("capability id {capability} out of range"))
            })?;
            self.values.resize(len, 0);
        }
        self.values[capability] = value;
        Ok(())
    }

    pub fn is_supported(&self, capability: usize) -> bool {
        self.get(capability) == CAPABILITY_SUPPORTED
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl Record for Capabilities {
    const KIND: RecordKind = RecordKind::Capabilities;

    fn magic(&self) -> u32 {
        self.magic
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_capabilities_hex_roundtrip() {
        let caps = Capabilities::from_hex("0001ff10").unwrap();
        assert_eq!(caps.len(), 4);
        assert!(caps.is_supported(1));
        assert!(!caps.is_supported(0));
        assert_eq!(caps.get(2), 0xff);
        assert_eq!(caps.to_hex(), "0001ff10");
    }

    #[test]
    fn test_capabilities_uppercase_input_normalizes() {
        let caps = Capabilities::from_hex("0A0B").unwrap();
        assert_eq!(caps.to_hex(), "0a0b");
    }

    #[test]
    fn test_capabilities_rejects_bad_input() {
        assert!(Capabilities::from_hex("abc").is_err());
        assert!(Capabilities::from_hex("zz").is_err());
        assert!(Capabilities::from_hex("+1").is_err());
    }

    #[test]
    fn test_capabilities_set_grows() {
        let mut caps = Capabilities::from_hex("").unwrap();
        assert!(caps.is_empty());
        caps.set(3, CAPABILITY_SUPPORTED).unwrap();
        assert_eq!(caps.to_hex(), "00000001");
        assert_eq!(Capabilities::new().len(), CAPABILITY_SLOTS);
    }

    #[test]
    fn test_capabilities_set_max_id_is_refused() {
        let mut caps = Capabilities::from_hex("01").unwrap();
        assert!(caps.set(usize::MAX, CAPABILITY_SUPPORTED).is_err());
        assert_eq!(caps.to_hex(), "01");
    }

    #[test]
    fn test_system_validity() {
        assert!(System::new("sys", "array", 1, "").is_valid());
        assert!(!System::default().is_valid());
    }
}
