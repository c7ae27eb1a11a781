//! Account and transaction identifiers

use std::fmt;
use candid::{CandidType, Deserialize};
use serde::Serialize;
use crate::infrastructure::{ConfigError, Result, VaultError};

/// 20-byte account address, normalised to lowercase `0x` hex
#[derive(CandidType, Deserialize, Serialize, Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Address(String);

impl Address {
    pub fn parse(text: &str) -> Result<Self> {
        let trimmed = text.trim();
        let hex = trimmed
            .strip_prefix("0x")
            .or_else(|| trimmed.strip_prefix("0X"))
            .unwrap_or("");

        if hex.len() != 40 || !hex.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(VaultError::Config(ConfigError::InvalidAddress {
                value: text.to_string(),
            }));
        }

        Ok(Address(format!("0x{}", hex.to_ascii_lowercase())))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// `0x1234...abcd` form for headers and banners
    pub fn short(&self) -> String {
        format!("{}...{}", &self.0[..6], &self.0[self.0.len() - 4..])
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Identifier the wallet returns for a broadcast transaction
#[derive(CandidType, Deserialize, Serialize, Debug, Clone, PartialEq, Eq, Hash)]
pub struct TxHash(String);

impl TxHash {
    pub fn new(hash: impl Into<String>) -> Self {
        TxHash(hash.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TxHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_normalises_case() {
        let address = Address::parse("0x8B138E9F76669423BE8664E1D4A6CD69427F4C3A").unwrap();
        assert_eq!(address.as_str(), "0x8b138e9f76669423be8664e1d4a6cd69427f4c3a");
    }

    #[test]
    fn test_parse_rejects_malformed() {
        for text in ["", "0x", "8b138e9f76669423be8664e1d4a6cd69427f4c3a", "0x8b13", "0xzz138e9f76669423be8664e1d4a6cd69427f4c3a"] {
            assert!(Address::parse(text).is_err(), "{} should be rejected", text);
        }
    }

    #[test]
    fn test_short_form() {
        let address = Address::parse("0x8b138e9f76669423be8664e1d4a6cd69427f4c3a").unwrap();
        assert_eq!(address.short(), "0x8b13...4c3a");
    }
}
