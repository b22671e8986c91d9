use crate::error::CommonError;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

pub const ADDRESS_LENGTH: usize = 20;

// --- NewTypes ---

/// A 20-byte account or contract address.
///
/// Parsing accepts hex with or without the `0x` prefix in any letter case, so two
/// spellings of the same account always compare equal.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default, PartialOrd, Ord)]
pub struct Address(pub [u8; ADDRESS_LENGTH]);

impl Address {
    pub const ZERO: Address = Address([0u8; ADDRESS_LENGTH]);

    pub fn from_slice(bytes: &[u8]) -> Result<Self, CommonError> {
        if bytes.len() != ADDRESS_LENGTH {
            return Err(CommonError::InvalidAddress(format!(
                "expected {} bytes, got {}",
                ADDRESS_LENGTH,
                bytes.len()
            )));
        }
        let mut arr = [0u8; ADDRESS_LENGTH];
        arr.copy_from_slice(bytes);
        Ok(Address(arr))
    }

    pub fn is_zero(&self) -> bool {
        self.0 == [0u8; ADDRESS_LENGTH]
    }

    /// EIP-55 mixed-case rendering.
    pub fn to_checksum(&self) -> String {
        let lower = hex::encode(self.0);
        let hash = keccak_hash::keccak(lower.as_bytes());

        let mut out = String::with_capacity(2 + lower.len());
        out.push_str("0x");
        for (i, c) in lower.chars().enumerate() {
            let nibble = (hash.0[i / 2] >> (if i % 2 == 0 { 4 } else { 0 })) & 0x0f;
            if c.is_ascii_alphabetic() && nibble >= 8 {
                out.push(c.to_ascii_uppercase());
            } else {
                out.push(c);
            }
        }
        out
    }
}

impl FromStr for Address {
    type Err = CommonError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let digits = trimmed
            .strip_prefix("0x")
            .or_else(|| trimmed.strip_prefix("0X"))
            .unwrap_or(trimmed);
        if digits.len() != ADDRESS_LENGTH * 2 {
            return Err(CommonError::InvalidAddress(format!(
                "'{}' is not {} hex characters",
                s,
                ADDRESS_LENGTH * 2
            )));
        }
        let bytes = hex::decode(digits)
            .map_err(|e| CommonError::InvalidAddress(format!("'{}': {}", s, e)))?;
        Address::from_slice(&bytes)
    }
}

impl fmt::Debug for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Address(0x{})", hex::encode(self.0))
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{}", hex::encode(self.0))
    }
}

impl Serialize for Address {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for Address {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

impl From<ethabi::Address> for Address {
    fn from(value: ethabi::Address) -> Self {
        Address(value.0)
    }
}

impl From<Address> for ethabi::Address {
    fn from(value: Address) -> Self {
        ethabi::Address::from(value.0)
    }
}

/// Compares two address strings ignoring letter case and surrounding whitespace.
pub fn same_address(a: &str, b: &str) -> bool {
    let (a, b) = (a.trim(), b.trim());
    !a.is_empty() && a.eq_ignore_ascii_case(b)
}

#[cfg(test)]
mod tests {
    use super::*;

    const OWNER: &str = "0xf39Fd6e51aad88F6F4ce6aB8827279cffFb92266";

    #[test]
    fn test_parse_with_and_without_prefix() {
        let a: Address = OWNER.parse().unwrap();
        let b: Address = OWNER.trim_start_matches("0x").parse().unwrap();
        assert_eq!(a, b);
        assert_eq!(a.to_string(), OWNER.to_lowercase());
    }

    #[test]
    fn test_case_does_not_matter() {
        let upper: Address = OWNER.to_uppercase().replacen("0X", "0x", 1).parse().unwrap();
        let lower: Address = OWNER.to_lowercase().parse().unwrap();
        assert_eq!(upper, lower);
    }

    #[test]
    fn test_rejects_bad_length_and_digits() {
        assert!("0x1234".parse::<Address>().is_err());
        assert!("0xzz9Fd6e51aad88F6F4ce6aB8827279cffFb92266".parse::<Address>().is_err());
        assert!("".parse::<Address>().is_err());
    }

    #[test]
    fn test_checksum_matches_eip55() {
        let a: Address = OWNER.to_lowercase().parse().unwrap();
        assert_eq!(a.to_checksum(), OWNER);

        let token: Address = "0x5fbdb2315678afecb367f032d93f642f64180aa3".parse().unwrap();
        assert_eq!(token.to_checksum(), "0x5FbDB2315678afecb367f032d93F642f64180aa3");
    }

    #[test]
    fn test_serde_roundtrip_uses_hex_string() {
        let a: Address = OWNER.parse().unwrap();
        let json = serde_json::to_string(&a).unwrap();
        assert_eq!(json, format!("\"{}\"", OWNER.to_lowercase()));
        let back: Address = serde_json::from_str(&json).unwrap();
        assert_eq!(a, back);
    }

    #[test]
    fn test_same_address_ignores_case() {
        assert!(same_address(OWNER, &OWNER.to_lowercase()));
        assert!(same_address(&OWNER.to_uppercase(), OWNER));
        assert!(!same_address(OWNER, "0x70997970C51812dc3A010C7d01b50e0d17dc79C8"));
        assert!(!same_address("", ""));
    }

    #[test]
    fn test_zero_address() {
        assert!(Address::ZERO.is_zero());
        assert!(!OWNER.parse::<Address>().unwrap().is_zero());
    }
}
