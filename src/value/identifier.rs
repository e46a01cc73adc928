//! Opaque identifier types.
//!
//! Some data stores hand out identifiers that have no useful native
//! equality (distinct instances representing the same key). Types that opt
//! into [`OpaqueIdentifier`] declare a canonical string rendering, and the
//! engine compares and deduplicates them by that rendering instead of by
//! structure.

use std::fmt;

use chrono::Utc;
use rand::Rng;
use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Capability trait for identifier value types without native equality.
///
/// Implementors promise that two identifiers naming the same record always
/// render to the same canonical string, and identifiers naming different
/// records never do. [`crate::Value`] uses this rendering as the comparable
/// form during deduplication and lookup-table matching.
pub trait OpaqueIdentifier: fmt::Debug + Send + Sync {
    /// Canonical, stable string rendering of this identifier.
    fn canonical_string(&self) -> String;
}

/// A 12-byte object identifier with a 24-character lowercase hex canonical
/// form (wire-compatible with BSON ObjectIds).
///
/// # Example
///
/// ```
/// use kinship::ObjectId;
///
/// let oid = ObjectId::parse_str("507f1f77bcf86cd799439011").unwrap();
/// assert_eq!(oid.to_string(), "507f1f77bcf86cd799439011");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ObjectId([u8; 12]);

impl ObjectId {
    /// Generate a new identifier: 4-byte big-endian UNIX timestamp followed
    /// by 8 random bytes.
    pub fn new() -> Self {
        let mut bytes = [0u8; 12];
        let seconds = Utc::now().timestamp() as u32;
        bytes[..4].copy_from_slice(&seconds.to_be_bytes());
        rand::thread_rng().fill(&mut bytes[4..]);
        Self(bytes)
    }

    pub fn from_bytes(bytes: [u8; 12]) -> Self {
        Self(bytes)
    }

    pub fn bytes(&self) -> &[u8; 12] {
        &self.0
    }

    /// Parse a 24-character hex string.
    pub fn parse_str(s: &str) -> Result<Self, ParseObjectIdError> {
        if s.len() != 24 {
            return Err(ParseObjectIdError {
                input: s.to_string(),
            });
        }
        let mut bytes = [0u8; 12];
        for (i, chunk) in s.as_bytes().chunks(2).enumerate() {
            let pair = std::str::from_utf8(chunk).map_err(|_| ParseObjectIdError {
                input: s.to_string(),
            })?;
            bytes[i] = u8::from_str_radix(pair, 16).map_err(|_| ParseObjectIdError {
                input: s.to_string(),
            })?;
        }
        Ok(Self(bytes))
    }
}

impl Default for ObjectId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for ObjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for byte in &self.0 {
            write!(f, "{:02x}", byte)?;
        }
        Ok(())
    }
}

impl OpaqueIdentifier for ObjectId {
    fn canonical_string(&self) -> String {
        self.to_string()
    }
}

impl OpaqueIdentifier for uuid::Uuid {
    fn canonical_string(&self) -> String {
        // Hyphenated lowercase, uuid's canonical textual form
        self.to_string()
    }
}

impl Serialize for ObjectId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for ObjectId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        ObjectId::parse_str(&s).map_err(D::Error::custom)
    }
}

/// Error returned when a string is not a valid [`ObjectId`] rendering.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseObjectIdError {
    input: String,
}

impl fmt::Display for ParseObjectIdError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "invalid ObjectId: expected 24 hex characters, got {:?}",
            self.input
        )
    }
}

impl std::error::Error for ParseObjectIdError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_and_display_round_trip() {
        let oid = ObjectId::parse_str("507f1f77bcf86cd799439011").unwrap();
        assert_eq!(oid.to_string(), "507f1f77bcf86cd799439011");
        assert_eq!(oid.canonical_string(), "507f1f77bcf86cd799439011");
    }

    #[test]
    fn test_parse_rejects_bad_input() {
        assert!(ObjectId::parse_str("507f").is_err());
        assert!(ObjectId::parse_str("zzzf1f77bcf86cd799439011").is_err());
        assert!(ObjectId::parse_str("").is_err());
    }

    #[test]
    fn test_distinct_instances_share_canonical_form() {
        let a = ObjectId::parse_str("507f1f77bcf86cd799439011").unwrap();
        let b = ObjectId::from_bytes(*a.bytes());
        assert_eq!(a.canonical_string(), b.canonical_string());
    }

    #[test]
    fn test_generated_ids_are_distinct() {
        let a = ObjectId::new();
        let b = ObjectId::new();
        assert_ne!(a.canonical_string(), b.canonical_string());
    }

    #[test]
    fn test_uuid_canonical_form() {
        let id = uuid::Uuid::parse_str("67e55044-10b1-426f-9247-bb680e5fe0c8").unwrap();
        assert_eq!(id.canonical_string(), "67e55044-10b1-426f-9247-bb680e5fe0c8");
    }

    #[test]
    fn test_serde_as_hex_string() {
        let oid = ObjectId::parse_str("507f1f77bcf86cd799439011").unwrap();
        let json = serde_json::to_string(&oid).unwrap();
        assert_eq!(json, "\"507f1f77bcf86cd799439011\"");
        let back: ObjectId = serde_json::from_str(&json).unwrap();
        assert_eq!(back, oid);
    }
}
