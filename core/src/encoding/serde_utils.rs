//! Base64 serialization utilities for serde
//!
//! Keys and signatures are written to JSON as standard-alphabet base64
//! strings rather than arrays of numbers.

use base64::{engine::general_purpose::STANDARD as BASE64, Engine as _};
use serde::{Deserialize, Deserializer, Serializer};

/// Serialize/deserialize a fixed-size `[u8; N]` array as a base64 string.
/// Used for private keys (N = 32) and signatures (N = 64).
///
/// Usage:
/// ```ignore
/// #[serde(with = "crate::encoding::serde_utils::base64_array")]
/// pub key: [u8; 32],
/// ```
pub mod base64_array {
    use super::*;

    pub fn serialize<S, const N: usize>(data: &[u8; N], serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&BASE64.encode(data))
    }

    pub fn deserialize<'de, D, const N: usize>(deserializer: D) -> Result<[u8; N], D::Error>
    where
        D: Deserializer<'de>,
    {
        let s: String = Deserialize::deserialize(deserializer)?;
        let bytes = BASE64.decode(&s).map_err(serde::de::Error::custom)?;
        let len = bytes.len();
        bytes.try_into().map_err(|_| {
            serde::de::Error::custom(format!("invalid length: expected {N} bytes, got {len}"))
        })
    }
}
