//! Key and signature value types, and the two format gates
//!
//! [`validate_private_key`] and [`normalize_public_key`] are the only
//! places where caller-supplied key bytes are checked. Everything that
//! reaches a [`CurveProvider`](crate::provider::CurveProvider) has been
//! through one of them.

use base64::{engine::general_purpose::STANDARD as BASE64, Engine as _};
use serde::{Deserialize, Serialize};
use zeroize::{Zeroize, ZeroizeOnDrop};

use crate::constants::{
    KEY_VERSION_BYTE, PRIVATE_KEY_LEN, RAW_PUBLIC_KEY_LEN, SIGNATURE_LEN,
    VERSIONED_PUBLIC_KEY_LEN,
};
use crate::{Error, Result};

/// Check that `candidate` is a 32-byte private scalar.
///
/// `None` stands for an absent key and fails with [`Error::MissingKey`];
/// any other length fails with [`Error::InvalidLength`]. The bytes are not
/// otherwise inspected: clamping is the provider's business.
pub fn validate_private_key(candidate: Option<&[u8]>) -> Result<PrivateKey> {
    let bytes = candidate.ok_or(Error::MissingKey)?;
    let array: [u8; PRIVATE_KEY_LEN] = bytes.try_into().map_err(|_| Error::InvalidLength {
        expected: PRIVATE_KEY_LEN,
        actual: bytes.len(),
    })?;
    Ok(PrivateKey(array))
}

/// Strip a public key down to the raw 32-byte point the provider consumes.
///
/// Accepts a raw 32-byte key unchanged, or a 33-byte key whose first byte
/// is the version byte `0x05`. Every other shape is
/// [`Error::InvalidPublicKey`].
pub fn normalize_public_key(candidate: &[u8]) -> Result<[u8; RAW_PUBLIC_KEY_LEN]> {
    let raw = match candidate.len() {
        RAW_PUBLIC_KEY_LEN => candidate,
        VERSIONED_PUBLIC_KEY_LEN if candidate[0] == KEY_VERSION_BYTE => &candidate[1..],
        _ => return Err(Error::InvalidPublicKey),
    };
    raw.try_into().map_err(|_| Error::InvalidPublicKey)
}

/// A 32-byte Curve25519 private scalar, wiped on drop
#[derive(Clone, PartialEq, Eq, Zeroize, ZeroizeOnDrop, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PrivateKey(
    #[serde(with = "crate::encoding::serde_utils::base64_array")] [u8; PRIVATE_KEY_LEN],
);

impl std::fmt::Debug for PrivateKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PrivateKey").finish_non_exhaustive()
    }
}

impl PrivateKey {
    /// Create from raw bytes
    pub fn from_bytes(bytes: [u8; PRIVATE_KEY_LEN]) -> Self {
        Self(bytes)
    }

    pub fn as_bytes(&self) -> &[u8; PRIVATE_KEY_LEN] {
        &self.0
    }
}

/// A public key in its 33-byte versioned wire form
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct PublicKey([u8; VERSIONED_PUBLIC_KEY_LEN]);

impl PublicKey {
    /// Wrap a raw 32-byte point, prepending the version byte
    pub fn from_raw(raw: [u8; RAW_PUBLIC_KEY_LEN]) -> Self {
        let mut wire = [0u8; VERSIONED_PUBLIC_KEY_LEN];
        wire[0] = KEY_VERSION_BYTE;
        wire[1..].copy_from_slice(&raw);
        Self(wire)
    }

    /// Parse either accepted input shape into the versioned form
    pub fn from_slice(bytes: &[u8]) -> Result<Self> {
        normalize_public_key(bytes).map(Self::from_raw)
    }

    /// The versioned wire bytes
    pub fn as_bytes(&self) -> &[u8; VERSIONED_PUBLIC_KEY_LEN] {
        &self.0
    }

    /// The raw point, without the version byte
    pub fn raw(&self) -> [u8; RAW_PUBLIC_KEY_LEN] {
        let mut raw = [0u8; RAW_PUBLIC_KEY_LEN];
        raw.copy_from_slice(&self.0[1..]);
        raw
    }
}

impl AsRef<[u8]> for PublicKey {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl std::fmt::Debug for PublicKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PublicKey")
            .field("bytes", &BASE64.encode(self.0))
            .finish()
    }
}

// Serialized as a bare base64 string of the versioned bytes
impl Serialize for PublicKey {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&BASE64.encode(self.0))
    }
}

impl<'de> Deserialize<'de> for PublicKey {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s: String = Deserialize::deserialize(deserializer)?;
        let bytes = BASE64.decode(&s).map_err(serde::de::Error::custom)?;
        PublicKey::from_slice(&bytes).map_err(serde::de::Error::custom)
    }
}

/// A private key with its versioned public key
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyPair {
    #[serde(rename = "pubKey")]
    pub public: PublicKey,
    #[serde(rename = "privKey")]
    pub private: PrivateKey,
}

/// A 64-byte XEdDSA signature
#[derive(Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Signature(
    #[serde(with = "crate::encoding::serde_utils::base64_array")] [u8; SIGNATURE_LEN],
);

impl Signature {
    pub fn from_bytes(bytes: [u8; SIGNATURE_LEN]) -> Self {
        Self(bytes)
    }

    pub fn as_bytes(&self) -> &[u8; SIGNATURE_LEN] {
        &self.0
    }

    pub fn to_vec(&self) -> Vec<u8> {
        self.0.to_vec()
    }
}

impl AsRef<[u8]> for Signature {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl TryFrom<&[u8]> for Signature {
    type Error = Error;

    fn try_from(bytes: &[u8]) -> Result<Self> {
        bytes
            .try_into()
            .map(Self)
            .map_err(|_| Error::InvalidSignature {
                actual: Some(bytes.len()),
            })
    }
}

impl std::fmt::Debug for Signature {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("Signature")
            .field(&BASE64.encode(self.0))
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn versioned(raw: &[u8; 32]) -> Vec<u8> {
        let mut wire = vec![KEY_VERSION_BYTE];
        wire.extend_from_slice(raw);
        wire
    }

    #[test]
    fn test_normalize_strips_version_byte() {
        let wire = versioned(&[0u8; 32]);
        assert_eq!(wire.len(), 33);
        assert_eq!(normalize_public_key(&wire).unwrap(), [0u8; 32]);

        let raw: [u8; 32] = std::array::from_fn(|i| i as u8);
        assert_eq!(normalize_public_key(&versioned(&raw)).unwrap(), raw);
    }

    #[test]
    fn test_normalize_keeps_raw_key() {
        for fill in [0u8, 5, 0xff] {
            let raw = [fill; 32];
            assert_eq!(normalize_public_key(&raw).unwrap(), raw);
        }
    }

    #[test]
    fn test_normalize_rejects_bad_lengths() {
        for len in [0usize, 1, 31, 34, 64, 65] {
            let bytes = vec![KEY_VERSION_BYTE; len];
            assert!(
                matches!(normalize_public_key(&bytes), Err(Error::InvalidPublicKey)),
                "length {len} should be rejected"
            );
        }
    }

    #[test]
    fn test_normalize_rejects_wrong_version_byte() {
        for tag in [0u8, 4, 6, 0x85, 0xff] {
            let mut wire = vec![tag];
            wire.extend_from_slice(&[1u8; 32]);
            assert!(matches!(
                normalize_public_key(&wire),
                Err(Error::InvalidPublicKey)
            ));
        }
    }

    #[test]
    fn test_validate_private_key() {
        let key = validate_private_key(Some(&[7u8; 32])).unwrap();
        assert_eq!(key.as_bytes(), &[7u8; 32]);

        assert!(matches!(validate_private_key(None), Err(Error::MissingKey)));

        for len in [0usize, 31, 33] {
            let bytes = vec![KEY_VERSION_BYTE; len];
            match validate_private_key(Some(&bytes)) {
                Err(Error::InvalidLength { expected, actual }) => {
                    assert_eq!(expected, 32);
                    assert_eq!(actual, len);
                }
                other => panic!("expected InvalidLength for {len} bytes, got {other:?}"),
            }
        }
    }

    #[test]
    fn test_public_key_wire_form() {
        let raw = [9u8; 32];
        let key = PublicKey::from_raw(raw);
        assert_eq!(key.as_bytes()[0], KEY_VERSION_BYTE);
        assert_eq!(key.raw(), raw);
        assert_eq!(PublicKey::from_slice(&raw).unwrap(), key);
        assert_eq!(PublicKey::from_slice(key.as_bytes()).unwrap(), key);
    }

    #[test]
    fn test_private_key_debug_hides_bytes() {
        let key = PrivateKey::from_bytes([0xab; 32]);
        let debug = format!("{key:?}");
        assert!(!debug.contains("171"));
        assert!(!debug.contains(&BASE64.encode([0xab; 32])));
    }

    #[test]
    fn test_key_pair_json() {
        let pair = KeyPair {
            public: PublicKey::from_raw([3u8; 32]),
            private: PrivateKey::from_bytes([4u8; 32]),
        };
        let json = serde_json::to_value(&pair).unwrap();
        assert_eq!(json["pubKey"], BASE64.encode(pair.public.as_bytes()));
        assert_eq!(json["privKey"], BASE64.encode([4u8; 32]));

        let decoded: KeyPair = serde_json::from_value(json).unwrap();
        assert_eq!(decoded, pair);
    }

    #[test]
    fn test_public_key_deserialize_rejects_bad_version() {
        let mut wire = [0u8; 33];
        wire[0] = 6;
        let json = serde_json::to_string(&BASE64.encode(wire)).unwrap();
        assert!(serde_json::from_str::<PublicKey>(&json).is_err());
    }

    #[test]
    fn test_signature_length() {
        assert!(Signature::try_from(&[0u8; 64][..]).is_ok());
        assert!(matches!(
            Signature::try_from(&[0u8; 63][..]),
            Err(Error::InvalidSignature { actual: Some(63) })
        ));
    }
}
