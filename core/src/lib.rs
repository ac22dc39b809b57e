//! xcurve Core - Curve25519 key handling for a Signal-style key exchange
//!
//! This library checks and normalizes the byte-level key format (32-byte
//! private keys, public keys carrying a `0x05` version byte) and delegates
//! Diffie-Hellman agreement and XEdDSA signing to a pluggable Curve
//! Provider. Both the current and the deprecated provider paths are kept
//! for interoperability with older protocol versions.

pub mod constants;
pub mod curve;
pub mod encoding;
pub mod keys;
pub mod provider;

mod error;

use serde::{Deserialize, Serialize};

pub use error::{Error, Result};

/// Configuration for a [`Curve`]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Which provider implementation and key generation strategy to use
    pub variant: ProviderVariant,
}

// Re-export key types for convenience
pub use curve::{Curve, VerifyMode};
pub use keys::{normalize_public_key, validate_private_key, KeyPair, PrivateKey, PublicKey, Signature};
pub use provider::{CurveProvider, ProviderError, ProviderVariant, SecureRandom};
