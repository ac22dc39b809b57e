//! Curve Provider seam
//!
//! The layer never does curve arithmetic itself. It hands fixed-size,
//! already validated buffers to a [`CurveProvider`] and, on the deprecated
//! generation path, draws seeds from a [`SecureRandom`].
//!
//! - [`X25519Provider`]: current primitives, backed by `x25519-dalek`
//! - [`MontgomeryProvider`]: deprecated primitives, backed by the raw
//!   `curve25519-dalek` Montgomery ladder
//!
//! Both sign and verify with [`xeddsa`].

mod montgomery;
mod x25519;
pub mod xeddsa;

use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use rand::rngs::OsRng;
use rand::RngCore;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use zeroize::{Zeroize, ZeroizeOnDrop, Zeroizing};

use crate::constants::{
    PRIVATE_KEY_LEN, RAW_PUBLIC_KEY_LEN, SHARED_SECRET_LEN, SIGNATURE_LEN, SIGNATURE_NONCE_LEN,
};

pub use montgomery::MontgomeryProvider;
pub use x25519::X25519Provider;

/// Failure reported by a provider or randomness source.
///
/// Carried through the layer untouched as
/// [`Error::ProviderFailure`](crate::Error::ProviderFailure).
#[derive(Error, Debug)]
#[error("{message}")]
pub struct ProviderError {
    message: String,
    #[source]
    source: Option<Box<dyn std::error::Error + Send + Sync + 'static>>,
}

impl ProviderError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            source: None,
        }
    }

    pub fn with_source(
        message: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

impl From<rand::Error> for ProviderError {
    fn from(e: rand::Error) -> Self {
        Self::with_source("secure random source failed", e)
    }
}

/// Raw provider output: an unversioned public point and its private scalar
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct RawKeyPair {
    #[zeroize(skip)]
    pub public: [u8; RAW_PUBLIC_KEY_LEN],
    pub private: [u8; PRIVATE_KEY_LEN],
}

impl fmt::Debug for RawKeyPair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RawKeyPair")
            .field("public", &self.public)
            .finish_non_exhaustive()
    }
}

/// Curve25519 primitives the layer delegates to.
///
/// Implementations must be reentrant: the layer calls them from any
/// thread without locking.
pub trait CurveProvider: Send + Sync {
    /// Derive a key pair from a 32-byte seed
    fn key_pair(&self, seed: &[u8; PRIVATE_KEY_LEN]) -> Result<RawKeyPair, ProviderError>;

    /// Generate a fresh key pair in one step
    fn generate_key_pair(&self) -> Result<RawKeyPair, ProviderError>;

    /// X25519 agreement
    fn shared_secret(
        &self,
        public: &[u8; RAW_PUBLIC_KEY_LEN],
        private: &[u8; PRIVATE_KEY_LEN],
    ) -> Result<[u8; SHARED_SECRET_LEN], ProviderError>;

    fn sign(
        &self,
        private: &[u8; PRIVATE_KEY_LEN],
        message: &[u8],
    ) -> Result<[u8; SIGNATURE_LEN], ProviderError>;

    /// Check a signature. A bad signature is `Ok(false)`, not an error.
    fn verify(
        &self,
        public: &[u8; RAW_PUBLIC_KEY_LEN],
        message: &[u8],
        signature: &[u8; SIGNATURE_LEN],
    ) -> Result<bool, ProviderError>;
}

/// Cryptographically secure byte source
pub trait SecureRandom: Send + Sync {
    fn fill(&self, dest: &mut [u8]) -> Result<(), ProviderError>;
}

/// Operating system randomness
#[derive(Debug, Clone, Copy, Default)]
pub struct OsRandom;

impl SecureRandom for OsRandom {
    fn fill(&self, dest: &mut [u8]) -> Result<(), ProviderError> {
        OsRng.try_fill_bytes(dest)?;
        Ok(())
    }
}

/// Which primitive implementation and generation strategy to use
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProviderVariant {
    /// Atomic generate-and-derive in the provider
    #[default]
    Current,
    /// Random seed drawn by the layer, then a separate derivation
    Deprecated,
}

impl ProviderVariant {
    /// The provider this variant ships with
    pub fn default_provider(self) -> Arc<dyn CurveProvider> {
        match self {
            ProviderVariant::Current => Arc::new(X25519Provider),
            ProviderVariant::Deprecated => Arc::new(MontgomeryProvider),
        }
    }
}

impl fmt::Display for ProviderVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProviderVariant::Current => f.write_str("current"),
            ProviderVariant::Deprecated => f.write_str("deprecated"),
        }
    }
}

impl FromStr for ProviderVariant {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "current" => Ok(ProviderVariant::Current),
            "deprecated" => Ok(ProviderVariant::Deprecated),
            other => Err(format!(
                "unknown provider variant '{other}' (expected 'current' or 'deprecated')"
            )),
        }
    }
}

/// RFC 7748 scalar clamping
pub(crate) fn clamp(mut scalar: [u8; PRIVATE_KEY_LEN]) -> [u8; PRIVATE_KEY_LEN] {
    scalar[0] &= 248;
    scalar[31] &= 127;
    scalar[31] |= 64;
    scalar
}

/// Draw a seed from the OS, for the providers' own atomic generation
fn os_seed() -> Result<Zeroizing<[u8; PRIVATE_KEY_LEN]>, ProviderError> {
    let mut seed = Zeroizing::new([0u8; PRIVATE_KEY_LEN]);
    OsRandom.fill(&mut seed[..])?;
    Ok(seed)
}

/// XEdDSA signing with a fresh OS nonce, shared by both providers
fn sign_with_os_nonce(
    private: &[u8; PRIVATE_KEY_LEN],
    message: &[u8],
) -> Result<[u8; SIGNATURE_LEN], ProviderError> {
    let mut nonce = Zeroizing::new([0u8; SIGNATURE_NONCE_LEN]);
    OsRandom.fill(&mut nonce[..])?;
    Ok(xeddsa::sign(private, message, &nonce))
}
