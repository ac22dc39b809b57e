//! Key normalization and agreement layer
//!
//! [`Curve`] validates every key, message and signature against the byte
//! contract before anything reaches the [`CurveProvider`], and re-attaches
//! the version byte to every public key it hands back.

use std::fmt;
use std::sync::Arc;

use zeroize::Zeroizing;

use crate::constants::{PRIVATE_KEY_LEN, SHARED_SECRET_LEN};
use crate::keys::{normalize_public_key, validate_private_key, KeyPair, PrivateKey, PublicKey, Signature};
use crate::provider::{CurveProvider, OsRandom, ProviderVariant, RawKeyPair, SecureRandom};
use crate::{Config, Error, Result};

/// How [`Curve::verify`] treats its input
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum VerifyMode {
    /// Validate the inputs and check the signature
    #[default]
    Full,
    /// Check the public key and message, then return `true` without
    /// looking at the signature.
    ///
    /// Only for a handshake initiator checking the ephemeral key it just
    /// generated itself. Never use this for a key that came from a peer.
    InitiatorShortcut,
}

/// Curve25519 agreement and XEdDSA signing behind the key format checks
#[derive(Clone)]
pub struct Curve {
    variant: ProviderVariant,
    provider: Arc<dyn CurveProvider>,
    random: Arc<dyn SecureRandom>,
}

impl fmt::Debug for Curve {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Curve")
            .field("variant", &self.variant)
            .finish_non_exhaustive()
    }
}

impl Default for Curve {
    fn default() -> Self {
        Self::new(&Config::default())
    }
}

impl Curve {
    /// Create a layer over the provider that ships with the configured variant
    pub fn new(config: &Config) -> Self {
        Self::with_provider(
            config.variant,
            config.variant.default_provider(),
            Arc::new(OsRandom),
        )
    }

    /// Create a layer over caller-supplied collaborators
    pub fn with_provider(
        variant: ProviderVariant,
        provider: Arc<dyn CurveProvider>,
        random: Arc<dyn SecureRandom>,
    ) -> Self {
        Self {
            variant,
            provider,
            random,
        }
    }

    pub fn variant(&self) -> ProviderVariant {
        self.variant
    }

    /// Generate a new key pair.
    ///
    /// The current variant asks the provider for a key pair in one call.
    /// The deprecated variant draws a 32-byte seed from the random source
    /// and asks the provider to derive from it. Either way the public key
    /// comes back in versioned form. Randomness failures are returned, not
    /// retried.
    pub fn generate_key_pair(&self) -> Result<KeyPair> {
        tracing::debug!(variant = %self.variant, "Generating key pair");
        let raw = match self.variant {
            ProviderVariant::Current => self.provider.generate_key_pair()?,
            ProviderVariant::Deprecated => {
                let mut seed = Zeroizing::new([0u8; PRIVATE_KEY_LEN]);
                self.random.fill(&mut seed[..])?;
                self.provider.key_pair(&seed)?
            }
        };
        Ok(wrap(&raw))
    }

    /// Derive the key pair for an existing private key
    pub fn create_key_pair(&self, private: &[u8]) -> Result<KeyPair> {
        let private = validate_private_key(Some(private))?;
        let raw = self.provider.key_pair(private.as_bytes())?;
        Ok(wrap(&raw))
    }

    /// Diffie-Hellman agreement between a peer's public key and our private key.
    ///
    /// The public key is checked before the private key, so input with both
    /// wrong reports [`Error::InvalidPublicKey`].
    pub fn compute_shared_secret(
        &self,
        public: &[u8],
        private: &[u8],
    ) -> Result<[u8; SHARED_SECRET_LEN]> {
        let public = normalize_public_key(public)?;
        let private = validate_private_key(Some(private))?;
        tracing::trace!(variant = %self.variant, "Computing shared secret");
        Ok(self.provider.shared_secret(&public, private.as_bytes())?)
    }

    /// Sign a non-empty message.
    ///
    /// An absent private key is [`Error::MissingKey`].
    pub fn sign(&self, private: Option<&[u8]>, message: &[u8]) -> Result<Signature> {
        let private = validate_private_key(private)?;
        if message.is_empty() {
            return Err(Error::InvalidMessage);
        }
        let signature = self.provider.sign(private.as_bytes(), message)?;
        Ok(Signature::from_bytes(signature))
    }

    /// Verify a signature.
    ///
    /// A signature that does not match is `Ok(false)`. An absent message
    /// or an absent or wrongly sized signature is an error.
    ///
    /// # Warning
    ///
    /// With [`VerifyMode::InitiatorShortcut`] the public key and message
    /// are still checked, but then this returns `Ok(true)` without looking
    /// at the signature at all, not even its length, and without any
    /// cryptographic verification. It exists for a handshake initiator's
    /// own freshly generated key and must never be used with a key
    /// supplied by a peer.
    pub fn verify(
        &self,
        public: &[u8],
        message: Option<&[u8]>,
        signature: Option<&[u8]>,
        mode: VerifyMode,
    ) -> Result<bool> {
        let public = normalize_public_key(public)?;
        let message = message.ok_or(Error::InvalidMessage)?;

        if mode == VerifyMode::InitiatorShortcut {
            tracing::warn!("Signature verification skipped by initiator shortcut");
            return Ok(true);
        }

        let signature = signature.ok_or(Error::InvalidSignature { actual: None })?;
        let signature = Signature::try_from(signature)?;

        let valid = self.provider.verify(&public, message, signature.as_bytes())?;
        if !valid {
            tracing::debug!("Signature did not verify");
        }
        Ok(valid)
    }
}

/// Re-wrap provider output with the version byte
fn wrap(raw: &RawKeyPair) -> KeyPair {
    KeyPair {
        public: PublicKey::from_raw(raw.public),
        private: PrivateKey::from_bytes(raw.private),
    }
}
