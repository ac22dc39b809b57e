//! Current primitives, backed by `x25519-dalek`

use x25519_dalek::{PublicKey as X25519Public, StaticSecret};

use super::{clamp, os_seed, sign_with_os_nonce, xeddsa, CurveProvider, ProviderError, RawKeyPair};
use crate::constants::{PRIVATE_KEY_LEN, RAW_PUBLIC_KEY_LEN, SHARED_SECRET_LEN, SIGNATURE_LEN};

/// Curve Provider used by [`ProviderVariant::Current`](super::ProviderVariant::Current)
#[derive(Debug, Clone, Copy, Default)]
pub struct X25519Provider;

impl CurveProvider for X25519Provider {
    fn key_pair(&self, seed: &[u8; PRIVATE_KEY_LEN]) -> Result<RawKeyPair, ProviderError> {
        let secret = StaticSecret::from(clamp(*seed));
        let public = X25519Public::from(&secret);
        Ok(RawKeyPair {
            public: public.to_bytes(),
            private: secret.to_bytes(),
        })
    }

    fn generate_key_pair(&self) -> Result<RawKeyPair, ProviderError> {
        let seed = os_seed()?;
        self.key_pair(&seed)
    }

    fn shared_secret(
        &self,
        public: &[u8; RAW_PUBLIC_KEY_LEN],
        private: &[u8; PRIVATE_KEY_LEN],
    ) -> Result<[u8; SHARED_SECRET_LEN], ProviderError> {
        let secret = StaticSecret::from(*private);
        let shared = secret.diffie_hellman(&X25519Public::from(*public));
        Ok(shared.to_bytes())
    }

    fn sign(
        &self,
        private: &[u8; PRIVATE_KEY_LEN],
        message: &[u8],
    ) -> Result<[u8; SIGNATURE_LEN], ProviderError> {
        sign_with_os_nonce(private, message)
    }

    fn verify(
        &self,
        public: &[u8; RAW_PUBLIC_KEY_LEN],
        message: &[u8],
        signature: &[u8; SIGNATURE_LEN],
    ) -> Result<bool, ProviderError> {
        Ok(xeddsa::verify(public, message, signature))
    }
}
