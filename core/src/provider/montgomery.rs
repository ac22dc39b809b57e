//! Deprecated primitives, running the `curve25519-dalek` Montgomery ladder
//! directly instead of going through `x25519-dalek`

use curve25519_dalek::montgomery::MontgomeryPoint;

use super::{clamp, os_seed, sign_with_os_nonce, xeddsa, CurveProvider, ProviderError, RawKeyPair};
use crate::constants::{PRIVATE_KEY_LEN, RAW_PUBLIC_KEY_LEN, SHARED_SECRET_LEN, SIGNATURE_LEN};

/// Curve Provider used by [`ProviderVariant::Deprecated`](super::ProviderVariant::Deprecated)
#[derive(Debug, Clone, Copy, Default)]
pub struct MontgomeryProvider;

impl CurveProvider for MontgomeryProvider {
    fn key_pair(&self, seed: &[u8; PRIVATE_KEY_LEN]) -> Result<RawKeyPair, ProviderError> {
        let private = clamp(*seed);
        Ok(RawKeyPair {
            public: MontgomeryPoint::mul_base_clamped(private).to_bytes(),
            private,
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
        Ok(MontgomeryPoint(*public).mul_clamped(*private).to_bytes())
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
