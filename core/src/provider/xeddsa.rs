//! XEdDSA signatures over Curve25519 keys
//!
//! Signs with an X25519 private scalar and verifies against the Montgomery
//! u-coordinate, by moving both to the birationally equivalent Edwards
//! curve. The Edwards sign bit of the signer's public point, which the
//! Montgomery form loses, travels in the top bit of the signature's last
//! byte. With that bit cleared the result is an ordinary Ed25519
//! signature under the Edwards form of the key.

use curve25519_dalek::edwards::{CompressedEdwardsY, EdwardsPoint};
use curve25519_dalek::montgomery::MontgomeryPoint;
use curve25519_dalek::scalar::Scalar;
use sha2::{Digest, Sha512};
use zeroize::Zeroizing;

use super::clamp;
use crate::constants::{PRIVATE_KEY_LEN, RAW_PUBLIC_KEY_LEN, SIGNATURE_LEN, SIGNATURE_NONCE_LEN};

/// Domain separator for the nonce hash: 0xFE followed by 31 bytes of 0xFF
const HASH1_PREFIX: [u8; 32] = {
    let mut prefix = [0xFFu8; 32];
    prefix[0] = 0xFE;
    prefix
};

const SIGN_BIT: u8 = 0b1000_0000;

/// The field prime 2^255 - 19, little-endian
const FIELD_PRIME: [u8; 32] = {
    let mut p = [0xFFu8; 32];
    p[0] = 0xED;
    p[31] = 0x7F;
    p
};

/// Whether `u` is a canonical field element, i.e. less than the prime
fn is_reduced(u: &[u8; 32]) -> bool {
    u.iter().rev().cmp(FIELD_PRIME.iter().rev()) == std::cmp::Ordering::Less
}

/// Sign `message` with the X25519 private scalar `private`.
///
/// `nonce` must be fresh random bytes; it only hardens the derived `r`
/// and does not need to be kept.
pub fn sign(
    private: &[u8; PRIVATE_KEY_LEN],
    message: &[u8],
    nonce: &[u8; SIGNATURE_NONCE_LEN],
) -> [u8; SIGNATURE_LEN] {
    let key_data = Zeroizing::new(clamp(*private));
    let a = Scalar::from_bytes_mod_order(*key_data);
    let ed_public = EdwardsPoint::mul_base(&a).compress();
    let sign_bit = ed_public.as_bytes()[31] & SIGN_BIT;

    let mut hash1 = Sha512::new();
    hash1.update(HASH1_PREFIX);
    hash1.update(&key_data[..]);
    hash1.update(message);
    hash1.update(nonce);
    let r = Scalar::from_hash(hash1);

    let cap_r = EdwardsPoint::mul_base(&r).compress();

    let mut hash = Sha512::new();
    hash.update(cap_r.as_bytes());
    hash.update(ed_public.as_bytes());
    hash.update(message);
    let h = Scalar::from_hash(hash);

    let s = h * a + r;

    let mut signature = [0u8; SIGNATURE_LEN];
    signature[..32].copy_from_slice(cap_r.as_bytes());
    signature[32..].copy_from_slice(s.as_bytes());
    signature[SIGNATURE_LEN - 1] &= !SIGN_BIT;
    signature[SIGNATURE_LEN - 1] |= sign_bit;
    signature
}

/// Verify `signature` over `message` against a Montgomery public key.
pub fn verify(
    public: &[u8; RAW_PUBLIC_KEY_LEN],
    message: &[u8],
    signature: &[u8; SIGNATURE_LEN],
) -> bool {
    if !is_reduced(public) {
        return false;
    }
    let sign_bit = (signature[SIGNATURE_LEN - 1] & SIGN_BIT) >> 7;
    let Some(ed_public) = MontgomeryPoint(*public).to_edwards(sign_bit) else {
        return false;
    };
    let cap_a = ed_public.compress();

    let mut cap_r = [0u8; 32];
    cap_r.copy_from_slice(&signature[..32]);
    let mut s = [0u8; 32];
    s.copy_from_slice(&signature[32..]);
    s[31] &= !SIGN_BIT;
    // s must fit in 253 bits
    if s[31] & 0b1110_0000 != 0 {
        return false;
    }

    let mut hash = Sha512::new();
    hash.update(cap_r);
    hash.update(cap_a.as_bytes());
    hash.update(message);
    let h = Scalar::from_hash(hash);

    let check = EdwardsPoint::vartime_double_scalar_mul_basepoint(
        &h,
        &(-ed_public),
        &Scalar::from_bytes_mod_order(s),
    );
    check.compress() == CompressedEdwardsY(cap_r)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn public_for(private: &[u8; 32]) -> [u8; 32] {
        MontgomeryPoint::mul_base_clamped(*private).to_bytes()
    }

    #[test]
    fn test_sign_verify() {
        let private = [0x11u8; 32];
        let public = public_for(&private);
        let sig = sign(&private, b"hello world", &[0x22; 64]);
        assert!(verify(&public, b"hello world", &sig));
        assert!(!verify(&public, b"hello worle", &sig));
    }

    #[test]
    fn test_nonce_changes_signature_not_validity() {
        let private = [0x33u8; 32];
        let public = public_for(&private);
        let sig1 = sign(&private, b"msg", &[1; 64]);
        let sig2 = sign(&private, b"msg", &[2; 64]);
        assert_ne!(sig1, sig2);
        assert!(verify(&public, b"msg", &sig1));
        assert!(verify(&public, b"msg", &sig2));
    }

    #[test]
    fn test_same_nonce_is_deterministic() {
        let private = [0x44u8; 32];
        assert_eq!(
            sign(&private, b"msg", &[9; 64]),
            sign(&private, b"msg", &[9; 64])
        );
    }

    #[test]
    fn test_unclamped_and_clamped_keys_agree() {
        let raw = [0xffu8; 32];
        let sig = sign(&raw, b"msg", &[0; 64]);
        assert_eq!(sig, sign(&clamp(raw), b"msg", &[0; 64]));
        assert!(verify(&public_for(&raw), b"msg", &sig));
    }

    #[test]
    fn test_wrong_key_rejected() {
        let sig = sign(&[0x55u8; 32], b"msg", &[0; 64]);
        assert!(!verify(&public_for(&[0x56u8; 32]), b"msg", &sig));
    }

    #[test]
    fn test_oversized_s_rejected() {
        let private = [0x66u8; 32];
        let public = public_for(&private);
        let mut sig = sign(&private, b"msg", &[0; 64]);
        sig[63] |= 0b0100_0000;
        assert!(!verify(&public, b"msg", &sig));
    }

    #[test]
    fn test_non_canonical_public_key_rejected() {
        assert!(!is_reduced(&FIELD_PRIME));
        let mut below = FIELD_PRIME;
        below[0] -= 1;
        assert!(is_reduced(&below));

        let sig = sign(&[0x12u8; 32], b"msg", &[0; 64]);
        assert!(!verify(&FIELD_PRIME, b"msg", &sig));

        // Bit 255 set puts u above the prime even though the low bits are a real key
        let private = [0x13u8; 32];
        let public = public_for(&private);
        let sig = sign(&private, b"msg", &[0; 64]);
        let mut high = public;
        high[31] |= SIGN_BIT;
        assert!(verify(&public, b"msg", &sig));
        assert!(!verify(&high, b"msg", &sig));
    }

    #[test]
    fn test_is_ed25519_signature_under_edwards_key() {
        use ed25519_dalek::Verifier;

        let private = [0x77u8; 32];
        let public = public_for(&private);
        let message = b"cross-check against ed25519";
        let sig = sign(&private, message, &[0x88; 64]);

        let sign_bit = (sig[63] & SIGN_BIT) >> 7;
        let ed_public = MontgomeryPoint(public).to_edwards(sign_bit).unwrap().compress();
        let verifying = ed25519_dalek::VerifyingKey::from_bytes(ed_public.as_bytes()).unwrap();

        let mut ed_sig = sig;
        ed_sig[63] &= !SIGN_BIT;
        let ed_sig = ed25519_dalek::Signature::from_bytes(&ed_sig);
        assert!(verifying.verify(message, &ed_sig).is_ok());
    }
}
