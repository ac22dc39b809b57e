//! Byte-level constants of the key format
//!
//! Every length and tag the layer checks is defined here so the
//! validation code and the providers agree on them.

/// Leading byte of a versioned (33-byte) public key
pub const KEY_VERSION_BYTE: u8 = 0x05;

/// Length of a private scalar
pub const PRIVATE_KEY_LEN: usize = 32;

/// Length of a raw Montgomery-form public key
pub const RAW_PUBLIC_KEY_LEN: usize = 32;

/// Length of a versioned public key (`[0x05] ++ raw`)
pub const VERSIONED_PUBLIC_KEY_LEN: usize = RAW_PUBLIC_KEY_LEN + 1;

/// Length of an agreement output
pub const SHARED_SECRET_LEN: usize = 32;

/// Length of an XEdDSA signature
pub const SIGNATURE_LEN: usize = 64;

/// Length of the random input mixed into each XEdDSA signature
pub const SIGNATURE_NONCE_LEN: usize = 64;
