use thiserror::Error;

use crate::provider::ProviderError;

/// xcurve error types
#[derive(Error, Debug)]
pub enum Error {
    #[error("Missing private key")]
    MissingKey,

    #[error("Invalid key type: {0}")]
    InvalidType(String),

    #[error("Incorrect private key length: expected {expected}, got {actual}")]
    InvalidLength { expected: usize, actual: usize },

    #[error("Invalid public key")]
    InvalidPublicKey,

    #[error("Invalid message")]
    InvalidMessage,

    #[error("Invalid signature: expected 64 bytes, got {actual:?}")]
    InvalidSignature { actual: Option<usize> },

    #[error("Curve provider failure: {0}")]
    ProviderFailure(#[from] ProviderError),
}

pub type Result<T> = std::result::Result<T, Error>;
