//! Text encoding of keys and signatures
//!
//! Callers outside Rust hand keys over as base64 text. Decoding is where a
//! value that is not a byte buffer at all gets turned away, before the
//! length checks in [`crate::keys`] ever run.

pub mod serde_utils;

use base64::{engine::general_purpose::STANDARD as BASE64, Engine as _};

use crate::{Error, Result};

/// Decode a key argument that may be absent.
///
/// `None` is [`Error::MissingKey`]; text that is not base64 is
/// [`Error::InvalidType`].
pub fn decode_key(text: Option<&str>) -> Result<Vec<u8>> {
    let text = text.ok_or(Error::MissingKey)?;
    decode_bytes(text)
}

/// Decode base64 text into bytes
pub fn decode_bytes(text: &str) -> Result<Vec<u8>> {
    BASE64
        .decode(text.trim())
        .map_err(|e| Error::InvalidType(format!("expected base64 bytes: {e}")))
}

/// Encode bytes as base64 text
pub fn encode(bytes: impl AsRef<[u8]>) -> String {
    BASE64.encode(bytes)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_key_missing() {
        assert!(matches!(decode_key(None), Err(Error::MissingKey)));
    }

    #[test]
    fn test_decode_rejects_non_base64() {
        assert!(matches!(
            decode_key(Some("not base64!")),
            Err(Error::InvalidType(_))
        ));
    }

    #[test]
    fn test_decode_trims_whitespace() {
        let text = format!("  {}\n", encode([5u8; 33]));
        assert_eq!(decode_bytes(&text).unwrap(), vec![5u8; 33]);
    }

    #[test]
    fn test_empty_text_is_empty_buffer() {
        // Decodes fine; the length check belongs to the key validators
        assert_eq!(decode_key(Some("")).unwrap(), Vec::<u8>::new());
    }
}
