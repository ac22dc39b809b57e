//! Signing and verification commands.

use anyhow::bail;
use xcurve_core::encoding::{decode_bytes, decode_key, encode};
use xcurve_core::{Curve, VerifyMode};

/// Sign a message and print the base64 signature.
pub fn sign(curve: &Curve, private: Option<&str>, message: &[u8]) -> anyhow::Result<()> {
    let private = decode_key(private)?;
    let signature = curve.sign(Some(&private), message)?;
    println!("{}", encode(signature));
    Ok(())
}

/// Verify a signature, failing the command if it does not match.
pub fn verify(
    curve: &Curve,
    public: &str,
    message: Option<&[u8]>,
    signature: Option<&str>,
    initiator_shortcut: bool,
) -> anyhow::Result<()> {
    let public = decode_bytes(public)?;
    let signature = signature.map(decode_bytes).transpose()?;
    let mode = if initiator_shortcut {
        VerifyMode::InitiatorShortcut
    } else {
        VerifyMode::Full
    };

    if curve.verify(&public, message, signature.as_deref(), mode)? {
        println!("valid");
        Ok(())
    } else {
        bail!("signature did not verify");
    }
}
