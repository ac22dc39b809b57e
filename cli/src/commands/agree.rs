//! Agreement command.

use xcurve_core::encoding::{decode_bytes, decode_key, encode};
use xcurve_core::Curve;

/// Print the base64 shared secret between a peer public key and our private key.
pub fn agree(curve: &Curve, public: &str, private: Option<&str>) -> anyhow::Result<()> {
    let public = decode_bytes(public)?;
    let private = decode_key(private)?;
    let secret = curve.compute_shared_secret(&public, &private)?;
    println!("{}", encode(secret));
    Ok(())
}
