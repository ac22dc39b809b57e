//! Key pair commands.

use xcurve_core::encoding::decode_key;
use xcurve_core::{Curve, KeyPair};

/// Generate a key pair and print it as JSON.
pub fn keygen(curve: &Curve) -> anyhow::Result<()> {
    let pair = curve.generate_key_pair()?;
    tracing::info!(variant = %curve.variant(), "Generated key pair");
    print_key_pair(&pair)
}

/// Derive the key pair for a private key and print it as JSON.
pub fn derive(curve: &Curve, private: Option<&str>) -> anyhow::Result<()> {
    let private = decode_key(private)?;
    let pair = curve.create_key_pair(&private)?;
    print_key_pair(&pair)
}

fn print_key_pair(pair: &KeyPair) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(pair)?);
    Ok(())
}
