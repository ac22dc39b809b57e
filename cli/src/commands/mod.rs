//! CLI command implementations.

mod agree;
mod keys;
mod signature;

pub use agree::agree;
pub use keys::{derive, keygen};
pub use signature::{sign, verify};
