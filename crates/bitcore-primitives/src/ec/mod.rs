//! Elliptic curve types for the bitcore SDK.
//!
//! Provides the secp256k1 public key wrapper and the sighash flag
//! constants carried by transaction signatures.

pub mod public_key;
pub mod signature;

pub use public_key::PublicKey;
