/// Bitcore SDK - Hashing, binary serialization, and public key primitives.
///
/// This crate provides the foundational building blocks for the bitcore SDK:
/// - Hash functions (SHA-256, SHA-256d, RIPEMD-160, Hash160)
/// - Byte reader/writer for Bitcoin protocol binary data
/// - Variable-length integer encoding
/// - secp256k1 public keys and sighash flag constants

pub mod hash;
pub mod util;
pub mod ec;

mod error;
pub use error::PrimitivesError;
