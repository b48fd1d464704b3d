/// Unified error type for all primitives operations.
///
/// Covers errors from hashing helpers, binary readers, and public key decoding.
#[derive(Debug, thiserror::Error)]
pub enum PrimitivesError {
    /// Invalid public key data.
    #[error("invalid public key: {0}")]
    InvalidPublicKey(String),

    /// Unexpected end of input data.
    #[error("unexpected end of data")]
    UnexpectedEof,

    /// Invalid hexadecimal string.
    #[error("invalid hex: {0}")]
    InvalidHex(String),
}
