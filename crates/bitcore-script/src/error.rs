/// Error types for script operations.
///
/// Covers byte-level parsing, text-form parsing, push encoding limits,
/// template builders, and address validation.
#[derive(Debug, thiserror::Error)]
pub enum ScriptError {
    /// Byte stream ended in the middle of a chunk during parsing.
    #[error("script truncated")]
    Truncated,

    /// Text form could not be tokenized.
    #[error("invalid script: {0}")]
    InvalidScript(String),

    /// Push payload is too large to encode (>= 2^32 bytes).
    #[error("push payload too large: {0} bytes")]
    PayloadTooLarge(usize),

    /// Declared push length is out of bounds for the push opcode.
    #[error("invalid chunk: opcode 0x{op:02x} cannot carry {len} bytes")]
    InvalidChunk {
        /// The push opcode byte.
        op: u8,
        /// The payload length that does not fit it.
        len: usize,
    },

    /// An opcode name could not be resolved.
    #[error("unknown opcode: {0}")]
    UnknownOpcode(String),

    /// A small-integer opcode was requested for a value outside 0..=16.
    #[error("cannot encode {0} as a small-integer opcode")]
    NotSmallInt(usize),

    /// Multisig threshold exceeds the number of public keys.
    #[error("threshold {required} exceeds {total} public keys")]
    ThresholdTooLarge {
        /// Required number of signatures.
        required: usize,
        /// Total number of public keys.
        total: usize,
    },

    /// Script is not a pay-to-public-key-hash output.
    #[error("not a public key hash output")]
    NotPublicKeyHashOut,

    /// Script is not a pay-to-public-key output.
    #[error("not a public key output")]
    NotPublicKeyOut,

    /// Script is not a data output.
    #[error("not a data output")]
    NotDataOut,

    /// Invalid address string.
    #[error("invalid address: {0}")]
    InvalidAddress(String),

    /// Invalid address length after Base58 decoding.
    #[error("invalid address length for '{0}'")]
    InvalidAddressLength(String),

    /// Address version byte is not a recognized P2PKH or P2SH version.
    #[error("address not supported: {0}")]
    UnsupportedAddress(String),

    /// Base58Check checksum does not match.
    #[error("address checksum mismatch")]
    ChecksumMismatch,

    /// Invalid hex string.
    #[error("invalid hex: {0}")]
    InvalidHex(String),
}
