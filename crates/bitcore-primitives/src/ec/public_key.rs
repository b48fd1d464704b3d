//! secp256k1 public key wrapper.
//!
//! Supports compressed and uncompressed SEC1 serialization, validity
//! checking of candidate key bytes, and Hash160 computation for address
//! and script template generation.

use std::fmt;

use k256::ecdsa::VerifyingKey;
use k256::elliptic_curve::sec1::ToEncodedPoint;

use crate::hash::hash160;
use crate::PrimitivesError;

/// Length of a compressed public key in bytes (prefix + 32 byte x-coordinate).
const COMPRESSED_LEN: usize = 33;

/// Length of an uncompressed public key in bytes (prefix + 32 byte x + 32 byte y).
const UNCOMPRESSED_LEN: usize = 65;

/// A secp256k1 public key.
///
/// Wraps a k256 `VerifyingKey` and remembers whether the source encoding
/// was compressed, so that `to_bytes` reproduces the caller's chosen form.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PublicKey {
    /// The underlying k256 verifying key.
    inner: VerifyingKey,
    /// Whether the key was supplied in compressed (33-byte) form.
    compressed: bool,
}

impl PublicKey {
    /// Create a PublicKey from raw SEC1 encoded bytes.
    ///
    /// Accepts both compressed (33-byte) and uncompressed (65-byte) formats.
    ///
    /// # Arguments
    /// * `bytes` - SEC1-encoded public key bytes.
    ///
    /// # Returns
    /// `Ok(PublicKey)` on success, or an error if the bytes don't represent
    /// a valid point on the curve.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, PrimitivesError> {
        match bytes.len() {
            COMPRESSED_LEN | UNCOMPRESSED_LEN => {}
            n => {
                return Err(PrimitivesError::InvalidPublicKey(format!(
                    "expected {} or {} bytes, got {}",
                    COMPRESSED_LEN, UNCOMPRESSED_LEN, n
                )))
            }
        }
        let vk = VerifyingKey::from_sec1_bytes(bytes)
            .map_err(|e| PrimitivesError::InvalidPublicKey(e.to_string()))?;
        Ok(PublicKey {
            inner: vk,
            compressed: bytes.len() == COMPRESSED_LEN,
        })
    }

    /// Create a PublicKey from a hex-encoded SEC1 string.
    ///
    /// # Arguments
    /// * `hex_str` - A hex string of a compressed (66 chars) or uncompressed
    ///   (130 chars) key.
    ///
    /// # Returns
    /// `Ok(PublicKey)` on success, or an error if the hex or point is invalid.
    pub fn from_hex(hex_str: &str) -> Result<Self, PrimitivesError> {
        let bytes = hex::decode(hex_str)
            .map_err(|e| PrimitivesError::InvalidHex(e.to_string()))?;
        Self::from_bytes(&bytes)
    }

    /// Check whether candidate bytes decode as a valid SEC1 public key.
    ///
    /// Accepts only the 33-byte compressed and 65-byte uncompressed forms;
    /// the point must lie on the curve.
    ///
    /// # Arguments
    /// * `bytes` - Candidate public key bytes.
    ///
    /// # Returns
    /// `true` if `bytes` is a well-formed public key.
    pub fn is_valid(bytes: &[u8]) -> bool {
        Self::from_bytes(bytes).is_ok()
    }

    /// Serialize the public key in its canonical form.
    ///
    /// Reproduces the compression of the source encoding: 33 bytes for a
    /// key supplied compressed, 65 bytes otherwise.
    ///
    /// # Returns
    /// The SEC1-encoded public key bytes.
    pub fn to_bytes(&self) -> Vec<u8> {
        self.inner.to_encoded_point(self.compressed).as_bytes().to_vec()
    }

    /// Serialize the public key as a lowercase hexadecimal string.
    ///
    /// # Returns
    /// The hex encoding of `to_bytes`.
    pub fn to_hex(&self) -> String {
        hex::encode(self.to_bytes())
    }

    /// Whether this key serializes in compressed form.
    ///
    /// # Returns
    /// `true` for a 33-byte serialization.
    pub fn is_compressed(&self) -> bool {
        self.compressed
    }

    /// Compute the Hash160 of the serialized public key.
    ///
    /// Hash160 = RIPEMD160(SHA256(pubkey_bytes)); this is the 20-byte value
    /// embedded in P2PKH outputs.
    ///
    /// # Returns
    /// The 20-byte public key hash.
    pub fn hash160(&self) -> [u8; 20] {
        hash160(&self.to_bytes())
    }
}

impl fmt::Display for PublicKey {
    /// Display the public key as its hex serialization.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_hex())
    }
}

#[cfg(test)]
mod tests {
    //! Tests for public key parsing, validity checking, and serialization.

    use super::*;

    /// A known-valid compressed public key.
    const COMPRESSED_KEY: &str =
        "026cf33373a9f3f6c676b75b543180703df225f7f8edbffedc417718a8ad4e89ce";

    // -----------------------------------------------------------------------
    // from_bytes / from_hex
    // -----------------------------------------------------------------------

    /// Parse a compressed key and verify the round-trip through to_hex.
    #[test]
    fn test_from_hex_compressed_roundtrip() {
        let key = PublicKey::from_hex(COMPRESSED_KEY).expect("valid key should parse");
        assert!(key.is_compressed());
        assert_eq!(key.to_hex(), COMPRESSED_KEY);
        assert_eq!(key.to_bytes().len(), 33);
    }

    /// Reject byte strings of the wrong length.
    #[test]
    fn test_from_bytes_wrong_length() {
        assert!(PublicKey::from_bytes(&[]).is_err());
        assert!(PublicKey::from_bytes(&[0x02; 32]).is_err());
        assert!(PublicKey::from_bytes(&[0x02; 34]).is_err());
    }

    /// Reject a 33-byte string that is not a curve point.
    #[test]
    fn test_from_bytes_not_on_curve() {
        // 0x02 prefix with an x-coordinate that has no square root on the curve.
        let mut bytes = vec![0x02];
        bytes.extend_from_slice(&[0xff; 32]);
        assert!(PublicKey::from_bytes(&bytes).is_err());
    }

    /// Reject garbage hex.
    #[test]
    fn test_from_hex_invalid() {
        assert!(PublicKey::from_hex("zznotkey").is_err());
    }

    // -----------------------------------------------------------------------
    // is_valid
    // -----------------------------------------------------------------------

    /// is_valid accepts a genuine compressed key.
    #[test]
    fn test_is_valid_compressed() {
        let bytes = hex::decode(COMPRESSED_KEY).expect("valid hex");
        assert!(PublicKey::is_valid(&bytes));
    }

    /// is_valid rejects wrong lengths and off-curve points.
    #[test]
    fn test_is_valid_rejects_malformed() {
        assert!(!PublicKey::is_valid(&[]));
        assert!(!PublicKey::is_valid(&[0x02; 20]));
        let mut off_curve = vec![0x02];
        off_curve.extend_from_slice(&[0xff; 32]);
        assert!(!PublicKey::is_valid(&off_curve));
    }

    // -----------------------------------------------------------------------
    // hash160
    // -----------------------------------------------------------------------

    /// hash160 of a known key matches the Go SDK address test vector.
    #[test]
    fn test_hash160_known_vector() {
        let key = PublicKey::from_hex(COMPRESSED_KEY).expect("valid key should parse");
        assert_eq!(
            hex::encode(key.hash160()),
            "00ac6144c4db7b5790f343cf0477a65fb8a02eb7"
        );
    }

    // -----------------------------------------------------------------------
    // Display
    // -----------------------------------------------------------------------

    /// Display output is the hex serialization.
    #[test]
    fn test_display() {
        let key = PublicKey::from_hex(COMPRESSED_KEY).expect("valid key should parse");
        assert_eq!(format!("{}", key), COMPRESSED_KEY);
    }
}
