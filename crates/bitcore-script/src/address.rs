//! Bitcoin address handling.
//!
//! Supports P2PKH and P2SH addresses on mainnet and testnet, generation
//! from public keys, public key hashes, and script hashes, plus validation
//! of Base58Check strings with SHA-256d checksums.

use std::fmt;

use bitcore_primitives::ec::PublicKey;
use bitcore_primitives::hash::sha256d;

use crate::ScriptError;

/// Mainnet P2PKH address version byte.
const MAINNET_P2PKH: u8 = 0x00;
/// Mainnet P2SH address version byte.
const MAINNET_P2SH: u8 = 0x05;
/// Testnet P2PKH address version byte.
const TESTNET_P2PKH: u8 = 0x6f;
/// Testnet P2SH address version byte.
const TESTNET_P2SH: u8 = 0xc4;

/// Bitcoin network type for address prefix selection.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Network {
    /// Bitcoin mainnet.
    Mainnet,
    /// Bitcoin testnet.
    Testnet,
}

/// The payment template an address refers to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AddressKind {
    /// Pay-to-public-key-hash: the hash is hash160 of a public key.
    PubKeyHash,
    /// Pay-to-script-hash: the hash is hash160 of a serialized redeem script.
    ScriptHash,
}

/// A Bitcoin address.
///
/// Contains the 20-byte payload hash, the network it belongs to, and the
/// template kind its version byte encodes. Serializes to and from the
/// Base58Check string format.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Address {
    /// The human-readable Base58Check address string.
    address_string: String,
    /// The 20-byte hash160 payload.
    hash: [u8; 20],
    /// The network this address belongs to.
    network: Network,
    /// The template kind encoded by the version byte.
    kind: AddressKind,
}

impl Address {
    /// Parse a Base58Check-encoded address string.
    ///
    /// Decodes the string, validates the checksum, and detects network and
    /// kind from the version byte (0x00/0x05 mainnet, 0x6f/0xc4 testnet).
    ///
    /// # Arguments
    /// * `addr` - The Base58Check address string.
    ///
    /// # Returns
    /// An `Address`, or an error if the string is invalid or the version
    /// byte is not a recognized P2PKH or P2SH version.
    pub fn from_string(addr: &str) -> Result<Self, ScriptError> {
        let decoded = bs58::decode(addr)
            .into_vec()
            .map_err(|_| ScriptError::InvalidAddress(format!("bad char for '{}'", addr)))?;

        if decoded.len() != 25 {
            return Err(ScriptError::InvalidAddressLength(addr.to_string()));
        }

        // Verify checksum: last 4 bytes should equal sha256d of first 21 bytes.
        let checksum = sha256d(&decoded[..21]);
        if decoded[21..25] != checksum[..4] {
            return Err(ScriptError::ChecksumMismatch);
        }

        let (network, kind) = match decoded[0] {
            MAINNET_P2PKH => (Network::Mainnet, AddressKind::PubKeyHash),
            MAINNET_P2SH => (Network::Mainnet, AddressKind::ScriptHash),
            TESTNET_P2PKH => (Network::Testnet, AddressKind::PubKeyHash),
            TESTNET_P2SH => (Network::Testnet, AddressKind::ScriptHash),
            _ => return Err(ScriptError::UnsupportedAddress(addr.to_string())),
        };

        let mut hash = [0u8; 20];
        hash.copy_from_slice(&decoded[1..21]);

        Ok(Address {
            address_string: addr.to_string(),
            hash,
            network,
            kind,
        })
    }

    /// Create a P2PKH address from a 20-byte public key hash.
    ///
    /// # Arguments
    /// * `hash` - The hash160 of the public key.
    /// * `network` - The target network.
    ///
    /// # Returns
    /// A new pay-to-public-key-hash `Address`.
    pub fn from_public_key_hash(hash: &[u8; 20], network: Network) -> Self {
        let version = match network {
            Network::Mainnet => MAINNET_P2PKH,
            Network::Testnet => TESTNET_P2PKH,
        };
        Self::from_versioned_hash(version, hash, network, AddressKind::PubKeyHash)
    }

    /// Create a P2SH address from a 20-byte script hash.
    ///
    /// # Arguments
    /// * `hash` - The hash160 of the serialized redeem script.
    /// * `network` - The target network.
    ///
    /// # Returns
    /// A new pay-to-script-hash `Address`.
    pub fn from_script_hash(hash: &[u8; 20], network: Network) -> Self {
        let version = match network {
            Network::Mainnet => MAINNET_P2SH,
            Network::Testnet => TESTNET_P2SH,
        };
        Self::from_versioned_hash(version, hash, network, AddressKind::ScriptHash)
    }

    /// Create a P2PKH address from a public key.
    ///
    /// # Arguments
    /// * `public_key` - The key to hash.
    /// * `network` - The target network.
    ///
    /// # Returns
    /// A new pay-to-public-key-hash `Address` over hash160 of the key.
    pub fn from_public_key(public_key: &PublicKey, network: Network) -> Self {
        Self::from_public_key_hash(&public_key.hash160(), network)
    }

    /// Encode the versioned hash with its checksum.
    fn from_versioned_hash(
        version: u8,
        hash: &[u8; 20],
        network: Network,
        kind: AddressKind,
    ) -> Self {
        let mut payload = Vec::with_capacity(25);
        payload.push(version);
        payload.extend_from_slice(hash);
        let checksum = sha256d(&payload);
        payload.extend_from_slice(&checksum[..4]);

        Address {
            address_string: bs58::encode(&payload).into_string(),
            hash: *hash,
            network,
            kind,
        }
    }

    /// Return the 20-byte hash payload.
    pub fn hash_buffer(&self) -> &[u8; 20] {
        &self.hash
    }

    /// Return the network of this address.
    pub fn network(&self) -> Network {
        self.network
    }

    /// Return the template kind of this address.
    pub fn kind(&self) -> AddressKind {
        self.kind
    }

    /// Check whether this is a pay-to-public-key-hash address.
    pub fn is_p2pkh(&self) -> bool {
        self.kind == AddressKind::PubKeyHash
    }

    /// Check whether this is a pay-to-script-hash address.
    pub fn is_p2sh(&self) -> bool {
        self.kind == AddressKind::ScriptHash
    }
}

impl fmt::Display for Address {
    /// Display the address as its Base58Check string.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.address_string)
    }
}
