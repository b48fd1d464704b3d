//! Bitcoin Script type - an ordered sequence of opcodes and data pushes.
//!
//! Scripts are used in transaction inputs (unlocking) and outputs (locking)
//! to define spending conditions. The Script owns a chunk sequence and
//! provides construction from bytes, hex, and the human-readable text form,
//! byte-exact serialization, and the mutator API for building scripts chunk
//! by chunk.

use std::fmt;
use std::hash::{Hash, Hasher};

use crate::chunk::{decode_script, encode_script, ScriptChunk};
use crate::opcodes::*;
use crate::ScriptError;

/// A Bitcoin script, represented as an owned sequence of chunks.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct Script {
    chunks: Vec<ScriptChunk>,
}

/// An input accepted by the polymorphic [`Script::append`] / [`Script::prepend`]
/// facade: a bare opcode, a data payload, or a prebuilt chunk.
#[derive(Clone, Debug)]
pub enum ScriptElement {
    /// A bare opcode by numeric value.
    Opcode(u8),
    /// A data payload to push with the minimum push opcode.
    Data(Vec<u8>),
    /// A prebuilt chunk inserted as-is.
    Chunk(ScriptChunk),
}

impl From<u8> for ScriptElement {
    fn from(op: u8) -> Self {
        ScriptElement::Opcode(op)
    }
}

impl From<Vec<u8>> for ScriptElement {
    fn from(data: Vec<u8>) -> Self {
        ScriptElement::Data(data)
    }
}

impl From<&[u8]> for ScriptElement {
    fn from(data: &[u8]) -> Self {
        ScriptElement::Data(data.to_vec())
    }
}

impl From<ScriptChunk> for ScriptElement {
    fn from(chunk: ScriptChunk) -> Self {
        ScriptElement::Chunk(chunk)
    }
}

impl Script {
    // -----------------------------------------------------------------------
    // Constructors
    // -----------------------------------------------------------------------

    /// Create a new empty script.
    ///
    /// # Returns
    /// A `Script` with no chunks.
    pub fn new() -> Self {
        Script { chunks: Vec::new() }
    }

    /// Create a script from an existing chunk sequence.
    ///
    /// # Arguments
    /// * `chunks` - The chunks the script takes ownership of.
    ///
    /// # Returns
    /// A `Script` wrapping the given chunks.
    pub fn from_chunks(chunks: Vec<ScriptChunk>) -> Self {
        Script { chunks }
    }

    /// Parse a script from its canonical byte encoding.
    ///
    /// # Arguments
    /// * `bytes` - Raw script bytes.
    ///
    /// # Returns
    /// The parsed `Script`, or `Truncated` if the bytes end mid-chunk.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, ScriptError> {
        Ok(Script { chunks: decode_script(bytes)? })
    }

    /// Parse a script from a hex-encoded string.
    ///
    /// # Arguments
    /// * `hex_str` - A hex string (e.g. "76a914...88ac").
    ///
    /// # Returns
    /// The parsed `Script`, or an error if the hex or encoding is invalid.
    pub fn from_hex(hex_str: &str) -> Result<Self, ScriptError> {
        let bytes = hex::decode(hex_str)
            .map_err(|e| ScriptError::InvalidHex(e.to_string()))?;
        Self::from_bytes(&bytes)
    }

    /// Parse a script from its human-readable text form.
    ///
    /// An input that is entirely hexadecimal is treated as a byte script.
    /// Otherwise the input is tokenized on spaces: opcode names emit bare
    /// chunks (the OP_PUSHDATA names consume a length token and a `0x`-hex
    /// payload token), integers in 1..=75 start a direct push consuming a
    /// `0x`-hex payload of that length, and any other integer up to 0xff
    /// emits a bare opcode.
    ///
    /// # Arguments
    /// * `text` - The space-separated text form.
    ///
    /// # Returns
    /// The parsed `Script`, or `InvalidScript` if a token is malformed.
    pub fn from_asm(text: &str) -> Result<Self, ScriptError> {
        if text.is_empty() {
            return Ok(Script::new());
        }
        if is_hex_string(text) {
            return Self::from_hex(text);
        }

        let tokens: Vec<&str> = text.split(' ').collect();
        let mut chunks = Vec::new();
        let mut i = 0;
        while i < tokens.len() {
            let token = tokens[i];
            if let Some(op) = string_to_opcode(token) {
                if matches!(op, OP_PUSHDATA1 | OP_PUSHDATA2 | OP_PUSHDATA4) {
                    let declared = int_token(token_at(&tokens, i + 1)?).ok_or_else(|| {
                        ScriptError::InvalidScript(format!(
                            "push length is not numeric after {}",
                            token
                        ))
                    })?;
                    let data = payload_token(token_at(&tokens, i + 2)?)?;
                    if data.len() as u64 != declared {
                        return Err(ScriptError::InvalidScript(format!(
                            "declared length {} does not match payload of {} bytes",
                            declared,
                            data.len()
                        )));
                    }
                    let chunk = ScriptChunk::push_with_opcode(op, data).map_err(|_| {
                        ScriptError::InvalidScript(format!(
                            "payload does not fit {}",
                            token
                        ))
                    })?;
                    chunks.push(chunk);
                    i += 3;
                } else {
                    chunks.push(ScriptChunk::Op(op));
                    i += 1;
                }
            } else if let Some(value) = int_token(token) {
                if (1..=OP_DATA_75 as u64).contains(&value) {
                    let data = payload_token(token_at(&tokens, i + 1)?)?;
                    if data.len() as u64 != value {
                        return Err(ScriptError::InvalidScript(format!(
                            "declared length {} does not match payload of {} bytes",
                            value,
                            data.len()
                        )));
                    }
                    chunks.push(ScriptChunk::push_with_opcode(value as u8, data)?);
                    i += 2;
                } else if value <= 0xff {
                    chunks.push(ScriptChunk::Op(value as u8));
                    i += 1;
                } else {
                    return Err(ScriptError::InvalidScript(format!(
                        "{} is not an opcode value",
                        token
                    )));
                }
            } else {
                return Err(ScriptError::InvalidScript(format!(
                    "unrecognized token '{}'",
                    token
                )));
            }
        }
        Ok(Script { chunks })
    }

    // -----------------------------------------------------------------------
    // Serialization
    // -----------------------------------------------------------------------

    /// Serialize the script to its canonical byte encoding.
    ///
    /// # Returns
    /// The script bytes; byte-exact inverse of [`Script::from_bytes`].
    pub fn to_bytes(&self) -> Vec<u8> {
        encode_script(&self.chunks)
    }

    /// Encode the script as a lowercase hex string.
    ///
    /// # Returns
    /// The hex representation of the serialized bytes.
    pub fn to_hex(&self) -> String {
        hex::encode(self.to_bytes())
    }

    /// Render the script in its human-readable text form.
    ///
    /// Each chunk contributes one token (bare opcodes) or a length/payload
    /// group (pushes); tokens are joined with single spaces.
    ///
    /// # Returns
    /// The space-separated text form; empty for an empty script.
    pub fn to_asm(&self) -> String {
        let parts: Vec<String> = self.chunks.iter().map(ScriptChunk::to_asm_string).collect();
        parts.join(" ")
    }

    /// Return the chunk sequence.
    ///
    /// # Returns
    /// A slice of the script's chunks in order.
    pub fn chunks(&self) -> &[ScriptChunk] {
        &self.chunks
    }

    /// Return the number of chunks in the script.
    pub fn chunk_count(&self) -> usize {
        self.chunks.len()
    }

    /// Return the length of the script in serialized bytes.
    ///
    /// # Returns
    /// The number of bytes `to_bytes` would produce.
    pub fn len(&self) -> usize {
        self.chunks.iter().map(ScriptChunk::encoded_len).sum()
    }

    /// Check if the script has no chunks.
    ///
    /// # Returns
    /// `true` if the script is empty.
    pub fn is_empty(&self) -> bool {
        self.chunks.is_empty()
    }

    // -----------------------------------------------------------------------
    // Mutation
    // -----------------------------------------------------------------------

    /// Append an element to the end of the script.
    ///
    /// Dispatches over the closed [`ScriptElement`] set: opcodes become bare
    /// chunks, payloads become minimum-encoded pushes (an empty payload is a
    /// no-op), and prebuilt chunks are inserted as-is.
    ///
    /// # Arguments
    /// * `element` - Anything convertible into a `ScriptElement`.
    ///
    /// # Returns
    /// `Ok(())` on success, or `PayloadTooLarge` for an unencodable payload.
    pub fn append(&mut self, element: impl Into<ScriptElement>) -> Result<(), ScriptError> {
        match element.into() {
            ScriptElement::Opcode(op) => {
                self.append_opcode(op);
                Ok(())
            }
            ScriptElement::Data(data) => self.append_push_data(&data),
            ScriptElement::Chunk(chunk) => {
                self.append_chunk(chunk);
                Ok(())
            }
        }
    }

    /// Prepend an element to the front of the script.
    ///
    /// Same dispatch as [`Script::append`].
    ///
    /// # Arguments
    /// * `element` - Anything convertible into a `ScriptElement`.
    ///
    /// # Returns
    /// `Ok(())` on success, or `PayloadTooLarge` for an unencodable payload.
    pub fn prepend(&mut self, element: impl Into<ScriptElement>) -> Result<(), ScriptError> {
        match element.into() {
            ScriptElement::Opcode(op) => {
                self.prepend_opcode(op);
                Ok(())
            }
            ScriptElement::Data(data) => self.prepend_push_data(&data),
            ScriptElement::Chunk(chunk) => {
                self.prepend_chunk(chunk);
                Ok(())
            }
        }
    }

    /// Append a bare opcode chunk.
    ///
    /// # Arguments
    /// * `op` - The opcode byte.
    pub fn append_opcode(&mut self, op: u8) {
        self.chunks.push(ScriptChunk::Op(op));
    }

    /// Append a bare opcode chunk by name.
    ///
    /// # Arguments
    /// * `name` - An `OP_xxx` name.
    ///
    /// # Returns
    /// `Ok(())`, or `UnknownOpcode` if the name does not resolve.
    pub fn append_opcode_name(&mut self, name: &str) -> Result<(), ScriptError> {
        let op = string_to_opcode(name)
            .ok_or_else(|| ScriptError::UnknownOpcode(name.to_string()))?;
        self.append_opcode(op);
        Ok(())
    }

    /// Append a data push with the minimum push opcode for its length.
    ///
    /// An empty payload is a no-op.
    ///
    /// # Arguments
    /// * `data` - The payload bytes to push.
    ///
    /// # Returns
    /// `Ok(())` on success, or `PayloadTooLarge` for payloads of 2^32 bytes
    /// or more.
    pub fn append_push_data(&mut self, data: &[u8]) -> Result<(), ScriptError> {
        if data.is_empty() {
            return Ok(());
        }
        self.chunks.push(ScriptChunk::push(data.to_vec())?);
        Ok(())
    }

    /// Append a prebuilt chunk as-is.
    ///
    /// # Arguments
    /// * `chunk` - The chunk to append.
    pub fn append_chunk(&mut self, chunk: ScriptChunk) {
        self.chunks.push(chunk);
    }

    /// Append every chunk of another script.
    ///
    /// # Arguments
    /// * `other` - The script whose chunks are appended in order.
    pub fn extend(&mut self, other: &Script) {
        self.chunks.extend(other.chunks.iter().cloned());
    }

    /// Prepend a bare opcode chunk.
    ///
    /// # Arguments
    /// * `op` - The opcode byte.
    pub fn prepend_opcode(&mut self, op: u8) {
        self.chunks.insert(0, ScriptChunk::Op(op));
    }

    /// Prepend a data push with the minimum push opcode for its length.
    ///
    /// An empty payload is a no-op.
    ///
    /// # Arguments
    /// * `data` - The payload bytes to push.
    ///
    /// # Returns
    /// `Ok(())` on success, or `PayloadTooLarge` for payloads of 2^32 bytes
    /// or more.
    pub fn prepend_push_data(&mut self, data: &[u8]) -> Result<(), ScriptError> {
        if data.is_empty() {
            return Ok(());
        }
        self.chunks.insert(0, ScriptChunk::push(data.to_vec())?);
        Ok(())
    }

    /// Prepend a prebuilt chunk as-is.
    ///
    /// # Arguments
    /// * `chunk` - The chunk to prepend.
    pub fn prepend_chunk(&mut self, chunk: ScriptChunk) {
        self.chunks.insert(0, chunk);
    }

    /// Return a copy of this script with every OP_CODESEPARATOR removed.
    ///
    /// The order of the remaining chunks is preserved; the receiver is left
    /// untouched.
    ///
    /// # Returns
    /// The filtered script.
    pub fn remove_codeseparators(&self) -> Script {
        let chunks = self
            .chunks
            .iter()
            .filter(|chunk| chunk.opcode() != OP_CODESEPARATOR)
            .cloned()
            .collect();
        Script { chunks }
    }

    /// Check if this script is chunk-wise equal to another script.
    ///
    /// # Arguments
    /// * `other` - The other script to compare with.
    ///
    /// # Returns
    /// `true` if both scripts have the same chunks in the same order.
    pub fn equals(&self, other: &Script) -> bool {
        self.chunks == other.chunks
    }

    /// Check whether every chunk is a push operation.
    ///
    /// Push operations are the data pushes plus OP_0, OP_1NEGATE, and the
    /// small-integer opcodes; everything at or below OP_16 qualifies.
    ///
    /// # Returns
    /// `true` if no chunk's opcode exceeds OP_16.
    pub fn is_push_only(&self) -> bool {
        self.chunks.iter().all(|chunk| chunk.opcode() <= OP_16)
    }

    // -----------------------------------------------------------------------
    // Data extraction
    // -----------------------------------------------------------------------

    /// Extract the 20-byte public key hash from a P2PKH output script.
    ///
    /// # Returns
    /// The hash embedded in the third chunk, or `NotPublicKeyHashOut` if the
    /// script is not a pay-to-public-key-hash output.
    pub fn public_key_hash(&self) -> Result<[u8; 20], ScriptError> {
        if !self.is_public_key_hash_out() {
            return Err(ScriptError::NotPublicKeyHashOut);
        }
        match self.chunks.get(2).and_then(ScriptChunk::data) {
            Some(data) if data.len() == 20 => {
                let mut hash = [0u8; 20];
                hash.copy_from_slice(data);
                Ok(hash)
            }
            _ => Err(ScriptError::NotPublicKeyHashOut),
        }
    }

    /// Extract the serialized public key from a P2PK output script.
    ///
    /// # Returns
    /// The pushed key bytes, or `NotPublicKeyOut` if the script is not a
    /// pay-to-public-key output.
    pub fn public_key(&self) -> Result<Vec<u8>, ScriptError> {
        if !self.is_public_key_out() {
            return Err(ScriptError::NotPublicKeyOut);
        }
        match self.chunks.first().and_then(ScriptChunk::data) {
            Some(data) => Ok(data.to_vec()),
            None => Err(ScriptError::NotPublicKeyOut),
        }
    }

    /// Extract the payload of a data output script.
    ///
    /// # Returns
    /// The pushed bytes (empty for a bare OP_RETURN), or `NotDataOut` if the
    /// script is not a data output.
    pub fn data(&self) -> Result<Vec<u8>, ScriptError> {
        if !self.is_data_out() {
            return Err(ScriptError::NotDataOut);
        }
        match self.chunks.get(1).and_then(ScriptChunk::data) {
            Some(data) => Ok(data.to_vec()),
            None => Ok(Vec::new()),
        }
    }
}

/// Check whether the whole input can be read as hex-encoded bytes.
fn is_hex_string(s: &str) -> bool {
    !s.is_empty() && s.len() % 2 == 0 && s.bytes().all(|b| b.is_ascii_hexdigit())
}

/// Fetch a token by index or fail with a truncated-text error.
fn token_at<'a>(tokens: &[&'a str], index: usize) -> Result<&'a str, ScriptError> {
    tokens
        .get(index)
        .copied()
        .ok_or_else(|| ScriptError::InvalidScript("unexpected end of text".to_string()))
}

/// Parse an integer token, accepting decimal and 0x-prefixed hex.
fn int_token(token: &str) -> Option<u64> {
    match token.strip_prefix("0x") {
        Some(hex_part) => u64::from_str_radix(hex_part, 16).ok(),
        None => token.parse().ok(),
    }
}

/// Decode a `0x`-prefixed hex payload token.
fn payload_token(token: &str) -> Result<Vec<u8>, ScriptError> {
    let hex_part = token.strip_prefix("0x").ok_or_else(|| {
        ScriptError::InvalidScript(format!("push payload '{}' lacks 0x prefix", token))
    })?;
    hex::decode(hex_part)
        .map_err(|_| ScriptError::InvalidScript(format!("push payload '{}' is not hex", token)))
}

impl fmt::Display for Script {
    /// Display the script in its human-readable text form.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_asm())
    }
}

impl fmt::Debug for Script {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Script({})", self.to_hex())
    }
}

impl Hash for Script {
    /// Hash the script by its serialized bytes, the canonical identity.
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.to_bytes().hash(state);
    }
}

impl serde::Serialize for Script {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> serde::Deserialize<'de> for Script {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Script::from_hex(&s).map_err(serde::de::Error::custom)
    }
}
