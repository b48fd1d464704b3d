//! Script chunk parsing and encoding.
//!
//! A script chunk is either a bare opcode or a data push carrying the push
//! opcode and its payload bytes. This module decodes raw script bytes into
//! structured chunks and encodes chunks back to their byte-exact form.

use bitcore_primitives::util::{ByteReader, ByteWriter};

use crate::opcodes::*;
use crate::ScriptError;

/// A single parsed element of a Bitcoin script.
///
/// Push chunks satisfy the length bounds of their opcode by construction:
/// direct pushes (0x01..0x4b) carry exactly `op` bytes, and the OP_PUSHDATA
/// variants carry payloads below 2^8, 2^16, and 2^32 bytes respectively.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ScriptChunk {
    /// A bare opcode with no payload.
    Op(u8),
    /// A data push: the push opcode together with the pushed bytes.
    Push {
        /// The push opcode byte. For direct pushes this equals the length.
        op: u8,
        /// The pushed payload bytes.
        data: Vec<u8>,
    },
}

impl ScriptChunk {
    /// Create a push chunk with the minimum push opcode for the payload.
    ///
    /// Selects a direct push for 1-75 bytes, OP_PUSHDATA1 for up to 255,
    /// OP_PUSHDATA2 for up to 65535, and OP_PUSHDATA4 beyond that.
    ///
    /// # Arguments
    /// * `data` - The payload bytes.
    ///
    /// # Returns
    /// The push chunk, or `PayloadTooLarge` if the payload cannot be encoded.
    pub fn push(data: Vec<u8>) -> Result<Self, ScriptError> {
        let op = push_opcode_for_len(data.len())?;
        Ok(ScriptChunk::Push { op, data })
    }

    /// Create a push chunk with an explicitly chosen push opcode.
    ///
    /// Unlike [`ScriptChunk::push`] this does not minimize the encoding, so
    /// it can represent non-minimal pushes such as a 3-byte OP_PUSHDATA2.
    ///
    /// # Arguments
    /// * `op` - A push opcode: 0x01..0x4b or one of OP_PUSHDATA1/2/4.
    /// * `data` - The payload bytes.
    ///
    /// # Returns
    /// The push chunk, or `InvalidChunk` if the payload length is out of
    /// bounds for the opcode.
    pub fn push_with_opcode(op: u8, data: Vec<u8>) -> Result<Self, ScriptError> {
        let fits = match op {
            OP_DATA_1..=OP_DATA_75 => data.len() == op as usize,
            OP_PUSHDATA1 => data.len() < (1 << 8),
            OP_PUSHDATA2 => data.len() < (1 << 16),
            OP_PUSHDATA4 => (data.len() as u64) < (1 << 32),
            _ => false,
        };
        if !fits {
            return Err(ScriptError::InvalidChunk { op, len: data.len() });
        }
        Ok(ScriptChunk::Push { op, data })
    }

    /// Return the opcode byte of this chunk.
    pub fn opcode(&self) -> u8 {
        match self {
            ScriptChunk::Op(op) => *op,
            ScriptChunk::Push { op, .. } => *op,
        }
    }

    /// Return the payload of this chunk, if it is a push.
    pub fn data(&self) -> Option<&[u8]> {
        match self {
            ScriptChunk::Op(_) => None,
            ScriptChunk::Push { data, .. } => Some(data),
        }
    }

    /// Check whether this chunk is a data push.
    pub fn is_push(&self) -> bool {
        matches!(self, ScriptChunk::Push { .. })
    }

    /// Check whether this chunk uses one of the OP_PUSHDATA opcodes.
    pub fn is_pushdata(&self) -> bool {
        matches!(self.opcode(), OP_PUSHDATA1 | OP_PUSHDATA2 | OP_PUSHDATA4)
    }

    /// Render this chunk as its text-form token(s).
    ///
    /// Direct pushes render as `<len> 0x<hex>`, OP_PUSHDATA pushes as
    /// `OP_PUSHDATAn <len> 0x<hex>`, named bare opcodes as their canonical
    /// name, and unnamed bare opcodes as `0x<hex>`.
    ///
    /// # Returns
    /// A string suitable for inclusion in the space-joined text form.
    pub fn to_asm_string(&self) -> String {
        match self {
            ScriptChunk::Op(op) => match opcode_to_string(*op) {
                Some(name) => name.to_string(),
                None => format!("0x{:02x}", op),
            },
            ScriptChunk::Push { op, data } => {
                if self.is_pushdata() {
                    format!(
                        "{} {} 0x{}",
                        opcode_to_string(*op).unwrap_or(""),
                        data.len(),
                        hex::encode(data)
                    )
                } else {
                    format!("{} 0x{}", data.len(), hex::encode(data))
                }
            }
        }
    }

    /// Encode this chunk into a writer.
    ///
    /// Direct pushes write the length opcode followed by the payload; the
    /// OP_PUSHDATA variants write their explicit little-endian length field
    /// between the opcode and the payload.
    ///
    /// # Arguments
    /// * `writer` - The destination writer.
    pub fn encode(&self, writer: &mut ByteWriter) {
        match self {
            ScriptChunk::Op(op) => writer.write_u8(*op),
            ScriptChunk::Push { op, data } => {
                writer.write_u8(*op);
                match *op {
                    OP_PUSHDATA1 => writer.write_u8(data.len() as u8),
                    OP_PUSHDATA2 => writer.write_u16_le(data.len() as u16),
                    OP_PUSHDATA4 => writer.write_u32_le(data.len() as u32),
                    _ => {}
                }
                writer.write_bytes(data);
            }
        }
    }

    /// Return the number of bytes this chunk occupies when encoded.
    pub fn encoded_len(&self) -> usize {
        match self {
            ScriptChunk::Op(_) => 1,
            ScriptChunk::Push { op, data } => {
                let prefix = match *op {
                    OP_PUSHDATA1 => 2,
                    OP_PUSHDATA2 => 3,
                    OP_PUSHDATA4 => 5,
                    _ => 1,
                };
                prefix + data.len()
            }
        }
    }
}

/// Select the minimum push opcode for a payload of the given length.
///
/// # Arguments
/// * `data_len` - The payload length in bytes; must be non-zero.
///
/// # Returns
/// The length itself for 1-75 bytes, OP_PUSHDATA1 below 2^8, OP_PUSHDATA2
/// below 2^16, OP_PUSHDATA4 below 2^32, or `PayloadTooLarge` beyond that.
pub fn push_opcode_for_len(data_len: usize) -> Result<u8, ScriptError> {
    if data_len > 0 && data_len < OP_PUSHDATA1 as usize {
        Ok(data_len as u8)
    } else if data_len < (1 << 8) {
        Ok(OP_PUSHDATA1)
    } else if data_len < (1 << 16) {
        Ok(OP_PUSHDATA2)
    } else if (data_len as u64) < (1 << 32) {
        Ok(OP_PUSHDATA4)
    } else {
        Err(ScriptError::PayloadTooLarge(data_len))
    }
}

/// Decode raw script bytes into a vector of chunks.
///
/// Each step reads one opcode byte and, for the push opcodes, the declared
/// payload. The decoder does not validate opcode meaning, push minimality,
/// or template conformance.
///
/// # Arguments
/// * `bytes` - The raw script bytes to decode.
///
/// # Returns
/// The parsed chunks, or `Truncated` if a read runs past the end of the
/// data.
pub fn decode_script(bytes: &[u8]) -> Result<Vec<ScriptChunk>, ScriptError> {
    let mut reader = ByteReader::new(bytes);
    let mut chunks = Vec::new();

    while !reader.is_exhausted() {
        let op = reader.read_u8().map_err(|_| ScriptError::Truncated)?;
        match op {
            OP_DATA_1..=OP_DATA_75 => {
                let data = reader
                    .read_bytes(op as usize)
                    .map_err(|_| ScriptError::Truncated)?
                    .to_vec();
                chunks.push(ScriptChunk::Push { op, data });
            }
            OP_PUSHDATA1 => {
                let length = reader.read_u8().map_err(|_| ScriptError::Truncated)? as usize;
                let data = reader
                    .read_bytes(length)
                    .map_err(|_| ScriptError::Truncated)?
                    .to_vec();
                chunks.push(ScriptChunk::Push { op, data });
            }
            OP_PUSHDATA2 => {
                let length = reader.read_u16_le().map_err(|_| ScriptError::Truncated)? as usize;
                let data = reader
                    .read_bytes(length)
                    .map_err(|_| ScriptError::Truncated)?
                    .to_vec();
                chunks.push(ScriptChunk::Push { op, data });
            }
            OP_PUSHDATA4 => {
                let length = reader.read_u32_le().map_err(|_| ScriptError::Truncated)? as usize;
                let data = reader
                    .read_bytes(length)
                    .map_err(|_| ScriptError::Truncated)?
                    .to_vec();
                chunks.push(ScriptChunk::Push { op, data });
            }
            _ => chunks.push(ScriptChunk::Op(op)),
        }
    }

    Ok(chunks)
}

/// Encode a chunk sequence back to raw script bytes.
///
/// Byte-exact inverse of [`decode_script`]: for every byte sequence that
/// decodes without error, encoding the resulting chunks reproduces it.
///
/// # Arguments
/// * `chunks` - The chunks to encode.
///
/// # Returns
/// The serialized script bytes.
pub fn encode_script(chunks: &[ScriptChunk]) -> Vec<u8> {
    let capacity = chunks.iter().map(ScriptChunk::encoded_len).sum();
    let mut writer = ByteWriter::with_capacity(capacity);
    for chunk in chunks {
        chunk.encode(&mut writer);
    }
    writer.into_bytes()
}
