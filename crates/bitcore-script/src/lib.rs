//! Bitcore SDK - Bitcoin script parsing, classification, and building.
//!
//! Provides the chunk-based Script type, opcode definitions, the standard
//! output/input template classifier, builders for the standard templates,
//! and Base58Check address handling.

pub mod opcodes;
pub mod chunk;
pub mod script;
pub mod classify;
pub mod build;
pub mod address;

mod error;
pub use error::ScriptError;
pub use script::{Script, ScriptElement};
pub use chunk::ScriptChunk;
pub use classify::ScriptType;
pub use address::{Address, AddressKind, Network};
