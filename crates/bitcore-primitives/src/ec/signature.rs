//! Sighash flag constants.
//!
//! A DER-encoded signature placed in an input script carries one trailing
//! byte indicating which parts of the spending transaction it commits to.

/// Sign all inputs and outputs (the default).
pub const SIGHASH_ALL: u8 = 0x01;

/// Sign all inputs and none of the outputs.
pub const SIGHASH_NONE: u8 = 0x02;

/// Sign all inputs and the single output with the same index as the input.
pub const SIGHASH_SINGLE: u8 = 0x03;

/// Modifier: commit to this input only; combined with one of the base flags.
pub const SIGHASH_ANYONECANPAY: u8 = 0x80;
