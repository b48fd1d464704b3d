//! Builders for the standard script templates.
//!
//! Each builder produces a chunk sequence for one of the standard output
//! or input templates from typed inputs; callers serialize the result with
//! `Script::to_bytes` when the byte form is needed.

use bitcore_primitives::ec::signature::SIGHASH_ALL;
use bitcore_primitives::ec::PublicKey;
use bitcore_primitives::hash::hash160;

use crate::address::{Address, AddressKind};
use crate::opcodes::*;
use crate::script::Script;
use crate::ScriptError;

impl Script {
    /// Build a pay-to-public-key-hash output script.
    ///
    /// Produces: OP_DUP OP_HASH160 <20-byte hash> OP_EQUALVERIFY OP_CHECKSIG
    ///
    /// # Arguments
    /// * `to` - The address whose hash the output pays to.
    ///
    /// # Returns
    /// The P2PKH locking script.
    pub fn build_public_key_hash_out(to: &Address) -> Result<Script, ScriptError> {
        let mut script = Script::new();
        script.append_opcode(OP_DUP);
        script.append_opcode(OP_HASH160);
        script.append_push_data(to.hash_buffer())?;
        script.append_opcode(OP_EQUALVERIFY);
        script.append_opcode(OP_CHECKSIG);
        Ok(script)
    }

    /// Build a pay-to-public-key output script.
    ///
    /// Produces: <pubkey> OP_CHECKSIG
    ///
    /// # Arguments
    /// * `public_key` - The key the output pays to.
    ///
    /// # Returns
    /// The P2PK locking script.
    pub fn build_public_key_out(public_key: &PublicKey) -> Result<Script, ScriptError> {
        let mut script = Script::new();
        script.append_push_data(&public_key.to_bytes())?;
        script.append_opcode(OP_CHECKSIG);
        Ok(script)
    }

    /// Build a pay-to-script-hash output script for a redeem script.
    ///
    /// Produces: OP_HASH160 <hash160(serialized redeem)> OP_EQUAL
    ///
    /// # Arguments
    /// * `redeem_script` - The script whose hash the output commits to.
    ///
    /// # Returns
    /// The P2SH locking script.
    pub fn build_script_hash_out(redeem_script: &Script) -> Result<Script, ScriptError> {
        Self::script_hash_out_from_hash(&hash160(&redeem_script.to_bytes()))
    }

    /// Build a pay-to-script-hash output script from a precomputed hash.
    ///
    /// # Arguments
    /// * `script_hash` - The 20-byte hash160 of a serialized redeem script.
    ///
    /// # Returns
    /// The P2SH locking script.
    pub fn script_hash_out_from_hash(script_hash: &[u8; 20]) -> Result<Script, ScriptError> {
        let mut script = Script::new();
        script.append_opcode(OP_HASH160);
        script.append_push_data(script_hash)?;
        script.append_opcode(OP_EQUAL);
        Ok(script)
    }

    /// Build a data-carrier output script.
    ///
    /// Produces OP_RETURN alone for empty data, else OP_RETURN <data>.
    ///
    /// # Arguments
    /// * `data` - The bytes to embed.
    ///
    /// # Returns
    /// The data output script.
    pub fn build_data_out(data: &[u8]) -> Result<Script, ScriptError> {
        let mut script = Script::new();
        script.append_opcode(OP_RETURN);
        script.append_push_data(data)?;
        Ok(script)
    }

    /// Build a bare multisig output script.
    ///
    /// Produces: OP_M <pubkeys...> OP_N OP_CHECKMULTISIG. Unless
    /// `no_sorting` is set, the public keys are sorted ascending by their
    /// serialized bytes first, so that every party building the script from
    /// the same key set produces identical bytes.
    ///
    /// # Arguments
    /// * `public_keys` - The N public keys; N must be at most 16.
    /// * `threshold` - M, the required number of signatures.
    /// * `no_sorting` - Keep the keys in the given order.
    ///
    /// # Returns
    /// The multisig locking script, or an error if the threshold exceeds the
    /// key count or either count cannot be encoded as a small integer.
    pub fn build_multisig_out(
        public_keys: &[PublicKey],
        threshold: usize,
        no_sorting: bool,
    ) -> Result<Script, ScriptError> {
        if threshold > public_keys.len() {
            return Err(ScriptError::ThresholdTooLarge {
                required: threshold,
                total: public_keys.len(),
            });
        }
        let mut encoded: Vec<Vec<u8>> = public_keys.iter().map(PublicKey::to_bytes).collect();
        if !no_sorting {
            // Byte order equals the order of the hex serializations.
            encoded.sort();
        }

        let mut script = Script::new();
        script.append_opcode(op_from_small_int(threshold)?);
        for key_bytes in &encoded {
            script.append_push_data(key_bytes)?;
        }
        script.append_opcode(op_from_small_int(public_keys.len())?);
        script.append_opcode(OP_CHECKMULTISIG);
        Ok(script)
    }

    /// Build a pay-to-script-hash multisig input script.
    ///
    /// Produces: OP_0 <signatures...> <serialized redeem script>, where the
    /// redeem script is `cached_multisig` if supplied, else a fresh
    /// [`Script::build_multisig_out`] over the keys.
    ///
    /// # Arguments
    /// * `public_keys` - The keys of the multisig redeem script.
    /// * `threshold` - M, the required number of signatures.
    /// * `signatures` - The signature pushes, in order, sighash byte included.
    /// * `no_sorting` - Passed through to the redeem script builder.
    /// * `cached_multisig` - A prebuilt redeem script to reuse.
    ///
    /// # Returns
    /// The P2SH multisig unlocking script.
    pub fn build_p2sh_multisig_in(
        public_keys: &[PublicKey],
        threshold: usize,
        signatures: &[Vec<u8>],
        no_sorting: bool,
        cached_multisig: Option<&Script>,
    ) -> Result<Script, ScriptError> {
        let redeem = match cached_multisig {
            Some(script) => script.clone(),
            None => Self::build_multisig_out(public_keys, threshold, no_sorting)?,
        };

        let mut script = Script::new();
        script.append_opcode(OP_0);
        for signature in signatures {
            script.append_push_data(signature)?;
        }
        script.append_push_data(&redeem.to_bytes())?;
        Ok(script)
    }

    /// Build a pay-to-public-key-hash input script.
    ///
    /// Produces: <signature || sighash byte> <pubkey>.
    ///
    /// # Arguments
    /// * `public_key` - The key whose hash the spent output commits to.
    /// * `signature` - The DER-encoded signature, without sighash byte.
    /// * `sigtype` - The sighash byte to append; defaults to `SIGHASH_ALL`.
    ///
    /// # Returns
    /// The P2PKH unlocking script.
    pub fn build_public_key_hash_in(
        public_key: &PublicKey,
        signature: &[u8],
        sigtype: Option<u8>,
    ) -> Result<Script, ScriptError> {
        let mut sig_buf = Vec::with_capacity(signature.len() + 1);
        sig_buf.extend_from_slice(signature);
        sig_buf.push(sigtype.unwrap_or(SIGHASH_ALL));

        let mut script = Script::new();
        script.append_push_data(&sig_buf)?;
        script.append_push_data(&public_key.to_bytes())?;
        Ok(script)
    }

    /// Build the output script paying to an address.
    ///
    /// P2SH addresses produce a script-hash output, P2PKH addresses a
    /// public-key-hash output; the address parser rejects every other
    /// version byte up front.
    ///
    /// # Arguments
    /// * `address` - The destination address.
    ///
    /// # Returns
    /// The locking script for the address.
    pub fn from_address(address: &Address) -> Result<Script, ScriptError> {
        match address.kind() {
            AddressKind::ScriptHash => Self::script_hash_out_from_hash(address.hash_buffer()),
            AddressKind::PubKeyHash => Self::build_public_key_hash_out(address),
        }
    }
}
