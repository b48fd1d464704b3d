//! Standard script template classification.
//!
//! Recognizes the standard output/input templates by chunk shape. The
//! template order is part of the contract: identifiers are tried in the
//! order of [`STANDARD_TEMPLATES`] and the first match wins, which resolves
//! structurally ambiguous scripts deterministically.

use std::fmt;

use bitcore_primitives::ec::PublicKey;

use crate::chunk::ScriptChunk;
use crate::opcodes::*;
use crate::script::Script;

/// Signature push lengths accepted in input scripts: a DER signature plus
/// the trailing sighash byte.
const SIG_PUSH_LENGTHS: [usize; 3] = [0x47, 0x48, 0x49];

/// Maximum payload of a standard data output.
const MAX_DATA_OUT_LEN: usize = 40;

/// The standard script template a script matches, if any.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ScriptType {
    /// Pay-to-public-key output: `<pubkey> OP_CHECKSIG`.
    PublicKeyOut,
    /// Pay-to-public-key input: a single signature push.
    PublicKeyIn,
    /// Pay-to-public-key-hash output:
    /// `OP_DUP OP_HASH160 <20 bytes> OP_EQUALVERIFY OP_CHECKSIG`.
    PublicKeyHashOut,
    /// Pay-to-public-key-hash input: `<sig> <pubkey>`.
    PublicKeyHashIn,
    /// Pay-to-script-hash output: `OP_HASH160 <20 bytes> OP_EQUAL`.
    ScriptHashOut,
    /// Pay-to-script-hash input: pushes ending with a serialized redeem
    /// script that classifies as standard.
    ScriptHashIn,
    /// Bare multisig output: `OP_M <pubkeys...> OP_N OP_CHECKMULTISIG`.
    MultisigOut,
    /// Multisig input: `OP_0 <sig> <sig> ...`.
    MultisigIn,
    /// Data-carrier output: `OP_RETURN` with at most one small push.
    DataOut,
    /// No standard template matched.
    Unknown,
}

impl fmt::Display for ScriptType {
    /// Display the conventional template tag name.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let tag = match self {
            ScriptType::PublicKeyOut => "pubkeyout",
            ScriptType::PublicKeyIn => "pubkeyin",
            ScriptType::PublicKeyHashOut => "pubkeyhashout",
            ScriptType::PublicKeyHashIn => "pubkeyhashin",
            ScriptType::ScriptHashOut => "scripthashout",
            ScriptType::ScriptHashIn => "scripthashin",
            ScriptType::MultisigOut => "multisigout",
            ScriptType::MultisigIn => "multisigin",
            ScriptType::DataOut => "nulldata",
            ScriptType::Unknown => "unknown",
        };
        write!(f, "{}", tag)
    }
}

/// The ordered template table. Classification tries each predicate in this
/// order; the order resolves ties (a signature-and-pubkey input classifies
/// as PublicKeyHashIn even when its last push also parses as a script).
pub const STANDARD_TEMPLATES: &[(ScriptType, fn(&Script) -> bool)] = &[
    (ScriptType::PublicKeyHashOut, Script::is_public_key_hash_out),
    (ScriptType::PublicKeyHashIn, Script::is_public_key_hash_in),
    (ScriptType::PublicKeyOut, Script::is_public_key_out),
    (ScriptType::PublicKeyIn, Script::is_public_key_in),
    (ScriptType::ScriptHashOut, Script::is_script_hash_out),
    (ScriptType::ScriptHashIn, Script::is_script_hash_in),
    (ScriptType::MultisigOut, Script::is_multisig_out),
    (ScriptType::MultisigIn, Script::is_multisig_in),
    (ScriptType::DataOut, Script::is_data_out),
];

/// Check whether a chunk is a push whose payload is a valid public key.
fn is_pubkey_push(chunk: &ScriptChunk) -> bool {
    match chunk.data() {
        Some(data) => PublicKey::is_valid(data),
        None => false,
    }
}

/// Check whether a chunk is a push of one of the signature lengths.
fn is_sig_push(chunk: &ScriptChunk) -> bool {
    match chunk.data() {
        Some(data) => SIG_PUSH_LENGTHS.contains(&data.len()),
        None => false,
    }
}

impl Script {
    /// Check if this is a pay-to-public-key-hash output script.
    ///
    /// Pattern: OP_DUP OP_HASH160 <20 bytes> OP_EQUALVERIFY OP_CHECKSIG
    ///
    /// # Returns
    /// `true` if the script matches the P2PKH output shape.
    pub fn is_public_key_hash_out(&self) -> bool {
        let chunks = self.chunks();
        chunks.len() == 5
            && chunks[0].opcode() == OP_DUP
            && chunks[1].opcode() == OP_HASH160
            && chunks[2].data().map(<[u8]>::len) == Some(20)
            && chunks[3].opcode() == OP_EQUALVERIFY
            && chunks[4].opcode() == OP_CHECKSIG
    }

    /// Check if this is a pay-to-public-key-hash input script.
    ///
    /// Pattern: a signature push (0x47-0x49 bytes) followed by a push of a
    /// valid public key.
    ///
    /// # Returns
    /// `true` if the script matches the P2PKH input shape.
    pub fn is_public_key_hash_in(&self) -> bool {
        let chunks = self.chunks();
        chunks.len() == 2 && is_sig_push(&chunks[0]) && is_pubkey_push(&chunks[1])
    }

    /// Check if this is a pay-to-public-key output script.
    ///
    /// Pattern: <pubkey> OP_CHECKSIG
    ///
    /// # Returns
    /// `true` if the script matches the P2PK output shape.
    pub fn is_public_key_out(&self) -> bool {
        let chunks = self.chunks();
        chunks.len() == 2 && is_pubkey_push(&chunks[0]) && chunks[1].opcode() == OP_CHECKSIG
    }

    /// Check if this is a pay-to-public-key input script.
    ///
    /// Pattern: a single 0x47-byte signature push.
    ///
    /// # Returns
    /// `true` if the script matches the P2PK input shape.
    pub fn is_public_key_in(&self) -> bool {
        let chunks = self.chunks();
        chunks.len() == 1 && chunks[0].data().map(<[u8]>::len) == Some(0x47)
    }

    /// Check if this is a pay-to-script-hash output script.
    ///
    /// Pattern: OP_HASH160 <20 bytes> OP_EQUAL
    ///
    /// # Returns
    /// `true` if the script matches the P2SH output shape.
    pub fn is_script_hash_out(&self) -> bool {
        let chunks = self.chunks();
        chunks.len() == 3
            && chunks[0].opcode() == OP_HASH160
            && chunks[1].data().map(<[u8]>::len) == Some(20)
            && chunks[2].opcode() == OP_EQUAL
    }

    /// Check if this is a pay-to-script-hash input script.
    ///
    /// The script is non-empty and its last chunk pushes a serialized
    /// redeem script that itself classifies as a standard template.
    ///
    /// # Returns
    /// `true` if the script matches the P2SH input shape.
    pub fn is_script_hash_in(&self) -> bool {
        let Some(redeem_data) = self.chunks().last().and_then(ScriptChunk::data) else {
            return false;
        };
        match Script::from_bytes(redeem_data) {
            Ok(redeem) => redeem.classify() != ScriptType::Unknown,
            Err(_) => false,
        }
    }

    /// Check if this is a bare multisig output script.
    ///
    /// Pattern: OP_M <pubkey pushes...> OP_N OP_CHECKMULTISIG. The key
    /// pushes are checked for shape only; their count is not reconciled
    /// against N at this layer.
    ///
    /// # Returns
    /// `true` if the script matches the multisig output shape.
    pub fn is_multisig_out(&self) -> bool {
        let chunks = self.chunks();
        if chunks.len() <= 3 {
            return false;
        }
        is_small_int_op(chunks[0].opcode())
            && chunks[1..chunks.len() - 2].iter().all(ScriptChunk::is_push)
            && is_small_int_op(chunks[chunks.len() - 2].opcode())
            && chunks[chunks.len() - 1].opcode() == OP_CHECKMULTISIG
    }

    /// Check if this is a multisig input script.
    ///
    /// Pattern: OP_0 as the multisig off-by-one dummy, followed by one or
    /// more 0x47-byte signature pushes.
    ///
    /// # Returns
    /// `true` if the script matches the multisig input shape.
    pub fn is_multisig_in(&self) -> bool {
        let chunks = self.chunks();
        chunks.len() >= 2
            && chunks[0].opcode() == OP_0
            && chunks[1..]
                .iter()
                .all(|chunk| chunk.data().map(<[u8]>::len) == Some(0x47))
    }

    /// Check if this is a data-carrier output script.
    ///
    /// Pattern: OP_RETURN alone, or OP_RETURN followed by a single push of
    /// at most 40 bytes.
    ///
    /// # Returns
    /// `true` if the script matches the data output shape.
    pub fn is_data_out(&self) -> bool {
        let chunks = self.chunks();
        if chunks.is_empty() || chunks[0].opcode() != OP_RETURN {
            return false;
        }
        match chunks.len() {
            1 => true,
            2 => chunks[1]
                .data()
                .map(|data| data.len() <= MAX_DATA_OUT_LEN)
                .unwrap_or(false),
            _ => false,
        }
    }

    /// Classify this script against the standard templates.
    ///
    /// Tries the identifiers of [`STANDARD_TEMPLATES`] in order and returns
    /// the first matching tag.
    ///
    /// # Returns
    /// The matching `ScriptType`, or `Unknown` if no template matches.
    pub fn classify(&self) -> ScriptType {
        for (script_type, predicate) in STANDARD_TEMPLATES {
            if predicate(self) {
                return *script_type;
            }
        }
        ScriptType::Unknown
    }

    /// Check whether this script matches any standard template.
    ///
    /// # Returns
    /// `true` if `classify` returns anything but `Unknown`.
    pub fn is_standard(&self) -> bool {
        self.classify() != ScriptType::Unknown
    }
}

#[cfg(test)]
mod tests {
    //! Tests for the standard template classifier.
    //!
    //! Covers each template's positive and negative shape checks, the
    //! definition-order tie-breaks for ambiguous scripts, and is_standard.

    use super::*;

    /// Known-valid compressed public keys.
    const KEY_1: &str = "026cf33373a9f3f6c676b75b543180703df225f7f8edbffedc417718a8ad4e89ce";
    const KEY_2: &str = "02f0d97c290e79bf2a8660c406aa56b6f189ff79f2245cc5aff82808b58131b4d5";

    /// A plausible signature push: DER-style leading bytes padded to `len`.
    fn dummy_sig(len: usize) -> Vec<u8> {
        let mut sig = vec![0x30, (len - 3) as u8, 0x02, 0x21];
        sig.resize(len - 1, 0x01);
        sig.push(0x01); // sighash byte
        sig
    }

    /// Push the given payload onto a fresh script.
    fn push_script(payloads: &[&[u8]]) -> Script {
        let mut script = Script::new();
        for payload in payloads {
            script.append_push_data(payload).expect("push should succeed");
        }
        script
    }

    // -----------------------------------------------------------------------
    // Output templates
    // -----------------------------------------------------------------------

    /// A P2PKH output with a zero hash classifies and extracts correctly.
    #[test]
    fn test_classify_public_key_hash_out() {
        let hex_str = format!("76a914{}88ac", "00".repeat(20));
        let script = Script::from_hex(&hex_str).expect("valid hex should parse");
        assert_eq!(script.chunk_count(), 5);
        assert_eq!(script.classify(), ScriptType::PublicKeyHashOut);
        assert_eq!(script.public_key_hash().expect("should extract"), [0u8; 20]);
    }

    /// A 19-byte hash push does not match the P2PKH output shape.
    #[test]
    fn test_classify_public_key_hash_out_wrong_hash_len() {
        let hex_str = format!("76a913{}88ac", "00".repeat(19));
        let script = Script::from_hex(&hex_str).expect("valid hex should parse");
        assert!(!script.is_public_key_hash_out());
        assert_eq!(script.classify(), ScriptType::Unknown);
    }

    /// A P2SH output with a zero hash classifies as ScriptHashOut.
    #[test]
    fn test_classify_script_hash_out() {
        let hex_str = format!("a914{}87", "00".repeat(20));
        let script = Script::from_hex(&hex_str).expect("valid hex should parse");
        assert_eq!(script.classify(), ScriptType::ScriptHashOut);
    }

    /// A P2PK output over a valid key classifies as PublicKeyOut.
    #[test]
    fn test_classify_public_key_out() {
        let hex_str = format!("21{}ac", KEY_2);
        let script = Script::from_hex(&hex_str).expect("valid hex should parse");
        assert_eq!(script.classify(), ScriptType::PublicKeyOut);
        assert_eq!(hex::encode(script.public_key().expect("should extract")), KEY_2);
    }

    /// A P2PK-shaped script over an invalid key is not PublicKeyOut.
    #[test]
    fn test_classify_public_key_out_invalid_key() {
        // 33 bytes of 0xff: right length, not a curve point.
        let hex_str = format!("21{}ac", "ff".repeat(33));
        let script = Script::from_hex(&hex_str).expect("valid hex should parse");
        assert!(!script.is_public_key_out());
        assert_eq!(script.classify(), ScriptType::Unknown);
    }

    /// A bare multisig output classifies regardless of push contents.
    #[test]
    fn test_classify_multisig_out() {
        // OP_2 <0x11> <0x22> <0x33> OP_3 OP_CHECKMULTISIG
        let script = Script::from_hex("5201110122013353ae").expect("valid hex should parse");
        assert_eq!(script.classify(), ScriptType::MultisigOut);
    }

    /// Dropping the trailing OP_CHECKMULTISIG demotes the script to Unknown.
    #[test]
    fn test_classify_multisig_out_missing_checkmultisig() {
        let script = Script::from_hex("52011101220133").expect("valid hex should parse");
        assert!(!script.is_multisig_out());
    }

    /// A three-chunk OP_M OP_N OP_CHECKMULTISIG shell is not multisig out.
    #[test]
    fn test_classify_multisig_out_too_short() {
        let script = Script::from_asm("OP_2 OP_3 OP_CHECKMULTISIG").expect("valid text");
        assert!(!script.is_multisig_out());
    }

    /// OP_RETURN data outputs classify up to the 40-byte bound.
    #[test]
    fn test_classify_data_out() {
        let script = Script::from_hex("6a0548656c6c6f").expect("valid hex should parse");
        assert_eq!(script.classify(), ScriptType::DataOut);
        assert_eq!(script.to_asm(), "OP_RETURN 5 0x48656c6c6f");

        let bare = Script::from_hex("6a").expect("valid hex should parse");
        assert_eq!(bare.classify(), ScriptType::DataOut);
    }

    /// A 41-byte payload exceeds the data output bound.
    #[test]
    fn test_classify_data_out_too_long() {
        let mut script = Script::new();
        script.append_opcode(OP_RETURN);
        script.append_push_data(&[0xAA; 41]).expect("push should succeed");
        assert!(!script.is_data_out());
        assert_eq!(script.classify(), ScriptType::Unknown);
    }

    /// Two pushes after OP_RETURN do not match the data output shape.
    #[test]
    fn test_classify_data_out_two_pushes() {
        let mut script = Script::new();
        script.append_opcode(OP_RETURN);
        script.append_push_data(&[0xAA; 4]).expect("push should succeed");
        script.append_push_data(&[0xBB; 4]).expect("push should succeed");
        assert!(!script.is_data_out());
    }

    // -----------------------------------------------------------------------
    // Input templates
    // -----------------------------------------------------------------------

    /// A signature push plus a valid pubkey push is PublicKeyHashIn.
    #[test]
    fn test_classify_public_key_hash_in() {
        for sig_len in [0x47usize, 0x48, 0x49] {
            let key = hex::decode(KEY_1).expect("valid hex");
            let script = push_script(&[&dummy_sig(sig_len), &key]);
            assert_eq!(
                script.classify(),
                ScriptType::PublicKeyHashIn,
                "sig length {:#x}",
                sig_len
            );
        }
    }

    /// A 0x4a-byte first push is too long to be a signature push.
    #[test]
    fn test_classify_public_key_hash_in_sig_too_long() {
        let key = hex::decode(KEY_1).expect("valid hex");
        let script = push_script(&[&dummy_sig(0x4a), &key]);
        assert!(!script.is_public_key_hash_in());
    }

    /// A single 0x47-byte push is PublicKeyIn.
    #[test]
    fn test_classify_public_key_in() {
        let script = push_script(&[&dummy_sig(0x47)]);
        assert_eq!(script.classify(), ScriptType::PublicKeyIn);
    }

    /// A single push of another signature length is not PublicKeyIn.
    #[test]
    fn test_classify_public_key_in_wrong_len() {
        let script = push_script(&[&dummy_sig(0x48)]);
        assert!(!script.is_public_key_in());
        assert_eq!(script.classify(), ScriptType::Unknown);
    }

    /// An input whose last push is a standard redeem script is ScriptHashIn.
    #[test]
    fn test_classify_script_hash_in() {
        let redeem = Script::from_hex(&format!("76a914{}88ac", "00".repeat(20)))
            .expect("valid hex should parse");
        let mut script = Script::new();
        script.append_opcode(OP_0);
        script.append_push_data(&redeem.to_bytes()).expect("push should succeed");
        assert_eq!(script.classify(), ScriptType::ScriptHashIn);
    }

    /// A last push that fails to parse as a script is not ScriptHashIn.
    #[test]
    fn test_classify_script_hash_in_unparsable_redeem() {
        // 0x4c with no length byte is a truncated script.
        let script = push_script(&[&[OP_PUSHDATA1]]);
        assert!(!script.is_script_hash_in());
    }

    /// A last push whose script classifies Unknown is not ScriptHashIn.
    #[test]
    fn test_classify_script_hash_in_nonstandard_redeem() {
        let script = push_script(&[&[OP_DUP, OP_DUP, OP_DUP]]);
        assert!(!script.is_script_hash_in());
    }

    /// OP_0 followed by 0x47-byte pushes is MultisigIn.
    #[test]
    fn test_classify_multisig_in() {
        let mut script = Script::new();
        script.append_opcode(OP_0);
        script.append_push_data(&dummy_sig(0x47)).expect("push should succeed");
        script.append_push_data(&dummy_sig(0x47)).expect("push should succeed");
        assert_eq!(script.classify(), ScriptType::MultisigIn);
    }

    /// A lone OP_0 is not MultisigIn.
    #[test]
    fn test_classify_multisig_in_needs_signatures() {
        let mut script = Script::new();
        script.append_opcode(OP_0);
        assert!(!script.is_multisig_in());
    }

    // -----------------------------------------------------------------------
    // Order tie-breaks
    // -----------------------------------------------------------------------

    /// A 0x47-byte redeem script that also parses as bare multisig: both
    /// PublicKeyIn and ScriptHashIn match, and the earlier rule wins.
    #[test]
    fn test_classify_order_public_key_in_beats_script_hash_in() {
        // OP_2 <33 bytes> <33 bytes> OP_2 OP_CHECKMULTISIG = 71 = 0x47 bytes.
        let redeem = Script::from_hex(&format!(
            "5221{}21{}52ae",
            "11".repeat(33),
            "22".repeat(33)
        ))
        .expect("valid hex should parse");
        let redeem_bytes = redeem.to_bytes();
        assert_eq!(redeem_bytes.len(), 0x47);
        assert_eq!(redeem.classify(), ScriptType::MultisigOut);

        let script = push_script(&[&redeem_bytes]);
        assert!(script.is_public_key_in());
        assert!(script.is_script_hash_in());
        assert_eq!(script.classify(), ScriptType::PublicKeyIn);
    }

    /// A P2SH multisig spend matches both ScriptHashIn and MultisigIn; the
    /// earlier ScriptHashIn rule wins.
    #[test]
    fn test_classify_order_script_hash_in_beats_multisig_in() {
        let redeem = Script::from_hex(&format!(
            "5221{}21{}52ae",
            "11".repeat(33),
            "22".repeat(33)
        ))
        .expect("valid hex should parse");
        let mut script = Script::new();
        script.append_opcode(OP_0);
        script.append_push_data(&dummy_sig(0x47)).expect("push should succeed");
        script.append_push_data(&redeem.to_bytes()).expect("push should succeed");

        assert!(script.is_script_hash_in());
        assert!(script.is_multisig_in());
        assert_eq!(script.classify(), ScriptType::ScriptHashIn);
    }

    // -----------------------------------------------------------------------
    // is_standard
    // -----------------------------------------------------------------------

    /// Standard templates are standard; an arbitrary opcode soup is not.
    #[test]
    fn test_is_standard() {
        let p2pkh = Script::from_hex(&format!("76a914{}88ac", "00".repeat(20)))
            .expect("valid hex should parse");
        assert!(p2pkh.is_standard());

        let soup = Script::from_asm("OP_DUP OP_ADD OP_VERIFY").expect("valid text");
        assert!(!soup.is_standard());

        assert!(!Script::new().is_standard());
    }

    /// ScriptType renders its conventional tags.
    #[test]
    fn test_script_type_display() {
        assert_eq!(ScriptType::DataOut.to_string(), "nulldata");
        assert_eq!(ScriptType::Unknown.to_string(), "unknown");
        assert_eq!(ScriptType::PublicKeyHashOut.to_string(), "pubkeyhashout");
    }
}
