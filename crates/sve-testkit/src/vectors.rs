//! Golden test vectors for deterministic verification.
//!
//! Ed25519 signatures are deterministic, so a seed and a body pin down the
//! whole signed message. Other implementations can check themselves against
//! these values.

use serde::Serialize;
use sve::{Keypair, LineEndingPolicy, Pipeline, PipelineConfig, ProtocolConfig};
use sve_core::Message;

/// A golden test vector.
#[derive(Debug, Clone, Serialize)]
pub struct GoldenVector {
    /// Human-readable name for the vector.
    pub name: &'static str,
    /// Seed byte, repeated 32 times.
    pub seed_byte: u8,
    /// Raw message body before canonicalization.
    #[serde(serialize_with = "serialize_bytes")]
    pub body: &'static [u8],
    /// Line ending policy used by the signer.
    pub line_endings: LineEndingPolicy,
    /// Body after canonicalization and trimming.
    #[serde(serialize_with = "serialize_bytes")]
    pub expected_body: &'static [u8],
    /// Expected public key (hex).
    pub expected_public_key: &'static str,
    /// Expected signature (hex).
    pub expected_signature: &'static str,
}

fn serialize_bytes<S: serde::Serializer>(bytes: &&'static [u8], s: S) -> Result<S::Ok, S::Error> {
    s.serialize_str(&String::from_utf8_lossy(bytes))
}

impl GoldenVector {
    /// The signing key for this vector.
    pub fn keypair(&self) -> Keypair {
        Keypair::from_seed(&[self.seed_byte; 32])
    }

    /// Pipeline configured as the vector's signer.
    pub fn pipeline(&self) -> Pipeline {
        Pipeline::new(PipelineConfig {
            protocol: ProtocolConfig {
                line_endings: self.line_endings,
                ..ProtocolConfig::default()
            },
            ..PipelineConfig::default()
        })
    }

    /// Canonical payload the signature covers.
    pub fn expected_payload(&self) -> Vec<u8> {
        let mut payload = self.expected_public_key.as_bytes().to_vec();
        payload.extend_from_slice(b"\r\n");
        payload.extend_from_slice(self.expected_body);
        payload
    }

    /// The full decorated message the signer must produce.
    pub fn expected_message(&self) -> Vec<u8> {
        let (head, tail) = self.expected_signature.split_at(64);
        let mut out = format!(
            "Signature: {head}\r\n {tail}\r\nPublic-Key: {}\r\n\r\n",
            self.expected_public_key
        )
        .into_bytes();
        out.extend_from_slice(self.expected_body);
        out
    }
}

/// Get all golden test vectors.
pub fn all_vectors() -> Vec<GoldenVector> {
    vec![
        GoldenVector {
            name: "hello with LF",
            seed_byte: 0x42,
            body: b"hello\n",
            line_endings: LineEndingPolicy::Normalize,
            expected_body: b"hello\r\n",
            expected_public_key: "2152f8d19b791d24453242e15f2eab6cb7cffa7b6a5ed30097960e069881db12",
            expected_signature: "4f2795fb9e04af210509001249f34d855a02040093d78151f737a1a2428d58d7c575af3e5cb64ba0623ac623175c6908429f0733d306ecae9bcf3de1a7b7840a",
        },
        GoldenVector {
            name: "hello under another key",
            seed_byte: 0x01,
            body: b"hello\n",
            line_endings: LineEndingPolicy::Normalize,
            expected_body: b"hello\r\n",
            expected_public_key: "8a88e3dd7409f195fd52db2d3cba5d72ca6709bf1d94121bf3748801b40f6f5c",
            expected_signature: "d75d39d31d4c93582e8e647d7970c739a1ec811468d18b34849417b82ec88ce947f50ff9681f4b236e5b267771f4b14a719691c54c1e5db0438b8a7198e49806",
        },
        GoldenVector {
            name: "mixed line endings",
            seed_byte: 0x03,
            body: b"alpha\rbeta\r\ngamma\n",
            line_endings: LineEndingPolicy::Normalize,
            expected_body: b"alpha\r\nbeta\r\ngamma\r\n",
            expected_public_key: "ed4928c628d1c2c6eae90338905995612959273a5c63f93636c14614ac8737d1",
            expected_signature: "c8488117ef5f30f08bdc28d51f1ff2e191344886466d65ea68823392bbc8e6e126dc78245a20e4fac568cd28f5404435e8ec1fbb73ce2a468bfeaa2880ff880c",
        },
        GoldenVector {
            name: "empty body",
            seed_byte: 0x04,
            body: b"",
            line_endings: LineEndingPolicy::Normalize,
            expected_body: b"",
            expected_public_key: "ca93ac1705187071d67b83c7ff0efe8108e8ec4530575d7726879333dbdabe7c",
            expected_signature: "520a274d5d94df59566ae44134fea49ba7091e415f6e4ee839619341f870fdd6e24ec08982e5e69ae8c5af60f979740275f724e9d09da0656ceefab81ef19d0b",
        },
        GoldenVector {
            name: "trailing blank lines",
            seed_byte: 0x05,
            body: b"done\n\n\n",
            line_endings: LineEndingPolicy::Normalize,
            expected_body: b"done\r\n",
            expected_public_key: "6e7a1cdd29b0b78fd13af4c5598feff4ef2a97166e3ca6f2e4fbfccd80505bf1",
            expected_signature: "c18447d481167cf890df32a9349310641baec0c24368d1cafab46945e61bada2dd2e13072c1a655bc9e856f494c25238a9e5637698dd734f0e0e11085f97fe0a",
        },
        GoldenVector {
            name: "legacy keeps mixed endings",
            seed_byte: 0x06,
            body: b"one\ntwo\r\n",
            line_endings: LineEndingPolicy::Legacy,
            expected_body: b"one\ntwo\r\n",
            expected_public_key: "8a875fff1eb38451577acd5afee405456568dd7c89e090863a0557bc7af49f17",
            expected_signature: "38bf74ed0a8c04aee5fddf2a4eca012ac80012e356b0b4fc744e893df2d7d00378700fd1d6688e64bfacd0f2c82c70c6db611eba7c64a0b502f9e63f8fc73d0b",
        },
        GoldenVector {
            name: "no final newline",
            seed_byte: 0x08,
            body: b"no newline",
            line_endings: LineEndingPolicy::Normalize,
            expected_body: b"no newline",
            expected_public_key: "1398f62c6d1a457c51ba6a4b5f3dbd2f69fca93216218dc8997e416bd17d93ca",
            expected_signature: "c39a317a589674de4819b42d10c5865b1b3d49f49b25fe9d5f5a8b8a1ed906c9bcf834706fc72aab91ab26832f2c922e3e64cb669bf124bb42a1dbed8bfea80f",
        },
    ]
}

/// Sign every vector and compare against the expected message.
///
/// Returns (name, matches, produced message) for each vector.
pub fn verify_all_vectors() -> Vec<(String, bool, Vec<u8>)> {
    all_vectors()
        .iter()
        .map(|v| {
            let produced = v.pipeline().sign(&v.keypair(), v.body);
            let matches = produced == v.expected_message();
            (v.name.to_string(), matches, produced)
        })
        .collect()
}

/// Render all vectors as pretty JSON.
pub fn vectors_json() -> serde_json::Result<String> {
    serde_json::to_string_pretty(&all_vectors())
}

/// Canonical payload computed through [`Message`], for comparing against
/// [`GoldenVector::expected_payload`].
pub fn computed_payload(vector: &GoldenVector) -> Vec<u8> {
    let config = ProtocolConfig {
        line_endings: vector.line_endings,
        ..ProtocolConfig::default()
    };
    Message::for_signing(vector.body, &vector.keypair().public_key(), &config)
        .canonical_payload(&config.headers())
}
