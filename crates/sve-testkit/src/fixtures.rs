//! Test fixtures and helpers.
//!
//! Common setup code for integration tests.

use sve::{
    Ed25519PublicKey, KeySource, Keypair, Pipeline, PipelineConfig, Result, Verification,
};

/// A test fixture with a keypair and a default pipeline.
pub struct TestFixture {
    pub keypair: Keypair,
    pub pipeline: Pipeline,
}

impl TestFixture {
    /// Create a new test fixture with a random keypair.
    pub fn new() -> Self {
        Self {
            keypair: Keypair::generate(),
            pipeline: Pipeline::default(),
        }
    }

    /// Create with a deterministic keypair from seed.
    pub fn with_seed(seed: [u8; 32]) -> Self {
        Self {
            keypair: Keypair::from_seed(&seed),
            pipeline: Pipeline::default(),
        }
    }

    /// Get the keypair's public key.
    pub fn public_key(&self) -> Ed25519PublicKey {
        self.keypair.public_key()
    }

    /// Sign `body` with the fixture key.
    pub fn sign(&self, body: &[u8]) -> Vec<u8> {
        self.pipeline.sign(&self.keypair, body)
    }

    /// Verify with the embedded key.
    pub fn verify(&self, message: &[u8]) -> Result<Verification> {
        self.pipeline.verify(message)
    }

    /// Verify against this fixture's key regardless of the embedded one.
    pub fn verify_pinned(&self, message: &[u8]) -> Result<Verification> {
        Pipeline::new(PipelineConfig {
            protocol: self.pipeline.config().protocol,
            key_source: KeySource::Pinned(self.public_key()),
        })
        .verify(message)
    }
}

impl Default for TestFixture {
    fn default() -> Self {
        Self::new()
    }
}

/// Byte offset of the body in a signed message.
pub fn body_offset(message: &[u8]) -> Option<usize> {
    message
        .windows(4)
        .position(|w| w == b"\r\n\r\n")
        .map(|i| i + 4)
}

/// Byte range of the value of the first line starting with `prefix`.
pub fn header_value_range(message: &[u8], prefix: &str) -> Option<std::ops::Range<usize>> {
    let prefix = prefix.as_bytes();
    let start = message
        .windows(prefix.len())
        .position(|w| w == prefix)?
        + prefix.len();
    let len = message[start..].windows(2).position(|w| w == b"\r\n")?;
    Some(start..start + len)
}

/// Copy of `message` with the byte at `index` changed to a different value
/// of the same class (hex digit stays a hex digit, text stays text).
pub fn flip_byte(message: &[u8], index: usize) -> Vec<u8> {
    let mut out = message.to_vec();
    out[index] = match out[index] {
        b'0' => b'1',
        b'0'..=b'9' | b'a'..=b'f' => b'0',
        b'\r' | b'\n' => b'x',
        b'x' => b'y',
        _ => b'x',
    };
    out
}
