//! Sign and verify pipelines.
//!
//! Sign:   input → canonical line endings → `Public-Key` header → payload →
//!         Ed25519 → `Signature` header in front → output.
//!
//! Verify: input → trim → split headers/body → decode → payload → Ed25519 →
//!         verdict.

use std::io::Read;

use sve_core::{
    signature_header, Ed25519PublicKey, Ed25519Signature, FormatError, Keypair, Message,
    ProtocolConfig,
};
use tracing::{debug, info, warn};

use crate::error::{Result, SveError};

/// Where the verifier takes the public key from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum KeySource {
    /// The message's own public key header. The header is mandatory.
    #[default]
    Embedded,
    /// A key supplied out of band. The message's public key headers still
    /// form part of the payload but are not trusted.
    Pinned(Ed25519PublicKey),
}

/// Configuration for the pipelines.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PipelineConfig {
    /// Line endings and header names.
    pub protocol: ProtocolConfig,
    /// Verify mode.
    pub key_source: KeySource,
}

/// Outcome of a verification that could be attempted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Verification {
    /// Whether the signature matches.
    pub valid: bool,
    /// The key the signature was checked against.
    pub public_key: Ed25519PublicKey,
}

impl Verification {
    pub fn is_valid(&self) -> bool {
        self.valid
    }
}

/// Sign and verify messages under one configuration.
#[derive(Debug, Clone, Default)]
pub struct Pipeline {
    config: PipelineConfig,
}

impl Pipeline {
    pub fn new(config: PipelineConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    /// Sign `input` and return the decorated message.
    pub fn sign(&self, keypair: &Keypair, input: &[u8]) -> Vec<u8> {
        let protocol = &self.config.protocol;
        let names = protocol.headers();
        let public_key = keypair.public_key();

        let message = Message::for_signing(input, &public_key, protocol);
        let payload = message.canonical_payload(&names);
        let signature = keypair.sign(&payload);
        let output = message.to_bytes_with_prefix(&signature_header(&names, &signature));

        info!(
            public_key = %public_key,
            payload_len = payload.len(),
            output_len = output.len(),
            "signed message"
        );
        output
    }

    /// Verify a decorated message.
    ///
    /// Returns `Err` only when verification could not be attempted. A
    /// well-formed message whose signature does not match is `Ok` with
    /// `valid == false`.
    pub fn verify(&self, input: &[u8]) -> Result<Verification> {
        let names = self.config.protocol.headers();
        let message = Message::parse(input)?;
        let headers = message.headers();

        let public_key = match self.config.key_source {
            KeySource::Embedded => {
                let value = non_empty(headers.require(names.public_key)?, names.public_key)?;
                Ed25519PublicKey::from_hex(value)?
            }
            KeySource::Pinned(key) => {
                if let Some(embedded) = headers.get(names.public_key) {
                    if embedded != key.to_hex() {
                        warn!(embedded, pinned = %key, "embedded public key differs from pinned key");
                    }
                }
                key
            }
        };

        let signature_hex = non_empty(headers.require(names.signature)?, names.signature)?;
        let signature = Ed25519Signature::from_hex(signature_hex)?;

        let payload = message.canonical_payload(&names);
        debug!(payload_len = payload.len(), "reconstructed payload");

        let valid = public_key.verify(&payload, &signature)?;
        info!(valid, public_key = %public_key, "verified message");

        Ok(Verification { valid, public_key })
    }
}

fn non_empty<'a>(value: &'a str, name: &str) -> std::result::Result<&'a str, FormatError> {
    if value.is_empty() {
        Err(FormatError::EmptyHeader(name.to_string()))
    } else {
        Ok(value)
    }
}

/// Read all of `reader` into memory.
pub fn read_message(mut reader: impl Read) -> Result<Vec<u8>> {
    let mut buf = Vec::new();
    reader.read_to_end(&mut buf).map_err(SveError::Input)?;
    Ok(buf)
}

/// Read a complete message, refusing to wait on an interactive terminal.
pub fn read_piped_message(reader: impl Read, interactive: bool) -> Result<Vec<u8>> {
    if interactive {
        return Err(SveError::InteractiveInput);
    }
    read_message(reader)
}
