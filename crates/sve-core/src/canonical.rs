//! Canonical payload construction.
//!
//! The payload handed to Ed25519 is:
//!
//! ```text
//! public_key_value_1 CRLF ... public_key_value_n CRLF body
//! ```
//!
//! i.e. every public key header value joined with CRLF, one CRLF, then the
//! body verbatim. Signature headers never take part: the signer commits to
//! "this body under this key", and the signature is added afterwards.
//!
//! Signer and verifier build a [`Message`] in different ways but must arrive
//! at byte-identical payloads. **Changing this layout breaks every existing
//! signature.**

use tracing::debug;

use crate::config::{HeaderNames, ProtocolConfig};
use crate::crypto::Ed25519PublicKey;
use crate::error::FormatError;
use crate::header::{public_key_header, Header, HeaderBlock};
use crate::line::{self, BLANK_LINE, CRLF};

/// Build the canonical payload from a header block and body.
pub fn canonical_payload(headers: &HeaderBlock, names: &HeaderNames, body: &[u8]) -> Vec<u8> {
    let values: Vec<&str> = headers.values(names.public_key).collect();
    let joined_len: usize = values.iter().map(|v| v.len() + CRLF.len()).sum();

    let mut buf = Vec::with_capacity(joined_len + CRLF.len() + body.len());
    for (i, value) in values.iter().enumerate() {
        if i > 0 {
            buf.extend_from_slice(CRLF);
        }
        buf.extend_from_slice(value.as_bytes());
    }
    buf.extend_from_slice(CRLF);
    buf.extend_from_slice(body);
    buf
}

/// A header block plus body.
///
/// `raw` keeps the exact bytes the headers were rendered or received as, so
/// the signer can prepend its signature header to the same message it signed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Message {
    headers: HeaderBlock,
    raw_headers: Vec<u8>,
    body: Vec<u8>,
}

impl Message {
    /// Sign-side construction: canonicalize `input` and put a public key
    /// header in front of it.
    pub fn for_signing(input: &[u8], key: &Ed25519PublicKey, config: &ProtocolConfig) -> Self {
        let names = config.headers();
        let normalized = line::canonicalize(input, config.line_endings);
        let body = line::trim_trailing_blank_lines(&normalized).to_vec();

        let raw_headers = public_key_header(&names, key);
        let mut headers = HeaderBlock::new();
        headers.push(Header::new(names.public_key, key.to_hex()));

        debug!(
            input_len = input.len(),
            body_len = body.len(),
            policy = %config.line_endings,
            "prepared message for signing"
        );

        Self {
            headers,
            raw_headers,
            body,
        }
    }

    /// Verify-side construction: split a received message into headers and
    /// body.
    ///
    /// Empty lines at the end of the message are dropped first; some
    /// transports append an extra separator.
    pub fn parse(input: &[u8]) -> Result<Self, FormatError> {
        if input.is_empty() {
            return Err(FormatError::EmptyInput);
        }

        let split = line::find(input, BLANK_LINE).ok_or(FormatError::MissingSeparator)?;
        // The CRLF ending the last header belongs to the header block.
        let raw_headers = &input[..split + CRLF.len()];
        let body = line::trim_trailing_blank_lines(&input[split + BLANK_LINE.len()..]);

        let headers = HeaderBlock::decode(raw_headers)?;
        debug!(
            headers = headers.len(),
            body_len = body.len(),
            "parsed signed message"
        );

        Ok(Self {
            headers,
            raw_headers: raw_headers.to_vec(),
            body: body.to_vec(),
        })
    }

    /// The decoded headers.
    pub fn headers(&self) -> &HeaderBlock {
        &self.headers
    }

    /// The body, CRLF-terminated lines.
    pub fn body(&self) -> &[u8] {
        &self.body
    }

    /// Bytes fed to sign/verify.
    pub fn canonical_payload(&self, names: &HeaderNames) -> Vec<u8> {
        canonical_payload(&self.headers, names, &self.body)
    }

    /// Render the message with `prefix` (already encoded header lines) in
    /// front of the existing headers.
    pub fn to_bytes_with_prefix(&self, prefix: &[u8]) -> Vec<u8> {
        let mut out = Vec::with_capacity(
            prefix.len() + self.raw_headers.len() + CRLF.len() + self.body.len(),
        );
        out.extend_from_slice(prefix);
        out.extend_from_slice(&self.raw_headers);
        out.extend_from_slice(CRLF);
        out.extend_from_slice(&self.body);
        out
    }

    /// Render the message as is.
    pub fn to_bytes(&self) -> Vec<u8> {
        self.to_bytes_with_prefix(&[])
    }
}
