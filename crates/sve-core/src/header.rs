//! Header line encoding and decoding.
//!
//! A header is rendered as `Name: value\r\n`. Long values may be folded onto
//! continuation lines that start with a single space; decoding strips the
//! leading spaces and concatenates the pieces with no separator.

use tracing::warn;

use crate::config::HeaderNames;
use crate::crypto::{Ed25519PublicKey, Ed25519Signature, SIGNATURE_FOLD_OFFSET};
use crate::error::FormatError;
use crate::line::{find, CRLF};

/// Separator between a header name and its value.
const NAME_SEPARATOR: &str = ": ";

/// A single (unfolded) header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Header {
    pub name: String,
    pub value: String,
}

impl Header {
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }

    /// Append the rendered header to `buf`, folding at `fold_at` if the value
    /// is longer than that.
    pub fn encode_to(&self, buf: &mut Vec<u8>, fold_at: Option<usize>) {
        buf.extend_from_slice(self.name.as_bytes());
        buf.extend_from_slice(NAME_SEPARATOR.as_bytes());
        match fold_at {
            Some(at) if self.value.len() > at && self.value.is_char_boundary(at) => {
                let (head, tail) = self.value.split_at(at);
                buf.extend_from_slice(head.as_bytes());
                buf.extend_from_slice(CRLF);
                buf.push(b' ');
                buf.extend_from_slice(tail.as_bytes());
            }
            _ => buf.extend_from_slice(self.value.as_bytes()),
        }
        buf.extend_from_slice(CRLF);
    }

    /// Render to a fresh buffer without folding.
    pub fn encode(&self) -> Vec<u8> {
        let mut buf = Vec::new();
        self.encode_to(&mut buf, None);
        buf
    }
}

/// Render the public key header.
pub fn public_key_header(names: &HeaderNames, key: &Ed25519PublicKey) -> Vec<u8> {
    Header::new(names.public_key, key.to_hex()).encode()
}

/// Render the signature header, folded after [`SIGNATURE_FOLD_OFFSET`] hex
/// characters.
pub fn signature_header(names: &HeaderNames, signature: &Ed25519Signature) -> Vec<u8> {
    let mut buf = Vec::new();
    Header::new(names.signature, signature.to_hex())
        .encode_to(&mut buf, Some(SIGNATURE_FOLD_OFFSET));
    buf
}

/// The decoded header block of a message, in order of appearance.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HeaderBlock {
    headers: Vec<Header>,
}

impl HeaderBlock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a header.
    pub fn push(&mut self, header: Header) {
        self.headers.push(header);
    }

    /// Decode a header block (everything before the blank line, without the
    /// final CRLF).
    ///
    /// Lines of the form `Name: value` start a header. Lines starting with a
    /// space continue the previous header. Anything else is skipped.
    pub fn decode(block: &[u8]) -> Result<Self, FormatError> {
        let mut headers: Vec<Header> = Vec::new();
        // Whether the most recent non-continuation line was a header, so a
        // continuation after a skipped line is not glued onto an older one.
        let mut open = false;

        for (index, raw) in split_lines(block).enumerate() {
            let line = std::str::from_utf8(raw)
                .map_err(|_| FormatError::NonUtf8Header { line: index + 1 })?;

            if line.starts_with(' ') {
                match headers.last_mut() {
                    Some(current) if open => current.value.push_str(line.trim()),
                    _ => warn!(line = index + 1, "continuation line without a header, skipping"),
                }
                continue;
            }

            match line.split_once(NAME_SEPARATOR) {
                Some((name, value)) if is_token(name) => {
                    headers.push(Header::new(name, value));
                    open = true;
                }
                _ => {
                    if !line.is_empty() {
                        warn!(line = index + 1, "unrecognized header line, skipping");
                    }
                    open = false;
                }
            }
        }

        Ok(Self { headers })
    }

    /// All headers in order.
    pub fn iter(&self) -> impl Iterator<Item = &Header> {
        self.headers.iter()
    }

    /// Values of every header named `name`, in order.
    pub fn values<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a str> + 'a {
        self.headers
            .iter()
            .filter(move |h| h.name == name)
            .map(|h| h.value.as_str())
    }

    /// Value of the first header named `name`.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|h| h.name == name)
            .map(|h| h.value.as_str())
    }

    /// Value of the first header named `name`, or a format error if absent.
    pub fn require(&self, name: &str) -> Result<&str, FormatError> {
        self.get(name)
            .ok_or_else(|| FormatError::MissingHeader(name.to_string()))
    }

    pub fn len(&self) -> usize {
        self.headers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.headers.is_empty()
    }
}

/// Split on CRLF. A trailing CRLF does not produce a final empty line.
fn split_lines(block: &[u8]) -> impl Iterator<Item = &[u8]> {
    let mut rest = (!block.is_empty()).then(|| block.strip_suffix(CRLF).unwrap_or(block));
    std::iter::from_fn(move || {
        let current = rest?;
        match find(current, CRLF) {
            Some(i) => {
                rest = Some(&current[i + CRLF.len()..]);
                Some(&current[..i])
            }
            None => {
                rest = None;
                Some(current)
            }
        }
    })
}

/// Header field names: visible ASCII, no colon, no whitespace.
fn is_token(name: &str) -> bool {
    !name.is_empty() && name.bytes().all(|b| b.is_ascii_graphic() && b != b':')
}
