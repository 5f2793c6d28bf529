//! Error types for sve core.

use thiserror::Error;

/// The input is not a message this protocol could have produced.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FormatError {
    #[error("empty input")]
    EmptyInput,

    #[error("missing blank line between headers and body")]
    MissingSeparator,

    #[error("missing {0} header")]
    MissingHeader(String),

    #[error("empty {0} header")]
    EmptyHeader(String),

    #[error("header line {line} is not valid UTF-8")]
    NonUtf8Header { line: usize },
}

/// Key or signature material that could not be decoded.
#[derive(Debug, Error)]
pub enum EncodingError {
    #[error("failed to decode {what} hex: {source}")]
    Hex {
        what: &'static str,
        #[source]
        source: hex::FromHexError,
    },

    #[error("invalid {what} length: expected {expected} bytes, got {actual}")]
    InvalidLength {
        what: &'static str,
        expected: usize,
        actual: usize,
    },

    #[error("public key is not a valid Ed25519 point")]
    InvalidPublicKey,

    #[error("private key does not match its embedded public key")]
    KeyMismatch,
}

/// Core errors that can occur while preparing or checking a message.
#[derive(Debug, Error)]
pub enum CoreError {
    #[error("format error: {0}")]
    Format(#[from] FormatError),

    #[error("encoding error: {0}")]
    Encoding(#[from] EncodingError),
}

/// Result type for core operations.
pub type Result<T> = std::result::Result<T, CoreError>;
