//! # sve core
//!
//! Pure primitives for sve: line canonicalization, the header codec, and
//! canonical payload construction for self-verifying signed messages.
//!
//! This crate contains no I/O. It is pure computation over message bytes.
//!
//! ## Wire format
//!
//! ```text
//! Signature: <first 64 hex chars>\r\n
//!  <remaining 64 hex chars>\r\n
//! Public-Key: <64 hex chars>\r\n
//! \r\n
//! <body, CRLF line endings>
//! ```
//!
//! ## Key Types
//!
//! - [`Message`] - A header block plus body, built for signing or parsed for verification
//! - [`HeaderBlock`] - Decoded, unfolded headers
//! - [`Keypair`], [`Ed25519PublicKey`], [`Ed25519Signature`] - Ed25519 wrappers
//! - [`ProtocolConfig`] - Line ending policy and header names
//!
//! ## Canonicalization
//!
//! See the [`canonical`] module for the exact signed byte layout.

pub mod canonical;
pub mod config;
pub mod crypto;
pub mod error;
pub mod header;
pub mod line;

pub use canonical::{canonical_payload, Message};
pub use config::{HeaderNames, HeaderStyle, LineEndingPolicy, ProtocolConfig};
pub use crypto::{
    Ed25519PublicKey, Ed25519Signature, Keypair, SIGNATURE_FOLD_OFFSET, SIGNATURE_HEX_LENGTH,
};
pub use error::{CoreError, EncodingError, FormatError, Result};
pub use header::{public_key_header, signature_header, Header, HeaderBlock};
