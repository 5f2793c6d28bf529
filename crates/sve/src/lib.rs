//! # sve
//!
//! Sign a text message so that it carries its own Ed25519 signature and
//! public key, and verify such messages without any key exchange.
//!
//! ## Overview
//!
//! - **Sign**: normalize line endings, add a `Public-Key` header, sign the
//!   canonical payload, add a folded `Signature` header in front.
//! - **Verify**: split headers from body, rebuild the canonical payload, and
//!   check the signature against the embedded (or a pinned) public key.
//!
//! ## Usage
//!
//! ```rust
//! use sve::{Keypair, Pipeline};
//!
//! let keypair = Keypair::generate();
//! let pipeline = Pipeline::default();
//!
//! let signed = pipeline.sign(&keypair, b"hello\n");
//! let verification = pipeline.verify(&signed).unwrap();
//! assert!(verification.is_valid());
//! ```
//!
//! ## Re-exports
//!
//! - `sve::core` - Canonicalization, header codec, Ed25519 wrappers

pub mod error;
pub mod keyfile;
pub mod pipeline;

pub use sve_core as core;

pub use error::{ErrorCategory, Result, SveError};
pub use keyfile::{read_keypair, read_public_key, write_keypair, KeyFiles};
pub use pipeline::{
    read_message, read_piped_message, KeySource, Pipeline, PipelineConfig, Verification,
};

pub use sve_core::{
    Ed25519PublicKey, Ed25519Signature, HeaderStyle, Keypair, LineEndingPolicy, ProtocolConfig,
};
