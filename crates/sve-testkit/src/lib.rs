//! # sve testkit
//!
//! Testing utilities for sve.
//!
//! ## Overview
//!
//! This crate provides:
//!
//! - **Golden vectors**: Known seeds and bodies with the exact signed output
//! - **Generators**: Proptest strategies for property-based testing
//! - **Fixtures**: Helper structs and tamper helpers for test scenarios
//!
//! ## Golden Vectors
//!
//! ```rust
//! use sve_testkit::vectors::all_vectors;
//!
//! for vector in all_vectors() {
//!     let signed = vector.pipeline().sign(&vector.keypair(), vector.body);
//!     assert_eq!(signed, vector.expected_message(), "{}", vector.name);
//! }
//! ```
//!
//! ## Property Testing
//!
//! ```rust,ignore
//! use proptest::prelude::*;
//! use sve_testkit::generators::SignParams;
//!
//! proptest! {
//!     #[test]
//!     fn signed_messages_verify(params: SignParams) {
//!         let signed = params.sign();
//!         prop_assert!(params.pipeline().verify(&signed).unwrap().is_valid());
//!     }
//! }
//! ```
//!
//! ## Test Fixtures
//!
//! ```rust
//! use sve_testkit::fixtures::TestFixture;
//!
//! let fixture = TestFixture::new();
//! let signed = fixture.sign(b"hello\n");
//! assert!(fixture.verify(&signed).unwrap().is_valid());
//! ```

pub mod fixtures;
pub mod generators;
pub mod vectors;

pub use fixtures::{flip_byte, header_value_range, TestFixture};
pub use generators::SignParams;
pub use vectors::{all_vectors, verify_all_vectors, GoldenVector};
