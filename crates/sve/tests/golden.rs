//! Golden test vectors for cross-implementation verification.
//!
//! Every implementation must produce, for each vector, identical:
//! - public key header value
//! - canonical payload
//! - signature (deterministic Ed25519)
//! - decorated message bytes

use sve::Pipeline;
use sve_testkit::vectors::{all_vectors, computed_payload, verify_all_vectors};

#[test]
fn test_golden_messages_match() {
    for (name, matches, produced) in verify_all_vectors() {
        assert!(
            matches,
            "vector '{name}' produced {:?}",
            String::from_utf8_lossy(&produced)
        );
    }
}

#[test]
fn test_golden_payloads_match() {
    for vector in all_vectors() {
        assert_eq!(
            computed_payload(&vector),
            vector.expected_payload(),
            "vector '{}'",
            vector.name
        );
    }
}

#[test]
fn test_golden_public_keys_match() {
    for vector in all_vectors() {
        assert_eq!(
            vector.keypair().public_key().to_hex(),
            vector.expected_public_key,
            "vector '{}'",
            vector.name
        );
    }
}

#[test]
fn test_golden_messages_verify() {
    for vector in all_vectors() {
        let verification = vector.pipeline().verify(&vector.expected_message()).unwrap();
        assert!(verification.is_valid(), "vector '{}'", vector.name);
    }
}

#[test]
fn test_hello_scenario() {
    let vector = &all_vectors()[0];
    assert_eq!(vector.body, b"hello\n");

    let pipeline = Pipeline::default();
    let signed = pipeline.sign(&vector.keypair(), b"hello\n");
    let text = String::from_utf8(signed.clone()).unwrap();
    assert!(text.contains(&format!("\r\nPublic-Key: {}\r\n\r\n", vector.expected_public_key)));
    assert!(pipeline.verify(&signed).unwrap().is_valid());

    let mut tampered = signed;
    tampered.push(b'x');
    assert!(!pipeline.verify(&tampered).unwrap().is_valid());
}

#[test]
fn test_verify_accepts_x_ed25519_vector() {
    use sve::{HeaderStyle, PipelineConfig, ProtocolConfig};

    // Same payload, older header names: signature is unchanged
    let vector = &all_vectors()[0];
    let (head, tail) = vector.expected_signature.split_at(64);
    let message = format!(
        "X-Ed25519-Sig: {head}\r\n {tail}\r\nX-Ed25519-Pub: {}\r\n\r\nhello\r\n",
        vector.expected_public_key
    );
    let pipeline = Pipeline::new(PipelineConfig {
        protocol: ProtocolConfig {
            header_style: HeaderStyle::XEd25519,
            ..ProtocolConfig::default()
        },
        ..PipelineConfig::default()
    });
    assert!(pipeline.verify(message.as_bytes()).unwrap().is_valid());
}
