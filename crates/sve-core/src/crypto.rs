//! Cryptographic primitives for sve.
//!
//! Wraps Ed25519 signing with strong types. Every size used by the wire
//! format is taken from `ed25519-dalek` rather than restated here.

use ed25519_dalek::{
    Signature, Signer, SigningKey, Verifier, VerifyingKey, KEYPAIR_LENGTH, PUBLIC_KEY_LENGTH,
    SECRET_KEY_LENGTH, SIGNATURE_LENGTH,
};
use std::fmt;

use crate::error::EncodingError;

/// Number of hex characters in an encoded signature.
pub const SIGNATURE_HEX_LENGTH: usize = SIGNATURE_LENGTH * 2;

/// Hex offset at which the signature header value is folded.
///
/// Half of the encoded signature, i.e. one hex character per signature byte.
pub const SIGNATURE_FOLD_OFFSET: usize = SIGNATURE_HEX_LENGTH / 2;

/// Decode hex into exactly `N` bytes.
fn decode_fixed<const N: usize>(s: &str, what: &'static str) -> Result<[u8; N], EncodingError> {
    let bytes = hex::decode(s).map_err(|source| EncodingError::Hex { what, source })?;
    bytes
        .as_slice()
        .try_into()
        .map_err(|_| EncodingError::InvalidLength {
            what,
            expected: N,
            actual: bytes.len(),
        })
}

/// A 32-byte Ed25519 public key.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Ed25519PublicKey(pub [u8; PUBLIC_KEY_LENGTH]);

impl Ed25519PublicKey {
    /// Create from raw bytes.
    pub const fn from_bytes(bytes: [u8; PUBLIC_KEY_LENGTH]) -> Self {
        Self(bytes)
    }

    /// Get the raw bytes.
    pub const fn as_bytes(&self) -> &[u8; PUBLIC_KEY_LENGTH] {
        &self.0
    }

    /// Convert to lowercase hex.
    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }

    /// Parse from hex string.
    pub fn from_hex(s: &str) -> Result<Self, EncodingError> {
        decode_fixed(s, "public key").map(Self)
    }

    /// Verify a signature over a message.
    ///
    /// A key that is not a curve point cannot be used at all and is reported
    /// as an error. A signature that simply does not match yields `Ok(false)`.
    pub fn verify(&self, message: &[u8], signature: &Ed25519Signature) -> Result<bool, EncodingError> {
        let verifying_key =
            VerifyingKey::from_bytes(&self.0).map_err(|_| EncodingError::InvalidPublicKey)?;
        let sig = Signature::from_bytes(&signature.0);
        Ok(verifying_key.verify(message, &sig).is_ok())
    }
}

impl fmt::Debug for Ed25519PublicKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Ed25519Pub({}...)", &self.to_hex()[..16])
    }
}

impl fmt::Display for Ed25519PublicKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl AsRef<[u8]> for Ed25519PublicKey {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl From<[u8; PUBLIC_KEY_LENGTH]> for Ed25519PublicKey {
    fn from(bytes: [u8; PUBLIC_KEY_LENGTH]) -> Self {
        Self(bytes)
    }
}

/// A 64-byte Ed25519 signature.
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct Ed25519Signature(pub [u8; SIGNATURE_LENGTH]);

impl Ed25519Signature {
    /// Create from raw bytes.
    pub const fn from_bytes(bytes: [u8; SIGNATURE_LENGTH]) -> Self {
        Self(bytes)
    }

    /// Get the raw bytes.
    pub const fn as_bytes(&self) -> &[u8; SIGNATURE_LENGTH] {
        &self.0
    }

    /// Convert to lowercase hex.
    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }

    /// Parse from hex string.
    pub fn from_hex(s: &str) -> Result<Self, EncodingError> {
        decode_fixed(s, "signature").map(Self)
    }
}

impl fmt::Debug for Ed25519Signature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Ed25519Sig({}...)", &self.to_hex()[..16])
    }
}

impl AsRef<[u8]> for Ed25519Signature {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl From<[u8; SIGNATURE_LENGTH]> for Ed25519Signature {
    fn from(bytes: [u8; SIGNATURE_LENGTH]) -> Self {
        Self(bytes)
    }
}

/// A keypair for signing messages.
///
/// This wraps ed25519-dalek's SigningKey. The serialized private key is the
/// 64-byte `seed || public key` layout, so the public key is always its
/// trailing segment.
#[derive(Clone)]
pub struct Keypair {
    signing_key: SigningKey,
}

impl Keypair {
    /// Generate a new random keypair.
    pub fn generate() -> Self {
        let mut rng = rand::thread_rng();
        let signing_key = SigningKey::generate(&mut rng);
        Self { signing_key }
    }

    /// Create from a 32-byte seed.
    pub fn from_seed(seed: &[u8; SECRET_KEY_LENGTH]) -> Self {
        let signing_key = SigningKey::from_bytes(seed);
        Self { signing_key }
    }

    /// Create from the 64-byte `seed || public key` encoding.
    ///
    /// Fails if the trailing public key is not the one derived from the seed.
    pub fn from_keypair_bytes(bytes: &[u8; KEYPAIR_LENGTH]) -> Result<Self, EncodingError> {
        let signing_key =
            SigningKey::from_keypair_bytes(bytes).map_err(|_| EncodingError::KeyMismatch)?;
        Ok(Self { signing_key })
    }

    /// Parse a hex private key: either the full keypair encoding or a bare seed.
    pub fn from_hex(s: &str) -> Result<Self, EncodingError> {
        let bytes = hex::decode(s).map_err(|source| EncodingError::Hex {
            what: "private key",
            source,
        })?;
        match bytes.len() {
            KEYPAIR_LENGTH => {
                let mut arr = [0u8; KEYPAIR_LENGTH];
                arr.copy_from_slice(&bytes);
                Self::from_keypair_bytes(&arr)
            }
            SECRET_KEY_LENGTH => {
                let mut seed = [0u8; SECRET_KEY_LENGTH];
                seed.copy_from_slice(&bytes);
                Ok(Self::from_seed(&seed))
            }
            actual => Err(EncodingError::InvalidLength {
                what: "private key",
                expected: KEYPAIR_LENGTH,
                actual,
            }),
        }
    }

    /// Get the public key.
    pub fn public_key(&self) -> Ed25519PublicKey {
        Ed25519PublicKey(self.signing_key.verifying_key().to_bytes())
    }

    /// Sign a message.
    pub fn sign(&self, message: &[u8]) -> Ed25519Signature {
        let sig = self.signing_key.sign(message);
        Ed25519Signature(sig.to_bytes())
    }

    /// Get the raw seed bytes (secret key material).
    pub fn seed(&self) -> [u8; SECRET_KEY_LENGTH] {
        self.signing_key.to_bytes()
    }

    /// Hex of the 64-byte `seed || public key` encoding.
    pub fn to_private_hex(&self) -> String {
        hex::encode(self.signing_key.to_keypair_bytes())
    }
}

impl fmt::Debug for Keypair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Keypair({:?})", self.public_key())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keypair_sign_verify() {
        let keypair = Keypair::generate();
        let message = b"hello world";
        let signature = keypair.sign(message);

        assert!(keypair.public_key().verify(message, &signature).unwrap());

        // Tampered message is a negative result, not an error
        let tampered = b"hello worlD";
        assert!(!keypair.public_key().verify(tampered, &signature).unwrap());
    }

    #[test]
    fn test_keypair_deterministic_from_seed() {
        let seed = [0x42u8; 32];
        let kp1 = Keypair::from_seed(&seed);
        let kp2 = Keypair::from_seed(&seed);
        assert_eq!(kp1.public_key(), kp2.public_key());
        assert_eq!(
            kp1.public_key().to_hex(),
            "2152f8d19b791d24453242e15f2eab6cb7cffa7b6a5ed30097960e069881db12"
        );
    }

    #[test]
    fn test_public_key_is_private_key_suffix() {
        let keypair = Keypair::from_seed(&[0x07; 32]);
        let private_hex = keypair.to_private_hex();
        assert_eq!(private_hex.len(), KEYPAIR_LENGTH * 2);
        assert_eq!(&private_hex[SECRET_KEY_LENGTH * 2..], keypair.public_key().to_hex());
    }

    #[test]
    fn test_private_hex_roundtrip() {
        let keypair = Keypair::generate();
        let recovered = Keypair::from_hex(&keypair.to_private_hex()).unwrap();
        assert_eq!(keypair.public_key(), recovered.public_key());

        let from_seed = Keypair::from_hex(&hex::encode(keypair.seed())).unwrap();
        assert_eq!(keypair.public_key(), from_seed.public_key());
    }

    #[test]
    fn test_private_key_with_foreign_suffix_rejected() {
        let a = Keypair::from_seed(&[0x01; 32]);
        let b = Keypair::from_seed(&[0x02; 32]);
        let forged = format!("{}{}", hex::encode(a.seed()), b.public_key().to_hex());
        assert!(matches!(
            Keypair::from_hex(&forged),
            Err(EncodingError::KeyMismatch)
        ));
    }

    #[test]
    fn test_private_key_bad_length() {
        assert!(matches!(
            Keypair::from_hex("abcd"),
            Err(EncodingError::InvalidLength { actual: 2, .. })
        ));
        assert!(matches!(
            Keypair::from_hex("zz"),
            Err(EncodingError::Hex { .. })
        ));
    }

    #[test]
    fn test_public_key_hex_roundtrip() {
        let keypair = Keypair::generate();
        let pk = keypair.public_key();
        let recovered = Ed25519PublicKey::from_hex(&pk.to_hex()).unwrap();
        assert_eq!(pk, recovered);
    }

    #[test]
    fn test_signature_hex_length_checked() {
        let short = "ab".repeat(SIGNATURE_LENGTH - 1);
        assert!(matches!(
            Ed25519Signature::from_hex(&short),
            Err(EncodingError::InvalidLength { expected: 64, actual: 63, .. })
        ));
    }

    #[test]
    fn test_fold_offset_matches_signature_size() {
        assert_eq!(SIGNATURE_HEX_LENGTH, 128);
        assert_eq!(SIGNATURE_FOLD_OFFSET, 64);
    }
}
