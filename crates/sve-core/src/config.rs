//! Protocol configuration.
//!
//! The two knobs that change signed bytes: how line endings are canonicalized
//! and which header names carry the key and signature. Both sides of an
//! exchange must agree on them.

use serde::{Deserialize, Serialize};
use std::fmt;

/// How raw input line endings are turned into CRLF.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum LineEndingPolicy {
    /// Rewrite CRLF, CR and LF terminators to CRLF. Idempotent.
    #[default]
    Normalize,
    /// Leave input untouched if it already contains any CRLF, otherwise
    /// normalize. Kept for messages produced by older signers.
    Legacy,
}

impl fmt::Display for LineEndingPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            LineEndingPolicy::Normalize => "normalize",
            LineEndingPolicy::Legacy => "legacy",
        })
    }
}

/// Header names carrying the public key and the signature.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HeaderNames {
    pub public_key: &'static str,
    pub signature: &'static str,
}

impl HeaderNames {
    /// `Public-Key` / `Signature`.
    pub const STANDARD: Self = Self {
        public_key: "Public-Key",
        signature: "Signature",
    };

    /// `X-Ed25519-Pub` / `X-Ed25519-Sig`, as written by the first sve releases.
    pub const X_ED25519: Self = Self {
        public_key: "X-Ed25519-Pub",
        signature: "X-Ed25519-Sig",
    };
}

impl Default for HeaderNames {
    fn default() -> Self {
        Self::STANDARD
    }
}

/// Selects a [`HeaderNames`] set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum HeaderStyle {
    #[default]
    Standard,
    XEd25519,
}

impl HeaderStyle {
    pub const fn names(self) -> HeaderNames {
        match self {
            HeaderStyle::Standard => HeaderNames::STANDARD,
            HeaderStyle::XEd25519 => HeaderNames::X_ED25519,
        }
    }
}

/// Configuration shared by signer and verifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ProtocolConfig {
    /// Line ending canonicalization.
    pub line_endings: LineEndingPolicy,
    /// Header naming.
    pub header_style: HeaderStyle,
}

impl ProtocolConfig {
    /// Header names for this configuration.
    pub const fn headers(&self) -> HeaderNames {
        self.header_style.names()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_standard_normalize() {
        let config = ProtocolConfig::default();
        assert_eq!(config.line_endings, LineEndingPolicy::Normalize);
        assert_eq!(config.headers(), HeaderNames::STANDARD);
        assert_eq!(config.headers().public_key, "Public-Key");
        assert_eq!(config.headers().signature, "Signature");
    }

    #[test]
    fn test_policy_display() {
        assert_eq!(LineEndingPolicy::Legacy.to_string(), "legacy");
        assert_eq!(LineEndingPolicy::Normalize.to_string(), "normalize");
    }

    #[test]
    fn test_x_ed25519_names() {
        let names = HeaderStyle::XEd25519.names();
        assert_eq!(names.public_key, "X-Ed25519-Pub");
        assert_eq!(names.signature, "X-Ed25519-Sig");
    }

    #[test]
    fn test_config_serde() {
        let config = ProtocolConfig {
            line_endings: LineEndingPolicy::Legacy,
            header_style: HeaderStyle::XEd25519,
        };
        let json = serde_json::to_string(&config).unwrap();
        assert_eq!(json, r#"{"line_endings":"legacy","header_style":"x-ed25519"}"#);
        let back: ProtocolConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(back, config);
    }
}
