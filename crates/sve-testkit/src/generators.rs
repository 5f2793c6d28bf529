//! Proptest generators for property-based testing.

use proptest::prelude::*;

use sve::{Keypair, LineEndingPolicy, Pipeline, PipelineConfig, ProtocolConfig};
use sve_core::HeaderStyle;

/// Generate a random keypair.
pub fn keypair() -> impl Strategy<Value = Keypair> {
    any::<[u8; 32]>().prop_map(|seed| Keypair::from_seed(&seed))
}

/// Generate a line ending.
pub fn line_ending() -> impl Strategy<Value = &'static str> {
    prop_oneof![Just("\n"), Just("\r\n"), Just("\r")]
}

/// Generate message text: printable lines joined by arbitrary line endings,
/// including empty lines and a possibly missing final terminator.
pub fn body() -> impl Strategy<Value = Vec<u8>> {
    prop::collection::vec(("[ -~]{0,40}", line_ending()), 0..12).prop_flat_map(|lines| {
        let text: String = lines
            .iter()
            .map(|(line, ending)| format!("{line}{ending}"))
            .collect();
        (Just(text), "[ -~]{0,10}").prop_map(|(text, tail)| format!("{text}{tail}").into_bytes())
    })
}

/// Generate a line ending policy.
pub fn line_ending_policy() -> impl Strategy<Value = LineEndingPolicy> {
    prop_oneof![Just(LineEndingPolicy::Normalize), Just(LineEndingPolicy::Legacy)]
}

/// Generate a header style.
pub fn header_style() -> impl Strategy<Value = HeaderStyle> {
    prop_oneof![Just(HeaderStyle::Standard), Just(HeaderStyle::XEd25519)]
}

/// Parameters for signing a message.
#[derive(Debug, Clone)]
pub struct SignParams {
    pub keypair: Keypair,
    pub body: Vec<u8>,
    pub protocol: ProtocolConfig,
}

impl SignParams {
    /// Pipeline for these parameters (embedded key).
    pub fn pipeline(&self) -> Pipeline {
        Pipeline::new(PipelineConfig {
            protocol: self.protocol,
            ..PipelineConfig::default()
        })
    }

    /// Sign the body.
    pub fn sign(&self) -> Vec<u8> {
        self.pipeline().sign(&self.keypair, &self.body)
    }
}

impl Arbitrary for SignParams {
    type Parameters = ();
    type Strategy = BoxedStrategy<Self>;

    fn arbitrary_with(_: Self::Parameters) -> Self::Strategy {
        (any::<[u8; 32]>(), body(), line_ending_policy(), header_style())
            .prop_map(|(seed, body, line_endings, header_style)| SignParams {
                keypair: Keypair::from_seed(&seed),
                body,
                protocol: ProtocolConfig {
                    line_endings,
                    header_style,
                },
            })
            .boxed()
    }
}
