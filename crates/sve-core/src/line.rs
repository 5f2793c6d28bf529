//! Line ending canonicalization.
//!
//! Signed bytes always use CRLF terminators. The policy decides how raw
//! input gets there; see [`LineEndingPolicy`].

use crate::config::LineEndingPolicy;

pub const CRLF: &[u8] = b"\r\n";

/// Header/body boundary: the CRLF ending the last header plus an empty line.
pub const BLANK_LINE: &[u8] = b"\r\n\r\n";

/// Position of the first occurrence of `needle` in `haystack`.
pub(crate) fn find(haystack: &[u8], needle: &[u8]) -> Option<usize> {
    haystack.windows(needle.len()).position(|w| w == needle)
}

/// Canonicalize line endings according to `policy`.
pub fn canonicalize(input: &[u8], policy: LineEndingPolicy) -> Vec<u8> {
    match policy {
        LineEndingPolicy::Normalize => normalize(input),
        LineEndingPolicy::Legacy if find(input, CRLF).is_some() => input.to_vec(),
        LineEndingPolicy::Legacy => normalize(input),
    }
}

/// Rewrite every CRLF, lone CR, and lone LF to CRLF.
pub fn normalize(input: &[u8]) -> Vec<u8> {
    let mut out = Vec::with_capacity(input.len() + input.len() / 32);
    let mut bytes = input.iter().copied().peekable();
    while let Some(b) = bytes.next() {
        match b {
            b'\r' => {
                bytes.next_if_eq(&b'\n');
                out.extend_from_slice(CRLF);
            }
            b'\n' => out.extend_from_slice(CRLF),
            other => out.push(other),
        }
    }
    out
}

/// Drop empty lines from the end of a CRLF body.
///
/// `"done\r\n\r\n\r\n"` becomes `"done\r\n"`, and a body made only of empty
/// lines becomes empty. The last non-empty line keeps its terminator.
pub fn trim_trailing_blank_lines(mut body: &[u8]) -> &[u8] {
    loop {
        if body == CRLF {
            return &body[..0];
        }
        match body.strip_suffix(CRLF) {
            Some(rest) if rest.ends_with(CRLF) => body = rest,
            _ => return body,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_normalize_mixed() {
        assert_eq!(normalize(b"a\nb\r\nc\rd"), b"a\r\nb\r\nc\r\nd");
        assert_eq!(normalize(b"\r\r\n\n"), b"\r\n\r\n\r\n");
        assert_eq!(normalize(b""), b"");
        assert_eq!(normalize(b"no terminator"), b"no terminator");
    }

    #[test]
    fn test_legacy_keeps_input_with_any_crlf() {
        let mixed = b"one\ntwo\r\nthree\r";
        assert_eq!(canonicalize(mixed, LineEndingPolicy::Legacy), mixed);
        assert_eq!(
            canonicalize(mixed, LineEndingPolicy::Normalize),
            b"one\r\ntwo\r\nthree\r\n"
        );
    }

    #[test]
    fn test_legacy_normalizes_without_crlf() {
        assert_eq!(
            canonicalize(b"one\ntwo\n", LineEndingPolicy::Legacy),
            b"one\r\ntwo\r\n"
        );
    }

    #[test]
    fn test_trim_trailing_blank_lines() {
        assert_eq!(trim_trailing_blank_lines(b"done\r\n\r\n\r\n"), b"done\r\n");
        assert_eq!(trim_trailing_blank_lines(b"done\r\n"), b"done\r\n");
        assert_eq!(trim_trailing_blank_lines(b"done"), b"done");
        assert_eq!(trim_trailing_blank_lines(b"\r\n\r\n"), b"");
        assert_eq!(trim_trailing_blank_lines(b"\r\n"), b"");
        assert_eq!(trim_trailing_blank_lines(b""), b"");
        // Interior blank lines are content
        assert_eq!(trim_trailing_blank_lines(b"a\r\n\r\nb\r\n"), b"a\r\n\r\nb\r\n");
    }

    #[test]
    fn test_find() {
        assert_eq!(find(b"ab\r\n\r\ncd", BLANK_LINE), Some(2));
        assert_eq!(find(b"ab\r\ncd", BLANK_LINE), None);
        assert_eq!(find(b"", CRLF), None);
    }

    proptest! {
        #[test]
        fn test_normalize_idempotent(input in prop::collection::vec(any::<u8>(), 0..256)) {
            let once = normalize(&input);
            let twice = normalize(&once);
            prop_assert_eq!(once, twice);
        }

        #[test]
        fn test_legacy_idempotent(input in prop::collection::vec(any::<u8>(), 0..256)) {
            let once = canonicalize(&input, LineEndingPolicy::Legacy);
            let twice = canonicalize(&once, LineEndingPolicy::Legacy);
            prop_assert_eq!(once, twice);
        }

        #[test]
        fn test_normalize_leaves_no_bare_terminators(input in "[a-z\r\n]{0,64}") {
            let out = normalize(input.as_bytes());
            for (i, b) in out.iter().enumerate() {
                if *b == b'\r' {
                    prop_assert_eq!(out.get(i + 1), Some(&b'\n'));
                }
                if *b == b'\n' {
                    prop_assert!(i > 0 && out[i - 1] == b'\r');
                }
            }
        }

        #[test]
        fn test_trim_idempotent(input in "[a-z\r\n]{0,64}") {
            let body = normalize(input.as_bytes());
            let once = trim_trailing_blank_lines(&body);
            prop_assert_eq!(trim_trailing_blank_lines(once), once);
        }
    }
}
