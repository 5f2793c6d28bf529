//! Command-line behaviour: output, exit codes, key files.

use std::io::Write;
use std::path::Path;
use std::process::{Command, Output, Stdio};

fn sve(dir: &Path, args: &[&str], stdin: &[u8]) -> Output {
    let mut child = Command::new(env!("CARGO_BIN_EXE_sve"))
        .args(args)
        .current_dir(dir)
        .env_remove("SVE_LINE_ENDINGS")
        .env_remove("SVE_HEADER_STYLE")
        .env_remove("RUST_LOG")
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .expect("spawn sve");
    child
        .stdin
        .take()
        .expect("stdin")
        .write_all(stdin)
        .expect("write stdin");
    child.wait_with_output().expect("wait for sve")
}

#[test]
fn test_gen_key_sign_verify() {
    let dir = tempfile::tempdir().unwrap();

    let out = sve(dir.path(), &["gk"], b"");
    assert!(out.status.success(), "{}", String::from_utf8_lossy(&out.stderr));
    assert!(dir.path().join("pubkey").exists());
    assert!(dir.path().join("privkey").exists());

    let signed = sve(dir.path(), &["s", "privkey"], b"hello\n");
    assert!(signed.status.success());
    assert!(signed.stdout.starts_with(b"Signature: "));

    let verified = sve(dir.path(), &["v"], &signed.stdout);
    assert_eq!(verified.status.code(), Some(0));
    assert_eq!(String::from_utf8_lossy(&verified.stdout), "Signature is valid.\n");

    let pinned = sve(dir.path(), &["verify", "--pubkey", "pubkey"], &signed.stdout);
    assert_eq!(String::from_utf8_lossy(&pinned.stdout), "Signature is valid.\n");
}

#[test]
fn test_gen_key_refuses_overwrite() {
    let dir = tempfile::tempdir().unwrap();
    assert!(sve(dir.path(), &["gen-key"], b"").status.success());

    let again = sve(dir.path(), &["gen-key"], b"");
    assert_eq!(again.status.code(), Some(2));

    assert!(sve(dir.path(), &["gen-key", "--force"], b"").status.success());
}

#[test]
fn test_invalid_signature_exit_codes() {
    let dir = tempfile::tempdir().unwrap();
    sve(dir.path(), &["gk"], b"");
    let mut signed = sve(dir.path(), &["s", "privkey"], b"hello\n").stdout;
    signed.push(b'!');

    let lenient = sve(dir.path(), &["v"], &signed);
    assert_eq!(lenient.status.code(), Some(0));
    assert_eq!(String::from_utf8_lossy(&lenient.stdout), "Signature is not valid.\n");

    let strict = sve(dir.path(), &["v", "--strict"], &signed);
    assert_eq!(strict.status.code(), Some(1));
}

#[test]
fn test_malformed_input_exit_codes() {
    let dir = tempfile::tempdir().unwrap();

    // Format: no blank line
    let out = sve(dir.path(), &["v"], b"Public-Key: aa\r\nSignature: bb\r\n");
    assert_eq!(out.status.code(), Some(4));
    assert!(out.stdout.is_empty());

    // Encoding: public key is not hex
    let out = sve(dir.path(), &["v"], b"Signature: aa\r\nPublic-Key: zz\r\n\r\nbody");
    assert_eq!(out.status.code(), Some(3));

    // I/O: private key file missing
    let out = sve(dir.path(), &["s", "missing"], b"hello\n");
    assert_eq!(out.status.code(), Some(2));
    assert!(out.stdout.is_empty());
}

#[test]
fn test_legacy_header_style_flag() {
    let dir = tempfile::tempdir().unwrap();
    sve(dir.path(), &["gk"], b"");

    let signed = sve(dir.path(), &["--header-style", "x-ed25519", "s", "privkey"], b"hi\n");
    assert!(signed.stdout.starts_with(b"X-Ed25519-Sig: "));

    let ok = sve(dir.path(), &["--header-style", "x-ed25519", "v"], &signed.stdout);
    assert_eq!(String::from_utf8_lossy(&ok.stdout), "Signature is valid.\n");

    // Standard names find no header in this message
    let missing = sve(dir.path(), &["v"], &signed.stdout);
    assert_eq!(missing.status.code(), Some(4));
}

#[cfg(target_os = "linux")]
#[test]
fn test_unwritable_stdout_is_io_error() {
    let dir = tempfile::tempdir().unwrap();
    sve(dir.path(), &["gk"], b"");

    let mut child = Command::new(env!("CARGO_BIN_EXE_sve"))
        .args(["s", "privkey"])
        .current_dir(dir.path())
        .stdin(Stdio::piped())
        .stdout(std::fs::File::create("/dev/full").unwrap())
        .stderr(Stdio::piped())
        .spawn()
        .unwrap();
    child.stdin.take().unwrap().write_all(b"hello\n").unwrap();
    let out = child.wait_with_output().unwrap();

    assert_eq!(out.status.code(), Some(2));
    assert!(String::from_utf8_lossy(&out.stderr).contains("failed to write output"));
}
