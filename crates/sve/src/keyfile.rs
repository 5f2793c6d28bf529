//! Hex key files.
//!
//! `privkey` holds the 64-byte `seed || public key` encoding, `pubkey` holds
//! the 32-byte public key. Both are lowercase hex with no trailing newline;
//! surrounding whitespace is ignored when reading.

use std::fs::{self, File, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use sve_core::{Ed25519PublicKey, Keypair};
use tracing::{debug, info};

use crate::error::{Result, SveError};

/// Default public key file name.
pub const PUBLIC_KEY_FILE: &str = "pubkey";

/// Default private key file name.
pub const PRIVATE_KEY_FILE: &str = "privkey";

/// Paths of a written key pair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyFiles {
    pub public: PathBuf,
    pub private: PathBuf,
}

impl KeyFiles {
    /// The default file names inside `dir`.
    pub fn in_dir(dir: &Path) -> Self {
        Self {
            public: dir.join(PUBLIC_KEY_FILE),
            private: dir.join(PRIVATE_KEY_FILE),
        }
    }
}

fn read_hex(path: &Path) -> Result<String> {
    let contents = fs::read_to_string(path).map_err(|source| SveError::ReadKey {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(contents.trim().to_string())
}

/// Read a private key file into a keypair.
pub fn read_keypair(path: &Path) -> Result<Keypair> {
    let hex = read_hex(path)?;
    let keypair = Keypair::from_hex(&hex).map_err(|source| SveError::KeyEncoding {
        path: path.to_path_buf(),
        source,
    })?;
    debug!(path = %path.display(), public_key = %keypair.public_key(), "loaded private key");
    Ok(keypair)
}

/// Read a public key file.
pub fn read_public_key(path: &Path) -> Result<Ed25519PublicKey> {
    let hex = read_hex(path)?;
    let key = Ed25519PublicKey::from_hex(&hex).map_err(|source| SveError::KeyEncoding {
        path: path.to_path_buf(),
        source,
    })?;
    debug!(path = %path.display(), public_key = %key, "loaded public key");
    Ok(key)
}

/// Write `keypair` to `files`.
///
/// Unless `overwrite` is set, fails without touching anything if either file
/// already exists. The private key is only readable by its owner on Unix.
pub fn write_keypair(files: &KeyFiles, keypair: &Keypair, overwrite: bool) -> Result<()> {
    if !overwrite {
        for path in [&files.public, &files.private] {
            if path.exists() {
                return Err(SveError::KeyFileExists { path: path.clone() });
            }
        }
    }

    write_file(&files.public, keypair.public_key().to_hex().as_bytes(), 0o644, overwrite)?;
    write_file(&files.private, keypair.to_private_hex().as_bytes(), 0o600, overwrite)?;

    info!(
        public = %files.public.display(),
        private = %files.private.display(),
        "wrote key pair"
    );
    Ok(())
}

fn write_file(path: &Path, contents: &[u8], mode: u32, overwrite: bool) -> Result<()> {
    let map_err = |source: io::Error| {
        if source.kind() == io::ErrorKind::AlreadyExists {
            SveError::KeyFileExists {
                path: path.to_path_buf(),
            }
        } else {
            SveError::WriteKey {
                path: path.to_path_buf(),
                source,
            }
        }
    };

    let mut file = open_for_write(path, mode, overwrite).map_err(map_err)?;
    file.write_all(contents).map_err(map_err)?;
    file.sync_all().map_err(map_err)
}

#[cfg(unix)]
fn open_for_write(path: &Path, mode: u32, overwrite: bool) -> io::Result<File> {
    use std::os::unix::fs::{OpenOptionsExt, PermissionsExt};

    let file = OpenOptions::new()
        .write(true)
        .create(overwrite)
        .create_new(!overwrite)
        .truncate(overwrite)
        .mode(mode)
        .open(path)?;
    // `mode` only applies to newly created files.
    file.set_permissions(fs::Permissions::from_mode(mode))?;
    Ok(file)
}

#[cfg(not(unix))]
fn open_for_write(path: &Path, _mode: u32, overwrite: bool) -> io::Result<File> {
    OpenOptions::new()
        .write(true)
        .create(overwrite)
        .create_new(!overwrite)
        .truncate(overwrite)
        .open(path)
}
