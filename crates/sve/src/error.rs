//! Error types for sve.

use std::io;
use std::path::PathBuf;

use sve_core::{CoreError, EncodingError, FormatError};
use thiserror::Error;

/// Errors that stop a sign or verify run before a verdict is reached.
///
/// An invalid signature is not an error; see [`crate::Verification`].
#[derive(Debug, Error)]
pub enum SveError {
    /// Key file could not be read.
    #[error("failed to read {}: {source}", path.display())]
    ReadKey {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Key file could not be written.
    #[error("failed to write {}: {source}", path.display())]
    WriteKey {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Refused to replace an existing key file.
    #[error("key file already exists: {}", path.display())]
    KeyFileExists { path: PathBuf },

    /// Message input could not be read.
    #[error("failed to read message: {0}")]
    Input(#[source] io::Error),

    /// Signed message or verdict could not be written.
    #[error("failed to write output: {0}")]
    Output(#[source] io::Error),

    /// Verification needs a complete message, not interactive entry.
    #[error("no message on standard input; pipe or redirect a signed message")]
    InteractiveInput,

    /// Key file contents could not be decoded.
    #[error("invalid key in {}: {source}", path.display())]
    KeyEncoding {
        path: PathBuf,
        #[source]
        source: EncodingError,
    },

    /// Message preparation or decoding failed.
    #[error(transparent)]
    Core(#[from] CoreError),
}

/// Coarse classification of fatal errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    /// Files or input unreadable/unwritable.
    Io,
    /// Hex or key material undecodable.
    Encoding,
    /// Input was never produced by the signer, or was corrupted.
    Format,
}

impl ErrorCategory {
    /// Process exit code for this category. `1` is left for "signature not
    /// valid" in strict mode.
    pub const fn exit_code(self) -> u8 {
        match self {
            ErrorCategory::Io => 2,
            ErrorCategory::Encoding => 3,
            ErrorCategory::Format => 4,
        }
    }
}

impl SveError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            SveError::ReadKey { .. }
            | SveError::WriteKey { .. }
            | SveError::KeyFileExists { .. }
            | SveError::Input(_)
            | SveError::Output(_)
            | SveError::InteractiveInput => ErrorCategory::Io,
            SveError::KeyEncoding { .. } | SveError::Core(CoreError::Encoding(_)) => {
                ErrorCategory::Encoding
            }
            SveError::Core(CoreError::Format(_)) => ErrorCategory::Format,
        }
    }
}

impl From<FormatError> for SveError {
    fn from(e: FormatError) -> Self {
        SveError::Core(e.into())
    }
}

impl From<EncodingError> for SveError {
    fn from(e: EncodingError) -> Self {
        SveError::Core(e.into())
    }
}

/// Result type for sve operations.
pub type Result<T> = std::result::Result<T, SveError>;
