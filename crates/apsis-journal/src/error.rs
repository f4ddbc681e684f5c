//! Error types for the journal system.

use std::fmt;
use std::io;

/// Errors that can occur during journal recording or playback.
#[derive(Debug)]
pub enum JournalError {
    /// An I/O error occurred during read or write.
    Io(io::Error),
    /// The journal does not start with the expected `b"APSJ"` magic bytes.
    InvalidMagic,
    /// The format version is not supported by this build.
    UnsupportedVersion {
        /// The version found in the journal header.
        found: u8,
    },
    /// A byte that is not a hexadecimal digit appeared in encoded text.
    InvalidHexDigit {
        /// The offending byte.
        digit: u8,
    },
    /// A record could not be decoded (truncated or corrupt data).
    MalformedRecord {
        /// Human-readable description of what went wrong.
        detail: String,
    },
}

impl fmt::Display for JournalError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(e) => write!(f, "I/O error: {e}"),
            Self::InvalidMagic => write!(f, "invalid magic bytes (expected b\"APSJ\")"),
            Self::UnsupportedVersion { found } => {
                write!(f, "unsupported format version {found}")
            }
            Self::InvalidHexDigit { digit } => {
                write!(f, "invalid hexadecimal digit {digit:#04x}")
            }
            Self::MalformedRecord { detail } => write!(f, "malformed record: {detail}"),
        }
    }
}

impl std::error::Error for JournalError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<io::Error> for JournalError {
    fn from(e: io::Error) -> Self {
        Self::Io(e)
    }
}
