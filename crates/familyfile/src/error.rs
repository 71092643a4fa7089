//! Error types for family file decoding.
//!
//! Three tiers exist:
//! - [`DecodeError`] aborts the whole decode (unreadable or unrecognizable primary file).
//! - [`CacheError`] aborts one side file; the orchestrator turns it into a [`Diagnostic`].
//! - [`ShortRead`] is the bounds failure of the byte primitives.
//!
//! Everything recoverable ends up as a [`Diagnostic`] in the collector instead of
//! propagating.

use std::fmt;
use std::path::PathBuf;

use thiserror::Error;

/// Error codes grouping failures by how far they propagate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCode {
    /// E001: Primary file unreadable or missing
    Unreadable,
    /// E002: Primary file shorter than the minimum header
    TooShort,
    /// E003: Invalid magic/version
    InvalidMagicOrVersion,
    /// E004: Side file rejected (skipped, decode continues)
    SideFileRejected,
}

impl ErrorCode {
    /// Returns the error code string (e.g., "E001").
    pub fn code(&self) -> &'static str {
        match self {
            ErrorCode::Unreadable => "E001",
            ErrorCode::TooShort => "E002",
            ErrorCode::InvalidMagicOrVersion => "E003",
            ErrorCode::SideFileRejected => "E004",
        }
    }
}

/// Fatal error returned from the top-level decode call.
#[derive(Debug, Error)]
pub enum DecodeError {
    // === E001: Unreadable ===
    #[error("[E001] reading {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    // === E002: Too short ===
    #[error("[E002] family data too short: {len} bytes (minimum {min})")]
    TooShort { len: usize, min: usize },

    // === E003: Invalid magic/version ===
    #[error("[E003] invalid family data magic: expected {expected:?}, found {found:?}")]
    InvalidMagic {
        expected: &'static str,
        found: String,
    },

    #[error("[E003] unsupported format version: {version}")]
    UnsupportedVersion { version: String },
}

impl DecodeError {
    /// Returns the error code for this error.
    pub fn code(&self) -> ErrorCode {
        match self {
            DecodeError::Io { .. } => ErrorCode::Unreadable,
            DecodeError::TooShort { .. } => ErrorCode::TooShort,
            DecodeError::InvalidMagic { .. } | DecodeError::UnsupportedVersion { .. } => {
                ErrorCode::InvalidMagicOrVersion
            }
        }
    }
}

/// Error that rejects a single side-cache file.
#[derive(Debug, Error)]
pub enum CacheError {
    #[error("unexpected magic: expected {expected:?}, found {found:?}")]
    BadMagic {
        expected: &'static str,
        found: String,
    },

    #[error("reading {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl CacheError {
    /// Returns the error code for this error.
    pub fn code(&self) -> ErrorCode {
        ErrorCode::SideFileRejected
    }
}

/// Bounds failure of a fixed-width or length-prefixed read.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("short read: need {width} bytes at offset {offset}, have {len}")]
pub struct ShortRead {
    pub offset: usize,
    pub width: usize,
    pub len: usize,
}

/// A non-fatal problem found while decoding one record or one side file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    /// Source file tag within the bundle (e.g. "familydata", "places.cache").
    pub file: String,
    /// Byte offset of the offending record or field, when known.
    pub offset: Option<usize>,
    pub message: String,
    /// Rendered underlying error, when there was one.
    pub cause: Option<String>,
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if !self.file.is_empty() {
            f.write_str(&self.file)?;
            if let Some(offset) = self.offset {
                write!(f, "@0x{offset:X}")?;
            }
            f.write_str(": ")?;
        }
        f.write_str(&self.message)?;
        if let Some(cause) = &self.cause {
            write!(f, ": {cause}")?;
        }
        Ok(())
    }
}
