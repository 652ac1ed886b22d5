//! Error types for `.env` file loading.
//!
//! Getter-level failures never materialize as errors; the file loader is
//! the only surface that propagates failures to the caller.
//!
//! Invariants:
//! - Errors never include raw `.env` line contents, which routinely hold
//!   secrets; parse failures carry only a byte position.

use std::io::ErrorKind;
use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while discovering, reading, or parsing a `.env`
/// file.
#[derive(Debug, Error)]
pub enum EnvFileError {
    /// No regular file named `.env` exists in the searched directory.
    #[error("could not open .env file in current directory: {}", dir.display())]
    NotFound { dir: PathBuf },

    /// The file exists but a line is not valid dotenv syntax.
    #[error("failed to parse .env file at position {index}")]
    Parse { index: usize },

    /// The file exists but could not be read.
    #[error("failed to read .env file: {kind}")]
    Io { kind: ErrorKind },

    /// Unrecognized failure from the dotenv parser (future variants of the
    /// dotenvy crate).
    #[error("failed to load .env file")]
    Unknown,
}

impl EnvFileError {
    pub(crate) fn from_dotenv(err: dotenvy::Error) -> Self {
        match err {
            dotenvy::Error::LineParse(_, index) => EnvFileError::Parse { index },
            dotenvy::Error::Io(io_err) => EnvFileError::Io {
                kind: io_err.kind(),
            },
            _ => EnvFileError::Unknown,
        }
    }
}
