//! `.env` file discovery, parsing, and application.
//!
//! Responsibilities:
//! - Locate a `.env` file directly inside the current working directory.
//! - Parse it as `KEY=VALUE` pairs (comments and shell-style quoting per
//!   dotenv convention, delegated to `dotenvy`).
//! - Apply pairs into a [`VarStore`] without overriding names already set.
//!
//! Invariants:
//! - The search never walks parent directories; only `cwd/.env` counts.
//! - A path that exists but is a directory is treated as not found.
//! - `read` performs no mutation at all.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use crate::error::EnvFileError;
use crate::source::VarStore;

const ENV_FILE_NAME: &str = ".env";

/// Resolves `cwd/.env`, requiring it to be a regular file.
fn env_file_path() -> Result<PathBuf, EnvFileError> {
    let dir = std::env::current_dir().map_err(|err| EnvFileError::Io { kind: err.kind() })?;
    let path = dir.join(ENV_FILE_NAME);
    match path.metadata() {
        Ok(meta) if meta.is_file() => Ok(path),
        _ => Err(EnvFileError::NotFound { dir }),
    }
}

fn parse_file(path: &Path) -> Result<Vec<(String, String)>, EnvFileError> {
    let iter = dotenvy::from_path_iter(path).map_err(EnvFileError::from_dotenv)?;
    let mut pairs = Vec::new();
    for item in iter {
        let (key, value) = item.map_err(EnvFileError::from_dotenv)?;
        pairs.push((key, value));
    }
    Ok(pairs)
}

/// Loads `.env` from the current working directory into `store`.
///
/// Names already set in the store keep their existing values, including
/// names set to the empty string (dotenv convention: the environment wins
/// over the file).
///
/// # Errors
///
/// [`EnvFileError::NotFound`] when no `.env` file exists in the current
/// directory, [`EnvFileError::Parse`] on malformed file contents, and
/// [`EnvFileError::Io`] on read failures.
pub fn load(store: &dyn VarStore) -> Result<(), EnvFileError> {
    let path = env_file_path()?;
    let pairs = parse_file(&path)?;
    let mut applied = 0usize;
    for (key, value) in &pairs {
        if store.get(key).is_none() {
            store.set(key, value);
            applied += 1;
        }
    }
    tracing::debug!(
        path = %path.display(),
        applied,
        parsed = pairs.len(),
        "applied .env file"
    );
    Ok(())
}

/// Reads `.env` from the current working directory as a map, mutating
/// nothing.
///
/// # Errors
///
/// Same conditions as [`load`].
pub fn read() -> Result<HashMap<String, String>, EnvFileError> {
    let path = env_file_path()?;
    Ok(parse_file(&path)?.into_iter().collect())
}
