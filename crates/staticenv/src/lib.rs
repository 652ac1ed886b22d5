//! Typed access to environment variables with `.env` file loading.
//!
//! The [`Env`] accessor looks up a prioritized list of variable names
//! (optionally namespaced with a prefix) and converts the first non-empty
//! value to the requested type, falling back to a caller-supplied default
//! on absence or parse failure. Getters never fail; only `.env` file
//! loading surfaces errors.
//!
//! Variable lookup goes through the [`VarStore`] trait so tests can swap
//! the process environment for an in-memory store.

mod accessor;
mod duration;
mod envfile;
mod error;
mod source;

pub use accessor::Env;
pub use duration::{DurationParseError, parse_duration};
pub use envfile::{load, read};
pub use error::EnvFileError;
pub use source::{MemoryStore, ProcessEnv, VarStore};
