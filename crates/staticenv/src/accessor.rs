//! The environment accessor and its typed getters.
//!
//! Responsibilities:
//! - Resolve a prioritized list of candidate variable names, applying the
//!   optional prefix, and select the first non-empty value.
//! - Convert the selected value to the requested type, degrading to the
//!   caller-supplied default on absence or parse failure.
//!
//! Does NOT handle:
//! - `.env` file discovery and parsing (see envfile.rs).
//!
//! Invariants:
//! - Getters never fail; every error condition yields the default.
//! - A set-but-empty variable is treated as absent.
//! - Values are not trimmed; whitespace is significant.

use std::collections::HashMap;

use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, TimeDelta, Utc};

use crate::duration::parse_duration;
use crate::envfile;
use crate::error::EnvFileError;
use crate::source::{ProcessEnv, VarStore};

/// Reads typed configuration values from a [`VarStore`], consulting an
/// ordered list of candidate names with an optional namespace prefix.
///
/// ```no_run
/// use staticenv::Env;
///
/// let env = Env::with_prefix("MYAPP");
/// // Looks up MYAPP_PORT, then MYAPP_HTTP_PORT.
/// let port = env.get_int(8080, &["PORT", "HTTP_PORT"]);
/// ```
pub struct Env {
    prefix: String,
    store: Box<dyn VarStore>,
}

impl Default for Env {
    fn default() -> Self {
        Self::new()
    }
}

impl Env {
    /// Creates an accessor over the process environment with no prefix.
    pub fn new() -> Self {
        Self::with_store(ProcessEnv)
    }

    /// Creates an accessor over the process environment with the given prefix.
    pub fn with_prefix(prefix: impl Into<String>) -> Self {
        let mut env = Self::new();
        env.prefix = prefix.into();
        env
    }

    /// Creates an accessor over an arbitrary [`VarStore`].
    ///
    /// Primarily a test seam; production callers normally use [`Env::new`].
    pub fn with_store(store: impl VarStore + 'static) -> Self {
        Self {
            prefix: String::new(),
            store: Box::new(store),
        }
    }

    /// The current prefix; empty when unset.
    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    /// Replaces the prefix. Any string, including empty, is accepted.
    pub fn set_prefix(&mut self, prefix: impl Into<String>) {
        self.prefix = prefix.into();
    }

    /// Loads `.env` from the current working directory into this accessor's
    /// store. Values already present in the store are preserved.
    pub fn load(&self) -> Result<(), EnvFileError> {
        envfile::load(self.store.as_ref())
    }

    /// Reads `.env` from the current working directory as a map, without
    /// mutating any store.
    pub fn read(&self) -> Result<HashMap<String, String>, EnvFileError> {
        envfile::read()
    }

    /// Returns the first candidate whose resolved value is non-empty.
    fn resolve(&self, names: &[&str]) -> Option<String> {
        for name in names {
            let key = if self.prefix.is_empty() {
                (*name).to_string()
            } else {
                format!("{}_{}", self.prefix, name)
            };
            match self.store.get(&key) {
                Some(value) if !value.is_empty() => return Some(value),
                _ => {}
            }
        }
        None
    }

    /// Shared lookup-and-convert step behind every typed getter.
    fn lookup<T>(&self, default: T, names: &[&str], parse: impl FnOnce(&str) -> Option<T>) -> T {
        let Some(raw) = self.resolve(names) else {
            return default;
        };
        match parse(&raw) {
            Some(value) => value,
            None => {
                tracing::trace!(?names, "environment value failed to parse, using default");
                default
            }
        }
    }

    /// Returns the first non-empty value among the candidates, or `default`.
    pub fn get(&self, default: &str, names: &[&str]) -> String {
        self.resolve(names)
            .unwrap_or_else(|| default.to_string())
    }

    /// Returns the first non-empty value parsed as a base-10 signed integer.
    /// Non-numeric or out-of-range values yield `default`.
    pub fn get_int(&self, default: i64, names: &[&str]) -> i64 {
        self.lookup(default, names, |raw| raw.parse().ok())
    }

    /// Returns the first non-empty value parsed as a 64-bit float, with
    /// standard IEEE-754 rounding. Malformed or out-of-range values yield
    /// `default`.
    pub fn get_float(&self, default: f64, names: &[&str]) -> f64 {
        self.lookup(default, names, parse_float)
    }

    /// Returns the first non-empty value parsed as a boolean. Accepts
    /// `1, t, T, TRUE, true, True, 0, f, F, FALSE, false, False`; any
    /// other value yields `default`.
    pub fn get_bool(&self, default: bool, names: &[&str]) -> bool {
        self.lookup(default, names, parse_bool)
    }

    /// Returns the first non-empty value parsed as a duration, such as
    /// `"300ms"`, `"-1.5h"` or `"2h45m"` (see [`parse_duration`](crate::parse_duration)).
    /// Malformed values yield `default`.
    pub fn get_duration(&self, default: TimeDelta, names: &[&str]) -> TimeDelta {
        self.lookup(default, names, |raw| parse_duration(raw).ok())
    }

    /// Returns the first non-empty value parsed as a UTC timestamp against
    /// a strftime `layout` (e.g. `"%Y-%m-%d %H:%M:%S"`). Layouts carrying a
    /// zone offset (`%z`) produce the corresponding instant; zoneless
    /// layouts are interpreted as UTC, date-only layouts as midnight, and
    /// time-only layouts as that clock time on the zero date (0001-01-01).
    /// Values that do not match the layout yield `default`.
    pub fn get_time(&self, layout: &str, default: DateTime<Utc>, names: &[&str]) -> DateTime<Utc> {
        self.lookup(default, names, |raw| parse_time(layout, raw))
    }
}

/// The accepted token set is deliberately case-sensitive and asymmetric;
/// widening it would silently change which inputs are accepted.
fn parse_bool(raw: &str) -> Option<bool> {
    match raw {
        "1" | "t" | "T" | "TRUE" | "true" | "True" => Some(true),
        "0" | "f" | "F" | "FALSE" | "false" | "False" => Some(false),
        _ => None,
    }
}

/// An over-range finite input parses to infinity in Rust; only a literal
/// infinity token may produce one.
fn parse_float(raw: &str) -> Option<f64> {
    let value: f64 = raw.parse().ok()?;
    if value.is_infinite() {
        let token = raw.strip_prefix(['+', '-']).unwrap_or(raw);
        if !token.eq_ignore_ascii_case("inf") && !token.eq_ignore_ascii_case("infinity") {
            return None;
        }
    }
    Some(value)
}

fn parse_time(layout: &str, raw: &str) -> Option<DateTime<Utc>> {
    if let Ok(with_zone) = DateTime::parse_from_str(raw, layout) {
        return Some(with_zone.with_timezone(&Utc));
    }
    if let Ok(naive) = NaiveDateTime::parse_from_str(raw, layout) {
        return Some(naive.and_utc());
    }
    if let Ok(date) = NaiveDate::parse_from_str(raw, layout) {
        return date.and_hms_opt(0, 0, 0).map(|naive| naive.and_utc());
    }
    NaiveTime::parse_from_str(raw, layout)
        .ok()
        .and_then(|time| NaiveDate::from_ymd_opt(1, 1, 1).map(|date| date.and_time(time)))
        .map(|naive| naive.and_utc())
}
