//! Pluggable variable stores backing the accessor.
//!
//! Responsibilities:
//! - Define the `VarStore` trait used for every variable lookup and for
//!   applying `.env` file contents.
//! - Provide the process-environment implementation (`ProcessEnv`) and an
//!   in-memory implementation (`MemoryStore`) for deterministic tests.
//!
//! Invariants:
//! - `get` returns `None` for unset variables; a set-but-empty variable
//!   returns `Some("")` and the accessor decides how to treat it.
//! - `set` is the only mutation path; the accessor itself never writes.

use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard};

/// A process-wide (or simulated) mapping from variable name to string value.
///
/// Implementations can provide the real OS environment, test doubles, or
/// alternative configuration sources.
pub trait VarStore: Send + Sync {
    /// Returns the value of `name`, or `None` when unset.
    fn get(&self, name: &str) -> Option<String>;

    /// Sets `name` to `value`.
    fn set(&self, name: &str, value: &str);
}

/// The real process environment.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessEnv;

impl VarStore for ProcessEnv {
    fn get(&self, name: &str) -> Option<String> {
        std::env::var(name).ok()
    }

    fn set(&self, name: &str, value: &str) {
        // Mutates process-global state; the host process is expected to
        // serialize environment mutation (typically one load() at startup).
        unsafe {
            std::env::set_var(name, value);
        }
    }
}

/// In-memory store for tests and for embedding the accessor without
/// touching the real process environment.
#[derive(Debug, Default)]
pub struct MemoryStore {
    vars: Mutex<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn locked(&self) -> MutexGuard<'_, HashMap<String, String>> {
        self.vars.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl VarStore for MemoryStore {
    fn get(&self, name: &str) -> Option<String> {
        self.locked().get(name).cloned()
    }

    fn set(&self, name: &str, value: &str) {
        self.locked().insert(name.to_string(), value.to_string());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_store_get_set() {
        let store = MemoryStore::new();
        assert_eq!(store.get("MISSING"), None);

        store.set("KEY", "value");
        assert_eq!(store.get("KEY"), Some("value".to_string()));

        store.set("KEY", "other");
        assert_eq!(store.get("KEY"), Some("other".to_string()));
    }

    #[test]
    fn test_process_env_roundtrip() {
        let _lock = crate::test_util::global_test_lock().lock().unwrap();
        let store = ProcessEnv;

        temp_env::with_vars([("_STATICENV_SOURCE_TEST", Some("set"))], || {
            assert_eq!(
                store.get("_STATICENV_SOURCE_TEST"),
                Some("set".to_string())
            );
        });
        assert_eq!(store.get("_STATICENV_SOURCE_TEST_UNSET"), None);
    }
}
