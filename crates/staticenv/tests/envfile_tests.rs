//! Integration tests for `.env` loading and reading.
//!
//! Invariants:
//! - Tests serialize via `serial_test` because they change the process
//!   working directory and, in some cases, the process environment.
//! - Temporary directories are cleaned up automatically via `tempfile`.

use std::fs;
use std::path::PathBuf;

use serial_test::serial;
use tempfile::TempDir;

use staticenv::{Env, EnvFileError, MemoryStore, ProcessEnv, VarStore};

/// RAII guard for temporarily changing the current working directory.
struct CwdGuard {
    original_dir: PathBuf,
}

impl CwdGuard {
    fn new(temp_dir: &TempDir) -> Self {
        let original_dir = std::env::current_dir().expect("failed to get current directory");
        std::env::set_current_dir(temp_dir.path()).expect("failed to set current directory");
        Self { original_dir }
    }
}

impl Drop for CwdGuard {
    fn drop(&mut self) {
        let _ = std::env::set_current_dir(&self.original_dir);
    }
}

#[test]
#[serial]
fn test_read_missing_file_is_not_found() {
    let temp_dir = TempDir::new().unwrap();
    let _cwd = CwdGuard::new(&temp_dir);

    let result = staticenv::read();
    match result {
        Err(EnvFileError::NotFound { dir }) => {
            // macOS reports /private-prefixed paths for temp dirs.
            let canonical = dir.canonicalize().unwrap();
            assert_eq!(canonical, temp_dir.path().canonicalize().unwrap());
        }
        other => panic!("expected NotFound, got {other:?}"),
    }
}

#[test]
#[serial]
fn test_read_does_not_mutate_environment() {
    let temp_dir = TempDir::new().unwrap();
    let _cwd = CwdGuard::new(&temp_dir);

    fs::write(
        temp_dir.path().join(".env"),
        "READ_ONLY_KEY=read-only-value\n",
    )
    .unwrap();

    let map = staticenv::read().unwrap();
    assert_eq!(
        map.get("READ_ONLY_KEY"),
        Some(&"read-only-value".to_string())
    );
    assert!(std::env::var("READ_ONLY_KEY").is_err());
}

#[test]
#[serial]
fn test_read_parses_comments_and_quotes() {
    let temp_dir = TempDir::new().unwrap();
    let _cwd = CwdGuard::new(&temp_dir);

    fs::write(
        temp_dir.path().join(".env"),
        "# comment line\nPLAIN=one\nQUOTED=\"two words\"\n",
    )
    .unwrap();

    let map = staticenv::read().unwrap();
    assert_eq!(map.len(), 2);
    assert_eq!(map.get("PLAIN"), Some(&"one".to_string()));
    assert_eq!(map.get("QUOTED"), Some(&"two words".to_string()));
}

#[test]
#[serial]
fn test_path_that_is_a_directory_is_not_found() {
    let temp_dir = TempDir::new().unwrap();
    let _cwd = CwdGuard::new(&temp_dir);

    fs::create_dir(temp_dir.path().join(".env")).unwrap();

    assert!(matches!(
        staticenv::read(),
        Err(EnvFileError::NotFound { .. })
    ));
}

#[test]
#[serial]
fn test_load_applies_pairs_to_store() {
    let temp_dir = TempDir::new().unwrap();
    let _cwd = CwdGuard::new(&temp_dir);

    fs::write(temp_dir.path().join(".env"), "LOADED_KEY=from-file\n").unwrap();

    let store = MemoryStore::new();
    staticenv::load(&store).unwrap();
    assert_eq!(store.get("LOADED_KEY"), Some("from-file".to_string()));
}

#[test]
#[serial]
fn test_load_preserves_existing_values() {
    let temp_dir = TempDir::new().unwrap();
    let _cwd = CwdGuard::new(&temp_dir);

    fs::write(
        temp_dir.path().join(".env"),
        "EXISTING_KEY=from-file\nFRESH_KEY=from-file\n",
    )
    .unwrap();

    let store = MemoryStore::new();
    store.set("EXISTING_KEY", "from-environment");

    staticenv::load(&store).unwrap();
    assert_eq!(
        store.get("EXISTING_KEY"),
        Some("from-environment".to_string())
    );
    assert_eq!(store.get("FRESH_KEY"), Some("from-file".to_string()));
}

#[test]
#[serial]
fn test_load_missing_file_is_not_found() {
    let temp_dir = TempDir::new().unwrap();
    let _cwd = CwdGuard::new(&temp_dir);

    let store = MemoryStore::new();
    assert!(matches!(
        staticenv::load(&store),
        Err(EnvFileError::NotFound { .. })
    ));
}

#[test]
#[serial]
fn test_load_malformed_file_is_parse_error() {
    let temp_dir = TempDir::new().unwrap();
    let _cwd = CwdGuard::new(&temp_dir);

    fs::write(temp_dir.path().join(".env"), "INVALID LINE WITHOUT EQUALS").unwrap();

    let store = MemoryStore::new();
    assert!(matches!(
        staticenv::load(&store),
        Err(EnvFileError::Parse { .. })
    ));
}

#[test]
#[serial]
fn test_parse_error_does_not_leak_contents() {
    let temp_dir = TempDir::new().unwrap();
    let _cwd = CwdGuard::new(&temp_dir);

    let secret = "supersecret_token_12345";
    fs::write(
        temp_dir.path().join(".env"),
        format!("PASSWORD={secret}\nINVALID LINE WITHOUT EQUALS"),
    )
    .unwrap();

    let err = staticenv::load(&MemoryStore::new()).unwrap_err();
    let message = err.to_string();
    assert!(
        !message.contains(secret),
        "error message must not contain file contents: {message}"
    );
}

#[test]
#[serial]
fn test_loaded_variables_are_visible_to_getters() {
    let temp_dir = TempDir::new().unwrap();
    let _cwd = CwdGuard::new(&temp_dir);

    fs::write(
        temp_dir.path().join(".env"),
        "_STATICENV_IT_PORT=9090\n_STATICENV_IT_PRESET=from-file\n",
    )
    .unwrap();

    temp_env::with_vars(
        [("_STATICENV_IT_PRESET", Some("from-environment"))],
        || {
            let env = Env::new();
            env.load().unwrap();

            assert_eq!(env.get_int(0, &["_STATICENV_IT_PORT"]), 9090);
            // Pre-existing environment value wins over the file.
            assert_eq!(
                env.get("DEFAULT", &["_STATICENV_IT_PRESET"]),
                "from-environment"
            );
        },
    );

    // The applied variable leaks into the process on purpose; clean up so
    // other tests in this binary start from a known state.
    unsafe {
        std::env::remove_var("_STATICENV_IT_PORT");
    }
}

#[test]
#[serial]
fn test_env_read_method_matches_free_function() {
    let temp_dir = TempDir::new().unwrap();
    let _cwd = CwdGuard::new(&temp_dir);

    fs::write(temp_dir.path().join(".env"), "METHOD_KEY=value\n").unwrap();

    let env = Env::with_store(ProcessEnv);
    let map = env.read().unwrap();
    assert_eq!(map.get("METHOD_KEY"), Some(&"value".to_string()));
    assert!(std::env::var("METHOD_KEY").is_err());
}
