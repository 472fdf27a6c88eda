//! Helpers for safely mutating environment variables in tests.
//!
//! Each mutation acquires a global mutex and returns an RAII guard that
//! restores the previous state when dropped (removing the variable if it was
//! previously absent).
//!
//! # Examples
//!
//! ```
//! use pkl_config_test_helpers::env;
//!
//! let _g = env::set_var("KEY", "VALUE");
//! // `KEY` is set to `VALUE` for the duration of the guard.
//! ```

use std::env;
use std::ffi::{OsStr, OsString};
use std::sync::{LazyLock, Mutex};

static ENV_MUTEX: LazyLock<Mutex<()>> = LazyLock::new(Mutex::default);

/// RAII guard restoring an environment variable to its prior value on drop.
#[must_use = "dropping restores the prior value"]
pub struct EnvVarGuard {
    key: String,
    original: Option<OsString>,
}

/// Sets an environment variable and returns a guard restoring its prior value.
pub fn set_var<K, V>(key: K, value: V) -> EnvVarGuard
where
    K: Into<String>,
    V: AsRef<OsStr>,
{
    let key = key.into();
    with_lock(|| {
        let original = env::var_os(&key);
        // SAFETY: the global mutex serialises all environment mutation in
        // this process's tests.
        unsafe { env::set_var(&key, value) };
        EnvVarGuard { key, original }
    })
}

/// Removes an environment variable and returns a guard restoring its prior value.
pub fn remove_var<K>(key: K) -> EnvVarGuard
where
    K: Into<String>,
{
    let key = key.into();
    with_lock(|| {
        let original = env::var_os(&key);
        // SAFETY: see `set_var`.
        unsafe { env::remove_var(&key) };
        EnvVarGuard { key, original }
    })
}

impl Drop for EnvVarGuard {
    fn drop(&mut self) {
        let original = self.original.take();
        with_lock(|| {
            if let Some(val) = original {
                // SAFETY: see `set_var`.
                unsafe { env::set_var(&self.key, val) };
            } else {
                // SAFETY: see `set_var`.
                unsafe { env::remove_var(&self.key) };
            }
        });
    }
}

/// Run a closure while holding the global environment lock.
pub fn with_lock<F, R>(f: F) -> R
where
    F: FnOnce() -> R,
{
    let _guard = ENV_MUTEX.lock().unwrap_or_else(|poisoned| {
        // A panicking test must not wedge every later env mutation.
        poisoned.into_inner()
    });
    f()
}
