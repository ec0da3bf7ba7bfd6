//! Helpers for safely mutating environment variables in tests.
//!
//! Every mutation runs under a global re-entrant mutex and returns an RAII
//! guard restoring the previous value when dropped. Hold [`lock`] when a test
//! sets variables and then parses arguments that read them, so no other test
//! can change the environment in between.
//!
//! # Examples
//!
//! ```
//! use flag_binder_test_helpers::env;
//!
//! let _lock = env::lock();
//! let _guard = env::set_var("TTY_SHARE_PORT", "9000");
//! assert_eq!(std::env::var("TTY_SHARE_PORT").ok().as_deref(), Some("9000"));
//! ```

use std::env;
use std::ffi::{OsStr, OsString};
use std::fmt;
use std::sync::LazyLock;

use parking_lot::{ReentrantMutex, ReentrantMutexGuard};

static ENV_MUTEX: LazyLock<ReentrantMutex<()>> = LazyLock::new(ReentrantMutex::default);

/// RAII guard restoring an environment variable to its prior value on drop.
#[must_use = "dropping restores the prior value"]
pub struct EnvVarGuard {
    key: String,
    original: Option<OsString>,
}

impl fmt::Debug for EnvVarGuard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EnvVarGuard")
            .field("key", &self.key)
            .field("had_original", &self.original.is_some())
            .finish()
    }
}

/// RAII guard serialising environment access for its lifetime.
#[must_use = "dropping releases the environment lock"]
pub struct EnvLock {
    _guard: ReentrantMutexGuard<'static, ()>,
}

fn mutate<F>(key: String, mutator: F) -> EnvVarGuard
where
    F: FnOnce(&str),
{
    let _guard = ENV_MUTEX.lock();
    let original = env::var_os(&key);
    mutator(&key);
    EnvVarGuard { key, original }
}

/// Sets an environment variable and returns a guard restoring its prior value.
pub fn set_var<K, V>(key: K, value: V) -> EnvVarGuard
where
    K: Into<String>,
    V: AsRef<OsStr>,
{
    // SAFETY: `mutate` holds `ENV_MUTEX` while the closure runs.
    mutate(key.into(), |k| unsafe { env::set_var(k, value.as_ref()) })
}

/// Removes an environment variable and returns a guard restoring its prior value.
pub fn remove_var<K>(key: K) -> EnvVarGuard
where
    K: Into<String>,
{
    // SAFETY: `mutate` holds `ENV_MUTEX` while the closure runs.
    mutate(key.into(), |k| unsafe { env::remove_var(k) })
}

/// Acquires the global environment lock until the returned guard drops.
///
/// The lock is re-entrant, so [`set_var`] and [`remove_var`] remain usable
/// while it is held.
pub fn lock() -> EnvLock {
    EnvLock {
        _guard: ENV_MUTEX.lock(),
    }
}

impl Drop for EnvVarGuard {
    fn drop(&mut self) {
        let _guard = ENV_MUTEX.lock();
        if let Some(value) = self.original.take() {
            // SAFETY: We hold `ENV_MUTEX` during restoration.
            unsafe { env::set_var(&self.key, value) };
        } else {
            // SAFETY: We hold `ENV_MUTEX` during restoration.
            unsafe { env::remove_var(&self.key) };
        }
    }
}
