//! Scoped environment overrides for configuration tests.

use std::env;
use std::sync::{Mutex, MutexGuard, PoisonError};

static ENV_LOCK: Mutex<()> = Mutex::new(());

/// Applies environment overrides until dropped, restoring previous values.
pub struct EnvOverride {
    saved: Vec<(&'static str, Option<String>)>,
    _lock: MutexGuard<'static, ()>,
}

impl EnvOverride {
    /// Sets or removes each variable in `overrides`.
    pub fn apply(overrides: &[(&'static str, Option<&str>)]) -> Self {
        let lock = ENV_LOCK.lock().unwrap_or_else(PoisonError::into_inner);
        let mut saved = Vec::with_capacity(overrides.len());
        for (name, value) in overrides {
            saved.push((*name, env::var(name).ok()));
            unsafe {
                // SAFETY: ENV_LOCK serializes environment mutations in tests.
                match value {
                    Some(new_value) => env::set_var(name, new_value),
                    None => env::remove_var(name),
                }
            }
        }
        Self { saved, _lock: lock }
    }
}

impl Drop for EnvOverride {
    fn drop(&mut self) {
        for (name, value) in self.saved.drain(..).rev() {
            unsafe {
                // SAFETY: the guard still holds ENV_LOCK.
                match value {
                    Some(previous) => env::set_var(name, previous),
                    None => env::remove_var(name),
                }
            }
        }
    }
}
