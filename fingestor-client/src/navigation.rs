//! Navigation port
//!
//! The HTTP core must send the user back to the login view when the
//! backend rejects the session. It does so through [`Navigator`], so the
//! behaviour works the same in a browser shell, a desktop shell or a test.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Mutex, PoisonError, RwLock};

/// Where the user currently is, and a way to send them elsewhere.
pub trait Navigator: Send + Sync {
    /// Path of the current view, e.g. `/dashboard`
    fn current_path(&self) -> String;

    /// Leave the current view for `path`. This is a hard navigation: any
    /// in-app state tied to the previous view is gone afterwards.
    fn navigate(&self, path: &str);

    /// Changes each time the location the user sees changes, whether by
    /// [`navigate`](Self::navigate) or by in-app routing. Two equal values
    /// mean the user has not moved in between.
    fn location_epoch(&self) -> u64;
}

/// Navigator that only tracks the location in memory.
///
/// Suitable for headless shells; also records every navigation so tests
/// can count them.
#[derive(Debug)]
pub struct MemoryNavigator {
    path: RwLock<String>,
    history: Mutex<Vec<String>>,
    epoch: AtomicU64,
}

impl MemoryNavigator {
    pub fn new(initial_path: impl Into<String>) -> Self {
        Self {
            path: RwLock::new(initial_path.into()),
            history: Mutex::new(Vec::new()),
            epoch: AtomicU64::new(0),
        }
    }

    /// Soft, in-app route change. Not recorded as a navigation.
    pub fn set_path(&self, path: impl Into<String>) {
        *self.path.write().unwrap_or_else(PoisonError::into_inner) = path.into();
        self.epoch.fetch_add(1, Ordering::SeqCst);
    }

    /// Hard navigations so far, oldest first
    pub fn history(&self) -> Vec<String> {
        self.history
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn navigation_count(&self) -> usize {
        self.history
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }
}

impl Default for MemoryNavigator {
    fn default() -> Self {
        Self::new("/")
    }
}

impl Navigator for MemoryNavigator {
    fn current_path(&self) -> String {
        self.path
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    fn navigate(&self, path: &str) {
        tracing::debug!(to = %path, "Navigating");
        self.set_path(path);
        self.history
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(path.to_string());
    }

    fn location_epoch(&self) -> u64 {
        self.epoch.load(Ordering::SeqCst)
    }
}
