//! Session persistence on top of a [`Storage`] backend.
//!
//! Two keys, `access_token` and `user` (profile as JSON). They are written
//! at different moments of a login, so readers only treat the session as
//! present when both exist.

use shared::UserProfile;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, PoisonError, RwLock, Weak};

use super::{MemoryStorage, Storage};
use crate::ClientResult;

/// Storage key of the bearer token
pub const ACCESS_TOKEN_KEY: &str = "access_token";

/// Storage key of the cached profile
pub const USER_KEY: &str = "user";

/// A complete persisted session
#[derive(Debug, Clone, PartialEq)]
pub struct StoredSession {
    pub token: String,
    pub user: UserProfile,
}

/// Raw key contents, used to put the store back after a failed login.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SessionSnapshot {
    token: Option<String>,
    user: Option<String>,
}

impl SessionSnapshot {
    pub fn is_empty(&self) -> bool {
        self.token.is_none() && self.user.is_none()
    }
}

/// Told when the backend rejects the stored session.
///
/// Called synchronously from [`SessionStore::expire`], after the store has
/// been cleared.
pub trait ExpiryListener: Send + Sync {
    fn session_expired(&self);
}

/// Shared handle to the persisted session.
///
/// Cloning is cheap; all clones see the same storage, generation and
/// expiry listeners.
#[derive(Clone)]
pub struct SessionStore {
    storage: Arc<dyn Storage>,
    generation: Arc<AtomicU64>,
    listeners: Arc<RwLock<Vec<Weak<dyn ExpiryListener>>>>,
}

impl std::fmt::Debug for SessionStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionStore")
            .field("has_token", &self.has_token())
            .field("generation", &self.generation())
            .finish()
    }
}

impl SessionStore {
    pub fn new(storage: impl Storage + 'static) -> Self {
        Self::from_arc(Arc::new(storage))
    }

    pub fn from_arc(storage: Arc<dyn Storage>) -> Self {
        Self {
            storage,
            generation: Arc::new(AtomicU64::new(0)),
            listeners: Arc::new(RwLock::new(Vec::new())),
        }
    }

    pub fn in_memory() -> Self {
        Self::new(MemoryStorage::new())
    }

    /// Bumped on every token write. Lets observers tell one login's
    /// session apart from the next.
    pub fn generation(&self) -> u64 {
        self.generation.load(Ordering::SeqCst)
    }

    pub fn token(&self) -> Option<String> {
        self.storage
            .get_item(ACCESS_TOKEN_KEY)
            .filter(|t| !t.is_empty())
    }

    pub fn has_token(&self) -> bool {
        self.token().is_some()
    }

    /// Cached profile. A value that no longer parses is an error.
    pub fn user(&self) -> ClientResult<Option<UserProfile>> {
        match self.storage.get_item(USER_KEY) {
            Some(raw) => Ok(Some(serde_json::from_str(&raw)?)),
            None => Ok(None),
        }
    }

    pub fn save_token(&self, token: &str) -> ClientResult<()> {
        self.storage.set_item(ACCESS_TOKEN_KEY, token)?;
        self.generation.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }

    pub fn save_user(&self, user: &UserProfile) -> ClientResult<()> {
        let raw = serde_json::to_string(user)?;
        self.storage.set_item(USER_KEY, &raw)?;
        Ok(())
    }

    pub fn save(&self, token: &str, user: &UserProfile) -> ClientResult<()> {
        self.save_token(token)?;
        self.save_user(user)
    }

    /// Both entries, or `None` if either is missing.
    pub fn load(&self) -> ClientResult<Option<StoredSession>> {
        let Some(token) = self.token() else {
            return Ok(None);
        };
        Ok(self.user()?.map(|user| StoredSession { token, user }))
    }

    /// Remove both entries. Removing what is not there is not an error.
    pub fn clear(&self) -> ClientResult<()> {
        let token = self.storage.remove_item(ACCESS_TOKEN_KEY);
        let user = self.storage.remove_item(USER_KEY);
        token?;
        user?;
        Ok(())
    }

    /// Register a listener for [`expire`](Self::expire). Held weakly; a
    /// dropped listener is skipped and pruned.
    pub fn on_expired(&self, listener: Weak<dyn ExpiryListener>) {
        let mut listeners = self
            .listeners
            .write()
            .unwrap_or_else(PoisonError::into_inner);
        listeners.retain(|l| l.strong_count() > 0);
        listeners.push(listener);
    }

    /// End the stored session because the backend rejected it: clear both
    /// entries, then notify every live listener. Listeners run even if
    /// clearing failed.
    pub fn expire(&self) -> ClientResult<()> {
        let cleared = self.clear();
        let live: Vec<Arc<dyn ExpiryListener>> = self
            .listeners
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .filter_map(Weak::upgrade)
            .collect();
        for listener in live {
            listener.session_expired();
        }
        cleared
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            token: self.storage.get_item(ACCESS_TOKEN_KEY),
            user: self.storage.get_item(USER_KEY),
        }
    }

    /// Write a snapshot back verbatim. Does not bump the generation.
    pub fn restore(&self, snapshot: &SessionSnapshot) -> ClientResult<()> {
        for (key, value) in [
            (ACCESS_TOKEN_KEY, &snapshot.token),
            (USER_KEY, &snapshot.user),
        ] {
            match value {
                Some(value) => self.storage.set_item(key, value)?,
                None => self.storage.remove_item(key)?,
            }
        }
        Ok(())
    }
}
