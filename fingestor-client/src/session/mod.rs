//! Session context
//!
//! Owns the in-memory view of who is logged in and keeps it in step with
//! the [`SessionStore`]. Views read it through [`SessionContext::state`] or
//! wait for changes on [`SessionContext::subscribe`].
//!
//! ```text
//! Uninitialized --rehydrate--> Rehydrating --+--> Authenticated (revalidate in background)
//!                                            +--> Anonymous
//! Authenticated --logout / revalidation failure / 401 anywhere--> Anonymous
//! Anonymous --login--> Authenticated
//! ```

mod state;

pub use state::{
    LoginOutcome, MSG_BAD_CREDENTIALS, MSG_CONNECTION_ERROR, MSG_LOGIN_FAILED,
    MSG_REGISTER_FAILED, RegisterOutcome, RouteAccess, RouteDecision, SessionPhase, SessionState,
    login_error_message,
};

use shared::{NewUser, UserProfile};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Weak};
use tokio::sync::watch;
use tokio::task::JoinHandle;

use crate::ClientResult;
use crate::auth::AuthApi;
use crate::store::{ExpiryListener, SessionStore};

/// Shared session handle. Cloning is cheap; clones observe the same state.
#[derive(Clone)]
pub struct SessionContext {
    inner: Arc<Inner>,
}

struct Inner {
    auth: Arc<dyn AuthApi>,
    store: SessionStore,
    state: watch::Sender<SessionState>,
    rehydrated: AtomicBool,
    logins_in_flight: AtomicUsize,
}

impl ExpiryListener for Inner {
    /// The backend rejected the stored token somewhere; the store is already
    /// empty. A login in progress owns the state until it finishes.
    fn session_expired(&self) {
        if self.logins_in_flight.load(Ordering::SeqCst) > 0 {
            tracing::debug!("Session expiry during login, state left to the login");
            return;
        }
        if self.state.borrow().is_authenticated() {
            tracing::info!("Session expired, logged out");
        }
        self.state.send_replace(SessionState::anonymous());
    }
}

/// Counts a login as in flight until dropped, including on cancellation.
struct LoginGuard<'a>(&'a AtomicUsize);

impl<'a> LoginGuard<'a> {
    fn enter(counter: &'a AtomicUsize) -> Self {
        counter.fetch_add(1, Ordering::SeqCst);
        Self(counter)
    }
}

impl Drop for LoginGuard<'_> {
    fn drop(&mut self) {
        self.0.fetch_sub(1, Ordering::SeqCst);
    }
}

impl std::fmt::Debug for SessionContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionContext")
            .field("state", &*self.inner.state.borrow())
            .field("store", &self.inner.store)
            .finish()
    }
}

impl SessionContext {
    /// Context over `store`. Registers itself for the store's expiry
    /// notifications, so a 401 from any request ends the in-memory session
    /// as well.
    pub fn new(auth: Arc<dyn AuthApi>, store: SessionStore) -> Self {
        let (state, _) = watch::channel(SessionState::uninitialized());
        let inner = Arc::new(Inner {
            auth,
            store,
            state,
            rehydrated: AtomicBool::new(false),
            logins_in_flight: AtomicUsize::new(0),
        });
        inner
            .store
            .on_expired(Arc::downgrade(&inner) as Weak<dyn ExpiryListener>);
        Self { inner }
    }

    // ========================================================================
    // Observation
    // ========================================================================

    pub fn state(&self) -> SessionState {
        self.inner.state.borrow().clone()
    }

    /// Receiver that wakes on every state change.
    pub fn subscribe(&self) -> watch::Receiver<SessionState> {
        self.inner.state.subscribe()
    }

    pub fn phase(&self) -> SessionPhase {
        self.inner.state.borrow().phase()
    }

    pub fn user(&self) -> Option<UserProfile> {
        self.inner.state.borrow().user().cloned()
    }

    pub fn is_authenticated(&self) -> bool {
        self.inner.state.borrow().is_authenticated()
    }

    pub fn is_loading(&self) -> bool {
        self.inner.state.borrow().is_loading()
    }

    /// Route guard decision for a view with the given access rule.
    pub fn route_for(&self, access: RouteAccess) -> RouteDecision {
        self.inner.state.borrow().guard(access)
    }

    pub fn store(&self) -> &SessionStore {
        &self.inner.store
    }

    fn set(&self, state: SessionState) {
        self.inner.state.send_replace(state);
    }

    // ========================================================================
    // Lifecycle
    // ========================================================================

    /// Restore the persisted session. Runs once; later calls return `None`.
    ///
    /// A stored session makes the context `Authenticated` immediately and
    /// starts a background [`revalidate`](Self::revalidate), whose handle is
    /// returned.
    pub async fn rehydrate(&self) -> Option<JoinHandle<bool>> {
        if self.inner.rehydrated.swap(true, Ordering::SeqCst) {
            return None;
        }
        self.set(SessionState::rehydrating());

        match self.inner.store.load() {
            Ok(Some(session)) => {
                tracing::info!(user = %session.user.display_name(), "Restored stored session");
                self.set(SessionState::authenticated(session.user));
                let this = self.clone();
                Some(tokio::spawn(async move { this.revalidate().await }))
            }
            Ok(None) => {
                tracing::debug!("No stored session");
                self.set(SessionState::anonymous());
                None
            }
            Err(e) => {
                tracing::warn!(error = %e, "Stored session unreadable, discarding");
                self.logout();
                None
            }
        }
    }

    /// Confirm the current token with `get_me`.
    ///
    /// On success the fresh profile replaces the cached one; on failure the
    /// session ends. A login or logout that happens while the call is in
    /// flight takes precedence over its result. Returns whether the session
    /// is still valid.
    pub async fn revalidate(&self) -> bool {
        let generation = self.inner.store.generation();
        let result = self.inner.auth.get_me().await;
        let superseded =
            self.inner.store.generation() != generation || !self.is_authenticated();

        match result {
            Ok(_) if superseded => self.is_authenticated(),
            Ok(user) => {
                if let Err(e) = self.inner.store.save_user(&user) {
                    tracing::warn!(error = %e, "Failed to cache refreshed profile");
                }
                self.set(SessionState::authenticated(user));
                true
            }
            Err(e) if superseded => {
                tracing::debug!(error = %e, "Revalidation failure superseded");
                self.is_authenticated()
            }
            Err(e) => {
                tracing::warn!(error = %e, "Session revalidation failed");
                self.logout();
                false
            }
        }
    }

    /// Log in and load the profile.
    ///
    /// Never returns an error: failures come back as a [`LoginOutcome`]
    /// with a message fit for display. On failure the in-memory state is
    /// untouched and the store is put back as it was, except after a 401,
    /// which has already ended any stored session.
    pub async fn login(&self, email: &str, password: &str) -> LoginOutcome {
        let _in_flight = LoginGuard::enter(&self.inner.logins_in_flight);
        let snapshot = self.inner.store.snapshot();

        match self.authenticate(email, password).await {
            Ok(user) => {
                tracing::info!(user = %user.display_name(), "Logged in");
                self.inner.rehydrated.store(true, Ordering::SeqCst);
                self.set(SessionState::authenticated(user));
                LoginOutcome::ok()
            }
            Err(e) => {
                tracing::warn!(email = %email, error = %e, "Login failed");
                if !e.is_unauthorized() {
                    if let Err(restore) = self.inner.store.restore(&snapshot) {
                        tracing::error!(error = %restore, "Failed to restore session store");
                    }
                }
                LoginOutcome::failed(&e)
            }
        }
    }

    async fn authenticate(&self, email: &str, password: &str) -> ClientResult<UserProfile> {
        let token = self.inner.auth.login(email, password).await?;
        self.inner.store.save_token(&token.access_token)?;
        let user = self.inner.auth.get_me().await?;
        self.inner.store.save_user(&user)?;
        Ok(user)
    }

    /// Create an account. Does not log in.
    pub async fn register(&self, user: &NewUser) -> RegisterOutcome {
        match self.inner.auth.register(user).await {
            Ok(created) => {
                tracing::info!(email = %user.email, "User registered");
                RegisterOutcome::ok(created)
            }
            Err(e) => {
                tracing::warn!(email = %user.email, error = %e, "Registration failed");
                RegisterOutcome::failed(&e)
            }
        }
    }

    /// Swap the stored token for a fresh one.
    pub async fn refresh_session(&self) -> ClientResult<()> {
        let token = self.inner.auth.refresh_token().await?;
        self.inner.store.save_token(&token.access_token)?;
        tracing::debug!("Access token refreshed");
        Ok(())
    }

    /// End the session. Safe to call any number of times.
    pub fn logout(&self) {
        if let Err(e) = self.inner.store.clear() {
            tracing::error!(error = %e, "Failed to clear session store");
        }
        if self.is_authenticated() {
            tracing::info!("Logged out");
        }
        self.set(SessionState::anonymous());
    }
}
