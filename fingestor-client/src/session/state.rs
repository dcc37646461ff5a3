//! Session state snapshot and the small result types the context hands out.

use shared::UserProfile;

use crate::{ClientError, ErrorKind};

/// Lifecycle phase of the session.
///
/// ```text
/// Uninitialized -> Rehydrating -> Authenticated <-> Anonymous
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionPhase {
    Uninitialized,
    Rehydrating,
    Authenticated,
    Anonymous,
}

/// What views observe.
///
/// Built only through the constructors below, so `is_authenticated()`
/// always agrees with `user()` and `loading` is only set before the first
/// rehydration finishes.
#[derive(Debug, Clone, PartialEq)]
pub struct SessionState {
    phase: SessionPhase,
    user: Option<UserProfile>,
}

impl SessionState {
    pub(crate) fn uninitialized() -> Self {
        Self {
            phase: SessionPhase::Uninitialized,
            user: None,
        }
    }

    pub(crate) fn rehydrating() -> Self {
        Self {
            phase: SessionPhase::Rehydrating,
            user: None,
        }
    }

    pub(crate) fn authenticated(user: UserProfile) -> Self {
        Self {
            phase: SessionPhase::Authenticated,
            user: Some(user),
        }
    }

    pub(crate) fn anonymous() -> Self {
        Self {
            phase: SessionPhase::Anonymous,
            user: None,
        }
    }

    pub fn phase(&self) -> SessionPhase {
        self.phase
    }

    pub fn user(&self) -> Option<&UserProfile> {
        self.user.as_ref()
    }

    pub fn is_authenticated(&self) -> bool {
        self.user.is_some()
    }

    pub fn is_loading(&self) -> bool {
        matches!(
            self.phase,
            SessionPhase::Uninitialized | SessionPhase::Rehydrating
        )
    }

    /// Decide what a view guarded by `access` should do right now.
    pub fn guard(&self, access: RouteAccess) -> RouteDecision {
        if self.is_loading() {
            return RouteDecision::Wait;
        }
        match (access, self.is_authenticated()) {
            (RouteAccess::Protected, false) => RouteDecision::RedirectToLogin,
            (RouteAccess::PublicOnly, true) => RouteDecision::RedirectToHome,
            _ => RouteDecision::Render,
        }
    }
}

/// Who may see a view
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouteAccess {
    /// Needs a logged-in user (dashboard, customers, ...)
    Protected,
    /// Only for anonymous users (login)
    PublicOnly,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouteDecision {
    /// Session still rehydrating; show a spinner
    Wait,
    Render,
    RedirectToLogin,
    RedirectToHome,
}

// =============================================================================
// Outcomes
// =============================================================================

/// Message for a login that could not reach the backend
pub const MSG_CONNECTION_ERROR: &str =
    "Connection error. Check that the backend is running and reachable.";

/// Message for rejected credentials
pub const MSG_BAD_CREDENTIALS: &str = "Incorrect email or password.";

/// Fallback login message
pub const MSG_LOGIN_FAILED: &str = "Login failed.";

/// Fallback registration message
pub const MSG_REGISTER_FAILED: &str = "Failed to register user.";

/// Result of [`SessionContext::login`](super::SessionContext::login).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoginOutcome {
    pub success: bool,
    pub error: Option<String>,
}

impl LoginOutcome {
    pub(crate) fn ok() -> Self {
        Self {
            success: true,
            error: None,
        }
    }

    pub(crate) fn failed(error: &ClientError) -> Self {
        Self {
            success: false,
            error: Some(login_error_message(error)),
        }
    }
}

/// Result of [`SessionContext::register`](super::SessionContext::register).
#[derive(Debug, Clone, PartialEq)]
pub struct RegisterOutcome {
    pub success: bool,
    pub user: Option<UserProfile>,
    pub error: Option<String>,
}

impl RegisterOutcome {
    pub(crate) fn ok(user: UserProfile) -> Self {
        Self {
            success: true,
            user: Some(user),
            error: None,
        }
    }

    pub(crate) fn failed(error: &ClientError) -> Self {
        Self {
            success: false,
            user: None,
            error: Some(
                error
                    .detail()
                    .filter(|_| !error.is_unauthorized())
                    .unwrap_or(MSG_REGISTER_FAILED)
                    .to_string(),
            ),
        }
    }
}

/// Network first, then bad credentials, then whatever the backend said.
pub fn login_error_message(error: &ClientError) -> String {
    match error.kind() {
        ErrorKind::Network => MSG_CONNECTION_ERROR.to_string(),
        ErrorKind::Unauthorized => MSG_BAD_CREDENTIALS.to_string(),
        _ => error.detail().unwrap_or(MSG_LOGIN_FAILED).to_string(),
    }
}
