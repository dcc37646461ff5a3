// fingestor-client/src/http/interceptor.rs
// Request/response interceptors applied by HttpClient, in registration order

use reqwest::header::{AUTHORIZATION, HeaderValue};
use reqwest::{Method, Request, StatusCode, Url};
use std::sync::{Arc, Mutex, PoisonError};

use crate::navigation::Navigator;
use crate::store::SessionStore;
use crate::{ClientError, ClientResult};

/// One request/response exchange, as seen by response interceptors.
#[derive(Debug, Clone)]
pub struct Exchange {
    pub method: Method,
    pub url: Url,
    /// Status of the response; `None` when no response arrived
    pub status: Option<StatusCode>,
}

/// Transforms every outbound request before it is sent.
pub trait RequestInterceptor: Send + Sync {
    fn on_request(&self, request: &mut Request) -> ClientResult<()>;
}

/// Observes every inbound result.
///
/// Successful responses are passed through untouched; failures may be
/// replaced by returning a different error.
pub trait ResponseInterceptor: Send + Sync {
    fn on_response(&self, _exchange: &Exchange) {}

    fn on_error(&self, _exchange: &Exchange, error: ClientError) -> ClientError {
        error
    }
}

// ============================================================================
// Bearer token
// ============================================================================

/// Sets `Authorization: Bearer <token>` from the session store.
///
/// The store is read on every request, so a token saved by a login is
/// picked up by the very next call.
#[derive(Debug, Clone)]
pub struct BearerTokenInterceptor {
    store: SessionStore,
}

impl BearerTokenInterceptor {
    pub fn new(store: SessionStore) -> Self {
        Self { store }
    }
}

impl RequestInterceptor for BearerTokenInterceptor {
    fn on_request(&self, request: &mut Request) -> ClientResult<()> {
        let Some(token) = self.store.token() else {
            return Ok(());
        };
        let mut value = HeaderValue::from_str(&format!("Bearer {token}"))
            .map_err(|_| ClientError::InvalidToken)?;
        value.set_sensitive(true);
        request.headers_mut().insert(AUTHORIZATION, value);
        Ok(())
    }
}

// ============================================================================
// Forced logout on 401
// ============================================================================

/// Ends the session when the backend answers 401.
///
/// Expires the store (which also ends every listening session context),
/// then sends the user to the login view unless they are already there.
/// 401s that arrive before the user has moved again, such as the rest of a
/// concurrent burst, reuse that redirect instead of navigating again.
pub struct UnauthorizedInterceptor {
    store: SessionStore,
    navigator: Arc<dyn Navigator>,
    login_path: String,
    /// (token generation, navigator location epoch) right after the last
    /// redirect
    last_redirect: Mutex<Option<(u64, u64)>>,
}

impl UnauthorizedInterceptor {
    pub fn new(
        store: SessionStore,
        navigator: Arc<dyn Navigator>,
        login_path: impl Into<String>,
    ) -> Self {
        Self {
            store,
            navigator,
            login_path: login_path.into(),
            last_redirect: Mutex::new(None),
        }
    }

    fn force_logout(&self, exchange: &Exchange) {
        tracing::warn!(url = %exchange.url, "Session rejected by backend, clearing stored credentials");
        if let Err(e) = self.store.expire() {
            tracing::error!(error = %e, "Failed to clear session store");
        }

        if self.navigator.current_path() == self.login_path {
            return;
        }
        let generation = self.store.generation();
        let mut last = self
            .last_redirect
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        if *last == Some((generation, self.navigator.location_epoch())) {
            tracing::debug!(generation, "Redirect to login already issued");
            return;
        }
        self.navigator.navigate(&self.login_path);
        *last = Some((generation, self.navigator.location_epoch()));
    }
}

impl ResponseInterceptor for UnauthorizedInterceptor {
    fn on_error(&self, exchange: &Exchange, error: ClientError) -> ClientError {
        if error.is_unauthorized() {
            self.force_logout(exchange);
        }
        error
    }
}

// ============================================================================
// Tracing
// ============================================================================

/// Logs each request and its outcome.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingInterceptor;

impl RequestInterceptor for TracingInterceptor {
    fn on_request(&self, request: &mut Request) -> ClientResult<()> {
        tracing::debug!(method = %request.method(), url = %request.url(), "Sending request");
        Ok(())
    }
}

impl ResponseInterceptor for TracingInterceptor {
    fn on_response(&self, exchange: &Exchange) {
        tracing::debug!(
            method = %exchange.method,
            url = %exchange.url,
            status = ?exchange.status,
            "Response received"
        );
    }

    fn on_error(&self, exchange: &Exchange, error: ClientError) -> ClientError {
        tracing::debug!(
            method = %exchange.method,
            url = %exchange.url,
            status = ?exchange.status,
            error = %error,
            "Request failed"
        );
        error
    }
}
