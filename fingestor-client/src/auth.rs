//! Auth service - the `/auth` endpoints

use async_trait::async_trait;
use shared::client::LoginForm;
use shared::{NewUser, TokenResponse, UserProfile};

use crate::ClientResult;
use crate::http::HttpClient;

/// Auth endpoints as seen by the session layer.
///
/// [`AuthService`] is the network implementation; the trait exists so the
/// session state machine can be driven without a backend.
#[async_trait]
pub trait AuthApi: Send + Sync {
    /// Exchange credentials for a token. Does not persist anything.
    async fn login(&self, email: &str, password: &str) -> ClientResult<TokenResponse>;

    async fn register(&self, user: &NewUser) -> ClientResult<UserProfile>;

    /// Profile of whoever the attached bearer token belongs to
    async fn get_me(&self) -> ClientResult<UserProfile>;

    async fn refresh_token(&self) -> ClientResult<TokenResponse>;
}

/// Network auth service
#[derive(Debug, Clone)]
pub struct AuthService {
    http: HttpClient,
}

impl AuthService {
    pub fn new(http: HttpClient) -> Self {
        Self { http }
    }
}

#[async_trait]
impl AuthApi for AuthService {
    async fn login(&self, email: &str, password: &str) -> ClientResult<TokenResponse> {
        tracing::debug!(email = %email, "Requesting access token");
        let form = LoginForm {
            username: email.to_string(),
            password: password.to_string(),
        };
        self.http.post_form("/auth/login", &form).await
    }

    async fn register(&self, user: &NewUser) -> ClientResult<UserProfile> {
        self.http.post("/auth/register", user).await
    }

    async fn get_me(&self) -> ClientResult<UserProfile> {
        self.http.get("/auth/me").await
    }

    async fn refresh_token(&self) -> ClientResult<TokenResponse> {
        self.http.post_empty("/auth/refresh").await
    }
}
