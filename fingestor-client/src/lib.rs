//! FinGestor Client - session and HTTP core for the FinGestor API
//!
//! Keeps the login session (token + profile) in a pluggable store, attaches
//! the bearer token to every request, and ends the session when the backend
//! answers 401.

pub mod auth;
pub mod client;
pub mod config;
pub mod error;
pub mod http;
pub mod navigation;
pub mod services;
pub mod session;
pub mod store;

pub use auth::{AuthApi, AuthService};
pub use client::FinGestorClient;
pub use config::ClientConfig;
pub use error::{ClientError, ClientResult, ErrorKind};
pub use http::HttpClient;
pub use navigation::{MemoryNavigator, Navigator};
pub use session::{
    LoginOutcome, RegisterOutcome, RouteAccess, RouteDecision, SessionContext, SessionPhase,
    SessionState,
};
pub use store::{FileStorage, MemoryStorage, SessionStore, Storage};

// Re-export shared types for convenience
pub use shared::{NewUser, TokenResponse, UserProfile};
