//! Client configuration

use std::path::PathBuf;
use std::time::Duration;

use crate::{ClientError, ClientResult};

/// Default backend API root
pub const DEFAULT_BASE_URL: &str = "http://localhost:8000/api/v1";

/// Default request timeout in seconds
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// Path of the login view
pub const DEFAULT_LOGIN_PATH: &str = "/login";

/// Path of the landing view after login
pub const DEFAULT_HOME_PATH: &str = "/dashboard";

/// Client configuration for talking to the FinGestor backend
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// API root (e.g., "http://localhost:8000/api/v1")
    pub base_url: String,

    /// Request timeout in seconds
    pub timeout: u64,

    /// View the client is sent to when the backend rejects the session
    pub login_path: String,

    /// View an authenticated user lands on
    pub home_path: String,

    /// Directory for the persisted session file (None = in-memory only)
    pub session_dir: Option<PathBuf>,
}

impl ClientConfig {
    /// Create a new client configuration for the given API root
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            timeout: DEFAULT_TIMEOUT_SECS,
            login_path: DEFAULT_LOGIN_PATH.to_string(),
            home_path: DEFAULT_HOME_PATH.to_string(),
            session_dir: None,
        }
    }

    /// Read configuration from the environment.
    ///
    /// | Variable | Default |
    /// |---|---|
    /// | `FINGESTOR_API_URL` | `http://localhost:8000/api/v1` |
    /// | `FINGESTOR_TIMEOUT_SECS` | `10` |
    /// | `FINGESTOR_LOGIN_PATH` | `/login` |
    /// | `FINGESTOR_HOME_PATH` | `/dashboard` |
    /// | `FINGESTOR_SESSION_DIR` | unset (in-memory session) |
    pub fn from_env() -> ClientResult<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`from_env`](Self::from_env), reading variables through `lookup`.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> ClientResult<Self> {
        let base_url = lookup("FINGESTOR_API_URL").unwrap_or_else(|| DEFAULT_BASE_URL.to_string());
        let mut config = Self::new(base_url);

        if let Some(raw) = lookup("FINGESTOR_TIMEOUT_SECS") {
            config.timeout = raw.parse().map_err(|_| {
                ClientError::Config(format!("FINGESTOR_TIMEOUT_SECS is not a number: {raw}"))
            })?;
        }
        if let Some(path) = lookup("FINGESTOR_LOGIN_PATH") {
            config.login_path = path;
        }
        if let Some(path) = lookup("FINGESTOR_HOME_PATH") {
            config.home_path = path;
        }
        config.session_dir = lookup("FINGESTOR_SESSION_DIR").map(PathBuf::from);

        config.validate()?;
        Ok(config)
    }

    /// Set the request timeout
    pub fn with_timeout(mut self, seconds: u64) -> Self {
        self.timeout = seconds;
        self
    }

    /// Set the login view path
    pub fn with_login_path(mut self, path: impl Into<String>) -> Self {
        self.login_path = path.into();
        self
    }

    /// Set the home view path
    pub fn with_home_path(mut self, path: impl Into<String>) -> Self {
        self.home_path = path.into();
        self
    }

    /// Persist the session under this directory
    pub fn with_session_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.session_dir = Some(dir.into());
        self
    }

    pub fn timeout_duration(&self) -> Duration {
        Duration::from_secs(self.timeout)
    }

    /// Reject settings the HTTP layer cannot work with.
    pub fn validate(&self) -> ClientResult<()> {
        if !(self.base_url.starts_with("http://") || self.base_url.starts_with("https://")) {
            return Err(ClientError::Config(format!(
                "base_url must be an http(s) URL: {}",
                self.base_url
            )));
        }
        if self.timeout == 0 {
            return Err(ClientError::Config("timeout must be at least 1 second".into()));
        }
        if !self.login_path.starts_with('/') {
            return Err(ClientError::Config(format!(
                "login_path must start with '/': {}",
                self.login_path
            )));
        }
        if !self.home_path.starts_with('/') {
            return Err(ClientError::Config(format!(
                "home_path must start with '/': {}",
                self.home_path
            )));
        }
        Ok(())
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self::new(DEFAULT_BASE_URL)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_default() {
        let config = ClientConfig::default();
        assert_eq!(config.base_url, "http://localhost:8000/api/v1");
        assert_eq!(config.timeout_duration(), Duration::from_secs(10));
        assert_eq!(config.login_path, "/login");
        assert_eq!(config.home_path, "/dashboard");
        assert!(config.session_dir.is_none());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_builders() {
        let config = ClientConfig::new("https://erp.example.com/api/v1/")
            .with_timeout(3)
            .with_login_path("/entrar")
            .with_session_dir("/tmp/fingestor");
        assert_eq!(config.base_url, "https://erp.example.com/api/v1");
        assert_eq!(config.timeout, 3);
        assert_eq!(config.login_path, "/entrar");
        assert_eq!(config.session_dir, Some(PathBuf::from("/tmp/fingestor")));
    }

    #[test]
    fn test_config_validation() {
        assert!(ClientConfig::new("localhost:8000").validate().is_err());
        assert!(ClientConfig::default().with_timeout(0).validate().is_err());
        assert!(ClientConfig::default().with_login_path("login").validate().is_err());
        assert!(ClientConfig::default().with_home_path("dashboard").validate().is_err());
    }

    fn vars(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: std::collections::HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_config_from_env_vars() {
        let config = ClientConfig::from_lookup(vars(&[
            ("FINGESTOR_API_URL", "https://erp.example.com/api/v1"),
            ("FINGESTOR_TIMEOUT_SECS", "5"),
            ("FINGESTOR_LOGIN_PATH", "/entrar"),
            ("FINGESTOR_HOME_PATH", "/painel"),
            ("FINGESTOR_SESSION_DIR", "/var/lib/fingestor"),
        ]))
        .unwrap();
        assert_eq!(config.base_url, "https://erp.example.com/api/v1");
        assert_eq!(config.timeout, 5);
        assert_eq!(config.login_path, "/entrar");
        assert_eq!(config.home_path, "/painel");
        assert_eq!(config.session_dir, Some(PathBuf::from("/var/lib/fingestor")));

        let defaults = ClientConfig::from_lookup(vars(&[])).unwrap();
        assert_eq!(defaults, ClientConfig::default());
    }

    #[test]
    fn test_config_from_env_rejects_bad_values() {
        assert!(ClientConfig::from_lookup(vars(&[("FINGESTOR_TIMEOUT_SECS", "ten")])).is_err());
        assert!(ClientConfig::from_lookup(vars(&[("FINGESTOR_HOME_PATH", "painel")])).is_err());
    }
}
