//! FinGestorClient - one handle wiring storage, HTTP, session and services

use std::sync::Arc;

use crate::auth::{AuthApi, AuthService};
use crate::http::HttpClient;
use crate::navigation::Navigator;
use crate::services::{CustomerService, DashboardService, FinancialService, SupplierService};
use crate::session::{RouteAccess, RouteDecision, SessionContext};
use crate::store::{FileStorage, MemoryStorage, SessionStore, Storage};
use crate::{ClientConfig, ClientResult};

/// Entry point for shells (desktop, CLI, tests).
///
/// All parts share one [`SessionStore`], so a login through
/// [`session`](Self::session) is immediately visible to every service.
///
/// # Example
///
/// ```no_run
/// use fingestor_client::{ClientConfig, FinGestorClient, MemoryNavigator};
/// use std::sync::Arc;
///
/// # async fn run() -> fingestor_client::ClientResult<()> {
/// let client = FinGestorClient::from_config(
///     ClientConfig::from_env()?,
///     Arc::new(MemoryNavigator::new("/login")),
/// )?;
/// client.session().rehydrate().await;
/// let outcome = client.session().login("admin@example.com", "admin123").await;
/// if outcome.success {
///     let customers = client.customers().list(Default::default()).await?;
///     println!("{} customers", customers.len());
/// }
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct FinGestorClient {
    config: ClientConfig,
    http: HttpClient,
    session: SessionContext,
}

impl FinGestorClient {
    pub fn new(
        config: ClientConfig,
        storage: Arc<dyn Storage>,
        navigator: Arc<dyn Navigator>,
    ) -> ClientResult<Self> {
        let store = SessionStore::from_arc(storage);
        let http = HttpClient::new(&config, store.clone(), navigator)?;
        let auth: Arc<dyn AuthApi> = Arc::new(AuthService::new(http.clone()));
        let session = SessionContext::new(auth, store);

        tracing::debug!(base_url = %http.base_url(), "FinGestor client ready");
        Ok(Self {
            config,
            http,
            session,
        })
    }

    /// Persist the session under `config.session_dir`, or in memory when
    /// no directory is configured.
    pub fn from_config(config: ClientConfig, navigator: Arc<dyn Navigator>) -> ClientResult<Self> {
        let storage: Arc<dyn Storage> = match &config.session_dir {
            Some(dir) => Arc::new(FileStorage::in_dir(dir)),
            None => Arc::new(MemoryStorage::new()),
        };
        Self::new(config, storage, navigator)
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    pub fn http(&self) -> &HttpClient {
        &self.http
    }

    pub fn session(&self) -> &SessionContext {
        &self.session
    }

    pub fn store(&self) -> &SessionStore {
        self.session.store()
    }

    pub fn auth(&self) -> AuthService {
        AuthService::new(self.http.clone())
    }

    pub fn customers(&self) -> CustomerService {
        CustomerService::new(self.http.clone())
    }

    pub fn suppliers(&self) -> SupplierService {
        SupplierService::new(self.http.clone())
    }

    pub fn financial(&self) -> FinancialService {
        FinancialService::new(self.http.clone())
    }

    pub fn dashboard(&self) -> DashboardService {
        DashboardService::new(self.http.clone())
    }

    /// Where a view with `access` should send the user, if anywhere.
    /// `None` means render (or keep waiting while the session loads).
    pub fn redirect_for(&self, access: RouteAccess) -> Option<&str> {
        match self.session.route_for(access) {
            RouteDecision::RedirectToLogin => Some(&self.config.login_path),
            RouteDecision::RedirectToHome => Some(&self.config.home_path),
            RouteDecision::Wait | RouteDecision::Render => None,
        }
    }
}
