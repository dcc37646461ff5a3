//! `/dashboard` endpoints

use shared::models::DashboardKpis;

use crate::ClientResult;
use crate::http::HttpClient;

#[derive(Debug, Clone)]
pub struct DashboardService {
    http: HttpClient,
}

impl DashboardService {
    pub fn new(http: HttpClient) -> Self {
        Self { http }
    }

    /// Current month against the previous one, plus record counters
    pub async fn kpis(&self) -> ClientResult<DashboardKpis> {
        self.http.get("/dashboard/kpis").await
    }
}
