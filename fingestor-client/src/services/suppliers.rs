//! `/suppliers` endpoints

use shared::models::{MessageResponse, Page, Supplier, SupplierCreate, SupplierUpdate};
use uuid::Uuid;

use crate::ClientResult;
use crate::http::HttpClient;

#[derive(Debug, Clone)]
pub struct SupplierService {
    http: HttpClient,
}

impl SupplierService {
    pub fn new(http: HttpClient) -> Self {
        Self { http }
    }

    pub async fn list(&self, page: Page) -> ClientResult<Vec<Supplier>> {
        self.http.get(&format!("/suppliers/?{}", page.query())).await
    }

    pub async fn get(&self, id: Uuid) -> ClientResult<Supplier> {
        self.http.get(&format!("/suppliers/{id}")).await
    }

    pub async fn create(&self, supplier: &SupplierCreate) -> ClientResult<Supplier> {
        self.http.post("/suppliers/", supplier).await
    }

    pub async fn update(&self, id: Uuid, changes: &SupplierUpdate) -> ClientResult<Supplier> {
        self.http.put(&format!("/suppliers/{id}"), changes).await
    }

    pub async fn delete(&self, id: Uuid) -> ClientResult<MessageResponse> {
        self.http.delete(&format!("/suppliers/{id}")).await
    }
}
