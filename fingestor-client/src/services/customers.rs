//! `/customers` endpoints

use shared::models::{Customer, CustomerCreate, CustomerUpdate, MessageResponse, Page};
use uuid::Uuid;

use crate::ClientResult;
use crate::http::HttpClient;

#[derive(Debug, Clone)]
pub struct CustomerService {
    http: HttpClient,
}

impl CustomerService {
    pub fn new(http: HttpClient) -> Self {
        Self { http }
    }

    pub async fn list(&self, page: Page) -> ClientResult<Vec<Customer>> {
        self.http.get(&format!("/customers/?{}", page.query())).await
    }

    pub async fn get(&self, id: Uuid) -> ClientResult<Customer> {
        self.http.get(&format!("/customers/{id}")).await
    }

    pub async fn create(&self, customer: &CustomerCreate) -> ClientResult<Customer> {
        self.http.post("/customers/", customer).await
    }

    pub async fn update(&self, id: Uuid, changes: &CustomerUpdate) -> ClientResult<Customer> {
        self.http.put(&format!("/customers/{id}"), changes).await
    }

    pub async fn delete(&self, id: Uuid) -> ClientResult<MessageResponse> {
        self.http.delete(&format!("/customers/{id}")).await
    }
}
