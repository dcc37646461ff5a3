//! `/financial` endpoints: accounts, transactions, categories, cost
//! centers and tax simulations.

use shared::models::{
    CostCenter, CostCenterCreate, FinancialAccount, FinancialAccountCreate,
    FinancialAccountUpdate, FinancialCategory, FinancialCategoryCreate, FinancialTransaction,
    FinancialTransactionCreate, FinancialTransactionUpdate, MessageResponse, Page, TaxSimulation,
    TaxSimulationRequest,
};
use uuid::Uuid;

use crate::ClientResult;
use crate::http::HttpClient;

#[derive(Debug, Clone)]
pub struct FinancialService {
    http: HttpClient,
}

impl FinancialService {
    pub fn new(http: HttpClient) -> Self {
        Self { http }
    }

    // ========================================================================
    // Accounts
    // ========================================================================

    pub async fn accounts(&self) -> ClientResult<Vec<FinancialAccount>> {
        self.http.get("/financial/accounts/").await
    }

    pub async fn create_account(
        &self,
        account: &FinancialAccountCreate,
    ) -> ClientResult<FinancialAccount> {
        self.http.post("/financial/accounts/", account).await
    }

    pub async fn update_account(
        &self,
        id: Uuid,
        changes: &FinancialAccountUpdate,
    ) -> ClientResult<FinancialAccount> {
        self.http
            .put(&format!("/financial/accounts/{id}"), changes)
            .await
    }

    pub async fn delete_account(&self, id: Uuid) -> ClientResult<MessageResponse> {
        self.http.delete(&format!("/financial/accounts/{id}")).await
    }

    // ========================================================================
    // Transactions
    // ========================================================================

    pub async fn transactions(&self, page: Page) -> ClientResult<Vec<FinancialTransaction>> {
        self.http
            .get(&format!("/financial/transactions/?{}", page.query()))
            .await
    }

    pub async fn create_transaction(
        &self,
        transaction: &FinancialTransactionCreate,
    ) -> ClientResult<FinancialTransaction> {
        self.http.post("/financial/transactions/", transaction).await
    }

    pub async fn update_transaction(
        &self,
        id: Uuid,
        changes: &FinancialTransactionUpdate,
    ) -> ClientResult<FinancialTransaction> {
        self.http
            .put(&format!("/financial/transactions/{id}"), changes)
            .await
    }

    pub async fn delete_transaction(&self, id: Uuid) -> ClientResult<MessageResponse> {
        self.http
            .delete(&format!("/financial/transactions/{id}"))
            .await
    }

    /// Mark as paid today. Returns the updated transaction.
    pub async fn pay_transaction(&self, id: Uuid) -> ClientResult<FinancialTransaction> {
        self.http
            .post_empty(&format!("/financial/transactions/{id}/pay"))
            .await
    }

    // ========================================================================
    // Categories and cost centers
    // ========================================================================

    pub async fn categories(&self) -> ClientResult<Vec<FinancialCategory>> {
        self.http.get("/financial/categories/").await
    }

    pub async fn create_category(
        &self,
        category: &FinancialCategoryCreate,
    ) -> ClientResult<FinancialCategory> {
        self.http.post("/financial/categories/", category).await
    }

    pub async fn cost_centers(&self) -> ClientResult<Vec<CostCenter>> {
        self.http.get("/financial/cost_centers/").await
    }

    pub async fn create_cost_center(
        &self,
        cost_center: &CostCenterCreate,
    ) -> ClientResult<CostCenter> {
        self.http.post("/financial/cost_centers/", cost_center).await
    }

    // ========================================================================
    // Taxes
    // ========================================================================

    /// Run a simulation. The backend stores it and returns the saved record.
    pub async fn simulate_taxes(
        &self,
        request: &TaxSimulationRequest,
    ) -> ClientResult<TaxSimulation> {
        self.http.post("/financial/taxes/simulate", request).await
    }

    pub async fn tax_simulations(&self, page: Page) -> ClientResult<Vec<TaxSimulation>> {
        self.http
            .get(&format!("/financial/taxes/simulations/?{}", page.query()))
            .await
    }
}
