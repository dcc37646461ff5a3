//! Financial Models
//!
//! Accounts, categories, cost centers, transactions and tax simulations.

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use uuid::Uuid;

// =============================================================================
// Enums
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AccountType {
    Bank,
    Cash,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransactionType {
    Income,
    Expense,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransactionStatus {
    #[default]
    Pending,
    Paid,
    Overdue,
}

/// Category kind; same values as [`TransactionType`]
pub type CategoryType = TransactionType;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaxRegime {
    SimplesNacional,
    LucroPresumido,
}

impl fmt::Display for TaxRegime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::SimplesNacional => f.write_str("Simples Nacional"),
            Self::LucroPresumido => f.write_str("Lucro Presumido"),
        }
    }
}

// =============================================================================
// Accounts
// =============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FinancialAccount {
    pub id: Uuid,
    pub company_id: Uuid,
    pub name: String,
    #[serde(rename = "type")]
    pub account_type: AccountType,
    #[serde(default)]
    pub balance: Decimal,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FinancialAccountCreate {
    pub company_id: Uuid,
    pub name: String,
    #[serde(rename = "type")]
    pub account_type: AccountType,
    #[serde(default)]
    pub balance: Decimal,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FinancialAccountUpdate {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub account_type: Option<AccountType>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub balance: Option<Decimal>,
}

// =============================================================================
// Categories & cost centers
// =============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FinancialCategory {
    pub id: Uuid,
    pub company_id: Uuid,
    pub name: String,
    #[serde(rename = "type")]
    pub category_type: CategoryType,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FinancialCategoryCreate {
    pub company_id: Uuid,
    pub name: String,
    #[serde(rename = "type")]
    pub category_type: CategoryType,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CostCenter {
    pub id: Uuid,
    pub company_id: Uuid,
    pub name: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CostCenterCreate {
    pub company_id: Uuid,
    pub name: String,
}

// =============================================================================
// Transactions
// =============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FinancialTransaction {
    pub id: Uuid,
    pub company_id: Uuid,
    pub account_id: Uuid,
    #[serde(rename = "type")]
    pub transaction_type: TransactionType,
    pub description: String,
    pub amount: Decimal,
    pub due_date: NaiveDate,
    pub payment_date: Option<NaiveDate>,
    #[serde(default)]
    pub status: TransactionStatus,
    pub category_id: Option<Uuid>,
    pub cost_center_id: Option<Uuid>,
    #[serde(default)]
    pub is_recurring: bool,
    pub recurrence_id: Option<Uuid>,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub account: Option<FinancialAccount>,
    #[serde(default)]
    pub category: Option<FinancialCategory>,
    #[serde(default)]
    pub cost_center: Option<CostCenter>,
}

impl FinancialTransaction {
    /// Pending and past its due date.
    pub fn is_overdue_on(&self, today: NaiveDate) -> bool {
        self.status == TransactionStatus::Overdue
            || (self.status == TransactionStatus::Pending && self.due_date < today)
    }

    /// Amount with sign applied: income positive, expense negative.
    pub fn signed_amount(&self) -> Decimal {
        match self.transaction_type {
            TransactionType::Income => self.amount,
            TransactionType::Expense => -self.amount,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FinancialTransactionCreate {
    pub company_id: Uuid,
    pub account_id: Uuid,
    #[serde(rename = "type")]
    pub transaction_type: TransactionType,
    pub description: String,
    pub amount: Decimal,
    pub due_date: NaiveDate,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category_id: Option<Uuid>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cost_center_id: Option<Uuid>,
    #[serde(default)]
    pub is_recurring: bool,
}

impl FinancialTransactionCreate {
    /// The backend rejects zero and negative amounts.
    pub fn amount_is_valid(&self) -> bool {
        self.amount > Decimal::ZERO
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FinancialTransactionUpdate {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub amount: Option<Decimal>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub due_date: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payment_date: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<TransactionStatus>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub account_id: Option<Uuid>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category_id: Option<Uuid>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cost_center_id: Option<Uuid>,
}

// =============================================================================
// Tax simulation
// =============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TaxSimulationRequest {
    pub company_id: Uuid,
    /// Annual revenue
    pub revenue: Decimal,
    pub tax_regime: TaxRegime,
}

impl TaxSimulationRequest {
    pub fn revenue_is_valid(&self) -> bool {
        self.revenue > Decimal::ZERO
    }
}

/// Result computed by the backend for one regime
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulatedTaxes {
    pub regime: String,
    pub annual_revenue: f64,
    /// Nominal rate, Simples Nacional only
    #[serde(default)]
    pub tax_rate: Option<f64>,
    /// Presumed profit base, Lucro Presumido only
    #[serde(default)]
    pub presumed_profit: Option<f64>,
    pub total_tax: f64,
    pub net_income: f64,
    pub monthly_tax: f64,
    #[serde(default)]
    pub breakdown: BTreeMap<String, f64>,
}

impl SimulatedTaxes {
    /// Total tax over revenue, in percent.
    pub fn effective_rate(&self) -> f64 {
        if self.annual_revenue == 0.0 {
            return 0.0;
        }
        self.total_tax / self.annual_revenue * 100.0
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaxSimulation {
    pub id: Uuid,
    pub company_id: Uuid,
    pub revenue: Decimal,
    pub tax_regime: TaxRegime,
    pub simulated_taxes: SimulatedTaxes,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_tax_simulation_from_backend() {
        let sim: TaxSimulation = serde_json::from_value(json!({
            "id": "2b1f5d0e-8a47-4a52-9a43-6f3b0d1c2e01",
            "company_id": "7c9e6679-7425-40de-944b-e07fc1f90ae7",
            "revenue": 500000.0,
            "tax_regime": "lucro_presumido",
            "simulated_taxes": {
                "regime": "Lucro Presumido",
                "annual_revenue": 500000.0,
                "presumed_profit": 160000.0,
                "total_tax": 56650.0,
                "net_income": 443350.0,
                "monthly_tax": 4720.833333333333,
                "breakdown": {"irpj": 24000.0, "csll": 14400.0, "pis": 3250.0, "cofins": 15000.0}
            },
            "created_at": "2024-03-01T12:00:00Z",
            "updated_at": null
        }))
        .unwrap();

        assert_eq!(sim.tax_regime, TaxRegime::LucroPresumido);
        assert_eq!(sim.simulated_taxes.tax_rate, None);
        assert_eq!(sim.simulated_taxes.breakdown.len(), 4);
        assert!((sim.simulated_taxes.effective_rate() - 11.33).abs() < 1e-9);
    }

    #[test]
    fn test_transaction_helpers() {
        let tx: FinancialTransaction = serde_json::from_value(json!({
            "id": "2b1f5d0e-8a47-4a52-9a43-6f3b0d1c2e01",
            "company_id": "7c9e6679-7425-40de-944b-e07fc1f90ae7",
            "account_id": "7c9e6679-7425-40de-944b-e07fc1f90ae8",
            "type": "expense",
            "description": "Aluguel",
            "amount": 2500.0,
            "due_date": "2024-03-10",
            "payment_date": null,
            "status": "pending",
            "category_id": null,
            "cost_center_id": null,
            "is_recurring": true,
            "recurrence_id": null,
            "created_at": "2024-03-01T12:00:00Z",
            "updated_at": null
        }))
        .unwrap();

        assert_eq!(tx.signed_amount(), Decimal::new(-2500, 0));
        let before = NaiveDate::from_ymd_opt(2024, 3, 9).unwrap();
        let after = NaiveDate::from_ymd_opt(2024, 3, 11).unwrap();
        assert!(!tx.is_overdue_on(before));
        assert!(tx.is_overdue_on(after));
    }

    #[test]
    fn test_regime_wire_names() {
        assert_eq!(
            serde_json::to_value(TaxRegime::SimplesNacional).unwrap(),
            json!("simples_nacional")
        );
        assert_eq!(TaxRegime::LucroPresumido.to_string(), "Lucro Presumido");
    }
}
