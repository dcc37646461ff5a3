//! Dashboard KPI Model

use serde::{Deserialize, Serialize};

use crate::util::{self, Trend};

/// Current vs previous month for one metric
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct KpiComparison {
    pub current: f64,
    pub previous: f64,
    /// Percent change (percentage points for `margin`)
    pub variation: f64,
}

impl KpiComparison {
    pub fn trend(&self) -> Trend {
        util::trend(self.variation)
    }

    pub fn formatted_variation(&self) -> String {
        util::format_variation(self.variation)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FinancialKpis {
    pub revenue: KpiComparison,
    pub expenses: KpiComparison,
    pub profit: KpiComparison,
    pub margin: KpiComparison,
    pub accounts_receivable: f64,
    pub accounts_payable: f64,
    pub projected_cash_flow: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Counters {
    pub customers: u64,
    pub suppliers: u64,
    pub invoices: u64,
    pub billings: u64,
}

/// Months the KPIs were computed for, as `YYYY-MM`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KpiPeriod {
    pub current_month: String,
    pub previous_month: String,
}

/// `GET /dashboard/kpis` payload
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DashboardKpis {
    pub financial_kpis: FinancialKpis,
    pub counters: Counters,
    pub period: KpiPeriod,
}
