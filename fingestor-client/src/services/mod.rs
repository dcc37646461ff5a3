//! Typed wrappers over the business endpoints
//!
//! Each service is a thin, cloneable view over the shared [`HttpClient`];
//! bearer token and forced logout come from its interceptors.
//!
//! [`HttpClient`]: crate::http::HttpClient

mod customers;
mod dashboard;
mod financial;
mod suppliers;

pub use customers::CustomerService;
pub use dashboard::DashboardService;
pub use financial::FinancialService;
pub use suppliers::SupplierService;
