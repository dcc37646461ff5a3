//! HTTP client core
//!
//! [`HttpClient`] owns the connection pool, base URL, timeout and the
//! ordered interceptor lists. Interceptors live in [`interceptor`] and are
//! usable on their own.

mod client;
pub mod interceptor;

pub use client::{HttpClient, HttpClientBuilder};
pub use interceptor::{
    BearerTokenInterceptor, Exchange, RequestInterceptor, ResponseInterceptor, TracingInterceptor,
    UnauthorizedInterceptor,
};
