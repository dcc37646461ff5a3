// fingestor-client/src/http/client.rs
// Core request pipeline shared by every backend call

use reqwest::header::{CONTENT_TYPE, HeaderMap, HeaderValue};
use reqwest::{Client, Method, RequestBuilder, Response};
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::sync::Arc;

use super::interceptor::{
    BearerTokenInterceptor, Exchange, RequestInterceptor, ResponseInterceptor, TracingInterceptor,
    UnauthorizedInterceptor,
};
use crate::navigation::Navigator;
use crate::store::SessionStore;
use crate::{ClientConfig, ClientError, ClientResult};

/// HTTP client for the FinGestor REST API.
///
/// Every call goes through the same pipeline: build, request interceptors
/// (in order), send, status check, response interceptors (in order). No
/// retries and no request de-duplication; each call is independent.
///
/// Cloning is cheap and clones share the connection pool and interceptors.
#[derive(Clone)]
pub struct HttpClient {
    client: Client,
    base_url: String,
    request_interceptors: Arc<[Arc<dyn RequestInterceptor>]>,
    response_interceptors: Arc<[Arc<dyn ResponseInterceptor>]>,
}

impl std::fmt::Debug for HttpClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpClient")
            .field("base_url", &self.base_url)
            .field("request_interceptors", &self.request_interceptors.len())
            .field("response_interceptors", &self.response_interceptors.len())
            .finish()
    }
}

impl HttpClient {
    /// Client with the standard pipeline: tracing, bearer token from
    /// `store`, forced logout through `navigator` on 401.
    pub fn new(
        config: &ClientConfig,
        store: SessionStore,
        navigator: Arc<dyn Navigator>,
    ) -> ClientResult<Self> {
        Self::builder(config)
            .request_interceptor(TracingInterceptor)
            .request_interceptor(BearerTokenInterceptor::new(store.clone()))
            .response_interceptor(TracingInterceptor)
            .response_interceptor(UnauthorizedInterceptor::new(
                store,
                navigator,
                config.login_path.clone(),
            ))
            .build()
    }

    /// Empty pipeline; add interceptors explicitly.
    pub fn builder(config: &ClientConfig) -> HttpClientBuilder {
        HttpClientBuilder {
            config: config.clone(),
            request_interceptors: Vec::new(),
            response_interceptors: Vec::new(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Absolute URL for an API path (leading slash optional)
    pub fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    /// Make a GET request
    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> ClientResult<T> {
        self.execute(self.request(Method::GET, path)).await
    }

    /// Make a POST request with JSON body
    pub async fn post<T: DeserializeOwned, B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
    ) -> ClientResult<T> {
        self.execute(self.request(Method::POST, path).json(body))
            .await
    }

    /// Make a POST request with a urlencoded form body
    pub async fn post_form<T: DeserializeOwned, B: Serialize + ?Sized>(
        &self,
        path: &str,
        form: &B,
    ) -> ClientResult<T> {
        self.execute(self.request(Method::POST, path).form(form))
            .await
    }

    /// Make a POST request without body
    pub async fn post_empty<T: DeserializeOwned>(&self, path: &str) -> ClientResult<T> {
        self.execute(self.request(Method::POST, path)).await
    }

    /// Make a PUT request with JSON body
    pub async fn put<T: DeserializeOwned, B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
    ) -> ClientResult<T> {
        self.execute(self.request(Method::PUT, path).json(body))
            .await
    }

    /// Make a DELETE request
    pub async fn delete<T: DeserializeOwned>(&self, path: &str) -> ClientResult<T> {
        self.execute(self.request(Method::DELETE, path)).await
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        self.client.request(method, self.url(path))
    }

    async fn execute<T: DeserializeOwned>(&self, builder: RequestBuilder) -> ClientResult<T> {
        let mut request = builder.build()?;
        for interceptor in self.request_interceptors.iter() {
            interceptor.on_request(&mut request)?;
        }

        let mut exchange = Exchange {
            method: request.method().clone(),
            url: request.url().clone(),
            status: None,
        };

        let result = match self.client.execute(request).await {
            Ok(response) => {
                exchange.status = Some(response.status());
                Self::handle_response(response).await
            }
            Err(e) => Err(ClientError::Network(e)),
        };

        match result {
            Ok(value) => {
                for interceptor in self.response_interceptors.iter() {
                    interceptor.on_response(&exchange);
                }
                Ok(value)
            }
            Err(error) => Err(self
                .response_interceptors
                .iter()
                .fold(error, |error, interceptor| {
                    interceptor.on_error(&exchange, error)
                })),
        }
    }

    /// Handle the HTTP response
    async fn handle_response<T: DeserializeOwned>(response: Response) -> ClientResult<T> {
        let status = response.status();
        let body = response.bytes().await?;

        if !status.is_success() {
            let text = String::from_utf8_lossy(&body);
            return Err(ClientError::from_status(status, &text));
        }

        // Some endpoints answer 204 / empty; let `T = ()` or `Option<_>` accept it
        let body: &[u8] = if body.is_empty() { b"null" } else { &body };
        serde_json::from_slice(body).map_err(|e| ClientError::InvalidResponse(e.to_string()))
    }
}

/// Builder for an [`HttpClient`] with a custom interceptor list.
pub struct HttpClientBuilder {
    config: ClientConfig,
    request_interceptors: Vec<Arc<dyn RequestInterceptor>>,
    response_interceptors: Vec<Arc<dyn ResponseInterceptor>>,
}

impl HttpClientBuilder {
    /// Append a request interceptor; runs after those already added.
    pub fn request_interceptor(mut self, interceptor: impl RequestInterceptor + 'static) -> Self {
        self.request_interceptors.push(Arc::new(interceptor));
        self
    }

    /// Append a response interceptor; runs after those already added.
    pub fn response_interceptor(mut self, interceptor: impl ResponseInterceptor + 'static) -> Self {
        self.response_interceptors.push(Arc::new(interceptor));
        self
    }

    pub fn build(self) -> ClientResult<HttpClient> {
        self.config.validate()?;

        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        let client = Client::builder()
            .timeout(self.config.timeout_duration())
            .default_headers(headers)
            .build()
            .map_err(|e| ClientError::Config(format!("Failed to create HTTP client: {e}")))?;

        Ok(HttpClient {
            client,
            base_url: self.config.base_url.trim_end_matches('/').to_string(),
            request_interceptors: self.request_interceptors.into(),
            response_interceptors: self.response_interceptors.into(),
        })
    }
}
