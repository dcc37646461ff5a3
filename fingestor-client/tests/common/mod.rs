// fingestor-client/tests/common/mod.rs
// In-process mock of the FinGestor backend

#![allow(dead_code)]

use axum::body::Bytes;
use axum::extract::{OriginalUri, Path, RawQuery, State};
use axum::http::header::AUTHORIZATION;
use axum::http::{HeaderMap, Method, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Form, Json, Router};
use serde::Deserialize;
use serde_json::{Value, json};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use fingestor_client::Navigator;

pub const ADMIN_EMAIL: &str = "admin@example.com";
pub const ADMIN_PASSWORD: &str = "admin123";
pub const CUSTOMER_ID: &str = "0b6f7c1e-3a52-4d8e-9f10-2c4d6e8fa001";
pub const COMPANY_ID: &str = "7c9e6679-7425-40de-944b-e07fc1f90ae7";
pub const TRANSACTION_ID: &str = "5d2a9c4e-6b1f-4e3a-8c7d-9e0f1a2b3c04";
pub const ACCOUNT_ID: &str = "3e4f5a6b-7c8d-4e9f-a0b1-c2d3e4f5a602";

/// One request that reached a resource route, as the backend saw it.
#[derive(Debug, Clone, PartialEq)]
pub struct Recorded {
    pub method: Method,
    /// Path below `/api/v1`
    pub path: String,
    pub query: Option<String>,
    pub token: Option<String>,
    pub body: Option<Value>,
}

/// What the mock saw, plus switches the tests flip.
#[derive(Default)]
pub struct MockState {
    /// Bearer token of every authenticated request, `None` when absent
    pub seen_tokens: Mutex<Vec<Option<String>>>,
    /// Raw query strings of list requests
    pub queries: Mutex<Vec<String>>,
    /// Reject every token, as after a secret rotation
    pub revoked: AtomicBool,
    pub me_calls: AtomicUsize,
    /// Requests answered by the resource catch-all
    pub recorded: Mutex<Vec<Recorded>>,
}

impl MockState {
    pub fn seen_tokens(&self) -> Vec<Option<String>> {
        self.seen_tokens.lock().unwrap().clone()
    }

    pub fn queries(&self) -> Vec<String> {
        self.queries.lock().unwrap().clone()
    }

    pub fn recorded(&self) -> Vec<Recorded> {
        self.recorded.lock().unwrap().clone()
    }

    /// The only recorded request; fails the test otherwise.
    pub fn single_request(&self) -> Recorded {
        let recorded = self.recorded();
        assert_eq!(recorded.len(), 1, "{recorded:?}");
        recorded[0].clone()
    }

    pub fn revoke(&self) {
        self.revoked.store(true, Ordering::SeqCst);
    }
}

/// Running mock backend
pub struct MockBackend {
    pub base_url: String,
    pub state: Arc<MockState>,
}

impl MockBackend {
    pub async fn start() -> Self {
        let state = Arc::new(MockState::default());
        let api = Router::<Arc<MockState>>::new()
            .route("/auth/login", post(login))
            .route("/auth/me", get(me))
            .route("/auth/register", post(register))
            .route("/auth/refresh", post(refresh))
            .route("/customers/", get(list_customers))
            .route("/customers/{id}", get(get_customer).delete(delete_customer))
            .route("/slow", get(slow));
        let app = Router::new()
            .nest("/api/v1", api)
            .fallback(resource)
            .with_state(state.clone());

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self {
            base_url: format!("http://{addr}/api/v1"),
            state,
        }
    }
}

/// Base URL of a port nothing listens on
pub async fn unreachable_base_url() -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    format!("http://{addr}/api/v1")
}

/// Location that never changes during a test, like a page that has not
/// finished reloading yet. Counts hard navigations.
#[derive(Default)]
pub struct StickyNavigator {
    pub navigations: AtomicUsize,
}

impl Navigator for StickyNavigator {
    fn current_path(&self) -> String {
        "/customers".to_string()
    }

    fn navigate(&self, _path: &str) {
        self.navigations.fetch_add(1, Ordering::SeqCst);
    }

    fn location_epoch(&self) -> u64 {
        0
    }
}

pub fn customer_json() -> Value {
    json!({
        "id": CUSTOMER_ID,
        "company_id": COMPANY_ID,
        "name": "Maria Silva",
        "document": "52998224725",
        "address": null,
        "phone": "11987654321",
        "email": "maria@example.com",
        "created_at": "2024-05-01T12:00:00Z",
        "updated_at": null
    })
}

// ============================================================================
// Handlers
// ============================================================================

fn detail(status: StatusCode, detail: impl Into<Value>) -> Response {
    (status, Json(json!({ "detail": detail.into() }))).into_response()
}

fn bearer(headers: &HeaderMap) -> Option<String> {
    headers
        .get(AUTHORIZATION)?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")
        .map(str::to_string)
}

fn authorize(state: &MockState, headers: &HeaderMap) -> Result<(), Response> {
    let token = bearer(headers);
    state.seen_tokens.lock().unwrap().push(token.clone());

    let valid = matches!(token.as_deref(), Some("abc") | Some("def"));
    if valid && !state.revoked.load(Ordering::SeqCst) {
        Ok(())
    } else {
        Err(detail(StatusCode::UNAUTHORIZED, "Could not validate credentials"))
    }
}

#[derive(Deserialize)]
struct LoginForm {
    username: String,
    password: String,
}

async fn login(Form(form): Form<LoginForm>) -> Response {
    match (form.username.as_str(), form.password.as_str()) {
        (ADMIN_EMAIL, ADMIN_PASSWORD) => {
            Json(json!({"access_token": "abc", "token_type": "bearer"})).into_response()
        }
        ("inactive@example.com", _) => detail(StatusCode::BAD_REQUEST, "Inactive user"),
        ("broken@example.com", _) => StatusCode::INTERNAL_SERVER_ERROR.into_response(),
        _ => detail(StatusCode::UNAUTHORIZED, "Incorrect email or password"),
    }
}

async fn me(State(state): State<Arc<MockState>>, headers: HeaderMap) -> Response {
    state.me_calls.fetch_add(1, Ordering::SeqCst);
    if let Err(rejection) = authorize(&state, &headers) {
        return rejection;
    }
    Json(json!({"id": 1, "name": "Admin"})).into_response()
}

async fn register(Json(body): Json<Value>) -> Response {
    let email = body["email"].as_str().unwrap_or_default();
    let password = body["password"].as_str().unwrap_or_default();
    if email == ADMIN_EMAIL {
        return detail(StatusCode::BAD_REQUEST, "Email already registered");
    }
    if password.len() < 6 {
        return detail(
            StatusCode::UNPROCESSABLE_ENTITY,
            json!([{
                "loc": ["body", "password"],
                "msg": "Password must be at least 6 characters long",
                "type": "value_error"
            }]),
        );
    }
    Json(json!({
        "id": 2,
        "email": email,
        "first_name": body["first_name"],
        "last_name": body["last_name"],
        "is_active": true,
        "role": "company_user"
    }))
    .into_response()
}

async fn refresh(State(state): State<Arc<MockState>>, headers: HeaderMap) -> Response {
    if let Err(rejection) = authorize(&state, &headers) {
        return rejection;
    }
    Json(json!({"access_token": "def", "token_type": "bearer"})).into_response()
}

async fn list_customers(
    State(state): State<Arc<MockState>>,
    headers: HeaderMap,
    RawQuery(query): RawQuery,
) -> Response {
    // keep requests in flight long enough to overlap
    tokio::time::sleep(Duration::from_millis(50)).await;
    if let Err(rejection) = authorize(&state, &headers) {
        return rejection;
    }
    state
        .queries
        .lock()
        .unwrap()
        .push(query.unwrap_or_default());
    Json(json!([customer_json()])).into_response()
}

async fn get_customer(
    State(state): State<Arc<MockState>>,
    headers: HeaderMap,
    Path(id): Path<String>,
) -> Response {
    if let Err(rejection) = authorize(&state, &headers) {
        return rejection;
    }
    if id == CUSTOMER_ID {
        Json(customer_json()).into_response()
    } else {
        detail(StatusCode::NOT_FOUND, "Customer not found")
    }
}

async fn delete_customer(
    State(state): State<Arc<MockState>>,
    headers: HeaderMap,
    Path(_id): Path<String>,
) -> Response {
    if let Err(rejection) = authorize(&state, &headers) {
        return rejection;
    }
    Json(json!({"message": "Customer deleted successfully"})).into_response()
}

async fn slow() -> Response {
    tokio::time::sleep(Duration::from_secs(3)).await;
    Json(json!({})).into_response()
}

/// Suppliers, financial and dashboard routes: record the request and
/// answer with a fixture for the resource.
async fn resource(
    State(state): State<Arc<MockState>>,
    method: Method,
    OriginalUri(uri): OriginalUri,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    let Some(path) = uri.path().strip_prefix("/api/v1") else {
        return StatusCode::NOT_FOUND.into_response();
    };
    if let Err(rejection) = authorize(&state, &headers) {
        return rejection;
    }
    state.recorded.lock().unwrap().push(Recorded {
        method: method.clone(),
        path: path.to_string(),
        query: uri.query().map(str::to_string),
        token: bearer(&headers),
        body: serde_json::from_slice(&body).ok(),
    });

    let payload = match (method.as_str(), path) {
        ("GET", "/suppliers/") => json!([supplier_json()]),
        ("POST", "/suppliers/") => supplier_json(),
        ("PUT", p) if p.starts_with("/suppliers/") => supplier_json(),
        ("DELETE", p) if p.starts_with("/suppliers/") => {
            json!({"message": "Supplier deleted successfully"})
        }
        ("GET", "/financial/accounts/") => json!([account_json()]),
        ("GET", "/financial/transactions/") => json!([transaction_json("pending")]),
        ("POST", p) if p.starts_with("/financial/transactions/") && p.ends_with("/pay") => {
            transaction_json("paid")
        }
        ("GET", "/financial/cost_centers/") => json!([cost_center_json()]),
        ("POST", "/financial/cost_centers/") => cost_center_json(),
        ("POST", "/financial/taxes/simulate") => tax_simulation_json(),
        ("GET", "/financial/taxes/simulations/") => json!([tax_simulation_json()]),
        ("GET", "/dashboard/kpis") => kpis_json(),
        _ => return detail(StatusCode::NOT_FOUND, "Not Found"),
    };
    Json(payload).into_response()
}

pub fn supplier_json() -> Value {
    json!({
        "id": "9a8b7c6d-5e4f-4a3b-8c2d-1e0f9a8b7c01",
        "company_id": COMPANY_ID,
        "name": "Distribuidora Alfa",
        "document": "11222333000181",
        "address": "Rua das Flores, 100",
        "phone": null,
        "email": "contato@alfa.com.br",
        "created_at": "2024-05-02T09:30:00Z",
        "updated_at": null
    })
}

fn account_json() -> Value {
    json!({
        "id": ACCOUNT_ID,
        "company_id": COMPANY_ID,
        "name": "Conta Corrente",
        "type": "bank",
        "balance": 2500.5,
        "created_at": "2024-01-10T08:00:00Z",
        "updated_at": null
    })
}

fn transaction_json(status: &str) -> Value {
    let payment_date = if status == "paid" {
        json!("2024-06-10")
    } else {
        Value::Null
    };
    json!({
        "id": TRANSACTION_ID,
        "company_id": COMPANY_ID,
        "account_id": ACCOUNT_ID,
        "type": "expense",
        "description": "Aluguel",
        "amount": 3200.0,
        "due_date": "2024-06-10",
        "payment_date": payment_date,
        "status": status,
        "category_id": null,
        "cost_center_id": null,
        "is_recurring": true,
        "recurrence_id": null,
        "created_at": "2024-05-01T12:00:00Z",
        "updated_at": null
    })
}

fn cost_center_json() -> Value {
    json!({
        "id": "6f7a8b9c-0d1e-4f2a-b3c4-d5e6f7a8b903",
        "company_id": COMPANY_ID,
        "name": "Administrativo",
        "created_at": "2024-01-10T08:00:00Z",
        "updated_at": null
    })
}

fn tax_simulation_json() -> Value {
    json!({
        "id": "2b1f5d0e-8a47-4a52-9a43-6f3b0d1c2e01",
        "company_id": COMPANY_ID,
        "revenue": 500000.0,
        "tax_regime": "simples_nacional",
        "simulated_taxes": {
            "regime": "Simples Nacional",
            "annual_revenue": 500000.0,
            "tax_rate": 6.0,
            "total_tax": 30000.0,
            "net_income": 470000.0,
            "monthly_tax": 2500.0,
            "breakdown": {"das": 30000.0}
        },
        "created_at": "2024-06-01T10:00:00Z",
        "updated_at": null
    })
}

fn kpis_json() -> Value {
    json!({
        "financial_kpis": {
            "revenue": {"current": 12000.0, "previous": 10000.0, "variation": 20.0},
            "expenses": {"current": 8000.0, "previous": 8000.0, "variation": 0.0},
            "profit": {"current": 4000.0, "previous": 2000.0, "variation": 100.0},
            "margin": {"current": 33.3, "previous": 20.0, "variation": 13.3},
            "accounts_receivable": 1500.0,
            "accounts_payable": 900.0,
            "projected_cash_flow": 600.0
        },
        "counters": {"customers": 1, "suppliers": 1, "invoices": 0, "billings": 0},
        "period": {"current_month": "2024-06", "previous_month": "2024-05"}
    })
}
