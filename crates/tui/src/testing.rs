//! In-process ledger API used by the client and sync tests.
//!
//! Serves the same routes as the real backend under `/api`, counts hits per
//! route and can be told to fail or hold back individual routes.

use std::{
    collections::HashMap,
    net::SocketAddr,
    sync::{
        Arc, Mutex,
        atomic::{AtomicBool, Ordering},
    },
};

use api_types::{
    balance::Balance,
    expense::{Expense, ExpenseNew},
    settlement::Settlement,
};
use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{delete, get},
};
use chrono::Utc;
use serde_json::json;
use tokio::sync::Notify;
use uuid::Uuid;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Route {
    Root,
    ListExpenses,
    CreateExpense,
    DeleteExpense,
    Balances,
    Settlements,
}

#[derive(Clone, Copy, Debug)]
enum Failure {
    /// 500 with a `detail` message.
    Detail,
    /// 500 with an empty JSON object.
    Bare,
}

#[derive(Default)]
struct MockState {
    expenses: Mutex<Vec<Expense>>,
    balances: Mutex<Vec<Balance>>,
    settlements: Mutex<Vec<Settlement>>,
    hits: Mutex<HashMap<Route, usize>>,
    failures: Mutex<HashMap<Route, Failure>>,
    gates: Mutex<HashMap<Route, Arc<Notify>>>,
    /// Answer POST /expenses with the bare record and a naive timestamp.
    bare_create: AtomicBool,
}

impl MockState {
    /// Records the hit, waits on the route gate and returns the canned failure, if any.
    async fn enter(&self, route: Route) -> Option<Response> {
        *self.hits.lock().unwrap().entry(route).or_default() += 1;

        let gate = self.gates.lock().unwrap().get(&route).cloned();
        if let Some(gate) = gate {
            gate.notified().await;
        }

        let failure = self.failures.lock().unwrap().get(&route).copied();
        failure.map(|failure| {
            let body = match failure {
                Failure::Detail => json!({ "detail": format!("{route:?} unavailable") }),
                Failure::Bare => json!({}),
            };
            (StatusCode::INTERNAL_SERVER_ERROR, Json(body)).into_response()
        })
    }
}

pub struct MockLedger {
    addr: SocketAddr,
    state: Arc<MockState>,
}

impl MockLedger {
    pub async fn spawn() -> Self {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let state = Arc::new(MockState::default());
        let app = router(state.clone());

        tokio::spawn(async move {
            let _ = axum::serve(listener, app).await;
        });

        Self { addr, state }
    }

    pub fn base_url(&self) -> String {
        format!("http://{}/api", self.addr)
    }

    pub fn hits(&self, route: Route) -> usize {
        self.state
            .hits
            .lock()
            .unwrap()
            .get(&route)
            .copied()
            .unwrap_or(0)
    }

    pub fn total_hits(&self) -> usize {
        self.state.hits.lock().unwrap().values().sum()
    }

    pub fn fail(&self, route: Route) {
        self.state.failures.lock().unwrap().insert(route, Failure::Detail);
    }

    pub fn fail_silently(&self, route: Route) {
        self.state.failures.lock().unwrap().insert(route, Failure::Bare);
    }

    pub fn recover(&self, route: Route) {
        self.state.failures.lock().unwrap().remove(&route);
    }

    pub fn reply_bare_expense(&self) {
        self.state.bare_create.store(true, Ordering::SeqCst);
    }

    /// Holds every request on `route` until the returned gate is notified.
    pub fn hold(&self, route: Route) -> Arc<Notify> {
        let gate = Arc::new(Notify::new());
        self.state.gates.lock().unwrap().insert(route, gate.clone());
        gate
    }

    pub fn seed_expense(&self, amount: f64, description: &str, paid_by: &str) -> Expense {
        let expense = new_expense(ExpenseNew {
            amount,
            description: description.to_string(),
            paid_by: paid_by.to_string(),
        });
        self.state.expenses.lock().unwrap().push(expense.clone());
        expense
    }

    pub fn expenses(&self) -> Vec<Expense> {
        self.state.expenses.lock().unwrap().clone()
    }

    pub fn set_balances(&self, balances: Vec<Balance>) {
        *self.state.balances.lock().unwrap() = balances;
    }

    pub fn set_settlements(&self, settlements: Vec<Settlement>) {
        *self.state.settlements.lock().unwrap() = settlements;
    }
}

/// Base URL of a port nobody listens on.
pub async fn unreachable_base_url() -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    format!("http://{addr}/api")
}

pub fn balance(person: &str, total_paid: f64, total_share: f64) -> Balance {
    Balance {
        person: person.to_string(),
        total_paid,
        total_share,
        balance: total_paid - total_share,
    }
}

pub fn settlement(from: &str, to: &str, amount: f64) -> Settlement {
    Settlement {
        from_person: from.to_string(),
        to_person: to.to_string(),
        amount,
    }
}

fn new_expense(payload: ExpenseNew) -> Expense {
    let now = Utc::now().fixed_offset();
    Expense {
        id: Uuid::new_v4().to_string(),
        amount: (payload.amount * 100.0).round() / 100.0,
        description: payload.description.trim().to_string(),
        paid_by: payload.paid_by.trim().to_string(),
        created_at: now,
        updated_at: Some(now),
    }
}

fn router(state: Arc<MockState>) -> Router {
    Router::new()
        .route("/api/", get(root))
        .route("/api/expenses", get(list_expenses).post(create_expense))
        .route("/api/expenses/{id}", delete(delete_expense))
        .route("/api/balances", get(list_balances))
        .route("/api/settlements", get(list_settlements))
        .with_state(state)
}

async fn root(State(state): State<Arc<MockState>>) -> Response {
    if let Some(res) = state.enter(Route::Root).await {
        return res;
    }
    Json(json!({ "success": true, "message": "Split App Backend API is running" })).into_response()
}

async fn list_expenses(State(state): State<Arc<MockState>>) -> Response {
    if let Some(res) = state.enter(Route::ListExpenses).await {
        return res;
    }
    let expenses = state.expenses.lock().unwrap().clone();
    let count = expenses.len();
    Json(json!({
        "success": true,
        "data": { "expenses": expenses, "count": count },
        "message": "Expenses retrieved successfully",
    }))
    .into_response()
}

async fn create_expense(
    State(state): State<Arc<MockState>>,
    Json(payload): Json<ExpenseNew>,
) -> Response {
    if let Some(res) = state.enter(Route::CreateExpense).await {
        return res;
    }
    if payload.amount <= 0.0 {
        return (
            StatusCode::BAD_REQUEST,
            Json(json!({ "detail": "Amount must be positive" })),
        )
            .into_response();
    }
    let expense = new_expense(payload);
    state.expenses.lock().unwrap().push(expense.clone());
    if state.bare_create.load(Ordering::SeqCst) {
        let body = json!({
            "id": expense.id,
            "amount": expense.amount,
            "description": expense.description,
            "paid_by": expense.paid_by,
            "created_at": expense.created_at.naive_utc().format("%Y-%m-%dT%H:%M:%S").to_string(),
        });
        return (StatusCode::CREATED, Json(body)).into_response();
    }
    (
        StatusCode::CREATED,
        Json(json!({
            "success": true,
            "data": expense,
            "message": "Expense added successfully",
        })),
    )
        .into_response()
}

async fn delete_expense(State(state): State<Arc<MockState>>, Path(id): Path<String>) -> Response {
    if let Some(res) = state.enter(Route::DeleteExpense).await {
        return res;
    }
    let mut expenses = state.expenses.lock().unwrap();
    let before = expenses.len();
    expenses.retain(|expense| expense.id != id);
    if expenses.len() == before {
        return (
            StatusCode::NOT_FOUND,
            Json(json!({ "detail": "Expense not found" })),
        )
            .into_response();
    }
    Json(json!({ "success": true, "message": "Expense deleted successfully" })).into_response()
}

async fn list_balances(State(state): State<Arc<MockState>>) -> Response {
    if let Some(res) = state.enter(Route::Balances).await {
        return res;
    }
    let balances = state.balances.lock().unwrap().clone();
    Json(json!({ "success": true, "data": { "balances": balances } })).into_response()
}

async fn list_settlements(State(state): State<Arc<MockState>>) -> Response {
    if let Some(res) = state.enter(Route::Settlements).await {
        return res;
    }
    let settlements = state.settlements.lock().unwrap().clone();
    Json(json!({ "success": true, "data": { "settlements": settlements } })).into_response()
}
