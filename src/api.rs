//! Read-only JSON endpoints used by the charts page and other clients.

use std::sync::{Arc, Mutex};

use axum::{
    Json,
    extract::{FromRef, State},
    response::{IntoResponse, Response},
};
use rusqlite::Connection;
use serde::Serialize;

use crate::{
    AppState, Error,
    database_id::ExpenseId,
    expense::{Expense, get_category_totals, get_recent_expenses},
};

/// The maximum number of expenses returned by the recent expenses API.
const RECENT_API_LIMIT: u32 = 10;

/// The state needed for the JSON API.
#[derive(Debug, Clone)]
pub struct ApiState {
    pub db_connection: Arc<Mutex<Connection>>,
}

impl FromRef<AppState> for ApiState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
        }
    }
}

/// The JSON representation of an expense.
#[derive(Debug, Serialize)]
struct ExpenseJson {
    id: ExpenseId,
    category: String,
    amount: f64,
    description: Option<String>,
    /// The date formatted as `YYYY-MM-DD`.
    date: String,
}

impl From<Expense> for ExpenseJson {
    fn from(expense: Expense) -> Self {
        Self {
            id: expense.id,
            category: expense.category,
            amount: expense.amount,
            description: expense.description,
            date: expense.date.to_string(),
        }
    }
}

/// Get the total amount spent per category as a JSON array of
/// `{"category": ..., "value": ...}` objects.
pub async fn get_summary_api(State(state): State<ApiState>) -> Response {
    let totals = state
        .db_connection
        .lock()
        .inspect_err(|error| tracing::error!("could not acquire database lock: {error}"))
        .map_err(|_| Error::DatabaseLockError)
        .and_then(|connection| get_category_totals(&connection));

    match totals {
        Ok(totals) => Json(totals).into_response(),
        Err(error) => error.into_json_response(),
    }
}

/// Get the most recent expenses, newest first, as a JSON array.
pub async fn get_recent_api(State(state): State<ApiState>) -> Response {
    let expenses = state
        .db_connection
        .lock()
        .inspect_err(|error| tracing::error!("could not acquire database lock: {error}"))
        .map_err(|_| Error::DatabaseLockError)
        .and_then(|connection| get_recent_expenses(RECENT_API_LIMIT, &connection));

    match expenses {
        Ok(expenses) => Json(
            expenses
                .into_iter()
                .map(ExpenseJson::from)
                .collect::<Vec<_>>(),
        )
        .into_response(),
        Err(error) => error.into_json_response(),
    }
}
