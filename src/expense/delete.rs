//! Expense deletion endpoint.

use std::sync::{Arc, Mutex};

use axum::{
    extract::{FromRef, Path, State},
    http::{HeaderMap, header::REFERER},
    response::Response,
};
use rusqlite::Connection;

use crate::{
    AppState, Error,
    database_id::ExpenseId,
    endpoints,
    expense::{delete_expense, get_expense},
    routing::redirect_found,
};

/// The state needed for deleting an expense.
#[derive(Debug, Clone)]
pub struct DeleteExpenseState {
    pub db_connection: Arc<Mutex<Connection>>,
}

impl FromRef<AppState> for DeleteExpenseState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
        }
    }
}

/// Handle expense deletion.
///
/// Redirects back to the page the request came from, falling back to the
/// recent expenses page. Responds with the 404 page if the expense does not exist.
pub async fn delete_expense_endpoint(
    Path(expense_id): Path<ExpenseId>,
    State(state): State<DeleteExpenseState>,
    headers: HeaderMap,
) -> Result<Response, Error> {
    let connection = state
        .db_connection
        .lock()
        .inspect_err(|error| tracing::error!("could not acquire database lock: {error}"))
        .map_err(|_| Error::DatabaseLockError)?;

    let expense = match get_expense(expense_id, &connection) {
        Ok(expense) => expense,
        Err(Error::NotFound) => {
            tracing::warn!("Tried to delete expense {expense_id} which does not exist");
            return Err(Error::DeleteMissingExpense);
        }
        Err(error) => {
            tracing::error!("Could not look up expense {expense_id} for deletion: {error}");
            return Err(error);
        }
    };

    let rows_affected = delete_expense(expense_id, &connection).inspect_err(|error| {
        tracing::error!("An unexpected error occurred while deleting expense {expense_id}: {error}")
    })?;

    if rows_affected == 0 {
        tracing::warn!("Expense {expense_id} was already deleted");
        return Err(Error::DeleteMissingExpense);
    }

    tracing::info!(
        "Deleted expense {}: {} {} on {}",
        expense.id,
        expense.category,
        expense.amount,
        expense.date
    );

    let redirect_url = headers
        .get(REFERER)
        .and_then(|referer| referer.to_str().ok())
        .filter(|referer| !referer.is_empty())
        .unwrap_or(endpoints::RECENT_VIEW);

    Ok(redirect_found(redirect_url))
}
