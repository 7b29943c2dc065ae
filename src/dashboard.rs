//! The dashboard page with a summary of spending, the latest expenses and a
//! quick-add form.

use std::sync::{Arc, Mutex};

use axum::{
    extract::{FromRef, State},
    response::{IntoResponse, Response},
};
use maud::{Markup, html};
use rusqlite::Connection;
use time::Date;

use crate::{
    AppState, Error, endpoints,
    expense::{
        Expense, count_expenses, expense_form, expense_table, get_recent_expenses,
        get_total_amount,
    },
    html::{PAGE_CONTAINER_STYLE, base, dollar_input_styles, format_currency, link},
    navigation::NavBar,
    timezone::get_local_date,
};

/// The number of expenses shown in the dashboard's recent expenses table.
const DASHBOARD_RECENT_LIMIT: u32 = 3;

/// The state needed for displaying the dashboard page.
#[derive(Debug, Clone)]
pub struct DashboardState {
    /// The database connection for reading expenses.
    pub db_connection: Arc<Mutex<Connection>>,
    /// The local timezone as a canonical timezone name, e.g. "Pacific/Auckland".
    pub local_timezone: String,
}

impl FromRef<AppState> for DashboardState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
            local_timezone: state.local_timezone.clone(),
        }
    }
}

/// Aggregate figures over every expense.
#[derive(Debug, Clone, PartialEq)]
struct SpendingSummary {
    total: f64,
    transactions: u32,
    /// The mean amount per expense, zero when there are no expenses.
    avg_per_day: f64,
}

impl SpendingSummary {
    fn new(total: f64, transactions: u32) -> Self {
        let avg_per_day = if transactions > 0 {
            total / f64::from(transactions)
        } else {
            0.0
        };

        Self {
            total,
            transactions,
            avg_per_day,
        }
    }
}

/// Display a page with an overview of the user's spending.
pub async fn get_dashboard_page(State(state): State<DashboardState>) -> Result<Response, Error> {
    let today = get_local_date(&state.local_timezone)?;

    let connection = state
        .db_connection
        .lock()
        .inspect_err(|error| tracing::error!("could not acquire database lock: {error}"))
        .map_err(|_| Error::DatabaseLockError)?;

    let total = get_total_amount(&connection)
        .inspect_err(|error| tracing::error!("could not get total amount: {error}"))?;
    let transactions = count_expenses(&connection)
        .inspect_err(|error| tracing::error!("could not count expenses: {error}"))?;
    let recent = get_recent_expenses(DASHBOARD_RECENT_LIMIT, &connection)
        .inspect_err(|error| tracing::error!("could not get recent expenses: {error}"))?;

    let summary = SpendingSummary::new(total, transactions);

    Ok(dashboard_view(&summary, &recent, today).into_response())
}

fn summary_card(id: &str, label: &str, value: &str) -> Markup {
    html! {
        div
            id=(id)
            class="p-6 bg-white border border-gray-200 rounded-lg shadow-sm
                dark:bg-gray-800 dark:border-gray-700"
        {
            p class="text-sm text-gray-500 dark:text-gray-400" { (label) }
            p class="text-2xl font-bold" data-value { (value) }
        }
    }
}

fn dashboard_view(summary: &SpendingSummary, recent: &[Expense], today: Date) -> Markup {
    let nav_bar = NavBar::new(endpoints::DASHBOARD_VIEW).into_html();

    let content = html! {
        (nav_bar)

        div class=(PAGE_CONTAINER_STYLE)
        {
            section class="w-full max-w-4xl grid grid-cols-1 md:grid-cols-3 gap-4 mb-8"
            {
                (summary_card("total-spent", "Total Spent", &format_currency(summary.total)))
                (summary_card("transaction-count", "Transactions", &summary.transactions.to_string()))
                (summary_card("average-spent", "Average per Expense", &format_currency(summary.avg_per_day)))
            }

            div class="w-full max-w-4xl grid grid-cols-1 lg:grid-cols-2 gap-8"
            {
                section id="recent-expenses"
                {
                    div class="flex justify-between items-baseline mb-4"
                    {
                        h2 class="text-xl font-bold" { "Recent Expenses" }
                        (link(endpoints::RECENT_VIEW, "View all"))
                    }

                    @if recent.is_empty() {
                        p { "No expenses yet. Use the form to add one." }
                    } @else {
                        (expense_table(recent, false))
                    }
                }

                section id="quick-add"
                {
                    h2 class="text-xl font-bold mb-4" { "Quick Add" }
                    (expense_form(today, None))
                }
            }
        }
    };

    base("Dashboard", &[dollar_input_styles()], &content)
}
