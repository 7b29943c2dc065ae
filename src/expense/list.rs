//! The recent expenses page.

use std::sync::{Arc, Mutex};

use axum::{
    extract::{FromRef, State},
    response::{IntoResponse, Response},
};
use maud::{Markup, html};
use rusqlite::Connection;

use crate::{
    AppState, Error,
    endpoints::{self, format_endpoint},
    expense::{Expense, get_recent_expenses},
    html::{
        BUTTON_DELETE_STYLE, CATEGORY_BADGE_STYLE, PAGE_CONTAINER_STYLE, TABLE_CELL_STYLE,
        TABLE_HEADER_STYLE, TABLE_ROW_STYLE, base, format_currency, link,
    },
    navigation::NavBar,
};

/// The maximum number of expenses shown on the recent expenses page.
const RECENT_PAGE_LIMIT: u32 = 50;

/// The state needed for the recent expenses page.
#[derive(Debug, Clone)]
pub struct RecentPageState {
    pub db_connection: Arc<Mutex<Connection>>,
}

impl FromRef<AppState> for RecentPageState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
        }
    }
}

/// Render the most recent expenses with a delete button for each.
pub async fn get_recent_page(State(state): State<RecentPageState>) -> Result<Response, Error> {
    let connection = state
        .db_connection
        .lock()
        .inspect_err(|error| tracing::error!("could not acquire database lock: {error}"))
        .map_err(|_| Error::DatabaseLockError)?;

    let expenses = get_recent_expenses(RECENT_PAGE_LIMIT, &connection)
        .inspect_err(|error| tracing::error!("could not get recent expenses: {error}"))?;

    Ok(recent_view(&expenses).into_response())
}

fn recent_view(expenses: &[Expense]) -> Markup {
    let nav_bar = NavBar::new(endpoints::RECENT_VIEW).into_html();

    let content = html! {
        (nav_bar)

        div class=(PAGE_CONTAINER_STYLE)
        {
            div class="relative overflow-x-auto shadow-md sm:rounded-lg w-full max-w-4xl"
            {
                h2 class="text-xl font-bold mb-4" { "Recent Transactions" }

                @if expenses.is_empty() {
                    p
                    {
                        "No expenses yet. "
                        (link(endpoints::ADD_EXPENSE, "Add your first expense"))
                        "."
                    }
                } @else {
                    (expense_table(expenses, true))
                }
            }
        }
    };

    base("Recent Transactions", &[], &content)
}

/// Render a table of expenses.
///
/// If `with_delete_buttons` is set, each row gets a form that posts to the
/// delete endpoint for that expense.
pub(crate) fn expense_table(expenses: &[Expense], with_delete_buttons: bool) -> Markup {
    html! {
        table class="w-full text-sm text-left rtl:text-right text-gray-500 dark:text-gray-400"
        {
            thead class=(TABLE_HEADER_STYLE)
            {
                tr
                {
                    th scope="col" class=(TABLE_CELL_STYLE) { "Date" }
                    th scope="col" class=(TABLE_CELL_STYLE) { "Category" }
                    th scope="col" class=(TABLE_CELL_STYLE) { "Description" }
                    th scope="col" class="px-6 py-4 text-right" { "Amount" }

                    @if with_delete_buttons {
                        th scope="col" class=(TABLE_CELL_STYLE)
                        {
                            span class="sr-only" { "Actions" }
                        }
                    }
                }
            }

            tbody
            {
                @for expense in expenses {
                    tr class=(TABLE_ROW_STYLE) data-expense-id=(expense.id)
                    {
                        td class=(TABLE_CELL_STYLE) { (expense.date) }
                        td class=(TABLE_CELL_STYLE)
                        {
                            span class=(CATEGORY_BADGE_STYLE) { (expense.category) }
                        }
                        td class=(TABLE_CELL_STYLE)
                        {
                            (expense.description.as_deref().unwrap_or_default())
                        }
                        td class="px-6 py-4 text-right" { (format_currency(expense.amount)) }

                        @if with_delete_buttons {
                            td class=(TABLE_CELL_STYLE)
                            {
                                form
                                    method="post"
                                    action=(format_endpoint(endpoints::DELETE_EXPENSE, expense.id))
                                {
                                    button type="submit" class=(BUTTON_DELETE_STYLE) { "Delete" }
                                }
                            }
                        }
                    }
                }
            }
        }
    }
}
