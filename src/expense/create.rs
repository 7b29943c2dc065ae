//! The add expense page and endpoint.

use std::sync::{Arc, Mutex};

use axum::{
    extract::{FromRef, Query, State},
    response::{IntoResponse, Response},
};
use axum_extra::extract::Form;
use maud::{Markup, html};
use rusqlite::Connection;
use serde::Deserialize;
use time::{Date, macros::format_description};

use crate::{
    AppState, Error, endpoints,
    expense::{NewExpense, ValidationError, create_expense, form::expense_form},
    html::{FORM_CONTAINER_STYLE, base, dollar_input_styles},
    navigation::NavBar,
    routing::redirect_found,
    timezone::get_local_date,
};

/// The state needed for the add expense page and endpoint.
#[derive(Debug, Clone)]
pub struct CreateExpenseState {
    pub db_connection: Arc<Mutex<Connection>>,
    pub local_timezone: String,
}

impl FromRef<AppState> for CreateExpenseState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
            local_timezone: state.local_timezone.clone(),
        }
    }
}

/// The query string of the add expense page.
#[derive(Debug, Default, Deserialize)]
pub struct AddExpenseQuery {
    /// A [ValidationError] code from a rejected submission.
    pub error: Option<String>,
}

/// The raw form data for a new expense.
///
/// Every field is optional so that missing fields are reported as
/// validation errors rather than rejected by the extractor.
#[derive(Debug, Default, Deserialize)]
pub struct ExpenseFormData {
    pub category: Option<String>,
    pub amount: Option<String>,
    pub description: Option<String>,
    /// The date formatted as `YYYY-MM-DD`.
    pub date: Option<String>,
}

/// Render the page for adding an expense.
pub async fn get_add_expense_page(
    State(state): State<CreateExpenseState>,
    Query(query): Query<AddExpenseQuery>,
) -> Result<Response, Error> {
    let today = get_local_date(&state.local_timezone)?;
    let error_message = query
        .error
        .as_deref()
        .and_then(ValidationError::message_for_code);

    Ok(add_expense_view(today, error_message).into_response())
}

/// Handle the add expense form submission.
///
/// Redirects to the recent expenses page on success, or back to the add
/// expense page with an error code if the submission is rejected.
pub async fn create_expense_endpoint(
    State(state): State<CreateExpenseState>,
    Form(form): Form<ExpenseFormData>,
) -> Result<Response, Error> {
    let date = match form.date.as_deref().map(str::trim) {
        Some(date) if !date.is_empty() => parse_date(date)?,
        _ => get_local_date(&state.local_timezone)?,
    };

    let amount = form
        .amount
        .as_deref()
        .and_then(|amount| amount.trim().parse::<f64>().ok());

    let new_expense = match NewExpense::new(
        form.category.as_deref().unwrap_or_default(),
        amount,
        form.description.as_deref().unwrap_or_default(),
        date,
    ) {
        Ok(new_expense) => new_expense,
        Err(error) => {
            tracing::warn!("Rejected expense submission: {error}");
            return Ok(redirect_found(&format!(
                "{}?error={}",
                endpoints::ADD_EXPENSE,
                error.code()
            )));
        }
    };

    let connection = state
        .db_connection
        .lock()
        .inspect_err(|error| tracing::error!("could not acquire database lock: {error}"))
        .map_err(|_| Error::DatabaseLockError)?;

    let expense = create_expense(new_expense, &connection)
        .inspect_err(|error| tracing::error!("could not create expense: {error}"))?;

    tracing::info!(
        "Created expense {}: {} {} on {}",
        expense.id,
        expense.category,
        expense.amount,
        expense.date
    );

    Ok(redirect_found(endpoints::RECENT_VIEW))
}

fn parse_date(text: &str) -> Result<Date, Error> {
    Date::parse(text, format_description!("[year]-[month]-[day]"))
        .inspect_err(|error| tracing::warn!("could not parse date {text:?}: {error}"))
        .map_err(|_| Error::InvalidDateFormat(text.to_owned()))
}

fn add_expense_view(today: Date, error_message: Option<&str>) -> Markup {
    let nav_bar = NavBar::new(endpoints::ADD_EXPENSE).into_html();
    let form = expense_form(today, error_message);

    let content = html! {
        (nav_bar)

        div class=(FORM_CONTAINER_STYLE)
        {
            h2 class="text-xl font-bold mb-4" { "Add Expense" }

            (form)
        }
    };

    base("Add Expense", &[dollar_input_styles()], &content)
}

#[cfg(test)]
mod add_expense_page_tests {
    use std::sync::{Arc, Mutex};

    use axum::extract::{Query, State};
    use time::OffsetDateTime;

    use crate::{
        endpoints,
        expense::ValidationError,
        test_utils::{
            assert_content_type, assert_form_action, assert_form_error_message,
            assert_form_input_with_value, assert_status_ok, assert_valid_html,
            get_test_connection, must_get_form, parse_html_document,
        },
    };

    use super::{AddExpenseQuery, CreateExpenseState, get_add_expense_page};

    fn get_state() -> CreateExpenseState {
        CreateExpenseState {
            db_connection: Arc::new(Mutex::new(get_test_connection())),
            local_timezone: "Etc/UTC".to_owned(),
        }
    }

    #[tokio::test]
    async fn render_page() {
        let response = get_add_expense_page(State(get_state()), Query(AddExpenseQuery::default()))
            .await
            .unwrap();

        assert_status_ok(&response);
        assert_content_type(&response, "text/html; charset=utf-8");

        let html = parse_html_document(response).await;
        assert_valid_html(&html);

        let form = must_get_form(&html);
        assert_form_action(&form, endpoints::ADD_EXPENSE, "post");
        let today = OffsetDateTime::now_utc().date().to_string();
        assert_form_input_with_value(&form, "date", "date", &today);
    }

    #[tokio::test]
    async fn shows_validation_error_from_query() {
        let query = AddExpenseQuery {
            error: Some(ValidationError::EmptyCategory.code().to_owned()),
        };

        let response = get_add_expense_page(State(get_state()), Query(query))
            .await
            .unwrap();

        let html = parse_html_document(response).await;
        let form = must_get_form(&html);
        assert_form_error_message(&form, "Choose a category for the expense.");
    }

    #[tokio::test]
    async fn ignores_unknown_error_code() {
        let query = AddExpenseQuery {
            error: Some("<script>".to_owned()),
        };

        let response = get_add_expense_page(State(get_state()), Query(query))
            .await
            .unwrap();

        let html = parse_html_document(response).await;
        let error_selector = scraper::Selector::parse("p.text-red-500").unwrap();
        assert_eq!(html.select(&error_selector).count(), 0);
    }

    #[tokio::test]
    async fn invalid_timezone_is_an_error() {
        let mut state = get_state();
        state.local_timezone = "Not/AZone".to_owned();

        let result = get_add_expense_page(State(state), Query(AddExpenseQuery::default())).await;

        assert!(result.is_err());
    }
}
