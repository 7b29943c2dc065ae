//! Defines the core data models and database queries for expenses.

use rusqlite::{Connection, Row};
use serde::Serialize;
use time::Date;

use crate::{Error, database_id::ExpenseId};

// ============================================================================
// MODELS
// ============================================================================

/// Category labels offered by the expense forms.
///
/// These are suggestions only, the database accepts any non-empty category.
pub const SUGGESTED_CATEGORIES: [&str; 5] =
    ["Food & Dining", "Transport", "Shopping", "Bills", "Other"];

/// Money spent on something on a particular day.
///
/// To create a new `Expense`, validate the input with [NewExpense::new] and
/// then call [create_expense].
#[derive(Debug, Clone, PartialEq)]
pub struct Expense {
    /// The ID of the expense.
    pub id: ExpenseId,
    /// A free-text label used to group expenses, e.g. "Transport".
    pub category: String,
    /// The amount of money spent, always greater than zero.
    pub amount: f64,
    /// What the money was spent on.
    ///
    /// Rows created by the app always have a description, which may be empty.
    pub description: Option<String>,
    /// When the money was spent.
    pub date: Date,
}

/// The reason an expense submission was rejected.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ValidationError {
    /// The category was missing or only contained whitespace.
    #[error("Choose a category for the expense.")]
    EmptyCategory,
    /// The amount was missing or could not be read as a number.
    #[error("Enter the amount spent as a number.")]
    MissingAmount,
    /// The amount was zero, negative, or not finite.
    #[error("The amount must be greater than zero, got {0}.")]
    InvalidAmount(f64),
}

impl ValidationError {
    /// A short, URL-safe code for the error.
    pub fn code(&self) -> &'static str {
        match self {
            ValidationError::EmptyCategory => "empty_category",
            ValidationError::MissingAmount => "missing_amount",
            ValidationError::InvalidAmount(_) => "invalid_amount",
        }
    }

    /// A message describing the error with the code `code`.
    ///
    /// Returns `None` if `code` is not one of the codes returned by [ValidationError::code].
    pub fn message_for_code(code: &str) -> Option<&'static str> {
        match code {
            "empty_category" => Some("Choose a category for the expense."),
            "missing_amount" => Some("Enter the amount spent as a number."),
            "invalid_amount" => Some("The amount must be greater than zero."),
            _ => None,
        }
    }
}

/// A validated expense that has not been saved yet.
#[derive(Debug, Clone, PartialEq)]
pub struct NewExpense {
    category: String,
    amount: f64,
    description: String,
    date: Date,
}

impl NewExpense {
    /// Validate the fields of an expense.
    ///
    /// The category is trimmed of surrounding whitespace. `amount` is `None`
    /// when the submitted value was missing or not a number.
    ///
    /// # Errors
    /// Returns a [ValidationError] if the category is empty or the amount is
    /// missing, not finite, or not greater than zero.
    pub fn new(
        category: &str,
        amount: Option<f64>,
        description: &str,
        date: Date,
    ) -> Result<Self, ValidationError> {
        let category = category.trim();

        if category.is_empty() {
            return Err(ValidationError::EmptyCategory);
        }

        let amount = amount.ok_or(ValidationError::MissingAmount)?;

        if !amount.is_finite() || amount <= 0.0 {
            return Err(ValidationError::InvalidAmount(amount));
        }

        Ok(Self {
            category: category.to_owned(),
            amount,
            description: description.to_owned(),
            date,
        })
    }
}

/// The total amount spent in one category.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryTotal {
    /// The category label.
    pub category: String,
    /// The sum of the amounts of all expenses in the category.
    pub value: f64,
}

// ============================================================================
// DATABASE FUNCTIONS
// ============================================================================

/// Create a new expense in the database.
///
/// # Errors
/// This function will return a [Error::SqlError] if there is an SQL error.
pub fn create_expense(new_expense: NewExpense, connection: &Connection) -> Result<Expense, Error> {
    let expense = connection
        .prepare(
            "INSERT INTO expense (category, amount, description, date)
             VALUES (?1, ?2, ?3, ?4)
             RETURNING id, category, amount, description, date",
        )?
        .query_row(
            (
                new_expense.category,
                new_expense.amount,
                new_expense.description,
                new_expense.date,
            ),
            map_expense_row,
        )?;

    Ok(expense)
}

/// Retrieve an expense from the database by its `id`.
///
/// # Errors
/// This function will return a:
/// - [Error::NotFound] if `id` does not refer to a valid expense,
/// - or [Error::SqlError] there is some other SQL error.
pub fn get_expense(id: ExpenseId, connection: &Connection) -> Result<Expense, Error> {
    let expense = connection
        .prepare("SELECT id, category, amount, description, date FROM expense WHERE id = :id")?
        .query_row(&[(":id", &id)], map_expense_row)?;

    Ok(expense)
}

/// Get up to `limit` expenses, most recent first.
///
/// Expenses on the same date are ordered newest insert first.
///
/// # Errors
/// This function will return a [Error::SqlError] there is some SQL error.
pub fn get_recent_expenses(limit: u32, connection: &Connection) -> Result<Vec<Expense>, Error> {
    connection
        .prepare(
            "SELECT id, category, amount, description, date FROM expense
             ORDER BY date DESC, id DESC
             LIMIT :limit",
        )?
        .query_map(&[(":limit", &limit)], map_expense_row)?
        .map(|maybe_expense| maybe_expense.map_err(Error::from))
        .collect()
}

type RowsAffected = usize;

/// Delete the expense with `id`.
///
/// Returns the number of rows deleted, zero if no expense has the ID `id`.
///
/// # Errors
/// This function will return a [Error::SqlError] there is some SQL error.
pub fn delete_expense(id: ExpenseId, connection: &Connection) -> Result<RowsAffected, Error> {
    connection
        .execute("DELETE FROM expense WHERE id = :id", &[(":id", &id)])
        .map_err(|err| err.into())
}

/// Get the sum of the amounts of all expenses, `0.0` if there are none.
///
/// # Errors
/// This function will return a [Error::SqlError] there is some SQL error.
pub fn get_total_amount(connection: &Connection) -> Result<f64, Error> {
    connection
        .query_row("SELECT COALESCE(SUM(amount), 0.0) FROM expense", [], |row| {
            row.get(0)
        })
        .map_err(|error| error.into())
}

/// Get the total number of expenses in the database.
///
/// # Errors
/// This function will return a [Error::SqlError] there is some SQL error.
pub fn count_expenses(connection: &Connection) -> Result<u32, Error> {
    connection
        .query_row("SELECT COUNT(id) FROM expense", [], |row| row.get(0))
        .map_err(|error| error.into())
}

/// Get the total amount spent per category.
///
/// Only categories that have at least one expense are included.
///
/// # Errors
/// This function will return a [Error::SqlError] there is some SQL error.
pub fn get_category_totals(connection: &Connection) -> Result<Vec<CategoryTotal>, Error> {
    connection
        .prepare("SELECT category, SUM(amount) FROM expense GROUP BY category")?
        .query_map([], |row| {
            Ok(CategoryTotal {
                category: row.get(0)?,
                value: row.get::<_, Option<f64>>(1)?.unwrap_or(0.0),
            })
        })?
        .map(|maybe_total| maybe_total.map_err(Error::from))
        .collect()
}

/// Create the expense table in the database.
///
/// # Errors
/// Returns an error if the table cannot be created or if there is an SQL error.
pub fn create_expense_table(connection: &Connection) -> Result<(), rusqlite::Error> {
    connection.execute(
        "CREATE TABLE IF NOT EXISTS expense (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                category TEXT NOT NULL,
                amount REAL NOT NULL,
                description TEXT,
                date TEXT NOT NULL
                )",
        (),
    )?;

    // Used by the recent expenses queries.
    connection.execute(
        "CREATE INDEX IF NOT EXISTS idx_expense_date ON expense(date);",
        (),
    )?;

    Ok(())
}

/// Map a database row to an Expense.
fn map_expense_row(row: &Row) -> Result<Expense, rusqlite::Error> {
    let id = row.get(0)?;
    let category = row.get(1)?;
    let amount = row.get(2)?;
    let description = row.get(3)?;
    let date = row.get(4)?;

    Ok(Expense {
        id,
        category,
        amount,
        description,
        date,
    })
}

// ============================================================================
// TESTS
// ============================================================================
