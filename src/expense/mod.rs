//! Recording, listing and deleting expenses.

mod core;
mod create;
mod delete;
mod form;
mod list;

pub use core::{
    Expense, NewExpense, SUGGESTED_CATEGORIES, ValidationError, count_expenses,
    create_expense, create_expense_table, delete_expense, get_category_totals, get_expense,
    get_recent_expenses, get_total_amount,
};
pub use create::{create_expense_endpoint, get_add_expense_page};
pub use delete::delete_expense_endpoint;
pub(crate) use form::expense_form;
pub(crate) use list::expense_table;
pub use list::get_recent_page;
