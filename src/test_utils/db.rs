use rusqlite::Connection;
use time::Date;

use crate::{
    db::initialize,
    expense::{Expense, NewExpense, create_expense},
};

pub(crate) fn get_test_connection() -> Connection {
    let conn = Connection::open_in_memory().unwrap();
    initialize(&conn).unwrap();
    conn
}

#[track_caller]
pub(crate) fn insert_expense(
    category: &str,
    amount: f64,
    description: &str,
    date: Date,
    connection: &Connection,
) -> Expense {
    let new_expense = NewExpense::new(category, Some(amount), description, date)
        .expect("Invalid test expense");

    create_expense(new_expense, connection).expect("Could not create expense")
}
