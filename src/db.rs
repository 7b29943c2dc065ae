//! Opening, initializing and closing the application's SQLite database.

use std::sync::{Arc, Mutex};

use rusqlite::{Connection, TransactionBehavior, Transaction as SqlTransaction};

use crate::{Error, expense::create_expense_table};

/// Create the application tables if they do not already exist.
///
/// Safe to call on every start up.
///
/// # Errors
/// Returns an error if a table cannot be created or if there is an SQL error.
pub fn initialize(connection: &Connection) -> Result<(), Error> {
    let transaction = SqlTransaction::new_unchecked(connection, TransactionBehavior::Exclusive)?;

    create_expense_table(&transaction)?;

    transaction.commit()?;

    Ok(())
}

/// Close the shared database connection.
///
/// The connection is only closed if `connection` is the last reference to it,
/// otherwise it is left open and a warning is logged.
///
/// # Errors
/// Returns an error if the database lock is poisoned or SQLite fails to close
/// the connection.
pub fn close(connection: Arc<Mutex<Connection>>) -> Result<(), Error> {
    let connection = match Arc::try_unwrap(connection) {
        Ok(connection) => connection,
        Err(shared) => {
            tracing::warn!(
                "database connection still has {} other owner(s), skipping close",
                Arc::strong_count(&shared) - 1
            );
            return Ok(());
        }
    };

    let connection = connection
        .into_inner()
        .inspect_err(|error| tracing::error!("could not acquire database lock: {error}"))
        .map_err(|_| Error::DatabaseLockError)?;

    connection
        .close()
        .map_err(|(_, error)| Error::from(error))?;

    tracing::info!("Closed database connection");

    Ok(())
}
