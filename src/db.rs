//! Database setup.

use rusqlite::{Connection, Transaction, TransactionBehavior};

use crate::{Error, store::create_key_value_table};

/// Create the app's tables if they do not already exist.
///
/// # Errors
/// Returns an error if there is an SQL error.
pub fn initialize(connection: &Connection) -> Result<(), Error> {
    let transaction = Transaction::new_unchecked(connection, TransactionBehavior::Exclusive)?;

    create_key_value_table(&transaction)?;

    transaction.commit()?;

    Ok(())
}
