//! A key-value store for JSON documents, backed by a SQLite table.
//!
//! Other parts of the app persist their records here as JSON arrays. The
//! dashboard reads whole documents and only ever deletes them in bulk.

use rusqlite::{Connection, OptionalExtension};
use serde::{Serialize, de::DeserializeOwned};

use crate::Error;

/// Create the table that holds the key-value pairs.
///
/// # Errors
/// Returns an error if there is an SQL error.
pub fn create_key_value_table(connection: &Connection) -> Result<(), rusqlite::Error> {
    connection.execute(
        "CREATE TABLE IF NOT EXISTS key_value (
            key TEXT PRIMARY KEY,
            value TEXT NOT NULL
        )",
        (),
    )?;

    Ok(())
}

/// Get the raw value stored under `key`, or `None` if the key is absent.
///
/// # Errors
/// Returns [Error::SqlError] if the query fails.
pub fn get_value(key: &str, connection: &Connection) -> Result<Option<String>, Error> {
    connection
        .query_row(
            "SELECT value FROM key_value WHERE key = ?1",
            [key],
            |row| row.get(0),
        )
        .optional()
        .map_err(Error::from)
}

/// Store `value` under `key`, replacing any existing value.
///
/// # Errors
/// Returns [Error::SqlError] if the query fails.
pub fn set_value(key: &str, value: &str, connection: &Connection) -> Result<(), Error> {
    connection.execute(
        "INSERT INTO key_value (key, value) VALUES (?1, ?2)
        ON CONFLICT(key) DO UPDATE SET value = excluded.value",
        (key, value),
    )?;

    Ok(())
}

/// Remove every key in `keys` as a single batch.
///
/// Either all of the keys are removed or, on error, none of them are.
/// Keys that do not exist are ignored.
///
/// # Errors
/// Returns [Error::SqlError] if any deletion or the commit fails.
pub fn remove_values(keys: &[&str], connection: &Connection) -> Result<(), Error> {
    let transaction = connection.unchecked_transaction()?;

    for key in keys {
        transaction.execute("DELETE FROM key_value WHERE key = ?1", [key])?;
    }

    transaction.commit()?;
    Ok(())
}

/// Get the JSON array stored under `key` decoded as records of type `T`.
///
/// # Errors
/// Returns [Error::InvalidRecords] if the stored value is not a JSON array
/// of `T`, or [Error::SqlError] if the query fails.
pub fn get_records<T: DeserializeOwned>(
    key: &str,
    connection: &Connection,
) -> Result<Option<Vec<T>>, Error> {
    let Some(value) = get_value(key, connection)? else {
        return Ok(None);
    };

    serde_json::from_str(&value)
        .map(Some)
        .map_err(|error| Error::InvalidRecords {
            key: key.to_owned(),
            message: error.to_string(),
        })
}

/// Store `records` under `key` as a JSON array.
///
/// # Errors
/// Returns [Error::JSONSerializationError] if the records cannot be encoded,
/// or [Error::SqlError] if the query fails.
pub fn set_records<T: Serialize>(
    key: &str,
    records: &[T],
    connection: &Connection,
) -> Result<(), Error> {
    let value = serde_json::to_string(records)
        .map_err(|error| Error::JSONSerializationError(error.to_string()))?;

    set_value(key, &value, connection)
}

#[cfg(test)]
mod tests {
    use rusqlite::Connection;

    use super::{
        create_key_value_table, get_records, get_value, remove_values, set_records, set_value,
    };
    use crate::{
        Error,
        records::{CATEGORIES_KEY, Category},
    };

    fn get_test_connection() -> Connection {
        let connection = Connection::open_in_memory().unwrap();
        create_key_value_table(&connection).unwrap();
        connection
    }

    #[test]
    fn missing_key_is_none() {
        let connection = get_test_connection();

        assert_eq!(get_value("nope", &connection), Ok(None));
    }

    #[test]
    fn set_value_replaces_existing_value() {
        let connection = get_test_connection();

        set_value("greeting", "hello", &connection).unwrap();
        set_value("greeting", "kia ora", &connection).unwrap();

        assert_eq!(
            get_value("greeting", &connection),
            Ok(Some("kia ora".to_owned()))
        );
    }

    #[test]
    fn remove_values_removes_only_the_given_keys() {
        let connection = get_test_connection();
        set_value("a", "1", &connection).unwrap();
        set_value("b", "2", &connection).unwrap();
        set_value("c", "3", &connection).unwrap();

        remove_values(&["a", "b", "missing"], &connection).unwrap();

        assert_eq!(get_value("a", &connection), Ok(None));
        assert_eq!(get_value("b", &connection), Ok(None));
        assert_eq!(get_value("c", &connection), Ok(Some("3".to_owned())));
    }

    #[test]
    fn remove_values_fails_without_table() {
        let connection = Connection::open_in_memory().unwrap();

        let result = remove_values(&["a"], &connection);

        assert!(matches!(result, Err(Error::SqlError(_))));
    }

    #[test]
    fn records_are_stored_as_json_arrays() {
        let connection = get_test_connection();
        let categories = vec![Category {
            id: "c1".to_owned(),
            name: "Food".to_owned(),
            deposit: 200.0,
            balance: 150.0,
        }];

        set_records(CATEGORIES_KEY, &categories, &connection).unwrap();

        let raw = get_value(CATEGORIES_KEY, &connection).unwrap().unwrap();
        assert!(raw.starts_with('['));
        assert_eq!(
            get_records::<Category>(CATEGORIES_KEY, &connection),
            Ok(Some(categories))
        );
    }

    #[test]
    fn malformed_records_are_an_error() {
        let connection = get_test_connection();
        set_value(CATEGORIES_KEY, "{\"not\": \"an array\"}", &connection).unwrap();

        let result = get_records::<Category>(CATEGORIES_KEY, &connection);

        assert!(matches!(
            result,
            Err(Error::InvalidRecords { ref key, .. }) if key == CATEGORIES_KEY
        ));
    }
}
