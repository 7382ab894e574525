//! Implements a struct that holds the state of the server.

use std::sync::{Arc, Mutex};

use rusqlite::Connection;

use crate::{
    Error,
    dashboard::{DashboardConfig, RecordSnapshot},
    db::initialize,
    timezone::get_local_offset,
};

/// The state of the server.
#[derive(Debug, Clone)]
pub struct AppState {
    /// The local timezone as a canonical timezone name, e.g. "Pacific/Auckland".
    pub local_timezone: String,

    /// How the dashboard is displayed.
    pub dashboard_config: Arc<DashboardConfig>,

    /// The records shown on the dashboard the last time it was loaded.
    pub record_snapshot: Arc<Mutex<RecordSnapshot>>,

    /// The database connection
    pub db_connection: Arc<Mutex<Connection>>,
}

impl AppState {
    /// Create a new [AppState] with a SQLite database connection.
    ///
    /// This function will initialize the database by adding the key-value table.
    /// `local_timezone` should be a valid, canonical timezone name, e.g. "Pacific/Auckland".
    ///
    /// # Errors
    /// Returns an error if the database cannot be initialized or the timezone is not recognised.
    pub fn new(
        db_connection: Connection,
        local_timezone: &str,
        dashboard_config: DashboardConfig,
    ) -> Result<Self, Error> {
        if get_local_offset(local_timezone).is_none() {
            tracing::error!("Invalid timezone {}", local_timezone);
            return Err(Error::InvalidTimezoneError(local_timezone.to_owned()));
        }

        initialize(&db_connection)?;

        Ok(Self {
            local_timezone: local_timezone.to_owned(),
            dashboard_config: Arc::new(dashboard_config),
            record_snapshot: Arc::new(Mutex::new(RecordSnapshot::default())),
            db_connection: Arc::new(Mutex::new(db_connection)),
        })
    }
}
