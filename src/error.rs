//! Defines the app level error type and conversions to rendered HTML pages and alerts.
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};

use crate::{
    alert::Alert,
    error_pages::InternalServerError,
};

/// The errors that may occur in the application.
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum Error {
    /// An unhandled/unexpected SQL error.
    #[error("an unexpected SQL error occurred: {0}")]
    SqlError(rusqlite::Error),

    /// The value stored under `key` is not a JSON array of the expected records.
    ///
    /// Records are written by other parts of the app, so a malformed document
    /// is treated as a failed read of that key rather than as a fatal error.
    #[error("the records stored under \"{key}\" could not be decoded: {message}")]
    InvalidRecords {
        /// The storage key that was read.
        key: String,
        /// The decoding error reported by serde.
        message: String,
    },

    /// An error occurred while serializing records as JSON.
    #[error("could not serialize as JSON: {0}")]
    JSONSerializationError(String),

    /// Could not acquire the database lock.
    #[error("could not acquire the database lock")]
    DatabaseLockError,

    /// Could not acquire the lock on the dashboard's last loaded records.
    #[error("could not acquire the dashboard session lock")]
    SessionLockError,

    /// An error occurred while getting the local timezone from a canonical timezone string.
    #[error("invalid timezone {0}")]
    InvalidTimezoneError(String),

    /// The dashboard copy text file could not be read or parsed.
    #[error("invalid dashboard text: {0}")]
    InvalidDashboardText(String),

    /// The stored records could not be removed.
    ///
    /// The removal runs in a single SQL transaction, so none of the keys
    /// were removed when this error is returned.
    #[error("the stored records could not be removed")]
    ResetFailed,
}

impl From<rusqlite::Error> for Error {
    fn from(error: rusqlite::Error) -> Self {
        tracing::error!("an unhandled SQL error occurred: {}", error);
        Error::SqlError(error)
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        match self {
            Error::InvalidTimezoneError(timezone) => InternalServerError {
                description: "Invalid Timezone Settings",
                fix: &format!(
                    "Could not get local timezone \"{timezone}\". Check your server settings and \
                    ensure the timezone has been set to valid, canonical timezone string"
                ),
            }
            .into_response(),
            Error::DatabaseLockError | Error::SessionLockError => {
                InternalServerError::default().into_response()
            }
            // Any errors that are not handled above are not intended to be shown to the client.
            error => {
                tracing::error!("An unexpected error occurred: {}", error);
                InternalServerError::default().into_response()
            }
        }
    }
}

impl Error {
    /// Convert the error into an HTTP response with an HTML alert.
    pub fn into_alert_response(self) -> Response {
        let (status_code, alert) = match self {
            Error::InvalidTimezoneError(timezone) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                Alert::Error {
                    message: "Invalid Timezone Settings".to_owned(),
                    details: format!(
                        "Could not get local timezone \"{timezone}\". Check your server settings and \
                    ensure the timezone has been set to valid, canonical timezone string"
                    ),
                },
            ),
            Error::ResetFailed => (
                StatusCode::INTERNAL_SERVER_ERROR,
                Alert::Error {
                    message: "Could not clear your data".to_owned(),
                    details: "Nothing was deleted. Try again, or check the server logs \
                    if the problem persists."
                        .to_owned(),
                },
            ),
            error => {
                tracing::error!("An unexpected error occurred: {}", error);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Alert::Error {
                        message: "Something went wrong".to_owned(),
                        details:
                            "An unexpected error occurred, check the server logs for more details."
                                .to_owned(),
                    },
                )
            }
        };

        (status_code, alert.into_html()).into_response()
    }
}
