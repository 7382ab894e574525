//! Full-page views for missing routes and unexpected server failures.
use axum::{
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};

use crate::html::error_view;

/// What went wrong and how the user might work around it.
pub struct InternalServerError<'a> {
    pub description: &'a str,
    pub fix: &'a str,
}

impl Default for InternalServerError<'_> {
    fn default() -> Self {
        Self {
            description: "Sorry, something went wrong.",
            fix: "Try again later or check the server logs",
        }
    }
}

impl IntoResponse for InternalServerError<'_> {
    fn into_response(self) -> Response {
        error_page(
            StatusCode::INTERNAL_SERVER_ERROR,
            "Internal Server Error",
            self.description,
            self.fix,
        )
    }
}

/// The requested page does not exist.
pub struct NotFoundError;

impl IntoResponse for NotFoundError {
    fn into_response(self) -> Response {
        error_page(
            StatusCode::NOT_FOUND,
            "Not Found",
            "Page not found.",
            "Check the address, or head back to your dashboard.",
        )
    }
}

fn error_page(status: StatusCode, title: &str, description: &str, fix: &str) -> Response {
    let markup = error_view(title, status.as_str(), description, fix);

    (status, Html(markup.into_string())).into_response()
}

/// The fallback route handler.
pub async fn get_404_not_found() -> Response {
    NotFoundError.into_response()
}

/// The route handler for the internal server error page.
pub async fn get_internal_server_error_page() -> Response {
    InternalServerError::default().into_response()
}
