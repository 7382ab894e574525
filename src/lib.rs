//! A budgeting dashboard that summarises categories, expenses and deposits.
//!
//! The records are written by other parts of a budgeting app and kept as JSON
//! documents in a SQLite key-value table. This library reads them, aggregates
//! them into totals, a spending breakdown, a daily expense timeline and
//! per-category progress, and serves the result as HTML pages driven by HTMX.

#![warn(missing_docs)]

use std::{net::SocketAddr, time::Duration};

use axum_server::Handle;
use tokio::signal;

mod alert;
mod app_state;
mod dashboard;
mod db;
mod endpoints;
mod error;
mod error_pages;
mod html;
mod records;
mod routing;
mod store;
mod timezone;

#[cfg(test)]
mod test_utils;

pub use app_state::AppState;
pub use dashboard::{
    CategoryUsage, ChartWindow, DEFAULT_WINDOW_DAYS, DashboardConfig, DashboardState,
    DashboardSummary, DashboardText, DateBucket, LoadReport, Palette, RecordSnapshot, Theme,
    TopCategory, UsageBand, aggregate, biggest_category, bucket_expenses_by_date, category_usage,
    parse_date, short_date_label, total_balance, total_deposits, total_expenses, usage_band,
    window_buckets,
};
pub use db::initialize as initialize_db;
pub use error::Error;
pub use records::{CATEGORIES_KEY, Category, DEPOSITS_KEY, Deposit, EXPENSES_KEY, Expense};
pub use routing::build_router;
pub use store::{get_records, get_value, remove_values, set_records, set_value};

/// An async task that waits for either the ctrl+c or terminate signal, whichever comes first, and
/// then signals the server to shut down gracefully.
///
/// `handle` is a handle to an Axum `Server`.
pub async fn graceful_shutdown(handle: Handle<SocketAddr>) {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::debug!("Received ctrl+c signal.");
            handle.graceful_shutdown(Some(Duration::from_secs(1)));
        },
        _ = terminate => {
            tracing::debug!("Received terminate signal.");
            handle.graceful_shutdown(Some(Duration::from_secs(1)));
        },
    }
}
