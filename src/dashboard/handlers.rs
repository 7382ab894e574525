//! Dashboard HTTP handlers and view rendering.
//!
//! This module contains:
//! - Route handlers for loading, refreshing and clearing the dashboard
//! - HTML view functions for rendering the dashboard UI
//! - The state used by the handlers

use std::sync::{Arc, Mutex};

use axum::{
    extract::{FromRef, State},
    response::{IntoResponse, Redirect, Response},
};
use axum_htmx::HxRequest;
use maud::{Markup, html};
use rusqlite::Connection;

use crate::{
    AppState, Error,
    alert::Alert,
    dashboard::{
        aggregation::DashboardSummary,
        cards::summary_cards_view,
        charts::{DashboardChart, charts_view, daily_expenses_chart, spending_chart},
        config::{DashboardConfig, DashboardText, Palette},
        progress::category_progress_view,
        session::RecordSnapshot,
    },
    endpoints,
    html::{BUTTON_DELETE_STYLE, BUTTON_PRIMARY_STYLE, HeadElement, LINK_STYLE, base},
    timezone::local_today,
};

const DASHBOARD_CONTENT_ID: &str = "dashboard-content";

/// The state needed for displaying the dashboard page.
#[derive(Debug, Clone)]
pub struct DashboardState {
    /// The database connection holding the stored records.
    pub db_connection: Arc<Mutex<Connection>>,
    /// The records from the last load, kept when a later load cannot read a key.
    pub record_snapshot: Arc<Mutex<RecordSnapshot>>,
    /// The local timezone as a canonical timezone name, e.g. "Pacific/Auckland".
    pub local_timezone: String,
    /// Theme, chart window and copy text.
    pub config: Arc<DashboardConfig>,
}

impl FromRef<AppState> for DashboardState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
            record_snapshot: state.record_snapshot.clone(),
            local_timezone: state.local_timezone.clone(),
            config: state.dashboard_config.clone(),
        }
    }
}

/// Display the dashboard, reloading the records from the database.
pub async fn get_dashboard_page(State(state): State<DashboardState>) -> Result<Response, Error> {
    let summary = load_summary(&state)?;

    Ok(dashboard_view(&summary, &state.config).into_response())
}

/// Reload the records and return the dashboard content for HTMX to swap in.
///
/// Requests that do not come from HTMX are redirected to the full page.
pub async fn get_dashboard_content(
    State(state): State<DashboardState>,
    HxRequest(is_htmx_request): HxRequest,
) -> Response {
    if !is_htmx_request {
        return Redirect::to(endpoints::DASHBOARD_VIEW).into_response();
    }

    match load_summary(&state) {
        Ok(summary) => dashboard_content(&summary, &state.config).into_response(),
        Err(error) => error.into_alert_response(),
    }
}

/// Delete every stored category, expense and deposit.
///
/// On success the emptied dashboard content is returned along with a
/// success alert. On failure nothing is deleted and an error alert is
/// returned.
pub async fn reset_dashboard(State(state): State<DashboardState>) -> Response {
    let today = match local_today(&state.local_timezone) {
        Ok(today) => today,
        Err(error) => return error.into_alert_response(),
    };

    let connection = match state.db_connection.lock() {
        Ok(connection) => connection,
        Err(error) => {
            tracing::error!("could not acquire database lock: {error}");
            return Error::DatabaseLockError.into_alert_response();
        }
    };

    let mut snapshot = match state.record_snapshot.lock() {
        Ok(snapshot) => snapshot,
        Err(error) => {
            tracing::error!("could not acquire dashboard session lock: {error}");
            return Error::SessionLockError.into_alert_response();
        }
    };

    if let Err(error) = snapshot.reset(&connection) {
        return error.into_alert_response();
    }

    let summary = snapshot.summarize(state.config.window, today);
    let alert = Alert::Success {
        message: state.config.text.reset_success.clone(),
        details: String::new(),
    };

    html! {
        (dashboard_content(&summary, &state.config))

        div id="alert-container" hx-swap-oob="innerHTML" {
            (alert.into_html())
        }
    }
    .into_response()
}

/// Load the latest records into the session snapshot and aggregate them.
///
/// The database lock is always taken before the session lock.
fn load_summary(state: &DashboardState) -> Result<DashboardSummary, Error> {
    let today = local_today(&state.local_timezone)?;

    let connection = state
        .db_connection
        .lock()
        .inspect_err(|error| tracing::error!("could not acquire database lock: {error}"))
        .map_err(|_| Error::DatabaseLockError)?;

    let mut snapshot = state
        .record_snapshot
        .lock()
        .inspect_err(|error| tracing::error!("could not acquire dashboard session lock: {error}"))
        .map_err(|_| Error::SessionLockError)?;

    snapshot.load(&connection);

    Ok(snapshot.summarize(state.config.window, today))
}

fn build_dashboard_charts(
    summary: &DashboardSummary,
    text: &DashboardText,
    palette: &Palette,
) -> [DashboardChart; 2] {
    [
        DashboardChart {
            id: "spending-chart",
            options: spending_chart(&text.spending_chart_title, &summary.usage, palette)
                .to_string(),
        },
        DashboardChart {
            id: "daily-expenses-chart",
            options: daily_expenses_chart(&text.daily_chart_title, &summary.timeline, palette)
                .to_string(),
        },
    ]
}

/// Renders the full dashboard page.
fn dashboard_view(summary: &DashboardSummary, config: &DashboardConfig) -> Markup {
    let palette = config.theme.palette();
    let text = &config.text;

    let content = html!(
        div
            class="flex flex-col items-center px-2 lg:px-6 py-4 lg:py-8 mx-auto max-w-screen-xl"
        {
            header class="w-full flex flex-wrap justify-between items-center gap-4 mb-4"
            {
                h2 class="text-2xl font-bold" { (text.title) }

                div class="flex flex-wrap items-center gap-4"
                {
                    a href=(endpoints::BUDGET_VIEW) class=(LINK_STYLE) { (text.budget_link) }

                    button
                        id="refresh-button"
                        type="button"
                        hx-get=(endpoints::DASHBOARD_CONTENT)
                        hx-target={ "#" (DASHBOARD_CONTENT_ID) }
                        hx-target-error="#alert-container"
                        hx-swap="innerHTML"
                        hx-sync={ "#" (DASHBOARD_CONTENT_ID) ":drop" }
                        class=(BUTTON_PRIMARY_STYLE)
                    {
                        span class="htmx-indicator" { "Refreshing... " }
                        (text.refresh_button)
                    }

                    button
                        id="reset-button"
                        type="button"
                        hx-delete=(endpoints::DASHBOARD_RECORDS)
                        hx-confirm=(text.reset_confirmation)
                        hx-target={ "#" (DASHBOARD_CONTENT_ID) }
                        hx-target-error="#alert-container"
                        hx-swap="innerHTML"
                        hx-sync={ "#" (DASHBOARD_CONTENT_ID) ":drop" }
                        class=(BUTTON_DELETE_STYLE)
                    {
                        (text.reset_button)
                    }
                }
            }

            div id=(DASHBOARD_CONTENT_ID) class="w-full"
            {
                (dashboard_content(summary, config))
            }
        }
    );

    let scripts = [HeadElement::ScriptLink(
        "/static/echarts.6.0.0.min.js".to_owned(),
    )];

    base(&text.title, palette.page, &scripts, &content)
}

/// Renders the part of the dashboard that changes when the records are reloaded.
fn dashboard_content(summary: &DashboardSummary, config: &DashboardConfig) -> Markup {
    let palette = config.theme.palette();
    let text = &config.text;

    if summary.is_empty() {
        return dashboard_no_data_view(text);
    }

    let charts = build_dashboard_charts(summary, text, palette);

    html!(
        (summary_cards_view(summary, text, palette))
        (charts_view(&charts, palette))
        (category_progress_view(&text.progress_heading, &summary.usage, palette))
    )
}

fn dashboard_no_data_view(text: &DashboardText) -> Markup {
    html!(
        div id="dashboard-empty" class="flex flex-col items-center px-6 py-8 mx-auto"
        {
            h3 class="text-xl font-bold" { (text.empty_title) }

            p { (text.empty_description) }
        }
    )
}
