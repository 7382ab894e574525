use std::{fs::OpenOptions, net::SocketAddr, path::PathBuf, process::exit, sync::Arc};

use axum::{
    Router,
    extract::{MatchedPath, Request},
};
use axum_server::Handle;
use clap::{Parser, ValueEnum};
use rusqlite::Connection;
use tower_http::trace::TraceLayer;

#[cfg(debug_assertions)]
use tower_livereload::LiveReloadLayer;

use tracing_subscriber::{Layer, filter, layer::SubscriberExt, util::SubscriberInitExt};

use budget_dashboard::{
    AppState, ChartWindow, DEFAULT_WINDOW_DAYS, DashboardConfig, DashboardText, Theme,
    build_router, graceful_shutdown,
};

/// How the daily expenses chart chooses how many days to show.
#[derive(Debug, Clone, Copy, ValueEnum)]
enum WindowKind {
    /// Show the last `--window-days` days that have expenses.
    Fixed,
    /// Show as many days as there are in the current month.
    CalendarMonth,
}

/// The web server for the budget dashboard.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// File path to the application SQLite database.
    #[arg(long)]
    db_path: String,

    /// The port to serve the dashboard from.
    #[arg(short, long, default_value_t = 3000)]
    port: u16,

    /// The canonical name of the local timezone, e.g. "Pacific/Auckland".
    #[arg(long, default_value = "Etc/UTC")]
    timezone: String,

    /// The colour scheme of the dashboard.
    #[arg(long, value_enum, default_value_t = Theme::Plain)]
    theme: Theme,

    /// How many days the daily expenses chart shows.
    #[arg(long, value_enum, default_value_t = WindowKind::Fixed)]
    chart_window: WindowKind,

    /// The number of days shown by the fixed chart window.
    #[arg(long, default_value_t = DEFAULT_WINDOW_DAYS)]
    window_days: usize,

    /// Optional JSON file that overrides the dashboard's text.
    #[arg(long)]
    text_path: Option<PathBuf>,
}

#[tokio::main]
async fn main() {
    setup_logging();

    let args = Args::parse();

    let text = match &args.text_path {
        Some(path) => DashboardText::from_json_file(path).unwrap_or_else(|error| {
            tracing::error!("Could not load dashboard text: {error}");
            exit(1);
        }),
        None => DashboardText::default(),
    };

    let window = match args.chart_window {
        WindowKind::Fixed => ChartWindow::Fixed(args.window_days),
        WindowKind::CalendarMonth => ChartWindow::CalendarMonth,
    };

    let config = DashboardConfig {
        theme: args.theme,
        window,
        text,
    };

    let conn = Connection::open(&args.db_path).unwrap_or_else(|error| {
        tracing::error!("Could not open database at {}: {error}", args.db_path);
        exit(1);
    });

    let state = AppState::new(conn, &args.timezone, config).unwrap_or_else(|error| {
        tracing::error!("Could not create the app state: {error}");
        exit(1);
    });

    let addr = SocketAddr::from(([127, 0, 0, 1], args.port));

    let handle = Handle::new();
    tokio::spawn(graceful_shutdown(handle.clone()));

    let router = add_tracing_layer(build_router(state));

    #[cfg(debug_assertions)]
    let router = router.layer(LiveReloadLayer::new());

    tracing::info!("HTTP server listening on {}", addr);
    if let Err(error) = axum_server::bind(addr)
        .handle(handle)
        .serve(router.into_make_service())
        .await
    {
        tracing::error!("Server stopped unexpectedly: {error}");
        exit(1);
    }
}

fn setup_logging() {
    let stdout_log = tracing_subscriber::fmt::layer().pretty();

    let log_file = OpenOptions::new()
        .create(true)
        .append(true)
        .open("debug.log")
        .expect("Could not create log file");

    let debug_log = tracing_subscriber::fmt::layer()
        .pretty()
        .with_writer(Arc::new(log_file));

    tracing_subscriber::registry()
        .with(
            stdout_log
                .with_filter(filter::LevelFilter::INFO)
                .and_then(debug_log)
                .with_filter(filter::LevelFilter::DEBUG),
        )
        .init();
}

fn add_tracing_layer(router: Router) -> Router {
    let tracing_layer = TraceLayer::new_for_http()
        .make_span_with(|req: &Request| {
            let method = req.method();
            let uri = req.uri();

            let matched_path = req
                .extensions()
                .get::<MatchedPath>()
                .map(|matched_path| matched_path.as_str());

            tracing::debug_span!("request", %method, %uri, matched_path)
        })
        // Handlers log their own errors.
        .on_failure(());

    router.layer(tracing_layer)
}
