//! Dashboard module
//!
//! Provides an overview page that summarises the stored categories, expenses
//! and deposits with totals, charts and per-category progress bars. The
//! records can be refreshed in place or cleared in bulk.

mod aggregation;
mod cards;
mod charts;
mod config;
mod handlers;
mod progress;
mod session;

pub use aggregation::{
    CategoryUsage, ChartWindow, DEFAULT_WINDOW_DAYS, DashboardSummary, DateBucket, TopCategory,
    UsageBand, aggregate, biggest_category, bucket_expenses_by_date, category_usage, parse_date,
    short_date_label, total_balance, total_deposits, total_expenses, usage_band, window_buckets,
};
pub use config::{DashboardConfig, DashboardText, Palette, Theme};
pub use handlers::{DashboardState, get_dashboard_content, get_dashboard_page, reset_dashboard};
pub use session::{LoadReport, RecordSnapshot};
