//! Presentation settings for the dashboard: colour theme, chart window and copy text.

use std::path::Path;

use serde::Deserialize;

use crate::{Error, dashboard::aggregation::ChartWindow};

/// Everything that changes how the dashboard looks without changing what it computes.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DashboardConfig {
    /// The colour scheme.
    pub theme: Theme,
    /// How many days the daily expenses chart shows.
    pub window: ChartWindow,
    /// The copy text.
    pub text: DashboardText,
}

/// The colour scheme used for the dashboard.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum Theme {
    /// Light cards that follow the browser's dark mode setting.
    #[default]
    Plain,
    /// Dark indigo cards on a near-black page.
    Midnight,
}

/// CSS classes and chart colours for a [Theme].
#[derive(Debug, PartialEq)]
pub struct Palette {
    /// Classes for the page body.
    pub page: &'static str,
    /// Classes for cards and chart containers.
    pub card: &'static str,
    /// Classes for secondary text such as labels.
    pub muted_text: &'static str,
    /// Classes for the unfilled part of a progress bar.
    pub progress_track: &'static str,
    /// Fill classes for [UsageBand::Low](crate::UsageBand::Low).
    pub low_usage: &'static str,
    /// Fill classes for [UsageBand::Medium](crate::UsageBand::Medium).
    pub medium_usage: &'static str,
    /// Fill classes for [UsageBand::High](crate::UsageBand::High).
    pub high_usage: &'static str,
    /// Slice colours for the spending pie chart, used in order and repeated.
    pub chart_colors: &'static [&'static str],
    /// The bar colour for the daily expenses chart.
    pub bar_color: &'static str,
    /// Always draw charts with the ECharts dark theme instead of following the browser.
    pub dark_charts: bool,
}

static PLAIN_PALETTE: Palette = Palette {
    page: "text-gray-900 dark:text-white",
    card: "bg-white dark:bg-gray-800 border border-gray-200 dark:border-gray-700",
    muted_text: "text-gray-500 dark:text-gray-400",
    progress_track: "bg-gray-200 dark:bg-gray-700",
    low_usage: "bg-green-500",
    medium_usage: "bg-yellow-400",
    high_usage: "bg-red-600",
    chart_colors: &["#2563eb", "#16a34a", "#f59e0b", "#dc2626", "#9333ea", "#0891b2"],
    bar_color: "#2563eb",
    dark_charts: false,
};

static MIDNIGHT_PALETTE: Palette = Palette {
    page: "text-indigo-50 bg-slate-950",
    card: "bg-indigo-950 border border-indigo-800",
    muted_text: "text-indigo-300",
    progress_track: "bg-indigo-900",
    low_usage: "bg-teal-400",
    medium_usage: "bg-amber-400",
    high_usage: "bg-rose-500",
    chart_colors: &["#818cf8", "#2dd4bf", "#fbbf24", "#fb7185", "#c084fc", "#38bdf8"],
    bar_color: "#818cf8",
    dark_charts: true,
};

impl Theme {
    /// The CSS classes and chart colours for this theme.
    pub fn palette(self) -> &'static Palette {
        match self {
            Theme::Plain => &PLAIN_PALETTE,
            Theme::Midnight => &MIDNIGHT_PALETTE,
        }
    }
}

/// The words shown on the dashboard.
///
/// Any field missing from a JSON override keeps its default.
#[allow(missing_docs)]
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct DashboardText {
    pub title: String,
    pub total_balance: String,
    pub total_deposits: String,
    pub total_expenses: String,
    pub biggest_category: String,
    /// Shown in place of the biggest category when there are no categories.
    pub no_biggest_category: String,
    pub spending_chart_title: String,
    pub daily_chart_title: String,
    pub progress_heading: String,
    pub budget_link: String,
    pub refresh_button: String,
    pub reset_button: String,
    /// The question asked before clearing all data.
    pub reset_confirmation: String,
    pub reset_success: String,
    pub empty_title: String,
    pub empty_description: String,
}

impl Default for DashboardText {
    fn default() -> Self {
        Self {
            title: "Dashboard".to_owned(),
            total_balance: "Total Balance".to_owned(),
            total_deposits: "Total Deposits".to_owned(),
            total_expenses: "Total Expenses".to_owned(),
            biggest_category: "Biggest Category".to_owned(),
            no_biggest_category: "No categories yet".to_owned(),
            spending_chart_title: "Spending by Category".to_owned(),
            daily_chart_title: "Daily Expenses".to_owned(),
            progress_heading: "Category Usage".to_owned(),
            budget_link: "View budget".to_owned(),
            refresh_button: "Refresh".to_owned(),
            reset_button: "Clear all data".to_owned(),
            reset_confirmation: "Are you sure you want to delete all categories, expenses and \
                deposits? This cannot be undone."
                .to_owned(),
            reset_success: "All data cleared".to_owned(),
            empty_title: "Nothing here yet...".to_owned(),
            empty_description: "The dashboard will fill in once you add some categories, \
                deposits or expenses."
                .to_owned(),
        }
    }
}

impl DashboardText {
    /// Parse text overrides from a JSON object.
    ///
    /// # Errors
    /// Returns [Error::InvalidDashboardText] if `json` is not a JSON object of strings.
    pub fn from_json_str(json: &str) -> Result<Self, Error> {
        serde_json::from_str(json).map_err(|error| Error::InvalidDashboardText(error.to_string()))
    }

    /// Read text overrides from the JSON file at `path`.
    ///
    /// # Errors
    /// Returns [Error::InvalidDashboardText] if the file cannot be read or parsed.
    pub fn from_json_file(path: &Path) -> Result<Self, Error> {
        let json = std::fs::read_to_string(path).map_err(|error| {
            tracing::error!("could not read dashboard text from {}: {error}", path.display());
            Error::InvalidDashboardText(format!("{}: {error}", path.display()))
        })?;

        Self::from_json_str(&json)
    }
}
