//! Alert system for displaying success and error messages to users.
//!
//! Alerts are small HTML fragments that HTMX swaps into the page, either in
//! place of the dashboard content or into the fixed `#alert-container`.

use maud::{Markup, html};

/// An alert message with its styling.
#[derive(Debug, Clone, PartialEq)]
pub enum Alert {
    /// An operation completed as requested.
    Success {
        /// The headline of the alert.
        message: String,
        /// Extra information shown under the headline.
        details: String,
    },
    /// An operation could not be completed.
    Error {
        /// The headline of the alert.
        message: String,
        /// What went wrong and what the user can do about it.
        details: String,
    },
}

impl Alert {
    /// Render the alert as HTML.
    pub fn into_html(self) -> Markup {
        let (style, message, details) = match self {
            Alert::Success { message, details } => (
                "p-4 mb-4 text-sm text-green-800 rounded-lg bg-green-50 \
                dark:bg-gray-800 dark:text-green-400",
                message,
                details,
            ),
            Alert::Error { message, details } => (
                "p-4 mb-4 text-sm text-red-800 rounded-lg bg-red-50 \
                dark:bg-gray-800 dark:text-red-400",
                message,
                details,
            ),
        };

        html! {
            div class=(style) role="alert"
            {
                span class="font-medium" { (message) }

                @if !details.is_empty() {
                    p { (details) }
                }
            }
        }
    }
}
