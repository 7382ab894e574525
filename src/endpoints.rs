//! The API endpoints URIs.

/// The root route which redirects to the dashboard.
pub const ROOT: &str = "/";
/// The dashboard page.
pub const DASHBOARD_VIEW: &str = "/dashboard";
/// The dashboard content without the surrounding page, requested by the refresh button.
pub const DASHBOARD_CONTENT: &str = "/dashboard/content";
/// The detailed budget view linked from the dashboard.
///
/// The page itself is served by another part of the app.
pub const BUDGET_VIEW: &str = "/budget";
/// The page to display when an internal server error occurs.
pub const INTERNAL_ERROR_VIEW: &str = "/error";
/// The route for static files.
pub const STATIC: &str = "/static";

/// The route for deleting all stored categories, expenses and deposits.
pub const DASHBOARD_RECORDS: &str = "/api/dashboard/records";
