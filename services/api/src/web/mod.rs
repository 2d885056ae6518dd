pub mod auth;
pub mod dispatch;
pub mod goals;
pub mod reports;
pub mod rest;
pub mod state;

// Re-export the handlers so the binary that builds the router can reach
// them without digging through submodules.
pub use auth::auth_handler;
pub use goals::{daily_goals_handler, weekly_goals_handler};
pub use reports::{dashboard_handler, fetch_reports_handler, generate_report_handler};
