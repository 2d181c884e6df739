//! Cross Insurance public site.
//!
//! Serves the landing page with its lead-capture quote form, the staff
//! login, and the CRM metrics dashboard. The site owns no data: every
//! dynamic view is rendered from a call to the CRM backend made with the
//! browser's own cookies.

pub mod config;
pub mod error;
pub mod forms;
pub mod format;
pub mod routes;
pub mod state;
pub mod views;

pub use routes::build_router;
