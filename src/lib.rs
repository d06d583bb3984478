//! Harvest Weekly Hours Notifier
//!
//! This library fetches per-user billable and total hours from the Harvest
//! time-tracking API for the last full week and posts a per-user summary
//! report to a Slack incoming webhook.

pub mod config;
pub mod error;
pub mod helpers;
pub mod models;
pub mod service;

pub use config::Config;
pub use error::{NotifierError, Result};
pub use service::{HoursSummary, NotifierService, DEFAULT_ROLE};

// Re-export key types for convenience
pub use helpers::harvest::utils::ReportWindow;
pub use models::harvest::{TimeEntry, User};
