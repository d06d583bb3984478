use reqwest::Client;
use tracing::{debug, error, info, warn};

use crate::{
    config::Config,
    error::Result,
    helpers::{
        harvest::{self, utils::ReportWindow},
        report, slack,
    },
    models::harvest::{TimeEntry, User},
};

/// Role tag the report targets unless overridden on the command line.
pub const DEFAULT_ROLE: &str = "WATA";

/// Total and billable hours for one user over the reporting window, with
/// per-entry rounding already applied.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HoursSummary {
    pub total: f64,
    pub billable: f64,
}

/// Sums a user's entries, rounding each entry up to the granularity before
/// adding it. Billable hours are a subset of total hours.
pub fn aggregate_hours(entries: &[TimeEntry], granularity: f64) -> HoursSummary {
    let mut summary = HoursSummary {
        total: 0.0,
        billable: 0.0,
    };
    for entry in entries {
        let rounded = report::round_up(entry.hours, granularity);
        summary.total += rounded;
        if entry.billable {
            summary.billable += rounded;
        }
    }
    summary
}

/// The main notifier service: fetches Harvest data for one weekly window and
/// delivers the assembled report to the webhook.
#[derive(Clone)]
pub struct NotifierService {
    pub harvest_client: Client,
    pub webhook_client: Client,
    pub config: Config,
    harvest_base_url: String,
    webhook_url: String,
}

impl NotifierService {
    /// Create a new notifier service instance
    pub fn new(harvest_client: Client, config: Config) -> Self {
        info!("Creating new NotifierService instance");
        let webhook_url = config.webhook_url().to_string();
        Self {
            harvest_client,
            webhook_client: Client::new(),
            config,
            harvest_base_url: harvest::HARVEST_BASE_URL.to_string(),
            webhook_url,
        }
    }

    /// Override the upstream and sink endpoints (used by tests).
    pub fn with_endpoints(
        mut self,
        harvest_base_url: impl Into<String>,
        webhook_url: impl Into<String>,
    ) -> Self {
        self.harvest_base_url = harvest_base_url.into();
        self.webhook_url = webhook_url.into();
        self
    }

    /// Run the report for the most recent fully elapsed week.
    pub async fn run(&self, role: &str) -> Result<()> {
        let window = harvest::utils::last_full_week();
        self.run_for_window(role, window).await
    }

    /// Full pipeline: fetch users, filter by role, aggregate each user's
    /// hours, format, deliver. Any upstream failure aborts the whole batch
    /// before anything is sent.
    pub async fn run_for_window(&self, role: &str, window: ReportWindow) -> Result<()> {
        info!(
            "Running weekly report for role {} over {} to {}",
            role,
            window.start,
            window.last_day()
        );

        match harvest::fetch_company(&self.harvest_client, &self.harvest_base_url).await {
            Ok(company) => info!("Reporting for account: {}", company.name),
            Err(e) => warn!("Could not fetch company info: {}", e),
        }

        let users = harvest::fetch_users(&self.harvest_client, &self.harvest_base_url).await?;
        let selected: Vec<User> = users
            .into_iter()
            .filter(|user| user.is_active && user.has_role(role))
            .collect();
        info!(
            "Selected {} active user(s) with role {}",
            selected.len(),
            role
        );

        // Harvest allows one request in flight at a time, so the per-user
        // fetches run sequentially even though they are independent.
        let mut lines = Vec::with_capacity(selected.len());
        for user in &selected {
            let entries = harvest::fetch_time_entries(
                &self.harvest_client,
                &self.harvest_base_url,
                user.id,
                &window,
            )
            .await?;
            let summary = aggregate_hours(&entries, self.config.rounding_granularity);
            debug!(
                "{}: {} billable of {} total ({})",
                user.full_name(),
                summary.billable,
                summary.total,
                report::BILLABLE_SCALE.phrase(summary.billable),
            );
            lines.push(report::format_line(user, summary.total, summary.billable));
        }

        let message = report::format_report(&lines, &window);
        info!("Sending message:\n{}", message);

        match slack::send(&self.webhook_client, &self.webhook_url, &message).await {
            Ok(()) => {
                info!("Weekly report for role {} delivered", role);
                Ok(())
            }
            Err(e) => {
                error!("Failed to deliver weekly report: {}", e);
                Err(e)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(hours: f64, billable: bool) -> TimeEntry {
        TimeEntry { hours, billable }
    }

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn rounds_each_entry_before_summing() {
        // Half-hour granularity: 1.2 -> 1.5 and 2.3 -> 2.5, so the total is
        // 4.0 rather than round_up(3.5) = 3.5.
        let summary = aggregate_hours(&[entry(1.2, true), entry(2.3, false)], 0.5);
        assert!(close(summary.total, 4.0));
        assert!(close(summary.billable, 1.5));
        assert_eq!(report::BILLABLE_SCALE.classify(summary.billable), 0);
        assert_eq!(report::TOTAL_SCALE.classify(summary.total), 0);
    }

    #[test]
    fn quarter_hour_granularity() {
        let summary = aggregate_hours(&[entry(1.2, true), entry(0.1, true)], 0.25);
        assert!(close(summary.billable, 1.5));
        assert!(close(summary.total, 1.5));
    }

    #[test]
    fn billable_never_exceeds_total() {
        let entries = [
            entry(3.7, true),
            entry(0.2, false),
            entry(8.0, true),
            entry(1.9, false),
        ];
        for granularity in [0.25, 0.5] {
            let summary = aggregate_hours(&entries, granularity);
            assert!(summary.total >= summary.billable);
        }
    }

    #[test]
    fn no_entries_means_zero_hours() {
        let summary = aggregate_hours(&[], 0.25);
        assert!(close(summary.total, 0.0));
        assert!(close(summary.billable, 0.0));
    }
}
