use reqwest::{header, Client};
use serde::de::DeserializeOwned;
use tracing::{error, info};

use crate::error::{NotifierError, Result};
use crate::models::harvest::{Company, TimeEntriesResponse, TimeEntry, User, UsersResponse};

use self::utils::ReportWindow;

pub const HARVEST_BASE_URL: &str = "https://api.harvestapp.com/v2";

const USER_AGENT: &str = "Harvest Notifier (ja@lukascech.cz)";

pub fn harvest_client_init(access_token: &str, account_id: &str) -> Result<Client> {
    info!("Initializing Harvest client");

    let auth_value = match header::HeaderValue::from_str(&format!("Bearer {access_token}")) {
        Ok(value) => {
            let mut val = value;
            val.set_sensitive(true);
            val
        }
        Err(e) => {
            error!("Failed to create Authorization header value: {}", e);
            return Err(NotifierError::Config(format!("invalid access token: {e}")));
        }
    };

    let account_value = header::HeaderValue::from_str(account_id)
        .map_err(|e| NotifierError::Config(format!("invalid account id: {e}")))?;

    let mut headers = header::HeaderMap::new();
    headers.insert(header::AUTHORIZATION, auth_value);
    headers.insert("Harvest-Account-Id", account_value);
    headers.insert(
        header::USER_AGENT,
        header::HeaderValue::from_static(USER_AGENT),
    );

    match Client::builder().default_headers(headers).build() {
        Ok(client) => {
            info!("Harvest client initialized successfully");
            Ok(client)
        }
        Err(e) => {
            error!("Failed to build Harvest client: {}", e);
            Err(NotifierError::Config(e.to_string()))
        }
    }
}

/// Fetches the full user directory. Order is whatever Harvest returns.
pub async fn fetch_users(client: &Client, base_url: &str) -> Result<Vec<User>> {
    let url = format!("{base_url}/users");
    info!("Fetching user directory");

    let parsed: UsersResponse = get_json(client, &url, "users").await?;
    info!("Directory returned {} user(s)", parsed.users.len());
    Ok(parsed.users)
}

/// Fetches all time entries one user logged inside the reporting window.
pub async fn fetch_time_entries(
    client: &Client,
    base_url: &str,
    user_id: u64,
    window: &ReportWindow,
) -> Result<Vec<TimeEntry>> {
    // Harvest's from/to are inclusive dates, so `to` is the window's last day.
    let url = format!(
        "{base_url}/time_entries?user_id={user_id}&from={}&to={}",
        window.start.format("%Y-%m-%d"),
        window.last_day().format("%Y-%m-%d"),
    );
    info!("Fetching time entries for user {}", user_id);

    let parsed: TimeEntriesResponse = get_json(client, &url, "time_entries").await?;
    info!(
        "User {} has {} entries in the window",
        user_id,
        parsed.time_entries.len()
    );
    Ok(parsed.time_entries)
}

/// Fetches account metadata. Logged at the start of a run, never reported.
pub async fn fetch_company(client: &Client, base_url: &str) -> Result<Company> {
    let url = format!("{base_url}/company");
    get_json(client, &url, "company").await
}

async fn get_json<T: DeserializeOwned>(
    client: &Client,
    url: &str,
    endpoint: &'static str,
) -> Result<T> {
    let response = match client.get(url).send().await {
        Ok(resp) => resp,
        Err(e) => {
            error!("Failed to send request to Harvest API: {}", e);
            return Err(NotifierError::upstream(endpoint, e.to_string()));
        }
    };

    if !response.status().is_success() {
        let status = response.status();
        let error_text = response
            .text()
            .await
            .unwrap_or_else(|_| "Unknown error".to_string());
        error!(
            "Harvest API returned error status {}: {}",
            status, error_text
        );
        return Err(NotifierError::upstream(
            endpoint,
            format!("status {status}: {error_text}"),
        ));
    }

    let text = match response.text().await {
        Ok(text) => text,
        Err(e) => {
            error!("Failed to read response body: {}", e);
            return Err(NotifierError::upstream(endpoint, e.to_string()));
        }
    };

    match serde_json::from_str::<T>(&text) {
        Ok(parsed) => Ok(parsed),
        Err(e) => {
            error!("Failed to parse Harvest response: {}", e);
            error!("Raw response: {}", text);
            Err(NotifierError::upstream(endpoint, e.to_string()))
        }
    }
}

pub mod utils {
    use chrono::{Datelike, Duration, NaiveDate, Utc};
    use chrono_tz::Tz;
    use tracing::info;

    /// Timezone the weekly window is anchored to.
    pub const REPORT_TZ: Tz = chrono_tz::Europe::Prague;

    /// A half-open 7-day reporting span aligned to a Monday.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct ReportWindow {
        pub start: NaiveDate,
        /// Exclusive end, always `start + 7 days`.
        pub end: NaiveDate,
    }

    impl ReportWindow {
        /// The last day the window covers (`end` is exclusive).
        pub fn last_day(&self) -> NaiveDate {
            self.end - Duration::days(1)
        }
    }

    /// The most recent fully elapsed Monday-to-Sunday week in [`REPORT_TZ`].
    pub fn last_full_week() -> ReportWindow {
        let today = Utc::now().with_timezone(&REPORT_TZ).date_naive();
        let window = week_containing(today - Duration::days(7));
        info!(
            "Reporting window: {} to {} (exclusive)",
            window.start, window.end
        );
        window
    }

    /// The Monday-aligned week containing `day`.
    pub fn week_containing(day: NaiveDate) -> ReportWindow {
        let monday = day - Duration::days(day.weekday().num_days_from_monday() as i64);
        ReportWindow {
            start: monday,
            end: monday + Duration::days(7),
        }
    }

    #[cfg(test)]
    mod tests {
        use super::*;

        fn date(y: i32, m: u32, d: u32) -> NaiveDate {
            NaiveDate::from_ymd_opt(y, m, d).unwrap()
        }

        #[test]
        fn week_is_monday_aligned_for_every_weekday() {
            // 2025-04-14 is a Monday.
            for offset in 0..7 {
                let window = week_containing(date(2025, 4, 14) + Duration::days(offset));
                assert_eq!(window.start, date(2025, 4, 14));
                assert_eq!(window.end, date(2025, 4, 21));
            }
        }

        #[test]
        fn last_day_is_start_plus_six() {
            let window = week_containing(date(2025, 4, 16));
            assert_eq!(window.last_day(), window.start + Duration::days(6));
        }
    }
}
