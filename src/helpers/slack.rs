use reqwest::Client;
use serde_json::json;
use tracing::{error, info};

use crate::error::{NotifierError, Result};

/// Posts `text` as a single chat message to the webhook. Terminal step of a
/// run; no retry is attempted on failure.
pub async fn send(client: &Client, webhook_url: &str, text: &str) -> Result<()> {
    info!("Posting report to webhook");

    let response = match client
        .post(webhook_url)
        .json(&json!({ "text": text }))
        .send()
        .await
    {
        Ok(resp) => resp,
        Err(e) => {
            error!("Failed to send webhook request: {}", e);
            return Err(NotifierError::delivery(e.to_string()));
        }
    };

    let status = response.status();
    if !status.is_success() {
        let error_text = response
            .text()
            .await
            .unwrap_or_else(|_| "Unknown error".to_string());
        error!("Webhook returned error status {}: {}", status, error_text);
        return Err(NotifierError::delivery(format!(
            "status {status}: {error_text}"
        )));
    }

    info!("Report delivered");
    Ok(())
}
