use serde::Deserialize;
use std::{env, fs, path::Path};
use tracing::info;

use crate::error::{NotifierError, Result};

const DEFAULT_CONFIG_PATH: &str = "config.json";

fn default_granularity() -> f64 {
    0.25
}

/// Run configuration, loaded once from `config.json` before the run starts.
/// Key names match the deployed config file.
#[derive(Deserialize, Debug, Clone)]
pub struct Config {
    #[serde(rename = "ACCESS_TOKEN")]
    pub access_token: String,
    #[serde(rename = "ACCOUNT_ID")]
    pub account_id: String,
    #[serde(rename = "SLACK_WEBHOOK_URL")]
    pub slack_webhook_url: String,
    #[serde(rename = "SLACK_WEBHOOK_URL_TEST")]
    pub slack_webhook_url_test: String,
    /// Fraction of an hour each entry is rounded up to before summation.
    #[serde(default = "default_granularity")]
    pub rounding_granularity: f64,
}

impl Config {
    /// Loads from `config.json`, or the path in `NOTIFIER_CONFIG` if set.
    pub fn load() -> Result<Self> {
        let path =
            env::var("NOTIFIER_CONFIG").unwrap_or_else(|_| DEFAULT_CONFIG_PATH.to_string());
        info!("Loading configuration from {}", path);
        Self::from_file(Path::new(&path))
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let raw = fs::read_to_string(path).map_err(|e| {
            NotifierError::Config(format!("cannot read {}: {}", path.display(), e))
        })?;
        let config: Config = serde_json::from_str(&raw).map_err(|e| {
            NotifierError::Config(format!("invalid config {}: {}", path.display(), e))
        })?;
        if config.rounding_granularity <= 0.0 {
            return Err(NotifierError::Config(format!(
                "rounding_granularity must be positive, got {}",
                config.rounding_granularity
            )));
        }
        Ok(config)
    }

    /// The delivery target is fixed at build time: the `staging` feature
    /// switches delivery to the test channel.
    pub fn webhook_url(&self) -> &str {
        if cfg!(feature = "staging") {
            &self.slack_webhook_url_test
        } else {
            &self.slack_webhook_url
        }
    }
}
