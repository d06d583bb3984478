use std::env;

use tracing::{error, info};

use harvest_notifier::{
    config::Config,
    helpers::harvest,
    service::{NotifierService, DEFAULT_ROLE},
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();

    // Single optional positional argument overriding the target role tag.
    let role = env::args().nth(1).unwrap_or_else(|| DEFAULT_ROLE.to_string());
    info!("Starting weekly hours notifier for role: {}", role);

    let config = Config::load()?;
    let harvest_client = harvest::harvest_client_init(&config.access_token, &config.account_id)?;
    let service = NotifierService::new(harvest_client, config);

    if let Err(e) = service.run(&role).await {
        error!("Weekly report run failed: {}", e);
        return Err(e.into());
    }

    Ok(())
}
