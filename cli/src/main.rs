#![deny(unsafe_code)]

use anyhow::{Result, anyhow};
use log::{debug, info, warn};

mod cli;

use vigil::report::TimeWindow;
use vigil::{Config, VigilClient};

fn client(config: &Config, arguments: &cli::Arguments) -> Result<(VigilClient, String)> {
    // CLI / environment overrides take precedence over the profile
    if let (Some(url), Some(token)) = (&arguments.url, &arguments.token) {
        debug!("Using URL and token overrides");
        let client = VigilClient::init()
            .base(url.clone())?
            .token(token.clone())
            .build()?;
        let account = arguments
            .account
            .clone()
            .ok_or_else(|| anyhow!("No account provided, use --account"))?;
        return Ok((client, account));
    }

    let profile = config.profile(&arguments.profile)?;
    debug!("Using profile: {}", arguments.profile);

    let client = match &arguments.token {
        Some(token) => VigilClient::init()
            .base(profile.url.to_string())?
            .token(token.clone())
            .build()?,
        None => profile.client()?,
    };
    let account = arguments
        .account
        .clone()
        .or_else(|| profile.account.clone())
        .ok_or_else(|| anyhow!("No account provided, use --account or set it in the profile"))?;

    Ok((client, account))
}

#[tokio::main]
async fn main() -> Result<()> {
    let arguments = cli::init();

    let config = match Config::load(&arguments.config) {
        Ok(config) => config,
        Err(error) => {
            warn!("Failed to load configuration: {}", error);
            Config::default()
        }
    };

    let (client, account) = client(&config, &arguments)?;
    info!("Platform - '{}'", client.url());
    info!("Client - v{}", client.version());

    let lookback = arguments.lookback.unwrap_or(config.report.lookback_hours);
    let window = TimeWindow::lookback(lookback)?;
    info!(
        "Report window: {} -> {} (account '{}')",
        window.start_time(),
        window.end_time(),
        account
    );

    let rows = vigil::report::run(&client, &window, &account).await?;
    info!("Report rows: {}", rows.len());

    vigil::report::csv::write_report(std::io::stdout().lock(), &rows)?;

    Ok(())
}
