//! Configuration

use std::collections::HashMap;
use std::path::PathBuf;

use log::debug;
use url::Url;

use crate::client::VigilClient;
use crate::error::VigilError as Error;
use crate::report::window::MAX_LOOKBACK_HOURS;

/// Application Configuration
#[derive(Debug, Default, serde::Serialize, serde::Deserialize)]
pub struct Config {
    /// Named credential profiles
    #[serde(default)]
    pub profiles: HashMap<String, ProfileConfig>,

    /// Report Configuration
    #[serde(default)]
    pub report: ReportConfig,
}

impl Config {
    /// Load the Configuration
    pub fn load(path: &PathBuf) -> Result<Self, Error> {
        debug!("Loading Configuration: {:?}", path);
        let config = std::fs::read_to_string(path)?;
        Ok(serde_yaml::from_str(config.as_str())?)
    }

    /// Save the Configuration
    pub fn save(&self, path: &PathBuf) -> Result<(), Error> {
        debug!("Saving Configuration: {:?}", path);
        let config = serde_yaml::to_string(self)?;
        std::fs::write(path, config)?;
        Ok(())
    }

    /// Look up a profile by name
    pub fn profile(&self, name: &str) -> Result<&ProfileConfig, Error> {
        self.profiles.get(name).ok_or_else(|| {
            Error::ConfigParseError(format!("Unknown profile: '{}'", name))
        })
    }
}

/// Credential profile for one platform tenant
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct ProfileConfig {
    /// Platform API base URL
    pub url: Url,
    /// API Token
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,
    /// Default account identifier to scope machine lookups
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub account: Option<String>,
}

impl ProfileConfig {
    /// Build an authenticated client from this profile
    pub fn client(&self) -> Result<VigilClient, Error> {
        let Some(token) = &self.token else {
            return Err(Error::AuthenticationError(
                "Profile has no API token".to_string(),
            ));
        };
        VigilClient::init()
            .base(self.url.to_string())?
            .token(token.to_string())
            .build()
    }
}

/// Report Configuration
#[derive(Debug, serde::Serialize, serde::Deserialize)]
pub struct ReportConfig {
    /// Lookback window in hours, 1 hour to 7 days
    #[serde(default = "default_lookback")]
    pub lookback_hours: i64,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            lookback_hours: default_lookback(),
        }
    }
}

fn default_lookback() -> i64 {
    MAX_LOOKBACK_HOURS
}
