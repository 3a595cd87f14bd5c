//! # Vigil Rust Client Library
//!
//! This library provides a client for the security platform's search API.
//!
//! ```no_run
//! # use anyhow::Result;
//! use vigil::VigilClient;
//!
//! #[tokio::main]
//! async fn main() -> Result<()> {
//!     let client = VigilClient::init()
//!         .base("https://example.lacework.net")?
//!         .token("my-api-token".to_string())
//!         .build()?;
//!
//!     Ok(())
//! }
//! ```

use log::{debug, warn};
use url::Url;

pub mod entities;
pub mod search;

pub use search::{Filter, SearchRequest, TimeFilter};

use crate::{VIGIL_VERSION, VigilError};

/// Maximum number of records a single search will materialize across all
/// pages. Matches the platform's documented result-set limit.
pub const MAX_RESULT_SET: usize = 500_000;

/// A single page of a search response
#[derive(Debug, serde::Serialize, serde::Deserialize)]
pub struct SearchPage<T>
where
    T: serde::Serialize + Send,
{
    /// Data Response
    pub data: Vec<T>,
    /// Paging state, absent on the final page of some endpoints
    #[serde(skip_serializing_if = "Option::is_none")]
    pub paging: Option<Paging>,
}

/// Search response paging state
#[derive(Debug, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Paging {
    /// Rows in this page
    pub rows: u64,
    /// Total rows across all pages
    pub total_rows: u64,
    /// Page URLs
    pub urls: PagingUrls,
}

/// Paging URLs
#[derive(Debug, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PagingUrls {
    /// Absolute URL of the next page, if any
    pub next_page: Option<String>,
}

/// API Error
#[derive(Debug, serde::Serialize, serde::Deserialize)]
pub struct ApiError {
    /// Error Message
    pub message: String,
    /// Error Details
    #[serde(default)]
    pub details: Option<String>,
}

/// Vigil REST Client
#[derive(Debug, Clone)]
pub struct VigilClient {
    version: String,
    /// Base URL
    url: Url,
    /// Web Client
    client: reqwest::Client,
    /// API Token
    token: Option<String>,
}

impl VigilClient {
    /// Initialize a new Vigil Client Builder
    pub fn init() -> VigilClientBuilder {
        VigilClientBuilder::new()
    }

    /// Get the Vigil Version
    pub fn version(&self) -> &str {
        &self.version
    }

    /// Get the URL of the client
    pub fn url(&self) -> &Url {
        &self.url
    }

    /// Get the Base URL + Path
    pub(crate) fn base(&self, path: &str) -> Result<Url, url::ParseError> {
        let base = self.url.path().trim_end_matches('/');
        self.url.join(&format!("{}{}", base, path))
    }

    /// Run a search against the given endpoint, transparently following
    /// `nextPage` links until the result set is exhausted.
    ///
    /// All pages are materialized in memory; the search stops early with a
    /// warning once [`MAX_RESULT_SET`] records have been collected.
    pub async fn search<T>(
        &self,
        path: &str,
        request: &SearchRequest,
    ) -> Result<Vec<T>, VigilError>
    where
        T: serde::Serialize + serde::de::DeserializeOwned + Send,
    {
        debug!("Searching: {}", path);
        let mut records: Vec<T> = Vec::new();
        let mut response = self.post(path, request).await?;

        loop {
            let mut page: SearchPage<T> = Self::parse(response).await?;
            records.append(&mut page.data);

            let Some(next) = page.paging.and_then(|paging| paging.urls.next_page) else {
                break;
            };
            if records.len() >= MAX_RESULT_SET {
                warn!(
                    "Search '{}' hit the {} record limit, truncating results",
                    path, MAX_RESULT_SET
                );
                break;
            }
            debug!("Fetching next page: {}", next);
            response = self.get_page(&next).await?;
        }

        debug!("Search '{}' returned {} records", path, records.len());
        Ok(records)
    }

    /// Parse a response body, turning non-2xx responses into errors
    async fn parse<T>(response: reqwest::Response) -> Result<T, VigilError>
    where
        T: serde::de::DeserializeOwned,
    {
        let status = response.status();
        if status.is_success() {
            Ok(response.json().await?)
        } else {
            match response.json::<ApiError>().await {
                Ok(error) => Err(error.into()),
                Err(_) => Err(VigilError::VigilClient(format!(
                    "Unexpected status code: {}",
                    status
                ))),
            }
        }
    }

    /// Client POST Request
    pub async fn post<T>(&self, path: &str, json: &T) -> Result<reqwest::Response, VigilError>
    where
        T: serde::Serialize + Send + Sync,
    {
        Ok(self
            .client
            .post(self.base(path)?)
            .header("Authorization", self.token.clone().unwrap_or_default())
            .json(json)
            .send()
            .await?)
    }

    /// GET a pagination URL returned by a previous search response
    async fn get_page(&self, url: &str) -> Result<reqwest::Response, VigilError> {
        Ok(self
            .client
            .get(Url::parse(url)?)
            .header("Authorization", self.token.clone().unwrap_or_default())
            .send()
            .await?)
    }
}

/// Vigil Client Builder
#[derive(Debug, Default)]
pub struct VigilClientBuilder {
    url: Option<Url>,
    token: Option<String>,
}

impl VigilClientBuilder {
    /// Create a new Vigil Client Builder
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the Base URL
    pub fn base(mut self, url: impl Into<String>) -> Result<Self, VigilError> {
        self.url = Some(Url::parse(&url.into())?);
        Ok(self)
    }

    /// Set the API Token
    pub fn token(mut self, token: String) -> Self {
        self.token = Some(token);
        self
    }

    /// Build the Vigil Client
    pub fn build(self) -> Result<VigilClient, VigilError> {
        if let Some(url) = self.url {
            let client = reqwest::Client::builder()
                .user_agent(format!("vigil/{}", VIGIL_VERSION))
                .timeout(std::time::Duration::from_secs(30))
                .build()?;

            log::debug!("Setting up Vigil Client for {}", url);

            Ok(VigilClient {
                version: VIGIL_VERSION.to_string(),
                client,
                url,
                token: self.token,
            })
        } else {
            Err(VigilError::UnknownError("Base URL not set".to_string()))
        }
    }
}
