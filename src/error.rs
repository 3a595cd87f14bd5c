//! # Vigil Error
use thiserror::Error;

/// Vigil Error
#[derive(Error, Debug)]
pub enum VigilError {
    /// Parsing Configuration Error
    #[error("Failed to parse the configuration file: {0}")]
    ConfigParseError(String),
    /// IO Error
    #[error("IO Error: {0}")]
    IOError(#[from] std::io::Error),
    /// Yaml Error
    #[error("Yaml Error: {0}")]
    YamlError(#[from] serde_yaml::Error),
    /// JSON Error
    #[error("JSON Error: {0}")]
    JsonError(#[from] serde_json::Error),

    /// Invalid Data
    #[error("Invalid Data: {0}")]
    InvalidData(String),

    /// Authentication Error
    #[error("Authentication Error: {0}")]
    AuthenticationError(String),

    /// VigilClient API Error
    #[error("VigilClient API Error: {0}")]
    VigilClient(String),

    /// Error parsing a datetime
    #[error("{0}")]
    ParseDateTimeError(#[from] chrono::ParseError),

    /// URL Parse Error
    #[error("{0}")]
    UrlParseError(#[from] url::ParseError),

    /// Reqwest Error
    #[error("{0}")]
    ReqwestError(#[from] reqwest::Error),

    /// Unknown Error
    #[error("Unknown Error: {0}")]
    UnknownError(String),
}

impl From<crate::client::ApiError> for VigilError {
    fn from(error: crate::client::ApiError) -> Self {
        if let Some(details) = error.details {
            VigilError::VigilClient(format!("{} - {}", error.message, details))
        } else {
            VigilError::VigilClient(error.message)
        }
    }
}
