//! # Vigil
//!
//! Vigil reports on the container images running across your fleet, the
//! Kubernetes clusters hosting them, and the fixable vulnerabilities
//! affecting them.
//!
#![deny(missing_docs, unused_imports)]
#![deny(unsafe_code)]
#![doc = include_str!("../README.md")]

pub mod client;
pub mod error;
pub mod report;
pub mod utils;

pub use client::VigilClient;
pub use error::VigilError;
pub use utils::config::Config;

/// Vigil Banner
pub const VIGIL_BANNER: &str = r#"__     ___       _ _
\ \   / (_) __ _(_) |
 \ \ / /| |/ _` | | |
  \ V / | | (_| | | |
   \_/  |_|\__, |_|_|
           |___/"#;

/// Vigil Version
pub const VIGIL_VERSION: &str = env!("CARGO_PKG_VERSION");
