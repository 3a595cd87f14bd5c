//! # Utilities

pub mod config;
