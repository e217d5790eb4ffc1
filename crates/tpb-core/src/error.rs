//! Error types for the TPB scraper
//!
//! Provides a single error enum with human-readable messages
//! that also serializes to its message, for JSON output.

use serde::{Serialize, Serializer};
use thiserror::Error;

/// Error type for all TPB scraper operations
#[derive(Error, Debug)]
pub enum TpbError {
    /// Invalid URL segment model or client configuration
    #[error("Configuration error: {0}")]
    Config(String),

    /// HTTP request failed (network error or non-success status)
    #[error("HTTP request failed: {0}")]
    HttpError(#[from] reqwest::Error),

    /// Failed to parse HTML content
    #[error("Failed to parse HTML: {0}")]
    ParseError(String),

    /// Expected HTML element was not found
    #[error("Element not found: {0}")]
    ElementNotFound(String),

    /// Invalid URL format
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// Rate limited by server (HTTP 429)
    #[error("Rate limited - too many requests")]
    RateLimited,

    /// Page not found on server (HTTP 404)
    #[error("Not found: {0}")]
    NotFound(String),
}

impl Serialize for TpbError {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

/// Result type alias for TPB operations
pub type Result<T> = std::result::Result<T, TpbError>;
