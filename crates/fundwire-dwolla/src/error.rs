//! Error types for the Dwolla API client.

use thiserror::Error;

/// Errors that can occur when using the Dwolla API.
#[derive(Debug, Error)]
pub enum DwollaError {
    /// A required environment variable is not set.
    #[error("{0} environment variable not set")]
    MissingEnv(&'static str),

    /// `DWOLLA_ENV` holds something other than `sandbox` or `production`.
    #[error("Dwolla environment should either be set to `sandbox` or `production`, got `{0}`")]
    InvalidEnvironment(String),

    /// HTTP request failed.
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// JSON parsing failed.
    #[error("Failed to parse JSON response: {0}")]
    Json(#[from] serde_json::Error),

    /// Dwolla answered with a non-success status.
    #[error("Dwolla API error (HTTP {status}) {code}: {message}")]
    Api {
        /// HTTP status code.
        status: u16,
        /// Dwolla error code, e.g. `ValidationError`.
        code: String,
        /// Human readable message.
        message: String,
    },

    /// Rate limit exceeded.
    #[error("Rate limit exceeded")]
    RateLimited,

    /// A creation call succeeded but carried no `Location` header.
    #[error("Response to {0} carried no Location header")]
    MissingLocation(String),

    /// A response body lacked a field the caller asked for.
    #[error("Response is missing field: {0}")]
    MissingField(&'static str),

    /// No exchange partner with the given name.
    #[error("Exchange partner not found: {0}")]
    PartnerNotFound(String),

    /// A value given on the command line or in configuration is not recognized.
    #[error("Invalid value: {0}")]
    InvalidValue(String),
}

impl DwollaError {
    /// HTTP status of an API error, if this is one.
    #[must_use]
    pub const fn status(&self) -> Option<u16> {
        match self {
            Self::Api { status, .. } => Some(*status),
            Self::RateLimited => Some(429),
            _ => None,
        }
    }
}
