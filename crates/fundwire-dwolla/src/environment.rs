//! Dwolla deployment environments.

use crate::error::DwollaError;
use std::{fmt, str::FromStr};

/// Which Dwolla deployment to talk to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Environment {
    /// Sandbox, for testing with simulated money.
    Sandbox,
    /// Production.
    Production,
}

impl Environment {
    /// Base URL of the REST API.
    #[must_use]
    pub const fn api_url(&self) -> &'static str {
        match self {
            Self::Sandbox => "https://api-sandbox.dwolla.com",
            Self::Production => "https://api.dwolla.com",
        }
    }

    /// OAuth token endpoint.
    #[must_use]
    pub const fn token_url(&self) -> &'static str {
        match self {
            Self::Sandbox => "https://api-sandbox.dwolla.com/token",
            Self::Production => "https://api.dwolla.com/token",
        }
    }

    /// Get the value used in `DWOLLA_ENV`.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Sandbox => "sandbox",
            Self::Production => "production",
        }
    }
}

impl FromStr for Environment {
    type Err = DwollaError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "sandbox" => Ok(Self::Sandbox),
            "production" => Ok(Self::Production),
            other => Err(DwollaError::InvalidEnvironment(other.to_string())),
        }
    }
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
