//! Client configuration.
//!
//! Provides the `ClientConfig` struct used by every Quire interface to reach
//! the GraphQL endpoint.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::util::{is_http_url, normalize_text_option};

pub const DEFAULT_API_URL: &str = "http://localhost:3000/graphql";
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct ClientConfig {
    #[serde(default = "default_api_url")]
    pub api_url: String,
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
}

fn default_api_url() -> String {
    DEFAULT_API_URL.to_string()
}

const fn default_request_timeout_secs() -> u64 {
    DEFAULT_REQUEST_TIMEOUT_SECS
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_url: default_api_url(),
            request_timeout_secs: DEFAULT_REQUEST_TIMEOUT_SECS,
        }
    }
}

impl ClientConfig {
    pub fn new(api_url: impl Into<String>) -> Result<Self> {
        Self {
            api_url: api_url.into(),
            ..Self::default()
        }
        .normalized()
    }

    /// Validate and normalize the configuration.
    ///
    /// The endpoint must be an http(s) URL; surrounding whitespace and a
    /// trailing `/` are removed. A zero timeout is rejected.
    pub fn normalized(self) -> Result<Self> {
        let api_url = normalize_text_option(Some(self.api_url)).ok_or_else(|| {
            Error::InvalidConfiguration("API URL must not be empty".to_string())
        })?;
        if !is_http_url(&api_url) {
            return Err(Error::InvalidConfiguration(
                "API URL must include http:// or https://".to_string(),
            ));
        }
        if self.request_timeout_secs == 0 {
            return Err(Error::InvalidConfiguration(
                "Request timeout must be at least one second".to_string(),
            ));
        }

        Ok(Self {
            api_url: api_url.trim_end_matches('/').to_string(),
            request_timeout_secs: self.request_timeout_secs,
        })
    }

    pub const fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}
