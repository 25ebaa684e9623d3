//! Product sync configuration loaded via OrthoConfig.
//!
//! Every field is optional so an empty environment yields the behaviour the
//! sales system was built against: the public DummyJSON endpoint, a limit of
//! 100, and no request timeout.

use std::ffi::OsString;
use std::time::Duration;

use ortho_config::OrthoConfig;
use serde::Deserialize;
use thiserror::Error;
use url::Url;

use crate::outbound::catalogue::{
    CatalogueHttpOptions, DEFAULT_CATALOGUE_ENDPOINT, DEFAULT_PRODUCT_LIMIT, DEFAULT_USER_AGENT,
};

const PROGRAM_NAME: &str = "product-sync";

/// Errors raised while loading or interpreting settings.
#[derive(Debug, Error)]
pub enum SettingsError {
    /// Layered configuration could not be read.
    #[error("failed to load product sync settings: {message}")]
    Load {
        /// Loader error rendered as text.
        message: String,
    },
    /// The configured endpoint is not a URL.
    #[error("invalid catalogue endpoint '{endpoint}': {source}")]
    InvalidEndpoint {
        /// Endpoint as configured.
        endpoint: String,
        /// Parser failure.
        #[source]
        source: url::ParseError,
    },
    /// The configured limit was zero.
    #[error("product limit must be at least 1")]
    ZeroLimit,
    /// The configured timeout was zero seconds.
    #[error("timeout must be at least 1 second when set")]
    ZeroTimeout,
}

/// Configuration values controlling the catalogue request.
#[derive(Debug, Clone, Default, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "PRODUCT_SYNC")]
pub struct ProductSyncSettings {
    /// Catalogue products endpoint.
    pub endpoint: Option<String>,
    /// Number of products requested.
    pub limit: Option<u32>,
    /// Whole-request timeout in seconds; unset waits indefinitely.
    pub timeout_seconds: Option<u64>,
    /// User-agent sent to the catalogue.
    pub user_agent: Option<String>,
}

impl ProductSyncSettings {
    /// Load settings from configuration files and `PRODUCT_SYNC_*`
    /// environment variables.
    ///
    /// # Errors
    ///
    /// Returns [`SettingsError::Load`] when a source cannot be parsed.
    pub fn from_environment() -> Result<Self, SettingsError> {
        Self::load_from_iter([OsString::from(PROGRAM_NAME)]).map_err(|error| {
            SettingsError::Load {
                message: error.to_string(),
            }
        })
    }

    /// Replace endpoint and limit with explicit values where given.
    #[must_use]
    pub fn with_overrides(mut self, endpoint: Option<String>, limit: Option<u32>) -> Self {
        if endpoint.is_some() {
            self.endpoint = endpoint;
        }
        if limit.is_some() {
            self.limit = limit;
        }
        self
    }

    /// Return the configured endpoint, falling back to the default.
    ///
    /// # Errors
    ///
    /// Returns [`SettingsError::InvalidEndpoint`] when the value is not a URL.
    pub fn endpoint(&self) -> Result<Url, SettingsError> {
        let raw = self
            .endpoint
            .as_deref()
            .unwrap_or(DEFAULT_CATALOGUE_ENDPOINT);
        Url::parse(raw).map_err(|source| SettingsError::InvalidEndpoint {
            endpoint: raw.to_owned(),
            source,
        })
    }

    /// Return the configured limit, falling back to the default.
    ///
    /// # Errors
    ///
    /// Returns [`SettingsError::ZeroLimit`] when the limit is zero.
    pub fn limit(&self) -> Result<u32, SettingsError> {
        match self.limit.unwrap_or(DEFAULT_PRODUCT_LIMIT) {
            0 => Err(SettingsError::ZeroLimit),
            limit => Ok(limit),
        }
    }

    /// Return the configured timeout, or `None` for no timeout.
    ///
    /// # Errors
    ///
    /// Returns [`SettingsError::ZeroTimeout`] when the timeout is zero.
    pub fn timeout(&self) -> Result<Option<Duration>, SettingsError> {
        match self.timeout_seconds {
            Some(0) => Err(SettingsError::ZeroTimeout),
            Some(seconds) => Ok(Some(Duration::from_secs(seconds))),
            None => Ok(None),
        }
    }

    /// Return the configured user-agent, falling back to the default.
    pub fn user_agent(&self) -> &str {
        self.user_agent.as_deref().unwrap_or(DEFAULT_USER_AGENT)
    }

    /// Assemble adapter options from these settings.
    ///
    /// # Errors
    ///
    /// Propagates [`Self::limit`] and [`Self::timeout`] validation errors.
    pub fn http_options(&self) -> Result<CatalogueHttpOptions, SettingsError> {
        Ok(CatalogueHttpOptions {
            limit: self.limit()?,
            timeout: self.timeout()?,
            user_agent: self.user_agent().to_owned(),
        })
    }
}
