//! Service configuration loaded via OrthoConfig.
//!
//! Every value can come from CLI flags, `USER_SERVICE_*` environment
//! variables or a configuration file. Unset values fall back to the defaults
//! below.

use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::time::Duration;

use ortho_config::OrthoConfig;
use serde::Deserialize;
use url::Url;

use crate::domain::{LookupFailurePolicy, ParseLookupFailurePolicyError};
use crate::outbound::persistence::PoolConfig;

const DEFAULT_PORT: u16 = 6000;
const DEFAULT_BIND_HOST: IpAddr = IpAddr::V4(Ipv4Addr::UNSPECIFIED);
const DEFAULT_COMPANY_SERVICE_URL: &str = "http://localhost:5000/companies";
const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 10;
const DEFAULT_DB_MAX_CONNECTIONS: u32 = 10;
const DEFAULT_DB_CHECKOUT_TIMEOUT_SECS: u64 = 30;

/// Errors raised while interpreting loaded settings.
#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    /// The bind host is not an IP address.
    #[error("invalid bind host `{value}`: {source}")]
    BindHost {
        value: String,
        #[source]
        source: std::net::AddrParseError,
    },
    /// The company service URL does not parse.
    #[error("invalid company service URL `{value}`: {source}")]
    CompanyServiceUrl {
        value: String,
        #[source]
        source: url::ParseError,
    },
    /// The lookup failure policy is unknown.
    #[error(transparent)]
    LookupFailurePolicy(#[from] ParseLookupFailurePolicyError),
    /// A zero request timeout would fail every call.
    #[error("request timeout must be at least one second")]
    ZeroTimeout,
    /// The database pool needs at least one connection.
    #[error("database pool must allow at least one connection")]
    ZeroPoolSize,
    /// A zero checkout timeout would fail every query.
    #[error("database checkout timeout must be at least one second")]
    ZeroCheckoutTimeout,
}

/// Runtime settings for the user service.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "USER_SERVICE")]
pub struct ServiceSettings {
    /// TCP port to listen on.
    pub port: Option<u16>,
    /// Interface address to bind.
    pub bind_host: Option<String>,
    /// Company-creation endpoint of the company service.
    pub company_service_url: Option<String>,
    /// PostgreSQL connection URL. Without it users are kept in memory.
    pub database_url: Option<String>,
    /// Bound on every store and company service call.
    pub request_timeout_secs: Option<u64>,
    /// `abort` or `treat_as_available`.
    pub lookup_failure_policy: Option<String>,
    /// Upper bound on pooled database connections.
    pub db_max_connections: Option<u32>,
    /// How long a query waits for a pooled connection.
    pub db_checkout_timeout_secs: Option<u64>,
}

impl ServiceSettings {
    /// Socket address the HTTP server binds to.
    ///
    /// # Errors
    ///
    /// Returns [`SettingsError::BindHost`] when the host is not an IP address.
    pub fn bind_addr(&self) -> Result<SocketAddr, SettingsError> {
        let host = match self.bind_host.as_deref() {
            None => DEFAULT_BIND_HOST,
            Some(value) => value.parse().map_err(|source| SettingsError::BindHost {
                value: value.to_owned(),
                source,
            })?,
        };
        Ok(SocketAddr::new(host, self.port.unwrap_or(DEFAULT_PORT)))
    }

    /// Endpoint companies are created at.
    ///
    /// # Errors
    ///
    /// Returns [`SettingsError::CompanyServiceUrl`] for unparsable URLs.
    pub fn company_service_url(&self) -> Result<Url, SettingsError> {
        let value = self
            .company_service_url
            .as_deref()
            .unwrap_or(DEFAULT_COMPANY_SERVICE_URL);
        Url::parse(value).map_err(|source| SettingsError::CompanyServiceUrl {
            value: value.to_owned(),
            source,
        })
    }

    /// Configured database URL, ignoring blank values.
    pub fn database_url(&self) -> Option<&str> {
        self.database_url
            .as_deref()
            .map(str::trim)
            .filter(|url| !url.is_empty())
    }

    /// Per-call deadline for downstream operations.
    ///
    /// # Errors
    ///
    /// Returns [`SettingsError::ZeroTimeout`] when configured as zero.
    pub fn request_timeout(&self) -> Result<Duration, SettingsError> {
        match self
            .request_timeout_secs
            .unwrap_or(DEFAULT_REQUEST_TIMEOUT_SECS)
        {
            0 => Err(SettingsError::ZeroTimeout),
            secs => Ok(Duration::from_secs(secs)),
        }
    }

    /// Database pool for the configured URL, if any.
    ///
    /// # Errors
    ///
    /// Returns [`SettingsError::ZeroPoolSize`] or
    /// [`SettingsError::ZeroCheckoutTimeout`] for zero values.
    pub fn pool_config(&self) -> Result<Option<PoolConfig>, SettingsError> {
        let Some(database_url) = self.database_url() else {
            return Ok(None);
        };
        let max_size = match self
            .db_max_connections
            .unwrap_or(DEFAULT_DB_MAX_CONNECTIONS)
        {
            0 => return Err(SettingsError::ZeroPoolSize),
            size => size,
        };
        let checkout_timeout = match self
            .db_checkout_timeout_secs
            .unwrap_or(DEFAULT_DB_CHECKOUT_TIMEOUT_SECS)
        {
            0 => return Err(SettingsError::ZeroCheckoutTimeout),
            secs => Duration::from_secs(secs),
        };
        Ok(Some(
            PoolConfig::new(database_url)
                .with_max_size(max_size)
                .with_connection_timeout(checkout_timeout),
        ))
    }

    /// What registration does when the email pre-check fails.
    ///
    /// # Errors
    ///
    /// Returns [`SettingsError::LookupFailurePolicy`] for unknown names.
    pub fn lookup_failure_policy(&self) -> Result<LookupFailurePolicy, SettingsError> {
        self.lookup_failure_policy
            .as_deref()
            .map_or(Ok(LookupFailurePolicy::default()), str::parse)
            .map_err(SettingsError::from)
    }
}
