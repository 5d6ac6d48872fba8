//! HTTP server configuration object and helpers.

use std::net::SocketAddr;
use std::time::Duration;

use url::Url;
use user_service::domain::LookupFailurePolicy;
use user_service::outbound::persistence::DbPool;

#[cfg(feature = "metrics")]
use actix_web_prom::PrometheusMetrics;

/// Builder-style configuration for creating the HTTP server.
pub struct ServerConfig {
    pub(crate) bind_addr: SocketAddr,
    pub(crate) company_endpoint: Url,
    pub(crate) request_timeout: Duration,
    pub(crate) lookup_failure_policy: LookupFailurePolicy,
    pub(crate) db_pool: Option<DbPool>,
    #[cfg(feature = "metrics")]
    pub(crate) prometheus: Option<PrometheusMetrics>,
}

impl ServerConfig {
    /// Configuration with the in-memory store and the default lookup
    /// failure policy.
    #[must_use]
    pub fn new(bind_addr: SocketAddr, company_endpoint: Url, request_timeout: Duration) -> Self {
        Self {
            bind_addr,
            company_endpoint,
            request_timeout,
            lookup_failure_policy: LookupFailurePolicy::default(),
            db_pool: None,
            #[cfg(feature = "metrics")]
            prometheus: None,
        }
    }

    /// Persist users in PostgreSQL through `pool`.
    #[must_use]
    pub fn with_db_pool(mut self, pool: DbPool) -> Self {
        self.db_pool = Some(pool);
        self
    }

    /// Override what registration does when the email pre-check fails.
    #[must_use]
    pub fn with_lookup_failure_policy(mut self, policy: LookupFailurePolicy) -> Self {
        self.lookup_failure_policy = policy;
        self
    }

    #[cfg(feature = "metrics")]
    /// Attach Prometheus middleware to the configuration.
    #[must_use]
    pub fn with_metrics(mut self, prometheus: Option<PrometheusMetrics>) -> Self {
        self.prometheus = prometheus;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn new_configs_default_to_memory_and_abort() {
        let config = ServerConfig::new(
            SocketAddr::from(([127, 0, 0, 1], 6000)),
            Url::parse("http://localhost:5000/companies").expect("url"),
            Duration::from_secs(10),
        );
        assert!(config.db_pool.is_none());
        assert_eq!(config.lookup_failure_policy, LookupFailurePolicy::Abort);

        let config = config.with_lookup_failure_policy(LookupFailurePolicy::TreatAsAvailable);
        assert_eq!(
            config.lookup_failure_policy,
            LookupFailurePolicy::TreatAsAvailable
        );
    }
}
