//! HTTP server configuration object and helpers.

use std::net::SocketAddr;

use actix_web::cookie::{Key, SameSite};

use kavamap::domain::checkin::DEFAULT_CHECK_IN_POINTS;
use kavamap::outbound::persistence::DbPool;

#[cfg(feature = "metrics")]
use actix_web_prom::PrometheusMetrics;

/// Builder-style configuration for creating the HTTP server.
pub struct ServerConfig {
    pub(crate) key: Key,
    pub(crate) cookie_secure: bool,
    pub(crate) same_site: SameSite,
    pub(crate) bind_addr: SocketAddr,
    pub(crate) pool: DbPool,
    pub(crate) check_in_points: i32,
    #[cfg(feature = "metrics")]
    pub(crate) prometheus: Option<PrometheusMetrics>,
}

impl ServerConfig {
    #[must_use]
    pub fn new(
        key: Key,
        cookie_secure: bool,
        same_site: SameSite,
        bind_addr: SocketAddr,
        pool: DbPool,
    ) -> Self {
        Self {
            key,
            cookie_secure,
            same_site,
            bind_addr,
            pool,
            check_in_points: DEFAULT_CHECK_IN_POINTS,
            #[cfg(feature = "metrics")]
            prometheus: None,
        }
    }

    /// Override the points awarded per check-in.
    #[must_use]
    pub fn with_check_in_points(mut self, points: i32) -> Self {
        self.check_in_points = points;
        self
    }

    /// Return the socket address the server will bind to.
    #[must_use]
    pub fn bind_addr(&self) -> SocketAddr {
        self.bind_addr
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

    // The config lives in the binary crate; domain types resolve through
    // the library name, not `crate::`.
    #[test]
    fn default_award_comes_from_the_domain_constant() {
        assert_eq!(DEFAULT_CHECK_IN_POINTS, 10);
    }
}
