//! Application settings and the HTTP server configuration object.

use std::net::{IpAddr, SocketAddr};

use ortho_config::OrthoConfig;
use serde::Deserialize;

use crate::inbound::http::identity_config::IdentitySettings;
use crate::outbound::persistence::DbPool;

const DEFAULT_HOST: &str = "0.0.0.0";
const DEFAULT_POOL_MAX_SIZE: u32 = 10;

/// Settings loaded from CLI flags and `VOLUNTEER_*` environment variables.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "VOLUNTEER")]
pub struct AppSettings {
    /// Interface to bind, defaults to all interfaces.
    pub host: Option<String>,
    /// Port to bind.
    #[ortho_config(default = 5000)]
    pub port: u16,
    /// PostgreSQL URL. Without one the service keeps data in memory.
    pub database_url: Option<String>,
    /// Upper bound on pooled database connections.
    pub pool_max_size: Option<u32>,
}

/// Error raised when the configured bind address is not an IP address.
#[derive(Debug, thiserror::Error)]
#[error("invalid bind host {host:?}: {source}")]
pub struct BindAddrError {
    host: String,
    #[source]
    source: std::net::AddrParseError,
}

impl AppSettings {
    pub fn host(&self) -> &str {
        self.host.as_deref().unwrap_or(DEFAULT_HOST)
    }

    pub fn port(&self) -> u16 {
        self.port
    }

    pub fn pool_max_size(&self) -> u32 {
        self.pool_max_size.unwrap_or(DEFAULT_POOL_MAX_SIZE)
    }

    /// Database URL, ignoring blank values.
    pub fn database_url(&self) -> Option<&str> {
        self.database_url
            .as_deref()
            .map(str::trim)
            .filter(|url| !url.is_empty())
    }

    /// Socket address built from [`Self::host`] and [`Self::port`].
    ///
    /// # Errors
    /// Returns [`BindAddrError`] when the host is not an IP literal.
    pub fn bind_addr(&self) -> Result<SocketAddr, BindAddrError> {
        let host = self.host();
        host.parse::<IpAddr>()
            .map(|ip| SocketAddr::new(ip, self.port()))
            .map_err(|source| BindAddrError {
                host: host.to_owned(),
                source,
            })
    }
}

/// Builder-style configuration for creating the HTTP server.
pub struct ServerConfig {
    pub(crate) bind_addr: SocketAddr,
    pub(crate) identity: IdentitySettings,
    pub(crate) db_pool: Option<DbPool>,
}

impl ServerConfig {
    pub fn new(bind_addr: SocketAddr, identity: IdentitySettings) -> Self {
        Self {
            bind_addr,
            identity,
            db_pool: None,
        }
    }

    /// Attach a database pool; repositories then persist to PostgreSQL.
    #[must_use]
    pub fn with_db_pool(mut self, pool: DbPool) -> Self {
        self.db_pool = Some(pool);
        self
    }

    pub fn bind_addr(&self) -> SocketAddr {
        self.bind_addr
    }
}
