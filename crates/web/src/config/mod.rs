//! Server configuration module

use clap::Parser;

use crate::config::{
    assets::AssetsConfig, db::DatabaseConfig, observability::LoggingConfig,
    server::ServerRuntimeConfig, session::SessionConfig,
};

pub(crate) mod assets;
pub(crate) mod db;
pub(crate) mod observability;
pub(crate) mod server;
pub(crate) mod session;

/// Storefront web server configuration
#[derive(Debug, Parser)]
#[command(name = "storefront-web", about = "Storefront Web Server", long_about = None)]
pub(crate) struct ServerConfig {
    /// Server network settings.
    #[command(flatten)]
    pub server: ServerRuntimeConfig,

    /// Logging output settings.
    #[command(flatten)]
    pub logging: LoggingConfig,

    /// Application database settings.
    #[command(flatten)]
    pub database: DatabaseConfig,

    /// Session cookie settings.
    #[command(flatten)]
    pub session: SessionConfig,

    /// Uploaded asset settings.
    #[command(flatten)]
    pub assets: AssetsConfig,
}

impl ServerConfig {
    /// Load configuration from environment and CLI arguments
    pub(crate) fn load() -> Result<Self, clap::Error> {
        // Load .env file if present (ignore if missing)
        _ = dotenvy::dotenv();

        Self::try_parse()
    }

    /// Get the socket address for binding
    #[must_use]
    pub(crate) fn socket_addr(&self) -> String {
        self.server.socket_addr()
    }
}
