//! Storefront Web Server

use std::process::ExitCode;

use salvo::prelude::*;
use tracing::{error, info};

use storefront_app::context::AppContext;

use crate::{
    config::ServerConfig,
    state::{SessionSettings, State},
    views::Views,
};

#[cfg(not(target_env = "msvc"))]
use tikv_jemallocator::Jemalloc;

#[cfg(not(target_env = "msvc"))]
#[global_allocator]
static GLOBAL: Jemalloc = Jemalloc;

mod assets;
mod auth;
mod config;
mod extensions;
mod forms;
mod healthcheck;
mod observability;
mod products;
mod router;
mod session;
mod shutdown;
mod state;
#[cfg(test)]
mod test_helpers;
mod views;

/// Storefront web server entry point
#[tokio::main]
pub async fn main() -> ExitCode {
    let config = match ServerConfig::load() {
        Ok(config) => config,
        Err(config_error) => {
            #[expect(
                clippy::print_stderr,
                reason = "logging not initialized yet, must use eprintln for config errors"
            )]
            {
                eprintln!("Configuration error: {config_error}");
            }

            return ExitCode::FAILURE;
        }
    };

    if let Err(init_error) = observability::init(&config) {
        #[expect(
            clippy::print_stderr,
            reason = "the subscriber failed to install, so there is nowhere else to report"
        )]
        {
            eprintln!("Observability error: {init_error}");
        }

        return ExitCode::FAILURE;
    }

    let views = match Views::new() {
        Ok(views) => views,
        Err(view_error) => {
            error!("failed to load templates: {view_error}");

            return ExitCode::FAILURE;
        }
    };

    let app = match AppContext::from_database_url(
        &config.database.database_url,
        config.assets.assets_dir.clone(),
    )
    .await
    {
        Ok(app) => app,
        Err(init_error) => {
            error!("failed to initialize app context: {init_error}");

            return ExitCode::FAILURE;
        }
    };

    let state = State::shared(app, views, SessionSettings::from(&config.session));

    let addr = config.socket_addr();

    info!("Starting server on {addr}");

    let listener = TcpListener::new(addr).bind().await;

    let server = Server::new(listener);

    let handle = server.handle();
    let grace = config.server.shutdown_grace();

    tokio::spawn(async move {
        if let Err(error) = shutdown::listen(handle, grace).await {
            error!("failed to listen for shutdown signal: {error}");
        }
    });

    server
        .serve(router::app_service(state, config.assets.max_upload_bytes))
        .await;

    info!("server stopped");

    ExitCode::SUCCESS
}
