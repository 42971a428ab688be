use std::error::Error;
use std::sync::Arc;

use clap::Parser;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use scoreline::api;
use scoreline::config::Config;
use scoreline::store::InMemoryStore;

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    let config = Config::parse();
    config.validate()?;

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_new(&config.log_filter)?)
        .init();
    debug!(
        bind = %config.bind,
        log_filter = %config.log_filter,
        admin = %config.admin_username,
        token_hours = config.jwt_expiration_hours,
        "config loaded"
    );

    let service = Arc::new(api::service(InMemoryStore::new(), config.authenticator()));
    info!(commands = service.commands().len(), "service ready");

    let listener = tokio::net::TcpListener::bind(config.bind).await?;
    api::serve(service, listener, shutdown_signal()).await?;

    info!("shut down");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::warn!(error = %err, "could not listen for ctrl-c");
        std::future::pending::<()>().await;
    }
}
