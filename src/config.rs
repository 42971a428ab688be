//! Server configuration from command-line flags and `SCORELINE_*` variables.

use std::net::SocketAddr;

use anyhow::bail;
use chrono::Duration;

use crate::api::{Authenticator, Credentials};

pub const DEFAULT_BIND: &str = "0.0.0.0:8080";

#[derive(Debug, Clone, clap::Parser)]
#[command(name = "scoreline", about = "Football match result reporting service")]
pub struct Config {
    /// address to listen on
    #[arg(long, env = "SCORELINE_BIND", default_value = DEFAULT_BIND)]
    pub bind: SocketAddr,

    /// HS256 key that signs and verifies bearer tokens
    #[arg(long, env = "SCORELINE_JWT_SECRET", hide_env_values = true)]
    pub jwt_secret: String,

    /// lifetime of an issued token
    #[arg(long, env = "SCORELINE_JWT_EXPIRATION_HOURS", default_value_t = 24)]
    pub jwt_expiration_hours: u32,

    /// account accepted by auth.login
    #[arg(long, env = "SCORELINE_ADMIN_USERNAME", default_value = "admin")]
    pub admin_username: String,

    #[arg(long, env = "SCORELINE_ADMIN_PASSWORD", hide_env_values = true)]
    pub admin_password: String,

    /// tracing filter directives, e.g. "info,scoreline=debug"
    #[arg(long, env = "SCORELINE_LOG", default_value = "info")]
    pub log_filter: String,
}

impl Config {
    pub fn validate(&self) -> anyhow::Result<()> {
        if self.jwt_secret.trim().is_empty() {
            bail!("the JWT secret must not be empty");
        }
        if self.jwt_expiration_hours == 0 {
            bail!("the JWT expiration must be at least one hour");
        }
        if self.admin_username.trim().is_empty() || self.admin_password.is_empty() {
            bail!("the admin username and password must not be empty");
        }
        if self.log_filter.trim().is_empty() {
            bail!("the log filter must not be empty");
        }
        Ok(())
    }

    pub fn authenticator(&self) -> Authenticator {
        Authenticator::new(
            &self.jwt_secret,
            Duration::hours(i64::from(self.jwt_expiration_hours)),
            Credentials::new(self.admin_username.clone(), self.admin_password.clone()),
        )
    }
}
