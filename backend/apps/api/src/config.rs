//! Server Configuration
//!
//! Read once at startup from the environment (after `.env` is loaded).

use std::env;
use std::net::SocketAddr;
use std::time::Duration;

use anyhow::Context;
use auth::AuthConfig;

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:3333";
const DEFAULT_MAX_CONNECTIONS: u32 = 5;
const DEFAULT_FRONTEND_ORIGINS: &str = "http://localhost:3000,http://127.0.0.1:3000";

pub struct ServerConfig {
    pub database_url: String,
    pub database_max_connections: u32,
    pub bind_addr: SocketAddr,
    pub frontend_origins: Vec<String>,
    pub auth: AuthConfig,
}

impl ServerConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        let database_url = env::var("DATABASE_URL").context("DATABASE_URL must be set")?;

        let database_max_connections = parse_var("DATABASE_MAX_CONNECTIONS")?
            .unwrap_or(DEFAULT_MAX_CONNECTIONS);

        let bind_addr = match parse_var::<SocketAddr>("BIND_ADDR")? {
            Some(addr) => addr,
            None => DEFAULT_BIND_ADDR.parse()?,
        };

        let frontend_origins = env::var("FRONTEND_ORIGINS")
            .unwrap_or_else(|_| DEFAULT_FRONTEND_ORIGINS.to_string())
            .split(',')
            .map(|origin| origin.trim().to_string())
            .filter(|origin| !origin.is_empty())
            .collect();

        let mut auth = AuthConfig::default();
        if let Some(secs) = parse_var::<u64>("ACCESS_TOKEN_TTL_SECS")? {
            auth.access_token_ttl = Some(Duration::from_secs(secs));
        }
        if let Ok(url) = env::var("RESET_URL_BASE") {
            auth.password_reset_url = url;
        }
        auth.password_pepper = env::var("PASSWORD_PEPPER")
            .ok()
            .filter(|pepper| !pepper.is_empty())
            .map(String::into_bytes);

        auth.validate().context("invalid auth configuration")?;

        Ok(Self {
            database_url,
            database_max_connections,
            bind_addr,
            frontend_origins,
            auth,
        })
    }
}

/// `Ok(None)` when unset, an error when set but unparsable
fn parse_var<T>(name: &str) -> anyhow::Result<Option<T>>
where
    T: std::str::FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match env::var(name) {
        Ok(raw) => raw
            .trim()
            .parse()
            .map(Some)
            .with_context(|| format!("{name} has an invalid value: {raw}")),
        Err(_) => Ok(None),
    }
}
