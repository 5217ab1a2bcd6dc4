use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::time::Duration;

use thiserror::Error;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Environment variable {0} not configured properly")]
    Missing(&'static str),
    #[error("Environment variable {name} has invalid value {value:?}")]
    Invalid { name: &'static str, value: String },
}

#[derive(Debug, Clone)]
pub struct NodeConfig {
    pub bind_addr: SocketAddr,
    /// Upper bound on a single request, including body read and response write.
    pub request_timeout: Duration,
    /// How long in-flight requests may run after a shutdown signal.
    pub shutdown_drain: Duration,
    /// Load the example records on startup.
    pub seed: bool,
}

impl Default for NodeConfig {
    fn default() -> Self {
        Self {
            bind_addr: SocketAddr::new(IpAddr::V4(Ipv4Addr::UNSPECIFIED), 8080),
            request_timeout: Duration::from_millis(1000),
            shutdown_drain: Duration::from_secs(30),
            seed: true,
        }
    }
}

impl NodeConfig {
    /// Reads the process environment. `SERVE_PORT` is required.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let port: u16 = match lookup("SERVE_PORT").filter(|v| !v.is_empty()) {
            Some(raw) => parse_var("SERVE_PORT", raw)?,
            None => return Err(ConfigError::Missing("SERVE_PORT")),
        };
        let host: IpAddr = match lookup("SERVE_HOST") {
            Some(raw) => parse_var("SERVE_HOST", raw)?,
            None => defaults.bind_addr.ip(),
        };
        let request_timeout = match lookup("REQUEST_TIMEOUT_MS") {
            Some(raw) => Duration::from_millis(parse_var("REQUEST_TIMEOUT_MS", raw)?),
            None => defaults.request_timeout,
        };
        let shutdown_drain = match lookup("SHUTDOWN_DRAIN_SECS") {
            Some(raw) => Duration::from_secs(parse_var("SHUTDOWN_DRAIN_SECS", raw)?),
            None => defaults.shutdown_drain,
        };
        let seed = match lookup("SEED_EXAMPLES") {
            Some(raw) => parse_var("SEED_EXAMPLES", raw)?,
            None => defaults.seed,
        };

        Ok(Self {
            bind_addr: SocketAddr::new(host, port),
            request_timeout,
            shutdown_drain,
            seed,
        })
    }
}

fn parse_var<T: std::str::FromStr>(name: &'static str, raw: String) -> Result<T, ConfigError> {
    raw.trim()
        .parse()
        .map_err(|_| ConfigError::Invalid { name, value: raw })
}
