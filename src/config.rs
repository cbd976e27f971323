use std::net::SocketAddr;
use std::time::Duration;

const DEFAULT_ADDR: &str = "0.0.0.0:10000";
const DEFAULT_TIMEOUT_SECS: u64 = 10;

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("SEO_INSIGHT_ADDR is not a valid socket address: {0}")]
    Addr(String),
    #[error("SEO_INSIGHT_TIMEOUT_SECS must be a positive integer, got {0:?}")]
    Timeout(String),
}

#[derive(Debug, Clone)]
pub struct Config {
    pub addr: SocketAddr,
    pub timeout: Duration,
    pub insecure_ssl: bool,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let addr_raw = lookup("SEO_INSIGHT_ADDR").unwrap_or_else(|| DEFAULT_ADDR.to_string());
        let addr = addr_raw
            .trim()
            .parse::<SocketAddr>()
            .map_err(|_| ConfigError::Addr(addr_raw.clone()))?;

        let timeout_secs = match lookup("SEO_INSIGHT_TIMEOUT_SECS") {
            Some(raw) => match raw.trim().parse::<u64>() {
                Ok(secs) if secs > 0 => secs,
                _ => return Err(ConfigError::Timeout(raw)),
            },
            None => DEFAULT_TIMEOUT_SECS,
        };

        let insecure_ssl = lookup("SEO_INSIGHT_INSECURE_SSL").as_deref() == Some("1");

        Ok(Config {
            addr,
            timeout: Duration::from_secs(timeout_secs),
            insecure_ssl,
        })
    }
}
