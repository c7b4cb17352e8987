use std::{env, net::SocketAddr, time::Duration};

use crate::{
    error::{ItineraryError, Result},
    services::anthropic_client::DEFAULT_BASE_URL,
};

pub const DEFAULT_MODEL: &str = "claude-haiku-4-5";
pub const DEFAULT_MAX_TOKENS_CAP: u32 = 16_384;
pub const DEFAULT_TIMEOUT_SECS: u64 = 120;
pub const DEFAULT_HOST: &str = "0.0.0.0";
pub const DEFAULT_PORT: u16 = 8080;

/// Process configuration, read once at startup
#[derive(Clone)]
pub struct PlannerConfig {
    /// Generation service credential; `None` makes every request fail with a 500
    pub api_key: Option<String>,
    pub base_url: String,
    pub model: String,
    pub max_tokens_cap: u32,
    pub timeout: Duration,
    pub host: String,
    pub port: u16,
}

impl std::fmt::Debug for PlannerConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PlannerConfig")
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .field("base_url", &self.base_url)
            .field("model", &self.model)
            .field("max_tokens_cap", &self.max_tokens_cap)
            .field("timeout", &self.timeout)
            .field("host", &self.host)
            .field("port", &self.port)
            .finish()
    }
}

impl Default for PlannerConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: DEFAULT_BASE_URL.to_string(),
            model: DEFAULT_MODEL.to_string(),
            max_tokens_cap: DEFAULT_MAX_TOKENS_CAP,
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
        }
    }
}

impl PlannerConfig {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build from any key lookup; unset and blank values fall back to defaults.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());
        let defaults = Self::default();

        Ok(Self {
            api_key: get("ANTHROPIC_API_KEY"),
            base_url: get("ANTHROPIC_BASE_URL").unwrap_or(defaults.base_url),
            model: get("ITINERARY_MODEL").unwrap_or(defaults.model),
            max_tokens_cap: parse_var("ITINERARY_MAX_TOKENS", get("ITINERARY_MAX_TOKENS"))?
                .unwrap_or(defaults.max_tokens_cap),
            timeout: parse_var::<u64>("ITINERARY_TIMEOUT_SECS", get("ITINERARY_TIMEOUT_SECS"))?
                .map(Duration::from_secs)
                .unwrap_or(defaults.timeout),
            host: get("HOST").unwrap_or(defaults.host),
            port: parse_var("PORT", get("PORT"))?.unwrap_or(defaults.port),
        })
    }

    pub fn bind_addr(&self) -> Result<SocketAddr> {
        format!("{}:{}", self.host, self.port)
            .parse()
            .map_err(|err| {
                ItineraryError::Config(format!(
                    "invalid bind address {}:{}: {}",
                    self.host, self.port, err
                ))
            })
    }
}

fn parse_var<T>(key: &str, value: Option<String>) -> Result<Option<T>>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    value
        .map(|raw| {
            raw.trim().parse::<T>().map_err(|err| {
                ItineraryError::Config(format!("{key} must be a number, got {raw:?}: {err}"))
            })
        })
        .transpose()
}
