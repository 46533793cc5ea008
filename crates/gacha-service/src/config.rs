//! Service configuration.

use gacha_core::{DEFAULT_DUPLICATE_REWARD, REWARD_PAYOR};

/// Service configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct ServiceConfig {
    /// Address to listen on (default: "0.0.0.0:4000").
    pub listen_addr: String,

    /// PostgreSQL connection URL.
    pub database_url: String,

    /// Coins granted for rolling a duplicate.
    pub duplicate_reward: i64,

    /// System sentinel identity recorded as the reward payor.
    pub reward_payor: String,

    /// CORS allowed origins.
    pub cors_origins: Vec<String>,

    /// Maximum request body size in bytes.
    pub max_body_bytes: usize,

    /// Request timeout in seconds.
    pub request_timeout_seconds: u64,
}

impl ServiceConfig {
    /// Load configuration from environment variables.
    #[must_use]
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            listen_addr: std::env::var("LISTEN_ADDR").unwrap_or(defaults.listen_addr),
            database_url: std::env::var("DATABASE_URL").unwrap_or(defaults.database_url),
            duplicate_reward: std::env::var("DUPLICATE_REWARD")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(defaults.duplicate_reward),
            reward_payor: std::env::var("REWARD_PAYOR").unwrap_or(defaults.reward_payor),
            cors_origins: std::env::var("CORS_ORIGINS")
                .map(|raw| raw.split(',').map(|s| s.trim().to_string()).collect())
                .unwrap_or(defaults.cors_origins),
            max_body_bytes: std::env::var("MAX_BODY_BYTES")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(defaults.max_body_bytes),
            request_timeout_seconds: std::env::var("REQUEST_TIMEOUT_SECONDS")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(defaults.request_timeout_seconds),
        }
    }
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            listen_addr: "0.0.0.0:4000".into(),
            database_url: "postgres://localhost/gacha".into(),
            duplicate_reward: DEFAULT_DUPLICATE_REWARD,
            reward_payor: REWARD_PAYOR.into(),
            cors_origins: vec!["*".into()],
            max_body_bytes: 1024 * 1024, // 1MB
            request_timeout_seconds: 30,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_core_constants() {
        let config = ServiceConfig::default();
        assert_eq!(config.duplicate_reward, 10);
        assert_eq!(config.reward_payor, "REWARDED");
    }
}
