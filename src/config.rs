use std::collections::HashMap;
use thiserror::Error;

#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub database_path: String,
    pub admin_token: Option<String>,
    pub discord_webhook_url: Option<String>,
    pub order_expires_minutes: i64,
    pub payment_network: String,
    pub payment_address: String,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    MissingEnv(String),
    #[error("Invalid value for {0}: {1}")]
    InvalidValue(String, String),
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_env_map(std::env::vars().collect())
    }

    #[cfg_attr(not(test), allow(dead_code))]
    pub fn from_env_map(env_map: HashMap<String, String>) -> Result<Self, ConfigError> {
        let port = env_map
            .get("PORT")
            .map(|s| s.as_str())
            .unwrap_or("8080")
            .parse::<u16>()
            .map_err(|_| {
                ConfigError::InvalidValue("PORT".to_string(), "must be a valid u16".to_string())
            })?;

        let database_path = env_map
            .get("DATABASE_PATH")
            .cloned()
            .ok_or_else(|| ConfigError::MissingEnv("DATABASE_PATH".to_string()))?;

        let admin_token = env_map
            .get("ADMIN_TOKEN")
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty());

        let discord_webhook_url = env_map
            .get("DISCORD_WEBHOOK_URL")
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty());

        let order_expires_minutes = env_map
            .get("ORDER_EXPIRES_MINUTES")
            .map(|s| s.as_str())
            .unwrap_or("5")
            .parse::<i64>()
            .ok()
            .filter(|m| *m > 0)
            .ok_or_else(|| {
                ConfigError::InvalidValue(
                    "ORDER_EXPIRES_MINUTES".to_string(),
                    "must be a positive integer".to_string(),
                )
            })?;

        let payment_network = env_map
            .get("PAYMENT_NETWORK")
            .cloned()
            .unwrap_or_else(|| "TRC20".to_string());

        let payment_address = env_map
            .get("PAYMENT_ADDRESS")
            .cloned()
            .ok_or_else(|| ConfigError::MissingEnv("PAYMENT_ADDRESS".to_string()))?;

        Ok(Config {
            port,
            database_path,
            admin_token,
            discord_webhook_url,
            order_expires_minutes,
            payment_network,
            payment_address,
        })
    }

    /// Order payment deadline, in milliseconds from creation.
    pub fn expiry_window_ms(&self) -> i64 {
        self.order_expires_minutes * 60 * 1000
    }
}
