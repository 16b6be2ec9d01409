use std::env;

pub const DEFAULT_COMPLETION_URL: &str = "https://api.studio.nebius.com/v1/chat/completions";
pub const DEFAULT_MODEL: &str = "openai/gpt-oss-120b";

/// Read once at startup and passed explicitly to the route factory; no
/// runtime reload.
#[derive(Debug, Clone)]
pub struct Config {
    pub api_key: String,
    pub completion_url: String,
    pub model: String,
    pub frontend_origin: String,
    pub host: String,
    pub port: u16,
}

impl Config {
    pub fn from_env() -> Self {
        Self {
            api_key: env::var("API_KEY").expect("API_KEY must be set"),
            completion_url: env::var("COMPLETION_URL")
                .unwrap_or_else(|_| DEFAULT_COMPLETION_URL.to_string()),
            model: env::var("COMPLETION_MODEL").unwrap_or_else(|_| DEFAULT_MODEL.to_string()),
            frontend_origin: env::var("FRONTEND_URL")
                .unwrap_or_else(|_| "http://localhost:3000".to_string()),
            host: env::var("SERVER_HOST").unwrap_or_else(|_| "127.0.0.1".to_string()),
            port: env::var("PORT").map_or_else(|_| 8080, |value| value.parse().unwrap_or(8080)),
        }
    }
}

pub struct RedisSettings {
    pub redis_host: String,
    pub redis_port: u16,
    pub redis_password: String,
}

impl RedisSettings {
    pub fn from_env() -> Self {
        RedisSettings {
            redis_host: env::var("REDIS_HOST").unwrap_or("".to_string()),
            redis_port: env::var("REDIS_PORT")
                .map_or_else(|_| 0, |value| value.parse().unwrap_or(0)),
            redis_password: env::var("REDIS_PASSWORD").unwrap_or("".to_string()),
        }
    }

    pub fn is_configured(&self) -> bool {
        !self.redis_host.is_empty() && self.redis_port != 0
    }
}
