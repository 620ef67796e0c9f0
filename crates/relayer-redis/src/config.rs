use crate::{RedisError, Result};

#[derive(Debug, Clone)]
pub struct RedisConfig {
    /// Redis connection URL
    pub url: String,
}

impl RedisConfig {
    pub fn from_env() -> Result<Self> {
        let url = std::env::var("REDIS_URL")
            .map_err(|_| RedisError::Connection("REDIS_URL must be set".to_string()))?;
        Ok(Self { url })
    }
}
