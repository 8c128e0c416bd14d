use crate::error::AppError;
use serde::{Deserialize, Serialize};

#[derive(Deserialize, Serialize, Debug, Clone)]
pub struct Config {
    pub pokemon: PokemonConfig,
    pub session: SessionConfig,
    pub server: ServerConfig,
}

#[derive(Deserialize, Serialize, Debug, Clone)]
pub struct PokemonConfig {
    pub api_url: String,
    pub timeout: u32,
    pub page_size: u32,
    pub max_in_flight: usize,
}

#[derive(Deserialize, Serialize, Debug, Clone)]
pub struct SessionConfig {
    pub username: String,
    pub password: String,
}

#[derive(Deserialize, Serialize, Debug, Clone)]
pub struct ServerConfig {
    pub bind: String,
}

impl Config {
    pub fn from_toml_str(config_str: &str) -> Result<Self, AppError> {
        toml::from_str(config_str).map_err(|e| {
            tracing::error!("Failed to parse config.toml: {}", e);
            AppError::from(e)
        })
    }
}

pub fn load_config() -> Result<Config, AppError> {
    Config::from_toml_str(include_str!("../config/config.toml"))
}
