use std::env;
use std::path::PathBuf;

use crate::error::ConfigError;

const TOKEN_ENV: &str = "TELEGRAM_TOKEN";
const STATE_PATH_ENV: &str = "STATE_PATH";
const GYM_NAME_ENV: &str = "GYM_NAME";

const DEFAULT_STATE_PATH: &str = "./state.json";
const DEFAULT_GYM_NAME: &str = "Alfa Fitness";

#[derive(Debug, Clone)]
pub struct Config {
    pub token: String,
    pub state_path: PathBuf,
    pub gym_name: String,
}

/// То, что нужно обработчикам из конфигурации. Токен сюда не попадает.
#[derive(Debug, Clone)]
pub struct GymInfo {
    pub name: String,
}

impl Config {
    /// Читает конфигурацию из окружения (`.env` подгружается заранее в `main`).
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_vars(|name| env::var(name).ok())
    }

    pub fn from_vars(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let token = lookup(TOKEN_ENV)
            .map(|t| t.trim().to_string())
            .filter(|t| !t.is_empty())
            .ok_or(ConfigError::Missing(TOKEN_ENV))?;

        let state_path = match lookup(STATE_PATH_ENV) {
            Some(path) if path.trim().is_empty() => {
                return Err(ConfigError::Invalid {
                    name: STATE_PATH_ENV,
                    message: "path is empty".to_string(),
                })
            }
            Some(path) => PathBuf::from(path),
            None => PathBuf::from(DEFAULT_STATE_PATH),
        };

        let gym_name = lookup(GYM_NAME_ENV)
            .filter(|n| !n.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_GYM_NAME.to_string());

        Ok(Self {
            token,
            state_path,
            gym_name,
        })
    }

    pub fn gym_info(&self) -> GymInfo {
        GymInfo {
            name: self.gym_name.clone(),
        }
    }
}
