use crate::domain::Decimal;
use crate::engine::{EngineOptions, RankPolicy};
use std::collections::HashMap;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub default_draw_points: Decimal,
    pub perfect_score: Option<Decimal>,
    pub rank_policy: RankPolicy,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid value for {0}: {1}")]
    InvalidValue(String, String),
}

impl Default for Config {
    fn default() -> Self {
        let options = EngineOptions::default();
        Config {
            default_draw_points: options.default_draw_points,
            perfect_score: options.perfect_score,
            rank_policy: options.rank_policy,
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_env_map(std::env::vars().collect())
    }

    pub fn from_env_map(env_map: HashMap<String, String>) -> Result<Self, ConfigError> {
        let default_draw_points = env_map
            .get("STANDINGS_DRAW_POINTS")
            .map(|s| s.trim())
            .filter(|s| !s.is_empty())
            .unwrap_or("1")
            .parse::<Decimal>()
            .map_err(|_| {
                ConfigError::InvalidValue(
                    "STANDINGS_DRAW_POINTS".to_string(),
                    "must be a decimal number".to_string(),
                )
            })?;
        if default_draw_points.is_negative() {
            return Err(ConfigError::InvalidValue(
                "STANDINGS_DRAW_POINTS".to_string(),
                "must not be negative".to_string(),
            ));
        }

        let perfect_score = env_map
            .get("STANDINGS_PERFECT_SCORE")
            .map(|s| s.trim())
            .filter(|s| !s.is_empty())
            .map(str::parse::<Decimal>)
            .transpose()
            .map_err(|_| {
                ConfigError::InvalidValue(
                    "STANDINGS_PERFECT_SCORE".to_string(),
                    "must be a decimal number".to_string(),
                )
            })?;

        let rank_policy = if parse_bool(&env_map, "STANDINGS_SHARED_RANKS")? {
            RankPolicy::Shared
        } else {
            RankPolicy::Strict
        };

        Ok(Config {
            default_draw_points,
            perfect_score,
            rank_policy,
        })
    }

    pub fn engine_options(&self) -> EngineOptions {
        EngineOptions {
            default_draw_points: self.default_draw_points,
            perfect_score: self.perfect_score,
            rank_policy: self.rank_policy,
        }
    }
}

fn parse_bool(env_map: &HashMap<String, String>, key: &str) -> Result<bool, ConfigError> {
    match env_map
        .get(key)
        .map(|s| s.trim().to_ascii_lowercase())
        .as_deref()
    {
        None | Some("") | Some("false") | Some("0") => Ok(false),
        Some("true") | Some("1") => Ok(true),
        Some(other) => Err(ConfigError::InvalidValue(
            key.to_string(),
            format!("must be true or false, got {}", other),
        )),
    }
}
