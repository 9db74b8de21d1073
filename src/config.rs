// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Application configuration loaded from environment variables.

use std::env;

use crate::models::CalorieModel;

/// Application configuration, loaded once at startup.
#[derive(Debug, Clone)]
pub struct Config {
    /// GCP project ID
    pub gcp_project_id: String,
    /// UID of the user whose workouts are summarized
    pub user_id: String,
    /// Calorie estimation parameters
    pub calories: CalorieModel,
    /// Take calendar days in UTC instead of the machine's local zone
    pub use_utc_calendar: bool,
}

impl Config {
    /// Config for testing only.
    pub fn test_default() -> Self {
        Self {
            gcp_project_id: "test-project".to_string(),
            user_id: "test-user".to_string(),
            calories: CalorieModel::default(),
            use_utc_calendar: true,
        }
    }

    /// Load configuration from environment variables.
    ///
    /// A `.env` file is read first if present.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok(); // Load .env file if present

        let defaults = CalorieModel::default();

        Ok(Self {
            gcp_project_id: env::var("GCP_PROJECT_ID").unwrap_or_else(|_| "local-dev".to_string()),
            user_id: env::var("KRATOS_USER_ID")
                .map(|v| v.trim().to_string())
                .ok()
                .filter(|v| !v.is_empty())
                .ok_or(ConfigError::Missing("KRATOS_USER_ID"))?,
            calories: CalorieModel {
                met: parse_optional("CALORIE_MET")?.unwrap_or(defaults.met),
                weight_kg: parse_optional("BODY_WEIGHT_KG")?.unwrap_or(defaults.weight_kg),
            },
            use_utc_calendar: parse_optional("SUMMARY_TIMEZONE_UTC")?.unwrap_or(false),
        })
    }
}

/// Parse an optional variable; unset or empty means `None`.
fn parse_optional<T: std::str::FromStr>(name: &'static str) -> Result<Option<T>, ConfigError> {
    match env::var(name) {
        Ok(raw) if !raw.trim().is_empty() => raw
            .trim()
            .parse()
            .map(Some)
            .map_err(|_| ConfigError::Invalid(name, raw)),
        _ => Ok(None),
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    Missing(&'static str),

    #[error("Invalid value for {0}: {1:?}")]
    Invalid(&'static str, String),
}

#[cfg(test)]
mod tests {
    use super::*;

    // Environment is process-wide; keep everything touching it in one test.
    #[test]
    fn test_config_from_env() {
        env::set_var("KRATOS_USER_ID", " uid-42 ");
        env::set_var("CALORIE_MET", "8.0");
        env::remove_var("BODY_WEIGHT_KG");
        env::remove_var("SUMMARY_TIMEZONE_UTC");

        let config = Config::from_env().expect("Config should load");
        assert_eq!(config.user_id, "uid-42");
        assert_eq!(config.calories.met, 8.0);
        assert_eq!(config.calories.weight_kg, 75.0);
        assert!(!config.use_utc_calendar);

        env::set_var("BODY_WEIGHT_KG", "heavy");
        assert!(matches!(
            Config::from_env(),
            Err(ConfigError::Invalid("BODY_WEIGHT_KG", _))
        ));
        env::remove_var("BODY_WEIGHT_KG");
        env::remove_var("CALORIE_MET");
    }
}
