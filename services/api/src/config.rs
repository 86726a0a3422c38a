//! services/api/src/config.rs
//!
//! Defines the application's configuration structure and loading logic.
//!
//! All configuration is loaded from environment variables at startup. The `.env`
//! file is used for local development.

use std::net::SocketAddr;
use std::path::PathBuf;
use tracing::Level;

/// A custom error type for configuration loading failures.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for the environment variable {0}: {1}")]
    InvalidValue(String, String),
}

/// Holds all configuration loaded from the environment at startup.
#[derive(Clone, Debug)]
pub struct Config {
    pub bind_address: SocketAddr,
    pub log_level: Level,
    /// Directory holding the course source and the creator seed files.
    pub data_dir: PathBuf,
    pub cors_origin: String,
    pub session_ttl_days: i64,
}

impl Config {
    /// Loads configuration from environment variables.
    ///
    /// It will look for a `.env` file in the current directory for development,
    /// but this is skipped in test environments to ensure tests are hermetic.
    pub fn from_env() -> Result<Self, ConfigError> {
        if !cfg!(test) {
            dotenvy::dotenv().ok();
        }

        let bind_address_str =
            std::env::var("BIND_ADDRESS").unwrap_or_else(|_| "0.0.0.0:3000".to_string());
        let bind_address = bind_address_str.parse::<SocketAddr>().map_err(|e| {
            ConfigError::InvalidValue("BIND_ADDRESS".to_string(), e.to_string())
        })?;

        let log_level_str = std::env::var("RUST_LOG").unwrap_or_else(|_| "INFO".to_string());
        let log_level = log_level_str.parse::<Level>().map_err(|_| {
            ConfigError::InvalidValue(
                "RUST_LOG".to_string(),
                format!("'{}' is not a valid log level", log_level_str),
            )
        })?;

        let data_dir = std::env::var("DATA_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("./data"));

        let cors_origin = std::env::var("CORS_ORIGIN")
            .unwrap_or_else(|_| "http://localhost:3000".to_string());

        let session_ttl_days = match std::env::var("SESSION_TTL_DAYS") {
            Ok(raw) => raw
                .parse::<i64>()
                .ok()
                .filter(|days| *days > 0)
                .ok_or_else(|| {
                    ConfigError::InvalidValue(
                        "SESSION_TTL_DAYS".to_string(),
                        format!("'{}' is not a positive number of days", raw),
                    )
                })?,
            Err(_) => 30,
        };

        Ok(Self {
            bind_address,
            log_level,
            data_dir,
            cors_origin,
            session_ttl_days,
        })
    }

    pub fn courses_path(&self) -> PathBuf {
        self.data_dir.join("courses.json")
    }

    pub fn students_path(&self) -> PathBuf {
        self.data_dir.join("students.json")
    }

    pub fn landing_pages_path(&self) -> PathBuf {
        self.data_dir.join("landing_pages.json")
    }

    pub fn creator_courses_path(&self) -> PathBuf {
        self.data_dir.join("creator_courses.json")
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            bind_address: SocketAddr::from(([0, 0, 0, 0], 3000)),
            log_level: Level::INFO,
            data_dir: PathBuf::from("./data"),
            cors_origin: "http://localhost:3000".to_string(),
            session_ttl_days: 30,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn data_files_live_under_data_dir() {
        let config = Config {
            data_dir: PathBuf::from("/srv/learnhub"),
            ..Config::default()
        };
        assert_eq!(config.courses_path(), PathBuf::from("/srv/learnhub/courses.json"));
        assert_eq!(
            config.landing_pages_path(),
            PathBuf::from("/srv/learnhub/landing_pages.json")
        );
        assert_eq!(
            config.creator_courses_path(),
            PathBuf::from("/srv/learnhub/creator_courses.json")
        );
    }
}
