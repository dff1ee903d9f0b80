//! Configuration module for the Recipe Explorer backend.
//!
//! All configuration is loaded from environment variables with sensible defaults.

use std::env;
use std::net::SocketAddr;
use std::path::PathBuf;

use thiserror::Error;

/// Default text generation model.
pub const DEFAULT_GEMINI_MODEL: &str = "gemini-2.5-flash";

/// Configuration loading failures.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid RECIPE_BIND_ADDR '{value}': {source}")]
    InvalidBindAddr {
        value: String,
        source: std::net::AddrParseError,
    },

    #[error("Invalid boolean for {key}: '{value}'")]
    InvalidBool { key: &'static str, value: String },
}

/// Allowed CORS origins.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CorsOrigins {
    Any,
    List(Vec<String>),
}

impl CorsOrigins {
    /// Parse `*` or a comma-separated origin list.
    pub fn parse(raw: &str) -> Self {
        if raw.trim() == "*" {
            return CorsOrigins::Any;
        }
        CorsOrigins::List(
            raw.split(',')
                .map(|origin| origin.trim().to_string())
                .filter(|origin| !origin.is_empty())
                .collect(),
        )
    }
}

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    /// Path to the SQLite document store
    pub db_path: PathBuf,
    /// Address to bind the server to
    pub bind_addr: SocketAddr,
    /// Log level (trace, debug, info, warn, error)
    pub log_level: String,
    /// Origins allowed by the CORS layer
    pub cors_origins: CorsOrigins,
    /// Insert the sample recipes on startup when the collection is empty
    pub seed_sample_data: bool,
    /// API key for the Gemini text generation API
    pub gemini_api_key: Option<String>,
    /// Gemini model name
    pub gemini_model: String,
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let db_path = env::var("RECIPE_DB_PATH")
            .unwrap_or_else(|_| "./data/recipes.sqlite".to_string())
            .into();

        let raw_addr = env::var("RECIPE_BIND_ADDR").unwrap_or_else(|_| "0.0.0.0:8000".to_string());
        let bind_addr = raw_addr
            .parse()
            .map_err(|source| ConfigError::InvalidBindAddr {
                value: raw_addr.clone(),
                source,
            })?;

        let log_level = env::var("RECIPE_LOG_LEVEL").unwrap_or_else(|_| "info".to_string());

        let cors_origins =
            CorsOrigins::parse(&env::var("RECIPE_CORS_ORIGINS").unwrap_or_else(|_| "*".into()));

        let seed_sample_data = match env::var("RECIPE_SEED_SAMPLE_DATA") {
            Ok(value) => parse_bool("RECIPE_SEED_SAMPLE_DATA", &value)?,
            Err(_) => false,
        };

        // An empty key counts as not configured.
        let gemini_api_key = env::var("GEMINI_API_KEY")
            .ok()
            .filter(|key| !key.is_empty());

        let gemini_model =
            env::var("GEMINI_MODEL").unwrap_or_else(|_| DEFAULT_GEMINI_MODEL.to_string());

        Ok(Self {
            db_path,
            bind_addr,
            log_level,
            cors_origins,
            seed_sample_data,
            gemini_api_key,
            gemini_model,
        })
    }
}

fn parse_bool(key: &'static str, value: &str) -> Result<bool, ConfigError> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" | "" => Ok(false),
        _ => Err(ConfigError::InvalidBool {
            key,
            value: value.to_string(),
        }),
    }
}
