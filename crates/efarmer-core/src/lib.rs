//! Shared domain types and configuration for the E-Farmer services.

pub mod app_config;
pub mod config;
pub mod facilities;
pub mod languages;

use thiserror::Error;

pub use app_config::{AppConfig, Environment, DEFAULT_LOCATOR_LIMIT};
pub use config::{load_app_config, load_app_config_from_env};
pub use facilities::{load_facilities, parse_facilities, Coordinates, Facility, FacilityRegistry};
pub use languages::{Language, UnknownLanguage};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required environment variable: {0}")]
    MissingEnvVar(String),

    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },

    #[error("failed to read facilities file {path}: {source}")]
    FacilitiesFileIo {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse facilities file: {0}")]
    FacilitiesFileParse(#[from] serde_yaml::Error),

    #[error("facility registry validation failed: {0}")]
    Validation(String),
}
