//! Shared configuration and dataset model for placelink.
//!
//! The dataset is a set of human-curated JSON files: one trip-facts file
//! (stays, stations, events, walking loops) and a directory of per-city
//! rolodex files. Both carry [`LocationRecord`] objects that the enrichment
//! pass mutates in place.

mod app_config;
mod config;
mod dataset;
mod json;

pub use app_config::AppConfig;
pub use config::{load_app_config, load_app_config_from_env};
pub use dataset::{
    load_rolodex_file, load_trip_facts, save_rolodex_file, save_trip_facts, LocationRecord,
    RolodexEntry, SectionItem, TripFacts, WalkingLoop,
};
pub use json::to_ascii_pretty;

use std::path::PathBuf;

use thiserror::Error;

/// Errors from loading or validating configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required environment variable: {0}")]
    MissingEnvVar(String),

    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },
}

/// Errors from reading or writing dataset files.
#[derive(Debug, Error)]
pub enum DatasetError {
    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid JSON in {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("failed to serialize {path}: {source}")]
    Serialize {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}
