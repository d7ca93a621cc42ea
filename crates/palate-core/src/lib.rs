pub mod app_config;
pub mod config;
pub mod restaurant;
pub mod seed;
pub mod store;

pub use app_config::{AppConfig, Environment, StoreBackend};
pub use config::{load_app_config, load_app_config_from_env};
pub use restaurant::{
    slug_from_title, InvalidRestaurant, MatchPayload, MatchRequest, MatchResult, MatchType, NewRestaurant,
    PlaceCandidate, RestaurantRecord,
};
pub use seed::{load_seed_file, parse_seed_file, RestaurantSeed, SeedFile};
pub use store::{RestaurantStore, StoreError};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required environment variable: {0}")]
    MissingEnvVar(String),

    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },

    #[error("failed to read seed file {path}: {source}")]
    SeedFileIo {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse seed file: {0}")]
    SeedFileParse(#[from] serde_yaml::Error),

    #[error("seed validation failed: {0}")]
    Validation(String),
}
