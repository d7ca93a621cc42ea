use crate::app_config::{AppConfig, Environment, StoreBackend};
use crate::ConfigError;

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if required env vars are missing or values are invalid.
pub fn load_app_config() -> Result<AppConfig, ConfigError> {
    dotenvy::dotenv().ok();
    load_app_config_from_env()
}

/// Load application configuration from environment variables already in the process.
///
/// Unlike [`load_app_config`], this does NOT load `.env` files.
///
/// # Errors
///
/// Returns `ConfigError` if required env vars are missing or values are invalid.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Build application configuration using the provided env-var lookup function.
///
/// Parsing is decoupled from the process environment so tests can drive it
/// with a plain `HashMap`.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    use std::net::SocketAddr;
    use std::path::PathBuf;

    let require = |var: &str| -> Result<String, ConfigError> {
        lookup(var)
            .ok()
            .filter(|v| !v.trim().is_empty())
            .ok_or_else(|| ConfigError::MissingEnvVar(var.to_string()))
    };

    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let parse_addr = |var: &str, default: &str| -> Result<SocketAddr, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<SocketAddr>()
            .map_err(|e| ConfigError::InvalidEnvVar {
                var: var.to_string(),
                reason: e.to_string(),
            })
    };

    let parse_u32 = |var: &str, default: &str| -> Result<u32, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<u32>().map_err(|e| ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: e.to_string(),
        })
    };

    let parse_u64 = |var: &str, default: &str| -> Result<u64, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<u64>().map_err(|e| ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: e.to_string(),
        })
    };

    let env = parse_environment(&or_default("PALATE_ENV", "development"));
    let store_backend = parse_store_backend(&or_default("PALATE_STORE", "postgres"))?;

    let bind_addr = parse_addr("PALATE_BIND_ADDR", "0.0.0.0:3000")?;
    let log_level = or_default("PALATE_LOG_LEVEL", "info");
    let seed_path = PathBuf::from(or_default("PALATE_SEED_PATH", "./config/restaurants.yaml"));

    let database_url = match store_backend {
        StoreBackend::Postgres => Some(require("DATABASE_URL")?),
        StoreBackend::Hasura => lookup("DATABASE_URL").ok(),
    };
    let db_max_connections = parse_u32("PALATE_DB_MAX_CONNECTIONS", "10")?;
    let db_min_connections = parse_u32("PALATE_DB_MIN_CONNECTIONS", "1")?;
    let db_acquire_timeout_secs = parse_u64("PALATE_DB_ACQUIRE_TIMEOUT_SECS", "10")?;

    let hasura_url = match store_backend {
        StoreBackend::Hasura => Some(require("PALATE_HASURA_URL")?),
        StoreBackend::Postgres => lookup("PALATE_HASURA_URL").ok(),
    };
    let hasura_admin_secret = lookup("PALATE_HASURA_ADMIN_SECRET")
        .ok()
        .filter(|s| !s.is_empty());
    let hasura_timeout_secs = parse_u64("PALATE_HASURA_TIMEOUT_SECS", "15")?;
    let hasura_max_retries = parse_u32("PALATE_HASURA_MAX_RETRIES", "2")?;

    let resolve_timeout_secs = parse_u64("PALATE_RESOLVE_TIMEOUT_SECS", "10")?;
    if resolve_timeout_secs == 0 {
        return Err(ConfigError::InvalidEnvVar {
            var: "PALATE_RESOLVE_TIMEOUT_SECS".to_string(),
            reason: "must be greater than zero".to_string(),
        });
    }

    Ok(AppConfig {
        env,
        bind_addr,
        log_level,
        store_backend,
        database_url,
        db_max_connections,
        db_min_connections,
        db_acquire_timeout_secs,
        hasura_url,
        hasura_admin_secret,
        hasura_timeout_secs,
        hasura_max_retries,
        resolve_timeout_secs,
        seed_path,
    })
}

/// Parse a string into an `Environment` variant.
///
/// Unrecognized values default to `Environment::Development`.
fn parse_environment(s: &str) -> Environment {
    match s {
        "production" => Environment::Production,
        "test" => Environment::Test,
        _ => Environment::Development,
    }
}

fn parse_store_backend(s: &str) -> Result<StoreBackend, ConfigError> {
    match s.trim().to_ascii_lowercase().as_str() {
        "postgres" | "postgresql" => Ok(StoreBackend::Postgres),
        "hasura" => Ok(StoreBackend::Hasura),
        other => Err(ConfigError::InvalidEnvVar {
            var: "PALATE_STORE".to_string(),
            reason: format!("expected 'postgres' or 'hasura', got '{other}'"),
        }),
    }
}
