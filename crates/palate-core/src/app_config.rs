use std::net::SocketAddr;
use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Environment {
    Development,
    Test,
    Production,
}

impl std::fmt::Display for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Environment::Development => write!(f, "development"),
            Environment::Test => write!(f, "test"),
            Environment::Production => write!(f, "production"),
        }
    }
}

/// Which backing restaurant store the binaries talk to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreBackend {
    /// `restaurants` table in Postgres, accessed through `sqlx`.
    Postgres,
    /// `restaurants` table behind a Hasura GraphQL endpoint.
    Hasura,
}

impl std::fmt::Display for StoreBackend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StoreBackend::Postgres => write!(f, "postgres"),
            StoreBackend::Hasura => write!(f, "hasura"),
        }
    }
}

#[derive(Clone)]
pub struct AppConfig {
    pub env: Environment,
    pub bind_addr: SocketAddr,
    pub log_level: String,
    pub store_backend: StoreBackend,
    pub database_url: Option<String>,
    pub db_max_connections: u32,
    pub db_min_connections: u32,
    pub db_acquire_timeout_secs: u64,
    pub hasura_url: Option<String>,
    pub hasura_admin_secret: Option<String>,
    pub hasura_timeout_secs: u64,
    pub hasura_max_retries: u32,
    pub resolve_timeout_secs: u64,
    pub seed_path: PathBuf,
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field("env", &self.env)
            .field("bind_addr", &self.bind_addr)
            .field("log_level", &self.log_level)
            .field("store_backend", &self.store_backend)
            .field(
                "database_url",
                &self.database_url.as_ref().map(|_| "[redacted]"),
            )
            .field("db_max_connections", &self.db_max_connections)
            .field("db_min_connections", &self.db_min_connections)
            .field("db_acquire_timeout_secs", &self.db_acquire_timeout_secs)
            .field("hasura_url", &self.hasura_url)
            .field(
                "hasura_admin_secret",
                &self.hasura_admin_secret.as_ref().map(|_| "[redacted]"),
            )
            .field("hasura_timeout_secs", &self.hasura_timeout_secs)
            .field("hasura_max_retries", &self.hasura_max_retries)
            .field("resolve_timeout_secs", &self.resolve_timeout_secs)
            .field("seed_path", &self.seed_path)
            .finish()
    }
}
