//! Store selection for CLI commands.

use palate_core::{
    AppConfig, NewRestaurant, RestaurantRecord, RestaurantStore, StoreBackend, StoreError,
};
use palate_db::PgRestaurantStore;
use palate_hasura::{HasuraClient, HasuraRestaurantStore};
use palate_resolver::InMemoryStore;

/// Whichever backend the command runs against.
///
/// [`RestaurantStore`] is not object-safe, so dispatch goes through this enum.
pub(crate) enum ConfiguredStore {
    Postgres(PgRestaurantStore),
    Hasura(HasuraRestaurantStore),
    Memory(InMemoryStore),
}

impl ConfiguredStore {
    /// Connect to the backend named by `PALATE_STORE`.
    pub(crate) async fn connect(config: &AppConfig) -> anyhow::Result<Self> {
        match config.store_backend {
            StoreBackend::Postgres => Ok(Self::Postgres(PgRestaurantStore::new(
                connect_pool(config).await?,
            ))),
            StoreBackend::Hasura => Ok(Self::Hasura(HasuraRestaurantStore::new(
                HasuraClient::from_app_config(config)?,
            ))),
        }
    }

    pub(crate) fn backend_name(&self) -> &'static str {
        match self {
            Self::Postgres(_) => "postgres",
            Self::Hasura(_) => "hasura",
            Self::Memory(_) => "memory",
        }
    }
}

pub(crate) async fn connect_pool(config: &AppConfig) -> anyhow::Result<sqlx::PgPool> {
    let database_url = config
        .database_url
        .as_deref()
        .ok_or_else(|| anyhow::anyhow!("DATABASE_URL is required for the postgres store"))?;
    let pool_config = palate_db::PoolConfig::from_app_config(config);
    Ok(palate_db::connect_pool(database_url, pool_config).await?)
}

impl RestaurantStore for ConfiguredStore {
    async fn find_by_external_id(
        &self,
        external_id: &str,
    ) -> Result<Option<RestaurantRecord>, StoreError> {
        match self {
            Self::Postgres(s) => s.find_by_external_id(external_id).await,
            Self::Hasura(s) => s.find_by_external_id(external_id).await,
            Self::Memory(s) => s.find_by_external_id(external_id).await,
        }
    }

    async fn search_by_name_and_address(
        &self,
        name_pattern: &str,
        address_pattern: &str,
    ) -> Result<Vec<RestaurantRecord>, StoreError> {
        match self {
            Self::Postgres(s) => {
                s.search_by_name_and_address(name_pattern, address_pattern)
                    .await
            }
            Self::Hasura(s) => {
                s.search_by_name_and_address(name_pattern, address_pattern)
                    .await
            }
            Self::Memory(s) => {
                s.search_by_name_and_address(name_pattern, address_pattern)
                    .await
            }
        }
    }

    async fn list_with_coordinates(&self) -> Result<Vec<RestaurantRecord>, StoreError> {
        match self {
            Self::Postgres(s) => s.list_with_coordinates().await,
            Self::Hasura(s) => s.list_with_coordinates().await,
            Self::Memory(s) => s.list_with_coordinates().await,
        }
    }

    async fn insert(&self, restaurant: &NewRestaurant) -> Result<RestaurantRecord, StoreError> {
        match self {
            Self::Postgres(s) => s.insert(restaurant).await,
            Self::Hasura(s) => s.insert(restaurant).await,
            Self::Memory(s) => s.insert(restaurant).await,
        }
    }

    async fn ping(&self) -> Result<(), StoreError> {
        match self {
            Self::Postgres(s) => s.ping().await,
            Self::Hasura(s) => s.ping().await,
            Self::Memory(s) => s.ping().await,
        }
    }
}
