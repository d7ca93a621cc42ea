//! [`RestaurantStore`] backed by a Postgres pool.

use palate_core::{NewRestaurant, RestaurantRecord, RestaurantStore, StoreError};
use sqlx::PgPool;

use crate::{restaurants, DbError};

/// Postgres-backed restaurant store. Cloning shares the underlying pool.
#[derive(Debug, Clone)]
pub struct PgRestaurantStore {
    pool: PgPool,
}

impl PgRestaurantStore {
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn store_err(error: sqlx::Error) -> StoreError {
    StoreError::from(DbError::from(error))
}

impl RestaurantStore for PgRestaurantStore {
    async fn find_by_external_id(
        &self,
        external_id: &str,
    ) -> Result<Option<RestaurantRecord>, StoreError> {
        let row = restaurants::find_restaurant_by_external_id(&self.pool, external_id)
            .await
            .map_err(store_err)?;
        Ok(row.map(RestaurantRecord::from))
    }

    async fn search_by_name_and_address(
        &self,
        name_pattern: &str,
        address_pattern: &str,
    ) -> Result<Vec<RestaurantRecord>, StoreError> {
        let rows = restaurants::search_restaurants_by_title_and_address(
            &self.pool,
            name_pattern,
            address_pattern,
        )
        .await
        .map_err(store_err)?;
        Ok(rows.into_iter().map(RestaurantRecord::from).collect())
    }

    async fn list_with_coordinates(&self) -> Result<Vec<RestaurantRecord>, StoreError> {
        let rows = restaurants::list_restaurants_with_coordinates(&self.pool)
            .await
            .map_err(store_err)?;
        Ok(rows.into_iter().map(RestaurantRecord::from).collect())
    }

    async fn insert(&self, restaurant: &NewRestaurant) -> Result<RestaurantRecord, StoreError> {
        let row = restaurants::insert_restaurant(&self.pool, restaurant)
            .await
            .map_err(store_err)?;
        Ok(row.into())
    }

    async fn ping(&self) -> Result<(), StoreError> {
        crate::health_check(&self.pool).await.map_err(StoreError::from)
    }
}
