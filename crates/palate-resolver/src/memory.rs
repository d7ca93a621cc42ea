//! In-memory [`RestaurantStore`] used by tests and the CLI fixture mode.

use chrono::Utc;
use palate_core::{
    slug_from_title, NewRestaurant, RestaurantRecord, RestaurantSeed, RestaurantStore, StoreError,
};
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::normalize::ilike;

/// Records kept in insertion order; that order is the iteration order of
/// every lookup.
#[derive(Debug, Default)]
pub struct InMemoryStore {
    records: RwLock<Vec<RestaurantRecord>>,
}

impl InMemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn from_records(records: Vec<RestaurantRecord>) -> Self {
        Self {
            records: RwLock::new(records),
        }
    }

    /// Build a store from seed entries, assigning fresh ids.
    #[must_use]
    pub fn from_seeds(seeds: &[RestaurantSeed]) -> Self {
        let records = seeds
            .iter()
            .map(|seed| record_from_new(&seed.to_new_restaurant()))
            .collect();
        Self::from_records(records)
    }

    pub async fn len(&self) -> usize {
        self.records.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.records.read().await.is_empty()
    }
}

fn record_from_new(restaurant: &NewRestaurant) -> RestaurantRecord {
    RestaurantRecord {
        id: Uuid::new_v4(),
        external_id: restaurant.external_id.clone(),
        title: restaurant.title.clone(),
        slug: slug_from_title(&restaurant.title),
        address: restaurant.address.clone(),
        city: restaurant.city.clone(),
        state: restaurant.state.clone(),
        postal_code: restaurant.postal_code.clone(),
        country: restaurant.country.clone(),
        latitude: restaurant.latitude,
        longitude: restaurant.longitude,
        image_url: restaurant.image_url.clone(),
        price_level: restaurant.price_level,
        rating: None,
        review_count: 0,
        created_at: Utc::now(),
    }
}

impl RestaurantStore for InMemoryStore {
    async fn find_by_external_id(
        &self,
        external_id: &str,
    ) -> Result<Option<RestaurantRecord>, StoreError> {
        let records = self.records.read().await;
        Ok(records
            .iter()
            .find(|r| r.external_id.as_deref() == Some(external_id))
            .cloned())
    }

    async fn search_by_name_and_address(
        &self,
        name_pattern: &str,
        address_pattern: &str,
    ) -> Result<Vec<RestaurantRecord>, StoreError> {
        let records = self.records.read().await;
        Ok(records
            .iter()
            .filter(|r| ilike(name_pattern, &r.title))
            .filter(|r| {
                r.address
                    .as_deref()
                    .is_some_and(|address| ilike(address_pattern, address))
            })
            .cloned()
            .collect())
    }

    async fn list_with_coordinates(&self) -> Result<Vec<RestaurantRecord>, StoreError> {
        let records = self.records.read().await;
        Ok(records
            .iter()
            .filter(|r| r.coordinates().is_some())
            .cloned()
            .collect())
    }

    async fn insert(&self, restaurant: &NewRestaurant) -> Result<RestaurantRecord, StoreError> {
        let mut records = self.records.write().await;
        if let Some(external_id) = restaurant.external_id.as_deref() {
            if records
                .iter()
                .any(|r| r.external_id.as_deref() == Some(external_id))
            {
                return Err(StoreError::Conflict(format!(
                    "a restaurant with external id '{external_id}' already exists"
                )));
            }
        }
        let record = record_from_new(restaurant);
        records.push(record.clone());
        Ok(record)
    }

    async fn ping(&self) -> Result<(), StoreError> {
        Ok(())
    }
}
