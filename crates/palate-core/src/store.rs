//! The restaurant store contract consumed by the resolver.
//!
//! The resolver never talks to a query language directly; every backend
//! (Postgres, Hasura, in-memory) implements [`RestaurantStore`] and converts
//! its own error type into [`StoreError`].

use std::future::Future;

use thiserror::Error;

use crate::restaurant::{NewRestaurant, RestaurantRecord};

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("store backend error: {0}")]
    Backend(#[source] Box<dyn std::error::Error + Send + Sync>),

    #[error("store returned malformed data: {0}")]
    Malformed(String),

    /// A write collided with an existing row on a unique key.
    #[error("store write conflict: {0}")]
    Conflict(String),
}

impl StoreError {
    pub fn backend<E>(error: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        Self::Backend(Box::new(error))
    }
}

/// Read access to stored restaurants, plus the single write used by import.
pub trait RestaurantStore: Send + Sync {
    /// Zero or one record whose external id equals `external_id` exactly.
    fn find_by_external_id(
        &self,
        external_id: &str,
    ) -> impl Future<Output = Result<Option<RestaurantRecord>, StoreError>> + Send;

    /// Records whose title matches `name_pattern` and whose address matches
    /// `address_pattern`, both `%`-wildcard patterns compared case-insensitively.
    fn search_by_name_and_address(
        &self,
        name_pattern: &str,
        address_pattern: &str,
    ) -> impl Future<Output = Result<Vec<RestaurantRecord>, StoreError>> + Send;

    /// Every record with non-null latitude and longitude, in a stable order.
    fn list_with_coordinates(
        &self,
    ) -> impl Future<Output = Result<Vec<RestaurantRecord>, StoreError>> + Send;

    fn insert(
        &self,
        restaurant: &NewRestaurant,
    ) -> impl Future<Output = Result<RestaurantRecord, StoreError>> + Send;

    /// Cheap liveness probe used by health checks.
    fn ping(&self) -> impl Future<Output = Result<(), StoreError>> + Send;
}
