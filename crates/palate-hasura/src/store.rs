//! [`RestaurantStore`] backed by Hasura.

use palate_core::{NewRestaurant, RestaurantRecord, RestaurantStore, StoreError};
use serde_json::json;

use crate::client::HasuraClient;
use crate::queries;
use crate::types::{InsertData, RestaurantInsertInput, RestaurantsData};

#[derive(Debug, Clone)]
pub struct HasuraRestaurantStore {
    client: HasuraClient,
}

impl HasuraRestaurantStore {
    #[must_use]
    pub fn new(client: HasuraClient) -> Self {
        Self { client }
    }

    async fn restaurants(
        &self,
        operation: &str,
        query: &str,
        variables: &serde_json::Value,
    ) -> Result<Vec<RestaurantRecord>, StoreError> {
        let data: RestaurantsData = self.client.execute(operation, query, variables).await?;
        Ok(data
            .restaurants
            .into_iter()
            .map(RestaurantRecord::from)
            .collect())
    }
}

impl RestaurantStore for HasuraRestaurantStore {
    async fn find_by_external_id(
        &self,
        external_id: &str,
    ) -> Result<Option<RestaurantRecord>, StoreError> {
        let rows = self
            .restaurants(
                "RestaurantByExternalId",
                &queries::by_external_id(),
                &json!({ "externalId": external_id }),
            )
            .await?;
        Ok(rows.into_iter().next())
    }

    async fn search_by_name_and_address(
        &self,
        name_pattern: &str,
        address_pattern: &str,
    ) -> Result<Vec<RestaurantRecord>, StoreError> {
        self.restaurants(
            "RestaurantsByTitleAndAddress",
            &queries::by_title_and_address(),
            &json!({ "title": name_pattern, "address": address_pattern }),
        )
        .await
    }

    async fn list_with_coordinates(&self) -> Result<Vec<RestaurantRecord>, StoreError> {
        self.restaurants(
            "RestaurantsWithCoordinates",
            &queries::with_coordinates(),
            &json!({}),
        )
        .await
    }

    async fn insert(&self, restaurant: &NewRestaurant) -> Result<RestaurantRecord, StoreError> {
        let variables = json!({ "object": RestaurantInsertInput::from(restaurant) });
        let data: InsertData = self
            .client
            .execute("InsertRestaurant", &queries::insert_one(), &variables)
            .await?;
        data.insert_restaurants_one
            .map(RestaurantRecord::from)
            .ok_or_else(|| StoreError::Malformed("insert_restaurants_one returned null".into()))
    }

    async fn ping(&self) -> Result<(), StoreError> {
        let _: serde_json::Value = self
            .client
            .execute("Ping", queries::PING, &json!({}))
            .await?;
        Ok(())
    }
}
