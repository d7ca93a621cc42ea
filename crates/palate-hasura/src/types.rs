//! GraphQL envelope and row types for the Hasura `restaurants` table.

use chrono::{DateTime, Utc};
use palate_core::{NewRestaurant, RestaurantRecord};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Serialize)]
pub(crate) struct GraphQlRequest<'a, V: Serialize> {
    pub query: &'a str,
    pub variables: V,
}

/// Standard GraphQL response envelope. Hasura may return `data` alongside
/// `errors`; any error wins.
#[derive(Debug, Deserialize)]
pub(crate) struct GraphQlResponse<T> {
    pub data: Option<T>,
    #[serde(default)]
    pub errors: Vec<GraphQlErrorItem>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct GraphQlErrorItem {
    pub message: String,
    #[serde(default)]
    pub extensions: Option<GraphQlErrorExtensions>,
}

impl GraphQlErrorItem {
    /// Hasura reports unique and check constraint failures as `constraint-violation`.
    pub fn is_constraint_violation(&self) -> bool {
        self.extensions
            .as_ref()
            .and_then(|ext| ext.code.as_deref())
            == Some("constraint-violation")
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct GraphQlErrorExtensions {
    pub code: Option<String>,
}

/// Row shape selected by every restaurant query.
#[derive(Debug, Clone, Deserialize)]
pub struct HasuraRestaurant {
    pub id: Uuid,
    pub external_id: Option<String>,
    pub title: String,
    pub slug: String,
    pub address: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub postal_code: Option<String>,
    pub country: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub image_url: Option<String>,
    pub price_level: Option<i16>,
    pub rating: Option<Decimal>,
    #[serde(default)]
    pub review_count: i32,
    pub created_at: DateTime<Utc>,
}

impl From<HasuraRestaurant> for RestaurantRecord {
    fn from(row: HasuraRestaurant) -> Self {
        Self {
            id: row.id,
            external_id: row.external_id,
            title: row.title,
            slug: row.slug,
            address: row.address,
            city: row.city,
            state: row.state,
            postal_code: row.postal_code,
            country: row.country,
            latitude: row.latitude,
            longitude: row.longitude,
            image_url: row.image_url,
            price_level: row.price_level,
            rating: row.rating,
            review_count: row.review_count,
            created_at: row.created_at,
        }
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct RestaurantsData {
    pub restaurants: Vec<HasuraRestaurant>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct InsertData {
    pub insert_restaurants_one: Option<HasuraRestaurant>,
}

/// `restaurants_insert_input` object for `insert_restaurants_one`.
#[derive(Debug, Serialize)]
pub(crate) struct RestaurantInsertInput<'a> {
    pub external_id: Option<&'a str>,
    pub title: &'a str,
    pub slug: String,
    pub address: Option<&'a str>,
    pub city: Option<&'a str>,
    pub state: Option<&'a str>,
    pub postal_code: Option<&'a str>,
    pub country: Option<&'a str>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub image_url: Option<&'a str>,
    pub price_level: Option<i16>,
}

impl<'a> From<&'a NewRestaurant> for RestaurantInsertInput<'a> {
    fn from(restaurant: &'a NewRestaurant) -> Self {
        Self {
            external_id: restaurant.external_id.as_deref(),
            title: &restaurant.title,
            slug: restaurant.slug(),
            address: restaurant.address.as_deref(),
            city: restaurant.city.as_deref(),
            state: restaurant.state.as_deref(),
            postal_code: restaurant.postal_code.as_deref(),
            country: restaurant.country.as_deref(),
            latitude: restaurant.latitude,
            longitude: restaurant.longitude,
            image_url: restaurant.image_url.as_deref(),
            price_level: restaurant.price_level,
        }
    }
}
