//! Row types for the `restaurants` table.

use chrono::{DateTime, Utc};
use palate_core::RestaurantRecord;
use rust_decimal::Decimal;
use uuid::Uuid;

/// A row from the `restaurants` table.
///
/// `updated_at` is omitted; nothing downstream reads it.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct RestaurantRow {
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
    pub review_count: i32,
    pub created_at: DateTime<Utc>,
}

impl From<RestaurantRow> for RestaurantRecord {
    fn from(row: RestaurantRow) -> Self {
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
