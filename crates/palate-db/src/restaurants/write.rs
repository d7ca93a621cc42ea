//! Write operations for the `restaurants` table.

use palate_core::NewRestaurant;
use sqlx::PgPool;

use super::types::RestaurantRow;

/// Insert a single restaurant and return the stored row.
///
/// Coordinates are bound as `Option<f64>` and cast to `NUMERIC(9,6)` in SQL,
/// then read back through `float8`. The slug is derived from the title.
///
/// # Errors
///
/// Returns [`sqlx::Error`] if the insert fails, including a unique violation
/// on `external_id`.
pub async fn insert_restaurant(
    pool: &PgPool,
    restaurant: &NewRestaurant,
) -> Result<RestaurantRow, sqlx::Error> {
    sqlx::query_as::<_, RestaurantRow>(
        "INSERT INTO restaurants \
             (external_id, title, slug, address, city, state, postal_code, country, \
              latitude, longitude, image_url, price_level) \
         VALUES ($1, $2, $3, $4, $5, $6, $7, $8, \
                 $9::NUMERIC(9,6), $10::NUMERIC(9,6), $11, $12) \
         RETURNING id, external_id, title, slug, address, city, state, postal_code, country, \
                   latitude::float8 AS latitude, longitude::float8 AS longitude, \
                   image_url, price_level, rating, review_count, created_at",
    )
    .bind(restaurant.external_id.as_deref())
    .bind(&restaurant.title)
    .bind(restaurant.slug())
    .bind(restaurant.address.as_deref())
    .bind(restaurant.city.as_deref())
    .bind(restaurant.state.as_deref())
    .bind(restaurant.postal_code.as_deref())
    .bind(restaurant.country.as_deref())
    .bind(restaurant.latitude)
    .bind(restaurant.longitude)
    .bind(restaurant.image_url.as_deref())
    .bind(restaurant.price_level)
    .fetch_one(pool)
    .await
}
