//! Read operations for the `restaurants` table.

use sqlx::PgPool;

use super::types::RestaurantRow;
use super::RESTAURANT_COLUMNS;

/// Fetch the restaurant whose `external_id` equals `external_id` exactly.
///
/// # Errors
///
/// Returns [`sqlx::Error`] if the query fails.
pub async fn find_restaurant_by_external_id(
    pool: &PgPool,
    external_id: &str,
) -> Result<Option<RestaurantRow>, sqlx::Error> {
    sqlx::query_as::<_, RestaurantRow>(&format!(
        "SELECT {RESTAURANT_COLUMNS} FROM restaurants WHERE external_id = $1 LIMIT 1"
    ))
    .bind(external_id)
    .fetch_optional(pool)
    .await
}

/// Restaurants whose title and address match the given `ILIKE` patterns.
///
/// Patterns are passed through unescaped. Rows with a `NULL` address never
/// match. Results are ordered by `created_at, id` so "first row" is stable.
///
/// # Errors
///
/// Returns [`sqlx::Error`] if the query fails.
pub async fn search_restaurants_by_title_and_address(
    pool: &PgPool,
    title_pattern: &str,
    address_pattern: &str,
) -> Result<Vec<RestaurantRow>, sqlx::Error> {
    sqlx::query_as::<_, RestaurantRow>(&format!(
        "SELECT {RESTAURANT_COLUMNS} FROM restaurants \
         WHERE title ILIKE $1 AND address ILIKE $2 \
         ORDER BY created_at ASC, id ASC"
    ))
    .bind(title_pattern)
    .bind(address_pattern)
    .fetch_all(pool)
    .await
}

/// Every restaurant with both `latitude` and `longitude` set.
///
/// No pagination: the whole coordinate-bearing subset is returned, ordered by
/// `created_at, id`.
///
/// # Errors
///
/// Returns [`sqlx::Error`] if the query fails.
pub async fn list_restaurants_with_coordinates(
    pool: &PgPool,
) -> Result<Vec<RestaurantRow>, sqlx::Error> {
    sqlx::query_as::<_, RestaurantRow>(&format!(
        "SELECT {RESTAURANT_COLUMNS} FROM restaurants \
         WHERE latitude IS NOT NULL AND longitude IS NOT NULL \
         ORDER BY created_at ASC, id ASC"
    ))
    .fetch_all(pool)
    .await
}
