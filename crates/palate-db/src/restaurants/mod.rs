//! Database operations for the `restaurants` table.

mod read;
mod types;
mod write;

pub use read::{
    find_restaurant_by_external_id, list_restaurants_with_coordinates,
    search_restaurants_by_title_and_address,
};
pub use types::RestaurantRow;
pub use write::insert_restaurant;

/// Column list shared by every read; coordinates are cast from `NUMERIC` to
/// `float8` so they decode straight into `f64`.
pub(crate) const RESTAURANT_COLUMNS: &str = "id, external_id, title, slug, address, city, state, \
     postal_code, country, latitude::float8 AS latitude, longitude::float8 AS longitude, \
     image_url, price_level, rating, review_count, created_at";
