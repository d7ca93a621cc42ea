//! Offline tests for palate-db pool configuration and row conversion.
//! None of these need a live database.

use chrono::Utc;
use palate_core::{AppConfig, Environment, RestaurantRecord, StoreBackend};
use palate_db::{PoolConfig, RestaurantRow};
use rust_decimal::Decimal;
use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::path::PathBuf;
use uuid::Uuid;

fn app_config() -> AppConfig {
    AppConfig {
        env: Environment::Test,
        bind_addr: SocketAddr::new(IpAddr::V4(Ipv4Addr::LOCALHOST), 3000),
        log_level: "info".to_string(),
        store_backend: StoreBackend::Postgres,
        database_url: Some("postgres://example".to_string()),
        db_max_connections: 42,
        db_min_connections: 7,
        db_acquire_timeout_secs: 9,
        hasura_url: None,
        hasura_admin_secret: None,
        hasura_timeout_secs: 15,
        hasura_max_retries: 2,
        resolve_timeout_secs: 10,
        seed_path: PathBuf::from("./config/restaurants.yaml"),
    }
}

#[test]
fn pool_config_from_app_config_uses_core_values() {
    let pool_config = PoolConfig::from_app_config(&app_config());
    assert_eq!(pool_config.max_connections, 42);
    assert_eq!(pool_config.min_connections, 7);
    assert_eq!(pool_config.acquire_timeout_secs, 9);
}

#[test]
fn restaurant_row_converts_into_record() {
    let id = Uuid::new_v4();
    let created_at = Utc::now();
    let row = RestaurantRow {
        id,
        external_id: Some("ChIJ-abc".to_string()),
        title: "Joe's Pizza".to_string(),
        slug: "joes-pizza".to_string(),
        address: Some("7 Carmine St, New York, NY 10014".to_string()),
        city: Some("New York".to_string()),
        state: Some("NY".to_string()),
        postal_code: Some("10014".to_string()),
        country: Some("US".to_string()),
        latitude: Some(40.730_599),
        longitude: Some(-74.002_791),
        image_url: None,
        price_level: Some(1),
        rating: Some(Decimal::new(455, 2)),
        review_count: 12,
        created_at,
    };

    let record = RestaurantRecord::from(row);
    assert_eq!(record.id, id);
    assert_eq!(record.external_id.as_deref(), Some("ChIJ-abc"));
    assert_eq!(record.coordinates(), Some((40.730_599, -74.002_791)));
    assert_eq!(record.rating, Some(Decimal::new(455, 2)));
    assert_eq!(record.review_count, 12);
    assert_eq!(record.created_at, created_at);
}

#[test]
fn restaurant_row_without_coordinates_has_none() {
    let row = RestaurantRow {
        id: Uuid::new_v4(),
        external_id: None,
        title: "Nowhere Diner".to_string(),
        slug: "nowhere-diner".to_string(),
        address: None,
        city: None,
        state: None,
        postal_code: None,
        country: None,
        latitude: Some(40.0),
        longitude: None,
        image_url: None,
        price_level: None,
        rating: None,
        review_count: 0,
        created_at: Utc::now(),
    };

    assert_eq!(RestaurantRecord::from(row).coordinates(), None);
}
