use std::collections::HashSet;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::restaurant::NewRestaurant;
use crate::ConfigError;

/// One restaurant entry in a seed or fixture YAML file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RestaurantSeed {
    pub title: String,
    pub place_id: Option<String>,
    pub address: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub postal_code: Option<String>,
    pub country: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub image_url: Option<String>,
    pub price_level: Option<i16>,
}

impl RestaurantSeed {
    /// Empty strings become `None`, as on the HTTP import path.
    #[must_use]
    pub fn to_new_restaurant(&self) -> NewRestaurant {
        NewRestaurant {
            external_id: non_empty(self.place_id.as_deref()),
            title: self.title.trim().to_string(),
            address: non_empty(self.address.as_deref()),
            city: non_empty(self.city.as_deref()),
            state: non_empty(self.state.as_deref()),
            postal_code: non_empty(self.postal_code.as_deref()),
            country: non_empty(self.country.as_deref()),
            latitude: self.latitude,
            longitude: self.longitude,
            image_url: non_empty(self.image_url.as_deref()),
            price_level: self.price_level,
        }
    }
}

fn non_empty(value: Option<&str>) -> Option<String> {
    value.filter(|s| !s.is_empty()).map(str::to_string)
}

#[derive(Debug, Deserialize)]
pub struct SeedFile {
    pub restaurants: Vec<RestaurantSeed>,
}

/// Load and validate a restaurant seed file.
///
/// # Errors
///
/// Returns `ConfigError` if the file cannot be read, parsed, or fails validation.
pub fn load_seed_file(path: &Path) -> Result<SeedFile, ConfigError> {
    let content = std::fs::read_to_string(path).map_err(|e| ConfigError::SeedFileIo {
        path: path.display().to_string(),
        source: e,
    })?;

    parse_seed_file(&content)
}

/// Parse and validate seed YAML that is already in memory.
///
/// # Errors
///
/// Returns `ConfigError` if the YAML is malformed or fails validation.
pub fn parse_seed_file(content: &str) -> Result<SeedFile, ConfigError> {
    let seed_file: SeedFile = serde_yaml::from_str(content)?;
    validate_seeds(&seed_file)?;
    Ok(seed_file)
}

fn validate_seeds(seed_file: &SeedFile) -> Result<(), ConfigError> {
    let mut seen_place_ids = HashSet::new();

    for seed in &seed_file.restaurants {
        let restaurant = seed.to_new_restaurant();
        restaurant.validate().map_err(|reason| {
            ConfigError::Validation(format!("restaurant '{}': {reason}", seed.title))
        })?;

        if let Some(place_id) = restaurant.external_id {
            if !seen_place_ids.insert(place_id.clone()) {
                return Err(ConfigError::Validation(format!(
                    "duplicate place_id: '{place_id}' (restaurant '{}')",
                    seed.title
                )));
            }
        }
    }

    Ok(())
}

#[cfg(test)]
#[path = "seed_test.rs"]
mod tests;
