//! Restaurant domain types shared by the resolver, the stores and the binaries.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

/// A place described by an external places lookup, to be matched against
/// the restaurant store.
///
/// String fields that are present but empty are treated as absent by the
/// accessor methods.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PlaceCandidate {
    pub external_id: Option<String>,
    pub name: Option<String>,
    pub address: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
}

impl PlaceCandidate {
    /// External place id usable for an exact lookup.
    #[must_use]
    pub fn lookup_id(&self) -> Option<&str> {
        non_empty(self.external_id.as_deref())
    }

    /// Name and formatted address, only when both are supplied.
    #[must_use]
    pub fn name_and_address(&self) -> Option<(&str, &str)> {
        Some((
            non_empty(self.name.as_deref())?,
            non_empty(self.address.as_deref())?,
        ))
    }

    /// `(latitude, longitude)` in degrees, only when both are supplied.
    #[must_use]
    pub fn coordinates(&self) -> Option<(f64, f64)> {
        Some((self.latitude?, self.longitude?))
    }

    /// Whether any match strategy has enough input to run.
    #[must_use]
    pub fn has_match_inputs(&self) -> bool {
        self.lookup_id().is_some()
            || self.name_and_address().is_some()
            || self.coordinates().is_some()
    }
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.is_empty())
}

/// Raw match request as it arrives at the HTTP or CLI boundary.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct MatchRequest {
    pub place_id: Option<String>,
    pub name: Option<String>,
    pub address: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
}

impl From<MatchRequest> for PlaceCandidate {
    fn from(req: MatchRequest) -> Self {
        Self {
            external_id: req.place_id,
            name: req.name,
            address: req.address,
            latitude: req.latitude,
            longitude: req.longitude,
        }
    }
}

/// A stored restaurant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RestaurantRecord {
    pub id: Uuid,
    /// Places-API identifier (`place_id`) the record was imported from.
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

impl RestaurantRecord {
    #[must_use]
    pub fn coordinates(&self) -> Option<(f64, f64)> {
        Some((self.latitude?, self.longitude?))
    }
}

/// Insert payload for a restaurant that did not match any stored record.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NewRestaurant {
    pub external_id: Option<String>,
    pub title: String,
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

impl NewRestaurant {
    #[must_use]
    pub fn slug(&self) -> String {
        slug_from_title(&self.title)
    }

    /// Check the fields the stores constrain.
    ///
    /// Coordinates must be paired and in range; `price_level` must be 1-4.
    ///
    /// # Errors
    ///
    /// Returns the first [`InvalidRestaurant`] reason found.
    pub fn validate(&self) -> Result<(), InvalidRestaurant> {
        if self.title.trim().is_empty() {
            return Err(InvalidRestaurant::BlankTitle);
        }

        match (self.latitude, self.longitude) {
            (Some(latitude), Some(longitude)) => {
                if !(-90.0..=90.0).contains(&latitude) || !(-180.0..=180.0).contains(&longitude) {
                    return Err(InvalidRestaurant::CoordinatesOutOfRange {
                        latitude,
                        longitude,
                    });
                }
            }
            (None, None) => {}
            _ => return Err(InvalidRestaurant::HalfCoordinates),
        }

        match self.price_level {
            Some(level) if !(1..=4).contains(&level) => Err(InvalidRestaurant::PriceLevel(level)),
            _ => Ok(()),
        }
    }

    /// The match candidate used to check whether this restaurant already exists.
    #[must_use]
    pub fn candidate(&self) -> PlaceCandidate {
        PlaceCandidate {
            external_id: self.external_id.clone(),
            name: Some(self.title.clone()),
            address: self.address.clone(),
            latitude: self.latitude,
            longitude: self.longitude,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum InvalidRestaurant {
    #[error("title must be non-empty")]
    BlankTitle,

    #[error("latitude and longitude must both be set or both be absent")]
    HalfCoordinates,

    #[error("coordinates out of range ({latitude}, {longitude})")]
    CoordinatesOutOfRange { latitude: f64, longitude: f64 },

    #[error("price_level must be between 1 and 4, got {0}")]
    PriceLevel(i16),
}

/// Generate a URL-safe slug from a restaurant title.
///
/// `"Joe's Diner & Grill"` becomes `"joes-diner-grill"`.
#[must_use]
pub fn slug_from_title(title: &str) -> String {
    title
        .to_lowercase()
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '-' {
                c
            } else if c.is_whitespace() {
                '-'
            } else {
                '\0'
            }
        })
        .filter(|&c| c != '\0')
        .collect::<String>()
        .split('-')
        .filter(|s| !s.is_empty())
        .collect::<Vec<_>>()
        .join("-")
}

/// Which strategy produced a match.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchType {
    ExternalId,
    NameAddress,
    Proximity,
    None,
}

impl MatchType {
    /// Name used in the public `matchType` field; `None` serializes as `null`.
    #[must_use]
    pub fn wire_name(self) -> Option<&'static str> {
        match self {
            MatchType::ExternalId => Some("place_id"),
            MatchType::NameAddress => Some("name_address"),
            MatchType::Proximity => Some("coordinates"),
            MatchType::None => None,
        }
    }
}

impl std::fmt::Display for MatchType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MatchType::ExternalId => write!(f, "external_id"),
            MatchType::NameAddress => write!(f, "name_address"),
            MatchType::Proximity => write!(f, "proximity"),
            MatchType::None => write!(f, "none"),
        }
    }
}

/// Outcome of one resolution. A record is present iff `matched()` is true.
#[derive(Debug, Clone, PartialEq)]
pub struct MatchResult {
    record: Option<RestaurantRecord>,
    match_type: MatchType,
}

impl MatchResult {
    /// A successful match produced by `match_type`.
    ///
    /// # Panics
    ///
    /// Panics in debug builds when `match_type` is [`MatchType::None`].
    #[must_use]
    pub fn hit(record: RestaurantRecord, match_type: MatchType) -> Self {
        debug_assert_ne!(match_type, MatchType::None, "a hit needs a strategy");
        Self {
            record: Some(record),
            match_type,
        }
    }

    #[must_use]
    pub fn no_match() -> Self {
        Self {
            record: None,
            match_type: MatchType::None,
        }
    }

    #[must_use]
    pub fn matched(&self) -> bool {
        self.record.is_some()
    }

    #[must_use]
    pub fn record(&self) -> Option<&RestaurantRecord> {
        self.record.as_ref()
    }

    #[must_use]
    pub fn match_type(&self) -> MatchType {
        self.match_type
    }

    #[must_use]
    pub fn into_record(self) -> Option<RestaurantRecord> {
        self.record
    }
}

/// Public JSON shape of a [`MatchResult`].
#[derive(Debug, Clone, Serialize)]
pub struct MatchPayload {
    #[serde(rename = "match")]
    pub matched: bool,
    pub restaurant: Option<RestaurantRecord>,
    #[serde(rename = "matchType")]
    pub match_type: Option<&'static str>,
}

impl From<MatchResult> for MatchPayload {
    fn from(result: MatchResult) -> Self {
        let match_type = result.match_type.wire_name();
        Self {
            matched: result.matched(),
            restaurant: result.record,
            match_type,
        }
    }
}
