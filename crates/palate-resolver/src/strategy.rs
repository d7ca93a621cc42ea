//! The match strategy chain.
//!
//! Strategies run in priority order (external id, name+address, proximity)
//! and the first one to produce a record wins. A strategy whose inputs are
//! missing from the candidate is skipped without touching the store. A store
//! failure inside a strategy is logged and treated like "no hit" so the next
//! strategy still gets its turn.

use palate_core::{
    MatchResult, MatchType, PlaceCandidate, RestaurantRecord, RestaurantStore, StoreError,
};

use crate::distance::haversine_km;
use crate::normalize::MatchPatterns;

/// Records strictly closer than this are considered the same place.
pub const PROXIMITY_THRESHOLD_KM: f64 = 0.1;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Strategy {
    ExternalId,
    NameAddress,
    Proximity,
}

/// Strategies in the order they are attempted.
pub const CHAIN: [Strategy; 3] = [
    Strategy::ExternalId,
    Strategy::NameAddress,
    Strategy::Proximity,
];

impl Strategy {
    #[must_use]
    pub fn match_type(self) -> MatchType {
        match self {
            Strategy::ExternalId => MatchType::ExternalId,
            Strategy::NameAddress => MatchType::NameAddress,
            Strategy::Proximity => MatchType::Proximity,
        }
    }

    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Strategy::ExternalId => "external_id",
            Strategy::NameAddress => "name_address",
            Strategy::Proximity => "proximity",
        }
    }

    /// Run this strategy against `store`.
    ///
    /// Returns `Ok(None)` without querying when the candidate lacks the
    /// inputs this strategy needs.
    ///
    /// # Errors
    ///
    /// Returns the [`StoreError`] raised by the underlying lookup.
    pub async fn attempt<S: RestaurantStore>(
        self,
        store: &S,
        candidate: &PlaceCandidate,
    ) -> Result<Option<RestaurantRecord>, StoreError> {
        match self {
            Strategy::ExternalId => {
                let Some(external_id) = candidate.lookup_id() else {
                    return Ok(None);
                };
                store.find_by_external_id(external_id).await
            }
            Strategy::NameAddress => {
                let Some((name, address)) = candidate.name_and_address() else {
                    return Ok(None);
                };
                let patterns = MatchPatterns::new(name, address);
                let records = store
                    .search_by_name_and_address(&patterns.name, &patterns.street)
                    .await?;
                Ok(records.into_iter().next())
            }
            Strategy::Proximity => {
                let Some(origin) = candidate.coordinates() else {
                    return Ok(None);
                };
                let records = store.list_with_coordinates().await?;
                Ok(nearest_within(origin, records, PROXIMITY_THRESHOLD_KM))
            }
        }
    }
}

/// Run the strategy chain and return the first hit.
///
/// A candidate with no usable inputs short-circuits to "no match" without
/// any store call.
pub async fn run_chain<S: RestaurantStore>(store: &S, candidate: &PlaceCandidate) -> MatchResult {
    if !candidate.has_match_inputs() {
        tracing::debug!("candidate has no id, name+address or coordinates; skipping lookups");
        return MatchResult::no_match();
    }

    for strategy in CHAIN {
        match strategy.attempt(store, candidate).await {
            Ok(Some(record)) => {
                tracing::debug!(
                    strategy = strategy.name(),
                    restaurant_id = %record.id,
                    "restaurant matched"
                );
                return MatchResult::hit(record, strategy.match_type());
            }
            Ok(None) => {}
            Err(e) => {
                tracing::warn!(
                    strategy = strategy.name(),
                    error = %e,
                    "match strategy failed; trying next strategy"
                );
            }
        }
    }

    MatchResult::no_match()
}

/// The record nearest to `origin` whose distance is strictly below `max_km`.
///
/// Records without coordinates are ignored. On equal distances the earlier
/// record wins.
#[must_use]
pub fn nearest_within(
    origin: (f64, f64),
    records: Vec<RestaurantRecord>,
    max_km: f64,
) -> Option<RestaurantRecord> {
    let mut best: Option<(f64, RestaurantRecord)> = None;

    for record in records {
        let Some(point) = record.coordinates() else {
            continue;
        };
        let distance = haversine_km(origin, point);
        if best.as_ref().is_none_or(|(d, _)| distance < *d) {
            best = Some((distance, record));
        }
    }

    best.filter(|(d, _)| *d < max_km).map(|(_, record)| record)
}

#[cfg(test)]
mod tests {
    use chrono::Utc;
    use uuid::Uuid;

    use super::*;

    fn at(title: &str, lat: f64, lng: f64) -> RestaurantRecord {
        RestaurantRecord {
            id: Uuid::new_v4(),
            external_id: None,
            title: title.to_string(),
            slug: palate_core::slug_from_title(title),
            address: None,
            city: None,
            state: None,
            postal_code: None,
            country: None,
            latitude: Some(lat),
            longitude: Some(lng),
            image_url: None,
            price_level: None,
            rating: None,
            review_count: 0,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn chain_order_is_id_then_name_address_then_proximity() {
        let types: Vec<MatchType> = CHAIN.iter().map(|s| s.match_type()).collect();
        assert_eq!(
            types,
            vec![
                MatchType::ExternalId,
                MatchType::NameAddress,
                MatchType::Proximity
            ]
        );
    }

    #[test]
    fn nearest_within_picks_closest_under_threshold() {
        let records = vec![at("far", 40.0020, -75.0), at("near", 40.0005, -75.0)];
        let hit = nearest_within((40.0, -75.0), records, PROXIMITY_THRESHOLD_KM);
        assert_eq!(hit.map(|r| r.title), Some("near".to_string()));
    }

    #[test]
    fn nearest_within_rejects_when_closest_is_too_far() {
        let records = vec![at("far", 40.0020, -75.0)];
        assert!(nearest_within((40.0, -75.0), records, PROXIMITY_THRESHOLD_KM).is_none());
    }

    #[test]
    fn distance_equal_to_threshold_does_not_match() {
        let record = at("edge", 40.0009, -75.0);
        let exact = haversine_km((40.0, -75.0), (40.0009, -75.0));
        assert!(nearest_within((40.0, -75.0), vec![record], exact).is_none());
    }

    #[test]
    fn ties_resolve_to_first_record() {
        let records = vec![at("first", 40.0005, -75.0), at("second", 40.0005, -75.0)];
        let hit = nearest_within((40.0, -75.0), records, PROXIMITY_THRESHOLD_KM);
        assert_eq!(hit.map(|r| r.title), Some("first".to_string()));
    }

    #[test]
    fn records_without_coordinates_are_skipped() {
        let mut missing = at("missing", 0.0, 0.0);
        missing.latitude = None;
        let records = vec![missing, at("present", 40.0001, -75.0)];
        let hit = nearest_within((40.0, -75.0), records, PROXIMITY_THRESHOLD_KM);
        assert_eq!(hit.map(|r| r.title), Some("present".to_string()));
    }

    #[test]
    fn empty_store_has_no_nearest() {
        assert!(nearest_within((40.0, -75.0), Vec::new(), PROXIMITY_THRESHOLD_KM).is_none());
    }
}
