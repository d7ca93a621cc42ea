//! Resolution service: the boundary-facing wrapper around the strategy chain.

use std::sync::Arc;
use std::time::{Duration, Instant};

use palate_core::{
    MatchRequest, MatchResult, MatchType, NewRestaurant, PlaceCandidate, RestaurantRecord,
    RestaurantStore, StoreError,
};

use crate::error::ResolveError;
use crate::strategy::run_chain;

const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// Result of [`ResolutionService::import`].
#[derive(Debug, Clone, PartialEq)]
pub struct ImportOutcome {
    /// `true` when a new record was inserted, `false` when an existing one matched.
    pub created: bool,
    pub restaurant: RestaurantRecord,
    /// Strategy that found the existing record; `MatchType::None` when created.
    pub match_type: MatchType,
}

/// Resolves place candidates against a [`RestaurantStore`].
pub struct ResolutionService<S> {
    store: Arc<S>,
    timeout: Duration,
}

impl<S> Clone for ResolutionService<S> {
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
            timeout: self.timeout,
        }
    }
}

impl<S: RestaurantStore> ResolutionService<S> {
    #[must_use]
    pub fn new(store: Arc<S>) -> Self {
        Self {
            store,
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }

    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    #[must_use]
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Resolve a raw boundary request.
    ///
    /// # Errors
    ///
    /// Returns [`ResolveError::TimedOut`] if the lookups do not finish in time.
    pub async fn resolve(&self, request: MatchRequest) -> Result<MatchResult, ResolveError> {
        self.resolve_candidate(&PlaceCandidate::from(request)).await
    }

    /// Resolve an already-built candidate.
    ///
    /// # Errors
    ///
    /// Returns [`ResolveError::TimedOut`] if the lookups do not finish in time.
    pub async fn resolve_candidate(
        &self,
        candidate: &PlaceCandidate,
    ) -> Result<MatchResult, ResolveError> {
        let started = Instant::now();
        let result = tokio::time::timeout(self.timeout, run_chain(self.store.as_ref(), candidate))
            .await
            .map_err(|_| ResolveError::TimedOut {
                secs: self.timeout.as_secs(),
            })?;

        tracing::info!(
            matched = result.matched(),
            match_type = %result.match_type(),
            elapsed_ms = u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX),
            "restaurant resolution finished"
        );
        Ok(result)
    }

    /// Return the existing record for `restaurant` or insert it.
    ///
    /// An insert that conflicts with a concurrent writer is resolved again and
    /// the winning record returned.
    ///
    /// # Errors
    ///
    /// - [`ResolveError::InvalidImport`] if the title is blank, coordinates are
    ///   unpaired or out of range, or `price_level` is outside 1-4.
    /// - [`ResolveError::TimedOut`] if the match lookups time out.
    /// - [`ResolveError::Store`] if the insert fails.
    pub async fn import(&self, mut restaurant: NewRestaurant) -> Result<ImportOutcome, ResolveError> {
        restaurant.title = restaurant.title.trim().to_string();
        restaurant.validate()?;

        let candidate = restaurant.candidate();
        if let Some(outcome) = matched(self.resolve_candidate(&candidate).await?) {
            return Ok(outcome);
        }

        let record = match self.store.insert(&restaurant).await {
            Ok(record) => record,
            Err(StoreError::Conflict(reason)) => {
                tracing::warn!(%reason, "import raced a concurrent insert; resolving again");
                return matched(self.resolve_candidate(&candidate).await?)
                    .ok_or(ResolveError::Store(StoreError::Conflict(reason)));
            }
            Err(e) => return Err(e.into()),
        };

        tracing::info!(restaurant_id = %record.id, title = %record.title, "imported new restaurant");
        Ok(ImportOutcome {
            created: true,
            restaurant: record,
            match_type: MatchType::None,
        })
    }
}

fn matched(existing: MatchResult) -> Option<ImportOutcome> {
    let match_type = existing.match_type();
    let record = existing.into_record()?;
    tracing::info!(
        restaurant_id = %record.id,
        match_type = %match_type,
        "import matched existing restaurant"
    );
    Some(ImportOutcome {
        created: false,
        restaurant: record,
        match_type,
    })
}
