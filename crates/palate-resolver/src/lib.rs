//! Restaurant entity resolution.
//!
//! Decides whether a place from an external places lookup already exists in
//! the restaurant store, trying an exact external-id lookup, then a fuzzy
//! name+address lookup, then a 100 m proximity scan.

pub mod distance;
pub mod error;
pub mod memory;
pub mod normalize;
pub mod service;
pub mod strategy;

pub use distance::haversine_km;
pub use error::ResolveError;
pub use memory::InMemoryStore;
pub use normalize::{street_fragment, MatchPatterns};
pub use service::{ImportOutcome, ResolutionService};
pub use strategy::{run_chain, PROXIMITY_THRESHOLD_KM};
