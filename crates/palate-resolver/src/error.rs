use palate_core::{InvalidRestaurant, StoreError};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ResolveError {
    #[error("restaurant resolution timed out after {secs}s")]
    TimedOut { secs: u64 },

    #[error("invalid import: {0}")]
    InvalidImport(#[from] InvalidRestaurant),

    #[error("failed to store restaurant: {0}")]
    Store(#[from] StoreError),
}
