//! Hasura GraphQL backend for the restaurant store.

pub mod client;
pub mod error;
mod queries;
pub(crate) mod retry;
pub mod store;
pub mod types;

pub use client::HasuraClient;
pub use error::HasuraError;
pub use store::HasuraRestaurantStore;
pub use types::HasuraRestaurant;
