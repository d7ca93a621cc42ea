use thiserror::Error;

/// Errors returned by the Hasura GraphQL client.
#[derive(Debug, Error)]
pub enum HasuraError {
    /// Network or TLS failure, or a non-2xx status from the endpoint.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The response carried a GraphQL `errors` array.
    #[error("GraphQL error: {0}")]
    GraphQl(String),

    /// A mutation was rejected by a table constraint.
    #[error("constraint violation: {0}")]
    ConstraintViolation(String),

    /// The response body could not be deserialized into the expected type.
    #[error("JSON deserialization error for {context}: {source}")]
    Deserialize {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid Hasura endpoint '{url}': {reason}")]
    InvalidEndpoint { url: String, reason: String },
}

impl From<HasuraError> for palate_core::StoreError {
    fn from(error: HasuraError) -> Self {
        match error {
            HasuraError::ConstraintViolation(message) => palate_core::StoreError::Conflict(message),
            other => palate_core::StoreError::backend(other),
        }
    }
}
