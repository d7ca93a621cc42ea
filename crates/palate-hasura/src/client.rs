//! HTTP client for a Hasura GraphQL endpoint.
//!
//! Every call is a `POST` of `{query, variables}`. A non-empty `errors` array
//! in the response surfaces as [`HasuraError::GraphQl`]; transport failures
//! are retried with back-off.

use std::time::Duration;

use palate_core::AppConfig;
use reqwest::{Client, Url};
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::error::HasuraError;
use crate::retry::retry_with_backoff;
use crate::types::{GraphQlErrorItem, GraphQlRequest, GraphQlResponse};

const ADMIN_SECRET_HEADER: &str = "x-hasura-admin-secret";
const DEFAULT_MAX_RETRIES: u32 = 2;
const DEFAULT_BACKOFF_BASE_MS: u64 = 500;

/// Client for a single Hasura GraphQL endpoint.
///
/// Use [`HasuraClient::new`] with the full endpoint URL (usually ending in
/// `/v1/graphql`), or [`HasuraClient::from_app_config`] in the binaries.
#[derive(Debug, Clone)]
pub struct HasuraClient {
    client: Client,
    endpoint: Url,
    admin_secret: Option<String>,
    max_retries: u32,
    backoff_base_ms: u64,
}

impl HasuraClient {
    /// # Errors
    ///
    /// Returns [`HasuraError::InvalidEndpoint`] if `endpoint` is not a valid
    /// URL, or [`HasuraError::Http`] if the `reqwest::Client` cannot be built.
    pub fn new(
        endpoint: &str,
        admin_secret: Option<&str>,
        timeout_secs: u64,
    ) -> Result<Self, HasuraError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(5))
            .user_agent("palate/0.1 (restaurant-resolution)")
            .build()?;

        let endpoint = Url::parse(endpoint).map_err(|e| HasuraError::InvalidEndpoint {
            url: endpoint.to_owned(),
            reason: e.to_string(),
        })?;

        Ok(Self {
            client,
            endpoint,
            admin_secret: admin_secret
                .filter(|s| !s.trim().is_empty())
                .map(str::to_owned),
            max_retries: DEFAULT_MAX_RETRIES,
            backoff_base_ms: DEFAULT_BACKOFF_BASE_MS,
        })
    }

    /// Build a client from `PALATE_HASURA_*` settings.
    ///
    /// # Errors
    ///
    /// Returns [`HasuraError::InvalidEndpoint`] if no Hasura URL is configured
    /// or it does not parse.
    pub fn from_app_config(config: &AppConfig) -> Result<Self, HasuraError> {
        let url = config
            .hasura_url
            .as_deref()
            .ok_or_else(|| HasuraError::InvalidEndpoint {
                url: String::new(),
                reason: "PALATE_HASURA_URL is not set".to_owned(),
            })?;
        Ok(Self::new(
            url,
            config.hasura_admin_secret.as_deref(),
            config.hasura_timeout_secs,
        )?
        .with_retry(config.hasura_max_retries, DEFAULT_BACKOFF_BASE_MS))
    }

    #[must_use]
    pub fn with_retry(mut self, max_retries: u32, backoff_base_ms: u64) -> Self {
        self.max_retries = max_retries;
        self.backoff_base_ms = backoff_base_ms;
        self
    }

    #[must_use]
    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    /// Run a GraphQL document and deserialize its `data` member into `T`.
    ///
    /// `operation` names the call in logs and error context.
    ///
    /// # Errors
    ///
    /// - [`HasuraError::Http`] on network failure or a non-2xx status, after retries.
    /// - [`HasuraError::ConstraintViolation`] if a write broke a table constraint.
    /// - [`HasuraError::GraphQl`] if the response carries other `errors` or no `data`.
    /// - [`HasuraError::Deserialize`] if `data` does not match `T`.
    pub async fn execute<T, V>(
        &self,
        operation: &str,
        query: &str,
        variables: &V,
    ) -> Result<T, HasuraError>
    where
        T: DeserializeOwned,
        V: Serialize + Sync,
    {
        let data = retry_with_backoff(self.max_retries, self.backoff_base_ms, || {
            self.post_once(operation, query, variables)
        })
        .await?;

        serde_json::from_value(data).map_err(|e| HasuraError::Deserialize {
            context: operation.to_owned(),
            source: e,
        })
    }

    async fn post_once<V>(
        &self,
        operation: &str,
        query: &str,
        variables: &V,
    ) -> Result<serde_json::Value, HasuraError>
    where
        V: Serialize + Sync,
    {
        let mut request = self
            .client
            .post(self.endpoint.clone())
            .json(&GraphQlRequest { query, variables });
        if let Some(secret) = &self.admin_secret {
            request = request.header(ADMIN_SECRET_HEADER, secret);
        }

        let response = request.send().await?.error_for_status()?;
        let body = response.text().await?;
        let envelope: GraphQlResponse<serde_json::Value> =
            serde_json::from_str(&body).map_err(|e| HasuraError::Deserialize {
                context: operation.to_owned(),
                source: e,
            })?;

        if !envelope.errors.is_empty() {
            let messages = envelope
                .errors
                .iter()
                .map(|e| e.message.as_str())
                .collect::<Vec<_>>()
                .join("; ");
            if envelope.errors.iter().any(GraphQlErrorItem::is_constraint_violation) {
                return Err(HasuraError::ConstraintViolation(messages));
            }
            return Err(HasuraError::GraphQl(messages));
        }

        envelope
            .data
            .ok_or_else(|| HasuraError::GraphQl(format!("{operation}: response carried no data")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_unparseable_endpoint() {
        let err = HasuraClient::new("not a url", None, 5).unwrap_err();
        assert!(matches!(err, HasuraError::InvalidEndpoint { .. }));
    }

    #[test]
    fn blank_admin_secret_is_dropped() {
        let client = HasuraClient::new("http://localhost:8080/v1/graphql", Some("  "), 5)
            .expect("client should build");
        assert!(client.admin_secret.is_none());
    }

    #[test]
    fn keeps_endpoint_path() {
        let client = HasuraClient::new("http://localhost:8080/v1/graphql", None, 5)
            .expect("client should build");
        assert_eq!(client.endpoint().path(), "/v1/graphql");
    }
}
