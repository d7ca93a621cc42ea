//! Retry with exponential back-off and jitter for Hasura requests.
//!
//! Only transport-level failures are retried. A GraphQL `errors` array means
//! the server understood and rejected the operation, so it is returned as-is.

use std::future::Future;
use std::time::Duration;

use crate::error::HasuraError;

/// Returns `true` for timeouts, connect failures and 5xx responses.
pub(crate) fn is_retriable(err: &HasuraError) -> bool {
    match err {
        HasuraError::Http(e) => {
            e.is_timeout() || e.is_connect() || e.status().is_some_and(|s| s.is_server_error())
        }
        HasuraError::GraphQl(_)
        | HasuraError::ConstraintViolation(_)
        | HasuraError::Deserialize { .. }
        | HasuraError::InvalidEndpoint { .. } => false,
    }
}

/// Runs `operation` with up to `max_retries` additional attempts on transient
/// errors, sleeping `backoff_base_ms × 2^(attempt-1)` ± 25 % between attempts.
///
/// Delay is capped at 10 s.
pub(crate) async fn retry_with_backoff<T, F, Fut>(
    max_retries: u32,
    backoff_base_ms: u64,
    mut operation: F,
) -> Result<T, HasuraError>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, HasuraError>>,
{
    const MAX_DELAY_MS: u64 = 10_000;
    let mut attempt = 0u32;
    loop {
        match operation().await {
            Ok(value) => return Ok(value),
            Err(err) => {
                if !is_retriable(&err) || attempt >= max_retries {
                    return Err(err);
                }
                attempt += 1;
                let computed = backoff_base_ms.saturating_mul(1u64 << (attempt - 1).min(10));
                let capped = computed.min(MAX_DELAY_MS);
                #[allow(
                    clippy::cast_possible_truncation,
                    clippy::cast_sign_loss,
                    clippy::cast_precision_loss
                )]
                let delay_ms = (capped as f64 * (rand::random::<f64>() * 0.5 + 0.75)) as u64;
                tracing::warn!(
                    attempt,
                    max_retries,
                    delay_ms,
                    error = %err,
                    "hasura transient error, retrying after back-off"
                );
                tokio::time::sleep(Duration::from_millis(delay_ms)).await;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicU32, Ordering};
    use std::sync::Arc;

    async fn connect_error() -> HasuraError {
        let err = reqwest::Client::new()
            .post("http://127.0.0.1:1/v1/graphql")
            .send()
            .await
            .unwrap_err();
        HasuraError::Http(err)
    }

    #[test]
    fn graphql_error_is_not_retriable() {
        assert!(!is_retriable(&HasuraError::GraphQl(
            "field 'nope' not found".to_owned()
        )));
    }

    #[test]
    fn deserialize_error_is_not_retriable() {
        let source = serde_json::from_str::<()>("invalid").unwrap_err();
        assert!(!is_retriable(&HasuraError::Deserialize {
            context: "test".to_owned(),
            source,
        }));
    }

    #[tokio::test]
    async fn connect_error_is_retriable() {
        assert!(is_retriable(&connect_error().await));
    }

    #[tokio::test]
    async fn retries_then_succeeds() {
        let calls = Arc::new(AtomicU32::new(0));
        let c = Arc::clone(&calls);
        let result = retry_with_backoff(3, 0, || {
            let c = Arc::clone(&c);
            async move {
                if c.fetch_add(1, Ordering::SeqCst) < 2 {
                    Err(connect_error().await)
                } else {
                    Ok(7u32)
                }
            }
        })
        .await;
        assert_eq!(result.unwrap(), 7);
        assert_eq!(calls.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn gives_up_after_max_retries() {
        let calls = Arc::new(AtomicU32::new(0));
        let c = Arc::clone(&calls);
        let result: Result<u32, _> = retry_with_backoff(2, 0, || {
            let c = Arc::clone(&c);
            async move {
                c.fetch_add(1, Ordering::SeqCst);
                Err(connect_error().await)
            }
        })
        .await;
        assert!(matches!(result, Err(HasuraError::Http(_))));
        assert_eq!(calls.load(Ordering::SeqCst), 3, "one try plus two retries");
    }

    #[tokio::test]
    async fn does_not_retry_graphql_errors() {
        let calls = Arc::new(AtomicU32::new(0));
        let c = Arc::clone(&calls);
        let result: Result<u32, _> = retry_with_backoff(3, 0, || {
            let c = Arc::clone(&c);
            async move {
                c.fetch_add(1, Ordering::SeqCst);
                Err(HasuraError::GraphQl("permission denied".to_owned()))
            }
        })
        .await;
        assert!(matches!(result, Err(HasuraError::GraphQl(_))));
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }
}
