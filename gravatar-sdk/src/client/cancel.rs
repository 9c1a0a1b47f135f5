//! Cooperative cancellation of in-flight requests.
//!
//! Dropping a request future already aborts the transfer. [`cancellable`] is
//! for callers that cancel from elsewhere (a UI "cancel" button, a shutdown
//! signal) and want an explicit error instead of a silently dropped future.

use std::future::Future;

use tokio_util::sync::CancellationToken;

use crate::errors::{Error, RequestError};

/// Run `future` until it completes or `token` is cancelled.
///
/// On cancellation the future is dropped, which aborts the underlying
/// transfer, and [`RequestError::Cancelled`] is returned. Nothing is retried.
///
/// # Example
/// ```no_run
/// # use gravatar::{cancellable, ProfileIdentifier, ProfileService};
/// # use gravatar::CancellationToken;
/// # async fn run(service: ProfileService) -> gravatar::Result<()> {
/// let token = CancellationToken::new();
/// let id = ProfileIdentifier::email("jane@example.com");
/// let profile = cancellable(&token, service.fetch(&id)).await?;
/// # Ok(()) }
/// ```
pub async fn cancellable<F, T, E>(token: &CancellationToken, future: F) -> Result<T, Error>
where
    F: Future<Output = Result<T, E>>,
    E: Into<Error>,
{
    tokio::select! {
        biased;
        _ = token.cancelled() => {
            tracing::debug!("request cancelled");
            Err(RequestError::Cancelled.into())
        }
        result = future => result.map_err(Into::into),
    }
}
