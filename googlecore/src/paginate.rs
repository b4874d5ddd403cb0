//! Page-token driven iteration over paginated endpoints.

use std::future::Future;

use async_stream::stream;
use futures::{Stream, TryStreamExt};
use googlecore_api::types::{Arguments, Response};
use tokio_util::sync::CancellationToken;

use crate::error::GoogleCoreError;
use crate::retry::RetryPolicy;

/// Pages fetched when the caller does not say otherwise.
pub const DEFAULT_MAX_PAGES: usize = 3;

/// Streams up to `max_pages` raw responses from a paginated endpoint.
///
/// `call` receives the arguments to bind for each request: empty for the
/// first page, and only the page token for every later page (the API ignores
/// other arguments once a token is present). The first call is never retried;
/// continuation calls go through the default [`RetryPolicy`] because a token
/// can be rejected as `INVALID_REQUEST` for a short while after it is issued.
///
/// The stream is lazy, strictly sequential and ends after the first page
/// without a token, after `max_pages` pages, or after yielding an error.
/// Responses are passed through untouched; merging results is up to the
/// caller.
pub fn paginate_responses<F, Fut>(
    call: F,
    max_pages: usize,
) -> impl Stream<Item = Result<Response, GoogleCoreError>>
where
    F: Fn(Arguments) -> Fut,
    Fut: Future<Output = Result<Response, GoogleCoreError>>,
{
    paginate_with(call, max_pages, RetryPolicy::default(), CancellationToken::new())
}

/// [`paginate_responses`] with an explicit retry policy and a cancellation
/// token. Cancelling ends the stream with [`GoogleCoreError::Cancelled`],
/// interrupting an in-flight call or backoff sleep.
pub fn paginate_with<F, Fut>(
    call: F,
    max_pages: usize,
    retry: RetryPolicy,
    cancel: CancellationToken,
) -> impl Stream<Item = Result<Response, GoogleCoreError>>
where
    F: Fn(Arguments) -> Fut,
    Fut: Future<Output = Result<Response, GoogleCoreError>>,
{
    stream! {
        let mut page_token: Option<String> = None;
        let mut pages = 0usize;

        while pages < max_pages {
            let result = match page_token.take() {
                None => tokio::select! {
                    _ = cancel.cancelled() => Err(GoogleCoreError::Cancelled),
                    r = call(Arguments::new()) => r,
                },
                Some(token) => tokio::select! {
                    _ = cancel.cancelled() => Err(GoogleCoreError::Cancelled),
                    r = retry.run(|| call(Arguments::page_token(token.clone())), &cancel) => r,
                },
            };

            let response = match result {
                Ok(response) => response,
                Err(err) => {
                    yield Err(err);
                    break;
                }
            };

            pages += 1;
            page_token = response.next_page_token().map(str::to_string);
            tracing::debug!(page = pages, more = page_token.is_some(), "fetched page");

            let last = page_token.is_none();
            yield Ok(response);
            if last {
                break;
            }
        }
    }
}

/// Drains a page stream into a vector, stopping at the first error.
pub async fn collect_pages<S>(pages: S) -> Result<Vec<Response>, GoogleCoreError>
where
    S: Stream<Item = Result<Response, GoogleCoreError>>,
{
    pages.try_collect().await
}
