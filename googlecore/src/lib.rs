//! Client layer for Google-style REST APIs.
//!
//! Wraps a `googlecore_api` transport so every call carries the API key,
//! non-`OK` response statuses become typed [`ApiError`]s, and paginated
//! endpoints can be walked page by page with retries on not-yet-valid page
//! tokens.

pub mod client;
pub mod config;
pub mod error;
pub mod paginate;
pub mod retry;
pub mod status;

pub use googlecore_api;
pub use googlecore_api::types;
pub use googlecore_api::types::{Arguments, Response};
pub use googlecore_api::{ApiDefinition, ApiMethod, Transport, ASYNC_PREFIX, MAPS};

pub use client::{GoogleApiClient, WrappedMethod};
pub use config::ClientConfig;
pub use error::GoogleCoreError;
pub use paginate::{collect_pages, paginate_responses, paginate_with, DEFAULT_MAX_PAGES};
pub use retry::{exponential_retry, RetryPolicy};
pub use status::{error_kinds, ApiError, ErrorKind, Status, StatusPolicy};
pub use tokio_util::sync::CancellationToken;
