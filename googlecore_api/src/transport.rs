//! The seam between the client layer and whatever actually performs calls.

use async_trait::async_trait;

use crate::{
    pool::WorkerPool,
    resource::{ApiDefinition, ApiMethod},
    types::{Arguments, Response},
    Error,
};

/// A REST transport for one API.
///
/// Implementations expose their method table for discovery, perform single
/// calls with already-complete arguments, and own a [`WorkerPool`] for
/// background submission.
#[async_trait]
pub trait Transport: Send + Sync + 'static {
    /// The API this transport talks to.
    fn definition(&self) -> &'static ApiDefinition;

    /// Performs one call. `args` are sent as-is.
    async fn call(&self, method: &ApiMethod, args: &Arguments) -> Result<Response, Error>;

    fn pool(&self) -> &WorkerPool;
}
