//! Worker pool used for fire-and-forget method submission.

use std::future::Future;
use std::sync::Arc;

use tokio::runtime::Handle;
use tokio::sync::Semaphore;
use tokio::task::JoinHandle;

use crate::Error;

/// Default number of submitted calls allowed in flight at once.
pub const DEFAULT_MAX_WORKERS: usize = 10;

/// Bounded pool of background tasks on a tokio runtime.
///
/// Submitted futures are spawned immediately but wait for one of
/// `max_workers` permits before they start running, so at most that many
/// calls are in flight regardless of how many are queued.
#[derive(Clone, Debug)]
pub struct WorkerPool {
    handle: Handle,
    permits: Arc<Semaphore>,
    max_workers: usize,
}

impl WorkerPool {
    /// Creates a pool on the current tokio runtime.
    pub fn new(max_workers: usize) -> Result<Self, Error> {
        let handle = Handle::try_current().map_err(|e| {
            tracing::error!("Worker pool created outside a tokio runtime: {}", e);
            Error::NoRuntime
        })?;
        Ok(Self::with_handle(handle, max_workers))
    }

    /// Creates a pool on an explicit runtime handle.
    pub fn with_handle(handle: Handle, max_workers: usize) -> Self {
        let max_workers = max_workers.max(1);
        Self {
            handle,
            permits: Arc::new(Semaphore::new(max_workers)),
            max_workers,
        }
    }

    pub fn max_workers(&self) -> usize {
        self.max_workers
    }

    /// Submits `fut` and returns a handle resolving to its output.
    pub fn submit<F>(&self, fut: F) -> JoinHandle<F::Output>
    where
        F: Future + Send + 'static,
        F::Output: Send + 'static,
    {
        let permits = Arc::clone(&self.permits);
        self.handle.spawn(async move {
            // The semaphore is never closed, so acquisition only fails if that changes.
            let _permit = permits.acquire_owned().await.ok();
            fut.await
        })
    }
}
