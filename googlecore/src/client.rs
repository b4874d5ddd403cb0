//! Key-injecting, status-checking wrapper around a [`Transport`].

use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

use futures::Stream;
use googlecore_api::types::{Arguments, Response, API_KEY_ARG};
use googlecore_api::{split_async, ApiDefinition, ApiMethod, Client, Transport, WorkerPool};
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

use crate::config::ClientConfig;
use crate::error::GoogleCoreError;
use crate::paginate::paginate_with;
use crate::retry::RetryPolicy;
use crate::status::{ApiError, Status, StatusPolicy};

/// A method exposed by [`GoogleApiClient`].
///
/// Synchronous entries call their endpoint directly; `async_` entries are
/// bound at construction to the endpoint of their base method and run it on
/// the transport's worker pool.
#[derive(Clone, Debug)]
pub struct WrappedMethod {
    name: String,
    api: &'static ApiMethod,
    is_async: bool,
}

impl WrappedMethod {
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Documentation of the underlying endpoint.
    pub fn doc(&self) -> &'static str {
        self.api.doc
    }

    pub fn is_async(&self) -> bool {
        self.is_async
    }

    /// Name of the synchronous method this entry runs.
    pub fn target(&self) -> &'static str {
        self.api.name
    }

    pub fn api_method(&self) -> &'static ApiMethod {
        self.api
    }
}

struct Inner<T> {
    api_key: String,
    transport: T,
    status_policy: StatusPolicy,
    retry: RetryPolicy,
    methods: BTreeMap<String, WrappedMethod>,
}

impl<T: Transport> Inner<T> {
    /// The synchronous wrapper: inject the key, call, translate the status.
    async fn invoke(
        &self,
        api: &'static ApiMethod,
        args: &Arguments,
    ) -> Result<Response, GoogleCoreError> {
        let mut keyed = args.clone();
        keyed.insert(API_KEY_ARG, &self.api_key);

        let response = self.transport.call(api, &keyed).await?;
        let status = Status::of(&response, self.status_policy);

        match status.error_kind() {
            Some(kind) => {
                tracing::debug!(method = api.name, status = %status, "API returned error status");
                let mut arguments = args.clone();
                arguments.remove(API_KEY_ARG);
                Err(ApiError::new(kind, api.name, arguments, response).into())
            }
            None => Ok(response),
        }
    }
}

/// Client for a Google-style API.
///
/// Every method of the transport's [`ApiDefinition`] is available by name
/// through [`call`](Self::call), with the API key added automatically and any
/// non-`OK` status turned into an [`ApiError`] of the matching kind. Each
/// method also has an `async_` variant usable with [`submit`](Self::submit).
///
/// Cloning is cheap; clones share the transport and key.
pub struct GoogleApiClient<T> {
    inner: Arc<Inner<T>>,
}

impl<T> Clone for GoogleApiClient<T> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl GoogleApiClient<Client> {
    /// Builds an HTTP client for `definition` against its production URL.
    pub fn connect(
        definition: &'static ApiDefinition,
        config: ClientConfig,
    ) -> Result<Self, GoogleCoreError> {
        Self::connect_with_base_url(definition, definition.base_url, config)
    }

    /// Builds an HTTP client for `definition` against a custom base URL.
    pub fn connect_with_base_url(
        definition: &'static ApiDefinition,
        base_url: &str,
        config: ClientConfig,
    ) -> Result<Self, GoogleCoreError> {
        let pool = WorkerPool::new(config.max_workers)?;
        let transport = Client::with_pool(definition, base_url, pool)?;
        Self::new(transport, config)
    }
}

impl<T: Transport> GoogleApiClient<T> {
    /// Wraps `transport`, building one entry per discoverable method name.
    pub fn new(transport: T, config: ClientConfig) -> Result<Self, GoogleCoreError> {
        config.validate()?;
        let definition = transport.definition();

        let mut methods = BTreeMap::new();
        for name in definition.method_names() {
            let (base, is_async) = match split_async(&name) {
                Some(base) => (base, true),
                None => (name.as_str(), false),
            };
            let api = definition
                .method(base)
                .ok_or_else(|| GoogleCoreError::UnknownMethod(base.to_string()))?;
            let wrapped = WrappedMethod {
                name: name.clone(),
                api,
                is_async,
            };
            methods.insert(name, wrapped);
        }
        tracing::debug!(api = definition.name, methods = methods.len(), "wrapped API methods");

        Ok(Self {
            inner: Arc::new(Inner {
                api_key: config.api_key,
                transport,
                status_policy: config.status_policy,
                retry: config.retry,
                methods,
            }),
        })
    }

    pub fn definition(&self) -> &'static ApiDefinition {
        self.inner.transport.definition()
    }

    pub fn method(&self, name: &str) -> Option<&WrappedMethod> {
        self.inner.methods.get(name)
    }

    /// All wrapped methods, sorted by name.
    pub fn methods(&self) -> impl Iterator<Item = &WrappedMethod> {
        self.inner.methods.values()
    }

    pub fn retry_policy(&self) -> RetryPolicy {
        self.inner.retry
    }

    fn lookup(&self, name: &str) -> Result<&WrappedMethod, GoogleCoreError> {
        self.method(name)
            .ok_or_else(|| GoogleCoreError::UnknownMethod(name.to_string()))
    }

    /// Calls `name` with `args` plus the API key.
    ///
    /// Returns the response unchanged when its status is `OK` (or, under the
    /// permissive policy, missing or unrecognised). An `async_` name is
    /// submitted to the worker pool and awaited.
    pub async fn call(&self, name: &str, args: &Arguments) -> Result<Response, GoogleCoreError> {
        let method = self.lookup(name)?;
        if method.is_async {
            return self.submit(name, args)?.await?;
        }
        self.inner.invoke(method.api, args).await
    }

    /// Runs `name` on the transport's worker pool and returns its handle.
    ///
    /// Accepts either the `async_` name or its base name. Errors from the
    /// call surface when the handle is awaited.
    pub fn submit(
        &self,
        name: &str,
        args: &Arguments,
    ) -> Result<JoinHandle<Result<Response, GoogleCoreError>>, GoogleCoreError> {
        let api = self.lookup(name)?.api;
        let inner = Arc::clone(&self.inner);
        let args = args.clone();
        tracing::debug!(method = api.name, "submitting call to worker pool");
        Ok(self
            .inner
            .transport
            .pool()
            .submit(async move { inner.invoke(api, &args).await }))
    }

    /// Streams up to `max_pages` responses of a paginated method.
    ///
    /// The first page is requested with `args`; later pages with only the
    /// page token, retried under the client's retry policy.
    pub fn paginate(
        &self,
        name: &str,
        args: &Arguments,
        max_pages: usize,
    ) -> Result<impl Stream<Item = Result<Response, GoogleCoreError>> + Send + 'static, GoogleCoreError>
    {
        self.paginate_until(name, args, max_pages, CancellationToken::new())
    }

    /// [`paginate`](Self::paginate) with a cancellation token.
    pub fn paginate_until(
        &self,
        name: &str,
        args: &Arguments,
        max_pages: usize,
        cancel: CancellationToken,
    ) -> Result<impl Stream<Item = Result<Response, GoogleCoreError>> + Send + 'static, GoogleCoreError>
    {
        let api = self.lookup(name)?.api;
        if !api.paginated {
            tracing::warn!(method = api.name, "paginating a method that is not marked paginated");
        }
        let inner = Arc::clone(&self.inner);
        let first = args.clone();
        let call = move |extra: Arguments| {
            let inner = Arc::clone(&inner);
            let args = if extra.is_empty() { first.clone() } else { extra };
            async move { inner.invoke(api, &args).await }
        };
        Ok(paginate_with(call, max_pages, self.inner.retry, cancel))
    }
}

impl<T> fmt::Debug for GoogleApiClient<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GoogleApiClient")
            .field("api_key", &"<redacted>")
            .field("methods", &self.inner.methods.keys().collect::<Vec<_>>())
            .field("status_policy", &self.inner.status_policy)
            .finish()
    }
}
