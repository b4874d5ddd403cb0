//! HTTP client implementing [`Transport`] for Google-style REST APIs.

use std::time::Duration;

use async_trait::async_trait;
use url::Url;

use crate::{
    pool::{WorkerPool, DEFAULT_MAX_WORKERS},
    resource::{ApiDefinition, ApiMethod, HttpMethod},
    transport::Transport,
    types::{Arguments, Response},
    Error,
};

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);
const USER_AGENT: &str = concat!("googlecore/", env!("CARGO_PKG_VERSION"));

/// HTTP client for a single [`ApiDefinition`].
///
/// Sends GET methods with their arguments as query parameters and POST
/// methods with their arguments as a JSON object body. It does not know about
/// API keys or response statuses; those belong to the client layer above.
pub struct Client {
    client: reqwest::Client,
    definition: &'static ApiDefinition,
    /// Base URL for the API. Defaults to the definition's base URL.
    base_api_url: String,
    pool: WorkerPool,
}

impl Client {
    /// Creates a client pointing at the definition's production base URL.
    ///
    /// Must be called from within a tokio runtime, which hosts the worker pool.
    pub fn new(definition: &'static ApiDefinition) -> Result<Self, Error> {
        Self::with_base_url(definition, definition.base_url)
    }

    /// Creates a client with a custom base URL. Used for testing with wiremock.
    pub fn with_base_url(definition: &'static ApiDefinition, base_url: &str) -> Result<Self, Error> {
        Self::with_pool(definition, base_url, WorkerPool::new(DEFAULT_MAX_WORKERS)?)
    }

    /// Creates a client with a custom base URL and worker pool.
    pub fn with_pool(
        definition: &'static ApiDefinition,
        base_url: &str,
        pool: WorkerPool,
    ) -> Result<Self, Error> {
        let client = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|e| {
                tracing::error!("Failed to build HTTP client: {}", e);
                Error::RequestFailed
            })?;
        Ok(Self {
            client,
            definition,
            base_api_url: base_url.trim_end_matches('/').to_string(),
            pool,
        })
    }

    fn get_url(&self, path: &str, query: Option<&Arguments>) -> Result<Url, Error> {
        let mut url = Url::parse(format!("{}{}", &self.base_api_url, path).as_str()).map_err(|e| {
            tracing::error!("Invalid URL constructed: {}", e);
            Error::RequestFailed
        })?;
        if let Some(args) = query.filter(|args| !args.is_empty()) {
            url.query_pairs_mut().extend_pairs(args.iter());
        }
        Ok(url)
    }

    async fn send(&self, method: &ApiMethod, args: &Arguments) -> Result<Response, Error> {
        let request = match method.http_method {
            HttpMethod::Get => self.client.get(self.get_url(method.path, Some(args))?),
            HttpMethod::Post => self
                .client
                .post(self.get_url(method.path, None)?)
                .json(args),
        };
        let resp = request
            .header("accept", "application/json")
            .send()
            .await
            .map_err(|e| {
                tracing::error!("Failed to call {}: {}", method.name, without_url(e));
                Error::RequestFailed
            })?;

        let status = resp.status();
        let body = resp.text().await.map_err(|e| {
            tracing::error!("Failed to read response body: {}", without_url(e));
            Error::RequestFailed
        })?;

        if !status.is_success() {
            let snippet = truncate_body(&body);
            tracing::error!("{} failed with status {}: {}", method.name, status, snippet);
            return Err(Error::HttpStatus {
                status: status.as_u16(),
                body: snippet,
            });
        }

        serde_json::from_str::<Response>(&body).map_err(|e| {
            let snippet = truncate_body(&body);
            tracing::error!("Failed to parse response: {} | body: {}", e, snippet);
            Error::Decode(e.to_string())
        })
    }
}

#[async_trait]
impl Transport for Client {
    fn definition(&self) -> &'static ApiDefinition {
        self.definition
    }

    async fn call(&self, method: &ApiMethod, args: &Arguments) -> Result<Response, Error> {
        method.check_arguments(args)?;
        tracing::debug!(method = method.name, path = method.path, "calling API method");
        self.send(method, args).await
    }

    fn pool(&self) -> &WorkerPool {
        &self.pool
    }
}

/// Request URLs carry the API key as a query parameter, so they are stripped
/// before an error is formatted.
fn without_url(e: reqwest::Error) -> reqwest::Error {
    e.without_url()
}

fn truncate_body(body: &str) -> String {
    const MAX: usize = 2000;
    if body.len() <= MAX {
        body.to_string()
    } else {
        let mut end = MAX;
        while !body.is_char_boundary(end) {
            end -= 1;
        }
        format!("{}...[truncated]", &body[..end])
    }
}
