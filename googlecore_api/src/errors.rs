//! Error types for the transport layer.

/// Errors that can occur when making API requests.
///
/// These describe transport-level failures only. A well-formed response whose
/// `status` field reports an error is returned as `Ok` here; interpreting it
/// is left to the caller.
#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// An HTTP request failed (network error, timeout, or invalid URL).
    #[error("Request failed")]
    RequestFailed,
    /// The API returned a non-success HTTP status with a body snippet.
    #[error("Request failed with status {status}")]
    HttpStatus { status: u16, body: String },
    /// The response body was not valid JSON.
    #[error("Failed to decode response: {0}")]
    Decode(String),
    /// A required argument was not supplied.
    #[error("Method `{method}` requires argument `{argument}`")]
    MissingArgument { method: String, argument: String },
    /// The worker pool was built outside a tokio runtime.
    #[error("No tokio runtime available for the worker pool")]
    NoRuntime,
}
