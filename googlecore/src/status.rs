//! Response statuses and the typed errors raised for them.
//!
//! Google web services report the outcome of a call in a `status` field of an
//! otherwise successful HTTP response. [`Status`] enumerates the known
//! values, and every status other than [`Status::Ok`] has exactly one
//! [`ErrorKind`]. The mapping between the two is built once and never changes
//! (see [`error_kinds`]).

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;
use std::sync::OnceLock;

use googlecore_api::types::{Arguments, Response};

/// Outcome of a remote call as reported by the response's `status` field.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Status {
    Ok,
    UnknownError,
    ZeroResults,
    OverQueryLimit,
    RequestDenied,
    InvalidRequest,
    NotFound,
}

/// How to treat a missing or unrecognised `status` field.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum StatusPolicy {
    /// Treat it as [`Status::Ok`]. A malformed response is then returned to
    /// the caller as a success.
    #[default]
    Permissive,
    /// Treat it as [`Status::UnknownError`].
    Strict,
}

impl Status {
    pub const ALL: [Status; 7] = [
        Status::Ok,
        Status::UnknownError,
        Status::ZeroResults,
        Status::OverQueryLimit,
        Status::RequestDenied,
        Status::InvalidRequest,
        Status::NotFound,
    ];

    /// Snake-case name, the form statuses are looked up by.
    pub fn name(&self) -> &'static str {
        match self {
            Status::Ok => "ok",
            Status::UnknownError => "unknown_error",
            Status::ZeroResults => "zero_results",
            Status::OverQueryLimit => "over_query_limit",
            Status::RequestDenied => "request_denied",
            Status::InvalidRequest => "invalid_request",
            Status::NotFound => "not_found",
        }
    }

    /// Wire form as sent by the API.
    pub fn as_str(&self) -> &'static str {
        match self {
            Status::Ok => "OK",
            Status::UnknownError => "UNKNOWN_ERROR",
            Status::ZeroResults => "ZERO_RESULTS",
            Status::OverQueryLimit => "OVER_QUERY_LIMIT",
            Status::RequestDenied => "REQUEST_DENIED",
            Status::InvalidRequest => "INVALID_REQUEST",
            Status::NotFound => "NOT_FOUND",
        }
    }

    pub fn is_error(&self) -> bool {
        *self != Status::Ok
    }

    /// Every error status.
    pub fn errors() -> impl Iterator<Item = Status> {
        Status::ALL.into_iter().filter(Status::is_error)
    }

    /// The error kind registered for this status, `None` for [`Status::Ok`].
    pub fn error_kind(&self) -> Option<ErrorKind> {
        error_kinds().get(self).copied()
    }

    /// Resolves a raw `status` field.
    ///
    /// Matching is case-insensitive. A missing or unrecognised value falls
    /// back according to `policy`.
    pub fn parse(raw: Option<&str>, policy: StatusPolicy) -> Status {
        match raw.map(str::parse::<Status>) {
            Some(Ok(status)) => status,
            _ => {
                let fallback = match policy {
                    StatusPolicy::Permissive => Status::Ok,
                    StatusPolicy::Strict => Status::UnknownError,
                };
                tracing::warn!(
                    status = raw.unwrap_or("<missing>"),
                    fallback = fallback.as_str(),
                    "unrecognised response status"
                );
                fallback
            }
        }
    }

    /// Resolves the status of a response.
    pub fn of(response: &Response, policy: StatusPolicy) -> Status {
        Status::parse(response.status(), policy)
    }
}

impl FromStr for Status {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lowered = s.to_lowercase();
        Status::ALL
            .into_iter()
            .find(|status| status.name() == lowered)
            .ok_or(())
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One error kind per error status.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    UnknownError,
    ZeroResults,
    OverQueryLimit,
    RequestDenied,
    InvalidRequest,
    NotFound,
}

impl ErrorKind {
    pub fn status(&self) -> Status {
        match self {
            ErrorKind::UnknownError => Status::UnknownError,
            ErrorKind::ZeroResults => Status::ZeroResults,
            ErrorKind::OverQueryLimit => Status::OverQueryLimit,
            ErrorKind::RequestDenied => Status::RequestDenied,
            ErrorKind::InvalidRequest => Status::InvalidRequest,
            ErrorKind::NotFound => Status::NotFound,
        }
    }

    /// Upper-camel status name plus `Error`, e.g. `ZeroResultsError`.
    pub fn type_name(&self) -> &'static str {
        match self {
            ErrorKind::UnknownError => "UnknownErrorError",
            ErrorKind::ZeroResults => "ZeroResultsError",
            ErrorKind::OverQueryLimit => "OverQueryLimitError",
            ErrorKind::RequestDenied => "RequestDeniedError",
            ErrorKind::InvalidRequest => "InvalidRequestError",
            ErrorKind::NotFound => "NotFoundError",
        }
    }

    fn for_status(status: Status) -> Option<ErrorKind> {
        match status {
            Status::Ok => None,
            Status::UnknownError => Some(ErrorKind::UnknownError),
            Status::ZeroResults => Some(ErrorKind::ZeroResults),
            Status::OverQueryLimit => Some(ErrorKind::OverQueryLimit),
            Status::RequestDenied => Some(ErrorKind::RequestDenied),
            Status::InvalidRequest => Some(ErrorKind::InvalidRequest),
            Status::NotFound => Some(ErrorKind::NotFound),
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.type_name())
    }
}

/// Read-only registry of error kinds keyed by status, built on first use.
pub fn error_kinds() -> &'static BTreeMap<Status, ErrorKind> {
    static REGISTRY: OnceLock<BTreeMap<Status, ErrorKind>> = OnceLock::new();
    REGISTRY.get_or_init(|| {
        Status::errors()
            .filter_map(|status| ErrorKind::for_status(status).map(|kind| (status, kind)))
            .collect()
    })
}

/// A call whose response reported an error status.
///
/// Carries everything needed to diagnose the failure: the method, the
/// arguments the caller passed (never the API key), the API's message and the
/// raw response.
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
#[error("{kind}(error_message={})", MessageRepr(.error_message))]
pub struct ApiError {
    kind: ErrorKind,
    method_name: String,
    arguments: Arguments,
    error_message: Option<String>,
    response: Response,
}

/// Renders a message as a quoted string, or `None` when absent.
struct MessageRepr<'a>(&'a Option<String>);

impl fmt::Display for MessageRepr<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0 {
            Some(message) => write!(f, "{:?}", message),
            None => f.write_str("None"),
        }
    }
}

impl ApiError {
    pub fn new(
        kind: ErrorKind,
        method_name: impl Into<String>,
        arguments: Arguments,
        response: Response,
    ) -> Self {
        let error_message = response.error_message().map(str::to_string);
        Self {
            kind,
            method_name: method_name.into(),
            arguments,
            error_message,
            response,
        }
    }

    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    pub fn is(&self, kind: ErrorKind) -> bool {
        self.kind == kind
    }

    pub fn method_name(&self) -> &str {
        &self.method_name
    }

    pub fn arguments(&self) -> &Arguments {
        &self.arguments
    }

    pub fn error_message(&self) -> Option<&str> {
        self.error_message.as_deref()
    }

    pub fn response(&self) -> &Response {
        &self.response
    }
}
