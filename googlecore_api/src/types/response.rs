//! Raw response object returned by every API method.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Name of the response field carrying the continuation token.
pub const NEXT_PAGE_TOKEN_FIELD: &str = "next_page_token";

const STATUS_FIELD: &str = "status";
const ERROR_MESSAGE_FIELD: &str = "error_message";

/// A decoded JSON response body.
///
/// The transport does not interpret the payload. Only the `status`,
/// `error_message` and `next_page_token` fields have accessors; everything
/// else is reached through [`Response::get`] or [`Response::as_value`].
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(transparent)]
pub struct Response(Value);

impl Response {
    pub fn new(value: Value) -> Self {
        Self(value)
    }

    /// The raw `status` field, if present and a string.
    pub fn status(&self) -> Option<&str> {
        self.str_field(STATUS_FIELD)
    }

    /// Human-readable error detail some endpoints attach to failed calls.
    pub fn error_message(&self) -> Option<&str> {
        self.str_field(ERROR_MESSAGE_FIELD)
    }

    /// Continuation token for the next page. Empty tokens count as absent.
    pub fn next_page_token(&self) -> Option<&str> {
        self.str_field(NEXT_PAGE_TOKEN_FIELD)
            .filter(|token| !token.is_empty())
    }

    pub fn get(&self, field: &str) -> Option<&Value> {
        self.0.get(field)
    }

    pub fn as_value(&self) -> &Value {
        &self.0
    }

    fn str_field(&self, field: &str) -> Option<&str> {
        self.0.get(field).and_then(Value::as_str)
    }
}

impl From<Value> for Response {
    fn from(value: Value) -> Self {
        Self(value)
    }
}
