//! Shared HTTP client for the school API.
//!
//! One [`ApiClient`] is built at startup and cloned into every action
//! creator. It attaches the stored bearer token to each request and reports
//! 401 responses through a registered hook, so it never needs to know about
//! the store.

mod client;
mod error;

pub use client::{ApiClient, ApiResponse, UnauthorizedHook};
pub use error::{ApiError, SessionHookError, NETWORK_ERROR};

use serde_json::Value;

/// The string `message` field of a JSON object body, if any.
pub fn body_message(body: &Value) -> Option<&str> {
    body.get("message").and_then(Value::as_str)
}
