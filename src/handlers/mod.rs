//! Action creators.
//!
//! Each operation dispatches `Request`, performs exactly one API call and then
//! dispatches exactly one terminal event. Failures never escape as errors:
//! they end up in the slice and in the returned [`ActionOutcome`].

pub mod attendance;
pub mod auth;
pub mod health;
pub mod library;
pub mod teacher;

use std::future::Future;

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::http::{ApiError, ApiResponse};
use crate::store::resource::ResourceEvent;
use crate::store::{Action, Store};

/// Direct success/failure signal for callers that don't watch the store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ActionOutcome {
    pub success: bool,
    pub message: Option<String>,
}

impl ActionOutcome {
    fn ok(message: Option<String>) -> Self {
        Self {
            success: true,
            message,
        }
    }

    fn failed(message: String) -> Self {
        Self {
            success: false,
            message: Some(message),
        }
    }
}

/// How a 2xx response maps onto the lifecycle.
pub(crate) enum Settled<T, K> {
    Loaded(T),
    Done(K),
    /// Transport succeeded but the server rejected the operation.
    Failed(String),
}

/// Drive one request through the lifecycle.
///
/// `classify` maps a 2xx response to its terminal event; returning `Err`
/// means the response was unusable and settles as a transport-class error.
pub(crate) async fn run<T, K, W, Fut, C>(
    store: &Store,
    wrap: W,
    call: Fut,
    classify: C,
) -> ActionOutcome
where
    W: Fn(ResourceEvent<T, K>) -> Action,
    Fut: Future<Output = Result<ApiResponse, ApiError>>,
    C: FnOnce(ApiResponse) -> Result<Settled<T, K>, String>,
{
    store.dispatch(wrap(ResourceEvent::Request));

    let (event, outcome) = match call.await {
        Ok(response) => {
            let message = response.message().map(str::to_string);
            match classify(response) {
                Ok(Settled::Loaded(data)) => (ResourceEvent::Loaded(data), ActionOutcome::ok(message)),
                Ok(Settled::Done(tag)) => (ResourceEvent::Done(tag), ActionOutcome::ok(message)),
                Ok(Settled::Failed(reason)) => (
                    ResourceEvent::Failed(reason.clone()),
                    ActionOutcome::failed(reason),
                ),
                Err(reason) => (
                    ResourceEvent::Error(reason.clone()),
                    ActionOutcome::failed(reason),
                ),
            }
        }
        Err(e) => {
            tracing::info!(error = %e, "Request settled with error");
            let reason = e.display_message();
            (
                ResourceEvent::Error(reason.clone()),
                ActionOutcome::failed(reason),
            )
        }
    };

    store.dispatch(wrap(event));
    outcome
}

/// Message-based classification for fetches: a `message` field means the
/// server declined, anything else must decode as the payload.
pub(crate) fn payload<T, K>(response: ApiResponse) -> Result<Settled<T, K>, String>
where
    T: DeserializeOwned,
{
    if let Some(message) = response.message() {
        return Ok(Settled::Failed(message.to_string()));
    }
    serde_json::from_value(response.body)
        .map(Settled::Loaded)
        .map_err(|e| format!("Unexpected response: {}", e))
}

/// Message-based classification for actions that return no payload.
pub(crate) fn completion<T, K>(tag: K) -> impl FnOnce(ApiResponse) -> Result<Settled<T, K>, String> {
    move |response| match response.message() {
        Some(message) => Ok(Settled::Failed(message.to_string())),
        None => Ok(Settled::Done(tag)),
    }
}

/// Status-based classification: any 2xx completes, its message is only
/// informational.
pub(crate) fn acknowledged<T, K>(tag: K) -> impl FnOnce(ApiResponse) -> Result<Settled<T, K>, String> {
    move |_| Ok(Settled::Done(tag))
}
