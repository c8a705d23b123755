//! Base trait for intents.

/// Marker trait for intent objects.
///
/// Intents represent:
/// - Lifecycle events from action creators (request, success, failure)
/// - Session events (logout, expired token)
/// - Resets dispatched by views after reacting to a terminal state
pub trait Intent: Send + 'static {}
