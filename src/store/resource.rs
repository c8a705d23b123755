//! Generic async-resource slice.
//!
//! Every domain slice is a [`Resource`] driven by [`ResourceEvent`]s through
//! [`ResourceReducer`]. Domains differ only in the payload type `T` and in
//! their set of completion tags `K`.

use std::fmt::Debug;
use std::marker::PhantomData;

use serde::{Serialize, Serializer};

use super::mvi::{Intent, Reducer, SliceState};

/// A domain-specific success outcome that carries no new data
/// (e.g. a book was added or sold).
pub trait Tag: Copy + PartialEq + Debug + Send + Sync + 'static {
    /// Stable status string exposed to views, e.g. `"sold"`.
    fn label(&self) -> &'static str;
}

/// Tag set for slices without domain-specific outcomes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoTag {}

impl Tag for NoTag {
    fn label(&self) -> &'static str {
        match *self {}
    }
}

/// Last outcome of a slice.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status<K> {
    Idle,
    Loading,
    Success,
    /// Server answered but rejected the operation.
    Failed,
    /// Transport or unexpected failure.
    Error,
    Done(K),
}

impl<K> Default for Status<K> {
    fn default() -> Self {
        Status::Idle
    }
}

impl<K: Tag> Status<K> {
    pub fn label(&self) -> &'static str {
        match self {
            Status::Idle => "idle",
            Status::Loading => "loading",
            Status::Success => "success",
            Status::Failed => "failed",
            Status::Error => "error",
            Status::Done(tag) => tag.label(),
        }
    }
}

impl<K: Tag> Serialize for Status<K> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.label())
    }
}

/// State of one async resource.
///
/// After a settled request at most one of `error` and `response` is set.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(bound(serialize = "T: Serialize, K: Tag"))]
pub struct Resource<T, K> {
    pub data: T,
    pub loading: bool,
    /// Transport or unexpected failure message.
    pub error: Option<String>,
    /// Application-level failure message from the server.
    pub response: Option<String>,
    pub status: Status<K>,
}

impl<T: Default, K> Default for Resource<T, K> {
    fn default() -> Self {
        Self {
            data: T::default(),
            loading: false,
            error: None,
            response: None,
            status: Status::Idle,
        }
    }
}

impl<T, K> SliceState for Resource<T, K>
where
    T: Clone + PartialEq + Default + Send + 'static,
    K: Tag,
{
}

impl<T, K: Tag> Resource<T, K> {
    /// True once the last request reached a terminal event.
    pub fn is_settled(&self) -> bool {
        !matches!(self.status, Status::Idle | Status::Loading)
    }

    /// Whichever failure message is set, if any.
    pub fn failure_message(&self) -> Option<&str> {
        self.response.as_deref().or(self.error.as_deref())
    }
}

/// Lifecycle events for a [`Resource`].
#[derive(Debug, Clone, PartialEq)]
pub enum ResourceEvent<T, K> {
    /// A request went out.
    Request,
    /// Success with a fresh payload.
    Loaded(T),
    /// Success without a payload.
    Done(K),
    /// Application-level failure with the server's message.
    Failed(String),
    /// Transport or unexpected failure.
    Error(String),
    /// Back to idle, keeping data. Views send this after reacting to a
    /// terminal status.
    Reset,
    /// Back to the initial state.
    Clear,
}

impl<T, K> Intent for ResourceEvent<T, K>
where
    T: Send + 'static,
    K: Send + 'static,
{
}

impl<T, K> ResourceEvent<T, K> {
    pub fn label(&self) -> &'static str {
        match self {
            ResourceEvent::Request => "request",
            ResourceEvent::Loaded(_) => "loaded",
            ResourceEvent::Done(_) => "done",
            ResourceEvent::Failed(_) => "failed",
            ResourceEvent::Error(_) => "error",
            ResourceEvent::Reset => "reset",
            ResourceEvent::Clear => "clear",
        }
    }

    /// Events that settle a request.
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            ResourceEvent::Loaded(_)
                | ResourceEvent::Done(_)
                | ResourceEvent::Failed(_)
                | ResourceEvent::Error(_)
        )
    }
}

/// The one reducer shared by every resource slice.
pub struct ResourceReducer<T, K>(PhantomData<fn() -> (T, K)>);

impl<T, K> Reducer for ResourceReducer<T, K>
where
    T: Clone + PartialEq + Default + Send + 'static,
    K: Tag,
{
    type State = Resource<T, K>;
    type Intent = ResourceEvent<T, K>;

    fn reduce(state: Self::State, intent: Self::Intent) -> Self::State {
        match intent {
            ResourceEvent::Request => Resource {
                loading: true,
                error: None,
                response: None,
                status: Status::Loading,
                ..state
            },
            ResourceEvent::Loaded(data) => Resource {
                data,
                loading: false,
                error: None,
                response: None,
                status: Status::Success,
            },
            ResourceEvent::Done(tag) => Resource {
                loading: false,
                error: None,
                response: None,
                status: Status::Done(tag),
                ..state
            },
            ResourceEvent::Failed(message) => Resource {
                loading: false,
                error: None,
                response: Some(message),
                status: Status::Failed,
                ..state
            },
            ResourceEvent::Error(message) => Resource {
                loading: false,
                error: Some(message),
                response: None,
                status: Status::Error,
                ..state
            },
            ResourceEvent::Reset => Resource {
                loading: false,
                error: None,
                response: None,
                status: Status::Idle,
                ..state
            },
            ResourceEvent::Clear => Resource::default(),
        }
    }
}
