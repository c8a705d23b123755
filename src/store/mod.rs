//! Centralized client state.
//!
//! [`Store`] holds one [`AppState`] with a sub-state per domain. State changes
//! only by dispatching an [`Action`] through [`AppReducer`]. Subscribers are
//! notified after every dispatch, either through a callback registered with
//! [`Store::subscribe`] or through the channel returned by [`Store::watch`].

pub mod library;
pub mod mvi;
pub mod resource;
pub mod slices;

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Weak};

use parking_lot::{Mutex, RwLock};
use serde::Serialize;
use tokio::sync::watch;

use crate::models::CurrentUser;
use library::{LibraryIntent, LibraryReducer, LibraryState};
use mvi::{Intent, Reducer, SliceState};
use resource::Status;
use slices::{
    AttendanceEvent, AttendanceReducer, AttendanceState, AuthEvent, AuthReducer, AuthState,
    HealthEvent, HealthReducer, HealthState, TeacherEvent, TeacherReducer, TeacherState,
};

/// Message left in `auth.error` when the server rejects the stored token.
pub const SESSION_EXPIRED: &str = "Session expired";

/// The whole client state.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct AppState {
    pub auth: AuthState,
    pub library: LibraryState,
    pub health: HealthState,
    pub teacher: TeacherState,
    pub attendance: AttendanceState,
}

impl SliceState for AppState {}

impl AppState {
    /// Initial state with a previously persisted user signed in.
    pub fn with_user(user: Option<CurrentUser>) -> Self {
        let mut state = Self::default();
        state.auth.data = user;
        state
    }
}

/// Everything that can be dispatched to the store.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    Auth(AuthEvent),
    Library(LibraryIntent),
    Health(HealthEvent),
    Teacher(TeacherEvent),
    Attendance(AttendanceEvent),
    /// The user signed out.
    Logout,
    /// The server rejected the stored token.
    SessionExpired,
}

impl Intent for Action {}

impl Action {
    /// Short name for logs and event traces, e.g. `library/sales/done`.
    pub fn label(&self) -> String {
        match self {
            Action::Auth(event) => format!("auth/{}", event.label()),
            Action::Library(intent) => intent.label(),
            Action::Health(event) => format!("health/{}", event.label()),
            Action::Teacher(event) => format!("teacher/{}", event.label()),
            Action::Attendance(event) => format!("attendance/{}", event.label()),
            Action::Logout => "session/logout".to_string(),
            Action::SessionExpired => "session/expired".to_string(),
        }
    }
}

/// Root reducer: routes each action to its slice.
pub struct AppReducer;

impl Reducer for AppReducer {
    type State = AppState;
    type Intent = Action;

    fn reduce(state: Self::State, intent: Self::Intent) -> Self::State {
        match intent {
            Action::Auth(event) => AppState {
                auth: AuthReducer::reduce(state.auth, event),
                ..state
            },
            Action::Library(intent) => AppState {
                library: LibraryReducer::reduce(state.library, intent),
                ..state
            },
            Action::Health(event) => AppState {
                health: HealthReducer::reduce(state.health, event),
                ..state
            },
            Action::Teacher(event) => AppState {
                teacher: TeacherReducer::reduce(state.teacher, event),
                ..state
            },
            Action::Attendance(event) => AppState {
                attendance: AttendanceReducer::reduce(state.attendance, event),
                ..state
            },
            // Every slice is user-scoped.
            Action::Logout => AppState::default(),
            Action::SessionExpired => {
                let mut next = AppState::default();
                next.auth.error = Some(SESSION_EXPIRED.to_string());
                next.auth.status = Status::Error;
                next
            }
        }
    }
}

type Listener = Arc<dyn Fn(&Action, &AppState) + Send + Sync>;

/// Handle returned by [`Store::subscribe`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ListenerId(u64);

/// Shared, subscribable state container. Cheap to clone.
#[derive(Clone)]
pub struct Store {
    inner: Arc<StoreInner>,
}

/// Non-owning store handle, for callers that must not keep the store alive.
#[derive(Clone)]
pub struct WeakStore {
    inner: Weak<StoreInner>,
}

struct StoreInner {
    state: Mutex<AppState>,
    listeners: RwLock<Vec<(ListenerId, Listener)>>,
    next_listener: AtomicU64,
    snapshots: watch::Sender<AppState>,
}

impl Store {
    pub fn new(initial: AppState) -> Self {
        let (snapshots, _) = watch::channel(initial.clone());
        Self {
            inner: Arc::new(StoreInner {
                state: Mutex::new(initial),
                listeners: RwLock::new(Vec::new()),
                next_listener: AtomicU64::new(0),
                snapshots,
            }),
        }
    }

    /// Snapshot of the current state.
    pub fn state(&self) -> AppState {
        self.inner.state.lock().clone()
    }

    /// Read part of the state without cloning all of it.
    pub fn select<R>(&self, f: impl FnOnce(&AppState) -> R) -> R {
        f(&self.inner.state.lock())
    }

    /// Apply one action.
    ///
    /// The reducer runs and the watch channel is updated under the state
    /// lock, so actions are applied and published one at a time in the same
    /// order. Subscribers run after the lock is released and may dispatch.
    pub fn dispatch(&self, action: Action) {
        let label = action.label();
        let snapshot = {
            let mut state = self.inner.state.lock();
            let current = std::mem::take(&mut *state);
            *state = AppReducer::reduce(current, action.clone());
            self.inner.snapshots.send_replace(state.clone());
            state.clone()
        };
        tracing::debug!(action = %label, "Dispatched");

        let listeners: Vec<Listener> = self
            .inner
            .listeners
            .read()
            .iter()
            .map(|(_, listener)| Arc::clone(listener))
            .collect();
        for listener in listeners {
            listener(&action, &snapshot);
        }
    }

    /// Call `listener` after every dispatch with the action and new state.
    pub fn subscribe<F>(&self, listener: F) -> ListenerId
    where
        F: Fn(&Action, &AppState) + Send + Sync + 'static,
    {
        let id = ListenerId(self.inner.next_listener.fetch_add(1, Ordering::Relaxed));
        self.inner.listeners.write().push((id, Arc::new(listener)));
        id
    }

    /// Remove a listener. Unknown ids are ignored.
    pub fn unsubscribe(&self, id: ListenerId) {
        self.inner.listeners.write().retain(|(existing, _)| *existing != id);
    }

    /// Receiver that always holds the latest state.
    pub fn watch(&self) -> watch::Receiver<AppState> {
        self.inner.snapshots.subscribe()
    }

    pub fn downgrade(&self) -> WeakStore {
        WeakStore {
            inner: Arc::downgrade(&self.inner),
        }
    }
}

impl Default for Store {
    fn default() -> Self {
        Self::new(AppState::default())
    }
}

impl WeakStore {
    pub fn upgrade(&self) -> Option<Store> {
        self.inner.upgrade().map(|inner| Store { inner })
    }
}
