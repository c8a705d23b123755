//! Shared test utilities and mock infrastructure.

#![allow(dead_code, unused_imports)]

pub mod mock_backend;

use parking_lot::Mutex;
use schoolhub::config::ApiConfig;
use schoolhub::http::ApiClient;
use schoolhub::session::Session;
use schoolhub::store::{Action, Store};
use std::net::TcpListener;
use std::sync::Arc;

pub type EventLog = Arc<Mutex<Vec<String>>>;

/// Client pointed at `base_url` with in-memory storage.
pub fn client_for(base_url: &str) -> ApiClient {
    client_with_session(base_url, Session::in_memory())
}

pub fn client_with_session(base_url: &str, session: Session) -> ApiClient {
    let config = ApiConfig {
        base_url: base_url.to_string(),
        timeout_seconds: 5,
        connect_timeout_seconds: 2,
    };
    ApiClient::new(&config, session).expect("client builds")
}

/// Record every dispatched action label.
pub fn record_actions(store: &Store) -> EventLog {
    let log: EventLog = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&log);
    store.subscribe(move |action: &Action, _| sink.lock().push(action.label()));
    log
}

/// An address nothing listens on.
pub fn closed_address() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").expect("Failed to bind to free port");
    let port = listener.local_addr().unwrap().port();
    drop(listener);
    format!("http://127.0.0.1:{}", port)
}
