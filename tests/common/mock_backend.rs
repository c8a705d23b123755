//! Scripted stand-in for the school API.
//!
//! Replies are served in the order they were queued, whatever the route. Every
//! call is recorded so tests can assert on method, path, headers and body.

use axum::body::Bytes;
use axum::extract::State;
use axum::http::{HeaderMap, Method, StatusCode, Uri};
use axum::response::IntoResponse;
use axum::Router;
use parking_lot::Mutex;
use serde_json::Value;
use std::collections::VecDeque;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio::sync::oneshot;

/// One request as the server saw it.
#[derive(Debug, Clone)]
pub struct RecordedCall {
    pub method: String,
    pub path: String,
    pub headers: HeaderMap,
    pub body: Bytes,
}

impl RecordedCall {
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).and_then(|v| v.to_str().ok())
    }

    /// Request body as JSON; `Null` when absent or not JSON.
    pub fn json(&self) -> Value {
        serde_json::from_slice(&self.body).unwrap_or(Value::Null)
    }
}

/// A queued reply.
#[derive(Debug, Clone)]
pub struct MockReply {
    status: StatusCode,
    body: Option<String>,
}

impl MockReply {
    /// 200 with a raw JSON body.
    pub fn json(body: &str) -> Self {
        Self {
            status: StatusCode::OK,
            body: Some(body.to_string()),
        }
    }

    /// Error status with the server's usual `{"message": ...}` body.
    pub fn error(status: u16, message: &str) -> Self {
        Self {
            status: StatusCode::from_u16(status).expect("valid status"),
            body: Some(serde_json::json!({ "message": message }).to_string()),
        }
    }

    /// Status line only.
    pub fn empty(status: u16) -> Self {
        Self {
            status: StatusCode::from_u16(status).expect("valid status"),
            body: None,
        }
    }
}

#[derive(Default)]
struct Script {
    replies: VecDeque<MockReply>,
    calls: Vec<RecordedCall>,
}

type Shared = Arc<Mutex<Script>>;

pub struct MockBackend {
    addr: SocketAddr,
    script: Shared,
    stop: Option<oneshot::Sender<()>>,
}

impl MockBackend {
    /// Bind an ephemeral port and serve until dropped.
    pub async fn start() -> Self {
        let script: Shared = Arc::default();
        let app = Router::new()
            .fallback(serve_next)
            .with_state(Arc::clone(&script));

        let listener = TcpListener::bind("127.0.0.1:0")
            .await
            .expect("bind mock API");
        let addr = listener.local_addr().expect("mock API address");
        let (stop, stopped) = oneshot::channel::<()>();

        tokio::spawn(async move {
            let _ = axum::serve(listener, app)
                .with_graceful_shutdown(async {
                    let _ = stopped.await;
                })
                .await;
        });

        Self {
            addr,
            script,
            stop: Some(stop),
        }
    }

    pub fn base_url(&self) -> String {
        format!("http://{}", self.addr)
    }

    pub fn reply(&self, reply: MockReply) {
        self.script.lock().replies.push_back(reply);
    }

    pub fn calls(&self) -> Vec<RecordedCall> {
        self.script.lock().calls.clone()
    }

    pub fn last_call(&self) -> RecordedCall {
        self.script
            .lock()
            .calls
            .last()
            .cloned()
            .expect("mock API received no calls")
    }
}

impl Drop for MockBackend {
    fn drop(&mut self) {
        if let Some(stop) = self.stop.take() {
            let _ = stop.send(());
        }
    }
}

/// Record the call and answer with the next queued reply, or `{}` when the
/// queue is empty.
async fn serve_next(
    State(script): State<Shared>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    body: Bytes,
) -> impl IntoResponse {
    let reply = {
        let mut script = script.lock();
        script.calls.push(RecordedCall {
            method: method.to_string(),
            path: uri.path().to_string(),
            headers,
            body,
        });
        script.replies.pop_front()
    };

    match reply {
        Some(MockReply {
            status,
            body: Some(body),
        }) => (status, [("content-type", "application/json")], body).into_response(),
        Some(MockReply { status, body: None }) => status.into_response(),
        None => (StatusCode::OK, "{}").into_response(),
    }
}
