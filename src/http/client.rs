use std::sync::Arc;

use parking_lot::RwLock;
use reqwest::header::ACCEPT;
use reqwest::{Client, Method, StatusCode};
use serde::Serialize;
use serde_json::Value;
use tracing::Instrument;
use uuid::Uuid;

use crate::config::ApiConfig;
use crate::http::error::{ApiError, SessionHookError};
use crate::session::Session;

/// Callback fired when the server rejects a request with 401.
pub type UnauthorizedHook = Arc<dyn Fn() -> Result<(), SessionHookError> + Send + Sync>;

/// A 2xx response: status plus the parsed body.
///
/// Empty bodies parse as `Value::Null`; non-JSON bodies as a JSON string.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiResponse {
    pub status: u16,
    pub body: Value,
}

impl ApiResponse {
    pub fn message(&self) -> Option<&str> {
        super::body_message(&self.body)
    }
}

/// Shared API client. Cheap to clone.
#[derive(Clone)]
pub struct ApiClient {
    inner: Arc<ClientInner>,
}

struct ClientInner {
    http: Client,
    base_url: String,
    session: Session,
    on_unauthorized: RwLock<Option<UnauthorizedHook>>,
}

impl ApiClient {
    /// Build a client for `config.base_url`.
    ///
    /// The base URL is used as given; environment overrides are applied by
    /// [`Config::with_env_overrides`](crate::config::Config::with_env_overrides).
    pub fn new(config: &ApiConfig, session: Session) -> Result<Self, ApiError> {
        let http = Client::builder()
            .timeout(config.timeout())
            .connect_timeout(config.connect_timeout())
            .build()
            .map_err(|source| ApiError::Build { source })?;

        Ok(Self {
            inner: Arc::new(ClientInner {
                http,
                base_url: config.base_url.trim_end_matches('/').to_string(),
                session,
                on_unauthorized: RwLock::new(None),
            }),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.inner.base_url
    }

    pub fn session(&self) -> &Session {
        &self.inner.session
    }

    /// Register the session-expired hook, replacing any previous one.
    pub fn on_unauthorized(&self, hook: UnauthorizedHook) {
        *self.inner.on_unauthorized.write() = Some(hook);
    }

    pub async fn get(&self, path: &str) -> Result<ApiResponse, ApiError> {
        self.send::<()>(Method::GET, path, None).await
    }

    pub async fn post<B>(&self, path: &str, body: &B) -> Result<ApiResponse, ApiError>
    where
        B: Serialize + ?Sized,
    {
        self.send(Method::POST, path, Some(body)).await
    }

    pub async fn put<B>(&self, path: &str, body: &B) -> Result<ApiResponse, ApiError>
    where
        B: Serialize + ?Sized,
    {
        self.send(Method::PUT, path, Some(body)).await
    }

    pub async fn delete(&self, path: &str) -> Result<ApiResponse, ApiError> {
        self.send::<()>(Method::DELETE, path, None).await
    }

    async fn send<B>(
        &self,
        method: Method,
        path: &str,
        body: Option<&B>,
    ) -> Result<ApiResponse, ApiError>
    where
        B: Serialize + ?Sized,
    {
        let request_id = Uuid::new_v4().to_string();
        let span = tracing::debug_span!(
            "api_request",
            method = %method,
            path = %path,
            request_id = %request_id,
        );
        self.do_send(method, path, body, request_id)
            .instrument(span)
            .await
    }

    async fn do_send<B>(
        &self,
        method: Method,
        path: &str,
        body: Option<&B>,
        request_id: String,
    ) -> Result<ApiResponse, ApiError>
    where
        B: Serialize + ?Sized,
    {
        let url = format!("{}{}", self.inner.base_url, path);
        let mut builder = self
            .inner
            .http
            .request(method, &url)
            .header(ACCEPT, "application/json")
            .header("x-request-id", request_id.as_str());

        match self.inner.session.token() {
            Some(token) => builder = builder.bearer_auth(token.expose()),
            None => tracing::debug!("No stored token, sending unauthenticated"),
        }

        if let Some(body) = body {
            builder = builder.json(body);
        }

        let response = builder.send().await.map_err(|source| ApiError::Transport {
            url: url.clone(),
            source,
        })?;

        let status = response.status();
        let bytes = response
            .bytes()
            .await
            .map_err(|source| ApiError::Transport { url, source })?;
        let body = parse_body(&bytes);

        if status == StatusCode::UNAUTHORIZED {
            tracing::warn!("Server rejected credentials");
            self.notify_unauthorized();
            return Err(ApiError::Unauthorized { body });
        }

        if !status.is_success() {
            tracing::info!(status = status.as_u16(), "API request failed");
            return Err(ApiError::Status {
                status: status.as_u16(),
                body,
            });
        }

        tracing::debug!(status = status.as_u16(), "API request completed");
        Ok(ApiResponse {
            status: status.as_u16(),
            body: body.unwrap_or(Value::Null),
        })
    }

    /// Fire the session-expired hook. Its failures never reach the caller.
    fn notify_unauthorized(&self) {
        // Clone out so the hook may re-register without deadlocking.
        let hook = self.inner.on_unauthorized.read().clone();
        let Some(hook) = hook else {
            tracing::debug!("No session hook registered");
            return;
        };
        if let Err(e) = hook() {
            tracing::warn!(error = %e, "Session-expired hook failed; ignoring");
        }
    }
}

fn parse_body(bytes: &[u8]) -> Option<Value> {
    if bytes.iter().all(u8::is_ascii_whitespace) {
        return None;
    }
    match serde_json::from_slice(bytes) {
        Ok(value) => Some(value),
        Err(_) => Some(Value::String(String::from_utf8_lossy(bytes).into_owned())),
    }
}
