//! Sign-in, sign-out and session expiry.

use std::sync::Arc;

use crate::http::{ApiClient, ApiResponse, SessionHookError};
use crate::models::{Credentials, CurrentUser, LoginResponse, Role};
use crate::session::{SecureString, Session};
use crate::store::resource::NoTag;
use crate::store::slices::AuthEvent;
use crate::store::{Action, Store};

use super::{run, ActionOutcome, Settled};

/// `POST /{Role}Login`
///
/// On success the token and the user are persisted before the user lands in
/// the auth slice. A persistence failure settles as an error.
pub async fn login(
    store: &Store,
    api: &ApiClient,
    role: Role,
    credentials: &Credentials,
) -> ActionOutcome {
    let session = api.session().clone();
    run(
        store,
        Action::Auth,
        api.post(role.login_path(), credentials),
        move |response| accept_login(&session, role, response),
    )
    .await
}

fn accept_login(
    session: &Session,
    role: Role,
    response: ApiResponse,
) -> Result<Settled<Option<CurrentUser>, NoTag>, String> {
    if let Some(message) = response.message() {
        return Ok(Settled::Failed(message.to_string()));
    }

    let LoginResponse { token, mut user } = serde_json::from_value(response.body)
        .map_err(|e| format!("Unexpected response: {}", e))?;
    if user.role.is_none() {
        user.role = Some(role);
    }

    if let Some(token) = token.filter(|t| !t.is_empty()) {
        session
            .store_token(&SecureString::new(token))
            .map_err(|e| e.to_string())?;
    }
    session.store_user(&user).map_err(|e| e.to_string())?;

    tracing::info!(user = %user.id, role = ?user.role, "Signed in");
    Ok(Settled::Loaded(Some(user)))
}

/// Forget the stored session and clear every user-scoped slice.
pub fn logout(store: &Store, session: &Session) -> ActionOutcome {
    let outcome = match session.clear() {
        Ok(()) => ActionOutcome::ok(None),
        Err(e) => {
            tracing::warn!(error = %e, "Failed to clear stored session");
            ActionOutcome::failed(e.to_string())
        }
    };
    store.dispatch(Action::Logout);
    outcome
}

/// Wire the client's 401 hook to the store.
///
/// The hook holds only a weak store handle, so the client never keeps the
/// store alive. The store is reset before storage is cleared, so a storage
/// failure never leaves the user signed in. Both failures are reported to
/// the client, which logs and swallows them.
pub fn install_session_guard(store: &Store, api: &ApiClient) {
    let store = store.downgrade();
    let session = api.session().clone();
    api.on_unauthorized(Arc::new(move || {
        let store = store.upgrade();
        if let Some(store) = &store {
            store.dispatch(Action::SessionExpired);
        }
        session.clear()?;
        store.map(drop).ok_or(SessionHookError::StoreUnavailable)
    }));
}

pub fn reset(store: &Store) {
    store.dispatch(Action::Auth(AuthEvent::Reset));
}
