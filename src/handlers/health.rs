//! Student health records.

use crate::http::ApiClient;
use crate::models::{HealthRecord, HealthUpdate};
use crate::store::slices::{HealthEvent, HealthTag};
use crate::store::{Action, Store};

use super::{acknowledged, payload, run, ActionOutcome};

/// `GET /health/{studentId}`
///
/// A `null` body loads as "no record yet".
pub async fn fetch_record(store: &Store, api: &ApiClient, student_id: &str) -> ActionOutcome {
    let path = format!("/health/{}", student_id);
    run(
        store,
        Action::Health,
        api.get(&path),
        payload::<Option<HealthRecord>, HealthTag>,
    )
    .await
}

/// `POST /health/me/own`: the signed-in student saves their own record.
pub async fn save_own_record(store: &Store, api: &ApiClient, update: &HealthUpdate) -> ActionOutcome {
    run(
        store,
        Action::Health,
        api.post("/health/me/own", update),
        acknowledged(HealthTag::Saved),
    )
    .await
}

/// `POST /health/{studentId}`: staff save a student's record.
pub async fn save_record(
    store: &Store,
    api: &ApiClient,
    student_id: &str,
    update: &HealthUpdate,
) -> ActionOutcome {
    let path = format!("/health/{}", student_id);
    run(
        store,
        Action::Health,
        api.post(&path, update),
        acknowledged(HealthTag::Saved),
    )
    .await
}

pub fn reset(store: &Store) {
    store.dispatch(Action::Health(HealthEvent::Reset));
}
