//! Teacher profile.

use crate::http::ApiClient;
use crate::models::{TeacherProfile, TeacherUpdate};
use crate::store::slices::{TeacherEvent, TeacherTag};
use crate::store::{Action, Store};

use super::{acknowledged, payload, run, ActionOutcome};

/// `GET /Teacher/{id}`
pub async fn fetch_profile(store: &Store, api: &ApiClient, teacher_id: &str) -> ActionOutcome {
    let path = format!("/Teacher/{}", teacher_id);
    run(
        store,
        Action::Teacher,
        api.get(&path),
        payload::<Option<TeacherProfile>, TeacherTag>,
    )
    .await
}

/// `PUT /Teacher/{id}`
pub async fn update_profile(
    store: &Store,
    api: &ApiClient,
    teacher_id: &str,
    update: &TeacherUpdate,
) -> ActionOutcome {
    let path = format!("/Teacher/{}", teacher_id);
    run(
        store,
        Action::Teacher,
        api.put(&path, update),
        acknowledged(TeacherTag::Updated),
    )
    .await
}

pub fn reset(store: &Store) {
    store.dispatch(Action::Teacher(TeacherEvent::Reset));
}
