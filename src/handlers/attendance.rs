use crate::http::ApiClient;
use crate::models::AttendanceMark;
use crate::store::slices::{AttendanceEvent, AttendanceTag};
use crate::store::{Action, Store};

use super::{acknowledged, run, ActionOutcome};

/// `POST /Attendance/Mark`
pub async fn mark(store: &Store, api: &ApiClient, mark: &AttendanceMark) -> ActionOutcome {
    run(
        store,
        Action::Attendance,
        api.post("/Attendance/Mark", mark),
        acknowledged(AttendanceTag::Marked),
    )
    .await
}

pub fn reset(store: &Store) {
    store.dispatch(Action::Attendance(AttendanceEvent::Reset));
}
