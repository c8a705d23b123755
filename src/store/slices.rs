//! Single-resource slices: health, teacher, attendance and auth.

use crate::models::{CurrentUser, HealthRecord, TeacherProfile};

use super::resource::{NoTag, Resource, ResourceEvent, ResourceReducer, Tag};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HealthTag {
    Saved,
}

impl Tag for HealthTag {
    fn label(&self) -> &'static str {
        "saved"
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TeacherTag {
    Updated,
}

impl Tag for TeacherTag {
    fn label(&self) -> &'static str {
        "updated"
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttendanceTag {
    Marked,
}

impl Tag for AttendanceTag {
    fn label(&self) -> &'static str {
        "marked"
    }
}

pub type HealthState = Resource<Option<HealthRecord>, HealthTag>;
pub type HealthEvent = ResourceEvent<Option<HealthRecord>, HealthTag>;
pub type HealthReducer = ResourceReducer<Option<HealthRecord>, HealthTag>;

pub type TeacherState = Resource<Option<TeacherProfile>, TeacherTag>;
pub type TeacherEvent = ResourceEvent<Option<TeacherProfile>, TeacherTag>;
pub type TeacherReducer = ResourceReducer<Option<TeacherProfile>, TeacherTag>;

/// Marking attendance yields no data; only the status matters.
pub type AttendanceState = Resource<(), AttendanceTag>;
pub type AttendanceEvent = ResourceEvent<(), AttendanceTag>;
pub type AttendanceReducer = ResourceReducer<(), AttendanceTag>;

pub type AuthState = Resource<Option<CurrentUser>, NoTag>;
pub type AuthEvent = ResourceEvent<Option<CurrentUser>, NoTag>;
pub type AuthReducer = ResourceReducer<Option<CurrentUser>, NoTag>;
