//! Wire records exchanged with the school API.
//!
//! Records name the fields the client actually reads and keep every other
//! server field in a flattened map, so the client does not impose a schema.

mod attendance;
mod auth;
mod health;
mod library;
mod teacher;

pub use attendance::{AttendanceMark, AttendanceStatus};
pub use auth::{Credentials, CurrentUser, LoginResponse, Role};
pub use health::{HealthRecord, HealthUpdate};
pub use library::{Book, BookDraft, Sale, SaleRequest};
pub use teacher::{TeacherProfile, TeacherUpdate};

/// Extra server fields carried through untouched.
pub type Extra = serde_json::Map<String, serde_json::Value>;
