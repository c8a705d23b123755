use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AttendanceStatus {
    Present,
    Absent,
}

/// Request body for `POST /Attendance/Mark`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AttendanceMark {
    pub student_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subject_id: Option<String>,
    /// Calendar date, `YYYY-MM-DD`.
    pub date: String,
    pub status: AttendanceStatus,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mark_omits_missing_subject() {
        let mark = AttendanceMark {
            student_id: "st1".to_string(),
            subject_id: None,
            date: "2026-10-01".to_string(),
            status: AttendanceStatus::Present,
        };
        let json = serde_json::to_value(&mark).unwrap();
        assert_eq!(json["studentId"], "st1");
        assert_eq!(json["status"], "Present");
        assert!(json.get("subjectId").is_none());
    }
}
