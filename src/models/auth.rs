use serde::{Deserialize, Serialize};

use super::Extra;

/// Dashboard role a user signs in as.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Role {
    Admin,
    Student,
    Teacher,
    Finance,
}

impl Role {
    /// Login endpoint for this role, e.g. `/AdminLogin`.
    pub fn login_path(&self) -> &'static str {
        match self {
            Self::Admin => "/AdminLogin",
            Self::Student => "/StudentLogin",
            Self::Teacher => "/TeacherLogin",
            Self::Finance => "/FinanceLogin",
        }
    }

    /// Parse from a CLI/config value. Case-insensitive.
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "admin" => Some(Self::Admin),
            "student" => Some(Self::Student),
            "teacher" => Some(Self::Teacher),
            "finance" => Some(Self::Finance),
            _ => None,
        }
    }
}

/// Login form. Students sign in with roll number and name, everyone else
/// with email.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Credentials {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub roll_num: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub student_name: Option<String>,
    pub password: String,
}

/// The signed-in user as kept in state and storage. Never holds the token.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CurrentUser {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<Role>,
    #[serde(flatten)]
    pub extra: Extra,
}

/// Login response body: the user plus the issued token.
#[derive(Debug, Clone, Deserialize)]
pub struct LoginResponse {
    #[serde(default)]
    pub token: Option<String>,
    #[serde(flatten)]
    pub user: CurrentUser,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn login_paths_follow_role() {
        assert_eq!(Role::Admin.login_path(), "/AdminLogin");
        assert_eq!(Role::Finance.login_path(), "/FinanceLogin");
    }

    #[test]
    fn role_parsing_is_case_insensitive() {
        assert_eq!(Role::parse("Teacher"), Some(Role::Teacher));
        assert_eq!(Role::parse("STUDENT"), Some(Role::Student));
        assert_eq!(Role::parse("janitor"), None);
    }

    #[test]
    fn login_response_splits_token_from_user() {
        let resp: LoginResponse = serde_json::from_str(
            r#"{"_id":"a1","name":"Ada","role":"Admin","token":"jwt","schoolName":"Hill"}"#,
        )
        .unwrap();
        assert_eq!(resp.token.as_deref(), Some("jwt"));
        assert_eq!(resp.user.role, Some(Role::Admin));
        assert!(!resp.user.extra.contains_key("token"));
        assert_eq!(resp.user.extra["schoolName"], "Hill");
    }
}
